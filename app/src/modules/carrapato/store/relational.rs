use super::{CarrapatoStore, StoreError};
use anyhow::Context;
use async_trait::async_trait;
use entity::carrapato::{self, insert_model, replace_model};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use shared::{Carrapato, CarrapatoId};
use std::sync::Arc;

/// Carrapato store over the relational `carrapato` table
#[derive(Clone)]
pub struct SeaOrmCarrapatoStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCarrapatoStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }
}

impl From<entity::RowMappingError> for StoreError {
    fn from(e: entity::RowMappingError) -> Self {
        StoreError::MalformedRecord(e.to_string())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl CarrapatoStore for SeaOrmCarrapatoStore {
    #[tracing::instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<Carrapato>, StoreError> {
        let rows = carrapato::Entity::find()
            .order_by_asc(carrapato::Column::Id)
            .all(self.db.as_ref())
            .await
            .context("failed to query carrapatos")?;

        rows.into_iter()
            .map(|row| Carrapato::try_from(row).map_err(StoreError::from))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_codigo_serial(
        &self,
        codigo_serial: &str,
    ) -> Result<Option<Carrapato>, StoreError> {
        let row = carrapato::Entity::find_by_codigo_serial(codigo_serial, self.db.as_ref())
            .await
            .context("failed to query carrapato by codigo serial")?;

        Ok(row.map(Carrapato::try_from).transpose()?)
    }

    #[tracing::instrument(skip_all, fields(codigo_serial = carrapato.codigo_serial()))]
    async fn insert(&self, carrapato: &Carrapato) -> Result<(), StoreError> {
        match insert_model(carrapato).insert(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::CodigoSerialInUse),
            Err(e) => Err(anyhow::Error::new(e)
                .context("failed to insert carrapato")
                .into()),
        }
    }

    #[tracing::instrument(skip(self, carrapato))]
    async fn replace(&self, id: &CarrapatoId, carrapato: &Carrapato) -> Result<bool, StoreError> {
        // a identity that is not a serial id was not assigned by this store
        let Ok(id) = id.as_str().parse::<i32>() else {
            return Ok(false);
        };

        match replace_model(id, carrapato).update(self.db.as_ref()).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context("failed to replace carrapato")
                .into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_codigo_serial(&self, codigo_serial: &str) -> Result<u64, StoreError> {
        let result = carrapato::Entity::delete_many()
            .filter(carrapato::Column::CodigoSerial.eq(codigo_serial))
            .exec(self.db.as_ref())
            .await
            .context("failed to delete carrapato")?;

        Ok(result.rows_affected)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.ping().await.context("database ping failed")?;
        Ok(())
    }
}
