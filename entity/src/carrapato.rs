use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set, Unchanged};
use shared::{Carrapato, CarrapatoId, Localizacao, LocalizacaoError, StatusBateria, StatusDeUso};
use thiserror::Error;

/// Relational projection of a carrapato, one row per tag.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carrapato")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub codigo_serial: String,
    pub status_bateria: StatusBateria,
    pub status_de_uso: StatusDeUso,
    pub id_patio: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub longitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    pub async fn find_by_codigo_serial(
        codigo_serial: &str,
        db: &DatabaseConnection,
    ) -> Result<Option<Model>, DbErr> {
        Self::find()
            .filter(Column::CodigoSerial.eq(codigo_serial))
            .one(db)
            .await
    }
}

/// A row that cannot be turned into a [`Carrapato`]
#[derive(Debug, Error)]
pub enum RowMappingError {
    #[error("carrapato row {id} has only one of latitude / longitude")]
    PartialLocation { id: i32 },

    #[error("carrapato row {id} has a invalid location: {source}")]
    InvalidLocation { id: i32, source: LocalizacaoError },
}

impl TryFrom<Model> for Carrapato {
    type Error = RowMappingError;

    fn try_from(row: Model) -> Result<Self, Self::Error> {
        let localizacao = match (row.latitude, row.longitude) {
            (Some(lat), Some(lng)) => Some(
                Localizacao::new(lat, lng)
                    .map_err(|source| RowMappingError::InvalidLocation { id: row.id, source })?,
            ),
            (None, None) => None,
            _ => return Err(RowMappingError::PartialLocation { id: row.id }),
        };

        Ok(Carrapato::rehydrate(
            CarrapatoId::from(row.id),
            row.codigo_serial,
            row.status_bateria,
            row.status_de_uso,
            row.id_patio,
            localizacao,
        ))
    }
}

/// Maps a carrapato to the active model used to insert it, `id` and
/// `created_at` are left for the database to generate.
pub fn insert_model(carrapato: &Carrapato) -> ActiveModel {
    let loc = carrapato.ultima_localizacao();

    ActiveModel {
        id: NotSet,
        created_at: NotSet,
        codigo_serial: Set(carrapato.codigo_serial().to_owned()),
        status_bateria: Set(carrapato.status_bateria()),
        status_de_uso: Set(carrapato.status_de_uso()),
        id_patio: Set(carrapato.id_patio()),
        latitude: Set(loc.map(Localizacao::latitude)),
        longitude: Set(loc.map(Localizacao::longitude)),
    }
}

/// Maps a carrapato to the active model that overwrites every mutable
/// column of the row with primary key `id`.
pub fn replace_model(id: i32, carrapato: &Carrapato) -> ActiveModel {
    ActiveModel {
        id: Unchanged(id),
        ..insert_model(carrapato)
    }
}
