use super::{CarrapatoStore, StoreError};
use crate::document::carrapato::{CarrapatoDocument, DocumentMappingError};
use anyhow::Context;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    Collection, Database,
};
use shared::{Carrapato, CarrapatoId};

/// server error code of a write rejected by a unique index
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Carrapato store over the mongodb `Carrapatos` collection
#[derive(Clone)]
pub struct MongoCarrapatoStore {
    db: Database,
    collection: Collection<CarrapatoDocument>,
}

impl MongoCarrapatoStore {
    pub fn new(db: Database, collection: Collection<CarrapatoDocument>) -> Self {
        Self { db, collection }
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

impl From<DocumentMappingError> for StoreError {
    fn from(e: DocumentMappingError) -> Self {
        StoreError::MalformedRecord(e.to_string())
    }
}

#[async_trait]
impl CarrapatoStore for MongoCarrapatoStore {
    #[tracing::instrument(skip_all)]
    async fn find_all(&self) -> Result<Vec<Carrapato>, StoreError> {
        let documents: Vec<CarrapatoDocument> = self
            .collection
            .find(None, None)
            .await
            .context("failed to query carrapatos")?
            .try_collect()
            .await
            .context("failed to read carrapatos cursor")?;

        documents
            .into_iter()
            .map(|d| Carrapato::try_from(d).map_err(StoreError::from))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_codigo_serial(
        &self,
        codigo_serial: &str,
    ) -> Result<Option<Carrapato>, StoreError> {
        let document = self
            .collection
            .find_one(doc! { "CodigoSerial": codigo_serial }, None)
            .await
            .context("failed to query carrapato by codigo serial")?;

        Ok(document.map(Carrapato::try_from).transpose()?)
    }

    #[tracing::instrument(skip_all, fields(codigo_serial = carrapato.codigo_serial()))]
    async fn insert(&self, carrapato: &Carrapato) -> Result<(), StoreError> {
        let document = CarrapatoDocument {
            id: None,
            ..CarrapatoDocument::from(carrapato)
        };

        match self.collection.insert_one(&document, None).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::CodigoSerialInUse),
            Err(e) => Err(anyhow::Error::new(e)
                .context("failed to insert carrapato")
                .into()),
        }
    }

    #[tracing::instrument(skip(self, carrapato))]
    async fn replace(&self, id: &CarrapatoId, carrapato: &Carrapato) -> Result<bool, StoreError> {
        // a identity that is not a ObjectId was not assigned by this store
        let Ok(oid) = ObjectId::parse_str(id.as_str()) else {
            return Ok(false);
        };

        let document = CarrapatoDocument {
            id: Some(oid),
            ..CarrapatoDocument::from(carrapato)
        };

        let result = self
            .collection
            .replace_one(doc! { "_id": oid }, &document, None)
            .await
            .context("failed to replace carrapato")?;

        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_codigo_serial(&self, codigo_serial: &str) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_many(doc! { "CodigoSerial": codigo_serial }, None)
            .await
            .context("failed to delete carrapato")?;

        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .context("mongodb ping failed")?;

        Ok(())
    }
}
