use super::{CarrapatoStore, StoreError};
use async_trait::async_trait;
use shared::{Carrapato, CarrapatoId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Carrapato store kept in the process memory, records are lost on exit.
///
/// unlike the database backed stores it does not enforce codigo serial
/// uniqueness, so duplicates can only be prevented by the repository.
#[derive(Default)]
pub struct InMemoryCarrapatoStore {
    records: RwLock<Vec<Carrapato>>,
}

impl InMemoryCarrapatoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarrapatoStore for InMemoryCarrapatoStore {
    async fn find_all(&self) -> Result<Vec<Carrapato>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_codigo_serial(
        &self,
        codigo_serial: &str,
    ) -> Result<Option<Carrapato>, StoreError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .find(|c| c.codigo_serial() == codigo_serial)
            .cloned())
    }

    async fn insert(&self, carrapato: &Carrapato) -> Result<(), StoreError> {
        let id = CarrapatoId::new(Uuid::new_v4().simple().to_string());

        self.records
            .write()
            .await
            .push(carrapato.clone().with_identity(id));

        Ok(())
    }

    async fn replace(&self, id: &CarrapatoId, carrapato: &Carrapato) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;

        match records.iter_mut().find(|c| c.id() == Some(id)) {
            Some(record) => {
                *record = carrapato.clone().with_identity(id.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_codigo_serial(&self, codigo_serial: &str) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|c| c.codigo_serial() != codigo_serial);

        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_a_identity() {
        let store = InMemoryCarrapatoStore::new();

        store.insert(&Carrapato::new("CAR-1", 1)).await.unwrap();

        let stored = store.find_by_codigo_serial("CAR-1").await.unwrap().unwrap();
        assert!(stored.id().is_some());
    }

    #[tokio::test]
    async fn replace_keeps_identity_and_misses_unknown_ids() {
        let store = InMemoryCarrapatoStore::new();
        store.insert(&Carrapato::new("CAR-1", 1)).await.unwrap();
        let stored = store.find_by_codigo_serial("CAR-1").await.unwrap().unwrap();
        let id = stored.id().unwrap().clone();

        let replaced = store
            .replace(&id, &Carrapato::new("CAR-1", 9))
            .await
            .unwrap();
        let missed = store
            .replace(&CarrapatoId::new("nope"), &Carrapato::new("CAR-1", 3))
            .await
            .unwrap();

        let after = store.find_by_codigo_serial("CAR-1").await.unwrap().unwrap();
        assert!(replaced);
        assert!(!missed);
        assert_eq!(after.id(), Some(&id));
        assert_eq!(after.id_patio(), 9);
    }

    #[tokio::test]
    async fn delete_reports_how_many_records_were_removed() {
        let store = InMemoryCarrapatoStore::new();
        store.insert(&Carrapato::new("CAR-1", 1)).await.unwrap();
        store.insert(&Carrapato::new("CAR-2", 1)).await.unwrap();

        assert_eq!(store.delete_by_codigo_serial("CAR-1").await.unwrap(), 1);
        assert_eq!(store.delete_by_codigo_serial("CAR-1").await.unwrap(), 0);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
