use super::store::{CarrapatoStore, StoreError};
use anyhow::anyhow;
use shared::Carrapato;
use std::sync::Arc;

/// Business level carrapato persistence keyed on the codigo serial,
/// works the same over any [`CarrapatoStore`].
#[derive(Clone)]
pub struct CarrapatoRepository {
    store: Arc<dyn CarrapatoStore>,
}

impl CarrapatoRepository {
    pub fn new(store: Arc<dyn CarrapatoStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<Carrapato>, StoreError> {
        self.store.find_all().await
    }

    pub async fn get_by_codigo_serial(
        &self,
        codigo_serial: &str,
    ) -> Result<Option<Carrapato>, StoreError> {
        self.store.find_by_codigo_serial(codigo_serial).await
    }

    /// Inserts a new carrapato, returning it as persisted (with the store assigned identity)
    ///
    /// fails with [`StoreError::CodigoSerialInUse`] if the codigo serial is taken.
    pub async fn add(&self, carrapato: Carrapato) -> Result<Carrapato, StoreError> {
        let codigo_serial = carrapato.codigo_serial();

        if self.store.find_by_codigo_serial(codigo_serial).await?.is_some() {
            return Err(StoreError::CodigoSerialInUse);
        }

        self.store.insert(&carrapato).await?;

        self.store
            .find_by_codigo_serial(codigo_serial)
            .await?
            .ok_or_else(|| {
                StoreError::Unavailable(anyhow!(
                    "carrapato {} not found right after being inserted",
                    codigo_serial
                ))
            })
    }

    /// Replaces every mutable field of the carrapato with the given codigo serial,
    /// keeping its identity.
    ///
    /// returns `None` without touching the store if there is no such carrapato, or
    /// if it was deleted between the lookup and the replace. concurrent updates are
    /// not serialized, the last replace wins.
    pub async fn update(
        &self,
        codigo_serial: &str,
        replacement: Carrapato,
    ) -> Result<Option<Carrapato>, StoreError> {
        let Some(existing) = self.store.find_by_codigo_serial(codigo_serial).await? else {
            return Ok(None);
        };

        let id = existing.id().cloned().ok_or_else(|| {
            StoreError::MalformedRecord(format!("carrapato {} has no identity", codigo_serial))
        })?;

        let replacement = replacement.with_identity(id.clone());

        if self.store.replace(&id, &replacement).await? {
            Ok(Some(replacement))
        } else {
            Ok(None)
        }
    }

    /// Deletes the carrapato with the given codigo serial, returns false if it does not exist
    pub async fn delete(&self, codigo_serial: &str) -> Result<bool, StoreError> {
        if self.store.find_by_codigo_serial(codigo_serial).await?.is_none() {
            return Ok(false);
        }

        Ok(self.store.delete_by_codigo_serial(codigo_serial).await? > 0)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::carrapato::store::{InMemoryCarrapatoStore, MockCarrapatoStore};
    use mockall::predicate::eq;
    use shared::{CarrapatoId, StatusBateria, StatusDeUso};

    fn stored(codigo_serial: &str, id: &str) -> Carrapato {
        Carrapato::new(codigo_serial, 1).with_identity(CarrapatoId::new(id))
    }

    fn in_memory() -> CarrapatoRepository {
        CarrapatoRepository::new(Arc::new(InMemoryCarrapatoStore::new()))
    }

    #[tokio::test]
    async fn add_returns_the_persisted_carrapato_with_defaults() {
        let repo = in_memory();

        let created = repo.add(Carrapato::new("CAR-0001-XYZ", 1)).await.unwrap();

        assert!(created.id().is_some());
        assert_eq!(created.status_bateria(), StatusBateria::Alta);
        assert_eq!(created.status_de_uso(), StatusDeUso::Disponivel);
        assert_eq!(
            repo.get_by_codigo_serial("CAR-0001-XYZ").await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn add_rejects_a_codigo_serial_in_use_without_inserting() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .with(eq("CAR-1"))
            .times(1)
            .returning(|_| Ok(Some(stored("CAR-1", "1"))));
        store.expect_insert().never();

        let err = CarrapatoRepository::new(Arc::new(store))
            .add(Carrapato::new("CAR-1", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::CodigoSerialInUse));
    }

    #[tokio::test]
    async fn add_forwards_store_uniqueness_errors() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::CodigoSerialInUse));

        let err = CarrapatoRepository::new(Arc::new(store))
            .add(Carrapato::new("CAR-1", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::CodigoSerialInUse));
    }

    #[tokio::test]
    async fn update_of_unknown_carrapato_does_not_touch_the_store() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .returning(|_| Ok(None));
        store.expect_replace().never();

        let updated = CarrapatoRepository::new(Arc::new(store))
            .update("CAR-404", Carrapato::new("CAR-404", 2))
            .await
            .unwrap();

        assert_eq!(updated, None);
    }

    #[tokio::test]
    async fn update_replaces_by_the_existing_identity() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .returning(|_| Ok(Some(stored("CAR-1", "abc"))));
        store
            .expect_replace()
            .withf(|id, c| id.as_str() == "abc" && c.id() == Some(id) && c.id_patio() == 5)
            .times(1)
            .returning(|_, _| Ok(true));

        let updated = CarrapatoRepository::new(Arc::new(store))
            .update(
                "CAR-1",
                Carrapato::new("CAR-1", 5).with_status_bateria(StatusBateria::Baixa),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id().map(CarrapatoId::as_str), Some("abc"));
        assert_eq!(updated.status_bateria(), StatusBateria::Baixa);
    }

    #[tokio::test]
    async fn update_of_concurrently_deleted_carrapato_is_not_found() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .returning(|_| Ok(Some(stored("CAR-1", "abc"))));
        store.expect_replace().returning(|_, _| Ok(false));

        let updated = CarrapatoRepository::new(Arc::new(store))
            .update("CAR-1", Carrapato::new("CAR-1", 5))
            .await
            .unwrap();

        assert_eq!(updated, None);
    }

    #[tokio::test]
    async fn update_keeps_identity_on_the_in_memory_store() {
        let repo = in_memory();
        let created = repo.add(Carrapato::new("CAR-1", 1)).await.unwrap();

        let updated = repo
            .update(
                "CAR-1",
                Carrapato::new("CAR-1", 2).with_status_de_uso(StatusDeUso::EmUso),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(repo.list_all().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = in_memory();
        repo.add(Carrapato::new("CAR-1", 1)).await.unwrap();

        assert!(repo.delete("CAR-1").await.unwrap());
        assert!(!repo.delete("CAR-1").await.unwrap());
        assert_eq!(repo.get_by_codigo_serial("CAR-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_of_unknown_carrapato_does_not_touch_the_store() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_by_codigo_serial()
            .returning(|_| Ok(None));
        store.expect_delete_by_codigo_serial().never();

        let deleted = CarrapatoRepository::new(Arc::new(store))
            .delete("CAR-404")
            .await
            .unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn store_failures_are_propagated() {
        let mut store = MockCarrapatoStore::new();

        store
            .expect_find_all()
            .returning(|| Err(StoreError::Unavailable(anyhow!("connection refused"))));

        let err = CarrapatoRepository::new(Arc::new(store))
            .list_all()
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
