use super::{
    repository::CarrapatoRepository,
    store::{CarrapatoStore, StoreError},
};
use shared::Carrapato;
use std::sync::Arc;

/// Carrapato use cases exposed to the http routes, one instance per store.
#[derive(Clone)]
pub struct CarrapatoService {
    repository: CarrapatoRepository,
}

impl CarrapatoService {
    pub fn new(store: Arc<dyn CarrapatoStore>) -> Self {
        Self {
            repository: CarrapatoRepository::new(store),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Carrapato>, StoreError> {
        self.repository.list_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, codigo_serial: &str) -> Result<Option<Carrapato>, StoreError> {
        self.repository.get_by_codigo_serial(codigo_serial).await
    }

    #[tracing::instrument(skip_all, fields(codigo_serial = carrapato.codigo_serial()))]
    pub async fn create(&self, carrapato: Carrapato) -> Result<Carrapato, StoreError> {
        self.repository.add(carrapato).await
    }

    #[tracing::instrument(skip(self, replacement))]
    pub async fn update(
        &self,
        codigo_serial: &str,
        replacement: Carrapato,
    ) -> Result<Option<Carrapato>, StoreError> {
        self.repository.update(codigo_serial, replacement).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, codigo_serial: &str) -> Result<bool, StoreError> {
        self.repository.delete(codigo_serial).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }
}
