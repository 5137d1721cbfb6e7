mod error;
pub mod memory;
pub mod mongo;
pub mod relational;

pub use error::StoreError;
pub use memory::InMemoryCarrapatoStore;
pub use mongo::MongoCarrapatoStore;
pub use relational::SeaOrmCarrapatoStore;

use async_trait::async_trait;
use shared::{Carrapato, CarrapatoId};

/// Persistence capability for carrapatos.
///
/// implementations only move records in and out of their storage, business
/// rules such as rejecting a duplicated codigo serial before inserting live
/// in [`CarrapatoRepository`](super::repository::CarrapatoRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarrapatoStore: Send + Sync {
    /// every stored carrapato, in no particular order
    async fn find_all(&self) -> Result<Vec<Carrapato>, StoreError>;

    /// the first carrapato with the given codigo serial
    async fn find_by_codigo_serial(
        &self,
        codigo_serial: &str,
    ) -> Result<Option<Carrapato>, StoreError>;

    /// persists a carrapato that was not stored yet, the store assigns its identity
    async fn insert(&self, carrapato: &Carrapato) -> Result<(), StoreError>;

    /// overwrites the record with identity `id`, returns false when no record matched
    async fn replace(&self, id: &CarrapatoId, carrapato: &Carrapato) -> Result<bool, StoreError>;

    /// deletes every record with the given codigo serial, returning how many were deleted
    async fn delete_by_codigo_serial(&self, codigo_serial: &str) -> Result<u64, StoreError>;

    /// checks the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
