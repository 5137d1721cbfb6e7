pub mod carrapato;

pub use carrapato::RowMappingError;
