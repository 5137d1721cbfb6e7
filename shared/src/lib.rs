pub mod constants;
pub mod entity;
pub mod tracer;

pub use constants::{StatusBateria, StatusDeUso};
pub use entity::carrapato::{Carrapato, CarrapatoId};
pub use entity::localizacao::{Localizacao, LocalizacaoError};
