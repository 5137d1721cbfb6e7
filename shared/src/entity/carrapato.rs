use super::localizacao::{Localizacao, LocalizacaoError};
use crate::constants::{StatusBateria, StatusDeUso};
use std::fmt;

/// Identity assigned to a carrapato by the store that persisted it.
///
/// opaque to the domain: the hex representation of a ObjectId for
/// the document store and the decimal serial id for the relational one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CarrapatoId(String);

impl CarrapatoId {
    pub fn new(id: impl Into<String>) -> Self {
        CarrapatoId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CarrapatoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i32> for CarrapatoId {
    fn from(id: i32) -> Self {
        CarrapatoId(id.to_string())
    }
}

/// A tracker tag attached to motorcycles parked on a yard (patio).
///
/// There are no setters: a new tag is built with [`Carrapato::new`], a tag
/// read from a store is rebuilt with [`Carrapato::rehydrate`] and changes
/// are expressed with the `with_*` builders, so a value of this type always
/// carries a valid location and, once persisted, a store assigned identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Carrapato {
    id: Option<CarrapatoId>,
    codigo_serial: String,
    status_bateria: StatusBateria,
    status_de_uso: StatusDeUso,
    id_patio: i32,
    ultima_localizacao: Option<Localizacao>,
}

impl Carrapato {
    /// Creates a carrapato that was not persisted yet, with a full
    /// battery and available for use.
    pub fn new(codigo_serial: impl Into<String>, id_patio: i32) -> Self {
        Self {
            id: None,
            codigo_serial: codigo_serial.into(),
            status_bateria: StatusBateria::default(),
            status_de_uso: StatusDeUso::default(),
            id_patio,
            ultima_localizacao: None,
        }
    }

    /// Rebuilds a carrapato from a storage record
    pub fn rehydrate(
        id: CarrapatoId,
        codigo_serial: String,
        status_bateria: StatusBateria,
        status_de_uso: StatusDeUso,
        id_patio: i32,
        ultima_localizacao: Option<Localizacao>,
    ) -> Self {
        Self {
            id: Some(id),
            codigo_serial,
            status_bateria,
            status_de_uso,
            id_patio,
            ultima_localizacao,
        }
    }

    /// Carries the identity of a stored record over to this value, used
    /// when this value replaces that record.
    pub fn with_identity(mut self, id: CarrapatoId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status_bateria(mut self, status_bateria: StatusBateria) -> Self {
        self.status_bateria = status_bateria;
        self
    }

    pub fn with_status_de_uso(mut self, status_de_uso: StatusDeUso) -> Self {
        self.status_de_uso = status_de_uso;
        self
    }

    pub fn with_localizacao(mut self, localizacao: Option<Localizacao>) -> Self {
        self.ultima_localizacao = localizacao;
        self
    }

    /// Replaces the last known location, the previous one is kept if the
    /// coordinates are invalid.
    pub fn update_location(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(), LocalizacaoError> {
        self.ultima_localizacao = Some(Localizacao::new(latitude, longitude)?);
        Ok(())
    }

    pub fn id(&self) -> Option<&CarrapatoId> {
        self.id.as_ref()
    }

    pub fn codigo_serial(&self) -> &str {
        &self.codigo_serial
    }

    pub fn status_bateria(&self) -> StatusBateria {
        self.status_bateria
    }

    pub fn status_de_uso(&self) -> StatusDeUso {
        self.status_de_uso
    }

    pub fn id_patio(&self) -> i32 {
        self.id_patio
    }

    pub fn ultima_localizacao(&self) -> Option<&Localizacao> {
        self.ultima_localizacao.as_ref()
    }
}
