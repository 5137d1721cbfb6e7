use mongodb::bson::oid::ObjectId;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use shared::{Carrapato, CarrapatoId, Localizacao, LocalizacaoError, StatusBateria, StatusDeUso};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

pub const COLLECTION_NAME: &str = "Carrapatos";

/// Document projection of a carrapato, one document per tag on the
/// `Carrapatos` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CarrapatoDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub codigo_serial: String,
    #[serde(deserialize_with = "status_from_name_or_index")]
    pub status_bateria: StatusBateria,
    #[serde(deserialize_with = "status_from_name_or_index")]
    pub status_de_uso: StatusDeUso,
    pub id_patio: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultima_localizacao: Option<LocalizacaoDocument>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameOrIndex {
    Index(i64),
    Name(String),
}

/// statuses are written by name, documents written by older clients of the
/// collection hold the variant index instead, in declaration order
fn status_from_name_or_index<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + IntoEnumIterator,
{
    match NameOrIndex::deserialize(deserializer)? {
        NameOrIndex::Name(name) => T::from_str(&name)
            .map_err(|_| D::Error::custom(format!("unknown status name {}", name))),
        NameOrIndex::Index(index) => usize::try_from(index)
            .ok()
            .and_then(|i| T::iter().nth(i))
            .ok_or_else(|| D::Error::custom(format!("unknown status index {}", index))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizacaoDocument {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum DocumentMappingError {
    #[error("carrapato document {codigo_serial} has no _id")]
    MissingId { codigo_serial: String },

    #[error("carrapato document {id} has a invalid location: {source}")]
    InvalidLocation { id: ObjectId, source: LocalizacaoError },
}

impl From<&Carrapato> for CarrapatoDocument {
    /// the `_id` is only carried over when the carrapato identity is a
    /// ObjectId, otherwise it is left for the server to generate
    fn from(c: &Carrapato) -> Self {
        CarrapatoDocument {
            id: c.id().and_then(|id| ObjectId::parse_str(id.as_str()).ok()),
            codigo_serial: c.codigo_serial().to_owned(),
            status_bateria: c.status_bateria(),
            status_de_uso: c.status_de_uso(),
            id_patio: c.id_patio(),
            ultima_localizacao: c.ultima_localizacao().map(|l| LocalizacaoDocument {
                latitude: l.latitude(),
                longitude: l.longitude(),
            }),
        }
    }
}

impl TryFrom<CarrapatoDocument> for Carrapato {
    type Error = DocumentMappingError;

    fn try_from(doc: CarrapatoDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or_else(|| DocumentMappingError::MissingId {
            codigo_serial: doc.codigo_serial.clone(),
        })?;

        let localizacao = doc
            .ultima_localizacao
            .map(|l| Localizacao::new(l.latitude, l.longitude))
            .transpose()
            .map_err(|source| DocumentMappingError::InvalidLocation { id, source })?;

        Ok(Carrapato::rehydrate(
            CarrapatoId::new(id.to_hex()),
            doc.codigo_serial,
            doc.status_bateria,
            doc.status_de_uso,
            doc.id_patio,
            localizacao,
        ))
    }
}
