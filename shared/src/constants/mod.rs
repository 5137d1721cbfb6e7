use sea_orm::DeriveActiveEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Battery level reported by a carrapato.
///
/// serialized by its symbolic name both on the API and on the
/// stores, `Alta` is the level of every newly registered tag.
#[derive(
    Eq,
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    EnumIter,
    ToSchema,
    Serialize,
    PartialEq,
    EnumString,
    Deserialize,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
pub enum StatusBateria {
    #[default]
    #[sea_orm(string_value = "Alta")]
    Alta,
    #[sea_orm(string_value = "Media")]
    Media,
    #[sea_orm(string_value = "Baixa")]
    Baixa,
}

/// Usage state of a carrapato
#[derive(
    Eq,
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    EnumIter,
    ToSchema,
    Serialize,
    PartialEq,
    EnumString,
    Deserialize,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
pub enum StatusDeUso {
    /// not attached to any motorcycle, ready to be used
    #[default]
    #[sea_orm(string_value = "Disponivel")]
    Disponivel,

    /// attached to a motorcycle on a yard
    #[sea_orm(string_value = "EmUso")]
    EmUso,

    #[sea_orm(string_value = "EmManutencao")]
    EmManutencao,

    /// decommissioned, kept for history
    #[sea_orm(string_value = "Inativo")]
    Inativo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn statuses_default_to_creation_values() {
        assert_eq!(StatusBateria::default(), StatusBateria::Alta);
        assert_eq!(StatusDeUso::default(), StatusDeUso::Disponivel);
    }

    #[test]
    fn statuses_serialize_as_symbolic_names() {
        assert_eq!(
            serde_json::to_string(&StatusBateria::Media).unwrap(),
            "\"Media\""
        );
        assert_eq!(
            serde_json::to_string(&StatusDeUso::EmUso).unwrap(),
            "\"EmUso\""
        );
        assert_eq!(StatusDeUso::EmManutencao.to_string(), "EmManutencao");
    }

    #[test]
    fn statuses_parse_from_names() {
        assert_eq!(StatusBateria::from_str("Baixa"), Ok(StatusBateria::Baixa));
        assert!(StatusBateria::from_str("baixa").is_err());
        assert_eq!(
            StatusDeUso::from_str("EmManutencao"),
            Ok(StatusDeUso::EmManutencao)
        );
    }
}
