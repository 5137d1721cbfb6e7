use crate::modules::common::{
    error_codes::{MAX_LENGTH, OUT_OF_RANGE, REQUIRED},
    responses::{FieldViolation, SimpleError},
};
use serde::{Deserialize, Deserializer, Serialize};
use shared::{Carrapato, Localizacao, LocalizacaoError, StatusBateria, StatusDeUso};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const CODIGO_SERIAL_MAX_LENGTH: usize = 100;

/// a explicit `null` is treated the same as a missing value
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_codigo_serial(codigo_serial: &str) -> Result<(), ValidationError> {
    if codigo_serial.trim().is_empty() {
        let mut err = ValidationError::new(REQUIRED);
        err.message = Some("codigoSerial is required".into());
        return Err(err);
    }

    if codigo_serial.chars().count() > CODIGO_SERIAL_MAX_LENGTH {
        let mut err = ValidationError::new(MAX_LENGTH);
        err.message = Some(
            format!(
                "codigoSerial must have at most {} characters",
                CODIGO_SERIAL_MAX_LENGTH
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// builds the optional location of a request, both coordinates must be sent together
fn parse_localizacao(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Localizacao>, SimpleError> {
    let missing = |field: &str, other: &str| {
        SimpleError::with_violations(
            "invalid location",
            vec![FieldViolation::new(
                field,
                REQUIRED,
                format!("{} is required when {} is sent", field, other),
            )],
        )
    };

    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(missing("longitude", "latitude")),
        (None, Some(_)) => Err(missing("latitude", "longitude")),
        (Some(lat), Some(lng)) => Localizacao::new(lat, lng).map(Some).map_err(|e| {
            let field = match e {
                LocalizacaoError::LatitudeOutOfRange(_) => "latitude",
                LocalizacaoError::LongitudeOutOfRange(_) => "longitude",
            };

            SimpleError::with_violations(
                "invalid location",
                vec![FieldViolation::new(field, OUT_OF_RANGE, e.to_string())],
            )
        }),
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCarrapatoDto {
    /// unique code printed on the tag
    #[serde(alias = "CodigoSerial", deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_codigo_serial")]
    #[schema(example = "CAR-0001-XYZ")]
    pub codigo_serial: String,

    /// ID of the yard the tag belongs to
    #[serde(alias = "IdPatio")]
    #[validate(range(
        min = 1,
        code = "MustBePositive",
        message = "idPatio must be greater than zero"
    ))]
    #[schema(example = 1)]
    pub id_patio: i32,

    #[serde(alias = "Latitude")]
    #[schema(example = json!(-23.5505))]
    pub latitude: Option<f64>,

    #[serde(alias = "Longitude")]
    #[schema(example = json!(-46.6333))]
    pub longitude: Option<f64>,
}

impl CreateCarrapatoDto {
    /// builds a carrapato that was never persisted, with the creation defaults
    pub fn into_carrapato(self) -> Result<Carrapato, SimpleError> {
        let localizacao = parse_localizacao(self.latitude, self.longitude)?;

        Ok(Carrapato::new(self.codigo_serial, self.id_patio).with_localizacao(localizacao))
    }
}

/// Full replacement of a carrapato, statuses that are not sent
/// are reset to their defaults as well as the location
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCarrapatoDto {
    /// must match the codigo serial on the request path
    #[serde(alias = "CodigoSerial", deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_codigo_serial")]
    #[schema(example = "CAR-0001-XYZ")]
    pub codigo_serial: String,

    #[serde(alias = "IdPatio")]
    #[validate(range(
        min = 1,
        code = "MustBePositive",
        message = "idPatio must be greater than zero"
    ))]
    #[schema(example = 2)]
    pub id_patio: i32,

    #[serde(alias = "StatusBateria")]
    pub status_bateria: Option<StatusBateria>,

    #[serde(alias = "StatusDeUso")]
    pub status_de_uso: Option<StatusDeUso>,

    #[serde(alias = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(alias = "Longitude")]
    pub longitude: Option<f64>,
}

impl UpdateCarrapatoDto {
    pub fn into_carrapato(self) -> Result<Carrapato, SimpleError> {
        let localizacao = parse_localizacao(self.latitude, self.longitude)?;

        Ok(Carrapato::new(self.codigo_serial, self.id_patio)
            .with_status_bateria(self.status_bateria.unwrap_or_default())
            .with_status_de_uso(self.status_de_uso.unwrap_or_default())
            .with_localizacao(localizacao))
    }
}

/// A carrapato as returned by the API
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrapatoDto {
    /// identity assigned by the store, a ObjectId on the mongo
    /// routes and a serial number on the relational ones
    #[schema(example = "65f1c0ffee65f1c0ffee65f1")]
    pub id: String,

    #[schema(example = "CAR-0001-XYZ")]
    pub codigo_serial: String,

    pub status_bateria: StatusBateria,

    pub status_de_uso: StatusDeUso,

    #[schema(example = 1)]
    pub id_patio: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultima_localizacao: Option<Localizacao>,
}

impl From<Carrapato> for CarrapatoDto {
    fn from(c: Carrapato) -> Self {
        CarrapatoDto {
            id: c.id().map(ToString::to_string).unwrap_or_default(),
            codigo_serial: c.codigo_serial().to_owned(),
            status_bateria: c.status_bateria(),
            status_de_uso: c.status_de_uso(),
            id_patio: c.id_patio(),
            ultima_localizacao: c.ultima_localizacao().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::CarrapatoId;

    fn create_dto(codigo_serial: &str, id_patio: i32) -> CreateCarrapatoDto {
        CreateCarrapatoDto {
            codigo_serial: codigo_serial.to_owned(),
            id_patio,
            ..Default::default()
        }
    }

    fn violation_codes(dto: &impl Validate) -> Vec<(String, String)> {
        SimpleError::from(dto.validate().unwrap_err())
            .violations()
            .iter()
            .map(|v| (v.field.clone(), v.code.clone()))
            .collect()
    }

    #[test]
    fn accepts_a_valid_request() {
        assert!(create_dto("CAR-0001-XYZ", 1).validate().is_ok());
    }

    #[test]
    fn empty_codigo_serial_is_required() {
        assert_eq!(
            violation_codes(&create_dto("", 1)),
            vec![(String::from("codigoSerial"), String::from("Required"))]
        );
    }

    #[test]
    fn blank_codigo_serial_is_required() {
        assert_eq!(
            violation_codes(&create_dto("   ", 1)),
            vec![(String::from("codigoSerial"), String::from("Required"))]
        );
    }

    #[test]
    fn null_codigo_serial_is_required() {
        let create: CreateCarrapatoDto =
            serde_json::from_value(json!({ "codigoSerial": null, "idPatio": 1 })).unwrap();
        let update: UpdateCarrapatoDto =
            serde_json::from_value(json!({ "CodigoSerial": null, "idPatio": 1 })).unwrap();

        let expected = vec![(String::from("codigoSerial"), String::from("Required"))];

        assert_eq!(violation_codes(&create), expected);
        assert_eq!(violation_codes(&update), expected);
    }

    #[test]
    fn codigo_serial_length_is_counted_in_characters() {
        assert!(create_dto(&"á".repeat(100), 1).validate().is_ok());

        assert_eq!(
            violation_codes(&create_dto(&"A".repeat(101), 1)),
            vec![(String::from("codigoSerial"), String::from("MaxLength"))]
        );
    }

    #[test]
    fn id_patio_must_be_positive() {
        for id_patio in [0, -5] {
            assert_eq!(
                violation_codes(&create_dto("CAR-1", id_patio)),
                vec![(String::from("idPatio"), String::from("MustBePositive"))]
            );
        }
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let dto: CreateCarrapatoDto = serde_json::from_value(json!({})).unwrap();

        assert_eq!(
            violation_codes(&dto),
            vec![
                (String::from("codigoSerial"), String::from("Required")),
                (String::from("idPatio"), String::from("MustBePositive")),
            ]
        );
    }

    #[test]
    fn pascal_case_fields_are_accepted() {
        let dto: UpdateCarrapatoDto = serde_json::from_value(json!({
            "CodigoSerial": "CAR-1",
            "IdPatio": 3,
            "StatusBateria": "Media",
            "StatusDeUso": "EmUso",
        }))
        .unwrap();

        let c = dto.into_carrapato().unwrap();

        assert_eq!(c.codigo_serial(), "CAR-1");
        assert_eq!(c.id_patio(), 3);
        assert_eq!(c.status_bateria(), StatusBateria::Media);
        assert_eq!(c.status_de_uso(), StatusDeUso::EmUso);
    }

    #[test]
    fn update_without_statuses_resets_them_to_defaults() {
        let dto: UpdateCarrapatoDto =
            serde_json::from_value(json!({ "codigoSerial": "CAR-1", "idPatio": 2 })).unwrap();

        let c = dto.into_carrapato().unwrap();

        assert_eq!(c.status_bateria(), StatusBateria::Alta);
        assert_eq!(c.status_de_uso(), StatusDeUso::Disponivel);
        assert!(c.ultima_localizacao().is_none());
    }

    #[test]
    fn location_needs_both_coordinates() {
        let dto = CreateCarrapatoDto {
            latitude: Some(10.0),
            ..create_dto("CAR-1", 1)
        };

        let err = dto.into_carrapato().unwrap_err();

        assert_eq!(err.violations()[0].field, "longitude");
        assert_eq!(err.violations()[0].code, "Required");
    }

    #[test]
    fn location_out_of_range_is_rejected() {
        let dto = CreateCarrapatoDto {
            latitude: Some(91.0),
            longitude: Some(0.0),
            ..create_dto("CAR-1", 1)
        };

        let err = dto.into_carrapato().unwrap_err();

        assert_eq!(err.violations()[0].field, "latitude");
        assert_eq!(err.violations()[0].code, "OutOfRange");
    }

    #[test]
    fn boundary_location_is_accepted() {
        let dto = CreateCarrapatoDto {
            latitude: Some(-90.0),
            longitude: Some(180.0),
            ..create_dto("CAR-1", 1)
        };

        let loc = *dto.into_carrapato().unwrap().ultima_localizacao().unwrap();

        assert_eq!(loc.latitude(), -90.0);
        assert_eq!(loc.longitude(), 180.0);
    }

    #[test]
    fn read_dto_omits_absent_location() {
        let c = Carrapato::new("CAR-0001-XYZ", 1).with_identity(CarrapatoId::new("abc"));

        let json = serde_json::to_value(CarrapatoDto::from(c)).unwrap();

        assert_eq!(
            json,
            json!({
                "id": "abc",
                "codigoSerial": "CAR-0001-XYZ",
                "statusBateria": "Alta",
                "statusDeUso": "Disponivel",
                "idPatio": 1,
            })
        );
    }
}
