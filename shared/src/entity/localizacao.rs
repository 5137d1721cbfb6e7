use serde::Serialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocalizacaoError {
    #[error("latitude must be between -90 and 90 degrees, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be between -180 and 180 degrees, got {0}")]
    LongitudeOutOfRange(f64),
}

/// Last known position of a carrapato.
///
/// A `Localizacao` can only be built through [`Localizacao::new`], so any
/// value of this type holds coordinates within the valid ranges. it is never
/// mutated, a new position replaces the previous one as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Localizacao {
    latitude: f64,
    longitude: f64,
}

impl Localizacao {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocalizacaoError> {
        // written as a `contains` check so NaN is rejected as well
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(LocalizacaoError::LatitudeOutOfRange(latitude));
        }

        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(LocalizacaoError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Localizacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
