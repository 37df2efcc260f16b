use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

/// Wire shape of one `/data` response body. Fields stay optional so an
/// absent field is detected instead of defaulting to zero.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
pub struct RawReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

/// A validated sensor reading: temperature in °C, relative humidity in %.
/// Both fields are finite. Out-of-scale values are kept; they clamp at
/// render time instead of being rejected here.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
}

impl RawReading {
    pub fn validate(self) -> Result<Reading, ReadingError> {
        let temperature = require_finite("temperature", self.temperature)?;
        let humidity = require_finite("humidity", self.humidity)?;
        Ok(Reading {
            temperature,
            humidity,
        })
    }
}

impl Reading {
    /// Decodes and validates one JSON response body. The single entry
    /// point the fetch path uses.
    pub fn decode(body: &[u8]) -> Result<Self, ReadingError> {
        let raw: RawReading = serde_json::from_slice(body)?;
        raw.validate()
    }
}

fn require_finite(name: &'static str, value: Option<f64>) -> Result<f64, ReadingError> {
    let value = value.ok_or(ReadingError::MissingField(name))?;
    if !value.is_finite() {
        return Err(ReadingError::NotFinite(name, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_well_formed_body() {
        let reading = Reading::decode(br#"{"temperature": 20, "humidity": 45}"#).unwrap();
        assert_eq!(
            reading,
            Reading {
                temperature: 20.0,
                humidity: 45.0
            }
        );
    }

    #[test]
    fn ignores_extra_fields() {
        let body = br#"{"temperature": 20.5, "humidity": 45, "pressure": 1013}"#;
        let reading = Reading::decode(body).unwrap();
        assert_eq!(reading.temperature, 20.5);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Reading::decode(b"not json").unwrap_err();
        assert!(matches!(err, ReadingError::Parse(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let err = Reading::decode(br#"{"temperature": 20}"#).unwrap_err();
        assert!(matches!(err, ReadingError::MissingField("humidity")));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = Reading::decode(br#"{"temperature": "warm", "humidity": 45}"#).unwrap_err();
        assert!(matches!(err, ReadingError::Parse(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let raw = RawReading {
            temperature: Some(f64::NAN),
            humidity: Some(45.0),
        };
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, ReadingError::NotFinite("temperature", _)));
    }
}
