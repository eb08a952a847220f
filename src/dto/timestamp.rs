//! Formato de fechas de la API
//!
//! Acepta cualquier fecha RFC 3339 y emite siempre UTC con milisegundos
//! (`2024-01-01T12:00:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::dto::timestamp")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_serialize_with_millis() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-03-01T09:30:00.000Z"}"#);
    }

    #[test]
    fn test_deserialize_offset_to_utc() {
        let w: Wrapper = serde_json::from_str(r#"{"at":"2024-03-01T11:30:00.250+02:00"}"#).unwrap();
        assert_eq!(w.at.to_rfc3339_opts(SecondsFormat::Millis, true), "2024-03-01T09:30:00.250Z");
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"at":"yesterday"}"#);
        assert!(result.is_err());
    }
}
