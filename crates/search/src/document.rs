//! Record types stored in the search engine.
//!
//! Each record type is a struct with explicit known fields plus an open
//! `extra` map. The map is `#[serde(flatten)]`ed, so any field present in a
//! stored document survives a decode→encode round trip even when this code
//! predates it, and decoding never rejects unknown fields.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::index;

/// A record that can be stored in and fetched from a logical index.
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The logical index this record type lives in.
    fn index() -> &'static str;

    /// The record's identifier, used as the document id in the backend.
    fn id(&self) -> &str;
}

/// A person record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Person {
    /// Record identifier; the document's primary key in the backend index.
    #[serde(default)]
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Fields this code does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document for Person {
    fn index() -> &'static str {
        index::PERSON_INDEX
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// A vehicle record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vehicle {
    /// Record identifier; the document's primary key in the backend index.
    #[serde(default)]
    pub id: String,

    /// Manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Creation timestamp; the field date-cursor searches range over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Fields this code does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document for Vehicle {
    fn index() -> &'static str {
        index::VEHICLE_INDEX
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vehicle_maps_to_vehicle_index() {
        assert_eq!(Vehicle::index(), "vehicle");
        assert_eq!(Person::index(), "person");
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let raw = json!({
            "id": "v1",
            "make": "Toyota",
            "color": "red",
            "doors": 5
        });

        let vehicle: Vehicle = serde_json::from_value(raw).unwrap();
        assert_eq!(vehicle.id, "v1");
        assert_eq!(vehicle.make.as_deref(), Some("Toyota"));
        assert_eq!(vehicle.extra.get("color"), Some(&json!("red")));
        assert_eq!(vehicle.extra.get("doors"), Some(&json!(5)));
    }

    #[test]
    fn extra_fields_survive_round_trip() {
        let raw = json!({
            "id": "p1",
            "name": "Amartya",
            "department": "engineering"
        });

        let person: Person = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&person).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn missing_optional_fields_decode_to_none() {
        let vehicle: Vehicle = serde_json::from_value(json!({ "id": "v2" })).unwrap();
        assert!(vehicle.make.is_none());
        assert!(vehicle.created.is_none());
        assert!(vehicle.extra.is_empty());
    }
}
