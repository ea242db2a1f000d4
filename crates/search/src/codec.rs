//! JSON encoding and decoding of records.
//!
//! The codec is a value, not a process-wide singleton: the service is
//! constructed with the instance it should use. Decoding is permissive —
//! unknown fields are preserved in the record's open map, never rejected.

use serde_json::Value;

use crate::document::Document;
use crate::error::CodecError;

/// Serializes and deserializes records to and from their JSON document form.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCodec;

impl DocumentCodec {
    /// Encodes a record to its JSON byte representation.
    pub fn encode<D: Document>(&self, record: &D) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(record).map_err(CodecError::Encode)
    }

    /// Decodes a record from its JSON byte representation.
    pub fn decode<D: Document>(&self, bytes: &[u8]) -> Result<D, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::Decode)
    }

    /// Encodes a record to a JSON value, the form backend request bodies use.
    pub fn to_value<D: Document>(&self, record: &D) -> Result<Value, CodecError> {
        serde_json::to_value(record).map_err(CodecError::Encode)
    }

    /// Decodes a record from a JSON value, the form backend hits arrive in.
    pub fn from_value<D: Document>(&self, source: &Value) -> Result<D, CodecError> {
        serde_json::from_value(source.clone()).map_err(CodecError::Decode)
    }
}
