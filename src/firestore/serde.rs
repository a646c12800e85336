//! Conversion from `serde::Serialize` values into Firestore document fields.
//!
//! The tool only ever writes documents, so the conversion goes through
//! `serde_json::Value` rather than a dedicated serde backend.

use std::collections::HashMap;

use anyhow::anyhow;
use firestore_grpc::v1::{value::ValueType, ArrayValue, MapValue, Value};
use serde::Serialize;

use crate::error::FirebaseError;

/// Serializes a value into the field map of a Firestore document. The value
/// must serialize to a map, since Firestore documents are maps at the top
/// level.
pub(crate) fn serialize_document_fields<T: Serialize>(
    document: &T,
) -> Result<HashMap<String, Value>, FirebaseError> {
    let json = serde_json::to_value(document)
        .map_err(|e| anyhow!(e).context("Failed to serialize document"))?;

    match json {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, to_firestore_value(value)))
            .collect()),
        other => Err(anyhow!(
            "Firestore documents must be maps at the top level, got: {other}"
        )
        .into()),
    }
}

fn to_firestore_value(value: serde_json::Value) -> Value {
    let value_type = match value {
        serde_json::Value::Null => ValueType::NullValue(0),
        serde_json::Value::Bool(b) => ValueType::BooleanValue(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ValueType::IntegerValue(i),
            // JSON numbers are at most f64s, so this is lossless.
            None => ValueType::DoubleValue(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => ValueType::StringValue(s),
        serde_json::Value::Array(items) => ValueType::ArrayValue(ArrayValue {
            values: items.into_iter().map(to_firestore_value).collect(),
        }),
        serde_json::Value::Object(map) => ValueType::MapValue(MapValue {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, to_firestore_value(value)))
                .collect(),
        }),
    };

    Value {
        value_type: Some(value_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_type(fields: &HashMap<String, Value>, key: &str) -> ValueType {
        fields[key].value_type.clone().unwrap()
    }

    #[test]
    fn serializes_scalar_fields() {
        let fields = serialize_document_fields(&serde_json::json!({
            "name": "Jagdish Kumar",
            "isActive": true,
            "loginCount": 3,
            "score": 0.5,
            "deletedAt": null,
        }))
        .unwrap();

        assert_eq!(
            value_type(&fields, "name"),
            ValueType::StringValue("Jagdish Kumar".to_string())
        );
        assert_eq!(value_type(&fields, "isActive"), ValueType::BooleanValue(true));
        assert_eq!(value_type(&fields, "loginCount"), ValueType::IntegerValue(3));
        assert_eq!(value_type(&fields, "score"), ValueType::DoubleValue(0.5));
        assert_eq!(value_type(&fields, "deletedAt"), ValueType::NullValue(0));
    }

    #[test]
    fn serializes_nested_arrays_and_maps() {
        let fields = serialize_document_fields(&serde_json::json!({
            "tags": ["admin", "test"],
            "address": { "city": "Jaipur" },
        }))
        .unwrap();

        let ValueType::ArrayValue(tags) = value_type(&fields, "tags") else {
            panic!("expected an array value");
        };
        assert_eq!(tags.values.len(), 2);

        let ValueType::MapValue(address) = value_type(&fields, "address") else {
            panic!("expected a map value");
        };
        assert_eq!(
            address.fields["city"].value_type,
            Some(ValueType::StringValue("Jaipur".to_string()))
        );
    }

    #[test]
    fn serializes_structs_with_serde_renames() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Profile {
            is_verified: bool,
        }

        let fields = serialize_document_fields(&Profile { is_verified: false }).unwrap();
        assert_eq!(
            value_type(&fields, "isVerified"),
            ValueType::BooleanValue(false)
        );
    }

    #[test]
    fn rejects_non_map_documents() {
        let err = serialize_document_fields(&"just a string").unwrap_err();
        assert!(format!("{err}").contains("must be maps"));
    }
}
