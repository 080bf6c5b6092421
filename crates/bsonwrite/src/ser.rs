//! Serde passthrough for the value tree.
//!
//! Documents serialize as maps and arrays as sequences, so a finished tree
//! can feed any serde sink. Extended kinds serialize in their extended-JSON
//! shape, matching the `Display` rendering.

use alloc::string::String;
use core::fmt::Write as _;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{
    doc,
    value::{Document, Value},
};

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Document(v) => v.serialize(serializer),
            Value::Array(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Null => serializer.serialize_unit(),
            Value::Undefined => doc! { "$undefined" => true }.serialize(serializer),
            Value::DateTime(v) => doc! { "$date" => *v }.serialize(serializer),
            Value::ObjectId(v) => {
                doc! { "$oid" => hex(&v.bytes()) }.serialize(serializer)
            }
            Value::Binary(v) => doc! {
                "$binary" => hex(&v.bytes),
                "$type" => hex(&[u8::from(v.subtype)]),
            }
            .serialize(serializer),
            Value::RegularExpression(v) => doc! {
                "$regex" => v.pattern.clone(),
                "$options" => v.options.clone(),
            }
            .serialize(serializer),
            Value::DbPointer(v) => doc! {
                "$dbPointer" => doc! {
                    "$ref" => v.namespace.clone(),
                    "$id" => doc! { "$oid" => hex(&v.id.bytes()) },
                },
            }
            .serialize(serializer),
            Value::JavaScriptCode(v) => doc! { "$code" => v.clone() }.serialize(serializer),
            Value::Symbol(v) => doc! { "$symbol" => v.clone() }.serialize(serializer),
            Value::JavaScriptCodeWithScope(v) => doc! {
                "$code" => v.code.clone(),
                "$scope" => v.scope.clone(),
            }
            .serialize(serializer),
            Value::Timestamp(v) => doc! {
                "$timestamp" => doc! {
                    "t" => i64::from(v.time),
                    "i" => i64::from(v.increment),
                },
            }
            .serialize(serializer),
            Value::MinKey => doc! { "$minKey" => 1 }.serialize(serializer),
            Value::MaxKey => doc! { "$maxKey" => 1 }.serialize(serializer),
        }
    }
}
