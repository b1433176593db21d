//! FileRecord domain model.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A file record held by the remote collection.
///
/// `id`, `name` and `size` are the fields filedeck relies on. Every other
/// field the backend returns is kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Server-assigned identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Size in bytes
    pub size: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            extra: Map::new(),
        }
    }

    /// Looks up an additional field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// MIME type, when the uploader recorded one under `type`.
    pub fn mime_type(&self) -> Option<&str> {
        self.field("type").and_then(Value::as_str)
    }
}

/// Upload payload: a file record without the server-generated id.
///
/// An `id` key never survives into the payload, whether it arrives through
/// deserialization or is put into `extra` directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PayloadFields")]
pub struct NewFileRecord {
    pub name: String,
    pub size: u64,
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct PayloadFields {
    name: String,
    size: u64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<PayloadFields> for NewFileRecord {
    fn from(mut fields: PayloadFields) -> Self {
        fields.extra.remove("id");
        Self {
            name: fields.name,
            size: fields.size,
            extra: fields.extra,
        }
    }
}

impl Serialize for NewFileRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("size", &self.size)?;
        for (key, value) in &self.extra {
            if !matches!(key.as_str(), "id" | "name" | "size") {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl NewFileRecord {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            extra: Map::new(),
        }
    }

    /// Adds an additional field to the payload.
    ///
    /// `id` is ignored: the server assigns identifiers.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "id" {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// Turns the payload into a record once the server assigned `id`.
    pub fn into_record(mut self, id: impl Into<String>) -> FileRecord {
        self.extra.remove("id");
        FileRecord {
            id: id.into(),
            name: self.name,
            size: self.size,
            extra: self.extra,
        }
    }
}

impl From<FileRecord> for NewFileRecord {
    /// Strips the generated id from an existing record.
    fn from(record: FileRecord) -> Self {
        Self {
            name: record.name,
            size: record.size,
            extra: record.extra,
        }
    }
}

/// Accepts both `"7"` and `7`; older json-server releases hand out numeric ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
