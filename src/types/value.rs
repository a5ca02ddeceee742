//! Parameter values
//!
//! Every endpoint takes its free-form arguments as a [`Value`] tree: scalars,
//! ordered lists, ordered maps and file references. Map insertion order is
//! kept all the way to the wire because the remote API reconstructs repeated
//! groups (`recipients[0][email]`, `recipients[1][email]`, ...) from the
//! order in which fields arrive.
//!
//! ```rust
//! use signaturit_sdk::types::{Value, ValueMap};
//!
//! let params = ValueMap::new()
//!     .with("subject", "Please sign")
//!     .with("mandatory_pages", vec![1, 2]);
//! assert_eq!(params.len(), 2);
//!
//! let from_json = Value::from(serde_json::json!({"subject": "Please sign"}));
//! assert!(from_json.as_map().is_some());
//! ```

use std::path::{Path, PathBuf};

use crate::error::SignaturitError;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Wire text for this scalar, or `None` for null.
    ///
    /// Booleans render as `true`/`false`, numbers in their canonical decimal
    /// form.
    pub fn render(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Int(i) => Some(i.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// Where the content of a [`FileRef`] comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// A local file, loaded with [`FileRef::load`] before the request is marshaled.
    Path(PathBuf),
    /// Content already held in memory.
    Bytes(Vec<u8>),
}

/// Reference to file content to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRef {
    source: FileSource,
    file_name: String,
    content_type: Option<String>,
}

impl FileRef {
    /// Reference a local file. The file name sent is the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            source: FileSource::Path(path),
            file_name,
            content_type: None,
        }
    }

    /// Reference in-memory content under the given file name.
    pub fn from_bytes(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            source: FileSource::Bytes(content.into()),
            file_name: file_name.into(),
            content_type: None,
        }
    }

    /// Set the MIME type of the multipart part (e.g. `application/pdf`).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Bytes(_) => None,
        }
    }

    /// Read the full content.
    ///
    /// Path sources are read synchronously and the file handle is closed
    /// before this returns. Async callers should [`load`](Self::load) first.
    ///
    /// # Errors
    /// Returns `SignaturitError::InvalidInput` when a path source cannot be read.
    pub fn read(&self) -> Result<Vec<u8>, SignaturitError> {
        match &self.source {
            FileSource::Path(path) => std::fs::read(path).map_err(|e| {
                SignaturitError::InvalidInput(format!(
                    "can't read file {}: {}",
                    path.display(),
                    e
                ))
            }),
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    /// Read a path source into memory without blocking the runtime.
    ///
    /// Byte sources are returned as they are. Name and content type carry
    /// over, so the loaded reference marshals exactly like the original.
    ///
    /// # Errors
    /// Returns `SignaturitError::InvalidInput` when a path source cannot be read.
    pub async fn load(&self) -> Result<FileRef, SignaturitError> {
        let path = match &self.source {
            FileSource::Path(path) => path,
            FileSource::Bytes(_) => return Ok(self.clone()),
        };
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            SignaturitError::InvalidInput(format!("can't read file {}: {}", path.display(), e))
        })?;
        Ok(FileRef {
            source: FileSource::Bytes(bytes),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
        })
    }
}

/// Load every upload ahead of marshaling, in order.
pub(crate) async fn load_files(files: &[FileRef]) -> Result<Vec<FileRef>, SignaturitError> {
    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        loaded.push(file.load().await?);
    }
    Ok(loaded)
}

/// A recursive parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Map(ValueMap),
    File(FileRef),
}

impl Value {
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::Null) => "null",
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Int(_)) => "int",
            Value::Scalar(Scalar::Float(_)) => "float",
            Value::Scalar(Scalar::Text(_)) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::File(_) => "file",
        }
    }

    /// Convert to JSON for request bodies.
    ///
    /// # Errors
    /// File references cannot be expressed in JSON and yield `InvalidInput`.
    pub fn to_json(&self) -> Result<serde_json::Value, SignaturitError> {
        Ok(match self {
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Scalar(Scalar::Int(i)) => serde_json::Value::from(*i),
            Value::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    SignaturitError::InvalidInput(format!("{f} is not representable in JSON"))
                })?,
            Value::Scalar(Scalar::Text(s)) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Map(map) => map.to_json()?,
            Value::File(file) => {
                return Err(SignaturitError::InvalidInput(format!(
                    "file {} cannot be sent in a JSON body",
                    file.file_name()
                )))
            }
        })
    }
}

/// An insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, Value)>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn to_json(&self) -> Result<serde_json::Value, SignaturitError> {
        let mut object = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            object.insert(key.clone(), value.to_json()?);
        }
        Ok(serde_json::Value::Object(object))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Text(s))
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Scalar(Scalar::Text(s.clone()))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Scalar(Scalar::Int(i64::from(i)))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => Value::Scalar(Scalar::Int(i)),
            Err(_) => Value::Scalar(Scalar::Text(i.to_string())),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }
}

impl From<FileRef> for Value {
    fn from(f: FileRef) -> Self {
        Value::File(f)
    }
}

impl From<ValueMap> for Value {
    fn from(m: ValueMap) -> Self {
        Value::Map(m)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or_else(Value::null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Scalar(Scalar::Int(i)),
                None => match n.as_u64() {
                    Some(u) => Value::from(u),
                    None => Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
                },
            },
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(object.into_iter().collect()),
        }
    }
}

impl TryFrom<serde_json::Value> for ValueMap {
    type Error = SignaturitError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(json) {
            Value::Map(map) => Ok(map),
            other => Err(SignaturitError::InvalidInput(format!(
                "expected a map, got {}",
                other.type_name()
            ))),
        }
    }
}
