//! Request body assembly per endpoint kind.

use super::flatten::{child_key, flatten, flatten_map};
use super::query::build_query;
use crate::error::SignaturitError;
use crate::types::{FileRef, FormField, QueryParam, Value, ValueMap};

/// Top-level keys that mark a map as a single recipient record.
pub const RECIPIENT_DISCRIMINATORS: &[&str] = &["email", "phone", "address"];

pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";

/// Recipients of a signature request, email or SMS.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    One(ValueMap),
    Many(Vec<ValueMap>),
}

impl Recipients {
    /// Interpret a loosely shaped value.
    ///
    /// A map is one record iff it has a top-level `email`, `phone` or
    /// `address` key; any other map is taken as a collection of records, as
    /// is a list.
    ///
    /// # Errors
    /// `InvalidInput` when a record is not a map.
    pub fn from_value(value: Value) -> Result<Self, SignaturitError> {
        fn record(value: Value) -> Result<ValueMap, SignaturitError> {
            match value {
                Value::Map(map) => Ok(map),
                other => Err(SignaturitError::InvalidInput(format!(
                    "recipient must be a map, got {}",
                    other.type_name()
                ))),
            }
        }

        match value {
            Value::Map(map) if Self::is_single_record(&map) => Ok(Recipients::One(map)),
            Value::Map(map) => Ok(Recipients::Many(
                map.into_iter()
                    .map(|(_, v)| record(v))
                    .collect::<Result<_, _>>()?,
            )),
            Value::List(items) => Ok(Recipients::Many(
                items.into_iter().map(record).collect::<Result<_, _>>()?,
            )),
            other => Err(SignaturitError::InvalidInput(format!(
                "recipients must be a map or a list, got {}",
                other.type_name()
            ))),
        }
    }

    fn is_single_record(map: &ValueMap) -> bool {
        RECIPIENT_DISCRIMINATORS
            .iter()
            .any(|key| map.contains_key(key))
    }

    pub fn records(&self) -> &[ValueMap] {
        match self {
            Recipients::One(record) => std::slice::from_ref(record),
            Recipients::Many(records) => records,
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

impl From<ValueMap> for Recipients {
    fn from(record: ValueMap) -> Self {
        Recipients::One(record)
    }
}

impl From<Vec<ValueMap>> for Recipients {
    fn from(records: Vec<ValueMap>) -> Self {
        Recipients::Many(records)
    }
}

/// Query for list endpoints. `limit` and `offset` are always the last two
/// parameters; caller-supplied values for those keys are discarded.
pub fn assemble_query(
    conditions: &ValueMap,
    limit: u32,
    offset: u32,
) -> Result<Vec<QueryParam>, SignaturitError> {
    let mut params = build_query(conditions)?;
    params.retain(|p| p.key != LIMIT_KEY && p.key != OFFSET_KEY);
    params.push(QueryParam::new(LIMIT_KEY, limit.to_string()));
    params.push(QueryParam::new(OFFSET_KEY, offset.to_string()));
    Ok(params)
}

/// Multipart fields for create endpoints, files sent under `files[i]`.
///
/// See [`assemble_multipart_as`].
pub fn assemble_multipart(
    files: &[FileRef],
    recipients: &Recipients,
    extra_params: &ValueMap,
) -> Result<Vec<FormField>, SignaturitError> {
    assemble_multipart_as("files", files, recipients, extra_params)
}

/// Multipart fields with files under `files_key[i]`.
///
/// Emission order is fixed: every `recipients[i]` field, then every file,
/// then `extra_params` at the top level.
pub fn assemble_multipart_as(
    files_key: &str,
    files: &[FileRef],
    recipients: &Recipients,
    extra_params: &ValueMap,
) -> Result<Vec<FormField>, SignaturitError> {
    let mut fields = Vec::new();

    for (idx, record) in recipients.records().iter().enumerate() {
        fields.extend(flatten_map(record, &format!("recipients[{idx}]"))?);
    }

    for (idx, file) in files.iter().enumerate() {
        let name = child_key(files_key, &idx.to_string());
        fields.extend(flatten(&Value::File(file.clone()), &name)?);
    }

    fields.extend(flatten_map(extra_params, "")?);
    Ok(fields)
}

/// Multipart fields for a plain parameter map.
pub fn assemble_form(params: &ValueMap) -> Result<Vec<FormField>, SignaturitError> {
    flatten_map(params, "")
}

/// JSON object for update endpoints. Top-level nulls are left out.
pub fn assemble_json(params: &ValueMap) -> Result<serde_json::Value, SignaturitError> {
    let present: ValueMap = params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k, v.clone()))
        .collect();
    present.to_json()
}

/// Raw body for asset uploads: the file content, no field name.
pub fn assemble_raw(file: &FileRef) -> Result<Vec<u8>, SignaturitError> {
    file.read()
}
