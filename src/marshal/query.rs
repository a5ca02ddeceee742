//! Query-string building for list and count endpoints.

use super::flatten::flatten_text;
use crate::error::SignaturitError;
use crate::types::{QueryParam, Value, ValueMap};

/// Conditions key whose map is merged into the top level.
pub const DATA_KEY: &str = "data";
/// Conditions key whose list is comma-joined.
pub const IDS_KEY: &str = "ids";

fn push_flattened(
    params: &mut Vec<QueryParam>,
    value: &Value,
    name: &str,
) -> Result<(), SignaturitError> {
    params.extend(
        flatten_text(value, name)?
            .into_iter()
            .map(|(key, value)| QueryParam { key, value }),
    );
    Ok(())
}

fn join_ids(ids: &[Value]) -> Result<String, SignaturitError> {
    let mut rendered = Vec::with_capacity(ids.len());
    for id in ids {
        if id.as_scalar().is_none() {
            return Err(SignaturitError::InvalidInput(format!(
                "'{IDS_KEY}' must be a list of scalars, found {}",
                id.type_name()
            )));
        }
        rendered.extend(flatten_text(id, IDS_KEY)?.into_iter().map(|(_, text)| text));
    }
    Ok(rendered.join(","))
}

/// Build query parameters from a condition map.
///
/// Keys pass through in order with bracket nesting, except:
/// - `data`: its entries are lifted to the top level (`data: {foo: 1}` is
///   sent as `foo=1`, not `data[foo]=1`);
/// - `ids`: its list is joined into `ids=v1,v2,v3`.
///
/// # Errors
/// `InvalidInput` for file references or non-scalar `ids` entries.
pub fn build_query(conditions: &ValueMap) -> Result<Vec<QueryParam>, SignaturitError> {
    let mut params = Vec::new();

    for (key, value) in conditions.iter() {
        match (key, value) {
            (DATA_KEY, Value::Map(data)) => {
                for (inner_key, inner_value) in data.iter() {
                    push_flattened(&mut params, inner_value, inner_key)?;
                }
            }
            (IDS_KEY, Value::List(ids)) => {
                if !ids.is_empty() {
                    params.push(QueryParam::new(IDS_KEY, join_ids(ids)?));
                }
            }
            _ => push_flattened(&mut params, value, key)?,
        }
    }

    Ok(params)
}
