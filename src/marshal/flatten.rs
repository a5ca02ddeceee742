//! Bracket-notation flattening
//!
//! Turns a [`Value`] tree into flat fields named `root[child][0][leaf]`,
//! in the tree's insertion order. [`nest`] parses such names back.

use crate::error::SignaturitError;
use crate::types::{FieldValue, FileRef, FormField, Scalar, Value, ValueMap};

/// Leaf reached while walking a tree.
pub(crate) enum Leaf<'a> {
    Text(String),
    File(&'a FileRef),
}

/// Full field name of `key` under `parent`.
pub fn child_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}[{key}]")
    }
}

/// Visit every non-null leaf of `value` in order, with its bracket name.
pub(crate) fn walk<'a, F>(value: &'a Value, name: &str, visit: &mut F) -> Result<(), SignaturitError>
where
    F: FnMut(String, Leaf<'a>) -> Result<(), SignaturitError>,
{
    match value {
        Value::Scalar(Scalar::Float(f)) if !f.is_finite() => Err(SignaturitError::InvalidInput(
            format!("{name}: {f} is not a finite number"),
        )),
        Value::Scalar(scalar) => match scalar.render() {
            Some(_) if name.is_empty() => Err(SignaturitError::InvalidInput(
                "a scalar value needs a field name".to_string(),
            )),
            Some(text) => visit(name.to_string(), Leaf::Text(text)),
            None => Ok(()),
        },
        Value::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                walk(item, &child_key(name, &idx.to_string()), visit)?;
            }
            Ok(())
        }
        Value::Map(map) => walk_map(map, name, visit),
        Value::File(_) if name.is_empty() => Err(SignaturitError::InvalidInput(
            "a file value needs a field name".to_string(),
        )),
        Value::File(file) => visit(name.to_string(), Leaf::File(file)),
    }
}

pub(crate) fn walk_map<'a, F>(
    map: &'a ValueMap,
    parent: &str,
    visit: &mut F,
) -> Result<(), SignaturitError>
where
    F: FnMut(String, Leaf<'a>) -> Result<(), SignaturitError>,
{
    for (key, child) in map.iter() {
        walk(child, &child_key(parent, key), visit)?;
    }
    Ok(())
}

fn push_field(out: &mut Vec<FormField>, name: String, leaf: Leaf<'_>) -> Result<(), SignaturitError> {
    let value = match leaf {
        Leaf::Text(text) => FieldValue::Text(text),
        Leaf::File(file) => FieldValue::File {
            file_name: file.file_name().to_string(),
            content_type: file.content_type().map(str::to_string),
            content: file.read()?,
        },
    };
    out.push(FormField { name, value });
    Ok(())
}

/// Flatten `tree`, whose own field name is `parent_key`.
///
/// Maps and lists with an empty `parent_key` put their children at the top
/// level. Nulls and empty containers produce no fields. File content is read
/// here, so an unreadable file fails before anything is sent.
///
/// # Errors
/// `InvalidInput` for unreadable files or an unnamed scalar/file.
pub fn flatten(tree: &Value, parent_key: &str) -> Result<Vec<FormField>, SignaturitError> {
    let mut fields = Vec::new();
    walk(tree, parent_key, &mut |name, leaf| {
        push_field(&mut fields, name, leaf)
    })?;
    Ok(fields)
}

/// [`flatten`] for a map.
pub fn flatten_map(map: &ValueMap, parent_key: &str) -> Result<Vec<FormField>, SignaturitError> {
    let mut fields = Vec::new();
    walk_map(map, parent_key, &mut |name, leaf| {
        push_field(&mut fields, name, leaf)
    })?;
    Ok(fields)
}

/// Flatten to text pairs. File references are rejected.
pub fn flatten_text(tree: &Value, parent_key: &str) -> Result<Vec<(String, String)>, SignaturitError> {
    let mut pairs = Vec::new();
    walk(tree, parent_key, &mut |name, leaf| match leaf {
        Leaf::Text(text) => {
            pairs.push((name, text));
            Ok(())
        }
        Leaf::File(file) => Err(SignaturitError::InvalidInput(format!(
            "file {} cannot be sent as text field '{}'",
            file.file_name(),
            name
        ))),
    })?;
    Ok(pairs)
}

fn parse_key(key: &str) -> Result<Vec<String>, SignaturitError> {
    let malformed = || SignaturitError::InvalidInput(format!("malformed field name '{key}'"));

    let (root, mut rest) = match key.find('[') {
        Some(idx) => (&key[..idx], &key[idx..]),
        None => (key, ""),
    };
    if root.is_empty() {
        return Err(malformed());
    }

    let mut segments = vec![root.to_string()];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        segments.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }
    Ok(segments)
}

enum Node {
    Leaf(String),
    Branch(Vec<(String, Node)>),
}

fn insert(children: &mut Vec<(String, Node)>, segments: &[String], text: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let pos = children.iter().position(|(k, _)| k == head);

    if rest.is_empty() {
        match pos {
            Some(idx) => children[idx].1 = Node::Leaf(text),
            None => children.push((head.clone(), Node::Leaf(text))),
        }
        return;
    }

    let idx = match pos {
        Some(idx) => idx,
        None => {
            children.push((head.clone(), Node::Branch(Vec::new())));
            children.len() - 1
        }
    };
    if let Node::Leaf(_) = children[idx].1 {
        children[idx].1 = Node::Branch(Vec::new());
    }
    if let Node::Branch(grandchildren) = &mut children[idx].1 {
        insert(grandchildren, rest, text);
    }
}

fn into_value(node: Node) -> Value {
    match node {
        Node::Leaf(text) => Value::from(text),
        Node::Branch(children) => {
            let is_sequence = !children.is_empty()
                && children
                    .iter()
                    .enumerate()
                    .all(|(idx, (key, _))| *key == idx.to_string());
            if is_sequence {
                Value::List(children.into_iter().map(|(_, n)| into_value(n)).collect())
            } else {
                Value::Map(
                    children
                        .into_iter()
                        .map(|(k, n)| (k, into_value(n)))
                        .collect(),
                )
            }
        }
    }
}

/// Rebuild a tree from bracket-named text pairs.
///
/// Containers whose keys are exactly `0..n` in order become lists; scalars
/// come back as text.
///
/// Bracket names carry no container type, so a map keyed `"0".."n-1"` in
/// order flattens exactly like a list and comes back as one. Such maps do
/// not round-trip through [`flatten_text`] and `nest`.
pub fn nest<I, K, V>(pairs: I) -> Result<ValueMap, SignaturitError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut root = Vec::new();
    for (key, text) in pairs {
        let segments = parse_key(key.as_ref())?;
        insert(&mut root, &segments, text.into());
    }
    Ok(root.into_iter().map(|(k, n)| (k, into_value(n))).collect())
}
