//! Option validation
//!
//! Declarative option sets with required fields, defaults, type checks and
//! allowed values, applied to a [`ValueMap`] before it is marshaled.
//!
//! - [`storage`] - document storage backends (`s3`, `sftp`)
//! - [`branding`] - branding options
//! - [`signature`] - signature request options
//! - [`validators`] - recipient and file checks
//!
//! ```rust
//! use signaturit_sdk::schema::{validate, OptionKind};
//! use signaturit_sdk::types::ValueMap;
//!
//! let params = ValueMap::new().with("bucket", "b").with("key", "k");
//! let err = validate(OptionKind::Storage("s3"), &params).unwrap_err();
//! assert!(err.to_string().contains("secret"));
//! ```

pub mod branding;
pub mod signature;
pub mod storage;
pub mod validators;

use crate::error::SignaturitError;
use crate::types::{Scalar, Value, ValueMap};

pub use branding::{check_branding_options, resolve_branding_options};
pub use signature::resolve_signature_request_options;
pub use storage::{resolve_storage_options, StorageKind};
pub use validators::{validate_files, validate_recipients};

/// Declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Any,
    Bool,
    Text,
    Int,
    /// Accepts integers as well.
    Float,
    /// A map or a list.
    Array,
}

impl FieldType {
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Any, _) => true,
            (FieldType::Bool, Value::Scalar(Scalar::Bool(_))) => true,
            (FieldType::Text, Value::Scalar(Scalar::Text(_))) => true,
            (FieldType::Int, Value::Scalar(Scalar::Int(_))) => true,
            (FieldType::Float, Value::Scalar(Scalar::Float(_) | Scalar::Int(_))) => true,
            (FieldType::Array, Value::Map(_) | Value::List(_)) => true,
            _ => false,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FieldType::Any => "any",
            FieldType::Bool => "bool",
            FieldType::Text => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Array => "array",
        }
    }
}

/// Value filled in for an absent option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    EmptyList,
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Null => Value::null(),
            DefaultValue::Bool(b) => Value::from(b),
            DefaultValue::EmptyList => Value::List(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
    Defaulted(DefaultValue),
}

/// One declared option.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    ty: FieldType,
    presence: Presence,
    nullable: bool,
    allowed: &'static [&'static str],
}

impl FieldSpec {
    fn new(name: &'static str, ty: FieldType, presence: Presence) -> Self {
        Self {
            name,
            ty,
            presence,
            nullable: false,
            allowed: &[],
        }
    }

    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self::new(name, ty, Presence::Required)
    }

    pub fn optional(name: &'static str, ty: FieldType) -> Self {
        Self::new(name, ty, Presence::Optional)
    }

    /// Optional with a default. A `Null` default makes the option nullable.
    pub fn defaulted(name: &'static str, ty: FieldType, default: DefaultValue) -> Self {
        let mut spec = Self::new(name, ty, Presence::Defaulted(default));
        spec.nullable = default == DefaultValue::Null;
        spec
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Restrict text values to `allowed`.
    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, value: &Value) -> Result<(), SignaturitError> {
        if value.is_null() {
            return if self.nullable {
                Ok(())
            } else {
                Err(SignaturitError::schema(self.name, "must not be null"))
            };
        }
        if !self.ty.accepts(value) {
            return Err(SignaturitError::schema(
                self.name,
                format!("expected {}, got {}", self.ty.name(), value.type_name()),
            ));
        }
        if !self.allowed.is_empty() {
            let ok = value
                .as_str()
                .is_some_and(|s| self.allowed.iter().any(|allowed| *allowed == s));
            if !ok {
                return Err(SignaturitError::schema(
                    self.name,
                    format!("must be one of {}", self.allowed.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

/// A set of declared options.
#[derive(Debug, Clone, Default)]
pub struct OptionSchema {
    fields: Vec<FieldSpec>,
    allow_undeclared: bool,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    /// Pass options the schema does not declare through untouched.
    pub fn allow_undeclared(mut self) -> Self {
        self.allow_undeclared = true;
        self
    }

    fn declared(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.name == key)
    }

    fn reject_undeclared(&self, input: &ValueMap) -> Result<(), SignaturitError> {
        if self.allow_undeclared {
            return Ok(());
        }
        match input.keys().find(|key| !self.declared(key)) {
            Some(key) => Err(SignaturitError::schema(key, "undefined option")),
            None => Ok(()),
        }
    }

    fn append_undeclared(&self, input: &ValueMap, resolved: &mut ValueMap) {
        if self.allow_undeclared {
            for (key, value) in input.iter().filter(|(k, _)| !self.declared(k)) {
                resolved.insert(key, value.clone());
            }
        }
    }

    /// Validate `input` and fill in defaults.
    ///
    /// The result lists declared options in declaration order, followed by
    /// any undeclared options (when allowed) in caller order.
    ///
    /// # Errors
    /// `SchemaError` naming the first offending option.
    pub fn resolve(&self, input: &ValueMap) -> Result<ValueMap, SignaturitError> {
        self.reject_undeclared(input)?;

        let mut resolved = ValueMap::new();
        for spec in &self.fields {
            match (input.get(spec.name), spec.presence) {
                (Some(value), _) => {
                    spec.check(value)?;
                    resolved.insert(spec.name, value.clone());
                }
                (None, Presence::Required) => {
                    return Err(SignaturitError::schema(
                        spec.name,
                        "missing required option",
                    ))
                }
                (None, Presence::Defaulted(default)) => {
                    resolved.insert(spec.name, default.to_value());
                }
                (None, Presence::Optional) => {}
            }
        }

        self.append_undeclared(input, &mut resolved);
        Ok(resolved)
    }

    /// Type-check the options present in `input` without requiring or
    /// defaulting anything. Used for partial updates.
    pub fn check(&self, input: &ValueMap) -> Result<ValueMap, SignaturitError> {
        self.reject_undeclared(input)?;
        for (key, value) in input.iter() {
            if let Some(spec) = self.fields.iter().find(|f| f.name == key) {
                spec.check(value)?;
            }
        }
        Ok(input.clone())
    }
}

/// Which option set to validate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind<'a> {
    /// Document storage of the named backend type.
    Storage(&'a str),
    Branding,
    SignatureRequest,
}

/// Validate and default `input` for `kind`.
pub fn validate(kind: OptionKind<'_>, input: &ValueMap) -> Result<ValueMap, SignaturitError> {
    match kind {
        OptionKind::Storage(storage_type) => resolve_storage_options(storage_type, input),
        OptionKind::Branding => resolve_branding_options(input),
        OptionKind::SignatureRequest => resolve_signature_request_options(input),
    }
}
