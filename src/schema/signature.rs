//! Signature request options.
//!
//! Only the commonly used options are declared; anything else the caller
//! passes (`callback_url`, `expire_time`, `templates`, ...) is forwarded.

use super::{DefaultValue, FieldSpec, FieldType, OptionSchema};
use crate::error::SignaturitError;
use crate::types::ValueMap;

fn signature_request_schema() -> OptionSchema {
    OptionSchema::new()
        .field(FieldSpec::defaulted("subject", FieldType::Text, DefaultValue::Null))
        .field(FieldSpec::defaulted("body", FieldType::Text, DefaultValue::Null))
        .field(FieldSpec::defaulted(
            "in_person_sign",
            FieldType::Bool,
            DefaultValue::Bool(false),
        ))
        .field(FieldSpec::defaulted(
            "sequential",
            FieldType::Bool,
            DefaultValue::Bool(false),
        ))
        .field(FieldSpec::defaulted(
            "photo",
            FieldType::Bool,
            DefaultValue::Bool(false),
        ))
        .field(
            FieldSpec::defaulted(
                "mandatory_pages",
                FieldType::Array,
                DefaultValue::EmptyList,
            )
            .nullable(),
        )
        .field(FieldSpec::defaulted("branding_id", FieldType::Text, DefaultValue::Null))
        .allow_undeclared()
}

/// Validate signature request options and fill in defaults.
pub fn resolve_signature_request_options(
    params: &ValueMap,
) -> Result<ValueMap, SignaturitError> {
    signature_request_schema().resolve(params)
}
