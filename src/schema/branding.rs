//! Branding options.

use super::{DefaultValue, FieldSpec, FieldType, OptionSchema};
use crate::error::SignaturitError;
use crate::types::ValueMap;

fn branding_schema() -> OptionSchema {
    use DefaultValue::Null;
    use FieldType::*;

    OptionSchema::new()
        .field(FieldSpec::defaulted("primary", Bool, DefaultValue::Bool(false)))
        .field(FieldSpec::defaulted("corporate_layout_color", Text, Null))
        .field(FieldSpec::defaulted("corporate_text_color", Text, Null))
        .field(FieldSpec::defaulted("application_texts", Array, Null))
        .field(FieldSpec::defaulted("subject_tag", Text, Null))
        .field(FieldSpec::defaulted("reminders", Array, Null))
        .field(FieldSpec::defaulted("expire_time", Int, Null))
        .field(FieldSpec::defaulted("callback_url", Text, Null))
        .field(FieldSpec::defaulted("signature_pos_x", Float, Null))
        .field(FieldSpec::defaulted("signature_pos_y", Float, Null))
        .field(FieldSpec::defaulted("terms_and_conditions_label", Text, Null))
        .field(FieldSpec::defaulted("terms_and_conditions_body", Text, Null))
        .field(FieldSpec::defaulted("events_url", Text, Null))
}

/// Validate branding options and fill in defaults for a new branding.
pub fn resolve_branding_options(params: &ValueMap) -> Result<ValueMap, SignaturitError> {
    branding_schema().resolve(params)
}

/// Type-check the options present in a branding update, leaving absent
/// options absent.
pub fn check_branding_options(params: &ValueMap) -> Result<ValueMap, SignaturitError> {
    branding_schema().check(params)
}
