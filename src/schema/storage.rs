//! Document storage backend options.
//!
//! `sftp` is validated in two passes: the base connection options first,
//! then the credentials demanded by the resolved `auth_method`.

use std::str::FromStr;

use super::{FieldSpec, FieldType, OptionSchema};
use crate::error::SignaturitError;
use crate::types::ValueMap;

pub const AUTH_METHOD_KEY: &str = "KEY";
pub const AUTH_METHOD_PASS: &str = "PASS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    S3,
    Sftp,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::S3 => "s3",
            StorageKind::Sftp => "sftp",
        }
    }
}

impl FromStr for StorageKind {
    type Err = SignaturitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s3" => Ok(StorageKind::S3),
            "sftp" => Ok(StorageKind::Sftp),
            _ => Err(SignaturitError::schema("type", "unsupported")),
        }
    }
}

fn s3_schema() -> OptionSchema {
    OptionSchema::new()
        .field(FieldSpec::required("bucket", FieldType::Text))
        .field(FieldSpec::required("key", FieldType::Text))
        .field(FieldSpec::required("secret", FieldType::Text))
}

fn sftp_base_schema() -> OptionSchema {
    OptionSchema::new()
        .field(FieldSpec::required("host", FieldType::Text))
        .field(FieldSpec::required("port", FieldType::Int))
        .field(FieldSpec::required("dir", FieldType::Text))
        .field(FieldSpec::required("user", FieldType::Text))
        .field(
            FieldSpec::required("auth_method", FieldType::Text)
                .one_of(&[AUTH_METHOD_KEY, AUTH_METHOD_PASS]),
        )
        .field(FieldSpec::optional("password", FieldType::Any))
        .field(FieldSpec::optional("private", FieldType::Any))
        .field(FieldSpec::optional("public", FieldType::Any))
        .field(FieldSpec::optional("passphrase", FieldType::Any))
}

fn sftp_credentials_schema(auth_method: &str) -> OptionSchema {
    let base = sftp_base_schema();
    match auth_method {
        AUTH_METHOD_KEY => base
            .field(FieldSpec::required("private", FieldType::Text))
            .field(FieldSpec::required("public", FieldType::Text))
            .field(FieldSpec::required("passphrase", FieldType::Text)),
        _ => base.field(FieldSpec::required("password", FieldType::Text)),
    }
}

/// Validate storage options for `storage_type` (`s3` or `sftp`).
///
/// The result carries `type` as its last entry.
///
/// # Errors
/// `SchemaError("type", "unsupported")` for unknown backends, otherwise the
/// first offending option.
pub fn resolve_storage_options(
    storage_type: &str,
    params: &ValueMap,
) -> Result<ValueMap, SignaturitError> {
    let kind: StorageKind = storage_type.parse()?;

    let mut resolved = match kind {
        StorageKind::S3 => s3_schema().resolve(params)?,
        StorageKind::Sftp => {
            let base = sftp_base_schema().resolve(params)?;
            let auth_method = base
                .get("auth_method")
                .and_then(|v| v.as_str())
                .unwrap_or(AUTH_METHOD_PASS)
                .to_string();
            sftp_credentials_schema(&auth_method).resolve(&base)?
        }
    };

    resolved.insert("type", kind.as_str());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;
    use serde_json::json;

    fn map(json: serde_json::Value) -> ValueMap {
        ValueMap::try_from(json).unwrap()
    }

    fn sftp(auth_method: &str) -> ValueMap {
        map(json!({
            "host": "example.com",
            "port": 2222,
            "dir": "/uploads",
            "user": "signaturit",
            "auth_method": auth_method
        }))
    }

    fn field_of(err: SignaturitError) -> String {
        match err {
            SignaturitError::Schema { field, .. } => field,
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_s3_valid() {
        let resolved = resolve_storage_options(
            "s3",
            &map(json!({"bucket": "b", "key": "k", "secret": "s"})),
        )
        .unwrap();
        assert_eq!(resolved.get("type"), Some(&Value::from("s3")));
        assert_eq!(resolved.keys().last(), Some("type"));
    }

    #[test]
    fn test_s3_missing_secret() {
        let err = resolve_storage_options("s3", &map(json!({"bucket": "b", "key": "k"})))
            .unwrap_err();
        assert_eq!(field_of(err), "secret");
    }

    #[test]
    fn test_s3_wrong_type() {
        let err = resolve_storage_options(
            "s3",
            &map(json!({"bucket": 1234, "key": "k", "secret": "s"})),
        )
        .unwrap_err();
        assert_eq!(field_of(err), "bucket");
    }

    #[test]
    fn test_unsupported_type() {
        let err = resolve_storage_options("ftp", &ValueMap::new()).unwrap_err();
        match err {
            SignaturitError::Schema { field, reason } => {
                assert_eq!(field, "type");
                assert_eq!(reason, "unsupported");
            }
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_sftp_key_requires_key_material() {
        let err = resolve_storage_options("sftp", &sftp("KEY")).unwrap_err();
        assert_eq!(field_of(err), "private");
    }

    #[test]
    fn test_sftp_key_valid() {
        let params = sftp("KEY")
            .with("private", "-----BEGIN KEY-----")
            .with("public", "ssh-rsa AAAA")
            .with("passphrase", "pass");
        assert!(resolve_storage_options("sftp", &params).is_ok());
    }

    #[test]
    fn test_sftp_pass_valid() {
        let params = sftp("PASS").with("password", "secret");
        let resolved = resolve_storage_options("sftp", &params).unwrap();
        assert_eq!(resolved.get("password"), Some(&Value::from("secret")));
        assert_eq!(resolved.get("type"), Some(&Value::from("sftp")));
    }

    #[test]
    fn test_sftp_pass_without_password() {
        let err = resolve_storage_options("sftp", &sftp("PASS")).unwrap_err();
        assert_eq!(field_of(err), "password");
    }

    #[test]
    fn test_sftp_unknown_auth_method() {
        let err = resolve_storage_options("sftp", &sftp("TOKEN")).unwrap_err();
        assert_eq!(field_of(err), "auth_method");
    }

    #[test]
    fn test_sftp_port_must_be_int() {
        let params = sftp("PASS").with("port", "2222").with("password", "x");
        let err = resolve_storage_options("sftp", &params).unwrap_err();
        assert_eq!(field_of(err), "port");
    }

    #[test]
    fn test_sftp_password_must_be_text() {
        let params = sftp("PASS").with("password", 1234);
        let err = resolve_storage_options("sftp", &params).unwrap_err();
        assert_eq!(field_of(err), "password");
    }

    #[test]
    fn test_undefined_option_rejected() {
        let err = resolve_storage_options(
            "s3",
            &map(json!({"bucket": "b", "key": "k", "secret": "s", "region": "eu"})),
        )
        .unwrap_err();
        assert_eq!(field_of(err), "region");
    }
}
