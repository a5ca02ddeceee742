//! Structural checks on files and recipients.

use std::path::Path;

use crate::error::SignaturitError;
use crate::marshal::Recipients;
use crate::types::{Scalar, Value};

/// Check that every path exists and ends in one of `extensions`.
///
/// Extensions are given without the leading dot and compared
/// case-sensitively.
pub fn validate_files<P: AsRef<Path>>(
    paths: &[P],
    extensions: &[&str],
) -> Result<(), SignaturitError> {
    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SignaturitError::InvalidInput(format!(
                "can't find file {}",
                path.display()
            )));
        }

        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext));
        if !supported {
            return Err(SignaturitError::InvalidInput(format!(
                "file {} format is not supported",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Check every recipient record: `email` must be present and well formed,
/// `fullname` must be text and `phone` must be digits only.
pub fn validate_recipients(recipients: &Recipients) -> Result<(), SignaturitError> {
    for record in recipients.records() {
        let email = match record.get("email") {
            Some(value) => value,
            None => {
                return Err(SignaturitError::InvalidInput(
                    "missing 'email' field in recipient".to_string(),
                ))
            }
        };
        let email = match email.as_str() {
            Some(email) if is_email(email) => email,
            _ => {
                return Err(SignaturitError::InvalidInput(format!(
                    "invalid recipient email address: {}",
                    describe(email)
                )))
            }
        };

        if let Some(fullname) = record.get("fullname") {
            if fullname.as_str().is_none() {
                return Err(SignaturitError::InvalidInput(format!(
                    "invalid 'fullname' field for recipient {email}"
                )));
            }
        }

        if let Some(phone) = record.get("phone") {
            if !is_phone(phone) {
                return Err(SignaturitError::InvalidInput(format!(
                    "invalid 'phone' field for recipient {email}"
                )));
            }
        }
    }
    Ok(())
}

fn describe(value: &Value) -> String {
    value
        .as_scalar()
        .and_then(Scalar::render)
        .unwrap_or_else(|| value.type_name().to_string())
}

fn is_phone(value: &Value) -> bool {
    match value.as_scalar() {
        Some(Scalar::Text(s)) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        Some(Scalar::Int(i)) => *i >= 0,
        _ => false,
    }
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || email.chars().any(char::is_whitespace) {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueMap;

    fn one(record: ValueMap) -> Recipients {
        Recipients::One(record)
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("john.doe@example.com"));
        assert!(is_email("a+tag@sub.example.co"));
        assert!(!is_email("john"));
        assert!(!is_email("john@localhost"));
        assert!(!is_email("john @example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("john@-example.com"));
    }

    #[test]
    fn test_valid_recipients() {
        let recipients = Recipients::Many(vec![
            ValueMap::new()
                .with("email", "a@example.com")
                .with("fullname", "A")
                .with("phone", "34600000000"),
            ValueMap::new().with("email", "b@example.com"),
        ]);
        assert!(validate_recipients(&recipients).is_ok());
    }

    #[test]
    fn test_missing_email() {
        let err = validate_recipients(&one(ValueMap::new().with("fullname", "A"))).unwrap_err();
        assert!(err.to_string().contains("missing 'email'"));
    }

    #[test]
    fn test_invalid_email() {
        let err = validate_recipients(&one(ValueMap::new().with("email", "not-an-email")))
            .unwrap_err();
        assert!(err.to_string().contains("not-an-email"));
    }

    #[test]
    fn test_invalid_fullname_and_phone() {
        let record = ValueMap::new().with("email", "a@example.com").with("fullname", 12);
        assert!(validate_recipients(&one(record)).is_err());

        let record = ValueMap::new()
            .with("email", "a@example.com")
            .with("phone", "+34 600");
        let err = validate_recipients(&one(record)).unwrap_err();
        assert!(err.to_string().contains("'phone'"));
    }

    #[test]
    fn test_validate_files() {
        let path = std::env::temp_dir().join("signaturit_sdk_validate_files.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        assert!(validate_files(&[&path], &["pdf", "doc"]).is_ok());
        let err = validate_files(&[&path], &["docx"]).unwrap_err();
        assert!(err.to_string().contains("format is not supported"));

        let _ = std::fs::remove_file(&path);
        let err = validate_files(&[&path], &["pdf"]).unwrap_err();
        assert!(err.to_string().contains("can't find file"));
    }
}
