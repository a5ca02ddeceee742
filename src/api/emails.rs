//! Certified Emails API
//!
//! # Endpoints
//!
//! - [`EmailsApi::get_emails`] - List certified emails
//! - [`EmailsApi::count_emails`] - Count certified emails
//! - [`EmailsApi::get_email`] - Get one certified email
//! - [`EmailsApi::create_email`] - Send a certified email
//! - [`EmailsApi::download_email_audit_trail`] - Download a certificate's audit trail

use std::sync::Arc;

use super::common::{encode_id, Page};
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::{assemble_multipart_as, Recipients};
use crate::schema::validate_recipients;
use crate::types::value::load_files;
use crate::types::{FileRef, Outcome, ValueMap};

/// Multipart key certified emails carry their files under.
pub(crate) const ATTACHMENTS_KEY: &str = "attachments";

/// Certified Emails API
pub struct EmailsApi {
    context: Arc<SignaturitContext>,
}

impl EmailsApi {
    /// Create a new EmailsApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/emails.json
    pub async fn get_emails(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/emails.json".to_string(), page, conditions)
            .await
    }

    /// GET /v3/emails/count.json
    pub async fn count_emails(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.context
            .get_filtered("/v3/emails/count.json".to_string(), conditions)
            .await
    }

    /// GET /v3/emails/{id}.json
    pub async fn get_email(&self, email_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/emails/{}.json", encode_id(email_id)))
            .await
    }

    /// POST /v3/emails.json
    ///
    /// Every recipient needs a valid `email`; `subject` and `body` override
    /// the same keys in `params`.
    ///
    /// # Errors
    /// `InvalidInput` for malformed recipients or unreadable attachments.
    pub async fn create_email(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        subject: &str,
        body: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        validate_recipients(recipients)?;

        let mut extra = params.clone();
        extra.insert("subject", subject);
        extra.insert("body", body);

        let files = load_files(files).await?;
        let fields = assemble_multipart_as(ATTACHMENTS_KEY, &files, recipients, &extra)?;
        self.context
            .post_multipart("/v3/emails.json".to_string(), fields)
            .await
    }

    /// GET /v3/emails/{id}/certificates/{certificate_id}/download/audit_trail
    pub async fn download_email_audit_trail(
        &self,
        email_id: &str,
        certificate_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .download(format!(
                "/v3/emails/{}/certificates/{}/download/audit_trail",
                encode_id(email_id),
                encode_id(certificate_id)
            ))
            .await
    }
}

impl SignaturitApi for EmailsApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "emails"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::r#trait::test_support::{create_test_context, multipart_names};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_count_emails_with_ids() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/emails/count.json"))
            .and(query_param("ids", "e1,e2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 2})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = EmailsApi::new(create_test_context(&mock_server.uri()));
        let conditions = ValueMap::new().with("ids", vec!["e1", "e2"]);
        let outcome = api.count_emails(&conditions).await.unwrap();
        assert_eq!(outcome, Outcome::Success(json!({"count": 2})));
    }

    #[tokio::test]
    async fn test_create_email_uses_attachments() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/emails.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "e1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = EmailsApi::new(create_test_context(&mock_server.uri()));
        let files = vec![FileRef::from_bytes("invoice.pdf", b"%PDF".to_vec())];
        let recipients = Recipients::Many(vec![
            ValueMap::new().with("email", "a@example.com").with("name", "A"),
            ValueMap::new().with("email", "b@example.com"),
        ]);

        let outcome = api
            .create_email(&files, &recipients, "Invoice", "Attached", &ValueMap::new())
            .await
            .unwrap();
        assert!(outcome.is_success());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(
            multipart_names(&requests[0].body),
            vec![
                "recipients[0][email]",
                "recipients[0][name]",
                "recipients[1][email]",
                "attachments[0]",
                "subject",
                "body"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_email_rejects_invalid_recipient() {
        let mock_server = MockServer::start().await;
        let api = EmailsApi::new(create_test_context(&mock_server.uri()));
        let recipients = Recipients::from(ValueMap::new().with("email", "nope"));

        let result = api
            .create_email(&[], &recipients, "s", "b", &ValueMap::new())
            .await;
        assert!(matches!(result, Err(SignaturitError::InvalidInput(_))));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_email_audit_trail() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/emails/e1/certificates/c1/download/audit_trail"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
            .mount(&mock_server)
            .await;

        let api = EmailsApi::new(create_test_context(&mock_server.uri()));
        let bytes = api
            .download_email_audit_trail("e1", "c1")
            .await
            .unwrap()
            .into_bytes()
            .unwrap();
        assert_eq!(bytes, b"%PDF");
    }

    #[test]
    fn test_api_name() {
        let api = EmailsApi::new(create_test_context("http://localhost:0"));
        assert_eq!(api.api_name(), "emails");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
