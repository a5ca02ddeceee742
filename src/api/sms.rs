//! Certified SMS API

use std::sync::Arc;

use super::common::{encode_id, Page};
use super::emails::ATTACHMENTS_KEY;
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::{assemble_multipart_as, Recipients};
use crate::types::value::load_files;
use crate::types::{FileRef, Outcome, ValueMap};

/// Certified SMS API
pub struct SmsApi {
    context: Arc<SignaturitContext>,
}

impl SmsApi {
    /// Create a new SmsApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/sms.json
    pub async fn get_sms(&self, page: Page, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/sms.json".to_string(), page, conditions)
            .await
    }

    /// GET /v3/sms/count.json
    pub async fn count_sms(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.context
            .get_filtered("/v3/sms/count.json".to_string(), conditions)
            .await
    }

    /// GET /v3/sms/{id}.json
    pub async fn get_single_sms(&self, sms_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/sms/{}.json", encode_id(sms_id)))
            .await
    }

    /// POST /v3/sms.json
    ///
    /// Recipients are identified by `phone`.
    pub async fn create_sms(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        body: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let mut extra = params.clone();
        extra.insert("body", body);

        let files = load_files(files).await?;
        let fields = assemble_multipart_as(ATTACHMENTS_KEY, &files, recipients, &extra)?;
        self.context
            .post_multipart("/v3/sms.json".to_string(), fields)
            .await
    }

    /// GET /v3/sms/{id}/certificates/{certificate_id}/download/audit_trail
    pub async fn download_sms_audit_trail(
        &self,
        sms_id: &str,
        certificate_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .download(format!(
                "/v3/sms/{}/certificates/{}/download/audit_trail",
                encode_id(sms_id),
                encode_id(certificate_id)
            ))
            .await
    }
}

impl SignaturitApi for SmsApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "sms"
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
    async fn test_create_sms() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/sms.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = SmsApi::new(create_test_context(&mock_server.uri()));
        let recipients = Recipients::from(
            ValueMap::new()
                .with("phone", "34600000000")
                .with("name", "John"),
        );
        let outcome = api
            .create_sms(&[], &recipients, "Your code is ready", &ValueMap::new())
            .await
            .unwrap();
        assert!(outcome.is_success());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(
            multipart_names(&requests[0].body),
            vec!["recipients[0][phone]", "recipients[0][name]", "body"]
        );
    }

    #[tokio::test]
    async fn test_get_sms_list() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/sms.json"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = SmsApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.get_sms(Page::new(10, 0), &ValueMap::new()).await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_get_single_sms_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/sms/missing.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("SMS not found"))
            .mount(&mock_server)
            .await;

        let api = SmsApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.get_single_sms("missing").await.unwrap();
        assert_eq!(
            outcome,
            Outcome::ApiError {
                status: 404,
                message: "SMS not found".to_string()
            }
        );
    }

    #[test]
    fn test_api_name() {
        let api = SmsApi::new(create_test_context("http://localhost:0"));
        assert_eq!(api.api_name(), "sms");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
