//! Contacts API

use std::sync::Arc;

use super::common::{encode_id, Page};
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::assemble_form;
use crate::types::{Outcome, ValueMap};

/// Contacts API
pub struct ContactsApi {
    context: Arc<SignaturitContext>,
}

impl ContactsApi {
    /// Create a new ContactsApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/contacts.json
    pub async fn get_contacts(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/contacts.json".to_string(), page, conditions)
            .await
    }

    /// GET /v3/contacts/count.json
    pub async fn count_contacts(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.context
            .get_filtered("/v3/contacts/count.json".to_string(), conditions)
            .await
    }

    /// GET /v3/contacts/{id}.json
    pub async fn get_contact(&self, contact_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/contacts/{}.json", encode_id(contact_id)))
            .await
    }

    /// POST /v3/contacts.json
    pub async fn create_contact(&self, email: &str, name: &str) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new().with("email", email).with("name", name);
        let fields = assemble_form(&params)?;
        self.context
            .post_multipart("/v3/contacts.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/contacts/{id}.json
    ///
    /// `None` leaves the corresponding field unchanged.
    pub async fn update_contact(
        &self,
        contact_id: &str,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new().with("email", email).with("name", name);
        self.context
            .patch_json(
                format!("/v3/contacts/{}.json", encode_id(contact_id)),
                &params,
            )
            .await
    }

    /// DELETE /v3/contacts/{id}.json
    pub async fn delete_contact(&self, contact_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .delete(format!("/v3/contacts/{}.json", encode_id(contact_id)))
            .await
    }
}

impl SignaturitApi for ContactsApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "contacts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::r#trait::test_support::{create_test_context, multipart_names};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_contact() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/contacts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ContactsApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.create_contact("john@example.com", "John").await.unwrap();
        assert!(outcome.is_success());

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(multipart_names(&requests[0].body), vec!["email", "name"]);
    }

    #[tokio::test]
    async fn test_update_contact_omits_absent_email() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v3/contacts/c1.json"))
            .and(body_json(json!({"name": "New name"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ContactsApi::new(create_test_context(&mock_server.uri()));
        let outcome = api
            .update_contact("c1", None, Some("New name"))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_get_contact_escapes_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/contacts/a%2Fb.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ContactsApi::new(create_test_context(&mock_server.uri()));
        assert!(api.get_contact("a/b").await.unwrap().is_success());
    }

    #[test]
    fn test_api_name() {
        let api = ContactsApi::new(create_test_context("http://localhost:0"));
        assert_eq!(api.api_name(), "contacts");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
