//! Templates API
//!
//! Read-only access to the document templates stored in the account.

use std::sync::Arc;

use super::common::Page;
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::types::{Outcome, ValueMap};

/// Templates API
pub struct TemplateApi {
    context: Arc<SignaturitContext>,
}

impl TemplateApi {
    /// Create a new TemplateApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/templates.json
    pub async fn get_templates(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/templates.json".to_string(), page, &ValueMap::new())
            .await
    }
}

impl SignaturitApi for TemplateApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "template"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::r#trait::test_support::create_test_context;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_templates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/templates.json"))
            .and(query_param("limit", "100"))
            .and(query_param("offset", "0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": "t1", "name": "NDA"}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = TemplateApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.get_templates(Page::default()).await.unwrap();
        let templates = outcome.into_json().unwrap();
        assert_eq!(templates[0]["name"], "NDA");
    }

    #[tokio::test]
    async fn test_get_templates_unauthorized() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/templates.json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let api = TemplateApi::new(create_test_context(&mock_server.uri()));
        let outcome = api.get_templates(Page::default()).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::ApiError {
                status: 401,
                message: "Unauthorized".to_string()
            }
        );
    }

    #[test]
    fn test_api_name() {
        let api = TemplateApi::new(create_test_context("http://localhost:0"));
        assert_eq!(api.api_name(), "template");
        assert_eq!(api.context().client().base_url(), "http://localhost:0");
    }
}
