//! Signaturit HTTP Client
//!
//! Turns a [`RequestSpec`] into an authenticated HTTP request and the
//! response into an [`Outcome`].

use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

use crate::error::SignaturitError;
use crate::interpret::{interpret, transport_error};
use crate::types::{AccessToken, FieldValue, FormField, Outcome, RequestBody, RequestSpec};
use crate::types::{QueryParam, ResponseKind};

pub(crate) const PRODUCTION_BASE_URL: &str = "https://api.signaturit.com";
pub(crate) const SANDBOX_BASE_URL: &str = "https://api.sandbox.signaturit.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("signaturit-rust-sdk/", env!("CARGO_PKG_VERSION"));

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Signaturit API Client
///
/// Holds the access token, the base URL and a reusable reqwest client.
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct SignaturitClient {
    http: Client,
    access_token: AccessToken,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for SignaturitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturitClient")
            .field("access_token", &self.access_token)
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl SignaturitClient {
    /// Create a new client builder
    pub fn builder() -> SignaturitClientBuilder {
        SignaturitClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Note: requests made through this client bypass the middleware pipeline
    /// and carry no credentials. Use [`send`](Self::send) instead.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Build the HTTP request for `spec` without sending it.
    ///
    /// # Errors
    /// `InvalidInput` when a file field declares an unparsable content type,
    /// `Http` when reqwest rejects the request.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<reqwest::Request, SignaturitError> {
        let builder = self
            .http
            .request(spec.method().clone(), self.url(spec.path()))
            .bearer_auth(self.access_token.as_str());

        let builder = match spec.body() {
            RequestBody::None => builder,
            RequestBody::Query(params) => builder.query(&query_pairs(params)),
            RequestBody::Multipart(fields) => builder.multipart(multipart_form(fields)?),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Raw(bytes) => builder.body(bytes.clone()),
        };

        Ok(builder.build()?)
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    /// Send one request and interpret the response.
    ///
    /// Remote failures, including transport faults, come back as
    /// `Ok(Outcome::ApiError | Outcome::TransportError)`.
    ///
    /// # Errors
    /// Only for requests that could not be built.
    pub async fn send(&self, spec: &RequestSpec) -> Result<Outcome, SignaturitError> {
        let request = self.build_request(spec)?;
        debug!(
            "[Signaturit] {} {} ({:?} body)",
            spec.method(),
            spec.path(),
            spec.body().kind()
        );

        let response = match self.send_request(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "[Signaturit] {} {} transport failure: {}",
                    spec.method(),
                    spec.path(),
                    e
                );
                return Ok(transport_error(&e));
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    "[Signaturit] {} {} failed reading response body: {}",
                    spec.method(),
                    spec.path(),
                    e
                );
                return Ok(transport_error(&e));
            }
        };

        let expect_json = spec.response_kind() == ResponseKind::Json;
        let outcome = interpret(status, &body, expect_json);
        if let Outcome::ApiError { status, message } = &outcome {
            debug!(
                "[Signaturit] {} {} returned {}: {}",
                spec.method(),
                spec.path(),
                status,
                message
            );
        }
        Ok(outcome)
    }
}

fn query_pairs(params: &[QueryParam]) -> Vec<(&str, &str)> {
    params
        .iter()
        .map(|p| (p.key.as_str(), p.value.as_str()))
        .collect()
}

fn multipart_form(fields: &[FormField]) -> Result<Form, SignaturitError> {
    // Bracketed names must reach the server verbatim.
    let mut form = Form::new().percent_encode_noop();

    for field in fields {
        form = match &field.value {
            FieldValue::Text(text) => form.text(field.name.clone(), text.clone()),
            FieldValue::File {
                file_name,
                content_type,
                content,
            } => {
                let mut part = Part::bytes(content.clone()).file_name(file_name.clone());
                if let Some(content_type) = content_type {
                    part = part.mime_str(content_type).map_err(|e| {
                        SignaturitError::InvalidInput(format!(
                            "invalid content type {content_type} for {file_name}: {e}"
                        ))
                    })?;
                }
                form.part(field.name.clone(), part)
            }
        };
    }

    Ok(form)
}

impl Service<reqwest::Request> for SignaturitClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for SignaturitClient
///
/// # Example
///
/// ```rust
/// use signaturit_sdk::client::SignaturitClient;
/// use signaturit_sdk::types::AccessToken;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SignaturitClient::builder()
///         .access_token(AccessToken::new("a_token")?)
///         .production(false)
///         .build()?;
///
///     assert_eq!(client.base_url(), "https://api.sandbox.signaturit.com");
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct SignaturitClientBuilder {
    access_token: Option<AccessToken>,
    production: bool,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl SignaturitClientBuilder {
    /// Set the API access token
    pub fn access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    /// Target the production environment instead of the sandbox
    ///
    /// Default: sandbox
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Override the base URL, ignoring the production flag
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the SignaturitClient
    ///
    /// # Errors
    /// Returns an error if the access token is not set or the base URL has
    /// no http(s) scheme
    pub fn build(self) -> Result<SignaturitClient, SignaturitError> {
        let access_token = self
            .access_token
            .ok_or_else(|| SignaturitError::Config("access_token is required".to_string()))?;

        let base_url = self.base_url.unwrap_or_else(|| {
            if self.production {
                PRODUCTION_BASE_URL.to_string()
            } else {
                SANDBOX_BASE_URL.to_string()
            }
        });

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SignaturitError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(SignaturitClient {
            http: client,
            access_token,
            base_url,
            middleware_executor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> SignaturitClient {
        SignaturitClient::builder()
            .access_token(AccessToken::new("a_token").unwrap())
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_default_is_sandbox() {
        let client = SignaturitClient::builder()
            .access_token(AccessToken::new("a_token").unwrap())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), SANDBOX_BASE_URL);
    }

    #[test]
    fn test_builder_production() {
        let client = SignaturitClient::builder()
            .access_token(AccessToken::new("a_token").unwrap())
            .production(true)
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_builder_missing_token() {
        let result = SignaturitClient::builder().build();
        assert!(matches!(result, Err(SignaturitError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_scheme_less_url() {
        let result = SignaturitClient::builder()
            .access_token(AccessToken::new("a_token").unwrap())
            .base_url("api.signaturit.com")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = test_client("https://api.sandbox.signaturit.com");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("a_token"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_build_request_sets_bearer_and_query() {
        let client = test_client("https://api.sandbox.signaturit.com/");
        let spec = RequestSpec::get("/v3/signatures.json").with_body(RequestBody::Query(vec![
            QueryParam::new("ids", "a,b"),
            QueryParam::new("limit", "100"),
        ]));

        let request = client.build_request(&spec).unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.sandbox.signaturit.com/v3/signatures.json?ids=a%2Cb&limit=100"
        );
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer a_token"
        );
    }

    #[test]
    fn test_build_request_rejects_bad_content_type() {
        let client = test_client("https://api.sandbox.signaturit.com");
        let spec = RequestSpec::post("/v3/signatures.json").with_body(RequestBody::Multipart(
            vec![FormField {
                name: "files[0]".to_string(),
                value: FieldValue::File {
                    file_name: "a.pdf".to_string(),
                    content_type: Some("not a mime".to_string()),
                    content: vec![1],
                },
            }],
        ));
        assert!(matches!(
            client.build_request(&spec),
            Err(SignaturitError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_send_interprets_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/signatures/count.json"))
            .and(header("authorization", "Bearer a_token"))
            .and(query_param("status", "completed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 3})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let spec = RequestSpec::get("/v3/signatures/count.json")
            .with_body(RequestBody::Query(vec![QueryParam::new("status", "completed")]));

        let outcome = client.send(&spec).await.unwrap();
        assert_eq!(outcome, Outcome::Success(serde_json::json!({"count": 3})));
    }

    #[tokio::test]
    async fn test_send_transport_failure_is_outcome() {
        let client = test_client("http://127.0.0.1:1");
        let outcome = client
            .send(&RequestSpec::get("/v3/signatures.json"))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::TransportError(_)));
    }

    #[tokio::test]
    async fn test_send_binary() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/signatures/s1/documents/d1/download/signed"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let spec = RequestSpec::get("/v3/signatures/s1/documents/d1/download/signed")
            .expecting_binary();
        let outcome = client.send(&spec).await.unwrap();
        assert_eq!(outcome, Outcome::Binary(b"%PDF".to_vec()));
    }
}
