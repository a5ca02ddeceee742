//! Signaturit API trait and context
//!
//! Provides the base trait and the shared context every endpoint group
//! builds its requests through.

use std::sync::Arc;

use http::Method;

use super::common::Page;
use crate::client::SignaturitClient;
use crate::error::SignaturitError;
use crate::marshal::{assemble_json, assemble_query, assemble_raw, build_query};
use crate::types::{FileRef, FormField, Outcome, RequestBody, RequestSpec, ValueMap};

/// Context holding shared resources for endpoint implementations.
#[derive(Clone)]
pub struct SignaturitContext {
    /// The HTTP client requests are sent through
    pub(crate) client: Arc<SignaturitClient>,
}

impl std::fmt::Debug for SignaturitContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturitContext")
            .field("client", &"SignaturitClient { .. }")
            .finish()
    }
}

impl SignaturitContext {
    /// Create a new SignaturitContext
    pub fn new(client: Arc<SignaturitClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the HTTP client.
    pub fn client(&self) -> &SignaturitClient {
        &self.client
    }

    /// Send a prepared request.
    pub async fn send(&self, spec: RequestSpec) -> Result<Outcome, SignaturitError> {
        self.client.send(&spec).await
    }

    pub(crate) async fn get(&self, path: String) -> Result<Outcome, SignaturitError> {
        self.send(RequestSpec::get(path)).await
    }

    /// GET with filter conditions and no pagination (count endpoints).
    pub(crate) async fn get_filtered(
        &self,
        path: String,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let query = build_query(conditions)?;
        let body = if query.is_empty() {
            RequestBody::None
        } else {
            RequestBody::Query(query)
        };
        self.send(RequestSpec::get(path).with_body(body)).await
    }

    pub(crate) async fn list(
        &self,
        path: String,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let query = assemble_query(conditions, page.limit, page.offset)?;
        self.send(RequestSpec::get(path).with_body(RequestBody::Query(query)))
            .await
    }

    pub(crate) async fn download(&self, path: String) -> Result<Outcome, SignaturitError> {
        self.send(RequestSpec::get(path).expecting_binary()).await
    }

    /// Request without a body, for action endpoints (cancel, reminder, ...).
    pub(crate) async fn call(&self, method: Method, path: String) -> Result<Outcome, SignaturitError> {
        self.send(RequestSpec::new(method, path)).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: String,
        fields: Vec<FormField>,
    ) -> Result<Outcome, SignaturitError> {
        self.send(RequestSpec::post(path).with_body(RequestBody::Multipart(fields)))
            .await
    }

    pub(crate) async fn patch_json(
        &self,
        path: String,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let body = assemble_json(params)?;
        self.send(RequestSpec::patch(path).with_body(RequestBody::Json(body)))
            .await
    }

    pub(crate) async fn put_raw(
        &self,
        path: String,
        file: &FileRef,
    ) -> Result<Outcome, SignaturitError> {
        let bytes = assemble_raw(&file.load().await?)?;
        self.send(RequestSpec::put(path).with_body(RequestBody::Raw(bytes)))
            .await
    }

    pub(crate) async fn delete(&self, path: String) -> Result<Outcome, SignaturitError> {
        self.send(RequestSpec::delete(path)).await
    }
}

/// Trait for Signaturit endpoint groups.
pub trait SignaturitApi: Send + Sync {
    /// Get a reference to the shared context
    fn context(&self) -> &SignaturitContext;

    /// Name of this endpoint group for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
