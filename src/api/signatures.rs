//! Signature Requests API
//!
//! # Endpoints
//!
//! - [`SignaturesApi::count_signatures`] - Count signature requests matching conditions
//! - [`SignaturesApi::get_signature`] - Get one signature request
//! - [`SignaturesApi::get_signatures`] - List signature requests
//! - [`SignaturesApi::download_audit_trail`] - Download a document's audit trail PDF
//! - [`SignaturesApi::download_signed_document`] - Download a signed document
//! - [`SignaturesApi::create_signature`] - Create a signature request
//! - [`SignaturesApi::cancel_signature`] - Cancel a signature request
//! - [`SignaturesApi::send_signature_reminder`] - Remind pending signers

use std::sync::Arc;

use http::Method;

use super::common::{encode_id, Page};
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::{assemble_multipart, Recipients};
use crate::schema::resolve_signature_request_options;
use crate::types::value::load_files;
use crate::types::{FileRef, Outcome, ValueMap};

/// Signature Requests API
pub struct SignaturesApi {
    context: Arc<SignaturitContext>,
}

impl SignaturesApi {
    /// Create a new SignaturesApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/signatures/count.json
    pub async fn count_signatures(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.context
            .get_filtered("/v3/signatures/count.json".to_string(), conditions)
            .await
    }

    /// GET /v3/signatures/{id}.json
    pub async fn get_signature(&self, signature_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/signatures/{}.json", encode_id(signature_id)))
            .await
    }

    /// GET /v3/signatures.json
    ///
    /// # Arguments
    /// * `page` - `limit` / `offset`, always sent last
    /// * `conditions` - Filters such as `status`, `since`, `ids` or a `data` map
    pub async fn get_signatures(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/signatures.json".to_string(), page, conditions)
            .await
    }

    /// GET /v3/signatures/{id}/documents/{document_id}/download/audit_trail
    pub async fn download_audit_trail(
        &self,
        signature_id: &str,
        document_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .download(format!(
                "/v3/signatures/{}/documents/{}/download/audit_trail",
                encode_id(signature_id),
                encode_id(document_id)
            ))
            .await
    }

    /// GET /v3/signatures/{id}/documents/{document_id}/download/signed
    pub async fn download_signed_document(
        &self,
        signature_id: &str,
        document_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .download(format!(
                "/v3/signatures/{}/documents/{}/download/signed",
                encode_id(signature_id),
                encode_id(document_id)
            ))
            .await
    }

    /// POST /v3/signatures.json
    ///
    /// `params` is validated and defaulted first; options beyond the common
    /// ones (`callback_url`, `expire_time`, ...) are forwarded as given.
    ///
    /// # Errors
    /// `Schema` for malformed options and `InvalidInput` for unreadable
    /// files, both before anything is sent.
    pub async fn create_signature(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let options = resolve_signature_request_options(params)?;
        let files = load_files(files).await?;
        let fields = assemble_multipart(&files, recipients, &options)?;
        self.context
            .post_multipart("/v3/signatures.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/signatures/{id}/cancel.json
    pub async fn cancel_signature(&self, signature_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .call(
                Method::PATCH,
                format!("/v3/signatures/{}/cancel.json", encode_id(signature_id)),
            )
            .await
    }

    /// POST /v3/signatures/{id}/reminder.json
    pub async fn send_signature_reminder(
        &self,
        signature_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .call(
                Method::POST,
                format!("/v3/signatures/{}/reminder.json", encode_id(signature_id)),
            )
            .await
    }
}

impl SignaturitApi for SignaturesApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "signatures"
    }
}
