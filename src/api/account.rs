//! Account API
//!
//! Account details and the storage backend signed documents are copied to.

use std::sync::Arc;

use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::assemble_form;
use crate::schema::resolve_storage_options;
use crate::types::{Outcome, ValueMap};

const STORAGE_PATH: &str = "/v3/account/storage.json";

/// Account API
pub struct AccountApi {
    context: Arc<SignaturitContext>,
}

impl AccountApi {
    /// Create a new AccountApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/account.json
    pub async fn get_account(&self) -> Result<Outcome, SignaturitError> {
        self.context.get("/v3/account.json".to_string()).await
    }

    /// POST /v3/account/storage.json
    ///
    /// # Arguments
    /// * `storage_type` - `s3` or `sftp`
    /// * `params` - Backend settings, validated before sending
    pub async fn set_document_storage(
        &self,
        storage_type: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let options = resolve_storage_options(storage_type, params)?;
        let fields = assemble_form(&options)?;
        self.context
            .post_multipart(STORAGE_PATH.to_string(), fields)
            .await
    }

    /// DELETE /v3/account/storage.json
    pub async fn revert_to_default_document_storage(&self) -> Result<Outcome, SignaturitError> {
        self.context.delete(STORAGE_PATH.to_string()).await
    }
}

impl SignaturitApi for AccountApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "account"
    }
}
