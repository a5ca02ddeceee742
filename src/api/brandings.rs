//! Brandings API
//!
//! Look-and-feel settings applied to signature requests and emails, plus
//! the logo and email template assets attached to them.

use std::sync::Arc;

use super::common::encode_id;
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::assemble_form;
use crate::schema::{check_branding_options, resolve_branding_options};
use crate::types::{FileRef, Outcome, ValueMap};

/// Brandings API
pub struct BrandingsApi {
    context: Arc<SignaturitContext>,
}

impl BrandingsApi {
    /// Create a new BrandingsApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/brandings/{id}.json
    pub async fn get_branding(&self, branding_id: &str) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!("/v3/brandings/{}.json", encode_id(branding_id)))
            .await
    }

    /// GET /v3/brandings.json
    pub async fn get_brandings(&self) -> Result<Outcome, SignaturitError> {
        self.context.get("/v3/brandings.json".to_string()).await
    }

    /// POST /v3/brandings.json
    ///
    /// Unset options are filled with their defaults (`primary = false`).
    pub async fn create_branding(&self, params: &ValueMap) -> Result<Outcome, SignaturitError> {
        let options = resolve_branding_options(params)?;
        let fields = assemble_form(&options)?;
        self.context
            .post_multipart("/v3/brandings.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/brandings/{id}.json
    ///
    /// Only the options given are sent; null values are left out.
    pub async fn update_branding(
        &self,
        branding_id: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        let options = check_branding_options(params)?;
        self.context
            .patch_json(
                format!("/v3/brandings/{}.json", encode_id(branding_id)),
                &options,
            )
            .await
    }

    /// PUT /v3/brandings/{id}/logo.json
    pub async fn update_branding_logo(
        &self,
        branding_id: &str,
        logo: &FileRef,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .put_raw(
                format!("/v3/brandings/{}/logo.json", encode_id(branding_id)),
                logo,
            )
            .await
    }

    /// PUT /v3/brandings/{id}/emails/{template}.json
    ///
    /// # Arguments
    /// * `template` - Email template name, e.g. `signatures_request`
    /// * `file` - HTML body of the template
    pub async fn update_branding_template(
        &self,
        branding_id: &str,
        template: &str,
        file: &FileRef,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .put_raw(
                format!(
                    "/v3/brandings/{}/emails/{}.json",
                    encode_id(branding_id),
                    encode_id(template)
                ),
                file,
            )
            .await
    }
}

impl SignaturitApi for BrandingsApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "brandings"
    }
}
