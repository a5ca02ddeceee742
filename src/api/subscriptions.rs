//! Webhook Subscriptions API
//!
//! Subscriptions deliver event notifications (`email_processed`,
//! `document_completed`, ...) to a callback URL.

use std::sync::Arc;

use super::common::{encode_id, Page};
use super::{SignaturitApi, SignaturitContext};
use crate::error::SignaturitError;
use crate::marshal::assemble_form;
use crate::types::{Outcome, ValueMap};

/// Webhook Subscriptions API
pub struct SubscriptionsApi {
    context: Arc<SignaturitContext>,
}

impl SubscriptionsApi {
    /// Create a new SubscriptionsApi instance
    pub fn new(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }

    /// GET /v3/subscriptions.json
    pub async fn get_subscriptions(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .list("/v3/subscriptions.json".to_string(), page, conditions)
            .await
    }

    /// GET /v3/subscriptions/count.json
    pub async fn count_subscriptions(
        &self,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .get_filtered("/v3/subscriptions/count.json".to_string(), conditions)
            .await
    }

    /// GET /v3/subscriptions/{id}.json
    pub async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .get(format!(
                "/v3/subscriptions/{}.json",
                encode_id(subscription_id)
            ))
            .await
    }

    /// POST /v3/subscriptions.json
    pub async fn create_subscription(
        &self,
        url: &str,
        events: &[&str],
    ) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new()
            .with("url", url)
            .with("events", events.to_vec());
        let fields = assemble_form(&params)?;
        self.context
            .post_multipart("/v3/subscriptions.json".to_string(), fields)
            .await
    }

    /// PATCH /v3/subscriptions/{id}.json
    ///
    /// `None` leaves the corresponding setting unchanged.
    pub async fn update_subscription(
        &self,
        subscription_id: &str,
        url: Option<&str>,
        events: Option<&[&str]>,
    ) -> Result<Outcome, SignaturitError> {
        let params = ValueMap::new()
            .with("url", url)
            .with("events", events.map(|events| events.to_vec()));
        self.context
            .patch_json(
                format!("/v3/subscriptions/{}.json", encode_id(subscription_id)),
                &params,
            )
            .await
    }

    /// DELETE /v3/subscriptions/{id}.json
    pub async fn delete_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.context
            .delete(format!(
                "/v3/subscriptions/{}.json",
                encode_id(subscription_id)
            ))
            .await
    }
}

impl SignaturitApi for SubscriptionsApi {
    fn context(&self) -> &SignaturitContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "subscriptions"
    }
}
