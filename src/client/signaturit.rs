//! Unified Signaturit client

use std::sync::Arc;

use crate::api::{
    AccountApi, BrandingsApi, ContactsApi, EmailsApi, Page, SignaturesApi, SignaturitContext,
    SmsApi, SubscriptionsApi, TeamApi, TeamRole, TemplateApi,
};
use crate::error::SignaturitError;
use crate::marshal::Recipients;
use crate::types::{AccessToken, FileRef, Outcome, RequestSpec, ValueMap};

use super::builder::SignaturitBuilder;

/// Unified Signaturit client
///
/// This is the main entry point for the SDK. Every remote resource is one
/// method; every method returns an [`Outcome`] once the request was sent,
/// or an error when the arguments could not be marshaled.
///
/// # Example
///
/// ```rust,ignore
/// use signaturit_sdk::{Signaturit, Recipients, types::{FileRef, ValueMap}};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let signaturit = Signaturit::new("your_access_token", false)?;
///
///     let recipients = Recipients::from(
///         ValueMap::new().with("name", "John").with("email", "john@example.com"),
///     );
///     let outcome = signaturit
///         .create_signature(
///             &[FileRef::from_path("contract.pdf")],
///             &recipients,
///             &ValueMap::new().with("subject", "Please sign"),
///         )
///         .await?;
///     println!("{:?}", outcome);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Signaturit {
    context: Arc<SignaturitContext>,
}

impl std::fmt::Debug for Signaturit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signaturit")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

impl From<Arc<SignaturitContext>> for Signaturit {
    fn from(context: Arc<SignaturitContext>) -> Self {
        Self { context }
    }
}

impl Signaturit {
    /// Client for the production (`true`) or sandbox (`false`) environment
    /// with default timeouts and no middleware.
    pub fn new(access_token: &str, production: bool) -> Result<Self, SignaturitError> {
        let access_token = AccessToken::new(access_token).map_err(SignaturitError::Config)?;
        Self::builder()
            .access_token(access_token)
            .production(production)
            .build()
    }

    pub fn builder() -> SignaturitBuilder {
        SignaturitBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.context.client.base_url()
    }

    /// Shared context, for constructing endpoint groups directly.
    pub fn context(&self) -> Arc<SignaturitContext> {
        Arc::clone(&self.context)
    }

    /// Send a hand-built request through the same pipeline as every endpoint.
    pub async fn send(&self, spec: RequestSpec) -> Result<Outcome, SignaturitError> {
        self.context.send(spec).await
    }

    fn signatures(&self) -> SignaturesApi {
        SignaturesApi::new(self.context.clone())
    }

    fn brandings(&self) -> BrandingsApi {
        BrandingsApi::new(self.context.clone())
    }

    fn emails(&self) -> EmailsApi {
        EmailsApi::new(self.context.clone())
    }

    fn sms(&self) -> SmsApi {
        SmsApi::new(self.context.clone())
    }

    fn subscriptions(&self) -> SubscriptionsApi {
        SubscriptionsApi::new(self.context.clone())
    }

    fn contacts(&self) -> ContactsApi {
        ContactsApi::new(self.context.clone())
    }

    fn team(&self) -> TeamApi {
        TeamApi::new(self.context.clone())
    }

    fn account(&self) -> AccountApi {
        AccountApi::new(self.context.clone())
    }

    // Account API

    pub async fn get_account(&self) -> Result<Outcome, SignaturitError> {
        self.account().get_account().await
    }

    pub async fn set_document_storage(
        &self,
        storage_type: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.account()
            .set_document_storage(storage_type, params)
            .await
    }

    pub async fn revert_to_default_document_storage(&self) -> Result<Outcome, SignaturitError> {
        self.account().revert_to_default_document_storage().await
    }

    // Signatures API

    pub async fn count_signatures(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.signatures().count_signatures(conditions).await
    }

    pub async fn get_signature(&self, signature_id: &str) -> Result<Outcome, SignaturitError> {
        self.signatures().get_signature(signature_id).await
    }

    pub async fn get_signatures(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.signatures().get_signatures(page, conditions).await
    }

    pub async fn download_audit_trail(
        &self,
        signature_id: &str,
        document_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.signatures()
            .download_audit_trail(signature_id, document_id)
            .await
    }

    pub async fn download_signed_document(
        &self,
        signature_id: &str,
        document_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.signatures()
            .download_signed_document(signature_id, document_id)
            .await
    }

    pub async fn create_signature(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.signatures()
            .create_signature(files, recipients, params)
            .await
    }

    pub async fn cancel_signature(&self, signature_id: &str) -> Result<Outcome, SignaturitError> {
        self.signatures().cancel_signature(signature_id).await
    }

    pub async fn send_signature_reminder(
        &self,
        signature_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.signatures().send_signature_reminder(signature_id).await
    }

    // Brandings API

    pub async fn get_branding(&self, branding_id: &str) -> Result<Outcome, SignaturitError> {
        self.brandings().get_branding(branding_id).await
    }

    pub async fn get_brandings(&self) -> Result<Outcome, SignaturitError> {
        self.brandings().get_brandings().await
    }

    pub async fn create_branding(&self, params: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.brandings().create_branding(params).await
    }

    pub async fn update_branding(
        &self,
        branding_id: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.brandings().update_branding(branding_id, params).await
    }

    pub async fn update_branding_logo(
        &self,
        branding_id: &str,
        logo: &FileRef,
    ) -> Result<Outcome, SignaturitError> {
        self.brandings().update_branding_logo(branding_id, logo).await
    }

    pub async fn update_branding_template(
        &self,
        branding_id: &str,
        template: &str,
        file: &FileRef,
    ) -> Result<Outcome, SignaturitError> {
        self.brandings()
            .update_branding_template(branding_id, template, file)
            .await
    }

    // Templates API

    pub async fn get_templates(&self, page: Page) -> Result<Outcome, SignaturitError> {
        TemplateApi::new(self.context.clone())
            .get_templates(page)
            .await
    }

    // Emails API

    pub async fn get_emails(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.emails().get_emails(page, conditions).await
    }

    pub async fn count_emails(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.emails().count_emails(conditions).await
    }

    pub async fn get_email(&self, email_id: &str) -> Result<Outcome, SignaturitError> {
        self.emails().get_email(email_id).await
    }

    pub async fn create_email(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        subject: &str,
        body: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.emails()
            .create_email(files, recipients, subject, body, params)
            .await
    }

    pub async fn download_email_audit_trail(
        &self,
        email_id: &str,
        certificate_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.emails()
            .download_email_audit_trail(email_id, certificate_id)
            .await
    }

    // SMS API

    pub async fn get_sms(&self, page: Page, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.sms().get_sms(page, conditions).await
    }

    pub async fn count_sms(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.sms().count_sms(conditions).await
    }

    pub async fn get_single_sms(&self, sms_id: &str) -> Result<Outcome, SignaturitError> {
        self.sms().get_single_sms(sms_id).await
    }

    pub async fn create_sms(
        &self,
        files: &[FileRef],
        recipients: &Recipients,
        body: &str,
        params: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.sms().create_sms(files, recipients, body, params).await
    }

    pub async fn download_sms_audit_trail(
        &self,
        sms_id: &str,
        certificate_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.sms()
            .download_sms_audit_trail(sms_id, certificate_id)
            .await
    }

    // Subscriptions API

    pub async fn get_subscriptions(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.subscriptions().get_subscriptions(page, conditions).await
    }

    pub async fn count_subscriptions(
        &self,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.subscriptions().count_subscriptions(conditions).await
    }

    pub async fn get_subscription(&self, subscription_id: &str) -> Result<Outcome, SignaturitError> {
        self.subscriptions().get_subscription(subscription_id).await
    }

    pub async fn create_subscription(
        &self,
        url: &str,
        events: &[&str],
    ) -> Result<Outcome, SignaturitError> {
        self.subscriptions().create_subscription(url, events).await
    }

    pub async fn update_subscription(
        &self,
        subscription_id: &str,
        url: Option<&str>,
        events: Option<&[&str]>,
    ) -> Result<Outcome, SignaturitError> {
        self.subscriptions()
            .update_subscription(subscription_id, url, events)
            .await
    }

    pub async fn delete_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.subscriptions()
            .delete_subscription(subscription_id)
            .await
    }

    // Contacts API

    pub async fn get_contacts(
        &self,
        page: Page,
        conditions: &ValueMap,
    ) -> Result<Outcome, SignaturitError> {
        self.contacts().get_contacts(page, conditions).await
    }

    pub async fn count_contacts(&self, conditions: &ValueMap) -> Result<Outcome, SignaturitError> {
        self.contacts().count_contacts(conditions).await
    }

    pub async fn get_contact(&self, contact_id: &str) -> Result<Outcome, SignaturitError> {
        self.contacts().get_contact(contact_id).await
    }

    pub async fn create_contact(&self, email: &str, name: &str) -> Result<Outcome, SignaturitError> {
        self.contacts().create_contact(email, name).await
    }

    pub async fn update_contact(
        &self,
        contact_id: &str,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<Outcome, SignaturitError> {
        self.contacts().update_contact(contact_id, email, name).await
    }

    pub async fn delete_contact(&self, contact_id: &str) -> Result<Outcome, SignaturitError> {
        self.contacts().delete_contact(contact_id).await
    }

    // Team API

    pub async fn get_users(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.team().get_users(page).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Outcome, SignaturitError> {
        self.team().get_user(user_id).await
    }

    pub async fn invite_user(&self, email: &str, role: TeamRole) -> Result<Outcome, SignaturitError> {
        self.team().invite_user(email, role).await
    }

    pub async fn change_user_role(
        &self,
        user_id: &str,
        role: TeamRole,
    ) -> Result<Outcome, SignaturitError> {
        self.team().change_user_role(user_id, role).await
    }

    pub async fn remove_user(&self, user_id: &str) -> Result<Outcome, SignaturitError> {
        self.team().remove_user(user_id).await
    }

    pub async fn get_seats(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.team().get_seats(page).await
    }

    pub async fn remove_seat(&self, seat_id: &str) -> Result<Outcome, SignaturitError> {
        self.team().remove_seat(seat_id).await
    }

    pub async fn get_groups(&self, page: Page) -> Result<Outcome, SignaturitError> {
        self.team().get_groups(page).await
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Outcome, SignaturitError> {
        self.team().get_group(group_id).await
    }

    pub async fn create_group(&self, name: &str) -> Result<Outcome, SignaturitError> {
        self.team().create_group(name).await
    }

    pub async fn update_group(&self, group_id: &str, name: &str) -> Result<Outcome, SignaturitError> {
        self.team().update_group(group_id, name).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<Outcome, SignaturitError> {
        self.team().delete_group(group_id).await
    }

    pub async fn add_manager_to_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.team().add_manager_to_group(group_id, user_id).await
    }

    pub async fn remove_manager_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.team()
            .remove_manager_from_group(group_id, user_id)
            .await
    }

    pub async fn add_member_to_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.team().add_member_to_group(group_id, user_id).await
    }

    pub async fn remove_member_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> Result<Outcome, SignaturitError> {
        self.team()
            .remove_member_from_group(group_id, user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sandbox_and_production() {
        let sandbox = Signaturit::new("a_token", false).unwrap();
        assert_eq!(sandbox.base_url(), "https://api.sandbox.signaturit.com");

        let production = Signaturit::new("a_token", true).unwrap();
        assert_eq!(production.base_url(), "https://api.signaturit.com");
    }

    #[test]
    fn test_new_rejects_empty_token() {
        assert!(matches!(
            Signaturit::new("  ", true),
            Err(SignaturitError::Config(_))
        ));
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<Signaturit>();
    }
}
