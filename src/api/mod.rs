//! Signaturit API modules
//!
//! One module per remote resource. Every endpoint is a thin call-site that
//! supplies a verb and a path and hands its arguments to the marshaling
//! pipeline; results come back as [`Outcome`](crate::types::Outcome).
//!
//! - [`common`] - Pagination, count responses, path escaping
//! - [`signatures`] - Signature requests and signed document downloads
//! - [`brandings`] - Brandings, logos and email templates
//! - [`template`] - Document templates
//! - [`emails`] - Certified emails
//! - [`sms`] - Certified SMS
//! - [`subscriptions`] - Webhook subscriptions
//! - [`contacts`] - Address book contacts
//! - [`team`] - Team users, seats and groups
//! - [`account`] - Account details and document storage
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signaturit_sdk::api::{SignaturesApi, Page};
//!
//! let api = SignaturesApi::new(context);
//! let outcome = api.get_signatures(Page::default(), &conditions).await?;
//! ```

pub mod account;
pub mod brandings;
pub mod common;
pub mod contacts;
pub mod emails;
pub mod signatures;
pub mod sms;
pub mod subscriptions;
pub mod team;
pub mod template;
pub mod r#trait;

pub use account::AccountApi;
pub use brandings::BrandingsApi;
pub use common::{encode_id, CountResponse, Page};
pub use contacts::ContactsApi;
pub use emails::EmailsApi;
pub use r#trait::{SignaturitApi, SignaturitContext};
pub use signatures::SignaturesApi;
pub use sms::SmsApi;
pub use subscriptions::SubscriptionsApi;
pub use team::{TeamApi, TeamRole};
pub use template::TemplateApi;
