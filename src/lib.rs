//! Signaturit SDK for Rust
//!
//! An async client for the Signaturit e-signature REST API (v3): signature
//! requests, certified emails and SMS, brandings, templates, webhook
//! subscriptions, contacts, team management and account storage.
//!
//! ## API Coverage
//!
//! | Category | Endpoints |
//! |----------|-----------|
//! | Signatures | 8 |
//! | Brandings | 6 |
//! | Templates | 1 |
//! | Emails | 5 |
//! | SMS | 5 |
//! | Subscriptions | 6 |
//! | Contacts | 6 |
//! | Team | 16 |
//! | Account | 3 |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use signaturit_sdk::{Recipients, Signaturit, types::{FileRef, ValueMap}};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let signaturit = Signaturit::new("your_access_token", false)?;
//!
//!     let recipients = Recipients::from(
//!         ValueMap::new().with("name", "Jane").with("email", "jane@example.com"),
//!     );
//!     let outcome = signaturit
//!         .create_signature(&[FileRef::from_path("contract.pdf")], &recipients, &ValueMap::new())
//!         .await?;
//!
//!     let signature = outcome.into_json()?;
//!     println!("Signature id: {}", signature["id"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - One module per remote resource
//! - [`client`] - HTTP client, builder and the unified [`Signaturit`] facade
//! - [`marshal`] - Bracket-notation flattening, query building, body assembly
//! - [`schema`] - Option schemas and input validators
//! - [`interpret`] - HTTP response to [`Outcome`] mapping
//! - [`middleware`] - Tower middleware (logging)
//! - [`error`] - Error types
//! - [`types`] - Value trees, request specs and outcomes
//!
//! ## Error Handling
//!
//! Arguments are validated and marshaled before any network I/O; problems
//! there are returned as [`SignaturitError`]. Once a request was sent, the
//! result is always an [`Outcome`], including remote failures:
//!
//! ```rust,ignore
//! use signaturit_sdk::{Outcome, SignaturitError};
//!
//! match signaturit.get_signature("abc").await {
//!     Ok(Outcome::Success(json)) => { /* handle payload */ }
//!     Ok(Outcome::ApiError { status, message }) => {
//!         eprintln!("API error: {} - {}", status, message);
//!     }
//!     Ok(other) => println!("{:?}", other),
//!     Err(SignaturitError::Schema { field, reason }) => {
//!         eprintln!("bad option {}: {}", field, reason);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod interpret;
pub mod marshal;
pub mod middleware;
pub mod schema;
pub mod types;

pub use client::{Signaturit, SignaturitBuilder, SignaturitClient, SignaturitClientBuilder};
pub use error::SignaturitError;
pub use marshal::Recipients;
pub use types::{AccessToken, FileRef, Outcome, RequestSpec, Value, ValueMap};
