//! Middleware components for the Signaturit SDK.
//!
//! Middleware wraps the [`SignaturitClient`](crate::client::SignaturitClient)
//! as a Tower service and sees every outgoing `reqwest::Request`. Install it
//! with [`SignaturitBuilder::with_middleware`](crate::SignaturitBuilder::with_middleware).
//!
//! - [`LoggingMiddleware`] - Logs request/response information with secrets redacted
//!
//! ## Usage
//!
//! ```ignore
//! use signaturit_sdk::{middleware::LoggingMiddleware, Signaturit};
//!
//! let signaturit = Signaturit::builder()
//!     .access_token(token)
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
