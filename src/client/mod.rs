//! Signaturit HTTP Client module
//!
//! This module contains the SignaturitClient, the builder and the unified
//! Signaturit facade.

mod signaturit_client;
pub use signaturit_client::{SignaturitClient, SignaturitClientBuilder};

mod signaturit;
pub use signaturit::Signaturit;

mod builder;
pub use builder::SignaturitBuilder;
