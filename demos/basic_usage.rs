//! Basic usage example for signaturit-sdk
//!
//! Run with: SIGNATURIT_ACCESS_TOKEN=... cargo run --example basic_usage

use signaturit_sdk::{
    api::Page,
    middleware::LoggingMiddleware,
    types::{AccessToken, Outcome, ValueMap},
    Signaturit,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("SIGNATURIT_ACCESS_TOKEN").unwrap_or_else(|_| "your_token".into());

    let signaturit = Signaturit::builder()
        .access_token(AccessToken::new(token)?)
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    println!("Client created for {}", signaturit.base_url());

    let conditions = ValueMap::new().with("status", "completed");
    match signaturit.get_signatures(Page::new(10, 0), &conditions).await? {
        Outcome::Success(signatures) => println!("Signatures: {}", signatures),
        Outcome::ApiError { status, message } => println!("API error {}: {}", status, message),
        other => println!("Unexpected outcome: {:?}", other),
    }

    Ok(())
}
