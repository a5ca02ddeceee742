use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::api::SignaturitContext;
use crate::error::SignaturitError;
use crate::types::AccessToken;

use super::signaturit_client::{MiddlewareExecutor, SignaturitClient};
use super::Signaturit;

#[must_use]
#[derive(Default)]
pub struct SignaturitBuilder<M = ()> {
    access_token: Option<AccessToken>,
    production: bool,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for SignaturitBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignaturitBuilder")
            .field("access_token", &self.access_token)
            .field("production", &self.production)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> SignaturitBuilder<M> {
    pub fn access_token(mut self, access_token: AccessToken) -> Self {
        self.access_token = Some(access_token);
        self
    }

    /// Target `https://api.signaturit.com` instead of the sandbox.
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Explicit base URL; takes precedence over [`production`](Self::production).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_middleware<M2>(self, middleware: M2) -> SignaturitBuilder<M2>
    where
        M2: Layer<SignaturitClient> + Clone + Send + Sync + 'static,
    {
        SignaturitBuilder {
            access_token: self.access_token,
            production: self.production,
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<Signaturit, SignaturitError>
    where
        M: Layer<SignaturitClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let access_token = self
            .access_token
            .ok_or_else(|| SignaturitError::Config("access_token is required".to_string()))?;

        let mut client_builder = SignaturitClient::builder()
            .access_token(access_token)
            .production(self.production);
        if let Some(base_url) = self.base_url {
            client_builder = client_builder.base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(connect_timeout);
        }
        let mut client = client_builder.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let context = Arc::new(SignaturitContext::new(Arc::new(client)));
        Ok(Signaturit::from(context))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
            as Pin<Box<dyn Future<Output = Result<ReqwestResponse, reqwest::Error>> + Send>>
    })
}
