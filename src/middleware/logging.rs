use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use http::StatusCode;
use log::{debug, info, warn};
use reqwest::{Request, Response};
use tower::{Layer, Service};

/// Logs method, redacted URL, status and latency of every request.
#[derive(Clone, Debug)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at debug level with request/response arrows instead of info.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "token",
    "password",
    "secret",
    "passphrase",
    "private",
    "authorization",
];

const REDACTED: &str = "[REDACTED]";

fn is_sensitive(key: &str) -> bool {
    // bracketed keys such as `auth[password]` are matched on their last segment
    let leaf = key
        .rsplit('[')
        .next()
        .unwrap_or(key)
        .trim_end_matches(']');
    SENSITIVE_FIELDS
        .iter()
        .any(|field| leaf.eq_ignore_ascii_case(field))
}

impl<S> LoggingMiddlewareService<S> {
    fn redact_url(url: &str) -> String {
        let Some((base, query)) = url.split_once('?') else {
            return url.to_string();
        };

        let redacted_query = query
            .split('&')
            .map(|param| match param.split_once('=') {
                Some((key, _)) if is_sensitive(&decode_key(key)) => format!("{key}={REDACTED}"),
                _ => param.to_string(),
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{base}?{redacted_query}")
    }

    fn log_request(method: &str, url: &str, verbose: bool) {
        let safe_url = Self::redact_url(url);
        if verbose {
            debug!("[Signaturit] >>> {} {}", method, safe_url);
        } else {
            info!("[Signaturit] {} {}", method, safe_url);
        }
    }

    fn log_response(status: u16, duration: Duration, verbose: bool) {
        if status >= 400 {
            warn!(
                "[Signaturit] {} {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else if verbose {
            debug!(
                "[Signaturit] <<< {} - {} ({:?})",
                status,
                Self::status_text(status),
                duration
            );
        } else {
            info!("[Signaturit] {} ({:?})", status, duration);
        }
    }

    fn status_text(status: u16) -> &'static str {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
    }
}

fn decode_key(key: &str) -> String {
    percent_encoding::percent_decode_str(key)
        .decode_utf8_lossy()
        .into_owned()
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = req.url().to_string();
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            Self::log_request(&method, &url, verbose);

            let start = Instant::now();
            let response = match inner.call(req).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(
                        "[Signaturit] {} {} failed after {:?}: {}",
                        method,
                        Self::redact_url(&url),
                        start.elapsed(),
                        err
                    );
                    return Err(err);
                }
            };

            Self::log_response(response.status().as_u16(), start.elapsed(), verbose);

            Ok(response)
        })
    }
}
