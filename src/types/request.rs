//! Marshaled request descriptions handed to the transport.

use http::Method;

/// Value carried by one multipart field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File {
        file_name: String,
        content_type: Option<String>,
        content: Vec<u8>,
    },
}

/// One flat multipart field. `name` encodes nesting in bracket notation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.value, FieldValue::File { .. })
    }

    /// Text value, `None` for file fields.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(text) => Some(text),
            FieldValue::File { .. } => None,
        }
    }
}

/// One flat query-string pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Query(Vec<QueryParam>),
    Multipart(Vec<FormField>),
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Query,
    Multipart,
    Json,
    Raw,
}

impl RequestBody {
    pub fn kind(&self) -> BodyKind {
        match self {
            RequestBody::None => BodyKind::None,
            RequestBody::Query(_) => BodyKind::Query,
            RequestBody::Multipart(_) => BodyKind::Multipart,
            RequestBody::Json(_) => BodyKind::Json,
            RequestBody::Raw(_) => BodyKind::Raw,
        }
    }
}

/// How the response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Binary,
}

/// A fully marshaled request: verb, path relative to the base URL, body
/// and expected response kind.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: Method,
    path: String,
    body: RequestBody,
    response: ResponseKind,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::None,
            response: ResponseKind::Json,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Expect opaque bytes instead of JSON.
    pub fn expecting_binary(mut self) -> Self {
        self.response = ResponseKind::Binary;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn response_kind(&self) -> ResponseKind {
        self.response
    }
}
