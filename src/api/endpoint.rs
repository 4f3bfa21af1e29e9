//! Endpoint descriptions: (method, path, requires-auth).
//!
//! Literal path parts are added with `segment`, caller-supplied values with
//! `param`. Only the route (parameters shown as `{}`) is used as a metric
//! label; emails and UUIDs stay out of it.

use crate::net::Method;

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_BINARY: &str = "application/octet-stream";

/// One panel endpoint. Path segments are percent-encoded when the URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub segments: Vec<String>,
    route: String,
    pub requires_auth: bool,
    pub accept: &'static str,
}

impl Endpoint {
    fn new(method: Method, path: &str) -> Self {
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            method,
            route: segments.join("/"),
            segments,
            requires_auth: true,
            accept: ACCEPT_JSON,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    /// Append a literal path segment (an action name).
    pub fn segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self.route.push('/');
        self.route.push_str(segment);
        self
    }

    /// Append a caller-supplied path segment (an ID, email or UUID).
    pub fn param(mut self, value: impl std::fmt::Display) -> Self {
        self.segments.push(value.to_string());
        self.route.push_str("/{}");
        self
    }

    /// The login endpoint: the only one allowed without a session.
    pub fn login() -> Self {
        let mut endpoint = Self::post("login");
        endpoint.requires_auth = false;
        endpoint
    }

    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }

    /// Slash-joined path with parameter values, for logs.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Path with parameters replaced by `{}`, for metric labels.
    pub fn route(&self) -> &str {
        &self.route
    }
}
