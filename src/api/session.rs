//! Session credential shared by the engine and every façade.
//!
//! # Lifecycle
//! ```text
//! absent (construction)
//!     → set by login() or explicit assignment
//!     → replaced by a later login()/assignment (last write wins)
//! ```

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Cookie names the panel issues its session under, in lookup order.
/// Older releases use `session`, 3x-ui uses `3x-ui`.
pub const COOKIE_NAMES: [&str; 2] = ["session", "3x-ui"];

/// Session cookie issued by the panel.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    name: Option<String>,
    value: String,
}

impl Session {
    /// A session issued under a known cookie name.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// A session value of unknown origin; sent under every known cookie name.
    pub fn from_value(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: value.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cookies to attach to a request.
    pub fn cookies(&self) -> Vec<(String, String)> {
        match &self.name {
            Some(name) => vec![(name.clone(), self.value.clone())],
            None => COOKIE_NAMES
                .iter()
                .map(|name| (name.to_string(), self.value.clone()))
                .collect(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl From<&str> for Session {
    fn from(value: &str) -> Self {
        Session::from_value(value)
    }
}

impl From<String> for Session {
    fn from(value: String) -> Self {
        Session::from_value(value)
    }
}

/// Shared, atomically replaceable session slot.
///
/// Reads are lock-free; concurrent writers are last-write-wins.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<ArcSwapOption<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Session> {
        self.inner.load_full().map(|s| (*s).clone())
    }

    pub fn set(&self, session: Option<Session>) {
        self.inner.store(session.map(Arc::new));
    }

    pub fn is_set(&self) -> bool {
        let guard = self.inner.load();
        match &*guard {
            Some(session) => !session.value.is_empty(),
            None => false,
        }
    }

    /// Whether two handles point at the same slot.
    pub fn shares_with(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("set", &self.is_set())
            .finish()
    }
}

/// Login credentials.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Pre-shared login secret (`loginSecret`).
    pub login_secret: Option<String>,
    /// One-time two-factor code (`twoFactorCode`).
    pub two_factor_code: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_login_secret(mut self, secret: impl Into<String>) -> Self {
        self.login_secret = Some(secret.into());
        self
    }

    pub fn with_two_factor_code(mut self, code: impl Into<String>) -> Self {
        self.two_factor_code = Some(code.into());
        self
    }

    /// Login form body.
    pub fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "username": self.username,
            "password": self.password,
        });
        if let Some(secret) = &self.login_secret {
            body["loginSecret"] = secret.clone().into();
        }
        if let Some(code) = &self.two_factor_code {
            body["twoFactorCode"] = code.clone().into();
        }
        body
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("login_secret", &self.login_secret.is_some())
            .field("two_factor_code", &self.two_factor_code.is_some())
            .finish()
    }
}
