use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

/// WordPress application password credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        basic_auth_header(&self.username, &self.password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Build a Basic authentication header value from `username:password`
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let token = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", token)
}
