use std::fmt;

use crate::gateway::Gateway;

/// "Sign in with Google" entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginButton {
    href: String,
}

impl LoginButton {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Button pointing at the gateway's OAuth entry
    pub fn for_gateway(gateway: &Gateway) -> Self {
        Self::new(gateway.google_login_url())
    }

    pub fn href(&self) -> &str {
        &self.href
    }
}

impl fmt::Display for LoginButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ Sign in with Google ]")?;
        write!(f, "Open {} in your browser to continue.", self.href)
    }
}
