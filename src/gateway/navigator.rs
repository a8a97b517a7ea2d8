//! Client-side navigation performed by the gateway
//!
//! The only navigation the gateway triggers is the jump to the login view
//! after a 401.

/// Performs a client-side redirect
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Reports redirects through the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, path: &str) {
        tracing::warn!(path = %path, "Redirecting to login view");
    }
}
