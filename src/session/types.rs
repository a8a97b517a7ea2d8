use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the logged-in user as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            role: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Name if known, otherwise the email
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication state of the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserIdentity>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh session for a successful login
    pub fn authenticated(token: impl Into<String>, user: Option<UserIdentity>) -> Self {
        Self {
            token: Some(token.into()),
            user,
            issued_at: Some(Utc::now()),
        }
    }

    /// Empty tokens count as logged out
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token.is_none() && session.user.is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session::authenticated("", None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_user_ignores_unknown_fields() {
        let user: UserIdentity = serde_json::from_str(
            r#"{"id":"u1","email":"ops@hospital.org","avatar":"x.png","role":"manager"}"#,
        )
        .unwrap();
        assert_eq!(user.role.as_deref(), Some("manager"));
        assert_eq!(user.display_name(), "ops@hospital.org");
    }
}
