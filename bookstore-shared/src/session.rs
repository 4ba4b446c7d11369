//! The two-state gate in front of the back office
//!
//! The authoritative session lives on the server; this is the view the pages work with.

use serde::{Deserialize, Serialize};

use crate::urls;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
    },
}

impl SessionState {
    pub fn from_user(username: Option<String>) -> Self {
        match username {
            Some(username) => Self::Authenticated { username },
            None => Self::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username } => Some(username),
            Self::Anonymous => None,
        }
    }

    /// The catalog accepted the credentials
    pub fn login_succeeded(self, username: String) -> Self {
        Self::Authenticated { username }
    }

    pub fn logged_out(self) -> Self {
        Self::Anonymous
    }

    /// Where a protected page has to send the visitor when it is mounted
    pub fn mount_redirect(&self) -> Option<&'static str> {
        match self {
            Self::Anonymous => Some(urls::LOGIN),
            Self::Authenticated { .. } => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn login_then_logout() {
        let state = SessionState::default();
        assert_eq!(state.mount_redirect(), Some("/login"));

        let state = state.login_succeeded("admin".to_string());
        assert_eq!(state.username(), Some("admin"));
        assert_eq!(state.mount_redirect(), None);

        let state = state.logged_out();
        assert_eq!(state, SessionState::Anonymous);
        assert_eq!(state.mount_redirect(), Some("/login"));
    }

    #[test]
    fn mount_check_without_session_is_anonymous() {
        assert_eq!(SessionState::from_user(None), SessionState::Anonymous);
        assert!(SessionState::from_user(Some("clerk".to_string())).is_authenticated());
    }
}
