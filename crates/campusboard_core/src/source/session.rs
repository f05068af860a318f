//! Explicit session context for outgoing requests.

use std::fmt::{Debug, Formatter};

/// Session credentials injected into record sources.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session without credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session carrying a bearer token. Blank tokens are treated as absent.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let trimmed = token.trim();
        Self {
            token: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, when a token is present.
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn bearer_header_uses_trimmed_token() {
        let session = Session::with_token("  abc.def  ");
        assert_eq!(
            session.authorization_header().as_deref(),
            Some("Bearer abc.def")
        );
    }

    #[test]
    fn blank_token_is_anonymous() {
        let session = Session::with_token("   ");
        assert!(!session.is_authenticated());
        assert_eq!(session.authorization_header(), None);
        assert_eq!(session, Session::anonymous());
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", Session::with_token("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("redacted"));
    }
}
