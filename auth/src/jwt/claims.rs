use serde::Deserialize;
use serde::Serialize;

/// Registered JWT claims carried by access tokens.
///
/// All fields are optional so that a well-signed token with a missing claim
/// decodes successfully; the caller decides whether an absent claim is an
/// error. Issued tokens always set `sub`, `exp`, and `iat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(1234567890)
            .with_issued_at(1234567800);

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.exp, Some(1234567890));
        assert_eq!(claims.iat, Some(1234567800));
    }

    #[test]
    fn test_serialization_skips_absent_claims() {
        let claims = Claims::new().with_subject("user123");
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"sub":"user123"}"#);
    }
}
