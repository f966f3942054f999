//! Token verification seam.
//!
//! The engine never inspects credentials itself; callers resolve a token to
//! an account through this trait so the core stays testable without a real
//! auth provider.

/// Opaque account identifier handed back by a verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AccountId),
    Unauthenticated,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> AuthOutcome;
}

/// Accepts any non-empty token and maps it to a single configured account.
/// Matches the original deployment, which checked token presence only.
#[derive(Debug, Clone)]
pub struct PresenceVerifier {
    account: AccountId,
}

impl PresenceVerifier {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: AccountId(account.into()),
        }
    }
}

impl TokenVerifier for PresenceVerifier {
    fn verify(&self, token: &str) -> AuthOutcome {
        if token.trim().is_empty() {
            AuthOutcome::Unauthenticated
        } else {
            AuthOutcome::Authenticated(self.account.clone())
        }
    }
}
