//! Opaque authentication boundary.
//!
//! # Responsibility
//! - Turn a presented credential token into a verified actor id.
//! - Keep credential policy (hashing, issuance, expiry) outside the core;
//!   this module only defines the seam services and gateways consume.
//!
//! # Invariants
//! - Verification never reveals why a token failed, only that it did.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::model::UserId;

/// Authentication failure; deliberately carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unauthenticated;

impl Display for Unauthenticated {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("credential token did not resolve to an actor")
    }
}

impl Error for Unauthenticated {}

/// Resolves credential tokens to verified actor ids.
pub trait Authenticator {
    fn verify(&self, token: &str) -> Result<UserId, Unauthenticated>;
}

/// Bearer-token table backing `Authenticator` for tests and local wiring.
///
/// Tokens are random opaque strings; issuing and revoking are the only
/// operations. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: Arc<RwLock<HashMap<String, UserId>>>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for `user` and returns it.
    pub fn issue(&self, user: UserId) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.write().insert(token.clone(), user);
        token
    }

    /// Invalidates one token; unknown tokens are ignored.
    pub fn revoke(&self, token: &str) {
        self.tokens.write().remove(token);
    }
}

impl Authenticator for TokenTable {
    fn verify(&self, token: &str) -> Result<UserId, Unauthenticated> {
        self.tokens
            .read()
            .get(token)
            .copied()
            .ok_or(Unauthenticated)
    }
}
