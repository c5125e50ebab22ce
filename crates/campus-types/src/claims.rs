//! Token claims

use serde::{Deserialize, Serialize};

use crate::{Role, User, UserId};

/// Identity facts embedded in a session token.
///
/// Field names follow JWT conventions so the token payload reads
/// `{"id":101,"username":"student1","role":"student","iat":..,"exp":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id
    pub id: UserId,
    pub username: String,
    pub role: Role,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `user`, valid from `issued_at` for `ttl_secs` seconds
    pub fn for_user(user: &User, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }

    /// A token is expired strictly after its `exp` second
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }

    /// Seconds left before expiry, zero once expired
    pub fn remaining_secs(&self, now: i64) -> i64 {
        (self.exp - now).max(0)
    }
}
