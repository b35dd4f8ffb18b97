//! Authentication types for JWT bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::OwnerId;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (owning user ID).
    pub sub: OwnerId,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(owner: OwnerId, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: owner,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the owner ID from claims.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.sub
    }

    /// Returns the expiry instant. An unrepresentable `exp` counts as expired.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
