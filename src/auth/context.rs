use super::Claims;
use uuid::Uuid;

use crate::domain::{Actor, Role};

/// Authenticated user context extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID (from JWT sub claim)
    pub user_id: Uuid,

    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: &Claims) -> Result<Self, &'static str> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| "Invalid user ID in token")?;
        let role = claims.role.parse().map_err(|_| "Invalid role in token")?;

        Ok(Self { user_id, role })
    }

    /// The engine-facing identity of this user
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }
}
