use serde::{Deserialize, Serialize};

/// JWT claims issued by the demo login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// User role (`client`, `professional` or `admin`)
    pub role: String,
}
