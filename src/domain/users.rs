//! User directory domain types
//!
//! Clients, professionals and the reviews attached to a professional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Professional,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "client"),
            Role::Professional => write!(f, "professional"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "professional" => Ok(Role::Professional),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The user performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn client(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Client,
        }
    }

    pub fn professional(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Professional,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Trades offered on the marketplace
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Electrician,
    Mason,
    Tiler,
    PoolCleaner,
    Plumber,
    LeakDetector,
    Gardener,
    Ironer,
    ElderlyCaregiver,
    Nanny,
    Housekeeper,
}

impl Profession {
    pub const ALL: [Profession; 11] = [
        Profession::Electrician,
        Profession::Mason,
        Profession::Tiler,
        Profession::PoolCleaner,
        Profession::Plumber,
        Profession::LeakDetector,
        Profession::Gardener,
        Profession::Ironer,
        Profession::ElderlyCaregiver,
        Profession::Nanny,
        Profession::Housekeeper,
    ];

    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Profession::Electrician => "Eletricista",
            Profession::Mason => "Pedreiro",
            Profession::Tiler => "Azulejista",
            Profession::PoolCleaner => "Piscineiro",
            Profession::Plumber => "Encanador",
            Profession::LeakDetector => "Caça-vazamento",
            Profession::Gardener => "Jardineiro",
            Profession::Ironer => "Passadeira",
            Profession::ElderlyCaregiver => "Cuidador de Idosos",
            Profession::Nanny => "Babá",
            Profession::Housekeeper => "Diarista",
        }
    }
}

/// Client account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// A client's review of a completed service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Quote the review was filed for; `None` for imported history
    pub quote_id: Option<Uuid>,
    pub client_name: String,
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// Professional account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub profession: Profession,
    pub experience: String,
    pub services: Vec<String>,
    /// Payment destination; payment instructions cannot be generated without it
    pub pix_key: Option<String>,
    /// Mean of all review ratings, 0 when there are none
    pub rating: f64,
    pub reviews_count: u32,
    pub reviews: Vec<Review>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a client
#[derive(Debug, Clone, Deserialize)]
pub struct NewClient {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Input for registering a professional
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfessional {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub profession: Profession,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub pix_key: Option<String>,
}

/// Filter for listing professionals
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProfessionalQuery {
    #[serde(default)]
    pub profession: Option<Profession>,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Public professional summary for listings
#[derive(Debug, Clone, Serialize)]
pub struct ProfessionalSummary {
    pub id: Uuid,
    pub full_name: String,
    pub profession: Profession,
    pub profession_label: &'static str,
    pub rating: f64,
    pub reviews_count: u32,
    pub is_available: bool,
}

impl From<&Professional> for ProfessionalSummary {
    fn from(p: &Professional) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name.clone(),
            profession: p.profession,
            profession_label: p.profession.label(),
            rating: p.rating,
            reviews_count: p.reviews_count,
            is_available: p.is_available,
        }
    }
}

/// Request to toggle availability
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

/// Request to set or clear the payment key
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentKeyRequest {
    #[serde(default)]
    pub pix_key: Option<String>,
}
