//! Denunciation domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of complaint categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DenunciationReason {
    NoShow,
    PoorWorkmanship,
    InappropriateConduct,
    BillingDispute,
    Other,
}

impl DenunciationReason {
    pub const ALL: [DenunciationReason; 5] = [
        DenunciationReason::NoShow,
        DenunciationReason::PoorWorkmanship,
        DenunciationReason::InappropriateConduct,
        DenunciationReason::BillingDispute,
        DenunciationReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DenunciationReason::NoShow => "Não compareceu ao serviço",
            DenunciationReason::PoorWorkmanship => "Serviço mal executado",
            DenunciationReason::InappropriateConduct => "Conduta inadequada",
            DenunciationReason::BillingDispute => "Problema com o valor cobrado",
            DenunciationReason::Other => "Outro (descrever abaixo)",
        }
    }
}

/// Client complaint against a professional. Immutable once filed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Denunciation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub reason: DenunciationReason,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDenunciationRequest {
    pub professional_id: Uuid,
    pub reason: DenunciationReason,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReasonOption {
    pub reason: DenunciationReason,
    pub label: &'static str,
}
