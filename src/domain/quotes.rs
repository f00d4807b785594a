//! Quote domain types
//!
//! A quote is one negotiation thread between a client and a professional.
//! Its conversation doubles as the offer history: offers are messages.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Statuses
// ============================================================================

/// Quote status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Answered,
    Accepted,
    Rejected,
    Scheduled,
    Completed,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 6] = [
        QuoteStatus::Pending,
        QuoteStatus::Answered,
        QuoteStatus::Accepted,
        QuoteStatus::Rejected,
        QuoteStatus::Scheduled,
        QuoteStatus::Completed,
    ];
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Pending => write!(f, "pending"),
            QuoteStatus::Answered => write!(f, "answered"),
            QuoteStatus::Accepted => write!(f, "accepted"),
            QuoteStatus::Rejected => write!(f, "rejected"),
            QuoteStatus::Scheduled => write!(f, "scheduled"),
            QuoteStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Payment status, meaningful once the quote is completed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Requested,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Requested => write!(f, "requested"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

// ============================================================================
// Messages and offers
// ============================================================================

/// Which side of the quote wrote a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Client,
    Professional,
}

/// One material line in a priced offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub name: String,
    pub price: Decimal,
}

/// Terms of a priced offer. `total` is computed once at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OfferDetails {
    pub labor_cost: Decimal,
    pub materials: Vec<Material>,
    /// Zero when no visit fee is charged
    pub visit_fee: Decimal,
    pub total: Decimal,
    pub visit_date: NaiveDate,
}

/// Terms of a visit-only offer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitOfferDetails {
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    /// Zero when no fee is charged
    pub visit_fee: Decimal,
}

/// Message payload, decided when the message is built
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    Plain {
        text: String,
        #[serde(default)]
        is_read: bool,
    },
    PricedOffer {
        description: String,
        details: OfferDetails,
    },
    VisitOffer {
        text: String,
        details: VisitOfferDetails,
    },
}

/// Entry in a quote's conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteMessage {
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: MessageBody,
}

impl QuoteMessage {
    pub fn is_offer(&self) -> bool {
        !matches!(self.body, MessageBody::Plain { .. })
    }

    pub fn text(&self) -> &str {
        match &self.body {
            MessageBody::Plain { text, .. } => text,
            MessageBody::PricedOffer { description, .. } => description,
            MessageBody::VisitOffer { text, .. } => text,
        }
    }

    /// Amount owed if this offer is the accepted one
    pub fn offer_amount(&self) -> Option<Decimal> {
        match &self.body {
            MessageBody::Plain { .. } => None,
            MessageBody::PricedOffer { details, .. } => Some(details.total),
            MessageBody::VisitOffer { details, .. } => Some(details.visit_fee),
        }
    }
}

/// Latest free-text ping from a professional in transit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransitUpdate {
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

// ============================================================================
// Quote
// ============================================================================

/// Quote entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_id: Uuid,
    pub messages: Vec<QuoteMessage>,
    pub status: QuoteStatus,
    /// Display string, set when the quote becomes scheduled
    pub scheduled_visit: Option<String>,
    pub scheduled_for: Option<NaiveDateTime>,
    pub has_been_rated: bool,
    pub professional_en_route: bool,
    pub eta: Option<String>,
    pub transit_update: Option<TransitUpdate>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Most recent offer message. Later chat messages do not hide it.
    pub fn latest_offer(&self) -> Option<&QuoteMessage> {
        self.messages.iter().rev().find(|m| m.is_offer())
    }

    /// Amount owed under the latest offer
    pub fn amount_due(&self) -> Option<Decimal> {
        self.latest_offer().and_then(QuoteMessage::offer_amount)
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.client_id == user_id || self.professional_id == user_id
    }
}

/// Filter for listing quotes
#[derive(Debug, Clone, Deserialize, Default)]
pub struct QuoteQuery {
    #[serde(default)]
    pub status: Option<QuoteStatus>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to open a quote with a professional
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteRequest {
    pub professional_id: Uuid,
    pub message: String,
}

/// Priced offer as entered by the professional
#[derive(Debug, Clone, Deserialize)]
pub struct PricedOfferInput {
    pub description: String,
    pub labor_cost: Decimal,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub charge_visit_fee: bool,
    #[serde(default)]
    pub visit_fee: Option<Decimal>,
    pub visit_date: NaiveDate,
}

/// Visit-only offer as entered by the professional
#[derive(Debug, Clone, Deserialize)]
pub struct VisitOfferInput {
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub message: String,
}

/// Either shape of offer a professional can send
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OfferPayload {
    Priced(PricedOfferInput),
    Visit(VisitOfferInput),
}

/// Client's choice of date and time for a priced offer
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleVisitRequest {
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitUpdateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

// ============================================================================
// Payment instruction
// ============================================================================

/// What the client needs to pay a completed quote
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentInstruction {
    pub quote_id: Uuid,
    pub professional_name: String,
    pub pix_key: String,
    pub amount: Decimal,
    /// Copy-and-paste payload for the client's banking app
    pub payload: String,
}
