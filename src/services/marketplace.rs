//! Marketplace store
//!
//! Owns every collection (users, quotes, denunciations, tickets, notifications)
//! and exposes the operation set. Operations are synchronous; callers serialise
//! access through [`SharedMarketplace`].

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Settings;
use crate::domain::{Client, Denunciation, Notification, Professional, Quote, SupportTicket};

use super::clock::Clock;
use super::error::{EngineError, EngineResult};

/// Store shared between request handlers
pub type SharedMarketplace = Arc<RwLock<Marketplace>>;

/// Tunables for time-derived values
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Added to "now" when a professional starts navigating
    pub eta_offset: Duration,
    /// Offset used for display strings (ETA, scheduled visit)
    pub display_offset: FixedOffset,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            eta_offset: Duration::minutes(25),
            display_offset: FixedOffset::west_opt(3 * 3600).unwrap_or_else(utc_offset),
        }
    }
}

impl From<&Settings> for MarketplaceConfig {
    fn from(settings: &Settings) -> Self {
        let display_offset = FixedOffset::east_opt(settings.display_utc_offset_hours * 3600)
            .unwrap_or_else(utc_offset);
        Self {
            eta_offset: Duration::minutes(settings.eta_offset_minutes.clamp(1, 1440)),
            display_offset,
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

pub struct Marketplace {
    config: MarketplaceConfig,
    clock: Arc<dyn Clock>,
    pub(crate) clients: HashMap<Uuid, Client>,
    pub(crate) professionals: HashMap<Uuid, Professional>,
    /// Append-only, creation order
    pub(crate) quotes: Vec<Quote>,
    pub(crate) denunciations: Vec<Denunciation>,
    pub(crate) tickets: Vec<SupportTicket>,
    pub(crate) notifications: Vec<Notification>,
}

impl Marketplace {
    pub fn new(config: MarketplaceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            clients: HashMap::new(),
            professionals: HashMap::new(),
            quotes: Vec::new(),
            denunciations: Vec::new(),
            tickets: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedMarketplace {
        Arc::new(RwLock::new(self))
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// `HH:MM` in the display offset
    pub(crate) fn display_clock_time(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.config.display_offset)
            .format("%H:%M")
            .to_string()
    }

    pub(crate) fn quote_index(&self, quote_id: Uuid) -> EngineResult<usize> {
        self.quotes
            .iter()
            .position(|q| q.id == quote_id)
            .ok_or_else(|| EngineError::not_found("quote", quote_id))
    }

    pub fn quote(&self, quote_id: Uuid) -> EngineResult<&Quote> {
        self.quote_index(quote_id).map(|idx| &self.quotes[idx])
    }

    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }
}
