#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use homeservices_backend::domain::{
    Actor, Material, NewClient, NewProfessional, OfferPayload, PricedOfferInput, Profession,
    VisitOfferInput,
};
use homeservices_backend::services::{FixedClock, Marketplace, MarketplaceConfig};

/// 2024-01-08 12:00 UTC (09:00 in the -03:00 display offset)
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap()
}

pub struct TestMarket {
    pub market: Marketplace,
    pub clock: Arc<FixedClock>,
    pub client: Actor,
    pub professional: Actor,
}

impl TestMarket {
    /// One client and one professional with a payment key
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(start_time()));
        let mut market = Marketplace::new(MarketplaceConfig::default(), clock.clone());

        let client = market
            .register_client(NewClient {
                full_name: "Cliente de Teste".to_string(),
                email: "cliente@teste.com".to_string(),
                phone: String::new(),
                address: String::new(),
            })
            .unwrap();
        let professional = market
            .register_professional(new_professional(
                "Roberto Souza",
                "roberto@teste.com",
                Some("roberto@pix.com"),
            ))
            .unwrap();

        Self {
            market,
            clock,
            client: Actor::client(client.id),
            professional: Actor::professional(professional.id),
        }
    }

    pub fn add_client(&mut self, name: &str, email: &str) -> Actor {
        let client = self
            .market
            .register_client(NewClient {
                full_name: name.to_string(),
                email: email.to_string(),
                phone: String::new(),
                address: String::new(),
            })
            .unwrap();
        Actor::client(client.id)
    }

    pub fn create_quote(&mut self, text: &str) -> Uuid {
        self.market
            .create_quote(&self.client, self.professional.user_id, text)
            .unwrap()
            .id
    }

    /// Quote answered with labor 100 + pipe 20
    pub fn answered_quote(&mut self) -> Uuid {
        let id = self.create_quote("leak");
        self.market
            .submit_offer(&self.professional, id, &pipe_offer())
            .unwrap();
        id
    }

    pub fn scheduled_quote(&mut self) -> Uuid {
        let id = self.answered_quote();
        self.market.accept_offer(&self.client, id).unwrap();
        self.market
            .schedule_visit(&self.client, id, date(2024, 1, 10), time(9, 0))
            .unwrap();
        id
    }

    pub fn completed_quote(&mut self) -> Uuid {
        let id = self.scheduled_quote();
        self.market.complete_service(&self.professional, id).unwrap();
        id
    }
}

pub fn new_professional(name: &str, email: &str, pix_key: Option<&str>) -> NewProfessional {
    NewProfessional {
        full_name: name.to_string(),
        email: email.to_string(),
        phone: String::new(),
        address: String::new(),
        profession: Profession::Plumber,
        experience: String::new(),
        services: Vec::new(),
        pix_key: pix_key.map(str::to_string),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn priced_offer(labor: i64, materials: &[(&str, i64)], visit_fee: Option<i64>) -> OfferPayload {
    OfferPayload::Priced(PricedOfferInput {
        description: "Troca do cano da pia".to_string(),
        labor_cost: Decimal::from(labor),
        materials: materials
            .iter()
            .map(|(name, price)| Material {
                name: name.to_string(),
                price: Decimal::from(*price),
            })
            .collect(),
        charge_visit_fee: visit_fee.is_some(),
        visit_fee: visit_fee.map(Decimal::from),
        visit_date: date(2024, 1, 10),
    })
}

pub fn pipe_offer() -> OfferPayload {
    priced_offer(100, &[("pipe", 20)], None)
}

pub fn visit_offer(fee: i64) -> OfferPayload {
    OfferPayload::Visit(VisitOfferInput {
        date: date(2024, 1, 12),
        time: "14:30".to_string(),
        fee: Some(Decimal::from(fee)),
        message: "Preciso ver o local antes".to_string(),
    })
}
