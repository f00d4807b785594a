//! Offer construction
//!
//! Validates professional input and freezes the offer terms, including the total.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::domain::{Material, OfferDetails, PricedOfferInput, VisitOfferDetails, VisitOfferInput};

use super::error::{EngineError, EngineResult};

/// total = labor + Σ materials + visit fee (zero when not charged)
pub fn offer_total(labor_cost: Decimal, materials: &[Material], visit_fee: Decimal) -> Decimal {
    let materials_total: Decimal = materials.iter().map(|m| m.price).sum();
    labor_cost + materials_total + visit_fee
}

/// Builds the terms of a priced offer
pub fn build_priced_offer(input: &PricedOfferInput) -> EngineResult<(String, OfferDetails)> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(EngineError::validation("offer description is required"));
    }
    if input.labor_cost <= Decimal::ZERO {
        return Err(EngineError::validation("labor cost must be greater than zero"));
    }

    let mut materials = Vec::with_capacity(input.materials.len());
    for material in &input.materials {
        let name = material.name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("material name is required"));
        }
        if material.price < Decimal::ZERO {
            return Err(EngineError::validation(format!(
                "material '{}' has a negative price",
                name
            )));
        }
        materials.push(Material {
            name: name.to_string(),
            price: material.price,
        });
    }

    let visit_fee = if input.charge_visit_fee {
        let fee = input
            .visit_fee
            .ok_or_else(|| EngineError::validation("visit fee amount is required when charged"))?;
        if fee < Decimal::ZERO {
            return Err(EngineError::validation("visit fee cannot be negative"));
        }
        fee
    } else {
        Decimal::ZERO
    };

    let total = offer_total(input.labor_cost, &materials, visit_fee);

    Ok((
        description.to_string(),
        OfferDetails {
            labor_cost: input.labor_cost,
            materials,
            visit_fee,
            total,
            visit_date: input.visit_date,
        },
    ))
}

/// Builds the terms of a visit-only offer
pub fn build_visit_offer(input: &VisitOfferInput) -> EngineResult<(String, VisitOfferDetails)> {
    let visit_time = parse_clock_time(&input.time)?;
    let visit_fee = input.fee.unwrap_or(Decimal::ZERO);
    if visit_fee < Decimal::ZERO {
        return Err(EngineError::validation("visit fee cannot be negative"));
    }

    Ok((
        input.message.trim().to_string(),
        VisitOfferDetails {
            visit_date: input.date,
            visit_time,
            visit_fee,
        },
    ))
}

/// Parses `HH:MM` (seconds optional)
pub fn parse_clock_time(s: &str) -> EngineResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| EngineError::validation(format!("invalid time '{}', expected HH:MM", s)))
}
