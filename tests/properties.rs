//! Property tests for offer pricing and ratings

use proptest::prelude::*;
use rust_decimal::Decimal;

use chrono::{NaiveDate, Utc};
use homeservices_backend::domain::{Material, PricedOfferInput, Review};
use homeservices_backend::services::pricing::build_priced_offer;
use homeservices_backend::services::reviews::mean_rating;

/// Money in cents, up to 100k
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_material() -> impl Strategy<Value = Material> {
    ("[a-z]{3,12}", arb_amount()).prop_map(|(name, price)| Material { name, price })
}

proptest! {
    #[test]
    fn offer_total_is_sum_of_parts(
        labor in (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2)),
        materials in prop::collection::vec(arb_material(), 0..8),
        fee in proptest::option::of(arb_amount()),
    ) {
        let input = PricedOfferInput {
            description: "serviço".to_string(),
            labor_cost: labor,
            materials: materials.clone(),
            charge_visit_fee: fee.is_some(),
            visit_fee: fee,
            visit_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        let (_, details) = build_priced_offer(&input).unwrap();

        let expected = labor
            + materials.iter().map(|m| m.price).sum::<Decimal>()
            + fee.unwrap_or(Decimal::ZERO);
        prop_assert_eq!(details.total, expected);
        prop_assert!(details.total >= details.labor_cost);
    }

    #[test]
    fn rating_is_mean_within_bounds(ratings in prop::collection::vec(1u8..=5, 1..50)) {
        let reviews: Vec<Review> = ratings
            .iter()
            .map(|&rating| Review {
                quote_id: None,
                client_name: "Cliente".to_string(),
                rating,
                comment: String::new(),
                date: Utc::now(),
            })
            .collect();

        let mean = mean_rating(&reviews);
        let expected = ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;
        prop_assert!((mean - expected).abs() < 1e-9);
        prop_assert!((1.0..=5.0).contains(&mean));
    }
}
