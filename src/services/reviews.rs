//! Review submission and professional rating

use uuid::Uuid;

use crate::domain::{Actor, NotificationType, Professional, Quote, QuoteStatus, Review};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;
use super::quotes::ensure_client;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Mean of all ratings, 0 for an empty collection
pub fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

/// Recomputes the derived rating fields from the review collection
pub fn refresh_rating(professional: &mut Professional) {
    professional.rating = mean_rating(&professional.reviews);
    professional.reviews_count = professional.reviews.len() as u32;
}

impl Marketplace {
    /// Files the client's review of a completed, unrated quote.
    ///
    /// Appends the review, recomputes the professional's rating and flags the
    /// quote as rated in one step; nothing changes if any check fails.
    pub fn submit_review(
        &mut self,
        actor: &Actor,
        quote_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> EngineResult<(Quote, Professional)> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &self.quotes[idx];
        ensure_client(quote, actor)?;

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(EngineError::validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
        if quote.status != QuoteStatus::Completed {
            return Err(EngineError::precondition(
                "only completed services can be reviewed",
            ));
        }
        if quote.has_been_rated {
            return Err(EngineError::precondition("this service was already reviewed"));
        }

        let professional_id = quote.professional_id;
        let client_name = self.client_name(quote.client_id);
        let professional = self
            .professionals
            .get_mut(&professional_id)
            .ok_or_else(|| EngineError::not_found("professional", professional_id))?;

        professional.reviews.push(Review {
            quote_id: Some(quote_id),
            client_name,
            rating: rating as u8,
            comment: comment.trim().to_string(),
            date: now,
        });
        refresh_rating(professional);
        let professional = professional.clone();

        let quote = &mut self.quotes[idx];
        quote.has_been_rated = true;
        quote.updated_at = now;
        let quote = quote.clone();

        tracing::info!(
            quote_id = %quote_id,
            professional_id = %professional_id,
            rating = rating,
            new_average = professional.rating,
            reviews_count = professional.reviews_count,
            "Review submitted"
        );

        self.notify(
            professional_id,
            NotificationType::ReviewReceived,
            format!("Você recebeu uma avaliação de {} estrelas", rating),
            None,
            Some(quote_id),
        );

        Ok((quote, professional))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(rating: u8) -> Review {
        Review {
            quote_id: None,
            client_name: "Ana".to_string(),
            rating,
            comment: String::new(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean_rating(&[]), 0.0);
    }

    #[test]
    fn test_mean_rating() {
        let reviews = vec![review(5), review(4)];
        assert_eq!(mean_rating(&reviews), 4.5);
    }

    #[test]
    fn test_mean_matches_incremental_formula() {
        let mut reviews = Vec::new();
        let mut average = 0.0_f64;
        for (n, r) in [5u8, 3, 4, 1, 2].iter().enumerate() {
            average = (average * n as f64 + f64::from(*r)) / (n as f64 + 1.0);
            reviews.push(review(*r));
            assert!((mean_rating(&reviews) - average).abs() < 1e-12);
        }
    }
}
