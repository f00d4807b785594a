//! User directory: clients and professionals

use uuid::Uuid;

use crate::domain::{
    Actor, Client, NewClient, NewProfessional, Professional, ProfessionalQuery, Review, Role,
};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;
use super::reviews::refresh_rating;

/// Identity resolved from a login email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub user_id: Uuid,
    pub role: Role,
}

fn normalize_email(email: &str) -> EngineResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(EngineError::validation("a valid email is required"));
    }
    Ok(email)
}

impl Marketplace {
    fn email_taken(&self, email: &str) -> bool {
        self.clients.values().any(|c| c.email == email)
            || self.professionals.values().any(|p| p.email == email)
    }

    pub fn register_client(&mut self, input: NewClient) -> EngineResult<Client> {
        let email = normalize_email(&input.email)?;
        if input.full_name.trim().is_empty() {
            return Err(EngineError::validation("full name is required"));
        }
        if self.email_taken(&email) {
            return Err(EngineError::validation(format!(
                "email {} is already registered",
                email
            )));
        }

        let client = Client {
            id: Uuid::new_v4(),
            full_name: input.full_name.trim().to_string(),
            email,
            phone: input.phone,
            address: input.address,
            created_at: self.now(),
        };
        self.clients.insert(client.id, client.clone());

        tracing::info!(client_id = %client.id, "Client registered");
        Ok(client)
    }

    pub fn register_professional(&mut self, input: NewProfessional) -> EngineResult<Professional> {
        self.register_professional_with_reviews(input, Vec::new())
    }

    /// Registers a professional carrying earlier reviews; rating is derived from them
    pub fn register_professional_with_reviews(
        &mut self,
        input: NewProfessional,
        reviews: Vec<Review>,
    ) -> EngineResult<Professional> {
        let email = normalize_email(&input.email)?;
        if input.full_name.trim().is_empty() {
            return Err(EngineError::validation("full name is required"));
        }
        if self.email_taken(&email) {
            return Err(EngineError::validation(format!(
                "email {} is already registered",
                email
            )));
        }
        if reviews.iter().any(|r| !(1..=5).contains(&r.rating)) {
            return Err(EngineError::validation("review ratings must be between 1 and 5"));
        }

        let mut professional = Professional {
            id: Uuid::new_v4(),
            full_name: input.full_name.trim().to_string(),
            email,
            phone: input.phone,
            address: input.address,
            profession: input.profession,
            experience: input.experience,
            services: input.services,
            pix_key: input.pix_key.filter(|k| !k.trim().is_empty()),
            rating: 0.0,
            reviews_count: 0,
            reviews,
            is_available: true,
            created_at: self.now(),
        };
        refresh_rating(&mut professional);
        self.professionals
            .insert(professional.id, professional.clone());

        tracing::info!(professional_id = %professional.id, "Professional registered");
        Ok(professional)
    }

    pub fn client(&self, client_id: Uuid) -> EngineResult<&Client> {
        self.clients
            .get(&client_id)
            .ok_or_else(|| EngineError::not_found("client", client_id))
    }

    pub fn professional(&self, professional_id: Uuid) -> EngineResult<&Professional> {
        self.professionals
            .get(&professional_id)
            .ok_or_else(|| EngineError::not_found("professional", professional_id))
    }

    /// Professionals matching the filter, best rated first
    pub fn list_professionals(&self, query: &ProfessionalQuery) -> Vec<&Professional> {
        let mut list: Vec<&Professional> = self
            .professionals
            .values()
            .filter(|p| query.profession.map_or(true, |prof| p.profession == prof))
            .filter(|p| query.available.map_or(true, |a| p.is_available == a))
            .collect();
        list.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.full_name.cmp(&b.full_name))
        });
        list
    }

    /// Looks up a login email among clients and professionals
    pub fn find_by_email(&self, email: &str) -> Option<DirectoryEntry> {
        let email = email.trim().to_lowercase();
        if let Some(c) = self.clients.values().find(|c| c.email == email) {
            return Some(DirectoryEntry {
                user_id: c.id,
                role: Role::Client,
            });
        }
        self.professionals
            .values()
            .find(|p| p.email == email)
            .map(|p| DirectoryEntry {
                user_id: p.id,
                role: Role::Professional,
            })
    }

    fn own_professional_mut(&mut self, actor: &Actor) -> EngineResult<&mut Professional> {
        if actor.role != Role::Professional {
            return Err(EngineError::forbidden("only professionals can change this"));
        }
        self.professionals
            .get_mut(&actor.user_id)
            .ok_or_else(|| EngineError::not_found("professional", actor.user_id))
    }

    /// Availability toggle, independent of any quote
    pub fn set_availability(&mut self, actor: &Actor, is_available: bool) -> EngineResult<Professional> {
        let professional = self.own_professional_mut(actor)?;
        professional.is_available = is_available;
        let professional = professional.clone();

        tracing::info!(
            professional_id = %professional.id,
            is_available = is_available,
            "Availability changed"
        );
        Ok(professional)
    }

    /// Sets or clears the key payment instructions are generated from
    pub fn set_payment_key(
        &mut self,
        actor: &Actor,
        pix_key: Option<&str>,
    ) -> EngineResult<Professional> {
        let pix_key = pix_key.map(str::trim).filter(|k| !k.is_empty());
        let professional = self.own_professional_mut(actor)?;
        professional.pix_key = pix_key.map(str::to_string);
        let professional = professional.clone();

        tracing::info!(
            professional_id = %professional.id,
            configured = professional.pix_key.is_some(),
            "Payment key updated"
        );
        Ok(professional)
    }
}
