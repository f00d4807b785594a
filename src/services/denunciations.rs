use uuid::Uuid;

use crate::domain::{Actor, Denunciation, DenunciationReason, Role};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;

impl Marketplace {
    /// Files a complaint against a professional the client has dealt with.
    /// Unlimited per pair; records are never changed afterwards.
    pub fn file_denunciation(
        &mut self,
        actor: &Actor,
        professional_id: Uuid,
        reason: DenunciationReason,
        description: &str,
    ) -> EngineResult<Denunciation> {
        if actor.role != Role::Client {
            return Err(EngineError::forbidden("only clients can file denunciations"));
        }
        let client_id = actor.user_id;
        if !self.clients.contains_key(&client_id) {
            return Err(EngineError::not_found("client", client_id));
        }
        if !self.professionals.contains_key(&professional_id) {
            return Err(EngineError::not_found("professional", professional_id));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(EngineError::validation("description cannot be empty"));
        }
        let has_quote = self
            .quotes
            .iter()
            .any(|q| q.client_id == client_id && q.professional_id == professional_id);
        if !has_quote {
            return Err(EngineError::precondition(
                "denunciations require an existing quote with the professional",
            ));
        }

        let denunciation = Denunciation {
            id: Uuid::new_v4(),
            client_id,
            professional_id,
            reason,
            description: description.to_string(),
            created_at: self.now(),
        };
        self.denunciations.push(denunciation.clone());

        tracing::info!(
            denunciation_id = %denunciation.id,
            client_id = %client_id,
            professional_id = %professional_id,
            reason = ?reason,
            "Denunciation filed"
        );

        Ok(denunciation)
    }

    /// Clients see their own filings; administrators see the whole log
    pub fn denunciations_for(&self, actor: &Actor) -> Vec<&Denunciation> {
        self.denunciations
            .iter()
            .filter(|d| actor.is_admin() || d.client_id == actor.user_id)
            .collect()
    }
}
