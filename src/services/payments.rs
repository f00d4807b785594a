//! Payment sub-flow for completed quotes: unpaid → requested → paid

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Actor, NotificationType, PaymentInstruction, PaymentStatus, Quote, QuoteStatus,
};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;
use super::quotes::{ensure_client, ensure_professional};
use super::state_machine::validate_payment_transition;

/// Copy-and-paste payload the client hands to their banking app
pub fn payment_payload(pix_key: &str, amount: Decimal, quote_id: Uuid) -> String {
    format!(
        "pix:{}?amount={}&reference={}",
        pix_key,
        amount.round_dp(2),
        quote_id.simple()
    )
}

/// Amount owed under the latest offer; zero or missing means nothing to pay
fn payable_amount(quote: &Quote) -> EngineResult<Decimal> {
    match quote.amount_due() {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        Some(_) => Err(EngineError::precondition("nothing to pay for this service")),
        None => Err(EngineError::precondition("quote has no accepted offer")),
    }
}

fn ensure_completed(quote: &Quote) -> EngineResult<()> {
    if quote.status != QuoteStatus::Completed {
        return Err(EngineError::precondition(
            "payments apply only to completed services",
        ));
    }
    Ok(())
}

impl Marketplace {
    /// Professional asks the client to pay
    pub fn request_payment(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        ensure_professional(quote, actor)?;
        ensure_completed(quote)?;
        validate_payment_transition(quote.payment_status, PaymentStatus::Requested)?;
        let amount = payable_amount(quote)?;

        quote.payment_status = PaymentStatus::Requested;
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %quote_id, "Payment requested");

        self.notify(
            snapshot.client_id,
            NotificationType::PaymentRequested,
            "Pagamento solicitado".to_string(),
            Some(format!("Valor: R$ {}", amount.round_dp(2))),
            Some(quote_id),
        );

        Ok(snapshot)
    }

    /// Instruction built from the professional's payment key and the accepted offer total
    pub fn payment_instruction(
        &self,
        actor: &Actor,
        quote_id: Uuid,
    ) -> EngineResult<PaymentInstruction> {
        let quote = self.quote(quote_id)?;
        ensure_client(quote, actor)?;
        ensure_completed(quote)?;
        if quote.payment_status == PaymentStatus::Unpaid {
            return Err(EngineError::precondition(
                "payment has not been requested by the professional",
            ));
        }

        let professional = self
            .professionals
            .get(&quote.professional_id)
            .ok_or_else(|| EngineError::not_found("professional", quote.professional_id))?;
        let pix_key = professional
            .pix_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                EngineError::precondition("the professional has no payment key configured")
            })?;

        let amount = payable_amount(quote)?;

        Ok(PaymentInstruction {
            quote_id,
            professional_name: professional.full_name.clone(),
            pix_key: pix_key.to_string(),
            amount,
            payload: payment_payload(pix_key, amount, quote_id),
        })
    }

    /// Client confirms having paid. Requires a generated instruction to be possible.
    pub fn confirm_payment(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &self.quotes[idx];
        ensure_client(quote, actor)?;
        ensure_completed(quote)?;
        validate_payment_transition(quote.payment_status, PaymentStatus::Paid)?;
        let instruction = self.payment_instruction(actor, quote_id)?;

        let quote = &mut self.quotes[idx];
        quote.payment_status = PaymentStatus::Paid;
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(
            quote_id = %quote_id,
            amount = %instruction.amount,
            "Payment confirmed"
        );

        self.notify(
            snapshot.professional_id,
            NotificationType::PaymentConfirmed,
            "Pagamento confirmado".to_string(),
            Some(format!("Valor: R$ {}", instruction.amount.round_dp(2))),
            Some(quote_id),
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_contains_key_amount_and_reference() {
        let id = Uuid::nil();
        let payload = payment_payload("prof@teste.com", Decimal::from(120), id);
        assert_eq!(
            payload,
            "pix:prof@teste.com?amount=120&reference=00000000000000000000000000000000"
        );
    }
}
