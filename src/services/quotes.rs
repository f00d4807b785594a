//! Quote lifecycle operations
//!
//! Every operation checks the actor, then the current status, and only then
//! mutates. A failed call leaves the quote untouched.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::domain::{
    Actor, MessageBody, NotificationType, OfferPayload, PaymentStatus, Quote, QuoteMessage,
    QuoteQuery, QuoteStatus, Role, Sender, TransitUpdate,
};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;
use super::pricing::{build_priced_offer, build_visit_offer};
use super::state_machine::{validate_decision, validate_transition, Decision};

/// Rejects anyone but the quote's client
pub(crate) fn ensure_client(quote: &Quote, actor: &Actor) -> EngineResult<()> {
    if actor.role == Role::Client && actor.user_id == quote.client_id {
        Ok(())
    } else {
        Err(EngineError::forbidden("only the quote's client can do this"))
    }
}

/// Rejects anyone but the quote's professional
pub(crate) fn ensure_professional(quote: &Quote, actor: &Actor) -> EngineResult<()> {
    if actor.role == Role::Professional && actor.user_id == quote.professional_id {
        Ok(())
    } else {
        Err(EngineError::forbidden("only the quote's professional can do this"))
    }
}

/// Which side of the conversation the actor is on
pub(crate) fn sender_for(quote: &Quote, actor: &Actor) -> EngineResult<Sender> {
    match actor.role {
        Role::Client if actor.user_id == quote.client_id => Ok(Sender::Client),
        Role::Professional if actor.user_id == quote.professional_id => Ok(Sender::Professional),
        _ => Err(EngineError::forbidden("not a participant of this quote")),
    }
}

/// Display string for a scheduled visit, e.g. `10/01/2024 às 09:00`
pub fn format_visit(date: NaiveDate, time: NaiveTime) -> String {
    format!("{} às {}", date.format("%d/%m/%Y"), time.format("%H:%M"))
}

fn require_text(text: &str, what: &str) -> EngineResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(EngineError::validation(format!("{} cannot be empty", what)));
    }
    Ok(text.to_string())
}

impl Marketplace {
    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// A quote as seen by one of its parties (or an administrator)
    pub fn view_quote(&self, actor: &Actor, quote_id: Uuid) -> EngineResult<&Quote> {
        let quote = self.quote(quote_id)?;
        if actor.is_admin() || quote.involves(actor.user_id) {
            Ok(quote)
        } else {
            Err(EngineError::forbidden("not a participant of this quote"))
        }
    }

    /// Quotes visible to the actor, oldest first
    pub fn quotes_for(&self, actor: &Actor, query: &QuoteQuery) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| actor.is_admin() || q.involves(actor.user_id))
            .filter(|q| query.status.map_or(true, |s| q.status == s))
            .collect()
    }

    /// Whether the client has an offer waiting for a decision
    pub fn has_new_offers(&self, client_id: Uuid) -> bool {
        self.quotes
            .iter()
            .any(|q| q.client_id == client_id && q.status == QuoteStatus::Answered)
    }

    // ------------------------------------------------------------------
    // Creation and offers
    // ------------------------------------------------------------------

    pub fn create_quote(
        &mut self,
        actor: &Actor,
        professional_id: Uuid,
        message: &str,
    ) -> EngineResult<Quote> {
        if actor.role != Role::Client {
            return Err(EngineError::forbidden("only clients can request quotes"));
        }
        let client_id = actor.user_id;
        if !self.clients.contains_key(&client_id) {
            return Err(EngineError::not_found("client", client_id));
        }
        if !self.professionals.contains_key(&professional_id) {
            return Err(EngineError::not_found("professional", professional_id));
        }
        if client_id == professional_id {
            return Err(EngineError::validation(
                "client and professional must be different users",
            ));
        }
        let text = require_text(message, "message")?;

        let now = self.now();
        let quote = Quote {
            id: Uuid::new_v4(),
            client_id,
            professional_id,
            messages: vec![QuoteMessage {
                sender: Sender::Client,
                sent_at: now,
                body: MessageBody::Plain {
                    text,
                    is_read: false,
                },
            }],
            status: QuoteStatus::Pending,
            scheduled_visit: None,
            scheduled_for: None,
            has_been_rated: false,
            professional_en_route: false,
            eta: None,
            transit_update: None,
            payment_status: PaymentStatus::Unpaid,
            created_at: now,
            updated_at: now,
        };
        self.quotes.push(quote.clone());

        tracing::info!(
            quote_id = %quote.id,
            client_id = %client_id,
            professional_id = %professional_id,
            "Quote created"
        );

        let client_name = self.client_name(client_id);
        self.notify(
            professional_id,
            NotificationType::QuoteReceived,
            format!("Novo pedido de orçamento de {}", client_name),
            Some(quote.messages[0].text().to_string()),
            Some(quote.id),
        );

        Ok(quote)
    }

    /// Professional answers a pending quote with a priced or visit-only offer
    pub fn submit_offer(
        &mut self,
        actor: &Actor,
        quote_id: Uuid,
        payload: &OfferPayload,
    ) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &self.quotes[idx];
        ensure_professional(quote, actor)?;
        validate_transition(quote.status, QuoteStatus::Answered)?;

        let body = match payload {
            OfferPayload::Priced(input) => {
                let (description, details) = build_priced_offer(input)?;
                MessageBody::PricedOffer {
                    description,
                    details,
                }
            }
            OfferPayload::Visit(input) => {
                let (text, details) = build_visit_offer(input)?;
                MessageBody::VisitOffer { text, details }
            }
        };

        let quote = &mut self.quotes[idx];
        quote.messages.push(QuoteMessage {
            sender: Sender::Professional,
            sent_at: now,
            body,
        });
        quote.status = QuoteStatus::Answered;
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(
            quote_id = %quote_id,
            professional_id = %actor.user_id,
            amount = ?snapshot.amount_due(),
            "Offer submitted"
        );

        let professional_name = self.professional_name(snapshot.professional_id);
        self.notify(
            snapshot.client_id,
            NotificationType::OfferReceived,
            format!("{} enviou uma proposta", professional_name),
            None,
            Some(quote_id),
        );

        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Client decision
    // ------------------------------------------------------------------

    pub fn accept_offer(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        self.decide(actor, quote_id, QuoteStatus::Accepted)
    }

    pub fn reject_offer(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        self.decide(actor, quote_id, QuoteStatus::Rejected)
    }

    fn decide(&mut self, actor: &Actor, quote_id: Uuid, to: QuoteStatus) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        ensure_client(quote, actor)?;

        if validate_decision(quote.status, to)? == Decision::AlreadyApplied {
            tracing::debug!(quote_id = %quote_id, status = %to, "Repeated decision ignored");
            return Ok(quote.clone());
        }

        quote.status = to;
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %quote_id, status = %to, "Offer decided");

        let (kind, title) = if to == QuoteStatus::Accepted {
            (NotificationType::OfferAccepted, "Sua proposta foi aceita")
        } else {
            (NotificationType::OfferRejected, "Sua proposta foi recusada")
        };
        self.notify(
            snapshot.professional_id,
            kind,
            title.to_string(),
            None,
            Some(quote_id),
        );

        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Client picks a date and time for an accepted priced offer
    pub fn schedule_visit(
        &mut self,
        actor: &Actor,
        quote_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> EngineResult<Quote> {
        let idx = self.quote_index(quote_id)?;
        let quote = &self.quotes[idx];
        ensure_client(quote, actor)?;
        validate_transition(quote.status, QuoteStatus::Scheduled)?;
        match quote.latest_offer().map(|m| &m.body) {
            Some(MessageBody::PricedOffer { .. }) => {}
            Some(_) => {
                return Err(EngineError::precondition(
                    "visit offers are confirmed, not scheduled",
                ))
            }
            None => return Err(EngineError::precondition("quote has no offer")),
        }

        self.mark_scheduled(idx, date, time)
    }

    /// Client confirms the date and time proposed in an accepted visit offer
    pub fn confirm_visit(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let idx = self.quote_index(quote_id)?;
        let quote = &self.quotes[idx];
        ensure_client(quote, actor)?;
        validate_transition(quote.status, QuoteStatus::Scheduled)?;
        let (date, time) = match quote.latest_offer().map(|m| &m.body) {
            Some(MessageBody::VisitOffer { details, .. }) => {
                (details.visit_date, details.visit_time)
            }
            Some(_) => {
                return Err(EngineError::precondition(
                    "priced offers need a date and time chosen by the client",
                ))
            }
            None => return Err(EngineError::precondition("quote has no offer")),
        };

        self.mark_scheduled(idx, date, time)
    }

    fn mark_scheduled(&mut self, idx: usize, date: NaiveDate, time: NaiveTime) -> EngineResult<Quote> {
        let now = self.now();
        let visit_display = format_visit(date, time);
        let quote = &mut self.quotes[idx];
        quote.status = QuoteStatus::Scheduled;
        quote.scheduled_for = Some(date.and_time(time));
        quote.scheduled_visit = Some(visit_display.clone());
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %snapshot.id, visit = %visit_display, "Visit scheduled");

        self.notify(
            snapshot.professional_id,
            NotificationType::VisitScheduled,
            "Visita agendada".to_string(),
            Some(visit_display),
            Some(snapshot.id),
        );

        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Transit
    // ------------------------------------------------------------------

    /// Professional leaves for the visit; ETA is now + the configured offset
    pub fn start_navigation(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let now = self.now();
        let eta = self.display_clock_time(now + self.config().eta_offset);
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        ensure_professional(quote, actor)?;
        if quote.status != QuoteStatus::Scheduled {
            return Err(EngineError::precondition(
                "navigation can only start for a scheduled visit",
            ));
        }
        if quote.professional_en_route {
            return Ok(quote.clone());
        }

        quote.professional_en_route = true;
        quote.eta = Some(eta.clone());
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %quote_id, eta = %eta, "Professional en route");

        self.notify(
            snapshot.client_id,
            NotificationType::ProfessionalEnRoute,
            "O profissional está a caminho".to_string(),
            Some(format!("Chegada prevista às {}", eta)),
            Some(quote_id),
        );

        Ok(snapshot)
    }

    /// Replaces the latest transit ping; earlier ones are discarded
    pub fn send_transit_update(
        &mut self,
        actor: &Actor,
        quote_id: Uuid,
        text: &str,
    ) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        ensure_professional(quote, actor)?;
        if quote.status != QuoteStatus::Scheduled || !quote.professional_en_route {
            return Err(EngineError::precondition(
                "transit updates require the professional to be en route",
            ));
        }
        let text = require_text(text, "transit update")?;

        quote.transit_update = Some(TransitUpdate {
            text: text.clone(),
            sent_at: now,
        });
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %quote_id, "Transit update sent");

        self.notify(
            snapshot.client_id,
            NotificationType::TransitUpdate,
            "Atualização do profissional".to_string(),
            Some(text),
            Some(quote_id),
        );

        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    pub fn complete_service(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        ensure_professional(quote, actor)?;
        validate_transition(quote.status, QuoteStatus::Completed)?;

        quote.status = QuoteStatus::Completed;
        quote.professional_en_route = false;
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::info!(quote_id = %quote_id, "Service completed");

        self.notify(
            snapshot.client_id,
            NotificationType::ServiceCompleted,
            "Serviço concluído".to_string(),
            Some("Avalie o profissional e conclua o pagamento".to_string()),
            Some(quote_id),
        );

        Ok(snapshot)
    }

    // ------------------------------------------------------------------
    // Chat
    // ------------------------------------------------------------------

    /// Appends a plain message from whichever party the actor is
    pub fn send_message(&mut self, actor: &Actor, quote_id: Uuid, text: &str) -> EngineResult<Quote> {
        let now = self.now();
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        let sender = sender_for(quote, actor)?;
        if quote.status == QuoteStatus::Rejected {
            return Err(EngineError::precondition(
                "the conversation is closed for rejected quotes",
            ));
        }
        let text = require_text(text, "message")?;

        quote.messages.push(QuoteMessage {
            sender,
            sent_at: now,
            body: MessageBody::Plain {
                text: text.clone(),
                is_read: false,
            },
        });
        quote.updated_at = now;
        let snapshot = quote.clone();

        tracing::debug!(quote_id = %quote_id, sender = ?sender, "Message sent");

        let recipient = match sender {
            Sender::Client => snapshot.professional_id,
            Sender::Professional => snapshot.client_id,
        };
        self.notify(
            recipient,
            NotificationType::NewMessage,
            "Nova mensagem".to_string(),
            Some(text),
            Some(quote_id),
        );

        Ok(snapshot)
    }

    /// Marks every plain message written by the other party as read
    pub fn mark_messages_read(&mut self, actor: &Actor, quote_id: Uuid) -> EngineResult<Quote> {
        let idx = self.quote_index(quote_id)?;
        let quote = &mut self.quotes[idx];
        let reader = sender_for(quote, actor)?;

        for message in quote.messages.iter_mut().filter(|m| m.sender != reader) {
            if let MessageBody::Plain { is_read, .. } = &mut message.body {
                *is_read = true;
            }
        }

        Ok(quote.clone())
    }

    pub(crate) fn client_name(&self, client_id: Uuid) -> String {
        self.clients
            .get(&client_id)
            .map(|c| c.full_name.clone())
            .unwrap_or_default()
    }

    pub(crate) fn professional_name(&self, professional_id: Uuid) -> String {
        self.professionals
            .get(&professional_id)
            .map(|p| p.full_name.clone())
            .unwrap_or_default()
    }
}
