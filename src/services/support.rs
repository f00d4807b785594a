//! Support tickets: open/closed threads between users and the administrator

use uuid::Uuid;

use crate::domain::{
    Actor, NotificationType, Role, SupportMessage, SupportTicket, TicketAuthor, TicketStatus,
};

use super::error::{EngineError, EngineResult};
use super::marketplace::Marketplace;

const ADMIN_NAME: &str = "Admin";

impl Marketplace {
    fn user_name(&self, actor: &Actor) -> EngineResult<String> {
        match actor.role {
            Role::Client => self.client(actor.user_id).map(|c| c.full_name.clone()),
            Role::Professional => self.professional(actor.user_id).map(|p| p.full_name.clone()),
            Role::Admin => Ok(ADMIN_NAME.to_string()),
        }
    }

    fn ticket_index(&self, ticket_id: Uuid) -> EngineResult<usize> {
        self.tickets
            .iter()
            .position(|t| t.id == ticket_id)
            .ok_or_else(|| EngineError::not_found("support ticket", ticket_id))
    }

    pub fn open_ticket(
        &mut self,
        actor: &Actor,
        subject: &str,
        message: &str,
    ) -> EngineResult<SupportTicket> {
        if actor.is_admin() {
            return Err(EngineError::forbidden("administrators answer tickets"));
        }
        let author_name = self.user_name(actor)?;
        let subject = subject.trim();
        let message = message.trim();
        if subject.is_empty() || message.is_empty() {
            return Err(EngineError::validation("subject and message are required"));
        }

        let now = self.now();
        let ticket = SupportTicket {
            id: Uuid::new_v4(),
            user_id: actor.user_id,
            subject: subject.to_string(),
            messages: vec![SupportMessage {
                author: TicketAuthor::User(actor.user_id),
                author_name,
                text: message.to_string(),
                sent_at: now,
            }],
            status: TicketStatus::Open,
            created_at: now,
        };
        self.tickets.push(ticket.clone());

        tracing::info!(ticket_id = %ticket.id, user_id = %actor.user_id, "Support ticket opened");
        Ok(ticket)
    }

    /// Replies on a ticket. Users reply on their own open tickets; an
    /// administrator reply re-opens the ticket.
    pub fn reply_to_ticket(
        &mut self,
        actor: &Actor,
        ticket_id: Uuid,
        text: &str,
    ) -> EngineResult<SupportTicket> {
        let idx = self.ticket_index(ticket_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::validation("message cannot be empty"));
        }
        let author_name = self.user_name(actor)?;
        let now = self.now();

        let ticket = &mut self.tickets[idx];
        let author = if actor.is_admin() {
            ticket.status = TicketStatus::Open;
            TicketAuthor::Admin
        } else {
            if ticket.user_id != actor.user_id {
                return Err(EngineError::forbidden("not your ticket"));
            }
            if ticket.status == TicketStatus::Closed {
                return Err(EngineError::precondition("ticket is closed"));
            }
            TicketAuthor::User(actor.user_id)
        };
        ticket.messages.push(SupportMessage {
            author,
            author_name,
            text: text.to_string(),
            sent_at: now,
        });
        let snapshot = ticket.clone();

        tracing::info!(ticket_id = %ticket_id, by_admin = actor.is_admin(), "Ticket reply");

        if actor.is_admin() {
            self.notify(
                snapshot.user_id,
                NotificationType::SupportReply,
                format!("Resposta do suporte: {}", snapshot.subject),
                Some(text.to_string()),
                None,
            );
        }

        Ok(snapshot)
    }

    /// Administrator flips a ticket between open and closed
    pub fn toggle_ticket_status(&mut self, actor: &Actor, ticket_id: Uuid) -> EngineResult<SupportTicket> {
        if !actor.is_admin() {
            return Err(EngineError::forbidden("only administrators can close tickets"));
        }
        let idx = self.ticket_index(ticket_id)?;
        let ticket = &mut self.tickets[idx];
        ticket.status = match ticket.status {
            TicketStatus::Open => TicketStatus::Closed,
            TicketStatus::Closed => TicketStatus::Open,
        };

        tracing::info!(ticket_id = %ticket_id, status = %ticket.status, "Ticket status toggled");
        Ok(ticket.clone())
    }

    pub fn tickets_for(&self, actor: &Actor) -> Vec<&SupportTicket> {
        self.tickets
            .iter()
            .filter(|t| actor.is_admin() || t.user_id == actor.user_id)
            .collect()
    }
}
