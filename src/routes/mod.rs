pub mod auth;
pub mod denunciations;
pub mod health;
pub mod me;
pub mod notifications;
pub mod professionals;
pub mod quotes;
pub mod support;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login))
        .route("/denunciations/reasons", get(denunciations::list_reasons))
        // Current user
        .route("/me", get(me::get_me))
        .route("/me/offers", get(me::get_offer_flag))
        // Directory
        .route("/professionals", get(professionals::list_professionals))
        .route(
            "/professionals/me/availability",
            put(professionals::set_availability),
        )
        .route(
            "/professionals/me/payment-key",
            put(professionals::set_payment_key),
        )
        .route("/professionals/:id", get(professionals::get_professional))
        // Quotes
        .route(
            "/quotes",
            get(quotes::list_quotes).post(quotes::create_quote),
        )
        .route("/quotes/:id", get(quotes::get_quote))
        .route("/quotes/:id/offers", post(quotes::submit_offer))
        .route("/quotes/:id/accept", post(quotes::accept_offer))
        .route("/quotes/:id/reject", post(quotes::reject_offer))
        .route("/quotes/:id/schedule", post(quotes::schedule_visit))
        .route("/quotes/:id/confirm-visit", post(quotes::confirm_visit))
        .route("/quotes/:id/navigation", post(quotes::start_navigation))
        .route(
            "/quotes/:id/transit-updates",
            post(quotes::send_transit_update),
        )
        .route("/quotes/:id/complete", post(quotes::complete_service))
        .route("/quotes/:id/review", post(quotes::submit_review))
        .route(
            "/quotes/:id/payment/request",
            post(quotes::request_payment),
        )
        .route(
            "/quotes/:id/payment/instruction",
            get(quotes::payment_instruction),
        )
        .route(
            "/quotes/:id/payment/confirm",
            post(quotes::confirm_payment),
        )
        .route("/quotes/:id/messages", post(quotes::send_message))
        .route("/quotes/:id/messages/read", post(quotes::mark_messages_read))
        // Denunciations
        .route(
            "/denunciations",
            get(denunciations::list_denunciations).post(denunciations::file_denunciation),
        )
        // Support
        .route(
            "/support/tickets",
            get(support::list_tickets).post(support::open_ticket),
        )
        .route(
            "/support/tickets/:id/messages",
            post(support::reply_to_ticket),
        )
        .route(
            "/support/tickets/:id/toggle",
            post(support::toggle_ticket_status),
        )
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route("/notifications/read", put(notifications::mark_read))
}
