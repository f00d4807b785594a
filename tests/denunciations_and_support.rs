mod common;

use common::*;
use homeservices_backend::domain::{
    Actor, DenunciationReason, NotificationType, TicketAuthor, TicketStatus,
};
use homeservices_backend::services::EngineError;
use uuid::Uuid;

#[test]
fn test_denunciation_requires_prior_quote() {
    let mut t = TestMarket::new();
    let professional_id = t.professional.user_id;

    assert!(matches!(
        t.market.file_denunciation(
            &t.client,
            professional_id,
            DenunciationReason::NoShow,
            "Não apareceu"
        ),
        Err(EngineError::PreconditionFailed(_))
    ));

    t.create_quote("leak");
    let first = t
        .market
        .file_denunciation(&t.client, professional_id, DenunciationReason::NoShow, "Não apareceu")
        .unwrap();
    let second = t
        .market
        .file_denunciation(
            &t.client,
            professional_id,
            DenunciationReason::Other,
            "Cobrou a mais",
        )
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(t.market.denunciations_for(&t.client).len(), 2);
}

#[test]
fn test_denunciation_validation() {
    let mut t = TestMarket::new();
    t.create_quote("leak");
    let professional_id = t.professional.user_id;

    assert!(matches!(
        t.market.file_denunciation(&t.client, professional_id, DenunciationReason::Other, "  "),
        Err(EngineError::Validation(_))
    ));
    assert!(matches!(
        t.market.file_denunciation(&t.client, Uuid::new_v4(), DenunciationReason::Other, "x"),
        Err(EngineError::NotFound { .. })
    ));
    assert!(matches!(
        t.market.file_denunciation(
            &t.professional,
            professional_id,
            DenunciationReason::Other,
            "x"
        ),
        Err(EngineError::Forbidden(_))
    ));
}

#[test]
fn test_admin_sees_all_denunciations() {
    let mut t = TestMarket::new();
    t.create_quote("leak");
    t.market
        .file_denunciation(
            &t.client,
            t.professional.user_id,
            DenunciationReason::BillingDispute,
            "Valor diferente do combinado",
        )
        .unwrap();

    let other = t.add_client("Ana Silva", "ana@teste.com");
    assert!(t.market.denunciations_for(&other).is_empty());
    assert_eq!(t.market.denunciations_for(&Actor::admin(Uuid::new_v4())).len(), 1);
}

#[test]
fn test_support_ticket_thread() {
    let mut t = TestMarket::new();
    let admin = Actor::admin(Uuid::new_v4());

    let ticket = t
        .market
        .open_ticket(&t.client, "Pagamento", "Não consigo pagar")
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Open);

    let ticket = t
        .market
        .reply_to_ticket(&admin, ticket.id, "Vamos verificar")
        .unwrap();
    assert_eq!(ticket.messages.len(), 2);
    assert_eq!(ticket.messages[1].author, TicketAuthor::Admin);

    let ticket = t.market.toggle_ticket_status(&admin, ticket.id).unwrap();
    assert_eq!(ticket.status, TicketStatus::Closed);

    assert!(matches!(
        t.market.reply_to_ticket(&t.client, ticket.id, "Ainda não resolveu"),
        Err(EngineError::PreconditionFailed(_))
    ));

    // An admin reply re-opens the thread
    let ticket = t.market.reply_to_ticket(&admin, ticket.id, "Pode tentar de novo?").unwrap();
    assert_eq!(ticket.status, TicketStatus::Open);
    t.market
        .reply_to_ticket(&t.client, ticket.id, "Funcionou, obrigado")
        .unwrap();
}

#[test]
fn test_support_access_rules() {
    let mut t = TestMarket::new();
    let admin = Actor::admin(Uuid::new_v4());
    let ticket = t
        .market
        .open_ticket(&t.professional, "Cadastro", "Atualizar profissão")
        .unwrap();

    assert!(matches!(
        t.market.reply_to_ticket(&t.client, ticket.id, "intromissão"),
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        t.market.toggle_ticket_status(&t.professional, ticket.id),
        Err(EngineError::Forbidden(_))
    ));
    assert!(matches!(
        t.market.open_ticket(&admin, "x", "y"),
        Err(EngineError::Forbidden(_))
    ));
    assert!(t.market.tickets_for(&t.client).is_empty());
    assert_eq!(t.market.tickets_for(&admin).len(), 1);
}

#[test]
fn test_notifications_follow_the_lifecycle() {
    let mut t = TestMarket::new();
    let id = t.answered_quote();

    let pro_inbox = t.market.notifications_for(t.professional.user_id, false);
    assert_eq!(pro_inbox.len(), 1);
    assert_eq!(pro_inbox[0].notification_type, NotificationType::QuoteReceived);
    assert_eq!(pro_inbox[0].quote_id, Some(id));

    let client_inbox = t.market.notifications_for(t.client.user_id, false);
    assert_eq!(client_inbox[0].notification_type, NotificationType::OfferReceived);

    t.market.accept_offer(&t.client, id).unwrap();
    let newest = t.market.notifications_for(t.professional.user_id, false)[0].notification_type;
    assert_eq!(newest, NotificationType::OfferAccepted);
}

#[test]
fn test_failed_operation_sends_no_notification() {
    let mut t = TestMarket::new();
    let id = t.answered_quote();
    let before = t.market.unread_count(t.professional.user_id);

    assert!(t.market.complete_service(&t.professional, id).is_err());
    assert_eq!(t.market.unread_count(t.professional.user_id), before);
}

#[test]
fn test_mark_notifications_read() {
    let mut t = TestMarket::new();
    t.create_quote("leak");
    t.create_quote("tomada");
    let user = t.professional.user_id;
    assert_eq!(t.market.unread_count(user), 2);

    let first = t.market.notifications_for(user, false)[0].id;
    assert_eq!(t.market.mark_notifications_read(user, Some(&[first][..])), 1);
    assert_eq!(t.market.unread_count(user), 1);
    assert_eq!(t.market.notifications_for(user, true).len(), 1);

    assert_eq!(t.market.mark_notifications_read(user, None), 1);
    assert_eq!(t.market.unread_count(user), 0);
}

#[test]
fn test_directory_listing_and_availability() {
    use homeservices_backend::domain::ProfessionalQuery;

    let mut t = TestMarket::new();
    assert!(matches!(
        t.market
            .register_professional(new_professional("Duplicado", "ROBERTO@teste.com", None)),
        Err(EngineError::Validation(_))
    ));

    t.market.set_availability(&t.professional, false).unwrap();
    let available = t.market.list_professionals(&ProfessionalQuery {
        profession: None,
        available: Some(true),
    });
    assert!(available.is_empty());

    assert!(matches!(
        t.market.set_availability(&t.client, true),
        Err(EngineError::Forbidden(_))
    ));
}
