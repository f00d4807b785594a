//! Demo data loaded at startup when `SEED_DEMO_DATA` is on.
//!
//! Everything goes through the public operations so seeded quotes carry the
//! same history (messages, notifications) as real ones.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Actor, NewClient, NewProfessional, OfferPayload, PricedOfferInput, Profession, Review,
};
use crate::services::Marketplace;

fn review(client_name: &str, rating: u8, comment: &str, (y, m, d): (i32, u32, u32)) -> Result<Review> {
    let date: DateTime<Utc> = Utc
        .with_ymd_and_hms(y, m, d, 12, 0, 0)
        .single()
        .context("invalid seed review date")?;
    Ok(Review {
        quote_id: None,
        client_name: client_name.to_string(),
        rating,
        comment: comment.to_string(),
        date,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn seed_demo_data(market: &mut Marketplace) -> Result<()> {
    let test_client = market.register_client(NewClient {
        full_name: "Cliente de Teste".to_string(),
        email: "cliente@teste.com".to_string(),
        phone: "11999999999".to_string(),
        address: "Rua do Teste, 10, São Paulo, SP".to_string(),
    })?;
    let ana = market.register_client(NewClient {
        full_name: "Ana Silva".to_string(),
        email: "ana.silva@email.com".to_string(),
        phone: "11987654321".to_string(),
        address: "Rua das Flores, 123, São Paulo, SP".to_string(),
    })?;

    market.register_professional_with_reviews(
        NewProfessional {
            full_name: "Profissional de Teste".to_string(),
            email: "profissional@teste.com".to_string(),
            phone: "11988888888".to_string(),
            address: "Avenida do Teste, 20, São Paulo, SP".to_string(),
            profession: Profession::Electrician,
            experience: "5 anos de experiência em testes de software e hardware elétrico."
                .to_string(),
            services: strings(&["Testes de software", "Testes de hardware", "Automação de testes"]),
            pix_key: Some("profissional@teste.com".to_string()),
        },
        vec![review("Empresa de QA", 5, "Excelente profissional de testes!", (2023, 11, 15))?],
    )?;
    let carlos = market.register_professional_with_reviews(
        NewProfessional {
            full_name: "Carlos Pereira".to_string(),
            email: "carlos.pereira@email.com".to_string(),
            phone: "11912345678".to_string(),
            address: "Avenida Paulista, 500, São Paulo, SP".to_string(),
            profession: Profession::Electrician,
            experience: "10 anos de experiência com instalações residenciais e comerciais."
                .to_string(),
            services: strings(&[
                "Instalações residenciais",
                "Instalações comerciais",
                "Reparo de disjuntor",
                "Instalação de ventilador de teto",
            ]),
            pix_key: None,
        },
        vec![
            review("Mariana Costa", 5, "Instalação rápida e perfeita. Recomendo!", (2023, 10, 15))?,
            review("João Oliveira", 4, "Bom serviço, mas atrasou um pouco.", (2023, 9, 1))?,
        ],
    )?;
    market.register_professional_with_reviews(
        NewProfessional {
            full_name: "Juliana Martins".to_string(),
            email: "juliana.martins@email.com".to_string(),
            phone: "21988887777".to_string(),
            address: "Rua de Copacabana, 200, Rio de Janeiro, RJ".to_string(),
            profession: Profession::Gardener,
            experience: "Especialista em paisagismo e manutenção de jardins tropicais.".to_string(),
            services: strings(&["Paisagismo", "Manutenção de jardins", "Poda de árvores"]),
            pix_key: Some("juliana.martins@email.com".to_string()),
        },
        vec![review(
            "Pedro Almeida",
            5,
            "Deixou meu jardim impecável, muito caprichosa.",
            (2023, 11, 1),
        )?],
    )?;
    let roberto = market.register_professional_with_reviews(
        NewProfessional {
            full_name: "Roberto Souza".to_string(),
            email: "roberto.souza@email.com".to_string(),
            phone: "31977776666".to_string(),
            address: "Avenida Afonso Pena, 1500, Belo Horizonte, MG".to_string(),
            profession: Profession::Plumber,
            experience: "Soluções rápidas para vazamentos e desentupimentos.".to_string(),
            services: strings(&[
                "Reparo de vazamento",
                "Desentupimento de canos",
                "Instalação de pias e torneiras",
            ]),
            pix_key: Some("31977776666".to_string()),
        },
        vec![review(
            "Fernanda Lima",
            4,
            "Resolveu o vazamento, mas o atendimento poderia ser mais cordial.",
            (2023, 9, 20),
        )?],
    )?;
    market.register_professional_with_reviews(
        NewProfessional {
            full_name: "Fernanda Lima".to_string(),
            email: "fernanda.lima@email.com".to_string(),
            phone: "41966665555".to_string(),
            address: "Rua XV de Novembro, 300, Curitiba, PR".to_string(),
            profession: Profession::Housekeeper,
            experience: "Organização e limpeza residencial com atenção aos detalhes.".to_string(),
            services: strings(&["Limpeza pós-obra", "Limpeza residencial", "Passar roupas"]),
            pix_key: None,
        },
        vec![review(
            "Lucas Ferreira",
            5,
            "Limpeza impecável, superou minhas expectativas.",
            (2023, 10, 25),
        )?],
    )?;

    let ana_actor = Actor::client(ana.id);
    let roberto_actor = Actor::professional(roberto.id);

    // Open request waiting on Carlos
    market.create_quote(
        &ana_actor,
        carlos.id,
        "Olá, preciso instalar 3 ventiladores de teto. Poderia me passar um orçamento?",
    )?;

    // Finished and paid job for the test client
    let today = market.now().date_naive();
    let done = complete_job(
        market,
        Actor::client(test_client.id),
        roberto_actor,
        "Meu cano da cozinha estourou, preciso de ajuda urgente!",
        "Reparo de emergência em cano estourado.",
        Decimal::from(250),
        today,
    )?;
    market.request_payment(&roberto_actor, done)?;
    market.confirm_payment(&Actor::client(test_client.id), done)?;

    // Finished job Ana has yet to rate
    complete_job(
        market,
        ana_actor,
        roberto_actor,
        "Desentupir pia do banheiro.",
        "Serviço de desentupimento de pia de banheiro.",
        Decimal::from(150),
        today,
    )?;

    // Roberto is off for now
    market.set_availability(&roberto_actor, false)?;

    tracing::info!(
        quotes = market.quote_count(),
        "Demo data seeded"
    );
    Ok(())
}

/// Drives a quote from request to completion and returns its id
fn complete_job(
    market: &mut Marketplace,
    client: Actor,
    professional: Actor,
    request: &str,
    description: &str,
    labor_cost: Decimal,
    date: NaiveDate,
) -> Result<uuid::Uuid> {
    let quote = market.create_quote(&client, professional.user_id, request)?;
    market.submit_offer(
        &professional,
        quote.id,
        &OfferPayload::Priced(PricedOfferInput {
            description: description.to_string(),
            labor_cost,
            materials: Vec::new(),
            charge_visit_fee: false,
            visit_fee: None,
            visit_date: date,
        }),
    )?;
    market.accept_offer(&client, quote.id)?;
    let nine = NaiveTime::from_hms_opt(9, 0, 0).context("invalid seed visit time")?;
    market.schedule_visit(&client, quote.id, date, nine)?;
    market.start_navigation(&professional, quote.id)?;
    market.complete_service(&professional, quote.id)?;
    Ok(quote.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuoteStatus;
    use crate::services::{MarketplaceConfig, SystemClock};
    use std::sync::Arc;

    #[test]
    fn test_seed_populates_directory_and_quotes() {
        let mut market = Marketplace::new(MarketplaceConfig::default(), Arc::new(SystemClock));
        seed_demo_data(&mut market).unwrap();

        assert!(market.find_by_email("cliente@teste.com").is_some());
        assert!(market.find_by_email("profissional@teste.com").is_some());
        assert_eq!(market.quote_count(), 3);

        let completed = market
            .quotes
            .iter()
            .filter(|q| q.status == QuoteStatus::Completed)
            .count();
        assert_eq!(completed, 2);
    }
}
