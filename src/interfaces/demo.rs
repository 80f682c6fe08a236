//! Seeded console walkthrough.
//!
//! Builds a small directory and corridor catalogue, moves a handful of
//! transfers through their lifecycle and prints the resulting state. The
//! output sticks to fixed labels so the binary tests can assert on it.

use crate::application::service::{Page, RemittanceFilter, Sort, SortField, SortOrder};
use crate::application::RemittanceService;
use crate::domain::corridor::{Corridor, CorridorCode};
use crate::domain::factory::NewRemittance;
use crate::domain::ids::{RecipientId, SenderId};
use crate::domain::person::{IdDocumentType, PayoutDetails, Person, Recipient, Sender};
use crate::domain::remittance::{Currency, RemittanceStatus, TransferMethod};
use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::Path;

fn person(first: &str, last: &str, country: &str, document: &str) -> Person {
    Person {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "+1 555 0100".to_string(),
        country: country.to_string(),
        document_type: IdDocumentType::Passport,
        document_number: document.to_string(),
    }
}

async fn seed(service: &RemittanceService) -> Result<()> {
    service
        .register_sender(Sender::new(
            SenderId::new("maria"),
            person("Maria", "Gomez", "United States", "PA1234567"),
            dec!(3000),
        ))
        .await?;
    service
        .register_sender(Sender::new(
            SenderId::new("carlos"),
            person("Carlos", "Diaz", "United States", "PA7654321"),
            dec!(5000),
        ))
        .await?;

    service
        .register_recipient(Recipient::new(
            RecipientId::new("lucia"),
            person("Lucia", "Torres", "Colombia", "CC2468013"),
            TransferMethod::CashPickup,
            None,
        ))
        .await?;
    service
        .register_recipient(Recipient::new(
            RecipientId::new("pedro"),
            person("Pedro", "Ruiz", "Colombia", "CC1357924"),
            TransferMethod::BankTransfer,
            Some(PayoutDetails::BankAccount {
                account_number: "0011223344".to_string(),
                bank_name: "Bancolombia".to_string(),
                swift_bic: Some("COLOCOBM".to_string()),
            }),
        ))
        .await?;
    service
        .register_recipient(Recipient::new(
            RecipientId::new("sofia"),
            person("Sofia", "Mendez", "Mexico", "ME9081726"),
            TransferMethod::MobileWallet,
            Some(PayoutDetails::MobileWallet {
                wallet_id: "wallet-789".to_string(),
            }),
        ))
        .await?;

    service
        .register_corridor(Corridor::new(
            CorridorCode::parse("US-CO")?,
            "United States to Colombia",
            "United States",
            "Colombia",
            Currency::Usd,
            Currency::Cop,
            dec!(3.5),
        ))
        .await?;
    service
        .register_corridor(Corridor::new(
            CorridorCode::parse("US-MX")?,
            "United States to Mexico",
            "United States",
            "Mexico",
            Currency::Usd,
            Currency::Mxn,
            dec!(4.0),
        ))
        .await?;

    Ok(())
}

fn transfer(
    sender: &str,
    recipient: &str,
    amount: Decimal,
    currency_received: Currency,
    exchange_rate: Decimal,
    method: TransferMethod,
) -> NewRemittance {
    NewRemittance {
        sender_id: SenderId::new(sender),
        recipient_id: RecipientId::new(recipient),
        amount_sent: amount,
        currency_sent: Currency::Usd,
        currency_received,
        exchange_rate,
        method,
    }
}

/// Runs the walkthrough against a fresh service. With `export` set, the
/// final transfer collection is also written out as JSON.
pub async fn run(service: &RemittanceService, export: Option<&Path>) -> Result<()> {
    seed(service).await?;
    println!("Seeded 2 senders, 3 recipients, 2 corridors");

    let delivered = service
        .create(transfer(
            "maria",
            "lucia",
            dec!(500.00),
            Currency::Cop,
            dec!(4100),
            TransferMethod::CashPickup,
        ))
        .await?;
    service.complete(&delivered.id).await?;

    let wired = service
        .create(transfer(
            "maria",
            "pedro",
            dec!(200.00),
            Currency::Cop,
            dec!(4100),
            TransferMethod::BankTransfer,
        ))
        .await?;
    service.process(&wired.id).await?;
    service.complete(&wired.id).await?;

    let in_flight = service
        .create(transfer(
            "carlos",
            "sofia",
            dec!(350.00),
            Currency::Mxn,
            dec!(17.25),
            TransferMethod::MobileWallet,
        ))
        .await?;
    service.process(&in_flight.id).await?;

    let abandoned = service
        .create(transfer(
            "carlos",
            "lucia",
            dec!(1200.00),
            Currency::Cop,
            dec!(4100),
            TransferMethod::HomeDelivery,
        ))
        .await?;
    service.cancel(&abandoned.id).await?;

    service
        .create(transfer(
            "maria",
            "lucia",
            dec!(60.00),
            Currency::Cop,
            dec!(4100),
            TransferMethod::CashPickup,
        ))
        .await?;

    let everything = service
        .list(
            &RemittanceFilter::default(),
            Sort {
                field: SortField::CreatedAt,
                order: SortOrder::Asc,
            },
            Page::new(1, 100)?,
        )
        .await?;

    println!("\n== Transfers ==");
    println!(
        "{:<10} {:<17} {:<14} {:>12} {:>15} {:>8}  STATUS",
        "REFERENCE", "ROUTE", "METHOD", "SENT", "RECEIVED", "FEE"
    );
    for r in &everything.items {
        println!(
            "{:<10} {:<17} {:<14} {:>12} {:>15} {:>8}  {}",
            r.reference_code,
            format!("{} -> {}", r.sender_id, r.recipient_id),
            r.method,
            format!("{} {}", r.amount_sent, r.currency_sent),
            format!("{} {}", r.amount_received, r.currency_received),
            r.fee,
            r.status,
        );
    }

    let tracked = service.get_by_reference(&delivered.reference_code).await?;
    println!(
        "\nTracking {}: {} ({} {} to {})",
        tracked.reference_code,
        tracked.status,
        tracked.amount_received,
        tracked.currency_received,
        tracked.recipient_id,
    );

    let stats = service.stats().await?;
    println!("\n== By status ==");
    for (status, count) in &stats.by_status {
        println!("{status:<12} {count}");
    }

    println!("\n== By method ==");
    for method in TransferMethod::ALL {
        let count = service.by_method(method).await?.len();
        println!("{:<14} {count}", method.as_str());
    }

    println!("\n== Completed ==");
    for r in service.by_status(RemittanceStatus::Completed).await? {
        println!(
            "{} delivered {} {} to {}",
            r.reference_code, r.amount_received, r.currency_received, r.recipient_id
        );
    }

    println!("\n== Allowances ==");
    for id in [SenderId::new("maria"), SenderId::new("carlos")] {
        let sender = service.sender(&id).await?;
        let total = service.total_sent(&id).await?;
        let left = service.allowance(&id).await?;
        println!(
            "{id}: sent {total} of {} USD, remaining allowance: {left}",
            sender.monthly_limit
        );
    }

    println!("\n== Corridor traffic ==");
    for s in service.corridor_stats().await? {
        println!(
            "{:<6} {:<26} {:>2} transfers {:>10} sent {:>8} fees",
            s.code.as_str(),
            s.name,
            s.total_remittances,
            s.total_amount,
            s.total_fees,
        );
    }

    println!(
        "\n{} transfers, {} total fees collected",
        stats.total_remittances, stats.total_fees
    );

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&everything.items)?;
        std::fs::write(path, json)?;
        println!("Exported {} transfers to {}", everything.items.len(), path.display());
    }

    Ok(())
}
