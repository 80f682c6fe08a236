use remesa::application::RemittanceService;
use remesa::domain::factory::NewRemittance;
use remesa::domain::ids::{RecipientId, SenderId};
use remesa::domain::person::{IdDocumentType, PayoutDetails, Person, Recipient, Sender};
use remesa::domain::remittance::{Currency, TransferMethod};
use remesa::infrastructure::in_memory::{
    InMemoryCorridorStore, InMemoryRecipientStore, InMemoryRemittanceStore, InMemorySenderStore,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn person(first: &str, last: &str) -> Person {
    Person {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "+1 555 0100".to_string(),
        country: "United States".to_string(),
        document_type: IdDocumentType::Passport,
        document_number: "PA9988776".to_string(),
    }
}

/// A service with two senders (maria: 3000, carlos: 5000) and three
/// recipients covering every payout channel.
pub async fn seeded_service() -> RemittanceService {
    let service = RemittanceService::new(
        Box::new(InMemoryRemittanceStore::new()),
        Box::new(InMemorySenderStore::new()),
        Box::new(InMemoryRecipientStore::new()),
        Box::new(InMemoryCorridorStore::new()),
    );

    service
        .register_sender(Sender::new(
            SenderId::new("maria"),
            person("Maria", "Gomez"),
            dec!(3000),
        ))
        .await
        .unwrap();
    service
        .register_sender(Sender::new(
            SenderId::new("carlos"),
            person("Carlos", "Diaz"),
            dec!(5000),
        ))
        .await
        .unwrap();

    service
        .register_recipient(Recipient::new(
            RecipientId::new("lucia"),
            person("Lucia", "Torres"),
            TransferMethod::CashPickup,
            None,
        ))
        .await
        .unwrap();
    service
        .register_recipient(Recipient::new(
            RecipientId::new("pedro"),
            person("Pedro", "Ruiz"),
            TransferMethod::BankTransfer,
            Some(PayoutDetails::BankAccount {
                account_number: "0011223344".to_string(),
                bank_name: "Bancolombia".to_string(),
                swift_bic: Some("COLOCOBM".to_string()),
            }),
        ))
        .await
        .unwrap();
    service
        .register_recipient(Recipient::new(
            RecipientId::new("sofia"),
            person("Sofia", "Mendez"),
            TransferMethod::MobileWallet,
            Some(PayoutDetails::MobileWallet {
                wallet_id: "wallet-789".to_string(),
            }),
        ))
        .await
        .unwrap();

    service
}

/// A USD -> COP transfer request at a fixed rate of 4100.
pub fn transfer(
    sender: &str,
    recipient: &str,
    amount: Decimal,
    method: TransferMethod,
) -> NewRemittance {
    NewRemittance {
        sender_id: SenderId::new(sender),
        recipient_id: RecipientId::new(recipient),
        amount_sent: amount,
        currency_sent: Currency::Usd,
        currency_received: Currency::Cop,
        exchange_rate: dec!(4100),
        method,
    }
}
