mod common;

use common::{seeded_service, transfer};
use remesa::domain::ids::{IdGenerator, RandomIdGenerator};
use remesa::domain::remittance::TransferMethod;
use rust_decimal_macros::dec;
use std::collections::HashSet;

// The code space holds 36^8 values, so ten thousand draws colliding
// would point at a broken generator rather than bad luck.
#[test]
fn test_ten_thousand_draws_without_collision() {
    let generator = RandomIdGenerator;
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let code = generator.reference_code();
        assert!(seen.insert(code), "generator repeated a code");
    }
}

#[tokio::test]
async fn test_every_stored_transfer_keeps_a_distinct_code_and_id() {
    let service = seeded_service().await;
    let mut codes = HashSet::new();
    let mut ids = HashSet::new();

    for _ in 0..1_000 {
        let created = service
            .create(transfer("carlos", "lucia", dec!(1), TransferMethod::CashPickup))
            .await
            .unwrap();
        codes.insert(created.reference_code);
        ids.insert(created.id);
    }

    assert_eq!(codes.len(), 1_000);
    assert_eq!(ids.len(), 1_000);
    assert_eq!(service.stats().await.unwrap().total_remittances, 1_000);
}
