// tests/payout_tests.rs

use cardroom_engine::payout::{build_idempotency_key, PayoutBatch, PayoutItem};

fn item(partner: &str, receiver: &str, cents: u64, currency: Option<&str>) -> PayoutItem {
    PayoutItem {
        partner_id: partner.to_string(),
        receiver: receiver.to_string(),
        amount_cents: cents,
        currency: currency.map(|c| c.to_string()),
    }
}

fn sample_batch(items: Vec<PayoutItem>) -> PayoutBatch {
    PayoutBatch {
        period_start: "2023-11-01".to_string(),
        period_end: "2023-11-30".to_string(),
        currency: "USD".to_string(),
        payout_minimum_cents: 100,
        note_template: "Winnings for {period}".to_string(),
        items,
    }
}

#[test]
fn key_is_stable_under_item_permutation() {
    let a = item("p1", "alice@example.com", 500, None);
    let b = item("p2", "bob@example.com", 700, None);

    let key_ab = build_idempotency_key(&sample_batch(vec![a.clone(), b.clone()]));
    let key_ba = build_idempotency_key(&sample_batch(vec![b, a]));

    assert_eq!(key_ab, key_ba);
}

#[test]
fn one_cent_difference_changes_key() {
    let base = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));
    let bumped = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        501,
        None,
    )]));

    assert_ne!(base, bumped);
}

#[test]
fn receiver_email_is_normalized_before_hashing() {
    let plain = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));
    let noisy = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "  Alice@Example.COM ",
        500,
        None,
    )]));

    assert_eq!(plain, noisy);
}

#[test]
fn item_currency_falls_back_to_batch_currency() {
    // None и явный "usd" (любым регистром) канонизируются одинаково.
    let implicit = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));
    let explicit = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        Some("usd"),
    )]));

    assert_eq!(implicit, explicit);
}

#[test]
fn different_receiver_changes_key() {
    let a = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));
    let b = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "bob@example.com",
        500,
        None,
    )]));

    assert_ne!(a, b);
}

#[test]
fn batch_parameters_are_part_of_the_key() {
    let items = vec![item("p1", "alice@example.com", 500, None)];

    let base = build_idempotency_key(&sample_batch(items.clone()));

    let mut other_period = sample_batch(items.clone());
    other_period.period_end = "2023-12-31".to_string();
    assert_ne!(base, build_idempotency_key(&other_period));

    let mut other_minimum = sample_batch(items.clone());
    other_minimum.payout_minimum_cents = 200;
    assert_ne!(base, build_idempotency_key(&other_minimum));

    let mut other_note = sample_batch(items);
    other_note.note_template = "Other note".to_string();
    assert_ne!(base, build_idempotency_key(&other_note));
}

#[test]
fn key_has_expected_shape() {
    let key = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));

    let parts: Vec<&str> = key.split(':').collect();
    assert_eq!(parts.len(), 6);
    assert_eq!(parts[0], "payout");
    assert_eq!(parts[1], "2023-11-01");
    assert_eq!(parts[2], "2023-11-30");
    assert_eq!(parts[3], "USD");
    assert_eq!(parts[4], "100");
    // 16 hex-символов SHA-256.
    assert_eq!(parts[5].len(), 16);
    assert!(parts[5].chars().all(|c| c.is_ascii_hexdigit()));

    // Повторная сборка того же батча — байт-в-байт тот же ключ.
    let again = build_idempotency_key(&sample_batch(vec![item(
        "p1",
        "alice@example.com",
        500,
        None,
    )]));
    assert_eq!(key, again);
}

#[test]
fn empty_batch_still_produces_a_key() {
    let key = build_idempotency_key(&sample_batch(vec![]));
    assert!(key.starts_with("payout:2023-11-01:2023-11-30:USD:100:"));
}
