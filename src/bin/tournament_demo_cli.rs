// src/bin/tournament_demo_cli.rs

use cardroom_engine::domain::blinds::BlindSchedule;
use cardroom_engine::domain::chips::Chips;
use cardroom_engine::domain::tournament::TournamentConfig;
use cardroom_engine::infra::ids::IdGenerator;
use cardroom_engine::infra::storage::InMemoryTournamentStore;
use cardroom_engine::payout::{build_idempotency_key, PayoutBatch, PayoutItem};
use cardroom_engine::tournament::state_machine::TournamentStateMachine;

/// Прогон полного цикла: турнир на 4 игроков с правилом "топ-2 стола
/// проходят", до победителя, затем ключ батча выплат за период.
fn main() {
    env_logger::init();

    println!("=== TOURNAMENT DEMO CLI ===\n");

    let mut sm = TournamentStateMachine::new(InMemoryTournamentStore::new(), IdGenerator::new());

    let config = TournamentConfig {
        name: "Friday Night Showdown".to_string(),
        game: "holdem".to_string(),
        channel: "main-stream".to_string(),
        buy_in_cents: 10_00,
        starting_chips: Chips::new(1000),
        level_duration_secs: 300,
        total_rounds: 2,
        advance_config: vec![2, 1],
        table_size: 6,
        deck_count: 1,
        late_reg_levels: 0,
        blind_schedule: BlindSchedule::simple_demo_schedule(),
    };

    let now = 1_700_000_000u64;
    let id = sm.create_tournament(config, now).expect("valid config");
    println!("Создан турнир id={id}");

    for login in ["p1", "p2", "p3", "p4"] {
        sm.add_player(id, login).expect("registration open");
    }
    println!("Зарегистрированы 4 игрока\n");

    let events = sm.start_tournament(id, now).expect("start");
    println!("Старт: {events:?}");
    for row in sm.bracket(id, 1).expect("bracket") {
        println!("  round 1, table {}: {}", row.table_number, row.seat_login);
    }

    // Часы блайндов: через 300 секунд уровень повышается, повторный
    // вызов в тот же момент — no-op.
    let ev = sm.advance_blind_level(id, now + 300).expect("running");
    println!("\nУровень блайндов: {ev:?}");
    let ev = sm.advance_blind_level(id, now + 300).expect("running");
    println!("Повторный тик (no-op): {ev:?}");

    // Результаты первого раунда: p1 и p4 вылетают, p2 и p3 идут дальше.
    let round_end = now + 600;
    sm.record_round_result(id, 1, "p1", Chips::ZERO, Some(4), false, round_end)
        .expect("result");
    sm.record_round_result(id, 1, "p2", Chips::new(2500), None, false, round_end)
        .expect("result");
    sm.record_round_result(id, 1, "p3", Chips::new(1500), None, false, round_end)
        .expect("result");
    sm.record_round_result(id, 1, "p4", Chips::ZERO, Some(3), false, round_end)
        .expect("result");

    let outcome = sm.next_round(id, round_end).expect("next round");
    println!("\nРаунд 2: {:?}", outcome.new_round);
    for row in &outcome.assignments {
        println!("  round 2, table {}: {}", row.table_number, row.seat_login);
    }

    // Финал: p3 бюстится, p2 — чемпион.
    let final_ts = round_end + 600;
    let events = sm
        .record_round_result(id, 2, "p3", Chips::ZERO, Some(2), false, final_ts)
        .expect("result");
    println!("\nФинал: {events:?}");

    println!("\nИтоговая таблица:");
    for p in sm.standings(id).expect("standings") {
        println!(
            "  {:<4} rank={:?} chips={} eliminated={}",
            p.login, p.rank, p.chips, p.eliminated
        );
    }

    // Закрытие периода: батч выплат и его идемпотентный ключ.
    let batch = PayoutBatch {
        period_start: "2023-11-01".to_string(),
        period_end: "2023-11-30".to_string(),
        currency: "usd".to_string(),
        payout_minimum_cents: 100,
        note_template: "Cardroom winnings for {period}".to_string(),
        items: vec![
            PayoutItem {
                partner_id: "partner-1".to_string(),
                receiver: " P2@Example.com ".to_string(),
                amount_cents: 50_00,
                currency: None,
            },
            PayoutItem {
                partner_id: "partner-1".to_string(),
                receiver: "p3@example.com".to_string(),
                amount_cents: 25_00,
                currency: Some("usd".to_string()),
            },
        ],
    };

    println!("\nPayout idempotency key: {}", build_idempotency_key(&batch));
}
