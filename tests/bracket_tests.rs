// tests/bracket_tests.rs

use cardroom_engine::tournament::bracket::BracketScheduler;

fn logins(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn assign_is_deterministic_for_same_input() {
    let active = logins(&["a", "b", "c", "d", "e", "f", "g"]);

    let first = BracketScheduler::assign(1, 2, &active, 4);
    let second = BracketScheduler::assign(1, 2, &active, 4);

    assert_eq!(first, second);
}

#[test]
fn assign_packs_single_table_when_players_fit() {
    let active = logins(&["a", "b", "c", "d"]);
    let rows = BracketScheduler::assign(7, 1, &active, 6);

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.table_number == 1));
    assert!(rows.iter().all(|r| r.tournament_id == 7 && r.round == 1));
}

#[test]
fn assign_balances_remainder_across_tables() {
    // 11 игроков при size_hint = 4: столы 4/4/3, а не 4/4/2+1.
    let active = logins(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
    let rows = BracketScheduler::assign(1, 1, &active, 4);

    let count_at = |table: u32| rows.iter().filter(|r| r.table_number == table).count();
    assert_eq!(count_at(1), 4);
    assert_eq!(count_at(2), 4);
    assert_eq!(count_at(3), 3);
}

#[test]
fn assign_never_leaves_near_empty_last_table() {
    // 9 игроков по 4: 3/3/3 вместо 4/4/1.
    let active = logins(&["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
    let rows = BracketScheduler::assign(1, 1, &active, 4);

    let mut sizes: Vec<usize> = (1..=3)
        .map(|t| rows.iter().filter(|r| r.table_number == t).count())
        .collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3, 3]);
}

#[test]
fn assign_each_login_appears_exactly_once() {
    let active = logins(&["a", "b", "c", "d", "e"]);
    let rows = BracketScheduler::assign(1, 3, &active, 2);

    let mut seen: Vec<&str> = rows.iter().map(|r| r.seat_login.as_str()).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn assign_empty_input_yields_no_rows() {
    assert!(BracketScheduler::assign(1, 1, &[], 6).is_empty());
}

#[test]
fn assign_clamps_degenerate_size_hint() {
    // Подсказка 0/1 не имеет смысла — минимум стола 2.
    let active = logins(&["a", "b", "c", "d"]);
    let rows = BracketScheduler::assign(1, 1, &active, 0);

    let tables: Vec<u32> = rows.iter().map(|r| r.table_number).collect();
    assert_eq!(tables.iter().max(), Some(&2));
}
