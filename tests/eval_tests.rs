// tests/eval_tests.rs

use cardroom_engine::domain::card::Card;
use cardroom_engine::domain::deck::Shoe;
use cardroom_engine::eval::{evaluate, evaluate_best_of_seven, HandCategory};
use cardroom_engine::infra::rng::DeterministicRng;

/// Утилита: карта из строки вида "Ah".
fn card(s: &str) -> Card {
    s.parse().unwrap()
}

/// Утилита: рука из строк.
fn hand(cards: &[&str]) -> Vec<Card> {
    cards.iter().map(|s| card(s)).collect()
}

//
// Категории 5-карточных рук
//

#[test]
fn royal_flush_is_top_category() {
    let v = evaluate(&hand(&["Th", "Jh", "Qh", "Kh", "Ah"]));
    assert_eq!(v.category, HandCategory::RoyalFlush);
    assert_eq!(v.category_rank(), 10);
    assert_eq!(v.payout_multiplier, 250);
}

#[test]
fn straight_flush_is_not_royal() {
    // 9-K одномастные — стрит-флеш (50x), никогда не роял.
    let v = evaluate(&hand(&["9s", "Ts", "Js", "Qs", "Ks"]));
    assert_eq!(v.category, HandCategory::StraightFlush);
    assert_eq!(v.payout_multiplier, 50);
}

#[test]
fn wheel_straight_counts_ace_low() {
    // A2345 разномастные — стрит (ранг категории 5), не мусор.
    let v = evaluate(&hand(&["Ah", "2c", "3d", "4s", "5h"]));
    assert_eq!(v.category, HandCategory::Straight);
    assert_eq!(v.category_rank(), 5);
    assert_eq!(v.payout_multiplier, 4);
}

#[test]
fn four_of_a_kind() {
    let v = evaluate(&hand(&["7h", "7c", "7d", "7s", "2h"]));
    assert_eq!(v.category, HandCategory::FourOfAKind);
    assert_eq!(v.payout_multiplier, 25);
}

#[test]
fn full_house() {
    let v = evaluate(&hand(&["7h", "7c", "7d", "Ks", "Kh"]));
    assert_eq!(v.category, HandCategory::FullHouse);
    assert_eq!(v.payout_multiplier, 9);
}

#[test]
fn flush_without_straight() {
    let v = evaluate(&hand(&["2h", "5h", "9h", "Jh", "Kh"]));
    assert_eq!(v.category, HandCategory::Flush);
    assert_eq!(v.payout_multiplier, 6);
}

#[test]
fn three_of_a_kind() {
    let v = evaluate(&hand(&["7h", "7c", "7d", "Ks", "2h"]));
    assert_eq!(v.category, HandCategory::ThreeOfAKind);
    assert_eq!(v.payout_multiplier, 3);
}

#[test]
fn two_pair() {
    let v = evaluate(&hand(&["7h", "7c", "Kd", "Ks", "2h"]));
    assert_eq!(v.category, HandCategory::TwoPair);
    assert_eq!(v.payout_multiplier, 2);
}

#[test]
fn pair_of_jacks_pays_one() {
    let v = evaluate(&hand(&["Jh", "Jc", "Kd", "4s", "2h"]));
    assert_eq!(v.category, HandCategory::JacksOrBetter);
    assert_eq!(v.payout_multiplier, 1);
}

#[test]
fn pair_below_jacks_is_no_winner() {
    // Видеопокер: пара десяток не оплачивается.
    let v = evaluate(&hand(&["Th", "Tc", "Kd", "4s", "2h"]));
    assert_eq!(v.category, HandCategory::NoWinner);
    assert_eq!(v.payout_multiplier, 0);
}

#[test]
fn high_card_is_no_winner() {
    let v = evaluate(&hand(&["2h", "5c", "9d", "Js", "Kh"]));
    assert_eq!(v.category, HandCategory::NoWinner);
}

//
// Сентинел на битом входе
//

#[test]
fn wrong_length_returns_invalid_sentinel() {
    assert!(evaluate(&hand(&["Ah", "Kh"])).is_invalid());
    assert!(evaluate(&hand(&["Ah", "Kh", "Qh", "Jh", "Th", "9h"])).is_invalid());
    assert!(evaluate(&[]).is_invalid());
    assert_eq!(evaluate(&[]).payout_multiplier, 0);
}

#[test]
fn best_of_seven_fails_closed_below_five_cards() {
    assert!(evaluate_best_of_seven(&hand(&["Ah", "Kh", "Qh", "Jh"])).is_invalid());
    assert!(evaluate_best_of_seven(&[]).is_invalid());
}

//
// Тотальность и монотонность таблицы выплат
//

#[test]
fn payout_is_monotone_in_category_rank() {
    let categories = [
        HandCategory::Invalid,
        HandCategory::NoWinner,
        HandCategory::JacksOrBetter,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    for pair in categories.windows(2) {
        assert!(pair[0].rank() < pair[1].rank());
        assert!(pair[0].payout_multiplier() <= pair[1].payout_multiplier());
    }
}

#[test]
fn every_five_card_hand_gets_a_real_category() {
    // Полный проход по колоде окном в 5 карт: каждая рука получает
    // невалидную категорию только на битом входе, здесь — никогда.
    let mut shoe = Shoe::new(1);
    let mut rng = DeterministicRng::from_seed(7);
    shoe.shuffle(&mut rng);

    while shoe.len() >= 5 {
        let cards = shoe.deal(5);
        let v = evaluate(&cards);
        assert!(!v.is_invalid());
        assert!(v.category_rank() >= 1 && v.category_rank() <= 10);
    }
}

//
// Best-of-seven против лобового перебора
//

#[test]
fn best_of_seven_matches_brute_force_on_random_hands() {
    // Независимый перебор: пять вложенных циклов по индексам,
    // нарочно не тем же способом, что в движке.
    fn brute_force(cards: &[Card]) -> (u8, u32) {
        let n = cards.len();
        let mut best = (0u8, 0u32);
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        for e in (d + 1)..n {
                            let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            let v = evaluate(&five);
                            let key = (v.category_rank(), v.payout_multiplier);
                            if key > best {
                                best = key;
                            }
                        }
                    }
                }
            }
        }
        best
    }

    for seed in 0..200u64 {
        let mut shoe = Shoe::new(1);
        let mut rng = DeterministicRng::from_seed(seed);
        shoe.shuffle(&mut rng);

        let seven = shoe.deal(7);
        let best = evaluate_best_of_seven(&seven);
        assert_eq!(
            (best.category_rank(), best.payout_multiplier),
            brute_force(&seven),
            "divergence on seed {seed}: {seven:?}"
        );
    }
}

#[test]
fn best_of_seven_on_exactly_five_equals_evaluate() {
    let five = hand(&["9s", "Ts", "Js", "Qs", "Ks"]);
    assert_eq!(evaluate_best_of_seven(&five), evaluate(&five));
}

#[test]
fn best_of_seven_finds_royal_among_seven() {
    let seven = hand(&["Th", "Jh", "2c", "Qh", "7d", "Kh", "Ah"]);
    let v = evaluate_best_of_seven(&seven);
    assert_eq!(v.category, HandCategory::RoyalFlush);
}
