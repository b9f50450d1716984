use crate::domain::card::{Card, Rank};

use super::hand_rank::{HandCategory, HandValue};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask, BROADWAY_MASK};

/// Оценить ровно 5 карт.
///
/// Вход другой длины не считается ошибкой: возвращаем сентинел
/// Invalid (0x). Битая рука просто ничего не платит; кому нужен
/// жёсткий отказ, проверяет `HandValue::is_invalid()`.
pub fn evaluate(cards: &[Card]) -> HandValue {
    match <&[Card; 5]>::try_from(cards) {
        Ok(five) => evaluate_five(five),
        Err(_) => HandValue::invalid(),
    }
}

/// Лучшая 5-карточная рука из 5–7 карт.
///
/// Перебираем все C(n,5) подмножеств итеративно по возрастанию битовой
/// маски (никакой рекурсии и вложенных циклов — порядок перебора
/// стабилен, что нужно для детерминизма выбора). Меньше 5 карт —
/// закрываемся сентинелом Invalid.
pub fn evaluate_best_of_seven(cards: &[Card]) -> HandValue {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return HandValue::invalid();
    }

    let mut best = HandValue::invalid();
    let mut picked = [cards[0]; 5];

    // Все маски из n бит ровно с пятью установленными, по возрастанию.
    for mask in 0u32..(1u32 << n) {
        if mask.count_ones() != 5 {
            continue;
        }

        let mut k = 0;
        for (i, card) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                picked[k] = *card;
                k += 1;
            }
        }

        let value = evaluate_five(&picked);
        // Строгое "больше": при равенстве остаётся первая найденная
        // комбинация, порядок масок это фиксирует.
        if value.cmp_key() > best.cmp_key() {
            best = value;
        }
    }

    best
}

/// Классификация строго пяти карт по категориям видеопокера.
fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = detect_straight(rank_mask);

    // Флеш-ветки проверяем первыми: они самые сильные.
    if is_flush {
        if straight.is_some() {
            let category = if rank_mask == BROADWAY_MASK {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandValue::from_category(category);
        }
    }

    // Раскладка по количеству повторов рангов.
    let mut has_four = false;
    let mut has_three = false;
    let mut pair_ranks: Vec<Rank> = Vec::new();

    for v in 2u8..=14 {
        match rank_counts[v as usize] {
            4 => has_four = true,
            3 => has_three = true,
            2 => {
                if let Some(rank) = Rank::from_value(v) {
                    pair_ranks.push(rank);
                }
            }
            _ => {}
        }
    }

    let category = if has_four {
        HandCategory::FourOfAKind
    } else if has_three && pair_ranks.len() == 1 {
        HandCategory::FullHouse
    } else if is_flush {
        HandCategory::Flush
    } else if straight.is_some() {
        HandCategory::Straight
    } else if has_three {
        HandCategory::ThreeOfAKind
    } else if pair_ranks.len() == 2 {
        HandCategory::TwoPair
    } else if pair_ranks.iter().any(|r| *r >= Rank::Jack) {
        // Видеопокерная семантика: платит только пара валетов и выше,
        // пара ниже валета — No Winner.
        HandCategory::JacksOrBetter
    } else {
        HandCategory::NoWinner
    };

    HandValue::from_category(category)
}
