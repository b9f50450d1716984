use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::infra::rng::RandomSource;

/// "Шуз" — одна или несколько колод, из которых стол сдаёт карты.
/// Сам по себе это просто упорядоченный список; перемешивание
/// делается снаружи через RandomSource (детерминируемо в тестах).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Собрать шуз из `deck_count` стандартных 52-карточных колод
    /// (deck_count берётся из конфига турнира, минимум одна).
    pub fn new(deck_count: u32) -> Self {
        let decks = deck_count.max(1) as usize;
        let mut cards = Vec::with_capacity(decks * 52);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Перемешать шуз указанным источником случайности.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Сдать одну карту сверху.
    pub fn deal_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Сдать n карт сверху. Если карт меньше — вернёт сколько есть.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        let mut dealt = Vec::with_capacity(n);
        for _ in 0..n {
            match self.cards.pop() {
                Some(card) => dealt.push(card),
                None => break,
            }
        }
        dealt
    }
}
