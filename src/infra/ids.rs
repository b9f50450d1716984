use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::TournamentId;

/// Генерация ID на монотонных счётчиках.
///
/// Генератор инжектится в машину состояний снаружи, поэтому тесты
/// могут завести свой экземпляр и получать предсказуемые id
/// (никаких глобальных счётчиков и timestamp+random строк).
#[derive(Debug)]
pub struct IdGenerator {
    tournament_counter: AtomicU64,
}

impl IdGenerator {
    /// Счётчики стартуют с 1.
    pub fn new() -> Self {
        Self {
            tournament_counter: AtomicU64::new(1),
        }
    }

    /// Начать с конкретного значения (например, после рестарта —
    /// с max(id)+1 из хранилища).
    pub fn starting_from(first: u64) -> Self {
        Self {
            tournament_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_tournament_id(&self) -> TournamentId {
        self.tournament_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
