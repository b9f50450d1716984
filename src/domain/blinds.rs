use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Один уровень блайндов турнира.
/// Пример: SB = 100, BB = 200, ante = 25.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Анте с каждого игрока (0, если нет).
    pub ante: Chips,
}

impl BlindLevel {
    pub fn new(small_blind: Chips, big_blind: Chips, ante: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            ante,
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), String> {
        if self.big_blind.is_zero() {
            return Err(format!("BlindLevel {index}: big_blind = 0"));
        }
        if self.big_blind < self.small_blind {
            return Err(format!(
                "BlindLevel {index}: big_blind ({}) < small_blind ({})",
                self.big_blind, self.small_blind
            ));
        }
        Ok(())
    }
}

/// Расписание блайндов: упорядоченный список уровней.
/// `current_level` турнира — всегда валидный индекс в этот список.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindSchedule {
    pub levels: Vec<BlindLevel>,
}

impl BlindSchedule {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self { levels }
    }

    /// Валидация: непустой список, каждый уровень корректен,
    /// big_blind строго не убывает от уровня к уровню.
    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("BlindSchedule: empty levels".into());
        }

        let mut prev_bb = Chips::ZERO;
        for (index, level) in self.levels.iter().enumerate() {
            level.validate(index)?;
            if level.big_blind < prev_bb {
                return Err(format!(
                    "BlindSchedule: big_blind decreases at level {index} ({} -> {})",
                    prev_bb, level.big_blind
                ));
            }
            prev_bb = level.big_blind;
        }

        Ok(())
    }

    /// Уровень по индексу (0-based).
    pub fn level(&self, index: u32) -> Option<&BlindLevel> {
        self.levels.get(index as usize)
    }

    /// Индекс последнего уровня.
    pub fn last_index(&self) -> u32 {
        (self.levels.len() as u32).saturating_sub(1)
    }

    /// Небольшое демо-расписание для CLI и тестов.
    pub fn simple_demo_schedule() -> Self {
        BlindSchedule::new(vec![
            BlindLevel::new(Chips::new(25), Chips::new(50), Chips::ZERO),
            BlindLevel::new(Chips::new(50), Chips::new(100), Chips::ZERO),
            BlindLevel::new(Chips::new(100), Chips::new(200), Chips::new(25)),
        ])
    }
}
