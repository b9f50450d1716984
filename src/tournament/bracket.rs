use serde::{Deserialize, Serialize};

use crate::domain::{Login, Round, TableNumber, TournamentId};

/// Одна строка брекета: игрок за конкретным столом раунда.
/// Ключ (tournament_id, round, table_number, seat_login) уникален;
/// логин попадает в раунд только если был активен на его входе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BracketAssignment {
    pub tournament_id: TournamentId,
    pub round: Round,
    pub table_number: TableNumber,
    pub seat_login: Login,
}

/// Генератор брекетов. Чистая функция: хранилище не трогает,
/// результат полностью определяется входным порядком игроков.
pub struct BracketScheduler;

impl BracketScheduler {
    /// Разложить активных игроков по столам раунда.
    ///
    /// `active` приходит уже в посадочном порядке (по прежнему месту,
    /// затем по логину) — поэтому два вызова с одним и тем же составом
    /// дают байт-в-байт одинаковый layout.
    ///
    /// Остаток размазывается по столам: размеры столов отличаются
    /// максимум на один, полупустого последнего стола не бывает.
    /// Пример: 11 игроков при size_hint = 4 → столы 4/4/3.
    pub fn assign(
        tournament_id: TournamentId,
        round: Round,
        active: &[Login],
        table_size_hint: u32,
    ) -> Vec<BracketAssignment> {
        if active.is_empty() {
            return Vec::new();
        }

        let size = table_size_hint.max(2) as usize;
        let table_count = active.len().div_ceil(size);
        let base = active.len() / table_count;
        let extra = active.len() % table_count;

        let mut rows = Vec::with_capacity(active.len());
        let mut cursor = 0usize;

        for table_idx in 0..table_count {
            // Первые `extra` столов получают на одного игрока больше.
            let table_len = if table_idx < extra { base + 1 } else { base };
            let table_number = (table_idx + 1) as TableNumber;

            for login in &active[cursor..cursor + table_len] {
                rows.push(BracketAssignment {
                    tournament_id,
                    round,
                    table_number,
                    seat_login: login.clone(),
                });
            }
            cursor += table_len;
        }

        rows
    }
}
