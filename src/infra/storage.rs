use std::collections::BTreeMap;

use crate::domain::tournament::{RoundResult, Tournament};
use crate::domain::{Login, Round, TournamentId};
use crate::tournament::bracket::BracketAssignment;

/// Абстракция хранилища турниров.
///
/// В проде за этим трейтом живёт реляционная БД (одна запись =
/// одна durable-транзакция); для тестов и локального запуска —
/// in-memory реализация ниже. Машина состояний пишет сюда после
/// каждой операции, поэтому "наполовину применённого" брекета
/// в хранилище не бывает.
pub trait TournamentStore {
    /// Загрузить турнир (вместе с игроками).
    fn load_tournament(&self, id: TournamentId) -> Option<Tournament>;

    /// Сохранить турнир целиком.
    fn save_tournament(&mut self, tournament: &Tournament);

    /// Строки брекета раунда, в порядке (стол, место).
    fn bracket_rows(&self, id: TournamentId, round: Round) -> Vec<BracketAssignment>;

    /// Записать строки брекета. Перед перегенерацией того же раунда
    /// обязателен clear_bracket — кортежи не переиспользуются.
    fn save_bracket(&mut self, rows: &[BracketAssignment]);

    /// Удалить строки брекета одного раунда (прошлые раунды не трогаем).
    fn clear_bracket(&mut self, id: TournamentId, round: Round);

    /// Upsert результата раунда по ключу (tournament_id, round, login):
    /// пересчёт перезаписывает, а не накапливает.
    fn upsert_round_result(&mut self, result: &RoundResult);

    /// Результаты одного раунда, отсортированные по логину.
    fn round_results(&self, id: TournamentId, round: Round) -> Vec<RoundResult>;
}

/// In-memory реализация на BTreeMap: итерация детерминирована,
/// что важно для воспроизводимости брекетов в тестах.
#[derive(Debug, Default)]
pub struct InMemoryTournamentStore {
    tournaments: BTreeMap<TournamentId, Tournament>,
    brackets: BTreeMap<(TournamentId, Round), Vec<BracketAssignment>>,
    round_results: BTreeMap<(TournamentId, Round, Login), RoundResult>,
}

impl InMemoryTournamentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStore for InMemoryTournamentStore {
    fn load_tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.tournaments.get(&id).cloned()
    }

    fn save_tournament(&mut self, tournament: &Tournament) {
        self.tournaments.insert(tournament.id, tournament.clone());
    }

    fn bracket_rows(&self, id: TournamentId, round: Round) -> Vec<BracketAssignment> {
        self.brackets
            .get(&(id, round))
            .cloned()
            .unwrap_or_default()
    }

    fn save_bracket(&mut self, rows: &[BracketAssignment]) {
        for row in rows {
            self.brackets
                .entry((row.tournament_id, row.round))
                .or_default()
                .push(row.clone());
        }
    }

    fn clear_bracket(&mut self, id: TournamentId, round: Round) {
        self.brackets.remove(&(id, round));
    }

    fn upsert_round_result(&mut self, result: &RoundResult) {
        self.round_results.insert(
            (result.tournament_id, result.round, result.login.clone()),
            result.clone(),
        );
    }

    fn round_results(&self, id: TournamentId, round: Round) -> Vec<RoundResult> {
        self.round_results
            .range((id, round, Login::new())..)
            .take_while(|((t, r, _), _)| *t == id && *r == round)
            .map(|(_, v)| v.clone())
            .collect()
    }
}
