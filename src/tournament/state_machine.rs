use std::collections::BTreeMap;

use log::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::tournament::{
    RoundResult, Tournament, TournamentConfig, TournamentError, TournamentPlayer,
    TournamentState,
};
use crate::domain::{Login, Round, TableNumber, TournamentId};
use crate::infra::ids::IdGenerator;
use crate::infra::storage::TournamentStore;

use super::bracket::{BracketAssignment, BracketScheduler};
use super::events::TournamentEvent;

/// Итог перехода раунда.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextRoundOutcome {
    /// Номер нового раунда (None, если турнир завершился).
    pub new_round: Option<Round>,
    /// Брекет нового раунда (пустой, если турнир завершился).
    pub assignments: Vec<BracketAssignment>,
    /// Кого срезало правило прохода, с выданными местами.
    pub eliminated: Vec<(Login, u32)>,
    /// Победитель, если активным остался один игрок.
    pub winner: Option<Login>,
    /// События для внешних слоёв.
    pub events: Vec<TournamentEvent>,
}

/// Машина состояний турнира.
///
/// Единственный владелец мутаций Tournament / брекетов / результатов
/// для своих турниров. Все мутирующие операции берут &mut self, так что
/// внутри одного экземпляра конкурентных переходов не бывает; если
/// машину делят несколько потоков, хост оборачивает её в свой мьютекс.
/// Каждая операция — одна запись в хранилище: либо применилась целиком,
/// либо состояние не тронуто.
pub struct TournamentStateMachine<S: TournamentStore> {
    store: S,
    ids: IdGenerator,
}

impl<S: TournamentStore> TournamentStateMachine<S> {
    pub fn new(store: S, ids: IdGenerator) -> Self {
        Self { store, ids }
    }

    /// Доступ к хранилищу (для чтения из хоста/тестов).
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store
            .load_tournament(id)
            .ok_or(TournamentError::TournamentNotFound { tournament_id: id })
    }

    fn load_running(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let tournament = self.load(id)?;
        if tournament.state != TournamentState::Running {
            return Err(TournamentError::TournamentNotRunning {
                tournament_id: id,
                state: tournament.state,
            });
        }
        Ok(tournament)
    }

    /// Создать турнир в pending. Невалидный конфиг не персистится.
    pub fn create_tournament(
        &mut self,
        config: TournamentConfig,
        now_ts: u64,
    ) -> Result<TournamentId, TournamentError> {
        let id = self.ids.next_tournament_id();
        let tournament = Tournament::new(id, config, now_ts)?;

        info!(
            "tournament {} created: '{}' ({} levels, {} rounds)",
            id,
            tournament.config.name,
            tournament.config.blind_schedule.levels.len(),
            tournament.config.total_rounds
        );

        self.store.save_tournament(&tournament);
        Ok(id)
    }

    /// Зарегистрировать игрока (pending или окно поздней регистрации).
    pub fn add_player(&mut self, id: TournamentId, login: &str) -> Result<(), TournamentError> {
        let mut tournament = self.load(id)?;
        tournament.register_player(login)?;

        debug!("tournament {}: player {} registered", id, login);
        self.store.save_tournament(&tournament);
        Ok(())
    }

    /// Запустить турнир: pending → running, брекет первого раунда,
    /// дедлайн первого уровня блайндов.
    pub fn start_tournament(
        &mut self,
        id: TournamentId,
        now_ts: u64,
    ) -> Result<Vec<TournamentEvent>, TournamentError> {
        let mut tournament = self.load(id)?;
        tournament.start(now_ts)?;

        let active = tournament.active_logins_in_seating_order();
        let rows =
            BracketScheduler::assign(id, 1, &active, tournament.config.table_size);
        apply_bracket_seats(&mut tournament, &rows);

        let tables = table_count(&rows);
        info!(
            "tournament {} started: {} players, {} tables",
            id,
            active.len(),
            tables
        );

        self.store.clear_bracket(id, 1);
        self.store.save_bracket(&rows);
        self.store.save_tournament(&tournament);

        Ok(vec![TournamentEvent::Started {
            tournament_id: id,
            round: 1,
            tables,
        }])
    }

    /// Идемпотентное повышение уровня блайндов. Безопасно дёргать
    /// хоть поллером, хоть таймером — лишний вызов просто no-op.
    pub fn advance_blind_level(
        &mut self,
        id: TournamentId,
        now_ts: u64,
    ) -> Result<Option<TournamentEvent>, TournamentError> {
        let mut tournament = self.load(id)?;

        let Some((from, to)) = tournament.advance_blind_level(now_ts) else {
            return Ok(None);
        };

        let new_blinds = *tournament.current_blinds();
        info!(
            "tournament {}: blind level {} -> {} (bb {})",
            id, from, to, new_blinds.big_blind
        );

        self.store.save_tournament(&tournament);
        Ok(Some(TournamentEvent::LevelAdvanced {
            tournament_id: id,
            from,
            to,
            new_blinds,
        }))
    }

    /// Записать результат игрока в раунде (upsert) и обновить его стек.
    /// chips_end = 0 означает вылет; место берём из rank вызывающего,
    /// если у игрока его ещё нет.
    #[allow(clippy::too_many_arguments)]
    pub fn record_round_result(
        &mut self,
        id: TournamentId,
        round: Round,
        login: &str,
        chips_end: Chips,
        rank: Option<u32>,
        advanced: bool,
        now_ts: u64,
    ) -> Result<Vec<TournamentEvent>, TournamentError> {
        let mut tournament = self.load_running(id)?;

        if round == 0 || round > tournament.current_round {
            return Err(TournamentError::RoundOutOfRange {
                tournament_id: id,
                round,
            });
        }

        let player = tournament.players.get_mut(login).ok_or_else(|| {
            TournamentError::PlayerNotFound {
                login: login.to_string(),
                tournament_id: id,
            }
        })?;
        player.chips = chips_end;
        tournament.updated_at = now_ts;

        let mut events = Vec::new();
        if chips_end.is_zero() {
            if tournament.eliminate(login, rank, now_ts)? {
                let assigned = tournament
                    .players
                    .get(login)
                    .and_then(|p| p.rank)
                    .unwrap_or_default();
                info!(
                    "tournament {}: player {} busted in round {} (rank {})",
                    id, login, round, assigned
                );
                events.push(TournamentEvent::PlayerEliminated {
                    tournament_id: id,
                    login: login.to_string(),
                    rank: assigned,
                });
            }

            if let Some(winner) = tournament.complete_if_decided(now_ts) {
                info!("tournament {} completed, winner: {}", id, winner);
                events.push(TournamentEvent::Completed {
                    tournament_id: id,
                    winner,
                });
            }
        }

        self.store.upsert_round_result(&RoundResult {
            tournament_id: id,
            round,
            login: login.to_string(),
            chips_end,
            rank,
            advanced,
        });
        self.store.save_tournament(&tournament);

        Ok(events)
    }

    /// Явный вылет игрока вне результата раунда (например, бюст
    /// посреди раздачи). Повторный вылет — no-op, не ошибка.
    pub fn eliminate_player(
        &mut self,
        id: TournamentId,
        login: &str,
        rank: Option<u32>,
        now_ts: u64,
    ) -> Result<Vec<TournamentEvent>, TournamentError> {
        let mut tournament = self.load_running(id)?;

        let mut events = Vec::new();
        if tournament.eliminate(login, rank, now_ts)? {
            let assigned = tournament
                .players
                .get(login)
                .and_then(|p| p.rank)
                .unwrap_or_default();
            info!("tournament {}: player {} eliminated (rank {})", id, login, assigned);
            events.push(TournamentEvent::PlayerEliminated {
                tournament_id: id,
                login: login.to_string(),
                rank: assigned,
            });

            if let Some(winner) = tournament.complete_if_decided(now_ts) {
                info!("tournament {} completed, winner: {}", id, winner);
                events.push(TournamentEvent::Completed {
                    tournament_id: id,
                    winner,
                });
            }

            self.store.save_tournament(&tournament);
        }

        Ok(events)
    }

    /// Переход к следующему раунду.
    ///
    /// Применяет правило прохода текущего раунда (top-K по стеку с
    /// каждого стола), срезанных выбивает с выдачей мест "худший стек —
    /// худшее место", затем либо завершает турнир (остался один), либо
    /// строит брекет нового раунда. Строки брекета чистятся только для
    /// нового номера раунда — прошлые раунды неприкосновенны.
    pub fn next_round(
        &mut self,
        id: TournamentId,
        now_ts: u64,
    ) -> Result<NextRoundOutcome, TournamentError> {
        let mut tournament = self.load_running(id)?;
        let round = tournament.current_round;
        let keep_per_table = tournament.config.advance_per_table(round);

        // Раскладываем активных по столам завершающегося раунда.
        let mut tables: BTreeMap<TableNumber, Vec<Login>> = BTreeMap::new();
        let mut seated: Vec<Login> = Vec::new();
        for row in self.store.bracket_rows(id, round) {
            let is_active = tournament
                .players
                .get(&row.seat_login)
                .map(|p| !p.eliminated)
                .unwrap_or(false);
            if is_active {
                tables
                    .entry(row.table_number)
                    .or_default()
                    .push(row.seat_login.clone());
                seated.push(row.seat_login.clone());
            }
        }

        // Срезанные правилом прохода: всё, что ниже top-K стола.
        // Игроки вне брекета (поздняя регистрация) проходят автоматически.
        let mut cut: Vec<(Login, Chips)> = Vec::new();
        for logins in tables.values_mut() {
            logins.sort_by(|a, b| {
                let ca = tournament.players[a].chips;
                let cb = tournament.players[b].chips;
                cb.cmp(&ca).then_with(|| a.cmp(b))
            });
            for login in logins.iter().skip(keep_per_table as usize) {
                cut.push((login.clone(), tournament.players[login].chips));
            }
        }

        // Места выдаём от худшего стека к лучшему: кто беднее,
        // тот вылетает раньше и получает худшее место.
        cut.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let mut events = Vec::new();
        let mut eliminated = Vec::new();
        for (login, _) in &cut {
            if tournament.eliminate(login, None, now_ts)? {
                let assigned = tournament
                    .players
                    .get(login)
                    .and_then(|p| p.rank)
                    .unwrap_or_default();
                eliminated.push((login.clone(), assigned));
                events.push(TournamentEvent::PlayerEliminated {
                    tournament_id: id,
                    login: login.clone(),
                    rank: assigned,
                });
            }
        }

        // Прошедшим отмечаем advanced в результатах завершённого раунда.
        let cut_logins: Vec<&Login> = cut.iter().map(|(l, _)| l).collect();
        for seat_login in &seated {
            if cut_logins.contains(&seat_login) {
                continue;
            }
            for mut result in self.store.round_results(id, round) {
                if result.login == *seat_login && !result.advanced {
                    result.advanced = true;
                    self.store.upsert_round_result(&result);
                }
            }
        }

        // Остался один активный — турнир окончен, брекет не строим.
        if let Some(winner) = tournament.complete_if_decided(now_ts) {
            info!("tournament {} completed, winner: {}", id, winner);
            events.push(TournamentEvent::Completed {
                tournament_id: id,
                winner: winner.clone(),
            });
            self.store.save_tournament(&tournament);
            return Ok(NextRoundOutcome {
                new_round: None,
                assignments: Vec::new(),
                eliminated,
                winner: Some(winner),
                events,
            });
        }

        let new_round = round + 1;
        let active = tournament.active_logins_in_seating_order();
        let rows = BracketScheduler::assign(
            id,
            new_round,
            &active,
            tournament.config.table_size,
        );
        apply_bracket_seats(&mut tournament, &rows);
        tournament.current_round = new_round;
        tournament.updated_at = now_ts;

        let tables = table_count(&rows);
        info!(
            "tournament {}: round {} -> {} ({} players, {} tables)",
            id,
            round,
            new_round,
            active.len(),
            tables
        );
        events.push(TournamentEvent::RoundAdvanced {
            tournament_id: id,
            round: new_round,
            tables,
        });

        self.store.clear_bracket(id, new_round);
        self.store.save_bracket(&rows);
        self.store.save_tournament(&tournament);

        Ok(NextRoundOutcome {
            new_round: Some(new_round),
            assignments: rows,
            eliminated,
            winner: None,
            events,
        })
    }

    /// Отменить турнир. Терминально и идемпотентно; расчётный слой
    /// трактует отменённые турниры как "нет обязательств по выплатам".
    pub fn cancel_tournament(
        &mut self,
        id: TournamentId,
        reason: &str,
        now_ts: u64,
    ) -> Result<Vec<TournamentEvent>, TournamentError> {
        let mut tournament = self.load(id)?;
        let was_canceled = tournament.state == TournamentState::Canceled;
        tournament.cancel(reason, now_ts)?;

        if was_canceled {
            return Ok(Vec::new());
        }

        info!("tournament {} canceled: {}", id, reason);
        self.store.save_tournament(&tournament);
        Ok(vec![TournamentEvent::Canceled {
            tournament_id: id,
            reason: reason.to_string(),
        }])
    }

    /// Турнир целиком (read-only).
    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.load(id)
    }

    /// Брекет раунда (read-only).
    pub fn bracket(
        &self,
        id: TournamentId,
        round: Round,
    ) -> Result<Vec<BracketAssignment>, TournamentError> {
        self.load(id)?;
        Ok(self.store.bracket_rows(id, round))
    }

    /// Текущая турнирная таблица: сначала активные по убыванию стека,
    /// затем финишировавшие по месту (1 = победитель).
    pub fn standings(&self, id: TournamentId) -> Result<Vec<TournamentPlayer>, TournamentError> {
        let tournament = self.load(id)?;
        let mut players: Vec<TournamentPlayer> = tournament.players.values().cloned().collect();
        players.sort_by(|a, b| match (a.rank, b.rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => b.chips.cmp(&a.chips).then_with(|| a.login.cmp(&b.login)),
        });
        Ok(players)
    }
}

/// Проставить места за столами по строкам брекета
/// (seat = позиция внутри своего стола, 0-based).
fn apply_bracket_seats(tournament: &mut Tournament, rows: &[BracketAssignment]) {
    for player in tournament.players.values_mut() {
        player.seat = None;
    }

    let mut per_table: BTreeMap<TableNumber, u32> = BTreeMap::new();
    for row in rows {
        let seat = per_table.entry(row.table_number).or_insert(0);
        if let Some(player) = tournament.players.get_mut(&row.seat_login) {
            player.seat = Some(*seat);
        }
        *seat += 1;
    }
}

fn table_count(rows: &[BracketAssignment]) -> u32 {
    rows.iter()
        .map(|r| r.table_number)
        .max()
        .unwrap_or(0)
}
