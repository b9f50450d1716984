use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::blinds::{BlindLevel, BlindSchedule};
use crate::domain::chips::Chips;
use crate::domain::{Login, Round, TournamentId};

/// Конфигурация турнира.
/// Всё, что приносит админский слой при создании.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Название турнира.
    pub name: String,

    /// Игра, по которой идёт турнир (например "holdem").
    pub game: String,

    /// Канал/стрим, к которому привязан турнир.
    pub channel: String,

    /// Бай-ин в центах (деньги, не фишки).
    pub buy_in_cents: u64,

    /// Стартовый стек каждого игрока.
    pub starting_chips: Chips,

    /// Длительность одного уровня блайндов в секундах.
    pub level_duration_secs: u64,

    /// Сколько раундов запланировано всего.
    pub total_rounds: u32,

    /// Правило прохода по раундам: advance_config[i] = сколько игроков
    /// с каждого стола проходит из раунда i+1 дальше.
    pub advance_config: Vec<u32>,

    /// Размер стола (сколько мест), он же дефолтная подсказка
    /// для генератора брекетов.
    pub table_size: u32,

    /// Сколько колод в шузе у столов этого турнира.
    pub deck_count: u32,

    /// Поздняя регистрация: открыта, пока current_level < late_reg_levels.
    /// 0 = регистрация закрывается на старте.
    pub late_reg_levels: u32,

    /// Расписание блайндов.
    pub blind_schedule: BlindSchedule,
}

impl TournamentConfig {
    /// Жёсткая валидация конфига. Невалидный конфиг не должен
    /// дожить до персиста.
    pub fn validate_full(&self) -> Result<(), TournamentError> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: name is empty".into(),
            ));
        }

        if self.starting_chips.is_zero() {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: starting_chips = 0".into(),
            ));
        }

        if self.level_duration_secs == 0 {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: level_duration_secs = 0".into(),
            ));
        }

        if self.total_rounds == 0 {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: total_rounds = 0".into(),
            ));
        }

        if self.advance_config.is_empty() {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: advance_config is empty".into(),
            ));
        }

        if self.advance_config.iter().any(|&n| n == 0) {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: advance_config entry = 0".into(),
            ));
        }

        if !(2..=10).contains(&self.table_size) {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: table_size must be in [2, 10]".into(),
            ));
        }

        if self.deck_count == 0 {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: deck_count = 0".into(),
            ));
        }

        self.blind_schedule
            .validate()
            .map_err(TournamentError::InvalidConfig)?;

        Ok(())
    }

    /// Сколько игроков с одного стола проходит дальше из раунда `round`.
    /// Для раундов за пределами списка действует последнее правило.
    pub fn advance_per_table(&self, round: Round) -> u32 {
        let idx = (round.saturating_sub(1)) as usize;
        self.advance_config
            .get(idx)
            .or_else(|| self.advance_config.last())
            .copied()
            .unwrap_or(1)
    }
}

/// Статус турнира.
///
/// pending → running → completed, из running есть аварийный
/// выход в canceled. Из терминальных состояний выхода нет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TournamentState {
    Pending,
    Running,
    Completed,
    Canceled,
}

impl TournamentState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TournamentState::Completed | TournamentState::Canceled)
    }
}

/// Игрок внутри турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentPlayer {
    pub login: Login,
    /// Место за столом текущего раунда (None между раундами).
    pub seat: Option<u32>,
    /// Текущий стек.
    pub chips: Chips,
    /// Вылетел ли игрок.
    pub eliminated: bool,
    /// Итоговое место (1 = победитель); ставится при вылете или финише.
    pub rank: Option<u32>,
}

/// Результат игрока в одном раунде. Upsert по (tournament_id, round, login):
/// пересчёт раунда перезаписывает строку, а не плодит дубликаты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub tournament_id: TournamentId,
    pub round: Round,
    pub login: Login,
    pub chips_end: Chips,
    pub rank: Option<u32>,
    pub advanced: bool,
}

/// Основной объект турнира.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub state: TournamentState,

    /// Индекс текущего уровня блайндов (всегда валидный индекс
    /// в config.blind_schedule).
    pub current_level: u32,

    /// Когда наступает следующий уровень (Unix ts, только в running).
    /// Монотонно растёт, пока турнир идёт.
    pub next_level_at: Option<u64>,

    /// Текущий раунд (0 до старта, 1 после старта).
    pub current_round: Round,

    /// Регистрации, ключ — логин. Ровно одна запись на игрока.
    pub players: BTreeMap<Login, TournamentPlayer>,

    /// Сколько игроков уже вылетело (для выдачи мест по умолчанию).
    pub eliminated_count: u32,

    /// Причина отмены (только в canceled).
    pub cancel_reason: Option<String>,

    pub created_at: u64,
    pub updated_at: u64,
}

impl Tournament {
    pub fn new(
        id: TournamentId,
        config: TournamentConfig,
        now_ts: u64,
    ) -> Result<Self, TournamentError> {
        config.validate_full()?;

        Ok(Self {
            id,
            config,
            state: TournamentState::Pending,
            current_level: 0,
            next_level_at: None,
            current_round: 0,
            players: BTreeMap::new(),
            eliminated_count: 0,
            cancel_reason: None,
            created_at: now_ts,
            updated_at: now_ts,
        })
    }

    /// Текущий уровень блайндов.
    pub fn current_blinds(&self) -> &BlindLevel {
        // current_level валиден по инварианту конструктора/advance.
        self.config
            .blind_schedule
            .level(self.current_level)
            .unwrap_or_else(|| self.config.blind_schedule.levels.first().expect("non-empty"))
    }

    /// Открыта ли сейчас регистрация.
    /// Pending — всегда; Running — только в окне поздней регистрации.
    pub fn registration_open(&self) -> bool {
        match self.state {
            TournamentState::Pending => true,
            TournamentState::Running => self.current_level < self.config.late_reg_levels,
            _ => false,
        }
    }

    /// Зарегистрировать игрока. Стартовый стек, без места.
    pub fn register_player(&mut self, login: &str) -> Result<(), TournamentError> {
        if !self.registration_open() {
            return Err(TournamentError::RegistrationClosed {
                tournament_id: self.id,
            });
        }

        if self.players.contains_key(login) {
            return Err(TournamentError::AlreadyRegistered {
                login: login.to_string(),
                tournament_id: self.id,
            });
        }

        let player = TournamentPlayer {
            login: login.to_string(),
            seat: None,
            chips: self.config.starting_chips,
            eliminated: false,
            rank: None,
        };

        self.players.insert(login.to_string(), player);
        Ok(())
    }

    /// Перевести pending → running и завести часы блайндов.
    pub fn start(&mut self, now_ts: u64) -> Result<(), TournamentError> {
        if self.state != TournamentState::Pending {
            return Err(TournamentError::InvalidTransition {
                tournament_id: self.id,
                from: self.state,
                attempted: TournamentState::Running,
            });
        }

        self.state = TournamentState::Running;
        self.current_level = 0;
        self.current_round = 1;
        self.next_level_at = Some(now_ts + self.config.level_duration_secs);
        self.eliminated_count = 0;
        self.updated_at = now_ts;
        Ok(())
    }

    /// Идемпотентное повышение уровня блайндов.
    ///
    /// Если дедлайн наступил и есть следующий уровень — повышаем на один
    /// и возвращаем (from, to). Иначе ничего не делаем. Уровень никогда
    /// не понижается, поэтому вызов безопасен и из поллера, и из таймера.
    pub fn advance_blind_level(&mut self, now_ts: u64) -> Option<(u32, u32)> {
        if self.state != TournamentState::Running {
            return None;
        }

        let due_at = self.next_level_at?;
        if now_ts < due_at || self.current_level >= self.config.blind_schedule.last_index() {
            return None;
        }

        let from = self.current_level;
        self.current_level += 1;
        self.next_level_at = Some(due_at + self.config.level_duration_secs);
        self.updated_at = now_ts;
        Some((from, self.current_level))
    }

    /// Активные (не вылетевшие) игроки.
    pub fn active_players(&self) -> impl Iterator<Item = &TournamentPlayer> {
        self.players.values().filter(|p| !p.eliminated)
    }

    pub fn active_player_count(&self) -> usize {
        self.active_players().count()
    }

    /// Логины активных игроков в порядке рассадки: сначала по текущему
    /// месту, затем по логину. Этот порядок стабилен, поэтому повторная
    /// генерация брекета без новых вылетов даёт тот же layout.
    pub fn active_logins_in_seating_order(&self) -> Vec<Login> {
        let mut active: Vec<&TournamentPlayer> = self.active_players().collect();
        active.sort_by(|a, b| match (a.seat, b.seat) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.login.cmp(&b.login)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.login.cmp(&b.login),
        });
        active.into_iter().map(|p| p.login.clone()).collect()
    }

    /// Пометить игрока вылетевшим.
    ///
    /// Идемпотентно: повторный вылет — no-op, вернёт Ok(false) и не тронет
    /// уже выданное место. Если `rank` не передан, место выдаётся по
    /// принципу "первый вылетевший — последнее место":
    /// place = всего игроков − уже вылетевших.
    pub fn eliminate(
        &mut self,
        login: &str,
        rank: Option<u32>,
        now_ts: u64,
    ) -> Result<bool, TournamentError> {
        let total = self.players.len() as u32;
        let already_out = self.eliminated_count;

        let player =
            self.players
                .get_mut(login)
                .ok_or_else(|| TournamentError::PlayerNotFound {
                    login: login.to_string(),
                    tournament_id: self.id,
                })?;

        if player.eliminated {
            return Ok(false);
        }

        player.eliminated = true;
        player.seat = None;
        if player.rank.is_none() {
            player.rank = Some(rank.unwrap_or_else(|| total.saturating_sub(already_out)));
        }

        self.eliminated_count += 1;
        self.updated_at = now_ts;
        Ok(true)
    }

    /// Если остался один активный игрок — завершить турнир и выдать
    /// ему первое место. Возвращает логин победителя.
    pub fn complete_if_decided(&mut self, now_ts: u64) -> Option<Login> {
        if self.state != TournamentState::Running {
            return None;
        }

        let mut active = self.active_players();
        let winner = active.next()?.login.clone();
        if active.next().is_some() {
            return None;
        }
        drop(active);

        self.state = TournamentState::Completed;
        self.next_level_at = None;
        self.updated_at = now_ts;

        if let Some(p) = self.players.get_mut(&winner) {
            p.seat = None;
            if p.rank.is_none() {
                p.rank = Some(1);
            }
        }

        Some(winner)
    }

    /// Отмена турнира. Терминальна и идемпотентна: повторная отмена —
    /// no-op; отмена завершённого турнира — ошибка.
    pub fn cancel(&mut self, reason: &str, now_ts: u64) -> Result<(), TournamentError> {
        match self.state {
            TournamentState::Canceled => Ok(()),
            TournamentState::Completed => Err(TournamentError::TournamentFinished {
                tournament_id: self.id,
            }),
            _ => {
                self.state = TournamentState::Canceled;
                self.cancel_reason = Some(reason.to_string());
                self.next_level_at = None;
                self.updated_at = now_ts;
                Ok(())
            }
        }
    }
}

/// Ошибки турнирного движка.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("tournament not found: id={tournament_id}")]
    TournamentNotFound { tournament_id: TournamentId },

    #[error("player {login} not found in tournament {tournament_id}")]
    PlayerNotFound {
        login: Login,
        tournament_id: TournamentId,
    },

    #[error("player {login} is already registered in tournament {tournament_id}")]
    AlreadyRegistered {
        login: Login,
        tournament_id: TournamentId,
    },

    #[error("registration is closed in tournament {tournament_id}")]
    RegistrationClosed { tournament_id: TournamentId },

    #[error("tournament {tournament_id} is not running (state: {state:?})")]
    TournamentNotRunning {
        tournament_id: TournamentId,
        state: TournamentState,
    },

    #[error("tournament {tournament_id}: invalid transition {from:?} -> {attempted:?}")]
    InvalidTransition {
        tournament_id: TournamentId,
        from: TournamentState,
        attempted: TournamentState,
    },

    #[error("tournament {tournament_id} is already finished")]
    TournamentFinished { tournament_id: TournamentId },

    #[error("tournament {tournament_id}: round {round} is out of range")]
    RoundOutOfRange {
        tournament_id: TournamentId,
        round: Round,
    },

    #[error("invalid tournament config: {0}")]
    InvalidConfig(String),
}
