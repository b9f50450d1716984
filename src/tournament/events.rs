use serde::{Deserialize, Serialize};

use crate::domain::blinds::BlindLevel;
use crate::domain::{Login, Round, TournamentId};

/// Структурированные события турнира для внешних слоёв
/// (уведомления, аудит, витрины). Ядро их только порождает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TournamentEvent {
    Started {
        tournament_id: TournamentId,
        round: Round,
        tables: u32,
    },
    LevelAdvanced {
        tournament_id: TournamentId,
        from: u32,
        to: u32,
        new_blinds: BlindLevel,
    },
    PlayerEliminated {
        tournament_id: TournamentId,
        login: Login,
        rank: u32,
    },
    RoundAdvanced {
        tournament_id: TournamentId,
        round: Round,
        tables: u32,
    },
    Completed {
        tournament_id: TournamentId,
        winner: Login,
    },
    Canceled {
        tournament_id: TournamentId,
        reason: String,
    },
}
