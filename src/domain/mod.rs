//! Доменная модель: карты, фишки, колода, блайнды, турнир.

pub mod blinds;
pub mod card;
pub mod chips;
pub mod deck;
pub mod tournament;

/// Числовой идентификатор турнира (выдаёт infra::ids::IdGenerator).
pub type TournamentId = u64;

/// Логин игрока на платформе. Игроки приходят извне уже с логинами,
/// поэтому числовых id для них не заводим.
pub type Login = String;

/// Номер раунда турнира (1-based).
pub type Round = u32;

/// Номер стола внутри раунда (1-based).
pub type TableNumber = u32;

pub use blinds::{BlindLevel, BlindSchedule};
pub use card::{Card, Rank, Suit};
pub use chips::Chips;
pub use deck::Shoe;
pub use tournament::{
    RoundResult, Tournament, TournamentConfig, TournamentError, TournamentPlayer,
    TournamentState,
};
