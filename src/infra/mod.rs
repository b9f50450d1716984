//! Инфраструктурный слой вокруг движка:
//! - генерация ID (инжектится в машину состояний);
//! - RNG-реализации для колоды;
//! - абстракция хранилища + in-memory реализация.

pub mod ids;
pub mod rng;
pub mod storage;

pub use ids::IdGenerator;
pub use rng::{DeterministicRng, RandomSource, SystemRng};
pub use storage::{InMemoryTournamentStore, TournamentStore};
