//! Оценка покерных рук с таблицей выплат видеопокера
//! ("Jacks or better": пары ниже валетов не оплачиваются).
//!
//! Основные функции:
//!   `evaluate(cards) -> HandValue` — строго 5 карт;
//!   `evaluate_best_of_seven(cards) -> HandValue` — лучшая пятёрка из 5–7 карт.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_best_of_seven};
pub use hand_rank::{HandCategory, HandValue};
