//! Ядро турнирно-расчётного движка карточной платформы.
//!
//! Здесь живёт всё "тяжёлое":
//!   - оценка покерных рук (eval) с таблицей выплат видеопокера;
//!   - машина состояний турнира (tournament): регистрация, рассадка,
//!     уровни блайндов, вылеты, переход раундов;
//!   - построение идемпотентного ключа для батча выплат (payout).
//!
//! Рендеринг, уведомления и прочие витрины — внешние потребители:
//! они получают от ядра структурированные события и результаты,
//! а сюда приносят только конфигурацию.

pub mod domain;
pub mod eval;
pub mod infra;
pub mod payout;
pub mod tournament;

pub use domain::tournament::TournamentError;
pub use tournament::state_machine::TournamentStateMachine;
