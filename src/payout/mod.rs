//! Расчётный слой: построение идемпотентного ключа для батча выплат.
//! Сам сабмит и ретраи — зона внешнего платёжного коллаборатора.

pub mod batch;

pub use batch::{build_idempotency_key, PayoutBatch, PayoutItem};
