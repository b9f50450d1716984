use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Сколько hex-символов SHA-256 попадает в хвост ключа.
const KEY_HASH_PREFIX_LEN: usize = 16;

/// Одна строка расчёта: кому, от какого партнёра и сколько.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutItem {
    pub partner_id: String,
    /// Email получателя. Нормализуется (trim + lowercase) перед хешем.
    pub receiver: String,
    /// Сумма в центах — никаких float в деньгах.
    pub amount_cents: u64,
    /// Валюта строки; None = валюта батча.
    pub currency: Option<String>,
}

/// Батч выплат за период.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayoutBatch {
    pub period_start: String,
    pub period_end: String,
    pub currency: String,
    pub payout_minimum_cents: u64,
    pub note_template: String,
    pub items: Vec<PayoutItem>,
}

/// Канонический вид строки после нормализации. Порядок полей
/// зафиксирован объявлением структуры — serde_json сериализует
/// поля структуры строго в этом порядке.
#[derive(Serialize)]
struct CanonicalItem {
    partner_id: String,
    receiver: String,
    amount_cents: u64,
    currency: String,
}

/// Канонический вид батча целиком (фиксированный порядок ключей).
#[derive(Serialize)]
struct CanonicalBatch<'a> {
    period_start: &'a str,
    period_end: &'a str,
    currency: &'a str,
    payout_minimum_cents: u64,
    note_template: &'a str,
    items: Vec<CanonicalItem>,
}

/// Детерминированный идемпотентный ключ батча выплат.
///
/// Гарантия: два вызова с перестановками одного и того же списка строк
/// (и одинаковыми параметрами) дают байт-в-байт одинаковый ключ;
/// изменение любой суммы, получателя или параметра меняет ключ
/// (с точностью до коллизий SHA-256). Платёжный коллаборатор использует
/// ключ как идемпотентный токен — ретраи схлопываются в одну выплату.
///
/// Формат: `payout:{period_start}:{period_end}:{currency}:{minimum}:{hash16}`.
pub fn build_idempotency_key(batch: &PayoutBatch) -> String {
    // 1. Нормализация строк.
    let mut items: Vec<CanonicalItem> = batch
        .items
        .iter()
        .map(|item| CanonicalItem {
            partner_id: item.partner_id.clone(),
            receiver: item.receiver.trim().to_lowercase(),
            amount_cents: item.amount_cents,
            currency: item
                .currency
                .as_deref()
                .unwrap_or(&batch.currency)
                .to_uppercase(),
        })
        .collect();

    // 2. Тотальный порядок → сортировка стабильна при любом входном порядке.
    items.sort_by(|a, b| {
        a.partner_id
            .cmp(&b.partner_id)
            .then_with(|| a.receiver.cmp(&b.receiver))
            .then_with(|| a.amount_cents.cmp(&b.amount_cents))
    });

    let canonical = CanonicalBatch {
        period_start: &batch.period_start,
        period_end: &batch.period_end,
        currency: &batch.currency,
        payout_minimum_cents: batch.payout_minimum_cents,
        note_template: &batch.note_template,
        items,
    };

    // 3-4. Каноническая сериализация + SHA-256.
    // Сериализация plain-структур в serde_json не падает.
    let serialized =
        serde_json::to_string(&canonical).expect("canonical batch serialization is infallible");

    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let digest = hasher.finalize();

    let mut hash_prefix = String::with_capacity(KEY_HASH_PREFIX_LEN);
    for byte in digest.iter().take(KEY_HASH_PREFIX_LEN / 2) {
        hash_prefix.push_str(&format!("{byte:02x}"));
    }

    // 5. Финальный ключ.
    format!(
        "payout:{}:{}:{}:{}:{}",
        batch.period_start,
        batch.period_end,
        batch.currency,
        batch.payout_minimum_cents,
        hash_prefix
    )
}
