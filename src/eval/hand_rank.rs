use serde::{Deserialize, Serialize};

/// Категория руки по шкале видеопокера.
///
/// Числовое значение — это и есть ранг категории (выше = сильнее).
/// Invalid — сентинел для битого входа (не 5 карт): платит 0x,
/// как и NoWinner, но отличим от честной слабой руки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    Invalid = 0,
    NoWinner = 1,
    JacksOrBetter = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    /// Ранг категории: 0..=10, выше — сильнее.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Фиксированный множитель выплаты. Это таблица игрового баланса,
    /// а не что-то вычисляемое; монотонна по рангу категории.
    pub fn payout_multiplier(self) -> u32 {
        match self {
            HandCategory::Invalid => 0,
            HandCategory::NoWinner => 0,
            HandCategory::JacksOrBetter => 1,
            HandCategory::TwoPair => 2,
            HandCategory::ThreeOfAKind => 3,
            HandCategory::Straight => 4,
            HandCategory::Flush => 6,
            HandCategory::FullHouse => 9,
            HandCategory::FourOfAKind => 25,
            HandCategory::StraightFlush => 50,
            HandCategory::RoyalFlush => 250,
        }
    }

    /// Человекочитаемое название для витрин.
    pub fn describe(self) -> &'static str {
        match self {
            HandCategory::Invalid => "Invalid hand",
            HandCategory::NoWinner => "No winner",
            HandCategory::JacksOrBetter => "Jacks or better",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        }
    }
}

/// Результат оценки руки. Не персистится отдельно — каждый раз
/// пересчитывается из карт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandValue {
    pub category: HandCategory,
    pub payout_multiplier: u32,
}

impl HandValue {
    pub fn from_category(category: HandCategory) -> Self {
        Self {
            category,
            payout_multiplier: category.payout_multiplier(),
        }
    }

    /// Сентинел для битого входа.
    pub fn invalid() -> Self {
        Self::from_category(HandCategory::Invalid)
    }

    pub fn is_invalid(&self) -> bool {
        self.category == HandCategory::Invalid
    }

    /// Ранг категории (0..=10).
    pub fn category_rank(&self) -> u8 {
        self.category.rank()
    }

    /// Ключ сравнения для выбора лучшей пятёрки: сначала ранг категории,
    /// затем множитель выплаты. Множитель монотонен по рангу, но порядок
    /// сравнения фиксируем именно таким — от него зависит детерминизм
    /// выбора между равными категориями.
    pub fn cmp_key(&self) -> (u8, u32) {
        (self.category_rank(), self.payout_multiplier)
    }
}
