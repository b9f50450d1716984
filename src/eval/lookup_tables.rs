use crate::domain::card::Rank;

/// Битовая маска рангов: 13 бит, бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Построить маску из набора рангов (const, чтобы собирать таблицы).
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= 1 << (ranks[i] as u8 - 2);
        i += 1;
    }
    mask
}

/// Маска бродвея TJQKA — стрит-флеш с ней и одной мастью = роял-флеш.
pub const BROADWAY_MASK: RankMask =
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]);

/// Маски всех десяти стритов, от колеса (A2345) до бродвея (TJQKA).
/// Индекс i соответствует старшей карте: 0 → Five (wheel), 9 → Ace.
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    BROADWAY_MASK,
];

/// Есть ли в маске рангов стрит. Возвращает старшую карту стрита;
/// особый случай — колесо A2345, где туз считается младшим → Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    for (i, sm) in STRAIGHT_MASKS.iter().enumerate().rev() {
        if rank_mask & sm == *sm {
            // i = 0 — wheel со старшей пятёркой, дальше по порядку до туза.
            return Rank::from_value(i as u8 + 5);
        }
    }
    None
}
