//! Tie-break policy applied to the answer of a disambiguating question.

use car_rules::Entity;

/// Which fallback tier produced the final candidate set.
///
/// The tiers are tried in declaration order and the first non-empty one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreakTier {
    /// Cars whose sixth bit equals the answer.
    Disambiguated,
    /// No sixth bit matched; cars never given a sixth bit.
    Undisambiguated,
    /// Every candidate, unfiltered.
    Unfiltered,
}

/// Record of a disambiguating question having been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieBreak {
    pub answer: bool,
    pub tier: TieBreakTier,
}

/// Narrow `candidates` by the answer to their prefix's rule question.
///
/// The result is never empty when `candidates` is not, and is always a subset
/// of `candidates` in the same order.
pub fn tie_break<'kb>(candidates: &[&'kb Entity], answer: bool) -> (TieBreak, Vec<&'kb Entity>) {
    let by_answer: Vec<_> = candidates
        .iter()
        .copied()
        .filter(|e| e.code.special_bit() == Some(answer))
        .collect();
    if !by_answer.is_empty() {
        return (tier(answer, TieBreakTier::Disambiguated), by_answer);
    }

    let bare: Vec<_> = candidates
        .iter()
        .copied()
        .filter(|e| !e.code.is_disambiguated())
        .collect();
    if !bare.is_empty() {
        return (tier(answer, TieBreakTier::Undisambiguated), bare);
    }

    (tier(answer, TieBreakTier::Unfiltered), candidates.to_vec())
}

fn tier(answer: bool, tier: TieBreakTier) -> TieBreak {
    TieBreak { answer, tier }
}
