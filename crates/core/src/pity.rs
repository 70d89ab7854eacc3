use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    /// The sample fell below the win probability. `consumed_pity` is set when
    /// the accumulator was already at the threshold and paid for the win.
    LuckyWin { consumed_pity: bool },
    /// A loss pushed the accumulator to the threshold.
    PityWin,
    Loss,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        !matches!(self, Outcome::Loss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PityResolution {
    pub pity: u64,
    pub outcome: Outcome,
}

/// Resolves one round against a pity accumulator. Exactly one threshold is
/// subtracted per round; the residual carries forward.
pub fn resolve_round(pity: u64, threshold: u64, cost: u64, lucky: bool) -> PityResolution {
    if lucky {
        return if pity >= threshold {
            PityResolution {
                pity: pity - threshold,
                outcome: Outcome::LuckyWin {
                    consumed_pity: true,
                },
            }
        } else {
            PityResolution {
                pity: 0,
                outcome: Outcome::LuckyWin {
                    consumed_pity: false,
                },
            }
        };
    }
    let next = pity.saturating_add(cost);
    if next >= threshold {
        PityResolution {
            pity: next - threshold,
            outcome: Outcome::PityWin,
        }
    } else {
        PityResolution {
            pity: next,
            outcome: Outcome::Loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! round_case {
        ($name:ident, $pity:expr, $threshold:expr, $cost:expr, $lucky:expr, $expected_pity:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let resolved = resolve_round($pity, $threshold, $cost, $lucky);
                assert_eq!(resolved.pity, $expected_pity);
                assert_eq!(resolved.outcome, $expected);
            }
        };
    }

    round_case!(loss_accumulates, 0, 2000, 100, false, 100, Outcome::Loss);
    round_case!(loss_below_threshold, 1800, 2000, 100, false, 1900, Outcome::Loss);
    round_case!(loss_reaching_threshold, 1900, 2000, 100, false, 0, Outcome::PityWin);
    round_case!(loss_crossing_keeps_residual, 1995, 2000, 10, false, 5, Outcome::PityWin);
    round_case!(
        lucky_resets_progress,
        1500,
        2000,
        100,
        true,
        0,
        Outcome::LuckyWin {
            consumed_pity: false
        }
    );
    round_case!(
        lucky_at_threshold_consumes_charge,
        2300,
        2000,
        100,
        true,
        300,
        Outcome::LuckyWin {
            consumed_pity: true
        }
    );
    round_case!(
        lucky_exactly_at_threshold,
        2000,
        2000,
        100,
        true,
        0,
        Outcome::LuckyWin {
            consumed_pity: true
        }
    );

    #[test]
    fn only_loss_is_not_a_win() {
        assert!(!Outcome::Loss.is_win());
        assert!(Outcome::PityWin.is_win());
        assert!(Outcome::LuckyWin {
            consumed_pity: false
        }
        .is_win());
    }
}
