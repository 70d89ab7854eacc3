use gacha_core::{DrawEngine, DrawKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Standard draws only.
    Single,
    /// Batches while affordable, then standard draws with the remainder.
    Batch,
    Mini,
    /// Batch, then standard, then mini draws: spends every coin it can.
    Mixed,
    /// Buys prizes outright.
    Guaranteed,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Single,
        Strategy::Batch,
        Strategy::Mini,
        Strategy::Mixed,
        Strategy::Guaranteed,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "one" => Some(Self::Single),
            "batch" | "ten" => Some(Self::Batch),
            "mini" => Some(Self::Mini),
            "mixed" | "all" => Some(Self::Mixed),
            "guaranteed" | "buy" => Some(Self::Guaranteed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
            Self::Mini => "mini",
            Self::Mixed => "mixed",
            Self::Guaranteed => "guaranteed",
        }
    }

    fn preference(self) -> &'static [DrawKind] {
        match self {
            Self::Single => &[DrawKind::Standard],
            Self::Batch => &[DrawKind::Batch, DrawKind::Standard],
            Self::Mini => &[DrawKind::Mini],
            Self::Mixed => &[DrawKind::Batch, DrawKind::Standard, DrawKind::Mini],
            Self::Guaranteed => &[DrawKind::GuaranteedPurchase],
        }
    }

    /// The next operation this strategy would trigger, or `None` once nothing
    /// it uses is affordable.
    pub fn next_kind(self, engine: &DrawEngine) -> Option<DrawKind> {
        self.preference()
            .iter()
            .copied()
            .find(|kind| engine.can_afford(*kind))
    }
}
