use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STANDARD_COST: u64 = 100;
pub const STANDARD_PROBABILITY: f64 = 0.077;
pub const MINI_COST: u64 = 10;
pub const MINI_PROBABILITY: f64 = 0.008;
pub const BATCH_ROUNDS: u32 = 10;
pub const GUARANTEED_COST: u64 = 2000;
pub const PITY_THRESHOLD: u64 = 2000;
pub const LOG_CAPACITY: usize = 5;
pub const DENOMINATIONS: &[u64] = &[10, 50, 100, 500, 1000, 5000, 10000];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DrawRule {
    pub cost: u64,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineConfig {
    pub standard: DrawRule,
    pub mini: DrawRule,
    #[serde(default = "default_batch_rounds")]
    pub batch_rounds: u32,
    pub guaranteed_cost: u64,
    pub pity_threshold: u64,
    #[serde(default = "default_denominations")]
    pub denominations: Vec<u64>,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_batch_rounds() -> u32 {
    BATCH_ROUNDS
}

fn default_denominations() -> Vec<u64> {
    DENOMINATIONS.to_vec()
}

fn default_log_capacity() -> usize {
    LOG_CAPACITY
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("pity threshold must be positive")]
    ZeroThreshold,
    #[error("{kind:?} draw cost must be positive")]
    ZeroCost { kind: DrawKind },
    #[error("{kind:?} draw probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { kind: DrawKind, value: f64 },
    #[error("{kind:?} draw cost {cost} exceeds pity threshold {threshold}")]
    CostAboveThreshold {
        kind: DrawKind,
        cost: u64,
        threshold: u64,
    },
    #[error("batch draw runs exactly {expected} rounds, got {value}")]
    BatchRoundsFixed { value: u32, expected: u32 },
    #[error("message log holds exactly {expected} entries, got {value}")]
    LogCapacityFixed { value: usize, expected: usize },
    #[error("denomination list is empty or contains zero")]
    InvalidDenominations,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DrawKind {
    Standard,
    Mini,
    Batch,
    GuaranteedPurchase,
}

impl DrawKind {
    pub const ALL: [DrawKind; 4] = [
        DrawKind::Standard,
        DrawKind::Mini,
        DrawKind::Batch,
        DrawKind::GuaranteedPurchase,
    ];
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            standard: DrawRule {
                cost: STANDARD_COST,
                probability: STANDARD_PROBABILITY,
            },
            mini: DrawRule {
                cost: MINI_COST,
                probability: MINI_PROBABILITY,
            },
            batch_rounds: BATCH_ROUNDS,
            guaranteed_cost: GUARANTEED_COST,
            pity_threshold: PITY_THRESHOLD,
            denominations: default_denominations(),
            log_capacity: LOG_CAPACITY,
        }
    }
}

impl MachineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pity_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        for (kind, rule) in [(DrawKind::Standard, self.standard), (DrawKind::Mini, self.mini)] {
            if rule.cost == 0 {
                return Err(ConfigError::ZeroCost { kind });
            }
            if !(0.0..=1.0).contains(&rule.probability) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    kind,
                    value: rule.probability,
                });
            }
            if rule.cost > self.pity_threshold {
                return Err(ConfigError::CostAboveThreshold {
                    kind,
                    cost: rule.cost,
                    threshold: self.pity_threshold,
                });
            }
        }
        if self.guaranteed_cost == 0 {
            return Err(ConfigError::ZeroCost {
                kind: DrawKind::GuaranteedPurchase,
            });
        }
        if self.batch_rounds != BATCH_ROUNDS {
            return Err(ConfigError::BatchRoundsFixed {
                value: self.batch_rounds,
                expected: BATCH_ROUNDS,
            });
        }
        if self.log_capacity != LOG_CAPACITY {
            return Err(ConfigError::LogCapacityFixed {
                value: self.log_capacity,
                expected: LOG_CAPACITY,
            });
        }
        if self.denominations.is_empty() || self.denominations.contains(&0) {
            return Err(ConfigError::InvalidDenominations);
        }
        Ok(())
    }

    pub fn batch_cost(&self) -> u64 {
        self.standard.cost.saturating_mul(u64::from(self.batch_rounds))
    }

    pub fn cost_of(&self, kind: DrawKind) -> u64 {
        match kind {
            DrawKind::Standard => self.standard.cost,
            DrawKind::Mini => self.mini.cost,
            DrawKind::Batch => self.batch_cost(),
            DrawKind::GuaranteedPurchase => self.guaranteed_cost,
        }
    }

    pub fn rule_for(&self, kind: DrawKind) -> Option<DrawRule> {
        match kind {
            DrawKind::Standard | DrawKind::Batch => Some(self.standard),
            DrawKind::Mini => Some(self.mini),
            DrawKind::GuaranteedPurchase => None,
        }
    }

    pub fn denomination(&self, amount: u64) -> Option<Denomination> {
        self.denominations
            .contains(&amount)
            .then_some(Denomination(amount))
    }
}

/// An amount accepted by the coin slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Denomination(u64);

impl Denomination {
    pub fn amount(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_machine_constants() {
        let config = MachineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.batch_cost(), 1000);
        assert_eq!(config.cost_of(DrawKind::GuaranteedPurchase), 2000);
        assert_eq!(config.cost_of(DrawKind::Mini), 10);
        assert_eq!(config.denominations.len(), 7);
    }

    #[test]
    fn rejects_zero_threshold() {
        let config = MachineConfig {
            pity_threshold: 0,
            ..MachineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroThreshold));
    }

    #[test]
    fn rejects_probability_above_one() {
        let mut config = MachineConfig::default();
        config.mini.probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                kind: DrawKind::Mini,
                ..
            })
        ));
    }

    #[test]
    fn rejects_cost_above_threshold() {
        let config = MachineConfig {
            pity_threshold: 50,
            ..MachineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CostAboveThreshold {
                kind: DrawKind::Standard,
                cost: 100,
                threshold: 50,
            })
        ));
    }

    #[test]
    fn rejects_batch_size_other_than_ten() {
        for value in [0, 3, 11] {
            let config = MachineConfig {
                batch_rounds: value,
                ..MachineConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::BatchRoundsFixed {
                    value,
                    expected: BATCH_ROUNDS
                })
            );
        }
    }

    #[test]
    fn rejects_log_capacity_other_than_five() {
        let config = MachineConfig {
            log_capacity: 50,
            ..MachineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::LogCapacityFixed {
                value: 50,
                expected: LOG_CAPACITY
            })
        );
    }

    #[test]
    fn rule_lookup_by_kind() {
        let config = MachineConfig::default();
        assert_eq!(config.rule_for(DrawKind::Batch), Some(config.standard));
        assert_eq!(config.rule_for(DrawKind::Mini), Some(config.mini));
        assert_eq!(config.rule_for(DrawKind::GuaranteedPurchase), None);
    }

    #[test]
    fn denomination_lookup_uses_configured_list() {
        let config = MachineConfig::default();
        assert_eq!(config.denomination(500).map(Denomination::amount), Some(500));
        assert_eq!(config.denomination(20), None);
    }

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let raw = r#"{
            "standard": {"cost": 100, "probability": 0.5},
            "mini": {"cost": 10, "probability": 0.1},
            "guaranteed_cost": 2000,
            "pity_threshold": 900
        }"#;
        let config: MachineConfig = serde_json::from_str(raw).expect("parse");
        assert_eq!(config.batch_rounds, BATCH_ROUNDS);
        assert_eq!(config.log_capacity, LOG_CAPACITY);
        assert_eq!(config.denominations, DENOMINATIONS.to_vec());
    }
}
