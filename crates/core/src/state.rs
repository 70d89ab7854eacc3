use crate::{MachineConfig, MessageLog};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub balance: u64,
    pub pity: u64,
    pub log: MessageLog,
    /// Held for the duration of a single draw resolution.
    pub draw_in_progress: bool,
}

impl EngineState {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            balance: 0,
            pity: 0,
            log: MessageLog::with_capacity(log_capacity),
            draw_in_progress: false,
        }
    }
}

/// Read-only view published after each operation completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub balance: u64,
    pub pity: u64,
    pub messages: Vec<String>,
    pub draw_in_progress: bool,
    pub standard_cost: u64,
    pub mini_cost: u64,
    pub batch_cost: u64,
    pub guaranteed_cost: u64,
    pub pity_threshold: u64,
}

impl Snapshot {
    pub fn capture(state: &EngineState, config: &MachineConfig) -> Self {
        Self {
            balance: state.balance,
            pity: state.pity,
            messages: state.log.to_vec(),
            draw_in_progress: state.draw_in_progress,
            standard_cost: config.standard.cost,
            mini_cost: config.mini.cost,
            batch_cost: config.batch_cost(),
            guaranteed_cost: config.guaranteed_cost,
            pity_threshold: config.pity_threshold,
        }
    }
}
