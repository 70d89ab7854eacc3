use crate::Strategy;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub budget: u64,
    pub strategy: Strategy,
    pub max_steps: u32,
    pub record_steps: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            budget: 100_000,
            strategy: Strategy::Mixed,
            max_steps: 100_000,
            record_steps: false,
        }
    }
}
