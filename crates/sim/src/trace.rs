use crate::{SimError, Strategy};
use gacha_core::DrawKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SimStatus {
    BudgetExhausted,
    MaxSteps,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepRecord {
    pub step: u32,
    pub kind: DrawKind,
    pub wins: u32,
    pub balance_before: u64,
    pub balance_after: u64,
    pub pity_before: u64,
    pub pity_after: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinBreakdown {
    pub lucky: u32,
    /// Lucky wins that also consumed a pity charge.
    pub lucky_consumed_pity: u32,
    pub pity: u32,
    pub guaranteed: u32,
}

impl WinBreakdown {
    pub fn total(&self) -> u32 {
        self.lucky + self.pity + self.guaranteed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimReport {
    pub strategy: Strategy,
    pub seed: u64,
    pub status: SimStatus,
    pub budget: u64,
    pub spent: u64,
    pub remaining: u64,
    pub operations: u32,
    pub rounds: u32,
    pub wins: WinBreakdown,
    pub final_pity: u64,
    /// Largest spend between consecutive wins, counting the winning round.
    pub longest_drought: u64,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
}

impl SimReport {
    pub fn cost_per_win(&self) -> Option<f64> {
        let wins = self.wins.total();
        (wins > 0).then(|| self.spent as f64 / f64::from(wins))
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "strategy: {} seed: {} status: {}",
                self.strategy.label(),
                self.seed,
                status_label(self.status)
            ),
            format!(
                "budget: {} spent: {} remaining: {}",
                self.budget, self.spent, self.remaining
            ),
            format!(
                "operations: {} rounds: {} final pity: {}",
                self.operations, self.rounds, self.final_pity
            ),
            format!(
                "wins: {} (lucky {} [{} used pity], pity {}, guaranteed {})",
                self.wins.total(),
                self.wins.lucky,
                self.wins.lucky_consumed_pity,
                self.wins.pity,
                self.wins.guaranteed
            ),
            match self.cost_per_win() {
                Some(cost) => format!("cost per win: {cost:.1}"),
                None => "cost per win: (no wins)".to_string(),
            },
            format!("longest drought: {}", self.longest_drought),
        ];
        if !self.steps.is_empty() {
            lines.push(String::new());
            lines.push("steps:".to_string());
            for step in &self.steps {
                lines.push(format!(
                    "  {:>5} {:<18} wins={} balance {}->{} pity {}->{}",
                    step.step,
                    format!("{:?}", step.kind),
                    step.wins,
                    step.balance_before,
                    step.balance_after,
                    step.pity_before,
                    step.pity_after
                ));
            }
        }
        lines.join("\n")
    }
}

fn status_label(status: SimStatus) -> &'static str {
    match status {
        SimStatus::BudgetExhausted => "budget exhausted",
        SimStatus::MaxSteps => "max steps",
    }
}

pub fn write_json(path: &Path, report: &SimReport) -> Result<(), SimError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &SimReport) -> Result<(), SimError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}

pub fn read_json(path: &Path) -> Result<SimReport, SimError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
