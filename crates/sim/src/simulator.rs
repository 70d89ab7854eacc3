use crate::{SimConfig, SimError, SimReport, SimStatus, StepRecord, WinBreakdown};
use gacha_core::{DrawEngine, Event, EventBus, MachineConfig, Outcome};

#[derive(Debug)]
pub struct Simulator {
    pub engine: DrawEngine,
    pub events: EventBus,
    wins: WinBreakdown,
    rounds: u32,
    since_win: u64,
    longest_drought: u64,
}

impl Simulator {
    pub fn new(engine: DrawEngine) -> Self {
        Self {
            engine,
            events: EventBus::default(),
            wins: WinBreakdown::default(),
            rounds: 0,
            since_win: 0,
            longest_drought: 0,
        }
    }

    pub fn run(mut self, sim: &SimConfig) -> Result<SimReport, SimError> {
        if sim.budget == 0 {
            return Err(SimError::Invalid("budget must be positive".to_string()));
        }
        self.engine.insert_funds(sim.budget, &mut self.events);
        self.absorb_events();

        let mut steps = Vec::new();
        let mut operations = 0u32;
        let mut status = SimStatus::BudgetExhausted;
        while let Some(kind) = sim.strategy.next_kind(&self.engine) {
            if operations >= sim.max_steps {
                status = SimStatus::MaxSteps;
                break;
            }
            operations += 1;
            let balance_before = self.engine.balance();
            let pity_before = self.engine.pity();
            let wins = self.engine.draw(kind, &mut self.events);
            self.absorb_events();
            if sim.record_steps {
                steps.push(StepRecord {
                    step: operations,
                    kind,
                    wins,
                    balance_before,
                    balance_after: self.engine.balance(),
                    pity_before,
                    pity_after: self.engine.pity(),
                });
            }
        }
        self.longest_drought = self.longest_drought.max(self.since_win);
        let remaining = self.engine.balance();
        log::info!(
            "simulated {} operations with {:?}: {} wins, {} left",
            operations,
            sim.strategy,
            self.wins.total(),
            remaining
        );
        Ok(SimReport {
            strategy: sim.strategy,
            seed: sim.seed,
            status,
            budget: sim.budget,
            spent: sim.budget - remaining,
            remaining,
            operations,
            rounds: self.rounds,
            wins: self.wins,
            final_pity: self.engine.pity(),
            longest_drought: self.longest_drought,
            steps,
        })
    }

    fn absorb_events(&mut self) {
        let standard_cost = self.engine.config().standard.cost;
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            match event {
                Event::DrawResolved { outcome, cost, .. } => self.record_round(outcome, cost),
                Event::BatchRoundResolved { outcome, .. } => {
                    self.record_round(outcome, standard_cost)
                }
                Event::GuaranteedPurchased { .. } => self.wins.guaranteed += 1,
                _ => {}
            }
        }
    }

    fn record_round(&mut self, outcome: Outcome, cost: u64) {
        self.rounds += 1;
        self.since_win += cost;
        match outcome {
            Outcome::LuckyWin { consumed_pity } => {
                self.wins.lucky += 1;
                if consumed_pity {
                    self.wins.lucky_consumed_pity += 1;
                }
            }
            Outcome::PityWin => self.wins.pity += 1,
            Outcome::Loss => return,
        }
        self.longest_drought = self.longest_drought.max(self.since_win);
        self.since_win = 0;
    }
}

/// Runs one seeded simulation against `machine`.
pub fn simulate(machine: &MachineConfig, sim: &SimConfig) -> Result<SimReport, SimError> {
    let engine = DrawEngine::with_seed(machine.clone(), sim.seed)?;
    Simulator::new(engine).run(sim)
}

/// Runs the same simulation for each seed in `seeds`.
pub fn simulate_seeds(
    machine: &MachineConfig,
    sim: &SimConfig,
    seeds: impl IntoIterator<Item = u64>,
) -> Result<Vec<SimReport>, SimError> {
    seeds
        .into_iter()
        .map(|seed| {
            let sim = SimConfig {
                seed,
                ..sim.clone()
            };
            simulate(machine, &sim)
        })
        .collect()
}
