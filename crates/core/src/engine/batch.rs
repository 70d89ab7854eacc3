use super::*;
use crate::resolve_round;

impl DrawEngine {
    /// Runs `batch_rounds` standard rounds against a local copy of the pity
    /// accumulator, then publishes the spend and the final pity value once.
    pub fn draw_ten(&mut self, events: &mut EventBus) -> u32 {
        let Some(rule) = self.config.rule_for(DrawKind::Batch) else {
            return 0;
        };
        let Ok(cost) = self.admit(DrawKind::Batch, events) else {
            return 0;
        };
        let rounds = self.config.batch_rounds;
        let threshold = self.config.pity_threshold;
        self.notify(Notice::BatchStarted { rounds });

        let mut pity = self.state.pity;
        let mut wins = 0u32;
        for round in 1..=rounds {
            let lucky = self.sample() < rule.probability;
            let resolved = resolve_round(pity, threshold, rule.cost, lucky);
            pity = resolved.pity;
            wins += u32::from(resolved.outcome.is_win());
            log::debug!("batch round {round}/{rounds}: {:?}, pity {pity}", resolved.outcome);
            self.notify(Notice::BatchRound {
                round,
                rounds,
                outcome: resolved.outcome,
            });
            events.push(Event::BatchRoundResolved {
                round,
                outcome: resolved.outcome,
                pity,
            });
        }

        self.state.balance -= cost;
        self.state.pity = pity;
        log::info!(
            "batch of {rounds} for {cost}: {wins} won, pity {pity}, balance {}",
            self.state.balance
        );
        self.notify(Notice::BatchSummary { rounds, wins });
        events.push(Event::BatchCompleted {
            rounds,
            wins,
            cost,
            pity,
            balance: self.state.balance,
        });
        self.release();
        wins
    }
}
