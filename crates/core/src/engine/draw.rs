use super::*;
use crate::resolve_round;

impl DrawEngine {
    /// One resolution step shared by the probabilistic draws.
    ///
    /// The caller has already checked the balance and holds the draw guard.
    /// `cost` is spent whatever the outcome.
    pub fn perform_draw(&mut self, cost: u64, probability: f64, events: &mut EventBus) -> bool {
        debug_assert!(self.state.balance >= cost, "perform_draw without funds");
        let lucky = self.sample() < probability;
        self.state.balance = self.state.balance.saturating_sub(cost);
        let resolved = resolve_round(self.state.pity, self.config.pity_threshold, cost, lucky);
        self.state.pity = resolved.pity;
        log::debug!(
            "draw cost {cost}: {:?}, pity {}, balance {}",
            resolved.outcome,
            self.state.pity,
            self.state.balance
        );
        self.notify(Notice::Resolved(resolved.outcome));
        events.push(Event::DrawResolved {
            outcome: resolved.outcome,
            cost,
            pity: self.state.pity,
            balance: self.state.balance,
        });
        resolved.outcome.is_win()
    }

    pub fn draw_one(&mut self, events: &mut EventBus) -> u32 {
        self.single_draw(DrawKind::Standard, events)
    }

    pub fn mini_draw(&mut self, events: &mut EventBus) -> u32 {
        self.single_draw(DrawKind::Mini, events)
    }

    /// Buys a prize outright. Never reads or writes the pity accumulator.
    pub fn guaranteed_purchase(&mut self, events: &mut EventBus) -> u32 {
        let Ok(cost) = self.admit(DrawKind::GuaranteedPurchase, events) else {
            return 0;
        };
        self.state.balance -= cost;
        log::info!("guaranteed purchase for {cost}, balance {}", self.state.balance);
        self.notify(Notice::GuaranteedPurchased { cost });
        events.push(Event::GuaranteedPurchased {
            cost,
            balance: self.state.balance,
        });
        self.release();
        1
    }

    pub fn draw(&mut self, kind: DrawKind, events: &mut EventBus) -> u32 {
        match kind {
            DrawKind::Standard => self.draw_one(events),
            DrawKind::Mini => self.mini_draw(events),
            DrawKind::Batch => self.draw_ten(events),
            DrawKind::GuaranteedPurchase => self.guaranteed_purchase(events),
        }
    }

    fn single_draw(&mut self, kind: DrawKind, events: &mut EventBus) -> u32 {
        let Some(rule) = self.config.rule_for(kind) else {
            return 0;
        };
        let Ok(cost) = self.admit(kind, events) else {
            return 0;
        };
        self.notify(Notice::DrawStarted { kind, cost });
        let won = self.perform_draw(cost, rule.probability, events);
        self.release();
        u32::from(won)
    }
}
