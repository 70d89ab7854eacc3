use super::*;
use crate::Denomination;

impl DrawEngine {
    /// Adds `amount` to the balance. A zero amount is ignored.
    pub fn insert_funds(&mut self, amount: u64, events: &mut EventBus) {
        if amount == 0 {
            log::warn!("ignoring zero insert");
            return;
        }
        self.state.balance = self.state.balance.saturating_add(amount);
        log::info!("inserted {amount}, balance {}", self.state.balance);
        self.notify(Notice::FundsInserted { amount });
        events.push(Event::FundsInserted {
            amount,
            balance: self.state.balance,
        });
    }

    pub fn insert_denomination(&mut self, denomination: Denomination, events: &mut EventBus) {
        self.insert_funds(denomination.amount(), events);
    }

    /// Returns the whole balance. Does nothing while a draw is resolving and
    /// never touches the pity accumulator.
    pub fn return_change(&mut self, events: &mut EventBus) -> u64 {
        if self.state.draw_in_progress {
            log::warn!("change return ignored: draw in progress");
            return 0;
        }
        let amount = self.state.balance;
        if amount == 0 {
            self.notify(Notice::NothingToReturn);
            events.push(Event::NothingToReturn);
            return 0;
        }
        self.state.balance = 0;
        log::info!("returned {amount}");
        self.notify(Notice::ChangeReturned { amount });
        events.push(Event::ChangeReturned { amount });
        amount
    }
}
