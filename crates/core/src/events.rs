use crate::{DrawKind, Outcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Rejection {
    InsufficientFunds { cost: u64, balance: u64 },
    Busy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    FundsInserted {
        amount: u64,
        balance: u64,
    },
    ChangeReturned {
        amount: u64,
    },
    NothingToReturn,
    DrawRejected {
        kind: DrawKind,
        reason: Rejection,
    },
    DrawResolved {
        outcome: Outcome,
        cost: u64,
        pity: u64,
        balance: u64,
    },
    BatchRoundResolved {
        round: u32,
        outcome: Outcome,
        pity: u64,
    },
    BatchCompleted {
        rounds: u32,
        wins: u32,
        cost: u64,
        pity: u64,
        balance: u64,
    },
    GuaranteedPurchased {
        cost: u64,
        balance: u64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
