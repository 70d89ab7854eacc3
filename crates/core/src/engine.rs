use crate::{
    ConfigError, DrawKind, EngineState, Event, EventBus, Locale, MachineConfig, MessageLog, Notice,
    Rejection, RngState, Sampler, Snapshot,
};

mod batch;
mod draw;
mod funds;

#[derive(Debug)]
pub struct DrawEngine {
    config: MachineConfig,
    locale: Locale,
    state: EngineState,
    sampler: Box<dyn Sampler>,
}

impl DrawEngine {
    pub fn new(config: MachineConfig, sampler: Box<dyn Sampler>) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = EngineState::new(config.log_capacity);
        Ok(Self {
            config,
            locale: Locale::default(),
            state,
            sampler,
        })
    }

    pub fn with_seed(config: MachineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Box::new(RngState::from_seed(seed)))
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.config)
    }

    pub fn balance(&self) -> u64 {
        self.state.balance
    }

    pub fn pity(&self) -> u64 {
        self.state.pity
    }

    pub fn messages(&self) -> Vec<String> {
        self.state.log.to_vec()
    }

    pub fn log(&self) -> &MessageLog {
        &self.state.log
    }

    pub fn is_drawing(&self) -> bool {
        self.state.draw_in_progress
    }

    /// Whether a trigger for `kind` should be enabled right now.
    pub fn can_afford(&self, kind: DrawKind) -> bool {
        !self.state.draw_in_progress && self.state.balance >= self.config.cost_of(kind)
    }

    /// Appends a presentation-layer message to the log.
    pub fn post_message(&mut self, message: impl Into<String>) {
        self.state.log.push(message);
    }

    fn notify(&mut self, notice: Notice) {
        self.state.log.push(notice.render(self.locale));
    }

    /// Checks the guard and the balance for `kind`, and takes the guard on
    /// success. Busy calls are dropped without a log entry.
    fn admit(&mut self, kind: DrawKind, events: &mut EventBus) -> Result<u64, Rejection> {
        let cost = self.config.cost_of(kind);
        if self.state.draw_in_progress {
            log::warn!("{kind:?} draw ignored: another draw is resolving");
            events.push(Event::DrawRejected {
                kind,
                reason: Rejection::Busy,
            });
            return Err(Rejection::Busy);
        }
        if self.state.balance < cost {
            let reason = Rejection::InsufficientFunds {
                cost,
                balance: self.state.balance,
            };
            log::warn!(
                "{kind:?} draw rejected: balance {} below cost {cost}",
                self.state.balance
            );
            self.notify(Notice::InsufficientFunds { cost });
            events.push(Event::DrawRejected { kind, reason });
            return Err(reason);
        }
        self.state.draw_in_progress = true;
        Ok(cost)
    }

    fn release(&mut self) {
        self.state.draw_in_progress = false;
    }

    fn sample(&mut self) -> f64 {
        self.sampler.next_unit()
    }
}
