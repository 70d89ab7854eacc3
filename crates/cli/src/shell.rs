use gacha_core::{DrawEngine, DrawKind, EventBus, Locale};
use gacha_data::PrizeCatalog;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(u64),
    Return,
    Draw(DrawKind),
    Select(String),
    Prizes,
    Status { json: bool },
    Log,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = parts.collect();
        let command = match head.to_ascii_lowercase().as_str() {
            "insert" | "i" | "coin" => {
                let raw = rest.first().ok_or("usage: insert <amount>")?;
                let amount = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid amount: {raw}"))?;
                Self::Insert(amount)
            }
            "return" | "r" | "change" => Self::Return,
            "draw" | "d" | "1" => Self::Draw(DrawKind::Standard),
            "ten" | "t" | "10" => Self::Draw(DrawKind::Batch),
            "mini" | "m" => Self::Draw(DrawKind::Mini),
            "buy" | "b" => Self::Draw(DrawKind::GuaranteedPurchase),
            "select" | "s" => {
                if rest.is_empty() {
                    return Err("usage: select <prize>".to_string());
                }
                Self::Select(rest.join(" "))
            }
            "prizes" | "p" => Self::Prizes,
            "status" | "st" => Self::Status {
                json: rest.iter().any(|arg| *arg == "--json"),
            },
            "log" | "l" => Self::Log,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(Some(command))
    }
}

/// Interactive presentation layer. Owns all view state; the engine is only
/// reached through its operations and snapshot.
#[derive(Debug)]
pub struct Shell {
    pub engine: DrawEngine,
    pub events: EventBus,
    pub catalog: PrizeCatalog,
    pub selected: Option<usize>,
    pub won: Vec<String>,
    locale: Locale,
    delay: Duration,
}

impl Shell {
    pub fn new(engine: DrawEngine, catalog: PrizeCatalog, delay: Duration) -> Self {
        let locale = engine.locale();
        Self {
            engine,
            events: EventBus::default(),
            catalog,
            selected: None,
            won: Vec::new(),
            locale,
            delay,
        }
    }

    pub fn execute(&mut self, line: &str) -> Result<(Flow, Vec<String>), String> {
        let Some(command) = Command::parse(line)? else {
            return Ok((Flow::Continue, Vec::new()));
        };
        let mut out = Vec::new();
        match command {
            Command::Insert(amount) => match self.engine.config().denomination(amount) {
                Some(coin) => {
                    self.engine.insert_denomination(coin, &mut self.events);
                    out.extend(self.render_latest(1));
                }
                None => {
                    let accepted = self
                        .engine
                        .config()
                        .denominations
                        .iter()
                        .map(u64::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(format!(
                        "{} {accepted}",
                        self.locale.text("accepted amounts:", "사용 가능한 금액:")
                    ));
                }
            },
            Command::Return => {
                self.engine.return_change(&mut self.events);
                out.extend(self.render_latest(1));
            }
            Command::Draw(kind) => out.extend(self.run_draw(kind)),
            Command::Select(key) => match self.catalog.find(&key) {
                Some(prize) => {
                    let index = self
                        .catalog
                        .prizes
                        .iter()
                        .position(|item| item.id == prize.id);
                    let name = prize.name_for(self.locale.code()).to_string();
                    self.selected = index;
                    self.won.clear();
                    out.push(format!("{} {name}", self.locale.text("selected:", "선택:")));
                }
                None => return Err(format!("unknown prize: {key}")),
            },
            Command::Prizes => out.extend(self.render_prizes()),
            Command::Status { json } => {
                if json {
                    let body = serde_json::to_string_pretty(&self.engine.snapshot())
                        .map_err(|err| err.to_string())?;
                    out.push(body);
                } else {
                    out.extend(self.render_status());
                }
            }
            Command::Log => out.extend(self.render_latest(usize::MAX)),
            Command::Help => out.extend(help_lines(self.locale)),
            Command::Quit => return Ok((Flow::Quit, out)),
        }
        let drained = self.events.drain().count();
        log::debug!("drained {drained} engine events");
        Ok((Flow::Continue, out))
    }

    fn run_draw(&mut self, kind: DrawKind) -> Vec<String> {
        let code = self.locale.code();
        let Some(name) = self
            .selected
            .and_then(|idx| self.catalog.prizes.get(idx))
            .map(|prize| prize.name_for(code).to_string())
        else {
            self.engine.post_message(
                self.locale
                    .text("Select a drink first!", "먼저 음료를 선택해주세요!"),
            );
            return self.render_latest(1);
        };
        self.won.clear();
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let before = self.engine.log().total_pushed();
        let wins = self.engine.draw(kind, &mut self.events);
        self.won = vec![name.clone(); wins as usize];
        let fresh = self.engine.log().total_pushed() - before;
        let mut lines = self.render_latest(fresh as usize);
        lines.reverse();
        if wins > 0 {
            lines.push(format!(
                "{} {name} x{wins}",
                self.locale.text("dispensed:", "배출:")
            ));
        }
        lines
    }

    fn render_latest(&self, count: usize) -> Vec<String> {
        self.engine
            .log()
            .iter()
            .take(count)
            .map(str::to_string)
            .collect()
    }

    fn render_prizes(&self) -> Vec<String> {
        self.catalog
            .prizes
            .iter()
            .enumerate()
            .map(|(idx, prize)| {
                let marker = if self.selected == Some(idx) { "*" } else { " " };
                format!(
                    "{marker} {}. {} ({})",
                    idx + 1,
                    prize.name_for(self.locale.code()),
                    prize.id
                )
            })
            .collect()
    }

    pub fn render_status(&self) -> Vec<String> {
        let snapshot = self.engine.snapshot();
        let locale = self.locale;
        let mut lines = vec![
            format!("{} {}", locale.text("balance:", "현재 금액:"), snapshot.balance),
            format!(
                "{} {} / {}",
                locale.text("pity:", "꽝 누적 금액:"),
                snapshot.pity,
                snapshot.pity_threshold
            ),
        ];
        let triggers = [
            ("draw", DrawKind::Standard, snapshot.standard_cost),
            ("ten", DrawKind::Batch, snapshot.batch_cost),
            ("mini", DrawKind::Mini, snapshot.mini_cost),
            ("buy", DrawKind::GuaranteedPurchase, snapshot.guaranteed_cost),
        ];
        let enabled = triggers
            .iter()
            .map(|(label, kind, cost)| {
                let mark = if self.engine.can_afford(*kind) { "+" } else { "-" };
                format!("{mark}{label}({cost})")
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(enabled);
        if let Some(prize) = self.selected.and_then(|idx| self.catalog.prizes.get(idx)) {
            lines.push(format!(
                "{} {}",
                locale.text("selected:", "선택:"),
                prize.name_for(locale.code())
            ));
        }
        lines
    }
}

fn help_lines(locale: Locale) -> Vec<String> {
    let rows: [(&str, &str, &str); 11] = [
        ("insert <amount>", "insert money", "돈 넣기"),
        ("return", "return change", "잔액 반환"),
        ("select <prize>", "choose a drink", "음료 선택"),
        ("draw", "single draw", "1회 뽑기"),
        ("ten", "ten draws", "10회 뽑기"),
        ("mini", "mini draw", "미니 뽑기"),
        ("buy", "guaranteed purchase", "확정 구매"),
        ("prizes", "list drinks", "음료 목록"),
        ("status [--json]", "show machine state", "상태 보기"),
        ("log", "show messages", "메시지 보기"),
        ("quit", "leave", "종료"),
    ];
    rows.iter()
        .map(|(cmd, en, ko)| format!("  {cmd:<18} {}", locale.text(en, ko)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{FixedSampler, MachineConfig};

    fn shell(sample: f64) -> Shell {
        let engine = DrawEngine::new(MachineConfig::default(), Box::new(FixedSampler(sample)))
            .expect("engine");
        Shell::new(engine, PrizeCatalog::builtin(), Duration::ZERO)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("insert 500"), Ok(Some(Command::Insert(500))));
        assert_eq!(
            Command::parse("10"),
            Ok(Some(Command::Draw(DrawKind::Batch)))
        );
        assert_eq!(
            Command::parse("status --json"),
            Ok(Some(Command::Status { json: true }))
        );
        assert_eq!(Command::parse("   "), Ok(None));
        assert!(Command::parse("insert ten").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn rejects_unknown_denomination() {
        let mut shell = shell(1.0);
        let err = shell.execute("insert 20").expect_err("not a coin");
        assert!(err.contains("10, 50, 100"));
        assert_eq!(shell.engine.balance(), 0);
    }

    #[test]
    fn draw_requires_selection() {
        let mut shell = shell(0.0);
        shell.execute("insert 1000").expect("insert");
        let (_, out) = shell.execute("draw").expect("draw");
        assert_eq!(out, vec!["Select a drink first!".to_string()]);
        assert_eq!(shell.engine.balance(), 1000);
    }

    #[test]
    fn winning_draw_dispenses_selected_prize() {
        let mut shell = shell(0.0);
        shell.execute("insert 100").expect("insert");
        shell.execute("select juice").expect("select");
        let (flow, out) = shell.execute("draw").expect("draw");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(shell.won, vec!["Juice".to_string()]);
        assert_eq!(out.last().map(String::as_str), Some("dispensed: Juice x1"));
        assert_eq!(shell.engine.balance(), 0);
    }

    #[test]
    fn losing_batch_dispenses_nothing() {
        let mut shell = shell(1.0);
        shell.execute("insert 1000").expect("insert");
        shell.execute("select 2").expect("select");
        let (_, out) = shell.execute("ten").expect("ten");
        assert!(shell.won.is_empty());
        assert_eq!(
            out.last().map(String::as_str),
            Some("--- 10-draw result: 0 won! ---")
        );
        assert_eq!(shell.engine.pity(), 1000);
    }

    #[test]
    fn status_marks_affordable_triggers() {
        let mut shell = shell(1.0);
        shell.execute("insert 1000").expect("insert");
        let lines = shell.render_status();
        assert_eq!(lines[0], "balance: 1000");
        assert_eq!(lines[2], "+draw(100) +ten(1000) +mini(10) -buy(2000)");
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut shell = shell(1.0);
        let (flow, _) = shell.execute("quit").expect("quit");
        assert_eq!(flow, Flow::Quit);
    }
}
