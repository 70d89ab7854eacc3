use crate::{DrawKind, Outcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Locale {
    #[default]
    EnUs,
    KoKr,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::KoKr => "ko_KR",
        }
    }

    /// Maps a locale code to a supported locale; unknown codes fall back to English.
    pub fn from_code(value: &str) -> Self {
        let lowered = value.trim().replace('-', "_").to_ascii_lowercase();
        match lowered.as_str() {
            "ko" | "ko_kr" | "kr" => Self::KoKr,
            _ => Self::EnUs,
        }
    }

    pub fn text<'a>(self, en: &'a str, ko: &'a str) -> &'a str {
        if matches!(self, Self::KoKr) {
            ko
        } else {
            en
        }
    }
}

/// A message-log entry before it is rendered for a locale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    FundsInserted { amount: u64 },
    ChangeReturned { amount: u64 },
    NothingToReturn,
    InsufficientFunds { cost: u64 },
    DrawStarted { kind: DrawKind, cost: u64 },
    BatchStarted { rounds: u32 },
    Resolved(Outcome),
    BatchRound { round: u32, rounds: u32, outcome: Outcome },
    BatchSummary { rounds: u32, wins: u32 },
    GuaranteedPurchased { cost: u64 },
}

impl Notice {
    pub fn render(&self, locale: Locale) -> String {
        match *self {
            Notice::FundsInserted { amount } => match locale {
                Locale::EnUs => format!("Inserted {amount}."),
                Locale::KoKr => format!("{amount}원이 투입되었습니다."),
            },
            Notice::ChangeReturned { amount } => match locale {
                Locale::EnUs => format!("Returned {amount}."),
                Locale::KoKr => format!("{amount}원이 반환되었습니다."),
            },
            Notice::NothingToReturn => {
                locale.text("Nothing to return.", "반환할 금액이 없습니다.").to_string()
            }
            Notice::InsufficientFunds { cost } => match locale {
                Locale::EnUs => format!("Not enough money. {cost} is required."),
                Locale::KoKr => format!("금액이 부족합니다. {cost}원이 필요합니다."),
            },
            Notice::DrawStarted { kind, cost } => match (locale, kind) {
                (Locale::EnUs, DrawKind::Mini) => format!("Spending {cost} on a mini draw..."),
                (Locale::EnUs, _) => format!("Spending {cost} on a draw..."),
                (Locale::KoKr, DrawKind::Mini) => {
                    format!("{cost}원을 사용하여 미니 뽑기를 진행합니다...")
                }
                (Locale::KoKr, _) => format!("{cost}원을 사용하여 뽑기를 진행합니다..."),
            },
            Notice::BatchStarted { rounds } => match locale {
                Locale::EnUs => format!("--- Starting a {rounds}-draw batch! ---"),
                Locale::KoKr => format!("--- {rounds}연차 뽑기를 시작합니다! ---"),
            },
            Notice::Resolved(outcome) => outcome_text(outcome, locale).to_string(),
            Notice::BatchRound {
                round,
                rounds,
                outcome,
            } => format!("[{round}/{rounds}] {}", outcome_text(outcome, locale)),
            Notice::BatchSummary { rounds, wins } => match locale {
                Locale::EnUs => format!("--- {rounds}-draw result: {wins} won! ---"),
                Locale::KoKr => format!("--- {rounds}연차 결과: 총 {wins}개 당첨! ---"),
            },
            Notice::GuaranteedPurchased { cost } => match locale {
                Locale::EnUs => format!("✨ Bought a guaranteed drink for {cost}. ✨"),
                Locale::KoKr => format!("✨ {cost}원을 사용하여 확정 음료를 구매합니다. ✨"),
            },
        }
    }
}

fn outcome_text(outcome: Outcome, locale: Locale) -> &'static str {
    match outcome {
        Outcome::LuckyWin {
            consumed_pity: false,
        } => locale.text(
            "🎉 Congratulations! You won a drink! 🎉",
            "🎉 축하합니다! 음료수에 당첨되었습니다! 🎉",
        ),
        Outcome::LuckyWin {
            consumed_pity: true,
        } => locale.text(
            "🎉 Congratulations! You won a drink and used one pity charge! 🎉",
            "🎉 축하합니다! 당첨과 함께 천장 1회가 소진되었습니다! 🎉",
        ),
        Outcome::PityWin => locale.text(
            "Pity reached! A guaranteed drink is yours!",
            "천장 도달! 확정 음료에 당첨되었습니다!",
        ),
        Outcome::Loss => locale.text("Not this time... no prize. 😢", "아쉽지만... 꽝입니다. 😢"),
    }
}
