use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use gacha_core::{DrawRule, MachineConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeDef {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub names: HashMap<String, String>,
    #[serde(default)]
    pub color: String,
}

impl PrizeDef {
    pub fn name_for(&self, locale_code: &str) -> &str {
        self.names
            .get(locale_code)
            .map(String::as_str)
            .unwrap_or(&self.display_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeCatalog {
    pub prizes: Vec<PrizeDef>,
}

impl PrizeCatalog {
    pub fn builtin() -> Self {
        let prize = |id: &str, name: &str, ko: &str, color: &str| PrizeDef {
            id: id.to_string(),
            display_name: name.to_string(),
            names: HashMap::from([("ko_KR".to_string(), ko.to_string())]),
            color: color.to_string(),
        };
        Self {
            prizes: vec![
                prize("coke", "Coke", "콜라", "#e63946"),
                prize("soda", "Soda", "사이다", "#a8dadc"),
                prize("juice", "Juice", "주스", "#fca311"),
            ],
        }
    }

    /// Looks a prize up by id, display name or 1-based position.
    pub fn find(&self, key: &str) -> Option<&PrizeDef> {
        let key = key.trim();
        if let Ok(position) = key.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.prizes.get(index));
        }
        self.prizes.iter().find(|prize| {
            prize.id.eq_ignore_ascii_case(key)
                || prize.display_name.eq_ignore_ascii_case(key)
                || prize.names.values().any(|name| name == key)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }
}
