use crate::schema::{MachineConfig, PrizeCatalog};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const MACHINE_FILE: &str = "machine.json";
pub const PRIZES_FILE: &str = "prizes.json";

pub fn load_machine_config(dir: &Path) -> anyhow::Result<MachineConfig> {
    let path = dir.join(MACHINE_FILE);
    let config: MachineConfig = load_json(&path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn load_prize_catalog(dir: &Path) -> anyhow::Result<PrizeCatalog> {
    let path = dir.join(PRIZES_FILE);
    let catalog: PrizeCatalog = load_json(&path)?;
    validate_catalog(&catalog).with_context(|| format!("validate {}", path.display()))?;
    Ok(catalog)
}

/// Loads both asset files, falling back to built-in defaults when the asset
/// directory itself is missing.
pub fn load_assets_or_default(dir: &Path) -> anyhow::Result<(MachineConfig, PrizeCatalog)> {
    if !dir.is_dir() {
        log::warn!(
            "asset directory {} not found, using built-in machine settings",
            dir.display()
        );
        return Ok((MachineConfig::default(), PrizeCatalog::builtin()));
    }
    let config = if dir.join(MACHINE_FILE).exists() {
        load_machine_config(dir)?
    } else {
        MachineConfig::default()
    };
    let catalog = if dir.join(PRIZES_FILE).exists() {
        load_prize_catalog(dir)?
    } else {
        PrizeCatalog::builtin()
    };
    Ok((config, catalog))
}

fn validate_catalog(catalog: &PrizeCatalog) -> anyhow::Result<()> {
    if catalog.is_empty() {
        bail!("prize catalog is empty");
    }
    let mut seen = HashSet::new();
    for prize in &catalog.prizes {
        if prize.id.trim().is_empty() {
            bail!("prize with empty id");
        }
        if !seen.insert(prize.id.as_str()) {
            bail!("duplicate prize id {}", prize.id);
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "gacha_data_test_{}_{}",
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn loads_machine_config_from_dir() {
        let dir = unique_temp_dir();
        let body = r#"{
  "standard": {"cost": 100, "probability": 0.077},
  "mini": {"cost": 10, "probability": 0.008},
  "guaranteed_cost": 2000,
  "pity_threshold": 900
}"#;
        fs::write(dir.join(MACHINE_FILE), body).expect("write");
        let config = load_machine_config(&dir).expect("load");
        assert_eq!(config.pity_threshold, 900);
        assert_eq!(config.batch_cost(), 1000);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn invalid_machine_config_names_the_file() {
        let dir = unique_temp_dir();
        let body = r#"{
  "standard": {"cost": 100, "probability": 2.0},
  "mini": {"cost": 10, "probability": 0.008},
  "guaranteed_cost": 2000,
  "pity_threshold": 2000
}"#;
        fs::write(dir.join(MACHINE_FILE), body).expect("write");
        let err = load_machine_config(&dir).expect_err("probability must be checked");
        assert!(err.to_string().contains(MACHINE_FILE));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = unique_temp_dir();
        let err = load_prize_catalog(&dir).expect_err("no prizes file");
        assert!(err.to_string().starts_with("read "));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_duplicate_prize_ids() {
        let dir = unique_temp_dir();
        let body = r#"{"prizes":[
  {"id":"coke","display_name":"Coke"},
  {"id":"coke","display_name":"Cola"}
]}"#;
        fs::write(dir.join(PRIZES_FILE), body).expect("write");
        let err = load_prize_catalog(&dir).expect_err("duplicate");
        assert!(format!("{err:#}").contains("duplicate prize id coke"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_asset_dir_falls_back_to_builtin() {
        let dir = std::env::temp_dir().join("gacha_data_test_does_not_exist");
        let (config, catalog) = load_assets_or_default(&dir).expect("fallback");
        assert_eq!(config, MachineConfig::default());
        assert_eq!(catalog.prizes.len(), 3);
    }

    #[test]
    fn finds_prizes_by_name_or_position() {
        let catalog = PrizeCatalog::builtin();
        assert_eq!(catalog.find("soda").map(|p| p.id.as_str()), Some("soda"));
        assert_eq!(catalog.find("JUICE").map(|p| p.id.as_str()), Some("juice"));
        assert_eq!(catalog.find("1").map(|p| p.id.as_str()), Some("coke"));
        assert_eq!(catalog.find("콜라").map(|p| p.id.as_str()), Some("coke"));
        assert!(catalog.find("0").is_none());
        assert!(catalog.find("tea").is_none());
        let coke = catalog.find("coke").expect("coke");
        assert_eq!(coke.name_for("ko_KR"), "콜라");
        assert_eq!(coke.name_for("en_US"), "Coke");
    }
}
