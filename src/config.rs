use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "farmstead.ron";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub starting_money: i64,
    pub win_threshold: i64,
    pub acre_cost: i64,
    pub acre_increment: f64,
    pub assets_per_acre: usize,
    pub farmer_hire_cost: i64,
    pub farmer_wage: i64,
    pub initial_assets: usize,
    pub initial_farmers: usize,
    pub disease_chance: f64,
    pub diseased_death_chance: f64,
    pub vet_mitigation: f64,
    pub stall_tolerance_days: u32,
    pub max_days: u32,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_money: 5_000,
            win_threshold: 100_000,
            acre_cost: 2_500,
            acre_increment: 1.0,
            assets_per_acre: 12,
            farmer_hire_cost: 300,
            farmer_wage: 15,
            initial_assets: 4,
            initial_farmers: 3,
            disease_chance: 0.03,
            diseased_death_chance: 0.25,
            vet_mitigation: 0.25,
            stall_tolerance_days: 30,
            max_days: 3_650,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: SimConfig = ron::from_str(&content)?;
                config.validate()?;
                Ok(Some(config))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("starting_money", self.starting_money),
            ("win_threshold", self.win_threshold),
            ("acre_cost", self.acre_cost),
            ("farmer_hire_cost", self.farmer_hire_cost),
            ("farmer_wage", self.farmer_wage),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("disease_chance", self.disease_chance),
            ("diseased_death_chance", self.diseased_death_chance),
            ("vet_mitigation", self.vet_mitigation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { field, value });
            }
        }
        if self.starting_money >= self.win_threshold {
            return Err(ConfigError::WonAtStart {
                starting_money: self.starting_money,
                win_threshold: self.win_threshold,
            });
        }
        if self.assets_per_acre == 0 {
            return Err(ConfigError::NoCapacity);
        }
        if self.acre_increment <= 0.0 {
            return Err(ConfigError::EmptyAcre);
        }
        if self.stall_tolerance_days == 0 {
            return Err(ConfigError::ZeroStallTolerance);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },
    #[error("{field} must lie in [0, 1] (got {value})")]
    NotAProbability { field: &'static str, value: f64 },
    #[error("starting_money {starting_money} already meets win_threshold {win_threshold}")]
    WonAtStart {
        starting_money: i64,
        win_threshold: i64,
    },
    #[error("assets_per_acre must be at least 1")]
    NoCapacity,
    #[error("acre_increment must be positive")]
    EmptyAcre,
    #[error("stall_tolerance_days must be at least 1")]
    ZeroStallTolerance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default()
            .validate()
            .expect("defaults should validate");
    }

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config: SimConfig =
            ron::from_str("(win_threshold: 20000, seed: Some(9))").expect("parses");
        assert_eq!(config.win_threshold, 20_000);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.starting_money, SimConfig::default().starting_money);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let config = SimConfig {
            disease_chance: 1.5,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotAProbability {
                field: "disease_chance",
                ..
            })
        ));

        let config = SimConfig {
            farmer_wage: -1,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "farmer_wage", value: -1 })
        ));

        let config = SimConfig {
            stall_tolerance_days: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStallTolerance));
    }

    #[test]
    fn validation_rejects_a_run_already_won() {
        let config = SimConfig {
            starting_money: 20_000,
            win_threshold: 20_000,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::WonAtStart {
                starting_money: 20_000,
                win_threshold: 20_000
            })
        );

        let config = SimConfig {
            starting_money: 19_999,
            win_threshold: 20_000,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn load_rejects_a_run_already_won() {
        let path = std::env::temp_dir().join(format!("farmstead-won-{}.ron", std::process::id()));
        fs::write(&path, "(starting_money: 500, win_threshold: 100)").expect("temp file");
        let loaded = SimConfig::load(&path);
        fs::remove_file(&path).expect("cleanup");
        let err = loaded.expect_err("config should be rejected");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::WonAtStart { .. })
        ));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = SimConfig::load("definitely/not/here/farmstead.ron").expect("no io error");
        assert!(loaded.is_none());
    }
}
