use serde::{Deserialize, Serialize};
use std::path::Path;

//what append does when a timestamp goes backwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChronologyCheck {
    //log a warning and append anyway
    #[default]
    Warn,
    //append silently
    Ignore,
}

impl ChronologyCheck {
    //parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "warn" => Some(ChronologyCheck::Warn),
            "ignore" | "off" => Some(ChronologyCheck::Ignore),
            _ => None,
        }
    }
}

//options for an equity series
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    //observations to reserve up front (eg number of bars in the run)
    pub initial_capacity: usize,

    //out-of-order timestamp handling
    pub chronology: ChronologyCheck,
}

impl SeriesConfig {
    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SeriesConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
