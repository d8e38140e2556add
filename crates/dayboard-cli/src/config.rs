use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path of the JSON data file holding the task board.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Extra weeks of rows fetched around agenda windows, mirroring how
    /// the board preloads context for fast day-to-day paging.
    #[serde(default = "default_padding_weeks")]
    pub padding_weeks: u32,

    /// Skip confirmation prompts everywhere (same as `--yes`/`--force`).
    #[serde(default)]
    pub assume_yes: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("dayboard.json")
}

fn default_padding_weeks() -> u32 {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            padding_weeks: default_padding_weeks(),
            assume_yes: false,
        }
    }
}

impl Config {
    /// Loads configuration from `dayboard.toml` in the working directory,
    /// then lets `DAYBOARD_*` environment variables override it.
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("dayboard.toml"))
            .merge(Env::prefixed("DAYBOARD_"))
            .extract()
    }
}
