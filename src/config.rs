//! Runner configuration loaded from `intermission.toml`.
//!
//! Missing file or missing keys fall back to defaults. An explicitly requested
//! file that cannot be read or parsed is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::core::{IntermissionConfig, LevelEntry, LevelTable};
use crate::types::{
    LevelId, DEFAULT_COUNT_STEP, DEFAULT_DEMO_WAIT_TICKS, DEFAULT_FRAG_STEP,
    DEFAULT_MIN_COUNT_TICKS, DEFAULT_PROMPT_BLINK_TICKS, DEFAULT_TALLY_CUE_INTERVAL,
    DEFAULT_TIME_STEP_SECS,
};

pub const CONFIG_FILE_NAME: &str = "intermission.toml";

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    pub intermission: IntermissionConfig,
    pub display: DisplayConfig,
    pub levels: LevelTable,
    /// JSON-lines file receiving one summary per finished intermission.
    pub stats_log: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Ring the terminal bell for cues.
    pub bell: bool,
    /// Redraw interval once nothing animates, in milliseconds.
    pub static_redraw_ms: u64,
    pub key_release_timeout_ms: u32,
}

// ── TOML schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    tally: TomlTally,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default = "default_levels")]
    levels: Vec<TomlLevel>,
    #[serde(default)]
    output: TomlOutput,
}

#[derive(Deserialize, Debug)]
struct TomlTally {
    #[serde(default = "default_count_step")]
    count_step: u32,
    #[serde(default = "default_time_step_secs")]
    time_step_secs: u32,
    #[serde(default = "default_frag_step")]
    frag_step: u32,
    #[serde(default = "default_min_count_ticks")]
    min_count_ticks: u32,
    #[serde(default = "default_demo_wait_ticks")]
    demo_wait_ticks: u32,
    /// Absent means wait for input forever.
    #[serde(default)]
    idle_timeout_ticks: Option<u32>,
    #[serde(default = "default_tally_cue_interval")]
    tally_cue_interval: u32,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_prompt_blink_ticks")]
    prompt_blink_ticks: u32,
    #[serde(default = "default_bell")]
    bell: bool,
    #[serde(default = "default_static_redraw_ms")]
    static_redraw_ms: u64,
    #[serde(default = "default_key_release_timeout_ms")]
    key_release_timeout_ms: u32,
}

#[derive(Deserialize, Debug, Clone)]
struct TomlLevel {
    id: u16,
    name: String,
    #[serde(default)]
    par: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlOutput {
    #[serde(default)]
    stats_log: Option<PathBuf>,
}

// ── Defaults ──

fn default_count_step() -> u32 { DEFAULT_COUNT_STEP }
fn default_time_step_secs() -> u32 { DEFAULT_TIME_STEP_SECS }
fn default_frag_step() -> u32 { DEFAULT_FRAG_STEP }
fn default_min_count_ticks() -> u32 { DEFAULT_MIN_COUNT_TICKS }
fn default_demo_wait_ticks() -> u32 { DEFAULT_DEMO_WAIT_TICKS }
fn default_tally_cue_interval() -> u32 { DEFAULT_TALLY_CUE_INTERVAL }
fn default_prompt_blink_ticks() -> u32 { DEFAULT_PROMPT_BLINK_TICKS }
fn default_bell() -> bool { true }
fn default_static_redraw_ms() -> u64 { 250 }
fn default_key_release_timeout_ms() -> u32 { 150 }

fn default_levels() -> Vec<TomlLevel> {
    [
        (1, "Staging Area", 30),
        (2, "The Terraformer", 90),
        (3, "Main Engineering", 120),
        (4, "Holding Area", 120),
        (5, "Tech Center", 90),
        (6, "Alpha Quadrant", 150),
        (7, "Research Lab", 180),
        (8, "Final Outpost", 180),
    ]
    .into_iter()
    .map(|(id, name, par)| TomlLevel {
        id,
        name: name.into(),
        par: Some(par),
    })
    .collect()
}

impl Default for TomlTally {
    fn default() -> Self {
        TomlTally {
            count_step: default_count_step(),
            time_step_secs: default_time_step_secs(),
            frag_step: default_frag_step(),
            min_count_ticks: default_min_count_ticks(),
            demo_wait_ticks: default_demo_wait_ticks(),
            idle_timeout_ticks: None,
            tally_cue_interval: default_tally_cue_interval(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            prompt_blink_ticks: default_prompt_blink_ticks(),
            bell: default_bell(),
            static_redraw_ms: default_static_redraw_ms(),
            key_release_timeout_ms: default_key_release_timeout_ms(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from(TomlConfig {
            levels: default_levels(),
            ..TomlConfig::default()
        })
    }
}

impl From<TomlConfig> for RunnerConfig {
    fn from(cfg: TomlConfig) -> Self {
        let mut levels = LevelTable::new();
        for level in cfg.levels {
            levels.insert(LevelEntry {
                id: LevelId(level.id),
                name: level.name,
                par_seconds: level.par,
            });
        }
        RunnerConfig {
            intermission: IntermissionConfig {
                count_step: cfg.tally.count_step,
                time_step_secs: cfg.tally.time_step_secs,
                frag_step: cfg.tally.frag_step,
                min_count_ticks: cfg.tally.min_count_ticks,
                demo_wait_ticks: cfg.tally.demo_wait_ticks,
                idle_timeout_ticks: cfg.tally.idle_timeout_ticks,
                tally_cue_interval: cfg.tally.tally_cue_interval,
                prompt_blink_ticks: cfg.display.prompt_blink_ticks,
            },
            display: DisplayConfig {
                bell: cfg.display.bell,
                static_redraw_ms: cfg.display.static_redraw_ms,
                key_release_timeout_ms: cfg.display.key_release_timeout_ms,
            },
            levels,
            stats_log: cfg.output.stats_log,
        }
    }
}

// ── Loading ──

impl RunnerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: TomlConfig = toml::from_str(text).context("invalid intermission config")?;
        Ok(Self::from(cfg))
    }

    /// Load `path`, or `intermission.toml` from the working directory when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("could not read {}", path.display()))?;
                let cfg = Self::from_toml_str(&text)
                    .with_context(|| format!("in {}", path.display()))?;
                info!(path = %path.display(), levels = cfg.levels.len(), "config loaded");
                Ok(cfg)
            }
            None => Ok(Self::load_default_location()),
        }
    }

    fn load_default_location() -> Self {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };
        match Self::from_toml_str(&text) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{e:#}"), "config parse error, using defaults");
                Self::default()
            }
        }
    }
}
