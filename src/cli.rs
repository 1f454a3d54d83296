//! Command line for the intermission runner.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

use crate::core::{CompletedLevelStats, LevelCatalog, PlayerResult, SessionFlags};
use crate::types::{LevelId, NextLevel, Skill, MAX_PLAYERS, TICRATE};

pub const USAGE: &str = "\
usage: intermission [options]

level result:
  --map N              completed map number (default 1)
  --next N|end         next map, or end of episode (default: map + 1 when known)
  --kills N  --items N  --secrets N  --frags N
                       console player counts
  --total-kills N  --total-items N  --total-secrets N
                       level totals (0 hides the percentage)
  --time SECS          level time in seconds
  --tics N             level time in game tics (overrides --time)
  --player K,I,S[,F]   add another in-game player (repeatable)

session:
  --coop | --deathmatch
  --console N          console player slot (default 0)
  --skill 0-4
  --demo               non-interactive: leave after a delay

runner:
  --config PATH        config file (default ./intermission.toml)
  --stats-log PATH     append a JSON summary per level
  --log-dir PATH       directory for the log file (default ./logs)
  --mute               no terminal bell
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextArg {
    /// Follow the catalog: map + 1 when it exists, else end of episode.
    Auto,
    Map(u16),
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Cooperative,
    Deathmatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub map: u16,
    pub next: NextArg,
    pub console: PlayerResult,
    pub others: Vec<PlayerResult>,
    pub totals: (i32, i32, i32),
    pub time_tics: i64,
    pub mode: Mode,
    pub console_player: usize,
    pub skill: Skill,
    pub demo: bool,
    pub config: Option<PathBuf>,
    pub stats_log: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub mute: bool,
    pub help: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            map: 1,
            next: NextArg::Auto,
            console: PlayerResult::new(0, 0, 0),
            others: Vec::new(),
            totals: (0, 0, 0),
            time_tics: 0,
            mode: Mode::Single,
            console_player: 0,
            skill: Skill::default(),
            demo: false,
            config: None,
            stats_log: None,
            log_dir: PathBuf::from("logs"),
            mute: false,
            help: false,
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T> {
    let v = value(args, i, flag)?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

fn parse_player(spec: &str) -> Result<PlayerResult> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        bail!("--player expects K,I,S[,F], got: {}", spec);
    }
    let mut nums = [0i32; 4];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| anyhow!("invalid --player value: {}", spec))?;
    }
    Ok(PlayerResult::new(nums[0], nums[1], nums[2]).with_frags(nums[3]))
}

/// Parse runner arguments (without the program name).
pub fn parse_run_args(args: &[String]) -> Result<RunArgs> {
    let mut out = RunArgs::default();
    let mut time_secs: i64 = 0;
    let mut tics: Option<i64> = None;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => out.help = true,
            "--map" => {
                i += 1;
                out.map = number(args, i, flag)?;
            }
            "--next" => {
                i += 1;
                out.next = match value(args, i, flag)? {
                    "end" => NextArg::End,
                    _ => NextArg::Map(number(args, i, flag)?),
                };
            }
            "--kills" => {
                i += 1;
                out.console.kills = number(args, i, flag)?;
            }
            "--items" => {
                i += 1;
                out.console.items = number(args, i, flag)?;
            }
            "--secrets" => {
                i += 1;
                out.console.secrets = number(args, i, flag)?;
            }
            "--frags" => {
                i += 1;
                out.console.frags = number(args, i, flag)?;
            }
            "--total-kills" => {
                i += 1;
                out.totals.0 = number(args, i, flag)?;
            }
            "--total-items" => {
                i += 1;
                out.totals.1 = number(args, i, flag)?;
            }
            "--total-secrets" => {
                i += 1;
                out.totals.2 = number(args, i, flag)?;
            }
            "--time" => {
                i += 1;
                time_secs = number(args, i, flag)?;
            }
            "--tics" => {
                i += 1;
                tics = Some(number(args, i, flag)?);
            }
            "--player" => {
                i += 1;
                out.others.push(parse_player(value(args, i, flag)?)?);
            }
            "--coop" => out.mode = Mode::Cooperative,
            "--deathmatch" => out.mode = Mode::Deathmatch,
            "--console" => {
                i += 1;
                out.console_player = number(args, i, flag)?;
            }
            "--skill" => {
                i += 1;
                out.skill = Skill::from_index(number(args, i, flag)?);
            }
            "--demo" => out.demo = true,
            "--config" => {
                i += 1;
                out.config = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--stats-log" => {
                i += 1;
                out.stats_log = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--log-dir" => {
                i += 1;
                out.log_dir = PathBuf::from(value(args, i, flag)?);
            }
            "--mute" => out.mute = true,
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    if out.others.len() >= MAX_PLAYERS {
        bail!("at most {} extra players", MAX_PLAYERS - 1);
    }
    out.time_tics = tics.unwrap_or_else(|| time_secs.saturating_mul(TICRATE as i64));
    Ok(out)
}

impl RunArgs {
    pub fn flags(&self) -> SessionFlags {
        let flags = match self.mode {
            Mode::Single => SessionFlags::single_player(),
            Mode::Cooperative => SessionFlags::cooperative(),
            Mode::Deathmatch => SessionFlags::deathmatch(),
        }
        .with_skill(self.skill)
        .with_console_player(self.console_player);
        if self.demo {
            flags.non_interactive()
        } else {
            flags
        }
    }

    /// Level result with the console player in its slot and the extra
    /// players filling the remaining slots in order.
    pub fn level_stats(&self) -> CompletedLevelStats {
        let (kills, items, secrets) = self.totals;
        let mut stats = CompletedLevelStats::new(LevelId(self.map))
            .with_totals(kills, items, secrets)
            .with_time_tics(self.time_tics)
            .with_player(self.console_player, self.console);
        let free = (0..MAX_PLAYERS).filter(|&slot| slot != self.console_player);
        for (slot, result) in free.zip(&self.others) {
            stats = stats.with_player(slot, *result);
        }
        stats
    }

    pub fn next_level(&self, catalog: &dyn LevelCatalog) -> NextLevel {
        match self.next {
            NextArg::Map(n) => NextLevel::Map(LevelId(n)),
            NextArg::End => NextLevel::EndOfEpisode,
            NextArg::Auto => {
                let candidate = LevelId(self.map.saturating_add(1));
                if catalog.contains(candidate) {
                    NextLevel::Map(candidate)
                } else {
                    NextLevel::EndOfEpisode
                }
            }
        }
    }
}
