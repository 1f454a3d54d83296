//! Intermission state machine.
//!
//! An [`Intermission`] is owned by the main loop and driven through four entry
//! points:
//!
//! 1. [`Intermission::start`] builds a session from the finished level.
//! 2. [`Intermission::ticker`] runs once per game tick and is the only mutator.
//! 3. [`Intermission::drawer`] projects the current state onto a canvas, any
//!    number of times per tick.
//! 4. [`Intermission::stop`] (or [`Intermission::abort`]) releases the session
//!    and hands back the next level.
//!
//! Every entry point checks the current [`Phase`] and rejects calls that break
//! this order with an [`IntermissionError`].

use arrayvec::ArrayVec;
use tracing::{debug, error, info, warn};

use crate::config::IntermissionConfig;
use crate::edge::EdgeDetector;
use crate::error::IntermissionError;
use crate::session::{console_slot, LevelCatalog, Layout, SessionFlags};
use crate::stats::{CompletedLevelStats, StatEntry, Totals};
use crate::summary::{LevelSummary, PlayerSummary, StatsSink};
use crate::types::{
    Cue, LevelId, NextLevel, StatField, TickInput, MAX_CUES_PER_TICK, MAX_PLAYERS,
};

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No session; only `start` is accepted.
    #[default]
    Uninitialized,
    /// Numbers are climbing.
    Counting,
    /// Everything is shown; waiting for a button press or the idle timeout.
    WaitingForInput,
    /// The advance signal was delivered; only `stop`/`abort` are accepted.
    Finished,
}

impl Phase {
    pub fn is_active(&self) -> bool {
        !matches!(self, Phase::Uninitialized)
    }
}

/// What the main loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSignal {
    /// Keep ticking and drawing the intermission.
    Continue,
    /// Tear the screen down with `stop` and load the next level.
    Advance,
}

/// A player whose statistics are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPlayer {
    pub slot: u8,
    pub stats: StatEntry,
}

/// Everything owned by one running intermission.
#[derive(Debug, Clone)]
pub struct Session {
    completed: LevelId,
    completed_name: String,
    next: NextLevel,
    next_name: Option<String>,
    flags: SessionFlags,
    layout: Layout,
    totals: Totals,
    players: ArrayVec<TrackedPlayer, MAX_PLAYERS>,
    count_ticks: u32,
    idle_ticks: u32,
    all_complete_announced: bool,
    edges: EdgeDetector,
    cues: ArrayVec<Cue, MAX_CUES_PER_TICK>,
}

impl Session {
    pub fn completed(&self) -> LevelId {
        self.completed
    }

    pub fn completed_name(&self) -> &str {
        &self.completed_name
    }

    pub fn next(&self) -> NextLevel {
        self.next
    }

    /// Name of the next map; `None` at the end of an episode.
    pub fn next_name(&self) -> Option<&str> {
        self.next_name.as_deref()
    }

    pub fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn players(&self) -> &[TrackedPlayer] {
        &self.players
    }

    /// Statistics of the player in `slot`, if tracked.
    pub fn player(&self, slot: u8) -> Option<&StatEntry> {
        self.players.iter().find(|p| p.slot == slot).map(|p| &p.stats)
    }

    /// Ticks spent in the counting phase.
    pub fn count_ticks(&self) -> u32 {
        self.count_ticks
    }

    /// Ticks spent waiting for input.
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// Cues produced by the most recent tick.
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn all_done(&self) -> bool {
        self.players.iter().all(|p| p.stats.is_done())
    }

    fn is_tracked(&self, slot: usize) -> bool {
        self.players.iter().any(|p| p.slot as usize == slot)
    }

    fn push_cue(&mut self, cue: Cue) {
        // Cues are cleared every tick and the capacity covers one tick's worth.
        let _ = self.cues.try_push(cue);
    }

    /// One counting tick. Returns whether every counter is complete.
    fn advance_counters(&mut self, config: &IntermissionConfig) -> bool {
        let mut moved = false;
        let mut completed: ArrayVec<Cue, MAX_CUES_PER_TICK> = ArrayVec::new();
        for player in self.players.iter_mut() {
            for field in StatField::ALL {
                let counter = player.stats.counter_mut(field);
                if counter.is_done() {
                    continue;
                }
                moved = true;
                if counter.advance(step_for(config, field)) {
                    let _ = completed.try_push(Cue::FieldComplete {
                        player: player.slot,
                        field,
                    });
                }
            }
        }

        if moved && self.count_ticks % config.tally_cue_interval == 0 {
            self.push_cue(Cue::TallyTick);
        }
        for cue in completed {
            self.push_cue(cue);
        }

        let done = self.all_done();
        if done && !self.all_complete_announced {
            self.all_complete_announced = true;
            self.push_cue(Cue::AllComplete);
        }
        done
    }

    fn skip_to_totals(&mut self) {
        for player in self.players.iter_mut() {
            player.stats.snap_all();
        }
        if !self.all_complete_announced {
            self.all_complete_announced = true;
            self.push_cue(Cue::AllComplete);
        }
    }

    fn summary(&self) -> LevelSummary {
        let console = self
            .players
            .first()
            .map(|p| p.stats)
            .unwrap_or_default();
        LevelSummary {
            level: self.completed,
            next: self.next,
            layout: self.layout,
            skill: self.flags.skill,
            time_secs: console.time.raw(),
            par_secs: console.par,
            totals: self.totals,
            players: self
                .players
                .iter()
                .map(|p| PlayerSummary {
                    player: p.slot,
                    kills: p.stats.kills.raw(),
                    items: p.stats.items.raw(),
                    secrets: p.stats.secrets.raw(),
                    frags: p.stats.frags.signed_raw(),
                })
                .collect(),
        }
    }
}

fn step_for(config: &IntermissionConfig, field: StatField) -> u32 {
    match field {
        StatField::Kills | StatField::Items | StatField::Secrets => config.count_step,
        StatField::Time => config.time_step_secs,
        StatField::Frags => config.frag_step,
    }
}

/// Caller-owned intermission screen.
///
/// # Examples
///
/// ```
/// use intermission_core::{
///     CompletedLevelStats, Intermission, LevelTable, Phase, PlayerResult, SessionFlags,
///     TickSignal,
/// };
/// use intermission_core::types::{Buttons, LevelId, NextLevel, TickInput};
///
/// let catalog = LevelTable::new()
///     .with_level(LevelId(4), "Holding Area", None)
///     .with_level(LevelId(5), "Tech Center", None);
/// let stats = CompletedLevelStats::new(LevelId(4)).with_player(0, PlayerResult::new(42, 0, 0));
///
/// let mut wi = Intermission::default();
/// wi.start(&stats, NextLevel::Map(LevelId(5)), SessionFlags::single_player(), &catalog)
///     .unwrap();
///
/// for _ in 0..21 {
///     assert_eq!(wi.ticker(&TickInput::none()).unwrap(), TickSignal::Continue);
/// }
/// assert_eq!(wi.phase(), Phase::WaitingForInput);
///
/// let fire = TickInput::none().with_player(0, Buttons::ATTACK);
/// assert_eq!(wi.ticker(&fire).unwrap(), TickSignal::Advance);
/// assert_eq!(wi.stop().unwrap(), NextLevel::Map(LevelId(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Intermission {
    config: IntermissionConfig,
    phase: Phase,
    session: Option<Session>,
}

impl Intermission {
    pub fn new(config: IntermissionConfig) -> Self {
        Self {
            config: config.sanitized(),
            phase: Phase::Uninitialized,
            session: None,
        }
    }

    pub fn config(&self) -> &IntermissionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Set up a new session from the level that was just completed.
    ///
    /// Raw values are sanitized (negative counts become zero), displayed values
    /// start at zero and the phase becomes [`Phase::Counting`].
    pub fn start(
        &mut self,
        stats: &CompletedLevelStats,
        next: NextLevel,
        flags: SessionFlags,
        catalog: &dyn LevelCatalog,
    ) -> Result<(), IntermissionError> {
        if self.phase.is_active() {
            let err = IntermissionError::AlreadyActive(self.phase);
            error!(code = err.code(), "{err}");
            return Err(err);
        }
        if let NextLevel::Map(id) = next {
            if !catalog.contains(id) {
                let err = IntermissionError::UnknownLevel(id);
                error!(code = err.code(), "{err}");
                return Err(err);
            }
        }

        let mut flags = flags;
        let console = match console_slot(&flags) {
            Some(slot) => slot,
            None => {
                warn!(
                    console_player = flags.console_player,
                    "console player out of range, using slot 0"
                );
                flags.console_player = 0;
                0
            }
        };

        let layout = Layout::from_flags(&flags);
        let time_secs = stats.time_seconds();
        let par = catalog.par_seconds(stats.level);

        let mut players: ArrayVec<TrackedPlayer, MAX_PLAYERS> = ArrayVec::new();
        // The console player always comes first.
        if !stats.players[console].in_game {
            warn!(console, "console player not marked in game, tracking it anyway");
        }
        players.push(TrackedPlayer {
            slot: console as u8,
            stats: StatEntry::from_result(
                console,
                &stats.players[console],
                time_secs,
                par,
                layout.tallies_frags(),
            ),
        });
        if layout.shows_all_players() {
            for (slot, result) in stats.players.iter().enumerate() {
                if slot == console || !result.in_game {
                    continue;
                }
                players.push(TrackedPlayer {
                    slot: slot as u8,
                    stats: StatEntry::from_result(
                        slot,
                        result,
                        time_secs,
                        par,
                        layout.tallies_frags(),
                    ),
                });
            }
        }

        let completed_name = catalog
            .level_name(stats.level)
            .map(str::to_string)
            .unwrap_or_else(|| stats.level.to_string());
        let next_name = next
            .map()
            .and_then(|id| catalog.level_name(id).map(str::to_string));

        info!(
            level = %stats.level,
            next = ?next,
            layout = ?layout,
            players = players.len(),
            time_secs,
            "intermission started"
        );

        self.session = Some(Session {
            completed: stats.level,
            completed_name,
            next,
            next_name,
            flags,
            layout,
            totals: Totals::from(stats.totals),
            players,
            count_ticks: 0,
            idle_ticks: 0,
            all_complete_announced: false,
            edges: EdgeDetector::new(),
            cues: ArrayVec::new(),
        });
        self.phase = Phase::Counting;
        Ok(())
    }

    /// Advance the intermission by one game tick.
    ///
    /// Cues from the previous tick are discarded; drain them with
    /// [`Intermission::take_cues`] after each call.
    pub fn ticker(&mut self, input: &TickInput) -> Result<TickSignal, IntermissionError> {
        if self.phase == Phase::Finished {
            let err = IntermissionError::AlreadyFinished;
            error!(code = err.code(), "{err}");
            return Err(err);
        }
        let Some(session) = self.session.as_mut() else {
            let err = IntermissionError::NotActive;
            error!(code = err.code(), "ticker called without an active session");
            return Err(err);
        };

        session.cues.clear();
        let tracked: ArrayVec<u8, MAX_PLAYERS> = session.players.iter().map(|p| p.slot).collect();
        let pressed = session
            .edges
            .advance_pressed(input, |slot| tracked.iter().any(|&t| t as usize == slot));

        match self.phase {
            Phase::Counting => {
                if pressed {
                    session.skip_to_totals();
                    session.idle_ticks = 0;
                    self.phase = Phase::WaitingForInput;
                    debug!(count_ticks = session.count_ticks, "tally skipped");
                    return Ok(TickSignal::Continue);
                }

                session.count_ticks += 1;
                let done = session.advance_counters(&self.config);
                if done && session.count_ticks >= self.config.min_count_ticks {
                    session.idle_ticks = 0;
                    self.phase = Phase::WaitingForInput;
                    debug!(count_ticks = session.count_ticks, "tally complete");
                }
                Ok(TickSignal::Continue)
            }
            Phase::WaitingForInput => {
                session.idle_ticks += 1;
                let timed_out = self
                    .config
                    .wait_timeout(session.flags.non_interactive)
                    .is_some_and(|limit| session.idle_ticks >= limit);
                if pressed || timed_out {
                    session.push_cue(Cue::Advance);
                    self.phase = Phase::Finished;
                    debug!(idle_ticks = session.idle_ticks, timed_out, "intermission advancing");
                    return Ok(TickSignal::Advance);
                }
                Ok(TickSignal::Continue)
            }
            Phase::Uninitialized | Phase::Finished => Err(IntermissionError::NotActive),
        }
    }

    /// Take the cues produced by the most recent tick.
    pub fn take_cues(&mut self) -> ArrayVec<Cue, MAX_CUES_PER_TICK> {
        self.session
            .as_mut()
            .map(|s| std::mem::take(&mut s.cues))
            .unwrap_or_default()
    }

    /// Whether the continue prompt is lit on the current tick.
    pub fn prompt_visible(&self) -> bool {
        match (self.phase, &self.session) {
            (Phase::WaitingForInput | Phase::Finished, Some(session)) => {
                (session.idle_ticks / self.config.prompt_blink_ticks) % 2 == 0
            }
            _ => false,
        }
    }

    /// Release a finished session and return the next level.
    pub fn stop(&mut self) -> Result<NextLevel, IntermissionError> {
        self.ensure_finished()?;
        self.release("stopped")
    }

    /// Like [`Intermission::stop`], feeding the level summary to `sink` first.
    pub fn stop_into(&mut self, sink: &mut dyn StatsSink) -> Result<NextLevel, IntermissionError> {
        self.ensure_finished()?;
        if let Some(session) = &self.session {
            sink.record(&session.summary());
        }
        self.release("stopped")
    }

    /// Leave from any active phase, e.g. on a quit request.
    ///
    /// Releases the session exactly like [`Intermission::stop`] but skips the
    /// finished-phase check and does not record a summary.
    pub fn abort(&mut self) -> Result<NextLevel, IntermissionError> {
        if !self.phase.is_active() {
            let err = IntermissionError::NotActive;
            error!(code = err.code(), "abort called without an active session");
            return Err(err);
        }
        warn!(phase = ?self.phase, "intermission aborted");
        self.release("aborted")
    }

    /// Summary of the running session.
    pub fn summary(&self) -> Option<LevelSummary> {
        self.session.as_ref().map(Session::summary)
    }

    fn ensure_finished(&self) -> Result<(), IntermissionError> {
        let err = match self.phase {
            Phase::Finished => return Ok(()),
            Phase::Uninitialized => IntermissionError::NotActive,
            phase => IntermissionError::NotFinished(phase),
        };
        error!(code = err.code(), "{err}");
        Err(err)
    }

    fn release(&mut self, how: &'static str) -> Result<NextLevel, IntermissionError> {
        let session = self.session.take().ok_or(IntermissionError::NotActive)?;
        self.phase = Phase::Uninitialized;
        info!(level = %session.completed, next = ?session.next, how, "intermission released");
        Ok(session.next)
    }
}
