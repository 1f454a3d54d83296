//! Terminal intermission runner (default binary).
//!
//! Shows the end-of-level statistics screen for a level result given on the
//! command line, then prints the map that comes next. It uses crossterm for
//! input and the framebuffer renderer from `intermission-term`.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use intermission::cli::{parse_run_args, USAGE};
use intermission::config::RunnerConfig;
use intermission::core::{Intermission, LevelCatalog, TickSignal};
use intermission::input::{should_quit, HeldButtons};
use intermission::sound::{Bell, CuePlayer, Mute};
use intermission::stats_log::JsonLinesSink;
use intermission::term::{FrameBuffer, IntermissionView, RenderThrottle, TerminalRenderer, Viewport};
use intermission::types::{NextLevel, TICK_MS};

enum Exit {
    Advanced(NextLevel),
    Aborted(NextLevel),
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_run_args(&argv).map_err(|e| anyhow!("{e}\n\n{USAGE}"))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    let _log_guard = setup_logging(&args.log_dir)?;
    let config = RunnerConfig::load(args.config.as_deref())?;

    let mut wi = Intermission::new(config.intermission);
    let next = args.next_level(&config.levels);
    wi.start(&args.level_stats(), next, args.flags(), &config.levels)
        .context("could not start the intermission")?;

    let mut sink = match args.stats_log.as_ref().or(config.stats_log.as_ref()) {
        Some(path) => Some(JsonLinesSink::append(path)?),
        None => None,
    };
    let mut player: Box<dyn CuePlayer> = if args.mute || !config.display.bell {
        Box::new(Mute)
    } else {
        Box::new(Bell::new())
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut wi, &config, player.as_mut(), sink.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    match result? {
        Exit::Advanced(next) => println!("{}", describe(next, &config.levels)),
        Exit::Aborted(next) => println!("aborted; {}", describe(next, &config.levels)),
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    wi: &mut Intermission,
    config: &RunnerConfig,
    player: &mut dyn CuePlayer,
    mut sink: Option<&mut JsonLinesSink<std::io::BufWriter<std::fs::File>>>,
) -> Result<Exit> {
    let console = wi.session().map(|s| s.flags().console_player).unwrap_or(0);
    let view = IntermissionView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(config.display.static_redraw_ms);
    let mut held = HeldButtons::new()
        .with_key_release_timeout_ms(config.display.key_release_timeout_ms)
        .with_release_events(term.reports_key_event_types());

    let clock = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut force_render = true;

    loop {
        // Render.
        let now_ms = clock.elapsed().as_millis() as u64;
        if throttle.should_render_snapshot(now_ms, &wi.snapshot()) || force_render {
            force_render = false;
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(wi, Viewport::new(w, h), &mut fb)?;
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(Exit::Aborted(wi.abort()?));
                    }
                    held.handle_key_event(key);
                }
                Event::Resize(..) => {
                    term.invalidate();
                    force_render = true;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let input = held.tick_input(console);
            held.update(TICK_MS);

            let signal = wi.ticker(&input)?;
            for cue in wi.take_cues() {
                if let Err(e) = player.play(cue) {
                    warn!(?cue, error = %e, "cue playback failed");
                }
            }

            if signal == TickSignal::Advance {
                let next = match sink.as_deref_mut() {
                    Some(sink) => wi.stop_into(sink)?,
                    None => wi.stop()?,
                };
                return Ok(Exit::Advanced(next));
            }
        }
    }
}

fn describe(next: NextLevel, catalog: &dyn LevelCatalog) -> String {
    match next {
        NextLevel::Map(id) => match catalog.level_name(id) {
            Some(name) => format!("next: {id} ({name})"),
            None => format!("next: {id}"),
        },
        NextLevel::EndOfEpisode => "episode complete".to_string(),
    }
}

/// Log to `<log_dir>/intermission.log`; the terminal itself belongs to the screen.
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("could not create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "intermission.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))?;

    info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}
