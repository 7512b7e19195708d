//! boba entrypoint: a line-oriented motion practice game.
use anyhow::Result;
use clap::Parser;
use core_actions::MotionRequest;
use core_config::load_from;
use core_state::{LeaderboardKind, SessionError, SessionId, SessionStore, patterns};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod render;

const LEADERBOARD_LIMIT: usize = 10;
const LOG_FILE: &str = "boba.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "boba", version, about = "Practice vim motions by collecting boba pearls")]
struct Args {
    /// Optional configuration file path (overrides discovery of `boba.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Seed for boards and pearl placement (overrides `game.seed`).
    #[arg(long = "seed")]
    pub seed: Option<u64>,
    /// Practice text to play instead of a random one.
    #[arg(long = "pattern")]
    pub pattern: Option<usize>,
    /// Player name used for statistics and the leaderboard.
    #[arg(long = "player", default_value = "player")]
    pub player: String,
}

struct AppStartup {
    // Held until main returns so buffered log lines are flushed.
    _log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { _log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self._log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// One player's game loop over line-based input.
struct Game<'a> {
    store: &'a SessionStore,
    player: String,
    session: SessionId,
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

impl<'a> Game<'a> {
    fn start(store: &'a SessionStore, player: String, pattern: Option<usize>) -> Result<Self> {
        let session = match pattern {
            Some(index) => store.create_with_pattern(&player, index)?,
            None => store.create(&player),
        };
        Ok(Self {
            store,
            player,
            session,
        })
    }

    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Collect the pearls ({}) with vim motions. :help lists keys, :q quits.", render::PEARL_MARK)?;
        self.show_board(out)?;
        for line in input.lines() {
            let line = line?;
            if self.handle_line(&line, out)? == Flow::Quit {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        // Only the line terminator is stripped; `t ` searches for a space.
        let token = line.trim_end_matches(['\r', '\n']);
        match token {
            "" => {}
            ":q" | ":quit" => {
                info!(target: "runtime", player = %self.player, "quit");
                return Ok(Flow::Quit);
            }
            ":help" => write!(out, "{}", render::render_help())?,
            ":board" => {
                for kind in [LeaderboardKind::Score, LeaderboardKind::Time] {
                    let entries = self.store.leaderboard(kind, LEADERBOARD_LIMIT);
                    write!(out, "{}", render::render_leaderboard(kind, &entries))?;
                }
            }
            _ => self.play(token, out)?,
        }
        Ok(Flow::Continue)
    }

    fn play<W: Write>(&mut self, token: &str, out: &mut W) -> Result<()> {
        let request = match MotionRequest::parse(token) {
            Ok(request) => request,
            Err(e) => {
                writeln!(out, "{e}")?;
                return Ok(());
            }
        };
        match self.store.process_move(self.session, request) {
            Ok(outcome) => {
                self.show_board(out)?;
                if outcome.pearl_collected {
                    writeln!(out, "pearl! score {}", outcome.score)?;
                }
                if outcome.completed {
                    let time = outcome.completion_time.unwrap_or_default();
                    writeln!(
                        out,
                        "game complete: {} points in {}",
                        outcome.final_score.unwrap_or(outcome.score),
                        render::format_duration(time)
                    )?;
                    if let Some(stats) = self.store.player_stats(&self.player) {
                        write!(out, "{}", render::render_stats(&self.player, &stats))?;
                    }
                }
            }
            Err(e @ (SessionError::Completed | SessionError::Expired | SessionError::NotFound)) => {
                writeln!(out, "{e}; :q to quit")?;
            }
            Err(SessionError::Integrity { score, pearls }) => {
                warn!(target: "runtime", score, pearls, "integrity_failure_reported");
                writeln!(out, "score integrity validation failed")?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        Ok(())
    }

    fn show_board<W: Write>(&self, out: &mut W) -> Result<()> {
        let snap = self.store.snapshot(self.session)?;
        write!(out, "{}", render::render_board(&snap, self.store.rules()))?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?.with_seed(args.seed);
    info!(
        target: "runtime.startup",
        config_override = args.config.is_some(),
        seed = config.game().seed,
        pattern = args.pattern,
        patterns = patterns::pattern_count(),
        "bootstrap_complete"
    );

    let store = SessionStore::new(config.game().clone());
    let mut game = Game::start(&store, args.player, args.pattern)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    game.run(stdin.lock(), &mut out)?;
    info!(target: "runtime", "shutdown");
    Ok(())
}
