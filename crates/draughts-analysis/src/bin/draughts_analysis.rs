use clap::{Args, Parser, Subcommand, ValueEnum};
use draughts_analysis::core::{BoardState, Color};
use draughts_analysis::eval::{replay, GroundTruth, GroundTruthError, ReplayError};
use draughts_analysis::tracker::MoveStrategy;
use draughts_analysis::{run_static, run_video, AnalysisConfig, AnalysisError};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    GroundTruth(#[from] GroundTruthError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("{0} already exists (use --force to overwrite)")]
    Exists(PathBuf),
    #[error("replay disagrees with {count} ground-truth positions")]
    Mismatch { count: usize },
}

#[derive(Parser, Debug)]
#[command(name = "draughts-analysis", version, about = "Draughts board and video analysis")]
struct Cli {
    /// Log level for the built-in stderr logger.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Report through a `tracing` subscriber instead of the stderr logger.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    tracing: bool,

    /// Emit tracing output as JSON lines.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true, requires = "tracing")]
    tracing_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Track moves over a directory of video frames and score them against ground truth.
    Video(VideoArgs),
    /// Classify the photographed positions and print the confusion matrix.
    Static(StaticArgs),
    /// Replay the ground-truth moves and check them against the photographed positions.
    Replay(ReplayArgs),
    /// Write a config file with every setting at its default.
    InitConfig(InitArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Empty-board photograph.
    #[arg(long)]
    background: Option<String>,
    /// Report path; overrides the config.
    #[arg(long)]
    out: Option<String>,
}

#[derive(Args, Debug)]
struct VideoArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Directory of frames, read in file-name order.
    #[arg(long)]
    frames: Option<String>,
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Throttle processing to this frame rate.
    #[arg(long)]
    fps: Option<f64>,
}

#[derive(Args, Debug)]
struct StaticArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Directory holding the photographed positions.
    #[arg(long)]
    images: Option<String>,
    /// Distinguish kings from men (5x5 confusion matrix).
    #[arg(long)]
    king_aware: bool,
    /// Save the masked board and foreground mask of every image here.
    #[arg(long)]
    dump_dir: Option<String>,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Ground-truth JSON; the embedded tables when omitted.
    #[arg(long)]
    ground_truth: Option<PathBuf>,
    /// Stop after this many moves.
    #[arg(long)]
    through: Option<usize>,
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Where to write the config.
    path: PathBuf,
    /// Start from the king-aware presets.
    #[arg(long)]
    king_aware: bool,
    #[arg(long)]
    force: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Geometric,
    Temporal,
}

impl From<StrategyArg> for MoveStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Geometric => MoveStrategy::Geometric,
            StrategyArg::Temporal => MoveStrategy::Temporal,
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) {
    if cli.tracing {
        draughts_analysis::core::init_tracing(cli.tracing_json);
        // after the subscriber, so `log` records are bridged into it
        let _ = tracing_log::LogTracer::init();
    } else {
        let _ = draughts_analysis::core::init_with_level(cli.log_level.into());
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) {
    let _ = draughts_analysis::core::init_with_level(cli.log_level.into());
}

fn load_config(common: &CommonArgs) -> Result<AnalysisConfig, AnalysisError> {
    let mut cfg = match &common.config {
        Some(path) => AnalysisConfig::load_json(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(bg) = &common.background {
        cfg.background_path = Some(bg.clone());
    }
    Ok(cfg)
}

fn video(args: VideoArgs) -> Result<(), CliError> {
    let mut cfg = load_config(&args.common)?;
    if let Some(frames) = args.frames {
        cfg.frames_dir = Some(frames);
    }
    if let Some(strategy) = args.strategy {
        cfg.tracker.strategy = strategy.into();
    }
    if args.fps.is_some() {
        cfg.playback_fps = args.fps;
    }
    if let Some(out) = args.common.out {
        cfg.video_report_path = Some(out);
    }

    let report = run_video(&cfg)?;
    for m in &report.moves {
        println!("{}", m);
    }
    if let Some(eval) = &report.evaluation {
        println!("Number of missed moves: {}", eval.missed_count());
    }
    let path = cfg.video_report_path();
    report.write_json(&path)?;
    log::info!("report written to {}", path.display());
    Ok(())
}

fn static_images(args: StaticArgs) -> Result<(), CliError> {
    let mut cfg = load_config(&args.common)?;
    if args.king_aware {
        cfg = cfg.king_aware();
    }
    if let Some(images) = args.images {
        cfg.static_dir = Some(images);
    }
    if let Some(dir) = args.dump_dir {
        cfg.dump_dir = Some(dir);
    }
    if let Some(out) = args.common.out {
        cfg.static_report_path = Some(out);
    }

    let report = run_static(&cfg)?;
    println!("Confusion Matrix:");
    print!("{}", report.confusion);
    println!(
        "Accuracy: {}/{} ({:.2}%)",
        report.confusion.correct,
        report.confusion.total,
        100.0 * report.confusion.accuracy
    );
    let path = cfg.static_report_path();
    report.write_json(&path)?;
    log::info!("report written to {}", path.display());
    Ok(())
}

fn replay_truth(args: ReplayArgs) -> Result<(), CliError> {
    let truth = match &args.ground_truth {
        Some(path) => GroundTruth::from_json(&std::fs::read_to_string(path)?)?,
        None => GroundTruth::draughts_game1()?,
    };
    let n = args
        .through
        .unwrap_or(truth.moves.len())
        .min(truth.moves.len());
    let states = replay(BoardState::starting_position(), &truth.moves[..n])?;
    let expected = truth.positions()?;

    // expected[0] is the opening position; states[i] follows move i + 1
    let mut mismatches = 0;
    for (i, got) in states.iter().enumerate() {
        let Some(want) = expected.get(i + 1) else {
            break;
        };
        if got != want {
            mismatches += 1;
            log::warn!(
                "position after move {} differs from {}",
                i + 1,
                truth.boards[i + 1].file
            );
        }
    }

    let last = states
        .last()
        .copied()
        .unwrap_or_else(BoardState::starting_position);
    println!("After {} moves:", n);
    print!("{}", last);
    println!("White: {}", last.piece_list(Color::White));
    println!("Black: {}", last.piece_list(Color::Black));
    if mismatches > 0 {
        return Err(CliError::Mismatch { count: mismatches });
    }
    Ok(())
}

fn init_config(args: InitArgs) -> Result<(), CliError> {
    if args.path.exists() && !args.force {
        return Err(CliError::Exists(args.path));
    }
    let mut cfg = AnalysisConfig::default();
    if args.king_aware {
        cfg = cfg.king_aware();
    }
    cfg.write_json(&args.path)?;
    println!("wrote {}", args.path.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Command::Video(args) => video(args),
        Command::Static(args) => static_images(args),
        Command::Replay(args) => replay_truth(args),
        Command::InitConfig(args) => init_config(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
