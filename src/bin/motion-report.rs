use std::{path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use motion_report::{
    AnalysisOptions, AnalysisReport, FfmpegLogLevel, FrameSource, ProgressCallback, ProgressInfo,
    ReportBuilder, ReportStore,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  motion-report analyze match.mp4 --progress\n  motion-report analyze match.mp4 --report-id final-half --json\n  motion-report show 20261017093000-3f9a1c2b\n  motion-report metadata match.mp4 --json\n  motion-report completions zsh > _motion-report";

#[derive(Debug, Parser)]
#[command(
    name = "motion-report",
    version,
    about = "Count motion events in video files and keep JSON reports",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging from the analysis pipeline.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar while frames are scored.
    #[arg(long, global = true)]
    progress: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory reports are saved to and loaded from.
    #[arg(long, global = true, default_value = "reports")]
    reports_dir: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyse a video and save its motion report.
    #[command(
        about = "Analyse motion in a video",
        after_help = "Examples:\n  motion-report analyze match.mp4\n  motion-report analyze match.mp4 --no-save --json"
    )]
    Analyze {
        /// Input video path.
        input: PathBuf,
        /// Report identifier. Defaults to a timestamp plus random suffix.
        #[arg(long)]
        report_id: Option<String>,
        /// Print the report without saving it.
        #[arg(long)]
        no_save: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
        /// Frame rate to assume when the container reports none.
        #[arg(
            long,
            default_value_t = motion_report::DEFAULT_FRAMES_PER_SECOND,
            value_parser = parse_default_fps
        )]
        default_fps: f64,
    },

    /// Print a previously saved report.
    #[command(about = "Show a saved report")]
    Show {
        /// Report identifier.
        report_id: String,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print stream metadata for a video.
    #[command(about = "Print video stream metadata", visible_alias = "probe")]
    Metadata {
        /// Input video path.
        input: PathBuf,
        /// Output metadata as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Score the motion between two still images.
    #[command(about = "Score two still frames")]
    Diff {
        /// Earlier frame.
        previous: PathBuf,
        /// Later frame.
        current: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn parse_default_fps(value: &str) -> Result<f64, String> {
    let fps: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if motion_report::is_usable_frame_rate(fps) {
        Ok(fps)
    } else {
        Err(format!("must be a finite positive number, got {value}"))
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_module("motion_report", log::LevelFilter::Debug);
    }
    builder.init();
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(global.verbose);

    if let Some(level) = &global.log_level {
        let parsed =
            FfmpegLogLevel::parse(level).ok_or(format!("unsupported --log-level: {level}"))?;
        motion_report::set_ffmpeg_log_level(parsed);
    }

    Ok(())
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(total: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} frames {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current));
        }
        self.bar.set_position(info.current);
        if let Some(score) = info.last_score {
            self.bar.set_message(format!("score {score:.2}"));
        }
    }
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", report.to_json_pretty()?);
        return Ok(());
    }

    println!("{} {}", "report".cyan().bold(), report.report_id());
    println!("{} {}", "created".cyan().bold(), report.created_at().to_rfc3339());
    println!("{} {}", "source".cyan().bold(), report.source_filename());
    println!(
        "{} {} @ {:.2} fps ({:.2}s)",
        "frames".cyan().bold(),
        report.total_frames(),
        report.fps(),
        report.duration_seconds()
    );
    println!("{} {}", "events".cyan().bold(), report.motion_events());
    println!(
        "{} mean {:.4}, std {:.4}",
        "score".cyan().bold(),
        report.motion_score_mean(),
        report.motion_score_std()
    );
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global)?;

    match cli.command {
        Commands::Analyze {
            input,
            report_id,
            no_save,
            json,
            default_fps,
        } => {
            let source = FrameSource::open_with_default_fps(&input, default_fps)?;
            let mut options = AnalysisOptions::new().with_default_frames_per_second(default_fps);

            let progress = if cli.global.progress {
                let progress = Arc::new(TerminalProgress::new(source.frame_count())?);
                options = options
                    .with_progress(progress.clone())
                    .with_batch_size(10);
                Some(progress)
            } else {
                None
            };

            let report_id = report_id.unwrap_or_else(motion_report::generate_report_id);
            let report = ReportBuilder::new(options).analyze_source(source, report_id);

            if let Some(progress) = progress {
                progress.bar.finish_with_message("done");
            }

            if !no_save {
                let path = ReportStore::new(&cli.global.reports_dir).save(&report)?;
                eprintln!("{} {}", "saved".green().bold(), path.display());
            }

            print_report(&report, json)?;
        }
        Commands::Show { report_id, json } => {
            let report = ReportStore::new(&cli.global.reports_dir).load(&report_id)?;
            print_report(&report, json)?;
        }
        Commands::Metadata { input, json } => {
            let source = FrameSource::open(&input)?;
            let metadata = source.metadata();
            if json {
                let payload = json!({
                    "source_filename": source.source_filename(),
                    "format": metadata.format,
                    "codec": metadata.codec,
                    "width": metadata.width,
                    "height": metadata.height,
                    "fps": metadata.frames_per_second,
                    "fps_defaulted": metadata.frames_per_second_defaulted,
                    "frame_count": metadata.frame_count,
                    "duration_seconds": metadata.duration.as_secs_f64(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Format: {}", metadata.format);
                println!(
                    "Video: {}x{} {} @ {:.2} fps{}",
                    metadata.width,
                    metadata.height,
                    metadata.codec,
                    metadata.frames_per_second,
                    if metadata.frames_per_second_defaulted {
                        " (default)"
                    } else {
                        ""
                    }
                );
                println!("Frames: {}", metadata.frame_count);
                println!("Duration: {:.3}s", metadata.duration.as_secs_f64());
            }
        }
        Commands::Diff { previous, current } => {
            let score = motion_report::score_image_files(&previous, &current)?;
            println!("{score:.4}");
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "motion-report", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["motion-report", "analyze", "match.mp4"]).unwrap();
        assert_eq!(cli.global.reports_dir.to_str(), Some("reports"));
        match cli.command {
            Commands::Analyze {
                input,
                report_id,
                no_save,
                json,
                default_fps,
            } => {
                assert_eq!(input.to_str(), Some("match.mp4"));
                assert!(report_id.is_none());
                assert!(!no_save);
                assert!(!json);
                assert_eq!(default_fps, 30.0);
            }
            other => panic!("Expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "motion-report",
            "show",
            "abc",
            "--reports-dir",
            "/tmp/out",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.global.verbose);
        assert_eq!(cli.global.reports_dir.to_str(), Some("/tmp/out"));
        assert!(matches!(cli.command, Commands::Show { ref report_id, .. } if report_id == "abc"));
    }

    #[test]
    fn default_fps_must_be_finite_and_positive() {
        for bad in ["0", "-25", "NaN", "inf", "fast"] {
            let result = Cli::try_parse_from(["motion-report", "analyze", "a.mp4", "--default-fps", bad]);
            assert!(result.is_err(), "accepted --default-fps {bad}");
        }

        let cli =
            Cli::try_parse_from(["motion-report", "analyze", "a.mp4", "--default-fps", "25"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { default_fps, .. } if default_fps == 25.0));
    }

    #[test]
    fn diff_requires_two_paths() {
        assert!(Cli::try_parse_from(["motion-report", "diff", "a.png"]).is_err());
    }
}
