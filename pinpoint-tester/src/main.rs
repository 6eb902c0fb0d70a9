mod common;
mod logic;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::{parse_seeds, split_csv};
use logic::{GuessStrategy, PlaythroughRecord, RunSummary, build_lineup, run_batch, summarize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "pinpoint-tester", version)]
#[command(about = "Automated playthroughs for the Pinpoint geography game engine")]
struct Args {
    /// Seeds to run (comma-separated, decimal or 0x hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of seats at the table
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Guessing policies assigned to seats in rotation (comma-separated or "all")
    #[arg(long, default_value = "all")]
    policies: String,

    /// Playthroughs per seed; each iteration offsets the seed by one
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// List available guessing policies and exit
    #[arg(long)]
    list_policies: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_policies(&args)? {
        return Ok(());
    }

    // Keep machine-readable reports clean on stdout.
    let chatty = args.report == ReportFormat::Console || args.output.is_some();
    if chatty {
        announce_banner();
    }

    let start_time = Instant::now();
    let seeds = parse_seeds(&split_csv(&args.seeds))?;
    let strategies = parse_policies(&args.policies)?;
    let lineup = build_lineup(&strategies, args.players);
    if chatty && args.verbose {
        let names: Vec<&str> = lineup.iter().map(|s| s.label()).collect();
        println!("🪑 Lineup: {}", names.join(", ").bright_white());
        println!("🌱 Seeds: {seeds:?} x {} iteration(s)", args.iterations);
    }

    let records = run_batch(&seeds, &lineup, args.iterations)?;
    let summary = summarize(&records);
    write_reports(&args, &records, &summary, start_time)?;

    if summary.passed < summary.playthroughs {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_policies(args: &Args) -> Result<bool> {
    if !args.list_policies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available policies:")?;
    for strategy in GuessStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:10} - {}",
            strategy.label(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🌍 Pinpoint Automated Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
}

fn parse_policies(arg: &str) -> Result<Vec<GuessStrategy>> {
    let tokens = split_csv(arg);
    if tokens.iter().any(|t| t.eq_ignore_ascii_case("all")) {
        return Ok(GuessStrategy::ALL.to_vec());
    }
    let strategies = tokens
        .iter()
        .map(|token| token.parse::<GuessStrategy>())
        .collect::<Result<Vec<_>>>()
        .context("invalid --policies value")?;
    if strategies.is_empty() {
        bail!("no guessing policies selected");
    }
    Ok(strategies)
}

fn write_reports(
    args: &Args,
    records: &[PlaythroughRecord],
    summary: &RunSummary,
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            logic::reports::generate_json_report(&mut output_target, records, summary)?;
        }
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(&mut output_target, records, summary)?;
        }
        ReportFormat::Console => {
            let duration = start_time.elapsed();
            if records.is_empty() {
                writeln!(&mut output_target, "No playthroughs executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    records,
                    summary,
                    duration,
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["pinpoint-tester"]).unwrap();
        assert_eq!(args.seeds, "1337");
        assert_eq!(args.players, 4);
        assert_eq!(args.report, ReportFormat::Console);
        assert!(args.output.is_none());
    }

    #[test]
    fn report_format_rejects_unknown_values() {
        assert!(Args::try_parse_from(["pinpoint-tester", "--report", "csv"]).is_err());
        let args = Args::try_parse_from(["pinpoint-tester", "--report", "markdown"]).unwrap();
        assert_eq!(args.report, ReportFormat::Markdown);
    }

    #[test]
    fn policies_accept_all_and_lists() {
        assert_eq!(parse_policies("all").unwrap(), GuessStrategy::ALL.to_vec());
        assert_eq!(
            parse_policies("oracle, wild").unwrap(),
            vec![GuessStrategy::Oracle, GuessStrategy::Wild]
        );
        assert!(parse_policies("").is_err());
        assert!(parse_policies("oracle,psychic").is_err());
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = std::env::temp_dir().join(format!(
            "pinpoint-tester-output-{}.txt",
            std::process::id()
        ));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        drop(target);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }
}
