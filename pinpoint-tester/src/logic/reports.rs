use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use super::policy::GuessStrategy;
use super::simulation::PlaythroughRecord;

/// Per-strategy rollup across every seat a strategy occupied.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: GuessStrategy,
    pub seats: usize,
    pub mean_total: f64,
    pub best_total: u32,
    pub mean_distance_miles: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub playthroughs: usize,
    pub passed: usize,
    pub shared_wins: usize,
    pub strategies: Vec<StrategyAggregate>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a RunSummary,
    playthroughs: &'a [PlaythroughRecord],
}

#[derive(Default)]
struct AggregateBuilder {
    seats: usize,
    total_sum: f64,
    best_total: u32,
    distance_sum: f64,
    wins: usize,
}

impl AggregateBuilder {
    fn finish(self, strategy: GuessStrategy) -> StrategyAggregate {
        let seats = f64::from(u32::try_from(self.seats).unwrap_or(u32::MAX).max(1));
        StrategyAggregate {
            strategy,
            seats: self.seats,
            mean_total: self.total_sum / seats,
            best_total: self.best_total,
            mean_distance_miles: self.distance_sum / seats,
            win_rate: f64::from(u32::try_from(self.wins).unwrap_or(u32::MAX)) / seats,
        }
    }
}

#[must_use]
pub fn summarize(records: &[PlaythroughRecord]) -> RunSummary {
    let mut builders: BTreeMap<&'static str, (GuessStrategy, AggregateBuilder)> = BTreeMap::new();
    for seat in records.iter().flat_map(|r| &r.seats) {
        let (_, entry) = builders
            .entry(seat.strategy.label())
            .or_insert_with(|| (seat.strategy, AggregateBuilder::default()));
        entry.seats += 1;
        entry.total_sum += f64::from(seat.total_score);
        entry.best_total = entry.best_total.max(seat.total_score);
        entry.distance_sum += seat.mean_distance_miles;
        if seat.rank == 1 {
            entry.wins += 1;
        }
    }

    let mut strategies: Vec<StrategyAggregate> = builders
        .into_values()
        .map(|(strategy, builder)| builder.finish(strategy))
        .collect();
    strategies.sort_by(|a, b| b.mean_total.total_cmp(&a.mean_total));

    RunSummary {
        playthroughs: records.len(),
        passed: records.iter().filter(|r| r.passed()).count(),
        shared_wins: records.iter().filter(|r| r.shared_win).count(),
        strategies,
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let part = f64::from(u32::try_from(part).unwrap_or(u32::MAX));
    let whole = f64::from(u32::try_from(whole).unwrap_or(u32::MAX));
    part / whole * 100.0
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[PlaythroughRecord],
    summary: &RunSummary,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Playthrough Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;
    writeln!(out, "Playthroughs: {}", summary.playthroughs)?;
    writeln!(out, "Passed: {}", summary.passed.to_string().green())?;
    writeln!(
        out,
        "Failed: {}",
        (summary.playthroughs - summary.passed).to_string().red()
    )?;
    writeln!(
        out,
        "Shared wins: {} ({:.1}%)",
        summary.shared_wins,
        percent(summary.shared_wins, summary.playthroughs)
    )?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for record in records {
        let status = if record.passed() {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        let line = record
            .seats
            .iter()
            .map(|s| format!("#{} {} {}", s.rank, s.strategy, s.total_score))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "{status} seed {}: {line}", record.seed.to_string().bold())?;
        for violation in &record.violations {
            writeln!(out, "     • {}", violation.red())?;
        }
    }

    if !summary.strategies.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "🧭 Strategy Standings".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        for agg in &summary.strategies {
            writeln!(
                out,
                "{:10} seats {:4}  mean {:8.1}  best {:6}  miles {:8.1}  wins {:5.1}%",
                agg.strategy.label().bold(),
                agg.seats,
                agg.mean_total,
                agg.best_total,
                agg.mean_distance_miles,
                agg.win_rate * 100.0
            )?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[PlaythroughRecord],
    summary: &RunSummary,
) -> Result<()> {
    let report = JsonReport {
        summary,
        playthroughs: records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    records: &[PlaythroughRecord],
    summary: &RunSummary,
) -> Result<()> {
    writeln!(out, "# Pinpoint Playthrough Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Playthroughs**: {}", summary.playthroughs)?;
    writeln!(out, "- **Passed**: {}", summary.passed)?;
    writeln!(
        out,
        "- **Shared wins**: {} ({:.1}%)\n",
        summary.shared_wins,
        percent(summary.shared_wins, summary.playthroughs)
    )?;

    writeln!(out, "## Strategies\n")?;
    writeln!(
        out,
        "| Strategy | Seats | Mean total | Best total | Mean miles | Win rate |"
    )?;
    writeln!(out, "|---|---:|---:|---:|---:|---:|")?;
    for agg in &summary.strategies {
        writeln!(
            out,
            "| {} | {} | {:.1} | {} | {:.1} | {:.1}% |",
            agg.strategy,
            agg.seats,
            agg.mean_total,
            agg.best_total,
            agg.mean_distance_miles,
            agg.win_rate * 100.0
        )?;
    }

    writeln!(out, "\n## Playthroughs\n")?;
    for record in records {
        let status = if record.passed() { "✅" } else { "❌" };
        writeln!(out, "### {status} Seed {}\n", record.seed)?;
        for seat in &record.seats {
            writeln!(
                out,
                "- #{} player {} ({}): {} points",
                seat.rank, seat.player_id, seat.strategy, seat.total_score
            )?;
        }
        for violation in &record.violations {
            writeln!(out, "- ⚠️ {violation}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::simulation::SeatOutcome;

    fn seat(player_id: u32, strategy: GuessStrategy, total: u32, rank: u32) -> SeatOutcome {
        SeatOutcome {
            player_id,
            strategy,
            total_score: total,
            rank,
            best_round: total / 12,
            mean_distance_miles: 100.0,
        }
    }

    fn sample_records() -> Vec<PlaythroughRecord> {
        vec![
            PlaythroughRecord {
                seed: 1,
                rounds_played: 12,
                location_ids: (1..=12).collect(),
                seats: vec![
                    seat(0, GuessStrategy::Oracle, 18_000, 1),
                    seat(1, GuessStrategy::Wild, 2_000, 2),
                ],
                shared_win: false,
                cue_count: 80,
                violations: Vec::new(),
            },
            PlaythroughRecord {
                seed: 2,
                rounds_played: 12,
                location_ids: (1..=12).collect(),
                seats: vec![
                    seat(0, GuessStrategy::Oracle, 18_000, 1),
                    seat(1, GuessStrategy::Wild, 18_000, 1),
                ],
                shared_win: true,
                cue_count: 80,
                violations: vec!["player 1 total fell".to_string()],
            },
        ]
    }

    #[test]
    fn summary_rolls_up_strategies() {
        let summary = summarize(&sample_records());
        assert_eq!(summary.playthroughs, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.shared_wins, 1);
        let oracle = &summary.strategies[0];
        assert_eq!(oracle.strategy, GuessStrategy::Oracle);
        assert_eq!(oracle.seats, 2);
        assert!((oracle.mean_total - 18_000.0).abs() < f64::EPSILON);
        assert!((oracle.win_rate - 1.0).abs() < f64::EPSILON);
        let wild = &summary.strategies[1];
        assert!((wild.mean_total - 10_000.0).abs() < f64::EPSILON);
        assert!((wild.win_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_summary_has_no_strategies() {
        let summary = summarize(&[]);
        assert_eq!(summary.playthroughs, 0);
        assert!(summary.strategies.is_empty());
        assert!(percent(0, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn json_report_is_parseable() {
        let records = sample_records();
        let summary = summarize(&records);
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &records, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["summary"]["playthroughs"], 2);
        assert_eq!(value["playthroughs"][1]["shared_win"], true);
        assert_eq!(value["playthroughs"][0]["seats"][0]["strategy"], "oracle");
    }

    #[test]
    fn markdown_report_lists_violations() {
        let records = sample_records();
        let summary = summarize(&records);
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &records, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Pinpoint Playthrough Results"));
        assert!(text.contains("| oracle | 2 |"));
        assert!(text.contains("⚠️ player 1 total fell"));
    }

    #[test]
    fn console_report_mentions_every_seed() {
        colored::control::set_override(false);
        let records = sample_records();
        let summary = summarize(&records);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &records, &summary, Duration::from_millis(5)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("seed 1"));
        assert!(text.contains("seed 2"));
        assert!(text.contains("Shared wins: 1 (50.0%)"));
    }
}
