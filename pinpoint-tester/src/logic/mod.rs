pub mod policy;
pub mod reports;
pub mod simulation;

pub use policy::GuessStrategy;
pub use reports::{RunSummary, summarize};
pub use simulation::{PlaythroughRecord, SimulationError, run_playthrough};

/// Seat `i` plays `strategies[i % strategies.len()]`.
#[must_use]
pub fn build_lineup(strategies: &[GuessStrategy], players: usize) -> Vec<GuessStrategy> {
    if strategies.is_empty() {
        return Vec::new();
    }
    strategies.iter().copied().cycle().take(players).collect()
}

/// Play every seed `iterations` times, offsetting the seed per iteration.
///
/// # Errors
///
/// Propagates the first [`SimulationError`] raised by a playthrough.
pub fn run_batch(
    seeds: &[u64],
    lineup: &[GuessStrategy],
    iterations: usize,
) -> Result<Vec<PlaythroughRecord>, SimulationError> {
    let mut records = Vec::with_capacity(seeds.len() * iterations);
    for &seed in seeds {
        for iteration in 0..iterations {
            let run_seed = seed.wrapping_add(u64::try_from(iteration).unwrap_or(u64::MAX));
            log::debug!("playthrough seed {run_seed} ({} seats)", lineup.len());
            records.push(run_playthrough(run_seed, lineup)?);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineup_cycles_strategies() {
        let lineup = build_lineup(&[GuessStrategy::Oracle, GuessStrategy::Wild], 5);
        assert_eq!(
            lineup,
            vec![
                GuessStrategy::Oracle,
                GuessStrategy::Wild,
                GuessStrategy::Oracle,
                GuessStrategy::Wild,
                GuessStrategy::Oracle,
            ]
        );
        assert!(build_lineup(&[], 3).is_empty());
    }

    #[test]
    fn batch_offsets_seeds_per_iteration() {
        let records = run_batch(&[100, 500], &[GuessStrategy::Near], 2).unwrap();
        let seeds: Vec<u64> = records.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 500, 501]);
        assert!(records.iter().all(PlaythroughRecord::passed));
    }
}
