use pinpoint_game::{Player, rank_players, rank_scores};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn roster(scores: &[u32]) -> Vec<Player> {
    scores
        .iter()
        .enumerate()
        .map(|(seat, &total_score)| Player {
            total_score,
            ..Player::placeholder(u32::try_from(seat).unwrap(), seat)
        })
        .collect()
}

#[test]
fn ranks_match_competition_definition_on_random_rosters() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    for _ in 0..200 {
        let len = rng.gen_range(1..=8);
        // Narrow score band forces frequent ties.
        let scores: Vec<u32> = (0..len).map(|_| rng.gen_range(0..5) * 100).collect();
        let players = roster(&scores);
        let ranked = rank_players(&players);
        let by_position = rank_scores(&scores);

        assert_eq!(ranked.len(), scores.len());
        assert_eq!(ranked[0].rank, 1);
        for window in ranked.windows(2) {
            assert!(window[0].player.total_score >= window[1].player.total_score);
            if window[0].player.total_score == window[1].player.total_score {
                assert_eq!(window[0].rank, window[1].rank);
            } else {
                assert!(window[1].rank > window[0].rank);
            }
        }
        for entry in &ranked {
            let above = scores
                .iter()
                .filter(|&&s| s > entry.player.total_score)
                .count();
            assert_eq!(entry.rank as usize, above + 1);
            assert_eq!(by_position[entry.player.id as usize], entry.rank);
        }
    }
}

#[test]
fn documented_examples() {
    assert_eq!(rank_scores(&[900, 900, 700]), vec![1, 1, 3]);
    assert_eq!(rank_scores(&[500, 400, 300, 300]), vec![1, 2, 3, 3]);
    assert_eq!(rank_scores(&[100, 100, 90, 80]), vec![1, 1, 3, 4]);
}
