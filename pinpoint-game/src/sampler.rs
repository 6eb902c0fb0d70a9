//! Uniform sampling of journey locations.

use hmac::{Hmac, Mac};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::SAMPLER_DOMAIN_TAG;

/// Return a uniformly shuffled copy of `items` (Fisher–Yates).
///
/// The input slice is never reordered.
#[must_use]
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Shuffle `items` and keep the first `count` entries.
///
/// Returns `None` when the collection holds fewer than `count` entries.
#[must_use]
pub fn sample_prefix<T, R>(items: &[T], count: usize, rng: &mut R) -> Option<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if count > items.len() {
        return None;
    }
    let mut out = shuffled(items, rng);
    out.truncate(count);
    Some(out)
}

/// Build the location-sampling RNG for a user-visible seed.
#[must_use]
pub fn journey_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, SAMPLER_DOMAIN_TAG))
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
