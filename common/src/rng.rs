use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded when a seed is provided so runs can be replayed, otherwise drawn from entropy.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
