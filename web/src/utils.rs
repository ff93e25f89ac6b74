use pizzaday_core::Millis;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use web_time::Instant;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Milliseconds elapsed since `origin` on a monotonic clock, as seen by the engine.
pub(crate) fn millis_since(origin: Instant) -> Millis {
    origin.elapsed().as_millis().try_into().unwrap_or(Millis::MAX)
}

/// Turns a user supplied seed into a numeric one: plain numbers are used as-is, anything else is hashed.
pub(crate) fn seed_from_str(seed: &str) -> u64 {
    seed.parse().unwrap_or_else(|_| {
        let mut hasher = FxHasher::default();
        seed.hash(&mut hasher);
        hasher.finish()
    })
}
