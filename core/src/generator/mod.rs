use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self) -> Board;
}

/// How many of each scoring icon a generated board holds.
pub const SCORING_ICON_COUNT: usize = 3;
