use super::*;

/// Generation strategy with a fixed composition (three coins, three pizzas, three decorative icons) and a uniformly
/// random arrangement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self) -> Board {
        use rand::prelude::*;
        use rand::seq::SliceRandom;

        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut icons = [IconKind::Coin; CELL_COUNT];
        for (i, icon) in icons.iter_mut().enumerate() {
            *icon = match i / SCORING_ICON_COUNT {
                0 => IconKind::Coin,
                1 => IconKind::Pizza,
                _ => {
                    let pick = rng.random_range(0..OtherIcon::ALL.len());
                    IconKind::Other(OtherIcon::ALL[pick])
                }
            };
        }

        icons.shuffle(&mut rng);

        log::debug!("generated board with seed {}: {:?}", self.seed, icons);
        Board::from_icons(icons)
    }
}
