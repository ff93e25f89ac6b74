use serde::{Deserialize, Serialize};

use crate::IconKind;

/// Icon composition that makes a fully revealed line score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineRule {
    AllPizza,
    AllCoin,
    TwoPizzaOneCoin,
    TwoCoinOnePizza,
}

impl LineRule {
    /// Classifies a line by icon counts, the order of the cards does not matter.
    pub fn classify(icons: [IconKind; 3]) -> Option<Self> {
        let pizza = icons.iter().filter(|&&icon| icon == IconKind::Pizza).count();
        let coin = icons.iter().filter(|&&icon| icon == IconKind::Coin).count();

        match (pizza, coin) {
            (3, _) => Some(Self::AllPizza),
            (_, 3) => Some(Self::AllCoin),
            (2, 1) => Some(Self::TwoPizzaOneCoin),
            (1, 2) => Some(Self::TwoCoinOnePizza),
            _ => None,
        }
    }
}
