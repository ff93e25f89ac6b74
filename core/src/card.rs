use serde::{Deserialize, Serialize};

/// Decorative icons that never count towards a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtherIcon {
    Lightning,
    Fruit,
}

impl OtherIcon {
    pub const ALL: [Self; 2] = [Self::Lightning, Self::Fruit];

    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Lightning => "lightning",
            Self::Fruit => "fruit",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKind {
    Coin,
    Pizza,
    Other(OtherIcon),
}

impl IconKind {
    pub const fn is_scoring(self) -> bool {
        matches!(self, Self::Coin | Self::Pizza)
    }

    /// Image name used by the presentation layer, e.g. `/image/pizza.png`.
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Coin => "bitcoin",
            Self::Pizza => "pizza",
            Self::Other(other) => other.asset_name(),
        }
    }
}

/// A single card as stored by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub icon: IconKind,
    pub revealed: bool,
}

impl Card {
    pub const fn hidden(icon: IconKind) -> Self {
        Self {
            icon,
            revealed: false,
        }
    }
}
