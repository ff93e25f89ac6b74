use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

pub type IndicatorId = u32;

/// A floating "+points" label shown where a line was scored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreIndicator {
    pub id: IndicatorId,
    pub points: Score,
    /// Horizontal offset in pixels.
    pub left: u16,
    /// Vertical offset in pixels.
    pub top: u16,
    pub spawned_at: Millis,
}

/// Live score indicators, each one disappears `ttl_ms` after it was spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreIndicators {
    ttl_ms: Millis,
    next_id: IndicatorId,
    live: Vec<ScoreIndicator>,
}

impl ScoreIndicators {
    pub const fn new(ttl_ms: Millis) -> Self {
        Self {
            ttl_ms,
            next_id: 0,
            live: Vec::new(),
        }
    }

    pub fn spawn(&mut self, points: Score, (left, top): (u16, u16), now: Millis) -> IndicatorId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.push(ScoreIndicator {
            id,
            points,
            left,
            top,
            spawned_at: now,
        });
        id
    }

    /// Drops every indicator whose lifetime is over, returns how many were removed.
    pub fn expire(&mut self, now: Millis) -> usize {
        let before = self.live.len();
        let ttl_ms = self.ttl_ms;
        self.live
            .retain(|indicator| now.saturating_sub(indicator.spawned_at) < ttl_ms);
        before - self.live.len()
    }

    /// Earliest moment at which [`Self::expire`] will remove something.
    pub fn next_expiry(&self) -> Option<Millis> {
        self.live
            .iter()
            .map(|indicator| indicator.spawned_at.saturating_add(self.ttl_ms))
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreIndicator> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
