use crate::*;

/// Per-card cooldown that swallows repeated flip requests coming from a single interaction.
///
/// Independent of the game state: a request that passes the cooldown restarts it even when the engine then ignores
/// the flip.
#[derive(Clone, Debug, PartialEq)]
pub struct FlipDebouncer {
    cooldown_ms: Millis,
    last_accepted: [Option<Millis>; CELL_COUNT],
}

impl FlipDebouncer {
    pub const fn new(cooldown_ms: Millis) -> Self {
        Self {
            cooldown_ms,
            last_accepted: [None; CELL_COUNT],
        }
    }

    /// Returns `false` while `cell` is still cooling down from its previous accepted request.
    pub fn try_accept(&mut self, cell: CellIndex, now: Millis) -> bool {
        let cooldown_ms = self.cooldown_ms;
        let slot = &mut self.last_accepted[cell.index()];
        // a timestamp older than the last accepted one restarts the cooldown instead of waiting for the clock
        let cooling_down = (*slot)
            .and_then(|accepted_at| now.checked_sub(accepted_at))
            .is_some_and(|elapsed| elapsed < cooldown_ms);
        if cooling_down {
            return false;
        }
        *slot = Some(now);
        true
    }
}
