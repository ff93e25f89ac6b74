use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Active,
    Ended,
}

impl GameStatus {
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// What happened to a single flip request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The card was turned face up.
    Revealed,
    /// The card was already face up.
    AlreadyRevealed,
    /// The card belongs to a line that already scored.
    Locked,
    /// No more flips are accepted in this game.
    GameEnded,
    /// The same card was requested again within the cooldown.
    Debounced,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// Notifications for the presentation layer (sounds, animations, overlays).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardFlipped(CellIndex),
    LineScored {
        line: Line,
        rule: LineRule,
        points: Score,
        indicator: IndicatorId,
    },
    GameEnded {
        score: Score,
    },
}

pub type GameEvents = SmallVec<[GameEvent; 4]>;

#[derive(Clone, Debug, PartialEq)]
pub struct FlipReport {
    pub outcome: FlipOutcome,
    pub events: GameEvents,
}

impl FlipReport {
    fn ignored(outcome: FlipOutcome) -> Self {
        Self {
            outcome,
            events: GameEvents::new(),
        }
    }

    pub fn scored_lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.events.iter().filter_map(|event| match event {
            GameEvent::LineScored { line, .. } => Some(*line),
            _ => None,
        })
    }

    pub fn ended_game(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::GameEnded { .. }))
    }
}

/// Per-card state as the presentation layer needs it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub cell: CellIndex,
    pub icon: IconKind,
    pub revealed: bool,
    pub in_scored_line: bool,
}

/// State of one game, from the freshly shuffled board to the end overlay.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    flipped: Vec<CellIndex>,
    scored_lines: Vec<Line>,
    score: Score,
    status: GameStatus,
    debouncer: FlipDebouncer,
    indicators: ScoreIndicators,
    rng: SmallRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let board = RandomBoardGenerator::new(seed).generate();
        Self::with_board(config, board, seed)
    }

    /// Starts a game on a prepared board, `seed` only drives indicator placement.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Self {
        Self {
            config,
            board,
            flipped: Vec::with_capacity(CELL_COUNT),
            scored_lines: Vec::new(),
            score: 0,
            status: GameStatus::default(),
            debouncer: FlipDebouncer::new(config.debounce_ms),
            indicators: ScoreIndicators::new(config.indicator_ttl_ms),
            // separate stream from the one that shuffled the board
            rng: SmallRng::seed_from_u64(seed.rotate_left(32)),
        }
    }

    /// Replaces this game with a freshly generated one, only allowed once the game has ended.
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        if !self.status.is_ended() {
            return Err(GameError::NotEnded);
        }
        log::debug!("new game, seed: {}", seed);
        *self = Self::new(self.config, seed);
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status.is_ended()
    }

    /// Flipped cards in the order they were revealed.
    pub fn flipped(&self) -> &[CellIndex] {
        &self.flipped
    }

    pub fn scored_lines(&self) -> &[Line] {
        &self.scored_lines
    }

    pub fn indicators(&self) -> &ScoreIndicators {
        &self.indicators
    }

    pub fn is_flipped(&self, cell: CellIndex) -> bool {
        self.flipped.contains(&cell)
    }

    pub fn in_scored_line(&self, cell: CellIndex) -> bool {
        self.scored_lines.iter().any(|line| line.contains(cell))
    }

    pub fn card(&self, cell: CellIndex) -> CardView {
        let card = self.board.card(cell);
        CardView {
            cell,
            icon: card.icon,
            revealed: card.revealed,
            in_scored_line: self.in_scored_line(cell),
        }
    }

    pub fn cards(&self) -> impl Iterator<Item = CardView> + '_ {
        CellIndex::all().map(|cell| self.card(cell))
    }

    /// Same as [`Self::flip`] but takes the 1-based card id.
    pub fn flip_id(&mut self, id: u8, now: Millis) -> Result<FlipReport> {
        let cell = CellIndex::from_id(id)?;
        Ok(self.flip(cell, now))
    }

    pub fn flip(&mut self, cell: CellIndex, now: Millis) -> FlipReport {
        use FlipOutcome::*;

        if !self.debouncer.try_accept(cell, now) {
            log::trace!("card {} debounced", cell.id());
            return FlipReport::ignored(Debounced);
        }

        if self.status.is_ended() {
            return FlipReport::ignored(GameEnded);
        }

        if self.in_scored_line(cell) {
            return FlipReport::ignored(Locked);
        }

        if self.is_flipped(cell) {
            return FlipReport::ignored(AlreadyRevealed);
        }

        let mut events = GameEvents::new();
        self.board.reveal(cell);
        self.flipped.push(cell);
        events.push(GameEvent::CardFlipped(cell));
        log::trace!("card {} flipped: {:?}", cell.id(), self.board.icon_at(cell));

        if self.flipped.len() >= self.config.min_flips_to_evaluate {
            self.evaluate_lines(now, &mut events);
        }

        FlipReport {
            outcome: Revealed,
            events,
        }
    }

    /// Removes score indicators whose lifetime is over.
    pub fn expire_indicators(&mut self, now: Millis) -> usize {
        self.indicators.expire(now)
    }

    fn evaluate_lines(&mut self, now: Millis, events: &mut GameEvents) {
        for line in LINES.iter() {
            if self.scored_lines.contains(line) {
                continue;
            }

            if !line.cells().iter().all(|&cell| self.is_flipped(cell)) {
                continue;
            }

            let Some(rule) = LineRule::classify(self.board.line_icons(line)) else {
                continue;
            };

            let points = self.config.points_per_line;
            self.score = self.score.saturating_add(points);
            self.scored_lines.push(*line);
            let indicator = self.spawn_indicator(points, now);
            log::debug!("line {:?} scored ({:?}), score: {}", line, rule, self.score);
            events.push(GameEvent::LineScored {
                line: *line,
                rule,
                points,
                indicator,
            });
        }

        if self.flipped.len() == self.config.end_at_flipped {
            self.status = GameStatus::Ended;
            log::debug!("game ended, score: {}", self.score);
            events.push(GameEvent::GameEnded { score: self.score });
        }
    }

    fn spawn_indicator(&mut self, points: Score, now: Millis) -> IndicatorId {
        use rand::prelude::*;

        let area = self.config.indicator_area.max(1);
        let position = (self.rng.random_range(0..area), self.rng.random_range(0..area));
        self.indicators.spawn(points, position, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IconKind::*;

    const O: IconKind = Other(OtherIcon::Lightning);
    const F: IconKind = Other(OtherIcon::Fruit);

    fn engine(icons: [IconKind; CELL_COUNT]) -> GameEngine {
        GameEngine::with_board(GameConfig::default(), Board::from_icons(icons), 0)
    }

    fn cell(index: u8) -> CellIndex {
        CellIndex::new(index).unwrap()
    }

    /// Flips `ids` (1-based) far enough apart that the cooldown never interferes.
    fn flip_ids(engine: &mut GameEngine, ids: &[u8], start: Millis) -> Vec<FlipReport> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| engine.flip_id(id, start + i as Millis * 10).unwrap())
            .collect()
    }

    const PIZZA_ROW: [IconKind; CELL_COUNT] = [Pizza, Pizza, Pizza, Coin, O, F, O, Coin, Coin];

    #[test]
    fn pizza_row_scores_once() {
        let mut engine = engine(PIZZA_ROW);

        let reports = flip_ids(&mut engine, &[1, 2, 3], 0);

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.scored_lines(), &[LINES[0]]);
        let last = reports.last().unwrap();
        assert_eq!(last.scored_lines().collect::<Vec<_>>(), [LINES[0]]);
        assert!(last.events.iter().any(|event| matches!(
            event,
            GameEvent::LineScored {
                rule: LineRule::AllPizza,
                points: 10,
                ..
            }
        )));
        assert_eq!(engine.indicators().len(), 1);
        assert!(engine.card(cell(1)).in_scored_line);
    }

    #[test]
    fn flipping_scored_card_again_changes_nothing() {
        let mut engine = engine(PIZZA_ROW);
        flip_ids(&mut engine, &[1, 2, 3], 0);

        let quick = engine.flip_id(1, 30).unwrap();
        let later = engine.flip_id(1, 5000).unwrap();

        assert_eq!(quick.outcome, FlipOutcome::Debounced);
        assert_eq!(later.outcome, FlipOutcome::Locked);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.flipped().len(), 3);
        assert_eq!(engine.scored_lines().len(), 1);
    }

    #[test]
    fn double_flip_inside_cooldown_counts_once() {
        let mut engine = engine(PIZZA_ROW);

        let first = engine.flip(cell(4), 0);
        let second = engine.flip(cell(4), 500);
        let third = engine.flip(cell(4), 1000);

        assert_eq!(first.outcome, FlipOutcome::Revealed);
        assert_eq!(first.events.as_slice(), &[GameEvent::CardFlipped(cell(4))]);
        assert_eq!(second.outcome, FlipOutcome::Debounced);
        assert_eq!(third.outcome, FlipOutcome::AlreadyRevealed);
        assert_eq!(engine.flipped(), &[cell(4)]);
    }

    #[test]
    fn two_coins_one_pizza_column_scores_once() {
        let mut engine = engine([O, F, Coin, O, F, Coin, F, O, Pizza]);

        flip_ids(&mut engine, &[3, 6, 9, 1, 2, 4, 5], 0);

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.scored_lines(), &[LINES[5]]);
    }

    #[test]
    fn cards_of_scored_line_are_locked() {
        let mut engine = engine([Pizza, Coin, O, Coin, Pizza, F, O, Pizza, Coin]);
        flip_ids(&mut engine, &[1, 5, 9], 0);
        assert_eq!(engine.scored_lines(), &[LINES[6]]);

        let report = engine.flip_id(5, 5000).unwrap();

        assert_eq!(report.outcome, FlipOutcome::Locked);
        assert!(report.events.is_empty());
        assert_eq!(engine.flipped().len(), 3);
        assert_eq!(engine.flip_id(2, 5000).unwrap().outcome, FlipOutcome::Revealed);
    }

    #[test]
    fn one_flip_can_score_several_lines() {
        let mut engine = engine([O, Pizza, F, Coin, Pizza, Coin, F, Pizza, O]);
        flip_ids(&mut engine, &[2, 8, 4, 6], 0);
        assert_eq!(engine.score(), 0);

        let report = engine.flip_id(5, 1000).unwrap();

        assert_eq!(
            report.scored_lines().collect::<Vec<_>>(),
            [LINES[1], LINES[4]]
        );
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.indicators().len(), 2);
    }

    #[test]
    fn eight_flips_without_lines_end_the_game() {
        let mut engine = engine([Pizza, Coin, O, Coin, F, Pizza, O, Pizza, Coin]);

        let reports = flip_ids(&mut engine, &[1, 2, 3, 4, 5, 6, 7], 0);
        assert!(reports.iter().all(|report| !report.ended_game()));
        assert_eq!(engine.status(), GameStatus::Active);

        let last = engine.flip_id(8, 1000).unwrap();
        assert!(last.ended_game());
        assert_eq!(engine.status(), GameStatus::Ended);
        assert_eq!(engine.score(), 0);

        let after = engine.flip_id(9, 2000).unwrap();
        assert_eq!(after.outcome, FlipOutcome::GameEnded);
        assert!(!engine.card(cell(8)).revealed);
        assert_eq!(engine.status(), GameStatus::Ended);
    }

    #[test]
    fn nothing_is_evaluated_before_three_flips() {
        let config = GameConfig {
            min_flips_to_evaluate: 3,
            end_at_flipped: 2,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_board(config, Board::from_icons(PIZZA_ROW), 0);

        flip_ids(&mut engine, &[4, 5], 0);

        assert_eq!(engine.status(), GameStatus::Active);
    }

    #[test]
    fn new_game_starts_active() {
        let engine = engine(PIZZA_ROW);

        assert_eq!(GameStatus::default(), GameStatus::Active);
        assert_eq!(engine.status(), GameStatus::Active);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn invalid_card_id_is_rejected() {
        let mut engine = engine(PIZZA_ROW);

        assert_eq!(engine.flip_id(0, 0), Err(GameError::InvalidCell));
        assert_eq!(engine.flip_id(10, 0), Err(GameError::InvalidCell));
    }

    #[test]
    fn reset_requires_finished_game() {
        let mut engine = GameEngine::new(GameConfig::default(), 1);
        assert_eq!(engine.reset(2), Err(GameError::NotEnded));

        let ids = engine
            .cards()
            .map(|card| card.cell.id())
            .collect::<Vec<_>>();
        for (i, id) in ids.into_iter().enumerate() {
            engine.flip_id(id, i as Millis * 10).unwrap();
        }

        assert!(engine.is_ended());
        assert!(engine.reset(2).is_ok());
        assert_eq!(engine.score(), 0);
        assert!(engine.flipped().is_empty());
        assert!(engine.scored_lines().is_empty());
        assert!(engine.indicators().is_empty());
        assert_eq!(engine.status(), GameStatus::Active);
    }

    #[test]
    fn reset_discards_previous_game() {
        let mut engine = engine([Pizza, Coin, O, Coin, F, Pizza, O, Pizza, Coin]);
        flip_ids(&mut engine, &[1, 2, 3, 4, 5, 6, 7, 8], 0);
        assert!(engine.is_ended());

        engine.reset(99).unwrap();

        assert_eq!(engine.status(), GameStatus::Active);
        assert_eq!(engine.score(), 0);
        assert!(engine.flipped().is_empty());
        assert_eq!(engine.board(), &RandomBoardGenerator::new(99).generate());
        assert_eq!(engine.flip(cell(0), 0).outcome, FlipOutcome::Revealed);
    }

    #[test]
    fn indicators_expire_after_their_lifetime() {
        let mut engine = engine(PIZZA_ROW);
        flip_ids(&mut engine, &[1, 2, 3], 0);
        let indicator = *engine.indicators().iter().next().unwrap();
        assert!(indicator.left < 280 && indicator.top < 280);

        assert_eq!(engine.expire_indicators(indicator.spawned_at + 999), 0);
        assert_eq!(engine.expire_indicators(indicator.spawned_at + 1000), 1);
        assert!(engine.indicators().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_grows_by_whole_lines_and_end_is_final(
                seed in any::<u64>(),
                steps in proptest::collection::vec((0u8..9, 0u64..1500), 1..40),
            ) {
                let mut engine = GameEngine::new(GameConfig::default(), seed);
                let mut now = 0;
                let mut prev_score = 0;
                let mut was_ended = false;

                for (index, delta) in steps {
                    now += delta;
                    let report = engine.flip(CellIndex::new(index).unwrap(), now);

                    prop_assert!(engine.score() >= prev_score);
                    prop_assert_eq!(
                        engine.score() - prev_score,
                        10 * report.scored_lines().count() as Score
                    );
                    prop_assert_eq!(engine.score(), 10 * engine.scored_lines().len() as Score);
                    for (i, line) in engine.scored_lines().iter().enumerate() {
                        prop_assert!(!engine.scored_lines()[i + 1..].contains(line));
                    }
                    prop_assert!(engine.flipped().len() <= 8);
                    if was_ended {
                        prop_assert!(engine.is_ended());
                        prop_assert!(!report.ended_game());
                    }
                    if engine.is_ended() {
                        prop_assert_eq!(engine.flipped().len(), 8);
                    }

                    prev_score = engine.score();
                    was_ended = engine.is_ended();
                }
            }
        }
    }
}
