//! Game controller - session lifecycle, falling, scoring and leveling
//!
//! A session runs from [`GameController::start`] until the board tops out
//! (defeat), the maximum level is reached (victory), or it is stopped from
//! outside. Timer ticks and player input share one entry point,
//! [`GameController::tick`], and every call runs to completion before the
//! next event is looked at.

use log::{debug, info};

use crate::config::GameConfig;
use crate::field::Field;
use crate::records::{store_best, top_records, RecordStore};
use crate::render::Renderer;
use crate::rng::SimpleRng;
use crate::shape::ShapeKind;
use crate::timer::FallTimer;
use crate::types::{
    Action, Outcome, LEVEL_SCORE_STEP, POINTS_PER_LINE, RECORDS_PANEL_LIMIT, SPAWN_POSITION,
};

/// Mutable state of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Session {
    pub level: u32,
    pub fall_delay_ms: u32,
    pub score: u32,
    /// Shape that spawns after the current one comes to rest.
    pub next: ShapeKind,
    pub running: bool,
    pub outcome: Option<Outcome>,
}

impl Session {
    fn initial(config: &GameConfig, next: ShapeKind) -> Self {
        Self {
            level: 1,
            fall_delay_ms: config.fall_delay_ms,
            score: 0,
            next,
            running: false,
            outcome: None,
        }
    }
}

pub struct GameController<S: RecordStore, R: Renderer> {
    config: GameConfig,
    session: Session,
    field: Field,
    /// At most one live timer, present only while running.
    timer: Option<FallTimer>,
    rng: SimpleRng,
    store: S,
    renderer: R,
}

impl<S: RecordStore, R: Renderer> GameController<S, R> {
    pub fn new(config: GameConfig, store: S, renderer: R) -> Self {
        let config = config.normalized();
        let mut rng = SimpleRng::new(config.seed);
        let next = rng.random_kind();
        Self {
            session: Session::initial(&config, next),
            config,
            field: Field::new(),
            timer: None,
            rng,
            store,
            renderer,
        }
    }

    /// Begin a fresh session, discarding any session in progress.
    pub fn start(&mut self) {
        self.cancel_timer();

        let first = self.rng.random_kind();
        let next = self.rng.random_kind();
        self.session = Session::initial(&self.config, next);
        self.field = Field::new();
        // An empty field always has room at the spawn point.
        self.field
            .set_shape(first.shape(), SPAWN_POSITION.x, SPAWN_POSITION.y);

        self.session.running = true;
        self.timer = Some(FallTimer::start(self.session.fall_delay_ms));
        info!(
            "session started for {} (max level {}, fall delay {}ms)",
            self.config.username, self.config.max_level, self.session.fall_delay_ms
        );

        self.renderer.hide_records();
        self.renderer.show_next(&next.shape());
        self.renderer.show_score(self.session.score);
        self.renderer.show_level(self.session.level);
        self.renderer.draw(&self.field);
    }

    /// Apply one action, from the fall timer or from the player.
    ///
    /// Returns whether the action moved the shape. Ignored while stopped.
    pub fn tick(&mut self, action: Action) -> bool {
        if !self.session.running {
            return false;
        }

        let moved = self.field.move_shape(action);
        if self.field.fix_shape() {
            let lines = self.field.clear_completed_lines() as u32;
            self.session.score += POINTS_PER_LINE * lines;
            if lines > 0 {
                debug!("cleared {} line(s), score {}", lines, self.session.score);
            }

            let spawn = self.session.next;
            if !self
                .field
                .set_shape(spawn.shape(), SPAWN_POSITION.x, SPAWN_POSITION.y)
            {
                debug!("spawn of {} blocked", spawn.as_str());
                self.stop(Some(Outcome::Defeat));
                return moved;
            }

            self.session.next = self.rng.random_kind();
            self.renderer.show_next(&self.session.next.shape());
            self.renderer.show_score(self.session.score);

            if self.session.score > 0 && self.session.score >= self.session.level * LEVEL_SCORE_STEP
            {
                self.advance_level();
            }
        }

        self.renderer.show_level(self.session.level);
        self.renderer.draw(&self.field);
        moved
    }

    /// Feed elapsed game-loop time; runs one `Down` tick per due fall period.
    pub fn update(&mut self, elapsed_ms: u32) {
        if let Some(timer) = self.timer.as_mut() {
            timer.advance(elapsed_ms);
        }
        // A level change replaces the timer with a fresh one, which ends the catch-up.
        while self.session.running && self.timer.as_mut().is_some_and(FallTimer::fire) {
            self.tick(Action::Down);
        }
    }

    fn advance_level(&mut self) {
        self.session.level += 1;
        self.cancel_timer();
        self.session.fall_delay_ms = self.config.fall_delay_at(self.session.level);
        self.timer = Some(FallTimer::start(self.session.fall_delay_ms));
        info!(
            "level {} reached, fall delay {}ms",
            self.session.level, self.session.fall_delay_ms
        );

        if self.session.level == self.config.max_level {
            self.stop(Some(Outcome::Victory));
        }
    }

    /// End the session and store its score.
    ///
    /// With an outcome the records panel is shown under its label; `None`
    /// ends quietly. Stopping a stopped session does nothing.
    pub fn stop(&mut self, outcome: Option<Outcome>) {
        if !self.session.running {
            return;
        }
        self.session.running = false;
        self.session.outcome = outcome;
        self.cancel_timer();

        let best = store_best(&mut self.store, &self.config.username, self.session.score);
        info!(
            "session stopped ({}) with score {}, best {}",
            outcome.map_or("quit", |o| o.label()),
            self.session.score,
            best
        );

        if let Some(outcome) = outcome {
            let records = top_records(&self.store, RECORDS_PANEL_LIMIT);
            self.renderer.show_records(outcome, &records);
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn fall_delay_ms(&self) -> u32 {
        self.session.fall_delay_ms
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome
    }

    pub fn next_shape(&self) -> ShapeKind {
        self.session.next
    }

    /// Interval of the live fall timer, if any.
    pub fn timer_interval_ms(&self) -> Option<u32> {
        self.timer.as_ref().map(FallTimer::interval_ms)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{MemoryRecordStore, Record};
    use crate::shape::Shape;
    use crate::types::{CellState, Point, FIELD_WIDTH};

    #[derive(Default)]
    struct Recorder {
        draws: usize,
        hides: usize,
        scores: Vec<u32>,
        nexts: Vec<Shape>,
        records: Option<(Outcome, Vec<Record>)>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, _field: &Field) {
            self.draws += 1;
        }

        fn show_next(&mut self, shape: &Shape) {
            self.nexts.push(shape.clone());
        }

        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn show_records(&mut self, outcome: Outcome, records: &[Record]) {
            self.records = Some((outcome, records.to_vec()));
        }

        fn hide_records(&mut self) {
            self.hides += 1;
        }
    }

    type TestGame = GameController<MemoryRecordStore, Recorder>;

    fn game_with(config: GameConfig) -> TestGame {
        let mut game = GameController::new(config, MemoryRecordStore::new(), Recorder::default());
        game.start();
        game
    }

    /// Settle `rows` completely except column 4, and put a vertical I above the gap.
    fn prepare_clear(game: &mut TestGame, rows: &[i32]) {
        let mut field = Field::new();
        for &y in rows {
            for x in (0..FIELD_WIDTH).filter(|&x| x != 4) {
                field.settle(x, y);
            }
        }
        assert!(field.set_shape(ShapeKind::I.shape(), 4, 3));
        game.field = field;
        game.session.next = ShapeKind::O;
    }

    #[test]
    fn start_initializes_session() {
        let game = game_with(GameConfig::default());
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.fall_delay_ms(), 1000);
        assert_eq!(game.timer_interval_ms(), Some(1000));
        assert!(game.field().current_shape().is_some());
        assert_eq!(game.field().shape_position(), SPAWN_POSITION);

        let r = game.renderer();
        assert_eq!(r.hides, 1);
        assert_eq!(r.draws, 1);
        assert_eq!(r.scores, vec![0]);
        assert_eq!(r.nexts, vec![game.next_shape().shape()]);
    }

    #[test]
    fn single_line_awards_250() {
        let mut game = game_with(GameConfig::default());
        prepare_clear(&mut game, &[19]);

        game.tick(Action::Set);
        assert_eq!(game.score(), 250);
        assert_eq!(game.level(), 1);
        assert!(game.is_running());
        // Leftover I cells sit on top of the cleared row's remains.
        assert_eq!(game.field().cell(4, 19), CellState::Settled);
        assert_eq!(game.field().cell(0, 19), CellState::Free);
    }

    #[test]
    fn reaching_500_advances_exactly_one_level() {
        let mut game = game_with(GameConfig::default());
        prepare_clear(&mut game, &[18, 19]);

        game.tick(Action::Set);
        assert_eq!(game.score(), 500);
        assert_eq!(game.level(), 2);
        assert_eq!(game.fall_delay_ms(), 900);
        assert_eq!(game.timer_interval_ms(), Some(900));
        assert!(game.is_running());
    }

    #[test]
    fn level_delay_follows_config_curve() {
        let config = GameConfig {
            max_level: 4,
            fall_delay_decrement_ms: 250,
            ..GameConfig::default()
        };
        let mut game = game_with(config);
        prepare_clear(&mut game, &[18, 19]);

        game.tick(Action::Set);
        assert_eq!(game.level(), 2);
        assert_eq!(game.fall_delay_ms(), game.config().fall_delay_at(2));
        assert_eq!(game.fall_delay_ms(), 750);
    }

    #[test]
    fn four_lines_catch_up_one_level_per_fix() {
        let mut game = game_with(GameConfig::default());
        prepare_clear(&mut game, &[16, 17, 18, 19]);

        game.tick(Action::Set);
        assert_eq!(game.score(), 1000);
        assert_eq!(game.level(), 2);
        assert_eq!(game.fall_delay_ms(), 900);

        // The O spawned after the clear lands with no lines; the second threshold is met now.
        game.tick(Action::Set);
        assert_eq!(game.score(), 1000);
        assert_eq!(game.level(), 3);
        assert_eq!(game.fall_delay_ms(), 800);
        assert_eq!(game.timer_interval_ms(), Some(800));
    }

    #[test]
    fn reaching_max_level_wins() {
        let config = GameConfig {
            max_level: 2,
            username: "ann".to_string(),
            ..GameConfig::default()
        };
        let mut game = game_with(config);
        prepare_clear(&mut game, &[18, 19]);

        game.tick(Action::Set);
        assert!(!game.is_running());
        assert_eq!(game.outcome(), Some(Outcome::Victory));
        assert_eq!(game.timer_interval_ms(), None);

        let (outcome, records) = game.renderer().records.clone().unwrap();
        assert_eq!(outcome.label(), "Victory");
        assert_eq!(
            records,
            vec![Record {
                username: "ann".to_string(),
                score: 500
            }]
        );
    }

    #[test]
    fn blocked_spawn_loses() {
        let mut game = game_with(GameConfig::default());
        let mut field = Field::new();
        field.settle(SPAWN_POSITION.x, SPAWN_POSITION.y);
        assert!(field.set_shape(ShapeKind::I.shape(), 8, 18));
        game.field = field;
        game.session.next = ShapeKind::O;
        let draws_before = game.renderer().draws;

        game.tick(Action::Down);
        assert!(!game.is_running());
        assert_eq!(game.outcome(), Some(Outcome::Defeat));
        assert_eq!(game.store().get("player"), Some(0));
        assert_eq!(game.renderer().records.as_ref().unwrap().0, Outcome::Defeat);
        // Loss returns before redrawing.
        assert_eq!(game.renderer().draws, draws_before);
    }

    #[test]
    fn timer_moves_shape_down() {
        let mut game = game_with(GameConfig::default());
        game.update(999);
        assert_eq!(game.field().shape_position(), SPAWN_POSITION);
        game.update(1);
        assert_eq!(
            game.field().shape_position(),
            SPAWN_POSITION + Point::new(0, 1)
        );
    }

    #[test]
    fn stopped_session_ignores_input_and_timer() {
        let mut game = game_with(GameConfig::default());
        game.stop(None);
        assert!(game.renderer().records.is_none());
        assert_eq!(game.timer_interval_ms(), None);

        let before = game.field().clone();
        assert!(!game.tick(Action::Left));
        game.update(10_000);
        assert_eq!(game.field(), &before);
    }

    #[test]
    fn restart_resets_level_and_delay() {
        let mut game = game_with(GameConfig::default());
        prepare_clear(&mut game, &[18, 19]);
        game.tick(Action::Set);
        assert_eq!(game.level(), 2);

        game.start();
        assert_eq!(game.level(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.fall_delay_ms(), 1000);
        assert_eq!(game.timer_interval_ms(), Some(1000));
    }
}
