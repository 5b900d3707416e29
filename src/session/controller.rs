use std::time::Duration;

use tracing::{debug, info, warn};

use super::persistence::HighScoreStore;
use super::scheduler::{Scheduler, TaskHandle, TimerEvent, TimerKind};
use crate::error::GameResult;
use crate::game::{
    CollisionType, Direction, GameConfig, GridSpec, InputArbiter, Position, Snake, TickEngine,
    TickOutcome,
};
use crate::metrics::GameMetrics;

/// Period of the elapsed-time clock
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(1);

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// No free cell was left for food
    BoardFilled,
    /// Stopped from outside
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Ended(EndReason),
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: GridSpec,
    pub snake: Option<&'a Snake>,
    pub food: Option<Position>,
    pub status: SessionStatus,
    pub score: u32,
    pub high_score: u32,
    pub metrics: &'a GameMetrics,
}

/// Owns one game: its lifecycle, snake, food, input and timers.
pub struct SessionController<S, H> {
    config: GameConfig,
    grid: GridSpec,
    initial_snake: Snake,
    engine: TickEngine,
    arbiter: InputArbiter,
    snake: Option<Snake>,
    food: Option<Position>,
    status: SessionStatus,
    score: u32,
    high_score: u32,
    metrics: GameMetrics,
    scheduler: S,
    store: H,
    timers: Vec<TaskHandle>,
    epoch: u64,
}

impl<S: Scheduler, H: HighScoreStore> SessionController<S, H> {
    /// Validates the initial placement against `grid` and loads the high
    /// score. An unreadable store is logged and treated as 0.
    pub fn new(
        config: GameConfig,
        grid: GridSpec,
        engine: TickEngine,
        scheduler: S,
        store: H,
    ) -> GameResult<Self> {
        let initial_snake = config.initial_snake(&grid)?;
        let high_score = store.load_high_score().unwrap_or_else(|err| {
            warn!(error = %err, "could not load high score, starting from 0");
            0
        });

        Ok(Self {
            arbiter: InputArbiter::new(initial_snake.direction),
            config,
            grid,
            initial_snake,
            engine,
            snake: None,
            food: None,
            status: SessionStatus::Idle,
            score: 0,
            high_score,
            metrics: GameMetrics::new(),
            scheduler,
            store,
            timers: Vec::new(),
            epoch: 0,
        })
    }

    /// Begin a new session from any state. A running session is ended as
    /// stopped first.
    pub fn start(&mut self) {
        if self.status == SessionStatus::Running {
            self.end(EndReason::Stopped);
        }
        self.cancel_timers();
        self.epoch += 1;
        self.score = 0;
        self.metrics.on_game_start();

        let snake = self.initial_snake.clone();
        self.arbiter.reset(snake.direction);

        let Some(food) = self.engine.spawn_food(&self.grid, &snake) else {
            // The starting snake already covers the grid
            self.end(EndReason::BoardFilled);
            return;
        };

        self.snake = Some(snake);
        self.food = Some(food);
        self.status = SessionStatus::Running;

        let tick = self.scheduler.schedule_repeating(
            self.config.tick_interval(),
            TimerEvent {
                kind: TimerKind::Tick,
                epoch: self.epoch,
            },
        );
        let clock = self.scheduler.schedule_repeating(
            CLOCK_INTERVAL,
            TimerEvent {
                kind: TimerKind::Clock,
                epoch: self.epoch,
            },
        );
        self.timers = vec![tick, clock];

        info!(epoch = self.epoch, ?food, "session started");
    }

    /// Same as [`start`](Self::start); kept separate for the lifecycle triggers
    pub fn restart(&mut self) {
        debug!(from = ?self.status, "restart requested");
        self.start();
    }

    /// End a running session. Safe to call in any state.
    pub fn stop(&mut self) {
        if self.status == SessionStatus::Running {
            self.end(EndReason::Stopped);
        } else {
            self.cancel_timers();
        }
    }

    /// Buffer a steering request for the next tick. Ignored unless running.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.arbiter.request(direction)
    }

    /// Apply a scheduler event. Events from an earlier session are dropped.
    pub fn on_timer(&mut self, event: TimerEvent) -> Option<TickOutcome> {
        if event.epoch != self.epoch {
            debug!(epoch = event.epoch, current = self.epoch, "dropping stale timer event");
            return None;
        }

        match event.kind {
            TimerKind::Tick => self.tick(),
            TimerKind::Clock => {
                if self.status == SessionStatus::Running {
                    self.metrics.on_clock_tick();
                }
                None
            }
        }
    }

    /// Advance the running session by one step
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.status != SessionStatus::Running {
            return None;
        }
        let (Some(snake), Some(food)) = (self.snake.as_mut(), self.food.as_mut()) else {
            return None;
        };

        let heading = self.arbiter.commit();
        let outcome = self.engine.tick(&self.grid, snake, food, heading);

        if outcome.scored() {
            self.award_points();
        }

        match outcome {
            TickOutcome::Continue { .. } => {}
            TickOutcome::Collided(collision) => self.end(EndReason::Collision(collision)),
            TickOutcome::BoardFilled => self.end(EndReason::BoardFilled),
        }

        Some(outcome)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: self.snake.as_ref(),
            food: self.food,
            status: self.status,
            score: self.score,
            high_score: self.high_score,
            metrics: &self.metrics,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Points for one food; the high score is written through as soon as
    /// it is beaten.
    fn award_points(&mut self) {
        self.score = self.score.saturating_add(self.config.points_per_food);
        if self.score <= self.high_score {
            return;
        }

        self.high_score = self.score;
        info!(high_score = self.high_score, "new high score");
        if let Err(err) = self.store.save_high_score(self.high_score) {
            warn!(error = %err, "could not persist high score");
        }
    }

    fn end(&mut self, reason: EndReason) {
        self.cancel_timers();
        self.status = SessionStatus::Ended(reason);
        self.snake = None;
        self.food = None;
        self.metrics.on_game_over();
        info!(?reason, score = self.score, elapsed = %self.metrics.format_time(), "session ended");
    }

    fn cancel_timers(&mut self) {
        for timer in &mut self.timers {
            timer.cancel();
        }
        self.timers.clear();
    }
}
