use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GridSpec, TickEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::renderer::{CELL_WIDTH, Renderer};
use crate::session::{JsonFileStore, SessionController, SessionStatus, TimerEvent, TokioScheduler};

type Controller = SessionController<TokioScheduler, JsonFileStore>;

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    controller: Controller,
    timer_events: UnboundedReceiver<TimerEvent>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Build the session. Without a configured grid size the grid is fitted
    /// to the current terminal once, here.
    pub fn new(config: GameConfig) -> Result<Self> {
        let grid = match config.fixed_grid() {
            Some(grid) => grid?,
            None => fit_terminal()?,
        };
        info!(rows = grid.rows(), cols = grid.cols(), "grid ready");

        let (scheduler, timer_events) = TokioScheduler::new();
        let store = JsonFileStore::new(&config.high_score_path);
        debug!(path = ?store.path(), "high score store");
        let controller =
            SessionController::new(config, grid, TickEngine::default(), scheduler, store)
                .context("Invalid game configuration")?;

        Ok(Self {
            controller,
            timer_events,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        self.controller.stop();

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Session timers: game ticks and the clock
                Some(timer) = self.timer_events.recv() => {
                    if let Some(outcome) = self.controller.on_timer(timer) {
                        debug!(?outcome, "tick");
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.controller.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.controller.request_direction(direction);
            }
            KeyAction::Start => {
                // Enter only starts from the title screen; restarting is R
                if self.controller.status() == SessionStatus::Idle {
                    self.controller.start();
                }
            }
            KeyAction::Restart => self.controller.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Largest grid the current terminal can show
fn fit_terminal() -> Result<GridSpec> {
    let (width, height) = terminal::size().context("Failed to read terminal size")?;
    let (usable_width, usable_height) = Renderer::playfield_capacity(width, height);
    GridSpec::fit_area(usable_width, usable_height, CELL_WIDTH)
        .with_context(|| format!("Terminal of {width}x{height} is too small for a grid"))
}
