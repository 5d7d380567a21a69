use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::{GameConfig, GameSession, MAX_TICK_RATE_MS, MIN_TICK_RATE_MS};
use crate::input::{InputHandler, KeyAction, TICK_RATE_STEP_MS};
use crate::metrics::GameMetrics;
use crate::render::{Canvas, Field, Renderer};

/// Puts the terminal back in cooked mode on the main screen when dropped,
/// so a panic inside the game loop does not leave it in raw mode
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if disable_raw_mode().is_err() {
            log::error!("Failed to disable raw mode");
        }

        if execute!(stderr(), LeaveAlternateScreen, cursor::Show).is_err() {
            log::error!("Failed to leave alternate screen");
        }
    }
}

pub struct HumanMode {
    session: GameSession,
    field: Field,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let session = GameSession::new(config).context("Invalid game configuration")?;
        let mut field = Field::new(session.config().size()).context("Failed to create field")?;
        field.paint(&session.snapshot());

        Ok(Self {
            session,
            field,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        Renderer::check_fits(width, height, self.session.config().size())?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        drop(terminal);
        drop(guard);

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        self.start_round();

        // Re-armed whenever the session epoch moves so there is only ever one tick stream
        let mut tick_timer: Option<Interval> = None;
        let mut armed_epoch: Option<u64> = None;

        loop {
            if armed_epoch != Some(self.session.epoch()) {
                tick_timer = self.arm_tick_timer();
                armed_epoch = Some(self.session.epoch());
            }

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(e)) => log::error!("Failed to read terminal event: {e}"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.field, &self.session, &self.metrics);
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

        self.session.stop();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            self.apply(self.input_handler.handle_key_event(key))?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Steer(direction) => self.session.steer(direction),
            KeyAction::ToggleStop => {
                if self.session.is_running() {
                    self.session.stop();
                } else {
                    self.session.resume();
                }
            }
            KeyAction::Restart => {
                self.session.restart();
                self.metrics.on_round_over();
                self.field.paint(&self.session.snapshot());
            }
            KeyAction::Faster => {
                let ms = self
                    .session
                    .tick_rate_ms()
                    .saturating_sub(TICK_RATE_STEP_MS)
                    .max(MIN_TICK_RATE_MS);
                self.session.set_tick_rate(ms)?;
            }
            KeyAction::Slower => {
                let ms = (self.session.tick_rate_ms() + TICK_RATE_STEP_MS).min(MAX_TICK_RATE_MS);
                self.session.set_tick_rate(ms)?;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self) {
        if let Some(report) = self.session.tick() {
            self.metrics.on_tick(report.event);
            self.field.paint(&report.snapshot);
        }
    }

    fn start_round(&mut self) {
        self.session.start();
        self.metrics.on_round_start();
        self.field.paint(&self.session.snapshot());
    }

    /// A fresh interval whose first tick is one period away, `None` while stopped
    fn arm_tick_timer(&self) -> Option<Interval> {
        if !self.session.is_running() {
            return None;
        }

        let period = self.session.tick_rate();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(timer)
    }
}

/// Wait for the next tick, forever if the timer is disarmed
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Lifecycle, Position};
    use crate::render::Cell;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.session.lifecycle(), Lifecycle::Stopped);
        assert_eq!(mode.field.cell(Position::new(0, 0)), Some(Cell::Snake));
        assert_eq!(mode.field.score(), 0);
    }

    #[test]
    fn test_invalid_config_fails() {
        assert!(HumanMode::new(GameConfig::new(0, 3)).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected_before_field() {
        let err = HumanMode::new(GameConfig::new(100_000, 100_000)).err().unwrap();
        assert!(err.to_string().contains("Invalid game configuration"));
    }

    #[test]
    fn test_terminal_guard_drop_without_tty() {
        // Restoring a terminal that was never put in raw mode only logs
        drop(TerminalGuard);
    }

    #[test]
    fn test_steer_applies_immediately() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.start_round();

        mode.handle_event(key(KeyCode::Right, KeyEventKind::Press))
            .unwrap();
        assert_eq!(mode.session.snake().vector, Direction::Right.vector());

        // Releases are ignored
        mode.handle_event(key(KeyCode::Down, KeyEventKind::Release))
            .unwrap();
        assert_eq!(mode.session.snake().vector, Direction::Right.vector());

        // Last valid input before the tick wins
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press)).unwrap();
        mode.handle_event(key(KeyCode::Down, KeyEventKind::Press))
            .unwrap();
        assert_eq!(mode.session.snake().vector, Direction::Up.vector());
    }

    #[tokio::test]
    async fn test_toggle_stop() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.start_round();
        assert!(mode.arm_tick_timer().is_some());

        mode.apply(KeyAction::ToggleStop).unwrap();
        assert!(!mode.session.is_running());
        assert!(mode.arm_tick_timer().is_none());

        mode.apply(KeyAction::ToggleStop).unwrap();
        assert!(mode.session.is_running());
    }

    #[test]
    fn test_tick_rate_keys_clamp() {
        let mut config = GameConfig::default();
        config.tick_rate_ms = MIN_TICK_RATE_MS + 10;
        let mut mode = HumanMode::new(config).unwrap();

        mode.apply(KeyAction::Faster).unwrap();
        assert_eq!(mode.session.tick_rate_ms(), MIN_TICK_RATE_MS);

        mode.apply(KeyAction::Slower).unwrap();
        assert_eq!(
            mode.session.tick_rate_ms(),
            MIN_TICK_RATE_MS + TICK_RATE_STEP_MS
        );
    }

    #[test]
    fn test_game_restart() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.start_round();
        mode.session.steer(Direction::Down);
        mode.update_game();
        assert_eq!(mode.session.tick_count(), 1);

        mode.apply(KeyAction::Restart).unwrap();

        assert_eq!(mode.session.tick_count(), 0);
        assert_eq!(mode.metrics.rounds_played, 1);
        assert_eq!(mode.field.cell(Position::new(0, 0)), Some(Cell::Snake));
    }

    #[test]
    fn test_quit() {
        let mut mode = HumanMode::new(GameConfig::default()).unwrap();
        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press))
            .unwrap();
        assert!(mode.should_quit);
    }
}
