pub mod renderer;
pub mod settings;
pub mod sidebar;
pub mod state;
pub mod summary;

use std::{
    io::{Stdout, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError, Sender},
    },
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, MouseButton, MouseEventKind},
    queue,
    terminal::{self, ClearType},
};

use crate::{
    app::{
        renderer::Overlay,
        settings::Settings,
        state::{Action, GameState},
    },
    maze::Direction,
    solvers::{Run, Solver, StepOutcome},
};

#[derive(Debug)]
enum UserInputEvent {
    KeyPress(KeyEvent),
    Click { col: u16, row: u16 },
    Resize,
}

/// How an animated solve ended
#[derive(Debug)]
enum SolveEnd {
    /// The run reached a terminal outcome
    Finished(StepOutcome),
    /// The user abandoned the run
    Cancelled,
    /// The input thread went away; the app should exit
    Disconnected,
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        App { settings }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode, enter alternate screen and capture mouse clicks
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(
            stdout,
            event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Run the visualizer until the user quits
    pub fn run(&self, stdout: &mut Stdout, mut state: GameState) -> std::io::Result<()> {
        // Flag to let the input thread stop. Set by the main thread only.
        let should_stop = Arc::new(AtomicBool::new(false));

        let (user_input_event_tx, user_input_event_rx) =
            std::sync::mpsc::channel::<UserInputEvent>();
        let should_stop_for_input = should_stop.clone();
        let poll_timeout = self.settings.input_poll_timeout;
        let input_thread_handle = std::thread::Builder::new()
            .name("input".to_string())
            .spawn(move || -> std::io::Result<()> {
                App::listen_to_user_input(
                    user_input_event_tx,
                    poll_timeout,
                    &should_stop_for_input,
                )
            })?;

        let result = self.app_loop(stdout, &mut state, &user_input_event_rx);

        should_stop.store(true, Ordering::Release);
        drop(user_input_event_rx);
        match input_thread_handle.join() {
            Ok(input_result) => input_result?,
            Err(_) => tracing::error!("[app] Input thread panicked"),
        }
        tracing::info!("[app] Exiting");
        result
    }

    /// Frame loop on the main thread. Owns the game state; every change to it happens here.
    fn app_loop(
        &self,
        stdout: &mut Stdout,
        state: &mut GameState,
        user_input_event_rx: &Receiver<UserInputEvent>,
    ) -> std::io::Result<()> {
        tracing::info!("[app loop] Started");
        loop {
            renderer::draw(stdout, state, &Overlay::idle())?;

            let event = match user_input_event_rx.recv_timeout(self.settings.frame_interval) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            };
            let action = match event {
                UserInputEvent::Resize => {
                    queue!(stdout, terminal::Clear(ClearType::All))?;
                    continue;
                }
                UserInputEvent::KeyPress(key_event) => action_for_key(state, key_event),
                UserInputEvent::Click { col, row } => {
                    renderer::sidebar_for(state.maze().grid())
                        .hit_test(col, row)
                        .map(|button| button.action())
                }
            };
            let Some(action) = action else {
                continue;
            };
            tracing::debug!("[app loop] Action {:?}", action);

            if action.clicks() && action != Action::ToggleSound && state.sound_on() {
                renderer::ring_bell(stdout)?;
            }

            let was_won = state.won();
            match action {
                Action::Quit => return Ok(()),
                Action::Solve if state.won() => {}
                Action::Solve => match self.animate_solve(stdout, state, user_input_event_rx)? {
                    SolveEnd::Finished(outcome) => App::finish_solve(state, outcome),
                    SolveEnd::Cancelled => state.report_cancelled(),
                    SolveEnd::Disconnected => return Ok(()),
                },
                other => state.apply(other),
            }
            // Turning sound on clicks, turning it off stays silent
            if action == Action::ToggleSound && state.sound_on() {
                renderer::ring_bell(stdout)?;
            }
            if !was_won && state.won() && state.sound_on() {
                renderer::ring_bell(stdout)?;
            }
        }
    }

    /// Step a solver from the player's position, one expansion per `step_delay`,
    /// redrawing after each. Esc or `q` abandons the run.
    fn animate_solve(
        &self,
        stdout: &mut Stdout,
        state: &GameState,
        user_input_event_rx: &Receiver<UserInputEvent>,
    ) -> std::io::Result<SolveEnd> {
        let solver = state.solver();
        let grid = state.maze().grid();
        let mut run = Run::new(grid, state.player(), state.maze().goal(), solver);
        tracing::info!("[solve] Animating {} from {}", solver, state.player());

        loop {
            let (position, partial_path) = match run.step() {
                StepOutcome::Continue {
                    position,
                    partial_path,
                } => (position, partial_path),
                terminal => return Ok(SolveEnd::Finished(terminal)),
            };
            renderer::draw(stdout, state, &Overlay::searching(position, &partial_path))?;

            // Wait for the next step while still reacting to input
            let deadline = Instant::now() + self.settings.step_delay;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining == Duration::ZERO {
                    break;
                }
                match user_input_event_rx.recv_timeout(remaining) {
                    Ok(UserInputEvent::KeyPress(key_event))
                        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('q')) =>
                    {
                        tracing::info!(
                            "[solve] Cancelled by user after {} steps",
                            run.step_count()
                        );
                        return Ok(SolveEnd::Cancelled);
                    }
                    Ok(UserInputEvent::Resize) => {
                        queue!(stdout, terminal::Clear(ClearType::All))?;
                    }
                    // Other input is ignored while solving
                    Ok(_) => {}
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => return Ok(SolveEnd::Disconnected),
                }
            }
        }
    }

    fn finish_solve(state: &mut GameState, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Found {
                path,
                step_count,
                elapsed,
            } => {
                let solver = state.solver();
                state.apply_solution(solver, &path, step_count, elapsed);
            }
            StepOutcome::Exhausted => state.report_no_path(),
            StepOutcome::Continue { .. } => {}
        }
    }

    /// Listen for user input events (key presses, left clicks and resize)
    /// This function runs in a separate thread, and is the only place where user input is read
    fn listen_to_user_input(
        user_input_event_tx: Sender<UserInputEvent>,
        event_poll_timeout: Duration,
        should_stop: &AtomicBool,
    ) -> std::io::Result<()> {
        loop {
            if should_stop.load(Ordering::Acquire) {
                return Ok(());
            }

            // Poll for events with a timeout
            if !event::poll(event_poll_timeout)? {
                // No event available, continue loop to check flags again
                continue;
            }

            let input_event = match event::read()? {
                event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                    UserInputEvent::KeyPress(key_event)
                }
                event::Event::Mouse(mouse_event)
                    if mouse_event.kind == MouseEventKind::Down(MouseButton::Left) =>
                {
                    UserInputEvent::Click {
                        col: mouse_event.column,
                        row: mouse_event.row,
                    }
                }
                event::Event::Resize(_, _) => UserInputEvent::Resize,
                _ => continue, // Ignore other events
            };

            // Send the input event to the main thread
            if user_input_event_tx.send(input_event).is_err() {
                // Receiver has been dropped, exit the thread
                tracing::debug!("[input loop] Receiver dropped, exiting");
                return Ok(());
            }
        }
    }
}

/// Map a key press to an action. Esc and Enter close the summary panel first when it is shown.
fn action_for_key(state: &GameState, key_event: KeyEvent) -> Option<Action> {
    let summary_shown = state.summary().is_some();
    let action = match key_event.code {
        KeyCode::Esc | KeyCode::Enter if summary_shown => Action::DismissSummary,
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Enter | KeyCode::Char('s') => Action::Solve,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('d') => Action::SelectSolver(Solver::Dfs),
        KeyCode::Char('a') => Action::SelectSolver(Solver::AStar),
        KeyCode::Char('m') => Action::ToggleSound,
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Left => Action::Move(Direction::Left),
        KeyCode::Right => Action::Move(Direction::Right),
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::maze::{Maze, Position};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> GameState {
        GameState::new("unused.txt", Maze::from_text("SEE\nXXE\nXXG").unwrap())
    }

    #[test]
    fn test_key_bindings() {
        let state = state();
        assert_eq!(
            action_for_key(&state, key(KeyCode::Up)),
            Some(Action::Move(Direction::Up))
        );
        assert_eq!(action_for_key(&state, key(KeyCode::Enter)), Some(Action::Solve));
        assert_eq!(action_for_key(&state, key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(&state, key(KeyCode::Char('a'))),
            Some(Action::SelectSolver(Solver::AStar))
        );
        assert_eq!(action_for_key(&state, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_summary_takes_esc_and_enter() {
        let mut state = state();
        let path = [
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 2),
            Position::new(2, 2),
        ];
        state.apply_solution(Solver::Dfs, &path, 5, Duration::from_millis(250));
        assert_eq!(
            action_for_key(&state, key(KeyCode::Esc)),
            Some(Action::DismissSummary)
        );
        assert_eq!(
            action_for_key(&state, key(KeyCode::Enter)),
            Some(Action::DismissSummary)
        );
        assert_eq!(action_for_key(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_finish_solve_outcomes() {
        let mut state = state();
        App::finish_solve(&mut state, StepOutcome::Exhausted);
        assert!(!state.won());
        assert_eq!(state.status().unwrap().text, crate::app::state::NO_PATH_MESSAGE);

        App::finish_solve(
            &mut state,
            StepOutcome::Found {
                path: vec![Position::new(0, 0), Position::new(0, 1)],
                step_count: 2,
                elapsed: Duration::ZERO,
            },
        );
        assert!(state.won());
        assert_eq!(state.summary().unwrap().solver, Solver::Dfs);
    }
}
