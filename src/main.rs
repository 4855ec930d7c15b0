use std::error::Error;

use mazetrace::{
    app::{App, settings::Settings, state::GameState},
    logging,
    maze::Maze,
};

fn main() -> std::io::Result<()> {
    // Reported before the terminal is taken over; the app still runs without logs
    let log_guard = match logging::init(&Settings::default().log_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: {}, continuing without logs", err);
            if let Some(source) = err.source() {
                eprintln!("  caused by: {}", source);
            }
            None
        }
    };
    let settings = Settings::from_args(std::env::args().skip(1));

    let maze = match Maze::load(&settings.maze_path) {
        Ok(maze) => maze,
        Err(err) => {
            tracing::error!("[main] Failed to load maze: {}", err);
            eprintln!("Error: {}", err);
            if let Some(source) = err.source() {
                eprintln!("  caused by: {}", source);
            }
            // Exiting skips destructors, so flush the log first
            drop(log_guard);
            std::process::exit(1);
        }
    };

    let state = GameState::new(settings.maze_path.clone(), maze);
    let app = App::new(settings);

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, state);
    App::restore_terminal(&mut stdout)?;
    drop(log_guard);
    result
}
