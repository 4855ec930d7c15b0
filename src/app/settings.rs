use std::{path::PathBuf, time::Duration};

/// Maze file loaded when no path is given on the command line
pub const DEFAULT_MAZE_PATH: &str = "map.txt";

/// Runtime configuration of the visualizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Maze file to load at startup and on restart
    pub maze_path: PathBuf,
    /// Delay between two solver steps while animating
    pub step_delay: Duration,
    /// How often the screen is redrawn when idle
    pub frame_interval: Duration,
    /// Timeout for polling input events in the input thread, a.k.a.
    /// how often the input thread checks whether it should stop
    pub input_poll_timeout: Duration,
    /// Directory receiving the log file
    pub log_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maze_path: PathBuf::from(DEFAULT_MAZE_PATH),
            step_delay: Duration::from_millis(50),
            frame_interval: Duration::from_millis(1000 / 60),
            input_poll_timeout: Duration::from_millis(100),
            log_dir: std::env::temp_dir(),
        }
    }
}

impl Settings {
    /// Build settings from command line arguments, without the executable name.
    /// The first argument is the maze file; anything after it is ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut settings = Settings::default();
        let mut args = args.into_iter();
        if let Some(path) = args.next() {
            settings.maze_path = PathBuf::from(path);
        }
        let extra = args.collect::<Vec<_>>();
        if !extra.is_empty() {
            tracing::warn!("[settings] Ignoring extra arguments: {:?}", extra);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_args(Vec::new());
        assert_eq!(settings.maze_path, PathBuf::from("map.txt"));
        assert_eq!(settings.step_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_maze_path_argument() {
        let args = ["mazes/big.txt", "--unused"].map(String::from);
        let settings = Settings::from_args(args);
        assert_eq!(settings.maze_path, PathBuf::from("mazes/big.txt"));
        assert_eq!(settings.frame_interval, Settings::default().frame_interval);
    }
}
