use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while loading or validating configuration files
#[derive(Debug)]
pub enum ConfigError {
    /// File exists but could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File was read but is not valid JSON for the expected type
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Parsed values break a tuning constraint (inverted range, zero scale, ...)
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse {}: {}", path.display(), source)
            }
            ConfigError::Invalid(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Fatal startup errors raised by the host before the first frame
///
/// Nothing inside `Game::step` produces one of these: the simulation itself
/// cannot fail, only the window/asset setup around it.
#[derive(Debug)]
pub enum GameError {
    /// SDL2 subsystem, window or canvas failure (SDL reports plain strings)
    Sdl(String),

    /// A texture or sprite sheet description could not be loaded
    Asset { path: String, message: String },

    Config(ConfigError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::Sdl(message) => write!(f, "SDL error: {}", message),
            GameError::Asset { path, message } => {
                write!(f, "Failed to load {}: {}", path, message)
            }
            GameError::Config(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(error: ConfigError) -> Self {
        GameError::Config(error)
    }
}

impl From<GameError> for String {
    fn from(error: GameError) -> Self {
        error.to_string()
    }
}
