use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

/// Errors from setup and the terminal front end. Rejected moves are
/// not errors.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid players: {message}")]
    InvalidPlayers { message: String },

    #[error("Invalid input: {message}")]
    Input { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GameError {
    pub fn invalid_players<S: Into<String>>(message: S) -> Self {
        Self::InvalidPlayers {
            message: message.into(),
        }
    }

    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
