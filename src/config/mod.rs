use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::core::Mark;
use crate::utils::{GameError, GameResult};

pub const ENV_PREFIX: &str = "TICTACTOE";
pub const MAX_BOARD_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: usize,
    pub first_mark: Mark,
    pub auto_restart: bool,
    pub restart_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub theme: String,
    pub show_coordinates: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig {
                size: 3,
                first_mark: Mark::Cross,
                auto_restart: true,
                restart_delay_ms: 2000,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                show_coordinates: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at `path`, then `TICTACTOE__*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> GameResult<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    pub fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> GameResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if !path.exists() {
                Self::default().save_to_file(path)?;
            }
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GameError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
            }
        }

        let toml_content = toml::to_string_pretty(self)?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        if self.game.size == 0 || self.game.size > MAX_BOARD_SIZE {
            return Err(GameError::configuration(format!(
                "Board size must be between 1 and {}",
                MAX_BOARD_SIZE
            )));
        }
        if self.game.first_mark.is_empty() {
            return Err(GameError::configuration("First mark must be cross or circle"));
        }
        if self.ui.theme.is_empty() {
            return Err(GameError::configuration("Theme name cannot be empty"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(size) = cli_config.size {
            self.game.size = size;
        }
        if let Some(first_mark) = cli_config.first_mark {
            self.game.first_mark = first_mark;
        }
        if cli_config.no_auto_restart {
            self.game.auto_restart = false;
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
    }

    pub fn restart_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.game.restart_delay_ms)
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub size: Option<usize>,
    pub first_mark: Option<Mark>,
    pub no_auto_restart: bool,
    pub theme: Option<String>,
    pub debug: bool,
}
