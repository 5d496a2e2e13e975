use dialoguer::Input;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::sleep;

use crate::config::Config;
use crate::core::{Board, ChannelEventHandler, GameEngine, GameEvent, Players, Position};
use crate::ui::{status_for_event, Display, StatusKind, StatusUpdate, ThemeManager};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info, warn};

const TITLE: &str = "Tic-Tac-Toe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Position),
    Restart,
    Quit,
}

/// Parses `row col` (1-based, space or comma separated), `r`/`restart`
/// or `q`/`quit`.
pub fn parse_command(input: &str) -> GameResult<Command> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "r" | "restart" => return Ok(Command::Restart),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();

    let [row, col] = parts.as_slice() else {
        return Err(GameError::input("Enter a row and a column, e.g. `2 3`"));
    };

    let parse = |value: &str| -> GameResult<usize> {
        match value.parse::<usize>() {
            Ok(0) => Err(GameError::input("Rows and columns start at 1")),
            Ok(n) => Ok(n - 1),
            Err(_) => Err(GameError::input(format!("`{}` is not a number", value))),
        }
    };

    Ok(Command::Move(Position::new(parse(*row)?, parse(*col)?)))
}

/// Terminal renderer driving a [`GameEngine`].
pub struct GameInterface {
    engine: GameEngine,
    events: UnboundedReceiver<GameEvent>,
    display: Display,
    config: Config,
    status: Option<(String, StatusKind)>,
}

impl GameInterface {
    pub fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");
        config.validate()?;

        let players = Players::starting_with(config.game.first_mark)?;
        let mut engine = GameEngine::with_players(Board::square(config.game.size), players)?;

        let (sender, events) = unbounded_channel();
        engine.subscribe(ChannelEventHandler::new(sender));

        let mut display = Display::new(ThemeManager::new(), config.ui.show_coordinates);
        if !display.set_theme(&config.ui.theme) {
            warn!("Unknown theme '{}', using default", config.ui.theme);
        }

        Ok(Self {
            engine,
            events,
            display,
            config,
            status: None,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn status_kind(&self) -> Option<StatusKind> {
        self.status.as_ref().map(|(_, kind)| *kind)
    }

    pub async fn run(&mut self) -> GameResult<()> {
        info!("Starting game interface");
        self.engine.reset();
        self.drain_events();

        loop {
            self.redraw()?;

            let input: String = Input::new()
                .with_prompt(self.prompt())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| GameError::input(format!("Move input error: {}", e)))?;

            match parse_command(&input) {
                Ok(command) => {
                    if !self.handle_command(command) {
                        break;
                    }
                }
                Err(e) => self.status = Some((e.to_string(), StatusKind::Error)),
            }

            if self.drain_events() && self.config.game.auto_restart {
                self.redraw()?;
                self.restart_after_delay().await;
            }
        }

        self.engine.stop();
        self.drain_events();
        match self.engine.export_events() {
            Ok(history) => debug!("Session events:\n{}", history),
            Err(e) => warn!("Could not export session events: {}", e),
        }
        self.display.show_success("Thanks for playing!")?;
        info!("Game session ended");
        Ok(())
    }

    /// Applies one command. Returns `false` when the session should end.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::Restart => self.engine.reset(),
            Command::Move(position) => {
                if !self.engine.submit_move(position) {
                    let reason = if self.engine.state().is_finished() {
                        "The game is over, type `r` to play again"
                    } else {
                        "That square is not available"
                    };
                    self.status = Some((reason.to_string(), StatusKind::Warning));
                }
            }
        }
        true
    }

    /// Applies queued engine events to the status line. Returns `true`
    /// when one of them finished the game.
    pub fn drain_events(&mut self) -> bool {
        let mut finished = false;

        while let Ok(event) = self.events.try_recv() {
            debug!("Renderer received {:?}", event);
            if matches!(event, GameEvent::GameFinished { .. }) {
                finished = true;
            }

            match status_for_event(&event) {
                StatusUpdate::Keep => {}
                StatusUpdate::Clear => self.status = None,
                StatusUpdate::Show(text) => {
                    let kind = if finished { StatusKind::Success } else { StatusKind::Status };
                    self.status = Some((text, kind));
                }
            }
        }

        finished
    }

    pub async fn restart_after_delay(&mut self) {
        let delay = self.config.restart_delay();
        debug!("Restarting in {:?}", delay);
        sleep(delay).await;
        self.engine.reset();
        self.drain_events();
    }

    fn prompt(&self) -> String {
        if self.engine.state().is_finished() {
            return "r: restart, q: quit".to_string();
        }
        format!(
            "{} - row col (r: restart, q: quit)",
            self.engine.current_player()
        )
    }

    fn redraw(&self) -> GameResult<()> {
        self.display.clear_screen()?;
        self.display.show_title(TITLE)?;
        self.display.show_board(self.engine.board())?;

        if let Some((text, kind)) = &self.status {
            self.display.show_status(text, *kind)?;
        }

        Ok(())
    }
}
