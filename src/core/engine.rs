use crate::core::{
    Board, Cell, CompositeEventHandler, EventLogger, EventRecord, GameEvent, GameEventHandler,
    GameState, Mark, Phase, Player, Players, Position,
};
use crate::utils::{GameError, GameResult};
use tracing::{debug, info};

/// Turn-taking and win-detection state machine.
///
/// The engine owns the authoritative [`Board`]. Renderers borrow it
/// through [`GameEngine::board`] or receive it with each event.
pub struct GameEngine {
    board: Board,
    players: Players,
    state: GameState,
    listeners: CompositeEventHandler,
    history: EventLogger,
}

impl GameEngine {
    pub fn new(board: Board, first: Player, second: Player) -> GameResult<Self> {
        Self::with_players(board, Players::new(first, second)?)
    }

    pub fn with_players(board: Board, players: Players) -> GameResult<Self> {
        if board.capacity() == 0 {
            return Err(GameError::configuration("Board must have at least one cell"));
        }

        let state = GameState::new(players.first(), board.capacity());
        info!(
            "Created {}x{} game, {} moves first",
            board.rows(),
            board.columns(),
            players.first()
        );

        Ok(Self {
            board,
            players,
            state,
            listeners: CompositeEventHandler::new(),
            history: EventLogger::default(),
        })
    }

    /// Square board, cross moves first.
    pub fn with_size(size: usize) -> GameResult<Self> {
        Self::with_players(Board::square(size), Players::default())
    }

    pub fn subscribe<H: GameEventHandler + 'static>(&mut self, handler: H) {
        self.listeners.add_handler(handler);
    }

    /// Plays the current player's mark at `position`.
    ///
    /// Returns `false` without side effects when the position is out of
    /// bounds, already occupied, or the game is not running.
    pub fn submit_move(&mut self, position: Position) -> bool {
        if !self.state.accepts_moves() {
            return false;
        }

        let Some(candidate) = self.candidate(position) else {
            return false;
        };

        if !self.board.place(candidate) {
            return false;
        }

        let mover = self.state.current_player();
        debug!("{} placed at {}", mover, position);

        self.state.record_placement();
        self.swap_players();
        self.check_outcome();
        true
    }

    pub fn reset(&mut self) {
        self.state.restart(self.players.first(), self.board.capacity());
        self.board.reset();
        info!("Game reset, {} to move", self.players.first());
        self.emit(GameEvent::PhaseChanged(Phase::Resumed));
    }

    /// Halts play until the next [`GameEngine::reset`].
    pub fn stop(&mut self) {
        if self.state.phase() == Phase::Stopped {
            return;
        }
        self.set_phase(Phase::Stopped);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn remaining_empty(&self) -> usize {
        self.state.remaining_empty()
    }

    pub fn event_history(&self) -> &[EventRecord] {
        self.history.get_events()
    }

    pub fn recent_events(&self, count: usize) -> Vec<&EventRecord> {
        self.history.get_recent_events(count)
    }

    /// Event history as pretty-printed JSON.
    pub fn export_events(&self) -> GameResult<String> {
        Ok(self.history.export_events()?)
    }

    /// Whether `mark` holds a full diagonal, row or column.
    pub fn has_won(&self, mark: Mark) -> bool {
        check_win(&self.board, mark)
    }

    fn candidate(&self, position: Position) -> Option<Cell> {
        let existing = *self.board.get(position)?;
        if !existing.is_empty() {
            return Some(existing);
        }
        Some(existing.with_mark(self.state.current_player().mark))
    }

    fn swap_players(&mut self) {
        let next = self.players.other(self.state.current_player());
        self.state.set_current_player(next);
        self.emit(GameEvent::TurnChanged(next));
    }

    fn check_outcome(&mut self) {
        let first = self.players.first();
        let second = self.players.second();

        let winner = match (self.has_won(first.mark), self.has_won(second.mark)) {
            (true, false) => Some(first),
            (false, true) => Some(second),
            (false, false) if self.state.remaining_empty() == 0 => None,
            _ => return,
        };

        match winner {
            Some(player) => info!("{} wins", player),
            None => info!("Game drawn"),
        }

        self.set_phase(Phase::Finished);
        self.emit(GameEvent::GameFinished { winner });
    }

    fn set_phase(&mut self, phase: Phase) {
        self.state.set_phase(phase);
        debug!("Phase changed to {}", phase);
        self.emit(GameEvent::PhaseChanged(phase));
    }

    fn emit(&mut self, event: GameEvent) {
        self.history.record(&event);
        self.listeners.handle_event(&event, &self.board);
    }
}

fn check_win(board: &Board, mark: Mark) -> bool {
    check_diagonals(board, mark) || check_lines(board, mark)
}

fn check_diagonals(board: &Board, mark: Mark) -> bool {
    let Some(size) = board.size() else {
        return false;
    };
    let cells = board.cells();

    let main = (0..size).all(|i| cells[i][i].mark() == mark);
    let anti = (0..size).all(|i| cells[size - 1 - i][i].mark() == mark);
    main || anti
}

fn check_lines(board: &Board, mark: Mark) -> bool {
    let cells = board.cells();

    let any_row = cells
        .iter()
        .any(|row| row.iter().all(|cell| cell.mark() == mark));
    let any_column = (0..board.columns())
        .any(|col| cells.iter().all(|row| row[col].mark() == mark));

    any_row || any_column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameEventKind, PlayerId};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Snapshotter {
        seen: Rc<RefCell<Vec<(GameEvent, usize)>>>,
    }

    impl GameEventHandler for Snapshotter {
        fn handle_event(&mut self, event: &GameEvent, board: &Board) {
            self.seen.borrow_mut().push((*event, board.empty_count()));
        }
    }

    fn play(engine: &mut GameEngine, moves: &[(usize, usize)]) {
        for &(row, col) in moves {
            assert!(engine.submit_move(Position::new(row, col)), "move ({row}, {col}) rejected");
        }
    }

    fn finished_events(engine: &GameEngine) -> Vec<GameEvent> {
        engine
            .event_history()
            .iter()
            .map(|record| record.event)
            .filter(|event| event.kind() == GameEventKind::GameFinished)
            .collect()
    }

    #[test]
    fn test_engine_starts_resumed() {
        let engine = GameEngine::with_size(3).unwrap();

        assert_eq!(engine.phase(), Phase::Resumed);
        assert_eq!(engine.remaining_empty(), 9);
        assert_eq!(engine.current_player().id, PlayerId::First);
        assert!(engine.event_history().is_empty());
    }

    #[test]
    fn test_engine_rejects_empty_board() {
        assert!(GameEngine::with_size(0).is_err());
    }

    #[test]
    fn test_engine_rejects_equal_marks() {
        let first = Player::new(PlayerId::First, Mark::Circle).unwrap();
        let second = Player::new(PlayerId::Second, Mark::Circle).unwrap();

        assert!(GameEngine::new(Board::square(3), first, second).is_err());
    }

    #[test]
    fn test_reset_yields_empty_board() {
        for size in 1..=5 {
            let mut engine = GameEngine::with_size(size).unwrap();
            if size > 1 {
                play(&mut engine, &[(0, 0)]);
            }

            engine.reset();
            assert_eq!(engine.board().empty_count(), size * size);
            assert_eq!(engine.remaining_empty(), size * size);
            assert_eq!(engine.phase(), Phase::Resumed);
        }
    }

    #[test]
    fn test_reset_twice_is_idempotent() {
        let mut engine = GameEngine::with_size(3).unwrap();
        play(&mut engine, &[(0, 0), (2, 2)]);

        engine.reset();
        let board = engine.board().clone();
        let state = *engine.state();

        engine.reset();
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.state(), &state);
    }

    #[test]
    fn test_out_of_bounds_move_rejected() {
        let mut engine = GameEngine::with_size(3).unwrap();
        let before = *engine.state();

        assert!(!engine.submit_move(Position::new(3, 0)));
        assert!(!engine.submit_move(Position::new(0, 3)));
        assert!(!engine.submit_move(Position::new(usize::MAX, usize::MAX)));

        assert_eq!(engine.state(), &before);
        assert_eq!(engine.board().empty_count(), 9);
        assert!(engine.event_history().is_empty());
    }

    #[test]
    fn test_occupied_move_rejected() {
        let mut engine = GameEngine::with_size(3).unwrap();
        play(&mut engine, &[(1, 1)]);
        let before = *engine.state();
        let events = engine.event_history().len();

        assert!(!engine.submit_move(Position::new(1, 1)));

        assert_eq!(engine.state(), &before);
        assert_eq!(engine.board().mark_at(Position::new(1, 1)), Some(Mark::Cross));
        assert_eq!(engine.event_history().len(), events);
    }

    #[test]
    fn test_turn_alternates_after_accepted_move() {
        let mut engine = GameEngine::with_size(3).unwrap();
        let players = *engine.players();

        play(&mut engine, &[(0, 0)]);
        assert_eq!(engine.current_player(), players.second());
        assert_eq!(engine.board().mark_at(Position::new(0, 0)), Some(Mark::Cross));

        play(&mut engine, &[(0, 1)]);
        assert_eq!(engine.current_player(), players.first());
        assert_eq!(engine.board().mark_at(Position::new(0, 1)), Some(Mark::Circle));
        assert_eq!(engine.remaining_empty(), 7);
    }

    #[test]
    fn test_top_row_win() {
        let mut engine = GameEngine::with_size(3).unwrap();
        let players = *engine.players();

        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)]);

        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.has_won(Mark::Cross));
        assert!(!engine.has_won(Mark::Circle));
        assert_eq!(
            finished_events(&engine),
            vec![GameEvent::GameFinished { winner: Some(players.first()) }]
        );
    }

    #[test]
    fn test_last_row_and_column_wins_detected() {
        let mut engine = GameEngine::with_size(3).unwrap();
        let players = *engine.players();
        play(&mut engine, &[(2, 0), (0, 0), (2, 1), (0, 1), (2, 2)]);
        assert_eq!(
            finished_events(&engine),
            vec![GameEvent::GameFinished { winner: Some(players.first()) }]
        );

        engine.reset();
        play(&mut engine, &[(0, 0), (0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.has_won(Mark::Circle));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut engine = GameEngine::with_size(3).unwrap();

        play(&mut engine, &[(2, 0), (0, 0), (1, 1), (0, 1), (0, 2)]);

        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.has_won(Mark::Cross));
    }

    #[test]
    fn test_draw() {
        let mut engine = GameEngine::with_size(3).unwrap();

        // X O X / X O O / O X X
        play(
            &mut engine,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );

        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.remaining_empty(), 0);
        assert_eq!(finished_events(&engine), vec![GameEvent::GameFinished { winner: None }]);
    }

    #[test]
    fn test_single_cell_board_is_won_immediately() {
        let mut engine = GameEngine::with_size(1).unwrap();

        play(&mut engine, &[(0, 0)]);

        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.has_won(Mark::Cross));
    }

    #[test]
    fn test_moves_rejected_after_finish() {
        let mut engine = GameEngine::with_size(3).unwrap();
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)]);

        assert!(!engine.submit_move(Position::new(2, 2)));
        assert_eq!(engine.board().mark_at(Position::new(2, 2)), Some(Mark::Empty));
        assert_eq!(finished_events(&engine).len(), 1);

        engine.reset();
        assert!(engine.submit_move(Position::new(2, 2)));
    }

    #[test]
    fn test_stop_blocks_moves_until_reset() {
        let mut engine = GameEngine::with_size(3).unwrap();

        engine.stop();
        engine.stop();
        assert_eq!(engine.phase(), Phase::Stopped);
        assert!(!engine.submit_move(Position::new(0, 0)));
        assert_eq!(engine.event_history().len(), 1);

        engine.reset();
        assert!(engine.submit_move(Position::new(0, 0)));
    }

    #[test]
    fn test_event_order_and_board_snapshot() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut engine = GameEngine::with_size(1).unwrap();
        engine.subscribe(Snapshotter { seen: Rc::clone(&seen) });
        let players = *engine.players();

        engine.reset();
        play(&mut engine, &[(0, 0)]);

        assert_eq!(
            *seen.borrow(),
            vec![
                (GameEvent::PhaseChanged(Phase::Resumed), 1),
                (GameEvent::TurnChanged(players.second()), 0),
                (GameEvent::PhaseChanged(Phase::Finished), 0),
                (GameEvent::GameFinished { winner: Some(players.first()) }, 0),
            ]
        );
        assert_eq!(
            engine.recent_events(1)[0].event,
            GameEvent::GameFinished { winner: Some(players.first()) }
        );
    }

    #[test]
    fn test_export_events_covers_whole_game() {
        let mut engine = GameEngine::with_size(3).unwrap();
        engine.reset();
        play(&mut engine, &[(0, 0), (1, 1), (0, 1), (1, 0), (0, 2)]);

        let json = engine.export_events().unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(records.as_array().map(Vec::len), Some(engine.event_history().len()));
        assert!(json.contains("GameFinished"));
    }

    #[test]
    fn test_rectangular_board_skips_diagonals() {
        let board = Board::new(2, 3);
        let mut engine = GameEngine::with_players(board, Players::default()).unwrap();

        // X at (0,0) and (1,1) would be a diagonal on a square board
        play(&mut engine, &[(0, 0), (0, 2), (1, 1)]);
        assert_eq!(engine.phase(), Phase::Resumed);

        // column 2 needs two circles
        play(&mut engine, &[(1, 2)]);
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.has_won(Mark::Circle));
    }
}
