use common::games::tictactoe::{GameError, Mark, Position, TicTacToeGameState};
use common::id_generator::generate_game_id;
use common::{GameId, log};

use crate::models::{GameResponse, MoveRequest};
use crate::session_store::{GameSession, SessionStore};

#[derive(Clone)]
pub struct GameService<S: SessionStore> {
    store: S,
}

/// Runs the minimax search on the blocking pool against a copy of the board.
async fn search_ai_move(state: &TicTacToeGameState) -> Result<Option<Position>, GameError> {
    let bot = state.bot();
    let mut board = state.board;

    tokio::task::spawn_blocking(move || bot.best_move(&mut board))
        .await
        .map_err(|err| {
            log!("Minimax search failed: {}", err);
            GameError::EngineFailed
        })
}

impl<S: SessionStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Starts a game with random mark assignment; the AI opens when it holds X.
    pub async fn new_game(&self) -> Result<GameResponse, GameError> {
        let mut state = TicTacToeGameState::with_random_marks(&mut rand::rng());

        if state.ai_mark == Mark::X {
            if let Some(pos) = search_ai_move(&state).await? {
                state.apply_ai_move(pos);
            }
        }

        Ok(self.start_game(state).await)
    }

    /// Stores `state` under a fresh id. Ids that are already live are drawn
    /// again.
    pub async fn start_game(&self, state: TicTacToeGameState) -> GameResponse {
        let mut session = GameSession::new(generate_game_id(&mut rand::rng()), state);

        let shared = loop {
            match self.store.put(session).await {
                Ok(shared) => break shared,
                Err(rejected) => {
                    log!("Game id {} is taken, drawing another", rejected.id);
                    session = GameSession::new(generate_game_id(&mut rand::rng()), rejected.state);
                }
            }
        };

        let session = shared.lock().await;
        log!(
            "Game {} created: user {}, AI {}, AI opening {:?}",
            session.id,
            session.state.user_mark,
            session.state.ai_mark,
            session.state.last_move
        );
        GameResponse::from(&*session)
    }

    /// Holds the session lock across validation, the AI search and the
    /// commit, so moves against one game are applied one at a time. The
    /// session is only updated once both marks are known.
    pub async fn make_move(&self, id: &GameId, request: MoveRequest) -> Result<GameResponse, GameError> {
        let shared = self
            .store
            .get(id)
            .await
            .ok_or_else(|| GameError::NotFound(id.clone()))?;
        let mut session = shared.lock().await;

        let mut next = session.state.clone();
        let user_move = next
            .place_user_mark(request.row, request.col)
            .inspect_err(|err| log!("Game {}: rejected move: {}", id, err))?;

        let ai_move = if next.is_over() {
            None
        } else {
            search_ai_move(&next).await?
        };
        if let Some(pos) = ai_move {
            next.apply_ai_move(pos);
        }
        session.state = next;

        log!("Game {}: user played {}, AI replied {:?}", id, user_move, ai_move);
        let status = session.state.status();
        if status.is_over() {
            log!("Game {} finished: {}", id, status.message());
        }

        Ok(GameResponse::from(&*session))
    }

    pub async fn get_game(&self, id: &GameId) -> Result<GameResponse, GameError> {
        let shared = self
            .store
            .get(id)
            .await
            .ok_or_else(|| GameError::NotFound(id.clone()))?;
        let session = shared.lock().await;
        Ok(GameResponse::from(&*session))
    }
}
