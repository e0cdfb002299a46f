use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use common::GameId;
use common::games::tictactoe::TicTacToeGameState;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: GameId,
    pub state: TicTacToeGameState,
}

impl GameSession {
    pub fn new(id: GameId, state: TicTacToeGameState) -> Self {
        Self { id, state }
    }
}

/// Holding the lock serializes every request against one game.
pub type SharedSession = Arc<Mutex<GameSession>>;

pub trait SessionStore: Clone + Send + Sync + 'static {
    /// Looks a session up and marks it as recently used.
    fn get(&self, id: &GameId) -> impl Future<Output = Option<SharedSession>> + Send;

    /// Inserts a session under an id that is not live, evicting the least
    /// recently used entry when the store is at capacity. A live id is left
    /// untouched and the session is handed back.
    fn put(&self, session: GameSession) -> impl Future<Output = Result<SharedSession, GameSession>> + Send;

    fn delete(&self, id: &GameId) -> impl Future<Output = bool> + Send;

    fn contains(&self, id: &GameId) -> impl Future<Output = bool> + Send;

    /// Drops sessions idle for at least the TTL and returns their ids.
    fn evict_expired(&self) -> impl Future<Output = Vec<GameId>> + Send;

    fn len(&self) -> impl Future<Output = usize> + Send;
}

struct StoreEntry {
    session: SharedSession,
    last_access: Instant,
    access_seq: u64,
}

struct StoreInner {
    entries: HashMap<GameId, StoreEntry>,
    next_seq: u64,
}

impl StoreInner {
    fn touch(&mut self, id: &GameId) -> Option<SharedSession> {
        let seq = self.next_seq;
        let entry = self.entries.get_mut(id)?;
        entry.last_access = Instant::now();
        entry.access_seq = seq;
        self.next_seq += 1;
        Some(entry.session.clone())
    }

    fn least_recently_used(&self) -> Option<GameId> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(id, _)| id.clone())
    }
}

#[derive(Clone)]
pub struct InMemorySessionStore {
    inner: Arc<Mutex<StoreInner>>,
    ttl: Duration,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                entries: HashMap::new(),
                next_seq: 0,
            })),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &GameId) -> Option<SharedSession> {
        let mut inner = self.inner.lock().await;
        inner.touch(id)
    }

    async fn put(&self, session: GameSession) -> Result<SharedSession, GameSession> {
        let mut inner = self.inner.lock().await;
        if inner.entries.contains_key(&session.id) {
            return Err(session);
        }
        let id = session.id.clone();

        if inner.entries.len() >= self.max_sessions {
            if let Some(evicted) = inner.least_recently_used() {
                inner.entries.remove(&evicted);
                common::log!("Session store full, evicted least recently used game {}", evicted);
            }
        }

        let shared = Arc::new(Mutex::new(session));
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            id,
            StoreEntry {
                session: shared.clone(),
                last_access: Instant::now(),
                access_seq: seq,
            },
        );
        Ok(shared)
    }

    async fn delete(&self, id: &GameId) -> bool {
        let mut inner = self.inner.lock().await;
        inner.entries.remove(id).is_some()
    }

    async fn contains(&self, id: &GameId) -> bool {
        let inner = self.inner.lock().await;
        inner.entries.contains_key(id)
    }

    async fn evict_expired(&self) -> Vec<GameId> {
        let mut inner = self.inner.lock().await;
        let expired: Vec<GameId> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.last_access.elapsed() >= self.ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            inner.entries.remove(id);
        }
        expired
    }

    async fn len(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.entries.len()
    }
}
