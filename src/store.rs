//! Persistence boundary for games.

use std::sync::Arc;

use dashmap::DashMap;

use crate::common::StoreError;
use crate::game::{Game, GameId, PlayerId};

/// Per-record atomic load/save of games.
#[async_trait::async_trait]
pub trait GameStore: Send + Sync {
    /// Fetch a game; `Ok(None)` if no such record exists.
    async fn load(&self, id: GameId) -> Result<Option<Game>, StoreError>;
    /// Create or overwrite the record for `game.id()`.
    async fn save(&self, game: &Game) -> Result<(), StoreError>;
    /// Every game `player` is seated in, in no particular order.
    async fn games_of(&self, player: PlayerId) -> Result<Vec<Game>, StoreError>;
}

#[async_trait::async_trait]
impl<S: GameStore + ?Sized> GameStore for Arc<S> {
    async fn load(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        (**self).load(id).await
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        (**self).save(game).await
    }

    async fn games_of(&self, player: PlayerId) -> Result<Vec<Game>, StoreError> {
        (**self).games_of(player).await
    }
}

/// Store keeping bincode-encoded records in memory. Every load decodes a
/// fresh copy, so callers never share a game.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<GameId, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl GameStore for InMemoryStore {
    async fn load(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        match self.records.get(&id) {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes.value())?)),
            None => Ok(None),
        }
    }

    async fn save(&self, game: &Game) -> Result<(), StoreError> {
        let bytes = bincode::serialize(game)?;
        self.records.insert(game.id(), bytes);
        Ok(())
    }

    async fn games_of(&self, player: PlayerId) -> Result<Vec<Game>, StoreError> {
        let mut games = Vec::new();
        for record in self.records.iter() {
            let game: Game = bincode::deserialize(record.value())?;
            if game.is_seated(player) {
                games.push(game);
            }
        }
        Ok(games)
    }
}
