//! Engine: sequences game transitions against a [`GameStore`].
//!
//! Transitions on the same game are serialized by a per-game async mutex
//! held across load, compute and save. Different games never contend, and a
//! game's lock entry only lives while some transition holds or awaits it.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use log::{debug, info};
use tokio::sync::{broadcast, Mutex};

use crate::common::GameError;
use crate::config::{EngineConfig, FleetRules};
use crate::events::{EventBus, GameEvent};
use crate::game::{Game, GameId, Phase, PlayerId};
use crate::geometry::{Coordinate, ShipPlacement};
use crate::projection::{AttackResponse, GameProjection, PlayerGames};
use crate::store::GameStore;

pub struct Engine<S: GameStore> {
    store: S,
    rules: FleetRules,
    locks: DashMap<GameId, Arc<Mutex<()>>>,
    events: EventBus,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

impl<S: GameStore> Engine<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            rules: config.rules,
            locks: DashMap::new(),
            events: EventBus::new(config.event_capacity),
        }
    }

    /// Ruleset applied to games created by this engine.
    pub fn rules(&self) -> &FleetRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Receive every domain event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    fn lock_for(&self, id: GameId) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().value().clone()
    }

    /// Drop the lock entry for `id` once nobody else holds or waits on it.
    fn release(&self, id: GameId, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.locks.remove_if(&id, |_, l| Arc::strong_count(l) == 1);
    }

    async fn load(&self, id: GameId) -> Result<Game, GameError> {
        self.store.load(id).await?.ok_or(GameError::GameNotFound)
    }

    /// Load, apply `step`, save. Nothing is written if `step` fails.
    async fn transition<T>(
        &self,
        id: GameId,
        step: impl FnOnce(&mut Game) -> Result<T, GameError>,
    ) -> Result<(Game, T), GameError> {
        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().await;
            self.apply(id, step).await
        };
        self.release(id, lock);
        result
    }

    async fn apply<T>(
        &self,
        id: GameId,
        step: impl FnOnce(&mut Game) -> Result<T, GameError>,
    ) -> Result<(Game, T), GameError> {
        let mut game = self.load(id).await?;
        let out = step(&mut game).inspect_err(|e| debug!("game {id}: rejected: {e}"))?;
        self.store.save(&game).await?;
        Ok((game, out))
    }

    fn publish_update(&self, game: &Game) -> GameProjection {
        let projection = GameProjection::full(game);
        self.events
            .publish(GameEvent::GameUpdated(Box::new(projection.clone())));
        projection
    }

    /// Open a game with `player_name` in the first seat.
    pub async fn create(&self, player_name: &str) -> Result<GameProjection, GameError> {
        let game = Game::new(self.rules.clone(), player_name)?;
        self.store.save(&game).await?;
        info!(
            "game {}: created by {} ({})",
            game.id(),
            game.player_one().player.name,
            game.player_one().player.id
        );
        Ok(self.publish_update(&game))
    }

    /// Take the second seat of `id`.
    pub async fn join(&self, id: GameId, player_name: &str) -> Result<GameProjection, GameError> {
        let (game, player) = self.transition(id, |g| g.join(player_name)).await?;
        if let Some(seat) = game.seat(player) {
            info!("game {id}: {} ({player}) joined", seat.player.name);
            self.events.publish(GameEvent::PlayerJoined {
                game: id,
                player: seat.player.clone(),
            });
        }
        Ok(self.publish_update(&game))
    }

    /// Submit or resubmit `player`'s fleet.
    pub async fn submit_fleet(
        &self,
        id: GameId,
        player: PlayerId,
        placements: &[ShipPlacement],
    ) -> Result<GameProjection, GameError> {
        let (game, ()) = self
            .transition(id, |g| g.submit_fleet(player, placements))
            .await?;
        debug!("game {id}: fleet accepted for {player}");
        let projection = self.publish_update(&game);
        if game.phase() == Phase::InProgress {
            if let Some(first_turn) = game.current_turn() {
                info!("game {id}: both fleets placed, {first_turn} to move");
                self.events.publish(GameEvent::GameStarted {
                    game: id,
                    first_turn,
                });
            }
        }
        Ok(projection)
    }

    /// Fire at `at` as `player`.
    pub async fn attack(
        &self,
        id: GameId,
        player: PlayerId,
        at: Coordinate,
    ) -> Result<AttackResponse, GameError> {
        let timestamp = now_millis();
        let (game, outcome) = self
            .transition(id, |g| g.attack(player, at, timestamp))
            .await?;
        debug!("game {id}: {player} fired at {at}: {:?}", outcome.result);
        let projection = self.publish_update(&game);

        if outcome.game_over {
            if let Some(winner) = game.winner().and_then(|w| game.seat(w)) {
                info!("game {id}: won by {} ({})", winner.player.name, winner.player.id);
                self.events.publish(GameEvent::GameEnded {
                    game: id,
                    winner: winner.player.clone(),
                });
            }
        }

        Ok(AttackResponse {
            outcome,
            game: projection,
        })
    }

    /// Full projection of `id`, identical for every caller.
    pub async fn query(&self, id: GameId) -> Result<GameProjection, GameError> {
        let game = self.load(id).await?;
        Ok(GameProjection::full(&game))
    }

    /// Projection of `id` as `observer` is allowed to see it.
    pub async fn query_as(
        &self,
        id: GameId,
        observer: PlayerId,
    ) -> Result<GameProjection, GameError> {
        let game = self.load(id).await?;
        Ok(GameProjection::for_observer(&game, observer))
    }

    /// `player` and every game they are seated in.
    pub async fn player_games(&self, player: PlayerId) -> Result<PlayerGames, GameError> {
        let games = self.store.games_of(player).await?;
        debug!("player {player}: seated in {} games", games.len());
        PlayerGames::collect(player, &games).ok_or(GameError::PlayerNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShipKind;
    use crate::geometry::Orientation;
    use crate::store::InMemoryStore;

    fn engine() -> Engine<InMemoryStore> {
        Engine::new(InMemoryStore::new(), EngineConfig::default())
    }

    fn fleet() -> Vec<ShipPlacement> {
        let place = |kind, x, y, orientation| {
            ShipPlacement::new(kind, Coordinate::new(x, y), orientation)
        };
        vec![
            place(ShipKind::Battleship, 0, 0, Orientation::Horizontal),
            place(ShipKind::Destroyer, 0, 2, Orientation::Horizontal),
            place(ShipKind::Destroyer, 5, 5, Orientation::Vertical),
        ]
    }

    #[tokio::test]
    async fn missing_games_leave_no_lock_behind() {
        let engine = engine();
        for _ in 0..100 {
            let err = engine.join(GameId::new(), "x").await.unwrap_err();
            assert!(matches!(err, GameError::GameNotFound));
        }
        assert!(engine.locks.is_empty());
    }

    #[tokio::test]
    async fn idle_games_hold_no_lock() {
        let engine = engine();
        let created = engine.create("A").await.unwrap();
        let joined = engine.join(created.id, "B").await.unwrap();
        engine
            .submit_fleet(created.id, joined.player_one.id, &fleet())
            .await
            .unwrap();
        engine
            .submit_fleet(created.id, PlayerId::new(), &fleet())
            .await
            .unwrap_err();
        assert!(engine.locks.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn contended_games_drain_their_locks() {
        let engine = Arc::new(engine());
        let created = engine.create("A").await.unwrap();
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move { engine.join(created.id, &format!("p{i}")).await })
            })
            .collect();
        let mut joined = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                joined += 1;
            }
        }
        assert_eq!(joined, 1);
        assert!(engine.locks.is_empty());
    }
}
