use std::collections::HashSet;

use anyhow::{anyhow, bail};
use log::{debug, info};
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::game::{GameId, Phase};
use crate::geometry::Coordinate;
use crate::projection::GameProjection;
use crate::store::GameStore;
use crate::Engine;

use super::Player;

/// A named player with its own random source.
pub struct Contender {
    pub name: String,
    pub player: Box<dyn Player>,
    pub rng: SmallRng,
}

impl Contender {
    pub fn new(name: impl Into<String>, player: Box<dyn Player>, rng: SmallRng) -> Self {
        Self {
            name: name.into(),
            player,
            rng,
        }
    }
}

/// How an automated match went.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub game: GameId,
    pub winner: Option<String>,
    pub attacks: [usize; 2],
    pub final_state: GameProjection,
}

/// Play a full game between `first` (who creates it and moves first) and
/// `second` through `engine`.
pub async fn play_match<S: GameStore>(
    engine: &Engine<S>,
    mut first: Contender,
    mut second: Contender,
) -> anyhow::Result<MatchSummary> {
    let created = engine.create(&first.name).await?;
    let game = created.id;
    let joined = engine.join(game, &second.name).await?;
    let ids = [
        joined.player_one.id,
        joined
            .player_two
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("second seat empty after join"))?,
    ];
    info!("match {game}: {} vs {}", first.name, second.name);

    let rules = engine.rules().clone();
    for (id, c) in ids.iter().zip([&mut first, &mut second]) {
        let fleet = c.player.place_fleet(&mut c.rng, &rules)?;
        engine.submit_fleet(game, *id, &fleet).await?;
    }

    let mut attacked: [HashSet<Coordinate>; 2] = Default::default();
    let max_turns = 2 * usize::from(rules.grid_size).pow(2);
    let mut state = engine.query(game).await?;
    for _ in 0..max_turns {
        if state.status != Phase::InProgress {
            break;
        }
        let turn = state
            .current_turn
            .ok_or_else(|| anyhow!("game in progress without a current turn"))?;
        let seat = usize::from(turn == ids[1]);
        let c = if seat == 0 { &mut first } else { &mut second };

        let at = c
            .player
            .select_target(&mut c.rng, rules.grid_size, &attacked[seat])
            .ok_or_else(|| anyhow!("match {game}: {} has no cell left to fire at", c.name))?;
        let response = engine.attack(game, turn, at).await?;
        attacked[seat].insert(at);
        c.player.handle_attack_result(at, response.outcome.result);
        debug!("match {game}: {} -> {at}: {:?}", c.name, response.outcome.result);
        state = response.game;
    }
    if state.status != Phase::Completed {
        bail!("match {game} did not finish within {max_turns} attacks");
    }

    let winner = state
        .winner
        .map(|w| if w == ids[0] { first.name.clone() } else { second.name.clone() });
    Ok(MatchSummary {
        game,
        winner,
        attacks: [attacked[0].len(), attacked[1].len()],
        final_state: state,
    })
}
