use battleship_engine::{play_match, AiPlayer, Contender, Engine, EngineConfig, InMemoryStore};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let engine = Engine::new(InMemoryStore::new(), EngineConfig::from_env());
    let p1 = Contender::new(
        "player1",
        Box::new(AiPlayer::new()),
        SmallRng::seed_from_u64(seed1),
    );
    let p2 = Contender::new(
        "player2",
        Box::new(AiPlayer::new()),
        SmallRng::seed_from_u64(seed2),
    );

    let summary = play_match(&engine, p1, p2).await?;

    let result = json!({
        "game": summary.game,
        "player1": {"attacks": summary.attacks[0]},
        "player2": {"attacks": summary.attacks[1]},
        "moves": summary.final_state.moves.len(),
        "winner": summary.winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
