use battleship_engine::{
    init_logging, init_logging_with, play_match, AiPlayer, Contender, Engine, EngineConfig,
    InMemoryStore, Ruleset,
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level; defaults to BATTLESHIP_LOG, then `info`.
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RulesArg {
    Standard,
    Classic,
}

impl From<RulesArg> for Ruleset {
    fn from(arg: RulesArg) -> Self {
        match arg {
            RulesArg::Standard => Ruleset::Standard,
            RulesArg::Classic => Ruleset::Classic,
        }
    }
}

#[derive(Parser)]
enum Commands {
    /// Play an automated game through the engine and print the final state.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Ruleset; defaults to BATTLESHIP_RULES, then `standard`.
        #[arg(long, value_enum)]
        rules: Option<RulesArg>,
        #[arg(long, default_value = "Player 1")]
        first: String,
        #[arg(long, default_value = "Player 2")]
        second: String,
    },
    /// Print a ruleset as JSON.
    Rules {
        #[arg(long, value_enum, default_value_t = RulesArg::Standard)]
        rules: RulesArg,
    },
}

fn seeded(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.log_level {
        Some(level) => init_logging_with(level),
        None => init_logging(),
    }

    match cli.command {
        Commands::Local {
            seed,
            rules,
            first,
            second,
        } => {
            let mut config = EngineConfig::from_env();
            if let Some(r) = rules {
                config = config.with_rules(Ruleset::from(r).rules());
            }
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let engine = Engine::new(InMemoryStore::new(), config);

            let a = Contender::new(first, Box::new(AiPlayer::new()), seeded(seed));
            let b = Contender::new(
                second,
                Box::new(AiPlayer::new()),
                seeded(seed.map(|s| s.wrapping_add(1))),
            );
            let summary = play_match(&engine, a, b).await?;

            println!("{}", serde_json::to_string_pretty(&summary.final_state)?);
            match summary.winner {
                Some(name) => println!(
                    "{} wins after {} + {} attacks",
                    name, summary.attacks[0], summary.attacks[1]
                ),
                None => println!("No winner"),
            }
        }
        Commands::Rules { rules } => {
            let rules = Ruleset::from(rules).rules();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
