use std::process::Command;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_battleship-engine"))
}

#[test]
fn rules_subcommand_prints_the_ruleset() {
    let output = cli()
        .args(["--log-level", "debug", "rules", "--rules", "classic"])
        .output()
        .expect("failed to run cli binary");
    assert!(output.status.success());
    let v: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("invalid json");
    assert_eq!(v["gridSize"], 10);
    assert_eq!(v["kinds"].as_array().map(Vec::len), Some(5));
}

#[test]
fn unknown_log_level_is_rejected() {
    let output = cli()
        .args(["--log-level", "loud", "rules"])
        .output()
        .expect("failed to run cli binary");
    assert!(!output.status.success());
}
