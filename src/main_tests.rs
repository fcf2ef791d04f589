use super::*;
use clap::error::ErrorKind;

use prefuzz::config::{ConfigFormat, parse_config};

#[test]
fn run_defaults_to_one_round_into_gen() {
    let cli = Cli::try_parse_from(["prefuzz", "run", "fuzz.yaml"]).expect("parse run");
    match cli.command {
        Commands::Run {
            config,
            path,
            device,
            rounds,
            dry_run,
            json,
        } => {
            assert_eq!(config, PathBuf::from("fuzz.yaml"));
            assert_eq!(path, PathBuf::from("gen"));
            assert!(device.is_none());
            assert_eq!(rounds, 1);
            assert!(!dry_run);
            assert!(!json);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn run_flags_parse() {
    let cli = Cli::try_parse_from([
        "prefuzz",
        "run",
        "fuzz.yaml",
        "--path",
        "out",
        "--device",
        "emulator-5554",
        "--rounds",
        "25",
        "--dry-run",
        "--json",
    ])
    .expect("parse run flags");
    match cli.command {
        Commands::Run {
            path,
            device,
            rounds,
            dry_run,
            json,
            ..
        } => {
            assert_eq!(path, PathBuf::from("out"));
            assert_eq!(device.as_deref(), Some("emulator-5554"));
            assert_eq!(rounds, 25);
            assert!(dry_run);
            assert!(json);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn zero_rounds_is_rejected() {
    let err = Cli::try_parse_from(["prefuzz", "run", "fuzz.yaml", "--rounds", "0"])
        .expect_err("zero rounds");
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn run_requires_config_path() {
    let err = Cli::try_parse_from(["prefuzz", "run"]).expect_err("missing config");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn cli_verbose_flag_parses_short_and_long() {
    let long = Cli::try_parse_from(["prefuzz", "--verbose", "example"]).expect("parse --verbose");
    assert!(long.verbose);
    assert!(matches!(long.command, Commands::Example));

    let short = Cli::try_parse_from(["prefuzz", "check", "a.yaml", "-v"]).expect("parse -v");
    assert!(short.verbose);
    assert!(matches!(short.command, Commands::Check { json: false, .. }));
}

#[test]
fn example_config_is_valid() {
    let config = parse_config(cli_examples::EXAMPLE_CONFIG, ConfigFormat::Yaml)
        .expect("example parses");
    let specs = config.resolve().expect("example resolves");
    assert_eq!(specs.len(), 5);
    assert!(config.device_target().is_ok());
}

#[test]
fn describe_specs_lists_domains_and_bounds() {
    let config = parse_config(cli_examples::EXAMPLE_CONFIG, ConfigFormat::Yaml).expect("parse");
    let specs = config.resolve().expect("resolve");

    let human = describe_specs_human(&config, &specs);
    assert!(human.starts_with("launcher_prefs: 5 preferences"));
    assert!(human.contains("pref_columns (int) [3, 4, 5, 6, 7]"));
    assert!(human.contains("pref_icon_scale (float) [0.5, 0.75, 1.0, 1.25, 1.5]"));
    assert!(human.contains("size 1..=2"));

    let json = describe_specs_json(&config, &specs);
    assert_eq!(json["preferences"][1]["type"], "boolean");
    assert_eq!(json["preferences"][1]["domain"], serde_json::json!(["true", "false"]));
    assert_eq!(json["preferences"][4]["max"], 2);
    assert!(json["preferences"][0].get("min").is_none());
}
