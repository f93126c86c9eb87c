//! Tests for the nmms-cli crate.

use clap::Parser;
use nmms_cli::commands::{apply_statement, load_base, save_base, Cli, Commands};
use nmms_base::MaterialBase;
use nmms_core::parse;
use nmms_engine::Reasoner;
use std::collections::BTreeSet;
use std::path::PathBuf;

fn sentences(texts: &[&str]) -> BTreeSet<nmms_core::Sentence> {
    texts.iter().map(|t| parse(t).unwrap()).collect()
}

#[test]
fn parses_ask_command() {
    let cli = Cli::try_parse_from([
        "nmms",
        "ask",
        "-b",
        "base.json",
        "--trace",
        "--max-depth",
        "30",
        "p => q",
    ])
    .unwrap();

    match cli.command {
        Commands::Ask {
            base,
            trace,
            max_depth,
            sequent,
            json,
            quiet,
            batch,
        } => {
            assert_eq!(base, PathBuf::from("base.json"));
            assert!(trace);
            assert_eq!(max_depth, 30);
            assert_eq!(sequent.as_deref(), Some("p => q"));
            assert!(!json);
            assert!(!quiet);
            assert_eq!(batch, None);
        }
        _ => panic!("expected ask command"),
    }
}

#[test]
fn parses_tell_command_with_create_and_json() {
    let cli = Cli::try_parse_from([
        "nmms",
        "tell",
        "-b",
        "base.json",
        "--create",
        "--json",
        "p |~ q",
    ])
    .unwrap();

    match cli.command {
        Commands::Tell {
            base,
            create,
            statement,
            json,
            quiet,
            batch,
        } => {
            assert_eq!(base, PathBuf::from("base.json"));
            assert!(create);
            assert_eq!(statement.as_deref(), Some("p |~ q"));
            assert!(json);
            assert!(!quiet);
            assert_eq!(batch, None);
        }
        _ => panic!("expected tell command"),
    }
}

#[test]
fn parses_repl_command() {
    let cli = Cli::try_parse_from(["nmms", "repl"]).unwrap();
    match cli.command {
        Commands::Repl { base } => assert_eq!(base, None),
        _ => panic!("expected repl command"),
    }

    let cli = Cli::try_parse_from(["nmms", "repl", "-b", "base.json"]).unwrap();
    match cli.command {
        Commands::Repl { base } => assert_eq!(base, Some(PathBuf::from("base.json"))),
        _ => panic!("expected repl command"),
    }
}

#[test]
fn ask_defaults_to_the_engine_depth_budget() {
    let cli = Cli::try_parse_from(["nmms", "ask", "-b", "base.json", "p => q"]).unwrap();
    match cli.command {
        Commands::Ask { max_depth, .. } => {
            assert_eq!(max_depth, nmms_engine::DEFAULT_MAX_DEPTH);
        }
        _ => panic!("expected ask command"),
    }
}

#[test]
fn json_conflicts_with_quiet() {
    assert!(Cli::try_parse_from([
        "nmms", "ask", "-b", "base.json", "--json", "--quiet", "p => q",
    ])
    .is_err());
}

#[test]
fn ask_requires_a_base_path() {
    assert!(Cli::try_parse_from(["nmms", "ask", "p => q"]).is_err());
}

#[test]
fn apply_statement_builds_a_base() {
    let mut base = MaterialBase::new();
    apply_statement(&mut base, "atom p \"Tara is human\"").unwrap();
    apply_statement(&mut base, "p |~ q").unwrap();
    apply_statement(&mut base, "schema subClassOf Man Mortal").unwrap();

    assert_eq!(base.language().len(), 2);
    assert_eq!(base.consequences().len(), 1);
    assert_eq!(base.schemas().len(), 1);
    assert_eq!(
        base.annotation(&nmms_core::Atom::prop("p")),
        Some("Tara is human")
    );
}

#[test]
fn apply_statement_rejects_garbage() {
    let mut base = MaterialBase::new();
    assert!(apply_statement(&mut base, "frobnicate the base").is_err());
    assert!(apply_statement(&mut base, "p & q |~ r").is_err());
    assert!(apply_statement(&mut base, "schema subClassOf Man").is_err());
}

#[test]
fn tell_then_ask_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("base.json");

    let mut base = MaterialBase::new();
    apply_statement(&mut base, "p |~ q").unwrap();
    apply_statement(&mut base, "s, t |~").unwrap();
    apply_statement(&mut base, "schema subClassOf Man Mortal").unwrap();
    save_base(&path, &base).unwrap();

    let restored = load_base(&path).unwrap();
    let mut reasoner = Reasoner::new(&restored);
    assert!(reasoner.query(sentences(&["p"]), sentences(&["q"])));
    assert!(reasoner.query(sentences(&[]), sentences(&["p -> q"])));
    assert!(reasoner.query(sentences(&[]), sentences(&["~(s & t)"])));
    assert!(reasoner.query(
        sentences(&["Man(socrates)"]),
        sentences(&["Mortal(socrates)"]),
    ));
    assert!(!reasoner.query(sentences(&["p", "s"]), sentences(&["q"])));
}

#[test]
fn load_base_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(load_base(&missing).is_err());
}
