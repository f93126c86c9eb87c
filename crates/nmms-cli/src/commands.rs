//! CLI command definitions and handlers.

use crate::output::{emit_error, emit_json, AskResponse, TellResponse};
use crate::statements::{parse_sequent_query, parse_tell_statement, Statement};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use nmms_base::{BaseDocument, MaterialBase};
use nmms_engine::{Reasoner, DEFAULT_MAX_DEPTH};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Semantic exit codes, following the grep/diff convention.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_NOT_DERIVABLE: i32 = 2;

/// Main CLI structure.
#[derive(Parser)]
#[command(name = "nmms")]
#[command(about = "Nonmonotonic multi-succedent sequent calculus reasoner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Add atoms, consequences or schemas to a base file
    Tell {
        /// Path to the JSON base file
        #[arg(short, long)]
        base: PathBuf,

        /// Create the base file if it does not exist
        #[arg(long)]
        create: bool,

        /// Statement: "A |~ B", "atom A" or "schema <kind> <a> <b>" (- for stdin)
        statement: Option<String>,

        /// Output as JSON (pipe-friendly)
        #[arg(long, conflicts_with = "quiet")]
        json: bool,

        /// Suppress output; rely on the exit code
        #[arg(short, long)]
        quiet: bool,

        /// Read statements from FILE, one per line (- for stdin)
        #[arg(long, value_name = "FILE")]
        batch: Option<String>,
    },

    /// Query derivability of a sequent
    Ask {
        /// Path to the JSON base file
        #[arg(short, long)]
        base: PathBuf,

        /// Print the proof trace
        #[arg(long)]
        trace: bool,

        /// Maximum proof depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Sequent: "A => B" or "A, B => C, D" (- for stdin)
        sequent: Option<String>,

        /// Output as JSON (pipe-friendly)
        #[arg(long, conflicts_with = "quiet")]
        json: bool,

        /// Suppress output; rely on the exit code
        #[arg(short, long)]
        quiet: bool,

        /// Read sequents from FILE, one per line (- for stdin)
        #[arg(long, value_name = "FILE")]
        batch: Option<String>,
    },

    /// Interactive REPL
    Repl {
        /// Path to a JSON base file to load
        #[arg(short, long)]
        base: Option<PathBuf>,
    },
}

/// Dispatch a parsed command, returning the process exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.command {
        Commands::Tell {
            base,
            create,
            statement,
            json,
            quiet,
            batch,
        } => run_tell(&base, create, statement, json, quiet, batch),
        Commands::Ask {
            base,
            trace,
            max_depth,
            sequent,
            json,
            quiet,
            batch,
        } => run_ask(&base, trace, max_depth, sequent, json, quiet, batch),
        Commands::Repl { base } => crate::repl::run(base.as_deref()),
    }
}

pub fn load_base(path: &Path) -> Result<MaterialBase> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read base file {}", path.display()))?;
    let document = BaseDocument::from_json(&text)
        .with_context(|| format!("malformed base file {}", path.display()))?;
    Ok(MaterialBase::from_document(&document)?)
}

pub fn save_base(path: &Path, base: &MaterialBase) -> Result<()> {
    std::fs::write(path, base.to_document().to_json_pretty())
        .with_context(|| format!("cannot write base file {}", path.display()))
}

/// Apply one tell statement to the base, returning a human-readable
/// description of what changed. Atoms referenced by a consequence are
/// declared before the consequence is inserted.
pub fn apply_statement(base: &mut MaterialBase, input: &str) -> Result<String> {
    match parse_tell_statement(input)? {
        Statement::Atom { atom, annotation } => {
            base.add_atom(atom.clone());
            let detail = match &annotation {
                Some(note) => {
                    base.annotate(&atom, note.clone());
                    format!("Added atom: {} ({})", atom, note)
                }
                None => format!("Added atom: {}", atom),
            };
            Ok(detail)
        }
        Statement::Consequence {
            antecedent,
            consequent,
        } => {
            for atom in antecedent.iter().chain(consequent.iter()) {
                base.add_atom(atom.clone());
            }
            let detail = format!(
                "Added consequence: {} |~ {}",
                antecedent.iter().join(", "),
                consequent.iter().join(", ")
            );
            base.add_consequence(antecedent, consequent)?;
            Ok(detail)
        }
        Statement::Schema(schema) => {
            let detail = format!("Registered schema: {}", schema.kind);
            base.register_schema(schema);
            Ok(detail)
        }
    }
}

fn read_stdin_line() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("cannot read stdin")?;
    Ok(buffer.lines().next().unwrap_or_default().to_string())
}

fn batch_lines(source: &str) -> Result<Vec<String>> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("cannot read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("cannot read batch file {}", source))?
    };
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn run_tell(
    path: &Path,
    create: bool,
    statement: Option<String>,
    json: bool,
    quiet: bool,
    batch: Option<String>,
) -> i32 {
    let mut base = if path.exists() {
        match load_base(path) {
            Ok(base) => base,
            Err(error) => {
                emit_error(&format!("{:#}", error), json, quiet);
                return EXIT_ERROR;
            }
        }
    } else if create {
        MaterialBase::new()
    } else {
        emit_error(
            &format!(
                "base file {} does not exist (use --create)",
                path.display()
            ),
            json,
            quiet,
        );
        return EXIT_ERROR;
    };

    let statements = match &batch {
        Some(source) => match batch_lines(source) {
            Ok(lines) => lines,
            Err(error) => {
                emit_error(&format!("{:#}", error), json, quiet);
                return EXIT_ERROR;
            }
        },
        None => {
            let Some(mut single) = statement else {
                emit_error("no statement provided", json, quiet);
                return EXIT_ERROR;
            };
            if single == "-" {
                match read_stdin_line() {
                    Ok(line) => single = line,
                    Err(error) => {
                        emit_error(&format!("{:#}", error), json, quiet);
                        return EXIT_ERROR;
                    }
                }
            }
            vec![single]
        }
    };

    for input in &statements {
        match apply_statement(&mut base, input) {
            Ok(detail) => {
                if json {
                    emit_json(&TellResponse::ok(detail));
                } else if !quiet {
                    println!("{}", detail);
                }
            }
            Err(error) => {
                emit_error(&format!("{:#}", error), json, quiet);
                return EXIT_ERROR;
            }
        }
    }

    if let Err(error) = save_base(path, &base) {
        emit_error(&format!("{:#}", error), json, quiet);
        return EXIT_ERROR;
    }
    EXIT_SUCCESS
}

fn ask_one(
    input: &str,
    reasoner: &mut Reasoner<'_>,
    trace: bool,
    json: bool,
    quiet: bool,
) -> i32 {
    let (antecedent, consequent) = match parse_sequent_query(input) {
        Ok(sides) => sides,
        Err(error) => {
            emit_error(&error.to_string(), json, quiet);
            return EXIT_ERROR;
        }
    };

    let result = reasoner.derives(antecedent.clone(), consequent.clone());
    info!(
        sequent = %input.trim(),
        status = result.status(),
        depth_reached = result.depth_reached,
        "ask"
    );

    if json {
        emit_json(&AskResponse::new(&result, &antecedent, &consequent, trace));
    } else if !quiet {
        println!("{}", result.status().replace('_', " "));
        if trace {
            for line in &result.trace {
                println!("  {}", line);
            }
            println!("Depth reached: {}", result.depth_reached);
            println!("Cache hits: {}", result.cache_hits);
        }
    }

    if result.derivable {
        EXIT_SUCCESS
    } else {
        EXIT_NOT_DERIVABLE
    }
}

fn run_ask(
    path: &Path,
    trace: bool,
    max_depth: usize,
    sequent: Option<String>,
    json: bool,
    quiet: bool,
    batch: Option<String>,
) -> i32 {
    let base = match load_base(path) {
        Ok(base) => base,
        Err(error) => {
            emit_error(&format!("{:#}", error), json, quiet);
            return EXIT_ERROR;
        }
    };
    let mut reasoner = Reasoner::with_max_depth(&base, max_depth);

    if let Some(source) = &batch {
        let lines = match batch_lines(source) {
            Ok(lines) => lines,
            Err(error) => {
                emit_error(&format!("{:#}", error), json, quiet);
                return EXIT_ERROR;
            }
        };
        let mut any_error = false;
        let mut any_not_derivable = false;
        for line in &lines {
            match ask_one(line, &mut reasoner, trace, json, quiet) {
                EXIT_ERROR => any_error = true,
                EXIT_NOT_DERIVABLE => any_not_derivable = true,
                _ => {}
            }
        }
        return if any_error {
            EXIT_ERROR
        } else if any_not_derivable {
            EXIT_NOT_DERIVABLE
        } else {
            EXIT_SUCCESS
        };
    }

    let Some(mut input) = sequent else {
        emit_error("no sequent provided", json, quiet);
        return EXIT_ERROR;
    };
    if input == "-" {
        match read_stdin_line() {
            Ok(line) => input = line,
            Err(error) => {
                emit_error(&format!("{:#}", error), json, quiet);
                return EXIT_ERROR;
            }
        }
    }
    ask_one(&input, &mut reasoner, trace, json, quiet)
}
