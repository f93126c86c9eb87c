//! Interactive REPL over a material base.

use crate::commands::{apply_statement, load_base, save_base, EXIT_ERROR, EXIT_SUCCESS};
use crate::statements::parse_sequent_query;
use itertools::Itertools;
use nmms_base::MaterialBase;
use nmms_engine::Reasoner;
use std::io::{self, BufRead, Write};
use std::path::Path;

const HELP_TEXT: &str = "\
Commands:
  tell A |~ B                        Add a consequence to the base
  tell A, B |~                       Add an incompatibility (empty consequent)
  tell |~ A                          Add a theorem (empty antecedent)
  tell atom A                        Add an atom to the base
  tell atom A \"desc\"                 Add an atom with an annotation
  tell schema subClassOf Man Mortal  Register a subClassOf schema
  tell schema range hasChild Person  Register a range schema
  tell schema domain hasChild Parent Register a domain schema
  tell schema subPropertyOf hasChild hasDescendant
                                     Register a subPropertyOf schema
  tell schema disjointWith Man Woman Register a disjointWith schema
  tell schema disjointProperties hasChild hasParent
                                     Register a disjointProperties schema
  ask A => B                         Query derivability of a sequent
  show                               Display the current base
  show schemas                       Display registered schemas
  show vocabulary                    Display individuals, concepts, roles
  trace on|off                       Toggle proof trace display
  save <file>                        Save the base to a JSON file
  load <file>                        Load a base from a JSON file
  help                               Show this help
  quit                               Exit the REPL
";

/// Run the REPL, optionally loading an initial base file. Errors never
/// terminate the loop; only `quit`/`exit` or end of input do.
pub fn run(initial: Option<&Path>) -> i32 {
    let mut base = match initial {
        Some(path) if path.exists() => match load_base(path) {
            Ok(base) => {
                println!("Loaded base from {}", path.display());
                base
            }
            Err(error) => {
                eprintln!("error: {:#}", error);
                return EXIT_ERROR;
            }
        },
        Some(path) => {
            println!(
                "Base file {} not found, starting with an empty base.",
                path.display()
            );
            MaterialBase::new()
        }
        None => {
            println!("Starting with an empty base.");
            MaterialBase::new()
        }
    };

    println!("nmms REPL. Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut show_trace = false;

    loop {
        print!("nmms> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!();
                break;
            }
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "help" => {
                print!("{}", HELP_TEXT);
                continue;
            }
            "show" => {
                show_base(&base);
                continue;
            }
            "show schemas" => {
                show_schemas(&base);
                continue;
            }
            "show vocabulary" => {
                println!("Individuals: {}", base.individuals().iter().join(", "));
                println!("Concepts: {}", base.concepts().iter().join(", "));
                println!("Roles: {}", base.roles().iter().join(", "));
                continue;
            }
            _ => {}
        }

        if let Some(value) = line.strip_prefix("trace ") {
            match value.trim() {
                "on" => {
                    show_trace = true;
                    println!("Trace: ON");
                }
                "off" => {
                    show_trace = false;
                    println!("Trace: OFF");
                }
                _ => println!("Usage: trace on|off"),
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("save ") {
            match save_base(Path::new(path.trim()), &base) {
                Ok(()) => println!("Saved to {}", path.trim()),
                Err(error) => println!("Error saving: {:#}", error),
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("load ") {
            match load_base(Path::new(path.trim())) {
                Ok(loaded) => {
                    base = loaded;
                    println!("Loaded from {}", path.trim());
                }
                Err(error) => println!("Error loading: {:#}", error),
            }
            continue;
        }

        if let Some(statement) = line.strip_prefix("tell ") {
            match apply_statement(&mut base, statement) {
                Ok(detail) => println!("{}", detail),
                Err(error) => println!("Error: {:#}", error),
            }
            continue;
        }

        if let Some(query) = line.strip_prefix("ask ") {
            match parse_sequent_query(query) {
                Ok((antecedent, consequent)) => {
                    let mut reasoner = Reasoner::new(&base);
                    let result = reasoner.derives(antecedent, consequent);
                    println!("{}", result.status().replace('_', " "));
                    if show_trace {
                        for trace_line in &result.trace {
                            println!("  {}", trace_line);
                        }
                        println!(
                            "  Depth: {}, Cache hits: {}",
                            result.depth_reached, result.cache_hits
                        );
                    }
                }
                Err(error) => println!("Error: {}", error),
            }
            continue;
        }

        println!("Unknown command: '{}'. Type 'help' for commands.", line);
    }

    EXIT_SUCCESS
}

fn show_base(base: &MaterialBase) {
    println!("Language ({} atoms):", base.language().len());
    for atom in base.language() {
        match base.annotation(atom) {
            Some(note) => println!("  {} ({})", atom, note),
            None => println!("  {}", atom),
        }
    }
    println!("Consequences ({}):", base.consequences().len());
    for (antecedent, consequent) in base.consequences() {
        println!(
            "  {} |~ {}",
            antecedent.iter().join(", "),
            consequent.iter().join(", ")
        );
    }
}

fn show_schemas(base: &MaterialBase) {
    println!("Schemas ({}):", base.schemas().len());
    for schema in base.schemas() {
        let mut line = format!("  {}: {}", schema.kind.name(), schema.kind);
        if let Some(note) = &schema.annotation {
            line.push_str(&format!(" ({})", note));
        }
        if let Some(source) = &schema.source {
            line.push_str(&format!(" [{}]", source));
        }
        println!("{}", line);
    }
}
