//! Parsing of tell statements and ask sequents.
//!
//! Sentence lists split on commas at paren depth 0 only, since role
//! assertions like `R(a,b)` carry commas of their own.

use nmms_base::{AtomSet, Schema, SchemaKind};
use nmms_core::{parse, parse_atom, Sentence, SyntaxError};
use std::collections::BTreeSet;

#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("expected `A, B |~ C`, `atom A` or `schema <kind> <a> <b>`, got `{0}`")]
    MalformedTell(String),
    #[error("expected `A, B => C, D`, got `{0}`")]
    MalformedAsk(String),
    #[error("unknown schema kind `{0}`")]
    UnknownSchemaKind(String),
    #[error("schema statements take a kind and two names, got `{0}`")]
    MalformedSchema(String),
}

/// A parsed tell statement, ready to apply to a base.
#[derive(Debug, Clone)]
pub enum Statement {
    Atom {
        atom: nmms_core::Atom,
        annotation: Option<String>,
    },
    Consequence {
        antecedent: AtomSet,
        consequent: AtomSet,
    },
    Schema(Schema),
}

/// Split on `separator` at paren depth 0, dropping empty segments.
fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                segments.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    segments.push(&input[start..]);
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a comma-separated list of sentences.
pub fn parse_sentence_list(input: &str) -> Result<BTreeSet<Sentence>, SyntaxError> {
    split_top_level(input, ',').into_iter().map(parse).collect()
}

fn parse_atom_list(input: &str) -> Result<AtomSet, SyntaxError> {
    split_top_level(input, ',')
        .into_iter()
        .map(parse_atom)
        .collect()
}

/// Parse an ask query `Γ => Δ` into its two sentence sets.
pub fn parse_sequent_query(
    input: &str,
) -> Result<(BTreeSet<Sentence>, BTreeSet<Sentence>), StatementError> {
    let Some((left, right)) = input.split_once("=>") else {
        return Err(StatementError::MalformedAsk(input.trim().to_string()));
    };
    Ok((parse_sentence_list(left)?, parse_sentence_list(right)?))
}

/// Pull a trailing `"annotation"` off a statement, if present.
fn extract_trailing_annotation(input: &str) -> (&str, Option<String>) {
    let trimmed = input.trim_end();
    if !trimmed.ends_with('"') {
        return (input, None);
    }
    let body = &trimmed[..trimmed.len() - 1];
    match body.rfind('"') {
        Some(open) => (&trimmed[..open], Some(body[open + 1..].to_string())),
        None => (input, None),
    }
}

fn schema_kind_from_cli(kind: &str, first: String, second: String) -> Option<SchemaKind> {
    match kind {
        "subClassOf" => Some(SchemaKind::SubclassOf {
            sub: first,
            sup: second,
        }),
        "range" => Some(SchemaKind::Range {
            role: first,
            concept: second,
        }),
        "domain" => Some(SchemaKind::Domain {
            role: first,
            concept: second,
        }),
        "subPropertyOf" => Some(SchemaKind::SubpropertyOf {
            sub: first,
            sup: second,
        }),
        "disjointWith" => Some(SchemaKind::DisjointConcepts {
            left: first,
            right: second,
        }),
        "disjointProperties" => Some(SchemaKind::DisjointProperties {
            left: first,
            right: second,
        }),
        // Document tags are accepted too.
        other => SchemaKind::from_parts(other, first, second),
    }
}

/// Parse one tell statement: `atom A ["note"]`, `schema <kind> <a> <b>
/// ["note"]`, or `Γ |~ Δ` with atomic sentences on both sides.
pub fn parse_tell_statement(input: &str) -> Result<Statement, StatementError> {
    let trimmed = input.trim();

    if let Some(rest) = trimmed.strip_prefix("atom ") {
        let (body, annotation) = extract_trailing_annotation(rest);
        let atom = parse_atom(body.trim())?;
        return Ok(Statement::Atom { atom, annotation });
    }

    if let Some(rest) = trimmed.strip_prefix("schema ") {
        let (body, annotation) = extract_trailing_annotation(rest);
        let parts: Vec<&str> = body.split_whitespace().collect();
        let [kind, first, second] = parts.as_slice() else {
            return Err(StatementError::MalformedSchema(body.trim().to_string()));
        };
        let kind = schema_kind_from_cli(kind, first.to_string(), second.to_string())
            .ok_or_else(|| StatementError::UnknownSchemaKind(kind.to_string()))?;
        let mut schema = Schema::new(kind);
        schema.annotation = annotation;
        return Ok(Statement::Schema(schema));
    }

    if let Some((left, right)) = trimmed.split_once("|~") {
        return Ok(Statement::Consequence {
            antecedent: parse_atom_list(left)?,
            consequent: parse_atom_list(right)?,
        });
    }

    Err(StatementError::MalformedTell(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmms_core::Atom;

    #[test]
    fn splits_commas_outside_parens_only() {
        assert_eq!(
            split_top_level("hasChild(alice,bob), Man(x)", ','),
            ["hasChild(alice,bob)", "Man(x)"]
        );
        assert_eq!(split_top_level("p, q , r", ','), ["p", "q", "r"]);
        assert_eq!(split_top_level("  ", ','), Vec::<&str>::new());
    }

    #[test]
    fn parses_ask_query() {
        let (gamma, delta) = parse_sequent_query("p, q => r").unwrap();
        assert_eq!(gamma.len(), 2);
        assert_eq!(delta.len(), 1);

        let (gamma, delta) = parse_sequent_query(" => p -> q").unwrap();
        assert!(gamma.is_empty());
        assert_eq!(delta.len(), 1);

        assert!(parse_sequent_query("p |~ q").is_err());
    }

    #[test]
    fn parses_atom_statement() {
        match parse_tell_statement("atom Happy(alice)").unwrap() {
            Statement::Atom { atom, annotation } => {
                assert_eq!(atom, Atom::concept("Happy", "alice"));
                assert_eq!(annotation, None);
            }
            other => panic!("expected atom statement, got {:?}", other),
        }
    }

    #[test]
    fn parses_atom_with_annotation() {
        match parse_tell_statement(r#"atom p "Tara is human""#).unwrap() {
            Statement::Atom { atom, annotation } => {
                assert_eq!(atom, Atom::prop("p"));
                assert_eq!(annotation.as_deref(), Some("Tara is human"));
            }
            other => panic!("expected atom statement, got {:?}", other),
        }
    }

    #[test]
    fn parses_consequence_statement() {
        match parse_tell_statement("p, q |~ v").unwrap() {
            Statement::Consequence {
                antecedent,
                consequent,
            } => {
                assert_eq!(antecedent.len(), 2);
                assert_eq!(consequent.len(), 1);
            }
            other => panic!("expected consequence, got {:?}", other),
        }
    }

    #[test]
    fn parses_incompatibility_and_theorem_statements() {
        match parse_tell_statement("s, t |~").unwrap() {
            Statement::Consequence { consequent, .. } => assert!(consequent.is_empty()),
            other => panic!("expected consequence, got {:?}", other),
        }
        match parse_tell_statement("|~ p").unwrap() {
            Statement::Consequence { antecedent, .. } => assert!(antecedent.is_empty()),
            other => panic!("expected consequence, got {:?}", other),
        }
    }

    #[test]
    fn rejects_compound_sentences_in_consequences() {
        assert!(parse_tell_statement("p & q |~ r").is_err());
    }

    #[test]
    fn parses_schema_statements() {
        match parse_tell_statement("schema subClassOf Man Mortal").unwrap() {
            Statement::Schema(schema) => {
                assert_eq!(
                    schema.kind,
                    SchemaKind::SubclassOf {
                        sub: "Man".into(),
                        sup: "Mortal".into(),
                    }
                );
            }
            other => panic!("expected schema, got {:?}", other),
        }
        match parse_tell_statement(r#"schema disjointWith Man Woman "exclusive""#).unwrap() {
            Statement::Schema(schema) => {
                assert_eq!(schema.annotation.as_deref(), Some("exclusive"));
            }
            other => panic!("expected schema, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_schema_kind_and_arity() {
        assert!(matches!(
            parse_tell_statement("schema transitive r s"),
            Err(StatementError::UnknownSchemaKind(_))
        ));
        assert!(matches!(
            parse_tell_statement("schema subClassOf Man"),
            Err(StatementError::MalformedSchema(_))
        ));
    }

    #[test]
    fn rejects_statements_without_a_form() {
        assert!(matches!(
            parse_tell_statement("hello world"),
            Err(StatementError::MalformedTell(_))
        ));
    }
}
