//! Recursive-descent parser for the sentence surface syntax.

use crate::sentence::{Atom, Sentence};

/// Syntax error with the character position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

/// Token kinds of the sentence syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Not,    // ~
    And,    // &
    Or,     // |
    Arrow,  // ->
    LParen, // (
    RParen, // )
    Comma,  // ,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier `{}`", name),
            Token::Not => "`~`".to_string(),
            Token::And => "`&`".to_string(),
            Token::Or => "`|`".to_string(),
            Token::Arrow => "`->`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    len: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.char_indices().peekable(),
            len: input.len(),
        }
    }

    /// Next token together with its starting character position.
    fn next_token(&mut self) -> Result<(Token, usize), SyntaxError> {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }

        let (pos, ch) = match self.chars.next() {
            Some((pos, ch)) => (pos, ch),
            None => return Ok((Token::Eof, self.len)),
        };

        match ch {
            '~' => Ok((Token::Not, pos)),
            '&' => Ok((Token::And, pos)),
            '|' => Ok((Token::Or, pos)),
            '(' => Ok((Token::LParen, pos)),
            ')' => Ok((Token::RParen, pos)),
            ',' => Ok((Token::Comma, pos)),
            '-' => match self.chars.next() {
                Some((_, '>')) => Ok((Token::Arrow, pos)),
                _ => Err(SyntaxError::new("expected `>` after `-`", pos)),
            },
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                name.push(c);
                while let Some(&(_, next)) = self.chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                Ok((Token::Ident(name), pos))
            }
            c if c.is_ascii_digit() => Err(SyntaxError::new(
                "identifiers may not start with a digit",
                pos,
            )),
            other => Err(SyntaxError::new(
                format!("unexpected character `{}`", other),
                pos,
            )),
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    position: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, SyntaxError> {
        let mut lexer = Lexer::new(input);
        let (current, position) = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            position,
        })
    }

    fn advance(&mut self) -> Result<Token, SyntaxError> {
        let (next, position) = self.lexer.next_token()?;
        self.position = position;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                expected.describe(),
                self.current.describe()
            )))
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(message, self.position)
    }

    // implication ::= disjunction ('->' implication)?
    fn implication(&mut self) -> Result<Sentence, SyntaxError> {
        let left = self.disjunction()?;
        if self.current == Token::Arrow {
            self.advance()?;
            let right = self.implication()?;
            Ok(Sentence::implies(left, right))
        } else {
            Ok(left)
        }
    }

    // disjunction ::= conjunction ('|' conjunction)*
    fn disjunction(&mut self) -> Result<Sentence, SyntaxError> {
        let mut left = self.conjunction()?;
        while self.current == Token::Or {
            self.advance()?;
            let right = self.conjunction()?;
            left = Sentence::or(left, right);
        }
        Ok(left)
    }

    // conjunction ::= unary ('&' unary)*
    fn conjunction(&mut self) -> Result<Sentence, SyntaxError> {
        let mut left = self.unary()?;
        while self.current == Token::And {
            self.advance()?;
            let right = self.unary()?;
            left = Sentence::and(left, right);
        }
        Ok(left)
    }

    // unary ::= '~' unary | '(' sentence ')' | atom
    fn unary(&mut self) -> Result<Sentence, SyntaxError> {
        match self.current {
            Token::Not => {
                self.advance()?;
                Ok(Sentence::not(self.unary()?))
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.implication()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(_) => Ok(Sentence::Atom(self.atom()?)),
            _ => Err(self.error(format!(
                "expected a sentence, found {}",
                self.current.describe()
            ))),
        }
    }

    // atom ::= IDENT | IDENT '(' IDENT ')' | IDENT '(' IDENT ',' IDENT ')'
    fn atom(&mut self) -> Result<Atom, SyntaxError> {
        let functor = match self.advance()? {
            Token::Ident(name) => name,
            token => return Err(self.error(format!("expected identifier, found {}", token.describe()))),
        };

        if self.current != Token::LParen {
            return Ok(Atom::Prop(functor));
        }
        self.advance()?;

        let first = self.argument()?;
        match self.current {
            Token::RParen => {
                self.advance()?;
                Ok(Atom::Concept {
                    concept: functor,
                    individual: first,
                })
            }
            Token::Comma => {
                self.advance()?;
                let second = self.argument()?;
                self.expect(Token::RParen)?;
                Ok(Atom::Role {
                    role: functor,
                    subject: first,
                    object: second,
                })
            }
            _ => Err(self.error(format!(
                "expected `,` or `)` in application, found {}",
                self.current.describe()
            ))),
        }
    }

    fn argument(&mut self) -> Result<String, SyntaxError> {
        match self.advance()? {
            Token::Ident(name) => Ok(name),
            token => Err(self.error(format!(
                "expected individual name, found {}",
                token.describe()
            ))),
        }
    }

    fn finish(&mut self) -> Result<(), SyntaxError> {
        if self.current == Token::Eof {
            Ok(())
        } else {
            Err(self.error(format!(
                "unexpected trailing {}",
                self.current.describe()
            )))
        }
    }
}

/// Parse a sentence from its surface syntax.
pub fn parse(text: &str) -> Result<Sentence, SyntaxError> {
    let mut parser = Parser::new(text)?;
    if parser.current == Token::Eof {
        return Err(SyntaxError::new("empty sentence", 0));
    }
    let sentence = parser.implication()?;
    parser.finish()?;
    Ok(sentence)
}

/// Parse a single atomic sentence; compound sentences are rejected.
pub fn parse_atom(text: &str) -> Result<Atom, SyntaxError> {
    match parse(text)? {
        Sentence::Atom(atom) => Ok(atom),
        _ => Err(SyntaxError::new(
            format!("`{}` is not atomic", text.trim()),
            0,
        )),
    }
}
