use super::ast::Statement;
use super::{lex, parse, Error, LineNumber};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// A numbered program line and its colon-separated statements.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    statements: Vec<Statement>,
}

impl Line {
    pub fn new(number: LineNumber, statements: Vec<Statement>) -> Line {
        Line { number, statements }
    }

    /// Lex and parse one line of source text. The text must begin
    /// with a line number.
    pub fn parse(s: &str) -> Result<Line> {
        let (line_number, tokens) = lex(s);
        let number = match line_number {
            Some(number) => number,
            None => return Err(error!(SyntaxError; "MISSING LINE NUMBER")),
        };
        let statements = parse(line_number, &tokens)?;
        Ok(Line { number, statements })
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Lines in textual order. Jumps resolve by line number, so the order
/// need not be sorted.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    pub fn new(lines: Vec<Line>) -> Program {
        Program { lines }
    }

    pub fn parse(source: &str) -> Result<Program> {
        let mut lines = vec![];
        for text in source.lines() {
            if text.trim().is_empty() {
                continue;
            }
            lines.push(Line::parse(text)?);
        }
        Ok(Program { lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
