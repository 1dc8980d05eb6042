use super::{Error, LineNumber, MAX_LINE_NUMBER};
use crate::error;
use std::convert::TryFrom;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Function(&'static str),
    Operator(Operator),
    Ident(Ident),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
}

/// Every string the lexer crunches into a token, longest first so that
/// `INPUT` wins over `INT` and `STR$` over `ST`-anything.
const KEYWORDS: &[(&str, Token)] = &[
    ("RESTORE", Token::Word(Word::Restore)),
    ("GOSUB", Token::Word(Word::Gosub)),
    ("INPUT", Token::Word(Word::Input)),
    ("PRINT", Token::Word(Word::Print1)),
    ("RETURN", Token::Word(Word::Return)),
    ("RIGHT$", Token::Function("RIGHT$")),
    ("LEFT$", Token::Function("LEFT$")),
    ("CHR$", Token::Function("CHR$")),
    ("DATA", Token::Word(Word::Data)),
    ("GOTO", Token::Word(Word::Goto)),
    ("MID$", Token::Function("MID$")),
    ("NEXT", Token::Word(Word::Next)),
    ("READ", Token::Word(Word::Read)),
    ("STEP", Token::Word(Word::Step)),
    ("STOP", Token::Word(Word::Stop)),
    ("STR$", Token::Function("STR$")),
    ("THEN", Token::Word(Word::Then)),
    ("ABS", Token::Function("ABS")),
    ("AND", Token::Operator(Operator::And)),
    ("ASC", Token::Function("ASC")),
    ("ATN", Token::Function("ATN")),
    ("COS", Token::Function("COS")),
    ("DEF", Token::Word(Word::Def)),
    ("DIM", Token::Word(Word::Dim)),
    ("END", Token::Word(Word::End)),
    ("EXP", Token::Function("EXP")),
    ("FOR", Token::Word(Word::For)),
    ("FRE", Token::Function("FRE")),
    ("INT", Token::Function("INT")),
    ("LEN", Token::Function("LEN")),
    ("LET", Token::Word(Word::Let)),
    ("LOG", Token::Function("LOG")),
    ("NOT", Token::Operator(Operator::Not)),
    ("REM", Token::Word(Word::Rem)),
    ("RND", Token::Function("RND")),
    ("RUN", Token::Word(Word::Run)),
    ("SGN", Token::Function("SGN")),
    ("SIN", Token::Function("SIN")),
    ("SPC", Token::Function("SPC")),
    ("SQR", Token::Function("SQR")),
    ("TAN", Token::Function("TAN")),
    ("VAL", Token::Function("VAL")),
    ("FN", Token::Word(Word::Fn)),
    ("GO", Token::Word(Word::Go)),
    ("IF", Token::Word(Word::If)),
    ("ON", Token::Word(Word::On)),
    ("OR", Token::Operator(Operator::Or)),
    ("TO", Token::Word(Word::To)),
    ("<=", Token::Operator(Operator::LessEqual)),
    ("=<", Token::Operator(Operator::LessEqual)),
    (">=", Token::Operator(Operator::GreaterEqual)),
    ("=>", Token::Operator(Operator::GreaterEqual)),
    ("<>", Token::Operator(Operator::NotEqual)),
    ("><", Token::Operator(Operator::NotEqual)),
    ("?", Token::Word(Word::Print2)),
    ("^", Token::Operator(Operator::Caret)),
    ("*", Token::Operator(Operator::Multiply)),
    ("/", Token::Operator(Operator::Divide)),
    ("+", Token::Operator(Operator::Plus)),
    ("-", Token::Operator(Operator::Minus)),
    ("=", Token::Operator(Operator::Equal)),
    ("<", Token::Operator(Operator::Less)),
    (">", Token::Operator(Operator::Greater)),
    ("(", Token::LParen),
    (")", Token::RParen),
    (",", Token::Comma),
    (":", Token::Colon),
    (";", Token::Semicolon),
];

impl Token {
    /// Finds the longest token spelled at the start of `chars`.
    /// Matching is case-insensitive.
    pub fn match_keyword(chars: &[char]) -> Option<(usize, Token)> {
        KEYWORDS.iter().find_map(|(word, token)| {
            let len = word.chars().count();
            if chars.len() < len {
                return None;
            }
            let hit = word
                .chars()
                .zip(chars.iter())
                .all(|(w, c)| w == c.to_ascii_uppercase());
            if hit {
                Some((len, token.clone()))
            } else {
                None
            }
        })
    }

    pub fn from_string(s: &str) -> Option<Token> {
        let chars: Vec<char> = s.chars().collect();
        match Token::match_keyword(&chars) {
            Some((len, token)) if len == chars.len() => Some(token),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Function(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Number(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<u32>() {
                    if line <= MAX_LINE_NUMBER as u32 {
                        return Ok(line as LineNumber);
                    }
                }
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Ident {
    Plain(String),
    String(String),
}

impl Ident {
    pub fn name(&self) -> &str {
        match self {
            Ident::Plain(s) | Ident::String(s) => s,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Data,
    Def,
    Dim,
    End,
    Fn,
    For,
    Go,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    Next,
    On,
    Print1,
    Print2,
    Read,
    Rem,
    Restore,
    Return,
    Run,
    Step,
    Stop,
    Then,
    To,
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Data => write!(f, "DATA"),
            Def => write!(f, "DEF"),
            Dim => write!(f, "DIM"),
            End => write!(f, "END"),
            Fn => write!(f, "FN"),
            For => write!(f, "FOR"),
            Go => write!(f, "GO"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            Next => write!(f, "NEXT"),
            On => write!(f, "ON"),
            Print1 => write!(f, "PRINT"),
            Print2 => write!(f, "?"),
            Read => write!(f, "READ"),
            Rem => write!(f, "REM"),
            Restore => write!(f, "RESTORE"),
            Return => write!(f, "RETURN"),
            Run => write!(f, "RUN"),
            Step => write!(f, "STEP"),
            Stop => write!(f, "STOP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}
