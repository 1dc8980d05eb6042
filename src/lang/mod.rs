/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of BASIC V2.
Source text becomes a `Program`: numbered `Line`s of `ast::Statement`.

*/

pub type LineNumber = u16;
pub const MAX_LINE_NUMBER: LineNumber = 63999;

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::{lex, number_prefix, split_data, DataItem};
pub use line::{Line, Program};
pub use parse::parse;

pub mod ast;
pub mod token;
