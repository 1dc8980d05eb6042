use super::Val;
use crate::lang::ast::Expression;
use crate::lang::{Error, LineNumber};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Operations a statement may ask of the machine running it
///
/// Statements and expressions only ever reach program state through
/// this trait. Control flow is requested here, never signalled with
/// an error.
pub trait Machine {
    fn get_variable(&mut self, name: &str) -> Result<Val>;
    fn set_variable(&mut self, name: &str, value: Val) -> Result<()>;

    fn declare_array(&mut self, name: &str, sizes: &[Val]) -> Result<()>;
    fn get_array_element(&mut self, name: &str, indices: &[Val]) -> Result<Val>;
    fn set_array_element(&mut self, name: &str, indices: &[Val], value: Val) -> Result<()>;

    /// Next item from the DATA pool.
    fn read_data(&mut self) -> Result<Val>;
    /// Rewind the DATA cursor, optionally to the first item at or
    /// after a line.
    fn restore_data(&mut self, line: Option<LineNumber>) -> Result<()>;

    fn print(&mut self, text: &str) -> Result<()>;
    fn print_line(&mut self, text: &str) -> Result<()>;
    fn input(&mut self, prompt: &str) -> Result<String>;
    fn clear_screen(&mut self) -> Result<()>;

    fn goto(&mut self, line: LineNumber) -> Result<()>;
    fn gosub(&mut self, line: LineNumber) -> Result<()>;
    fn return_from_gosub(&mut self) -> Result<()>;
    fn end(&mut self);
    fn stop(&mut self) -> Result<()>;
    fn run(&mut self, line: Option<LineNumber>) -> Result<()>;
    /// Abandon the rest of the current line.
    fn skip_line(&mut self);

    fn begin_for(&mut self, name: &str, from: f64, to: f64, step: f64) -> Result<()>;
    fn iterate_for(&mut self, name: Option<&str>) -> Result<()>;

    fn define_function(&mut self, name: &str, param: &str, body: Rc<Expression>) -> Result<()>;
    /// Built-ins by name, and `FNx` user functions.
    fn call_function(&mut self, name: &str, args: Vec<Val>) -> Result<Val>;

    fn normalize(&self, name: &str) -> Rc<str>;
}
