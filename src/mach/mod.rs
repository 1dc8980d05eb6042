/*!
## Rust Machine Module

This Rust module executes BASIC programs. Statements and expressions
execute themselves against the `Machine` trait, which the
`Interpreter` implements on top of its variable memory, stacks, and
DATA pool. All I/O goes through a `Runtime`.

*/

mod exec;
mod function;
mod interpreter;
mod machine;
mod operation;
mod runtime;
mod stack;
mod val;
mod var;

pub use function::Function;
pub use interpreter::Interpreter;
pub use interpreter::{DEFAULT_MAX_STEPS, DEFAULT_STACK_LIMIT};
pub use machine::Machine;
pub use operation::Operation;
pub use runtime::Runtime;
pub use runtime::Scripted;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
