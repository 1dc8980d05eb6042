//! # BASIC V2
//!
//! The BASIC programming language as it shipped on the Commodore 64,
//! as a tree-walking interpreter.
//!
//! Source text is parsed into a `Program` of numbered lines, then an
//! `Interpreter` runs it against a `Runtime` that performs all I/O.
//!
//! ```
//! use basic::lang::Program;
//! use basic::mach::{Interpreter, Scripted};
//!
//! let program = Program::parse("10 PRINT 2+3*4\n20 PRINT (2+3)*4").unwrap();
//! let mut interpreter = Interpreter::new(Scripted::default());
//! interpreter.execute(&program).unwrap();
//! assert_eq!(interpreter.runtime().outputs(), &["14\n", "20\n"]);
//! ```
//!
//! Errors render the way the C64 prints them:
//!
//! ```
//! use basic::lang::Program;
//! use basic::mach::{Interpreter, Scripted};
//!
//! let program = Program::parse("10 READ A,B,C\n20 DATA 5,6").unwrap();
//! let mut interpreter = Interpreter::new(Scripted::default());
//! let error = interpreter.execute(&program).unwrap_err();
//! assert_eq!(error.to_string(), "?OUT OF DATA ERROR IN 10");
//! ```

pub mod lang;
pub mod mach;
pub mod term;
