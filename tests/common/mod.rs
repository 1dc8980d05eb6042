#![allow(dead_code)]
use basic::lang::{Error, Program};
use basic::mach::{Interpreter, Scripted};

pub fn run(source: &str) -> (Result<(), Error>, Scripted) {
    run_with_input(source, &[])
}

pub fn run_with_input(source: &str, inputs: &[&str]) -> (Result<(), Error>, Scripted) {
    let program = Program::parse(source).expect("program should parse");
    let mut interpreter = Interpreter::new(Scripted::new(inputs.iter().copied()));
    let result = interpreter.execute(&program);
    (result, interpreter.into_runtime())
}

/// Everything printed by a program that must succeed.
pub fn exec(source: &str) -> String {
    let (result, runtime) = run(source);
    if let Err(error) = result {
        panic!("{} (output so far: {:?})", error, runtime.output());
    }
    runtime.output()
}

/// The error text of a program that must fail.
pub fn fail(source: &str) -> String {
    match run(source).0 {
        Ok(()) => panic!("expected an error"),
        Err(error) => error.to_string(),
    }
}
