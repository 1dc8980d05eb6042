use crate::error;
use crate::lang::Error;
use std::collections::VecDeque;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime port
///
/// All program output and input passes through here. The interpreter
/// never touches a stream itself.
pub trait Runtime {
    fn print(&mut self, text: &str) -> Result<()>;
    fn print_line(&mut self, text: &str) -> Result<()>;
    /// Blocks until a line of input is available.
    fn input(&mut self, prompt: &str) -> Result<String>;
    fn clear(&mut self) -> Result<()>;
}

/// Pre-supplied input and captured output.
#[derive(Debug, Default, Clone)]
pub struct Scripted {
    inputs: VecDeque<String>,
    outputs: Vec<String>,
    prompts: Vec<String>,
    clears: usize,
}

impl Scripted {
    pub fn new<I, S>(inputs: I) -> Scripted
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scripted {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Scripted::default()
        }
    }

    /// One entry per `print` or `print_line` call, newline included.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Everything printed, in order.
    pub fn output(&self) -> String {
        self.outputs.concat()
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Runtime for Scripted {
    fn print(&mut self, text: &str) -> Result<()> {
        self.outputs.push(text.to_string());
        Ok(())
    }

    fn print_line(&mut self, text: &str) -> Result<()> {
        self.outputs.push(format!("{}\n", text));
        Ok(())
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        match self.inputs.pop_front() {
            Some(line) => Ok(line),
            None => Err(error!(InputPastEnd)),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }
}
