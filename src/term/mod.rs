/*!
## Rust Terminal Module

A `Runtime` on the process console. A `linefeed` line editor is used
for `INPUT` when stdin is a terminal; otherwise stdin is read as plain
lines so programs can be driven from a pipe.

*/

extern crate linefeed;
use crate::error;
use crate::lang::Error;
use crate::mach::Runtime;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::io::{BufRead, IsTerminal, Write};
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// ANSI erase display and home cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct Console {
    editor: Option<Interface<DefaultTerminal>>,
}

impl Console {
    pub fn new() -> Result<Console> {
        let editor = if std::io::stdin().is_terminal() {
            let interface = Interface::new("BASIC").map_err(|_| error!(DeviceNotPresent))?;
            interface.set_report_signal(Signal::Interrupt, true);
            Some(interface)
        } else {
            None
        };
        Ok(Console { editor })
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let result = match &self.editor {
            Some(editor) => editor.write_fmt(format_args!("{}", text)),
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush())
            }
        };
        result.map_err(|_| error!(DeviceNotPresent))
    }

    fn read_plain(&mut self, prompt: &str) -> Result<String> {
        self.write(prompt)?;
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|_| error!(DeviceNotPresent))?;
        if read == 0 {
            return Err(error!(InputPastEnd));
        }
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
        trace!(input = line, "console input");
        Ok(line.to_string())
    }
}

impl Runtime for Console {
    fn print(&mut self, text: &str) -> Result<()> {
        self.write(text)
    }

    fn print_line(&mut self, text: &str) -> Result<()> {
        self.write(&format!("{}\n", text))
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let editor = match &self.editor {
            Some(editor) => editor,
            None => return self.read_plain(prompt),
        };
        editor
            .set_prompt(prompt)
            .map_err(|_| error!(DeviceNotPresent))?;
        match editor.read_line() {
            Ok(ReadResult::Input(line)) => {
                trace!(input = line.as_str(), "console input");
                Ok(line)
            }
            Ok(ReadResult::Signal(Signal::Interrupt)) => Err(error!(Break)),
            Ok(ReadResult::Signal(_)) | Ok(ReadResult::Eof) => Err(error!(InputPastEnd)),
            Err(_) => Err(error!(DeviceNotPresent)),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.write(CLEAR_SCREEN)
    }
}
