use ansi_term::Style;
use basic::lang::{Error, Program};
use basic::mach::{Interpreter, DEFAULT_MAX_STEPS, DEFAULT_STACK_LIMIT};
use basic::term::Console;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "basic")]
#[command(about = "Run a Commodore 64 BASIC V2 program")]
struct Cli {
    /// Program file, or `-` to read stdin
    file: PathBuf,

    /// Statements to execute before giving up with INFINITE LOOP (0 = unlimited)
    #[arg(long, env = "BASIC_MAX_STEPS", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Deepest GOSUB or FOR nesting allowed
    #[arg(long, env = "BASIC_STACK_LIMIT", default_value_t = DEFAULT_STACK_LIMIT)]
    stack_limit: usize,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", Style::new().bold().paint(message));
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = load(&cli.file).map_err(|e| format!("{}: {}", cli.file.display(), e))?;
    debug!(file = %cli.file.display(), bytes = source.len(), "loaded");
    let program = Program::parse(&source).map_err(render)?;
    info!(lines = program.len(), "parsed");
    debug!(
        max_steps = cli.max_steps,
        stack_limit = cli.stack_limit,
        "configured"
    );
    let console = Console::new().map_err(render)?;
    let mut interpreter = Interpreter::new(console)
        .with_max_steps(cli.max_steps)
        .with_stack_limit(cli.stack_limit);
    let interrupt = interpreter.interrupt_handle();
    ctrlc::set_handler(move || interrupt.store(true, Ordering::SeqCst))
        .map_err(|e| format!("Error setting Ctrl-C handler: {}", e))?;
    let result = interpreter.execute(&program);
    match &result {
        Ok(()) => info!(steps = interpreter.step_count(), "finished"),
        Err(error) => info!(steps = interpreter.step_count(), %error, "failed"),
    }
    result.map_err(render)
}

fn render(error: Error) -> String {
    error.to_string()
}
