//! Process configuration and command-line argument handling.
//!
//! Parses process arguments, builds an `Engine`, and drives the
//! top-level REPL: `startup.f` first if present, then whichever file
//! was named on the command line, then standard input (spec.md §6).
use argh::FromArgs;
use std::path::Path;
use std::process::ExitCode;

use f3::{DebugLevel, Engine};

pub const VERSION: &str = "0.1.0";
const STARTUP_SCRIPT: &str = "startup.f";

#[derive(FromArgs)]
/// a small interactive Forth interpreter
struct Args {
    /// diagnostic verbosity: error, warning, info, or debug
    #[argh(option, default = "\"error\".to_string()")]
    debuglevel: String,

    /// a script to run instead of (or before) reading standard input
    #[argh(option, short = 'f')]
    file: Option<String>,

    /// skip loading startup.f before entering the REPL
    #[argh(switch, short = 'n')]
    nostartup: bool,
}

pub struct Config {
    pub debug_level: DebugLevel,
    pub file: Option<String>,
    pub no_startup: bool,
    pub run: bool,
}

impl Config {
    pub fn new() -> Config {
        Config { debug_level: DebugLevel::Error, file: None, no_startup: false, run: true }
    }

    pub fn process_args(&mut self) -> &Config {
        let args: Args = argh::from_env();
        self.debug_level = match args.debuglevel.as_str() {
            "debug" => DebugLevel::Debug,
            "info" => DebugLevel::Info,
            "warning" => DebugLevel::Warning,
            _ => DebugLevel::Error,
        };
        self.file = args.file;
        self.no_startup = args.nostartup;
        self
    }

    /// Builds the engine and runs it to completion, returning the process
    /// exit code: success on a clean EOF, failure if `quit` halted on a
    /// fatal error or an explicit `error` invocation (spec.md §6).
    pub fn run_forth(&self) -> ExitCode {
        let mut engine = Engine::new();
        engine.set_debug_level(self.debug_level);

        if !self.no_startup && Path::new(STARTUP_SCRIPT).exists() {
            // A missing startup.f is not an error; the engine just proceeds
            // without the higher-level words it would define. A startup.f
            // that exists but fails to load is a real fault, reported the
            // same way a failing `-f` script is below.
            if let Err(e) = engine.interpret_file(STARTUP_SCRIPT) {
                engine.msg.error("run_forth", "failed to load startup.f", Some(e));
                return ExitCode::FAILURE;
            }
        }

        if let Some(path) = &self.file {
            if let Err(e) = engine.interpret_file(path) {
                engine.msg.error("run_forth", "failed to load file", Some(e));
                return ExitCode::FAILURE;
            }
        }

        if engine.quit() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
