// f3 main program

mod config;

use config::Config;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use std::io::IsTerminal;
use std::process::ExitCode;

/// Raw mode lets `key` see individual keystrokes immediately instead of
/// waiting for a line; only worth enabling when stdin is actually a tty,
/// and always restored on the way out.
struct RawModeGuard {
    enabled: bool,
}

impl RawModeGuard {
    fn acquire() -> RawModeGuard {
        if std::io::stdin().is_terminal() && enable_raw_mode().is_ok() {
            RawModeGuard { enabled: true }
        } else {
            RawModeGuard { enabled: false }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.enabled && is_raw_mode_enabled().unwrap_or(false) {
            let _ = disable_raw_mode();
        }
    }
}

fn main() -> ExitCode {
    let mut config = Config::new();
    config.process_args();

    if !config.run {
        return ExitCode::SUCCESS;
    }

    let _raw_mode = RawModeGuard::acquire();
    config.run_forth()
}
