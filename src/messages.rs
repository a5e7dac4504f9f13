//! Diagnostic reporting.
//!
//! A small severity-filtered message sink, used in place of scattered
//! eprintln! calls. Kept deliberately dependency-free: nothing here
//! pulls in a logging crate.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DebugLevel::Error => "error",
            DebugLevel::Warning => "warning",
            DebugLevel::Info => "info",
            DebugLevel::Debug => "debug",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
pub struct Msg {
    level: DebugLevel,
}

impl Msg {
    pub fn new() -> Msg {
        Msg { level: DebugLevel::Error }
    }

    pub fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
    }

    pub fn get_level(&self) -> DebugLevel {
        self.level
    }

    /// Always shown: programmer/user errors halt the engine.
    pub fn error<T: fmt::Display>(&self, word: &str, message: &str, detail: Option<T>) {
        match detail {
            Some(d) => eprintln!("{word}: {message}: {d}"),
            None => eprintln!("{word}: {message}"),
        }
    }

    pub fn warning<T: fmt::Display>(&self, word: &str, message: &str, detail: Option<T>) {
        if self.level >= DebugLevel::Warning {
            match detail {
                Some(d) => eprintln!("{word}: warning: {message}: {d}"),
                None => eprintln!("{word}: warning: {message}"),
            }
        }
    }

    pub fn info(&self, word: &str, message: &str) {
        if self.level >= DebugLevel::Info {
            eprintln!("{word}: {message}");
        }
    }

    pub fn debug(&self, word: &str, message: &str) {
        if self.level >= DebugLevel::Debug {
            eprintln!("{word}: debug: {message}");
        }
    }
}

impl Default for Msg {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_gates_verbosity() {
        assert!(DebugLevel::Debug > DebugLevel::Info);
        assert!(DebugLevel::Info > DebugLevel::Warning);
        assert!(DebugLevel::Warning > DebugLevel::Error);
    }

    #[test]
    fn default_level_is_error() {
        let msg = Msg::new();
        assert_eq!(msg.get_level(), DebugLevel::Error);
    }
}
