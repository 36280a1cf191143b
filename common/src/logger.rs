use std::sync::OnceLock;

use chrono::Local;
use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggerSettings {
    pub prefix: Option<String>,
    pub level: LogLevel,
}

pub struct Logger {
    prefix: Option<String>,
    level: LogLevel,
}

impl Logger {
    fn new(settings: LoggerSettings) -> Self {
        Self {
            prefix: settings.prefix,
            level: settings.level,
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Writes to stderr so log lines never land between rendered boards.
    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Some(ref prefix) = self.prefix {
            eprintln!(
                "[{}][{}][{}][{}:{}] {}",
                timestamp,
                level.label(),
                prefix,
                file_name,
                line,
                message
            );
        } else {
            eprintln!(
                "[{}][{}][{}:{}] {}",
                timestamp,
                level.label(),
                file_name,
                line,
                message
            );
        }
    }
}

/// Installs the process-wide logger. Only the first call has an effect;
/// until then every log call is a no-op.
pub fn init_logger(settings: LoggerSettings) {
    LOGGER.get_or_init(|| Logger::new(settings));
}

pub fn enabled(level: LogLevel) -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled(level))
}

pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)*) => {
        if $crate::logger::enabled($level) {
            $crate::logger::log($level, file!(), line!(), &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::logger::LogLevel::Warn, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let logger = Logger::new(LoggerSettings {
            prefix: None,
            level: LogLevel::Info,
        });
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn test_macros_are_silent_without_logger() {
        assert!(!enabled(LogLevel::Warn));
        crate::info!("info {}", 1);
        crate::log!("log {}", 2);
        crate::debug!("debug {}", 3);
        crate::warn!("warn {}", 4);
    }

    #[test]
    fn test_log_level_yaml_names() {
        let level: LogLevel = serde_yaml_ng::from_str("debug").unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(serde_yaml_ng::to_string(&LogLevel::Warn).unwrap().trim(), "warn");
    }
}
