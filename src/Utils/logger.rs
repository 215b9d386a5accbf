use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

use crate::symbolic::errors::{ExprError, ExprResult};

/// maps "off"/"none", "error", "warn", "info", "debug" and "trace" to a level filter
pub fn parse_log_level(level: &str) -> ExprResult<LevelFilter> {
    match level.to_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(ExprError::Config(format!(
            "loglevel must be off, error, warn, info, debug or trace, got '{}'",
            other
        ))),
    }
}

/// Installs the terminal logger. Returns false when a logger was already installed
/// (the first one stays active).
pub fn init_logger(level: LevelFilter) -> bool {
    if level == LevelFilter::Off {
        return false;
    }
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    match logger_instance {
        Ok(()) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Ok(LevelFilter::Debug));
        assert_eq!(parse_log_level("WARN"), Ok(LevelFilter::Warn));
        assert_eq!(parse_log_level("none"), Ok(LevelFilter::Off));
        assert!(matches!(parse_log_level("loud"), Err(ExprError::Config(_))));
    }

    #[test]
    fn test_second_init_is_ignored() {
        let _ = init_logger(LevelFilter::Warn);
        assert!(!init_logger(LevelFilter::Warn));
        assert!(!init_logger(LevelFilter::Off));
    }
}
