//! Engine configuration: the allowed unknowns, the nesting limit and the log level.
//!
//! Read from the `engine` section of a task document (see `Utils::task_parser`):
//! ```text
//! engine
//!   unknowns: x, y
//!   max_depth: 256
//!   loglevel: debug
//! bindings
//!   x: 2.0
//!   y: -1
//! ```
//! Missing keys fall back to the defaults.
use log::info;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::Utils::logger::parse_log_level;
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as};
use crate::symbolic::errors::{ExprError, ExprResult};
use crate::symbolic::parse_expr::validate_unknowns;
use crate::symbolic::symbolic_engine::Bindings;

/// nesting limit used by `Expression::parse`
pub const DEFAULT_MAX_DEPTH: usize = 512;
/// no configuration may raise the nesting limit above this; also bounds tree walks
pub const HARD_DEPTH_LIMIT: usize = 1024;

const ENGINE_SECTION: &str = "engine";
const BINDINGS_SECTION: &str = "bindings";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub unknowns: Vec<char>,
    pub max_depth: usize,
    pub log_level: LevelFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            unknowns: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: LevelFilter::Info,
        }
    }
}

fn template() -> DocumentMap {
    let engine: HashMap<String, Option<Vec<Value>>> = ["unknowns", "max_depth", "loglevel"]
        .iter()
        .map(|key| (key.to_string(), None))
        .collect();
    let mut template = HashMap::new();
    template.insert(ENGINE_SECTION.to_string(), engine);
    template.insert(BINDINGS_SECTION.to_string(), HashMap::new());
    template
}

fn read_document(path: &Path) -> ExprResult<String> {
    fs::read_to_string(path)
        .map_err(|e| ExprError::Config(format!("cannot read {}: {}", path.display(), e)))
}

fn single_char(value: &Value) -> ExprResult<char> {
    let text = value.to_string();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ExprError::Config(format!(
            "unknowns must be single characters, got '{}'",
            text
        ))),
    }
}

fn single_value<'a>(key: &str, values: &'a [Value]) -> ExprResult<&'a Value> {
    match values {
        [value] => Ok(value),
        _ => Err(ExprError::Config(format!(
            "'{}' takes exactly one value, {} given",
            key,
            values.len()
        ))),
    }
}

impl EngineConfig {
    pub fn new(unknowns: Vec<char>) -> Self {
        EngineConfig {
            unknowns,
            ..Default::default()
        }
    }

    /// Checks the unknowns and the nesting limit.
    pub fn validate(&self) -> ExprResult<()> {
        validate_unknowns(&self.unknowns)?;
        if self.max_depth == 0 || self.max_depth > HARD_DEPTH_LIMIT {
            return Err(ExprError::Config(format!(
                "max_depth must be within 1..={}, got {}",
                HARD_DEPTH_LIMIT, self.max_depth
            )));
        }
        Ok(())
    }

    /// Reads the `engine` section of a document given as text.
    pub fn from_document(input: &str) -> ExprResult<Self> {
        let document = parse_document_as(input, Some(&template()))?;
        let mut config = EngineConfig::default();
        if let Some(engine) = document.get(ENGINE_SECTION) {
            if let Some(Some(values)) = engine.get("unknowns") {
                config.unknowns = values.iter().map(single_char).collect::<ExprResult<_>>()?;
            }
            if let Some(Some(values)) = engine.get("max_depth") {
                let value = single_value("max_depth", values)?;
                config.max_depth = value
                    .as_integer()
                    .filter(|depth| *depth > 0)
                    .map(|depth| depth as usize)
                    .ok_or_else(|| {
                        ExprError::Config(format!(
                            "max_depth must be a positive integer, got '{}'",
                            value
                        ))
                    })?;
            }
            if let Some(Some(values)) = engine.get("loglevel") {
                config.log_level = parse_log_level(&single_value("loglevel", values)?.to_string())?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from a task document file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExprResult<Self> {
        let content = read_document(path.as_ref())?;
        let config = EngineConfig::from_document(&content)?;
        info!(
            "configuration loaded from {}: unknowns {:?}, max_depth {}",
            path.as_ref().display(),
            config.unknowns,
            config.max_depth
        );
        Ok(config)
    }
}

/// Reads the `bindings` section of a document: one `symbol: value` pair per line.
pub fn bindings_from_document(input: &str) -> ExprResult<Bindings> {
    let document = parse_document_as(input, Some(&template()))?;
    let mut bindings = Bindings::new();
    if let Some(section) = document.get(BINDINGS_SECTION) {
        for (key, values) in section {
            let symbol = single_char(&Value::String(key.clone()))?;
            let values = values
                .as_ref()
                .ok_or_else(|| ExprError::Config(format!("no value bound to '{}'", key)))?;
            let value = single_value(key, values)?;
            let number = value.as_float().ok_or_else(|| {
                ExprError::Config(format!("value of '{}' is not a number: '{}'", key, value))
            })?;
            bindings.insert(symbol, number);
        }
    }
    Ok(bindings)
}

/// Reads the `bindings` section of a task document file.
pub fn bindings_from_file<P: AsRef<Path>>(path: P) -> ExprResult<Bindings> {
    let bindings = bindings_from_document(&read_document(path.as_ref())?)?;
    info!(
        "{} binding(s) loaded from {}",
        bindings.len(),
        path.as_ref().display()
    );
    Ok(bindings)
}
