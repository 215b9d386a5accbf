#![allow(non_snake_case)]
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use RustedExpressions::Utils::logger::{init_logger, parse_log_level};
use RustedExpressions::symbolic::engine_config::{EngineConfig, bindings_from_file};
use RustedExpressions::symbolic::errors::{ExprError, ExprResult};
use RustedExpressions::symbolic::symbolic_engine::{Bindings, Expression};

#[derive(Parser)]
#[command(author, version, about = "Parse and evaluate arithmetic expressions", long_about = None)]
struct Cli {
    /// The expression to evaluate, e.g. "2*x^2 + log(x, 2)"
    expression: String,
    /// Single-letter unknowns allowed in the expression, e.g. "xy"
    #[arg(short, long)]
    unknowns: Option<String>,
    /// Value of an unknown, e.g. --bind x=2 (repeatable)
    #[arg(short, long = "bind", value_name = "SYMBOL=VALUE")]
    bindings: Vec<String>,
    /// Print the symbolic evaluation instead of a number
    #[arg(short, long)]
    symbolic: bool,
    /// Print the fully parenthesized form of the parsed expression
    #[arg(short, long)]
    calculus: bool,
    /// Task document with an `engine` and an optional `bindings` section
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
    /// off, error, warn, info, debug or trace
    #[arg(short, long)]
    loglevel: Option<String>,
}

fn parse_binding(text: &str) -> ExprResult<(char, f64)> {
    let bad = || ExprError::Config(format!("binding must look like x=2, got '{}'", text));
    let (symbol, value) = text.split_once('=').ok_or_else(bad)?;
    let mut chars = symbol.trim().chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(bad()),
    };
    let value = value.trim().parse::<f64>().map_err(|_| bad())?;
    Ok((symbol, value))
}

fn run(cli: Cli) -> ExprResult<String> {
    let (mut config, mut bindings) = match &cli.config {
        Some(path) => (EngineConfig::from_file(path)?, bindings_from_file(path)?),
        None => (EngineConfig::default(), Bindings::new()),
    };
    if let Some(unknowns) = &cli.unknowns {
        config.unknowns = unknowns.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
        config.validate()?;
    }
    if let Some(level) = &cli.loglevel {
        config.log_level = parse_log_level(level)?;
    }
    init_logger(config.log_level);
    info!("unknowns {:?}, max_depth {}", config.unknowns, config.max_depth);

    for binding in &cli.bindings {
        let (symbol, value) = parse_binding(binding)?;
        bindings.insert(symbol, value);
    }

    let expression = Expression::parse_with_config(&cli.expression, &config)?;
    if cli.calculus {
        return Ok(expression.to_calculus_string());
    }
    if cli.symbolic {
        return Ok(expression.evaluate_symbolic()?.to_string());
    }
    Ok(expression.evaluate(&bindings)?.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(ExprError::Parse(e)) => {
            error!("{}", e);
            eprintln!("Error: {}\n{}", e.kind, e.render());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("x=2").unwrap(), ('x', 2.0));
        assert_eq!(parse_binding(" y = -0.5 ").unwrap(), ('y', -0.5));
        assert!(parse_binding("xy=2").is_err());
        assert!(parse_binding("x").is_err());
        assert!(parse_binding("x=two").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        let cli = Cli::parse_from(["RustedExpressions", "x+1", "-u", "x", "-b", "x=2", "--bind", "y=1"]);
        assert_eq!(cli.bindings, vec!["x=2".to_string(), "y=1".to_string()]);
        assert_eq!(run(cli).unwrap(), "3");
    }

    #[test]
    fn test_config_file_supplies_unknowns_and_bindings() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "engine\n  unknowns: x\nbindings\n  x: 0.5\n").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["RustedExpressions", "4*x", "--config", path.as_str()]);
        assert_eq!(run(cli).unwrap(), "2");
        let cli = Cli::parse_from(["RustedExpressions", "x", "--config", "no/such/file.txt"]);
        assert!(matches!(run(cli), Err(ExprError::Config(_))));
    }
}
