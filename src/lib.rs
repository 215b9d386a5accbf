// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
pub mod Utils;
pub mod symbolic;

pub use symbolic::engine_config::EngineConfig;
pub use symbolic::errors::{ExprError, ExprResult, ParseError, ParseErrorKind};
pub use symbolic::symbolic_engine::{Bindings, Expression, fix_value};
