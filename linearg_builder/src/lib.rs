//! Builder module for `linearg`.
//! See [documentation root](https://docs.rs/linearg/latest/linearg/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod grammar;
mod matcher;
mod parser;
mod registry;

pub use api::*;
pub use grammar::GrammarError;
pub use matcher::MatchError;
pub use parser::{ConfigError, UsageError, UsageParser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
