//! `linearg` is a command line parser for Rust, driven by usage strings.
//!
//! Rather than registering each argument's cardinality and position, the program describes every valid invocation as a compact *usage string* (ex: `"[-ab | --width=WIDTH] [FILE]"`).
//! The options and parameters named by the usage strings are registered with callbacks.
//! Matching a usage against the Cli tokens either invokes the callbacks of the matched path, or reports why the tokens don't fit.
//!
//! `linearg` attempts to prioritize the following design concerns:
//! * *The usage is the specification*:
//! The same text documents the program (in `--help`) and drives the parser.
//! * *Transactional callbacks*:
//! A callback never fires for a failed match, not even for the parts that matched before the failure.
//! * *Detailed yet basic UX*:
//! Errors name the offending option or parameter.
//! We do not aim to support rich display configurations, such as colour output, shell completions, etc.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/ls.rs")]
//! ```
//!
//! ```console
//! $ ls -la --width=80 src
//! ls -a -l --width=80 src
//!
//! $ ls -c
//! Error: Extra or unmatched word '-c'.  Try '--help' for more information.
//!
//! $ ls --width
//! Error: Extra or unmatched word '--width'.  Try '--help' for more information.
//! ```
//!
//! # Usage Grammar
//! * `-abc`: a single token of bundled short flags (ex: `-a`, `-ca`, `-abc`).
//! Each flag must be one of the listed characters.
//! Each flag's option callback receives the flag's own character.
//! * `--name`: the token `--name`.
//! The option callback receives `name`.
//! * `--name=PARAM`: the token `--name=value`.
//! The option callback receives `name`, and the `PARAM` callback receives `value`.
//! * `NAME`: a single token not starting with `-`, handed to the parameter `NAME`.
//! * `[ .. ]`: an optional group; when it does not match, it consumes nothing.
//! * `{ .. }`: a required group.
//! * `|`: separates the alternatives of the nearest enclosing group.
//! The first alternative that matches is taken.
//! * `...`: repeats the unit right before it, greedily.
//! Units must match at least once, except `[ .. ]...` which may match zero times.
//!
//! Every token must be consumed by the usage; a leftover token is an error.
//!
//! # Multiple Usages
//! A parser may hold several usages.
//! [`UsageParser::try_usage`] matches one of them; [`UsageParser::parse_tokens`] tries each in order, returning the index of the first that matches.
//!
//! ```no_run
#![doc = include_str!("../demos/dm.rs")]
//! ```
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events while matching.
pub use linearg_builder::*;
