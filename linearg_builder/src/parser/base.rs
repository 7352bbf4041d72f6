use std::env;
use thiserror::Error;

use crate::grammar::GrammarError;
use crate::matcher::{Failure, MatchError, UsageMatcher};
use crate::parser::{Printer, UserInterface};
use crate::registry::Registry;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The parser was configured incorrectly (ex: a repeated option name).
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// The outcome of an unsuccessful match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// The usage string itself is malformed.
    /// Every match attempt against this usage fails the same way.
    #[error("Malformed usage '{usage}': {error}")]
    Grammar {
        /// The usage string.
        usage: String,
        /// The defect.
        #[source]
        error: GrammarError,
    },

    /// The tokens do not fit the usage.
    #[error("{0}  Try '--help' for more information.")]
    Match(#[from] MatchError),

    /// No usage was registered at this index.
    #[error("Usage {0} does not exist.")]
    UnknownUsage(usize),

    /// Every registered usage failed to match.
    #[error("No usage matched:{}", .0.iter().map(|e| format!("\n  {e}")).collect::<String>())]
    NoMatchingUsage(Vec<UsageError>),
}

impl UsageError {
    fn from_failure(usage: &str, failure: Failure) -> Self {
        match failure {
            Failure::Grammar(error) => UsageError::Grammar {
                usage: usage.to_string(),
                error,
            },
            Failure::Match(error) | Failure::Unregistered(error) => UsageError::Match(error),
        }
    }
}

/// The configured command line parser.
/// Built via [`CommandLineParser::build`](crate::CommandLineParser::build).
///
/// A match attempt borrows the parser mutably; concurrent attempts must be serialized by the caller.
pub struct UsageParser<'a> {
    program: String,
    usages: Vec<String>,
    registry: Registry<'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for UsageParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageParser")
            .field("program", &self.program)
            .field("usages", &self.usages)
            .finish()
    }
}

impl<'a> UsageParser<'a> {
    pub(crate) fn new(
        program: impl Into<String>,
        usages: Vec<String>,
        registry: Registry<'a>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            usages,
            registry,
            printer,
            user_interface,
        }
    }

    /// The usage strings, in the order they were registered.
    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    /// Try to match the tokens against the usage at `index`.
    ///
    /// The tokens exclude the program name.
    /// On success every callback along the matched path is invoked once, in the order the tokens were read.
    /// On failure no callback is invoked.
    ///
    /// ### Example
    /// ```
    /// # use linearg_builder as linearg;
    /// use linearg::{CliOption, CommandLineParser, Param};
    /// use std::cell::RefCell;
    ///
    /// let seen = RefCell::new(Vec::default());
    /// let mut parser = CommandLineParser::new("program")
    ///     .usage("[-a] FILE")
    ///     .option(CliOption::new("a", "all", "Everything.").callback(|f| seen.borrow_mut().push(f.to_string())))
    ///     .param(Param::new("FILE").callback(|f| seen.borrow_mut().push(f.to_string())))
    ///     .build();
    ///
    /// parser.try_usage(0, &["-a", "f.txt"]).unwrap();
    /// assert!(parser.try_usage(0, &[]).is_err());
    /// drop(parser);
    ///
    /// assert_eq!(seen.into_inner(), vec!["a", "f.txt"]);
    /// ```
    pub fn try_usage(&mut self, index: usize, tokens: &[&str]) -> Result<(), UsageError> {
        let usage = self
            .usages
            .get(index)
            .ok_or(UsageError::UnknownUsage(index))?;
        let queue = UsageMatcher::new(&self.registry, usage, tokens)
            .consume()
            .map_err(|failure| UsageError::from_failure(usage, failure))?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched usage {index} '{}'.", self.usages[index]);
        }

        queue.invoke_all(|target, argument| self.registry.invoke(target, argument));
        Ok(())
    }

    /// Try each usage in the order it was registered, stopping at the first that matches.
    /// Returns the index of the matched usage.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<usize, UsageError> {
        let mut errors = Vec::default();

        for index in 0..self.usages.len() {
            match self.try_usage(index, tokens) {
                Ok(()) => return Ok(index),
                Err(error) => errors.push(error),
            }
        }

        if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(UsageError::NoMatchingUsage(errors))
        }
    }

    /// Run the parser against the program's Cli arguments.
    /// Returns the index of the matched usage.
    /// If no usage matches, prints the error and exits with error code `1` (via [`std::process::exit`]).
    pub fn parse(mut self) -> usize {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(index) => index,
            Err(error) => {
                self.user_interface.print_error(error);
                std::process::exit(1);
            }
        }
    }

    /// The help message: usages, header, option descriptions, and footer.
    pub fn help(&self) -> Vec<String> {
        self.printer
            .render(&self.program, &self.usages, self.registry.options())
    }

    /// Print the help message.
    pub fn print_help(&self) {
        for line in self.help() {
            self.user_interface.print(line);
        }
    }
}
