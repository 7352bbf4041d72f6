use thiserror::Error;

use crate::grammar::GrammarError;

/// The argument tokens do not fit the usage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A short option unit found no `-xyz` token.
    #[error("Missing one of the flags '-{allowed}'.")]
    MissingFlag {
        /// The flags accepted at this point.
        allowed: String,
    },

    /// A `-xyz` token contains a flag the usage does not accept here.
    #[error("Unrecognized flag '-{flag}', expected one of '-{allowed}'.")]
    UnknownFlag {
        /// The offending flag.
        flag: char,
        /// The flags accepted at this point.
        allowed: String,
    },

    /// A long option unit found no matching `--name` token.
    #[error("Missing '--{name}' option.")]
    MissingLongOption {
        /// The expected long form.
        name: String,
    },

    /// A `--name=value` token was given to an option which takes no value.
    #[error("Unexpected argument for '--{name}'.")]
    UnexpectedArgument {
        /// The long form.
        name: String,
    },

    /// A `--name` token was given to an option which needs `--name=VALUE`.
    #[error("Missing argument for '--{name}', expected '--{name}={param}'.")]
    MissingArgument {
        /// The long form.
        name: String,
        /// The name of the value's parameter.
        param: String,
    },

    /// A parameter unit found no token (or found an option).
    #[error("Missing {name} parameter.")]
    MissingParameter {
        /// The parameter name.
        name: String,
    },

    /// None of a group's alternatives matched.
    #[error("Missing match for '{group}'.")]
    MissingGroup {
        /// The group's text, from its opening through its closing delimiter.
        group: String,
    },

    /// A token remained after the usage was fully matched.
    #[error("Extra or unmatched word '{word}'.")]
    ExtraWord {
        /// The first unconsumed token.
        word: String,
    },

    /// The usage names an option which was never registered.
    /// This indicates a programming error rather than a user error.
    #[error("Missing option info for '{form}'.")]
    MissingOptionInfo {
        /// The option form, including its dashes.
        form: String,
    },
}

/// Why a walk over a usage failed.
///
/// Grammar and registration errors always abort the walk; match errors may be absorbed by group backtracking.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum Failure {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Match(#[from] MatchError),

    // The usage names an option which was never registered.
    #[error(transparent)]
    Unregistered(MatchError),
}
