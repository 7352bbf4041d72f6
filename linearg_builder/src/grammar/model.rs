use thiserror::Error;

/// A structural defect in a usage string.
///
/// Offsets are byte positions into the usage string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// A group was opened but never closed.
    #[error("'{open}' at {at} is never closed.")]
    Unclosed {
        /// The opening delimiter.
        open: char,
        /// Offset of the opening delimiter.
        at: usize,
    },

    /// A group was closed without being opened.
    #[error("'{close}' at {at} closes nothing.")]
    Unmatched {
        /// The closing delimiter.
        close: char,
        /// Offset of the closing delimiter.
        at: usize,
    },

    /// A group was closed by the wrong delimiter.
    #[error("'{open}' at {at} is closed by '{close}' at {close_at}.")]
    Mismatched {
        /// The opening delimiter.
        open: char,
        /// Offset of the opening delimiter.
        at: usize,
        /// The closing delimiter.
        close: char,
        /// Offset of the closing delimiter.
        close_at: usize,
    },

    /// Groups are nested deeper than the parser allows.
    #[error("group at {at} is nested deeper than {limit} levels.")]
    TooDeep {
        /// Offset of the first group beyond the limit.
        at: usize,
        /// The nesting limit.
        limit: usize,
    },

    /// An option introducer (`-` or `--`) without a name.
    #[error("option at {at} has no name.")]
    EmptyOption {
        /// Offset of the introducer.
        at: usize,
    },

    /// A long option declares `=` without naming its parameter.
    #[error("option at {at} has no parameter after '='.")]
    EmptyValue {
        /// Offset of the introducer.
        at: usize,
    },

    /// A long option declares more than one `=PARAM` suffix.
    #[error("option at {at} has more than one '='.")]
    RepeatedValue {
        /// Offset of the introducer.
        at: usize,
    },

    /// A short option declares a `=PARAM` suffix, which only long options may carry.
    #[error("short option at {at} cannot take a parameter.")]
    ShortOptionValue {
        /// Offset of the introducer.
        at: usize,
    },

    /// A `...` which does not immediately follow a unit.
    #[error("'...' at {at} does not follow anything to repeat.")]
    DanglingRepetition {
        /// Offset of the repetition marker.
        at: usize,
    },

    /// A `|` outside of any group.
    #[error("'|' at {at} is outside of a group.")]
    StrayAlternative {
        /// Offset of the separator.
        at: usize,
    },
}
