/// The deepest group nesting a usage may declare.
pub(crate) const MAX_NESTING: usize = 32;

/// Marks the preceding unit as repeatable.
pub(crate) const REPETITION: &str = "...";

pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: char = '-';
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const ALTERNATIVE: char = '|';

// Descriptions wrap at this width, or earlier when the terminal is narrower.
pub(crate) const MAX_DESCRIPTION_WIDTH: usize = 70;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_DESCRIPTION_WIDTH: usize = 17;
pub(crate) const PADDING_WIDTH: usize = 2;
pub(crate) const MAIN_INDENT: usize = 1;
