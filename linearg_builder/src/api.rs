mod core;
mod option;
mod param;

pub use self::core::*;
pub use option::*;
pub use param::*;

/// A callback invoked with the text an option or parameter matched.
pub(crate) type Callback<'a> = Box<dyn FnMut(&str) + 'a>;
