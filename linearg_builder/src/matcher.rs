mod core;
mod model;
mod queue;

pub(crate) use self::core::*;
pub use model::MatchError;
pub(crate) use model::Failure;
pub(crate) use queue::*;
