mod cursor;
mod model;
mod validator;

pub(crate) use cursor::*;
pub use model::*;
pub(crate) use validator::*;
