//! Rule combinators
//!
//! - [`Skip`]: marker that stops validation of a value
//! - [`When`]: picks one of two rule lists from a condition
//! - [`By`]: turns a closure into a rule

mod by;
mod skip;
mod when;

pub use by::{By, by};
pub use skip::{SKIP, Skip, skip};
pub use when::{When, when};
