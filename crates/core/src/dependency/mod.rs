//! Reasoning over functional dependencies.
//!
//! Everything here is built on [`closure`]: the set of attributes implied by
//! a subset under a dependency set, computed as the least fixed point of
//! "add the dependent of every dependency whose determinant is already in".
//!
//! - [`minimize`] rewrites a dependency set into a canonical cover.
//! - [`candidate_key`] shrinks the universe to one minimal key.
//! - [`project`] restricts a dependency set to a subset of the attributes.

pub mod closure;
pub mod key;
pub mod minimize;
pub mod projection;

pub use closure::{closure, equivalent, implies};
pub use key::candidate_key;
pub use minimize::minimize;
pub use projection::project;
