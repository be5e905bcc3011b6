//! Functional dependency reasoning for relational schemas.
//!
//! `fdnorm_core` analyses a relation given as an attribute universe and a set
//! of functional dependencies. It provides:
//!
//! 1. **Closure** -- the attributes implied by a subset, as the fixed point of
//!    repeatedly firing every dependency whose determinant is already known.
//! 2. **Canonical cover** -- an equivalent dependency set with single-attribute
//!    right-hand sides, no extraneous determinant attributes and no redundant
//!    dependencies.
//! 3. **Candidate key** -- one minimal subset whose closure is the universe.
//! 4. **BCNF decomposition** -- repeated lossless splits along violating
//!    dependencies until every part is in Boyce-Codd normal form.
//! 5. **Lossless-join test** -- the chase over a symbolic tableau built from a
//!    given decomposition.
//!
//! The first three run once when a [`Schema`] is built; decomposition and the
//! chase are independent top-level algorithms on a built schema.
//!
//! # Entry points
//!
//! ```rust,ignore
//! use fdnorm_core::{AttributeSet, FunctionalDependency, Schema};
//!
//! let mut schema = Schema::new(
//!     AttributeSet::from(["A", "B", "C"]),
//!     [FunctionalDependency::new(["A"].into(), ["B"].into())],
//!     [],
//! )?;
//! assert_eq!(schema.key(), &AttributeSet::from(["A", "C"]));
//!
//! let parts = schema.decompose_bcnf().clone();
//! assert!(schema.check_lossless_join().lossless);
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on the model,
//!   errors and results.
//! - **`schemars`** -- derives `JsonSchema` for [`RelationDescription`], the
//!   JSON input document.
//!
//! This crate is `no_std` compatible (requires `alloc`). The text format
//! parser lives in the separate `fdnorm_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod chase;
pub mod dependency;
pub mod normalization;
pub mod schema;

pub use chase::{check_lossless_join, LosslessJoin};
pub use normalization::decompose_bcnf;
pub use schema::error::{Error, SchemaError};
pub use schema::types::{AttributeSet, Decomposition, DependencySet, FunctionalDependency};
pub use schema::{RelationDescription, Schema};
