use core::fmt::{Debug, Display, Formatter, Result};

use derive_more::From;

use super::types::{AttributeSet, FunctionalDependency};

/// Structural problems in a relation description, detected while building a
/// [`Schema`](super::Schema).
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError<A: Ord> {
    /// The relation declares no attributes.
    EmptyUniverse,
    /// A dependency has an empty determinant or an empty dependent.
    EmptyDependencySide {
        dependency: FunctionalDependency<A>,
    },
    /// A dependency mentions attributes that the relation does not declare.
    UnknownDependencyAttribute {
        dependency: FunctionalDependency<A>,
        unknown: AttributeSet<A>,
    },
    /// A decomposition part mentions attributes that the relation does not declare.
    UnknownPartAttribute {
        part: AttributeSet<A>,
        unknown: AttributeSet<A>,
    },
}

/// Error returned by the dependency engine.
///
/// Both variants are input errors: the computation that raised them is
/// abandoned and nothing partially built is handed back.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Error<A: Ord> {
    /// The relation description is not well formed.
    InvalidSchema(SchemaError<A>),
    /// A closure or projection was requested on attributes outside the universe.
    #[from(ignore)]
    InvalidSubset {
        subset: AttributeSet<A>,
        universe: AttributeSet<A>,
    },
}

impl<A: Ord + Display> Display for SchemaError<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyUniverse => write!(f, "the relation has no attributes"),
            Self::EmptyDependencySide { dependency } => {
                write!(f, "dependency `{dependency}` has an empty side")
            }
            Self::UnknownDependencyAttribute {
                dependency,
                unknown,
            } => write!(
                f,
                "dependency `{dependency}` uses attributes not in the relation: {unknown}"
            ),
            Self::UnknownPartAttribute { part, unknown } => write!(
                f,
                "decomposition part `{part}` uses attributes not in the relation: {unknown}"
            ),
        }
    }
}

impl<A: Ord + Display> Display for Error<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidSchema(error) => write!(f, "invalid schema: {error}"),
            Self::InvalidSubset { subset, universe } => write!(
                f,
                "invalid subset: `{subset}` is not contained in `{universe}`"
            ),
        }
    }
}

impl<A: Ord + Display + Debug> core::error::Error for SchemaError<A> {}

impl<A: Ord + Display + Debug> core::error::Error for Error<A> {}
