//! Boyce-Codd normal form.
//!
//! A part of a decomposition is in BCNF when every dependency local to it
//! (both sides inside the part) has a determinant whose closure, under the
//! local dependencies, is the whole part. [`find_violation`] answers the
//! question "does this part violate BCNF, and by which dependency?";
//! [`bcnf::decompose_bcnf`] keeps splitting along violations until none is
//! left.

use crate::dependency::closure::closure_within;
use crate::dependency::projection::project_within;
use crate::schema::error::Error;
use crate::schema::types::{AttributeSet, DependencySet, FunctionalDependency};
use crate::schema::Schema;

pub mod bcnf;

pub use bcnf::decompose_bcnf;

/// A dependency local to `part` whose determinant is not a superkey of it.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation<A: Ord> {
    pub part: AttributeSet<A>,
    pub dependency: FunctionalDependency<A>,
}

impl<A: Ord + Clone> Violation<A> {
    /// The lossless split along this violation: `(part - dependent,
    /// determinant + dependent)`.
    #[must_use]
    pub fn split(&self) -> (AttributeSet<A>, AttributeSet<A>) {
        (
            self.part.difference(&self.dependency.dependent),
            self.dependency.attributes(),
        )
    }
}

/// Find the first dependency (in set order) that violates BCNF on `part`.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if `part` is not contained in `universe`.
pub fn find_violation<A>(
    part: &AttributeSet<A>,
    dependencies: &DependencySet<A>,
    universe: &AttributeSet<A>,
) -> Result<Option<Violation<A>>, Error<A>>
where
    A: Ord + Clone,
{
    if !part.is_subset(universe) {
        return Err(Error::InvalidSubset {
            subset: part.clone(),
            universe: universe.clone(),
        });
    }
    Ok(violation_within(part, dependencies))
}

/// Whether `part` is in BCNF with respect to `dependencies`.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if `part` is not contained in `universe`.
pub fn is_bcnf<A>(
    part: &AttributeSet<A>,
    dependencies: &DependencySet<A>,
    universe: &AttributeSet<A>,
) -> Result<bool, Error<A>>
where
    A: Ord + Clone,
{
    find_violation(part, dependencies, universe).map(|violation| violation.is_none())
}

pub(crate) fn violation_within<A>(
    part: &AttributeSet<A>,
    dependencies: &DependencySet<A>,
) -> Option<Violation<A>>
where
    A: Ord + Clone,
{
    let local = project_within(dependencies, part);
    local
        .iter()
        .find(|dependency| closure_within(&dependency.determinant, &local) != *part)
        .map(|dependency| Violation {
            part: part.clone(),
            dependency: dependency.clone(),
        })
}

impl<A> Schema<A>
where
    A: Ord + Clone,
{
    /// The first BCNF violation among the schema's current parts, if any.
    #[must_use]
    pub fn bcnf_violation(&self) -> Option<Violation<A>> {
        self.parts()
            .iter()
            .find_map(|part| violation_within(part, self.dependencies()))
    }
}
