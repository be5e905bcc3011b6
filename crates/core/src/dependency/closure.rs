use crate::schema::error::Error;
use crate::schema::types::{AttributeSet, DependencySet, FunctionalDependency};

/// Compute the closure of `subset` under `dependencies`.
///
/// Starting from `subset`, every dependency whose determinant is contained
/// in the result contributes its dependent. Passes over the whole dependency
/// set repeat until one adds nothing, so the result does not depend on the
/// order dependencies are visited in.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if `subset` is not contained in `universe`.
pub fn closure<A>(
    subset: &AttributeSet<A>,
    universe: &AttributeSet<A>,
    dependencies: &DependencySet<A>,
) -> Result<AttributeSet<A>, Error<A>>
where
    A: Ord + Clone,
{
    if !subset.is_subset(universe) {
        return Err(Error::InvalidSubset {
            subset: subset.clone(),
            universe: universe.clone(),
        });
    }
    Ok(closure_within(subset, dependencies))
}

/// Closure without the universe check, for callers that already hold a
/// validated subset.
pub(crate) fn closure_within<'a, A, I>(subset: &AttributeSet<A>, dependencies: I) -> AttributeSet<A>
where
    A: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a FunctionalDependency<A>>,
    I::IntoIter: Clone,
{
    let dependencies = dependencies.into_iter();
    let mut result = subset.clone();
    let mut passes = 0u32;
    loop {
        let mut changed = false;
        for dependency in dependencies.clone() {
            if dependency.determinant.is_subset(&result) {
                changed |= result.absorb(&dependency.dependent);
            }
        }
        passes += 1;
        if !changed {
            break;
        }
    }
    tracing::trace!(
        input = subset.len(),
        output = result.len(),
        passes,
        "closure computed"
    );
    result
}

/// Whether `dependency` follows from `dependencies` by Armstrong's axioms.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if the determinant of `dependency` is not
/// contained in `universe`.
pub fn implies<A>(
    dependencies: &DependencySet<A>,
    dependency: &FunctionalDependency<A>,
    universe: &AttributeSet<A>,
) -> Result<bool, Error<A>>
where
    A: Ord + Clone,
{
    closure(&dependency.determinant, universe, dependencies)
        .map(|implied| dependency.dependent.is_subset(&implied))
}

/// Whether two dependency sets have the same closure for every subset of
/// `universe`, i.e. each implies every dependency of the other.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if a determinant of either set is not
/// contained in `universe`.
pub fn equivalent<A>(
    left: &DependencySet<A>,
    right: &DependencySet<A>,
    universe: &AttributeSet<A>,
) -> Result<bool, Error<A>>
where
    A: Ord + Clone,
{
    for dependency in right {
        if !implies(left, dependency, universe)? {
            return Ok(false);
        }
    }
    for dependency in left {
        if !implies(right, dependency, universe)? {
            return Ok(false);
        }
    }
    Ok(true)
}
