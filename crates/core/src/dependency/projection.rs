use crate::schema::error::Error;
use crate::schema::types::{AttributeSet, DependencySet};

/// The dependencies of `dependencies` local to `subset`: those whose
/// determinant and dependent both lie inside it.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if `subset` is not contained in `universe`.
pub fn project<A>(
    dependencies: &DependencySet<A>,
    subset: &AttributeSet<A>,
    universe: &AttributeSet<A>,
) -> Result<DependencySet<A>, Error<A>>
where
    A: Ord + Clone,
{
    if !subset.is_subset(universe) {
        return Err(Error::InvalidSubset {
            subset: subset.clone(),
            universe: universe.clone(),
        });
    }
    Ok(project_within(dependencies, subset))
}

pub(crate) fn project_within<A>(
    dependencies: &DependencySet<A>,
    subset: &AttributeSet<A>,
) -> DependencySet<A>
where
    A: Ord + Clone,
{
    dependencies
        .iter()
        .filter(|d| d.determinant.is_subset(subset) && d.dependent.is_subset(subset))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::FunctionalDependency;

    fn fd<const L: usize, const R: usize>(
        determinant: [&'static str; L],
        dependent: [&'static str; R],
    ) -> FunctionalDependency<&'static str> {
        FunctionalDependency::new(determinant.into(), dependent.into())
    }

    #[test]
    fn test_project_keeps_local_dependencies() {
        let universe = AttributeSet::from(["A", "B", "C", "D"]);
        let dependencies: DependencySet<_> =
            [fd(["A"], ["B"]), fd(["B"], ["C"]), fd(["A", "D"], ["C"])].into();
        let projected = project(&dependencies, &AttributeSet::from(["A", "B", "C"]), &universe).unwrap();
        let expected: DependencySet<_> = [fd(["A"], ["B"]), fd(["B"], ["C"])].into();
        assert_eq!(projected, expected);
    }

    #[test]
    fn test_project_rejects_foreign_subset() {
        let universe = AttributeSet::from(["A", "B"]);
        let result = project(&DependencySet::new(), &AttributeSet::from(["A", "X"]), &universe);
        assert_eq!(
            result,
            Err(Error::InvalidSubset {
                subset: AttributeSet::from(["A", "X"]),
                universe,
            })
        );
    }
}
