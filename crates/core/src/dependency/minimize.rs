//! Canonical (minimal) covers.
//!
//! The rewrite runs three fixed-point phases, each finishing before the next
//! starts:
//!
//! 1. split every dependency into one dependency per dependent attribute;
//! 2. drop determinant attributes that the rest of the determinant already
//!    implies the dependent without;
//! 3. drop dependencies implied by the remaining ones.
//!
//! Every phase preserves the closure of every attribute subset, so the cover
//! is equivalent to its input. Which extraneous attribute or redundant
//! dependency goes first follows the set order; a different order can give a
//! different, equally minimal, cover.

use crate::dependency::closure::closure_within;
use crate::schema::error::{Error, SchemaError};
use crate::schema::types::{AttributeSet, DependencySet, FunctionalDependency};

/// Compute a canonical cover of `dependencies` over `attributes`.
///
/// # Errors
///
/// Returns [`Error::InvalidSchema`] if a dependency has an empty side or
/// mentions an attribute outside `attributes`. The check runs before any
/// closure is computed.
pub fn minimize<A>(
    dependencies: &DependencySet<A>,
    attributes: &AttributeSet<A>,
) -> Result<DependencySet<A>, Error<A>>
where
    A: Ord + Clone,
{
    for dependency in dependencies {
        check_dependency(dependency, attributes)?;
    }

    let mut cover = split_dependents(dependencies);
    let split = cover.len();
    let shrunk = remove_extraneous_attributes(&mut cover);
    let removed = remove_redundant_dependencies(&mut cover);

    tracing::debug!(
        input = dependencies.len(),
        split,
        shrunk,
        removed,
        output = cover.len(),
        "dependency set minimized"
    );
    Ok(cover)
}

pub(crate) fn check_dependency<A>(
    dependency: &FunctionalDependency<A>,
    attributes: &AttributeSet<A>,
) -> Result<(), Error<A>>
where
    A: Ord + Clone,
{
    if dependency.determinant.is_empty() || dependency.dependent.is_empty() {
        return Err(SchemaError::EmptyDependencySide {
            dependency: dependency.clone(),
        }
        .into());
    }
    let unknown = dependency.attributes().difference(attributes);
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::UnknownDependencyAttribute {
            dependency: dependency.clone(),
            unknown,
        }
        .into())
    }
}

/// Phase 1: `L -> R` becomes `L -> {r}` for every `r` in `R`.
fn split_dependents<A>(dependencies: &DependencySet<A>) -> DependencySet<A>
where
    A: Ord + Clone,
{
    dependencies
        .iter()
        .flat_map(|dependency| {
            dependency.dependent.iter().map(|attribute| {
                FunctionalDependency::new(
                    dependency.determinant.clone(),
                    AttributeSet::singleton(attribute.clone()),
                )
            })
        })
        .collect()
}

/// Phase 2. Returns the number of determinants shrunk.
fn remove_extraneous_attributes<A>(cover: &mut DependencySet<A>) -> usize
where
    A: Ord + Clone,
{
    let mut rewrites = 0;
    while let Some((original, reduced)) = find_extraneous_attribute(cover) {
        tracing::trace!(
            from = original.determinant.len(),
            to = reduced.determinant.len(),
            "extraneous determinant attribute removed"
        );
        cover.remove(&original);
        cover.insert(reduced);
        rewrites += 1;
    }
    rewrites
}

fn find_extraneous_attribute<A>(
    cover: &DependencySet<A>,
) -> Option<(FunctionalDependency<A>, FunctionalDependency<A>)>
where
    A: Ord + Clone,
{
    for dependency in cover.iter().filter(|d| d.determinant.len() > 1) {
        for attribute in &dependency.determinant {
            let reduced = dependency.determinant.without(attribute);
            if dependency
                .dependent
                .is_subset(&closure_within(&reduced, cover))
            {
                return Some((
                    dependency.clone(),
                    FunctionalDependency::new(reduced, dependency.dependent.clone()),
                ));
            }
        }
    }
    None
}

/// Phase 3. Dependencies are removed one at a time so that the implication
/// test always runs against the current cover. Returns the number removed.
fn remove_redundant_dependencies<A>(cover: &mut DependencySet<A>) -> usize
where
    A: Ord + Clone,
{
    let mut removed = 0;
    while let Some(redundant) = find_redundant_dependency(cover) {
        tracing::trace!(remaining = cover.len(), "redundant dependency removed");
        cover.remove(&redundant);
        removed += 1;
    }
    removed
}

fn find_redundant_dependency<A>(cover: &DependencySet<A>) -> Option<FunctionalDependency<A>>
where
    A: Ord + Clone,
{
    cover
        .iter()
        .find(|&dependency| {
            let others = cover.iter().filter(|other| *other != dependency);
            dependency
                .dependent
                .is_subset(&closure_within(&dependency.determinant, others))
        })
        .cloned()
}
