use crate::dependency::closure::closure_within;
use crate::dependency::minimize::check_dependency;
use crate::schema::error::Error;
use crate::schema::types::{AttributeSet, DependencySet};

/// Find one candidate key of the relation.
///
/// Starts from the whole universe and drops, one at a time, the first
/// attribute (in set order) whose removal still leaves a superkey, rescanning
/// after every removal. The result is a minimal key but not necessarily the
/// only one: a relation may have several, and a different scan order can
/// land on another.
///
/// # Errors
///
/// Returns [`Error::InvalidSchema`] if a dependency mentions an attribute
/// outside `attributes` or has an empty side.
pub fn candidate_key<A>(
    dependencies: &DependencySet<A>,
    attributes: &AttributeSet<A>,
) -> Result<AttributeSet<A>, Error<A>>
where
    A: Ord + Clone,
{
    for dependency in dependencies {
        check_dependency(dependency, attributes)?;
    }

    let mut key = attributes.clone();
    while let Some(attribute) = find_removable(&key, dependencies, attributes) {
        key = key.without(&attribute);
    }

    tracing::debug!(
        attributes = attributes.len(),
        key = key.len(),
        "candidate key found"
    );
    Ok(key)
}

fn find_removable<A>(
    key: &AttributeSet<A>,
    dependencies: &DependencySet<A>,
    attributes: &AttributeSet<A>,
) -> Option<A>
where
    A: Ord + Clone,
{
    key.iter()
        .find(|attribute| closure_within(&key.without(attribute), dependencies) == *attributes)
        .cloned()
}
