//! Lossless-join test by the chase.
//!
//! # Algorithm
//!
//! 1. Build a [`Tableau`] with one row per decomposition part: row `i` holds
//!    the distinguished cell `a_j` in every column `j` its part covers and a
//!    fresh symbol `b_ij` elsewhere.
//! 2. **Chase loop**: for every dependency `L -> R`, group the rows that
//!    currently agree on all columns of `L` and equate their `R` columns
//!    (see [`Tableau::equate`]). Groups are recomputed for each dependency,
//!    since earlier equatings in the same pass can make more rows agree.
//! 3. Repeat full passes until one changes no cell. Cells only ever merge
//!    into fewer distinct values, so the number of changing passes is
//!    bounded by the number of cells.
//! 4. The decomposition is lossless iff some row ended up entirely
//!    distinguished.
//!
//! # Data flow
//!
//! ```text
//! parts -> Tableau::new -> loop { agreeing_groups(L) -> equate(R) } -> distinguished_row()
//! ```

use crate::dependency::minimize::check_dependency;
use crate::schema::error::{Error, SchemaError};
use crate::schema::types::{AttributeSet, Decomposition, DependencySet};
use crate::schema::Schema;

pub mod tableau;

pub use tableau::{Cell, Tableau};

/// Outcome of a lossless-join check, with the final tableau for diagnostics.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LosslessJoin<A: Ord> {
    /// Whether the decomposition has the lossless-join property.
    pub lossless: bool,
    /// The first all-distinguished row, when there is one.
    pub row: Option<usize>,
    /// Number of chase passes, including the final one that changed nothing.
    pub passes: usize,
    pub tableau: Tableau<A>,
}

/// Run the chase on `tableau` until a pass changes nothing.
///
/// Returns the number of passes.
///
/// # Errors
///
/// Returns [`Error::InvalidSubset`] if a dependency mentions an attribute
/// without a column in `tableau`. The tableau is left untouched in that case.
pub fn chase<A>(tableau: &mut Tableau<A>, dependencies: &DependencySet<A>) -> Result<usize, Error<A>>
where
    A: Ord + Clone,
{
    if let Some(dependency) = dependencies
        .iter()
        .find(|dependency| !tableau.covers(&dependency.attributes()))
    {
        return Err(Error::InvalidSubset {
            subset: dependency.attributes(),
            universe: tableau.universe(),
        });
    }
    Ok(chase_within(tableau, dependencies))
}

fn chase_within<A>(tableau: &mut Tableau<A>, dependencies: &DependencySet<A>) -> usize
where
    A: Ord + Clone,
{
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;
        for dependency in dependencies {
            for rows in tableau.agreeing_groups(&dependency.determinant) {
                changed |= tableau.equate(&dependency.dependent, &rows);
            }
        }
        tracing::trace!(pass = passes, changed, "chase: pass finished");
        if !changed {
            break;
        }
    }
    passes
}

/// Check whether `parts` is a lossless-join decomposition of `attributes`
/// under `dependencies`.
///
/// The parts need not cover the universe; an uncovered attribute simply
/// keeps every row from becoming fully distinguished.
///
/// # Errors
///
/// Returns [`Error::InvalidSchema`] if `attributes` is empty, if a part or a
/// dependency mentions an attribute outside `attributes`, or if a dependency
/// has an empty side.
pub fn check_lossless_join<A>(
    parts: &Decomposition<A>,
    dependencies: &DependencySet<A>,
    attributes: &AttributeSet<A>,
) -> Result<LosslessJoin<A>, Error<A>>
where
    A: Ord + Clone,
{
    if attributes.is_empty() {
        return Err(SchemaError::EmptyUniverse.into());
    }
    for part in parts {
        if !part.is_subset(attributes) {
            return Err(SchemaError::UnknownPartAttribute {
                part: part.clone(),
                unknown: part.difference(attributes),
            }
            .into());
        }
    }
    for dependency in dependencies {
        check_dependency(dependency, attributes)?;
    }
    Ok(run(parts, dependencies, attributes))
}

fn run<A>(
    parts: &Decomposition<A>,
    dependencies: &DependencySet<A>,
    attributes: &AttributeSet<A>,
) -> LosslessJoin<A>
where
    A: Ord + Clone,
{
    tracing::debug!(
        rows = parts.len(),
        columns = attributes.len(),
        dependencies = dependencies.len(),
        "chase: building tableau"
    );

    let mut tableau = Tableau::from_parts(parts.iter().cloned().collect(), attributes);
    let passes = chase_within(&mut tableau, dependencies);
    let row = tableau.distinguished_row();

    tracing::debug!(passes, lossless = row.is_some(), ?row, "chase: fixpoint reached");

    LosslessJoin {
        lossless: row.is_some(),
        row,
        passes,
        tableau,
    }
}

impl<A> Schema<A>
where
    A: Ord + Clone,
{
    /// Check the schema's parts for the lossless-join property under its
    /// canonical cover.
    #[must_use]
    pub fn check_lossless_join(&self) -> LosslessJoin<A> {
        run(self.parts(), self.dependencies(), self.attributes())
    }
}
