//! Lossless-join BCNF decomposition.
//!
//! # Algorithm
//!
//! 1. Start from a single part holding the whole universe.
//! 2. Scan the parts in order and find the first one with a BCNF violation
//!    `L -> R` (see [`find_violation`](super::find_violation)).
//! 3. Replace that part `P` by `P - R` and `L + R`, then rescan from the
//!    start of the updated collection.
//! 4. Stop when a full scan finds no violation.
//!
//! Each split shares `L` between the halves and `L -> R` holds in the second
//! half, which is the classic condition for a lossless binary split. Both
//! halves are strictly smaller than `P` (otherwise `L` would have been a
//! superkey of `P`), so the loop terminates.

use crate::normalization::{violation_within, Violation};
use crate::schema::types::{Decomposition, DependencySet};
use crate::schema::Schema;

/// Decompose the schema into BCNF parts with the lossless-join property.
///
/// Any parts already stored in the schema are ignored; decomposition always
/// starts from the full attribute set.
#[must_use]
pub fn decompose_bcnf<A>(schema: &Schema<A>) -> Decomposition<A>
where
    A: Ord + Clone,
{
    let mut parts: Decomposition<A> = Decomposition::new();
    parts.insert(schema.attributes().clone());

    let mut splits = 0u32;
    while let Some(violation) = first_violation(&parts, schema.dependencies()) {
        let (remainder, extracted) = violation.split();
        tracing::trace!(
            split = splits,
            part = violation.part.len(),
            remainder = remainder.len(),
            extracted = extracted.len(),
            "bcnf: splitting part"
        );
        parts.remove(&violation.part);
        parts.insert(remainder);
        parts.insert(extracted);
        splits += 1;
    }

    tracing::debug!(splits, parts = parts.len(), "bcnf: fixpoint reached");
    parts
}

fn first_violation<A>(
    parts: &Decomposition<A>,
    dependencies: &DependencySet<A>,
) -> Option<Violation<A>>
where
    A: Ord + Clone,
{
    parts
        .iter()
        .find_map(|part| violation_within(part, dependencies))
}

impl<A> Schema<A>
where
    A: Ord + Clone,
{
    /// Replace the schema's parts by its BCNF decomposition and return them.
    pub fn decompose_bcnf(&mut self) -> &Decomposition<A> {
        let parts = decompose_bcnf(self);
        self.replace_parts(parts);
        self.parts()
    }
}
