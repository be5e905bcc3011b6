use alloc::string::String;
use core::fmt::{Display, Write};

use crate::schema::RelationDescription;

/// Format a relation description as the text DSL.
///
/// The first line lists the attributes, followed by one line per dependency
/// (`A, B -> C`) and one line per decomposition part. The output always ends
/// with a trailing newline so that it round-trips through `parse_relation`.
#[must_use]
pub fn format_relation<A>(relation: &RelationDescription<A>) -> String
where
    A: Ord + Display,
{
    let mut output = String::new();
    let _ = writeln!(output, "{}", relation.attributes);
    for dependency in &relation.dependencies {
        let _ = writeln!(output, "{dependency}");
    }
    for part in &relation.decomposition {
        let _ = writeln!(output, "{part}");
    }
    output
}
