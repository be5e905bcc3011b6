//! Relation schemas: an attribute universe, its functional dependencies and
//! an optional decomposition.
//!
//! A [`RelationDescription`] is what loaders produce (the text DSL parser,
//! JSON documents, the test generator). It is unvalidated. Converting it into
//! a [`Schema`] checks that every dependency and part stays inside the
//! universe, replaces the dependencies by a canonical cover and derives a
//! candidate key.

use alloc::vec::Vec;
use core::fmt::{Display, Formatter};

use self::error::{Error, SchemaError};
use self::types::{AttributeSet, Decomposition, DependencySet, FunctionalDependency};
use crate::dependency::closure::closure_within;
use crate::dependency::key::candidate_key;
use crate::dependency::minimize::minimize;

pub mod display;
pub mod error;
pub mod types;

/// Unvalidated description of a relation as read from some input.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescription<A: Ord> {
    /// The attribute universe.
    pub attributes: AttributeSet<A>,
    /// Functional dependencies, with arbitrary right-hand sides.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependencies: Vec<FunctionalDependency<A>>,
    /// Candidate decomposition to check for lossless join.
    #[cfg_attr(feature = "serde", serde(default))]
    pub decomposition: Vec<AttributeSet<A>>,
}

impl<A: Ord> RelationDescription<A> {
    #[must_use]
    pub const fn new(attributes: AttributeSet<A>) -> Self {
        Self {
            attributes,
            dependencies: Vec::new(),
            decomposition: Vec::new(),
        }
    }
}

/// A validated relation schema.
///
/// The dependency set is a canonical cover of the dependencies it was built
/// from and never changes afterwards. The parts are the only mutable state.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<A: Ord> {
    attributes: AttributeSet<A>,
    dependencies: DependencySet<A>,
    parts: Decomposition<A>,
    key: AttributeSet<A>,
}

impl<A> Schema<A>
where
    A: Ord + Clone,
{
    /// Validate the input and build the schema.
    ///
    /// Parts are checked before dependencies; the first offending item is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] if the universe is empty, if a part
    /// or a dependency mentions an attribute outside the universe, or if a
    /// dependency has an empty side.
    pub fn new<D, P>(attributes: AttributeSet<A>, dependencies: D, parts: P) -> Result<Self, Error<A>>
    where
        D: IntoIterator<Item = FunctionalDependency<A>>,
        P: IntoIterator<Item = AttributeSet<A>>,
    {
        if attributes.is_empty() {
            return Err(SchemaError::EmptyUniverse.into());
        }

        let parts: Decomposition<A> = parts.into_iter().collect();
        for part in &parts {
            check_part(part, &attributes)?;
        }

        let raw: DependencySet<A> = dependencies.into_iter().collect();
        let dependencies = minimize(&raw, &attributes)?;
        let key = candidate_key(&dependencies, &attributes)?;

        tracing::debug!(
            attributes = attributes.len(),
            dependencies = raw.len(),
            minimized = dependencies.len(),
            parts = parts.len(),
            key = key.len(),
            "schema constructed"
        );

        Ok(Self {
            attributes,
            dependencies,
            parts,
            key,
        })
    }

    #[must_use]
    pub const fn attributes(&self) -> &AttributeSet<A> {
        &self.attributes
    }

    /// The canonical cover of the dependencies the schema was built from.
    #[must_use]
    pub const fn dependencies(&self) -> &DependencySet<A> {
        &self.dependencies
    }

    #[must_use]
    pub const fn key(&self) -> &AttributeSet<A> {
        &self.key
    }

    #[must_use]
    pub const fn parts(&self) -> &Decomposition<A> {
        &self.parts
    }

    /// Replace the parts wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] if a part leaves the universe; the
    /// current parts are kept in that case.
    pub fn set_parts<P>(&mut self, parts: P) -> Result<(), Error<A>>
    where
        P: IntoIterator<Item = AttributeSet<A>>,
    {
        let parts: Decomposition<A> = parts.into_iter().collect();
        for part in &parts {
            check_part(part, &self.attributes)?;
        }
        self.parts = parts;
        Ok(())
    }

    pub(crate) fn replace_parts(&mut self, parts: Decomposition<A>) {
        debug_assert!(parts.iter().all(|p| p.is_subset(&self.attributes)));
        self.parts = parts;
    }

    /// Whether `attributes` determines the whole relation.
    #[must_use]
    pub fn is_superkey(&self, attributes: &AttributeSet<A>) -> bool {
        attributes.is_subset(&self.attributes)
            && closure_within(attributes, &self.dependencies) == self.attributes
    }

    /// Drop the derived data and return the description of this schema,
    /// carrying the minimised dependencies and the current parts.
    #[must_use]
    pub fn to_description(&self) -> RelationDescription<A> {
        RelationDescription {
            attributes: self.attributes.clone(),
            dependencies: self.dependencies.iter().cloned().collect(),
            decomposition: self.parts.iter().cloned().collect(),
        }
    }
}

impl<A> TryFrom<RelationDescription<A>> for Schema<A>
where
    A: Ord + Clone,
{
    type Error = Error<A>;

    fn try_from(description: RelationDescription<A>) -> Result<Self, Self::Error> {
        Self::new(
            description.attributes,
            description.dependencies,
            description.decomposition,
        )
    }
}

fn check_part<A: Ord + Clone>(part: &AttributeSet<A>, attributes: &AttributeSet<A>) -> Result<(), Error<A>> {
    if part.is_subset(attributes) {
        Ok(())
    } else {
        Err(SchemaError::UnknownPartAttribute {
            part: part.clone(),
            unknown: part.difference(attributes),
        }
        .into())
    }
}

/// Report block: attributes, key and the canonical cover.
impl<A: Ord + Display> Display for Schema<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Attributes: {}", self.attributes)?;
        writeln!(f, "Key: {}", self.key)?;
        writeln!(f, "Dependencies:")?;
        for dependency in &self.dependencies {
            writeln!(f, "  {dependency}")?;
        }
        Ok(())
    }
}
