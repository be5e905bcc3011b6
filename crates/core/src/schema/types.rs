use alloc::collections::btree_set::{self, BTreeSet};
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter, Result};

/// A set of attributes.
///
/// Backed by an ordered set so that attribute sets can themselves be
/// members of sets (dependency sets, decomposition parts) and compare by
/// value. The order only affects iteration and rendering; semantically this
/// is an unordered set.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeSet<A: Ord>(BTreeSet<A>);

impl<A: Ord> Default for AttributeSet<A> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<A: Ord> AttributeSet<A> {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn singleton(attribute: A) -> Self {
        let mut set = BTreeSet::new();
        set.insert(attribute);
        Self(set)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, attribute: &A) -> bool {
        self.0.contains(attribute)
    }

    /// Returns `true` if every attribute of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Inserts an attribute, returning `true` if it was not present.
    pub fn insert(&mut self, attribute: A) -> bool {
        self.0.insert(attribute)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, A> {
        self.0.iter()
    }
}

impl<A: Ord + Clone> AttributeSet<A> {
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.0.union(&other.0).cloned().collect()
    }

    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.0.difference(&other.0).cloned().collect()
    }

    /// A copy of the set with `attribute` removed.
    #[must_use]
    pub fn without(&self, attribute: &A) -> Self {
        let mut set = self.0.clone();
        set.remove(attribute);
        Self(set)
    }

    /// Extends the set with the attributes of `other`, returning `true` if
    /// anything was added.
    pub fn absorb(&mut self, other: &Self) -> bool {
        let before = self.0.len();
        self.0.extend(other.0.iter().cloned());
        self.0.len() != before
    }
}

impl<A: Ord> FromIterator<A> for AttributeSet<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<A: Ord> From<BTreeSet<A>> for AttributeSet<A> {
    fn from(set: BTreeSet<A>) -> Self {
        Self(set)
    }
}

impl<A: Ord, const N: usize> From<[A; N]> for AttributeSet<A> {
    fn from(attributes: [A; N]) -> Self {
        attributes.into_iter().collect()
    }
}

impl<A: Ord> From<Vec<A>> for AttributeSet<A> {
    fn from(attributes: Vec<A>) -> Self {
        attributes.into_iter().collect()
    }
}

impl<A: Ord> IntoIterator for AttributeSet<A> {
    type Item = A;
    type IntoIter = btree_set::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, A: Ord> IntoIterator for &'a AttributeSet<A> {
    type Item = &'a A;
    type IntoIter = btree_set::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<A: Ord + Debug> Debug for AttributeSet<A> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<A: Ord + Display> Display for AttributeSet<A> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        for (i, attribute) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

/// A functional dependency `determinant -> dependent`.
///
/// Ordering is lexicographic on `(determinant, dependent)`, which is the
/// order dependency sets iterate in.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionalDependency<A: Ord> {
    pub determinant: AttributeSet<A>,
    pub dependent: AttributeSet<A>,
}

impl<A: Ord> FunctionalDependency<A> {
    #[must_use]
    pub const fn new(determinant: AttributeSet<A>, dependent: AttributeSet<A>) -> Self {
        Self {
            determinant,
            dependent,
        }
    }

    /// A dependency is trivial when its dependent is contained in its determinant.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.dependent.is_subset(&self.determinant)
    }
}

impl<A: Ord + Clone> FunctionalDependency<A> {
    /// All attributes mentioned on either side.
    #[must_use]
    pub fn attributes(&self) -> AttributeSet<A> {
        self.determinant.union(&self.dependent)
    }
}

impl<A: Ord + Debug> Debug for FunctionalDependency<A> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{:?}->{:?}", self.determinant, self.dependent)
    }
}

impl<A: Ord + Display> Display for FunctionalDependency<A> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} -> {}", self.determinant, self.dependent)
    }
}

/// A set of functional dependencies.
pub type DependencySet<A> = BTreeSet<FunctionalDependency<A>>;

/// A decomposition: a set of attribute sets ("parts").
pub type Decomposition<A> = BTreeSet<AttributeSet<A>>;

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_attribute_set_is_canonical() {
        let a = AttributeSet::from(["C", "A", "B", "A"]);
        let b = AttributeSet::from(["A", "B", "C"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(format!("{a}"), "A, B, C");
        assert_eq!(format!("{a:?}"), r#"{"A", "B", "C"}"#);
    }

    #[test]
    fn test_attribute_set_operations() {
        let abc = AttributeSet::from(["A", "B", "C"]);
        let bd = AttributeSet::from(["B", "D"]);
        assert_eq!(abc.union(&bd), AttributeSet::from(["A", "B", "C", "D"]));
        assert_eq!(abc.difference(&bd), AttributeSet::from(["A", "C"]));
        assert_eq!(abc.without(&"B"), AttributeSet::from(["A", "C"]));
        assert!(AttributeSet::from(["A", "C"]).is_subset(&abc));
        assert!(!bd.is_subset(&abc));

        let mut set = AttributeSet::from(["A"]);
        assert!(set.absorb(&abc));
        assert!(!set.absorb(&abc));
        assert_eq!(set, abc);
    }

    #[test]
    fn test_dependency_display_and_triviality() {
        let fd = FunctionalDependency::new(
            AttributeSet::from(["B", "A"]),
            AttributeSet::singleton("C"),
        );
        assert_eq!(format!("{fd}"), "A, B -> C");
        assert_eq!(format!("{fd:?}"), r#"{"A", "B"}->{"C"}"#);
        assert!(!fd.is_trivial());
        assert_eq!(fd.attributes(), AttributeSet::from(["A", "B", "C"]));

        let trivial =
            FunctionalDependency::new(AttributeSet::from(["A", "B"]), AttributeSet::singleton("A"));
        assert!(trivial.is_trivial());
    }
}
