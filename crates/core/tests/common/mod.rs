/// DSL macros for building test relations.
///
/// # Syntax
///
/// ```ignore
/// let relation = relation! {
///     attributes: [A, B, C, D],
///     dependencies: [A B -> C, C -> D],
///     decomposition: [A B C, C D],
/// };
/// ```
///
/// - attributes are bare identifiers and become `&'static str`
/// - a dependency lists its determinant, `->`, then its dependent
/// - `decomposition` may be omitted
///
/// Produces `RelationDescription<&'static str>`.
#[macro_export]
macro_rules! attrs {
    ($($a:ident)*) => {
        fdnorm_core::AttributeSet::<&'static str>::from([$(stringify!($a)),*])
    };
}

/// Build a single FunctionalDependency.
#[macro_export]
macro_rules! fd {
    ($($l:ident)+ -> $($r:ident)+) => {
        fdnorm_core::FunctionalDependency::new($crate::attrs!($($l)+), $crate::attrs!($($r)+))
    };
}

/// Build a RelationDescription.
#[macro_export]
macro_rules! relation {
    (
        attributes: [$($a:ident),* $(,)?],
        dependencies: [$($($l:ident)+ -> $($r:ident)+),* $(,)?]
        $(, decomposition: [$($($p:ident)+),* $(,)?])?
        $(,)?
    ) => {
        fdnorm_core::RelationDescription {
            attributes: $crate::attrs!($($a)*),
            dependencies: vec![$($crate::fd!($($l)+ -> $($r)+)),*],
            decomposition: vec![$($($crate::attrs!($($p)+)),*)?],
        }
    };
}

/// Decomposition literal: `parts![A B, B C]`.
#[macro_export]
macro_rules! parts {
    ($($($p:ident)+),* $(,)?) => {
        fdnorm_core::Decomposition::<&'static str>::from([$($crate::attrs!($($p)+)),*])
    };
}
