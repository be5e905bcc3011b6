//! End-to-end runs of schema construction, BCNF decomposition and the chase.

mod common;

use fdnorm_core::chase::Cell;
use fdnorm_core::dependency::closure;
use fdnorm_core::{check_lossless_join, DependencySet, Error, Schema, SchemaError};

type TestSchema = Schema<&'static str>;

#[test]
fn key_dependency_is_already_bcnf() {
    let mut schema = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A -> B C],
    })
    .unwrap();

    assert_eq!(schema.key(), &attrs!(A));
    let expected: DependencySet<_> = [fd!(A -> B), fd!(A -> C)].into();
    assert_eq!(schema.dependencies(), &expected);

    assert_eq!(schema.decompose_bcnf(), &parts![A B C]);
    assert!(schema.check_lossless_join().lossless);
}

#[test]
fn partial_dependency_splits_off() {
    let mut schema = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A -> B],
    })
    .unwrap();

    assert_eq!(schema.key(), &attrs!(A C));
    assert_eq!(schema.decompose_bcnf(), &parts![A B, A C]);
    let result = schema.check_lossless_join();
    assert!(result.lossless, "{}", result.tableau);
}

#[test]
fn transitive_chain_is_lossless() {
    let schema = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A -> B, B -> C],
        decomposition: [A B, B C],
    })
    .unwrap();

    let result = schema.check_lossless_join();
    assert!(result.lossless);
    assert_eq!(result.row, Some(0));
    assert_eq!(schema.key(), &attrs!(A));
}

#[test]
fn shared_determinant_is_lossless() {
    // A -> B gives row {A, C} the B of row {A, B}; B -> C then gives row
    // {A, B} the C of row {A, C}.
    let schema = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A -> B, B -> C],
        decomposition: [A B, A C],
    })
    .unwrap();

    let result = schema.check_lossless_join();
    assert!(result.lossless);
    assert!(result
        .tableau
        .row(1)
        .iter()
        .all(|cell| matches!(cell, Cell::Distinguished { .. })));
}

#[test]
fn disjoint_parts_are_lossy() {
    let result = check_lossless_join(
        &parts![A B, C D],
        &DependencySet::from([fd!(A -> B), fd!(C -> D)]),
        &attrs!(A B C D),
    )
    .unwrap();
    assert!(!result.lossless);
    assert_eq!(result.row, None);
}

#[test]
fn unknown_attribute_is_rejected() {
    let result = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A Z -> B],
    });
    assert_eq!(
        result,
        Err(Error::InvalidSchema(SchemaError::UnknownDependencyAttribute {
            dependency: fd!(A Z -> B),
            unknown: attrs!(Z),
        }))
    );
}

#[test]
fn closure_of_foreign_subset_is_rejected() {
    let result = closure(&attrs!(A Q), &attrs!(A B), &DependencySet::new());
    assert_eq!(
        result,
        Err(Error::InvalidSubset {
            subset: attrs!(A Q),
            universe: attrs!(A B),
        })
    );
}

#[test]
fn textbook_employee_relation() {
    // Emp(E, N, D, M): E -> N D, D -> M.
    let mut schema = TestSchema::try_from(relation! {
        attributes: [E, N, D, M],
        dependencies: [E -> N D, D -> M],
    })
    .unwrap();

    assert_eq!(schema.key(), &attrs!(E));
    assert_eq!(schema.decompose_bcnf(), &parts![D M, D E N]);
    assert!(schema.bcnf_violation().is_none());
    assert!(schema.check_lossless_join().lossless);
}

#[test]
fn report_lists_key_and_cover() {
    let schema = TestSchema::try_from(relation! {
        attributes: [A, B, C],
        dependencies: [A -> B, A B -> C],
    })
    .unwrap();
    assert_eq!(
        schema.to_string(),
        "Attributes: A, B, C\nKey: A\nDependencies:\n  A -> B\n  A -> C\n"
    );
}
