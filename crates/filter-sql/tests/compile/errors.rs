use filter_sql::FilterError;
use filter_syntax::{Call, CompareOp, Expr, Function, builder::*};

use super::helpers::*;

#[test]
fn test_unknown_identifier() {
    let err = memo_error(&eq(ident("row_status"), string("NORMAL")));
    assert_eq!(err, FilterError::UnknownIdentifier("row_status".into()));
}

#[test]
fn test_ordering_on_string_field() {
    let err = memo_error(&compare(ident("visibility"), CompareOp::LessThan, string("PUBLIC")));
    assert_eq!(
        err,
        FilterError::DisallowedOperator {
            identifier: "visibility".into(),
            operator: "<".into(),
        }
    );
}

#[test]
fn test_pinned_is_standalone_only() {
    let err = memo_error(&eq(ident("pinned"), boolean(true)));
    assert!(matches!(err, FilterError::DisallowedOperator { identifier, .. } if identifier == "pinned"));
}

#[test]
fn test_bare_non_boolean_identifier() {
    let err = memo_error(&ident("creator_id"));
    assert!(matches!(err, FilterError::DisallowedOperator { identifier, .. } if identifier == "creator_id"));
}

#[test]
fn test_type_mismatches() {
    assert_eq!(
        memo_error(&eq(ident("creator_id"), string("abc"))),
        FilterError::TypeMismatch {
            identifier: "creator_id".into(),
            expected: "int".into(),
            actual: "string".into(),
        }
    );
    assert_eq!(
        memo_error(&eq(ident("has_task_list"), string("yes"))),
        FilterError::TypeMismatch {
            identifier: "has_task_list".into(),
            expected: "bool".into(),
            actual: "string".into(),
        }
    );
    assert!(matches!(
        memo_error(&contains(ident("content"), int(1))),
        FilterError::TypeMismatch { .. }
    ));
    assert!(matches!(
        memo_error(&compare(ident("created_ts"), CompareOp::GreaterThan, boolean(true))),
        FilterError::TypeMismatch { .. }
    ));
}

#[test]
fn test_size_requires_int() {
    let err = memo_error(&compare(size(ident("tags")), CompareOp::GreaterThan, string("2")));
    assert!(matches!(err, FilterError::TypeMismatch { identifier, .. } if identifier == "size(tags)"));
}

#[test]
fn test_unparseable_timestamp() {
    let err = memo_error(&compare(ident("create_time"), CompareOp::GreaterThan, string("yesterday")));
    assert!(matches!(err, FilterError::InvalidTimestamp { identifier, .. } if identifier == "create_time"));
}

#[test]
fn test_arity_mismatch() {
    let err = memo_error(&call(
        Function::And,
        vec![ident("pinned"), ident("has_code"), ident("has_link")],
    ));
    assert_eq!(
        err,
        FilterError::ArityMismatch {
            function: "&&".into(),
            expected: 2,
            actual: 3,
        }
    );

    let err = memo_error(&call(Function::Not, vec![]));
    assert!(matches!(err, FilterError::ArityMismatch { expected: 1, actual: 0, .. }));
}

#[test]
fn test_method_arity_counts_written_args() {
    let err = memo_error(&method(ident("content"), Function::Contains, vec![]));
    assert_eq!(
        err,
        FilterError::ArityMismatch {
            function: "contains".into(),
            expected: 1,
            actual: 0,
        }
    );

    let err = memo_error(&compare(
        method(ident("tags"), Function::Size, vec![int(1)]),
        CompareOp::GreaterThan,
        int(0),
    ));
    assert_eq!(
        err,
        FilterError::ArityMismatch {
            function: "size".into(),
            expected: 0,
            actual: 1,
        }
    );

    let err = memo_error(&call(Function::Contains, vec![ident("content")]));
    assert!(matches!(err, FilterError::ArityMismatch { expected: 2, actual: 1, .. }));
}

#[test]
fn test_unknown_function_on_comparison_left() {
    let lowered = Expr::Call(Call {
        function: "lower".into(),
        target: None,
        args: vec![ident("content")],
    });
    assert_eq!(
        memo_error(&eq(lowered, string("x"))),
        FilterError::UnsupportedFunction("lower".into())
    );
}

#[test]
fn test_known_function_on_comparison_left() {
    let err = memo_error(&eq(contains(ident("content"), string("a")), boolean(true)));
    assert!(matches!(err, FilterError::InvalidOperand { function, .. } if function == "=="));
}

#[test]
fn test_unsupported_function() {
    let expr = Expr::Call(Call {
        function: "startsWith".into(),
        target: Some(Box::new(ident("content"))),
        args: vec![string("x")],
    });
    assert_eq!(
        memo_error(&expr),
        FilterError::UnsupportedFunction("startsWith".into())
    );
}

#[test]
fn test_invalid_collection_targets() {
    // only the singular form takes a list
    let err = memo_error(&is_in(ident("tags"), list(vec![string("a")])));
    assert_eq!(
        err,
        FilterError::InvalidCollectionTarget {
            function: "in".into(),
            identifier: "tags".into(),
        }
    );

    let err = memo_error(&is_in(string("a"), ident("tag")));
    assert!(matches!(err, FilterError::InvalidCollectionTarget { identifier, .. } if identifier == "tag"));

    let err = memo_error(&is_in(ident("creator_id"), list(vec![int(1)])));
    assert!(matches!(err, FilterError::InvalidCollectionTarget { .. }));

    let err = memo_error(&compare(size(ident("content")), CompareOp::GreaterThan, int(1)));
    assert_eq!(
        err,
        FilterError::InvalidCollectionTarget {
            function: "size".into(),
            identifier: "content".into(),
        }
    );
}

#[test]
fn test_contains_on_other_fields() {
    let err = memo_error(&contains(ident("visibility"), string("PUB")));
    assert_eq!(
        err,
        FilterError::DisallowedOperator {
            identifier: "visibility".into(),
            operator: "contains".into(),
        }
    );
}

#[test]
fn test_shape_errors() {
    assert!(matches!(
        memo_error(&is_in(ident("visibility"), list(vec![]))),
        FilterError::InvalidOperand { .. }
    ));
    assert!(matches!(
        memo_error(&is_in(ident("visibility"), list(vec![ident("creator_id")]))),
        FilterError::InvalidOperand { .. }
    ));
    assert!(matches!(
        memo_error(&is_in(ident("visibility"), ident("tags"))),
        FilterError::InvalidOperand { .. }
    ));
    assert!(matches!(
        memo_error(&eq(string("PUBLIC"), ident("visibility"))),
        FilterError::InvalidOperand { .. }
    ));
    assert!(matches!(
        memo_error(&eq(ident("creator_id"), ident("creator_id"))),
        FilterError::InvalidOperand { .. }
    ));
}

#[test]
fn test_top_level_constant() {
    for expr in [boolean(true), list(vec![string("a")])] {
        let err = memo_error(&expr);
        assert!(matches!(err, FilterError::InvalidOperand { function, .. } if function == "filter"));
    }
}

#[test]
fn test_error_in_right_operand_fails_whole_filter() {
    let err = memo_error(&and(ident("pinned"), ident("bogus")));
    assert_eq!(err, FilterError::UnknownIdentifier("bogus".into()));
}

#[test]
fn test_all_errors_are_client_errors() {
    let errors = [
        memo_error(&ident("bogus")),
        memo_error(&is_in(ident("tags"), list(vec![string("a")]))),
        memo_error(&call(Function::Or, vec![])),
    ];
    assert!(errors.iter().all(FilterError::is_client_error));
}
