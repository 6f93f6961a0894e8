use filter_syntax::{CompareOp, Expr, builder::*};
use proptest::prelude::*;

pub fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop::sample::select(CompareOp::ALL.to_vec())
}

fn arb_equality_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![Just(CompareOp::Equal), Just(CompareOp::NotEqual)]
}

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}"
}

fn arb_visibility() -> impl Strategy<Value = Expr> {
    prop_oneof![Just("PUBLIC"), Just("PROTECTED"), Just("PRIVATE")].prop_map(string)
}

fn arb_standalone() -> impl Strategy<Value = Expr> {
    prop_oneof![
        Just("pinned"),
        Just("has_task_list"),
        Just("has_link"),
        Just("has_code"),
        Just("has_incomplete_tasks"),
    ]
    .prop_map(ident)
}

fn arb_timestamp_field() -> impl Strategy<Value = Expr> {
    prop_oneof![
        Just("created_ts"),
        Just("updated_ts"),
        Just("create_time"),
        Just("update_time"),
    ]
    .prop_map(ident)
}

/// A single predicate that compiles against the memo catalog.
pub fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        arb_standalone(),
        (arb_equality_op(), any::<i64>())
            .prop_map(|(op, id)| compare(ident("creator_id"), op, int(id))),
        (arb_timestamp_field(), arb_compare_op(), 0i64..4_000_000_000)
            .prop_map(|(field, op, ts)| compare(field, op, int(ts))),
        (arb_equality_op(), arb_visibility())
            .prop_map(|(op, v)| compare(ident("visibility"), op, v)),
        prop::collection::vec(arb_visibility(), 1..4)
            .prop_map(|values| is_in(ident("visibility"), list(values))),
        prop::collection::vec(arb_word().prop_map(|w| string(&w)), 1..4)
            .prop_map(|tags| is_in(ident("tag"), list(tags))),
        arb_word().prop_map(|w| is_in(string(&w), ident("tags"))),
        arb_word().prop_map(|w| contains(ident("content"), string(&w))),
        (arb_compare_op(), 0i64..16)
            .prop_map(|(op, n)| compare(size(ident("tags")), op, int(n))),
        (arb_equality_op(), any::<bool>())
            .prop_map(|(op, b)| compare(ident("has_code"), op, boolean(b))),
    ]
}

/// Leaves combined with `&&`, `||` and `!`.
pub fn arb_filter() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| or(l, r)),
            inner.prop_map(not),
        ]
    })
}
