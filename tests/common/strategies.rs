use employee_batches::models::{MetaValue, Metadata};
use proptest::prelude::*;

/// Metadata keys as they appear in practice: short snake_case words
pub fn meta_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Leaf values, including any finite float
pub fn meta_leaf_strategy() -> impl Strategy<Value = MetaValue> {
    prop_oneof![
        any::<bool>().prop_map(MetaValue::Bool),
        any::<i64>().prop_map(MetaValue::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(MetaValue::Float),
        "\\PC{0,16}".prop_map(MetaValue::String),
    ]
}

/// Values including nested maps up to three levels deep
pub fn meta_value_strategy() -> impl Strategy<Value = MetaValue> {
    meta_leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(meta_key_strategy(), inner, 0..4)
            .prop_map(|map| MetaValue::Map(map.into_iter().collect()))
    })
}

pub fn metadata_strategy() -> impl Strategy<Value = Metadata> {
    prop::collection::btree_map(meta_key_strategy(), meta_value_strategy(), 0..6)
        .prop_map(|map| map.into_iter().collect())
}
