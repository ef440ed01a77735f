//! Property-based tests for feature values and writer output

use oxirs_serialize::features::{self, FeatureValues};
use oxirs_serialize::{
    Feature, FeatureType, Literal, NamedNode, Serializer, SerializerRegistry, Triple,
};
use proptest::prelude::*;

fn serializer_feature_strategy() -> impl Strategy<Value = Feature> {
    let all: Vec<Feature> = features::serializer_features().map(|i| i.feature).collect();
    prop::sample::select(all)
}

fn integer_feature_strategy() -> impl Strategy<Value = Feature> {
    let integers: Vec<Feature> = features::serializer_features()
        .filter(|i| i.value_type == FeatureType::Integer)
        .map(|i| i.feature)
        .collect();
    prop::sample::select(integers)
}

proptest! {
    #[test]
    fn negative_values_never_stored(feature in integer_feature_strategy(), value in i32::MIN..0) {
        let mut values = FeatureValues::new();
        let before = values.get_int(feature);
        prop_assert!(values.set_int(feature, value).is_err());
        prop_assert_eq!(values.get_int(feature), before);
    }

    #[test]
    fn integer_reads_are_never_negative(feature in integer_feature_strategy(), value in 0..1000i32) {
        let mut values = FeatureValues::new();
        values.set_int(feature, value).unwrap();
        let stored = values.get_int(feature);
        prop_assert!(stored >= 0);
        if feature == Feature::WriterXmlVersion {
            prop_assert!(stored == 10 || stored == 11);
        }
    }

    #[test]
    fn set_string_matches_set_int(feature in integer_feature_strategy(), value in 0..1000i32) {
        let mut by_int = FeatureValues::new();
        let mut by_string = FeatureValues::new();
        by_int.set_int(feature, value).unwrap();
        by_string.set_string(feature, &value.to_string()).unwrap();
        prop_assert_eq!(by_int.get_int(feature), by_string.get_int(feature));
    }

    #[test]
    fn typed_accessors_are_exclusive(feature in serializer_feature_strategy()) {
        let values = FeatureValues::new();
        match feature.value_type() {
            FeatureType::Integer => prop_assert!(values.get_string(feature).is_none()),
            FeatureType::String => prop_assert_eq!(values.get_int(feature), -1),
        }
    }

    #[test]
    fn ntriples_writes_one_line_per_statement(
        values in prop::collection::vec("[a-zA-Z0-9 \n\t\"\\\\]{0,12}", 0..20)
    ) {
        let registry = SerializerRegistry::with_builtins();
        let mut serializer = Serializer::new(&registry, Some("ntriples")).unwrap();
        let output = serializer.start_to_buffer(None).unwrap();
        for (i, value) in values.iter().enumerate() {
            serializer.serialize_statement(&Triple::new(
                NamedNode::new_unchecked(format!("http://example.org/s{i}")),
                NamedNode::new_unchecked("http://example.org/p"),
                Literal::new_simple_literal(value.clone()),
            )).unwrap();
        }
        prop_assert_eq!(serializer.locator().line, values.len());
        serializer.end().unwrap();
        prop_assert_eq!(output.to_string_lossy().lines().count(), values.len());
    }
}
