//! Environment reference resolution over whole configuration trees.

use std::collections::HashMap;

use ide_config::{ConfigNode, ConfigResolver, Error};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn node(source: &str) -> ConfigNode {
    serde_yaml::from_str(source).unwrap()
}

fn snapshot(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_nested_references_are_resolved_in_place() {
    let resolver = ConfigResolver::new(snapshot(&[("HOST", "db"), ("TAG", "v1")]));

    let resolved = resolver
        .resolve(&node(
            r#"
b: env(HOST)
a:
  list: [env(TAG), plain, 3, true, ~]
  env(HOST): keys are not rewritten
"#,
        ))
        .unwrap();

    assert_eq!(
        resolved,
        node(
            r#"
b: db
a:
  list: [v1, plain, 3, true, ~]
  env(HOST): keys are not rewritten
"#
        )
    );

    let keys: Vec<_> = resolved
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_partial_references_are_left_alone() {
    let resolver = ConfigResolver::new(snapshot(&[]));
    let input = node("url: jdbc:mysql://env(HOST)/db\nnote: 'env(HOST) later'\n");

    assert_eq!(resolver.resolve(&input).unwrap(), input);
}

#[test]
fn test_missing_variable_anywhere_fails() {
    let resolver = ConfigResolver::new(snapshot(&[("SET", "1")]));

    let err = resolver
        .resolve(&node("outer:\n  - inner:\n      value: env(NOT_SET)\n"))
        .unwrap_err();

    assert!(matches!(err, Error::MissingEnvironmentVariable { name } if name == "NOT_SET"));
}

#[test]
fn test_empty_value_is_a_valid_resolution() {
    let resolver = ConfigResolver::new(snapshot(&[("EMPTY", "")]));
    assert_eq!(
        resolver.resolve(&node("value: env(EMPTY)")).unwrap(),
        node("value: ''")
    );
}

proptest! {
    #[test]
    fn test_resolution_is_deterministic(
        values in prop::collection::vec("[a-z0-9]{0,8}", 1..6),
    ) {
        let vars: HashMap<String, String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("VAR_{}", i), v.clone()))
            .collect();
        let resolver = ConfigResolver::new(vars);

        let mut mapping = serde_yaml::Mapping::new();
        for i in 0..values.len() {
            mapping.insert(
                format!("key_{}", i).into(),
                format!("env(VAR_{})", i).into(),
            );
        }
        let input = ConfigNode::Mapping(mapping);

        let first = resolver.resolve(&input).unwrap();
        let second = resolver.resolve(&input).unwrap();
        prop_assert_eq!(&first, &second);

        for (i, value) in values.iter().enumerate() {
            let key = format!("key_{}", i);
            prop_assert_eq!(first.get(key.as_str()).and_then(|v| v.as_str()), Some(value.as_str()));
        }
    }
}
