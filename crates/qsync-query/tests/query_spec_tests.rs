//! Tests for query argument construction

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qsync_query::{OUTPUT_FLAGS, QuerySpec};
use rstest::rstest;

fn expression(
    include_paths: &[&str],
    exclude_paths: &[&str],
    include_packages: &[&str],
    exclude_packages: &[&str],
) -> String {
    QuerySpec::from_roots(
        include_paths.iter().copied(),
        exclude_paths.iter().copied(),
        include_packages.iter().copied(),
        exclude_packages.iter().copied(),
    )
    .query_expression()
    .to_string()
}

#[rstest]
#[case(&["a"], &[], &[], &[], "(//a/...:*)")]
#[case(&["a", "b"], &["c"], &[], &[], "(//a/...:* + //b/...:* - //c/...:*)")]
#[case(&[], &[], &["x/y"], &[], "(//x/y:*)")]
#[case(&["java"], &[], &["javatests/foo"], &["java/gen"], "(//java/...:* + //javatests/foo:* - //java/gen:*)")]
#[case(&[], &[], &[], &[], "()")]
fn builds_expected_expression(
    #[case] include_paths: &[&str],
    #[case] exclude_paths: &[&str],
    #[case] include_packages: &[&str],
    #[case] exclude_packages: &[&str],
    #[case] expected: &str,
) {
    assert_eq!(
        expression(include_paths, exclude_paths, include_packages, exclude_packages),
        expected
    );
}

#[test]
fn args_have_fixed_shape() {
    let spec = QuerySpec::from_roots(["a"], ["a/b"], [], []);
    let args = spec.query_args();

    assert_eq!(args.len(), 3);
    assert_eq!(args[0], "(//a/...:* - //a/b/...:*)");
    assert_eq!(args[1..], OUTPUT_FLAGS.map(String::from));
}

#[test]
fn overlapping_include_and_exclude_is_left_to_the_engine() {
    let spec = QuerySpec::from_roots(["a"], ["a"], [], []);
    assert_eq!(spec.query_expression(), "(//a/...:* - //a/...:*)");
}

#[test]
fn spec_round_trips_through_json() {
    let spec = QuerySpec::from_roots(["a", "b"], ["c"], [], []);
    let json = serde_json::to_string(&spec).unwrap();
    let restored: QuerySpec = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, spec);
    assert_eq!(restored.query_args(), spec.query_args());
}

fn package_path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z][a-z0-9_]{0,6}", 1..4).prop_map(|parts| parts.join("/"))
}

proptest! {
    #[test]
    fn query_args_are_pure(
        includes in proptest::collection::vec(package_path(), 0..5),
        excludes in proptest::collection::vec(package_path(), 0..5),
    ) {
        let spec = QuerySpec::from_roots(includes.iter(), excludes.iter(), [], []);
        let twin = QuerySpec::from_roots(includes.iter(), excludes.iter(), [], []);

        let first = spec.query_args().to_vec();
        let second = spec.query_args().to_vec();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, twin.query_args().to_vec());
        prop_assert_eq!(spec.cache_key(), twin.cache_key());
    }

    #[test]
    fn every_pattern_carries_file_suffix(
        includes in proptest::collection::vec(package_path(), 1..5),
    ) {
        let spec = QuerySpec::from_roots(includes.iter(), std::iter::empty(), [], []);
        let expression = spec.query_expression();
        prop_assert!(expression.starts_with('(') && expression.ends_with(')'));
        prop_assert_eq!(expression.matches(":*").count(), spec.includes().len());
    }
}
