//! Property tests for hierarchy resolution.

use proptest::prelude::*;
use std::collections::HashMap;

use super::resolver::{
    CoaError, SEGMENT_WIDTH, ancestor_prefixes, level_for_code, resolve_placement,
};

/// Strategy for numeric account codes of 1..=4 segments.
fn code_strategy() -> impl Strategy<Value = String> {
    (1usize..=4, "[0-9]{4}", "[0-9]{4}", "[0-9]{4}", "[0-9]{4}").prop_map(
        |(segments, a, b, c, d)| {
            let mut code = String::new();
            for (i, part) in [a, b, c, d].iter().enumerate() {
                if i < segments {
                    code.push_str(part);
                }
            }
            code
        },
    )
}

/// Strategy for a chart of existing codes.
fn chart_strategy() -> impl Strategy<Value = HashMap<String, usize>> {
    prop::collection::vec(code_strategy(), 0..16)
        .prop_map(|codes| codes.into_iter().enumerate().map(|(i, c)| (c, i)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Codes no longer than one segment are always roots, regardless of the
    /// existing chart.
    #[test]
    fn prop_short_codes_are_roots(
        code in "[0-9]{1,4}",
        chart in chart_strategy(),
    ) {
        let placement = resolve_placement(&code, |c| chart.get(c).copied()).unwrap();
        prop_assert_eq!(placement.level, 1);
        prop_assert_eq!(placement.parent, None);
    }

    /// When resolution succeeds for a long code, the parent's code is a
    /// strict prefix of the candidate on a segment boundary.
    #[test]
    fn prop_parent_is_boundary_prefix(
        code in code_strategy(),
        chart in chart_strategy(),
    ) {
        prop_assume!(code.len() > SEGMENT_WIDTH);

        let by_code: HashMap<&str, usize> =
            chart.iter().map(|(c, i)| (c.as_str(), *i)).collect();

        if let Ok(placement) = resolve_placement(&code, |c| by_code.get(c).copied()) {
            let parent_idx = placement.parent.expect("long codes always have a parent");
            let parent_code = chart
                .iter()
                .find(|(_, i)| **i == parent_idx)
                .map(|(c, _)| c.as_str())
                .expect("parent must come from the chart");

            prop_assert!(code.starts_with(parent_code));
            prop_assert!(parent_code.len() < code.len());
            prop_assert_eq!(parent_code.len() % SEGMENT_WIDTH, 0);
            prop_assert_eq!(placement.level, level_for_code(&code));
        }
    }

    /// The resolver picks the longest matching prefix: no other existing
    /// account is both a boundary prefix of the code and longer than the
    /// chosen parent.
    #[test]
    fn prop_longest_prefix_chosen(
        code in code_strategy(),
        chart in chart_strategy(),
    ) {
        prop_assume!(code.len() > SEGMENT_WIDTH);

        if let Ok(placement) = resolve_placement(&code, |c| chart.get(c).copied()) {
            let parent_idx = placement.parent.unwrap();
            let parent_len = chart
                .iter()
                .find(|(_, i)| **i == parent_idx)
                .map(|(c, _)| c.len())
                .unwrap();

            for prefix in ancestor_prefixes(&code) {
                if chart.contains_key(prefix) {
                    prop_assert!(prefix.len() <= parent_len);
                }
            }
        }
    }

    /// Resolution failure for a long code means no boundary prefix exists in
    /// the chart.
    #[test]
    fn prop_failure_means_no_prefix(
        code in code_strategy(),
        chart in chart_strategy(),
    ) {
        prop_assume!(code.len() > SEGMENT_WIDTH);

        let result = resolve_placement(&code, |c| chart.get(c).copied());
        if result == Err(CoaError::NoValidParent(code.clone())) {
            for prefix in ancestor_prefixes(&code) {
                prop_assert!(!chart.contains_key(prefix));
            }
        }
    }

    /// Resolution is deterministic: the same code and chart always produce
    /// the same placement.
    #[test]
    fn prop_resolution_deterministic(
        code in code_strategy(),
        chart in chart_strategy(),
    ) {
        let first = resolve_placement(&code, |c| chart.get(c).copied());
        let second = resolve_placement(&code, |c| chart.get(c).copied());
        prop_assert_eq!(first, second);
    }
}
