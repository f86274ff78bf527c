//! Nameserver normalization and match evaluation.

use std::collections::BTreeSet;

use crate::types::MatchPolicy;

/// Trim whitespace and the trailing root dot, then lower-case.
///
/// `"NS1.Example.com."` → `"ns1.example.com"`.
#[must_use]
pub fn normalize_nameserver(ns: &str) -> String {
    ns.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Normalize, drop empties, dedupe and sort.
#[must_use]
pub fn normalize_set<S: AsRef<str>>(nameservers: &[S]) -> Vec<String> {
    nameservers
        .iter()
        .map(|ns| normalize_nameserver(ns.as_ref()))
        .filter(|ns| !ns.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Result of comparing observed nameservers with the expected set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Normalized observed nameservers present in the expected set.
    pub matched: Vec<String>,
    /// Whether `matched` satisfies the policy.
    pub propagated: bool,
}

/// Compare two nameserver sets under a match policy.
///
/// An empty observed set never counts as propagated.
#[must_use]
pub fn evaluate_match<O: AsRef<str>, E: AsRef<str>>(
    observed: &[O],
    expected: &[E],
    policy: MatchPolicy,
) -> MatchOutcome {
    let observed = normalize_set(observed);
    let expected = normalize_set(expected);

    let matched: Vec<String> = observed
        .into_iter()
        .filter(|ns| expected.contains(ns))
        .collect();

    let propagated = match policy {
        MatchPolicy::Any => !matched.is_empty(),
        MatchPolicy::Majority => !expected.is_empty() && matched.len() * 2 > expected.len(),
    };

    MatchOutcome {
        matched,
        propagated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ignores_case_and_trailing_dot() {
        assert_eq!(normalize_nameserver("NS1.Example.com."), "ns1.example.com");
        assert_eq!(
            normalize_nameserver("NS1.Example.com."),
            normalize_nameserver("ns1.example.com")
        );
        assert_eq!(normalize_nameserver("  ns2.example.com  "), "ns2.example.com");
    }

    #[test]
    fn normalize_set_sorts_and_dedupes() {
        let set = normalize_set(&["b.example.", "A.example", "a.example.", ""]);
        assert_eq!(set, vec!["a.example", "b.example"]);
    }

    #[test]
    fn any_policy_single_match_is_enough() {
        let outcome = evaluate_match(
            &["NS1.AWSDNS.COM."],
            &["ns1.awsdns.com", "ns2.awsdns.com", "ns3.awsdns.com", "ns4.awsdns.com"],
            MatchPolicy::Any,
        );
        assert!(outcome.propagated);
        assert_eq!(outcome.matched, vec!["ns1.awsdns.com"]);
    }

    #[test]
    fn disjoint_sets_do_not_match() {
        let outcome = evaluate_match(
            &["ns3.other.com"],
            &["ns1.awsdns.com", "ns2.awsdns.com"],
            MatchPolicy::Any,
        );
        assert!(!outcome.propagated);
        assert!(outcome.matched.is_empty());
    }

    #[test]
    fn empty_observed_is_never_propagated() {
        let empty: [&str; 0] = [];
        for policy in [MatchPolicy::Any, MatchPolicy::Majority] {
            let outcome = evaluate_match(&empty, &["ns1.awsdns.com"], policy);
            assert!(!outcome.propagated);
        }
    }

    #[test]
    fn majority_policy_needs_more_than_half() {
        let expected = ["a.ns", "b.ns", "c.ns", "d.ns"];
        assert!(!evaluate_match(&["a.ns", "b.ns"], &expected, MatchPolicy::Majority).propagated);
        assert!(
            evaluate_match(&["a.ns", "b.ns", "c.ns"], &expected, MatchPolicy::Majority)
                .propagated
        );
    }

    #[test]
    fn majority_with_empty_expected_is_false() {
        let expected: [&str; 0] = [];
        assert!(!evaluate_match(&["a.ns"], &expected, MatchPolicy::Majority).propagated);
    }
}
