//! Hierarchy resolution for structured account codes.
//!
//! Account codes are built from fixed-width segments: `1101` is a root,
//! `11011001` a child of `1101`, and so on. The resolver computes an
//! account's level and parent from its code and the set of existing
//! accounts; callers never supply level or parent directly.
//!
//! The resolver implements the variable-depth policy: the longest existing
//! account whose code is a strict prefix of the candidate (on a segment
//! boundary) becomes the parent. It supports N-level hierarchies and
//! subsumes the two-level scheme where the parent is always the first
//! segment.

use thiserror::Error;

/// Width in characters of one code segment (one hierarchy level).
pub const SEGMENT_WIDTH: usize = 4;

/// Errors from hierarchy resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoaError {
    /// Account code is empty.
    #[error("Account code must not be empty")]
    EmptyCode,

    /// Account code contains non-ASCII characters.
    #[error("Account code must be ASCII: '{0}'")]
    NonAsciiCode(String),

    /// No existing account is a valid ancestor of the code.
    #[error("No valid parent account found for code '{0}'")]
    NoValidParent(String),
}

/// Resolved placement of an account in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<T> {
    /// Hierarchy level, 1 = root.
    pub level: u32,
    /// Reference to the parent account, none for roots.
    pub parent: Option<T>,
}

/// Derives the hierarchy level from a code's length.
///
/// This is the single level formula: one level per started
/// `SEGMENT_WIDTH`-character segment, so codes of length <= 4 are level 1,
/// lengths 5-8 are level 2, lengths 9-12 are level 3. Kept as its own
/// function so tests pin exact levels and a future change touches one place.
#[must_use]
pub fn level_for_code(code: &str) -> u32 {
    u32::try_from(code.len().div_ceil(SEGMENT_WIDTH)).unwrap_or(u32::MAX)
}

/// Returns candidate ancestor prefixes of a code, longest first.
///
/// Only prefixes on segment boundaries qualify; a prefix that matches
/// part-way through a segment never identifies a parent. The shortest
/// candidate is the root segment of `SEGMENT_WIDTH` characters.
#[must_use]
pub fn ancestor_prefixes(code: &str) -> Vec<&str> {
    if code.len() <= SEGMENT_WIDTH {
        return Vec::new();
    }

    let longest = ((code.len() - 1) / SEGMENT_WIDTH) * SEGMENT_WIDTH;
    (1..=longest / SEGMENT_WIDTH)
        .rev()
        .filter_map(|segments| code.get(..segments * SEGMENT_WIDTH))
        .collect()
}

/// Computes the level and parent for a candidate account code.
///
/// `lookup` resolves an existing account by exact code, returning a
/// reference to it (typically its id). Codes of length <= `SEGMENT_WIDTH`
/// are roots: level 1, no parent. Longer codes take the longest existing
/// strict-prefix account as parent and derive their level from
/// [`level_for_code`].
///
/// # Errors
///
/// Returns `CoaError::EmptyCode` for an empty or whitespace-only code,
/// `CoaError::NonAsciiCode` for a code with non-ASCII characters, and
/// `CoaError::NoValidParent` when no boundary prefix matches an existing
/// account.
pub fn resolve_placement<T, F>(code: &str, lookup: F) -> Result<Placement<T>, CoaError>
where
    F: Fn(&str) -> Option<T>,
{
    let code = code.trim();
    if code.is_empty() {
        return Err(CoaError::EmptyCode);
    }
    // Segment boundaries are byte offsets; restricting codes to ASCII keeps
    // byte length and character count identical.
    if !code.is_ascii() {
        return Err(CoaError::NonAsciiCode(code.to_string()));
    }

    if code.len() <= SEGMENT_WIDTH {
        return Ok(Placement {
            level: 1,
            parent: None,
        });
    }

    for prefix in ancestor_prefixes(code) {
        if let Some(parent) = lookup(prefix) {
            return Ok(Placement {
                level: level_for_code(code),
                parent: Some(parent),
            });
        }
    }

    Err(CoaError::NoValidParent(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn chart(codes: &[&str]) -> HashMap<String, u32> {
        codes
            .iter()
            .enumerate()
            .map(|(i, c)| ((*c).to_string(), u32::try_from(i).unwrap()))
            .collect()
    }

    fn resolve(code: &str, chart: &HashMap<String, u32>) -> Result<Placement<u32>, CoaError> {
        resolve_placement(code, |c| chart.get(c).copied())
    }

    #[test]
    fn test_root_codes_have_no_parent() {
        let chart = chart(&[]);
        for code in ["1", "11", "110", "1100"] {
            let placement = resolve(code, &chart).unwrap();
            assert_eq!(placement.level, 1, "code {code}");
            assert_eq!(placement.parent, None, "code {code}");
        }
    }

    #[test]
    fn test_empty_code_rejected() {
        let chart = chart(&["1100"]);
        assert_eq!(resolve("", &chart), Err(CoaError::EmptyCode));
        assert_eq!(resolve("   ", &chart), Err(CoaError::EmptyCode));
    }

    #[test]
    fn test_non_ascii_code_rejected() {
        // "11ñ0" is 4 characters but 5 bytes; without the ASCII guard it
        // would land on the wrong segment boundary.
        let chart = chart(&["1100"]);
        assert_eq!(
            resolve("11ñ0", &chart),
            Err(CoaError::NonAsciiCode("11ñ0".to_string()))
        );
        assert_eq!(
            resolve("1100ñ001", &chart),
            Err(CoaError::NonAsciiCode("1100ñ001".to_string()))
        );
    }

    #[test]
    fn test_child_of_root_segment() {
        let chart = chart(&["1100"]);
        let placement = resolve("11001001", &chart).unwrap();
        assert_eq!(placement.level, 2);
        assert_eq!(placement.parent, Some(0));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let chart = chart(&["1100", "11001001"]);
        let placement = resolve("110010012005", &chart).unwrap();
        assert_eq!(placement.level, 3);
        assert_eq!(placement.parent, Some(1), "should attach to 11001001, not 1100");
    }

    #[test]
    fn test_falls_back_to_shorter_ancestor() {
        // Intermediate level missing: a 12-char code attaches to the root.
        let chart = chart(&["1100"]);
        let placement = resolve("110010012005", &chart).unwrap();
        assert_eq!(placement.level, 3);
        assert_eq!(placement.parent, Some(0));
    }

    #[test]
    fn test_no_valid_parent() {
        let chart = chart(&["2200"]);
        assert_eq!(
            resolve("11001001", &chart),
            Err(CoaError::NoValidParent("11001001".to_string()))
        );
    }

    #[test]
    fn test_off_boundary_prefix_never_matches() {
        // "11001" is a strict prefix of "110012" but not on a segment
        // boundary, so it cannot be a parent.
        let chart = chart(&["11001"]);
        assert_eq!(
            resolve("110012", &chart),
            Err(CoaError::NoValidParent("110012".to_string()))
        );
    }

    #[test]
    fn test_partial_segment_code_resolves_against_boundary() {
        // A 6-char code is level 2 and its only ancestor candidate is the
        // 4-char boundary prefix.
        let chart = chart(&["1100"]);
        let placement = resolve("110055", &chart).unwrap();
        assert_eq!(placement.level, 2);
        assert_eq!(placement.parent, Some(0));
    }

    #[test]
    fn test_level_formula() {
        assert_eq!(level_for_code("1"), 1);
        assert_eq!(level_for_code("1100"), 1);
        assert_eq!(level_for_code("11001"), 2);
        assert_eq!(level_for_code("11001001"), 2);
        assert_eq!(level_for_code("110010011"), 3);
        assert_eq!(level_for_code("110010012005"), 3);
    }

    #[test]
    fn test_ancestor_prefixes_order() {
        assert_eq!(
            ancestor_prefixes("110010012005"),
            vec!["11001001", "1100"]
        );
        assert_eq!(ancestor_prefixes("110055"), vec!["1100"]);
        assert!(ancestor_prefixes("1100").is_empty());
        assert!(ancestor_prefixes("11").is_empty());
    }
}
