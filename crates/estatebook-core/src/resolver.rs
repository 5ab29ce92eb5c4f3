//! Name resolution for command targets.
//!
//! Commands reference clients and listings by free-text name. Resolution
//! first looks for an exact, case-insensitive match among the candidates. If
//! none exists it looks for a single near miss by Levenshtein distance and
//! reports it as a suggestion. A suggestion is never acted upon, and
//! neither is an exact name shared by several candidates.

use crate::config::ResolverConfig;
use crate::errors::{EstateError, Result};
use crate::model::Named;

/// Outcome of resolving a name against a candidate list.
#[derive(Debug)]
pub enum Resolution<'a, T> {
    /// Case-insensitive exact match
    Exact(&'a T),
    /// Unique closest candidate within the distance threshold
    Suggestion(&'a T),
}

impl<'a, T: Named> Resolution<'a, T> {
    /// Accept only an exact match
    ///
    /// # Errors
    ///
    /// Returns `Suggestion` carrying the candidate's name if the match was approximate.
    pub fn into_exact(self, target: &str) -> Result<&'a T> {
        match self {
            Resolution::Exact(found) => Ok(found),
            Resolution::Suggestion(candidate) => Err(EstateError::Suggestion {
                target: target.trim().to_string(),
                suggestion: candidate.name().to_string(),
            }),
        }
    }
}

/// Resolve `target` against `candidates`.
///
/// Ties at the minimum distance produce no suggestion.
///
/// # Errors
///
/// Returns `Ambiguous` if more than one candidate matches exactly, and
/// `NotFound` if there is neither an exact match nor a qualifying near miss.
pub fn resolve<'a, T: Named>(
    target: &str,
    candidates: &[&'a T],
    config: &ResolverConfig,
) -> Result<Resolution<'a, T>> {
    let not_found = || EstateError::NotFound {
        entity: T::ENTITY,
        name: target.trim().to_string(),
    };

    let wanted = target.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(not_found());
    }

    let exact: Vec<&'a T> = candidates
        .iter()
        .copied()
        .filter(|c| c.name().matches(&wanted))
        .collect();
    match exact.as_slice() {
        [] => {}
        [found] => return Ok(Resolution::Exact(*found)),
        several => {
            return Err(EstateError::Ambiguous {
                entity: T::ENTITY,
                name: target.trim().to_string(),
                candidates: several.iter().map(|c| c.describe()).collect(),
            })
        }
    }

    let threshold = config.threshold(wanted.chars().count());
    let mut best: Option<(usize, &'a T)> = None;
    let mut tied = false;

    for &candidate in candidates {
        let distance = levenshtein(&wanted, &candidate.name().key());
        match best {
            Some((min, _)) if distance > min => {}
            Some((min, _)) if distance == min => tied = true,
            _ => {
                best = Some((distance, candidate));
                tied = false;
            }
        }
    }

    match best {
        Some((distance, candidate)) if !tied && distance <= threshold => {
            tracing::debug!(
                component = module_path!(),
                op = "resolve_name",
                target = %target.trim(),
                suggestion = %candidate.name(),
                distance,
                threshold,
            );
            Ok(Resolution::Suggestion(candidate))
        }
        _ => Err(not_found()),
    }
}

/// Resolve and accept only an exact match
///
/// # Errors
///
/// `NotFound` or `Suggestion`, as for [`resolve`] and [`Resolution::into_exact`].
pub fn resolve_exact<'a, T: Named>(
    target: &str,
    candidates: &[&'a T],
    config: &ResolverConfig,
) -> Result<&'a T> {
    resolve(target, candidates, config)?.into_exact(target)
}

/// Levenshtein edit distance over Unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let insertion = current[j] + 1;
            let deletion = previous[j + 1] + 1;
            current[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Name;

    struct Item(Name);

    impl Named for Item {
        const ENTITY: &'static str = "item";

        fn name(&self) -> &Name {
            &self.0
        }
    }

    fn items(names: &[&str]) -> Vec<Item> {
        names.iter().map(|n| Item(Name::new(*n).unwrap())).collect()
    }

    fn refs(items: &[Item]) -> Vec<&Item> {
        items.iter().collect()
    }

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("tn wen xuan", "tan wen xuan"), 1);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let pool = items(&["Alice Pauline", "Benson Meier"]);
        let found = resolve("alice pauline", &refs(&pool), &ResolverConfig::default()).unwrap();
        assert!(matches!(found, Resolution::Exact(item) if item.0.as_str() == "Alice Pauline"));
    }

    #[test]
    fn test_near_miss_becomes_suggestion() {
        let pool = items(&["Tan Wen Xuan", "Benson Meier"]);
        let found = resolve("Tn Wen Xuan", &refs(&pool), &ResolverConfig::default()).unwrap();
        assert!(matches!(found, Resolution::Suggestion(item) if item.0.as_str() == "Tan Wen Xuan"));
    }

    #[test]
    fn test_suggestion_is_not_exact() {
        let pool = items(&["Tan Wen Xuan"]);
        let result = resolve_exact("Tn Wen Xuan", &refs(&pool), &ResolverConfig::default());
        match result {
            Err(EstateError::Suggestion { target, suggestion }) => {
                assert_eq!(target, "Tn Wen Xuan");
                assert_eq!(suggestion, "Tan Wen Xuan");
            }
            other => panic!("expected suggestion, got {:?}", other.map(|i| i.0.clone())),
        }
    }

    #[test]
    fn test_tie_yields_not_found() {
        // "Bob" is one edit from both
        let pool = items(&["Rob", "Bib"]);
        let result = resolve("Bob", &refs(&pool), &ResolverConfig::default());
        assert!(matches!(result, Err(EstateError::NotFound { entity: "item", .. })));
    }

    #[test]
    fn test_shared_exact_name_is_ambiguous() {
        let pool = items(&["Bishan Condo", "bishan condo", "Bishan Condos"]);
        let result = resolve("Bishan Condo", &refs(&pool), &ResolverConfig::default());
        match result {
            Err(EstateError::Ambiguous {
                entity,
                name,
                candidates,
            }) => {
                assert_eq!(entity, "item");
                assert_eq!(name, "Bishan Condo");
                assert_eq!(candidates, vec!["Bishan Condo", "bishan condo"]);
            }
            other => panic!("expected ambiguity, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn test_far_names_yield_not_found() {
        let pool = items(&["Alice Pauline"]);
        let result = resolve("Zed", &refs(&pool), &ResolverConfig::default());
        assert!(matches!(result, Err(EstateError::NotFound { .. })));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let pool = items(&["Tan Wen Xuan"]);
        let strict = ResolverConfig {
            min_distance: 0,
            length_divisor: 100,
        };
        let result = resolve("Tn Wen Xuan", &refs(&pool), &strict);
        assert!(matches!(result, Err(EstateError::NotFound { .. })));
    }

    #[test]
    fn test_blank_target_not_found() {
        let pool = items(&["A"]);
        assert!(resolve("   ", &refs(&pool), &ResolverConfig::default()).is_err());
    }

    #[test]
    fn test_empty_candidates_not_found() {
        let pool: Vec<Item> = Vec::new();
        assert!(resolve("Alice", &refs(&pool), &ResolverConfig::default()).is_err());
    }
}
