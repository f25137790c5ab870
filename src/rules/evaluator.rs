//! Ordered rule evaluation: first match wins.

use super::matcher::{matches, CompiledRule};
use crate::models::Note;

/// Return the earliest rule in `rules` that matches `note`.
///
/// Rules are visited strictly in configured order; no rule is ever
/// preferred for being more specific.
pub fn find_destination<'a>(note: &Note, rules: &'a [CompiledRule]) -> Option<&'a CompiledRule> {
    let found = rules.iter().find(|rule| matches(note, rule));

    match found {
        Some(rule) => tracing::debug!(
            "[Rules] {} matched rule #{} -> {}",
            note.path,
            rule.index,
            rule.folder
        ),
        None => tracing::debug!("[Rules] {} matched no rule", note.path),
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ast::Rule;

    fn compile(rules: &[Rule], regex_tags: bool) -> Vec<CompiledRule> {
        rules
            .iter()
            .enumerate()
            .map(|(i, r)| CompiledRule::compile(i, r, regex_tags).unwrap())
            .collect()
    }

    fn note(path: &str, tags: &[&str]) -> Note {
        Note::new(path, None, tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_first_match_wins() {
        let rules = compile(
            &[Rule::tag("Projects", "#proj"), Rule::pattern("Misc", ".*")],
            false,
        );

        let dest = find_destination(&note("idea.md", &["#proj"]), &rules).unwrap();
        assert_eq!(dest.folder, "Projects");
        assert_eq!(dest.index, 0);
    }

    #[test]
    fn test_falls_through_to_catch_all() {
        let rules = compile(
            &[Rule::tag("Projects", "#proj"), Rule::pattern("Misc", ".*")],
            false,
        );

        let dest = find_destination(&note("scratch.md", &[]), &rules).unwrap();
        assert_eq!(dest.folder, "Misc");
    }

    #[test]
    fn test_order_is_respected_over_specificity() {
        let rules = compile(
            &[Rule::pattern("Misc", ".*"), Rule::tag("Projects", "#proj")],
            false,
        );

        let dest = find_destination(&note("idea.md", &["#proj"]), &rules).unwrap();
        assert_eq!(dest.folder, "Misc");
    }

    #[test]
    fn test_inert_rules_are_skipped() {
        let mut rules = vec![CompiledRule::inert(0, "Broken")];
        rules.extend(compile(&[Rule::tag("Projects", "#proj")], false));
        rules[1].index = 1;

        let dest = find_destination(&note("idea.md", &["#proj"]), &rules).unwrap();
        assert_eq!(dest.folder, "Projects");
    }

    #[test]
    fn test_no_rules_no_match() {
        assert!(find_destination(&note("idea.md", &["#proj"]), &[]).is_none());

        let rules = compile(&[Rule::tag("Projects", "#proj")], false);
        assert!(find_destination(&note("idea.md", &["#other"]), &rules).is_none());
    }
}
