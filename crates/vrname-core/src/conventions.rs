use std::collections::BTreeMap;
use tracing::debug;

/// Canonical player name -> sorted, deduplicated filename-pattern tokens.
pub type ConventionTable = BTreeMap<String, Vec<String>>;

/// Every accepted pattern token starts with this character.
pub const PATTERN_SEPARATOR: char = '_';

// Known header prefixes and the display name each one folds into.
// Checked in order; first match wins, so new entries must be appended
// with that in mind.
const SECTION_ALIASES: &[(&str, &str)] = &[
    ("UNIVERSAL PATTERNS", "Universal"),
    ("PLAYA VR", "PLAY'A VR"),
    ("SKYBOX VR", "Skybox VR Player"),
    ("PIGASUS", "Pigasus VR"),
    ("RAD TV", "Rad TV"),
    ("COMMEDIA", "Commedia"),
    ("OCULUS", "Oculus Video App"),
];

pub fn canonical_player_name(header_line: &str) -> String {
    let text = header_line.trim().trim_end_matches(':').trim();
    let upper = text.to_uppercase();

    for (prefix, canonical) in SECTION_ALIASES {
        if upper.starts_with(prefix) {
            return (*canonical).to_string();
        }
    }

    text.to_string()
}

pub fn parse_conventions(text: &str) -> ConventionTable {
    let mut table = ConventionTable::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Section headers end with ':' in the source file.
        if trimmed.ends_with(':') {
            let section = canonical_player_name(trimmed);
            debug!("Section header: '{}' -> '{}'", trimmed, section);
            table.entry(section.clone()).or_default();
            current = Some(section);
            continue;
        }

        // Pattern lines are meaningless until a section has been opened.
        let Some(tokens) = current.as_ref().and_then(|s| table.get_mut(s)) else {
            continue;
        };

        // Lines look like "_180_LR = description" or "_3dh, _LR, _SBS = ...";
        // anything after the first '=' is free text for humans.
        let candidates: Vec<&str> = match trimmed.split_once('=') {
            Some((left, _)) => left.split(',').map(str::trim).collect(),
            None => vec![trimmed],
        };

        for candidate in candidates {
            if candidate.is_empty() {
                continue;
            }
            if candidate.starts_with(PATTERN_SEPARATOR) && !tokens.iter().any(|t| t == candidate) {
                tokens.push(candidate.to_string());
            }
        }
    }

    for tokens in table.values_mut() {
        // Stable sort: tokens equal up to case keep their insertion order.
        tokens.sort_by_key(|t| t.to_lowercase());
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_header_canonicalization() {
        assert_eq!(canonical_player_name("Universal Patterns:"), "Universal");
        assert_eq!(canonical_player_name("PlayA VR Specific:"), "PLAY'A VR");
        assert_eq!(canonical_player_name("SKYBOX VR:"), "Skybox VR Player");
        assert_eq!(canonical_player_name("Pigasus:"), "Pigasus VR");
        assert_eq!(canonical_player_name("Rad TV Patterns:"), "Rad TV");
        assert_eq!(canonical_player_name("Commedia:"), "Commedia");
        assert_eq!(
            canonical_player_name("Oculus Video App Specific:"),
            "Oculus Video App"
        );
    }

    #[test]
    fn test_unknown_header_passes_through() {
        assert_eq!(canonical_player_name("My Custom Player:"), "My Custom Player");
    }

    #[test]
    fn test_token_extraction_discards_description() {
        let table = parse_conventions("Skybox VR:\n_3dh, _LR, _SBS = stereo formats\n");
        assert_eq!(
            table["Skybox VR Player"],
            vec!["_3dh".to_string(), "_LR".to_string(), "_SBS".to_string()]
        );
    }

    #[test]
    fn test_line_without_equals_is_single_token() {
        let table = parse_conventions("Pigasus:\n_180_LR\n");
        assert_eq!(table["Pigasus VR"], vec!["_180_LR".to_string()]);
    }

    #[test]
    fn test_tokens_before_first_header_are_dropped() {
        let table = parse_conventions("_LR = orphaned\n\nOculus:\n_TB = top-bottom\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table["Oculus Video App"], vec!["_TB".to_string()]);
    }

    #[test]
    fn test_non_pattern_candidates_are_dropped() {
        let table = parse_conventions("Commedia:\nLR, _LR, notes = mixed bag\n");
        assert_eq!(table["Commedia"], vec!["_LR".to_string()]);
    }

    #[test]
    fn test_duplicate_tokens_are_suppressed() {
        let text = "Rad TV:\n_LR = first\n_LR = again\n_LR, _SBS = and again\n";
        let table = parse_conventions(text);
        assert_eq!(table["Rad TV"], vec!["_LR".to_string(), "_SBS".to_string()]);
    }

    #[test]
    fn test_case_variants_are_distinct_but_adjacent() {
        // Dedup is case-sensitive while ordering is case-insensitive, so
        // "_LR" and "_lr" both survive and sort next to each other in
        // insertion order.
        let table = parse_conventions("Commedia:\n_SBS\n_LR\n_lr\n");
        assert_eq!(
            table["Commedia"],
            vec!["_LR".to_string(), "_lr".to_string(), "_SBS".to_string()]
        );
    }

    #[test]
    fn test_sections_with_same_canonical_name_merge() {
        let text = "Playa VR:\n_LR\n\nPLAYA VR SPECIFIC:\n_TB\n";
        let table = parse_conventions(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table["PLAY'A VR"], vec!["_LR".to_string(), "_TB".to_string()]);
    }

    #[test]
    fn test_blank_lines_do_not_end_a_section() {
        let table = parse_conventions("Oculus:\n_LR\n\n\n_TB\n");
        assert_eq!(table["Oculus Video App"], vec!["_LR".to_string(), "_TB".to_string()]);
    }

    #[test]
    fn test_header_line_contributes_no_tokens() {
        let table = parse_conventions("_Underscore Header:\n");
        assert_eq!(table["_Underscore Header"], Vec::<String>::new());
    }

    #[test]
    fn test_empty_text_yields_empty_table() {
        assert!(parse_conventions("").is_empty());
    }

    #[test]
    fn test_tokens_sorted_case_insensitively() {
        let table = parse_conventions("Oculus:\n_sbs, _180_LR, _TB, _3dh\n");
        assert_eq!(
            table["Oculus Video App"],
            vec![
                "_180_LR".to_string(),
                "_3dh".to_string(),
                "_sbs".to_string(),
                "_TB".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "Skybox VR:\n_LR, _TB = formats\nOculus:\n_SBS\n";
        assert_eq!(parse_conventions(text), parse_conventions(text));
    }
}
