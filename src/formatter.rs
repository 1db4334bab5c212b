//! Episode title and filename formatting
//!
//! Turns raw episode titles into a display title for container metadata and a
//! filesystem-safe token, and assembles the before/after filenames of each
//! episode. Everything in here is pure.

use crate::metadata_retrieval::SeasonRecord;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Container extension of the managed files
pub const EXTENSION: &str = "mkv";

/// A single `(pattern, replacement)` substitution, compiled on first use
pub struct Rule {
    pub name: &'static str,
    pattern: &'static str,
    replacement: &'static str,
    regex: OnceLock<Regex>,
}

impl Rule {
    const fn new(name: &'static str, pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern,
            replacement,
            regex: OnceLock::new(),
        }
    }

    fn regex(&self) -> &Regex {
        self.regex.get_or_init(|| {
            Regex::new(self.pattern)
                .unwrap_or_else(|e| panic!("Invalid regex for rule {}: {}", self.name, e))
        })
    }

    /// Replaces every match of this rule in `input`
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.regex().replace_all(input, self.replacement)
    }
}

/// Applies `rules` to `input` in order
fn apply_all(rules: &[Rule], input: &str) -> String {
    rules
        .iter()
        .fold(input.to_string(), |text, rule| rule.apply(&text).into_owned())
}

const SYMBOLS: &str = r#"[,:!@\#$%^\&*()+{}|\[\]\~;'"‘’“”<>?/]"#;

/// "Part 2: Foo" becomes "Part 2 - Foo" in the display title
static DISPLAY_RULES: [Rule; 1] = [Rule::new("part_marker", r"Part (\d+): ", "Part ${1} - ")];

/// Title to filename token, order matters.
pub static TOKEN_RULES: [Rule; 7] = [
    Rule::new("part_marker", r"Part (\d+): ", "-Part_${1}-"),
    Rule::new("strip_symbols", SYMBOLS, ""),
    Rule::new("ellipsis", r"\.{3,}", ""),
    Rule::new("double_dash", r" -- ", "-"),
    Rule::new("period_space", r"\. ", "_"),
    Rule::new("single_dash", r" - ", "-"),
    Rule::new("whitespace", r"\s+", "_"),
];

/// Show name to filename prefix.
static SHOW_RULES: [Rule; 3] = [
    Rule::new("strip_symbols", SYMBOLS, ""),
    Rule::new("whitespace", r"\s+", "_"),
    Rule::new("single_dash", r" - ", "-"),
];

/// Represents the planned tag + rename of one episode file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub season_number: u32,
    pub episode_number: u32,
    /// Human-readable title written into the container
    pub display_title: String,
    /// Expected current filename, e.g. `My_Show-S01E03.mkv`
    pub source_filename: String,
    /// New filename including the title token
    pub target_filename: String,
}

impl RenamePlan {
    /// True when the rename would not change the filename
    pub fn is_noop(&self) -> bool {
        self.source_filename == self.target_filename
    }
}

/// Cleans a raw title for use as container metadata
pub fn display_title(raw: &str) -> String {
    apply_all(&DISPLAY_RULES, raw)
}

/// Converts a raw title into a filesystem-safe token
///
/// Separators left dangling at either end (for example by a leading
/// "Part N:" marker) are trimmed.
pub fn filename_token(raw: &str) -> String {
    apply_all(&TOKEN_RULES, raw)
        .trim_matches(|c: char| c == '-' || c == '_')
        .to_string()
}

/// Converts the user supplied show name into the filename prefix
pub fn show_token(show_name: &str) -> String {
    apply_all(&SHOW_RULES, show_name.trim())
}

/// Renders a season or episode number with at least two digits
pub fn zero_pad(number: u32) -> String {
    format!("{:02}", number)
}

/// Builds the before/after filenames for one episode
///
/// Returns `(source, target)`. An empty title token leaves the name unchanged.
pub fn episode_filenames(
    show_token: &str,
    season: u32,
    episode: u32,
    title_token: &str,
) -> (String, String) {
    let stem = format!("{}-S{}E{}", show_token, zero_pad(season), zero_pad(episode));
    let source = format!("{}.{}", stem, EXTENSION);
    let target = if title_token.is_empty() {
        source.clone()
    } else {
        format!("{}-{}.{}", stem, title_token, EXTENSION)
    };
    (source, target)
}

/// Plans the tag + rename for every episode of a season, in input order
pub fn plan_renames(season: &SeasonRecord, show_name: &str) -> Vec<RenamePlan> {
    let prefix = show_token(show_name);

    season
        .episodes
        .iter()
        .map(|episode| {
            let (source_filename, target_filename) = episode_filenames(
                &prefix,
                season.season_number,
                episode.episode_number,
                &filename_token(&episode.name),
            );
            RenamePlan {
                season_number: season.season_number,
                episode_number: episode.episode_number,
                display_title: display_title(&episode.name),
                source_filename,
                target_filename,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata_retrieval::EpisodeRecord;

    const DENYLIST: &[char] = &[
        ',', ':', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '+', '{', '}', '|', '[', ']',
        '~', ';', '\'', '"', '‘', '’', '“', '”', '<', '>', '?', '/',
    ];

    const SAMPLE_TITLES: &[&str] = &[
        "Part 2: The Reckoning",
        "Hello, World! (Part One)",
        "Before -- After",
        "Mr. Robot",
        "Cat's in the Bag...",
        "Wait... What?",
        "“Quoted” ‘Title’",
        "A  lot   of\tspace",
        "The End - Part 3: Finale",
        "100% [Remastered] {Cut} <Extended> a/b ~ c; d @ e # f ^ g & h * i + j | k $",
        "",
    ];

    fn rule(name: &str) -> &'static Rule {
        TOKEN_RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn season(episodes: &[(u32, &str)]) -> SeasonRecord {
        SeasonRecord {
            id: 1,
            name: "Season 1".to_string(),
            air_date: None,
            season_number: 1,
            episodes: episodes
                .iter()
                .map(|(number, name)| EpisodeRecord {
                    season_number: 1,
                    episode_number: *number,
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_part_marker_scenario() {
        assert_eq!(display_title("Part 2: The Reckoning"), "Part 2 - The Reckoning");
        assert_eq!(filename_token("Part 2: The Reckoning"), "Part_2-The_Reckoning");

        let plans = plan_renames(&season(&[(3, "Part 2: The Reckoning")]), "My Show");
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].display_title, "Part 2 - The Reckoning");
        assert_eq!(plans[0].source_filename, "My_Show-S01E03.mkv");
        assert_eq!(
            plans[0].target_filename,
            "My_Show-S01E03-Part_2-The_Reckoning.mkv"
        );
    }

    #[test]
    fn test_part_marker_inside_title() {
        let raw = "The End Part 12: Finale";
        assert_eq!(display_title(raw), "The End Part 12 - Finale");
        assert!(filename_token(raw).contains("-Part_12-"));
        assert!(!filename_token(raw).contains("Part 12: "));
    }

    #[test]
    fn test_symbol_stripping_scenario() {
        assert_eq!(filename_token("Hello, World! (Part One)"), "Hello_World_Part_One");
    }

    #[test]
    fn test_double_dash_collapses_before_whitespace() {
        assert_eq!(filename_token("Before -- After"), "Before-After");
        assert_eq!(rule("double_dash").apply("a -- b"), "a-b");
    }

    #[test]
    fn test_individual_rules() {
        assert_eq!(rule("strip_symbols").apply("a,b:c!d?e/f"), "abcdef");
        assert_eq!(rule("strip_symbols").apply("“x” ‘y’ \"z\" 'w'"), "x y z w");
        assert_eq!(rule("strip_symbols").apply("snake_case-name"), "snake_case-name");
        assert_eq!(rule("ellipsis").apply("Wait... what.... now."), "Wait what now.");
        assert_eq!(rule("period_space").apply("Mr. Robot"), "Mr_Robot");
        assert_eq!(rule("single_dash").apply("One - Two"), "One-Two");
        assert_eq!(rule("whitespace").apply("a \t b\n\nc"), "a_b_c");
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = TOKEN_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "part_marker",
                "strip_symbols",
                "ellipsis",
                "double_dash",
                "period_space",
                "single_dash",
                "whitespace"
            ]
        );
    }

    #[test]
    fn test_ellipsis_and_period_space() {
        assert_eq!(filename_token("Cat's in the Bag..."), "Cats_in_the_Bag");
        assert_eq!(filename_token("Wait... What?"), "Wait_What");
        assert_eq!(filename_token("Mr. Robot"), "Mr_Robot");
    }

    #[test]
    fn test_tokens_are_clean() {
        for title in SAMPLE_TITLES {
            let token = filename_token(title);

            assert!(
                !token.contains(DENYLIST),
                "token {:?} of {:?} contains a denylisted symbol",
                token,
                title
            );
            assert!(!token.contains("..."), "token {:?} contains an ellipsis", token);
            assert!(!token.contains(" -- "));
            assert!(!token.chars().any(char::is_whitespace));
            assert_eq!(rule("whitespace").apply(&token), token);
        }
    }

    #[test]
    fn test_show_token() {
        assert_eq!(show_token("My Show"), "My_Show");
        assert_eq!(show_token("  Spaced   Out  "), "Spaced_Out");
        assert_eq!(show_token("Law & Order: SVU"), "Law_Order_SVU");
    }

    #[test]
    fn test_zero_pad() {
        for n in 0..10 {
            assert_eq!(zero_pad(n), format!("0{}", n));
        }
        assert_eq!(zero_pad(10), "10");
        assert_eq!(zero_pad(42), "42");
        assert_eq!(zero_pad(123), "123");
    }

    #[test]
    fn test_empty_title_keeps_name() {
        let (source, target) = episode_filenames("Show", 2, 11, "");
        assert_eq!(source, "Show-S02E11.mkv");
        assert_eq!(target, source);

        let plans = plan_renames(&season(&[(1, "?!")]), "Show");
        assert!(plans[0].is_noop());
    }

    #[test]
    fn test_target_extends_source_stem() {
        for title in SAMPLE_TITLES {
            let plans = plan_renames(&season(&[(7, title)]), "Some Show");
            let plan = &plans[0];
            let stem = plan.source_filename.trim_end_matches(".mkv");

            assert!(plan.target_filename.starts_with(stem));
            assert!(plan.target_filename.ends_with(".mkv"));
            assert!(!plan.source_filename.contains(DENYLIST));
            assert!(!plan.target_filename.contains(DENYLIST));
        }
    }

    #[test]
    fn test_plan_is_deterministic_and_ordered() {
        let record = season(&[(2, "Second"), (1, "First"), (10, "Tenth")]);
        let first = plan_renames(&record, "Show");
        let second = plan_renames(&record, "Show");

        assert_eq!(first, second);
        let sources: Vec<&str> = first.iter().map(|p| p.source_filename.as_str()).collect();
        assert_eq!(
            sources,
            vec!["Show-S01E02.mkv", "Show-S01E01.mkv", "Show-S01E10.mkv"]
        );
    }
}
