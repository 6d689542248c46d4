//! Deterministic cleanup of raw OCR output into consistent markdown.
//!
//! Vision-model output tends to carry formatting noise: stacked blank
//! lines, runs of alignment spaces, ragged line endings. `normalize`
//! applies a small ordered set of pure rules; it is total and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_HSPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Rules, applied in order:
/// 1. collapse runs of 3+ newlines to exactly 2 (keep paragraph breaks)
/// 2. collapse runs of spaces/tabs to a single space
/// 3. trim each line that does not open a markdown block construct;
///    whitespace-only lines become blank lines
/// 4. trim leading/trailing whitespace from the result
///
/// Empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let collapsed = RE_EXCESS_NEWLINES.replace_all(text, "\n\n");
    let collapsed = RE_HSPACE_RUNS.replace_all(&collapsed, " ");
    let terminated = terminate_lines(&collapsed);
    // Blanking a whitespace-only line can merge adjacent paragraph breaks
    // into a longer newline run, so the collapse pass runs once more.
    let recollapsed = RE_EXCESS_NEWLINES.replace_all(&terminated, "\n\n");
    recollapsed.trim().to_string()
}

/// Block-construct lines keep their exact form; prose lines are trimmed so
/// each ends cleanly at its own line break.
fn terminate_lines(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else if is_block_construct(line) {
                line
            } else {
                line.trim()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Headings, list items (`-`/`*`/digit-dot), blockquotes, and fence
/// delimiters.
fn is_block_construct(line: &str) -> bool {
    let lead = line.trim_start();
    if lead.starts_with('#') || lead.starts_with('>') || lead.starts_with("```") {
        return true;
    }
    if lead.starts_with("- ") || lead.starts_with("* ") {
        return true;
    }
    is_ordered_list_item(lead)
}

fn is_ordered_list_item(lead: &str) -> bool {
    let digits = lead.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && lead[digits..].starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn whitespace_only_input_yields_empty_output() {
        assert_eq!(normalize("  \n\t\n   \n"), "");
    }

    #[test]
    fn collapses_excess_blank_lines() {
        assert_eq!(normalize("Hello\n\n\n\nWorld"), "Hello\n\nWorld");
    }

    #[test]
    fn preserves_single_paragraph_break() {
        assert_eq!(normalize("Hello\n\nWorld"), "Hello\n\nWorld");
    }

    #[test]
    fn collapses_horizontal_whitespace() {
        assert_eq!(normalize("a  b\t\tc \t d"), "a b c d");
    }

    #[test]
    fn trims_prose_lines() {
        assert_eq!(normalize("  some text  \n more text "), "some text\nmore text");
    }

    #[test]
    fn keeps_block_constructs_intact() {
        let input = "# Title\n\n- item one\n- item two\n\n> quoted\n\n1. first\n2. second";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn fence_delimiters_are_block_constructs() {
        let input = "```\ncode here\n```";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn provider_markdown_passes_through() {
        assert_eq!(normalize("# Title\n\nBody text"), "# Title\n\nBody text");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("\n\n\nHello\n\n\n"), "Hello");
    }

    #[test]
    fn whitespace_only_line_between_blanks_collapses() {
        let input = "x\n\n \n\ny";
        let once = normalize(input);
        assert_eq!(once, "x\n\ny");
        assert!(!once.contains("\n\n\n"));
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn idempotent_on_varied_inputs() {
        let inputs = [
            "Hello\n\n\n\nWorld",
            "  ragged   text \t with\truns  ",
            "# H1\nprose   here\n\n\n- list\n\n> quote\n\n```\nlet x = 1;\n```",
            "",
            "1. one\n10. ten\n100. hundred",
            "\t\n  \nmixed\n   blank\t\n",
            "x\n\n \n\ny",
            "a\n\n\t\n\n \n\nb",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn never_emits_three_consecutive_newlines() {
        let inputs = [
            "a\n\n\n\n\n\nb\n\n\nc",
            "\n\n\n\n",
            "x\n\n\n \n\n\ny",
            "x\n\n \n\ny",
            "p\n\n \n\n\t\n\nq",
        ];
        for input in inputs {
            assert!(
                !normalize(input).contains("\n\n\n"),
                "excess newlines survived for {input:?}"
            );
        }
    }

    #[test]
    fn never_expands_input() {
        let inputs = [
            "Hello\n\n\n\nWorld",
            "  lots   of   space   ",
            "# heading\nbody",
            "plain",
        ];
        for input in inputs {
            assert!(normalize(input).len() <= input.len());
        }
    }

    #[test]
    fn digit_dot_requires_leading_digits() {
        // ".5 degrees" is prose, not an ordered list item.
        assert!(!is_ordered_list_item(".5 degrees"));
        assert!(is_ordered_list_item("3. step"));
        assert!(is_ordered_list_item("12."));
    }
}
