//! One quiz round: pick a block and a line, blank it, prompt, grade.

use crate::diff::{char_diff, DiffSegment, DiffTag};
use crate::extractor::CodeResource;
use crate::highlight::Highlighter;
use crate::prompt::AnswerPrompt;
use anyhow::Result;
use console::style;
use rand::Rng;
use std::path::Path;

/// Placeholder substituted for the blanked line.
pub const CLOZE_PLACEHOLDER: &str = "// =====???=====";

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct,
    Incorrect,
    /// The prompt was aborted; nothing was graded.
    NoAnswer,
}

/// Result of comparing the typed answer to the expected line.
#[derive(Debug, Clone, PartialEq)]
pub enum Grade {
    Correct,
    Incorrect(Vec<DiffSegment>),
}

/// A selected resource and line, ready to present.
pub struct Round<'a> {
    resource: &'a CodeResource,
    lines: Vec<&'a str>,
    line_index: usize,
}

impl<'a> Round<'a> {
    /// Build a round over a specific line of `resource`.
    ///
    /// `line_index` must be within the block's lines; even an empty block
    /// has one (empty) line.
    pub fn new(resource: &'a CodeResource, line_index: usize) -> Self {
        let lines: Vec<&str> = resource.code.split('\n').collect();
        debug_assert!(line_index < lines.len());
        Self {
            resource,
            lines,
            line_index,
        }
    }

    /// Pick a resource and a line within it, both uniformly at random.
    ///
    /// `resources` must be non-empty.
    pub fn pick(resources: &'a [CodeResource], rng: &mut impl Rng) -> Self {
        let resource = &resources[rng.gen_range(0..resources.len())];
        let line_count = resource.code.split('\n').count();
        let round = Self::new(resource, rng.gen_range(0..line_count));

        log::debug!(
            "picked block #{} of {} (line {} of {})",
            round.resource.sequence_index,
            round.resource.source_path.display(),
            round.line_index,
            round.line_count()
        );
        round
    }

    pub fn resource(&self) -> &CodeResource {
        self.resource
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line the user is asked to recall.
    pub fn expected(&self) -> &str {
        self.lines[self.line_index]
    }

    /// The block with the selected line blanked out.
    pub fn cloze_text(&self) -> String {
        let mut shown = self.lines.clone();
        shown[self.line_index] = CLOZE_PLACEHOLDER;
        shown.join("\n")
    }
}

/// Compare exactly; no trimming, no case folding.
pub fn grade(expected: &str, answer: &str) -> Grade {
    if answer == expected {
        Grade::Correct
    } else {
        Grade::Incorrect(char_diff(expected, answer))
    }
}

/// Header shown above the cloze: the heading (or `unnamed`) plus the
/// source path, relative to `base_dir` when it is a prefix.
pub fn render_header(resource: &CodeResource, base_dir: &Path) -> String {
    let heading = resource.heading.as_deref().unwrap_or("unnamed");
    let path = resource
        .source_path
        .strip_prefix(base_dir)
        .unwrap_or(&resource.source_path);
    format!("{} ({})", heading, path.display())
}

/// Color a diff for the terminal: expected-only text red, answer-only text
/// green, shared text dim.
pub fn render_diff(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|seg| match seg.tag {
            DiffTag::Removed => style(&seg.text).red().to_string(),
            DiffTag::Added => style(&seg.text).green().to_string(),
            DiffTag::Unchanged => style(&seg.text).dim().to_string(),
        })
        .collect()
}

/// Legend for the diff colors, printed above it.
pub fn render_legend() -> String {
    format!(
        "  {}\n  {}",
        style("expected").red(),
        style("actual").green()
    )
}

/// Run one round: present a random cloze, collect one answer, grade it.
///
/// The caller guarantees `resources` is non-empty. The prompt is the only
/// point the round blocks on; aborting it ends the round early with
/// [`RoundOutcome::NoAnswer`] and is not an error.
pub fn run_round(
    resources: &[CodeResource],
    rng: &mut impl Rng,
    prompt: &mut dyn AnswerPrompt,
    base_dir: &Path,
) -> Result<RoundOutcome> {
    let round = Round::pick(resources, rng);
    let language_tag = round.resource().language_tag.as_deref();
    let highlighter = Highlighter::new();

    println!("\n{}\n", render_header(round.resource(), base_dir));
    println!("{}", highlighter.render(&round.cloze_text(), language_tag));
    println!();

    let Some(answer) = prompt.ask("missing line")? else {
        eprintln!("no answer");
        return Ok(RoundOutcome::NoAnswer);
    };

    match grade(round.expected(), &answer) {
        Grade::Correct => {
            println!("{}", style("correct").green());
            Ok(RoundOutcome::Correct)
        }
        Grade::Incorrect(segments) => {
            println!("{}\n", render_legend());
            println!("{}\n", render_diff(&segments));
            println!("{}", highlighter.render(&round.resource().code, language_tag));
            Ok(RoundOutcome::Incorrect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn resource(code: &str) -> CodeResource {
        CodeResource {
            source_path: PathBuf::from("/notes/test.md"),
            sequence_index: 0,
            heading: Some("# Test".to_string()),
            code: code.to_string(),
            language_tag: Some("js".to_string()),
        }
    }

    #[test]
    fn test_pick_stays_in_bounds() {
        let resources = vec![resource("a\nb\nc"), resource("x"), resource("")];
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = Round::pick(&resources, &mut rng);
            assert!(round.line_index() < round.line_count());
        }
    }

    #[test]
    fn test_cloze_preserves_line_count() {
        let res = resource("one\ntwo\nthree");
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let round = Round::pick(std::slice::from_ref(&res), &mut rng);
            let cloze = round.cloze_text();
            assert_eq!(cloze.split('\n').count(), round.line_count());
            assert!(cloze.contains(CLOZE_PLACEHOLDER));
        }
    }

    #[test]
    fn test_forced_line_is_blanked() {
        let res = resource("x\ny\nz");
        let round = Round::new(&res, 1);
        assert_eq!(round.expected(), "y");
        assert_eq!(round.cloze_text(), format!("x\n{CLOZE_PLACEHOLDER}\nz"));
    }

    #[test]
    fn test_empty_block_has_one_empty_line() {
        let res = resource("");
        let round = Round::new(&res, 0);
        assert_eq!(round.line_count(), 1);
        assert_eq!(round.expected(), "");
        assert_eq!(round.cloze_text(), CLOZE_PLACEHOLDER);
    }

    #[test]
    fn test_exact_match_is_correct() {
        assert_eq!(grade("y", "y"), Grade::Correct);
    }

    #[test]
    fn test_no_trimming_or_case_folding() {
        assert!(matches!(grade("y", " y"), Grade::Incorrect(_)));
        assert!(matches!(grade("y", "Y"), Grade::Incorrect(_)));
    }

    #[test]
    fn test_mismatch_reports_minimal_edit() {
        let Grade::Incorrect(segments) = grade("y", "w") else {
            panic!("expected a mismatch");
        };
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "y");
        assert_eq!(segments[0].tag, DiffTag::Removed);
        assert_eq!(segments[1].text, "w");
        assert_eq!(segments[1].tag, DiffTag::Added);
    }

    #[test]
    fn test_header_uses_heading_and_relative_path() {
        let mut res = resource("x");
        res.source_path = PathBuf::from("/notes/deep/test.md");
        let header = render_header(&res, Path::new("/notes"));
        assert_eq!(header, "# Test (deep/test.md)");
    }

    #[test]
    fn test_header_falls_back_to_unnamed_and_full_path() {
        let mut res = resource("x");
        res.heading = None;
        let header = render_header(&res, Path::new("/elsewhere"));
        assert_eq!(header, "unnamed (/notes/test.md)");
    }

    #[test]
    fn test_diff_rendering_contains_both_sides() {
        let Grade::Incorrect(segments) = grade("expected_line", "typed_line") else {
            panic!("expected a mismatch");
        };
        let rendered = render_diff(&segments);
        let plain = console::strip_ansi_codes(&rendered);
        // Every character of both lines appears in the rendered diff.
        assert!(plain.contains("line"));
        assert!(plain.contains("expected_line".chars().next().unwrap()));
        assert!(plain.contains("typed_line".chars().next().unwrap()));
    }
}
