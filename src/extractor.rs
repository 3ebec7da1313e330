use anyhow::{Context, Result};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use std::fs;
use std::path::{Path, PathBuf};

/// A fenced code block pulled out of a Markdown file, together with the
/// context a quiz round needs to present it.
///
/// Blocks are identified by fenced code syntax:
///
/// ````markdown
/// # Iterators
///
/// ```rust
/// let sum: i32 = (1..=3).sum();
/// ```
/// ````
///
/// The nearest preceding top-level heading travels with the block, so the
/// quiz can show where the snippet came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeResource {
    /// File the block came from.
    pub source_path: PathBuf,
    /// 0-based position among the code blocks of that file.
    pub sequence_index: usize,
    /// Nearest preceding top-level heading, re-serialized as Markdown.
    pub heading: Option<String>,
    /// Verbatim block content, without fence markers or a trailing newline.
    pub code: String,
    /// Language identifier from the fence, e.g. `js`.
    pub language_tag: Option<String>,
}

/// Read and extract every file in `paths`, in order.
///
/// Resources keep input-file order, then document order within a file. A
/// file without code blocks contributes nothing; an unreadable file fails
/// the whole run.
pub fn extract_files(paths: &[PathBuf]) -> Result<Vec<CodeResource>> {
    let mut resources = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let found = extract(&content, path);
        log::debug!("{}: {} code block(s)", path.display(), found.len());
        resources.extend(found);
    }
    Ok(resources)
}

/// Extract the top-level fenced code blocks of one Markdown document.
pub fn extract(content: &str, source_path: &Path) -> Vec<CodeResource> {
    Walker::new(source_path).run(Parser::new(content))
}

struct HeadingBuilder {
    level: HeadingLevel,
    text: String,
}

struct CodeBuilder {
    language_tag: Option<String>,
    text: String,
}

/// Event walk over one document.
///
/// Carries the nearest top-level heading as running context for the blocks
/// that follow it; a later heading overwrites it regardless of level.
/// Headings and fences nested inside block containers (lists, quotes,
/// tables) are ignored, as are indented code blocks.
struct Walker<'p> {
    source_path: &'p Path,
    resources: Vec<CodeResource>,
    current_heading: Option<String>,
    sequence_index: usize,
    /// Count of currently open tags; zero means document top level.
    open_tags: usize,
    heading: Option<HeadingBuilder>,
    code: Option<CodeBuilder>,
}

impl<'p> Walker<'p> {
    fn new(source_path: &'p Path) -> Self {
        Self {
            source_path,
            resources: Vec::new(),
            current_heading: None,
            sequence_index: 0,
            open_tags: 0,
            heading: None,
            code: None,
        }
    }

    fn run(mut self, parser: Parser) -> Vec<CodeResource> {
        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) if self.open_tags == 0 => {
                    self.heading = Some(HeadingBuilder {
                        level,
                        text: String::new(),
                    });
                    self.open_tags += 1;
                }

                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                    if self.open_tags == 0 =>
                {
                    self.code = Some(CodeBuilder {
                        language_tag: parse_fence_info(info.as_ref()),
                        text: String::new(),
                    });
                    self.open_tags += 1;
                }

                Event::Start(_) => self.open_tags += 1,

                Event::End(end) => {
                    self.open_tags = self.open_tags.saturating_sub(1);
                    match end {
                        TagEnd::Heading(_) => {
                            if let Some(heading) = self.heading.take() {
                                self.current_heading =
                                    Some(serialize_heading(heading.level, &heading.text));
                            }
                        }
                        TagEnd::CodeBlock => {
                            if let Some(code) = self.code.take() {
                                self.emit(code);
                            }
                        }
                        _ => {}
                    }
                }

                Event::Text(text) => {
                    if let Some(code) = self.code.as_mut() {
                        code.text.push_str(&text);
                    } else if let Some(heading) = self.heading.as_mut() {
                        heading.text.push_str(&text);
                    }
                }

                Event::Code(text) => {
                    if let Some(heading) = self.heading.as_mut() {
                        heading.text.push('`');
                        heading.text.push_str(&text);
                        heading.text.push('`');
                    }
                }

                Event::SoftBreak | Event::HardBreak => {
                    if let Some(heading) = self.heading.as_mut() {
                        heading.text.push(' ');
                    }
                }

                _ => {}
            }
        }

        self.resources
    }

    fn emit(&mut self, code: CodeBuilder) {
        // pulldown-cmark reports fenced content with a trailing newline;
        // the block's literal text has none.
        let text = code.text.strip_suffix('\n').unwrap_or(&code.text);

        self.resources.push(CodeResource {
            source_path: self.source_path.to_path_buf(),
            sequence_index: self.sequence_index,
            heading: self.current_heading.clone(),
            code: text.to_string(),
            language_tag: code.language_tag,
        });
        self.sequence_index += 1;
    }
}

/// Serialize a heading back to Markdown ATX text, e.g. `## Setup`.
fn serialize_heading(level: HeadingLevel, text: &str) -> String {
    let marker = "#".repeat(heading_depth(level));
    let text = text.trim();
    if text.is_empty() {
        marker
    } else {
        format!("{marker} {text}")
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Language tag from a fence info string: the first whitespace token, with
/// comma-separated attributes stripped.
///
/// Examples:
/// - "js" -> Some("js")
/// - "rust,ignore" -> Some("rust")
/// - "" -> None
fn parse_fence_info(info: &str) -> Option<String> {
    let tag = info.split_whitespace().next()?.split(',').next()?;
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}
