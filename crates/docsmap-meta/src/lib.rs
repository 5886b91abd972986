//! Front matter and Markdown metadata extraction for docsmap.
//!
//! A document's index metadata comes from two places:
//! - the YAML front matter block at the top of the file ([`FrontMatter`]), and
//! - the Markdown body: the first H1 heading and the first top-level
//!   paragraph, used when the front matter does not set a title or
//!   description.
//!
//! [`extract`] parses both in one pass over the `pulldown-cmark` event stream.

mod front_matter;

use pulldown_cmark::{Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd};

pub use front_matter::{FrontMatter, FrontMatterError};

/// Metadata extracted from one Markdown document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentMeta {
    /// Parsed front matter (default when the document has none).
    pub front_matter: FrontMatter,
    /// Plain text of the first H1 heading.
    pub heading: Option<String>,
    /// Plain text of the first top-level paragraph.
    pub first_paragraph: Option<String>,
}

impl DocumentMeta {
    /// Resolved title: front matter `title` > first H1.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.front_matter
            .title
            .as_deref()
            .or(self.heading.as_deref())
    }

    /// Resolved description: front matter `description` > first paragraph.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.front_matter
            .description
            .as_deref()
            .or(self.first_paragraph.as_deref())
    }
}

/// What the walker is currently collecting text for.
enum Capture {
    None,
    FrontMatter,
    Heading,
    Paragraph,
}

/// Extract front matter, first H1 and first paragraph from Markdown.
///
/// # Errors
///
/// Returns [`FrontMatterError`] if the front matter block is not valid YAML
/// or declares an invalid `id`.
pub fn extract(content: &str) -> Result<DocumentMeta, FrontMatterError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut front_matter_src = String::new();
    let mut heading: Option<String> = None;
    let mut first_paragraph: Option<String> = None;

    let mut capture = Capture::None;
    let mut buf = String::new();
    // Open blocks that make a paragraph non top-level (lists, quotes, ...).
    let mut container_depth = 0usize;

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                capture = Capture::FrontMatter;
            }
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                capture = Capture::None;
            }
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if heading.is_none() => {
                capture = Capture::Heading;
                buf.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if matches!(capture, Capture::Heading) {
                    heading = non_empty(&buf);
                    capture = Capture::None;
                }
            }
            Event::Start(Tag::Paragraph) if container_depth == 0 && first_paragraph.is_none() => {
                capture = Capture::Paragraph;
                buf.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                if matches!(capture, Capture::Paragraph) {
                    capture = Capture::None;
                    if !is_module_statement(&buf) {
                        first_paragraph = non_empty(&buf);
                    }
                }
            }
            Event::Start(
                Tag::BlockQuote(_) | Tag::List(_) | Tag::Table(_) | Tag::FootnoteDefinition(_),
            ) => container_depth += 1,
            Event::End(
                TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Table | TagEnd::FootnoteDefinition,
            ) => container_depth = container_depth.saturating_sub(1),
            Event::Text(text) => match capture {
                Capture::FrontMatter => front_matter_src.push_str(&text),
                Capture::Heading | Capture::Paragraph => buf.push_str(&text),
                Capture::None => {}
            },
            Event::Code(code) => {
                if matches!(capture, Capture::Heading | Capture::Paragraph) {
                    buf.push_str(&code);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if matches!(capture, Capture::Heading | Capture::Paragraph) {
                    buf.push(' ');
                }
            }
            _ => {}
        }

        if heading.is_some() && first_paragraph.is_some() && matches!(capture, Capture::None) {
            break;
        }
    }

    Ok(DocumentMeta {
        front_matter: FrontMatter::from_yaml(&front_matter_src)?,
        heading,
        first_paragraph,
    })
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// MDX `import`/`export` lines parse as paragraphs but are not prose.
fn is_module_statement(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with("import ") || text.starts_with("export ")
}
