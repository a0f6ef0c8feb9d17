//! Markdown to preview blocks.
//!
//! The preview pane does not render HTML; it walks pulldown-cmark events and
//! produces a flat list of blocks with styled inline runs that a UI toolkit
//! can lay out directly.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A span of text with uniform styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineRun {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    /// Link or image destination.
    pub link: Option<String>,
    /// Alt text of an image rather than body text.
    pub image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Ordered(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewBlock {
    Heading {
        level: u8,
        runs: Vec<InlineRun>,
    },
    Paragraph(Vec<InlineRun>),
    ListItem {
        marker: ListMarker,
        /// Nesting depth, zero for top-level items.
        depth: usize,
        runs: Vec<InlineRun>,
    },
    Quote(Vec<InlineRun>),
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    Rule,
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl PreviewBlock {
    /// Plain text of the block, without styling.
    pub fn plain_text(&self) -> String {
        fn join(runs: &[InlineRun]) -> String {
            runs.iter().map(|run| run.text.as_str()).collect()
        }
        match self {
            Self::Heading { runs, .. } | Self::ListItem { runs, .. } => join(runs),
            Self::Paragraph(runs) | Self::Quote(runs) => join(runs),
            Self::CodeBlock { text, .. } => text.clone(),
            Self::Rule => String::new(),
            Self::Table { header, rows } => std::iter::once(header)
                .chain(rows.iter())
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct InlineStyle {
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    underline: usize,
}

#[derive(Debug)]
enum OpenBlock {
    Heading(u8),
    Paragraph,
    Item(ListMarker, usize),
    Quote,
}

#[derive(Debug, Default)]
struct TableState {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    in_head: bool,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<PreviewBlock>,
    open: Option<OpenBlock>,
    runs: Vec<InlineRun>,
    style: InlineStyle,
    links: Vec<String>,
    image: Option<String>,
    lists: Vec<Option<u64>>,
    pending_item: Option<(ListMarker, usize)>,
    quote_depth: usize,
    code: Option<(Option<String>, String)>,
    table: Option<TableState>,
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| lang.split(',').next().unwrap_or(lang).to_string())
        .filter(|lang| !lang.is_empty())
}

impl Builder {
    fn flush(&mut self) {
        let Some(open) = self.open.take() else {
            self.runs.clear();
            return;
        };
        let runs = std::mem::take(&mut self.runs);
        if runs.iter().all(|run| run.text.trim().is_empty()) {
            return;
        }
        self.blocks.push(match open {
            OpenBlock::Heading(level) => PreviewBlock::Heading { level, runs },
            OpenBlock::Paragraph => PreviewBlock::Paragraph(runs),
            OpenBlock::Item(marker, depth) => PreviewBlock::ListItem {
                marker,
                depth,
                runs,
            },
            OpenBlock::Quote => PreviewBlock::Quote(runs),
        });
    }

    fn ensure_open(&mut self) {
        if self.open.is_some() {
            return;
        }
        self.open = Some(if let Some((marker, depth)) = self.pending_item.take() {
            OpenBlock::Item(marker, depth)
        } else if self.quote_depth > 0 {
            OpenBlock::Quote
        } else {
            OpenBlock::Paragraph
        });
    }

    fn push_text(&mut self, text: &str, code: bool) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        self.ensure_open();
        let run = InlineRun {
            text: text.to_string(),
            strong: self.style.strong > 0,
            emphasis: self.style.emphasis > 0,
            strikethrough: self.style.strikethrough > 0,
            underline: self.style.underline > 0,
            code,
            link: self.image.clone().or_else(|| self.links.last().cloned()),
            image: self.image.is_some(),
        };
        match self.runs.last_mut() {
            Some(last) if !code && !last.code && same_style(last, &run) => {
                last.text.push_str(&run.text);
            }
            _ => self.runs.push(run),
        }
    }

    fn next_item_marker(&mut self) -> (ListMarker, usize) {
        let depth = self.lists.len().saturating_sub(1);
        let marker = match self.lists.last_mut() {
            Some(Some(next)) => {
                let marker = ListMarker::Ordered(*next);
                *next = next.saturating_add(1);
                marker
            }
            _ => ListMarker::Bullet,
        };
        (marker, depth)
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.ensure_open(),
            Tag::Heading { level, .. } => {
                self.flush();
                self.open = Some(OpenBlock::Heading(heading_level(level)));
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((language, String::new()));
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                self.pending_item = Some(self.next_item_marker());
            }
            Tag::Table(_) => {
                self.flush();
                self.table = Some(TableState::default());
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            Tag::Emphasis => self.style.emphasis += 1,
            Tag::Strong => self.style.strong += 1,
            Tag::Strikethrough => self.style.strikethrough += 1,
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            Tag::Image { dest_url, .. } => self.image = Some(dest_url.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.flush(),
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((language, mut text)) = self.code.take() {
                    if text.ends_with('\n') {
                        text.pop();
                    }
                    self.blocks.push(PreviewBlock::CodeBlock { language, text });
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => {
                self.flush();
                self.pending_item = None;
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                    table.in_head = false;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.in_head {
                        let row = std::mem::take(&mut table.row);
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(PreviewBlock::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            TagEnd::Emphasis => self.style.emphasis = self.style.emphasis.saturating_sub(1),
            TagEnd::Strong => self.style.strong = self.style.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.style.strikethrough = self.style.strikethrough.saturating_sub(1);
            }
            TagEnd::Link => {
                self.links.pop();
            }
            TagEnd::Image => self.image = None,
            _ => {}
        }
    }

    fn inline_html(&mut self, html: &str) {
        match html.trim().to_ascii_lowercase().as_str() {
            "<u>" => self.style.underline += 1,
            "</u>" => self.style.underline = self.style.underline.saturating_sub(1),
            "<br>" | "<br/>" | "<br />" => self.push_text("\n", false),
            _ => self.push_text(html, false),
        }
    }

    fn finish(mut self) -> Vec<PreviewBlock> {
        self.flush();
        self.blocks
    }
}

fn same_style(a: &InlineRun, b: &InlineRun) -> bool {
    a.strong == b.strong
        && a.emphasis == b.emphasis
        && a.strikethrough == b.strikethrough
        && a.underline == b.underline
        && a.link == b.link
        && a.image == b.image
}

/// Parse `markdown` into preview blocks.
///
/// Tables and strikethrough are enabled. Raw HTML is shown as text except for
/// `<u>` underline and `<br>` line breaks, which the toolbar can produce.
pub fn render_preview(markdown: &str) -> Vec<PreviewBlock> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut builder = Builder::default();
    for event in Parser::new_ext(markdown, options) {
        if builder.code.is_some() {
            match event {
                Event::Text(chunk) => {
                    if let Some((_, text)) = builder.code.as_mut() {
                        text.push_str(&chunk);
                    }
                }
                Event::End(TagEnd::CodeBlock) => builder.end(TagEnd::CodeBlock),
                _ => {}
            }
            continue;
        }
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(tag) => builder.end(tag),
            Event::Text(text) => builder.push_text(&text, false),
            Event::Code(text) => builder.push_text(&text, true),
            Event::SoftBreak => builder.push_text(" ", false),
            Event::HardBreak => builder.push_text("\n", false),
            Event::Rule => {
                builder.flush();
                builder.blocks.push(PreviewBlock::Rule);
            }
            Event::InlineHtml(html) => builder.inline_html(&html),
            Event::Html(html) => {
                let trimmed = html.trim_end_matches('\n');
                if !trimmed.is_empty() {
                    builder.push_text(trimmed, false);
                }
            }
            Event::TaskListMarker(checked) => {
                builder.push_text(if checked { "[x] " } else { "[ ] " }, false);
            }
            _ => {}
        }
    }
    builder.finish()
}
