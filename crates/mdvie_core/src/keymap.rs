//! Editor commands, toolbar snippets and the Ctrl-chord table.

use crate::session::ViewMode;

/// Markdown constructs the toolbar can append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetKind {
    Bold,
    Italic,
    Underline,
    Heading,
    Quote,
    UnorderedList,
    OrderedList,
    Link,
    Image,
    CodeBlock,
    Table,
}

/// Pieces appended as `prefix + placeholder + suffix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub placeholder: &'static str,
}

const TABLE_SKELETON: &str = "| Header 1 | Header 2 | Header 3 |\n\
                              | --- | --- | --- |\n\
                              | Row 1 | Data | Data |\n\
                              | Row 2 | Data | Data |\n";

impl SnippetKind {
    /// Toolbar order, grouped the way the toolbar renders them.
    pub const ALL: [SnippetKind; 11] = [
        SnippetKind::Bold,
        SnippetKind::Italic,
        SnippetKind::Underline,
        SnippetKind::Heading,
        SnippetKind::Quote,
        SnippetKind::UnorderedList,
        SnippetKind::OrderedList,
        SnippetKind::Link,
        SnippetKind::Image,
        SnippetKind::CodeBlock,
        SnippetKind::Table,
    ];

    pub fn snippet(self) -> Snippet {
        let (prefix, suffix, placeholder) = match self {
            Self::Bold => ("**", "**", "bold text"),
            Self::Italic => ("*", "*", "italic text"),
            Self::Underline => ("<u>", "</u>", "underlined text"),
            Self::Heading => ("## ", "\n", "Heading"),
            Self::Quote => ("> ", "\n", "Quote"),
            Self::UnorderedList => ("- ", "\n", "List item"),
            Self::OrderedList => ("1. ", "\n", "Ordered list item"),
            Self::Link => ("[", "](url)", "link text"),
            Self::Image => ("![", "](image-url)", "alt text"),
            Self::CodeBlock => ("```\n", "\n```", "code block"),
            Self::Table => (TABLE_SKELETON, "", ""),
        };
        Snippet {
            prefix,
            suffix,
            placeholder,
        }
    }

    /// Short toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Underline => "U",
            Self::Heading => "H",
            Self::Quote => "\u{201c}",
            Self::UnorderedList => "\u{2022}",
            Self::OrderedList => "1.",
            Self::Link => "Link",
            Self::Image => "Img",
            Self::CodeBlock => "</>",
            Self::Table => "Table",
        }
    }

    /// Hover text, including the shortcut when one exists.
    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Bold => "Bold (Ctrl+B)",
            Self::Italic => "Italic (Ctrl+I)",
            Self::Underline => "Underline",
            Self::Heading => "Heading",
            Self::Quote => "Quote",
            Self::UnorderedList => "Bulleted list",
            Self::OrderedList => "Numbered list",
            Self::Link => "Link (Ctrl+K)",
            Self::Image => "Image",
            Self::CodeBlock => "Code block",
            Self::Table => "Table",
        }
    }
}

/// Everything an editor session can be asked to do by toolbar or keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Insert(SnippetKind),
    SetView(ViewMode),
    Save,
    Export,
}

/// A key press with its Ctrl state. Letters are compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl: bool,
    pub key: char,
}

impl KeyChord {
    pub fn ctrl(key: char) -> Self {
        Self { ctrl: true, key }
    }

    pub fn plain(key: char) -> Self {
        Self { ctrl: false, key }
    }
}

/// The fixed Ctrl-chord table.
pub const SHORTCUTS: [(char, EditorCommand); 7] = [
    ('b', EditorCommand::Insert(SnippetKind::Bold)),
    ('i', EditorCommand::Insert(SnippetKind::Italic)),
    ('k', EditorCommand::Insert(SnippetKind::Link)),
    ('1', EditorCommand::SetView(ViewMode::Edit)),
    ('2', EditorCommand::SetView(ViewMode::Preview)),
    ('3', EditorCommand::SetView(ViewMode::Split)),
    ('s', EditorCommand::Save),
];

/// Command bound to `chord`, if any. Chords without Ctrl never match.
pub fn command_for(chord: KeyChord) -> Option<EditorCommand> {
    if !chord.ctrl {
        return None;
    }
    let key = chord.key.to_ascii_lowercase();
    SHORTCUTS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, command)| *command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_maps_every_documented_chord() {
        assert_eq!(
            command_for(KeyChord::ctrl('b')),
            Some(EditorCommand::Insert(SnippetKind::Bold))
        );
        assert_eq!(
            command_for(KeyChord::ctrl('I')),
            Some(EditorCommand::Insert(SnippetKind::Italic))
        );
        assert_eq!(
            command_for(KeyChord::ctrl('k')),
            Some(EditorCommand::Insert(SnippetKind::Link))
        );
        assert_eq!(
            command_for(KeyChord::ctrl('1')),
            Some(EditorCommand::SetView(ViewMode::Edit))
        );
        assert_eq!(
            command_for(KeyChord::ctrl('2')),
            Some(EditorCommand::SetView(ViewMode::Preview))
        );
        assert_eq!(
            command_for(KeyChord::ctrl('3')),
            Some(EditorCommand::SetView(ViewMode::Split))
        );
        assert_eq!(command_for(KeyChord::ctrl('s')), Some(EditorCommand::Save));
    }

    #[test]
    fn unbound_or_plain_keys_are_ignored() {
        assert_eq!(command_for(KeyChord::plain('b')), None);
        assert_eq!(command_for(KeyChord::ctrl('z')), None);
        assert_eq!(command_for(KeyChord::ctrl('4')), None);
    }

    #[test]
    fn snippets_match_toolbar_syntax() {
        let link = SnippetKind::Link.snippet();
        assert_eq!((link.prefix, link.suffix), ("[", "](url)"));
        let code = SnippetKind::CodeBlock.snippet();
        assert_eq!((code.prefix, code.suffix), ("```\n", "\n```"));
        let table = SnippetKind::Table.snippet();
        assert!(table.prefix.starts_with("| Header 1 | Header 2 | Header 3 |\n| --- |"));
        assert!(table.prefix.ends_with("| Row 2 | Data | Data |\n"));
        assert_eq!(table.placeholder, "");
    }
}
