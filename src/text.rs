//! Restricted markdown (`**bold**` and newlines) and long-text truncation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tree::{Action, Node, TextId};

/// Default character budget for collapsed descriptions.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*").expect("valid bold pattern"));

/// Convert text into render nodes.
///
/// `**x**` becomes [`Node::Emphasis`] when `x` is non-empty and holds no
/// asterisk; lines are joined by [`Node::LineBreak`]. Everything else,
/// stray asterisks included, is kept as literal text.
pub fn format_markdown(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Node::LineBreak);
        }

        let mut last = 0;
        for m in BOLD.find_iter(line) {
            if m.start() > last {
                nodes.push(Node::text(&line[last..m.start()]));
            }
            nodes.push(Node::Emphasis {
                text: line[m.start() + 2..m.end() - 2].to_string(),
            });
            last = m.end();
        }
        if last < line.len() {
            nodes.push(Node::text(&line[last..]));
        }
    }

    nodes
}

/// Flatten nodes back to text. Emphasis loses its markers, line breaks
/// become `\n`, buttons and icons are dropped.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_plain(node, &mut out);
    }
    out
}

fn push_plain(node: &Node, out: &mut String) {
    match node {
        Node::Text { text }
        | Node::Emphasis { text }
        | Node::Code { text }
        | Node::Preformatted { text } => out.push_str(text),
        Node::Link { label, .. } => out.push_str(label),
        Node::LineBreak => out.push('\n'),
        Node::Expandable { expanded, .. } => {
            for n in expanded {
                push_plain(n, out);
            }
        }
        Node::Icon { .. } | Node::Button { .. } => {}
        Node::Heading { children, .. } | Node::Container { children, .. } => {
            for n in children {
                push_plain(n, out);
            }
        }
    }
}

/// Result of [`truncate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub shown: String,
    /// `None` when the text fit and no continuation is needed.
    pub rest: Option<String>,
}

impl Truncation {
    pub fn is_truncated(&self) -> bool {
        self.rest.is_some()
    }
}

/// Cut `text` to at most `max_len` characters, preferring a word boundary.
///
/// Scans backward from index `max_len` for a space or newline; if none is
/// found before index 0 the cut is made at `max_len`.
pub fn truncate(text: &str, max_len: usize) -> Truncation {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if chars.len() <= max_len {
        return Truncation {
            shown: text.to_string(),
            rest: None,
        };
    }

    let mut cut = max_len;
    while cut > 0 && !matches!(chars[cut].1, ' ' | '\n') {
        cut -= 1;
    }
    if cut == 0 {
        cut = max_len;
    }

    let (head, tail) = text.split_at(chars[cut].0);
    Truncation {
        shown: head.trim_end().to_string(),
        rest: Some(tail.trim_start().to_string()),
    }
}

/// Markdown text that collapses past `max_len` characters.
pub fn expandable_text(id: TextId, text: &str, max_len: usize) -> Node {
    let cut = truncate(text, max_len);
    if !cut.is_truncated() {
        return Node::container(crate::tree::Role::Inline, format_markdown(text));
    }

    let mut collapsed = format_markdown(&cut.shown);
    collapsed.push(Node::text("... "));
    collapsed.push(Node::button("show more", Action::Expand { id: id.clone() }));

    let mut expanded = format_markdown(text);
    expanded.push(Node::button(" show less", Action::Collapse { id: id.clone() }));

    Node::Expandable {
        id,
        collapsed,
        expanded,
    }
}
