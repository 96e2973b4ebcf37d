//! Plain-text back end for render trees.
//!
//! Buttons are printed as `[n] label`; the returned action table maps each
//! `n` back to its descriptor so a prompt can dispatch it.

use std::collections::BTreeSet;

use crate::tree::{Action, Node, Role, TextId};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalStyle {
    /// Emit ANSI bold/dim sequences.
    pub color: bool,
    /// Print `[n]` markers for buttons. Off for non-interactive output.
    pub numbered: bool,
}

/// Text plus the actions reachable from it, in `[n]` order (1-based).
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    pub text: String,
    pub actions: Vec<Action>,
}

impl Rendered {
    /// Action for a 1-based marker.
    pub fn action(&self, n: usize) -> Option<&Action> {
        n.checked_sub(1).and_then(|i| self.actions.get(i))
    }
}

pub fn render(node: &Node, expanded: &BTreeSet<TextId>, style: TerminalStyle) -> Rendered {
    let mut w = Writer {
        out: String::new(),
        line: String::new(),
        depth: 0,
        expanded,
        style,
        actions: Vec::new(),
    };
    w.node(node);
    w.end_line();
    Rendered {
        text: w.out.trim_end().to_string() + "\n",
        actions: w.actions,
    }
}

struct Writer<'a> {
    out: String,
    line: String,
    depth: usize,
    expanded: &'a BTreeSet<TextId>,
    style: TerminalStyle,
    actions: Vec<Action>,
}

impl Writer<'_> {
    fn push(&mut self, s: &str) {
        if self.line.is_empty() {
            self.line.push_str(&INDENT.repeat(self.depth));
        }
        self.line.push_str(s);
    }

    fn styled(&mut self, s: &str, code: &str) {
        if self.style.color {
            self.push(&format!("\x1b[{code}m{s}\x1b[0m"));
        } else {
            self.push(s);
        }
    }

    /// Hard line break; keeps empty lines.
    fn break_line(&mut self) {
        self.out.push_str(self.line.trim_end());
        self.out.push('\n');
        self.line.clear();
    }

    /// Finish the current line if anything is on it.
    fn end_line(&mut self) {
        if !self.line.trim().is_empty() {
            self.break_line();
        } else {
            self.line.clear();
        }
    }

    fn blank_line(&mut self) {
        self.end_line();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn nodes(&mut self, nodes: &[Node]) {
        for n in nodes {
            self.node(n);
        }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Text { text } => self.push(text),
            Node::Emphasis { text } => self.styled(text, "1"),
            Node::Code { text } => self.styled(text, "36"),
            Node::LineBreak => self.break_line(),
            Node::Preformatted { text } => {
                self.end_line();
                self.depth += 2;
                for line in text.lines() {
                    self.push(line);
                    self.break_line();
                }
                self.depth -= 2;
            }
            Node::Link { label, href } => {
                if label == href {
                    self.push(href);
                } else {
                    self.push(&format!("{label} <{href}>"));
                }
            }
            Node::Icon { glyph, .. } => {
                self.push(glyph);
                self.push(" ");
            }
            Node::Heading { children, .. } => {
                self.end_line();
                self.nodes(children);
                self.end_line();
            }
            Node::Button { label, action } => {
                self.actions.push(action.clone());
                if self.style.numbered {
                    let marker = format!("[{}] {}", self.actions.len(), label.trim());
                    self.push(" ");
                    self.styled(&marker, "2");
                }
            }
            Node::Expandable {
                id,
                collapsed,
                expanded,
            } => {
                if self.expanded.contains(id) {
                    self.nodes(expanded);
                } else {
                    self.nodes(collapsed);
                }
            }
            Node::Container { role, children } => self.container(*role, children),
        }
    }

    fn container(&mut self, role: Role, children: &[Node]) {
        match role {
            Role::Inline | Role::Muted => {
                if role == Role::Muted && self.style.color {
                    self.line_styled_children(children, "2");
                } else {
                    self.nodes(children);
                }
            }
            Role::Stats | Role::Toolbar => {
                self.end_line();
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        self.push(" · ");
                    }
                    self.node(child);
                }
                self.end_line();
            }
            Role::Card | Role::Section => {
                self.blank_line();
                self.nodes(children);
                self.end_line();
            }
            Role::Grid | Role::List | Role::ModalBody => {
                self.end_line();
                self.depth += 1;
                self.nodes(children);
                self.depth -= 1;
                self.end_line();
            }
            Role::ListItem => {
                self.end_line();
                self.push("- ");
                self.nodes(children);
                self.end_line();
            }
            Role::Page
            | Role::Modal
            | Role::ModalHeader
            | Role::Paragraph
            | Role::Notice
            | Role::Error => {
                self.end_line();
                self.nodes(children);
                self.end_line();
            }
        }
    }

    fn line_styled_children(&mut self, children: &[Node], code: &str) {
        self.push(&format!("\x1b[{code}m"));
        self.nodes(children);
        self.push("\x1b[0m");
    }
}
