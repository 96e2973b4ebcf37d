//! Toolkit-neutral render tree.
//!
//! Views build trees of typed nodes; back ends (terminal, JSON, anything
//! else) walk them. Text is always carried as data, never as markup.
//! Interactive nodes carry an [`Action`] descriptor that a dispatch layer
//! binds to its own input events.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Text {
        text: String,
    },
    Emphasis {
        text: String,
    },
    LineBreak,
    /// Inline code (names, identifiers).
    Code {
        text: String,
    },
    /// Multi-line literal block (commands, URLs, install snippets).
    Preformatted {
        text: String,
    },
    Link {
        label: String,
        href: String,
    },
    Icon {
        glyph: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    Button {
        label: String,
        action: Action,
    },
    /// Text with a collapsed and an expanded form; which one shows is
    /// presentation state keyed by `id`.
    Expandable {
        id: TextId,
        collapsed: Vec<Node>,
        expanded: Vec<Node>,
    },
    Container {
        role: Role,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Node::Code { text: text.into() }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Node::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    pub fn icon(glyph: impl Into<String>) -> Self {
        Node::Icon {
            glyph: glyph.into(),
            hint: None,
        }
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Node::Heading { level, children }
    }

    pub fn button(label: impl Into<String>, action: Action) -> Self {
        Node::Button {
            label: label.into(),
            action,
        }
    }

    pub fn container(role: Role, children: Vec<Node>) -> Self {
        Node::Container { role, children }
    }

    /// Child nodes, for walkers that do not care about the node kind.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. } | Node::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first iterator over every action descriptor in the tree.
    /// Both forms of an expandable node are visited.
    pub fn actions(&self) -> Vec<&Action> {
        let mut out = Vec::new();
        collect_actions(self, &mut out);
        out
    }
}

fn collect_actions<'a>(node: &'a Node, out: &mut Vec<&'a Action>) {
    match node {
        Node::Button { action, .. } => out.push(action),
        Node::Expandable {
            collapsed,
            expanded,
            ..
        } => {
            for n in collapsed.iter().chain(expanded) {
                collect_actions(n, out);
            }
        }
        other => {
            for n in other.children() {
                collect_actions(n, out);
            }
        }
    }
}

/// Structural role of a container. Back ends decide how each one looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Page,
    Toolbar,
    Section,
    Grid,
    Card,
    Stats,
    Modal,
    ModalHeader,
    ModalBody,
    List,
    ListItem,
    Paragraph,
    Muted,
    Inline,
    Notice,
    Error,
}

/// Stable key for an expandable text block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TextId(pub String);

impl TextId {
    pub fn new(scope: &str, item: &str) -> Self {
        TextId(format!("{scope}/{item}"))
    }
}

/// Top-level catalog sections that can be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Packs,
    McpServers,
    CommunityMcpServers,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Packs => "Agentic Packs",
            Section::McpServers => "MCP Servers",
            Section::CommunityMcpServers => "Community MCP Servers",
        }
    }
}

/// What activating a node should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    OpenPack { name: String },
    OpenServer { name: String, pack: String },
    CloseModal,
    ToggleSection { section: Section },
    Expand { id: TextId },
    Collapse { id: TextId },
    Copy { text: String },
}
