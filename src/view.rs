//! Projection of the catalog into render trees: counts, cards, detail views.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::Settings;
use crate::models::{value_text, Doc, McpServer, NamedItem, Pack};
use crate::search::{filter_packs, filter_servers};
use crate::store::CatalogStore;
use crate::text::{expandable_text, format_markdown};
use crate::tree::{Action, Node, Role, Section, TextId};

/// Toolbar totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub pack_count: usize,
    pub skill_count: usize,
    pub agent_count: usize,
    /// Doc sources, not doc entries.
    pub doc_count: usize,
    pub mcp_count: usize,
}

/// Toolbar totals for the visible packs and both server partitions.
pub fn compute_counts(packs: &[&Pack], servers: &[&McpServer], community: &[&McpServer]) -> Counts {
    Counts {
        pack_count: packs.len(),
        skill_count: packs.iter().map(|p| p.skills.len()).sum(),
        agent_count: packs.iter().map(|p| p.agents.len()).sum(),
        doc_count: packs.iter().map(|p| p.doc_source_count()).sum(),
        mcp_count: servers.len() + community.len(),
    }
}

/// Command line for display: first arg on the command's line, every
/// further arg on its own continuation line.
pub fn format_command(command: &str, args: &[String]) -> String {
    let mut out = command.to_string();
    let mut args = args.iter();
    if let Some(first) = args.next() {
        out.push(' ');
        out.push_str(first);
    }
    for arg in args {
        out.push_str(" \\\n  ");
        out.push_str(arg);
    }
    out
}

/// `1 skill`, `2 skills`.
pub fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Filtered catalog slice for one query.
#[derive(Debug, Clone)]
pub struct CatalogSlice<'a> {
    pub packs: Vec<&'a Pack>,
    pub servers: Vec<&'a McpServer>,
    pub community: Vec<&'a McpServer>,
    pub counts: Counts,
}

impl<'a> CatalogSlice<'a> {
    pub fn new(store: &'a CatalogStore, query: &str) -> Self {
        let packs = filter_packs(&store.packs(), query);
        let servers = filter_servers(&store.standard_servers(), query);
        let community = filter_servers(&store.community_servers(), query);
        let counts = compute_counts(&packs, &servers, &community);
        Self {
            packs,
            servers,
            community,
            counts,
        }
    }
}

fn http_marker() -> Node {
    Node::Icon {
        glyph: "🌐".to_string(),
        hint: Some("HTTP Remote Server".to_string()),
    }
}

fn title_nodes(icon: Option<&str>, title: &str, http: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    if let Some(icon) = icon.filter(|i| !i.is_empty()) {
        nodes.push(Node::icon(icon));
    }
    nodes.push(Node::text(title));
    if http {
        nodes.push(http_marker());
    }
    nodes
}

fn muted(text: impl Into<String>) -> Node {
    Node::container(Role::Muted, vec![Node::text(text)])
}

fn paragraph(children: Vec<Node>) -> Node {
    Node::container(Role::Paragraph, children)
}

fn section(title: &str, mut children: Vec<Node>) -> Node {
    children.insert(0, Node::heading(3, vec![Node::text(title)]));
    Node::container(Role::Section, children)
}

fn copyable(text: String) -> Vec<Node> {
    vec![
        Node::Preformatted { text: text.clone() },
        Node::button("Copy", Action::Copy { text }),
    ]
}

fn open_server(server: &McpServer) -> Action {
    Action::OpenServer {
        name: server.name.clone(),
        pack: server.pack.clone(),
    }
}

/// `N Packs · N Skills · ...` strip above the sections.
pub fn counts_toolbar(counts: &Counts) -> Node {
    Node::container(
        Role::Toolbar,
        vec![
            Node::text(format!("{} Packs", counts.pack_count)),
            Node::text(format!("{} Skills", counts.skill_count)),
            Node::text(format!("{} Agents", counts.agent_count)),
            Node::text(format!("{} Docs", counts.doc_count)),
            Node::text(format!("{} MCP", counts.mcp_count)),
        ],
    )
}

/// Grid card for one pack.
pub fn pack_card(store: &CatalogStore, pack: &Pack) -> Node {
    let mut stats = vec![
        Node::text(plural(pack.skills.len(), "skill")),
        Node::text(plural(pack.agents.len(), "agent")),
    ];
    let docs = pack.doc_source_count();
    if docs > 0 {
        stats.push(Node::text(plural(docs, "doc")));
    }
    let mcp = store.pack_mcp_count(&pack.name);
    if mcp > 0 {
        stats.push(Node::text(format!("{mcp} MCP")));
    }

    Node::container(
        Role::Card,
        vec![
            Node::heading(3, title_nodes(pack.icon.as_deref(), pack.display_name(), false)),
            muted(format!("v{}", pack.version())),
            paragraph(vec![Node::text(pack.description())]),
            Node::container(Role::Stats, stats),
            Node::button(
                "View Details",
                Action::OpenPack {
                    name: pack.name.clone(),
                },
            ),
        ],
    )
}

/// Grid card for one MCP server.
pub fn server_card(server: &McpServer) -> Node {
    let connection = if server.is_http() {
        "Type: HTTP Remote".to_string()
    } else {
        format!("Container: {}", server.command.as_deref().unwrap_or(""))
    };
    let env = if server.env.is_empty() {
        "No env vars".to_string()
    } else {
        plural(server.env.len(), "env var")
    };
    let mut stats = vec![Node::text(env)];
    if !server.tools.is_empty() {
        stats.push(Node::text(plural(server.tools.len(), "tool")));
    }

    Node::container(
        Role::Card,
        vec![
            Node::heading(
                3,
                title_nodes(server.icon.as_deref(), server.display_name(), server.is_http()),
            ),
            muted(format!("By {}", server.owner())),
            paragraph(vec![Node::text(connection)]),
            Node::container(Role::Stats, stats),
            Node::button("Details", open_server(server)),
        ],
    )
}

fn grid_section(
    section: Section,
    collapsed: bool,
    cards: Vec<Node>,
    empty_message: &str,
) -> Node {
    let toggle = if collapsed { "show" } else { "hide" };
    let count = cards.len();
    let mut children = vec![Node::heading(
        2,
        vec![
            Node::text(section.title()),
            Node::text(format!(" ({count})")),
            Node::button(toggle, Action::ToggleSection { section }),
        ],
    )];
    if !collapsed {
        if cards.is_empty() {
            children.push(Node::container(Role::Notice, vec![Node::text(empty_message)]));
        } else {
            children.push(Node::container(Role::Grid, cards));
        }
    }
    Node::container(Role::Section, children)
}

/// Main page: toolbar counts and the three card sections for `query`.
pub fn catalog_page(store: &CatalogStore, query: &str, collapsed: &BTreeSet<Section>) -> Node {
    let slice = CatalogSlice::new(store, query);

    let packs = slice.packs.iter().map(|p| pack_card(store, p)).collect();
    let servers = slice.servers.iter().map(|s| server_card(s)).collect();
    let community = slice.community.iter().map(|s| server_card(s)).collect();

    Node::container(
        Role::Page,
        vec![
            counts_toolbar(&slice.counts),
            grid_section(
                Section::Packs,
                collapsed.contains(&Section::Packs),
                packs,
                "No packs found matching your search.",
            ),
            grid_section(
                Section::McpServers,
                collapsed.contains(&Section::McpServers),
                servers,
                "No MCP servers found matching your search.",
            ),
            grid_section(
                Section::CommunityMcpServers,
                collapsed.contains(&Section::CommunityMcpServers),
                community,
                "No community MCP servers found matching your search.",
            ),
        ],
    )
}

/// Ids are `scope/index/name`; names alone may repeat within a pack.
fn item_list(scope: &str, items: &[NamedItem], limit: usize) -> Node {
    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Node::container(
                Role::ListItem,
                vec![
                    Node::code(&item.name),
                    paragraph(vec![expandable_text(
                        TextId::new(&format!("{scope}/{i}"), &item.name),
                        &item.description,
                        limit,
                    )]),
                ],
            )
        })
        .collect();
    Node::container(Role::List, entries)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn doc_entry(doc: &Doc) -> Node {
    let mut children = vec![Node::code(&doc.title)];
    if !doc.sources.is_empty() {
        let mut sources = Vec::new();
        for (i, source) in doc.sources.iter().enumerate() {
            if i > 0 {
                sources.push(Node::LineBreak);
            }
            sources.push(Node::container(Role::Muted, vec![Node::text("Source: ")]));
            sources.push(Node::link(&source.title, &source.url));
        }
        children.push(paragraph(sources));
    }
    Node::container(Role::ListItem, children)
}

fn docs_section(settings: &Settings, pack: &Pack) -> Node {
    let mut by_category: BTreeMap<&str, Vec<&Doc>> = BTreeMap::new();
    for doc in &pack.docs {
        by_category.entry(doc.category()).or_default().push(doc);
    }

    let mut children = Vec::new();
    for (category, docs) in by_category {
        children.push(Node::container(
            Role::Section,
            vec![
                Node::heading(4, vec![Node::text(capitalize(category))]),
                Node::container(Role::List, docs.into_iter().map(doc_entry).collect()),
            ],
        ));
    }
    children.push(paragraph(vec![Node::link(
        "View full documentation on GitHub →",
        settings.docs_url(&pack.name),
    )]));
    section("DOCS", children)
}

fn pack_server_entry(server: &McpServer) -> Node {
    let mut children = Vec::new();
    if let Some(icon) = server.icon.as_deref().filter(|i| !i.is_empty()) {
        children.push(Node::icon(icon));
    }
    children.push(Node::button(
        format!("{} →", server.display_name()),
        open_server(server),
    ));
    if server.is_http() {
        children.push(http_marker());
    }
    children.push(muted(format!("By {}", server.owner())));
    Node::container(Role::ListItem, children)
}

/// Detail view for a pack, or `None` when no pack has that name.
pub fn pack_detail(store: &CatalogStore, settings: &Settings, name: &str) -> Option<Node> {
    let pack = store.find_pack(name)?;
    let servers = store.servers_for_pack(&pack.name);

    let mut count_parts = Vec::new();
    if !pack.skills.is_empty() {
        count_parts.push(plural(pack.skills.len(), "skill"));
    }
    if !pack.agents.is_empty() {
        count_parts.push(plural(pack.agents.len(), "agent"));
    }
    if !servers.is_empty() {
        count_parts.push(format!("{} MCP", servers.len()));
    }

    let mut meta = vec![Node::text(format!("v{}", pack.version()))];
    if pack.has_readme {
        meta.push(Node::link("README", settings.readme_url(&pack.name)));
    }

    let mut header = vec![
        Node::button("×", Action::CloseModal),
        Node::heading(2, vec![Node::text(pack.display_name())]),
    ];
    if !count_parts.is_empty() {
        header.push(muted(count_parts.join(" ")));
    }
    header.push(Node::container(Role::Inline, meta));
    if let Some(desc) = pack.plugin.description.as_deref().filter(|d| !d.is_empty()) {
        header.push(paragraph(vec![Node::text(desc)]));
    }

    let mut install = vec![muted("Claude Code:")];
    install.extend(copyable(settings.install_snippet(pack.display_name())));
    install.push(muted("Cursor:"));
    install.push(muted(
        "Coming soon - Cursor support is planned for future releases",
    ));

    let limit = settings.description_limit;
    let mut body = vec![section("INSTALLATION", install)];
    if !pack.agents.is_empty() {
        body.push(section(
            "AGENTS",
            vec![item_list(&format!("{}/agent", pack.name), &pack.agents, limit)],
        ));
    }
    if !pack.skills.is_empty() {
        body.push(section(
            "SKILLS",
            vec![item_list(&format!("{}/skill", pack.name), &pack.skills, limit)],
        ));
    }
    if !pack.docs.is_empty() {
        body.push(docs_section(settings, pack));
    }
    if !servers.is_empty() {
        body.push(section(
            "MCP",
            vec![Node::container(
                Role::List,
                servers.iter().map(|s| pack_server_entry(s)).collect(),
            )],
        ));
    }

    Some(Node::container(
        Role::Modal,
        vec![
            Node::container(Role::ModalHeader, header),
            Node::container(Role::ModalBody, body),
        ],
    ))
}

/// Detail view for the server identified by `(name, pack)`, or `None`.
pub fn server_detail(
    store: &CatalogStore,
    settings: &Settings,
    name: &str,
    pack: &str,
) -> Option<Node> {
    let server = store.find_server(name, pack)?;

    let description = match server.description.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => paragraph(format_markdown(d)),
        None => paragraph(vec![Node::text(format!("MCP server from {} pack", server.pack))]),
    };
    let mut header = vec![
        Node::button("×", Action::CloseModal),
        Node::heading(
            2,
            title_nodes(server.icon.as_deref(), server.display_name(), server.is_http()),
        ),
        muted(format!("By {}", server.owner())),
        description,
    ];
    if let Some(repo) = server.repository.as_deref().filter(|r| !r.is_empty()) {
        header.push(Node::container(
            Role::Inline,
            vec![muted("Repository: "), Node::link(repo, repo)],
        ));
    }

    let mut body = Vec::new();
    if server.is_http() {
        body.push(section(
            "ENDPOINT URL",
            copyable(server.url.clone().unwrap_or_default()),
        ));
        if !server.headers.is_empty() {
            let items = server
                .headers
                .iter()
                .map(|(k, v)| {
                    Node::container(
                        Role::ListItem,
                        vec![Node::Emphasis { text: format!("{k}: ") }, Node::text(value_text(v))],
                    )
                })
                .collect();
            body.push(section("HTTP HEADERS", vec![Node::container(Role::List, items)]));
        }
    } else {
        let command = format_command(server.command.as_deref().unwrap_or(""), &server.args);
        body.push(section("COMMAND", copyable(command)));
    }

    if !server.env.is_empty() {
        let items = server
            .env
            .iter()
            .map(|v| Node::container(Role::ListItem, vec![Node::code(v)]))
            .collect();
        body.push(section(
            "ENVIRONMENT VARIABLES",
            vec![Node::container(Role::List, items)],
        ));
    }

    if !server.is_http() {
        if let Some(security) = server.security() {
            let items = security
                .entries()
                .iter()
                .map(|(label, value)| {
                    Node::container(
                        Role::ListItem,
                        vec![
                            Node::Emphasis {
                                text: format!("{label}: "),
                            },
                            Node::text(value.unwrap_or("N/A")),
                        ],
                    )
                })
                .collect();
            body.push(section("SECURITY", vec![Node::container(Role::List, items)]));
        }
    }

    if !server.tools.is_empty() {
        let scope = format!("{}/{}/tool", server.pack, server.name);
        body.push(section(
            "TOOLS",
            vec![item_list(&scope, &server.tools, settings.description_limit)],
        ));
    }

    Some(Node::container(
        Role::Modal,
        vec![
            Node::container(Role::ModalHeader, header),
            Node::container(Role::ModalBody, body),
        ],
    ))
}

/// Inline error shown instead of the page when the catalog cannot load.
pub fn error_notice(message: &str) -> Node {
    Node::container(Role::Error, vec![Node::text(format!("Error: {message}"))])
}
