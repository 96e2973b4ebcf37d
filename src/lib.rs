//! catview - Catalog Viewer
//!
//! Loads a catalog of agentic packs and MCP servers, searches it, and
//! projects it into toolkit-neutral render trees.

pub mod clipboard;
pub mod config;
pub mod fetch;
pub mod models;
pub mod paths;
pub mod search;
pub mod session;
pub mod store;
pub mod terminal;
pub mod text;
pub mod tree;
pub mod view;

pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use config::{get_config_value, set_config_value, ConfigError, Settings};
pub use fetch::{load_catalog, FetchError};
pub use models::{Catalog, McpServer, NamedItem, Pack};
pub use paths::Paths;
pub use search::{filter_packs, filter_servers, normalize_query};
pub use session::{Event, Modal, Session};
pub use store::{partition_servers, CatalogStore};
pub use text::{format_markdown, truncate, Truncation};
pub use tree::{Action, Node, Role, Section, TextId};
pub use view::{
    catalog_page, compute_counts, error_notice, format_command, pack_detail, server_detail, Counts,
};
