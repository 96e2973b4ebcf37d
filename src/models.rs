//! Data structures for the catalog document (`data.json`).

use serde::{Deserialize, Deserializer, Serialize};

/// Owner label for servers that do not declare one.
pub const DEFAULT_OWNER: &str = "Red Hat";

/// Version shown for packs whose plugin manifest has none.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Description shown for packs whose plugin manifest has none.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Category for docs without one.
pub const DEFAULT_DOC_CATEGORY: &str = "general";

/// Root document: every pack and every MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub packs: Vec<Pack>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mcp_servers: Vec<McpServer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pack {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugin: Plugin,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<NamedItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<NamedItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub docs: Vec<Doc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_readme: bool,
}

impl Pack {
    pub fn display_name(&self) -> &str {
        non_empty(&self.plugin.name).unwrap_or(self.name.as_str())
    }

    pub fn version(&self) -> &str {
        non_empty(&self.plugin.version).unwrap_or(DEFAULT_VERSION)
    }

    pub fn description(&self) -> &str {
        non_empty(&self.plugin.description).unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Number of doc sources (not doc entries).
    pub fn doc_source_count(&self) -> usize {
        self.docs.iter().map(|d| d.sources.len()).sum()
    }
}

/// Subset of the pack's `plugin.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A skill, agent or tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<DocSource>,
}

impl Doc {
    pub fn category(&self) -> &str {
        non_empty(&self.category).unwrap_or(DEFAULT_DOC_CATEGORY)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocSource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// An MCP server entry. Identified by the `(name, pack)` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpServer {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pack: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(rename = "type", default)]
    pub server_type: Option<ServerType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<NamedItem>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub security: Option<Security>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl McpServer {
    pub fn display_name(&self) -> &str {
        non_empty(&self.title).unwrap_or(self.name.as_str())
    }

    pub fn owner(&self) -> &str {
        non_empty(&self.owner).unwrap_or(DEFAULT_OWNER)
    }

    pub fn is_http(&self) -> bool {
        matches!(self.server_type, Some(ServerType::Http))
    }

    pub fn is_community(&self) -> bool {
        self.tier.as_deref() == Some("Community")
    }

    pub fn type_name(&self) -> &str {
        self.server_type.as_ref().map(ServerType::as_str).unwrap_or("")
    }

    /// Security block, if it carries at least one field.
    pub fn security(&self) -> Option<&Security> {
        self.security.as_ref().filter(|s| !s.is_empty())
    }
}

/// Transport kind. Unknown strings are kept and treated as non-http.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServerType {
    Http,
    Command,
    Other(String),
}

impl ServerType {
    pub fn as_str(&self) -> &str {
        match self {
            ServerType::Http => "http",
            ServerType::Command => "command",
            ServerType::Other(s) => s,
        }
    }
}

impl From<String> for ServerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "http" => ServerType::Http,
            "command" => ServerType::Command,
            _ => ServerType::Other(s),
        }
    }
}

impl From<ServerType> for String {
    fn from(t: ServerType) -> Self {
        t.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Security {
    #[serde(default)]
    pub isolation: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub credentials: Option<String>,
}

impl Security {
    pub fn is_empty(&self) -> bool {
        self.isolation.is_none() && self.network.is_none() && self.credentials.is_none()
    }

    /// Labelled fields in display order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("Isolation", self.isolation.as_deref()),
            ("Network", self.network.as_deref()),
            ("Credentials", self.credentials.as_deref()),
        ]
    }
}

/// Render a JSON value as display text (strings without quotes).
pub fn value_text(v: &serde_json::Value) -> String {
    v.as_str().map(String::from).unwrap_or_else(|| v.to_string())
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|x| !x.is_empty())
}
