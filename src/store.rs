//! In-memory catalog and its standard/community server partitions.

use crate::models::{Catalog, McpServer, Pack};

/// Read-only catalog built once at startup and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalog: Catalog,
    standard: Vec<usize>,
    community: Vec<usize>,
}

impl CatalogStore {
    /// Parse a raw catalog document.
    pub fn load(raw: &str) -> Result<Self, serde_json::Error> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        Ok(Self::new(catalog))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let catalog: Catalog = serde_json::from_value(value)?;
        Ok(Self::new(catalog))
    }

    pub fn new(catalog: Catalog) -> Self {
        let (community, standard): (Vec<usize>, Vec<usize>) =
            (0..catalog.mcp_servers.len()).partition(|&i| catalog.mcp_servers[i].is_community());

        tracing::debug!(
            packs = catalog.packs.len(),
            standard = standard.len(),
            community = community.len(),
            "catalog loaded"
        );

        Self {
            catalog,
            standard,
            community,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn packs(&self) -> Vec<&Pack> {
        self.catalog.packs.iter().collect()
    }

    /// Servers whose tier is not `Community`, in document order.
    pub fn standard_servers(&self) -> Vec<&McpServer> {
        self.standard.iter().map(|&i| &self.catalog.mcp_servers[i]).collect()
    }

    /// Servers whose tier is `Community`, in document order.
    pub fn community_servers(&self) -> Vec<&McpServer> {
        self.community.iter().map(|&i| &self.catalog.mcp_servers[i]).collect()
    }

    pub fn find_pack(&self, name: &str) -> Option<&Pack> {
        let found = self.catalog.packs.iter().find(|p| p.name == name);
        if found.is_none() {
            tracing::debug!(pack = name, "no such pack");
        }
        found
    }

    /// Look up a server by its `(name, pack)` identity.
    pub fn find_server(&self, name: &str, pack: &str) -> Option<&McpServer> {
        let found = self
            .catalog
            .mcp_servers
            .iter()
            .find(|s| s.name == name && s.pack == pack);
        if found.is_none() {
            tracing::debug!(server = name, pack, "no such server");
        }
        found
    }

    /// Every server (standard first, then community) attached to `pack_name`.
    pub fn servers_for_pack(&self, pack_name: &str) -> Vec<&McpServer> {
        self.standard
            .iter()
            .chain(&self.community)
            .map(|&i| &self.catalog.mcp_servers[i])
            .filter(|s| s.pack == pack_name)
            .collect()
    }

    /// MCP server count shown on pack cards and in pack details.
    pub fn pack_mcp_count(&self, pack_name: &str) -> usize {
        self.servers_for_pack(pack_name).len()
    }
}

/// Split servers into `(standard, community)`, preserving order.
pub fn partition_servers<'a, I>(servers: I) -> (Vec<&'a McpServer>, Vec<&'a McpServer>)
where
    I: IntoIterator<Item = &'a McpServer>,
{
    servers.into_iter().partition(|s| !s.is_community())
}
