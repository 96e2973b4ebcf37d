//! Case-insensitive substring search over packs and servers.

use crate::models::{McpServer, Pack};

/// Lowercase and trim a raw query.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase().trim().to_string()
}

/// Lowercased text a pack query is matched against.
pub fn pack_search_text(pack: &Pack) -> String {
    let mut fields: Vec<String> = vec![
        pack.name.clone(),
        pack.plugin.name.clone().unwrap_or_default(),
        pack.plugin.description.clone().unwrap_or_default(),
    ];
    fields.extend(
        pack.skills
            .iter()
            .chain(&pack.agents)
            .map(|item| format!("{} {}", item.name, item.description)),
    );
    fields.join(" ").to_lowercase()
}

/// Lowercased text a server query is matched against.
///
/// HTTP servers contribute their URL and header names (never header
/// values); every other type contributes its command.
pub fn server_search_text(server: &McpServer) -> String {
    let mut fields: Vec<&str> = vec![
        server.name.as_str(),
        server.title.as_deref().unwrap_or(""),
        server.owner.as_deref().unwrap_or(""),
        server.pack.as_str(),
        server.type_name(),
    ];
    fields.extend(server.env.iter().map(String::as_str));

    if server.is_http() {
        fields.push(server.url.as_deref().unwrap_or(""));
        fields.extend(server.headers.keys().map(String::as_str));
    } else {
        fields.push(server.command.as_deref().unwrap_or(""));
    }

    fields.join(" ").to_lowercase()
}

/// Packs matching `query`, in input order. A blank query keeps everything.
pub fn filter_packs<'a>(packs: &[&'a Pack], query: &str) -> Vec<&'a Pack> {
    filter_by(packs, query, pack_search_text)
}

/// Servers matching `query`, in input order. A blank query keeps everything.
pub fn filter_servers<'a>(servers: &[&'a McpServer], query: &str) -> Vec<&'a McpServer> {
    filter_by(servers, query, server_search_text)
}

fn filter_by<'a, T>(items: &[&'a T], query: &str, text: fn(&T) -> String) -> Vec<&'a T> {
    let query = normalize_query(query);
    if query.is_empty() {
        return items.to_vec();
    }
    let matched: Vec<&'a T> = items
        .iter()
        .copied()
        .filter(|item| text(item).contains(&query))
        .collect();
    tracing::debug!(query = %query, total = items.len(), matched = matched.len(), "filtered");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CatalogStore;
    use pretty_assertions::assert_eq;

    fn store() -> CatalogStore {
        CatalogStore::load(
            r#"{
                "packs": [
                    {"name": "ocp-admin", "plugin": {"name": "OpenShift Admin", "description": "Cluster ops"},
                     "skills": [{"name": "drain-node", "description": "Safely drain a node"}],
                     "agents": [{"name": "auditor", "description": "Reviews RBAC"}]},
                    {"name": "rhel-sre", "plugin": {},
                     "skills": [{"name": "patch", "description": "Apply errata"}], "agents": []},
                    {"name": "observability", "skills": [], "agents": []}
                ],
                "mcp_servers": [
                    {"name": "lightspeed", "pack": "rhel-sre", "type": "command", "command": "podman",
                     "env": ["MCP_TOKEN"], "owner": "Acme"},
                    {"name": "remote", "pack": "ocp-admin", "type": "http", "url": "https://api.example.com/v1",
                     "headers": {"Authorization": "Bearer SECRETVALUE"}, "command": "ignored-for-http"},
                    {"name": "bare", "pack": "observability"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn pack_names(packs: &[&Pack]) -> Vec<String> {
        packs.iter().map(|p| p.name.clone()).collect()
    }

    fn server_names(servers: &[&McpServer]) -> Vec<String> {
        servers.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn blank_query_is_identity() {
        let store = store();
        let packs = store.packs();
        for q in ["", "   ", "\t\n"] {
            assert_eq!(pack_names(&filter_packs(&packs, q)), pack_names(&packs));
        }
        let servers = store.standard_servers();
        assert_eq!(server_names(&filter_servers(&servers, " ")), server_names(&servers));
    }

    #[test]
    fn query_is_normalized() {
        assert_eq!(normalize_query("  DrAiN  "), "drain");
        let store = store();
        assert_eq!(pack_names(&filter_packs(&store.packs(), "  DRAIN ")), vec!["ocp-admin"]);
    }

    #[test]
    fn packs_match_on_skill_and_agent_text() {
        let store = store();
        let packs = store.packs();
        assert_eq!(pack_names(&filter_packs(&packs, "rbac")), vec!["ocp-admin"]);
        assert_eq!(pack_names(&filter_packs(&packs, "errata")), vec!["rhel-sre"]);
        assert_eq!(pack_names(&filter_packs(&packs, "openshift admin")), vec!["ocp-admin"]);
    }

    #[test]
    fn match_can_span_field_boundaries() {
        // name and description are joined by a single space
        let store = store();
        assert_eq!(pack_names(&filter_packs(&store.packs(), "patch apply")), vec!["rhel-sre"]);
    }

    #[test]
    fn membership_follows_search_text() {
        let store = store();
        let packs = store.packs();
        for q in ["o", "node", "sre", "zzz", "cluster ops", "a"] {
            let hits = filter_packs(&packs, q);
            for p in &packs {
                let expected = pack_search_text(p).contains(&normalize_query(q));
                assert_eq!(hits.iter().any(|h| h.name == p.name), expected, "query {q:?}, pack {}", p.name);
            }
        }
    }

    #[test]
    fn env_var_names_are_searchable() {
        let store = store();
        let all: Vec<&McpServer> = store.catalog().mcp_servers.iter().collect();
        assert_eq!(server_names(&filter_servers(&all, "mcp")), vec!["lightspeed"]);
    }

    #[test]
    fn http_servers_match_url_and_header_names_only() {
        let store = store();
        let all: Vec<&McpServer> = store.catalog().mcp_servers.iter().collect();
        assert_eq!(server_names(&filter_servers(&all, "example.com")), vec!["remote"]);
        assert_eq!(server_names(&filter_servers(&all, "authorization")), vec!["remote"]);
        assert!(filter_servers(&all, "secretvalue").is_empty());
        assert!(filter_servers(&all, "ignored-for-http").is_empty());
    }

    #[test]
    fn command_servers_match_command_and_owner() {
        let store = store();
        let all: Vec<&McpServer> = store.catalog().mcp_servers.iter().collect();
        assert_eq!(server_names(&filter_servers(&all, "PODMAN")), vec!["lightspeed"]);
        assert_eq!(server_names(&filter_servers(&all, "acme")), vec!["lightspeed"]);
    }

    #[test]
    fn absent_fields_do_not_break_matching() {
        let store = store();
        let all: Vec<&McpServer> = store.catalog().mcp_servers.iter().collect();
        assert_eq!(server_names(&filter_servers(&all, "observability")), vec!["bare"]);
        assert_eq!(server_search_text(&all[2]), "bare   observability  ");
    }

    #[test]
    fn filter_preserves_input_order() {
        let store = store();
        let mut packs = store.packs();
        packs.reverse();
        assert_eq!(
            pack_names(&filter_packs(&packs, "e")),
            vec!["observability", "rhel-sre", "ocp-admin"]
        );
    }
}
