use std::collections::BTreeSet;
use std::path::PathBuf;

use catview::text::plain_text;
use catview::{
    catalog_page, compute_counts, filter_packs, filter_servers, format_command, load_catalog,
    pack_detail, server_detail, Action, CatalogStore, FetchError, Node, Section, Settings, TextId,
};
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data.json")
}

fn fixture() -> CatalogStore {
    load_catalog(&fixture_path().to_string_lossy()).expect("fixture catalog loads")
}

fn copy_texts(node: &Node) -> Vec<String> {
    node.actions()
        .into_iter()
        .filter_map(|a| match a {
            Action::Copy { text } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn fixture_partitions_by_tier() {
    let store = fixture();
    assert_eq!(store.packs().len(), 2);
    let standard: Vec<_> = store.standard_servers().iter().map(|s| s.name.as_str()).collect();
    let community: Vec<_> = store.community_servers().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(standard, vec!["openshift", "lightspeed"]);
    assert_eq!(community, vec!["openshift"]);
    assert_eq!(store.pack_mcp_count("rh-sre"), 2);
}

#[test]
fn blank_query_shows_the_whole_catalog() {
    let store = fixture();
    let packs = store.packs();
    assert_eq!(filter_packs(&packs, "").len(), packs.len());
    assert_eq!(filter_packs(&packs, "   ").len(), packs.len());

    let text = plain_text(&[catalog_page(&store, "", &BTreeSet::new())]);
    assert!(text.starts_with("2 Packs2 Skills1 Agents3 Docs3 MCP"), "{text}");
}

#[test]
fn env_names_are_searchable() {
    let store = fixture();
    let standard = store.standard_servers();

    let hits: Vec<_> = filter_servers(&standard, "MCP_TOKEN")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(hits, vec!["lightspeed"]);

    let hits: Vec<_> = filter_servers(&standard, "mcp")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(hits, vec!["openshift", "lightspeed"]);
}

#[test]
fn header_values_are_not_searchable() {
    let store = fixture();
    assert!(filter_servers(&store.standard_servers(), "bearer").is_empty());
    assert_eq!(filter_servers(&store.standard_servers(), "x-client").len(), 1);
}

#[test]
fn filtered_counts_follow_the_query() {
    let store = fixture();
    let packs = filter_packs(&store.packs(), "drain");
    let counts = compute_counts(
        &packs,
        &filter_servers(&store.standard_servers(), "drain"),
        &filter_servers(&store.community_servers(), "drain"),
    );
    assert_eq!(counts.pack_count, 1);
    assert_eq!(counts.skill_count, 2);
    assert_eq!(counts.mcp_count, 0);
}

#[test]
fn collapsed_sections_hide_their_cards() {
    let store = fixture();
    let collapsed: BTreeSet<Section> = [Section::CommunityMcpServers].into_iter().collect();
    let page = catalog_page(&store, "", &collapsed);
    let opens: Vec<_> = page
        .actions()
        .into_iter()
        .filter(|a| matches!(a, Action::OpenServer { .. }))
        .cloned()
        .collect();
    assert_eq!(
        opens,
        vec![
            Action::OpenServer {
                name: "openshift".into(),
                pack: "ocp-admin".into()
            },
            Action::OpenServer {
                name: "lightspeed".into(),
                pack: "rh-sre".into()
            },
        ]
    );
}

#[test]
fn same_name_servers_resolve_by_pack() {
    let store = fixture();
    let settings = Settings::default();

    let admin = server_detail(&store, &settings, "openshift", "ocp-admin").unwrap();
    assert_eq!(
        copy_texts(&admin),
        vec!["podman run \\\n  --rm \\\n  -i \\\n  quay.io/example/openshift-mcp:latest".to_string()]
    );
    let text = plain_text(&[admin]);
    assert!(text.contains("Isolation: container"), "{text}");
    assert!(text.contains("Credentials: N/A"), "{text}");

    let sre = server_detail(&store, &settings, "openshift", "rh-sre").unwrap();
    assert_eq!(copy_texts(&sre), vec!["npx openshift-mcp".to_string()]);
    let text = plain_text(&[sre]);
    assert!(text.contains("By Community Maintainers"), "{text}");
    assert!(!text.contains("SECURITY"), "{text}");

    assert!(server_detail(&store, &settings, "openshift", "nowhere").is_none());
}

#[test]
fn http_server_detail_lists_endpoint_and_headers() {
    let store = fixture();
    let detail = server_detail(&store, &Settings::default(), "lightspeed", "rh-sre").unwrap();
    assert_eq!(copy_texts(&detail), vec!["https://lightspeed.example.com/v1".to_string()]);

    let text = plain_text(&[detail]);
    assert!(text.contains("Remote Lightspeed insights"), "{text}");
    let auth = text.find("Authorization: Bearer ${MCP_TOKEN}").unwrap();
    let client = text.find("X-Client: catview").unwrap();
    assert!(auth < client);
    assert!(!text.contains("COMMAND"));
}

#[test]
fn pack_detail_offers_install_snippet_and_grouped_docs() {
    let store = fixture();
    let settings = Settings::default();
    let detail = pack_detail(&store, &settings, "ocp-admin").unwrap();

    assert_eq!(
        copy_texts(&detail),
        vec![settings.install_snippet("OpenShift Administration")]
    );

    let actions = detail.actions();
    assert!(actions.contains(&&Action::Expand {
        id: TextId::new("ocp-admin/skill/0", "cluster-report")
    }));
    assert!(actions.contains(&&Action::OpenServer {
        name: "openshift".into(),
        pack: "ocp-admin".into()
    }));

    let text = plain_text(&[detail]);
    let general = text.find("General").unwrap();
    let setup = text.find("Setup").unwrap();
    assert!(general < setup, "{text}");
    assert!(text.contains("Source: KB"), "{text}");

    assert!(pack_detail(&store, &settings, "missing").is_none());
}

#[test]
fn unreadable_sources_fail_to_load() {
    let missing = fixture_path().with_file_name("absent.json");
    let err = load_catalog(&missing.to_string_lossy()).unwrap_err();
    assert!(matches!(err, FetchError::ReadFailed { .. }), "{err:?}");

    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("data.json");
    std::fs::write(&bad, "<html>not json</html>").unwrap();
    let err = load_catalog(&bad.to_string_lossy()).unwrap_err();
    assert!(matches!(err, FetchError::ParseFailed { .. }), "{err:?}");
}

#[test]
fn commands_continue_on_indented_lines() {
    let args = vec!["--a".to_string(), "--b".to_string()];
    assert_eq!(format_command("run", &args), "run --a \\\n  --b");
}
