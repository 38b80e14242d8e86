//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! crawl cycle end-to-end through the reqwest fetcher.

use sitemap_ripple::config::{CrawlerConfig, UserAgentConfig};
use sitemap_ripple::crawler::{Coordinator, HttpFetcher, LinkCategory};
use sitemap_ripple::output::{to_xml, write_sitemap, SitemapTree};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_fetcher() -> HttpFetcher {
    let crawler = CrawlerConfig {
        max_pages: 30,
        request_timeout_secs: 5,
    };
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    HttpFetcher::from_config(&crawler, &user_agent).expect("Failed to build fetcher")
}

fn html(body: &str) -> String {
    format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        body
    )
}

/// Mounts a GET mock serving `body` at `route`, expected to be hit `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn child_locs(tree: &SitemapTree, parent: sitemap_ripple::output::NodeId) -> Vec<String> {
    tree.children(parent)
        .iter()
        .filter_map(|&id| tree.node(id).loc.clone())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(&format!(
            r#"<a href="{0}/page1">Page 1</a><a href="{0}/page2">Page 2</a>"#,
            base_url
        )),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        html(r#"<a href="/page3">Page 3</a><a href="/page2">Page 2</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/page2", html("<p>Leaf</p>"), 1).await;
    mount_page(&mock_server, "/page3", html("<p>Leaf</p>"), 1).await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 30);
    let tree = coordinator.crawl().await;

    let root = tree.root();
    assert_eq!(
        child_locs(tree, root),
        vec![format!("{}/page1", base_url), format!("{}/page2", base_url)]
    );

    let page1 = tree
        .find_child(root, &format!("{}/page1", base_url))
        .expect("page1 node");
    assert_eq!(
        child_locs(tree, page1),
        vec![format!("{}/page3", base_url), format!("{}/page2", base_url)]
    );

    assert_eq!(coordinator.cache().len(), 4);
    // Mock expectations (one request per page) are verified on drop
}

#[tokio::test]
async fn test_page_budget_limits_requests() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/page1">1</a><a href="/page2">2</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", html(r#"<a href="/page3">3</a>"#), 1).await;
    mount_page(&mock_server, "/page2", html(""), 0).await;
    mount_page(&mock_server, "/page3", html(""), 0).await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 2);
    let tree = coordinator.crawl().await;

    let root = tree.root();
    let page1 = tree.find_child(root, &format!("{}/page1", base_url)).unwrap();
    let page2 = tree.find_child(root, &format!("{}/page2", base_url)).unwrap();

    // page1 was expanded before the budget ran out; page2 never was
    assert_eq!(child_locs(tree, page1), vec![format!("{}/page3", base_url)]);
    assert!(tree.children(page2).is_empty());
    assert_eq!(coordinator.cache().len(), 2);
}

#[tokio::test]
async fn test_error_status_treated_as_empty_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/missing">gone</a>"#), 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(html(r#"<a href="/nope">x</a>"#)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 30);
    let tree = coordinator.crawl().await;

    let missing_url = format!("{}/missing", base_url);
    let missing = tree.find_child(tree.root(), &missing_url).unwrap();
    assert!(tree.children(missing).is_empty());
    assert_eq!(coordinator.cache().get(&missing_url), Some(""));
}

#[tokio::test]
async fn test_assets_recorded_but_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<img src="/logo.png" />
               <script src="/app.js"></script>
               <div style="background: url('/bg.jpg')">x</div>
               <a href="https://elsewhere.org/page">Elsewhere</a>"#,
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/logo.png", String::new(), 0).await;
    mount_page(&mock_server, "/app.js", String::new(), 0).await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 30);
    let tree = coordinator.crawl().await;

    assert_eq!(tree.count_by_category(LinkCategory::Image), 1);
    assert_eq!(tree.count_by_category(LinkCategory::Script), 1);
    assert_eq!(tree.count_by_category(LinkCategory::CssBackground), 1);
    assert_eq!(tree.count_by_category(LinkCategory::Url), 1);
    assert_eq!(coordinator.cache().len(), 1);
    assert!(!coordinator.cache().contains("https://elsewhere.org/page"));
}

#[tokio::test]
async fn test_malformed_page_falls_back_to_patterns() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // <br> is never closed, so the strict scan fails
    mount_page(
        &mock_server,
        "/",
        "<html><body><br><a href=\"/page1\">1</a></body></html>".to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", html(""), 1).await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 30);
    let tree = coordinator.crawl().await;

    assert_eq!(child_locs(tree, tree.root()), vec![format!("{}/page1", base_url)]);
}

#[tokio::test]
async fn test_sitemap_document_written() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/a?x=1&amp;y=2">A</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/a", html(""), 1).await;

    let mut coordinator = Coordinator::new(create_fetcher(), base_url.clone(), 30);
    coordinator.crawl().await;
    let (tree, _, _) = coordinator.into_parts();

    let xml = to_xml(&tree, false).unwrap();
    assert!(xml.starts_with("<SITEMAP><URL><LOC>"));
    assert!(xml.contains(&format!("{}/a?x=1&amp;amp;y=2", base_url)));
    assert!(xml.ends_with("</URL></SITEMAP>"));

    let dir = tempfile::TempDir::new().unwrap();
    let file = write_sitemap(dir.path(), &base_url, &tree, true).unwrap();
    let written = std::fs::read_to_string(file).unwrap();
    assert!(written.contains("<LOC>"));
}
