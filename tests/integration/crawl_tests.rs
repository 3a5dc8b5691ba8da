//! Integration tests for discovery, extraction, and crawl coordination
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! crawl end-to-end over real HTTP.

use market_pulse::config::parse_config;
use market_pulse::crawler::{discover, run_crawl, Coordinator, CrawlTarget};
use market_pulse::digest::{TickerLookup, YahooTickerLookup};
use market_pulse::extract::Extractor;
use market_pulse::{FetchError, PulseError};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `body` as HTML at `route`
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves `body` at `route` and expects exactly `hits` requests
async fn mount_page_expecting(server: &MockServer, route: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .mount(server)
        .await;
}

fn listing(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{href}">link</a>"#))
        .collect();
    format!("<html><body>{anchors}</body></html>")
}

/// An article page in the CNBC layout
fn cnbc_article(n: usize) -> String {
    format!(
        r#"<html><body>
        <h1>Nvidia story {n}</h1>
        <time>Published Wed, Jun 5 20242:23 PM EDT</time>
        <div class="ArticleBody-articleBody"><p>Paragraph {n}.</p><p>More on Nvidia.</p></div>
        </body></html>"#
    )
}

fn fast_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap()
}

fn coordinator(client: Client, max_concurrent: usize) -> Coordinator {
    let extractor = Extractor::new(client.clone()).unwrap();
    Coordinator::with_extractor(client, extractor, max_concurrent)
}

#[tokio::test]
async fn test_depth_zero_fetches_only_the_seed() {
    let server = MockServer::start().await;

    mount_page_expecting(
        &server,
        "/",
        listing(&["/news/nvidia-a", "/news/nvidia-b", "/news/apple-c"]),
        1,
    )
    .await;
    mount_page_expecting(&server, "/news/nvidia-a", listing(&[]), 0).await;
    mount_page_expecting(&server, "/news/nvidia-b", listing(&[]), 0).await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 0);
    let links = discover(&Client::new(), &target, "nvidia").await;

    let expected: Vec<String> = vec![
        format!("{}/news/nvidia-a", server.uri()),
        format!("{}/news/nvidia-b", server.uri()),
    ];
    assert_eq!(links.into_iter().collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn test_depth_one_recurses_into_every_link() {
    let server = MockServer::start().await;

    mount_page(&server, "/", listing(&["/news/nvidia-a", "/news/nvidia-b"])).await;
    mount_page_expecting(
        &server,
        "/news/nvidia-a",
        listing(&["/news/nvidia-b", "/news/nvidia-c"]),
        1,
    )
    .await;
    mount_page_expecting(&server, "/news/nvidia-b", listing(&["/news/nvidia-a"]), 1).await;
    // Found at the depth limit, so never fetched
    mount_page_expecting(&server, "/news/nvidia-c", listing(&[]), 0).await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 1);
    let links = discover(&Client::new(), &target, "nvidia").await;

    assert_eq!(links.len(), 3);
    for name in ["a", "b", "c"] {
        assert!(links.contains(&format!("{}/news/nvidia-{}", server.uri(), name)));
    }
}

#[tokio::test]
async fn test_duplicate_paths_are_collapsed() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing(&["/news/nvidia-a", "/news/nvidia-a", "/news/nvidia-b"]),
    )
    .await;
    mount_page(&server, "/news/nvidia-a", listing(&["/news/nvidia-b"])).await;
    mount_page(&server, "/news/nvidia-b", listing(&["/news/nvidia-a"])).await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 1);
    let links = discover(&Client::new(), &target, "nvidia").await;

    assert_eq!(links.len(), 2);
}

#[tokio::test]
async fn test_denylisted_links_never_returned() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        listing(&[
            "/news/nvidia-ok",
            "https://www.facebook.com/sharer?u=nvidia",
            "https://twitter.com/intent/tweet?text=nvidia",
            "/login?next=/nvidia",
            "/account/create-nvidia-alert",
            "/forgot-password?from=nvidia",
            "/checkout/nvidia-pro",
        ]),
    )
    .await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 0);
    let links = discover(&Client::new(), &target, "nvidia").await;

    assert_eq!(links.len(), 1);
    assert!(links.contains(&format!("{}/news/nvidia-ok", server.uri())));
}

#[tokio::test]
async fn test_failed_branch_contributes_nothing() {
    let server = MockServer::start().await;

    mount_page(&server, "/", listing(&["/news/nvidia-a", "/news/nvidia-broken"])).await;
    mount_page(&server, "/news/nvidia-a", listing(&["/news/nvidia-deep"])).await;
    Mock::given(method("GET"))
        .and(path("/news/nvidia-broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 1);
    let links = discover(&Client::new(), &target, "nvidia").await;

    // The broken page is still a discovered link; it just yields no children
    assert_eq!(links.len(), 3);
}

#[tokio::test]
async fn test_failing_seed_yields_empty_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let target = CrawlTarget::new(format!("{}/", server.uri()), 1);
    assert!(discover(&Client::new(), &target, "nvidia").await.is_empty());
}

#[tokio::test]
async fn test_extract_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "/cnbc/nvidia-1", cnbc_article(1)).await;

    let extractor = Extractor::new(Client::new()).unwrap();
    let article = extractor
        .extract(&format!("{}/cnbc/nvidia-1", server.uri()))
        .await
        .unwrap();

    assert_eq!(article.title, "Nvidia story 1");
    assert_eq!(article.author, "127.0.0.1");
    assert_eq!(article.published_at, "2024-06-05 14:23");
    assert_eq!(article.content, "Paragraph 1. More on Nvidia.");
}

#[tokio::test]
async fn test_extract_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cnbc/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let extractor = Extractor::new(Client::new()).unwrap();
    let result = extractor.extract(&format!("{}/cnbc/gone", server.uri())).await;

    assert!(matches!(
        result,
        Err(PulseError::Fetch(FetchError::Status { status: 404, .. }))
    ));
}

#[tokio::test]
async fn test_extract_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cnbc/garbled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"this is not gzip data".to_vec())
                .insert_header("content-encoding", "gzip"),
        )
        .mount(&server)
        .await;

    let client = Client::builder().gzip(true).build().unwrap();
    let extractor = Extractor::new(client).unwrap();
    let result = extractor.extract(&format!("{}/cnbc/garbled", server.uri())).await;

    assert!(matches!(result, Err(PulseError::Fetch(FetchError::Body { .. }))));
}

#[tokio::test]
async fn test_one_failing_url_does_not_abort_batch() {
    let server = MockServer::start().await;

    let hrefs: Vec<String> = (1..=5).map(|n| format!("/cnbc/nvidia-{n}")).collect();
    let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    mount_page(&server, "/", listing(&href_refs)).await;

    for n in 1..=4 {
        mount_page(&server, &format!("/cnbc/nvidia-{n}"), cnbc_article(n)).await;
    }
    Mock::given(method("GET"))
        .and(path("/cnbc/nvidia-5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coordinator = coordinator(Client::new(), 4);
    let seeds = vec![CrawlTarget::new(format!("{}/", server.uri()), 0)];
    let articles = coordinator.crawl_all(&seeds, "nvidia").await;

    assert_eq!(articles.len(), 4);
}

#[tokio::test]
async fn test_seeds_are_merged_and_deduplicated() {
    let server = MockServer::start().await;

    mount_page(&server, "/topic", listing(&["/cnbc/nvidia-1", "/cnbc/nvidia-2"])).await;
    mount_page(&server, "/quote", listing(&["/cnbc/nvidia-2", "/cnbc/nvidia-3"])).await;
    for n in 1..=3 {
        mount_page_expecting(&server, &format!("/cnbc/nvidia-{n}"), cnbc_article(n), 1).await;
    }

    let coordinator = coordinator(Client::new(), 4);
    let seeds = vec![
        CrawlTarget::new(format!("{}/topic", server.uri()), 0),
        CrawlTarget::new(format!("{}/quote", server.uri()), 0),
    ];
    let articles = coordinator.crawl_all(&seeds, "nvidia").await;

    assert_eq!(articles.len(), 3);
}

#[tokio::test]
async fn test_slow_article_times_out() {
    let server = MockServer::start().await;

    mount_page(&server, "/cnbc/nvidia-1", cnbc_article(1)).await;
    Mock::given(method("GET"))
        .and(path("/cnbc/nvidia-slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(cnbc_article(2))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let coordinator = coordinator(fast_client(Duration::from_millis(300)), 2);
    let urls = vec![
        format!("{}/cnbc/nvidia-1", server.uri()),
        format!("{}/cnbc/nvidia-slow", server.uri()),
    ];
    let articles = coordinator.extract_all(urls).await;

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "Nvidia story 1");
}

#[tokio::test]
async fn test_concurrent_batch_of_fifty() {
    let server = MockServer::start().await;

    let mut urls = Vec::new();
    for n in 0..50 {
        let route = format!("/cnbc/nvidia-{n}");
        let template = match n % 5 {
            // 10 timeouts
            0 => ResponseTemplate::new(200)
                .set_body_string(cnbc_article(n))
                .set_delay(Duration::from_secs(2)),
            // 10 failures
            1 => ResponseTemplate::new(404),
            // 30 successes
            _ => ResponseTemplate::new(200).set_body_string(cnbc_article(n)),
        };
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(template)
            .mount(&server)
            .await;
        urls.push(format!("{}{}", server.uri(), route));
    }

    let coordinator = coordinator(fast_client(Duration::from_millis(250)), 8);

    for _ in 0..3 {
        let articles = coordinator.extract_all(urls.clone()).await;
        let titles: HashSet<_> = articles.iter().map(|a| a.title.clone()).collect();

        assert_eq!(articles.len(), 30);
        assert_eq!(titles.len(), 30);
        for n in (0..50).filter(|n| n % 5 >= 2) {
            assert!(titles.contains(&format!("Nvidia story {n}")));
        }
    }
}

#[tokio::test]
async fn test_ticker_lookup_sends_browser_agent() {
    let server = MockServer::start().await;
    let config = parse_config(&format!(
        r#"
[user-agent]
crawler-name = "TestPulse"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[ticker]
search-url = "{}/v1/finance/search"
browser-user-agent = "TestBrowser/1.0"
"#,
        server.uri()
    ))
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .and(query_param("q", "Nvidia"))
        .and(query_param("quotesCount", "1"))
        .and(query_param("newsCount", "0"))
        .and(query_param("region", "US"))
        .and(header("user-agent", "TestBrowser/1.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"quotes":[{"symbol":"NVDA"},{"symbol":"NVD.DE"}]}"#)
                .insert_header("content-type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let lookup = YahooTickerLookup::new(&config.ticker, &config.crawler).unwrap();
    assert_eq!(lookup.lookup("Nvidia").await.unwrap(), "NVDA");
}

#[tokio::test]
async fn test_ticker_lookup_without_quotes() {
    let server = MockServer::start().await;
    let config = parse_config(&format!(
        r#"
[user-agent]
crawler-name = "TestPulse"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[ticker]
search-url = "{}/search"
"#,
        server.uri()
    ))
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"quotes":[]}"#))
        .mount(&server)
        .await;

    let lookup = YahooTickerLookup::new(&config.ticker, &config.crawler).unwrap();
    assert!(matches!(
        lookup.lookup("Nobody Inc").await,
        Err(PulseError::TickerLookup { .. })
    ));
}

#[tokio::test]
async fn test_ticker_lookup_uses_configured_timeout() {
    let server = MockServer::start().await;
    let config = parse_config(&format!(
        r#"
[crawler]
request-timeout-secs = 1

[user-agent]
crawler-name = "TestPulse"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[ticker]
search-url = "{}/search"
"#,
        server.uri()
    ))
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"quotes":[{"symbol":"NVDA"}]}"#)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let lookup = YahooTickerLookup::new(&config.ticker, &config.crawler).unwrap();
    let started = std::time::Instant::now();
    let result = lookup.lookup("Nvidia").await;

    assert!(matches!(result, Err(PulseError::TickerLookup { .. })));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_run_crawl_expands_ticker_seed() {
    let server = MockServer::start().await;
    let config = parse_config(&format!(
        r#"
[crawler]
max-concurrent-fetches = 4
request-timeout-secs = 5

[user-agent]
crawler-name = "TestPulse"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[[seeds]]
url = "{uri}/quote/{{ticker}}:{{exchange}}"
max-depth = 0
"#,
        uri = server.uri()
    ))
    .unwrap();

    mount_page_expecting(
        &server,
        "/quote/NVDA:NASDAQ",
        listing(&["/cnbc/nvidia-1", "/cnbc/nvidia-2"]),
        1,
    )
    .await;
    mount_page(&server, "/cnbc/nvidia-1", cnbc_article(1)).await;
    mount_page(&server, "/cnbc/nvidia-2", cnbc_article(2)).await;

    let articles = run_crawl(&config, "nvidia", Some("NVDA")).await.unwrap();
    assert_eq!(articles.len(), 2);
}
