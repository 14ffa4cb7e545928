//! Source adapters and pipelines against local mock catalogs.
//!
//! Every test runs the real `ReqwestClient` against a `wiremock` server
//! standing in for all three catalogs.

use std::sync::Arc;

use isbn_resolver::*;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── fixtures ───────────────────────

const ISBN: &str = "9789571498228";

const BOOKS_PAGE: &str = r##"<html><body>
<div class="table-container">
  <div class="table-tr">
    <div class="table-td">
      <h4><a href="https://www.books.com.tw/products/E050000001" title="Example Book (電子書)">Example Book</a></h4>
      <p class="type"><span class="author"><a href="#" title="Jane Doe">Jane Doe</a></span></p>
    </div>
  </div>
</div>
</body></html>"##;

const NCL_LANDING: &str = r#"<html><body>
<form name="KM" method="post" action="/blstkmc/blstkm?@@1041529163">
  <input type="hidden" name="INFO" value="tok-9">
  <input type="text" name="_1_13_n_2">
</form>
</body></html>"#;

const NCL_RESULTS: &str = r#"<html><body>
<table class="sumtab">
  <tr class="sumtr1">
    <td class="sumtd2000"><a href="/r/1" title="國家圖書館的書">國家圖書館的書</a></td>
    <td class="sumtd2001">#陳大文</td>
  </tr>
</table>
</body></html>"#;

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

fn resolver(server: &MockServer, google_books_enabled: bool) -> Resolver {
    let config = ResolverConfig {
        google_books_enabled,
        endpoints: Endpoints::all_at(&server.uri()),
    };
    Resolver::new(&config, Arc::new(ReqwestClient::default()), Arc::new(NoopObserver))
}

async fn mount_google(server: &MockServer, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", format!("isbn:{ISBN}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_books(server: &MockServer, body: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/search/query/key/{ISBN}/cat/all")))
        .respond_with(html(body))
        .expect(expected)
        .mount(server)
        .await;
}

// ─────────────────────── simple chain ───────────────────────

#[tokio::test]
async fn simple_chain_falls_back_and_strips_ebook_suffix() {
    let server = MockServer::start().await;
    mount_google(&server, r#"{"kind": "books#volumes", "totalItems": 0}"#, 1).await;
    mount_books(&server, BOOKS_PAGE, 1).await;

    let records = resolver(&server, true).search(ISBN).await;
    assert_eq!(records, vec![BookRecord::new(ISBN, "Example Book", "Jane Doe")]);

    let json = serde_json::to_value(&records).unwrap();
    assert!(json[0].get("source").is_none());
}

#[tokio::test]
async fn simple_chain_google_match_never_scrapes() {
    let server = MockServer::start().await;
    mount_google(
        &server,
        r#"{"totalItems": 1, "items": [{"volumeInfo": {"title": "Google Title", "authors": ["A", "B"]}}]}"#,
        1,
    )
    .await;
    mount_books(&server, BOOKS_PAGE, 0).await;

    let records = resolver(&server, true).search(ISBN).await;
    assert_eq!(records, vec![BookRecord::new(ISBN, "Google Title", "A, B")]);
}

#[tokio::test]
async fn simple_chain_without_google_starts_at_scrape() {
    let server = MockServer::start().await;
    mount_google(&server, "{}", 0).await;
    mount_books(&server, BOOKS_PAGE, 1).await;

    let records = resolver(&server, false).search(ISBN).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Example Book");
}

#[tokio::test]
async fn simple_chain_empty_when_every_source_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_books(&server, "<html><body>no results</body></html>", 1).await;

    assert!(resolver(&server, true).search(ISBN).await.is_empty());
}

// ─────────────────────── NCL session ───────────────────────

async fn mount_ncl_landing(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/blstkmc/blstkm"))
        .and(header_exists("accept-language"))
        .and(header_exists("user-agent"))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn ncl_two_step_search_posts_harvested_token() {
    let server = MockServer::start().await;
    mount_ncl_landing(&server, NCL_LANDING).await;
    Mock::given(method("POST"))
        .and(path("/blstkmc/blstkm"))
        .and(header("referer", format!("{}/blstkmc/blstkm", server.uri()).as_str()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("INFO=tok-9"))
        .and(body_string_contains(format!("_1_13_n_2={ISBN}")))
        .and(body_string_contains("_1_20_K=C"))
        .respond_with(html(NCL_RESULTS))
        .expect(1)
        .mount(&server)
        .await;

    let source = NclSource::new(Arc::new(ReqwestClient::default()), server.uri());
    let record = source.resolve(ISBN).await.unwrap();
    assert_eq!(record, BookRecord::new(ISBN, "國家圖書館的書", "陳大文"));
}

#[tokio::test]
async fn ncl_without_token_never_posts() {
    let server = MockServer::start().await;
    mount_ncl_landing(
        &server,
        r#"<html><body><form name="KM" action="/blstkmc/blstkm"></form></body></html>"#,
    )
    .await;
    Mock::given(method("POST"))
        .respond_with(html(NCL_RESULTS))
        .expect(0)
        .mount(&server)
        .await;

    let source = NclSource::new(Arc::new(ReqwestClient::default()), server.uri());
    assert!(matches!(source.resolve(ISBN).await, Err(Absent::Markup(_))));
}

// ─────────────────────── priority chain ───────────────────────

#[tokio::test]
async fn priority_chain_tags_ncl() {
    let server = MockServer::start().await;
    mount_ncl_landing(&server, NCL_LANDING).await;
    Mock::given(method("POST"))
        .and(path("/blstkmc/blstkm"))
        .respond_with(html(NCL_RESULTS))
        .mount(&server)
        .await;
    mount_books(&server, BOOKS_PAGE, 0).await;

    let records = resolver(&server, false).search_with_provenance(ISBN).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, Some(Provenance::Ncl));
    assert_eq!(serde_json::to_value(&records[0]).unwrap()["source"], "ncl");
}

#[tokio::test]
async fn priority_chain_tags_fallback_when_ncl_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blstkmc/blstkm"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_books(&server, BOOKS_PAGE, 1).await;

    let records = resolver(&server, false).search_with_provenance(ISBN).await;
    let expected =
        BookRecord::new(ISBN, "Example Book", "Jane Doe").with_provenance(Provenance::Fallback);
    assert_eq!(records, vec![expected]);
}

#[tokio::test]
async fn priority_chain_empty_when_nothing_matches() {
    let server = MockServer::start().await;
    mount_ncl_landing(&server, NCL_LANDING).await;
    Mock::given(method("POST"))
        .and(path("/blstkmc/blstkm"))
        .respond_with(html(r#"<table class="sumtab"></table>"#))
        .mount(&server)
        .await;
    mount_books(&server, "<html></html>", 1).await;

    assert!(resolver(&server, false)
        .search_with_provenance(ISBN)
        .await
        .is_empty());
}
