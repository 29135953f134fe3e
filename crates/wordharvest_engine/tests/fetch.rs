use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordharvest_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher};

async fn serve(server: &MockServer, at: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(response)
        .mount(server)
        .await;
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/html; charset=utf-8")
}

fn redirect_to(location: String) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("Location", location.as_str())
}

#[tokio::test]
async fn article_bytes_and_metadata() {
    let server = MockServer::start().await;
    serve(&server, "/wiki/Otter", html("<p>Otters swim.</p>")).await;
    let url = format!("{}/wiki/Otter", server.uri());

    let output = ReqwestFetcher::new(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap();

    assert_eq!(output.bytes, b"<p>Otters swim.</p>".to_vec());
    assert_eq!(output.metadata.requested_url, url);
    assert_eq!(output.metadata.resolved_url, url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.byte_len, 19);
    assert_eq!(
        output.metadata.content_type.as_deref(),
        Some("text/html; charset=utf-8")
    );
}

#[tokio::test]
async fn sends_identifying_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "wordharvest-tests/1"))
        .respond_with(html("<p>hi</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = FetchSettings {
        user_agent: "wordharvest-tests/1".into(),
        ..FetchSettings::default()
    };
    ReqwestFetcher::new(settings)
        .fetch(&format!("{}/wiki/Special:Random", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn random_page_redirect_is_followed_and_counted() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/wiki/Special:Random",
        redirect_to(format!("{}/wiki/Badger", server.uri())),
    )
    .await;
    serve(&server, "/wiki/Badger", html("<p>Badgers dig.</p>")).await;

    let output = ReqwestFetcher::new(FetchSettings::default())
        .fetch(&format!("{}/wiki/Special:Random", server.uri()))
        .await
        .unwrap();

    assert!(output.metadata.resolved_url.ends_with("/wiki/Badger"));
    assert_eq!(output.metadata.redirect_count, 1);
}

#[tokio::test]
async fn redirect_loop_hits_the_cap() {
    let server = MockServer::start().await;
    serve(&server, "/a", redirect_to(format!("{}/b", server.uri()))).await;
    serve(&server, "/b", redirect_to(format!("{}/a", server.uri()))).await;

    let settings = FetchSettings {
        max_redirects: 2,
        ..FetchSettings::default()
    };
    let err = ReqwestFetcher::new(settings)
        .fetch(&format!("{}/a", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn server_errors_carry_the_status() {
    let server = MockServer::start().await;
    serve(&server, "/wiki/Special:Random", ResponseTemplate::new(503)).await;

    let err = ReqwestFetcher::new(FetchSettings::default())
        .fetch(&format!("{}/wiki/Special:Random", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn non_html_pages_are_refused() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/api",
        ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
    )
    .await;

    let err = ReqwestFetcher::new(FetchSettings::default())
        .fetch(&format!("{}/api", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".into()
        }
    );
}

#[tokio::test]
async fn slow_pages_time_out() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/slow",
        html("<p>eventually</p>").set_delay(Duration::from_millis(300)),
    )
    .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let err = ReqwestFetcher::new(settings)
        .fetch(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_bodies_are_cut_off() {
    let server = MockServer::start().await;
    serve(&server, "/big", html("<p>twelve bytes</p>")).await;

    let settings = FetchSettings {
        max_body_bytes: 8,
        ..FetchSettings::default()
    };
    let err = ReqwestFetcher::new(settings)
        .fetch(&format!("{}/big", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 8, actual: Some(actual) } if actual > 8
    ));
}

#[tokio::test]
async fn malformed_urls_never_hit_the_network() {
    let err = ReqwestFetcher::new(FetchSettings::default())
        .fetch("wiki without scheme")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
