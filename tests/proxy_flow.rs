//! End-to-end tests driving the proxy against a programmable mock origin.

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{start_mock_origin, start_proxy, OriginResponse};

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_serves_file_with_cors_and_charset() {
    let origin = start_mock_origin(|_| async {
        OriginResponse::ok(b"# readme\n")
            .with_header("Content-Type", "text/markdown; charset=utf-8")
            .with_header("ETag", "\"abc123\"")
    })
    .await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/README.md"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    // origin charset parameter is stripped, ours is appended for text
    assert_eq!(res.headers()["content-type"], "text/markdown; charset=utf-8");
    assert_eq!(res.headers()["content-disposition"], "inline");
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["etag"], "\"abc123\"");
    // the default branch is a branch ref
    assert_eq!(
        res.headers()["cache-control"],
        "public, max-age=300, s-maxage=300, stale-while-revalidate=3600"
    );
    assert_eq!(res.text().await.unwrap(), "# readme\n");
}

#[tokio::test]
async fn test_address_resolution_hits_origin_paths() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let record = seen.clone();
    let origin = start_mock_origin(move |request| {
        let record = record.clone();
        async move {
            let line = request.lines().next().unwrap_or_default().to_string();
            record.lock().unwrap().push(line);
            OriginResponse::ok(b"body").with_header("Content-Type", "text/plain")
        }
    })
    .await;
    let base = start_proxy(origin).await;
    let client = client();

    client
        .get(format!("{base}/files/o/acme/r/widgets/README.md"))
        .send()
        .await
        .unwrap();
    client
        .get(format!("{base}/files/r/widgets/src/lib.rs"))
        .send()
        .await
        .unwrap();
    client
        .get(format!("{base}/files/docs/guide.md?ref=v2.1.0"))
        .send()
        .await
        .unwrap();

    let lines = seen.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("GET /acme/widgets/main/README.md")));
    assert!(lines.iter().any(|l| l.contains("GET /unel/widgets/main/src/lib.rs")));
    assert!(lines.iter().any(|l| l.contains("GET /unel/git-proxy/v2.1.0/docs/guide.md")));
}

#[tokio::test]
async fn test_tag_and_commit_refs_drive_cache_policy() {
    let origin = start_mock_origin(|_| async {
        OriginResponse::ok(b"content").with_header("Content-Type", "text/plain")
    })
    .await;
    let base = start_proxy(origin).await;
    let client = client();

    let tagged = client
        .get(format!("{base}/files/README.md?ref=v2.1.0"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        tagged.headers()["cache-control"],
        "public, max-age=604800, s-maxage=604800, stale-while-revalidate=86400"
    );

    let pinned = client
        .get(format!("{base}/files/README.md?ref=0123456789abcdef0123456789abcdef01234567"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        pinned.headers()["cache-control"],
        "public, max-age=31536000, s-maxage=31536000, immutable"
    );
}

#[tokio::test]
async fn test_origin_404_maps_to_structured_error() {
    let origin = start_mock_origin(|_| async { OriginResponse::status(404) }).await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/o/acme/r/widgets/missing.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorCode"], "FILE_NOT_FOUND");
    assert_eq!(body["details"], "acme/widgets/main/missing.txt");
}

#[tokio::test]
async fn test_rate_limit_vs_forbidden() {
    let origin = start_mock_origin(|_| async {
        OriginResponse::status(403).with_header("X-RateLimit-Remaining", "0")
    })
    .await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/a.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorCode"], "RATE_LIMIT_EXCEEDED");

    let origin = start_mock_origin(|_| async {
        OriginResponse::status(403).with_header("X-RateLimit-Remaining", "37")
    })
    .await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/a.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorCode"], "ACCESS_FORBIDDEN");
}

#[tokio::test]
async fn test_origin_outage_maps_to_bad_gateway() {
    let origin = start_mock_origin(|_| async { OriginResponse::status(503) }).await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/a.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorCode"], "GITHUB_API_ERROR");
}

#[tokio::test]
async fn test_preflight_answers_any_path() {
    let origin = start_mock_origin(|_| async { OriginResponse::ok(b"") }).await;
    let base = start_proxy(origin).await;
    let client = client();

    for path in ["/files/a.txt", "/", "/definitely/not/a/route"] {
        let res = client
            .request(reqwest::Method::OPTIONS, format!("{base}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 204);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["access-control-allow-methods"], "GET, OPTIONS");
        assert_eq!(
            res.headers()["access-control-allow-headers"],
            "Content-Type, Authorization"
        );
        assert_eq!(res.headers()["access-control-max-age"], "86400");
        assert!(res.bytes().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_non_get_on_file_route_is_rejected() {
    let origin = start_mock_origin(|_| async { OriginResponse::ok(b"") }).await;
    let base = start_proxy(origin).await;

    let res = client()
        .post(format!("{base}/files/a.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["errorCode"], "BAD_REQUEST");
    assert_eq!(body["details"], "POST");
}

#[tokio::test]
async fn test_unmatched_paths_serve_documentation() {
    let origin = start_mock_origin(|_| async { OriginResponse::ok(b"") }).await;
    let base = start_proxy(origin).await;
    let client = client();

    for path in ["/", "/about", "/api/nope"] {
        let res = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
        let page = res.text().await.unwrap();
        // configured defaults are substituted into the page
        assert!(page.contains("unel"));
        assert!(!page.contains("{{DEFAULT_OWNER}}"));
    }
}

#[tokio::test]
async fn test_favicon_routes() {
    let origin = start_mock_origin(|_| async { OriginResponse::ok(b"") }).await;
    let base = start_proxy(origin).await;
    let client = client();

    let res = client.get(format!("{base}/favicon.ico")).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/favicon.svg");

    let res = client.get(format!("{base}/favicon.svg")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/svg+xml");
    assert_eq!(res.headers()["cache-control"], "public, max-age=86400");
}

#[tokio::test]
async fn test_compresses_large_text_bodies() {
    let body = "all work and no play makes jack a dull boy\n".repeat(50);
    let origin = start_mock_origin(move |_| {
        let body = body.clone();
        async move { OriginResponse::ok(body.as_bytes()).with_header("Content-Type", "text/plain") }
    })
    .await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/a.txt"))
        .header("Accept-Encoding", "br, gzip")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    // brotli is unsupported; gzip is picked out of the list
    assert_eq!(res.headers()["content-encoding"], "gzip");
    let compressed = res.bytes().await.unwrap();
    assert!(compressed.len() < 50 * "all work and no play makes jack a dull boy\n".len());
}

#[tokio::test]
async fn test_small_bodies_are_not_compressed() {
    let origin = start_mock_origin(|_| async {
        OriginResponse::ok(b"tiny").with_header("Content-Type", "text/plain")
    })
    .await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/a.txt"))
        .header("Accept-Encoding", "gzip")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.headers().get("content-encoding").is_none());
    assert_eq!(res.text().await.unwrap(), "tiny");
}

#[tokio::test]
async fn test_cache_hit_skips_second_origin_fetch() {
    let fetches = Arc::new(AtomicU32::new(0));
    let counter = fetches.clone();
    let origin = start_mock_origin(move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            OriginResponse::ok(b"cached content").with_header("Content-Type", "text/plain")
        }
    })
    .await;
    let base = start_proxy(origin).await;
    let client = client();
    let url = format!("{base}/files/a.txt");

    let first = client.get(&url).send().await.unwrap();
    assert_eq!(first.status(), 200);

    // the cache store is fire-and-forget; give it a beat to land
    tokio::time::sleep(Duration::from_millis(200)).await;

    let second = client.get(&url).send().await.unwrap();
    assert_eq!(second.status(), 200);
    assert_eq!(second.text().await.unwrap(), "cached content");

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let fetches = Arc::new(AtomicU32::new(0));
    let counter = fetches.clone();
    let origin = start_mock_origin(move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            OriginResponse::status(404)
        }
    })
    .await;
    let base = start_proxy(origin).await;
    let client = client();
    let url = format!("{base}/files/a.txt");

    assert_eq!(client.get(&url).send().await.unwrap().status(), 404);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(client.get(&url).send().await.unwrap().status(), 404);

    // both requests reached the origin
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_ref_variants_are_cached_separately() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let record = seen.clone();
    let origin = start_mock_origin(move |request| {
        let record = record.clone();
        async move {
            let line = request.lines().next().unwrap_or_default().to_string();
            record.lock().unwrap().push(line);
            OriginResponse::ok(b"content").with_header("Content-Type", "text/plain")
        }
    })
    .await;
    let base = start_proxy(origin).await;
    let client = client();

    client.get(format!("{base}/files/a.txt")).send().await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    client
        .get(format!("{base}/files/a.txt?ref=v1.0.0"))
        .send()
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let lines = seen.lock().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|l| l.contains("/unel/git-proxy/main/a.txt")));
    assert!(lines.iter().any(|l| l.contains("/unel/git-proxy/v1.0.0/a.txt")));
}

#[tokio::test]
async fn test_extension_fallback_when_origin_has_no_content_type() {
    let origin = start_mock_origin(|_| async { OriginResponse::ok(b"{\"a\":1}") }).await;
    let base = start_proxy(origin).await;

    let res = client()
        .get(format!("{base}/files/data.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["content-type"], "application/json; charset=utf-8");
}
