mod common;

use apodview::browse;
use apodview::routes::Route;
use common::{catalogue, today, viewer, FakeApi};

async fn session(script: &str) -> (String, std::sync::Arc<FakeApi>) {
    let api = FakeApi::new(catalogue());
    let mut v = viewer(api.clone()).await;
    let mut out: Vec<u8> = Vec::new();
    browse::run(&mut v, Route::parse("/search", None), None, today(), script.as_bytes(), &mut out).await.unwrap();
    (String::from_utf8(out).unwrap(), api)
}

#[tokio::test]
async fn pick_then_page_through_details() {
    let (out, api) = session("1\nn\nn\np\nq\n").await;
    assert!(out.contains("[/apod/2024-03-02]"));
    assert!(out.contains("[/apod/2024-03-01]"));
    assert!(out.contains("[/apod/2024-02-28]"));
    assert_eq!(out.matches("[/apod/2024-03-01]").count(), 2);
    // One range fetch; every detail came from the cache.
    assert_eq!(api.request_count(), 1);
}

#[tokio::test]
async fn paths_and_errors_are_handled_inline() {
    let (out, _) = session("/gallery?media=video\n9\nfly\n/nowhere\n").await;
    assert!(out.contains("[/gallery?media=video]"));
    assert!(out.contains("Rocket Launch [▶ video]"));
    assert!(out.contains("no entry #9 in the last list"));
    assert!(out.contains("unknown command: fly"));
    assert!(out.contains("Not found: /nowhere"));
}
