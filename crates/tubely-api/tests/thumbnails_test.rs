//! Thumbnail upload and retrieval integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use helpers::auth::bearer;
use helpers::fixtures::{create_minimal_png, file_form, thumbnail_form};
use helpers::media::FakeProber;
use helpers::{
    setup_test_app, setup_test_app_from, setup_test_app_with, TestAppOptions, ASSETS_BASE_URL,
};
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn test_thumbnail_upload_and_fetch_round_trip() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);
    let png = create_minimal_png();

    let response = app
        .client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(owner)))
        .multipart(thumbnail_form(png.clone()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], video.id.to_string());
    assert_eq!(body["ownerId"], owner.to_string());
    let thumbnail_url = body["thumbnailURL"].as_str().expect("thumbnailURL").to_string();
    let name = thumbnail_url
        .strip_prefix(&format!("{}/", ASSETS_BASE_URL))
        .expect("thumbnail should live under the assets URL");
    assert!(name.ends_with(".png"));
    assert_eq!(name.len(), 64 + ".png".len());
    assert_eq!(app.stored_assets(), 1);
    assert_eq!(app.record(video.id).thumbnail_url.as_deref(), Some(thumbnail_url.as_str()));

    // Served back by video id, without a token.
    let fetched = app
        .client()
        .get(&format!("/thumbnails/{}", video.id))
        .await;
    assert_eq!(fetched.status_code(), 200);
    assert_eq!(fetched.header("content-type"), "image/png");
    assert_eq!(fetched.header("cache-control"), "no-store");
    assert_eq!(fetched.as_bytes().as_ref(), png.as_slice());

    // And as a static asset.
    let asset = app.client().get(&format!("/assets/{}", name)).await;
    assert_eq!(asset.status_code(), 200);
    assert_eq!(asset.as_bytes().as_ref(), png.as_slice());
}

#[tokio::test]
async fn test_replacing_thumbnail_removes_previous_asset() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);

    for _ in 0..2 {
        let response = app
            .client()
            .post(&format!("/thumbnails/{}", video.id))
            .add_header("Authorization", bearer(&app.token_for(owner)))
            .multipart(thumbnail_form(create_minimal_png()))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    assert_eq!(app.stored_assets(), 1);
    let current = app.record(video.id).thumbnail_url.expect("thumbnail_url");
    let name = current
        .strip_prefix(&format!("{}/", ASSETS_BASE_URL))
        .expect("thumbnail should live under the assets URL");
    let asset = app.client().get(&format!("/assets/{}", name)).await;
    assert_eq!(asset.status_code(), 200);
}

#[tokio::test]
async fn test_thumbnail_upload_never_runs_media_tools() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);

    app.client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(owner)))
        .multipart(thumbnail_form(create_minimal_png()))
        .await;

    assert_eq!(app.prober.calls(), 0);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn test_thumbnail_for_video_without_one_is_not_found() {
    let app = setup_test_app().await;
    let video = app.draft(Uuid::new_v4());

    let response = app
        .client()
        .get(&format!("/thumbnails/{}", video.id))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Thumbnail not found");
}

#[tokio::test]
async fn test_thumbnail_for_unknown_video_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/thumbnails/{}", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_gif_thumbnail_is_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);

    let response = app
        .client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(owner)))
        .multipart(file_form("thumbnail", b"GIF89a....".to_vec(), "boots.gif", "image/gif"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.stored_assets(), 0);
    assert_eq!(app.record(video.id), video);
}

#[tokio::test]
async fn test_oversized_thumbnail_is_rejected() {
    let app = setup_test_app_with(FakeProber::landscape(), &[("MAX_THUMBNAIL_SIZE_MB", "1")]).await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);

    let mut png = create_minimal_png();
    png.resize(1024 * 1024 + 1, 0);

    let response = app
        .client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(owner)))
        .multipart(thumbnail_form(png))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Thumbnail exceeds the max upload size of 1 MB");
    assert_eq!(app.stored_assets(), 0);
}

#[tokio::test]
async fn test_non_owner_cannot_set_thumbnail() {
    let app = setup_test_app().await;
    let video = app.draft(Uuid::new_v4());

    let response = app
        .client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(Uuid::new_v4())))
        .multipart(thumbnail_form(create_minimal_png()))
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(app.stored_assets(), 0);
}

#[tokio::test]
async fn test_asset_path_traversal_is_rejected() {
    let app = setup_test_app().await;

    let response = app.client().get("/assets/..%2F..%2Fetc%2Fpasswd").await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_unknown_asset_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get("/assets/missing.png").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_record_update_failure_removes_stored_thumbnail() {
    let app = setup_test_app_from(TestAppOptions {
        failing_updates: true,
        ..TestAppOptions::default()
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.draft(owner);

    let response = app
        .client()
        .post(&format!("/thumbnails/{}", video.id))
        .add_header("Authorization", bearer(&app.token_for(owner)))
        .multipart(thumbnail_form(create_minimal_png()))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(app.stored_assets(), 0);
    assert_eq!(app.record(video.id), video);
}
