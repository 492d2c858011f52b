//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs in process: records live in the in-memory repository, the
//! object store and the assets directory are `LocalStorage` in temp dirs, and
//! the media tools are fakes. Run with `cargo test -p tubely-api`.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod media;
pub mod storage;

use axum_test::TestServer;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::JwtService;
use tubely_api::setup::routes;
use tubely_api::state::{AppState, MediaState};
use tubely_core::{Config, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::StagingArea;
use tubely_storage::{LocalStorage, Storage};
use uuid::Uuid;

use media::{FakeNormalizer, FakeProber};
use storage::{FailingStorage, FailingUpdates};

pub const OBJECT_BASE_URL: &str = "https://cdn.example.com";
pub const ASSETS_BASE_URL: &str = "http://localhost:8091/assets";

/// Test application: server plus handles on everything it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoRepository,
    pub jwt: JwtService,
    pub prober: FakeProber,
    pub normalizer: FakeNormalizer,
    pub objects_dir: TempDir,
    pub assets_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Token for `user_id`, signed with the app's secret.
    pub fn token_for(&self, user_id: Uuid) -> String {
        auth::token_for(&self.jwt, user_id)
    }

    /// A draft record owned by `user_id`.
    pub fn draft(&self, user_id: Uuid) -> Video {
        self.videos.insert_draft(user_id, "Boot camp")
    }

    pub fn record(&self, id: Uuid) -> Video {
        self.videos.snapshot(id).expect("record should exist")
    }

    pub fn staged_files(&self) -> usize {
        count_files(self.staging_dir.path())
    }

    pub fn stored_objects(&self) -> usize {
        count_files(self.objects_dir.path())
    }

    pub fn stored_assets(&self) -> usize {
        count_files(self.assets_dir.path())
    }
}

/// Regular files under `dir`, recursively.
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), auth::TEST_JWT_SECRET.to_string()),
        ("DATABASE_URL".to_string(), "postgres://localhost/tubely_test".to_string()),
        ("S3_BUCKET".to_string(), "tubely-test".to_string()),
        ("S3_REGION".to_string(), "us-east-2".to_string()),
        ("ASSETS_BASE_URL".to_string(), ASSETS_BASE_URL.to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("test config should parse")
}

/// What to swap into a test app; the defaults all succeed.
pub struct TestAppOptions {
    pub prober: FakeProber,
    pub normalizer: FakeNormalizer,
    /// Uploads to the object store fail.
    pub failing_storage: bool,
    /// Record updates fail after the upload work is done.
    pub failing_updates: bool,
    pub overrides: Vec<(&'static str, &'static str)>,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            prober: FakeProber::landscape(),
            normalizer: FakeNormalizer::default(),
            failing_storage: false,
            failing_updates: false,
            overrides: Vec::new(),
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_from(TestAppOptions::default()).await
}

/// Setup a test app around `prober`; `overrides` are applied on top of the
/// default test config.
pub async fn setup_test_app_with(
    prober: FakeProber,
    overrides: &[(&'static str, &'static str)],
) -> TestApp {
    setup_test_app_from(TestAppOptions {
        prober,
        overrides: overrides.to_vec(),
        ..TestAppOptions::default()
    })
    .await
}

pub async fn setup_test_app_from(options: TestAppOptions) -> TestApp {
    let TestAppOptions {
        prober,
        normalizer,
        failing_storage,
        failing_updates,
        overrides,
    } = options;

    let objects_dir = tempfile::tempdir().expect("temp dir");
    let assets_dir = tempfile::tempdir().expect("temp dir");
    let staging_dir = tempfile::tempdir().expect("temp dir");

    let config = test_config(&overrides);

    let objects = LocalStorage::new(objects_dir.path(), OBJECT_BASE_URL.to_string())
        .await
        .expect("object storage");
    let storage: Arc<dyn Storage> = if failing_storage {
        Arc::new(FailingStorage::new(objects))
    } else {
        Arc::new(objects)
    };
    let assets = LocalStorage::new(assets_dir.path(), ASSETS_BASE_URL.to_string())
        .await
        .expect("assets storage");

    let videos = InMemoryVideoRepository::new();
    let repository: Arc<dyn VideoRepository> = if failing_updates {
        Arc::new(FailingUpdates::new(videos.clone()))
    } else {
        Arc::new(videos.clone())
    };
    let jwt = JwtService::new(auth::TEST_JWT_SECRET);

    let state = Arc::new(AppState {
        config,
        videos: repository,
        storage,
        assets: Arc::new(assets),
        media: MediaState {
            prober: Arc::new(prober.clone()),
            normalizer: Arc::new(normalizer.clone()),
            staging: StagingArea::new(staging_dir.path()),
        },
        jwt: Arc::new(jwt.clone()),
    });

    let app = routes::setup_routes(state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        jwt,
        prober,
        normalizer,
        objects_dir,
        assets_dir,
        staging_dir,
    }
}
