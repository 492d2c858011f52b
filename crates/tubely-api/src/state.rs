//! Application state shared by every handler.
//!
//! Handlers receive `State<Arc<AppState>>`. Nothing in here is mutated after
//! startup.

use crate::auth::JwtService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{MediaNormalize, MediaProbe, StagingArea};
use tubely_storage::{LocalStorage, Storage};

/// External tools and the staging directory used by the upload pipeline.
#[derive(Clone)]
pub struct MediaState {
    pub prober: Arc<dyn MediaProbe>,
    pub normalizer: Arc<dyn MediaNormalize>,
    pub staging: StagingArea,
}

pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    /// Object store published videos go to.
    pub storage: Arc<dyn Storage>,
    /// Local directory thumbnails are persisted to and served from.
    pub assets: Arc<LocalStorage>,
    pub media: MediaState,
    pub jwt: Arc<JwtService>,
}
