//! Tubely Processing Library
//!
//! Upload validation, local staging and the external media tools (`ffprobe`,
//! `ffmpeg`) the upload pipeline shells out to.

pub mod command;
pub mod error;
pub mod metadata;
pub mod normalize;
pub mod probe;
pub mod staging;
pub mod traits;
pub mod validator;

pub use command::{ToolOutput, ToolRunner};
pub use error::{MediaError, MediaResult};
pub use metadata::VideoMetadata;
pub use normalize::{processed_path_for, FastStartNormalizer};
pub use probe::{parse_probe_output, FfprobeProber};
pub use staging::{StagedFile, StagingArea};
pub use traits::{MediaNormalize, MediaProbe};
pub use validator::{UploadValidator, ValidationError};
