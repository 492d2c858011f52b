pub mod media;
pub mod video;

pub use media::{AspectRatio, UploadKind};
pub use video::{CreateVideoRequest, Video};
