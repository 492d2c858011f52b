pub mod playback;
pub mod upload;
