//! Random names for staged files and stored objects.

use crate::constants::RANDOM_NAME_BYTES;

/// 32 bytes from the thread-local CSPRNG, hex encoded (64 lowercase chars).
pub fn random_name() -> String {
    let bytes: [u8; RANDOM_NAME_BYTES] = rand::random();
    hex::encode(bytes)
}

/// `random_name()` with a file extension attached.
pub fn random_file_name(extension: &str) -> String {
    format!("{}.{}", random_name(), extension.trim_start_matches('.'))
}
