//! Video record store
//!
//! [`VideoRepository`] is the seam handlers depend on. [`PgVideoRepository`]
//! backs it with PostgreSQL; the `test-helpers` feature adds an in-memory
//! implementation.

pub mod video;

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryVideoRepository;
pub use video::{PgVideoRepository, VideoRepository};
