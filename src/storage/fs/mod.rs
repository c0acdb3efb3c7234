pub mod content_dir;
pub mod post_repository;

pub use content_dir::ContentDir;
pub use post_repository::{FsPostRepository, MANIFEST_FILE};
