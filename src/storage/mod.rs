pub mod traits;
pub mod fs;

pub use traits::PostRepository;
pub use fs::{ContentDir, FsPostRepository};
