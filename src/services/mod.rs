pub mod materialize_service;
pub mod index_service;
pub mod publish_service;
pub mod pipeline_service;
pub mod site_service;
pub mod preview_service;

pub use materialize_service::MaterializeService;
pub use index_service::{IndexReport, IndexService};
pub use publish_service::PublishService;
pub use pipeline_service::{PipelineService, RunOutcome};
pub use site_service::{RebuildReport, SiteService};
pub use preview_service::{PreviewReport, PreviewService};
