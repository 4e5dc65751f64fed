pub mod artifact_pipeline;

pub use artifact_pipeline::{ArtifactPipeline, Artifacts, PipelineResult};
