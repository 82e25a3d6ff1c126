pub mod dispatcher;
pub mod episode;
pub mod notify;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod resolver;

pub use pipeline::{run, RunSummary};
pub use registry::Registry;
