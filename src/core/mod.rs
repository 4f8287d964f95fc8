pub mod concurrent;
pub mod config;
pub mod counter;
pub mod profiler;

pub use concurrent::SharedProfiler;
pub use config::Config;
pub use counter::TaxonomyCounter;
pub use profiler::TaxonomyProfiler;
