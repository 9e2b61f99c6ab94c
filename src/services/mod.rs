pub mod aggregator;
pub mod format;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod resolver;
pub mod similarity;
