pub mod classifier;
pub mod composer;
pub mod formatter;
pub mod matcher;
pub mod names;
pub mod pipeline;
pub mod vocabulary;
