pub mod classifier;
pub mod engine;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod types;
