pub mod dag_model;
pub mod error;
pub mod graph_extension;
pub mod output_log;
pub mod platform;
pub mod rtdag;
pub mod solution;
pub mod tables;
pub mod util;
