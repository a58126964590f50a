pub mod config;
pub mod logging;

pub mod aggregator;
pub mod candidates;
pub mod checksum;
pub mod pipeline;
pub mod report;
pub mod sink;
