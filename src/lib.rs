pub mod compare;
pub mod config;
pub mod markdown;
pub mod output;
pub mod report;
