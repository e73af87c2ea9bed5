pub mod config;
pub mod counter;
pub mod dataset;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod output;
pub mod script;
pub mod size;
