pub mod adapters;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harness;
pub mod identity;
pub mod model;
pub mod pipeline;
pub mod regions;
pub mod sports;
