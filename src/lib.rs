#![allow(async_fn_in_trait)]
pub mod config;
pub mod error;
pub mod extract;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod provider;
pub mod query;
