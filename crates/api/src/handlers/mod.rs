//! HTTP request handlers, grouped by resource.

pub mod dashboard;
pub mod items;
pub mod pipeline;
pub mod queue;
pub mod review;
pub mod sources;
