//! Pure domain logic for the feedwatch admin service.
//!
//! Everything in this crate is side-effect free: status classification,
//! relative-time formatting, the item state machine, and source flag
//! policy all take their inputs (including `now`) as arguments so they
//! can be tested without a clock or a database.

pub mod error;
pub mod health;
pub mod item_status;
pub mod relative_time;
pub mod source;
pub mod types;

pub use error::CoreError;
