//! Read-only JSON API over the Titanic passenger list.
//!
//! Startup runs in stages: [`config`], [`logging`], [`provision`] (make sure
//! the CSV exists), then [`query`] loads it once and [`server`] shares the
//! loaded engine with every request.

pub mod config;
pub mod dataset;
pub mod fetch;
pub mod logging;
pub mod provision;
pub mod query;
pub mod record;
pub mod server;

pub use config::Config;
pub use dataset::IdPolicy;
pub use query::{QueryEngine, QueryError};
pub use record::Passenger;
