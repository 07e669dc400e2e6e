//! metro-quotients - sector share quotient statistics for U.S. metros
//!
//! For each metro area, every industry sector's share of local
//! employment (or establishments) is divided by the same sector's
//! national share. The resulting quotients are summarized per metro,
//! metros are grouped into quantile bins by the variance of their
//! quotients, and the report can be plotted as variance against
//! population.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod report;

pub use error::Error;
