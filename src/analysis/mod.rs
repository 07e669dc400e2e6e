//! Quotient statistics and variance binning.
//!
//! The pieces are independent pure functions; `pipeline` strings them
//! together and does the file loading.

pub mod binning;
pub mod pipeline;
pub mod quotient;
pub mod stats;

pub use binning::{bin_by_variance, bin_index, cut_points};
pub use pipeline::{aggregate, run, AggregateOptions, MetroInput};
pub use quotient::{compute_quotients, national_summary, summarize_metro, MetroQuotients};
pub use stats::Summary;
