//! Statistics computed over grid cells

/// Value ranges, blank masks and grid summaries
pub mod statistics;
