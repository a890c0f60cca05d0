//! Command implementations, one per chart

pub mod box_whisker;
pub mod search_trends;
pub mod trend;
