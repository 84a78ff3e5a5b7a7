pub mod series_config;

pub use series_config::{ChronologyCheck, SeriesConfig};
