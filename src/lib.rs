//equity curve statistics and drawdown analysis for strategy backtests

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;

pub use error::StatsError;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ChronologyCheck, SeriesConfig};
    pub use crate::data::{load_equity_csv, series_from_csv};
    pub use crate::error::StatsError;
    pub use crate::metrics::{DrawdownEpisode, EquityObservation, EquitySeries, SeriesSummary};
}
