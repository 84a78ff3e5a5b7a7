pub mod episode;
pub mod observation;
pub mod series;
pub mod summary;

pub use episode::DrawdownEpisode;
pub use observation::EquityObservation;
pub use series::EquitySeries;
pub use summary::SeriesSummary;
