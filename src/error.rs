use thiserror::Error;

//errors raised by the statistics engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("could not calculate total return, no equity observations found")]
    EmptySeries,
}
