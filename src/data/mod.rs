pub mod loader;

pub use loader::{load_equity_csv, series_from_csv};
