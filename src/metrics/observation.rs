use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//a single point on the equity curve
//
//period_return and drawdown are filled in by EquitySeries::append and frozen
//from then on. the Default value is the zero observation (epoch timestamp,
//all numeric fields zero) used as the "nothing here" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquityObservation {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
    pub period_return: f64,
    pub drawdown: f64,
}

impl EquityObservation {
    //creates a raw observation with no derived fields yet
    pub fn new(timestamp: DateTime<Utc>, equity: f64) -> Self {
        EquityObservation {
            timestamp,
            equity,
            period_return: 0.0,
            drawdown: 0.0,
        }
    }

    //true when the observation sits at (or above) the running peak
    pub fn is_at_peak(&self) -> bool {
        self.drawdown == 0.0
    }

    //drawdown as a percentage, eg -13.64
    pub fn drawdown_pct(&self) -> f64 {
        self.drawdown * 100.0
    }
}
