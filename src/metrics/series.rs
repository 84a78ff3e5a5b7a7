use crate::config::{ChronologyCheck, SeriesConfig};
use crate::error::StatsError;
use crate::metrics::episode::DrawdownEpisode;
use crate::metrics::observation::EquityObservation;
use crate::metrics::summary::SeriesSummary;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace, warn};

//running equity statistics for a single backtest run
//
//observations are kept in insertion order, which the caller guarantees is
//chronological. the high-water mark starts as the zero observation and only
//moves up, so drawdowns frozen at append time stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquitySeries {
    observations: Vec<EquityObservation>,
    high_water_mark: EquityObservation,
    low_water_mark: Option<EquityObservation>,
    config: SeriesConfig,
}

impl EquitySeries {
    //creates an empty series with default config
    pub fn new() -> Self {
        Self::default()
    }

    //creates an empty series with the given config
    pub fn with_config(config: SeriesConfig) -> Self {
        EquitySeries {
            observations: Vec::with_capacity(config.initial_capacity),
            high_water_mark: EquityObservation::default(),
            low_water_mark: None,
            config,
        }
    }

    //records the equity for the next period and returns the finalized observation
    pub fn append(&mut self, timestamp: DateTime<Utc>, equity: f64) -> EquityObservation {
        let raw = EquityObservation::new(timestamp, equity);
        self.check_input(&raw);

        let ep = if self.observations.is_empty() {
            raw
        } else {
            self.calc_drawdown(self.calc_period_return(raw))
        };

        if ep.equity > self.high_water_mark.equity {
            debug!(
                timestamp = %ep.timestamp,
                equity = ep.equity,
                previous = self.high_water_mark.equity,
                "new high-water mark"
            );
            self.high_water_mark = ep;
        }

        //NaN compares false against everything, so it must never become the mark
        if !ep.equity.is_nan()
            && self
                .low_water_mark
                .map_or(true, |low| ep.equity < low.equity)
        {
            self.low_water_mark = Some(ep);
        }

        trace!(
            timestamp = %ep.timestamp,
            equity = ep.equity,
            period_return = ep.period_return,
            drawdown = ep.drawdown,
            "equity observation appended"
        );

        self.observations.push(ep);
        ep
    }

    //warns about input the engine accepts but the caller probably did not intend
    fn check_input(&self, raw: &EquityObservation) {
        if !raw.equity.is_finite() {
            warn!(timestamp = %raw.timestamp, equity = raw.equity, "non-finite equity appended");
        }

        if self.config.chronology == ChronologyCheck::Warn {
            if let Some(prev) = self.observations.last() {
                if raw.timestamp < prev.timestamp {
                    warn!(
                        timestamp = %raw.timestamp,
                        previous = %prev.timestamp,
                        "equity observation is earlier than the one before it"
                    );
                }
            }
        }
    }

    //fills in the return against the previous observation
    //
    //a previous equity of zero counts as a 100% return whatever the new value
    fn calc_period_return(&self, mut ep: EquityObservation) -> EquityObservation {
        let prev = match self.observations.last() {
            Some(prev) => prev,
            None => return ep,
        };

        ep.period_return = if prev.equity == 0.0 {
            1.0
        } else {
            (ep.equity - prev.equity) / prev.equity
        };

        ep
    }

    //fills in the drawdown against the current high-water mark, never above zero
    fn calc_drawdown(&self, mut ep: EquityObservation) -> EquityObservation {
        let high = self.high_water_mark.equity;

        ep.drawdown = if high == 0.0 {
            0.0
        } else {
            ((ep.equity - high) / high).min(0.0)
        };

        ep
    }

    //clears all observations and water marks, keeping the config
    pub fn reset(&mut self) {
        self.observations.clear();
        self.high_water_mark = EquityObservation::default();
        self.low_water_mark = None;
    }

    //returns the first observation, or none if empty
    pub fn first(&self) -> Option<&EquityObservation> {
        self.observations.first()
    }

    //returns the last observation, or none if empty
    pub fn last(&self) -> Option<&EquityObservation> {
        self.observations.last()
    }

    pub fn observations(&self) -> &[EquityObservation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EquityObservation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    //highest equity seen so far (the zero observation before any is appended)
    pub fn high_water_mark(&self) -> &EquityObservation {
        &self.high_water_mark
    }

    //lowest equity seen so far
    pub fn low_water_mark(&self) -> Option<&EquityObservation> {
        self.low_water_mark.as_ref()
    }

    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    //period returns in order
    pub fn returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|ep| ep.period_return)
    }

    //drawdowns in order
    pub fn drawdowns(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|ep| ep.drawdown)
    }

    //returns the total return from first to last observation
    //
    //a first equity of zero is not guarded and yields inf or NaN
    pub fn total_return(&self) -> Result<f64, StatsError> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Ok((last.equity - first.equity) / first.equity),
            _ => Err(StatsError::EmptySeries),
        }
    }

    //returns the index and value of the observation with the deepest drawdown
    //
    //ties go to the earliest observation. an empty series yields
    //(0, EquityObservation::default())
    pub fn max_drawdown_point(&self) -> (usize, EquityObservation) {
        let mut deepest: Option<(usize, &EquityObservation)> = None;

        for (i, ep) in self.observations.iter().enumerate() {
            if deepest.map_or(true, |(_, best)| ep.drawdown < best.drawdown) {
                deepest = Some((i, ep));
            }
        }

        deepest.map(|(i, ep)| (i, *ep)).unwrap_or_default()
    }

    //deepest drawdown as a fraction (0 if empty)
    pub fn max_drawdown(&self) -> f64 {
        self.max_drawdown_point().1.drawdown
    }

    //time of the deepest drawdown (zero timestamp if empty)
    pub fn max_drawdown_time(&self) -> DateTime<Utc> {
        self.max_drawdown_point().1.timestamp
    }

    //the underwater episode containing the deepest drawdown
    pub fn max_drawdown_episode(&self) -> Option<DrawdownEpisode> {
        if self.observations.is_empty() {
            return None;
        }

        let (trough, _) = self.max_drawdown_point();
        DrawdownEpisode::around(&self.observations, trough)
    }

    //length of the underwater episode containing the deepest drawdown
    //
    //measured from the first observation below the peak, not the peak itself,
    //so a single bar underwater that never recovers has zero duration
    pub fn max_drawdown_duration(&self) -> Duration {
        if self.observations.len() < 2 {
            return Duration::zero();
        }

        self.max_drawdown_episode()
            .map_or_else(Duration::zero, |episode| episode.duration())
    }

    //snapshot of every aggregate for reporting
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary::from_series(self)
    }
}

impl Extend<(DateTime<Utc>, f64)> for EquitySeries {
    fn extend<I: IntoIterator<Item = (DateTime<Utc>, f64)>>(&mut self, iter: I) {
        for (timestamp, equity) in iter {
            self.append(timestamp, equity);
        }
    }
}

impl<'a> IntoIterator for &'a EquitySeries {
    type Item = &'a EquityObservation;
    type IntoIter = std::slice::Iter<'a, EquityObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
