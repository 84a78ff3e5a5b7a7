use crate::metrics::observation::EquityObservation;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

//the underwater window around a drawdown point
//
//start is the first observation after equity left the high-water mark (or the
//first observation when the series opens underwater), end is the first return
//to the mark at or after the trough (or the final observation when equity
//never recovers). a trough sitting at the mark is a zero-length episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownEpisode {
    pub start: usize,
    pub trough: usize,
    pub end: usize,
    pub started_at: DateTime<Utc>,
    pub bottomed_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub depth: f64,
    pub recovered: bool,
}

impl DrawdownEpisode {
    //locates the episode containing index `trough`, None when out of range
    pub fn around(observations: &[EquityObservation], trough: usize) -> Option<Self> {
        let bottom = observations.get(trough)?;

        if bottom.is_at_peak() {
            return Some(DrawdownEpisode {
                start: trough,
                trough,
                end: trough,
                started_at: bottom.timestamp,
                bottomed_at: bottom.timestamp,
                ended_at: bottom.timestamp,
                depth: bottom.drawdown,
                recovered: true,
            });
        }

        //last peak strictly before the trough, the episode opens one step later
        let start = observations[..trough]
            .iter()
            .rposition(EquityObservation::is_at_peak)
            .map_or(0, |peak| peak + 1);

        let recovery = observations[trough..]
            .iter()
            .position(EquityObservation::is_at_peak)
            .map(|offset| trough + offset);
        let end = recovery.unwrap_or(observations.len() - 1);

        Some(DrawdownEpisode {
            start,
            trough,
            end,
            started_at: observations[start].timestamp,
            bottomed_at: bottom.timestamp,
            ended_at: observations[end].timestamp,
            depth: bottom.drawdown,
            recovered: recovery.is_some(),
        })
    }

    //time from leaving the peak to recovery (or series end)
    pub fn duration(&self) -> Duration {
        self.ended_at - self.started_at
    }

    //time from leaving the peak to the bottom
    pub fn time_to_trough(&self) -> Duration {
        self.bottomed_at - self.started_at
    }

    //number of periods spanned by the episode
    pub fn periods(&self) -> usize {
        self.end - self.start
    }
}
