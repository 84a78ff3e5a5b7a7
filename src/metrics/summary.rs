use crate::metrics::series::EquitySeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//aggregate statistics for an equity series, ready for a reporting layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub observations: usize,
    pub first_equity: Option<f64>,
    pub last_equity: Option<f64>,
    //inf and NaN (zero first equity) are written as strings, null means empty
    #[serde(with = "non_finite")]
    pub total_return: Option<f64>,
    pub high_water_mark: Option<f64>,
    pub low_water_mark: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_time: Option<DateTime<Utc>>,
    pub max_drawdown_duration_secs: i64,
    pub recovered: Option<bool>,
}

impl SeriesSummary {
    //collects every aggregate query of the series
    pub fn from_series(series: &EquitySeries) -> Self {
        let episode = series.max_drawdown_episode();

        //the mark is still the zero sentinel until a positive equity arrives
        let high = series.high_water_mark().equity;
        let high_water_mark = (high > 0.0).then_some(high);

        SeriesSummary {
            observations: series.len(),
            first_equity: series.first().map(|ep| ep.equity),
            last_equity: series.last().map(|ep| ep.equity),
            total_return: series.total_return().ok(),
            high_water_mark,
            low_water_mark: series.low_water_mark().map(|ep| ep.equity),
            max_drawdown: series.max_drawdown(),
            max_drawdown_time: episode.map(|e| e.bottomed_at),
            max_drawdown_duration_secs: series.max_drawdown_duration().num_seconds(),
            recovered: episode.map(|e| e.recovered),
        }
    }

    //max drawdown as a percentage
    pub fn max_drawdown_pct(&self) -> f64 {
        self.max_drawdown * 100.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//json has no inf or NaN, so keep them as "inf", "-inf" and "NaN" instead of null
mod non_finite {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_none(),
            Some(v) if v.is_nan() => serializer.serialize_str("NaN"),
            Some(v) if *v == f64::INFINITY => serializer.serialize_str("inf"),
            Some(v) if *v == f64::NEG_INFINITY => serializer.serialize_str("-inf"),
            Some(v) => serializer.serialize_f64(*v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Text(text)) => match text.as_str() {
                "NaN" => Ok(Some(f64::NAN)),
                "inf" => Ok(Some(f64::INFINITY)),
                "-inf" => Ok(Some(f64::NEG_INFINITY)),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"NaN\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 9, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn summary_of_empty_series() {
        let summary = EquitySeries::new().summary();

        assert_eq!(summary.observations, 0);
        assert!(summary.first_equity.is_none());
        assert!(summary.total_return.is_none());
        assert!(summary.high_water_mark.is_none());
        assert!(summary.max_drawdown_time.is_none());
        assert!(summary.recovered.is_none());
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.max_drawdown_duration_secs, 0);
    }

    #[test]
    fn summary_of_recovered_run() {
        let mut series = EquitySeries::new();
        series.extend(vec![
            (day(25), 100.0),
            (day(26), 110.0),
            (day(27), 105.0),
            (day(28), 95.0),
            (day(29), 115.0),
        ]);

        let summary = series.summary();

        assert_eq!(summary.observations, 5);
        assert_eq!(summary.first_equity, Some(100.0));
        assert_eq!(summary.last_equity, Some(115.0));
        assert!((summary.total_return.unwrap() - 0.15).abs() < 1e-12);
        assert_eq!(summary.high_water_mark, Some(115.0));
        assert_eq!(summary.low_water_mark, Some(95.0));
        assert!((summary.max_drawdown - -0.1364).abs() < 1e-4);
        assert!((summary.max_drawdown_pct() - -13.64).abs() < 1e-2);
        assert_eq!(summary.max_drawdown_time, Some(day(28)));
        assert_eq!(summary.max_drawdown_duration_secs, 48 * 3600);
        assert_eq!(summary.recovered, Some(true));
    }

    #[test]
    fn summary_without_a_positive_peak() {
        let mut series = EquitySeries::new();
        series.append(day(25), 0.0);
        series.append(day(26), -5.0);

        let summary = series.summary();

        assert!(summary.high_water_mark.is_none());
        assert_eq!(summary.low_water_mark, Some(-5.0));
    }

    #[test]
    fn summary_serializes_to_json() {
        let mut series = EquitySeries::new();
        series.append(day(25), 100.0);
        series.append(day(26), 90.0);

        let json = series.summary().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["observations"], 2);
        assert_eq!(value["recovered"], false);
        assert_eq!(value["max_drawdown_duration_secs"], 0);
    }

    #[test]
    fn unguarded_total_return_survives_json() {
        let mut series = EquitySeries::new();
        series.append(day(25), 0.0);
        series.append(day(26), 50.0);

        let summary = series.summary();
        assert_eq!(summary.total_return, Some(f64::INFINITY));

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"total_return\": \"inf\""));

        let back: SeriesSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_return, Some(f64::INFINITY));
    }

    #[test]
    fn nan_and_empty_total_return_stay_distinct_in_json() {
        let mut flat = EquitySeries::new();
        flat.append(day(25), 0.0);
        flat.append(day(26), 0.0);

        let json = flat.summary().to_json().unwrap();
        let back: SeriesSummary = serde_json::from_str(&json).unwrap();
        assert!(back.total_return.unwrap().is_nan());

        let json = EquitySeries::new().summary().to_json().unwrap();
        assert!(json.contains("\"total_return\": null"));
        let back: SeriesSummary = serde_json::from_str(&json).unwrap();
        assert!(back.total_return.is_none());
    }

    #[test]
    fn finite_total_return_stays_a_number() {
        let mut series = EquitySeries::new();
        series.append(day(25), 100.0);
        series.append(day(26), 125.0);

        let value: serde_json::Value =
            serde_json::from_str(&series.summary().to_json().unwrap()).unwrap();
        assert_eq!(value["total_return"], 0.25);

        let unknown = r#"{"observations":0,"first_equity":null,"last_equity":null,
            "total_return":"lots","high_water_mark":null,"low_water_mark":null,
            "max_drawdown":0.0,"max_drawdown_time":null,"max_drawdown_duration_secs":0,
            "recovered":null}"#;
        assert!(serde_json::from_str::<SeriesSummary>(unknown).is_err());
    }
}
