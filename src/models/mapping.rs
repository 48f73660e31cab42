use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::measurement::Measurement;
use super::record::LandRecord;

/// Measurements of one year, keyed by country in first-seen order.
pub type CountryMeasurements = IndexMap<String, Vec<Measurement>>;

/// The normalized year -> country -> measurements mapping.
///
/// Keys are kept in the order they were first encountered and each
/// measurement list keeps input row order. Serializes to the same shape as
/// the intermediate `land.json` artifact:
/// `{"2000": {"France": [{"name": ..., "value": ...}]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandMapping {
    years: IndexMap<String, CountryMeasurements>,
}

impl LandMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from records, preserving their order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = LandRecord>,
    {
        let mut mapping = Self::new();
        for record in records {
            mapping.insert(&record);
        }
        mapping
    }

    pub(crate) fn insert(&mut self, record: &LandRecord) {
        self.years
            .entry(record.year.clone())
            .or_default()
            .entry(record.country.clone())
            .or_default()
            .push(record.to_measurement());
    }

    /// Years in first-seen order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// Countries reported for `year`, in first-seen order.
    pub fn year(&self, year: &str) -> Option<&CountryMeasurements> {
        self.years.get(year)
    }

    /// Measurements for one (year, country) pair, in input row order.
    pub fn measurements(&self, year: &str, country: &str) -> Option<&[Measurement]> {
        self.years
            .get(year)
            .and_then(|countries| countries.get(country))
            .map(Vec::as_slice)
    }

    /// Iterate `(year, countries)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryMeasurements)> {
        self.years.iter().map(|(y, c)| (y.as_str(), c))
    }

    pub fn num_years(&self) -> usize {
        self.years.len()
    }

    /// Total number of measurement entries across all years and countries.
    pub fn num_measurements(&self) -> usize {
        self.years
            .values()
            .flat_map(|countries| countries.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<LandRecord> for LandMapping {
    fn from_iter<I: IntoIterator<Item = LandRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, country: &str, year: &str, name: &str, value: f64) -> LandRecord {
        LandRecord {
            line,
            country: country.to_string(),
            year: year.to_string(),
            measurement: name.to_string(),
            raw_value: value.to_string(),
            value: Some(value),
        }
    }

    #[test]
    fn test_groups_by_year_then_country() {
        let mapping = LandMapping::from_records(vec![
            record(1, "France", "2000", "Forest", 100.0),
            record(2, "Spain", "2000", "Forest", 50.0),
            record(3, "France", "2010", "Forest", 110.0),
            record(4, "France", "2000", "Land", 500.0),
        ]);

        assert_eq!(mapping.num_years(), 2);
        assert_eq!(mapping.num_measurements(), 4);
        let france = mapping.measurements("2000", "France").unwrap();
        assert_eq!(france.len(), 2);
        assert_eq!(france[0].name, "Forest");
        assert_eq!(france[1].name, "Land");
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let mapping: LandMapping = vec![
            record(1, "Spain", "2010", "Forest", 1.0),
            record(2, "Chad", "2000", "Forest", 2.0),
            record(3, "Austria", "2010", "Forest", 3.0),
        ]
        .into_iter()
        .collect();

        let years: Vec<&str> = mapping.years().collect();
        assert_eq!(years, vec!["2010", "2000"]);
        let countries: Vec<&String> = mapping.year("2010").unwrap().keys().collect();
        assert_eq!(countries, vec!["Spain", "Austria"]);
    }

    #[test]
    fn test_missing_lookup() {
        let mapping = LandMapping::new();
        assert!(mapping.is_empty());
        assert!(mapping.year("2000").is_none());
        assert!(mapping.measurements("2000", "France").is_none());
    }

    #[test]
    fn test_serializes_as_nested_objects() {
        let mapping = LandMapping::from_records(vec![record(1, "France", "2000", "Forest", 100.0)]);
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"2000":{"France":[{"name":"Forest","value":100.0}]}}"#);
    }
}
