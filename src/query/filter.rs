use crate::core::{Record, Status};
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: &T) -> bool {
        &self.min <= value && value <= &self.max
    }
}

/// Structured filters; an absent field never rejects a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<ValueRange<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<ValueRange<u64>>,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        self == &Filters::default()
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn age_range(mut self, min: u32, max: u32) -> Self {
        self.age_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn salary_range(mut self, min: u64, max: u64) -> Self {
        self.salary_range = Some(ValueRange::new(min, max));
        self
    }
}

/// Predicate compiled once per evaluation
///
/// The search text is lowercased up front so each record pays only for its
/// own field folding.
pub struct RecordFilter<'a> {
    needle: Option<String>,
    filters: &'a Filters,
}

impl<'a> RecordFilter<'a> {
    pub fn new(text: &str, filters: &'a Filters) -> Self {
        let needle = (!text.is_empty()).then(|| text.to_lowercase());
        Self { needle, filters }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record)
            && self
                .filters
                .department
                .as_ref()
                .is_none_or(|department| &record.department == department)
            && self.filters.status.is_none_or(|status| record.status == status)
            && self.filters.age_range.is_none_or(|range| range.contains(&record.age))
            && self
                .filters
                .salary_range
                .is_none_or(|range| range.contains(&record.salary))
    }

    fn matches_text(&self, record: &Record) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        [&record.name, &record.email, &record.department]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("user-1", "Jane Doe", "jane.doe@company.com")
            .age(30)
            .department("Engineering")
            .salary(80_000)
            .status(Status::Active)
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filters = Filters::default();
        assert!(filters.is_empty());
        assert!(RecordFilter::new("", &filters).matches(&sample()));
    }

    #[test]
    fn test_text_matches_any_field_case_insensitive() {
        let filters = Filters::default();
        assert!(RecordFilter::new("JANE", &filters).matches(&sample()));
        assert!(RecordFilter::new("company.com", &filters).matches(&sample()));
        assert!(RecordFilter::new("eng", &filters).matches(&sample()));
        assert!(!RecordFilter::new("sales", &filters).matches(&sample()));
    }

    #[test]
    fn test_department_is_exact() {
        let filters = Filters::default().department("engineering");
        assert!(!RecordFilter::new("", &filters).matches(&sample()));

        let filters = Filters::default().department("Engineering");
        assert!(RecordFilter::new("", &filters).matches(&sample()));
    }

    #[test]
    fn test_ranges_inclusive() {
        let cases = [
            (30, 30, true),
            (18, 29, false),
            (31, 100, false),
            (18, 100, true),
        ];
        for (min, max, expected) in cases {
            let filters = Filters::default().age_range(min, max);
            assert_eq!(RecordFilter::new("", &filters).matches(&sample()), expected);
        }

        let filters = Filters::default().salary_range(80_000, 90_000);
        assert!(RecordFilter::new("", &filters).matches(&sample()));
        let filters = Filters::default().salary_range(80_001, 90_000);
        assert!(!RecordFilter::new("", &filters).matches(&sample()));
    }

    #[test]
    fn test_all_predicates_must_hold() {
        let filters = Filters::default()
            .department("Engineering")
            .status(Status::Inactive);
        assert!(!RecordFilter::new("jane", &filters).matches(&sample()));
    }
}
