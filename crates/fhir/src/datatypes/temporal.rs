use crate::validation::ValidationError;
use fhir_types::DateTime;

fhir_record! {
    /// A time range defined by start and end date/times. Either bound may be open.
    datatype Period("Period") builder PeriodBuilder check period_rules {
        /// Starting time with inclusive boundary.
        optional start("start"): DateTime,
        /// End time with inclusive boundary, if not ongoing.
        optional end("end"): DateTime,
    }
}

impl Period {
    /// `true` if `instant` lies within the period. Open bounds match everything on that side.
    pub fn contains(&self, instant: &DateTime) -> bool {
        let after_start = match (&self.start, instant.upper_bound()) {
            (Some(start), Some(at)) => start.lower_bound().is_some_and(|s| s <= at),
            _ => true,
        };
        let before_end = match (&self.end, instant.lower_bound()) {
            (Some(end), Some(at)) => end.upper_bound().is_some_and(|e| at <= e),
            _ => true,
        };
        after_start && before_end
    }
}

/// per-1: if present, start SHALL have a lower value than end.
///
/// Bounds of different precision are compared on the instants they cover, so `2020` to
/// `2020-06-01` is a valid period.
fn period_rules(period: &Period) -> Result<(), ValidationError> {
    let (Some(start), Some(end)) = (&period.start, &period.end) else {
        return Ok(());
    };
    match (start.lower_bound(), end.upper_bound()) {
        (Some(s), Some(e)) if s > e => Err(ValidationError::invariant(
            Period::ELEMENT,
            "per-1",
            format!("start {start} is after end {end}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FhirError;

    fn dt(text: &str) -> DateTime {
        DateTime::parse(text).expect("valid dateTime")
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = Period::builder()
            .start(dt("2023-02-01"))
            .end(dt("2023-01-01"))
            .build()
            .expect_err("inverted period");
        match err {
            FhirError::Validation(ValidationError::Invariant { key, message, .. }) => {
                assert_eq!(key, "per-1");
                assert!(message.contains("2023-02-01"));
            }
            other => panic!("expected per-1, got {other:?}"),
        }
    }

    #[test]
    fn mixed_precision_bounds_overlap() {
        let period = Period::builder()
            .start(dt("2020"))
            .end(dt("2020-06-01"))
            .build()
            .expect("valid period");
        assert!(period.contains(&dt("2020-03-15T12:00:00Z")));
        assert!(!period.contains(&dt("2021-01-01")));
    }

    #[test]
    fn open_ended_period_is_valid() {
        let ongoing = Period::builder()
            .start(dt("2023-01-01"))
            .build()
            .expect("valid period");
        assert!(ongoing.end().is_none());
        assert!(ongoing.contains(&dt("2099-12-31")));
    }
}
