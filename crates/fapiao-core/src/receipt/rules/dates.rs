//! Purchase-date extraction for Taiwanese receipts.

use chrono::NaiveDate;
use regex::Regex;

use crate::classify::DateDetector;

use super::patterns::{DATE_MDY, DATE_ROC, DATE_YMD};
use super::FieldExtractor;

/// Offset between the Minguo (ROC) calendar and the Gregorian
/// calendar: 民國 113 年 is 2024.
const ROC_YEAR_OFFSET: i32 = 1911;

/// How a three-field numeric date literal is laid out.
#[derive(Debug, Clone, Copy)]
enum DateLayout {
    /// `YYYY[-/.]M[-/.]D`
    YearMonthDay,
    /// `RRR[-/.]M[-/.]D` with a 3-digit Minguo year.
    RocYearMonthDay,
    /// `M[-/.]D[-/.]YYYY`
    MonthDayYear,
}

/// Fallback format table, in priority order.
fn fallback_formats() -> [(&'static Regex, DateLayout); 3] {
    [
        (&DATE_YMD, DateLayout::YearMonthDay),
        (&DATE_ROC, DateLayout::RocYearMonthDay),
        (&DATE_MDY, DateLayout::MonthDayYear),
    ]
}

/// Purchase-date extractor.
///
/// A generic locale-aware detector pass runs first when a
/// [`DateDetector`] is configured; among its candidates the past date
/// closest to the reference date wins, ties broken by first
/// occurrence. When the detector yields nothing (or none is
/// configured) the extractor degrades silently to a regex pass over
/// three literal formats, including Minguo calendar years.
///
/// The reference date is explicit so that "never later than now" is
/// deterministic under test.
pub struct DateExtractor<'a> {
    reference: NaiveDate,
    detector: Option<&'a dyn DateDetector>,
}

impl<'a> DateExtractor<'a> {
    /// Create an extractor resolving "now" to `reference`.
    pub fn new(reference: NaiveDate) -> Self {
        Self {
            reference,
            detector: None,
        }
    }

    /// Attach a generic date-recognition capability.
    pub fn with_detector(mut self, detector: &'a dyn DateDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Closest past date among the detector's candidates, if any.
    fn closest_detected(&self, text: &str) -> Option<NaiveDate> {
        let detector = self.detector?;
        let mut best: Option<NaiveDate> = None;

        for date in detector.detect_dates(text) {
            if date > self.reference {
                continue;
            }
            // Strict comparison keeps the first occurrence on ties.
            let closer = match best {
                Some(current) => self.distance(date) < self.distance(current),
                None => true,
            };
            if closer {
                best = Some(date);
            }
        }

        best
    }

    /// First past date parsed under the fallback format priority.
    fn extract_with_patterns(&self, text: &str) -> Option<NaiveDate> {
        for (pattern, layout) in fallback_formats() {
            for caps in pattern.captures_iter(text) {
                let candidate = match layout {
                    DateLayout::YearMonthDay => parse_triple(&caps[1], &caps[2], &caps[3], 0),
                    DateLayout::RocYearMonthDay => {
                        parse_triple(&caps[1], &caps[2], &caps[3], ROC_YEAR_OFFSET)
                    }
                    DateLayout::MonthDayYear => parse_triple(&caps[3], &caps[1], &caps[2], 0),
                };
                // Impossible triples skip the candidate, not the pass.
                match candidate {
                    Some(date) if date <= self.reference => return Some(date),
                    _ => continue,
                }
            }
        }
        None
    }

    fn distance(&self, date: NaiveDate) -> i64 {
        (self.reference - date).num_days().abs()
    }
}

impl FieldExtractor for DateExtractor<'_> {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        if let Some(date) = self.closest_detected(text) {
            return Some(date);
        }
        self.extract_with_patterns(text)
    }

    /// Every distinct past candidate: detector hits first, then
    /// pattern matches in format priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        if let Some(detector) = self.detector {
            for date in detector.detect_dates(text) {
                if date <= self.reference && !results.contains(&date) {
                    results.push(date);
                }
            }
        }

        for (pattern, layout) in fallback_formats() {
            for caps in pattern.captures_iter(text) {
                let candidate = match layout {
                    DateLayout::YearMonthDay => parse_triple(&caps[1], &caps[2], &caps[3], 0),
                    DateLayout::RocYearMonthDay => {
                        parse_triple(&caps[1], &caps[2], &caps[3], ROC_YEAR_OFFSET)
                    }
                    DateLayout::MonthDayYear => parse_triple(&caps[3], &caps[1], &caps[2], 0),
                };
                if let Some(date) = candidate {
                    if date <= self.reference && !results.contains(&date) {
                        results.push(date);
                    }
                }
            }
        }

        results
    }
}

fn parse_triple(year: &str, month: &str, day: &str, year_offset: i32) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year + year_offset, month, day)
}
