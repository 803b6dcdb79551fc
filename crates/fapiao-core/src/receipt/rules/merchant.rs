//! Merchant-name inference from receipt layout.

use crate::classify::OrganizationDetector;

/// Sentinel merchant name when no heuristic matches. The merchant
/// field is always a non-empty string, never an optional.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// How the merchant name is chosen.
///
/// Two policies exist because the product shipped both: a full variant
/// running named-entity recognition first, and a lightweight variant
/// that always takes the first line. Callers pick one explicitly;
/// which is the right product behavior is still an open question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MerchantPolicy {
    /// Organization entities first, then the first plausible line.
    #[default]
    EntityFirst,
    /// Always the first non-empty trimmed line, no entity pass.
    FirstLine,
}

/// Merchant-name extractor.
pub struct MerchantExtractor<'a> {
    policy: MerchantPolicy,
    detector: Option<&'a dyn OrganizationDetector>,
}

impl<'a> MerchantExtractor<'a> {
    pub fn new(policy: MerchantPolicy) -> Self {
        Self {
            policy,
            detector: None,
        }
    }

    /// Attach a named-entity recognition capability. Only consulted
    /// under [`MerchantPolicy::EntityFirst`].
    pub fn with_detector(mut self, detector: &'a dyn OrganizationDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Infer the merchant name. Always returns a non-empty string.
    pub fn extract(&self, text: &str) -> String {
        match self.policy {
            MerchantPolicy::EntityFirst => self
                .first_organization(text)
                .or_else(|| first_plausible_line(text))
                .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
            MerchantPolicy::FirstLine => text
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
        }
    }

    /// First organization-tagged span in document order.
    fn first_organization(&self, text: &str) -> Option<String> {
        self.detector?
            .detect_organizations(text)
            .into_iter()
            .next()
    }
}

/// First non-empty trimmed line that does not begin with a digit and
/// is longer than two characters.
fn first_plausible_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty()
                && !line.chars().next().is_some_and(char::is_numeric)
                && line.chars().count() > 2
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDetector(Vec<String>);

    impl OrganizationDetector for FakeDetector {
        fn detect_organizations(&self, _text: &str) -> Vec<String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_entity_first_prefers_organization() {
        let detector = FakeDetector(vec!["全聯實業股份有限公司".to_string()]);
        let extractor = MerchantExtractor::new(MerchantPolicy::EntityFirst).with_detector(&detector);
        assert_eq!(extractor.extract("隨便\n一些文字"), "全聯實業股份有限公司");
    }

    #[test]
    fn test_entity_first_without_detector_uses_line_heuristic() {
        let extractor = MerchantExtractor::new(MerchantPolicy::EntityFirst);
        assert_eq!(
            extractor.extract("  家樂福股份有限公司  \n總計 500"),
            "家樂福股份有限公司"
        );
    }

    #[test]
    fn test_line_heuristic_skips_digit_leading_and_short_lines() {
        let extractor = MerchantExtractor::new(MerchantPolicy::EntityFirst);
        let text = "123456789\nOK\n星巴克咖啡\n總計 160";
        assert_eq!(extractor.extract(text), "星巴克咖啡");
    }

    #[test]
    fn test_sentinel_when_nothing_plausible() {
        let extractor = MerchantExtractor::new(MerchantPolicy::EntityFirst);
        assert_eq!(extractor.extract("42\n\n7x\n"), UNKNOWN_MERCHANT);
        assert_eq!(extractor.extract(""), UNKNOWN_MERCHANT);
    }

    #[test]
    fn test_first_line_policy_takes_any_first_line() {
        let extractor = MerchantExtractor::new(MerchantPolicy::FirstLine);
        // Digit-leading lines are fine under the lightweight policy.
        assert_eq!(extractor.extract("\n  7-ELEVEN  \n總計 180"), "7-ELEVEN");
    }

    #[test]
    fn test_first_line_policy_sentinel_on_blank_input() {
        let extractor = MerchantExtractor::new(MerchantPolicy::FirstLine);
        assert_eq!(extractor.extract("\n   \n"), UNKNOWN_MERCHANT);
    }
}
