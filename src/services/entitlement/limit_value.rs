use log::warn;

/// A feature limit, parsed once at plan-load time so the decision path never
/// re-parses strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureLimit {
    Unlimited,
    Capacity(i64),
}

impl FeatureLimit {
    /// Parse a raw feature value into a limit.
    ///
    /// Empty or missing values, `unlimited` (any casing) and `-1` all mean
    /// uncapped. Anything else must parse as an integer; values that do not
    /// are treated as uncapped so misconfigured plan data never blocks a
    /// user, but a warning is emitted for operators.
    pub fn parse(raw: Option<&str>) -> FeatureLimit {
        let Some(raw) = raw else {
            return FeatureLimit::Unlimited;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FeatureLimit::Unlimited;
        }
        let lowered = trimmed.to_lowercase();
        if lowered == "unlimited" || lowered == "-1" {
            return FeatureLimit::Unlimited;
        }
        match trimmed.parse::<i64>() {
            Ok(n) => FeatureLimit::Capacity(n),
            Err(_) => {
                warn!(
                    "Unparsable feature limit value {:?}; treating as unlimited",
                    raw
                );
                FeatureLimit::Unlimited
            }
        }
    }

    pub fn cap(&self) -> Option<i64> {
        match self {
            FeatureLimit::Unlimited => None,
            FeatureLimit::Capacity(n) => Some(*n),
        }
    }

    /// Whether current usage already consumes the whole cap, i.e. one more
    /// creation would overshoot it.
    pub fn is_reached(&self, usage: i64) -> bool {
        match self {
            FeatureLimit::Unlimited => false,
            FeatureLimit::Capacity(n) => usage >= *n,
        }
    }

    /// Whether current usage is strictly above the cap. Being exactly at the
    /// cap is fine for a downgrade: it only blocks future creation, not
    /// existing resources.
    pub fn is_exceeded_by(&self, usage: i64) -> bool {
        match self {
            FeatureLimit::Unlimited => false,
            FeatureLimit::Capacity(n) => usage > *n,
        }
    }

    /// How many more entities may be created, `None` if uncapped.
    pub fn remaining(&self, usage: i64) -> Option<i64> {
        self.cap().map(|n| (n - usage).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_and_blank_values_are_unlimited() {
        assert_eq!(FeatureLimit::parse(None), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some("")), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some("   ")), FeatureLimit::Unlimited);
    }

    #[test]
    fn test_unlimited_markers() {
        assert_eq!(FeatureLimit::parse(Some("unlimited")), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some("UNLIMITED")), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some(" Unlimited ")), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some("-1")), FeatureLimit::Unlimited);
    }

    #[test]
    fn test_integer_values_are_caps() {
        assert_eq!(FeatureLimit::parse(Some("5")), FeatureLimit::Capacity(5));
        assert_eq!(FeatureLimit::parse(Some(" 25 ")), FeatureLimit::Capacity(25));
        assert_eq!(FeatureLimit::parse(Some("0")), FeatureLimit::Capacity(0));
    }

    #[test]
    fn test_malformed_values_fail_open() {
        assert_eq!(FeatureLimit::parse(Some("abc")), FeatureLimit::Unlimited);
        assert_eq!(FeatureLimit::parse(Some("5x")), FeatureLimit::Unlimited);
    }

    #[test]
    fn test_reached_and_exceeded_are_asymmetric() {
        let limit = FeatureLimit::Capacity(5);
        assert!(!limit.is_reached(4));
        assert!(limit.is_reached(5));
        // At exactly the cap a downgrade is still compatible
        assert!(!limit.is_exceeded_by(5));
        assert!(limit.is_exceeded_by(6));
    }

    #[test]
    fn test_remaining_saturates_at_zero() {
        assert_eq!(FeatureLimit::Capacity(5).remaining(4), Some(1));
        assert_eq!(FeatureLimit::Capacity(5).remaining(5), Some(0));
        assert_eq!(FeatureLimit::Capacity(5).remaining(9), Some(0));
        assert_eq!(FeatureLimit::Unlimited.remaining(9), None);
    }

    proptest! {
        #[test]
        fn prop_decimal_strings_parse_to_their_capacity(n in 0i64..=i64::MAX) {
            prop_assert_eq!(
                FeatureLimit::parse(Some(&n.to_string())),
                FeatureLimit::Capacity(n)
            );
        }
    }
}
