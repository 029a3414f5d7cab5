//! Feature-key reconciliation. Seed data historically stores snake_case
//! keys (`max_agencies`) while newer call sites and some imported plan data
//! use PascalCase (`MaxAgencies`); both spellings must resolve to the same
//! feature.

/// True if a stored feature key and a queried feature key name the same
/// feature, under any of:
/// - case-insensitive equality,
/// - case-insensitive equality after stripping `_` and `-` from both,
/// - the stored key equalling the PascalCase form of the queried key.
pub fn names_match(stored: &str, queried: &str) -> bool {
    if stored.eq_ignore_ascii_case(queried) {
        return true;
    }
    if strip_separators(stored) == strip_separators(queried) {
        return true;
    }
    stored.eq_ignore_ascii_case(&to_pascal_case(queried))
}

fn strip_separators(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

/// `max_agencies` -> `MaxAgencies`.
pub fn to_pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// Human-readable rendering for reports: `max_agencies` and `MaxAgencies`
/// both become `Max Agencies`.
pub fn display_name(name: &str) -> String {
    let words: Vec<String> = if name.contains('_') || name.contains('-') {
        name.split(['_', '-'])
            .filter(|segment| !segment.is_empty())
            .map(capitalize)
            .collect()
    } else {
        split_camel(name).into_iter().map(|w| capitalize(&w)).collect()
    };
    words.join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn split_camel(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c.is_uppercase() && !current.is_empty() {
            words.push(current.clone());
            current.clear();
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// The feature kinds the usage counter knows how to measure. Plans may carry
/// other feature keys; those always count as zero usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    MaxAgencies,
    MaxAgents,
    MaxProperties,
    MaxCustomers,
    MaxRequests,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 5] = [
        FeatureKind::MaxAgencies,
        FeatureKind::MaxAgents,
        FeatureKind::MaxProperties,
        FeatureKind::MaxCustomers,
        FeatureKind::MaxRequests,
    ];

    pub fn canonical_name(&self) -> &'static str {
        match self {
            FeatureKind::MaxAgencies => "max_agencies",
            FeatureKind::MaxAgents => "max_agents",
            FeatureKind::MaxProperties => "max_properties",
            FeatureKind::MaxCustomers => "max_customers",
            FeatureKind::MaxRequests => "max_requests",
        }
    }

    /// Resolve a feature key in either convention to a countable kind.
    pub fn from_name(name: &str) -> Option<FeatureKind> {
        FeatureKind::ALL
            .into_iter()
            .find(|kind| names_match(kind.canonical_name(), name) || names_match(name, kind.canonical_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_conventions_match() {
        assert!(names_match("MaxAgencies", "max_agencies"));
        assert!(names_match("max_agencies", "MaxAgencies"));
        assert!(names_match("Max-Agencies", "max_agencies"));
        assert!(names_match("max_agencies", "max_agencies"));
    }

    #[test]
    fn test_different_features_do_not_match() {
        assert!(!names_match("MaxAgents", "max_agencies"));
        assert!(!names_match("max_properties", "MaxCustomers"));
    }

    #[test]
    fn test_pascal_case_conversion() {
        assert_eq!(to_pascal_case("max_agencies"), "MaxAgencies");
        assert_eq!(to_pascal_case("max_open_requests"), "MaxOpenRequests");
        assert_eq!(to_pascal_case("single"), "Single");
    }

    #[test]
    fn test_display_name_handles_both_conventions() {
        assert_eq!(display_name("max_agencies"), "Max Agencies");
        assert_eq!(display_name("MaxAgencies"), "Max Agencies");
        assert_eq!(display_name("Max-Agencies"), "Max Agencies");
    }

    #[test]
    fn test_kind_resolution() {
        assert_eq!(FeatureKind::from_name("max_agents"), Some(FeatureKind::MaxAgents));
        assert_eq!(FeatureKind::from_name("MaxProperties"), Some(FeatureKind::MaxProperties));
        assert_eq!(FeatureKind::from_name("Max-Requests"), Some(FeatureKind::MaxRequests));
        assert_eq!(FeatureKind::from_name("max_widgets"), None);
    }
}
