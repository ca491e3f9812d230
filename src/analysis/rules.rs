//! The fixed keyword rule table.
//!
//! Rules are evaluated in declaration order and the first rule wins a tie,
//! so this is a slice rather than a map.

/// Label assigned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Label that always qualifies a ticket as high risk.
pub const SECURITY_CATEGORY: &str = "Security / Phishing";

/// A category label and the lowercase keywords that select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    /// Count the distinct keywords that occur anywhere in `blob`.
    ///
    /// Plain substring containment; repeated occurrences of one keyword count once.
    pub fn hits(&self, blob: &str) -> usize {
        self.keywords.iter().filter(|k| blob.contains(*k)).count()
    }
}

/// Category rules in tie-break order.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        label: "Password / Account Access",
        keywords: &["password", "locked out", "lockout", "mfa", "2fa", "reset"],
    },
    CategoryRule {
        label: "Network / Connectivity",
        keywords: &["wifi", "dns", "dhcp", "cannot connect", "no internet", "network"],
    },
    CategoryRule {
        label: "VPN / Remote Access",
        keywords: &["vpn", "remote access", "tunnel", "auth failed"],
    },
    CategoryRule {
        label: "Email / Collaboration",
        keywords: &["outlook", "mailbox", "email", "teams", "google drive"],
    },
    CategoryRule {
        label: "Hardware / Peripherals",
        keywords: &["printer", "keyboard", "mouse", "monitor", "dock"],
    },
    CategoryRule {
        label: "Performance / OS Issues",
        keywords: &["slow", "disk usage", "blue screen", "update", "crash"],
    },
    CategoryRule {
        label: SECURITY_CATEGORY,
        keywords: &["phishing", "suspicious email", "malware", "ransomware", "spoof"],
    },
    CategoryRule {
        label: "Permissions / Access Control",
        keywords: &["permission", "access request", "shared drive", "role", "privilege"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_lowercase() {
        for rule in CATEGORY_RULES {
            for keyword in rule.keywords {
                assert_eq!(*keyword, keyword.to_lowercase(), "{}", rule.label);
            }
        }
    }

    #[test]
    fn test_labels_are_unique_and_not_fallback() {
        for (i, rule) in CATEGORY_RULES.iter().enumerate() {
            assert_ne!(rule.label, FALLBACK_CATEGORY);
            assert!(CATEGORY_RULES[i + 1..].iter().all(|r| r.label != rule.label));
        }
    }

    #[test]
    fn test_hits_counts_distinct_keywords() {
        let rule = &CATEGORY_RULES[0];
        assert_eq!(rule.hits("password password password"), 1);
        assert_eq!(rule.hits("reset my password"), 2);
        assert_eq!(rule.hits("printer jam"), 0);
    }

    #[test]
    fn test_security_rule_present() {
        assert!(CATEGORY_RULES.iter().any(|r| r.label == SECURITY_CATEGORY));
    }
}
