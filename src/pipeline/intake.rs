//! Feed-line classification.
//!
//! A fetched feed is a text blob with one candidate per line, mixed with
//! comments, ads and junk. Intake routes lines whose scheme prefix is
//! known (rewriting the `hy2` alias on the way in) and accumulates
//! everything else as rejected, without invoking any parser. Feed-level
//! transport encodings (whole-blob base64) are the fetcher's problem and
//! are expected to be undone before this point.

use crate::models::SCHEME_PREFIXES;

/// Result of splitting one feed blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intake {
    /// Lines carrying a known scheme prefix, alias-rewritten, in feed order.
    pub accepted: Vec<String>,
    /// Non-empty lines with no known prefix.
    pub rejected: Vec<String>,
}

/// Splits feed content into accepted candidates and rejected lines.
pub fn classify_lines(content: &str) -> Intake {
    let mut intake = Intake::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("hy2://") {
            intake.accepted.push(format!("hysteria2://{}", rest));
        } else if SCHEME_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            intake.accepted.push(line.to_string());
        } else {
            intake.rejected.push(line.to_string());
        }
    }

    intake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_routes_known_prefixes() {
        let content = "\
vless://id@h.example.com:443

# subscription refreshed hourly
trojan://pw@h.example.com:8443
ss://YWJj@h.example.com:8388
totally not a link
";
        let intake = classify_lines(content);
        assert_eq!(intake.accepted.len(), 3);
        assert_eq!(
            intake.rejected,
            vec!["# subscription refreshed hourly", "totally not a link"]
        );
    }

    #[test]
    fn test_classify_rewrites_hy2_alias() {
        let intake = classify_lines("hy2://pw@h.example.com:443?insecure=1#x");
        assert_eq!(
            intake.accepted,
            vec!["hysteria2://pw@h.example.com:443?insecure=1#x"]
        );
    }

    #[test]
    fn test_classify_trims_surrounding_whitespace() {
        let intake = classify_lines("  vmess://abc  \n\t\n");
        assert_eq!(intake.accepted, vec!["vmess://abc"]);
        assert!(intake.rejected.is_empty());
    }
}
