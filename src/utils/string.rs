//! String helpers shared by the parsers and layer post-processing

/// Splits a comma-separated value into trimmed, non-empty items.
pub fn split_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ensures a path value carries a leading slash.
pub fn ensure_slash_prefix(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Strips the square brackets of a literal IPv6 authority component.
pub fn strip_brackets(address: &str) -> &str {
    address
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_comma_list() {
        assert_eq!(split_comma_list("h2,http/1.1"), vec!["h2", "http/1.1"]);
        assert_eq!(split_comma_list(" a , b "), vec!["a", "b"]);
        assert_eq!(split_comma_list(",,"), Vec::<String>::new());
    }

    #[test]
    fn test_ensure_slash_prefix() {
        assert_eq!(ensure_slash_prefix("ws"), "/ws");
        assert_eq!(ensure_slash_prefix("/ws"), "/ws");
        assert_eq!(ensure_slash_prefix(""), "/");
    }

    #[test]
    fn test_strip_brackets() {
        assert_eq!(strip_brackets("[2001:db8::1]"), "2001:db8::1");
        assert_eq!(strip_brackets("example.com"), "example.com");
    }
}
