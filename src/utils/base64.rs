use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Decodes a Base64 payload as found in subscription feeds.
///
/// Feeds routinely strip padding and mix the standard and URL-safe
/// alphabets, so the input is normalized to the standard alphabet and
/// re-padded before decoding. Returns `None` for payloads that still do
/// not decode, or that decode to non-UTF-8 bytes.
pub fn base64_decode_repair(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut normalized = url_safe_base64_reverse(trimmed);
    match normalized.len() % 4 {
        0 => {}
        2 => normalized.push_str("=="),
        3 => normalized.push('='),
        // A length of 4n+1 can never be valid Base64.
        _ => return None,
    }

    let decoded = general_purpose::STANDARD.decode(normalized).ok()?;
    String::from_utf8(decoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_padding() {
        assert_eq!(
            base64_decode_repair("YWVzLTI1Ni1nY206cGFzcw==").as_deref(),
            Some("aes-256-gcm:pass")
        );
    }

    #[test]
    fn test_decode_repairs_missing_padding() {
        assert_eq!(
            base64_decode_repair("YWVzLTI1Ni1nY206cGFzcw").as_deref(),
            Some("aes-256-gcm:pass")
        );
    }

    #[test]
    fn test_decode_url_safe_alphabet() {
        let encoded = base64_encode("m?>>o");
        let url_safe = encoded.replace('+', "-").replace('/', "_").replace('=', "");
        assert_eq!(base64_decode_repair(&url_safe).as_deref(), Some("m?>>o"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(base64_decode_repair("!!!!"), None);
        assert_eq!(base64_decode_repair(""), None);
        assert_eq!(base64_decode_repair("abcde"), None);
    }
}
