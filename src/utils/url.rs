//! URL encoding/decoding utilities

/// Decodes a URL-encoded string.
///
/// Returns the original string if decoding fails.
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// Decodes a URL-encoded string repeatedly until it stops changing.
///
/// Feed aggregators re-escape already-escaped URIs, so a single decode
/// pass can leave `%252F` style residue behind. Bounded to a handful of
/// rounds; real inputs converge after one or two.
pub fn url_decode_iterative(input: &str) -> String {
    let mut current = input.to_string();
    for _ in 0..4 {
        if !current.contains('%') {
            break;
        }
        let next = url_decode(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
