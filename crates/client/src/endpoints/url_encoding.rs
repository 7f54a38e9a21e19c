//! URL encoding utilities for constructing safe API paths.
//!
//! Index names, alias names and task ids are interpolated into request paths.
//! Each segment is percent-encoded so that characters with URL meaning
//! (`/`, `?`, `#`, `%`, `,`, ...) cannot change the request target.
//!
//! # Example
//!
//! ```
//! use curator_client::endpoints::url_encoding::{encode_index_list, encode_path_segment};
//!
//! assert_eq!(encode_path_segment("logs/2024"), "logs%2F2024");
//! assert_eq!(encode_index_list(&["a".to_string(), "b c".to_string()]), "a,b%20c");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 plus the characters with special meaning in cluster
/// paths: `,` separates index names and `*` would expand as a wildcard.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b'*')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a single URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Encode each name and join them with the literal `,` the API uses as a list separator.
pub fn encode_index_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| encode_path_segment(name))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_simple() {
        assert_eq!(encode_path_segment("logs-2024.01.01"), "logs-2024.01.01");
        assert_eq!(encode_path_segment("my_index"), "my_index");
    }

    #[test]
    fn test_encode_slash() {
        assert_eq!(encode_path_segment("a/b/c"), "a%2Fb%2Fc");
    }

    #[test]
    fn test_encode_percent() {
        assert_eq!(encode_path_segment("100%"), "100%25");
        assert_eq!(encode_path_segment("user%20name"), "user%2520name");
    }

    #[test]
    fn test_encode_list_separator_and_wildcard() {
        assert_eq!(encode_path_segment("a,b"), "a%2Cb");
        assert_eq!(encode_path_segment("logs-*"), "logs-%2A");
    }

    #[test]
    fn test_date_math_name() {
        assert_eq!(
            encode_path_segment("<logs-{now/d}>"),
            "%3Clogs-%7Bnow%2Fd%7D%3E"
        );
    }

    #[test]
    fn test_task_id_colon_passes_through() {
        assert_eq!(encode_path_segment("oTUltX4IQMOUUVeiohTt8A:12345"), "oTUltX4IQMOUUVeiohTt8A:12345");
    }

    #[test]
    fn test_encode_index_list() {
        assert_eq!(encode_index_list(&[]), "");
        assert_eq!(
            encode_index_list(&["one".to_string(), "two,three".to_string()]),
            "one,two%2Cthree"
        );
    }
}
