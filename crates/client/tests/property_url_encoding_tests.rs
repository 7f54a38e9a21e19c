//! Property-based tests for path segment encoding.
//!
//! Test coverage:
//! - Encoded segments never contain characters that change the request target
//! - Decoding an encoded segment yields the original name

use curator_client::endpoints::{encode_index_list, encode_path_segment};
use percent_encoding::percent_decode_str;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_encoded_segment_has_no_separators(name in "\\PC{0,40}") {
        let encoded = encode_path_segment(&name);
        for forbidden in ['/', '?', '#', ',', ' ', '*'] {
            prop_assert!(!encoded.contains(forbidden), "{encoded} contains {forbidden:?}");
        }
    }

    #[test]
    fn prop_encoding_round_trips(name in "\\PC{0,40}") {
        let encoded = encode_path_segment(&name);
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        prop_assert_eq!(decoded, name);
    }

    #[test]
    fn prop_index_list_has_one_separator_per_gap(
        names in proptest::collection::vec("[a-z,]{1,10}", 1..6)
    ) {
        let joined = encode_index_list(&names);
        prop_assert_eq!(joined.matches(',').count(), names.len() - 1);
    }
}
