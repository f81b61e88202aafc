//! Property tests for CIGAR decoding and scoring.

use contam_bench::core::cigar::{decode, CIGAR_ALPHABET};
use contam_bench::scoring::scorer::{aligned_reference_length, clip_offsets, score};
use proptest::prelude::*;

fn cigar_string() -> impl Strategy<Value = String> {
    prop::collection::vec((1u32..10_000, 0usize..CIGAR_ALPHABET.len()), 0..20).prop_map(|ops| {
        ops.iter()
            .map(|(len, i)| format!("{len}{}", char::from(CIGAR_ALPHABET[*i])))
            .collect()
    })
}

proptest! {
    #[test]
    fn decode_then_encode_is_identity(cigar in cigar_string()) {
        prop_assert_eq!(decode(&cigar).unwrap().to_string(), cigar);
    }

    #[test]
    fn single_match_spans_its_length(len in 1u32..1_000_000) {
        let cigar = decode(&format!("{len}M")).unwrap();
        prop_assert_eq!(aligned_reference_length(cigar.ops()), u64::from(len));
        prop_assert_eq!(score(cigar.ops()), i64::from(len));
        prop_assert_eq!(clip_offsets(cigar.ops()), (0, 0));
    }

    #[test]
    fn trailing_garbage_is_rejected(cigar in cigar_string(), junk in "[^0-9MIDNSHP=XB]") {
        let input = format!("{cigar}{junk}");
        prop_assert!(decode(&input).is_err());
    }
}
