//! Deterministic sampling score.
//!
//! Every Application Insights SDK derives the same score from an operation
//! id, so independently sampled services keep or drop whole distributed
//! operations together.

const HASH_SEED: i32 = 5381;
const MIN_HASH_INPUT_UNITS: usize = 8;

/// Score in `[0, 100)` for the given operation (trace) id.
///
/// A missing or empty id gets a uniformly random score.
pub fn sampling_score(operation_id: Option<&str>) -> f64 {
    match operation_id.filter(|id| !id.is_empty()) {
        Some(id) => 100.0 * (f64::from(sampling_hash_code(id)) / f64::from(i32::MAX)),
        None => 100.0 * rand::random::<f64>(),
    }
}

/// Whether an item with this operation id is kept at `percentage` sampling.
pub fn is_sampled_in(operation_id: Option<&str>, percentage: f64) -> bool {
    percentage >= 100.0 || sampling_score(operation_id) < percentage
}

/// DJB2 over the UTF-16 code units of `input`, repeated until at least
/// eight units long, folded into a non-negative `i32`.
pub fn sampling_hash_code(input: &str) -> i32 {
    let units: Vec<u16> = input.encode_utf16().collect();
    if units.is_empty() {
        return 0;
    }
    let mut padded = units.clone();
    while padded.len() < MIN_HASH_INPUT_UNITS {
        padded.extend_from_slice(&units);
    }

    let mut hash = HASH_SEED;
    for unit in padded {
        hash = hash
            .wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(i32::from(unit));
    }
    // abs(i32::MIN) does not exist and i32::MAX would score exactly 100
    if hash == i32::MIN || hash == i32::MAX {
        hash = i32::MAX - 1;
    }
    hash.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", 883_298_903)]
    #[case("a", 348_946_573)]
    #[case("é", 1_008_901_939)]
    #[case("0123456789abcdef0123456789abcdef", 552_514_569)]
    fn hash_matches_reference_values(#[case] input: &str, #[case] expected: i32) {
        assert_eq!(sampling_hash_code(input), expected);
    }

    #[test]
    fn short_ids_are_padded_by_repetition() {
        // "abc" hashes as "abcabcabc"
        let mut hash: i32 = 5381;
        for c in "abcabcabc".encode_utf16() {
            hash = hash
                .wrapping_mul(33)
                .wrapping_add(i32::from(c));
        }
        assert_eq!(sampling_hash_code("abc"), hash.abs());
        assert_eq!(sampling_hash_code("abcd"), sampling_hash_code("abcdabcd"));
    }

    #[test]
    fn score_is_deterministic_and_in_range() {
        let id = "4bf92f3577b34da6a3ce929d0e0e4736";
        let score = sampling_score(Some(id));
        assert_eq!(score, sampling_score(Some(id)));
        assert!((0.0..100.0).contains(&score));
        assert!((sampling_score(Some("abc")) - 41.131_810_444).abs() < 1e-6);
    }

    #[test]
    fn missing_id_is_random_but_in_range() {
        for _ in 0..100 {
            let score = sampling_score(None);
            assert!((0.0..100.0).contains(&score));
            assert!((0.0..100.0).contains(&sampling_score(Some(""))));
        }
    }

    #[test]
    fn sampled_in_by_percentage() {
        // "abc" scores ~41.13
        assert!(is_sampled_in(Some("abc"), 50.0));
        assert!(!is_sampled_in(Some("abc"), 40.0));
        assert!(is_sampled_in(Some("abc"), 100.0));
        assert!(!is_sampled_in(Some("abc"), 0.0));
    }
}
