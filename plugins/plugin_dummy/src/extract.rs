//! Field extraction for `dummy.count`.
//!
//! Extraction never fails: events this plugin did not produce, and fields it
//! does not declare, are reported as absent.

use crate::descriptor::{DESCRIPTOR, EVT_PREFIX};

/// Value of `field` for an event with `payload`, or `None` when absent.
pub fn extract_field(field: &str, payload: &[u8]) -> Option<u64> {
    if !DESCRIPTOR.declares_field(field) {
        return None;
    }
    extract_count(payload)
}

/// Evaluates each requested field independently, preserving request order.
pub fn extract_fields<'a>(fields: impl IntoIterator<Item = &'a str>, payload: &[u8]) -> Vec<Option<u64>> {
    fields
        .into_iter()
        .map(|field| extract_field(field, payload))
        .collect()
}

/// The counter encoded in a `dummy<N>` payload.
pub fn extract_count(payload: &[u8]) -> Option<u64> {
    let digits = payload.strip_prefix(EVT_PREFIX.as_bytes())?;
    if digits.is_empty() {
        return None;
    }
    Some(parse_leading_u64(digits))
}

/// Reads the decimal digits at the start of `bytes`.
///
/// Stops at the first non-digit, yields 0 when there are none, and saturates
/// at `u64::MAX` on overflow.
pub fn parse_leading_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::COUNT_FIELD;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b"dummy1", Some(1))]
    #[case(b"dummy42", Some(42))]
    #[case(b"dummy007", Some(7))]
    #[case(b"dummy12abc", Some(12))]
    #[case(b"dummyabc", Some(0))]
    #[case(b"dummy18446744073709551615", Some(u64::MAX))]
    #[case(b"dummy99999999999999999999999", Some(u64::MAX))]
    #[case(b"dummy", None)]
    #[case(b"foo123", None)]
    #[case(b"dumm", None)]
    #[case(b"", None)]
    #[case(b"Dummy5", None)]
    fn extracts_count(#[case] payload: &[u8], #[case] expected: Option<u64>) {
        assert_eq!(extract_field(COUNT_FIELD, payload), expected);
    }

    #[rstest]
    #[case("dummy.bogus")]
    #[case("dummy.count ")]
    #[case("")]
    #[case("json.value")]
    fn undeclared_fields_are_absent(#[case] field: &str) {
        assert_eq!(extract_field(field, b"dummy3"), None);
        assert_eq!(extract_field(field, b"foo123"), None);
    }

    #[test]
    fn results_follow_request_order() {
        let results = extract_fields(["dummy.bogus", COUNT_FIELD, "other", COUNT_FIELD], b"dummy9");
        assert_eq!(results, vec![None, Some(9), None, Some(9)]);
    }

    #[test]
    fn produced_events_round_trip() {
        let mut instance = crate::instance::SourceInstance::new("");
        for n in 1..=50u64 {
            let event = instance.next_event();
            assert_eq!(extract_count(&event.data), Some(n));
        }
    }
}
