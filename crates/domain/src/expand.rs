//! Index range expansion.
//!
//! [`expand`] is the only combinatorial primitive of the generator. Every
//! facet of every variant is one call to it: a per-slot rule, a separator and
//! a slot range.

use crate::arity::{SlotIndex, SlotRange};
use crate::error::DomainResult;

/// Concatenates `rule(j)` for every slot `j` in `range`, joined by `separator`.
///
/// The output holds exactly `range.len() - 1` separators, none leading and
/// none trailing. A single-slot range yields `rule(start)` alone.
///
/// # Example
///
/// ```
/// use aritygen_domain::{SlotRange, expand};
///
/// let range = SlotRange::new(1, 3).unwrap();
/// assert_eq!(expand(range, ", ", |j| format!("T{j}")), "T1, T2, T3");
/// ```
pub fn expand<F>(range: SlotRange, separator: &str, mut rule: F) -> String
where
    F: FnMut(SlotIndex) -> String,
{
    let mut out = String::new();
    for slot in range {
        if slot != range.start() {
            out.push_str(separator);
        }
        out.push_str(&rule(slot));
    }
    out
}

/// Expands `rule` over the raw bounds `[start, end]`.
///
/// # Errors
///
/// Returns [`crate::DomainError::InvalidSlotRange`] when `start > end` or
/// `start == 0`, rather than producing malformed text.
pub fn expand_range<F>(rule: F, separator: &str, start: u32, end: u32) -> DomainResult<String>
where
    F: FnMut(SlotIndex) -> String,
{
    Ok(expand(SlotRange::new(start, end)?, separator, rule))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use pretty_assertions::assert_eq;

    fn rule(j: SlotIndex) -> String {
        format!("r{j}")
    }

    #[test]
    fn expands_comma_separated_without_trailing_separator() {
        let out = expand_range(rule, ",", 1, 3).unwrap();
        assert_eq!(out, format!("{},{},{}", "r1", "r2", "r3"));
        assert!(!out.ends_with(','));
        assert!(!out.starts_with(','));
    }

    #[test]
    fn single_slot_has_no_separator() {
        assert_eq!(expand_range(rule, " || ", 4, 4).unwrap(), "r4");
    }

    #[test]
    fn separator_count_is_end_minus_start() {
        for end in 1..=12 {
            let out = expand_range(|_| "x".to_string(), "|", 1, end).unwrap();
            assert_eq!(out.matches('|').count(), (end - 1) as usize);
        }
    }

    #[test]
    fn range_not_starting_at_one() {
        assert_eq!(expand_range(rule, ";", 3, 5).unwrap(), "r3;r4;r5");
    }

    #[test]
    fn multiline_separator() {
        let out = expand_range(|j| format!("T{j}* target{j};"), "\n    ", 1, 2).unwrap();
        assert_eq!(out, "T1* target1;\n    T2* target2;");
    }

    #[test]
    fn reversed_range_fails_loudly() {
        assert_eq!(
            expand_range(rule, ",", 3, 1),
            Err(DomainError::InvalidSlotRange { start: 3, end: 1 })
        );
    }

    #[test]
    fn rule_sees_each_slot_once_in_order() {
        let mut seen = Vec::new();
        let range = SlotRange::new(1, 5).unwrap();
        let _ = expand(range, "", |j| {
            seen.push(j.get());
            String::new()
        });
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }
}
