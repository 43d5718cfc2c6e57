use crate::models::ValueRange;

/// Parse a free-form budget string into an inclusive `[min, max]` range
///
/// Everything except ASCII digits and `-` is stripped, then the remainder is
/// split on `-`. The dash is always a separator, never a sign. Runs that do
/// not parse are dropped and only the first two numbers are used.
///
/// # Returns
/// * `Some(range)` - one number gives a point budget, two give a range
/// * `None` - no number could be read; callers treat this as "no constraint"
pub fn parse_budget(text: &str) -> Option<ValueRange> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let mut numbers = cleaned
        .split('-')
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<u64>().ok());

    let first = numbers.next()?;
    let second = numbers.next().unwrap_or(first);

    Some(ValueRange::new(first.min(second), first.max(second)))
}

/// Inclusive interval overlap. Symmetric in its arguments.
#[inline]
pub fn ranges_overlap(a: &ValueRange, b: &ValueRange) -> bool {
    a.max >= b.min && a.min <= b.max
}
