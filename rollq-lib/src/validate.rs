use crate::error::Error;
use crate::error::Result;

/// Smallest die the engine accepts
pub const MIN_SIDES: u64 = 2;

const COUNT_LABEL: &str = "Dice count";
const SIDES_LABEL: &str = "Sides";
const REPETITIONS_LABEL: &str = "Repetitions";

fn positive(n: u64, label: &str) -> Result<u64> {
    if n == 0 {
        return Err(Error::invalid_argument(
            n,
            format!("{label} must be a positive whole number"),
        ));
    }
    Ok(n)
}

/// Check that a dice count is at least one
pub fn validate_count(n: u64) -> Result<u64> {
    positive(n, COUNT_LABEL)
}

/// Check that a die has at least [`MIN_SIDES`] faces
pub fn validate_sides(n: u64) -> Result<u64> {
    if n < MIN_SIDES {
        return Err(Error::invalid_argument(
            n,
            format!("{SIDES_LABEL} must be a whole number of at least {MIN_SIDES}"),
        ));
    }
    Ok(n)
}

/// Check that the highest total of `count` dice with `sides` faces fits in an `i64`
pub fn validate_total(count: u64, sides: u64) -> Result<(u64, u64)> {
    match count.checked_mul(sides) {
        Some(total) if i64::try_from(total).is_ok() => Ok((count, sides)),
        _ => Err(Error::invalid_argument(
            format!("{count}d{sides}"),
            format!("Dice count times sides must not exceed {}", i64::MAX),
        )),
    }
}

/// Check that a multi roll repeats at least once
pub fn validate_repetitions(n: usize) -> Result<usize> {
    positive(n as u64, REPETITIONS_LABEL).map(|_| n)
}

/// Check that a results container has something in it
pub fn validate_non_empty<T>(results: &[T]) -> Result<()> {
    if results.is_empty() {
        return Err(Error::InvalidState(
            "Results must contain at least one value".to_owned(),
        ));
    }
    Ok(())
}

/// Parse textual input as a whole number, quoting it on failure
fn parse_whole(text: &str, label: &str) -> Result<u64> {
    text.trim().parse::<u64>().map_err(|_| {
        Error::invalid_argument(
            format!("'{text}'"),
            format!("{label} must be a positive whole number"),
        )
    })
}

/// Parse and validate a dice count given as text
pub fn parse_count(text: &str) -> Result<u64> {
    parse_whole(text, COUNT_LABEL).and_then(validate_count)
}

/// Parse and validate a side count given as text
pub fn parse_sides(text: &str) -> Result<u64> {
    parse_whole(text, SIDES_LABEL).and_then(validate_sides)
}
