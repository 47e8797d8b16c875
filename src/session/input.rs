//! Validation of user-supplied parameters
//!
//! Everything here runs before a generator is invoked. A rejected value
//! never reaches a puzzle engine.

use crate::errors::InputError;
use crate::puzzles::fibonacci::Method;
use std::time::Duration;

pub const MIN_DISKS: u32 = 1;
pub const MAX_DISKS: u32 = 7;
pub const MIN_SPEED_MS: u64 = 200;
pub const MAX_SPEED_MS: u64 = 2000;

/// Parse a comma and/or whitespace separated list of integers.
///
/// A blank string is an empty list.
pub fn parse_number_list(text: &str) -> Result<Vec<i32>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<i32>().map_err(|_| InputError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

pub fn parse_target(text: &str) -> Result<i32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyInput { what: "target" });
    }
    trimmed.parse::<i32>().map_err(|_| InputError::InvalidTarget {
        text: trimmed.to_string(),
    })
}

pub fn validate_disks(disks: u32) -> Result<u32, InputError> {
    in_range("disk count", i64::from(disks), MIN_DISKS.into(), MAX_DISKS.into())?;
    Ok(disks)
}

/// The recursive method has a much lower cap than the other two
pub fn validate_fibonacci(method: Method, n: u32) -> Result<u32, InputError> {
    in_range("n", i64::from(n), 0, method.max_n().into())?;
    Ok(n)
}

/// Milliseconds per automatic step
pub fn validate_speed(ms: u64) -> Result<Duration, InputError> {
    let value = i64::try_from(ms).unwrap_or(i64::MAX);
    in_range("speed (ms)", value, MIN_SPEED_MS as i64, MAX_SPEED_MS as i64)?;
    Ok(Duration::from_millis(ms))
}

fn in_range(what: &'static str, value: i64, min: i64, max: i64) -> Result<(), InputError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            what,
            value,
            min,
            max,
        })
    }
}
