use thiserror::Error;

/// Rejected effect configuration.
///
/// Effects validate their config once at construction; nothing downstream
/// re-checks, so every value that feeds a division or a random range is
/// covered here.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("{field} range is empty ({start} > {end})")]
    EmptyRange {
        field: &'static str,
        start: f32,
        end: f32,
    },
    #[error("{field} needs at least {min} entries (got {len})")]
    TooFew {
        field: &'static str,
        len: usize,
        min: usize,
    },
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn span(
    field: &'static str,
    range: &std::ops::RangeInclusive<f32>,
) -> Result<(), ConfigError> {
    if range.start() <= range.end() && range.start().is_finite() && range.end().is_finite() {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange {
            field,
            start: *range.start(),
            end: *range.end(),
        })
    }
}

pub(crate) fn count_span(
    field: &'static str,
    range: &std::ops::RangeInclusive<usize>,
) -> Result<(), ConfigError> {
    if range.start() <= range.end() {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange {
            field,
            start: *range.start() as f32,
            end: *range.end() as f32,
        })
    }
}
