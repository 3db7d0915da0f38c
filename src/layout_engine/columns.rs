use crate::common::config::{ConfigError, checked_column_pitch};

/// Number of grid columns that fit `viewport_width` pixels.
///
/// Always at least 1, so a degenerate viewport still stacks widgets into a
/// single column.
pub fn fitting_columns(
    viewport_width: i64,
    column_size: i64,
    margin: i64,
) -> Result<u32, ConfigError> {
    let pitch = checked_column_pitch(column_size, margin)?;
    let columns = viewport_width.div_euclid(pitch).max(1);
    Ok(u32::try_from(columns).unwrap_or(u32::MAX))
}
