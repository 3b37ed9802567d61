use crate::errors::AppError;
use std::num::ParseIntError;
use std::str::FromStr;

// Parse a comma-separated list of integers, e.g. "1234,5678".
// Blank input is an empty list; any entry that is not an integer is an error.
pub fn parse_int_list<T>(env_key: &'static str, raw: &str) -> Result<Vec<T>, AppError>
where
    T: FromStr<Err = ParseIntError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry.parse::<T>().map_err(|source| AppError::InvalidListEntry {
                env_key,
                entry: entry.to_string(),
                source,
            })
        })
        .collect()
}

// Parse a comma-separated list of opaque identifiers, dropping blank entries.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
