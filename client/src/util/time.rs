//! Timestamp display helpers.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`.
///
/// Inputs that do not look like `YYYY-MM-DDTHH:MM...` are returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    let Some((date, time)) = iso.split_once('T') else {
        return iso.to_owned();
    };
    match time.get(..5) {
        Some(hh_mm) if date.len() == 10 && hh_mm.as_bytes()[2] == b':' => format!("{date} {hh_mm}"),
        _ => iso.to_owned(),
    }
}
