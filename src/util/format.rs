// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Conversions between seconds and the `M:SS` notation used by the interface.

/// Formats a duration in seconds as `M:SS`.
///
/// Minutes are not padded, seconds are zero-padded to two digits, and both
/// parts are truncated rather than rounded. Negative or non-finite input is
/// shown as `0:00`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_time(125.0), "2:05");
/// assert_eq!(format_time(59.9), "0:59");
/// ```
pub(crate) fn format_time(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats a longer duration, such as a whole collection, as `H:MM:SS` once
/// it reaches an hour and as `M:SS` below that.
pub(crate) fn format_total(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    if total >= 3600 {
        format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    } else {
        format_time(seconds)
    }
}

/// Parses either plain seconds (`"95"`, `"12.5"`) or `M:SS` (`"1:35"`).
pub(crate) fn parse_time(text: &str) -> Option<f64> {
    let text = text.trim();
    let seconds = match text.split_once(':') {
        Some((mins, secs)) => {
            let mins: u64 = mins.parse().ok()?;
            let secs: f64 = secs.parse().ok()?;
            if !(0.0..60.0).contains(&secs) {
                return None;
            }
            mins as f64 * 60.0 + secs
        }
        None => text.parse().ok()?,
    };

    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_unpadded_and_seconds_padded() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(60.5), "1:00");
    }

    #[test]
    fn matches_floor_definition_over_a_range() {
        for d in 0..5000u64 {
            let expected = format!("{}:{:02}", d / 60, d % 60);
            assert_eq!(format_time(d as f64), expected);
        }
    }

    #[test]
    fn invalid_input_shows_zero() {
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn totals_switch_to_hours() {
        assert_eq!(format_total(754.0), "12:34");
        assert_eq!(format_total(3725.0), "1:02:05");
    }

    #[test]
    fn parses_both_notations() {
        assert_eq!(parse_time("95"), Some(95.0));
        assert_eq!(parse_time("1:35"), Some(95.0));
        assert_eq!(parse_time(" 0:07.5 "), Some(7.5));
        assert_eq!(parse_time("1:75"), None);
        assert_eq!(parse_time("-3"), None);
        assert_eq!(parse_time("abc"), None);
    }
}
