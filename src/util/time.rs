// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Track lengths and release dates.

use chrono::TimeDelta;

/// Format a track length as `M:SS` or `H:MM:SS`, rounded to the nearest second.
pub fn format_track_length(length: TimeDelta) -> String {
    let total_seconds = (length.num_milliseconds() + 500).div_euclid(1000).max(0);
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Returns the year of a release date in the form `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn release_year(date: &str) -> Option<&str> {
    let mut parts = date.trim().split('-');
    let year = parts.next().filter(|year| is_digits(year, 4))?;
    let rest: Vec<&str> = parts.collect();
    (rest.len() <= 2 && rest.iter().all(|part| is_digits(part, 2))).then_some(year)
}

/// Returns `true` if `value` consists of exactly `len` ASCII digits.
fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|byte| byte.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_track_length() {
        assert_eq!(format_track_length(TimeDelta::milliseconds(487_533)), "8:08");
        assert_eq!(format_track_length(TimeDelta::milliseconds(487_499)), "8:07");
        assert_eq!(format_track_length(TimeDelta::seconds(59)), "0:59");
        assert_eq!(format_track_length(TimeDelta::seconds(3_723)), "1:02:03");
        assert_eq!(format_track_length(TimeDelta::zero()), "0:00");
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year("1958-09-16"), Some("1958"));
        assert_eq!(release_year("1958-09"), Some("1958"));
        assert_eq!(release_year("2001"), Some("2001"));
        assert_eq!(release_year("58"), None);
        assert_eq!(release_year("1958-9-16"), None);
        assert_eq!(release_year("1958-09-16-01"), None);
        assert_eq!(release_year("unknown"), None);
    }
}
