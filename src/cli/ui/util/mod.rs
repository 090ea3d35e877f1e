// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Reusable utilities for the UI.

use crate::distance::Distance;
use crate::musicbrainz::ReleaseCandidate;
use crossterm::style::{Color, Stylize};
use std::borrow::Cow;

mod styled_content;

pub use styled_content::string_diff;

/// Format a distance as a similarity in percent, were 0% the the maximum distance and 100% the
/// minimum distance.
pub fn as_similarity_percentage(distance: &Distance) -> f64 {
    (1.0 - distance.weighted_distance()) * 100.0
}

/// Get the color associate with the distance value.
pub fn distance_color(distance: &Distance) -> Color {
    let d = distance.weighted_distance();
    if d <= 0.1 {
        Color::Green
    } else if d <= 0.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Format the similarity as colored percentage.
pub fn format_similarity(distance: &Distance) -> String {
    let similarity = as_similarity_percentage(distance);
    let color = distance_color(distance);

    format!("{similarity:.02}%").with(color).to_string()
}

/// Format the artist and title of a search result for the terminal.
pub fn format_candidate_artist_and_title(candidate: &ReleaseCandidate) -> String {
    let artist = candidate
        .artist
        .as_deref()
        .map_or_else(|| "[unknown artist]".grey().to_string(), ToString::to_string);

    format!("{artist} - {title}", title = candidate.title)
}

/// Format the secondary details of a search result (date, country, formats, tracks, score).
pub fn format_candidate_details(candidate: &ReleaseCandidate) -> String {
    [
        candidate.date.clone(),
        candidate.country.clone(),
        candidate.media_format().map(Cow::into_owned),
        candidate
            .track_count
            .map(|count| format!("{count} tracks")),
        candidate.score.map(|score| format!("score {score}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ")
}
