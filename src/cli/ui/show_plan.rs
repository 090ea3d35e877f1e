// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Show the selected release, the file assignment and the rename plan.

use super::util;
use crate::matcher::{MatchResult, TrackMatch};
use crate::musicbrainz::Release;
use crate::release::ReleaseLike;
use crate::renamer::RenamePlan;
use crate::track::TrackLike;
use crate::util::format_track_length;
use crossterm::style::Stylize;
use inquire::{Confirm, InquireError};
use std::borrow::Cow;

/// Print the header of the selected release.
pub fn show_release(release: &Release) {
    let artist = release
        .release_artist()
        .unwrap_or_else(|| Cow::from("[unknown artist]"));
    println!(
        "{}",
        format!("{artist} - {title}", title = release.title).bold()
    );

    let release_meta = [
        release.release_media_format(),
        release.release_date(),
        release.release_country(),
        release.release_status(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ");
    if !release_meta.is_empty() {
        println!("{}", release_meta.grey());
    }

    if let Some(mb_url) = release.musicbrainz_release_url() {
        println!("{}", mb_url.into_owned().grey());
    }
}

/// Print tracks and files that could not be matched.
pub fn show_unmatched(result: &MatchResult<'_>) {
    let track_count = result.matches.len() + result.unmatched_tracks.len();
    if !result.unmatched_tracks.is_empty() {
        let title = format!(
            "Missing Tracks ({unmatched_count}/{track_count}):",
            unmatched_count = result.unmatched_tracks.len(),
        );
        println!("{}", title.yellow().underlined());
        for slot in &result.unmatched_tracks {
            let track_number = slot
                .track
                .track_number()
                .unwrap_or_else(|| Cow::from(format!("#{}", slot.absolute_position)));
            let length = slot
                .track
                .track_length()
                .map(|length| format!(" ({})", format_track_length(length)))
                .unwrap_or_default();
            println!(
                "  ! {track_number}{separator}{title}{length}",
                track_number = track_number.into_owned().grey(),
                separator = ". ".grey(),
                title = slot.track.title.as_str().yellow(),
                length = length.grey(),
            );
        }
    }

    if !result.unmatched_files.is_empty() {
        let title = format!(
            "Residual Files ({unmatched_count}):",
            unmatched_count = result.unmatched_files.len(),
        );
        println!("{}", title.yellow().underlined());
        for file in &result.unmatched_files {
            let name = file.path.file_name().unwrap_or(file.path.as_os_str());
            println!("  ? {}", name.to_string_lossy().into_owned().yellow());
        }
    }
}

/// Print the planned renames with highlighted changes.
pub fn show_rename_plan(plan: &RenamePlan<TrackMatch<'_>>) {
    let column_width = plan
        .entries()
        .iter()
        .map(|entry| entry.source_name().chars().count())
        .max()
        .unwrap_or_default();

    for entry in plan.entries() {
        let source_name = entry.source_name();
        if !entry.needs_rename() {
            println!(" = {}", source_name.into_owned().grey());
            continue;
        }

        let destination_name = entry.destination_name();
        let (lhs, rhs) = util::string_diff(&source_name, &destination_name);
        println!(
            " * {lhs} -> {rhs} {method}",
            lhs = lhs.fill_right(' ', column_width),
            method = format!("({})", entry.item.method).grey(),
        );
    }

    let rename_count = plan.renames().count();
    println!(
        "{}",
        format!(
            "{rename_count} of {total} file(s) will be renamed.",
            total = plan.entries().len()
        )
        .bold()
    );
}

/// Ask the user a yes/no question.
///
/// # Errors
///
/// Returns an error if the prompt cannot be shown.
pub fn confirm(message: &str) -> Result<bool, InquireError> {
    Confirm::new(message).with_default(false).prompt()
}
