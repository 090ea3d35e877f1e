// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Candidate Selection.

use super::util;
use crate::distance::Distance;
use crate::musicbrainz::{MusicBrainzId, ReleaseCandidate};
use crate::AlbumPath;
use crossterm::style::Stylize;
use inquire::{validator::Validation, InquireError, Select, Text};
use std::fmt;

/// The outcome of the release selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSelection<'a> {
    /// Use this search result.
    Candidate(&'a ReleaseCandidate),
    /// Use the release with this MusicBrainz ID.
    ReleaseId(String),
    /// Leave the album untouched.
    Skip,
}

/// An option presented when selecting a release.
#[derive(Clone)]
enum CandidateSelectionOption<'a> {
    /// Select this release candidate.
    Candidate {
        /// The search result.
        candidate: &'a ReleaseCandidate,
        /// Distance between the search result and the album directory.
        distance: Distance,
    },
    /// Enter a custom MusicBrainz release ID.
    EnterMusicBrainzId,
    /// Skip this album.
    SkipItem,
}

impl fmt::Display for CandidateSelectionOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Candidate {
                candidate,
                distance,
            } => {
                let artist_and_title = util::format_candidate_artist_and_title(candidate);
                let details = util::format_candidate_details(candidate);
                let similarity = util::format_similarity(distance);
                write!(
                    f,
                    "{artist_and_title} {brace_open}{similarity}{brace_close} {details}",
                    similarity = similarity.bold(),
                    brace_open = '('.grey(),
                    brace_close = ')'.grey(),
                    details = details.grey(),
                )
            }
            Self::EnterMusicBrainzId => write!(f, "{}", "Enter MusicBrainz ID".blue()),
            Self::SkipItem => write!(f, "{}", "Skip".blue()),
        }
    }
}

/// Validate user input in the MusicBrainz ID prompt.
#[expect(clippy::unnecessary_wraps)]
fn validate_release_id(
    input: &str,
) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
    if input.is_empty() {
        return Ok(Validation::Valid);
    }

    match MusicBrainzId::find(input) {
        Some(MusicBrainzId::Release(_)) => Ok(Validation::Valid),
        Some(id) => Ok(Validation::Invalid(
            format!(
                "This is a MusicBrainz {} ID, not a release ID.",
                id.entity()
            )
            .into(),
        )),
        None => Ok(Validation::Invalid("Not a valid MusicBrainz ID.".into())),
    }
}

/// Present the search results to the user, and loop until either a release was selected or the
/// album is skipped.
///
/// # Errors
///
/// Returns an error if the prompt cannot be shown or is aborted.
pub fn select_candidate<'a>(
    album_path: &AlbumPath,
    candidates: &'a [ReleaseCandidate],
) -> Result<CandidateSelection<'a>, InquireError> {
    let additional_options = [
        CandidateSelectionOption::EnterMusicBrainzId,
        CandidateSelectionOption::SkipItem,
    ];
    let options: Vec<CandidateSelectionOption<'a>> = candidates
        .iter()
        .map(|candidate| CandidateSelectionOption::Candidate {
            candidate,
            distance: Distance::between_album_path_and_candidate(album_path, candidate),
        })
        .chain(additional_options)
        .collect();
    let prompt = format!(
        "Select one of {count} releases for {artist} - {album}:",
        count = candidates.len(),
        artist = album_path.artist,
        album = album_path.album,
    );

    loop {
        let selection = Select::new(&prompt, options.clone()).prompt()?;
        match selection {
            CandidateSelectionOption::Candidate { candidate, .. } => {
                break Ok(CandidateSelection::Candidate(candidate))
            }
            CandidateSelectionOption::SkipItem => break Ok(CandidateSelection::Skip),
            CandidateSelectionOption::EnterMusicBrainzId => {
                let text = Text::new("Enter MusicBrainz ID or URL: ")
                    .with_validator(validate_release_id)
                    .prompt()?;
                if let Some(id) = MusicBrainzId::find_release(&text) {
                    break Ok(CandidateSelection::ReleaseId(id.into_owned()));
                }
            }
        }
    }
}
