// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Typed views over release search and lookup responses.

use super::xml::{Document, Element};

/// Artist credit as displayed on a release or track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCredit {
    /// Credited names joined by their join phrases.
    pub name: String,
    /// MBID of the first credited artist.
    pub artist_id: Option<String>,
}

impl ArtistCredit {
    /// Read the `artist-credit` child of an element.
    fn from_parent(element: &Element) -> Option<Self> {
        let credit = element.child("artist-credit")?;
        let name_credits: Vec<&Element> = credit.children("name-credit").collect();
        let name = name_credits
            .iter()
            .fold(String::new(), |acc, name_credit| {
                let name = name_credit
                    .child_text("name")
                    .or_else(|| {
                        name_credit
                            .child("artist")
                            .and_then(|artist| artist.child_text("name"))
                    })
                    .unwrap_or_default();
                acc + &name + name_credit.attr("joinphrase").unwrap_or_default()
            });
        if name.is_empty() {
            return None;
        }

        let artist_id = name_credits
            .first()
            .and_then(|name_credit| name_credit.child("artist"))
            .and_then(|artist| artist.attr("id"))
            .map(ToString::to_string);
        Some(Self { name, artist_id })
    }
}

/// Parse the text of a child element as number.
fn child_number<T: std::str::FromStr>(element: &Element, name: &str) -> Option<T> {
    element
        .child_text(name)
        .and_then(|text| text.trim().parse().ok())
}

/// A release found by a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    /// Release MBID.
    pub id: String,
    /// Search score (0-100).
    pub score: Option<u8>,
    /// Release title.
    pub title: String,
    /// Release artist credit.
    pub artist: Option<String>,
    /// Release date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub date: Option<String>,
    /// Release country.
    pub country: Option<String>,
    /// Release status (e.g., `Official`).
    pub status: Option<String>,
    /// Format of each medium.
    pub formats: Vec<Option<String>>,
    /// Total number of tracks on all media.
    pub track_count: Option<usize>,
}

impl ReleaseCandidate {
    /// Read a candidate from a `release` element.
    fn from_element(element: &Element) -> Option<Self> {
        let id = element.attr("id")?.to_string();
        let title = element.child_text("title").unwrap_or_default();
        let media: Vec<&Element> = element
            .child("medium-list")
            .map(|list| list.children("medium").collect())
            .unwrap_or_default();
        let formats = media
            .iter()
            .map(|medium| medium.child_text("format"))
            .collect();
        let track_counts: Vec<usize> = media
            .iter()
            .filter_map(|medium| medium.child("track-list"))
            .filter_map(|list| list.attr("count"))
            .filter_map(|count| count.parse().ok())
            .collect();
        let track_count = if track_counts.is_empty() {
            None
        } else {
            Some(track_counts.into_iter().sum())
        };

        Some(Self {
            id,
            score: element.attr("score").and_then(|score| score.parse().ok()),
            title,
            artist: ArtistCredit::from_parent(element).map(|credit| credit.name),
            date: element.child_text("date"),
            country: element.child_text("country"),
            status: element.child_text("status"),
            formats,
            track_count,
        })
    }

    /// Read all candidates from a release search response, in response order.
    pub fn from_search_response(document: &Document) -> Vec<Self> {
        document
            .root
            .find(&["release-list"])
            .map(|list| list.children("release").filter_map(Self::from_element).collect())
            .unwrap_or_default()
    }
}

/// A track on a medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Track MBID.
    pub id: Option<String>,
    /// Position on the medium (1-based).
    pub position: u32,
    /// Track number as printed on the medium (e.g., `A1`).
    pub number: Option<String>,
    /// Track title.
    pub title: String,
    /// Length in milliseconds.
    pub length: Option<u64>,
    /// Recording MBID.
    pub recording_id: Option<String>,
    /// Track artist credit.
    pub artist: Option<ArtistCredit>,
}

impl Track {
    /// Read a track from a `track` element.
    fn from_element(element: &Element, release_artist: Option<&ArtistCredit>) -> Option<Self> {
        let recording = element.child("recording");
        let position = child_number(element, "position")?;
        let title = element
            .child_text("title")
            .or_else(|| recording.and_then(|recording| recording.child_text("title")))
            .unwrap_or_default();
        let length = child_number(element, "length")
            .or_else(|| recording.and_then(|recording| child_number(recording, "length")));
        let artist = ArtistCredit::from_parent(element)
            .or_else(|| recording.and_then(ArtistCredit::from_parent))
            .or_else(|| release_artist.cloned());

        Some(Self {
            id: element.attr("id").map(ToString::to_string),
            position,
            number: element.child_text("number"),
            title,
            length,
            recording_id: recording
                .and_then(|recording| recording.attr("id"))
                .map(ToString::to_string),
            artist,
        })
    }
}

/// A medium (disc, vinyl, ...) of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medium {
    /// Position in the release (1-based).
    pub position: u32,
    /// Format (e.g., `CD`).
    pub format: Option<String>,
    /// Medium title.
    pub title: Option<String>,
    /// Tracks in medium order.
    pub tracks: Vec<Track>,
}

impl Medium {
    /// Read a medium from a `medium` element.
    fn from_element(
        element: &Element,
        index: usize,
        release_artist: Option<&ArtistCredit>,
    ) -> Self {
        let mut tracks: Vec<Track> = element
            .child("track-list")
            .map(|list| {
                list.children("track")
                    .filter_map(|track| Track::from_element(track, release_artist))
                    .collect()
            })
            .unwrap_or_default();
        tracks.sort_by_key(|track| track.position);

        Self {
            position: child_number(element, "position")
                .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX)),
            format: element.child_text("format"),
            title: element.child_text("title"),
            tracks,
        }
    }
}

/// A release with its media and tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release MBID.
    pub id: String,
    /// Release title.
    pub title: String,
    /// Release artist credit.
    pub artist: Option<ArtistCredit>,
    /// Release date.
    pub date: Option<String>,
    /// Release country.
    pub country: Option<String>,
    /// Release status.
    pub status: Option<String>,
    /// Media in release order.
    pub media: Vec<Medium>,
}

impl Release {
    /// Read the release from a lookup response.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not contain a release.
    pub fn from_lookup_response(document: &Document) -> crate::Result<Self> {
        let element = if document.root.local_name() == "release" {
            &document.root
        } else {
            document
                .root
                .child("release")
                .ok_or(crate::Error::MusicBrainzLookupFailed("response contains no release"))?
        };
        let id = element
            .attr("id")
            .ok_or(crate::Error::MusicBrainzLookupFailed("release has no id"))?
            .to_string();
        let artist = ArtistCredit::from_parent(element);
        let mut media: Vec<Medium> = element
            .child("medium-list")
            .map(|list| {
                list.children("medium")
                    .enumerate()
                    .map(|(index, medium)| Medium::from_element(medium, index, artist.as_ref()))
                    .collect()
            })
            .unwrap_or_default();
        media.sort_by_key(|medium| medium.position);

        Ok(Self {
            id,
            title: element.child_text("title").unwrap_or_default(),
            date: element.child_text("date"),
            country: element.child_text("country"),
            status: element.child_text("status"),
            artist,
            media,
        })
    }
}
