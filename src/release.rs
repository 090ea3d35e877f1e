// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Generic release implementations.
use crate::media::MediaLike;
use crate::musicbrainz::{Release as MusicBrainzRelease, ReleaseCandidate};
use crate::track::TrackLike;
use itertools::Itertools;
use std::borrow::Cow;

/// Represent a generic release, independent of the underlying source.
pub trait ReleaseLike {
    /// Number of tracks.
    fn release_track_count(&self) -> Option<usize> {
        self.media()
            .filter_map(MediaLike::media_track_count)
            .sum::<usize>()
            .into()
    }

    /// Title of the release.
    fn release_title(&self) -> Option<Cow<'_, str>>;

    /// Artist(s) primarily credited on the release.
    fn release_artist(&self) -> Option<Cow<'_, str>>;

    /// Release Artist’s MusicBrainz Identifier.
    fn musicbrainz_release_artist_id(&self) -> Option<Cow<'_, str>>;

    /// Release MusicBrainz Identifier.
    fn musicbrainz_release_id(&self) -> Option<Cow<'_, str>>;

    /// Country in which the release was issued.
    fn release_country(&self) -> Option<Cow<'_, str>>;

    /// Release Date (YYYY-MM-DD) - the date that the release was issued.
    fn release_date(&self) -> Option<Cow<'_, str>>;

    /// Release Status indicating the “official” status of the release.
    fn release_status(&self) -> Option<Cow<'_, str>>;

    /// Total number of discs in this release.
    fn total_discs(&self) -> Option<usize> {
        Some(self.media().count()).filter(|count| *count > 0)
    }

    /// MusicBrainz Release URL
    fn musicbrainz_release_url(&self) -> Option<Cow<'_, str>> {
        self.musicbrainz_release_id()
            .map(|id| format!("https://musicbrainz.org/release/{id}").into())
    }

    /// Yields the media contained in the release.
    fn media(&self) -> impl Iterator<Item = &(impl MediaLike + '_)>;

    /// Find media formats for a release as a human-readable string.
    fn release_media_format(&self) -> Option<Cow<'_, str>> {
        format_media(self.media().filter_map(MediaLike::media_format))
    }

    /// Yields the tracks contained in the release.
    fn release_tracks(&self) -> impl Iterator<Item = &(impl TrackLike + '_)> {
        self.media().flat_map(MediaLike::media_tracks)
    }
}

/// Summarize a sequence of media formats, e.g. `2×CD+DVD`.
fn format_media<'a>(formats: impl Iterator<Item = Cow<'a, str>>) -> Option<Cow<'a, str>> {
    let formats = formats
        .chunk_by(|format: &Cow<'_, str>| format.to_string())
        .into_iter()
        .map(|(key, group)| (group.count(), key))
        .fold(String::new(), |acc, (count, format)| {
            let counted_format = if count > 1 {
                format!("{count}×{format}")
            } else {
                format
            };
            if acc.is_empty() {
                counted_format
            } else {
                format!("{acc}+{counted_format}")
            }
        });

    if formats.is_empty() {
        None
    } else {
        Some(Cow::from(formats))
    }
}

impl ReleaseLike for MusicBrainzRelease {
    fn media(&self) -> impl Iterator<Item = &(impl MediaLike + '_)> {
        self.media.iter()
    }

    fn release_title(&self) -> Option<Cow<'_, str>> {
        Some(Cow::from(self.title.as_str())).filter(|title| !title.is_empty())
    }

    fn release_artist(&self) -> Option<Cow<'_, str>> {
        self.artist
            .as_ref()
            .map(|artist| Cow::from(artist.name.as_str()))
    }

    fn musicbrainz_release_artist_id(&self) -> Option<Cow<'_, str>> {
        self.artist
            .as_ref()
            .and_then(|artist| artist.artist_id.as_deref())
            .map(Cow::from)
    }

    fn musicbrainz_release_id(&self) -> Option<Cow<'_, str>> {
        Cow::from(self.id.as_str()).into()
    }

    fn release_country(&self) -> Option<Cow<'_, str>> {
        self.country.as_deref().map(Cow::from)
    }

    fn release_date(&self) -> Option<Cow<'_, str>> {
        self.date.as_deref().map(Cow::from)
    }

    fn release_status(&self) -> Option<Cow<'_, str>> {
        self.status.as_deref().map(Cow::from)
    }
}

impl ReleaseCandidate {
    /// Find media formats for this candidate as a human-readable string.
    pub fn media_format(&self) -> Option<Cow<'_, str>> {
        format_media(
            self.formats
                .iter()
                .flatten()
                .map(|format| Cow::from(format.as_str())),
        )
    }
}
