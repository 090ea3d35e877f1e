// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Generic track implementations.

use crate::musicbrainz::Track as MusicBrainzTrack;
use std::borrow::Cow;

/// Represent a generic track, independent of the underlying source.
pub trait TrackLike {
    /// Track Artist Name(s).
    fn track_artist(&self) -> Option<Cow<'_, str>>;

    /// Track Artist’s MusicBrainz Identifier.
    fn musicbrainz_artist_id(&self) -> Option<Cow<'_, str>>;

    /// Recording’s MusicBrainz Identifier.
    fn musicbrainz_recording_id(&self) -> Option<Cow<'_, str>>;

    /// Release Track MusicBrainz Identifier.
    fn musicbrainz_track_id(&self) -> Option<Cow<'_, str>>;

    /// Track position on the disc.
    fn track_position(&self) -> Option<u32>;

    /// Track number on the disc, as printed on the medium.
    fn track_number(&self) -> Option<Cow<'_, str>>;

    /// Track Title.
    fn track_title(&self) -> Option<Cow<'_, str>>;

    /// Track length.
    fn track_length(&self) -> Option<chrono::TimeDelta>;
}

impl TrackLike for MusicBrainzTrack {
    fn track_artist(&self) -> Option<Cow<'_, str>> {
        self.artist
            .as_ref()
            .map(|artist| Cow::from(artist.name.as_str()))
    }

    fn musicbrainz_artist_id(&self) -> Option<Cow<'_, str>> {
        self.artist
            .as_ref()
            .and_then(|artist| artist.artist_id.as_deref())
            .map(Cow::from)
    }

    fn musicbrainz_recording_id(&self) -> Option<Cow<'_, str>> {
        self.recording_id.as_deref().map(Cow::from)
    }

    fn musicbrainz_track_id(&self) -> Option<Cow<'_, str>> {
        self.id.as_deref().map(Cow::from)
    }

    fn track_position(&self) -> Option<u32> {
        Some(self.position)
    }

    fn track_number(&self) -> Option<Cow<'_, str>> {
        self.number
            .as_deref()
            .map(Cow::from)
            .or_else(|| Some(Cow::from(self.position.to_string())))
    }

    fn track_title(&self) -> Option<Cow<'_, str>> {
        Some(Cow::from(self.title.as_str())).filter(|title| !title.is_empty())
    }

    fn track_length(&self) -> Option<chrono::TimeDelta> {
        self.length
            .and_then(|length| i64::try_from(length).ok())
            .map(chrono::TimeDelta::milliseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::musicbrainz::{Document, Release};
    use crate::release::ReleaseLike;

    const RELEASE_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release.xml"
    ));

    #[test]
    fn test_tracklike_impl() {
        let document = Document::parse(RELEASE_XML).unwrap();
        let release = Release::from_lookup_response(&document).unwrap();
        let track = release.release_tracks().nth(5).unwrap();

        assert_eq!(track.track_title().unwrap(), "Poinciana");
        assert_eq!(track.track_artist().unwrap(), "The Ahmad Jamal Trio");
        assert_eq!(track.track_number().unwrap(), "B2");
        assert_eq!(track.track_position(), Some(6));
        assert_eq!(
            track.musicbrainz_track_id().unwrap(),
            "00000006-7a4e-3c1f-9b2a-5d6e7f8a9b0c"
        );
        assert_eq!(
            track.track_length().unwrap(),
            chrono::TimeDelta::milliseconds(487_533)
        );
    }
}
