// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! The [`TaggedFile`] struct represents a file that contains tags.

use crate::media::MediaLike;
use crate::release::ReleaseLike;
use crate::tag::{read_tags_from_path, Tag, TagKey};
use crate::track::TrackLike;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// A tagged file that contains zero or more tags.
pub struct TaggedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Tags that are present in the file.
    content: Vec<Box<dyn Tag>>,
}

impl fmt::Debug for TaggedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut s = f.debug_tuple("TaggedFile");
        for tag in self.tags() {
            let _ = s.field(&tag.tag_type());
        }
        s.finish()
    }
}

impl TaggedFile {
    /// Create a new tagged file with an empty path from the given tag.
    #[cfg(test)]
    #[must_use]
    pub fn new(content: Vec<Box<dyn Tag>>) -> Self {
        TaggedFile {
            path: PathBuf::new(),
            content,
        }
    }

    /// Creates a [`TaggedFile`] from the path.
    ///
    /// # Errors
    ///
    /// Returns an error in case the file at the given path does not exist or is unsupported.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        read_tags_from_path(path.as_ref()).map(|content| Self {
            path: path.as_ref().to_path_buf(),
            content,
        })
    }

    /// Returns zero or more [`Tag`] objects.
    pub fn tags(&self) -> &[Box<dyn Tag>] {
        &self.content
    }

    /// Yields all values for the given [`TagKey`].
    pub fn tag_values(&self, key: TagKey) -> impl Iterator<Item = Cow<'_, str>> {
        self.tags().iter().filter_map(move |tag| tag.get(key))
    }

    /// Set (or clear) the value for the given [`TagKey`] in all tags.
    #[expect(clippy::needless_pass_by_value)]
    pub fn set_tag_value(&mut self, key: TagKey, value: Option<Cow<'_, str>>) {
        self.content
            .iter_mut()
            .for_each(|tag| tag.set_or_clear(key, value.clone()));
    }

    /// Returns the first value for the given [`TagKey`].
    #[must_use]
    pub fn first_tag_value(&self, key: TagKey) -> Option<Cow<'_, str>> {
        self.tag_values(key).next()
    }

    /// Assign metadata from a `ReleaseLike` struct (e.g. a MusicBrainz release).
    pub fn assign_tags_from_release(&mut self, release: &impl ReleaseLike, with_ids: bool) {
        self.set_tag_value(TagKey::Album, release.release_title());
        self.set_tag_value(TagKey::AlbumArtist, release.release_artist());
        self.set_tag_value(TagKey::ReleaseCountry, release.release_country());
        self.set_tag_value(TagKey::ReleaseDate, release.release_date());
        self.set_tag_value(TagKey::ReleaseStatus, release.release_status());
        self.set_tag_value(
            TagKey::TotalDiscs,
            release
                .total_discs()
                .map(|count| Cow::from(count.to_string())),
        );
        if with_ids {
            self.set_tag_value(
                TagKey::MusicBrainzReleaseArtistId,
                release.musicbrainz_release_artist_id(),
            );
            self.set_tag_value(
                TagKey::MusicBrainzReleaseId,
                release.musicbrainz_release_id(),
            );
        }
    }

    /// Assign metadata from a `MediaLike` struct (e.g. a disc of a MusicBrainz release).
    pub fn assign_tags_from_media(&mut self, media: &impl MediaLike) {
        self.set_tag_value(
            TagKey::DiscNumber,
            media
                .disc_number()
                .map(|number| Cow::from(number.to_string())),
        );
        self.set_tag_value(TagKey::DiscSubtitle, media.media_title());
        self.set_tag_value(TagKey::Media, media.media_format());
        self.set_tag_value(
            TagKey::TotalTracks,
            media
                .media_track_count()
                .map(|count| Cow::from(count.to_string())),
        );
    }

    /// Assign metadata from another `TrackLike` struct (e.g. a MusicBrainz track).
    pub fn assign_tags_from_track(&mut self, track: &impl TrackLike, with_ids: bool) {
        self.set_tag_value(TagKey::Artist, track.track_artist());
        self.set_tag_value(
            TagKey::TrackNumber,
            track
                .track_position()
                .map(|position| Cow::from(position.to_string())),
        );
        self.set_tag_value(TagKey::TrackTitle, track.track_title());
        if with_ids {
            self.set_tag_value(TagKey::MusicBrainzArtistId, track.musicbrainz_artist_id());
            self.set_tag_value(
                TagKey::MusicBrainzRecordingId,
                track.musicbrainz_recording_id(),
            );
            self.set_tag_value(TagKey::MusicBrainzTrackId, track.musicbrainz_track_id());
        }
    }

    /// Write all tags to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if writing any underlying tag fails.
    pub fn write_tags(&mut self) -> crate::Result<()> {
        for tag in &mut self.content {
            tag.write(self.path.as_path())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::musicbrainz::{Document, Release};

    const RELEASE_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release.xml"
    ));

    fn parse_release() -> Release {
        let document = Document::parse(RELEASE_XML).unwrap();
        Release::from_lookup_response(&document).unwrap()
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_assign_tags_id3() {
        use crate::tag::id3::ID3v2Tag;

        let release = parse_release();
        let medium = &release.media[0];
        let track = &medium.tracks[5];

        let mut tagged_file = TaggedFile::new(vec![Box::new(ID3v2Tag::default())]);
        assert!(tagged_file.first_tag_value(TagKey::TrackTitle).is_none());
        assert!(tagged_file.first_tag_value(TagKey::Album).is_none());

        tagged_file.assign_tags_from_release(&release, true);
        tagged_file.assign_tags_from_media(medium);
        tagged_file.assign_tags_from_track(track, true);

        assert_eq!(
            tagged_file.first_tag_value(TagKey::Album).as_deref(),
            Some("Ahmad Jamal at the Pershing: But Not for Me")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::Artist).as_deref(),
            Some("The Ahmad Jamal Trio")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::TrackTitle).as_deref(),
            Some("Poinciana")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::TrackNumber).as_deref(),
            Some("6")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::TotalTracks).as_deref(),
            Some("8")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::DiscNumber).as_deref(),
            Some("1")
        );
        assert_eq!(
            tagged_file
                .first_tag_value(TagKey::MusicBrainzRecordingId)
                .as_deref(),
            Some("00000006-1111-4222-8333-944455556666")
        );
        assert_eq!(
            tagged_file
                .first_tag_value(TagKey::MusicBrainzReleaseId)
                .as_deref(),
            Some("0008f765-032b-46cd-ab69-2220edab1837")
        );
    }

    #[cfg(feature = "flac")]
    #[test]
    fn test_assign_tags_flac_without_ids() {
        use crate::tag::flac::FlacTag;

        let release = parse_release();
        let medium = &release.media[0];
        let track = &medium.tracks[0];

        let mut tagged_file = TaggedFile::new(vec![Box::new(FlacTag::new())]);
        tagged_file.assign_tags_from_release(&release, false);
        tagged_file.assign_tags_from_media(medium);
        tagged_file.assign_tags_from_track(track, false);

        assert_eq!(
            tagged_file.first_tag_value(TagKey::TrackTitle).as_deref(),
            Some("But Not for Me")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::ReleaseCountry).as_deref(),
            Some("US")
        );
        assert!(tagged_file
            .first_tag_value(TagKey::MusicBrainzRecordingId)
            .is_none());
        assert!(tagged_file
            .first_tag_value(TagKey::MusicBrainzReleaseId)
            .is_none());
    }

    #[cfg(feature = "id3")]
    #[test]
    fn test_write_tags() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("06 - Poinciana.mp3");
        std::fs::write(&path, b"not really mpeg audio").unwrap();

        let release = parse_release();
        let mut tagged_file = TaggedFile::read_from_path(&path).unwrap();
        tagged_file.assign_tags_from_track(&release.media[0].tracks[5], false);
        tagged_file.write_tags().unwrap();

        let tagged_file = TaggedFile::read_from_path(&path).unwrap();
        assert_eq!(
            tagged_file.first_tag_value(TagKey::TrackTitle).as_deref(),
            Some("Poinciana")
        );
    }
}
