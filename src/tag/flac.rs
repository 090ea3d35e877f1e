// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for FLAC tags.

use crate::tag::{Tag, TagKey, TagType};
use std::borrow::Cow;
use std::path::Path;

/// FLAC tag.
#[derive(Debug)]
pub struct FlacTag {
    /// The underlying tag data.
    data: metaflac::Tag,
}

impl FlacTag {
    /// Create an empty tag.
    #[cfg(test)]
    pub fn new() -> Self {
        FlacTag {
            data: metaflac::Tag::new(),
        }
    }

    /// Read the FLAC tag from the path.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let data = metaflac::Tag::read_from_path(path)?;
        Ok(FlacTag { data })
    }

    /// Get the vorbis key name for a tag key.
    fn tag_key_to_frame(key: TagKey) -> &'static str {
        match key {
            TagKey::Album => "ALBUM",
            TagKey::AlbumArtist => "ALBUMARTIST",
            TagKey::Artist => "ARTIST",
            TagKey::DiscNumber => "DISCNUMBER",
            TagKey::DiscSubtitle => "DISCSUBTITLE",
            TagKey::Media => "MEDIA",
            TagKey::MusicBrainzArtistId => "MUSICBRAINZ_ARTISTID",
            TagKey::MusicBrainzRecordingId => "MUSICBRAINZ_TRACKID",
            TagKey::MusicBrainzReleaseArtistId => "MUSICBRAINZ_ALBUMARTISTID",
            TagKey::MusicBrainzReleaseId => "MUSICBRAINZ_ALBUMID",
            TagKey::MusicBrainzTrackId => "MUSICBRAINZ_RELEASETRACKID",
            TagKey::ReleaseCountry => "RELEASECOUNTRY",
            TagKey::ReleaseDate => "DATE",
            TagKey::ReleaseStatus => "RELEASESTATUS",
            TagKey::TotalDiscs => "DISCTOTAL",
            TagKey::TotalTracks => "TRACKTOTAL",
            TagKey::TrackNumber => "TRACKNUMBER",
            TagKey::TrackTitle => "TITLE",
        }
    }
}

impl Tag for FlacTag {
    fn tag_type(&self) -> TagType {
        TagType::Flac
    }

    fn get(&self, key: TagKey) -> Option<Cow<'_, str>> {
        self.data
            .get_vorbis(Self::tag_key_to_frame(key))
            .and_then(|mut iterator| iterator.next())
            .map(Cow::from)
    }

    fn clear(&mut self, key: TagKey) {
        self.data.remove_vorbis(Self::tag_key_to_frame(key));
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        self.data
            .set_vorbis(Self::tag_key_to_frame(key), vec![value.into_owned()]);
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path)?;
        Ok(())
    }
}
