// Copyright (c) 2022 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Tags and tag-related functions.

#[cfg(feature = "flac")]
pub mod flac;
#[cfg(feature = "id3")]
pub mod id3;

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

/// A tag key describes the kind of information in a generic, format-independent way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    /// Title of the release.
    Album,
    /// Artist(s) primarily credited on the release.
    AlbumArtist,
    /// Track Artist Name(s).
    Artist,
    /// Number of the disc in this release that contains this track.
    DiscNumber,
    /// The Media Title given to a specific disc.
    DiscSubtitle,
    /// Release Format (e.g.: CD).
    Media,
    /// Track Artist’s MusicBrainz Identifier.
    MusicBrainzArtistId,
    /// Recording’s MusicBrainz Identifier.
    MusicBrainzRecordingId,
    /// Release Artist’s MusicBrainz Identifier.
    MusicBrainzReleaseArtistId,
    /// Release MusicBrainz Identifier.
    MusicBrainzReleaseId,
    /// Release Track MusicBrainz Identifier.
    MusicBrainzTrackId,
    /// Country in which the release was issued.
    ReleaseCountry,
    /// Release Date (YYYY-MM-DD) - the date that the release was issued.
    ReleaseDate,
    /// Release Status indicating the “official” status of the release.
    ReleaseStatus,
    /// Total number of discs in this release.
    TotalDiscs,
    /// Total tracks on this disc.
    TotalTracks,
    /// Track number on the disc.
    TrackNumber,
    /// Track Title.
    TrackTitle,
}

/// The tag type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    /// ID3v2.2 tag
    ID3v22,
    /// ID3v2.3 tag
    ID3v23,
    /// ID3v2.4 tag
    ID3v24,
    /// Vorbis tag from a FLAC file
    Flac,
}

/// A tag that can be read, modified and written back to a file.
pub trait Tag {
    /// Get the tag type.
    fn tag_type(&self) -> TagType;

    /// Get the string value for the tag key.
    fn get(&self, key: TagKey) -> Option<Cow<'_, str>>;

    /// Clear the value for the tag key.
    fn clear(&mut self, key: TagKey);

    /// Set the value for the tag key.
    fn set(&mut self, key: TagKey, value: Cow<'_, str>);

    /// Set the value for the tag key if `value` is `Some`, otherwise clear it.
    fn set_or_clear(&mut self, key: TagKey, value: Option<Cow<'_, str>>) {
        match value {
            Some(value) => self.set(key, value),
            None => self.clear(key),
        }
    }

    /// Write the tag to the file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&mut self, path: &Path) -> crate::Result<()>;
}

/// Returns `true` if the path has an extension of a supported audio file type.
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .is_some_and(|extension| match extension.as_str() {
            #[cfg(feature = "id3")]
            "mp3" => true,
            #[cfg(feature = "flac")]
            "flac" => true,
            _ => false,
        })
}

/// Read the tags of the file at the given path.
///
/// # Errors
///
/// Returns an error if the file type is unsupported or the file cannot be read.
pub fn read_tags_from_path(path: &Path) -> crate::Result<Vec<Box<dyn Tag>>> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .ok_or(crate::Error::UnknownFileType)?;
    match extension.as_str() {
        #[cfg(feature = "id3")]
        "mp3" => self::id3::ID3v2Tag::read_from_path(path)
            .map(Box::new)
            .map(|tag| Box::<dyn Tag>::from(tag))
            .map(|tag| vec![tag]),
        #[cfg(feature = "flac")]
        "flac" => self::flac::FlacTag::read_from_path(path)
            .map(Box::new)
            .map(|tag| Box::<dyn Tag>::from(tag))
            .map(|tag| vec![tag]),
        ext => {
            log::debug!("Unknown file extension {ext:?}");
            Err(crate::Error::UnknownFileType)
        }
    }
}
