// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Support for ID3 tags.

use crate::tag::{Tag, TagKey, TagType};
use crate::util::release_year;
use id3::{
    frame::{ExtendedText, UniqueFileIdentifier},
    TagLike,
};
use std::borrow::Cow;
use std::path::Path;

/// ID3 frame ID.
#[derive(Debug)]
enum FrameId<'a> {
    /// Text frame.
    Text(&'a str),
    /// Year-only text frame (`TYER`).
    Year(&'a str),
    /// Extended Text frame (`TXXX`).
    ExtendedText(&'a str),
    /// Unique File Identifier frame (`UFID`).
    UniqueFileIdentifier(&'a str),
    /// Number part of a `n/total` frame.
    Number(NumberFrame),
    /// Total part of a `n/total` frame.
    Total(NumberFrame),
}

/// Frames that store a number and an optional total.
#[derive(Debug, Clone, Copy)]
enum NumberFrame {
    /// Track number (`TRCK`).
    Track,
    /// Disc number (`TPOS`).
    Disc,
}

/// ID3 tag (version 2).
#[derive(Debug)]
pub struct ID3v2Tag {
    /// The underlying tag data.
    data: id3::Tag,
}

impl Default for ID3v2Tag {
    fn default() -> Self {
        Self::with_version(id3::Version::Id3v24)
    }
}

impl ID3v2Tag {
    /// Create an empty tag with the given version.
    pub fn with_version(version: id3::Version) -> Self {
        ID3v2Tag {
            data: id3::Tag::with_version(version),
        }
    }

    /// Read the ID3 tag from the path.
    ///
    /// Files without a tag yield an empty ID3v2.4 tag.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        match id3::Tag::read_from_path(path.as_ref()) {
            Ok(data) => Ok(ID3v2Tag { data }),
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => {
                log::debug!(
                    "No ID3 tag found in {}, creating new one",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get the ID3 frame for a tag key.
    fn tag_key_to_frame(&self, key: TagKey) -> Option<FrameId<'static>> {
        match key {
            TagKey::Album => FrameId::Text("TALB").into(),
            TagKey::AlbumArtist => FrameId::Text("TPE2").into(),
            TagKey::Artist => FrameId::Text("TPE1").into(),
            TagKey::DiscNumber => FrameId::Number(NumberFrame::Disc).into(),
            TagKey::DiscSubtitle => match self.data.version() {
                id3::Version::Id3v22 | id3::Version::Id3v23 => None,
                id3::Version::Id3v24 => FrameId::Text("TSST").into(),
            },
            TagKey::Media => FrameId::Text("TMED").into(),
            TagKey::MusicBrainzArtistId => FrameId::ExtendedText("MusicBrainz Artist Id").into(),
            TagKey::MusicBrainzRecordingId => {
                FrameId::UniqueFileIdentifier("http://musicbrainz.org").into()
            }
            TagKey::MusicBrainzReleaseArtistId => {
                FrameId::ExtendedText("MusicBrainz Album Artist Id").into()
            }
            TagKey::MusicBrainzReleaseId => FrameId::ExtendedText("MusicBrainz Album Id").into(),
            TagKey::MusicBrainzTrackId => {
                FrameId::ExtendedText("MusicBrainz Release Track Id").into()
            }
            TagKey::ReleaseCountry => {
                FrameId::ExtendedText("MusicBrainz Album Release Country").into()
            }
            TagKey::ReleaseDate => match self.data.version() {
                id3::Version::Id3v22 | id3::Version::Id3v23 => FrameId::Year("TYER").into(),
                id3::Version::Id3v24 => FrameId::Text("TDRC").into(),
            },
            TagKey::ReleaseStatus => FrameId::ExtendedText("MusicBrainz Album Status").into(),
            TagKey::TotalDiscs => FrameId::Total(NumberFrame::Disc).into(),
            TagKey::TotalTracks => FrameId::Total(NumberFrame::Track).into(),
            TagKey::TrackNumber => FrameId::Number(NumberFrame::Track).into(),
            TagKey::TrackTitle => FrameId::Text("TIT2").into(),
        }
    }

    /// Get the content of a text frame as string.
    fn get_frames<'a>(&'a self, frame_id: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .get(frame_id)
            .and_then(|frame| frame.content().text_values())
            .into_iter()
            .flatten()
    }

    /// Get the content of an extended text frame as string.
    fn get_extended_texts<'a>(&'a self, description: &'a str) -> impl Iterator<Item = &'a str> {
        self.data
            .extended_texts()
            .filter(move |extended_text| extended_text.description == description)
            .map(|extended_text| extended_text.value.as_str())
    }

    /// Get the content of unique file identifier frames as byte slices.
    fn get_unique_file_identifiers<'a>(
        &'a self,
        owner_id: &'a str,
    ) -> impl Iterator<Item = &'a [u8]> {
        self.data
            .unique_file_identifiers()
            .filter(move |unique_file_identifier| {
                unique_file_identifier.owner_identifier == owner_id
            })
            .map(|unique_file_identifier| unique_file_identifier.identifier.as_slice())
    }

    /// Get the number part of a `n/total` frame.
    fn get_number(&self, frame: NumberFrame) -> Option<u32> {
        match frame {
            NumberFrame::Track => self.data.track(),
            NumberFrame::Disc => self.data.disc(),
        }
    }

    /// Get the total part of a `n/total` frame.
    fn get_total(&self, frame: NumberFrame) -> Option<u32> {
        match frame {
            NumberFrame::Track => self.data.total_tracks(),
            NumberFrame::Disc => self.data.total_discs(),
        }
    }
}

/// Parse a number from a tag value, accepting the `n/total` notation.
fn parse_number(value: &str) -> Option<u32> {
    value
        .split('/')
        .next()
        .and_then(|number| number.trim().parse().ok())
}

impl Tag for ID3v2Tag {
    fn tag_type(&self) -> TagType {
        match self.data.version() {
            id3::Version::Id3v22 => TagType::ID3v22,
            id3::Version::Id3v23 => TagType::ID3v23,
            id3::Version::Id3v24 => TagType::ID3v24,
        }
    }

    fn get(&self, key: TagKey) -> Option<Cow<'_, str>> {
        self.tag_key_to_frame(key)
            .and_then(|frame_id| match frame_id {
                FrameId::Text(id) | FrameId::Year(id) => self.get_frames(id).next().map(Cow::from),
                FrameId::ExtendedText(id) => self.get_extended_texts(id).next().map(Cow::from),
                FrameId::UniqueFileIdentifier(id) => self
                    .get_unique_file_identifiers(id)
                    .map(std::str::from_utf8)
                    .find_map(Result::ok)
                    .map(Cow::from),
                FrameId::Number(frame) => self
                    .get_number(frame)
                    .map(|number| Cow::from(number.to_string())),
                FrameId::Total(frame) => self
                    .get_total(frame)
                    .map(|total| Cow::from(total.to_string())),
            })
    }

    fn clear(&mut self, key: TagKey) {
        let Some(frame) = self.tag_key_to_frame(key) else {
            return;
        };
        match frame {
            FrameId::Text(id) | FrameId::Year(id) => {
                self.data.remove(id);
            }
            FrameId::ExtendedText(description) => {
                self.data.remove_extended_text(Some(description), None);
            }
            FrameId::UniqueFileIdentifier(owner_id) => {
                self.data
                    .remove_unique_file_identifier_by_owner_identifier(owner_id);
            }
            FrameId::Number(NumberFrame::Track) => self.data.remove_track(),
            FrameId::Number(NumberFrame::Disc) => self.data.remove_disc(),
            FrameId::Total(NumberFrame::Track) => self.data.remove_total_tracks(),
            FrameId::Total(NumberFrame::Disc) => self.data.remove_total_discs(),
        }
    }

    fn set(&mut self, key: TagKey, value: Cow<'_, str>) {
        let Some(frame) = self.tag_key_to_frame(key) else {
            return;
        };
        match frame {
            FrameId::Text(id) => {
                self.data.set_text(id, value);
            }
            FrameId::Year(id) => {
                if let Some(year) = release_year(&value) {
                    self.data.set_text(id, year);
                } else {
                    log::warn!("Ignoring invalid date {value:?}");
                }
            }
            FrameId::ExtendedText(description) => {
                self.data.remove_extended_text(Some(description), None);
                self.data.add_frame(ExtendedText {
                    description: description.to_string(),
                    value: value.into_owned(),
                });
            }
            FrameId::UniqueFileIdentifier(owner_id) => {
                self.data
                    .remove_unique_file_identifier_by_owner_identifier(owner_id);
                self.data.add_frame(UniqueFileIdentifier {
                    owner_identifier: owner_id.to_string(),
                    identifier: value.as_bytes().to_vec(),
                });
            }
            FrameId::Number(frame) => {
                let Some(number) = parse_number(&value) else {
                    log::warn!("Ignoring invalid number {value:?} for {key:?}");
                    return;
                };
                match frame {
                    NumberFrame::Track => self.data.set_track(number),
                    NumberFrame::Disc => self.data.set_disc(number),
                }
            }
            FrameId::Total(frame) => {
                let Some(total) = parse_number(&value) else {
                    log::warn!("Ignoring invalid total {value:?} for {key:?}");
                    return;
                };
                match frame {
                    NumberFrame::Track => self.data.set_total_tracks(total),
                    NumberFrame::Disc => self.data.set_total_discs(total),
                }
            }
        }
    }

    fn write(&mut self, path: &Path) -> crate::Result<()> {
        self.data.write_to_path(path, self.data.version())?;
        Ok(())
    }
}
