// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Classification of local file names by the naming convention they follow.

use regex::Regex;
use std::fmt;

/// The naming convention a file stem follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// The stem is already the canonical name of a track.
    Canonical,
    /// `1-01 Title`, `2.03 - Title`.
    DiscTrack,
    /// Ripper default names such as `Track 01`, `track_01` or `Track01`.
    TrackWord,
    /// `Artist - 01 - Title`.
    ArtistNumberTitle,
    /// `01 - Title`, `01. Title`, `01 Title`, `01_Title`.
    NumberTitle,
    /// `01`.
    NumberOnly,
    /// Anything else.
    TitleOnly,
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Canonical => "canonical",
            Self::DiscTrack => "disc-track",
            Self::TrackWord => "track-word",
            Self::ArtistNumberTitle => "artist-number-title",
            Self::NumberTitle => "number-title",
            Self::NumberOnly => "number-only",
            Self::TitleOnly => "title-only",
        };
        write!(f, "{name}")
    }
}

/// Information extracted from a file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// The convention the stem was recognized as.
    pub convention: NamingConvention,
    /// Disc number, if present in the name.
    pub disc_number: Option<u32>,
    /// Track number, if present in the name.
    pub track_number: Option<u32>,
    /// Title, if present in the name.
    pub title: Option<String>,
}

/// Compiled patterns for the non-canonical naming conventions.
#[derive(Debug)]
pub struct FileNameParser {
    /// Pattern for [`NamingConvention::DiscTrack`].
    disc_track: Regex,
    /// Pattern for [`NamingConvention::TrackWord`].
    track_word: Regex,
    /// Pattern for [`NamingConvention::ArtistNumberTitle`].
    artist_number_title: Regex,
    /// Pattern for [`NamingConvention::NumberTitle`].
    number_title: Regex,
    /// Pattern for [`NamingConvention::NumberOnly`].
    number_only: Regex,
}

/// Turn underscores into spaces and trim, returning `None` for an empty title.
fn clean_title(value: &str) -> Option<String> {
    let title = value.replace('_', " ");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Parse a decimal number from an optional capture.
fn parse_number(value: Option<regex::Match<'_>>) -> Option<u32> {
    value.and_then(|m| m.as_str().parse::<u32>().ok())
}

impl FileNameParser {
    /// Compile the file name patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> crate::Result<Self> {
        Ok(Self {
            disc_track: Regex::new(r"^(\d{1,2})[-.](\d{1,3})[ ._-]*(.*)$")?,
            track_word: Regex::new(r"(?i)^track[ ._-]*(\d{1,3})$")?,
            artist_number_title: Regex::new(r"^(.+?)\s+-\s+(\d{1,3})\s+-\s+(.+)$")?,
            number_title: Regex::new(r"^(\d{1,3})(?:\s*[-.]\s*|[ _]+)(.+)$")?,
            number_only: Regex::new(r"^(\d{1,3})$")?,
        })
    }

    /// Classify a file stem.
    ///
    /// A stem found in `canonical_stems` is reported as [`NamingConvention::Canonical`], but the
    /// numbers and title are still extracted from it.
    pub fn parse(&self, stem: &str, canonical_stems: &[String]) -> FileName {
        let mut file_name = self.parse_legacy(stem.trim());
        if canonical_stems.iter().any(|canonical| canonical == stem) {
            file_name.convention = NamingConvention::Canonical;
        }
        file_name
    }

    /// Classify a stem by the legacy conventions only.
    fn parse_legacy(&self, stem: &str) -> FileName {
        if let Some(captures) = self.disc_track.captures(stem) {
            return FileName {
                convention: NamingConvention::DiscTrack,
                disc_number: parse_number(captures.get(1)),
                track_number: parse_number(captures.get(2)),
                title: captures.get(3).and_then(|m| clean_title(m.as_str())),
            };
        }

        if let Some(captures) = self.track_word.captures(stem) {
            return FileName {
                convention: NamingConvention::TrackWord,
                disc_number: None,
                track_number: parse_number(captures.get(1)),
                title: None,
            };
        }

        if let Some(captures) = self.artist_number_title.captures(stem) {
            return FileName {
                convention: NamingConvention::ArtistNumberTitle,
                disc_number: None,
                track_number: parse_number(captures.get(2)),
                title: captures.get(3).and_then(|m| clean_title(m.as_str())),
            };
        }

        if let Some(captures) = self.number_title.captures(stem) {
            return FileName {
                convention: NamingConvention::NumberTitle,
                disc_number: None,
                track_number: parse_number(captures.get(1)),
                title: captures.get(2).and_then(|m| clean_title(m.as_str())),
            };
        }

        if let Some(captures) = self.number_only.captures(stem) {
            return FileName {
                convention: NamingConvention::NumberOnly,
                disc_number: None,
                track_number: parse_number(captures.get(1)),
                title: None,
            };
        }

        FileName {
            convention: NamingConvention::TitleOnly,
            disc_number: None,
            track_number: None,
            title: clean_title(stem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paste::paste;

    macro_rules! add_test_parse {
        ($fnsuffix:ident, $stem:expr, $convention:expr, $disc:expr, $track:expr, $title:expr) => {
            paste! {
                #[test]
                fn [<test_parse_ $fnsuffix>]() {
                    let parser = FileNameParser::new().unwrap();
                    let file_name = parser.parse($stem, &[]);
                    assert_eq!(file_name.convention, $convention);
                    assert_eq!(file_name.disc_number, $disc);
                    assert_eq!(file_name.track_number, $track);
                    assert_eq!(file_name.title.as_deref(), $title);
                }
            }
        };
    }

    add_test_parse!(
        disc_track_dash,
        "1-03 Woody'n You",
        NamingConvention::DiscTrack,
        Some(1),
        Some(3),
        Some("Woody'n You")
    );
    add_test_parse!(
        disc_track_dot,
        "2.01 - Reprise",
        NamingConvention::DiscTrack,
        Some(2),
        Some(1),
        Some("Reprise")
    );
    add_test_parse!(
        disc_track_without_title,
        "2-05",
        NamingConvention::DiscTrack,
        Some(2),
        Some(5),
        None
    );
    add_test_parse!(
        track_word,
        "Track 01",
        NamingConvention::TrackWord,
        None,
        Some(1),
        None
    );
    add_test_parse!(
        track_word_underscore,
        "track_07",
        NamingConvention::TrackWord,
        None,
        Some(7),
        None
    );
    add_test_parse!(
        track_word_joined,
        "Track12",
        NamingConvention::TrackWord,
        None,
        Some(12),
        None
    );
    add_test_parse!(
        artist_number_title,
        "Ahmad Jamal - 06 - Poinciana",
        NamingConvention::ArtistNumberTitle,
        None,
        Some(6),
        Some("Poinciana")
    );
    add_test_parse!(
        number_title_dash,
        "01 - But Not for Me",
        NamingConvention::NumberTitle,
        None,
        Some(1),
        Some("But Not for Me")
    );
    add_test_parse!(
        number_title_dot,
        "01. But Not for Me",
        NamingConvention::NumberTitle,
        None,
        Some(1),
        Some("But Not for Me")
    );
    add_test_parse!(
        number_title_space,
        "04 Music, Music, Music",
        NamingConvention::NumberTitle,
        None,
        Some(4),
        Some("Music, Music, Music")
    );
    add_test_parse!(
        number_title_underscore,
        "05_No_Greater_Love",
        NamingConvention::NumberTitle,
        None,
        Some(5),
        Some("No Greater Love")
    );
    add_test_parse!(
        number_only,
        "08",
        NamingConvention::NumberOnly,
        None,
        Some(8),
        None
    );
    add_test_parse!(
        title_only,
        "Moonlight in Vermont",
        NamingConvention::TitleOnly,
        None,
        None,
        Some("Moonlight in Vermont")
    );

    #[test]
    fn test_parse_canonical() {
        let parser = FileNameParser::new().unwrap();
        let canonical_stems = vec!["06 - Poinciana".to_string()];
        let file_name = parser.parse("06 - Poinciana", &canonical_stems);
        assert_eq!(file_name.convention, NamingConvention::Canonical);
        assert_eq!(file_name.track_number, Some(6));
        assert_eq!(file_name.title.as_deref(), Some("Poinciana"));

        let file_name = parser.parse("06 - Poinciana (live)", &canonical_stems);
        assert_eq!(file_name.convention, NamingConvention::NumberTitle);
    }

    #[test]
    fn test_display() {
        assert_eq!(NamingConvention::DiscTrack.to_string(), "disc-track");
        assert_eq!(NamingConvention::TitleOnly.to_string(), "title-only");
    }
}
