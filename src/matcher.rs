// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Assign local files to the tracks of a release.

use crate::distance::Distance;
use crate::filename::{FileName, FileNameParser};
use crate::musicbrainz::{Medium, Release, Track};
use crate::pathformat::PathFormatter;
use crate::util::list_audio_files;
use crate::Config;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// A track of the selected release together with its canonical file stem.
#[derive(Debug, Clone)]
pub struct TrackSlot<'a> {
    /// The medium that contains the track.
    pub medium: &'a Medium,
    /// The track itself.
    pub track: &'a Track,
    /// Position of the track across all media (1-based).
    pub absolute_position: u32,
    /// Canonical file name without extension.
    pub canonical_stem: String,
}

impl<'a> TrackSlot<'a> {
    /// Flatten the release into slots in release order.
    ///
    /// # Errors
    ///
    /// Returns an error if the canonical name cannot be rendered.
    pub fn from_release(
        release: &'a Release,
        formatter: &PathFormatter<'_>,
    ) -> crate::Result<Vec<Self>> {
        let mut slots = Vec::with_capacity(
            release
                .media
                .iter()
                .map(|medium| medium.tracks.len())
                .sum(),
        );
        let mut absolute_position = 0;
        for medium in &release.media {
            for track in &medium.tracks {
                absolute_position += 1;
                slots.push(TrackSlot {
                    medium,
                    track,
                    absolute_position,
                    canonical_stem: formatter.format_track(release, medium, track)?,
                });
            }
        }
        Ok(slots)
    }
}

/// An audio file in the album directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Path of the file.
    pub path: PathBuf,
    /// File name without extension.
    pub stem: String,
    /// Lower-cased extension.
    pub extension: String,
    /// Information parsed from the stem.
    pub name: FileName,
}

impl LocalFile {
    /// Create a local file from a path and classify its name.
    pub fn new(path: PathBuf, parser: &FileNameParser, canonical_stems: &[String]) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let name = parser.parse(&stem, canonical_stems);
        log::debug!("Classified {stem:?} as {}: {name:?}", name.convention);
        Self {
            path,
            stem,
            extension,
            name,
        }
    }

    /// Read all supported audio files in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn scan(
        dir: &Path,
        parser: &FileNameParser,
        canonical_stems: &[String],
    ) -> crate::Result<Vec<Self>> {
        let files = list_audio_files(dir)?
            .into_iter()
            .map(|path| Self::new(path, parser, canonical_stems))
            .collect();
        Ok(files)
    }

    /// Distance between the title in the file name and a track title.
    fn title_distance(&self, title: &str) -> Distance {
        self.name
            .title
            .as_deref()
            .map_or_else(
                || Distance::from(1.0),
                |file_title| Distance::between(file_title, title),
            )
    }
}

/// How a file was assigned to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    /// The file already has the canonical name.
    Canonical,
    /// Disc and track number in the file name.
    Number,
    /// Similarity of the title in the file name.
    Title,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => write!(f, "name"),
            Self::Number => write!(f, "number"),
            Self::Title => write!(f, "title"),
        }
    }
}

/// A file assigned to a track.
#[derive(Debug, Clone)]
pub struct TrackMatch<'a> {
    /// The track.
    pub slot: &'a TrackSlot<'a>,
    /// The file.
    pub file: LocalFile,
    /// How the file was found.
    pub method: MatchMethod,
}

/// Outcome of matching files to tracks.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// Matched pairs in release order.
    pub matches: Vec<TrackMatch<'a>>,
    /// Tracks without a file.
    pub unmatched_tracks: Vec<&'a TrackSlot<'a>>,
    /// Files without a track.
    pub unmatched_files: Vec<LocalFile>,
}

/// Matches local files to release tracks.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    /// Maximum title distance for title matches.
    title_match_threshold: f64,
}

impl Matcher {
    /// Create a matcher from the naming configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            title_match_threshold: config.naming.title_match_threshold(),
        }
    }

    /// Assign each track at most one file and each file to at most one track.
    ///
    /// Canonical names are matched first for all tracks, then track numbers, then titles.
    pub fn match_files<'a>(
        &self,
        slots: &'a [TrackSlot<'a>],
        files: Vec<LocalFile>,
    ) -> MatchResult<'a> {
        let multi_disc = slots
            .first()
            .zip(slots.last())
            .is_some_and(|(first, last)| first.medium.position != last.medium.position);
        let mut files: Vec<Option<LocalFile>> = files.into_iter().map(Some).collect();
        let mut taken: Vec<bool> = vec![false; files.len()];
        let mut assigned: Vec<Option<(usize, MatchMethod)>> = vec![None; slots.len()];

        // Canonical names.
        for (slot_index, slot) in slots.iter().enumerate() {
            let found = files
                .iter()
                .enumerate()
                .filter(|(file_index, _)| !taken[*file_index])
                .find(|(_, file)| {
                    file.as_ref()
                        .is_some_and(|file| file.stem == slot.canonical_stem)
                })
                .map(|(file_index, _)| file_index);
            if let Some(file_index) = found {
                assigned[slot_index] = Some((file_index, MatchMethod::Canonical));
                taken[file_index] = true;
            }
        }

        // Track numbers.
        for (slot_index, slot) in slots.iter().enumerate() {
            if assigned[slot_index].is_some() {
                continue;
            }
            let title = slot.track.title.as_str();
            let found = files
                .iter()
                .enumerate()
                .filter(|(file_index, _)| !taken[*file_index])
                .filter_map(|(file_index, file)| file.as_ref().map(|file| (file_index, file)))
                .filter(|(_, file)| Self::number_matches(slot, file, multi_disc))
                .min_by(|(_, lhs), (_, rhs)| {
                    lhs.title_distance(title)
                        .partial_cmp(&rhs.title_distance(title))
                        .unwrap_or(Ordering::Equal)
                })
                .map(|(file_index, _)| file_index);
            if let Some(file_index) = found {
                assigned[slot_index] = Some((file_index, MatchMethod::Number));
                taken[file_index] = true;
            }
        }

        // Titles.
        for (slot_index, slot) in slots.iter().enumerate() {
            if assigned[slot_index].is_some() {
                continue;
            }
            let title = slot.track.title.as_str();
            let found = files
                .iter()
                .enumerate()
                .filter(|(file_index, _)| !taken[*file_index])
                .filter_map(|(file_index, file)| file.as_ref().map(|file| (file_index, file)))
                .filter(|(_, file)| file.name.title.is_some())
                .map(|(file_index, file)| (file_index, file.title_distance(title)))
                .filter(|(_, distance)| distance.weighted_distance() <= self.title_match_threshold)
                .min_by(|(_, lhs), (_, rhs)| lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal))
                .map(|(file_index, _)| file_index);
            if let Some(file_index) = found {
                assigned[slot_index] = Some((file_index, MatchMethod::Title));
                taken[file_index] = true;
            }
        }

        let mut matches = Vec::new();
        let mut unmatched_tracks = Vec::new();
        for (slot, assignment) in slots.iter().zip(assigned) {
            match assignment.and_then(|(file_index, method)| {
                files[file_index].take().map(|file| (file, method))
            }) {
                Some((file, method)) => {
                    log::debug!(
                        "Matched {} to track {} by {method}",
                        file.path.display(),
                        slot.absolute_position
                    );
                    matches.push(TrackMatch { slot, file, method });
                }
                None => {
                    log::warn!("No file found for track {:?}", slot.track.title);
                    unmatched_tracks.push(slot);
                }
            }
        }

        let unmatched_files: Vec<LocalFile> = files.into_iter().flatten().collect();
        for file in &unmatched_files {
            log::warn!("File {} does not match any track", file.path.display());
        }

        MatchResult {
            matches,
            unmatched_tracks,
            unmatched_files,
        }
    }

    /// Returns `true` if the numbers in the file name point to the track.
    fn number_matches(slot: &TrackSlot<'_>, file: &LocalFile, multi_disc: bool) -> bool {
        let Some(track_number) = file.name.track_number else {
            return false;
        };
        match file.name.disc_number {
            Some(disc_number) => {
                disc_number == slot.medium.position && track_number == slot.track.position
            }
            None if multi_disc => track_number == slot.absolute_position,
            None => track_number == slot.track.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::musicbrainz::Document;

    const RELEASE_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release.xml"
    ));

    const RELEASE_MULTIDISC_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release-multidisc.xml"
    ));

    fn parse_release(xml: &str) -> Release {
        let document = Document::parse(xml).unwrap();
        Release::from_lookup_response(&document).unwrap()
    }

    fn local_files(names: &[&str], slots: &[TrackSlot<'_>]) -> Vec<LocalFile> {
        let parser = FileNameParser::new().unwrap();
        let canonical_stems: Vec<String> = slots
            .iter()
            .map(|slot| slot.canonical_stem.clone())
            .collect();
        names
            .iter()
            .map(|name| {
                LocalFile::new(
                    PathBuf::from("/music/album").join(name),
                    &parser,
                    &canonical_stems,
                )
            })
            .collect()
    }

    fn matched_names<'a>(result: &'a MatchResult<'_>) -> Vec<(u32, &'a str, MatchMethod)> {
        result
            .matches
            .iter()
            .map(|m| (m.slot.absolute_position, m.file.stem.as_str(), m.method))
            .collect()
    }

    #[test]
    fn test_track_slots() {
        let release = parse_release(RELEASE_MULTIDISC_XML);
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();

        let stems: Vec<_> = slots.iter().map(|slot| slot.canonical_stem.as_str()).collect();
        assert_eq!(
            stems,
            [
                "1-01 - Intro",
                "1-02 - Duet",
                "1-03 - Ballad",
                "2-01 - Reprise",
                "2-02 - Finale"
            ]
        );
        assert_eq!(slots[3].absolute_position, 4);
        assert_eq!(slots[3].medium.position, 2);
    }

    #[test]
    fn test_match_title_ignores_leading_article() {
        let release = parse_release(RELEASE_XML);
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();
        let files = local_files(&["The Poinciana.flac"], &slots);

        let result = Matcher::new(&config).match_files(&slots, files);
        assert_eq!(
            matched_names(&result),
            [(6, "The Poinciana", MatchMethod::Title)]
        );
        assert!(result.unmatched_files.is_empty());
    }

    #[test]
    fn test_match_single_disc() {
        let release = parse_release(RELEASE_XML);
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();
        let files = local_files(
            &[
                "06 - Poinciana.mp3",
                "Track 01.mp3",
                "03. Moonlight in Vermont.flac",
                "surrey with the fringe on top.mp3",
                "07 - Random.mp3",
                "bonus.mp3",
            ],
            &slots,
        );

        let result = Matcher::new(&config).match_files(&slots, files);
        assert_eq!(
            matched_names(&result),
            [
                (1, "Track 01", MatchMethod::Number),
                (2, "surrey with the fringe on top", MatchMethod::Title),
                (3, "03. Moonlight in Vermont", MatchMethod::Number),
                (6, "06 - Poinciana", MatchMethod::Canonical),
                (7, "07 - Random", MatchMethod::Number),
            ]
        );
        let unmatched_tracks: Vec<_> = result
            .unmatched_tracks
            .iter()
            .map(|slot| slot.absolute_position)
            .collect();
        assert_eq!(unmatched_tracks, [4, 5, 8]);
        assert_eq!(result.unmatched_files.len(), 1);
        assert_eq!(result.unmatched_files[0].stem, "bonus");
    }

    #[test]
    fn test_match_multi_disc() {
        let release = parse_release(RELEASE_MULTIDISC_XML);
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();
        let files = local_files(
            &["1-01 Intro.flac", "02 Duet.flac", "2-02.flac", "04 - Reprise.flac"],
            &slots,
        );

        let result = Matcher::new(&config).match_files(&slots, files);
        assert_eq!(
            matched_names(&result),
            [
                (1, "1-01 Intro", MatchMethod::Number),
                (2, "02 Duet", MatchMethod::Number),
                (4, "04 - Reprise", MatchMethod::Number),
                (5, "2-02", MatchMethod::Number),
            ]
        );
        assert_eq!(result.unmatched_tracks.len(), 1);
        assert_eq!(result.unmatched_tracks[0].track.title, "Ballad");
        assert!(result.unmatched_files.is_empty());
    }

    #[test]
    fn test_match_number_tie_uses_title() {
        let release = parse_release(RELEASE_XML);
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();
        let files = local_files(&["06 - Woody.mp3", "06 - Poinciana (alt).mp3"], &slots);

        let result = Matcher::new(&config).match_files(&slots, files);
        assert_eq!(
            matched_names(&result),
            [(6, "06 - Poinciana (alt)", MatchMethod::Number)]
        );
        assert_eq!(result.unmatched_files.len(), 1);
        assert_eq!(result.unmatched_files[0].stem, "06 - Woody");
    }

    #[test]
    fn test_scan() {
        let tmp_dir = tempfile::tempdir().unwrap();
        for name in ["02 - Duet.MP3", "cover.jpg", "01 - Intro.flac"] {
            std::fs::write(tmp_dir.path().join(name), b"").unwrap();
        }
        let parser = FileNameParser::new().unwrap();
        let files = LocalFile::scan(tmp_dir.path(), &parser, &["01 - Intro".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].stem, "01 - Intro");
        assert_eq!(files[0].name.convention, crate::filename::NamingConvention::Canonical);
        assert_eq!(files[1].extension, "mp3");
    }
}
