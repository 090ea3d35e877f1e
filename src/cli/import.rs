// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `import` CLI subcommand.

use super::ui::{self, CandidateSelection};
use super::FilterArgs;
use crate::filename::FileNameParser;
use crate::matcher::{LocalFile, Matcher, TrackMatch, TrackSlot};
use crate::musicbrainz::{MusicBrainzClient, MusicBrainzId, Release, ReleaseCandidate};
use crate::musicbrainz::{ReleaseField, SearchQuery};
use crate::pathformat::PathFormatter;
use crate::renamer::{RenameEntry, RenamePlan};
use crate::tag::TagKey;
use crate::taggedfile::TaggedFile;
use crate::{AlbumPath, Config};
use clap::Parser;
use inquire::InquireError;
use std::borrow::Cow;
use std::path::PathBuf;

/// Command line arguments for the `import` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Album directory (`.../<Artist>/<Album>`).
    path: PathBuf,
    /// Release search filters.
    #[command(flatten)]
    filters: FilterArgs,
    /// Use this MusicBrainz release (ID or URL) instead of searching.
    #[arg(long)]
    release: Option<String>,
    /// Only show what would be done.
    #[arg(long)]
    dry_run: bool,
    /// Do not ask any questions (selects the best search result).
    #[arg(short, long)]
    yes: bool,
}

/// Pick a release from the search results.
///
/// Returns `None` if the user chose to skip the album.
fn select_release(
    album_path: &AlbumPath,
    query: &SearchQuery<ReleaseField>,
    candidates: &[ReleaseCandidate],
    assume_yes: bool,
) -> crate::Result<Option<String>> {
    match candidates {
        [] => Err(crate::Error::NoReleaseFound(query.to_string())),
        [candidate] => {
            log::info!("Using the only search result {}", candidate.id);
            Ok(Some(candidate.id.clone()))
        }
        [candidate, ..] if assume_yes => {
            log::info!(
                "Using the best of {count} search results {id}",
                count = candidates.len(),
                id = candidate.id
            );
            Ok(Some(candidate.id.clone()))
        }
        _ => match ui::select_candidate(album_path, candidates) {
            Ok(CandidateSelection::Candidate(candidate)) => Ok(Some(candidate.id.clone())),
            Ok(CandidateSelection::ReleaseId(release_id)) => Ok(Some(release_id)),
            Ok(CandidateSelection::Skip) | Err(InquireError::OperationCanceled) => Ok(None),
            Err(err) => Err(err.into()),
        },
    }
}

/// Write tags to all renamed files.
///
/// Failures are logged and counted so that one broken file does not stop the others.
fn write_tags(
    config: &Config,
    release: &Release,
    plan: &RenamePlan<TrackMatch<'_>>,
) -> crate::Result<()> {
    let with_ids = config.tagging.write_musicbrainz_ids();
    let mut failed_count = 0;
    for entry in plan.entries() {
        let result = TaggedFile::read_from_path(&entry.destination).and_then(|mut tagged_file| {
            if let Some(previous_title) = tagged_file.first_tag_value(TagKey::TrackTitle) {
                log::debug!(
                    "Replacing title {previous_title:?} in {}",
                    entry.destination_name()
                );
            }
            tagged_file.assign_tags_from_release(release, with_ids);
            tagged_file.assign_tags_from_media(entry.item.slot.medium);
            tagged_file.assign_tags_from_track(entry.item.slot.track, with_ids);
            tagged_file.write_tags()
        });
        match result {
            Ok(()) => log::debug!("Wrote tags to {}", entry.destination_name()),
            Err(err) => {
                log::error!(
                    "Failed to write tags to {}: {err}",
                    entry.destination.display()
                );
                failed_count += 1;
            }
        }
    }

    if failed_count > 0 {
        return Err(crate::Error::TagWriteFailed(failed_count));
    }

    log::info!("Wrote tags to {} file(s)", plan.entries().len());
    Ok(())
}

/// Run the `import` command.
///
/// # Errors
///
/// Returns an error if the album cannot be identified, the files cannot be renamed or tags could
/// not be written.
pub async fn run(config: &Config, args: Args) -> crate::Result<()> {
    let album_path = AlbumPath::from_path(&args.path)?;
    log::info!(
        "Importing {artist} - {album}",
        artist = album_path.artist,
        album = album_path.album
    );

    let musicbrainz = MusicBrainzClient::new(config)?;
    let release_id = if let Some(input) = &args.release {
        MusicBrainzId::find_release(input)
            .map(Cow::into_owned)
            .ok_or_else(|| crate::Error::InvalidMusicBrainzId(input.clone()))?
    } else {
        let query =
            SearchQuery::release_search(&album_path, &args.filters.search_filters(config));
        let candidates = musicbrainz.find_release_candidates(&query).await?;
        let Some(release_id) = select_release(&album_path, &query, &candidates, args.yes)?
        else {
            log::info!("Skipped {}", album_path.path.display());
            return Ok(());
        };
        release_id
    };

    let release = musicbrainz.find_release_by_id(&release_id).await?;
    ui::show_release(&release);

    let formatter = PathFormatter::new(config)?;
    let slots = TrackSlot::from_release(&release, &formatter)?;
    let canonical_stems: Vec<String> = slots
        .iter()
        .map(|slot| slot.canonical_stem.clone())
        .collect();
    let parser = FileNameParser::new()?;
    let files = LocalFile::scan(&album_path.path, &parser, &canonical_stems)?;
    log::debug!("Found {} audio file(s)", files.len());

    let result = Matcher::new(config).match_files(&slots, files);
    ui::show_unmatched(&result);
    if result.matches.is_empty() {
        log::warn!("No files could be assigned to tracks of this release");
        return Ok(());
    }

    let entries = result
        .matches
        .into_iter()
        .map(|track_match| {
            let slot = track_match.slot;
            let source = track_match.file.path.clone();
            let extension = track_match.file.extension.clone();
            RenameEntry::new(source, &slot.canonical_stem, &extension, track_match)
        })
        .collect();
    let plan = RenamePlan::new(entries)?;
    ui::show_rename_plan(&plan);

    if args.dry_run {
        log::info!("Dry run, no files were changed");
        return Ok(());
    }

    if !args.yes && !ui::confirm("Rename files and write tags?")? {
        log::info!("Aborted, no files were changed");
        return Ok(());
    }

    if plan.is_noop() {
        log::info!("All files already have their canonical names");
    } else {
        plan.execute()?;
    }
    write_tags(config, &release, &plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchMethod;
    use crate::musicbrainz::{Document, SearchFilters};
    use std::fs;

    const RELEASE_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release.xml"
    ));

    const SEARCH_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release-search.xml"
    ));

    fn album_path() -> AlbumPath {
        AlbumPath {
            path: PathBuf::from("/music/Ahmad Jamal/But Not for Me"),
            artist: "Ahmad Jamal".to_string(),
            album: "But Not for Me".to_string(),
        }
    }

    #[test]
    fn test_select_release_none() {
        let album_path = album_path();
        let query = SearchQuery::release_search(&album_path, &SearchFilters::default());
        assert!(matches!(
            select_release(&album_path, &query, &[], false),
            Err(crate::Error::NoReleaseFound(_))
        ));
    }

    #[test]
    fn test_select_release_single() {
        let album_path = album_path();
        let query = SearchQuery::release_search(&album_path, &SearchFilters::default());
        let document = Document::parse(SEARCH_XML).unwrap();
        let candidates = ReleaseCandidate::from_search_response(&document);
        let selected = select_release(&album_path, &query, &candidates[..1], false).unwrap();
        assert_eq!(selected.as_deref(), Some(candidates[0].id.as_str()));
    }

    #[test]
    fn test_select_release_assume_yes() {
        let album_path = album_path();
        let query = SearchQuery::release_search(&album_path, &SearchFilters::default());
        let document = Document::parse(SEARCH_XML).unwrap();
        let candidates = ReleaseCandidate::from_search_response(&document);
        assert!(candidates.len() > 1);
        let selected = select_release(&album_path, &query, &candidates, true).unwrap();
        assert_eq!(selected.as_deref(), Some(candidates[0].id.as_str()));
    }

    #[cfg(all(feature = "id3", feature = "flac"))]
    #[test]
    fn test_write_tags_continues_after_failure() {
        let document = Document::parse(RELEASE_XML).unwrap();
        let release = Release::from_lookup_response(&document).unwrap();
        let config = Config::default();
        let formatter = PathFormatter::new(&config).unwrap();
        let slots = TrackSlot::from_release(&release, &formatter).unwrap();
        let parser = FileNameParser::new().unwrap();

        let tmp_dir = tempfile::tempdir().unwrap();
        let broken_path = tmp_dir.path().join("01.flac");
        let valid_path = tmp_dir.path().join("02.mp3");
        fs::write(&broken_path, b"not a flac file").unwrap();
        fs::write(&valid_path, b"not really mpeg audio").unwrap();

        let entries = [(broken_path, &slots[0]), (valid_path.clone(), &slots[1])]
            .into_iter()
            .map(|(path, slot)| {
                let file = LocalFile::new(path, &parser, &[]);
                let source = file.path.clone();
                let stem = file.stem.clone();
                let extension = file.extension.clone();
                let track_match = TrackMatch {
                    slot,
                    file,
                    method: MatchMethod::Number,
                };
                RenameEntry::new(source, &stem, &extension, track_match)
            })
            .collect();
        let plan = RenamePlan::new(entries).unwrap();
        assert!(plan.is_noop());

        assert!(matches!(
            write_tags(&config, &release, &plan),
            Err(crate::Error::TagWriteFailed(1))
        ));

        let tagged_file = TaggedFile::read_from_path(&valid_path).unwrap();
        assert_eq!(
            tagged_file.first_tag_value(TagKey::TrackTitle).as_deref(),
            Some("Surrey With the Fringe on Top")
        );
        assert_eq!(
            tagged_file.first_tag_value(TagKey::Album).as_deref(),
            Some("Ahmad Jamal at the Pershing: But Not for Me")
        );
    }
}
