// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Planning and executing file renames.

use crate::util::move_file;
use std::borrow::Cow;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A single planned rename.
#[derive(Debug, Clone)]
pub struct RenameEntry<T> {
    /// Current path of the file.
    pub source: PathBuf,
    /// Path after renaming.
    pub destination: PathBuf,
    /// The item the file belongs to (e.g. a matched track).
    pub item: T,
}

impl<T> RenameEntry<T> {
    /// Create an entry that renames `source` to `{stem}.{extension}` in the same directory.
    pub fn new(source: PathBuf, stem: &str, extension: &str, item: T) -> Self {
        let file_name = if extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{extension}")
        };
        let destination = source.with_file_name(file_name);
        Self {
            source,
            destination,
            item,
        }
    }

    /// Returns `true` if the file needs to be renamed.
    pub fn needs_rename(&self) -> bool {
        self.source != self.destination
    }

    /// File name of the source.
    pub fn source_name(&self) -> Cow<'_, str> {
        file_name(&self.source)
    }

    /// File name of the destination.
    pub fn destination_name(&self) -> Cow<'_, str> {
        file_name(&self.destination)
    }
}

/// Returns the file name part of a path for display.
fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), OsStr::to_string_lossy)
}

/// A validated set of renames.
#[derive(Debug, Clone)]
pub struct RenamePlan<T> {
    /// All entries, including the ones that keep their name.
    entries: Vec<RenameEntry<T>>,
}

impl<T> RenamePlan<T> {
    /// Create a plan and check it for conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RenameConflict`] if two entries share a destination, or if a
    /// destination exists and is not the source of another entry.
    pub fn new(entries: Vec<RenameEntry<T>>) -> crate::Result<Self> {
        let sources: HashSet<&Path> = entries
            .iter()
            .map(|entry| entry.source.as_path())
            .collect();
        let mut destinations: HashSet<&Path> = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !destinations.insert(entry.destination.as_path()) {
                log::error!(
                    "Multiple files would be renamed to {}",
                    entry.destination.display()
                );
                return Err(crate::Error::RenameConflict(entry.destination.clone()));
            }

            if entry.needs_rename()
                && entry.destination.exists()
                && !sources.contains(entry.destination.as_path())
            {
                log::error!(
                    "Renaming {} would overwrite existing file {}",
                    entry.source.display(),
                    entry.destination.display()
                );
                return Err(crate::Error::RenameConflict(entry.destination.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// All entries of the plan.
    pub fn entries(&self) -> &[RenameEntry<T>] {
        &self.entries
    }

    /// Entries that actually change the file name.
    pub fn renames(&self) -> impl Iterator<Item = &RenameEntry<T>> {
        self.entries.iter().filter(|entry| entry.needs_rename())
    }

    /// Returns `true` if executing the plan would not rename anything.
    pub fn is_noop(&self) -> bool {
        self.renames().next().is_none()
    }

    /// Rename all files.
    ///
    /// If a destination is the source of another rename, all files are first moved to temporary
    /// names so that swapped names do not overwrite each other.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be moved.
    pub fn execute(&self) -> crate::Result<()> {
        let pending: Vec<&RenameEntry<T>> = self.renames().collect();
        let sources: HashSet<&Path> = pending
            .iter()
            .map(|entry| entry.source.as_path())
            .collect();
        let needs_temporary = pending
            .iter()
            .any(|entry| sources.contains(entry.destination.as_path()));

        if !needs_temporary {
            for entry in pending {
                move_file(&entry.source, &entry.destination)?;
                log::info!(
                    "Renamed {} to {}",
                    entry.source_name(),
                    entry.destination_name()
                );
            }
            return Ok(());
        }

        let mut moved = Vec::with_capacity(pending.len());
        for (index, entry) in pending.into_iter().enumerate() {
            let temporary = Self::temporary_path(&entry.source, index);
            move_file(&entry.source, &temporary)?;
            moved.push((temporary, entry));
        }

        for (temporary, entry) in moved {
            move_file(&temporary, &entry.destination)?;
            log::info!(
                "Renamed {} to {}",
                entry.source_name(),
                entry.destination_name()
            );
        }

        Ok(())
    }

    /// A hidden, unused path next to `source`.
    fn temporary_path(source: &Path, index: usize) -> PathBuf {
        let name = file_name(source);
        let mut attempt = 0;
        loop {
            let candidate =
                source.with_file_name(format!(".albumfix.{index}.{attempt}.{name}.tmp"));
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_entry_new() {
        let entry = RenameEntry::new(
            PathBuf::from("/music/a/Track 01.MP3"),
            "01 - Intro",
            "mp3",
            (),
        );
        assert_eq!(entry.destination, PathBuf::from("/music/a/01 - Intro.mp3"));
        assert!(entry.needs_rename());
        assert_eq!(entry.source_name(), "Track 01.MP3");
        assert_eq!(entry.destination_name(), "01 - Intro.mp3");

        let entry = RenameEntry::new(
            PathBuf::from("/music/a/01 - Intro.mp3"),
            "01 - Intro",
            "mp3",
            (),
        );
        assert!(!entry.needs_rename());
    }

    #[test]
    fn test_duplicate_destination() {
        let entries = vec![
            RenameEntry::new(PathBuf::from("/music/a/x.mp3"), "01 - Intro", "mp3", 1),
            RenameEntry::new(PathBuf::from("/music/a/y.mp3"), "01 - Intro", "mp3", 2),
        ];
        assert!(matches!(
            RenamePlan::new(entries),
            Err(crate::Error::RenameConflict(path)) if path == Path::new("/music/a/01 - Intro.mp3")
        ));
    }

    #[test]
    fn test_existing_destination() {
        let tmp_dir = tempfile::tempdir().unwrap();
        fs::write(tmp_dir.path().join("track01.mp3"), b"a").unwrap();
        fs::write(tmp_dir.path().join("01 - Intro.mp3"), b"unrelated").unwrap();

        let entries = vec![RenameEntry::new(
            tmp_dir.path().join("track01.mp3"),
            "01 - Intro",
            "mp3",
            (),
        )];
        assert!(matches!(
            RenamePlan::new(entries),
            Err(crate::Error::RenameConflict(_))
        ));
    }

    #[test]
    fn test_execute_direct() {
        let tmp_dir = tempfile::tempdir().unwrap();
        fs::write(tmp_dir.path().join("track01.mp3"), b"a").unwrap();
        fs::write(tmp_dir.path().join("02 - Duet.mp3"), b"b").unwrap();

        let plan = RenamePlan::new(vec![
            RenameEntry::new(tmp_dir.path().join("track01.mp3"), "01 - Intro", "mp3", ()),
            RenameEntry::new(tmp_dir.path().join("02 - Duet.mp3"), "02 - Duet", "mp3", ()),
        ])
        .unwrap();
        assert!(!plan.is_noop());
        assert_eq!(plan.renames().count(), 1);
        plan.execute().unwrap();

        assert_eq!(fs::read(tmp_dir.path().join("01 - Intro.mp3")).unwrap(), b"a");
        assert_eq!(fs::read(tmp_dir.path().join("02 - Duet.mp3")).unwrap(), b"b");
        assert!(!tmp_dir.path().join("track01.mp3").exists());
    }

    #[test]
    fn test_execute_swap() {
        let tmp_dir = tempfile::tempdir().unwrap();
        fs::write(tmp_dir.path().join("01.flac"), b"duet").unwrap();
        fs::write(tmp_dir.path().join("02.flac"), b"intro").unwrap();

        let plan = RenamePlan::new(vec![
            RenameEntry::new(tmp_dir.path().join("02.flac"), "01", "flac", ()),
            RenameEntry::new(tmp_dir.path().join("01.flac"), "02", "flac", ()),
        ])
        .unwrap();
        plan.execute().unwrap();

        assert_eq!(fs::read(tmp_dir.path().join("01.flac")).unwrap(), b"intro");
        assert_eq!(fs::read(tmp_dir.path().join("02.flac")).unwrap(), b"duet");
        assert_eq!(fs::read_dir(tmp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_noop_plan() {
        let plan = RenamePlan::new(vec![RenameEntry::new(
            PathBuf::from("/music/a/01 - Intro.mp3"),
            "01 - Intro",
            "mp3",
            (),
        )])
        .unwrap();
        assert!(plan.is_noop());
        assert_eq!(plan.entries().len(), 1);
        plan.execute().unwrap();
    }
}
