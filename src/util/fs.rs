// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Filesystem-related utility functions.

use crate::tag::is_supported_path;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Returns `true` if the file name starts with a dot.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with('.'))
}

/// List the supported audio files directly inside `dir`, sorted by path.
///
/// Hidden files and subdirectories are skipped.
pub fn list_audio_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        if is_hidden(&path) {
            log::trace!("Skipping hidden file {}", path.display());
            continue;
        }

        if !is_supported_path(&path) {
            log::debug!("Skipping unsupported file {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort_unstable();
    Ok(files)
}

/// Copy the file
fn copy_file<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> io::Result<()> {
    let dest_filename = destination
        .as_ref()
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or(io::Error::other("cannot determine destination file name"))?;
    let dest_dir = destination
        .as_ref()
        .parent()
        .ok_or(io::Error::other("cannot determine destination directory"))?;
    let mut temp_destination_file = tempfile::Builder::new()
        .prefix(format!(".albumfix.{dest_filename}").as_str())
        .suffix(".tmp")
        .tempfile_in(dest_dir)?;
    let mut source_file = fs::File::open(&source)?;
    io::copy(&mut source_file, &mut temp_destination_file)?;

    // When copying succeeded, persist the temporary file at the actual destination.
    let temp_destination = temp_destination_file.into_temp_path();
    temp_destination.persist(&destination)?;
    log::debug!(
        "Copied file {} to {}",
        source.as_ref().display(),
        destination.as_ref().display()
    );

    Ok(())
}

/// Move the file.
///
/// Falls back to copying and removing the source if renaming fails.
pub fn move_file<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> crate::Result<()> {
    // First, try renaming.
    if let Ok(()) = fs::rename(&source, &destination) {
        log::debug!(
            "Renamed file {} to {}",
            source.as_ref().display(),
            destination.as_ref().display()
        );
        return Ok(());
    }

    // If that didn't work, try to copy the source file to a temporary file next to the
    // destination and persist the temporary file under the actual destination path if this
    // succeeds.
    copy_file(&source, destination)?;

    // Then remove the source file.
    fs::remove_file(&source)?;
    log::debug!("Removed file {}", source.as_ref().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_audio_files() {
        let tmp_dir = tempfile::tempdir().unwrap();
        for name in [
            "02 - Woody'n You.mp3",
            "01 - But Not for Me.flac",
            ".hidden.mp3",
            "cover.jpg",
        ] {
            fs::write(tmp_dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(tmp_dir.path().join("scans.mp3")).unwrap();

        let files = list_audio_files(tmp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name().and_then(OsStr::to_str))
            .collect();
        assert_eq!(names, ["01 - But Not for Me.flac", "02 - Woody'n You.mp3"]);
    }

    #[test]
    fn test_move_file() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let source = tmp_dir.path().join("track01.mp3");
        let destination = tmp_dir.path().join("01 - Intro.mp3");
        fs::write(&source, b"data").unwrap();

        move_file(&source, &destination).unwrap();
        assert!(!source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"data");
    }

    #[test]
    fn test_copy_file() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let source = tmp_dir.path().join("a.flac");
        let destination = tmp_dir.path().join("b.flac");
        fs::write(&source, b"flac").unwrap();

        copy_file(&source, &destination).unwrap();
        assert!(source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"flac");
    }
}
