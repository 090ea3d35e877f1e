// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Derive artist and album from an `Artist/Album` directory path.

use std::path::{Component, Path, PathBuf};

/// An album directory, with artist and album names inferred from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPath {
    /// Absolute path of the album directory.
    pub path: PathBuf,
    /// Artist name (the parent directory's name).
    pub artist: String,
    /// Album title (the directory's name).
    pub album: String,
}

impl AlbumPath {
    /// Create an [`AlbumPath`] from an existing directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or has less than two path segments.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(crate::Error::NotADirectory(path.to_path_buf()));
        }

        let path = path.canonicalize()?;
        let (artist, album) = Self::infer_artist_and_album(&path)
            .ok_or_else(|| crate::Error::AlbumPathInference(path.clone()))?;
        log::debug!("Inferred artist {artist:?} and album {album:?} from path");

        Ok(Self {
            path,
            artist,
            album,
        })
    }

    /// Returns the trimmed names of the last two normal path segments as `(artist, album)`.
    fn infer_artist_and_album(path: &Path) -> Option<(String, String)> {
        let mut segments = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name),
                _ => None,
            })
            .rev()
            .map(|name| name.to_string_lossy().trim().to_string());

        let album = segments.next().filter(|name| !name.is_empty())?;
        let artist = segments.next().filter(|name| !name.is_empty())?;
        Some((artist, album))
    }
}
