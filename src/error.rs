// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Error and result types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type.
#[derive(Error, Debug)]
pub enum ErrorType {
    /// Configuration error.
    #[error("Configuration Error ({0})")]
    Config(#[from] crate::config::ConfigError),
    /// I/O Error.
    #[error("Input/Output error ({:?})", .0)]
    Io(#[from] io::Error),
    /// The given path is not a directory.
    #[error("Directory not found '{}'", .0.display())]
    NotADirectory(PathBuf),
    /// Artist and album could not be derived from the directory path.
    #[error("Unable to determine artist/album from '{}'", .0.display())]
    AlbumPathInference(PathBuf),
    /// File has an unknown file extension.
    #[error("File has unknown file type")]
    UnknownFileType,
    /// A request URL could not be constructed.
    #[error("Invalid request URL ({0})")]
    InvalidUrl(String),
    /// The HTTP request failed.
    #[error("API request failed ({0})")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status code.
    #[error("Error response from \"{url}\" was \"{status}\"")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Status code and reason.
        status: String,
    },
    /// The response body is not well-formed XML.
    #[error("Error parsing \"{url}\": {source}")]
    ResponseParse {
        /// Requested URL.
        url: String,
        /// Underlying XML error.
        source: crate::musicbrainz::XmlError,
    },
    /// An XML document could not be read or written.
    #[error("XML error: {0}")]
    Xml(#[from] crate::musicbrainz::XmlError),
    /// A MusicBrainz response did not contain the expected data.
    #[error("MusicBrainz lookup failed: {0}")]
    MusicBrainzLookupFailed(&'static str),
    /// The input does not contain a MusicBrainz release ID.
    #[error("Not a MusicBrainz release ID or URL: {0}")]
    InvalidMusicBrainzId(String),
    /// The search did not yield a single release.
    #[error("No release found for query {0}")]
    NoReleaseFound(String),
    /// A file name pattern failed to compile.
    #[error("Invalid file name pattern ({0})")]
    InvalidPattern(#[from] regex::Error),
    /// Two files would end up with the same name.
    #[error("Refusing to overwrite '{}'", .0.display())]
    RenameConflict(PathBuf),
    /// Writing tags failed for some of the files.
    #[error("Failed to write tags to {0} file(s)")]
    TagWriteFailed(usize),
    /// Errors raised by the [`id3`] crate.
    #[cfg(feature = "id3")]
    #[error("Failed to read or write ID3 tag")]
    Id3(#[from] id3::Error),
    /// Errors raised by the [`metaflac`] crate.
    #[cfg(feature = "flac")]
    #[error("Failed to read or write FLAC tag")]
    Flac(#[from] metaflac::Error),
    /// An error from the user interface.
    #[error("Error encountered while showing UI: {0}")]
    InquireError(#[from] inquire::InquireError),
    /// The file name template is invalid.
    #[error("Invalid file name template: {0}")]
    TemplateInvalid(#[from] handlebars::TemplateError),
    /// An error occurred while formatting a template string.
    #[error("Template formatting failed: {0}")]
    TemplateFormattingFailed(#[from] handlebars::RenderError),
}

/// Convenience type.
pub type Result<T> = std::result::Result<T, ErrorType>;
