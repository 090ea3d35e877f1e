// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! File name formatting and templating.

use crate::media::MediaLike;
use crate::release::ReleaseLike;
use crate::track::TrackLike;
use crate::Config;
use handlebars::Handlebars;
use serde::Serialize;
use std::borrow::Cow;

/// Characters that are forbidden in paths on Microsoft Windows (in addition to control characters).
#[cfg(target_os = "windows")]
const ILLEGAL_PATH_CHARS: &str = r#"\/:*?"<>|"#;

/// Characters that are forbidden in paths on Unices (in addition to control characters).
#[cfg(not(target_os = "windows"))]
const ILLEGAL_PATH_CHARS: &str = "/";

/// Name of the registered track template.
const TRACK_TEMPLATE: &str = "track";

/// Strips control characters and escapes forbidden characters.
fn escape_path_chars(data: &str) -> String {
    data.chars()
        .filter(|c| !c.is_control())
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .map(|c| {
            if ILLEGAL_PATH_CHARS.contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
}

/// Formatter for track file names.
#[derive(Debug)]
pub struct PathFormatter<'a> {
    /// Template registry with the track template.
    handlebars: Handlebars<'a>,
    /// Minimum width of zero-padded track numbers.
    track_number_width: usize,
}

impl PathFormatter<'_> {
    /// Create a new path formatter from the naming configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured template is invalid.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(escape_path_chars);
        handlebars.register_template_string(TRACK_TEMPLATE, config.naming.track_format())?;
        Ok(Self {
            handlebars,
            track_number_width: config.naming.track_number_width(),
        })
    }

    /// Render the file stem (i.e. without extension) for the given values.
    ///
    /// # Errors
    ///
    /// Returns an error if the template references unknown values.
    pub fn format(&self, values: &TrackFormatValues<'_>) -> crate::Result<String> {
        let stem = self.handlebars.render(TRACK_TEMPLATE, values)?;
        Ok(stem.trim().to_string())
    }

    /// Render the file stem for a track of the release.
    ///
    /// # Errors
    ///
    /// Returns an error if the template references unknown values.
    pub fn format_track(
        &self,
        release: &impl ReleaseLike,
        media: &impl MediaLike,
        track: &impl TrackLike,
    ) -> crate::Result<String> {
        let values = TrackFormatValues::default()
            .with_release(release)
            .with_media(media)
            .with_track(track, self.track_number_width);
        self.format(&values)
    }
}

/// Possible values that can be used in a file name template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackFormatValues<'a> {
    /// The track's title.
    pub track_title: Option<Cow<'a, str>>,
    /// The track's artist (as credited for this track).
    pub track_artist: Option<Cow<'a, str>>,
    /// The track number as printed on the release (e.g. `A1`).
    pub track_number: Option<Cow<'a, str>>,
    /// The track position on the disc, zero-padded.
    pub track_number_padded: Option<String>,
    /// The number of tracks on the disc.
    pub track_count: Option<usize>,
    /// The disc number.
    pub disc_number: Option<u32>,
    /// The total number of discs that are part of this release.
    pub disc_count: Option<usize>,
    /// Whether the release has more than one disc.
    pub multi_disc: bool,
    /// The album's title.
    pub album_title: Option<Cow<'a, str>>,
    /// The album's artist (as credited for this release).
    pub album_artist: Option<Cow<'a, str>>,
}

impl<'a> TrackFormatValues<'a> {
    /// Assign fields from a [`ReleaseLike`] object.
    #[must_use]
    pub fn with_release(mut self, release: &'a impl ReleaseLike) -> Self {
        self.album_title = release.release_title();
        self.album_artist = release.release_artist();
        self.disc_count = release.total_discs();
        self.multi_disc = self.disc_count.is_some_and(|count| count > 1);
        self
    }

    /// Assign fields from a [`MediaLike`] object.
    #[must_use]
    pub fn with_media(mut self, media: &'a impl MediaLike) -> Self {
        self.disc_number = media.disc_number();
        self.track_count = media.media_track_count();
        self
    }

    /// Assign fields from a [`TrackLike`] object.
    #[must_use]
    pub fn with_track(mut self, track: &'a impl TrackLike, number_width: usize) -> Self {
        self.track_title = track.track_title();
        self.track_artist = track.track_artist();
        self.track_number = track.track_number();
        self.track_number_padded = track
            .track_position()
            .map(|position| format!("{position:0number_width$}"));
        self
    }
}
