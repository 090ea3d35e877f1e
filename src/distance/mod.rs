// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Distance calculations for various items.

use crate::musicbrainz::ReleaseCandidate;
use crate::AlbumPath;
use std::cmp;
use std::iter::Sum;

mod string;

/// A distance in the range (0.0, 1.0) between two items.
#[expect(missing_copy_implementations)]
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    /// The unweighted base distance.
    base_distance: f64,
    /// The weight.
    weight: f64,
}

impl Distance {
    /// Calculate the case-, accent- and article-insensitive distance between two strings.
    pub fn between(lhs: &str, rhs: &str) -> Self {
        string::between(lhs, rhs)
    }

    /// Return `true` if the distance is zero.
    #[cfg(test)]
    pub fn is_equality(&self) -> bool {
        self.base_distance == 0.0
    }

    /// Assigns a weight to the distance.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        debug_assert!(weight.is_finite());
        debug_assert!(weight >= 0.0);
        self.weight = weight;
        self
    }

    /// Returns the distance between the items.
    pub fn weighted_distance(&self) -> f64 {
        let weighted_distance = self.base_distance * self.weight;
        debug_assert!(weighted_distance.is_finite());
        weighted_distance
    }

    /// Distance between an album directory and a search result.
    ///
    /// The album title is weighted higher than the artist.
    pub fn between_album_path_and_candidate(
        album_path: &AlbumPath,
        candidate: &ReleaseCandidate,
    ) -> Self {
        let title = Self::between(&album_path.album, &candidate.title).with_weight(3.0);
        let artist = candidate.artist.as_deref().map_or_else(
            || Distance::from(1.0),
            |artist| Self::between(&album_path.artist, artist),
        );
        [title, artist].into_iter().sum()
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        debug_assert!(value.is_finite());
        debug_assert!(value <= 1.0);
        debug_assert!(value >= 0.0);
        Self {
            base_distance: value,
            weight: 1.0,
        }
    }
}

impl Sum<Distance> for Distance {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Distance>,
    {
        let (total_weighted_dist, total_weight) =
            iter.fold((0.0f64, 0.0f64), |(weighted_dist, weight), distance| {
                (
                    weighted_dist + distance.weighted_distance(),
                    weight + distance.weight,
                )
            });

        if total_weight == 0.0 {
            return Distance::from(0.0);
        }
        Distance::from(total_weighted_dist / total_weight)
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.weighted_distance()
            .partial_cmp(&other.weighted_distance())
    }
}
