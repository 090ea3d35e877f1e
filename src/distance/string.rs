// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Functions for distance calculation between strings.

use super::Distance;
use levenshtein::levenshtein;
use std::cmp;
use unidecode::unidecode;

/// Common suffixes that are stripped during [`normalize`].
const SUFFIXES: [&str; 3] = [", the", ", a", ", an"];

/// Leading articles that are stripped during [`normalize`].
const ARTICLES: [&str; 3] = ["the ", "a ", "an "];

/// Normalize a string slice value for comparison.
pub fn normalize(value: &str) -> String {
    // Normalize all strings to ASCII lowercase.
    let mut value = unidecode(value);
    value.make_ascii_lowercase();

    // Drop articles, both as suffix (e.g., ", the") and at the front of the string.
    if let Some(stripped) = SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
    {
        value = stripped.to_string();
    }

    // Replace ampersands with "and" and collapse whitespace.
    let value = value
        .replace('&', "and")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    ARTICLES
        .iter()
        .find_map(|article| value.strip_prefix(article))
        .filter(|stripped| !stripped.is_empty())
        .map_or_else(|| value.clone(), str::to_string)
}

/// Calculate the case- and whitespace-insensitive distance between two strings, where 0.0 is
/// minimum and 1.0 is the maximum distance.
#[expect(clippy::cast_precision_loss)]
pub fn between(lhs: &str, rhs: &str) -> Distance {
    let lhs = normalize(lhs);
    let rhs = normalize(rhs);

    let max_possible_distance = cmp::max(lhs.chars().count(), rhs.chars().count());
    if max_possible_distance == 0 {
        return Distance::from(0.0);
    }
    let levenshtein_distance = levenshtein(&lhs, &rhs);

    Distance::from(levenshtein_distance as f64 / max_possible_distance as f64)
}
