// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Utilities for working with crossterm's `StyledContent`.

use crossterm::style::{ContentStyle, StyledContent, Stylize};
use similar::{ChangeTag, TextDiff};
use std::borrow::Cow;
use std::fmt;

/// A list of [`StyledContent`] items.
#[derive(Debug, Default, Clone)]
pub struct StyledContentList<'a>(Vec<StyledContent<Cow<'a, str>>>);

impl fmt::Display for StyledContentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.0 {
            item.fmt(f)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<StyledContent<Cow<'a, str>>> for StyledContentList<'a> {
    fn from_iter<I: IntoIterator<Item = StyledContent<Cow<'a, str>>>>(iter: I) -> Self {
        Self(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> StyledContentList<'a> {
    /// Append an item.
    pub fn push(&mut self, style: ContentStyle, content: impl Into<Cow<'a, str>>) {
        self.0.push(StyledContent::new(style, content.into()));
    }

    /// The length of the (unstyled) contents of this list.
    pub fn len_unstyled(&self) -> usize {
        self.0
            .iter()
            .map(|styled_content| styled_content.content().chars().count())
            .sum()
    }

    /// The unstyled contents of this list.
    #[cfg(test)]
    pub fn to_unstyled_string(&self) -> String {
        self.0
            .iter()
            .map(|styled_content| styled_content.content().as_ref())
            .collect()
    }

    /// Append an item consisting of fill [`char`] to this list so that the length of its contents
    /// equals `desired_width`.
    #[must_use]
    pub fn fill_right(mut self, fill_char: char, desired_width: usize) -> Self {
        let len = self.len_unstyled();
        if len >= desired_width {
            return self;
        }

        let fill = std::iter::repeat_n(fill_char, desired_width - len).collect::<String>();
        self.push(ContentStyle::new(), fill);
        self
    }
}

/// Highlight the differences between two strings.
///
/// Removed characters are highlighted in the first list, inserted characters in the second.
pub fn string_diff<'a>(old: &'a str, new: &'a str) -> (StyledContentList<'a>, StyledContentList<'a>) {
    let mut lhs = StyledContentList::default();
    let mut rhs = StyledContentList::default();

    let diff = TextDiff::from_chars(old, new);
    for change in diff.iter_all_changes() {
        let value = change.to_string_lossy().into_owned();
        match change.tag() {
            ChangeTag::Equal => {
                lhs.push(ContentStyle::new(), value.clone());
                rhs.push(ContentStyle::new(), value);
            }
            ChangeTag::Delete => lhs.push(ContentStyle::new().red().bold(), value),
            ChangeTag::Insert => rhs.push(ContentStyle::new().green().bold(), value),
        }
    }

    (lhs, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_len_unstyled_empty() {
        let list = StyledContentList::default();
        assert_eq!(list.len_unstyled(), 0);
    }

    #[test]
    fn test_list_len_unstyled() {
        let mut list = StyledContentList::default();
        list.push(ContentStyle::new(), "hello");
        list.push(ContentStyle::new().red(), "");
        list.push(ContentStyle::new().underlined().bold(), "wörld");
        assert_eq!(list.len_unstyled(), 10);
    }

    #[test]
    fn test_list_fill_right() {
        let mut list = StyledContentList::default();
        list.push(ContentStyle::new().bold(), "hello");
        let list = list.fill_right('x', 20);
        assert_eq!(list.len_unstyled(), 20);
        let list = list.fill_right('x', 10);
        assert_eq!(list.len_unstyled(), 20);
    }

    #[test]
    fn test_string_diff() {
        let (lhs, rhs) = string_diff("Track 01.mp3", "01 - Intro.mp3");
        assert_eq!(lhs.to_unstyled_string(), "Track 01.mp3");
        assert_eq!(rhs.to_unstyled_string(), "01 - Intro.mp3");
    }

    #[test]
    fn test_string_diff_equal() {
        let (lhs, rhs) = string_diff("06 - Poinciana.mp3", "06 - Poinciana.mp3");
        assert_eq!(lhs.to_unstyled_string(), rhs.to_unstyled_string());
    }
}
