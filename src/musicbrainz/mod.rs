// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! MusicBrainz web service access.

mod client;
mod query;
mod release;
mod xml;

pub use client::{Include, MusicBrainzClient};
pub use query::{
    AreaField, ArtistField, Entity, LabelField, RecordingField, ReleaseField, ReleaseGroupField,
    SearchField, SearchFilters, SearchQuery, WorkField,
};
pub use release::{ArtistCredit, Medium, Release, ReleaseCandidate, Track};
pub use xml::{Document, Element, Node, ResponseInfo, XmlError};

use regex::Regex;
use std::borrow::Cow;

/// MusicBrainz ID (MBID) of some entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MusicBrainzId<'a> {
    /// An area ID.
    ///
    /// See <https://musicbrainz.org/doc/Area> for details.
    Area(Cow<'a, str>),
    /// An artist ID.
    ///
    /// See <https://musicbrainz.org/doc/Artist> for details.
    Artist(Cow<'a, str>),
    /// A record label ID.
    ///
    /// See <https://musicbrainz.org/doc/Label> for details.
    Label(Cow<'a, str>),
    /// A recording ID.
    ///
    /// See <https://musicbrainz.org/doc/Recording> for details.
    Recording(Cow<'a, str>),
    /// A release ID.
    ///
    /// See <https://musicbrainz.org/doc/Release> for details.
    Release(Cow<'a, str>),
    /// A release group ID.
    ///
    /// See <https://musicbrainz.org/doc/Release_Group> for details.
    ReleaseGroup(Cow<'a, str>),
    /// A work ID.
    ///
    /// See <https://musicbrainz.org/doc/Work> for details.
    Work(Cow<'a, str>),
}

impl<'a> MusicBrainzId<'a> {
    /// Create an ID for the given entity.
    fn new(entity: Entity, id: &'a str) -> Self {
        let id = Cow::from(id);
        match entity {
            Entity::Area => Self::Area(id),
            Entity::Artist => Self::Artist(id),
            Entity::Label => Self::Label(id),
            Entity::Recording => Self::Recording(id),
            Entity::Release => Self::Release(id),
            Entity::ReleaseGroup => Self::ReleaseGroup(id),
            Entity::Work => Self::Work(id),
        }
    }

    /// The entity type this ID refers to.
    pub fn entity(&self) -> Entity {
        match &self {
            Self::Area(_) => Entity::Area,
            Self::Artist(_) => Entity::Artist,
            Self::Label(_) => Entity::Label,
            Self::Recording(_) => Entity::Recording,
            Self::Release(_) => Entity::Release,
            Self::ReleaseGroup(_) => Entity::ReleaseGroup,
            Self::Work(_) => Entity::Work,
        }
    }

    /// The bare UUID.
    pub fn as_str(&self) -> &str {
        match &self {
            Self::Area(id)
            | Self::Artist(id)
            | Self::Label(id)
            | Self::Recording(id)
            | Self::Release(id)
            | Self::ReleaseGroup(id)
            | Self::Work(id) => id,
        }
    }

    /// Find a MusicBrainz ID in a string.
    ///
    /// If the input contains an ID directly, a release ID is assumed.
    pub fn find(input: &'a str) -> Option<Self> {
        let re = Regex::new(
            r"\b[0-9a-fA-F]{8}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{4}\b-[0-9a-fA-F]{12}\b",
        )
        .ok()?;
        let m = re.find(input)?;
        if m.start() == 0 {
            return Some(Self::Release(m.as_str().into()));
        }

        let prefix = input[..m.start()].strip_suffix('/')?;
        let pos = prefix.rfind('/')?;
        let is_valid_url = [
            "http://musicbrainz.org/",
            "https://musicbrainz.org/",
            "http://musicbrainz.org/ws/2/",
            "https://musicbrainz.org/ws/2/",
        ]
        .into_iter()
        .any(|x| x == &prefix[..=pos]);
        if !is_valid_url {
            return None;
        }

        Entity::from_path(&prefix[pos + 1..]).map(|entity| Self::new(entity, m.as_str()))
    }

    /// Find a release ID in a string.
    pub fn find_release(input: &'a str) -> Option<Cow<'a, str>> {
        match Self::find(input)? {
            Self::Release(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_mbid() {
        assert_eq!(
            MusicBrainzId::find("0008f765-032b-46cd-ab69-2220edab1837"),
            Some(MusicBrainzId::Release(
                "0008f765-032b-46cd-ab69-2220edab1837".into()
            ))
        );
        assert_eq!(
            MusicBrainzId::find(
                "https://musicbrainz.org/release/0008f765-032b-46cd-ab69-2220edab1837"
            ),
            Some(MusicBrainzId::Release(
                "0008f765-032b-46cd-ab69-2220edab1837".into()
            ))
        );
        assert_eq!(
            MusicBrainzId::find(
                "http://musicbrainz.org/release/0008f765-032b-46cd-ab69-2220edab1837"
            ),
            Some(MusicBrainzId::Release(
                "0008f765-032b-46cd-ab69-2220edab1837".into()
            ))
        );
        assert_eq!(MusicBrainzId::find("http://musicbrainz.org/ws/2/release/0008f765-032b-46cd-ab69-2220edab1837?inc=recordings%20artist-credits"), Some(MusicBrainzId::Release("0008f765-032b-46cd-ab69-2220edab1837".into())));
        assert_eq!(
            MusicBrainzId::find(
                "https://musicbrainz.org/recording/9d444787-3f25-4c16-9261-597b9ab021cc"
            ),
            Some(MusicBrainzId::Recording(
                "9d444787-3f25-4c16-9261-597b9ab021cc".into()
            ))
        );
        assert_eq!(
            MusicBrainzId::find(
                "https://musicbrainz.org/release-group/0a8e97fd-457c-30bc-938a-2fba79cb04e7"
            ),
            Some(MusicBrainzId::ReleaseGroup(
                "0a8e97fd-457c-30bc-938a-2fba79cb04e7".into()
            ))
        );
        assert_eq!(
            MusicBrainzId::find(
                "https://example.com/release/0008f765-032b-46cd-ab69-2220edab1837"
            ),
            None
        );
        assert_eq!(MusicBrainzId::find("some random string"), None);
    }

    #[test]
    fn test_find_release() {
        assert_eq!(
            MusicBrainzId::find_release(
                "https://musicbrainz.org/release/0008f765-032b-46cd-ab69-2220edab1837"
            )
            .as_deref(),
            Some("0008f765-032b-46cd-ab69-2220edab1837")
        );
        assert_eq!(
            MusicBrainzId::find_release(
                "https://musicbrainz.org/work/0008f765-032b-46cd-ab69-2220edab1837"
            ),
            None
        );
    }

    #[test]
    fn test_entity_and_str() {
        let id = MusicBrainzId::find(
            "https://musicbrainz.org/artist/9d444787-3f25-4c16-9261-597b9ab021cc",
        )
        .unwrap();
        assert_eq!(id.entity(), Entity::Artist);
        assert_eq!(id.as_str(), "9d444787-3f25-4c16-9261-597b9ab021cc");
    }
}
