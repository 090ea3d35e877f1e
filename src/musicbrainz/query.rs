// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Lucene search queries for the MusicBrainz web service.
//!
//! See <https://musicbrainz.org/doc/MusicBrainz_API/Search> for the available fields.

use crate::AlbumPath;
use std::fmt;
use std::marker::PhantomData;

/// A MusicBrainz entity that can be searched or looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// Geographic area.
    Area,
    /// Artist.
    Artist,
    /// Record label.
    Label,
    /// Recording.
    Recording,
    /// Release.
    Release,
    /// Release group.
    ReleaseGroup,
    /// Work.
    Work,
}

impl Entity {
    /// The URL path segment of the entity.
    pub fn path(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Artist => "artist",
            Self::Label => "label",
            Self::Recording => "recording",
            Self::Release => "release",
            Self::ReleaseGroup => "release-group",
            Self::Work => "work",
        }
    }

    /// Find an entity by its URL path segment.
    pub fn from_path(path: &str) -> Option<Self> {
        [
            Self::Area,
            Self::Artist,
            Self::Label,
            Self::Recording,
            Self::Release,
            Self::ReleaseGroup,
            Self::Work,
        ]
        .into_iter()
        .find(|entity| entity.path() == path)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A field that can be used in search queries for some entity.
pub trait SearchField: Copy {
    /// The entity this field belongs to.
    const ENTITY: Entity;

    /// The field name as used in the query string.
    fn name(self) -> &'static str;
}

/// Declares a search field enum for an entity.
macro_rules! search_fields {
    ($(#[$meta:meta])* $name:ident for $entity:ident { $($variant:ident => $field:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl SearchField for $name {
            const ENTITY: Entity = Entity::$entity;

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $field),+
                }
            }
        }
    };
}

search_fields!(
    /// Search fields for areas.
    AreaField for Area {
        Aid => "aid",
        Alias => "alias",
        Area => "area",
        Begin => "begin",
        Comment => "comment",
        End => "end",
        Ended => "ended",
        Iso => "iso",
        Iso1 => "iso1",
        Iso2 => "iso2",
        Iso3 => "iso3",
        SortName => "sortname",
    }
);

search_fields!(
    /// Search fields for artists.
    ArtistField for Artist {
        Alias => "alias",
        Area => "area",
        Arid => "arid",
        Artist => "artist",
        ArtistAccent => "artistaccent",
        Begin => "begin",
        BeginArea => "beginarea",
        Comment => "comment",
        Country => "country",
        End => "end",
        EndArea => "endarea",
        Ended => "ended",
        Gender => "gender",
        Ipi => "ipi",
        SortName => "sortname",
        Tag => "tag",
    }
);

search_fields!(
    /// Search fields for labels.
    LabelField for Label {
        Alias => "alias",
        Area => "area",
        Begin => "begin",
        Code => "code",
        Comment => "comment",
        Country => "country",
        End => "end",
        Ended => "ended",
        Ipi => "ipi",
        Label => "label",
        LabelAccent => "labelaccent",
        Laid => "laid",
        SortName => "sortname",
        Tag => "tag",
    }
);

search_fields!(
    /// Search fields for recordings.
    RecordingField for Recording {
        Arid => "arid",
        Artist => "artist",
        ArtistName => "artistname",
        Comment => "comment",
        Country => "country",
        CreditName => "creditname",
        Date => "date",
        Dur => "dur",
        Format => "format",
        Isrc => "isrc",
        Number => "number",
        Position => "position",
        PrimaryType => "primarytype",
        Qdur => "qdur",
        Recording => "recording",
        RecordingAccent => "recordingaccent",
        Reid => "reid",
        Release => "release",
        Rgid => "rgid",
        Rid => "rid",
        SecondaryType => "secondarytype",
        Status => "status",
        Tag => "tag",
        Tid => "tid",
        Tnum => "tnum",
        Tracks => "tracks",
        TracksRelease => "tracksrelease",
        Video => "video",
    }
);

search_fields!(
    /// Search fields for releases.
    ReleaseField for Release {
        Arid => "arid",
        Artist => "artist",
        ArtistName => "artistname",
        Asin => "asin",
        Barcode => "barcode",
        CatalogNumber => "catno",
        Comment => "comment",
        Country => "country",
        CreditName => "creditname",
        Date => "date",
        DiscIds => "discids",
        Format => "format",
        Laid => "laid",
        Label => "label",
        Lang => "lang",
        Mediums => "mediums",
        PrimaryType => "primarytype",
        Quality => "quality",
        Reid => "reid",
        Release => "release",
        ReleaseAccent => "releaseaccent",
        Rgid => "rgid",
        Script => "script",
        SecondaryType => "secondarytype",
        Status => "status",
        Tag => "tag",
        Tracks => "tracks",
        TracksMedium => "tracksmedium",
    }
);

search_fields!(
    /// Search fields for release groups.
    ReleaseGroupField for ReleaseGroup {
        Arid => "arid",
        Artist => "artist",
        ArtistName => "artistname",
        Comment => "comment",
        CreditName => "creditname",
        PrimaryType => "primarytype",
        Reid => "reid",
        Release => "release",
        ReleaseGroup => "releasegroup",
        ReleaseGroupAccent => "releasegroupaccent",
        Releases => "releases",
        Rgid => "rgid",
        SecondaryType => "secondarytype",
        Status => "status",
        Tag => "tag",
    }
);

search_fields!(
    /// Search fields for works.
    WorkField for Work {
        Alias => "alias",
        Arid => "arid",
        Artist => "artist",
        Comment => "comment",
        Iswc => "iswc",
        Lang => "lang",
        Tag => "tag",
        Wid => "wid",
        Work => "work",
        WorkAccent => "workaccent",
    }
);

/// Optional filters that narrow down a release search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Medium format (e.g., `CD`).
    pub format: Option<String>,
    /// Release country (e.g., `US`).
    pub country: Option<String>,
}

/// Builder for Lucene query strings.
#[derive(Debug, Clone)]
pub struct SearchQuery<F: SearchField> {
    /// The terms of the query (already quoted).
    terms: Vec<String>,
    /// The field type.
    field_type: PhantomData<F>,
}

impl<F: SearchField> Default for SearchQuery<F> {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            field_type: PhantomData,
        }
    }
}

/// Quote a value as Lucene phrase.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', r"\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

impl<F: SearchField> SearchQuery<F> {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity that this query searches for.
    pub fn entity(&self) -> Entity {
        F::ENTITY
    }

    /// Add an unqualified phrase that is matched against the entity's default field.
    #[must_use]
    pub fn phrase(mut self, value: &str) -> Self {
        if !value.is_empty() {
            self.terms.push(quote(value));
        }
        self
    }

    /// Add a phrase that is matched against the given field.
    #[must_use]
    pub fn field(mut self, field: F, value: &str) -> Self {
        if !value.is_empty() {
            self.terms
                .push(format!("{name}:{value}", name = field.name(), value = quote(value)));
        }
        self
    }

    /// Add a phrase for the given field if the value is present.
    #[must_use]
    pub fn field_opt(self, field: F, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(field, value),
            None => self,
        }
    }

    /// Returns `true` if the query contains no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Build the query string.
    pub fn build(&self) -> String {
        self.terms.join(" AND ")
    }
}

impl SearchQuery<ReleaseField> {
    /// Build the release search for an album directory.
    pub fn release_search(album_path: &AlbumPath, filters: &SearchFilters) -> Self {
        Self::new()
            .phrase(&album_path.album)
            .field(ReleaseField::Artist, &album_path.artist)
            .field_opt(ReleaseField::Format, filters.format.as_deref())
            .field_opt(ReleaseField::Country, filters.country.as_deref())
    }
}

impl<F: SearchField> fmt::Display for SearchQuery<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn album_path(artist: &str, album: &str) -> AlbumPath {
        AlbumPath {
            path: PathBuf::from(format!("/{artist}/{album}")),
            artist: artist.to_string(),
            album: album.to_string(),
        }
    }

    #[test]
    fn test_release_search() {
        let query = SearchQuery::release_search(
            &album_path("Miles Davis", "Kind of Blue"),
            &SearchFilters::default(),
        );
        assert_eq!(query.entity(), Entity::Release);
        assert_eq!(query.build(), r#""Kind of Blue" AND artist:"Miles Davis""#);
    }

    #[test]
    fn test_release_search_with_filters() {
        let filters = SearchFilters {
            format: Some("CD".to_string()),
            country: Some("US".to_string()),
        };
        let query = SearchQuery::release_search(&album_path("Miles Davis", "Kind of Blue"), &filters);
        assert_eq!(
            query.to_string(),
            r#""Kind of Blue" AND artist:"Miles Davis" AND format:"CD" AND country:"US""#
        );
    }

    #[test]
    fn test_quote_escapes_special_characters() {
        let query = SearchQuery::<ReleaseField>::new()
            .phrase(r#"12" Vinyl \ Mix"#)
            .field(ReleaseField::CatalogNumber, "LP-628");
        assert_eq!(
            query.build(),
            r#""12\" Vinyl \\ Mix" AND catno:"LP-628""#
        );
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let query = SearchQuery::<RecordingField>::new()
            .phrase("")
            .field(RecordingField::Artist, "")
            .field_opt(RecordingField::Isrc, None);
        assert!(query.is_empty());
        assert_eq!(query.build(), "");
    }

    #[test]
    fn test_entity_paths() {
        assert_eq!(Entity::ReleaseGroup.path(), "release-group");
        assert_eq!(Entity::from_path("release-group"), Some(Entity::ReleaseGroup));
        assert_eq!(Entity::from_path("work"), Some(Entity::Work));
        assert_eq!(Entity::from_path("event"), None);
        assert_eq!(WorkField::ENTITY, Entity::Work);
        assert_eq!(ReleaseGroupField::Rgid.name(), "rgid");
    }
}
