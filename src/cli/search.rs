// Copyright (c) 2025 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Module for the `search` CLI subcommand.

use super::FilterArgs;
use crate::musicbrainz::{Document, Entity, MusicBrainzClient, SearchQuery};
use crate::{AlbumPath, Config};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command line arguments for the `search` CLI command.
#[derive(Parser, Debug)]
pub struct Args {
    /// Album directory (`.../<Artist>/<Album>`).
    path: PathBuf,
    /// Release search filters.
    #[command(flatten)]
    filters: FilterArgs,
    /// Entity to search for (e.g. `release`, `release-group` or `recording`).
    #[arg(long, default_value = "release", value_parser = parse_entity)]
    entity: Entity,
}

/// Parse an entity from its URL path segment.
fn parse_entity(value: &str) -> Result<Entity, String> {
    Entity::from_path(value).ok_or_else(|| format!("unknown MusicBrainz entity: {value}"))
}

/// Print the artist and album inferred from the path.
fn write_album_header(mut writer: impl Write, album_path: &AlbumPath) -> io::Result<()> {
    writeln!(writer, "Artist: {}", album_path.artist)?;
    writeln!(writer, "Album: {}", album_path.album)
}

/// Print the request URI, a blank line and the indented response.
fn write_response(mut writer: impl Write, document: &Document) -> crate::Result<()> {
    if let Some(uri) = document.uri() {
        writeln!(writer, "{uri}")?;
        writeln!(writer)?;
    }
    document.write_pretty(&mut writer)?;
    Ok(())
}

/// Run the `search` command.
///
/// # Errors
///
/// Returns an error if the path is not an album directory or the search fails.
pub async fn run(config: &Config, args: Args) -> crate::Result<()> {
    let album_path = AlbumPath::from_path(&args.path)?;
    write_album_header(io::stdout().lock(), &album_path)?;

    let query = SearchQuery::release_search(&album_path, &args.filters.search_filters(config));
    log::debug!("Search query: {query}");

    let musicbrainz = MusicBrainzClient::new(config)?;
    let document = musicbrainz
        .search(
            args.entity,
            &query.build(),
            config.lookup.search_limit(),
            0,
        )
        .await?;

    write_response(io::stdout().lock(), &document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::musicbrainz::ResponseInfo;
    use std::time::Duration;

    #[test]
    fn test_write_album_header() {
        let album_path = AlbumPath {
            path: PathBuf::from("/music/Ahmad Jamal/But Not for Me"),
            artist: "Ahmad Jamal".to_string(),
            album: "But Not for Me".to_string(),
        };
        let mut output = Vec::new();
        write_album_header(&mut output, &album_path).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Artist: Ahmad Jamal\nAlbum: But Not for Me\n"
        );
    }

    #[test]
    fn test_write_response() {
        let uri = "https://musicbrainz.org/ws/2/release?query=x&offset=0&limit=100";
        let document = Document::parse("<metadata><release-list count=\"0\"/></metadata>")
            .unwrap()
            .with_response_info(ResponseInfo {
                url: uri.to_string(),
                status: 200,
                content_type: None,
                elapsed: Duration::from_millis(1),
            });
        let mut output = Vec::new();
        write_response(&mut output, &document).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with(&format!("{uri}\n\n<?xml version=\"1.0\" encoding=\"UTF-8\"?>")));
        assert!(output.contains("<release-list count=\"0\"/>"));
    }

    #[test]
    fn test_parse_entity() {
        assert_eq!(parse_entity("release"), Ok(Entity::Release));
        assert_eq!(parse_entity("release-group"), Ok(Entity::ReleaseGroup));
        assert!(parse_entity("album").is_err());
    }
}
