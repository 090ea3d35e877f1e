// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! HTTP client for the XML web service.

use super::query::{Entity, ReleaseField, SearchField, SearchQuery};
use super::release::{Release, ReleaseCandidate};
use super::xml::{Document, ResponseInfo};
use crate::Config;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use std::time::Instant;

/// Sub-queries that can be included in a lookup (`inc` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    /// Tracks and their recordings.
    Recordings,
    /// Artist credits of the entity (and its tracks/recordings).
    ArtistCredits,
    /// Labels and catalog numbers.
    Labels,
    /// The release group.
    ReleaseGroups,
    /// Media, without track lists.
    Media,
}

impl Include {
    /// The value as used in the `inc` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recordings => "recordings",
            Self::ArtistCredits => "artist-credits",
            Self::Labels => "labels",
            Self::ReleaseGroups => "release-groups",
            Self::Media => "media",
        }
    }
}

/// Build the URL of a search request.
fn search_url(
    base_url: &str,
    entity: Entity,
    query: &str,
    limit: u8,
    offset: u32,
) -> crate::Result<Url> {
    Url::parse_with_params(
        &format!("{base_url}/{entity}"),
        &[
            ("query", query.to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ],
    )
    .map_err(|err| crate::Error::InvalidUrl(err.to_string()))
}

/// Build the URL of a lookup request.
fn lookup_url(
    base_url: &str,
    entity: Entity,
    mbid: &str,
    includes: &[Include],
) -> crate::Result<Url> {
    let url = format!("{base_url}/{entity}/{mbid}");
    let result = if includes.is_empty() {
        Url::parse(&url)
    } else {
        let inc = includes
            .iter()
            .map(|include| include.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Url::parse_with_params(&url, &[("inc", inc)])
    };
    result.map_err(|err| crate::Error::InvalidUrl(err.to_string()))
}

/// Configurable MusicBrainz web service client.
#[derive(Debug)]
pub struct MusicBrainzClient<'a> {
    /// Configuration
    config: &'a Config,
    /// HTTP client
    http_client: reqwest::Client,
}

impl<'a> MusicBrainzClient<'a> {
    /// Create a new MusicBrainz client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &'a Config) -> crate::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.lookup.user_agent())
            .timeout(config.lookup.timeout())
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Fetch an URL and parse the response body as XML document.
    async fn fetch(&self, url: Url) -> crate::Result<Document> {
        log::debug!("Requesting {url}");
        let started = Instant::now();
        let response = self
            .http_client
            .get(url.clone())
            .header(ACCEPT, "application/xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::Error::HttpStatus {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await?;
        let elapsed = started.elapsed();
        log::debug!(
            "Received {len} bytes from {url} in {elapsed:?}",
            len = body.len()
        );

        let document = Document::parse(&body).map_err(|source| crate::Error::ResponseParse {
            url: url.to_string(),
            source,
        })?;
        Ok(document.with_response_info(ResponseInfo {
            url: url.to_string(),
            status: status.as_u16(),
            content_type,
            elapsed,
        }))
    }

    /// Run a search query against the given entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn search(
        &self,
        entity: Entity,
        query: &str,
        limit: u8,
        offset: u32,
    ) -> crate::Result<Document> {
        let url = search_url(self.config.lookup.base_url(), entity, query, limit, offset)?;
        self.fetch(url).await
    }

    /// Run a typed search query with the configured result limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn search_query<F: SearchField>(
        &self,
        query: &SearchQuery<F>,
    ) -> crate::Result<Document> {
        self.search(
            query.entity(),
            &query.build(),
            self.config.lookup.search_limit(),
            0,
        )
        .await
    }

    /// Look up a single entity by its MBID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn lookup(
        &self,
        entity: Entity,
        mbid: &str,
        includes: &[Include],
    ) -> crate::Result<Document> {
        let url = lookup_url(self.config.lookup.base_url(), entity, mbid, includes)?;
        self.fetch(url).await
    }

    /// Search for releases and return the candidates in response order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn find_release_candidates(
        &self,
        query: &SearchQuery<ReleaseField>,
    ) -> crate::Result<Vec<ReleaseCandidate>> {
        let document = self.search_query(query).await?;
        let candidates = ReleaseCandidate::from_search_response(&document);
        log::info!(
            "Search for {query} returned {count} release(s)",
            count = candidates.len()
        );
        Ok(candidates)
    }

    /// Look up a release including its tracks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not contain a release.
    pub async fn find_release_by_id(&self, release_id: &str) -> crate::Result<Release> {
        let document = self
            .lookup(
                Entity::Release,
                release_id,
                &[Include::Recordings, Include::ArtistCredits],
            )
            .await?;
        Release::from_lookup_response(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupConfig;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const RELEASE_SEARCH_XML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/musicbrainz/release-search.xml"
    ));

    /// Answer a single HTTP request on a local port and return the web service root.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0; 8192];
            let _length = stream.read(&mut request).unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/xml\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n{body}",
                length = body.len(),
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{address}/ws/2")
    }

    fn config_with_base_url(base_url: String) -> Config {
        Config {
            lookup: LookupConfig {
                base_url: Some(base_url),
                ..Default::default()
            },
            ..Default::default()
        }
        .with_defaults()
    }

    #[tokio::test]
    async fn test_fetch_search_results() {
        let config = config_with_base_url(serve_once("200 OK", RELEASE_SEARCH_XML));
        let client = MusicBrainzClient::new(&config).unwrap();
        let query = SearchQuery::<ReleaseField>::new().phrase("But Not for Me");
        let document = client.search_query(&query).await.unwrap();
        assert!(document
            .uri()
            .is_some_and(|uri| uri.starts_with(config.lookup.base_url())));
        assert_eq!(ReleaseCandidate::from_search_response(&document).len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let config = config_with_base_url(serve_once("503 Service Unavailable", ""));
        let client = MusicBrainzClient::new(&config).unwrap();
        let result = client
            .lookup(Entity::Release, "0008f765-032b-46cd-ab69-2220edab1837", &[])
            .await;
        assert!(matches!(
            result,
            Err(crate::Error::HttpStatus { status, .. }) if status.starts_with("503")
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let config = config_with_base_url(serve_once("200 OK", "<metadata><release></metadata>"));
        let client = MusicBrainzClient::new(&config).unwrap();
        let result = client
            .find_release_by_id("0008f765-032b-46cd-ab69-2220edab1837")
            .await;
        assert!(matches!(result, Err(crate::Error::ResponseParse { .. })));
    }

    #[test]
    fn test_search_url() {
        let url = search_url(
            "https://musicbrainz.org/ws/2",
            Entity::Release,
            r#""Kind of Blue" AND artist:"Miles Davis""#,
            100,
            0,
        )
        .unwrap();
        assert_eq!(url.path(), "/ws/2/release");
        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert_eq!(
            params,
            vec![
                (
                    "query".to_string(),
                    r#""Kind of Blue" AND artist:"Miles Davis""#.to_string()
                ),
                ("offset".to_string(), "0".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_lookup_url() {
        let url = lookup_url(
            "https://musicbrainz.org/ws/2",
            Entity::Release,
            "0008f765-032b-46cd-ab69-2220edab1837",
            &[Include::Recordings, Include::ArtistCredits],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://musicbrainz.org/ws/2/release/0008f765-032b-46cd-ab69-2220edab1837?inc=recordings+artist-credits"
        );

        let url = lookup_url(
            "https://musicbrainz.org/ws/2",
            Entity::ReleaseGroup,
            "0a8e97fd-457c-30bc-938a-2fba79cb04e7",
            &[],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://musicbrainz.org/ws/2/release-group/0a8e97fd-457c-30bc-938a-2fba79cb04e7"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            search_url("not a url", Entity::Release, "x", 1, 0),
            Err(crate::Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_new_client() {
        let config = Config::default();
        assert!(MusicBrainzClient::new(&config).is_ok());
    }
}
