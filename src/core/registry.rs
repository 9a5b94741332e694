use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::constants::{REGISTRY_MAX_PAGES, REGISTRY_MAX_VERSIONS, REGISTRY_PAGE_SIZE};
use crate::core::version_cache::VersionCache;
use crate::error::Result;
use crate::models::NodeVersion;

/// Tag-name substrings that mark a release as ineligible.
const PRERELEASE_KEYWORDS: &[&str] = &["nightly", "dev", "beta", "alpha", "rc", "latest"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TagPage {
    #[serde(default)]
    results: Vec<Tag>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    #[serde(default)]
    name: String,
}

/// Fetches eligible release versions from the image registry, newest
/// first, memoizing the result in an owned TTL cache.
pub struct VersionRegistry {
    client: Client,
    api_url: String,
    min_version: NodeVersion,
    cache: VersionCache,
}

impl VersionRegistry {
    pub fn new(api_url: String, min_version: NodeVersion, cache_ttl: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_url,
            min_version,
            cache: VersionCache::new(cache_ttl),
        }
    }

    /// Eligible versions, sorted descending. A cache hit within the TTL
    /// short-circuits without any network call; a failed refresh falls
    /// back to the last stored list, else empty. Every refresh that
    /// completes replaces the cache, even with an empty list.
    pub async fn fetch_available_versions(&mut self, use_cache: bool) -> Vec<String> {
        if use_cache {
            if let Some(cached) = self.cache.get() {
                info!("using cached versions ({})", cached.len());
                return cached.to_vec();
            }
        }

        match self.fetch_all_pages().await {
            Ok(versions) => {
                info!("found {} eligible versions", versions.len());
                self.cache.store(versions.clone());
                versions
            }
            Err(e) => {
                error!("error fetching available versions: {}", e);
                match self.cache.get_stale() {
                    Some(stale) => {
                        info!("returning cached versions after fetch error");
                        stale.to_vec()
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    async fn fetch_all_pages(&self) -> Result<Vec<String>> {
        let mut accepted: Vec<(NodeVersion, String)> = Vec::new();
        let mut page = 1;

        while page <= REGISTRY_MAX_PAGES {
            let url = format!(
                "{}?page={}&page_size={}",
                self.api_url, page, REGISTRY_PAGE_SIZE
            );
            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                error!("registry request failed: HTTP {}", response.status());
                break;
            }

            let tag_page: TagPage = response.json().await?;
            if tag_page.results.is_empty() {
                break;
            }

            accepted.extend(self.eligible_versions(&tag_page.results));

            if tag_page.next.is_none() {
                break;
            }
            if accepted.len() >= REGISTRY_MAX_VERSIONS {
                debug!("reached version cap at page {}", page);
                break;
            }
            page += 1;
        }

        // Stable sort: tags parsing equal keep their arrival order.
        accepted.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(accepted.into_iter().map(|(_, name)| name).collect())
    }

    /// Apply the eligibility grammar: no prerelease keyword, exact
    /// `x.y.z`, at or above the configured floor.
    fn eligible_versions(&self, tags: &[Tag]) -> Vec<(NodeVersion, String)> {
        tags.iter()
            .filter_map(|tag| {
                let name = tag.name.trim();
                let lowered = name.to_ascii_lowercase();
                if PRERELEASE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
                    return None;
                }
                let version: NodeVersion = name.parse().ok()?;
                if version < self.min_version {
                    return None;
                }
                Some((version, name.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn registry(url: &str, min: &str) -> VersionRegistry {
        VersionRegistry::new(
            format!("{}/tags", url),
            min.parse().unwrap(),
            Duration::from_secs(300),
        )
    }

    fn page_body(names: &[&str], next: Option<&str>) -> String {
        let results: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({ "name": n }))
            .collect();
        serde_json::json!({ "results": results, "next": next }).to_string()
    }

    #[tokio::test]
    async fn test_filters_prereleases_and_min_version() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(
                &["0.87.0", "0.87.0-beta", "0.86.9", "0.88.1-rc1", "0.90.0"],
                None,
            ))
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.87.0");
        let versions = registry.fetch_available_versions(false).await;

        assert_eq!(versions, vec!["0.90.0", "0.87.0"]);
    }

    #[tokio::test]
    async fn test_prerelease_keywords_case_insensitive() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0", "1.0.1-BETA", "NIGHTLY-1.0.2", "1.0.3"], None))
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let versions = registry.fetch_available_versions(false).await;

        assert_eq!(versions, vec!["1.0.3", "1.0.0"]);
    }

    #[tokio::test]
    async fn test_sorted_descending_numerically() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["0.9.0", "0.100.0", "0.87.3"], None))
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let versions = registry.fetch_available_versions(false).await;

        assert_eq!(versions, vec!["0.100.0", "0.87.3", "0.9.0"]);
    }

    #[tokio::test]
    async fn test_equal_parses_keep_arrival_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.02.3", "1.2.3"], None))
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let versions = registry.fetch_available_versions(false).await;

        assert_eq!(versions, vec!["1.02.3", "1.2.3"]);
    }

    #[tokio::test]
    async fn test_cache_hit_issues_no_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0"], None))
            .expect(1)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let first = registry.fetch_available_versions(true).await;
        let second = registry.fetch_available_versions(true).await;

        assert_eq!(first, second);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_use_cache_false_always_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0"], None))
            .expect(2)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        registry.fetch_available_versions(false).await;
        registry.fetch_available_versions(false).await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0"], None))
            .expect(2)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        registry.fetch_available_versions(true).await;
        registry.clear_cache();
        registry.fetch_available_versions(true).await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_falls_back_to_stale_cache() {
        let mut server = mockito::Server::new_async().await;
        let good = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0"], None))
            .expect(1)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let first = registry.fetch_available_versions(false).await;
        assert_eq!(first, vec!["1.0.0"]);
        good.remove_async().await;

        // Unparseable body makes the refresh fail mid-fetch.
        let _bad = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let second = registry.fetch_available_versions(false).await;
        assert_eq!(second, vec!["1.0.0"]);
    }

    #[tokio::test]
    async fn test_fetch_error_without_cache_returns_empty() {
        let mut server = mockito::Server::new_async().await;
        let _bad = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        assert!(registry.fetch_available_versions(false).await.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_follows_next_and_caps_on_total() {
        let mut server = mockito::Server::new_async().await;

        let page1_names: Vec<String> = (0..60).map(|i| format!("1.0.{}", i)).collect();
        let page2_names: Vec<String> = (0..60).map(|i| format!("1.1.{}", i)).collect();
        let p1: Vec<&str> = page1_names.iter().map(String::as_str).collect();
        let p2: Vec<&str> = page2_names.iter().map(String::as_str).collect();

        let _page1 = server
            .mock("GET", "/tags")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(page_body(&p1, Some("next-page")))
            .expect(1)
            .create_async()
            .await;
        let _page2 = server
            .mock("GET", "/tags")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(page_body(&p2, Some("next-page")))
            .expect(1)
            .create_async()
            .await;
        let page3 = server
            .mock("GET", "/tags")
            .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
            .expect(0)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        let versions = registry.fetch_available_versions(false).await;

        // 120 accepted across two pages; the cap stops pagination, not
        // the accumulated list.
        assert_eq!(versions.len(), 120);
        assert_eq!(versions[0], "1.1.59");
        page3.assert_async().await;
    }

    #[tokio::test]
    async fn test_stops_when_next_absent() {
        let mut server = mockito::Server::new_async().await;
        let _page1 = server
            .mock("GET", "/tags")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(page_body(&["1.0.0"], None))
            .expect(1)
            .create_async()
            .await;
        let page2 = server
            .mock("GET", "/tags")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .expect(0)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        registry.fetch_available_versions(false).await;
        page2.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_result_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(page_body(&["1.0.0-beta"], None))
            .expect(1)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        assert!(registry.fetch_available_versions(true).await.is_empty());
        // Second call is served by the cached empty list.
        assert!(registry.fetch_available_versions(true).await.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_page_truncates_without_failing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tags")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let mut registry = registry(&server.url(), "0.0.1");
        // Non-200 ends pagination; the (empty) accumulation still counts
        // as a completed fetch.
        assert!(registry.fetch_available_versions(false).await.is_empty());
    }
}
