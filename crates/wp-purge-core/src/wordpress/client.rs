use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use url::Url;

use super::models::Post;
use crate::auth::Credentials;
use crate::config::{HttpConfig, SiteConfig};
use crate::window::DateWindow;
use crate::{Error, Result};

/// Largest page size the posts endpoint accepts
pub const PER_PAGE: u32 = 100;
/// Response header carrying the number of result pages
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

const CLIENT_USER_AGENT: &str = concat!("wp-purge/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for one site's `wp/v2` REST namespace
pub struct WordPressClient {
    client: Client,
    api_base: Url,
}

impl WordPressClient {
    /// Create a client for a configured site
    pub fn from_site(site: &SiteConfig, http: &HttpConfig) -> Result<Self> {
        Self::new(
            site.api_base()?,
            &site.credentials(),
            Duration::from_secs(http.request_timeout_secs),
        )
    }

    /// Create a client for an explicit API base such as `https://host/wp-json/wp/v2/`
    pub fn new(api_base: Url, credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(Self::build_headers(credentials)?)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, api_base })
    }

    /// Authorization is attached once here and sent with every request
    fn build_headers(credentials: &Credentials) -> Result<HeaderMap> {
        let mut auth = HeaderValue::from_str(&credentials.header_value())
            .map_err(|e| Error::Config(format!("Invalid credentials: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        Ok(headers)
    }

    fn posts_url(&self, window: &DateWindow) -> Result<Url> {
        let mut url = self.api_base.join("posts")?;
        url.query_pairs_mut()
            .append_pair("status", "publish")
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("after", &window.after_param())
            .append_pair("before", &window.before_param());
        Ok(url)
    }

    /// Fetch every published post inside `window`, following pagination
    ///
    /// Page 1 is requested without a `page` parameter; its `X-WP-TotalPages` header
    /// decides how many further pages are requested. Pages are concatenated in order.
    pub async fn fetch_posts(&self, window: &DateWindow) -> Result<Vec<Post>> {
        let url = self.posts_url(window)?;

        tracing::info!(
            "Getting posts from {} to {}..",
            window.after_param(),
            window.before_param()
        );

        let (headers, mut all_posts) = self.get_page(url.clone()).await?;
        let total_pages = Self::total_pages(&headers)?;
        tracing::info!("Total pages: {}", total_pages);

        for page in 2..=total_pages {
            tracing::info!("Getting posts, page: {}", page);

            let mut page_url = url.clone();
            page_url
                .query_pairs_mut()
                .append_pair("page", &page.to_string());

            let (_, posts) = self.get_page(page_url).await?;
            all_posts.extend(posts);
        }

        tracing::info!("Total number of posts: {}", all_posts.len());

        Ok(all_posts)
    }

    async fn get_page(&self, url: Url) -> Result<(HeaderMap, Vec<Post>)> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let posts: Vec<Post> = serde_json::from_slice(&body)?;

        Ok((headers, posts))
    }

    fn total_pages(headers: &HeaderMap) -> Result<u32> {
        let value = headers
            .get(TOTAL_PAGES_HEADER)
            .ok_or_else(|| Error::Pagination(format!("missing {} header", TOTAL_PAGES_HEADER)))?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| {
                Error::Pagination(format!(
                    "invalid {} header: {:?}",
                    TOTAL_PAGES_HEADER, value
                ))
            })
    }

    /// Permanently delete a media attachment
    pub async fn delete_media(&self, media_id: u64) -> Result<()> {
        self.force_delete(&format!("media/{}", media_id)).await
    }

    /// Permanently delete a post, bypassing the trash
    pub async fn delete_post(&self, post_id: u64) -> Result<()> {
        self.force_delete(&format!("posts/{}", post_id)).await
    }

    async fn force_delete(&self, path: &str) -> Result<()> {
        let mut url = self.api_base.join(path)?;
        url.query_pairs_mut().append_pair("force", "true");

        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status,
                url: url.to_string(),
            });
        }

        Ok(())
    }
}
