use std::time::Duration;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;
use crate::application::ports::SubscriptionService;
use crate::domain::value_objects::UserId;

const PER_PAGE: u32 = 100;
/// Upper bound on pages fetched for a single lookup
const MAX_PAGES: u32 = 50;

#[derive(Debug, Deserialize)]
struct ThreadRef {
    id: String,
}

/// One page of `/users/{id}/subscribed_threads`
#[derive(Debug, Deserialize)]
struct SubscribedThreadsPage {
    collection: Vec<ThreadRef>,
    num_pages: u32,
}

impl SubscribedThreadsPage {
    fn contains(&self, thread_id: &str) -> bool {
        self.collection.iter().any(|t| t.id == thread_id)
    }

    /// Pagination is driven by the page we asked for, the echoed `page`
    /// is not trusted.
    fn is_last(&self, requested: u32) -> bool {
        requested >= self.num_pages || requested >= MAX_PAGES
    }
}

/// Subscription lookup against the forums comments service
pub struct HttpSubscriptionService {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpSubscriptionService {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid comments service url: {base_url}"))?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn subscribed_threads_url(&self, user: &UserId, course_id: &str, page: u32) -> anyhow::Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("api/v1/users/{user}/subscribed_threads"))?;
        url.query_pairs_mut()
            .append_pair("course_id", course_id)
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &PER_PAGE.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SubscriptionService for HttpSubscriptionService {
    async fn is_subscribed_to_thread(
        &self,
        user: &UserId,
        course_id: &str,
        thread_id: &str,
    ) -> anyhow::Result<bool> {
        let mut page = 1;
        loop {
            let mut request = self.client.get(self.subscribed_threads_url(user, course_id, page)?);
            if let Some(key) = &self.api_key {
                request = request.header("X-Edx-Api-Key", key);
            }
            let threads: SubscribedThreadsPage = request
                .send()
                .await
                .context("Comments service request failed")?
                .error_for_status()
                .context("Comments service returned an error")?
                .json()
                .await
                .context("Malformed subscribed threads response")?;

            if threads.contains(thread_id) {
                return Ok(true);
            }
            if threads.is_last(page) {
                if page >= MAX_PAGES && page < threads.num_pages {
                    tracing::warn!(user = %user, thread = thread_id, "Gave up on subscribed threads after {} pages", page);
                }
                return Ok(false);
            }
            page += 1;
        }
    }
}
