//! `HostPage` over the W3C WebDriver HTTP protocol.
//!
//! The session is opened lazily on first use and navigates to the playlist
//! page when one is configured. Item discovery reads the page source and
//! parses it locally; only interactions go through element references.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde_json::{json, Value};
use sweep_core::Item;
use tokio::sync::OnceCell;

use crate::host::{ElementHandle, HostPage, LocatedTrigger, MenuEntry};
use crate::locator;
use crate::scan::{ItemScanner, SYNTHETIC_ID_PREFIX};
use crate::wait::{poll_until, WaitPolicy};
use crate::{HostError, ProbeReport};

/// Key of a web element reference in WebDriver JSON.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52f-4d8a4a0c1bb5";
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

const CSS: &str = "css selector";
const XPATH: &str = "xpath";

const DISMISS_SCRIPT: &str = "document.body.click();";

const VISIBILITY_SCRIPT: &str = r#"
const visible = arguments[0];
const selectors = arguments[1];
let rows = [];
for (const selector of selectors) {
  rows = document.querySelectorAll(selector);
  if (rows.length) break;
}
rows.forEach((row, i) => {
  if (i < visible.length) row.style.display = visible[i] ? '' : 'none';
});
return rows.length;
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

impl Browser {
    fn capabilities(self) -> Value {
        let name = match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
        };
        json!({ "capabilities": { "alwaysMatch": { "browserName": name } } })
    }
}

#[derive(Debug, Clone)]
pub struct WebDriverSettings {
    pub endpoint: String,
    /// Page opened when the session starts; `None` keeps whatever is loaded.
    pub page_url: Option<String>,
    pub browser: Browser,
    pub page_ready: WaitPolicy,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for WebDriverSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4444".to_string(),
            page_url: Some("https://www.youtube.com/playlist?list=WL".to_string()),
            browser: Browser::default(),
            page_ready: WaitPolicy::PAGE_READY,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub struct WebDriverPage {
    client: reqwest::Client,
    settings: WebDriverSettings,
    session: OnceCell<String>,
    scanner: ItemScanner,
}

impl WebDriverPage {
    pub fn new(settings: WebDriverSettings) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| HostError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            settings,
            session: OnceCell::new(),
            scanner: ItemScanner::new(),
        })
    }

    async fn session(&self) -> Result<&str, HostError> {
        self.session
            .get_or_try_init(|| self.open_session())
            .await
            .map(String::as_str)
    }

    async fn open_session(&self) -> Result<String, HostError> {
        let value = self
            .command(
                Method::POST,
                "session",
                Some(self.settings.browser.capabilities()),
            )
            .await?;
        let sid = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| HostError::InvalidResponse("missing sessionId".to_string()))?
            .to_string();
        sweep_logging::sweep_info!("WebDriver session {sid} opened");

        if let Some(page_url) = &self.settings.page_url {
            self.command(
                Method::POST,
                &format!("session/{sid}/url"),
                Some(json!({ "url": page_url })),
            )
            .await?;
            self.wait_page_ready(&sid).await?;
        }
        Ok(sid)
    }

    async fn wait_page_ready(&self, sid: &str) -> Result<(), HostError> {
        let ready = poll_until(self.settings.page_ready, || async move {
            let html = self.page_source(sid).await?;
            Ok::<_, HostError>(self.scanner.is_playlist_page(&html).then_some(()))
        })
        .await?;
        if ready.is_none() {
            sweep_logging::sweep_warn!(
                "Playlist page not detected after {:?}; continuing anyway",
                self.settings.page_ready.budget()
            );
        }
        Ok(())
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, HostError> {
        let url = format!(
            "{}/{}",
            self.settings.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        sweep_logging::sweep_trace!("WebDriver {method} {url}");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|err| HostError::InvalidResponse(err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|err| HostError::Transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| HostError::Transport(err.to_string()))?;
        let mut payload: Value = serde_json::from_slice(&bytes)
            .map_err(|err| HostError::InvalidResponse(format!("{status}: {err}")))?;
        let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(protocol_error(status.as_u16(), &value));
        }
        Ok(value)
    }

    async fn page_source(&self, sid: &str) -> Result<String, HostError> {
        let value = self
            .command(Method::GET, &format!("session/{sid}/source"), None)
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| HostError::InvalidResponse("page source is not a string".to_string()))
    }

    async fn find_all(
        &self,
        sid: &str,
        scope: Option<&ElementHandle>,
        using: &str,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, HostError> {
        let path = match scope {
            Some(parent) => format!("session/{sid}/element/{}/elements", parent.0),
            None => format!("session/{sid}/elements"),
        };
        let value = self
            .command(
                Method::POST,
                &path,
                Some(json!({ "using": using, "value": selector })),
            )
            .await?;
        let found = value
            .as_array()
            .ok_or_else(|| HostError::InvalidResponse("elements is not an array".to_string()))?;
        Ok(found.iter().filter_map(element_from).collect())
    }

    async fn is_displayed(&self, sid: &str, element: &ElementHandle) -> Result<bool, HostError> {
        let value = self
            .command(
                Method::GET,
                &format!("session/{sid}/element/{}/displayed", element.0),
                None,
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn text(&self, sid: &str, element: &ElementHandle) -> Result<String, HostError> {
        let value = self
            .command(
                Method::GET,
                &format!("session/{sid}/element/{}/text", element.0),
                None,
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().trim().to_string())
    }

    async fn execute(&self, sid: &str, script: &str, args: Value) -> Result<Value, HostError> {
        self.command(
            Method::POST,
            &format!("session/{sid}/execute/sync"),
            Some(json!({ "script": script, "args": args })),
        )
        .await
    }

    /// The live container element of `item`. Real ids are matched by id
    /// only. Synthesized ids are looked up again in a fresh scan, since
    /// earlier removals shift the rows below them.
    async fn item_container(
        &self,
        sid: &str,
        item: &Item,
    ) -> Result<Option<ElementHandle>, HostError> {
        for (using, selector) in container_queries(item) {
            if let Some(found) = self.find_all(sid, None, using, &selector).await?.into_iter().next() {
                return Ok(Some(found));
            }
        }
        if !item.id.starts_with(SYNTHETIC_ID_PREFIX) {
            return Ok(None);
        }
        // Without title and channel the id only encodes the stale position.
        if item.title.is_empty() && item.channel_name.is_empty() {
            sweep_logging::sweep_debug!("{} has nothing to match on", item.id);
            return Ok(None);
        }

        let html = self.page_source(sid).await?;
        let fresh = self.scanner.scan(&html);
        let mut matches = fresh.iter().filter(|candidate| candidate.id == item.id);
        let position = match (matches.next(), matches.next()) {
            (Some(found), None) => found.position,
            (None, _) => return Ok(None),
            (Some(_), Some(_)) => {
                sweep_logging::sweep_debug!("{} matches several rows", item.id);
                return Ok(None);
            }
        };
        for container in locator::ITEM_CONTAINERS {
            let rows = self.find_all(sid, None, CSS, container).await?;
            if !rows.is_empty() {
                return Ok(rows.into_iter().nth(position));
            }
        }
        Ok(None)
    }

    async fn first_displayed(
        &self,
        sid: &str,
        table: &[&str],
    ) -> Result<Vec<ElementHandle>, HostError> {
        for selector in table {
            let mut shown = Vec::new();
            for element in self.find_all(sid, None, CSS, selector).await? {
                if self.is_displayed(sid, &element).await? {
                    shown.push(element);
                }
            }
            if !shown.is_empty() {
                return Ok(shown);
            }
        }
        Ok(Vec::new())
    }
}

#[async_trait::async_trait]
impl HostPage for WebDriverPage {
    async fn scan(&self) -> Result<Vec<Item>, HostError> {
        let sid = self.session().await?;
        let html = self.page_source(sid).await?;
        Ok(self.scanner.scan(&html))
    }

    async fn locate_trigger(&self, item: &Item) -> Result<Option<LocatedTrigger>, HostError> {
        let sid = self.session().await?;
        let Some(container) = self.item_container(sid, item).await? else {
            sweep_logging::sweep_debug!("No container found for {}", item.id);
            return Ok(None);
        };
        for selector in locator::TRIGGERS {
            let found = self.find_all(sid, Some(&container), CSS, selector).await?;
            if let Some(element) = found.into_iter().next() {
                return Ok(Some(LocatedTrigger {
                    element,
                    locator: *selector,
                }));
            }
        }
        Ok(None)
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), HostError> {
        let sid = self.session().await?;
        self.command(
            Method::POST,
            &format!("session/{sid}/element/{}/click", element.0),
            Some(json!({})),
        )
        .await?;
        Ok(())
    }

    async fn menu_entries(&self) -> Result<Vec<MenuEntry>, HostError> {
        let sid = self.session().await?;
        let mut entries = Vec::new();
        for element in self.first_displayed(sid, locator::MENU_ENTRIES).await? {
            let text = self.text(sid, &element).await?;
            entries.push(MenuEntry { element, text });
        }
        Ok(entries)
    }

    async fn find_confirm_button(&self) -> Result<Option<ElementHandle>, HostError> {
        let sid = self.session().await?;
        Ok(self
            .first_displayed(sid, locator::CONFIRM_BUTTONS)
            .await?
            .into_iter()
            .next())
    }

    async fn dismiss_menu(&self) -> Result<(), HostError> {
        let sid = self.session().await?;
        self.execute(sid, DISMISS_SCRIPT, json!([])).await?;
        Ok(())
    }

    async fn apply_visibility(&self, items: &[Item], visible: &[bool]) -> Result<(), HostError> {
        let sid = self.session().await?;
        let rows = items.iter().map(|item| item.position + 1).max().unwrap_or(0);
        let mut by_position = vec![true; rows];
        for (item, shown) in items.iter().zip(visible) {
            by_position[item.position] = *shown;
        }
        let touched = self
            .execute(
                sid,
                VISIBILITY_SCRIPT,
                json!([by_position, locator::ITEM_CONTAINERS]),
            )
            .await?;
        sweep_logging::sweep_debug!("Visibility applied to {touched} rows");
        Ok(())
    }

    async fn probe(&self, limit: usize) -> Result<Vec<ProbeReport>, HostError> {
        let sid = self.session().await?;
        let html = self.page_source(sid).await?;
        let items = self.scanner.scan(&html);
        let triggers = self.scanner.trigger_locators(&html);
        Ok(items
            .into_iter()
            .zip(triggers)
            .take(limit)
            .map(|(item, trigger_locator)| ProbeReport {
                item,
                trigger_locator,
            })
            .collect())
    }

    async fn close(&self) {
        if let Some(sid) = self.session.get() {
            match self
                .command(Method::DELETE, &format!("session/{sid}"), None)
                .await
            {
                Ok(_) => sweep_logging::sweep_info!("WebDriver session {sid} closed"),
                Err(err) => sweep_logging::sweep_warn!("Closing session {sid} failed: {err}"),
            }
        }
    }
}

fn element_from(value: &Value) -> Option<ElementHandle> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(Value::as_str)
        .map(|id| ElementHandle(id.to_string()))
}

fn protocol_error(status: u16, value: &Value) -> HostError {
    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
    HostError::Protocol {
        error: field("error").unwrap_or_else(|| format!("http {status}")),
        message: field("message").unwrap_or_default(),
    }
}

/// Id-based lookups for an item's container, most specific first.
fn container_queries(item: &Item) -> Vec<(&'static str, String)> {
    let id = item.id.as_str();
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !safe || id.starts_with(SYNTHETIC_ID_PREFIX) {
        return Vec::new();
    }
    let mut queries: Vec<(&'static str, String)> = locator::ITEM_CONTAINERS
        .iter()
        .map(|tag| {
            (
                XPATH,
                format!("//{tag}[.//a[contains(concat(@href, '&'), 'v={id}&')]]"),
            )
        })
        .collect();
    queries.extend(
        locator::ID_ATTRIBUTES
            .iter()
            .map(|attr| (CSS, format!("[{attr}=\"{id}\"]"))),
    );
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            display_index: Some(1),
            title: "t".to_string(),
            channel_name: String::new(),
            position: 0,
        }
    }

    #[test]
    fn queries_match_exact_video_ids() {
        let queries = container_queries(&item("abc_12-X"));
        assert_eq!(
            queries[0],
            (
                XPATH,
                "//ytd-playlist-video-renderer[.//a[contains(concat(@href, '&'), 'v=abc_12-X&')]]"
                    .to_string()
            )
        );
        assert!(queries.contains(&(CSS, "[data-video-id=\"abc_12-X\"]".to_string())));
    }

    #[test]
    fn synthetic_or_unsafe_ids_have_no_id_queries() {
        assert!(container_queries(&item("item-0011223344556677")).is_empty());
        assert!(container_queries(&item("a'b")).is_empty());
    }

    #[test]
    fn protocol_errors_keep_webdriver_codes() {
        let err = protocol_error(
            404,
            &json!({ "error": "no such window", "message": "window closed" }),
        );
        assert_eq!(
            err,
            HostError::Protocol {
                error: "no such window".to_string(),
                message: "window closed".to_string()
            }
        );
        assert_eq!(
            protocol_error(500, &Value::Null),
            HostError::Protocol {
                error: "http 500".to_string(),
                message: String::new()
            }
        );
    }
}
