//! Complete, duplicate-free retrieval of an event's entrants
//!
//! start.gg paginates entrants and fails from time to time, either with a
//! server error or with a page that does not line up with the rest. A fetch
//! walks every page at some page size and only succeeds when the number of
//! distinct entrants collected equals the total the API reports. Any other
//! outcome throws the whole walk away and starts over at half the page size.

use crate::client::{query_typed, GraphQlClient};
use crate::config::RetryPolicy;
use crate::error::{PreviewError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::thread;

/// Consecutive failed passes at the minimum page size before giving up early
const MAX_FAILURES_AT_FLOOR: u32 = 2;

/// A node of a paginated connection that can be told apart from its siblings
pub trait PageNode: DeserializeOwned {
    fn node_id(&self) -> u64;
}

const ENTRANT_COUNT_QUERY: &str = r#"
query EventEntrantCount($eventId: ID!, $perPage: Int!) {
  event(id: $eventId) {
    entrants(query: { page: 1, perPage: $perPage }) {
      pageInfo {
        total
        totalPages
      }
    }
  }
}
"#;

fn entrant_page_query(fields: &str) -> String {
    format!(
        r#"
query EventEntrantPage($eventId: ID!, $page: Int!, $perPage: Int!) {{
  event(id: $eventId) {{
    entrants(query: {{ page: $page, perPage: $perPage }}) {{
      nodes {{
        {}
      }}
    }}
  }}
}}
"#,
        fields
    )
}

#[derive(Debug, Deserialize)]
struct EventData<C> {
    event: Option<EventEntrants<C>>,
}

#[derive(Debug, Deserialize)]
struct EventEntrants<C> {
    entrants: Option<C>,
}

#[derive(Debug, Deserialize)]
struct CountConnection {
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total: usize,
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct NodeConnection<T> {
    nodes: Option<Vec<T>>,
}

impl<C> EventData<C> {
    fn into_connection(self, event_id: u64) -> Result<C> {
        self.event
            .ok_or_else(|| PreviewError::EventNotFound(event_id.to_string()))?
            .entrants
            .ok_or_else(|| {
                PreviewError::MalformedResponse(format!("event {} has no entrants field", event_id))
            })
    }
}

/// Fetch every entrant of an event.
///
/// `fields` is the GraphQL selection set for a single entrant node. On
/// success the result holds exactly as many distinct nodes as the API
/// reported; a partial list is never returned.
pub fn fetch_all_entrants<C, T>(
    client: &C,
    event_id: u64,
    fields: &str,
    policy: &RetryPolicy,
) -> Result<Vec<T>>
where
    C: GraphQlClient + ?Sized,
    T: PageNode,
{
    policy.validate()?;

    let query = entrant_page_query(fields);
    let mut page_size = policy.initial_page_size;
    let mut failures_at_floor = 0;
    let mut attempts = 0;

    let last_error = loop {
        attempts += 1;
        let err = match walk_pages(client, event_id, &query, page_size, policy) {
            Ok(nodes) => {
                log::info!(
                    "Collected {} entrants for event {} (page size {}, attempt {})",
                    nodes.len(),
                    event_id,
                    page_size,
                    attempts
                );
                return Ok(nodes);
            }
            // A missing event stays missing
            Err(e @ PreviewError::EventNotFound(_)) => return Err(e),
            Err(e) => e,
        };

        log::warn!(
            "Attempt {}/{} for event {} at page size {} failed: {}",
            attempts,
            policy.max_attempts,
            event_id,
            page_size,
            err
        );

        if page_size <= policy.min_page_size {
            failures_at_floor += 1;
            if failures_at_floor >= MAX_FAILURES_AT_FLOOR {
                log::error!("Event {} keeps failing at the minimum page size", event_id);
                break err;
            }
        }
        if attempts >= policy.max_attempts {
            break err;
        }
        page_size = policy.shrink(page_size);
    };

    log::error!("Failed to gather entrants for event {}", event_id);
    Err(PreviewError::FetchExhausted {
        event_id,
        attempts,
        source: Box::new(last_error),
    })
}

/// One full pass over every page at a fixed page size
fn walk_pages<C, T>(
    client: &C,
    event_id: u64,
    page_query: &str,
    page_size: u32,
    policy: &RetryPolicy,
) -> Result<Vec<T>>
where
    C: GraphQlClient + ?Sized,
    T: PageNode,
{
    let variables = json!({ "eventId": event_id, "perPage": page_size });
    let page_info = with_transient_retry(policy, "entrant count", || {
        query_typed::<_, EventData<CountConnection>>(client, ENTRANT_COUNT_QUERY, &variables)?
            .into_connection(event_id)?
            .page_info
            .ok_or_else(|| PreviewError::MalformedResponse("missing pageInfo".to_string()))
    })?;

    log::debug!(
        "Event {} has {} entrants over {} pages of {}",
        event_id,
        page_info.total,
        page_info.total_pages,
        page_size
    );

    let expected_pages = page_info.total.div_ceil(page_size as usize);
    let pages_agree = page_info.total_pages as usize == expected_pages
        || (page_info.total == 0 && page_info.total_pages <= 1);
    if !pages_agree {
        return Err(PreviewError::MalformedResponse(format!(
            "{} entrants cannot span {} pages of {}",
            page_info.total, page_info.total_pages, page_size
        )));
    }

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for page in 1..=page_info.total_pages {
        let variables = json!({ "eventId": event_id, "page": page, "perPage": page_size });
        let page_nodes = with_transient_retry(policy, &format!("entrant page {}", page), || {
            query_typed::<_, EventData<NodeConnection<T>>>(client, page_query, &variables)?
                .into_connection(event_id)?
                .nodes
                .ok_or_else(|| PreviewError::MalformedResponse(format!("page {} has no nodes", page)))
        })?;

        for node in page_nodes {
            if seen.insert(node.node_id()) {
                nodes.push(node);
            } else {
                log::debug!("Entrant {} seen twice in event {}", node.node_id(), event_id);
            }
        }
    }

    if nodes.len() != page_info.total {
        return Err(PreviewError::MalformedResponse(format!(
            "collected {} distinct entrants but the event reports {}",
            nodes.len(),
            page_info.total
        )));
    }

    Ok(nodes)
}

/// Re-send a request while it fails transiently, pausing between tries.
///
/// Gives up with the last error after `max_transient_retries` re-sends.
fn with_transient_retry<T>(
    policy: &RetryPolicy,
    what: &str,
    mut request: impl FnMut() -> Result<T>,
) -> Result<T> {
    let mut retries = 0;
    loop {
        match request() {
            Err(e) if e.is_transient() && retries < policy.max_transient_retries => {
                retries += 1;
                log::warn!(
                    "Fetching {} failed ({}), retrying in {:?} ({}/{})",
                    what,
                    e,
                    policy.transient_backoff,
                    retries,
                    policy.max_transient_retries
                );
                thread::sleep(policy.transient_backoff);
            }
            result => return result,
        }
    }
}
