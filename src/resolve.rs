//! Turning slugs into the events they name

use crate::client::{query_typed, GraphQlClient};
use crate::error::{PreviewError, Result};
use crate::link::LinkKind;
use crate::model::{EventInfo, EventNode, EVENT_FIELDS};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct EventBySlug {
    event: Option<EventNode>,
}

#[derive(Debug, Deserialize)]
struct TournamentBySlug {
    tournament: Option<TournamentEvents>,
}

#[derive(Debug, Deserialize)]
struct TournamentEvents {
    events: Option<Vec<EventNode>>,
}

fn event_query() -> String {
    format!(
        "query EventBySlug($slug: String) {{ event(slug: $slug) {{ {} }} }}",
        EVENT_FIELDS
    )
}

fn tournament_events_query() -> String {
    format!(
        "query TournamentEvents($slug: String) {{ tournament(slug: $slug) {{ events {{ {} }} }} }}",
        EVENT_FIELDS
    )
}

/// Look up a single event from its `tournament/<t>/event/<e>` slug
pub fn resolve_event<C: GraphQlClient + ?Sized>(client: &C, event_slug: &str) -> Result<EventInfo> {
    let data: EventBySlug = query_typed(client, &event_query(), &json!({ "slug": event_slug }))?;
    let event = data
        .event
        .ok_or_else(|| PreviewError::EventNotFound(event_slug.to_string()))?;

    let info = EventInfo::from(event);
    log::debug!("Resolved {} to event {}", event_slug, info);
    Ok(info)
}

/// Every event of a tournament, in the order the API lists them.
///
/// Accepts both `tournament/<t>` slugs and short names. Events are not
/// paginated, so a tournament with more events than the API returns in one
/// response is cut short.
pub fn tournament_events<C: GraphQlClient + ?Sized>(client: &C, slug: &str) -> Result<Vec<EventInfo>> {
    let data: TournamentBySlug =
        query_typed(client, &tournament_events_query(), &json!({ "slug": slug }))?;
    let tournament = data
        .tournament
        .ok_or_else(|| PreviewError::TournamentNotFound(slug.to_string()))?;

    let events: Vec<EventInfo> = tournament
        .events
        .unwrap_or_default()
        .into_iter()
        .map(EventInfo::from)
        .collect();
    log::debug!("Tournament {} has {} events", slug, events.len());
    Ok(events)
}

/// The events a classified link refers to
pub fn events_for_link<C: GraphQlClient + ?Sized>(client: &C, link: &LinkKind) -> Result<Vec<EventInfo>> {
    match link {
        LinkKind::EventSlug(slug) => Ok(vec![resolve_event(client, slug)?]),
        LinkKind::TournamentSlug(slug) | LinkKind::ShorthandSlug(slug) => tournament_events(client, slug),
    }
}
