use super::id::deserialize_id;
use serde::Deserialize;
use std::fmt;

/// Fields selected for every event the resolver looks up
pub const EVENT_FIELDS: &str = "id name videogame { name }";

#[derive(Debug, Clone, Deserialize)]
pub struct Videogame {
    pub name: String,
}

/// An event as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct EventNode {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub name: Option<String>,
    pub videogame: Option<Videogame>,
}

/// A resolved event: its id and the game it is played in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub id: u64,
    pub game: String,
}

impl From<EventNode> for EventInfo {
    fn from(node: EventNode) -> Self {
        let game = node
            .videogame
            .map(|v| v.name)
            .or(node.name)
            .unwrap_or_else(|| format!("Event {}", node.id));
        EventInfo { id: node.id, game }
    }
}

impl fmt::Display for EventInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.game, self.id)
    }
}
