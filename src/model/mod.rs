pub mod entrant;
pub mod event;
pub(crate) mod id;
pub mod player;

pub use entrant::{Entrant, Participant, User, ENTRANT_FIELDS};
pub use event::{EventInfo, EventNode, Videogame, EVENT_FIELDS};
pub use player::{PlayerMap, PlayerRecord};
