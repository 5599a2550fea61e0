use super::entrant::Entrant;
use std::collections::HashMap;
use std::fmt;

/// What the preview needs to know about one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub prefix: Option<String>,
    pub tag: String,
    pub seed: Option<u32>,
}

impl PlayerRecord {
    pub fn new(prefix: Option<&str>, tag: &str, seed: Option<u32>) -> Self {
        Self {
            prefix: prefix.map(String::from),
            tag: tag.to_string(),
            seed,
        }
    }
}

/// `prefix|tag`, or just `tag` when there is no prefix
impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => write!(f, "{}|{}", prefix, self.tag),
            _ => write!(f, "{}", self.tag),
        }
    }
}

/// Players of one event keyed by discriminator, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct PlayerMap {
    players: Vec<(String, PlayerRecord)>,
    index: HashMap<String, usize>,
}

impl PlayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten every participant of every entrant into one map.
    ///
    /// Participants without a linked user have no discriminator and are left out.
    pub fn from_entrants(entrants: &[Entrant]) -> Self {
        let mut map = Self::new();

        for entrant in entrants {
            for participant in &entrant.participants {
                let Some(discriminator) = participant.discriminator() else {
                    log::debug!(
                        "Skipping participant {} ({}) with no user discriminator",
                        participant.id,
                        participant.gamer_tag
                    );
                    continue;
                };

                let record = PlayerRecord::new(
                    participant.prefix.as_deref(),
                    &participant.gamer_tag,
                    entrant.initial_seed_num,
                );
                if let Some(previous) = map.insert(discriminator, record) {
                    log::warn!(
                        "Discriminator {} appears more than once ({} replaced by {})",
                        discriminator,
                        previous.tag,
                        participant.gamer_tag
                    );
                }
            }
        }

        map
    }

    /// Insert a record, replacing any earlier one in place.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, discriminator: &str, record: PlayerRecord) -> Option<PlayerRecord> {
        match self.index.get(discriminator).copied() {
            Some(i) => Some(std::mem::replace(&mut self.players[i].1, record)),
            None => {
                self.index.insert(discriminator.to_string(), self.players.len());
                self.players.push((discriminator.to_string(), record));
                None
            }
        }
    }

    pub fn get(&self, discriminator: &str) -> Option<&PlayerRecord> {
        self.index.get(discriminator).map(|&i| &self.players[i].1)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.players.iter().map(|(d, p)| (d.as_str(), p))
    }
}
