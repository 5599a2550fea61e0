use super::id::{deserialize_id, null_as_empty};
use crate::fetch::PageNode;
use serde::Deserialize;

/// Selection set for one entrant node in a paginated entrant query
pub const ENTRANT_FIELDS: &str = "id initialSeedNum participants { id gamerTag prefix user { discriminator } }";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    /// `None` when the entrant has not been seeded
    pub initial_seed_num: Option<u32>,
    /// One per player; teams have several
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub gamer_tag: String,
    pub prefix: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub discriminator: Option<String>,
}

impl Participant {
    /// The player's unique user discriminator, if they have a linked account
    pub fn discriminator(&self) -> Option<&str> {
        self.user.as_ref()?.discriminator.as_deref()
    }
}

impl PageNode for Entrant {
    fn node_id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_entrant() {
        let entrant: Entrant = serde_json::from_value(json!({
            "id": 1001,
            "initialSeedNum": 3,
            "participants": [
                { "id": 5, "gamerTag": "bar", "prefix": "foo", "user": { "discriminator": "abc123" } },
                { "id": 6, "gamerTag": "solo", "prefix": null, "user": null }
            ]
        }))
        .unwrap();

        assert_eq!(entrant.node_id(), 1001);
        assert_eq!(entrant.initial_seed_num, Some(3));
        assert_eq!(entrant.participants[0].discriminator(), Some("abc123"));
        assert_eq!(entrant.participants[1].discriminator(), None);
    }

    #[test]
    fn test_unseeded_entrant() {
        let entrant: Entrant = serde_json::from_value(json!({
            "id": "1002", "initialSeedNum": null, "participants": null
        }))
        .unwrap();
        assert_eq!(entrant.initial_seed_num, None);
        assert!(entrant.participants.is_empty());
    }

    #[test]
    fn test_missing_gamer_tag_is_rejected() {
        let result = serde_json::from_value::<Entrant>(json!({
            "id": 1, "initialSeedNum": 1,
            "participants": [{ "id": 2, "prefix": "", "user": null }]
        }));
        assert!(result.is_err());
    }
}
