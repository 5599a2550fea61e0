//! Picking and printing the players worth mentioning

use crate::model::{PlayerMap, PlayerRecord};
use std::collections::HashSet;

/// Players seeded at or above `seed_cutoff`, plus anyone on the allow list.
///
/// Sorted by seed; unseeded (allow-listed) players go last. Players sharing
/// a seed keep their order in `players`.
pub fn build_preview<'a>(
    players: &'a PlayerMap,
    allow_list: &HashSet<String>,
    seed_cutoff: u32,
) -> Vec<&'a PlayerRecord> {
    let mut selected: Vec<&PlayerRecord> = players
        .iter()
        .filter(|(discriminator, player)| {
            player.seed.is_some_and(|seed| seed <= seed_cutoff) || allow_list.contains(*discriminator)
        })
        .map(|(_, player)| player)
        .collect();

    selected.sort_by_key(|player| (player.seed.is_none(), player.seed));
    selected
}

/// One comma separated line of `prefix|tag` tokens
pub fn render_preview(players: &[&PlayerRecord]) -> String {
    players
        .iter()
        .map(|player| player.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Option<&str>, &str, Option<u32>)]) -> PlayerMap {
        let mut players = PlayerMap::new();
        for &(discriminator, prefix, tag, seed) in entries {
            players.insert(discriminator, PlayerRecord::new(prefix, tag, seed));
        }
        players
    }

    fn allow(discriminators: &[&str]) -> HashSet<String> {
        discriminators.iter().map(|d| d.to_string()).collect()
    }

    fn tags(preview: &[&PlayerRecord]) -> Vec<String> {
        preview.iter().map(|p| p.tag.clone()).collect()
    }

    #[test]
    fn test_cutoff_and_allow_list() {
        let players = map(&[
            ("a", None, "A", Some(3)),
            ("b", None, "B", Some(20)),
            ("c", None, "C", Some(1)),
        ]);

        let preview = build_preview(&players, &allow(&["b"]), 5);
        assert_eq!(tags(&preview), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let players = map(&[("a", None, "A", Some(16)), ("b", None, "B", Some(17))]);
        let preview = build_preview(&players, &HashSet::new(), 16);
        assert_eq!(tags(&preview), vec!["A"]);
    }

    #[test]
    fn test_unseeded_players() {
        let players = map(&[
            ("u1", None, "Unseeded", None),
            ("s2", None, "Second", Some(2)),
            ("u2", None, "Listed", None),
            ("s1", None, "First", Some(1)),
        ]);

        let preview = build_preview(&players, &allow(&["u2"]), 8);
        assert_eq!(tags(&preview), vec!["First", "Second", "Listed"]);
    }

    #[test]
    fn test_shared_seed_keeps_map_order() {
        let players = map(&[
            ("x", None, "Second", Some(4)),
            ("y", None, "First", Some(1)),
            ("z", None, "Partner", Some(4)),
        ]);
        let preview = build_preview(&players, &HashSet::new(), 4);
        assert_eq!(tags(&preview), vec!["First", "Second", "Partner"]);
    }

    #[test]
    fn test_allow_list_is_exact_match() {
        let players = map(&[("Abc", None, "Case", Some(99)), ("abc ", None, "Space", Some(98))]);
        let preview = build_preview(&players, &allow(&["abc"]), 1);
        assert!(preview.is_empty());
    }

    #[test]
    fn test_render() {
        let players = map(&[
            ("a", Some("foo"), "bar", Some(1)),
            ("b", Some(""), "baz", Some(2)),
            ("c", None, "qux", Some(3)),
        ]);
        let preview = build_preview(&players, &HashSet::new(), 3);
        assert_eq!(render_preview(&preview), "foo|bar,baz,qux");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_preview(&[]), "");
    }
}
