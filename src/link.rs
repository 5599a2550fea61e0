//! Classification of user supplied start.gg links into slugs

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    // Event slugs contain a tournament slug, so this one is tried first.
    static ref EVENT_SLUG: Regex =
        Regex::new(r"tournament/[a-zA-Z0-9\-]+/event/[a-zA-Z0-9\-]+").unwrap();
    static ref TOURNAMENT_SLUG: Regex = Regex::new(r"tournament/[a-zA-Z0-9\-]+").unwrap();
    static ref SHORTHAND_SLUG: Regex = Regex::new(r"start\.gg/([a-zA-Z0-9\-]+)").unwrap();
}

/// What a link points at, along with the slug the API expects for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// `tournament/<slug>/event/<slug>`
    EventSlug(String),
    /// `tournament/<slug>`
    TournamentSlug(String),
    /// A tournament's short URL name, e.g. `evo`
    ShorthandSlug(String),
}

impl LinkKind {
    pub fn slug(&self) -> &str {
        match self {
            LinkKind::EventSlug(s) | LinkKind::TournamentSlug(s) | LinkKind::ShorthandSlug(s) => s,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, LinkKind::EventSlug(_))
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::EventSlug(s) => write!(f, "event slug {}", s),
            LinkKind::TournamentSlug(s) => write!(f, "tournament slug {}", s),
            LinkKind::ShorthandSlug(s) => write!(f, "shorthand slug {}", s),
        }
    }
}

/// Classify a link or bare slug.
///
/// Never fails: anything that matches no known URL shape is assumed to be a
/// bare shorthand and returned unchanged. Nothing is checked against the API
/// here, so a bad link only surfaces once it is queried.
pub fn classify(raw: &str) -> LinkKind {
    if let Some(m) = EVENT_SLUG.find(raw) {
        return LinkKind::EventSlug(m.as_str().to_string());
    }

    if let Some(m) = TOURNAMENT_SLUG.find(raw) {
        return LinkKind::TournamentSlug(m.as_str().to_string());
    }

    if let Some(caps) = SHORTHAND_SLUG.captures(raw) {
        return LinkKind::ShorthandSlug(caps[1].to_string());
    }

    LinkKind::ShorthandSlug(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_event_link() {
        assert_eq!(
            classify("start.gg/tournament/evo-2023/event/guilty-gear-strive"),
            LinkKind::EventSlug("tournament/evo-2023/event/guilty-gear-strive".to_string())
        );
    }

    #[test]
    fn test_classify_full_url_with_trailing_path() {
        let kind = classify("https://www.start.gg/tournament/genesis-10/event/melee-singles/overview");
        assert_eq!(
            kind,
            LinkKind::EventSlug("tournament/genesis-10/event/melee-singles".to_string())
        );
        assert!(kind.is_event());
    }

    #[test]
    fn test_classify_tournament_link() {
        assert_eq!(
            classify("start.gg/tournament/evo-2023"),
            LinkKind::TournamentSlug("tournament/evo-2023".to_string())
        );
        assert_eq!(
            classify("https://start.gg/tournament/evo-2023/details"),
            LinkKind::TournamentSlug("tournament/evo-2023".to_string())
        );
    }

    #[test]
    fn test_classify_shorthand_link() {
        assert_eq!(classify("start.gg/evo"), LinkKind::ShorthandSlug("evo".to_string()));
        assert_eq!(
            classify("https://start.gg/evo"),
            LinkKind::ShorthandSlug("evo".to_string())
        );
    }

    #[test]
    fn test_classify_bare_input() {
        assert_eq!(classify("evo"), LinkKind::ShorthandSlug("evo".to_string()));
    }

    #[test]
    fn test_classify_is_total() {
        for raw in ["", " ", "tournament/", "start.gg/", "???", "event/x", "ünïcødé/🎮"] {
            let kind = classify(raw);
            assert_eq!(kind, LinkKind::ShorthandSlug(raw.to_string()), "input {:?}", raw);
        }
    }

    #[test]
    fn test_slug_accessor() {
        assert_eq!(classify("start.gg/tournament/evo-2023").slug(), "tournament/evo-2023");
        assert_eq!(classify("start.gg/evo").slug(), "evo");
    }
}
