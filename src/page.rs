//! Which background a page gets.

use crate::effect::EffectKind;

/// `localStorage` key holding the visitor's background choice.
pub const PREFERENCE_KEY: &str = "backgroundType";
/// Query-string flag that forces the squares background.
pub const SQUARES_QUERY_FLAG: &str = "bg=squares";
/// Pages that keep a plain background unless squares are requested.
pub const PLAIN_PAGES: [&str; 3] = ["login.html", "signup.html", "dashboard.html"];

/// What the page knows about itself when deciding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub path: String,
    pub query: String,
    pub stored_preference: Option<String>,
}

/// Squares win when asked for by query or stored preference; otherwise every
/// page except the plain ones gets the letter glitch.
pub fn select_background(signals: &PageSignals) -> Option<EffectKind> {
    let squares_requested = signals.query.contains(SQUARES_QUERY_FLAG)
        || signals.stored_preference.as_deref() == Some("squares");
    if squares_requested {
        return Some(EffectKind::Squares);
    }
    if PLAIN_PAGES.iter().any(|page| signals.path.contains(page)) {
        return None;
    }
    Some(EffectKind::LetterGlitch)
}
