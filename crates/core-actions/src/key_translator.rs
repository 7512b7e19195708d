//! Key token -> `MotionRequest` translation.
//!
//! A token is either a plain motion key (`w`, `g_`, `gg`, `{`) or one of the search
//! prefixes `f F t T` followed by exactly one target character (`fx`, `T;`). The
//! translation is stateless: callers that read keys one at a time keep the prefix
//! themselves and submit the completed token.

use crate::{MotionError, MotionKind, MotionRequest};

/// Catalogue entry for a motion: canonical key plus a human description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionInfo {
    pub kind: MotionKind,
    pub key: &'static str,
    pub description: &'static str,
}

const MOTIONS: [MotionInfo; 27] = [
    info(MotionKind::Left, "h", "Move left"),
    info(MotionKind::Down, "j", "Move down"),
    info(MotionKind::Up, "k", "Move up"),
    info(MotionKind::Right, "l", "Move right"),
    info(MotionKind::WordForward, "w", "Start of next word"),
    info(MotionKind::BigWordForward, "W", "Start of next WORD (space-separated)"),
    info(MotionKind::WordBackward, "b", "Start of current/previous word"),
    info(MotionKind::BigWordBackward, "B", "Start of current/previous WORD"),
    info(MotionKind::WordEnd, "e", "End of next word"),
    info(MotionKind::BigWordEnd, "E", "End of next WORD"),
    info(MotionKind::LineStart, "0", "Start of line"),
    info(MotionKind::LineEnd, "$", "End of line"),
    info(MotionKind::FirstNonBlank, "^", "First non-blank character"),
    info(MotionKind::LastNonBlank, "g_", "Last non-blank character"),
    info(MotionKind::FileStart, "gg", "Top of file"),
    info(MotionKind::FileEnd, "G", "Bottom of file"),
    info(MotionKind::ScreenTop, "H", "Top of screen"),
    info(MotionKind::ScreenMiddle, "M", "Middle of screen"),
    info(MotionKind::ScreenBottom, "L", "Bottom of screen"),
    info(MotionKind::ParagraphPrev, "{", "Previous paragraph"),
    info(MotionKind::ParagraphNext, "}", "Next paragraph"),
    info(MotionKind::SentencePrev, "(", "Previous sentence"),
    info(MotionKind::SentenceNext, ")", "Next sentence"),
    info(MotionKind::FindCharForward, "f", "Find character forward on line"),
    info(MotionKind::FindCharBackward, "F", "Find character backward on line"),
    info(MotionKind::TillCharForward, "t", "Till character forward on line"),
    info(MotionKind::TillCharBackward, "T", "Till character backward on line"),
];

const fn info(kind: MotionKind, key: &'static str, description: &'static str) -> MotionInfo {
    MotionInfo {
        kind,
        key,
        description,
    }
}

/// Every supported motion in display order.
pub fn available_motions() -> &'static [MotionInfo] {
    &MOTIONS
}

impl MotionKind {
    /// Canonical key (search kinds report their prefix only).
    pub fn key(self) -> &'static str {
        lookup(self).key
    }

    pub fn description(self) -> &'static str {
        lookup(self).description
    }

    /// Map a key (or search prefix) to its kind.
    pub fn from_key(key: &str) -> Option<Self> {
        MOTIONS.iter().find(|m| m.key == key).map(|m| m.kind)
    }
}

fn lookup(kind: MotionKind) -> &'static MotionInfo {
    // MOTIONS lists each kind exactly once; covered by `catalogue_covers_every_kind`.
    MOTIONS
        .iter()
        .find(|m| m.kind == kind)
        .unwrap_or(&MOTIONS[0])
}

/// Translate a complete key token into a request.
pub fn translate(token: &str) -> Result<MotionRequest, MotionError> {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return Err(MotionError::UnknownMotion(String::new()));
    };
    if let Some(kind) = search_prefix(first) {
        let rest = chars.as_str();
        let mut rest_chars = rest.chars();
        return match (rest_chars.next(), rest_chars.next()) {
            (None, _) => Err(MotionError::MissingTarget(kind)),
            (Some(target), None) => Ok(MotionRequest::with_target(kind, target)),
            (Some(_), Some(_)) => Err(MotionError::UnknownMotion(token.to_string())),
        };
    }
    let request = MotionKind::from_key(token)
        .map(MotionRequest::new)
        .ok_or_else(|| MotionError::UnknownMotion(token.to_string()));
    tracing::trace!(target: "actions.translate", token, ok = request.is_ok(), "translate_token");
    request
}

fn search_prefix(c: char) -> Option<MotionKind> {
    match c {
        'f' => Some(MotionKind::FindCharForward),
        'F' => Some(MotionKind::FindCharBackward),
        't' => Some(MotionKind::TillCharForward),
        'T' => Some(MotionKind::TillCharBackward),
        _ => None,
    }
}
