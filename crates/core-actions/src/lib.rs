//! Motion requests, cursor state and the motion dispatcher.
//!
//! `core-text` supplies the per-motion algorithms; this crate owns the closed set of
//! motion kinds, the request/response value types and the single entry point
//! [`compute_motion`] that dispatches on the kind and applies the preferred-column
//! rules. Key tokens (`w`, `gg`, `fx`) are translated into typed requests at the edge by
//! [`key_translator`]; nothing past that point ever inspects a string.

use core_text::Position;
use std::fmt;

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::compute_motion;
pub use key_translator::{MotionInfo, available_motions};

/// Every motion the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    WordForward,
    BigWordForward,
    WordBackward,
    BigWordBackward,
    WordEnd,
    BigWordEnd,
    LineStart,
    LineEnd,
    FirstNonBlank,
    LastNonBlank,
    FileStart,
    FileEnd,
    ScreenTop,
    ScreenMiddle,
    ScreenBottom,
    ParagraphPrev,
    ParagraphNext,
    SentencePrev,
    SentenceNext,
    FindCharForward,
    FindCharBackward,
    TillCharForward,
    TillCharBackward,
}

impl MotionKind {
    pub const ALL: [MotionKind; 27] = [
        MotionKind::Left,
        MotionKind::Right,
        MotionKind::Up,
        MotionKind::Down,
        MotionKind::WordForward,
        MotionKind::BigWordForward,
        MotionKind::WordBackward,
        MotionKind::BigWordBackward,
        MotionKind::WordEnd,
        MotionKind::BigWordEnd,
        MotionKind::LineStart,
        MotionKind::LineEnd,
        MotionKind::FirstNonBlank,
        MotionKind::LastNonBlank,
        MotionKind::FileStart,
        MotionKind::FileEnd,
        MotionKind::ScreenTop,
        MotionKind::ScreenMiddle,
        MotionKind::ScreenBottom,
        MotionKind::ParagraphPrev,
        MotionKind::ParagraphNext,
        MotionKind::SentencePrev,
        MotionKind::SentenceNext,
        MotionKind::FindCharForward,
        MotionKind::FindCharBackward,
        MotionKind::TillCharForward,
        MotionKind::TillCharBackward,
    ];

    /// The four character-search kinds carry a target character.
    pub fn needs_target(self) -> bool {
        matches!(
            self,
            MotionKind::FindCharForward
                | MotionKind::FindCharBackward
                | MotionKind::TillCharForward
                | MotionKind::TillCharBackward
        )
    }

    /// Vertical kinds keep the caller's preferred column instead of resetting it.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            MotionKind::Up
                | MotionKind::Down
                | MotionKind::ScreenTop
                | MotionKind::ScreenMiddle
                | MotionKind::ScreenBottom
        )
    }

    /// Stable kebab-case name used in logs and messages.
    pub fn name(self) -> &'static str {
        match self {
            MotionKind::Left => "left",
            MotionKind::Right => "right",
            MotionKind::Up => "up",
            MotionKind::Down => "down",
            MotionKind::WordForward => "word-forward",
            MotionKind::BigWordForward => "WORD-forward",
            MotionKind::WordBackward => "word-backward",
            MotionKind::BigWordBackward => "WORD-backward",
            MotionKind::WordEnd => "word-end",
            MotionKind::BigWordEnd => "WORD-end",
            MotionKind::LineStart => "line-start",
            MotionKind::LineEnd => "line-end",
            MotionKind::FirstNonBlank => "first-non-blank",
            MotionKind::LastNonBlank => "last-non-blank",
            MotionKind::FileStart => "file-start",
            MotionKind::FileEnd => "file-end",
            MotionKind::ScreenTop => "screen-top",
            MotionKind::ScreenMiddle => "screen-middle",
            MotionKind::ScreenBottom => "screen-bottom",
            MotionKind::ParagraphPrev => "paragraph-prev",
            MotionKind::ParagraphNext => "paragraph-next",
            MotionKind::SentencePrev => "sentence-prev",
            MotionKind::SentenceNext => "sentence-next",
            MotionKind::FindCharForward => "find-char-forward",
            MotionKind::FindCharBackward => "find-char-backward",
            MotionKind::TillCharForward => "till-char-forward",
            MotionKind::TillCharBackward => "till-char-backward",
        }
    }
}

impl fmt::Display for MotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-contract violations. Boundary and no-match conditions are never errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MotionError {
    #[error("invalid request: unknown motion `{0}`")]
    UnknownMotion(String),
    #[error("invalid request: {0} requires a target character")]
    MissingTarget(MotionKind),
}

/// A motion kind plus the target character required by the search kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionRequest {
    pub kind: MotionKind,
    pub target: Option<char>,
}

impl MotionRequest {
    pub fn new(kind: MotionKind) -> Self {
        Self { kind, target: None }
    }

    pub fn with_target(kind: MotionKind, target: char) -> Self {
        Self {
            kind,
            target: Some(target),
        }
    }

    /// Parse a key token such as `w`, `g_` or `fx`.
    pub fn parse(token: &str) -> Result<Self, MotionError> {
        key_translator::translate(token)
    }
}

impl From<MotionKind> for MotionRequest {
    fn from(kind: MotionKind) -> Self {
        Self::new(kind)
    }
}

/// Cursor position plus the column vertical motions try to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorState {
    pub position: Position,
    pub preferred_col: isize,
}

impl CursorState {
    pub fn new(row: isize, col: isize, preferred_col: isize) -> Self {
        Self {
            position: Position::new(row, col),
            preferred_col,
        }
    }

    /// Cursor at `position` whose preferred column matches its column.
    pub fn at(position: Position) -> Self {
        Self {
            position,
            preferred_col: position.col,
        }
    }
}

/// Outcome of one motion. An invalid result must be discarded by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionResult {
    pub position: Position,
    pub preferred_col: isize,
    pub is_valid: bool,
}

impl MotionResult {
    pub fn row(&self) -> isize {
        self.position.row
    }

    pub fn col(&self) -> isize {
        self.position.col
    }

    /// The cursor to commit, or `None` when the motion fell outside the grid.
    pub fn cursor(&self) -> Option<CursorState> {
        self.is_valid.then_some(CursorState {
            position: self.position,
            preferred_col: self.preferred_col,
        })
    }
}
