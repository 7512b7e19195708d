//! Character classification for word and sentence boundaries.
//!
//! The categories follow vim's `iskeyword` default restricted to ASCII:
//! - `hello_world` is ONE word (underscore is a word character)
//! - `foo->bar` is THREE words: `foo`, `->`, `bar`
//! - `café` is two words: `caf` and `é` (non-ASCII code points are punctuation)

/// Character categories for word motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII letters, digits and underscore.
    Word,
    /// ASCII space and tab. Rows never contain newlines.
    Space,
    /// Everything else.
    Punct,
}

pub fn classify(c: char) -> CharClass {
    if c.is_ascii_alphanumeric() || c == '_' {
        CharClass::Word
    } else if c == ' ' || c == '\t' {
        CharClass::Space
    } else {
        CharClass::Punct
    }
}

pub fn is_space(c: char) -> bool {
    classify(c) == CharClass::Space
}

/// Sentence terminators for `(` and `)`.
pub fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}
