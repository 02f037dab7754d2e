/// What a character is, as far as stroke playback cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Has stroke-order data worth playing (kanji and anything else not excluded below).
    Ideograph,
    /// Hiragana block.
    Hiragana,
    /// Katakana, its phonetic extensions, and half-width forms.
    Katakana,
    /// Any Unicode whitespace.
    Whitespace,
    /// ASCII, CJK, full-width, or general punctuation.
    Punctuation,
}

impl CharClass {
    /// Whether characters of this class are played.
    pub fn is_playable(self) -> bool {
        self == Self::Ideograph
    }
}

/// Classify `c` for sequence filtering.
pub fn classify(c: char) -> CharClass {
    match c {
        '\u{3040}'..='\u{309F}' => CharClass::Hiragana,
        '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
            CharClass::Katakana
        }
        c if c.is_whitespace() => CharClass::Whitespace,
        c if c.is_ascii_punctuation() => CharClass::Punctuation,
        // Iteration marks, shime, and ideographic zero carry strokes of their own.
        '\u{3005}'..='\u{3007}' | '\u{303B}' => CharClass::Ideograph,
        '\u{3000}'..='\u{303F}' | '\u{2000}'..='\u{206F}' => CharClass::Punctuation,
        c if is_fullwidth_punctuation(c) => CharClass::Punctuation,
        _ => CharClass::Ideograph,
    }
}

/// Characters of `text` that get played, in order. Duplicates are kept.
pub fn playable_characters(text: &str) -> Vec<char> {
    text.chars().filter(|&c| classify(c).is_playable()).collect()
}

/// Punctuation in the Halfwidth and Fullwidth Forms block (U+FF00..=U+FF65), i.e. the full-width
/// twins of ASCII punctuation plus the half-width CJK brackets and marks.
fn is_fullwidth_punctuation(c: char) -> bool {
    match c {
        '\u{FF01}'..='\u{FF0F}'
        | '\u{FF1A}'..='\u{FF20}'
        | '\u{FF3B}'..='\u{FF40}'
        | '\u{FF5B}'..='\u{FF65}' => true,
        _ => false,
    }
}
