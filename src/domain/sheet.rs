//! Sheet notation tokenizer
//!
//! A sheet is plain text made of whitespace-separated tokens:
//! - `[...]` is a chord, its keys are pressed together
//! - anything else is a run, its keys are pressed one after another
//!
//! A chord only exists when the closing `]` appears before the next
//! whitespace. An unterminated `[` is an ordinary run character.

/// A single unit of playback produced by [`tokenize`]
///
/// Both variants hold the token text verbatim, so a chord keeps its
/// surrounding brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Keys pressed simultaneously, e.g. `[tu]`
    Chord(String),
    /// Keys pressed sequentially, e.g. `tyu`
    Run(String),
}

impl Token {
    /// Returns the token exactly as it appeared in the sheet
    pub fn text(&self) -> &str {
        match self {
            Token::Chord(text) | Token::Run(text) => text,
        }
    }

    /// Returns the keys this token plays
    ///
    /// For a chord this is the text between the outer brackets.
    pub fn keys(&self) -> &str {
        match self {
            Token::Chord(text) => &text[1..text.len() - 1],
            Token::Run(text) => text,
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, Token::Chord(_))
    }
}

/// Splits sheet text into tokens in left-to-right order
///
/// Whitespace (newlines included) only separates tokens and never shows up
/// in the output. Empty or whitespace-only input yields an empty vector.
///
/// # Examples
/// ```rust
/// let tokens = tokenize("[ab] c");
/// assert_eq!(tokens[0], Token::Chord("[ab]".to_string()));
/// assert_eq!(tokens[1], Token::Run("c".to_string()));
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let token = match chord_len(rest) {
            Some(len) => Token::Chord(rest[..len].to_string()),
            None => Token::Run(rest[..run_len(rest)].to_string()),
        };
        rest = &rest[token.text().len()..];
        tokens.push(token);
    }

    tokens
}

/// Byte length of a chord at the start of `text`, if one starts there
///
/// Requires `[`, at least one key, then `]`, all before any whitespace.
fn chord_len(text: &str) -> Option<usize> {
    let inner = text.strip_prefix('[')?;
    for (offset, ch) in inner.char_indices() {
        if ch.is_whitespace() {
            return None;
        }
        if ch == ']' {
            // "[]" has nothing to press
            return (offset > 0).then_some(offset + 2);
        }
    }
    None
}

/// Byte length of the non-whitespace run at the start of `text`
fn run_len(text: &str) -> usize {
    text.find(char::is_whitespace).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn splits_runs_on_whitespace() {
        let tokens = tokenize("a b");
        assert_eq!(tokens, vec![Token::Run("a".into()), Token::Run("b".into())]);
    }

    #[test]
    fn recognizes_chords() {
        let tokens = tokenize("[ab] c");
        assert_eq!(
            tokens,
            vec![Token::Chord("[ab]".into()), Token::Run("c".into())]
        );
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  \r\n").is_empty());
    }

    #[test]
    fn newlines_separate_tokens() {
        let tokens = tokenize("tyu\n[eh]  o\r\n\np");
        assert_eq!(texts(&tokens), vec!["tyu", "[eh]", "o", "p"]);
    }

    #[test]
    fn chord_keeps_delimiters_and_exposes_inner_keys() {
        let tokens = tokenize("[qet] [8]");
        assert_eq!(texts(&tokens), vec!["[qet]", "[8]"]);
        assert_eq!(tokens[0].keys(), "qet");
        assert_eq!(tokens[1].keys(), "8");
        assert!(tokens.iter().all(Token::is_chord));
    }

    #[test]
    fn chord_ends_at_first_closing_bracket() {
        let tokens = tokenize("[ab]c");
        assert_eq!(
            tokens,
            vec![Token::Chord("[ab]".into()), Token::Run("c".into())]
        );

        let tokens = tokenize("[a]]");
        assert_eq!(texts(&tokens), vec!["[a]", "]"]);
    }

    #[test]
    fn brackets_inside_a_run_stay_in_the_run() {
        let tokens = tokenize("x[ab]");
        assert_eq!(tokens, vec![Token::Run("x[ab]".into())]);
    }

    #[test]
    fn unterminated_bracket_falls_back_to_run() {
        let tokens = tokenize("[ab");
        assert_eq!(tokens, vec![Token::Run("[ab".into())]);

        // The closing bracket must come before the next whitespace
        let tokens = tokenize("[a b]");
        assert_eq!(
            tokens,
            vec![Token::Run("[a".into()), Token::Run("b]".into())]
        );
    }

    #[test]
    fn empty_brackets_are_a_run() {
        let tokens = tokenize("[] a");
        assert_eq!(
            tokens,
            vec![Token::Run("[]".into()), Token::Run("a".into())]
        );
    }

    #[test]
    fn run_keys_are_the_text_itself() {
        let tokens = tokenize("tyu");
        assert_eq!(tokens[0].keys(), "tyu");
        assert!(!tokens[0].is_chord());
    }

    #[test]
    fn handles_multibyte_characters() {
        let tokens = tokenize("[éü] ñ");
        assert_eq!(texts(&tokens), vec!["[éü]", "ñ"]);
        assert_eq!(tokens[0].keys(), "éü");
    }
}
