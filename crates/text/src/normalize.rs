//! Text normalization: case folding and punctuation splitting.

/// Normalizes raw text into an ordered token sequence.
///
/// Rules, applied line by line:
///
/// - words are lower-cased;
/// - maximal alphabetic runs become word tokens;
/// - every other non-whitespace character becomes its own single-character
///   token, in place;
/// - blank lines contribute nothing.
///
/// # Example
///
/// ```
/// use calliope_text::normalize;
///
/// let tokens = normalize("Why, it is easy!");
/// assert_eq!(tokens, ["why", ",", "it", "is", "easy", "!"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in text.lines() {
        for word in line.split_whitespace() {
            tokenize_word(word, &mut tokens);
        }
    }
    tokens
}

/// Splits one whitespace-delimited word into lower-cased tokens, appending
/// them to `tokens`.
fn tokenize_word(word: &str, tokens: &mut Vec<String>) {
    let mut current = String::new();
    for ch in word.chars() {
        if ch.is_alphabetic() {
            current.extend(ch.to_lowercase());
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(ch.to_string());
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
}
