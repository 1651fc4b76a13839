//! Selector tokenizer
//!
//! Splits selector text into identifiers, punctuation (`[`, `]`, `=`, `.`,
//! `>`, `,`), attribute values and a single-space token standing for the
//! descendant relationship. Double quotes only delimit values and are never
//! emitted.

/// Token standing for the descendant relationship
pub(crate) const DESCENDANT: &str = " ";

fn flush(buffer: &mut String, tokens: &mut Vec<String>) {
    if !buffer.is_empty() {
        tokens.push(std::mem::take(buffer));
    }
}

/// Split selector text into tokens
pub fn tokenize(selector: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut lookbehind: Option<char> = None;

    for ch in selector.chars() {
        match ch {
            ']' | ',' | '>' | '=' => {
                // `foo ]` and `foo > bar`: the space was formatting, not a relationship
                if lookbehind == Some(' ') && tokens.last().is_some_and(|t| t == DESCENDANT) {
                    tokens.pop();
                }
                flush(&mut buffer, &mut tokens);
                tokens.push(ch.to_string());
            }
            ' ' => {
                let after_punctuation = matches!(lookbehind, Some('[' | '=' | ',' | '>'));
                let repeated = lookbehind == Some(' ');
                if !after_punctuation && !repeated {
                    flush(&mut buffer, &mut tokens);
                    tokens.push(DESCENDANT.to_string());
                }
            }
            '"' => flush(&mut buffer, &mut tokens),
            '[' | '.' => {
                flush(&mut buffer, &mut tokens);
                tokens.push(ch.to_string());
            }
            _ => buffer.push(ch),
        }
        lookbehind = Some(ch);
    }
    flush(&mut buffer, &mut tokens);

    tokens
}
