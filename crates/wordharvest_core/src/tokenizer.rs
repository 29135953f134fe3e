use wordharvest_logging::harvest_warn;

use crate::WordPattern;

/// Letters that are dropped when they stand alone between whitespace.
const NOISE_LETTERS: [char; 6] = ['E', 'U', 'Y', 'e', 'u', 'y'];

/// Extract every token matching `pattern` from `text`, in text order.
///
/// The text is padded with a space on each side so boundary lookarounds can
/// match at the edges, and `\'` sequences are turned into plain apostrophes.
/// Duplicates are kept. Case is lowered unless `preserve_case` is set.
pub fn tokenize(text: &str, pattern: &WordPattern, preserve_case: bool) -> Vec<String> {
    let padded = format!(" {} ", text.replace("\\'", "'"));

    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < padded.len() {
        let found = match pattern.regex().find_from_pos(&padded, pos) {
            Ok(Some(found)) => found,
            Ok(None) => break,
            Err(err) => {
                // Usually the backtrack limit on a very long letter run.
                harvest_warn!("skipping text after byte {} that could not be matched: {}", pos, err);
                match next_boundary(&padded, pos) {
                    Some(next) => {
                        pos = next;
                        continue;
                    }
                    None => break,
                }
            }
        };
        pos = if found.end() > found.start() {
            found.end()
        } else {
            found.end() + padded[found.end()..].chars().next().map_or(1, char::len_utf8)
        };

        let token = found.as_str();
        if token.is_empty() || is_isolated_noise(&padded, found.start(), found.end()) {
            continue;
        }
        if preserve_case {
            tokens.push(token.to_string());
        } else {
            tokens.push(token.to_lowercase());
        }
    }
    tokens
}

/// Byte offset of the next character after `pos` that may precede a word.
fn next_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..]
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c.is_whitespace() || c == '(')
        .map(|(offset, _)| pos + offset)
}

fn is_isolated_noise(text: &str, start: usize, end: usize) -> bool {
    let token = &text[start..end];
    let mut chars = token.chars();
    let is_noise_letter = matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if NOISE_LETTERS.contains(&c)
    );
    if !is_noise_letter {
        return false;
    }
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    matches!(
        (before, after),
        (Some(b), Some(a)) if b.is_whitespace() && a.is_whitespace()
    )
}
