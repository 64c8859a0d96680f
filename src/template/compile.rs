//! Single-pass template tokenizer.
//! Keywords are matched once, left to right, on word boundaries; substituted
//! output is never scanned again.

use super::{Field, FormatError, RESERVED_CHARS, SEPARATOR_MARKERS, TemplateToken};

fn is_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

fn starts_word(raw: &str, at: usize) -> bool {
    raw[..at].chars().next_back().is_none_or(is_boundary)
}

/// Longest keyword at the start of `rest` that is followed by a boundary.
fn match_keyword(rest: &str) -> Option<Field> {
    let mut best: Option<Field> = None;
    for field in Field::ALL {
        let kw = field.keyword();
        if !rest.starts_with(kw) {
            continue;
        }
        if !rest[kw.len()..].chars().next().is_none_or(is_boundary) {
            continue;
        }
        if best.is_none_or(|b| kw.len() > b.keyword().len()) {
            best = Some(field);
        }
    }
    best
}

fn flush(literal: &mut String, tokens: &mut Vec<TemplateToken>) {
    if !literal.is_empty() {
        tokens.push(TemplateToken::Literal(std::mem::take(literal)));
    }
}

pub(super) fn tokenize(raw: &str) -> Result<Vec<TemplateToken>, FormatError> {
    let mut tokens: Vec<TemplateToken> = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < raw.len() {
        let rest = &raw[i..];

        if let Some(marker) = SEPARATOR_MARKERS.iter().find(|m| rest.starts_with(**m)) {
            flush(&mut literal, &mut tokens);
            if matches!(tokens.last(), None | Some(TemplateToken::PathSeparator)) {
                return Err(FormatError::EmptyPathSegment { offset: i });
            }
            tokens.push(TemplateToken::PathSeparator);
            i += marker.len();
            continue;
        }

        if starts_word(raw, i)
            && let Some(field) = match_keyword(rest)
        {
            flush(&mut literal, &mut tokens);
            tokens.push(TemplateToken::FieldRef(field));
            i += field.keyword().len();
            continue;
        }

        let Some(ch) = rest.chars().next() else { break };
        if RESERVED_CHARS.contains(&ch) {
            return Err(FormatError::ReservedCharacter { ch, offset: i });
        }
        literal.push(ch);
        i += ch.len_utf8();
    }
    flush(&mut literal, &mut tokens);

    if matches!(tokens.last(), Some(TemplateToken::PathSeparator)) {
        return Err(FormatError::EmptyPathSegment { offset: raw.len() });
    }
    if !tokens.iter().any(|t| matches!(t, TemplateToken::FieldRef(_))) {
        return Err(FormatError::NoFieldKeyword);
    }
    Ok(tokens)
}
