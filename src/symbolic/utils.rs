// the collection of utility functions for parenthesis scanning over a char slice.
// All ranges are half-open char ranges [start, end) of the whitespace-stripped source.
use crate::symbolic::errors::{ParseError, ParseErrorKind};

/// Finds the first top-level parenthesis group of `s[start..end]` by a nesting-depth scan.
/// Returns the positions of the opening and the matching closing parenthesis.
pub fn find_highest_parenthesis(
    s: &[char],
    start: usize,
    end: usize,
) -> Result<Option<(usize, usize)>, ParseError> {
    let mut open: Option<usize> = None;
    let mut depth: usize = 0;
    for i in start..end {
        match s[i] {
            '(' => {
                if open.is_none() {
                    open = Some(i);
                }
                depth += 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(ParseError::new(ParseErrorKind::UnmatchedParenthesis, s, i));
                }
                depth -= 1;
                if depth == 0 {
                    // open is always set once depth went above zero
                    return Ok(open.map(|o| (o, i)));
                }
            }
            _ => {}
        }
    }
    match open {
        Some(o) => Err(ParseError::new(ParseErrorKind::UnmatchedParenthesis, s, o)),
        None => Ok(None),
    }
}

/// Repeatedly strips one pair of parentheses while it wraps the whole range.
pub fn trim_parentheses(
    s: &[char],
    mut start: usize,
    mut end: usize,
) -> Result<(usize, usize), ParseError> {
    while let Some((open, close)) = find_highest_parenthesis(s, start, end)? {
        if open == start && close + 1 == end {
            start += 1;
            end -= 1;
        } else {
            break;
        }
    }
    Ok((start, end))
}

/// Every top-level parenthesis group of the range, left to right. Also validates that no
/// parenthesis of the range is unmatched.
pub fn top_level_groups(
    s: &[char],
    start: usize,
    end: usize,
) -> Result<Vec<(usize, usize)>, ParseError> {
    let mut groups = Vec::new();
    let mut from = start;
    while let Some((open, close)) = find_highest_parenthesis(s, from, end)? {
        groups.push((open, close));
        from = close + 1;
    }
    Ok(groups)
}

/// Splits the interior `s[start..end]` of a function call on its top-level commas.
/// A parameter left empty (leading, trailing or doubled comma, or no content at all)
/// is an `EmptyParameter` error.
pub fn split_parameters(
    s: &[char],
    start: usize,
    end: usize,
) -> Result<Vec<(usize, usize)>, ParseError> {
    if start == end {
        return Err(ParseError::new(ParseErrorKind::EmptyParameter, s, start));
    }
    let groups = top_level_groups(s, start, end)?;
    let mut parameters = Vec::new();
    let mut last = start;
    let mut i = start;
    while i < end {
        if let Some(&(_, close)) = groups.iter().find(|(open, _)| *open == i) {
            i = close + 1;
            continue;
        }
        if s[i] == ',' {
            if i == last || i + 1 == end {
                return Err(ParseError::new(ParseErrorKind::EmptyParameter, s, i));
            }
            parameters.push((last, i));
            last = i + 1;
        }
        i += 1;
    }
    parameters.push((last, end));
    Ok(parameters)
}
