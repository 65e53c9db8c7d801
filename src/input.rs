//! Raw text field parsing. The core only ever sees validated integers; every
//! malformed field is turned into a [`GameError`] here.

use crate::error::{GameError, GameResult};

/// Parse an index field. Leading digits win, so `"3abc"` reads as 3 the way a
/// lenient browser `parseInt` would; anything without a leading number fails.
pub fn parse_index(field: &'static str, raw: &str) -> GameResult<usize> {
    let n = parse_int(raw).ok_or_else(|| GameError::Parse { field, input: raw.to_string() })?;
    // Negative indices are out of bounds whatever the array length.
    usize::try_from(n).map_err(|_| GameError::Range { index: n, len: 0 })
}

/// Parse a digit field (0-9).
pub fn parse_digit(field: &'static str, raw: &str) -> GameResult<u8> {
    let n = parse_int(raw).ok_or_else(|| GameError::Parse { field, input: raw.to_string() })?;
    to_digit(n)
}

/// Parse `"1, 4, 9"` into a search pattern.
pub fn parse_pattern(raw: &str) -> GameResult<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GameError::PatternLength);
    }
    let numbers = trimmed
        .split(',')
        .map(|part| parse_int(part).ok_or_else(|| GameError::PatternFormat { input: raw.to_string() }))
        .collect::<GameResult<Vec<i64>>>()?;
    numbers.into_iter().map(to_digit).collect()
}

fn to_digit(n: i64) -> GameResult<u8> {
    u8::try_from(n)
        .ok()
        .filter(|d| *d <= 9)
        .ok_or(GameError::Digit { value: n })
}

/// Optional sign followed by at least one ASCII digit; trailing text ignored.
fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_parsing() {
        assert_eq!(parse_index("index", "3"), Ok(3));
        assert_eq!(parse_index("index", " 7 "), Ok(7));
        assert_eq!(parse_index("index", "3abc"), Ok(3));
        assert!(matches!(parse_index("index", ""), Err(GameError::Parse { .. })));
        assert!(matches!(parse_index("index", "abc"), Err(GameError::Parse { .. })));
        assert!(matches!(parse_index("index", "-1"), Err(GameError::Range { index: -1, .. })));
    }

    #[test]
    fn digit_parsing() {
        assert_eq!(parse_digit("value", "5"), Ok(5));
        assert_eq!(parse_digit("value", "12"), Err(GameError::Digit { value: 12 }));
        assert_eq!(parse_digit("value", "-2"), Err(GameError::Digit { value: -2 }));
        assert!(matches!(parse_digit("value", "x"), Err(GameError::Parse { field: "value", .. })));
    }

    #[test]
    fn pattern_parsing() {
        assert_eq!(parse_pattern("1,4"), Ok(vec![1, 4]));
        assert_eq!(parse_pattern(" 3 , 1 ,7 "), Ok(vec![3, 1, 7]));
        assert_eq!(parse_pattern("   "), Err(GameError::PatternLength));
        assert!(matches!(parse_pattern("1,,2"), Err(GameError::PatternFormat { .. })));
        assert!(matches!(parse_pattern("1,a"), Err(GameError::PatternFormat { .. })));
        assert_eq!(parse_pattern("1,10"), Err(GameError::Digit { value: 10 }));
    }
}
