//! Local click commands
//!
//! A click is typed as `<layer> <row> <column>`; commas work as separators too.

use shared::Position;

/// Parses one click command, returning `None` for anything that is not three indices
pub fn parse_click(line: &str) -> Option<Position> {
    let mut indices = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<usize>);

    let layer = indices.next()?.ok()?;
    let row = indices.next()?.ok()?;
    let column = indices.next()?.ok()?;

    if indices.next().is_some() {
        return None;
    }

    Some(Position::new(layer, row, column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_click("0 3 14"), Some(Position::new(0, 3, 14)));
        assert_eq!(parse_click("  4\t1  2 "), Some(Position::new(4, 1, 2)));
        assert_eq!(parse_click("2,0,7"), Some(Position::new(2, 0, 7)));
        assert_eq!(parse_click("2, 0, 7"), Some(Position::new(2, 0, 7)));
    }

    #[test]
    fn test_parse_click_rejects_garbage() {
        assert_eq!(parse_click(""), None);
        assert_eq!(parse_click("1 2"), None);
        assert_eq!(parse_click("1 2 3 4"), None);
        assert_eq!(parse_click("a b c"), None);
        assert_eq!(parse_click("-1 0 0"), None);
    }
}
