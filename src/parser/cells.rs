use serde_json::Number;

/// Whitespace-only, including the empty string.
pub fn is_blank(cell: &str) -> bool {
    cell.chars().all(char::is_whitespace)
}

/// True when the cell is a JSON number literal (`-2`, `3.14`, `1e9`).
pub fn is_numeric(cell: &str) -> bool {
    serde_json::from_str::<Number>(cell).is_ok()
}

/// Drop blank cells, keeping the order of the rest.
pub fn compact<'a, I, S>(cells: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a + ?Sized,
{
    cells
        .into_iter()
        .map(|c: &'a S| c.as_ref())
        .filter(|c| !is_blank(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(is_blank("\u{3000}"));
        assert!(!is_blank("0"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn numeric_cells() {
        assert!(is_numeric("3.14"));
        assert!(is_numeric("-2"));
        assert!(is_numeric("0"));
        assert!(is_numeric("1e9"));
        assert!(is_numeric("-1.5E-3"));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("   "));
    }

    #[test]
    fn non_json_numbers_rejected() {
        for s in ["0x1F", "+1", "01", "NaN", "inf", "1.", ".5", "1,000", "Sheet1"] {
            assert!(!is_numeric(s), "{s} should not be numeric");
        }
    }

    #[test]
    fn compaction_keeps_order() {
        let row = vec!["", "a", " ", "b", "", "c"];
        assert_eq!(compact(&row), vec!["a", "b", "c"]);

        let owned: Vec<String> = vec!["".into(), "x".into()];
        assert_eq!(compact(&owned), vec!["x"]);
        assert!(compact(&Vec::<String>::new()).is_empty());
    }
}
