//! SQL quoting utilities for dynamically-built ledger statements.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double
/// quotes by doubling them, following the SQL standard.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Escape a SQL string literal value by doubling single quotes.
///
/// For use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("migrations"), r#""migrations""#);
        assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
    }

    #[test]
    fn test_escape_sql_string() {
        assert_eq!(escape_sql_string("plain"), "plain");
        assert_eq!(escape_sql_string("it's"), "it''s");
    }
}
