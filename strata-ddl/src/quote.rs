//! Identifier and literal quoting shared by every dialect.

/// Wrap `name` in `quote`, doubling every embedded `quote`.
///
/// # Examples
///
/// ```
/// use strata_ddl::quote::quote_identifier;
///
/// assert_eq!(quote_identifier("users", '`'), "`users`");
/// assert_eq!(quote_identifier("we`ird", '`'), "`we``ird`");
/// assert_eq!(quote_identifier("", '"'), "\"\"");
/// ```
pub fn quote_identifier(name: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for c in name.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);

    quoted
}

/// Quote a possibly schema-qualified name component-wise.
///
/// # Examples
///
/// ```
/// use strata_ddl::quote::quote_qualified_name;
///
/// assert_eq!(quote_qualified_name("app.users", '`'), "`app`.`users`");
/// assert_eq!(quote_qualified_name("users", '"'), "\"users\"");
/// ```
pub fn quote_qualified_name(name: &str, quote: char) -> String {
    name.split('.')
        .map(|part| quote_identifier(part, quote))
        .collect::<Vec<_>>()
        .join(".")
}

/// Split `schema.table` at its last separator.
///
/// # Examples
///
/// ```
/// use strata_ddl::quote::split_qualified_name;
///
/// assert_eq!(split_qualified_name("main.users"), (Some("main"), "users"));
/// assert_eq!(split_qualified_name("users"), (None, "users"));
/// ```
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once('.') {
        Some((schema, table)) => (Some(schema), table),
        None => (None, name),
    }
}

/// Reverse of [`quote_identifier`], `None` when `quoted` is not a single quoted identifier.
pub fn unquote_identifier(quoted: &str, quote: char) -> Option<String> {
    let inner = quoted.strip_prefix(quote)?.strip_suffix(quote)?;

    let mut name = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == quote {
            // A lone quote inside the body is not something we produced
            if chars.next() != Some(quote) {
                return None;
            }
        }
        name.push(c);
    }

    Some(name)
}

/// Single-quoted SQL string literal, embedded `'` doubled.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("a\"b", '"'), "\"a\"\"b\"");
        assert_eq!(quote_identifier("``", '`'), "``````");
    }

    #[test]
    fn test_qualified_keeps_separator() {
        assert_eq!(quote_qualified_name("a`.b", '`'), "`a```.`b`");
        assert_eq!(quote_qualified_name("", '`'), "``");
    }

    #[test]
    fn test_unquote_rejects_foreign_input() {
        assert_eq!(unquote_identifier("users", '`'), None);
        assert_eq!(unquote_identifier("`a`b`", '`'), None);
        assert_eq!(unquote_identifier("`", '`'), None);
        assert_eq!(unquote_identifier("``", '`'), Some(String::new()));
    }

    #[test]
    fn test_split_qualified_name() {
        assert_eq!(split_qualified_name("a.b.c"), (Some("a.b"), "c"));
        assert_eq!(split_qualified_name(".users"), (Some(""), "users"));
        assert_eq!(split_qualified_name(""), (None, ""));
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("it's"), "'it''s'");
    }

    proptest! {
        #[test]
        fn quote_round_trip(name in ".*", quote in prop_oneof![Just('`'), Just('"'), Just('\'')]) {
            let quoted = quote_identifier(&name, quote);
            prop_assert_eq!(unquote_identifier(&quoted, quote), Some(name));
        }

        #[test]
        fn quote_round_trip_with_quote_chars(parts in proptest::collection::vec("[a-z`]{0,4}", 0..4)) {
            let name = parts.join("`");
            let quoted = quote_identifier(&name, '`');
            prop_assert_eq!(unquote_identifier(&quoted, '`'), Some(name));
        }
    }
}
