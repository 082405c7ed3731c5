//! Trivial SQL fragment builders
//!
//! Nothing here parses or validates SQL; these helpers only produce the two
//! string shapes callers assemble dynamic statements from.

/// Build an `IN` clause placeholder list for a prepared statement.
///
/// Returns `" in ( ?, ?, ..., ? ) "` with exactly `size` placeholders and no
/// trailing comma. `size == 0` yields the degenerate `" in (  ) "`, which
/// callers are expected to avoid but which keeps the output shape uniform.
///
/// ```
/// assert_eq!(dbres::in_clause(3), " in ( ?, ?, ? ) ");
/// assert_eq!(dbres::in_clause(1), " in ( ? ) ");
/// assert_eq!(dbres::in_clause(0), " in (  ) ");
/// ```
pub fn in_clause(size: usize) -> String {
    let mut clause = String::with_capacity(8 + size * 3);
    clause.push_str(" in ( ");
    for i in 0..size {
        if i + 1 != size {
            clause.push_str("?, ");
        } else {
            clause.push('?');
        }
    }
    clause.push_str(" ) ");
    clause
}

/// Concatenate SQL fragments in order, with no separator.
///
/// ```
/// let sql = dbres::concat_sql(["select * from orders", " where id", dbres::in_clause(2).as_str()]);
/// assert_eq!(sql, "select * from orders where id in ( ?, ? ) ");
/// ```
pub fn concat_sql<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut sql = String::new();
    for part in parts {
        sql.push_str(part.as_ref());
    }
    sql
}
