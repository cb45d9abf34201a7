use sqlx::{postgres::PgRow, FromRow, PgPool, Row};

use super::StoreError;

/// Single-table listing query shared by every entity endpoint: conjunctive
/// case-insensitive substring filters over allow-listed columns, a single
/// sort column, and limit/offset pagination.
///
/// Column names always come from `&'static` allow-lists declared next to
/// each entity, never from request input, so quoting them directly is safe.
#[derive(Debug, Clone)]
pub struct ListQuery {
    table: &'static str,
    filters: Vec<(&'static str, String)>,
    order_column: &'static str,
    limit: i64,
    offset: i64,
}

impl ListQuery {
    pub fn new(table: &'static str, order_column: &'static str) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order_column,
            limit: 10,
            offset: 0,
        }
    }

    /// Add a substring filter. Absent or blank needles are skipped, so
    /// handlers can pass query parameters straight through.
    pub fn filter(mut self, column: &'static str, needle: Option<&str>) -> Self {
        if let Some(needle) = needle {
            let needle = needle.trim();
            if !needle.is_empty() {
                self.filters.push((column, format!("%{}%", needle)));
            }
        }
        self
    }

    pub fn paginate(mut self, offset: i64, limit: i64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn select_sql(&self) -> (String, Vec<String>) {
        let sql = format!(
            "SELECT * FROM \"{}\"{} ORDER BY \"{}\" ASC LIMIT {} OFFSET {}",
            self.table,
            self.where_sql(),
            self.order_column,
            self.limit,
            self.offset
        );
        (sql, self.params())
    }

    pub fn count_sql(&self) -> (String, Vec<String>) {
        let sql = format!(
            "SELECT COUNT(*) AS count FROM \"{}\"{}",
            self.table,
            self.where_sql()
        );
        (sql, self.params())
    }

    fn where_sql(&self) -> String {
        if self.filters.is_empty() {
            return String::new();
        }

        let clauses: Vec<String> = self
            .filters
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("\"{}\" ILIKE ${}", column, i + 1))
            .collect();

        format!(" WHERE {}", clauses.join(" AND "))
    }

    fn params(&self) -> Vec<String> {
        self.filters.iter().map(|(_, pattern)| pattern.clone()).collect()
    }
}

/// Run the count and page queries, returning the page of rows plus the
/// total matching the filters (pre-pagination).
pub async fn fetch_page<T>(pool: &PgPool, query: &ListQuery) -> Result<(Vec<T>, i64), StoreError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let (count_sql, params) = query.count_sql();
    let mut count_query = sqlx::query(&count_sql);
    for param in params.iter() {
        count_query = count_query.bind(param.as_str());
    }
    let total: i64 = count_query.fetch_one(pool).await?.try_get("count")?;

    let (select_sql, params) = query.select_sql();
    let mut select_query = sqlx::query_as::<_, T>(&select_sql);
    for param in params.iter() {
        select_query = select_query.bind(param.as_str());
    }
    let items = select_query.fetch_all(pool).await?;

    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_query_has_no_where_clause() {
        let (sql, params) = ListQuery::new("yards", "name").select_sql();

        assert_eq!(
            sql,
            "SELECT * FROM \"yards\" ORDER BY \"name\" ASC LIMIT 10 OFFSET 0"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn filters_are_conjunctive_and_positional() {
        let (sql, params) = ListQuery::new("motorcycles", "plate")
            .filter("plate", Some("ABC"))
            .filter("model", Some("Sport"))
            .paginate(10, 5)
            .select_sql();

        assert_eq!(
            sql,
            "SELECT * FROM \"motorcycles\" WHERE \"plate\" ILIKE $1 AND \"model\" ILIKE $2 \
             ORDER BY \"plate\" ASC LIMIT 5 OFFSET 10"
        );
        assert_eq!(params, vec!["%ABC%", "%Sport%"]);
    }

    #[test]
    fn blank_needles_are_skipped() {
        let (sql, params) = ListQuery::new("employees", "name")
            .filter("name", None)
            .filter("role", Some("   "))
            .select_sql();

        assert!(!sql.contains("WHERE"));
        assert!(params.is_empty());
    }

    #[test]
    fn count_ignores_pagination_but_keeps_filters() {
        let (sql, params) = ListQuery::new("cameras", "id")
            .filter("status", Some("active"))
            .paginate(40, 20)
            .count_sql();

        assert_eq!(
            sql,
            "SELECT COUNT(*) AS count FROM \"cameras\" WHERE \"status\" ILIKE $1"
        );
        assert_eq!(params, vec!["%active%"]);
    }
}
