// Pagination and sort-key handling shared by every list endpoint.
use serde::Serialize;

/// Caller-requested page, normalized. Out-of-range values are clamped to 1
/// rather than rejected.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn from_params(page: Option<i64>, page_size: Option<i64>, default_page_size: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_page_size).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Pagination metadata computed over the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(total_items: i64, request: &PageRequest) -> Self {
        // page_size >= 1 is guaranteed by PageRequest normalization
        let total_pages = (total_items + request.page_size - 1) / request.page_size;

        Self {
            total_items,
            page: request.page,
            page_size: request.page_size,
            total_pages,
        }
    }
}

/// List response body: `{ "meta": ..., "data": [...] }`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}

/// Resolve a requested sort key against an entity's allow-list, falling
/// back to the entity default. Unknown keys are never an error.
pub fn sort_column(
    requested: Option<&str>,
    allowed: &'static [(&'static str, &'static str)],
    default_column: &'static str,
) -> &'static str {
    let Some(requested) = requested else {
        return default_column;
    };

    allowed
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(requested))
        .map(|(_, column)| *column)
        .unwrap_or(default_column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_size_clamp_to_one() {
        let request = PageRequest::from_params(Some(0), Some(-3), 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 1);

        let request = PageRequest::from_params(Some(-10), None, 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 10);
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let request = PageRequest::from_params(None, None, 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest::from_params(Some(2), Some(5), 10);
        assert_eq!(request.offset(), 5);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::from_params(Some(2), Some(5), 10);
        let meta = PageMeta::new(12, &request);

        assert_eq!(meta.total_items, 12);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.page_size, 5);
        assert_eq!(meta.total_pages, 3);

        assert_eq!(PageMeta::new(10, &request).total_pages, 2);
        assert_eq!(PageMeta::new(11, &request).total_pages, 3);
        assert_eq!(PageMeta::new(0, &request).total_pages, 0);
    }

    #[test]
    fn past_the_end_pages_keep_the_true_total() {
        let request = PageRequest::from_params(Some(99), Some(10), 10);
        let meta = PageMeta::new(12, &request);

        assert_eq!(meta.total_items, 12);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(request.offset(), 980);
    }

    #[test]
    fn sort_key_falls_back_to_default() {
        let allowed: &'static [(&'static str, &'static str)] = &[("name", "name"), ("role", "role")];

        assert_eq!(sort_column(Some("role"), allowed, "name"), "role");
        assert_eq!(sort_column(Some("ROLE"), allowed, "name"), "role");
        assert_eq!(sort_column(Some("salary"), allowed, "name"), "name");
        assert_eq!(sort_column(None, allowed, "name"), "name");
    }
}
