//! 目录查询状态
//!
//! 书目列表完全由 `page`、`limit`、`sortBy`、`search` 四个参数决定，
//! 这些参数与 URL 查询串双向同步，使页面可以恢复和分享。

use std::fmt;

use url::form_urlencoded;

pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// 页面上可选的每页数量
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [8, 12, 24, 48];

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    NewestArrivals,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Relevance,
        SortKey::PriceLowToHigh,
        SortKey::PriceHighToLow,
        SortKey::NewestArrivals,
    ];

    /// 查询串中的取值
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceLowToHigh => "price_low_to_high",
            SortKey::PriceHighToLow => "price_high_to_low",
            SortKey::NewestArrivals => "newest_arrivals",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Sort by relevance",
            SortKey::PriceLowToHigh => "Price: Low to High",
            SortKey::PriceHighToLow => "Price: High to Low",
            SortKey::NewestArrivals => "Newest Arrivals",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 目录查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// 从 1 开始
    pub page: u32,
    pub limit: u32,
    pub sort: SortKey,
    pub search: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort: SortKey::default(),
            search: String::new(),
        }
    }
}

impl CatalogQuery {
    /// 从 URL 查询串解析；缺失、无法解析或为 0 的值回退到默认值
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::default();
        let query = query.trim_start_matches('?');
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => parsed.page = positive(&value).unwrap_or(1),
                "limit" => parsed.limit = positive(&value).unwrap_or(DEFAULT_PAGE_SIZE),
                "sortBy" => parsed.sort = SortKey::parse(&value).unwrap_or_default(),
                "search" => parsed.search = value.into_owned(),
                _ => {}
            }
        }
        parsed
    }

    /// 写回地址栏的查询串，`search` 为空时省略
    pub fn to_url_query(&self) -> String {
        self.serialize(false)
    }

    /// 发送给后端的查询串，四个参数总是携带
    pub fn to_api_query(&self) -> String {
        self.serialize(true)
    }

    fn serialize(&self, include_empty_search: bool) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("sortBy", self.sort.as_str());
        if include_empty_search || !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        serializer.finish()
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    /// 切换排序回到第一页，保留搜索词
    pub fn with_sort(self, sort: SortKey) -> Self {
        Self {
            sort,
            page: 1,
            ..self
        }
    }

    /// 切换每页数量回到第一页，保留搜索词
    pub fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            page: 1,
            ..self
        }
    }

    /// 头部搜索框提交：去掉首尾空白，空词清除搜索，总是回到第一页
    pub fn with_search(self, term: &str) -> Self {
        Self {
            search: term.trim().to_string(),
            page: 1,
            ..self
        }
    }

    pub fn page_count(&self, total: u64) -> u64 {
        page_count(total, self.limit)
    }
}

fn positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|v| *v >= 1)
}

/// ceiling(total / limit)
pub fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(u64::from(limit))
    }
}

/// 分页条上显示的页码：当前页附近 `span` 页，始终包含首页和末页
///
/// `None` 表示省略号。
pub fn page_window(current: u64, count: u64, span: u64) -> Vec<Option<u64>> {
    if count == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, count);
    let start = current.saturating_sub(span).max(1);
    let end = (current + span).min(count);

    let mut pages = Vec::new();
    if start > 1 {
        pages.push(Some(1));
        if start > 2 {
            pages.push(None);
        }
    }
    pages.extend((start..=end).map(Some));
    if end < count {
        if end + 1 < count {
            pages.push(None);
        }
        pages.push(Some(count));
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searching(term: &str) -> CatalogQuery {
        CatalogQuery::default().with_search(term).with_page(4)
    }

    #[test]
    fn sort_change_resets_page_but_keeps_search() {
        let q = searching("tolkien").with_sort(SortKey::NewestArrivals);
        assert_eq!(q.page, 1);
        assert_eq!(q.search, "tolkien");
        assert_eq!(q.sort, SortKey::NewestArrivals);
    }

    #[test]
    fn limit_change_resets_page_but_keeps_search() {
        let q = searching("tolkien").with_limit(8);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 8);
        assert_eq!(q.search, "tolkien");
    }

    #[test]
    fn page_change_keeps_everything_else() {
        let q = CatalogQuery::default()
            .with_sort(SortKey::PriceLowToHigh)
            .with_page(3);
        assert_eq!(q.page, 3);
        assert_eq!(q.sort, SortKey::PriceLowToHigh);
        assert_eq!(CatalogQuery::default().with_page(0).page, 1);
    }

    #[test]
    fn search_is_trimmed_and_resets_page() {
        let q = CatalogQuery::default().with_page(5).with_search("  dune ");
        assert_eq!(q.search, "dune");
        assert_eq!(q.page, 1);
        assert_eq!(q.with_page(2).with_search("   ").search, "");
    }

    #[test]
    fn parses_url_query_with_fallbacks() {
        let q = CatalogQuery::from_query_string("?page=3&limit=12&sortBy=price_low_to_high&search=the+hobbit");
        assert_eq!(
            q,
            CatalogQuery {
                page: 3,
                limit: 12,
                sort: SortKey::PriceLowToHigh,
                search: "the hobbit".into(),
            }
        );

        let q = CatalogQuery::from_query_string("page=abc&limit=0&sortBy=bogus");
        assert_eq!(q, CatalogQuery::default());
        assert_eq!(CatalogQuery::from_query_string(""), CatalogQuery::default());
    }

    #[test]
    fn url_query_omits_empty_search() {
        assert_eq!(
            CatalogQuery::default().to_url_query(),
            "page=1&limit=24&sortBy=relevance"
        );
        let q = CatalogQuery::default().with_search("war & peace");
        assert_eq!(
            q.to_url_query(),
            "page=1&limit=24&sortBy=relevance&search=war+%26+peace"
        );
        assert_eq!(CatalogQuery::from_query_string(&q.to_url_query()), q);
    }

    #[test]
    fn page_count_is_ceiling() {
        assert_eq!(page_count(0, 24), 0);
        assert_eq!(page_count(24, 24), 1);
        assert_eq!(page_count(25, 24), 2);
        assert_eq!(page_count(10, 0), 0);
    }

    #[test]
    fn page_window_elides_distant_pages() {
        assert_eq!(page_window(1, 3, 2), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            page_window(6, 10, 1),
            vec![Some(1), None, Some(5), Some(6), Some(7), None, Some(10)]
        );
        assert_eq!(page_window(2, 10, 1), vec![Some(1), Some(2), Some(3), None, Some(10)]);
        assert!(page_window(1, 0, 2).is_empty());
    }
}
