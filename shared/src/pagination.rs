//! 分页元数据与翻页控件状态

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 列表接口的分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// `max(1, ceil(total / per_page))`
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 服务端未给出 `total` 时的保守估计
///
/// 已经看到的条目数；若本页是满的，再多算一页。
pub fn estimate_total(page: u32, per_page: u32, returned: usize) -> u64 {
    let per_page = u64::from(per_page.max(1));
    let seen = u64::from(page.max(1) - 1) * per_page + returned as u64;
    if returned as u64 >= per_page {
        seen + per_page
    } else {
        seen
    }
}

/// 读取信封对象里的 `total`
pub fn server_total(raw: &Value) -> Option<u64> {
    raw.as_object()?.get("total")?.as_u64()
}

impl<T> PaginatedResponse<T> {
    /// 组装分页结果
    ///
    /// `returned` 是服务端返回的原始条目数（可能多于解析成功的 `data`）。
    /// 服务端的 `total_pages` 不被信任，总是由 `total` 推导。
    pub fn assemble(
        data: Vec<T>,
        returned: usize,
        server_total: Option<u64>,
        page: u32,
        per_page: u32,
    ) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = server_total.unwrap_or_else(|| estimate_total(page, per_page, returned));

        Self {
            data,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        }
    }

    pub fn empty(page: u32, per_page: u32) -> Self {
        Self::assemble(Vec::new(), 0, Some(0), page, per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.per_page, self.total_pages)
    }

    /// 请求的页超出末尾而返回为空时，应退回的页码
    ///
    /// 按请求的页码判断；`pager()` 会把页码钳制到估算出的末页。
    pub fn settle_empty_page(&self) -> Option<u32> {
        Pager::new(self.page, self.per_page, self.page.max(self.total_pages))
            .settle_empty_page(self.data.len())
    }
}

// =========================================================
// 翻页控件
// =========================================================

/// 翻页控件状态，页码始终落在 `[1, total_pages]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(1, 10, 1)
    }
}

impl Pager {
    pub fn new(current_page: u32, per_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            per_page: per_page.max(1),
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 上一页页码，已在第一页时为 `None`
    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    /// 跳转并钳制到合法范围
    pub fn go_to(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    /// 以当前页为中心、最多 `width` 个页码按钮
    pub fn page_window(&self, width: u32) -> Vec<u32> {
        let width = width.clamp(1, self.total_pages);
        let half = width / 2;
        let start = self
            .current_page
            .saturating_sub(half)
            .max(1)
            .min(self.total_pages - width + 1);
        (start..start + width).collect()
    }

    /// 超出末尾的页返回为空时，退回上一页
    pub fn settle_empty_page(&self, returned: usize) -> Option<u32> {
        (returned == 0 && self.current_page > 1).then(|| self.current_page - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 10, 1)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(95, 12, 8)]
    #[case(5, 0, 5)]
    fn test_total_pages(#[case] total: u64, #[case] per_page: u32, #[case] expected: u32) {
        assert_eq!(total_pages(total, per_page), expected);
    }

    #[test]
    fn test_estimate_total() {
        // 不满一页：就是已看到的数量
        assert_eq!(estimate_total(1, 10, 3), 3);
        assert_eq!(estimate_total(3, 10, 4), 24);
        // 满页：假设还有下一页
        assert_eq!(estimate_total(1, 10, 10), 20);
        assert_eq!(estimate_total(2, 10, 10), 30);
        assert_eq!(estimate_total(1, 10, 0), 0);
    }

    #[test]
    fn test_assemble_prefers_server_total() {
        let page = PaginatedResponse::assemble(vec![1, 2, 3], 3, Some(23), 1, 3);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 8);

        let page = PaginatedResponse::assemble(vec![1, 2, 3], 3, None, 2, 3);
        assert_eq!(page.total, 9);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_server_total() {
        assert_eq!(server_total(&json!({ "items": [], "total": 4 })), Some(4));
        assert_eq!(server_total(&json!({ "items": [] })), None);
        assert_eq!(server_total(&json!([1, 2])), None);
    }

    #[test]
    fn test_zero_results_disable_both_controls() {
        let page: PaginatedResponse<u8> = PaginatedResponse::empty(1, 10);
        assert!(page.total_pages >= 1);

        let pager = page.pager();
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.next(), None);
    }

    #[test]
    fn test_pager_navigation_clamps() {
        let pager = Pager::new(9, 10, 5);
        assert_eq!(pager.current_page, 5);
        assert_eq!(pager.next(), None);
        assert_eq!(pager.prev(), Some(4));
        assert_eq!(pager.go_to(0), 1);
        assert_eq!(pager.go_to(42), 5);
        assert_eq!(pager.go_to(3), 3);
    }

    #[rstest]
    #[case(1, 10, vec![1, 2, 3, 4, 5])]
    #[case(5, 10, vec![3, 4, 5, 6, 7])]
    #[case(10, 10, vec![6, 7, 8, 9, 10])]
    #[case(2, 3, vec![1, 2, 3])]
    fn test_page_window(#[case] current: u32, #[case] total: u32, #[case] expected: Vec<u32>) {
        assert_eq!(Pager::new(current, 10, total).page_window(5), expected);
    }

    #[test]
    fn test_settle_empty_page_steps_back() {
        let pager = Pager::new(3, 10, 4);
        assert_eq!(pager.settle_empty_page(0), Some(2));
        assert_eq!(pager.settle_empty_page(4), None);
        assert_eq!(Pager::new(1, 10, 1).settle_empty_page(0), None);
    }

    #[test]
    fn test_empty_page_past_estimated_end_steps_back_once() {
        // 第 3 页为空，估算总数只有 20 条（2 页）
        let resp = PaginatedResponse::<u8>::assemble(Vec::new(), 0, None, 3, 10);
        assert_eq!(resp.total_pages, 2);
        assert_eq!(resp.pager().current_page, 2);
        assert_eq!(resp.settle_empty_page(), Some(2));

        let first = PaginatedResponse::<u8>::assemble(Vec::new(), 0, None, 1, 10);
        assert_eq!(first.settle_empty_page(), None);
    }
}
