use serde::{Deserialize, Serialize};

/// 分页请求，page 从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// 页码截断到偏移量不超过 `i64::MAX` 的最后一页
    pub fn new(page: u64, page_size: u64) -> Self {
        let page_size = page_size.clamp(1, i64::MAX as u64);
        let last_page = i64::MAX as u64 / page_size;
        Self {
            page: page.clamp(1, last_page),
            page_size,
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    /// `total_pages = ceil(total / page_size)`
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResponse<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(3, 10, 25).total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 10, 20).total_pages, 2);
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 1).total_pages, 1);
    }

    #[test]
    fn test_page_request_bounds() {
        assert_eq!(PageRequest::new(0, 10).page, 1);
        assert_eq!(PageRequest::new(3, 10).page, 3);

        let huge = PageRequest::new(1_844_674_407_370_955_162, 10);
        assert_eq!(huge.page, i64::MAX as u64 / 10);
        let offset = (huge.page - 1).checked_mul(huge.page_size).unwrap();
        assert!(offset <= i64::MAX as u64);

        let max = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!((max.page, max.page_size), (1, i64::MAX as u64));
    }
}
