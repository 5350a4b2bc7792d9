//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 分页列表响应
///
/// `total` 是过滤后的总数，不是当前页的条数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<T>,
}

impl<T: Clone> Page<T> {
    /// 从已过滤的结果中切出第 `page` 页（从 1 开始）
    pub fn slice(items: &[T], page: usize, limit: usize) -> Self {
        let start = page.saturating_sub(1).saturating_mul(limit);
        let data = items.iter().skip(start).take(limit).cloned().collect();

        Self {
            total: items.len(),
            page,
            limit,
            data,
        }
    }
}
