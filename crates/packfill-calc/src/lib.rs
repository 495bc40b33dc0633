//! # Packfill Calculation Engine
//!
//! 包裝分配計算引擎：在不少於需求的前提下，找出出貨總件數最少、
//! 其次總包數最少的包裝組合。

pub mod calculator;
pub mod dp;
pub mod search;
pub mod service;
pub mod summarize;

// Re-export 主要類型
pub use calculator::{compute_fulfillment, FulfillmentCalculator};
pub use service::FulfillmentService;
pub use summarize::ResultSummarizer;

use packfill_core::{FulfillmentResult, SearchStrategy};
use serde::Serialize;
use std::cmp::Ordering;

/// 搜尋中的候選分配
///
/// `counts` 與正規化後（由大到小）的規格一一對應。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub counts: Vec<u64>,
    pub total_items: u64,
    pub pack_count: u64,
}

impl Candidate {
    pub fn new(counts: Vec<u64>, total_items: u64, pack_count: u64) -> Self {
        Self {
            counts,
            total_items,
            pack_count,
        }
    }

    /// 排序規則：總件數少者優先，其次總包數少者，
    /// 再其次依規格由大到小比較包數，使用較多大規格者優先
    pub fn rank(&self, other: &Self) -> Ordering {
        self.total_items
            .cmp(&other.total_items)
            .then(self.pack_count.cmp(&other.pack_count))
            .then_with(|| other.counts.cmp(&self.counts))
    }

    pub fn is_better_than(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Less
    }

    /// 合併兩個子樹的結果，保留較佳者
    pub fn pick(current: Option<Self>, challenger: Option<Self>) -> Option<Self> {
        match (current, challenger) {
            (Some(current), Some(challenger)) if challenger.is_better_than(&current) => {
                Some(challenger)
            }
            (Some(current), _) => Some(current),
            (None, challenger) => challenger,
        }
    }
}

/// 單次搜尋的輸出
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// 最佳候選（無可行分配時為 None）
    pub best: Option<Candidate>,

    /// 探索的節點數（窮舉）或表格格數（DP）
    pub explored: u64,
}

/// 計算報告
#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentReport {
    /// 分配結果
    pub result: FulfillmentResult,

    /// 實際使用的策略（需求為 0 時不經搜尋，為 None）
    pub strategy: Option<SearchStrategy>,

    /// 探索的節點數或表格格數
    pub explored: u64,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: u64,
}
