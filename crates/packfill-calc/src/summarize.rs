//! 結果彙整

use packfill_core::{Allocation, FulfillmentResult, PackSize};

use crate::Candidate;

/// 將搜尋內部的候選轉成對外回報的結果
pub struct ResultSummarizer;

impl ResultSummarizer {
    /// 需求為 0 的訂單：空分配、0 件
    pub fn empty_order() -> FulfillmentResult {
        FulfillmentResult::empty()
    }

    /// 彙整分配：計算 Σ size·count，分配內容不變
    pub fn summarize(allocation: Allocation) -> packfill_core::Result<FulfillmentResult> {
        let total_items = allocation.total_items()?;
        Ok(FulfillmentResult {
            total_items,
            packs: allocation,
        })
    }

    /// 由候選與對應的正規化規格彙整
    pub fn from_candidate(
        sizes: &[PackSize],
        candidate: &Candidate,
    ) -> packfill_core::Result<FulfillmentResult> {
        Self::summarize(Allocation::from_counts(sizes, &candidate.counts))
    }
}
