//! 窮舉分配搜尋
//!
//! 由大規格到小規格逐一決定包數。每一層的包數範圍為 `0..=ceil(剩餘需求 / 規格)`，
//! 超過此範圍只會增加浪費。每個遞迴步驟回傳自己子樹的最佳候選，由上一層依
//! [`Candidate::is_better_than`] 合併，不共用可變的最佳解。
//!
//! 遞迴深度等於規格種類數，第一條路徑就會走到底，節點上限來不及攔截，
//! 因此執行前先檢查深度上限。

use packfill_core::{LimitKind, PackError, PackSize, Quantity};

use crate::{Candidate, SearchOutcome};

/// 預設的遞迴深度上限
pub const DEFAULT_MAX_DEPTH: u64 = 64;

/// 窮舉搜尋器
pub struct ExhaustiveSearch<'a> {
    /// 已正規化（由大到小、無重複）的規格
    sizes: &'a [PackSize],

    /// 節點上限
    max_nodes: u64,

    /// 遞迴深度上限（規格種類數）
    max_depth: u64,

    /// 已探索節點數
    explored: u64,
}

impl<'a> ExhaustiveSearch<'a> {
    /// 創建搜尋器，`sizes` 必須已經過 [`PackSize::normalize`]
    pub fn new(sizes: &'a [PackSize], max_nodes: u64) -> Self {
        Self {
            sizes,
            max_nodes,
            max_depth: DEFAULT_MAX_DEPTH,
            explored: 0,
        }
    }

    /// 建構器模式：設置遞迴深度上限
    pub fn with_max_depth(mut self, limit: u64) -> Self {
        self.max_depth = limit;
        self
    }

    /// 執行搜尋
    ///
    /// 規格清單為空且需求為正時，結果中沒有候選。
    pub fn run(mut self, quantity: Quantity) -> packfill_core::Result<SearchOutcome> {
        let depth = u64::try_from(self.sizes.len()).unwrap_or(u64::MAX);
        if depth > self.max_depth {
            tracing::warn!("規格 {} 種超過窮舉深度上限 {}", depth, self.max_depth);
            return Err(PackError::SearchLimitExceeded {
                kind: LimitKind::Depth,
                limit: self.max_depth,
            });
        }

        let mut path = Vec::with_capacity(self.sizes.len());
        let best = self.explore(0, quantity, 0, 0, &mut path)?;

        tracing::debug!("窮舉搜尋完成，探索節點 {} 個", self.explored);

        Ok(SearchOutcome {
            best,
            explored: self.explored,
        })
    }

    fn explore(
        &mut self,
        depth: usize,
        remaining: u64,
        shipped: u64,
        packs: u64,
        path: &mut Vec<u64>,
    ) -> packfill_core::Result<Option<Candidate>> {
        self.explored += 1;
        if self.explored > self.max_nodes {
            tracing::warn!("窮舉搜尋超過節點上限 {}", self.max_nodes);
            return Err(PackError::SearchLimitExceeded {
                kind: LimitKind::ExploredNodes,
                limit: self.max_nodes,
            });
        }

        // 所有規格皆已決定
        let Some(size) = self.sizes.get(depth).map(|s| s.get()) else {
            if remaining > 0 {
                return Ok(None);
            }
            return Ok(Some(Candidate::new(path.clone(), shipped, packs)));
        };

        let max_count = remaining.div_ceil(size);
        let mut best: Option<Candidate> = None;

        for count in 0..=max_count {
            let items = size.checked_mul(count).ok_or(PackError::Overflow)?;
            let next_shipped = shipped.checked_add(items).ok_or(PackError::Overflow)?;

            path.push(count);
            let child = self.explore(
                depth + 1,
                remaining.saturating_sub(items),
                next_shipped,
                packs + count,
                path,
            )?;
            path.pop();

            best = Candidate::pick(best, child);
        }

        Ok(best)
    }
}
