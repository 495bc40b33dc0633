//! 包裝分配主計算器

use packfill_core::{
    FulfillmentConfig, FulfillmentResult, LimitKind, PackError, PackSize, Quantity,
    SearchStrategy,
};
use rayon::prelude::*;

use crate::dp::DynamicProgrammingSearch;
use crate::search::ExhaustiveSearch;
use crate::{FulfillmentReport, ResultSummarizer};

/// 以預設配置計算包裝分配
///
/// # 範例
/// ```
/// use packfill_calc::compute_fulfillment;
///
/// let result = compute_fulfillment(501, &[250, 500, 1000, 2000, 5000]).unwrap();
/// assert_eq!(result.total_items, 750);
/// assert_eq!(result.packs.get(500), 1);
/// assert_eq!(result.packs.get(250), 1);
/// ```
pub fn compute_fulfillment(
    quantity: i64,
    pack_sizes: &[i64],
) -> packfill_core::Result<FulfillmentResult> {
    FulfillmentCalculator::default().compute(quantity, pack_sizes)
}

/// 包裝分配計算器
#[derive(Debug, Clone, Default)]
pub struct FulfillmentCalculator {
    config: FulfillmentConfig,
}

impl FulfillmentCalculator {
    /// 創建新的計算器
    pub fn new(config: FulfillmentConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &FulfillmentConfig {
        &self.config
    }

    /// 計算包裝分配
    pub fn compute(
        &self,
        quantity: i64,
        pack_sizes: &[i64],
    ) -> packfill_core::Result<FulfillmentResult> {
        self.compute_with_report(quantity, pack_sizes)
            .map(|report| report.result)
    }

    /// 計算包裝分配並附帶搜尋資訊
    pub fn compute_with_report(
        &self,
        quantity: i64,
        pack_sizes: &[i64],
    ) -> packfill_core::Result<FulfillmentReport> {
        let quantity =
            Quantity::try_from(quantity).map_err(|_| PackError::NegativeQuantity(quantity))?;
        let sizes = pack_sizes
            .iter()
            .map(|&size| PackSize::new(size))
            .collect::<packfill_core::Result<Vec<_>>>()?;

        self.compute_sizes(quantity, &sizes)
    }

    /// 以已驗證的規格計算
    pub fn compute_sizes(
        &self,
        quantity: Quantity,
        pack_sizes: &[PackSize],
    ) -> packfill_core::Result<FulfillmentReport> {
        tracing::info!(
            "開始包裝分配計算：需求 {} 件，規格 {} 種",
            quantity,
            pack_sizes.len()
        );

        let start_time = std::time::Instant::now();

        if let Some(max_quantity) = self.config.max_quantity {
            if quantity > max_quantity {
                tracing::warn!("需求 {} 超過上限 {}", quantity, max_quantity);
                return Err(PackError::SearchLimitExceeded {
                    kind: LimitKind::Quantity,
                    limit: max_quantity,
                });
            }
        }

        // 需求為 0：空分配永遠是最佳解，不需搜尋
        if quantity == 0 {
            tracing::debug!("需求為 0，回傳空分配");
            return Ok(FulfillmentReport {
                result: ResultSummarizer::empty_order(),
                strategy: None,
                explored: 0,
                calculation_time_ms: elapsed_ms(start_time),
            });
        }

        let sizes = PackSize::normalize(pack_sizes);
        if sizes.is_empty() {
            tracing::debug!("無可用規格，需求 {} 無法滿足", quantity);
            return Err(PackError::Infeasible { quantity });
        }

        let strategy = self.resolve_strategy(quantity, &sizes);
        tracing::debug!("使用策略 {:?}，規格 {:?}", strategy, sizes);

        let outcome = match strategy {
            SearchStrategy::DynamicProgramming => {
                DynamicProgrammingSearch::new(&sizes, self.config.max_table_cells).run(quantity)?
            }
            SearchStrategy::Exhaustive | SearchStrategy::Auto => {
                ExhaustiveSearch::new(&sizes, self.config.max_explored_nodes)
                    .with_max_depth(self.config.max_search_depth)
                    .run(quantity)?
            }
        };

        let best = outcome.best.ok_or(PackError::Infeasible { quantity })?;
        let result = ResultSummarizer::from_candidate(&sizes, &best)?;

        tracing::info!(
            "包裝分配完成：出貨 {} 件，{} 包，耗時 {:?}",
            result.total_items,
            result.pack_count(),
            start_time.elapsed()
        );

        Ok(FulfillmentReport {
            result,
            strategy: Some(strategy),
            explored: outcome.explored,
            calculation_time_ms: elapsed_ms(start_time),
        })
    }

    /// 批次計算，各筆需求獨立並行，結果順序與輸入一致
    pub fn compute_batch(
        &self,
        quantities: &[i64],
        pack_sizes: &[i64],
    ) -> Vec<packfill_core::Result<FulfillmentResult>> {
        tracing::info!("批次包裝分配：{} 筆需求", quantities.len());

        quantities
            .par_iter()
            .map(|&quantity| self.compute(quantity, pack_sizes))
            .collect()
    }

    /// 決定實際使用的策略
    ///
    /// Auto：規格種類數不超過深度上限，且窮舉葉節點數的上界 Π(ceil(q/s)+1)
    /// 不超過門檻時使用窮舉，否則使用 DP。
    fn resolve_strategy(&self, quantity: Quantity, sizes: &[PackSize]) -> SearchStrategy {
        match self.config.strategy {
            SearchStrategy::Auto => {
                let depth = u64::try_from(sizes.len()).unwrap_or(u64::MAX);
                if depth > self.config.max_search_depth {
                    return SearchStrategy::DynamicProgramming;
                }
                let estimate = sizes.iter().fold(1u64, |acc, size| {
                    acc.saturating_mul(quantity.div_ceil(size.get()).saturating_add(1))
                });
                if estimate <= self.config.auto_exhaustive_threshold {
                    SearchStrategy::Exhaustive
                } else {
                    SearchStrategy::DynamicProgramming
                }
            }
            strategy => strategy,
        }
    }
}

fn elapsed_ms(start_time: std::time::Instant) -> u64 {
    u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX)
}
