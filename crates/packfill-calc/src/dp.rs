//! 動態規劃分配搜尋（找零問題形式）
//!
//! 規格與需求先除以所有規格的最大公因數。對每個規格後綴 `k` 建立
//! `P_k(t)`：只用規格 `k..n` 恰好湊出 `t` 所需的最少包數。最小可行總量為
//! `P_0(t)` 有限的最小 `t >= 需求`；再由大規格開始，取能維持最少包數的最大
//! 包數回推分配，與窮舉搜尋的排序規則一致。
//!
//! 需求很大時，先取出整包的最大規格再建表。設最大規格為 `L`、次大規格為
//! `s2`：最佳分配中非最大規格的包數少於 `L`（否則其中一段和為 `L` 的倍數，
//! 可換成更少的最大規格包），合計不超過 `(L - 1) * s2`。因此需求超過此界限
//! 的部分必由最大規格湊出，表格寬度只與規格有關。

use packfill_core::{LimitKind, PackError, PackSize, Quantity};

use crate::{Candidate, SearchOutcome};

const UNREACHABLE: u64 = u64::MAX;

/// 動態規劃搜尋器
pub struct DynamicProgrammingSearch<'a> {
    /// 已正規化（由大到小、無重複）的規格
    sizes: &'a [PackSize],

    /// 表格格數上限
    max_cells: u64,
}

impl<'a> DynamicProgrammingSearch<'a> {
    /// 創建搜尋器，`sizes` 必須已經過 [`PackSize::normalize`]
    pub fn new(sizes: &'a [PackSize], max_cells: u64) -> Self {
        Self { sizes, max_cells }
    }

    /// 執行搜尋
    pub fn run(self, quantity: Quantity) -> packfill_core::Result<SearchOutcome> {
        let Some(smallest) = self.sizes.last().map(|s| s.get()) else {
            return Ok(SearchOutcome {
                best: None,
                explored: 0,
            });
        };

        let divisor = self.sizes.iter().map(|s| s.get()).fold(0, gcd);
        let scaled: Vec<u64> = self.sizes.iter().map(|s| s.get() / divisor).collect();
        let target = quantity.div_ceil(divisor);
        let smallest = smallest / divisor;

        let (leading, residual) = split_largest(&scaled, target)?;

        // 只用最小規格即可湊出的總量，必為可行上界
        let bound = residual
            .div_ceil(smallest)
            .checked_mul(smallest)
            .ok_or(PackError::Overflow)?;

        let width = bound.checked_add(1).ok_or(PackError::Overflow)?;
        let cells = width
            .checked_mul(scaled.len() as u64 + 1)
            .ok_or(PackError::Overflow)?;
        if cells > self.max_cells {
            tracing::warn!("DP 表格 {} 格超過上限 {}", cells, self.max_cells);
            return Err(PackError::SearchLimitExceeded {
                kind: LimitKind::TableCells,
                limit: self.max_cells,
            });
        }
        let width = usize::try_from(width).map_err(|_| PackError::Overflow)?;
        usize::try_from(cells).map_err(|_| PackError::Overflow)?;

        let table = PackTable::build(&scaled, width);

        let row = table.row(0);
        let total = (residual..=bound)
            .find(|&t| row[t as usize] != UNREACHABLE)
            .ok_or(PackError::Infeasible { quantity })?;

        let Some(mut counts) = table.reconstruct(&scaled, total as usize) else {
            tracing::error!("DP 表格無法回推總量 {} 的分配", total);
            return Err(PackError::Infeasible { quantity });
        };
        counts[0] = counts[0].checked_add(leading).ok_or(PackError::Overflow)?;

        let pack_count = row[total as usize]
            .checked_add(leading)
            .ok_or(PackError::Overflow)?;
        let total_items = leading
            .checked_mul(scaled[0])
            .and_then(|items| items.checked_add(total))
            .and_then(|units| units.checked_mul(divisor))
            .ok_or(PackError::Overflow)?;

        tracing::debug!(
            "DP 搜尋完成：公因數 {}，預先取出最大規格 {} 包，表格 {} 格，最小總量 {}",
            divisor,
            leading,
            cells,
            total_items
        );

        Ok(SearchOutcome {
            best: Some(Candidate::new(counts, total_items, pack_count)),
            explored: cells,
        })
    }
}

/// 將需求拆成「最大規格的整包數」與需要建表的剩餘需求
///
/// `sizes` 為已縮放、由大到小的規格。
fn split_largest(sizes: &[u64], target: u64) -> packfill_core::Result<(u64, u64)> {
    let largest = sizes[0];
    // 只有一種規格時沒有其他規格的包，界限為 0
    let second = sizes.get(1).copied().unwrap_or(0);

    let threshold = (largest - 1)
        .checked_mul(second)
        .ok_or(PackError::Overflow)?;
    if target <= threshold {
        return Ok((0, target));
    }

    let leading = (target - threshold) / largest;
    Ok((leading, target - leading * largest))
}

/// `row(k)[t]`：只用 `sizes[k..]` 恰好湊出 `t` 的最少包數
///
/// 所有列放在同一塊連續記憶體中。
struct PackTable {
    width: usize,
    cells: Vec<u64>,
}

impl PackTable {
    fn build(sizes: &[u64], width: usize) -> Self {
        let n = sizes.len();
        let mut cells = vec![UNREACHABLE; width * (n + 1)];
        cells[n * width] = 0;

        for k in (0..n).rev() {
            let size = sizes[k] as usize;
            let (current, below) = cells[k * width..(k + 2) * width].split_at_mut(width);
            for t in 0..width {
                let mut best = below[t];
                if t >= size && current[t - size] != UNREACHABLE {
                    best = best.min(current[t - size] + 1);
                }
                current[t] = best;
            }
        }

        Self { width, cells }
    }

    fn row(&self, k: usize) -> &[u64] {
        &self.cells[k * self.width..(k + 1) * self.width]
    }

    /// 由大規格開始，取能維持最少包數的最大包數
    ///
    /// 表格與 `total` 不一致時回傳 None。
    fn reconstruct(&self, sizes: &[u64], total: usize) -> Option<Vec<u64>> {
        let mut counts = Vec::with_capacity(sizes.len());
        let mut remaining = total;
        let mut budget = self.row(0)[total];
        if budget == UNREACHABLE {
            return None;
        }

        for (k, &size) in sizes.iter().enumerate() {
            let size = size as usize;
            let next = self.row(k + 1);
            let count = (0..=remaining / size).rev().find(|&c| {
                let rest = next[remaining - c * size];
                rest != UNREACHABLE && rest + c as u64 == budget
            })?;

            remaining -= count * size;
            budget -= count as u64;
            counts.push(count as u64);
        }

        (remaining == 0 && budget == 0).then_some(counts)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ExhaustiveSearch;

    fn normalized(raw: &[i64]) -> Vec<PackSize> {
        let sizes: Vec<PackSize> = raw.iter().map(|&s| PackSize::new(s).unwrap()).collect();
        PackSize::normalize(&sizes)
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(0, 250), 250);
        assert_eq!([250, 500, 1000, 2000, 5000].into_iter().fold(0, gcd), 250);
        assert_eq!(gcd(6, 35), 1);
    }

    #[test]
    fn test_large_order() {
        let sizes = normalized(&[250, 500, 1000, 2000, 5000]);
        let best = DynamicProgrammingSearch::new(&sizes, u64::MAX)
            .run(12_001)
            .unwrap()
            .best
            .unwrap();

        assert_eq!(best.total_items, 12_250);
        assert_eq!(best.pack_count, 4);
        assert_eq!(best.counts, vec![2, 1, 0, 0, 1]);
    }

    #[test]
    fn test_gcd_reduction_keeps_table_small() {
        let sizes = normalized(&[250, 500, 1000, 2000, 5000]);
        let outcome = DynamicProgrammingSearch::new(&sizes, u64::MAX)
            .run(12_001)
            .unwrap();

        // 12001 / 250 向上取整為 49，表格 6 列 × 50 欄
        assert_eq!(outcome.explored, 300);
    }

    #[test]
    fn test_coprime_sizes() {
        // 只用 3 與 5：7 無法恰好湊出，最小可行為 8 = 5+3
        let sizes = normalized(&[3, 5]);
        let best = DynamicProgrammingSearch::new(&sizes, u64::MAX)
            .run(7)
            .unwrap()
            .best
            .unwrap();

        assert_eq!(best.total_items, 8);
        assert_eq!(best.counts, vec![1, 1]);
    }

    #[test]
    fn test_matches_exhaustive_on_ties() {
        for raw in [
            &[4, 6, 8][..],
            &[3, 5, 7, 11][..],
            &[23, 31, 53][..],
            &[1, 2, 5, 10][..],
        ] {
            let sizes = normalized(raw);
            for quantity in 0..120 {
                let dp = DynamicProgrammingSearch::new(&sizes, u64::MAX)
                    .run(quantity)
                    .unwrap()
                    .best;
                let exhaustive = ExhaustiveSearch::new(&sizes, u64::MAX)
                    .run(quantity)
                    .unwrap()
                    .best;
                assert_eq!(dp, exhaustive, "sizes {:?}, quantity {}", raw, quantity);
            }
        }
    }

    #[test]
    fn test_split_largest() {
        // 縮放後的標準目錄：界限 (20 - 1) × 8 = 152
        let scaled = [20, 8, 4, 2, 1];
        assert_eq!(split_largest(&scaled, 49).unwrap(), (0, 49));
        assert_eq!(split_largest(&scaled, 152).unwrap(), (0, 152));
        assert_eq!(split_largest(&scaled, 40_000_000).unwrap(), (1_999_992, 160));

        // 單一規格：全部由該規格湊出
        assert_eq!(split_largest(&[3], 10).unwrap(), (3, 1));
    }

    #[test]
    fn test_huge_quantity_keeps_table_small() {
        let sizes = normalized(&[250, 500, 1000, 2000, 5000]);
        let outcome = DynamicProgrammingSearch::new(&sizes, 10_000)
            .run(10_000_000_000)
            .unwrap();

        let best = outcome.best.unwrap();
        assert_eq!(best.total_items, 10_000_000_000);
        assert_eq!(best.pack_count, 2_000_000);
        assert_eq!(best.counts, vec![2_000_000, 0, 0, 0, 0]);
        // 剩餘 160 單位，表格 6 列 × 161 欄
        assert_eq!(outcome.explored, 966);
    }

    #[test]
    fn test_unit_pack_large_order_memory() {
        // 最小規格為 1 時，表格寬度只與最大兩種規格有關，與需求無關
        let sizes = normalized(&[1, 7, 13, 250]);
        let outcome = DynamicProgrammingSearch::new(&sizes, 20_000)
            .run(8_000_000)
            .unwrap();

        let best = outcome.best.unwrap();
        assert_eq!(best.total_items, 8_000_000);
        assert_eq!(best.counts, vec![32_000, 0, 0, 0]);
        // 界限 249 × 13 = 3237，剩餘 3250，表格 5 列 × 3251 欄
        assert_eq!(outcome.explored, 16_255);
    }

    #[test]
    fn test_single_size_huge_quantity() {
        let sizes = normalized(&[250]);
        let outcome = DynamicProgrammingSearch::new(&sizes, 10)
            .run(1_000_000_001)
            .unwrap();

        let best = outcome.best.unwrap();
        assert_eq!(best.total_items, 1_000_000_250);
        assert_eq!(best.counts, vec![4_000_001]);
    }

    #[test]
    fn test_reconstruct_rejects_inconsistent_table() {
        let scaled = [3, 2];
        let mut table = PackTable::build(&scaled, 6);
        assert_eq!(table.reconstruct(&scaled, 5), Some(vec![1, 1]));

        // 聲稱 5 只需 1 包，但沒有任何規格能做到
        table.cells[5] = 1;
        assert_eq!(table.reconstruct(&scaled, 5), None);
        assert_eq!(table.reconstruct(&scaled, 1), None);
    }

    #[test]
    fn test_table_limit() {
        // 兩種相近的大規格使界限高於需求，表格寬度隨需求增長
        let sizes = normalized(&[99, 100]);
        let err = DynamicProgrammingSearch::new(&sizes, 100)
            .run(1_000)
            .unwrap_err();

        assert_eq!(
            err,
            PackError::SearchLimitExceeded {
                kind: LimitKind::TableCells,
                limit: 100,
            }
        );
    }
}
