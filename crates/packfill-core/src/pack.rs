//! 包裝規格與分配結果模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroU64;

use crate::{PackError, Result};

/// 需求數量（件數）
pub type Quantity = u64;

/// 包裝規格：每包所含件數，必為正整數
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PackSize(NonZeroU64);

impl PackSize {
    /// 由呼叫端提供的原始數值建立包裝規格
    ///
    /// 零或負數屬於呼叫端違約，回傳 [`PackError::InvalidPackSize`]。
    pub fn new(raw: i64) -> Result<Self> {
        u64::try_from(raw)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or(PackError::InvalidPackSize(raw))
    }

    /// 每包件數
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// 將規格清單正規化：去除重複並按由大到小排序
    ///
    /// 搜尋固定以此順序處理規格，確保結果可重現。
    pub fn normalize(sizes: &[PackSize]) -> Vec<PackSize> {
        let mut sorted = sizes.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        sorted
    }
}

impl TryFrom<u64> for PackSize {
    type Error = PackError;

    fn try_from(value: u64) -> Result<Self> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or(PackError::InvalidPackSize(0))
    }
}

impl From<PackSize> for u64 {
    fn from(size: PackSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for PackSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// 包裝分配：規格 → 包數
///
/// 只記錄包數大於零的規格。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    counts: BTreeMap<u64, u64>,
}

impl Allocation {
    /// 創建空的分配
    pub fn new() -> Self {
        Self::default()
    }

    /// 由「由大到小排列的規格」與對應包數建立分配
    pub fn from_counts(sizes: &[PackSize], counts: &[u64]) -> Self {
        let mut allocation = Self::new();
        for (size, &count) in sizes.iter().zip(counts) {
            allocation.add(*size, count);
        }
        allocation
    }

    /// 增加某規格的包數，零包數不記錄
    pub fn add(&mut self, size: PackSize, count: u64) {
        if count > 0 {
            *self.counts.entry(size.get()).or_insert(0) += count;
        }
    }

    /// 某規格的包數（未使用則為 0）
    pub fn get(&self, size: u64) -> u64 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// 總出貨件數 Σ size·count
    pub fn total_items(&self) -> Result<u64> {
        self.counts.iter().try_fold(0u64, |acc, (&size, &count)| {
            size.checked_mul(count)
                .and_then(|items| acc.checked_add(items))
                .ok_or(PackError::Overflow)
        })
    }

    /// 總包數
    pub fn pack_count(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 使用的規格種類數
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 依規格由小到大迭代 (size, count)
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&size, &count)| (size, count))
    }
}

impl FromIterator<(u64, u64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let counts = iter.into_iter().filter(|&(_, count)| count > 0).fold(
            BTreeMap::new(),
            |mut counts, (size, count)| {
                *counts.entry(size).or_insert(0) += count;
                counts
            },
        );
        Self { counts }
    }
}

impl<const N: usize> From<[(u64, u64); N]> for Allocation {
    fn from(pairs: [(u64, u64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// 對外回報的分配結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResult {
    /// 總出貨件數
    pub total_items: u64,

    /// 各規格包數
    pub packs: Allocation,
}

impl FulfillmentResult {
    /// 空訂單的結果（0 件、無包裝）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 總包數
    pub fn pack_count(&self) -> u64 {
        self.packs.pack_count()
    }

    /// 超出需求的件數（浪費量）
    pub fn surplus(&self, requested: Quantity) -> u64 {
        self.total_items.saturating_sub(requested)
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sizes(raw: &[i64]) -> Vec<PackSize> {
        raw.iter().map(|&s| PackSize::new(s).unwrap()).collect()
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(-250)]
    #[case(i64::MIN)]
    fn test_pack_size_rejects_non_positive(#[case] raw: i64) {
        assert_eq!(PackSize::new(raw), Err(PackError::InvalidPackSize(raw)));
    }

    #[test]
    fn test_pack_size_accepts_positive() {
        assert_eq!(PackSize::new(250).unwrap().get(), 250);
        assert_eq!(PackSize::new(i64::MAX).unwrap().get(), i64::MAX as u64);
    }

    #[test]
    fn test_normalize_sorts_descending_and_dedups() {
        let normalized = PackSize::normalize(&sizes(&[500, 250, 5000, 500, 1000]));
        let raw: Vec<u64> = normalized.iter().map(|s| s.get()).collect();
        assert_eq!(raw, vec![5000, 1000, 500, 250]);
    }

    #[test]
    fn test_allocation_skips_zero_counts() {
        let allocation = Allocation::from_counts(&sizes(&[5000, 2000, 250]), &[2, 0, 1]);

        assert_eq!(allocation.len(), 2);
        assert_eq!(allocation.get(5000), 2);
        assert_eq!(allocation.get(2000), 0);
        assert_eq!(allocation.total_items().unwrap(), 10_250);
        assert_eq!(allocation.pack_count(), 3);
    }

    #[test]
    fn test_allocation_total_overflow() {
        let allocation = Allocation::from([(u64::MAX, 2)]);
        assert_eq!(allocation.total_items(), Err(PackError::Overflow));
    }

    #[test]
    fn test_result_json_shape() {
        let result = FulfillmentResult {
            total_items: 750,
            packs: Allocation::from([(500, 1), (250, 1)]),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "total_items": 750, "packs": { "250": 1, "500": 1 } })
        );

        let parsed: FulfillmentResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.surplus(501), 249);
        assert_eq!(parsed.pack_count(), 2);
    }

    #[test]
    fn test_pack_size_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<PackSize>("0").is_err());
        assert_eq!(serde_json::from_str::<PackSize>("250").unwrap().get(), 250);
    }
}
