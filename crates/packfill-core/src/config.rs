//! 分配搜尋配置

use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// 搜尋策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// 窮舉遞迴搜尋（由大規格到小規格逐一決定包數）
    Exhaustive,

    /// 動態規劃（找零問題形式）
    DynamicProgramming,

    /// 依預估搜尋量自動選擇
    Auto,
}

/// 分配搜尋配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentConfig {
    /// 搜尋策略
    pub strategy: SearchStrategy,

    /// 窮舉搜尋最多可探索的節點數
    pub max_explored_nodes: u64,

    /// 窮舉搜尋最多可處理的規格種類數（即遞迴深度）
    pub max_search_depth: u64,

    /// 動態規劃表格最多可配置的格數（每格 8 位元組）
    pub max_table_cells: u64,

    /// 可接受的最大需求數量（None 表示不限制）
    pub max_quantity: Option<u64>,

    /// Auto 策略：預估葉節點數不超過此值時使用窮舉搜尋
    pub auto_exhaustive_threshold: u64,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Auto,
            max_explored_nodes: 10_000_000,
            max_search_depth: 64,
            max_table_cells: 4_000_000,
            max_quantity: None,
            auto_exhaustive_threshold: 100_000,
        }
    }
}

impl FulfillmentConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置搜尋策略
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// 建構器模式：設置窮舉搜尋節點上限
    pub fn with_max_explored_nodes(mut self, limit: u64) -> Self {
        self.max_explored_nodes = limit;
        self
    }

    /// 建構器模式：設置窮舉搜尋深度上限
    pub fn with_max_search_depth(mut self, limit: u64) -> Self {
        self.max_search_depth = limit;
        self
    }

    /// 建構器模式：設置 DP 表格上限
    pub fn with_max_table_cells(mut self, limit: u64) -> Self {
        self.max_table_cells = limit;
        self
    }

    /// 建構器模式：設置最大需求數量
    pub fn with_max_quantity(mut self, quantity: u64) -> Self {
        self.max_quantity = Some(quantity);
        self
    }

    /// 建構器模式：設置 Auto 策略的窮舉門檻
    pub fn with_auto_exhaustive_threshold(mut self, threshold: u64) -> Self {
        self.auto_exhaustive_threshold = threshold;
        self
    }

    /// 從 JSON 字串載入配置，缺少的欄位使用預設值
    ///
    /// # 範例
    /// ```
    /// # use packfill_core::{FulfillmentConfig, SearchStrategy};
    /// let config = FulfillmentConfig::from_json_str(r#"{ "strategy": "Exhaustive" }"#).unwrap();
    /// assert_eq!(config.strategy, SearchStrategy::Exhaustive);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PackError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.max_explored_nodes == 0 {
            return Err(PackError::InvalidConfig(
                "max_explored_nodes 必須大於 0".to_string(),
            ));
        }
        if self.max_search_depth == 0 {
            return Err(PackError::InvalidConfig(
                "max_search_depth 必須大於 0".to_string(),
            ));
        }
        if self.max_table_cells == 0 {
            return Err(PackError::InvalidConfig(
                "max_table_cells 必須大於 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FulfillmentConfig::new();

        assert_eq!(config.strategy, SearchStrategy::Auto);
        assert_eq!(config.max_quantity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FulfillmentConfig::new()
            .with_strategy(SearchStrategy::DynamicProgramming)
            .with_max_table_cells(1_000)
            .with_max_quantity(50_000);

        assert_eq!(config.strategy, SearchStrategy::DynamicProgramming);
        assert_eq!(config.max_table_cells, 1_000);
        assert_eq!(config.max_quantity, Some(50_000));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            FulfillmentConfig::from_json_str(r#"{ "max_quantity": 1000000 }"#).unwrap();

        assert_eq!(config.max_quantity, Some(1_000_000));
        assert_eq!(config.strategy, SearchStrategy::Auto);
        assert_eq!(config.max_explored_nodes, 10_000_000);
        assert_eq!(config.max_search_depth, 64);
        assert_eq!(config.max_table_cells, 4_000_000);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            FulfillmentConfig::from_json_str(r#"{ "max_explored_nodes": 0 }"#),
            Err(PackError::InvalidConfig(_))
        ));
        assert!(matches!(
            FulfillmentConfig::from_json_str(r#"{ "max_search_depth": 0 }"#),
            Err(PackError::InvalidConfig(_))
        ));
        assert!(matches!(
            FulfillmentConfig::from_json_str(r#"{ "strategy": "Greedy" }"#),
            Err(PackError::InvalidConfig(_))
        ));
    }
}
