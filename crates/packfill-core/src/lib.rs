//! # Packfill Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod pack;

// Re-export 主要類型
pub use catalog::{InMemoryPackCatalog, Pack, PackCatalog, Product};
pub use config::{FulfillmentConfig, SearchStrategy};
pub use pack::{Allocation, FulfillmentResult, PackSize, Quantity};

use uuid::Uuid;

/// 包裝分配錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("無可用包裝規格，無法滿足需求數量 {quantity}")]
    Infeasible { quantity: Quantity },

    #[error("需求數量不可為負數: {0}")]
    NegativeQuantity(i64),

    #[error("無效的包裝規格（必須為正整數）: {0}")]
    InvalidPackSize(i64),

    #[error("超出搜尋上限: {kind} 上限 {limit}")]
    SearchLimitExceeded { kind: LimitKind, limit: u64 },

    #[error("數量計算溢位")]
    Overflow,

    #[error("產品未設定任何包裝規格: {0}")]
    NoPacksConfigured(Uuid),

    #[error("找不到產品: {0}")]
    ProductNotFound(Uuid),

    #[error("找不到包裝: {0}")]
    PackNotFound(Uuid),

    #[error("包裝目錄錯誤: {0}")]
    CatalogError(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

/// 觸發的搜尋上限種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// 窮舉搜尋節點數
    ExploredNodes,
    /// 動態規劃表格大小
    TableCells,
    /// 需求數量
    Quantity,
    /// 窮舉搜尋深度（規格種類數）
    Depth,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitKind::ExploredNodes => write!(f, "搜尋節點數"),
            LimitKind::TableCells => write!(f, "DP 表格大小"),
            LimitKind::Quantity => write!(f, "需求數量"),
            LimitKind::Depth => write!(f, "窮舉搜尋深度"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
