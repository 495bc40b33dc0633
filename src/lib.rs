//! # Packfill
//!
//! 最佳包裝分配：給定需求數量與可用包裝規格，計算出貨件數最少、
//! 其次包數最少的包裝組合。

pub use packfill_calc::{
    compute_fulfillment, FulfillmentCalculator, FulfillmentReport, FulfillmentService,
};
pub use packfill_core::{
    Allocation, FulfillmentConfig, FulfillmentResult, InMemoryPackCatalog, LimitKind, Pack,
    PackCatalog, PackError, PackSize, Product, Quantity, Result, SearchStrategy,
};
