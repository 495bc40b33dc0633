//! 依產品查詢包裝規格並計算分配

use packfill_core::{FulfillmentResult, PackCatalog, PackError, Quantity};
use uuid::Uuid;

use crate::FulfillmentCalculator;

/// 包裝分配服務
pub struct FulfillmentService<C> {
    catalog: C,
    calculator: FulfillmentCalculator,
}

impl<C: PackCatalog> FulfillmentService<C> {
    /// 創建新的服務
    pub fn new(catalog: C, calculator: FulfillmentCalculator) -> Self {
        Self {
            catalog,
            calculator,
        }
    }

    /// 為產品計算包裝分配
    ///
    /// 產品沒有任何包裝規格時回傳 [`PackError::NoPacksConfigured`]，
    /// 與「需求為 0」的空分配區分。
    pub fn fulfill(
        &self,
        product_id: Uuid,
        quantity: i64,
    ) -> packfill_core::Result<FulfillmentResult> {
        tracing::info!("包裝分配請求：產品 {}，需求 {}", product_id, quantity);

        let quantity =
            Quantity::try_from(quantity).map_err(|_| PackError::NegativeQuantity(quantity))?;

        let sizes = self.catalog.pack_sizes(product_id)?;
        if sizes.is_empty() {
            tracing::warn!("產品 {} 未設定包裝規格", product_id);
            return Err(PackError::NoPacksConfigured(product_id));
        }

        let report = self.calculator.compute_sizes(quantity, &sizes)?;
        Ok(report.result)
    }

    /// 獲取目錄引用
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// 獲取計算器引用
    pub fn calculator(&self) -> &FulfillmentCalculator {
        &self.calculator
    }
}
