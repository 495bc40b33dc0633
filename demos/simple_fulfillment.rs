//! 簡單包裝分配示例
//!
//! 日誌層級由 `PACKFILL_LOG` 環境變數控制，例如 `PACKFILL_LOG=packfill_calc=debug`。

use packfill::{
    FulfillmentCalculator, FulfillmentConfig, FulfillmentService, InMemoryPackCatalog,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PACKFILL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== 簡單包裝分配示例 ===\n");

    // 建立產品與包裝規格
    let catalog = InMemoryPackCatalog::new();
    let product = catalog.add_product("WIDGET-001")?;
    for size in [250, 500, 1000, 2000, 5000] {
        catalog.add_pack(product.id, size)?;
    }

    println!("包裝規格:");
    for pack in catalog.packs_for(product.id)? {
        println!("  - {} 件/包", pack.size);
    }

    let calculator = FulfillmentCalculator::new(FulfillmentConfig::new());
    let service = FulfillmentService::new(&catalog, calculator);

    println!("\n分配結果:");
    for quantity in [1, 250, 251, 501, 12_001] {
        let result = service.fulfill(product.id, quantity)?;
        println!(
            "  - 需求 {:>6}: 出貨 {:>6} 件，{} 包 -> {}",
            quantity,
            result.total_items,
            result.pack_count(),
            serde_json::to_string(&result.packs)?
        );
    }

    Ok(())
}
