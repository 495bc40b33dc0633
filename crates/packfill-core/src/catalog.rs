//! 產品與包裝規格目錄

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::{PackError, PackSize, Result};

/// 產品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: Uuid,

    /// 產品名稱
    pub name: String,
}

impl Product {
    /// 創建新的產品
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// 產品的一種包裝規格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    /// 包裝ID
    pub id: Uuid,

    /// 所屬產品ID
    pub product_id: Uuid,

    /// 每包件數
    pub size: PackSize,
}

impl Pack {
    /// 創建新的包裝規格
    pub fn new(product_id: Uuid, size: PackSize) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            size,
        }
    }
}

/// 包裝規格查詢介面
///
/// 分配計算只需要某產品目前設定的規格清單，不關心其來源。
pub trait PackCatalog {
    /// 查詢產品的所有包裝規格
    fn pack_sizes(&self, product_id: Uuid) -> Result<Vec<PackSize>>;
}

impl<T: PackCatalog + ?Sized> PackCatalog for &T {
    fn pack_sizes(&self, product_id: Uuid) -> Result<Vec<PackSize>> {
        (**self).pack_sizes(product_id)
    }
}

impl<T: PackCatalog + ?Sized> PackCatalog for std::sync::Arc<T> {
    fn pack_sizes(&self, product_id: Uuid) -> Result<Vec<PackSize>> {
        (**self).pack_sizes(product_id)
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    products: HashMap<Uuid, Product>,
    packs: HashMap<Uuid, Pack>,
}

/// 記憶體內的產品/包裝目錄
#[derive(Debug, Default)]
pub struct InMemoryPackCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryPackCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|e| PackError::CatalogError(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|e| PackError::CatalogError(e.to_string()))
    }

    /// 新增產品
    pub fn add_product(&self, name: impl Into<String>) -> Result<Product> {
        let product = Product::new(name.into());
        self.write()?.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// 查詢產品
    pub fn product(&self, product_id: Uuid) -> Result<Product> {
        self.read()?
            .products
            .get(&product_id)
            .cloned()
            .ok_or(PackError::ProductNotFound(product_id))
    }

    /// 所有產品（依名稱排序）
    pub fn products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.read()?.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }

    /// 更新產品名稱，包裝規格不受影響
    pub fn update_product(&self, product_id: Uuid, name: impl Into<String>) -> Result<Product> {
        let mut state = self.write()?;
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or(PackError::ProductNotFound(product_id))?;
        product.name = name.into();
        Ok(product.clone())
    }

    /// 刪除產品，並一併刪除其包裝規格
    pub fn remove_product(&self, product_id: Uuid) -> Result<Product> {
        let mut state = self.write()?;
        let product = state
            .products
            .remove(&product_id)
            .ok_or(PackError::ProductNotFound(product_id))?;
        state.packs.retain(|_, pack| pack.product_id != product_id);
        Ok(product)
    }

    /// 為產品新增包裝規格
    pub fn add_pack(&self, product_id: Uuid, size: i64) -> Result<Pack> {
        let size = PackSize::new(size)?;
        let mut state = self.write()?;
        if !state.products.contains_key(&product_id) {
            return Err(PackError::ProductNotFound(product_id));
        }
        let pack = Pack::new(product_id, size);
        state.packs.insert(pack.id, pack.clone());
        Ok(pack)
    }

    /// 查詢包裝規格
    pub fn pack(&self, pack_id: Uuid) -> Result<Pack> {
        self.read()?
            .packs
            .get(&pack_id)
            .cloned()
            .ok_or(PackError::PackNotFound(pack_id))
    }

    /// 修改包裝規格的每包件數
    pub fn update_pack_size(&self, pack_id: Uuid, size: i64) -> Result<Pack> {
        let size = PackSize::new(size)?;
        let mut state = self.write()?;
        let pack = state
            .packs
            .get_mut(&pack_id)
            .ok_or(PackError::PackNotFound(pack_id))?;
        pack.size = size;
        Ok(pack.clone())
    }

    /// 刪除包裝規格
    pub fn remove_pack(&self, pack_id: Uuid) -> Result<Pack> {
        self.write()?
            .packs
            .remove(&pack_id)
            .ok_or(PackError::PackNotFound(pack_id))
    }

    /// 產品的所有包裝（規格由大到小，同規格依ID排序）
    pub fn packs_for(&self, product_id: Uuid) -> Result<Vec<Pack>> {
        let state = self.read()?;
        if !state.products.contains_key(&product_id) {
            return Err(PackError::ProductNotFound(product_id));
        }
        let mut packs: Vec<Pack> = state
            .packs
            .values()
            .filter(|pack| pack.product_id == product_id)
            .cloned()
            .collect();
        packs.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
        Ok(packs)
    }
}

impl PackCatalog for InMemoryPackCatalog {
    fn pack_sizes(&self, product_id: Uuid) -> Result<Vec<PackSize>> {
        Ok(self
            .packs_for(product_id)?
            .into_iter()
            .map(|pack| pack.size)
            .collect())
    }
}
