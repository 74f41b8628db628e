//! 髒標記追蹤

use std::collections::{BTreeSet, HashMap, HashSet};

/// 髒標記追蹤器
///
/// 追蹤哪些成品報表需要重新計算，並維護子件 → 成品的反向索引，
/// 讓任一子件的庫存變動都能找到受影響的成品。
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_finished: HashSet<String>,
    used_by: HashMap<String, HashSet<String>>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 登記成品使用的子件（取代先前的登記）
    pub fn register<'a>(&mut self, finished_sku: &str, component_skus: impl IntoIterator<Item = &'a str>) {
        self.unregister(finished_sku);

        for component_sku in component_skus {
            self.used_by
                .entry(component_sku.to_string())
                .or_default()
                .insert(finished_sku.to_string());
        }
    }

    /// 移除成品的所有子件登記
    pub fn unregister(&mut self, finished_sku: &str) {
        self.used_by.retain(|_, finished| {
            finished.remove(finished_sku);
            !finished.is_empty()
        });
    }

    /// 標記成品為髒
    pub fn mark_dirty(&mut self, finished_sku: &str) {
        self.dirty_finished.insert(finished_sku.to_string());
    }

    /// 某 SKU 的庫存記錄變動：標記該 SKU 本身及所有使用它的成品
    pub fn mark_inventory_changed(&mut self, sku: &str) {
        self.dirty_finished.insert(sku.to_string());

        if let Some(finished) = self.used_by.get(sku) {
            self.dirty_finished.extend(finished.iter().cloned());
        }
    }

    /// 檢查成品是否為髒
    pub fn is_dirty(&self, finished_sku: &str) -> bool {
        self.dirty_finished.contains(finished_sku)
    }

    /// 清除單一成品的髒標記
    pub fn clear_one(&mut self, finished_sku: &str) {
        self.dirty_finished.remove(finished_sku);
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_finished.clear();
    }

    /// 獲取所有髒成品（排序後）
    pub fn dirty_skus(&self) -> Vec<String> {
        self.dirty_finished
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 使用此子件的成品（排序後）
    pub fn finished_using(&self, component_sku: &str) -> Vec<String> {
        self.used_by
            .get(component_sku)
            .map(|finished| finished.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect())
            .unwrap_or_default()
    }
}
