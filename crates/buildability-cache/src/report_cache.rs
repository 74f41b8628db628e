//! 報表快取

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use buildability_calc::ReportAssembler;
use buildability_core::{BillOfMaterials, BuildabilityReport, InventorySnapshot};

use crate::DirtyTracker;

/// 以成品 SKU 為鍵的報表快取
///
/// 失效條件：BOM 變動、成品庫存記錄變動、任一子件庫存記錄變動。
/// 快取不會自行偵測變動，必須由呼叫端通知。
#[derive(Debug, Default)]
pub struct ReportCache {
    reports: HashMap<String, BuildabilityReport>,
    tracker: DirtyTracker,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 獲取仍有效的報表
    pub fn get(&self, finished_sku: &str) -> Option<&BuildabilityReport> {
        if self.tracker.is_dirty(finished_sku) {
            return None;
        }
        self.reports.get(finished_sku)
    }

    /// 獲取報表；不存在或已失效時重新組裝
    pub fn get_or_assemble(
        &mut self,
        bom: &BillOfMaterials,
        snapshot: &InventorySnapshot,
        assembler: &ReportAssembler,
    ) -> &BuildabilityReport {
        let sku = bom.finished_sku.as_str();
        let needs_refresh = self.tracker.is_dirty(sku) || !self.reports.contains_key(sku);

        if needs_refresh {
            tracing::debug!("報表 {} 需要重新計算", sku);
            self.tracker.register(sku, bom.component_skus());
            self.tracker.clear_one(sku);
        }

        match self.reports.entry(sku.to_string()) {
            Entry::Occupied(mut entry) => {
                if needs_refresh {
                    entry.insert(assembler.assemble(bom, snapshot));
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(assembler.assemble(bom, snapshot)),
        }
    }

    /// 並行重算所有失效或尚未快取的報表，返回重算數量
    pub fn refresh(
        &mut self,
        boms: &[BillOfMaterials],
        snapshot: &InventorySnapshot,
        assembler: &ReportAssembler,
    ) -> usize {
        let stale: Vec<BillOfMaterials> = boms
            .iter()
            .filter(|bom| {
                self.tracker.is_dirty(&bom.finished_sku) || !self.reports.contains_key(&bom.finished_sku)
            })
            .cloned()
            .collect();

        let reports = assembler.assemble_many(&stale, snapshot);

        for (bom, report) in stale.iter().zip(reports) {
            self.tracker.register(&bom.finished_sku, bom.component_skus());
            self.tracker.clear_one(&bom.finished_sku);
            self.reports.insert(bom.finished_sku.clone(), report);
        }

        tracing::debug!("重算報表 {} 份", stale.len());
        stale.len()
    }

    /// 成品的 BOM 已變動
    pub fn invalidate_bom(&mut self, finished_sku: &str) {
        self.tracker.mark_dirty(finished_sku);
    }

    /// 某 SKU（成品或子件）的庫存記錄已變動
    pub fn invalidate_inventory(&mut self, sku: &str) {
        self.tracker.mark_inventory_changed(sku);
    }

    /// 移除成品的報表
    pub fn remove(&mut self, finished_sku: &str) -> Option<BuildabilityReport> {
        self.tracker.unregister(finished_sku);
        self.tracker.clear_one(finished_sku);
        self.reports.remove(finished_sku)
    }

    /// 失效的成品 SKU
    pub fn stale_skus(&self) -> Vec<String> {
        self.tracker
            .dirty_skus()
            .into_iter()
            .filter(|sku| self.reports.contains_key(sku))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildability_core::{ComponentRequirement, InventoryItem};
    use rust_decimal::Decimal;

    fn candle_bom() -> BillOfMaterials {
        BillOfMaterials::new("CANDLE")
            .with_component(ComponentRequirement::new("WAX", "Wax", Decimal::from(2)))
            .with_component(ComponentRequirement::new("WICK", "Wick", Decimal::ONE))
    }

    fn snapshot(wax: i64, wick: i64) -> InventorySnapshot {
        InventorySnapshot::from_items(vec![
            InventoryItem::new("WAX", Decimal::from(wax)),
            InventoryItem::new("WICK", Decimal::from(wick)),
            InventoryItem::new("CANDLE", Decimal::from(5)),
        ])
    }

    #[test]
    fn test_cached_until_component_invalidated() {
        let assembler = ReportAssembler::default();
        let mut cache = ReportCache::new();
        let bom = candle_bom();

        assert_eq!(cache.get_or_assemble(&bom, &snapshot(10, 3), &assembler).max_buildable, 3);

        // 未通知變動時沿用快取
        assert_eq!(cache.get_or_assemble(&bom, &snapshot(10, 4), &assembler).max_buildable, 3);

        cache.invalidate_inventory("WICK");
        assert!(cache.get("CANDLE").is_none());
        assert_eq!(cache.stale_skus(), vec!["CANDLE"]);

        assert_eq!(cache.get_or_assemble(&bom, &snapshot(10, 4), &assembler).max_buildable, 4);
        assert!(cache.get("CANDLE").is_some());
    }

    #[test]
    fn test_finished_good_change_invalidates() {
        let assembler = ReportAssembler::default();
        let mut cache = ReportCache::new();
        cache.get_or_assemble(&candle_bom(), &snapshot(10, 3), &assembler);

        cache.invalidate_inventory("CANDLE");
        assert!(cache.get("CANDLE").is_none());
    }

    #[test]
    fn test_bom_change_reregisters_components() {
        let assembler = ReportAssembler::default();
        let mut cache = ReportCache::new();
        cache.get_or_assemble(&candle_bom(), &snapshot(10, 3), &assembler);

        let new_bom = BillOfMaterials::new("CANDLE")
            .with_component(ComponentRequirement::new("WAX", "Wax", Decimal::ONE));
        cache.invalidate_bom("CANDLE");
        assert_eq!(cache.get_or_assemble(&new_bom, &snapshot(10, 3), &assembler).max_buildable, 10);

        // WICK 已不在 BOM 中，不再影響 CANDLE
        cache.invalidate_inventory("WICK");
        assert!(cache.get("CANDLE").is_some());
    }

    #[test]
    fn test_refresh_only_recomputes_stale() {
        let assembler = ReportAssembler::default();
        let mut cache = ReportCache::new();
        let boms = vec![
            candle_bom(),
            BillOfMaterials::new("DIFFUSER")
                .with_component(ComponentRequirement::new("OIL", "Oil", Decimal::ONE)),
        ];

        assert_eq!(cache.refresh(&boms, &snapshot(10, 3), &assembler), 2);
        assert_eq!(cache.refresh(&boms, &snapshot(10, 3), &assembler), 0);

        cache.invalidate_inventory("OIL");
        assert_eq!(cache.refresh(&boms, &snapshot(10, 3), &assembler), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_remove() {
        let assembler = ReportAssembler::default();
        let mut cache = ReportCache::new();
        cache.get_or_assemble(&candle_bom(), &snapshot(10, 3), &assembler);

        assert!(cache.remove("CANDLE").is_some());
        assert!(cache.is_empty());
        assert!(cache.get("CANDLE").is_none());
    }
}
