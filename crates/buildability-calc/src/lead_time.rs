//! 交期瀑布計算

use std::cmp::Reverse;
use std::collections::HashSet;

use buildability_core::{
    BillOfMaterials, CascadeEntry, InventorySnapshot, LeadTimeCascade, LimitingComponent,
};

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 建立交期瀑布
    ///
    /// 只納入交期已知的子件（未知交期不視為零）。限制子件排在前面，
    /// 各組內依交期由長到短、再依 SKU 排序；同一 SKU 只保留 BOM 中第一次出現的項目。
    pub fn cascade(
        bom: &BillOfMaterials,
        snapshot: &InventorySnapshot,
        limiting: &[LimitingComponent],
    ) -> LeadTimeCascade {
        let limiting_skus: HashSet<&str> = limiting.iter().map(|c| c.sku.as_str()).collect();
        let mut seen = HashSet::new();

        let mut entries: Vec<CascadeEntry> = bom
            .components
            .iter()
            .filter(|component| seen.insert(component.sku.as_str()))
            .filter_map(|component| {
                let lead_time_days = snapshot.get(&component.sku)?.lead_time_days?;
                Some(CascadeEntry {
                    sku: component.sku.clone(),
                    name: component.name.clone(),
                    lead_time_days,
                    limiting: limiting_skus.contains(component.sku.as_str()),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            (!a.limiting, Reverse(a.lead_time_days), &a.sku)
                .cmp(&(!b.limiting, Reverse(b.lead_time_days), &b.sku))
        });

        tracing::debug!(
            "成品 {} 交期瀑布 {} 項，最長等待 {:?} 天",
            bom.finished_sku,
            entries.len(),
            entries.first().map(|e| e.lead_time_days)
        );

        LeadTimeCascade { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildability_core::{ComponentRequirement, InventoryItem};
    use rust_decimal::Decimal;

    fn limiting(sku: &str) -> LimitingComponent {
        LimitingComponent {
            sku: sku.to_string(),
            available: Decimal::ZERO,
            needed: Decimal::ONE,
            can_build: 0,
        }
    }

    fn bom() -> BillOfMaterials {
        ["BOTTLE", "CAP", "LABEL", "OIL"]
            .iter()
            .fold(BillOfMaterials::new("FG-001"), |bom, sku| {
                bom.with_component(ComponentRequirement::new(*sku, sku.to_lowercase(), Decimal::ONE))
            })
    }

    fn snapshot() -> InventorySnapshot {
        InventorySnapshot::from_items(vec![
            InventoryItem::new("BOTTLE", Decimal::ZERO).with_lead_time_days(14),
            InventoryItem::new("CAP", Decimal::ZERO).with_lead_time_days(30),
            InventoryItem::new("LABEL", Decimal::ZERO).with_lead_time_days(7),
            // OIL 沒有交期資料
            InventoryItem::new("OIL", Decimal::ZERO),
        ])
    }

    #[test]
    fn test_cascade_without_limiting_components() {
        let cascade = LeadTimeCalculator::cascade(&bom(), &snapshot(), &[]);

        let skus: Vec<_> = cascade.entries.iter().map(|e| e.sku.as_str()).collect();
        assert_eq!(skus, vec!["CAP", "BOTTLE", "LABEL"]);
        assert_eq!(cascade.ready_in_days(), Some(30));
        assert_eq!(cascade.entries[0].name, "cap");
    }

    #[test]
    fn test_limiting_components_come_first() {
        let cascade =
            LeadTimeCalculator::cascade(&bom(), &snapshot(), &[limiting("LABEL"), limiting("BOTTLE")]);

        let skus: Vec<_> = cascade.entries.iter().map(|e| e.sku.as_str()).collect();
        assert_eq!(skus, vec!["BOTTLE", "LABEL", "CAP"]);
        assert!(cascade.entries[0].limiting);
        assert!(!cascade.entries[2].limiting);
        assert_eq!(cascade.ready_in_days(), Some(14));
    }

    #[test]
    fn test_limiting_without_lead_time_falls_back() {
        let cascade = LeadTimeCalculator::cascade(&bom(), &snapshot(), &[limiting("OIL")]);

        assert_eq!(cascade.ready_in_days(), Some(30));
        assert!(cascade.entries.iter().all(|e| !e.limiting));
    }

    #[test]
    fn test_duplicate_skus_and_ties() {
        let bom = BillOfMaterials::new("FG-001")
            .with_component(ComponentRequirement::new("B", "first", Decimal::ONE))
            .with_component(ComponentRequirement::new("A", "a", Decimal::ONE))
            .with_component(ComponentRequirement::new("B", "second", Decimal::from(2)));
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new("A", Decimal::ZERO).with_lead_time_days(10),
            InventoryItem::new("B", Decimal::ZERO).with_lead_time_days(10),
        ]);

        let cascade = LeadTimeCalculator::cascade(&bom, &snapshot, &[]);

        assert_eq!(cascade.entries.len(), 2);
        assert_eq!(cascade.entries[0].sku, "A");
        assert_eq!(cascade.entries[1].name, "first");
    }

    #[test]
    fn test_empty_cascade() {
        let cascade = LeadTimeCalculator::cascade(&BillOfMaterials::new("FG-001"), &snapshot(), &[]);
        assert!(cascade.is_empty());
    }
}
