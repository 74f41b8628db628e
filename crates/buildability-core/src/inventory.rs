//! 庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 銷售歷史（需求來源）
///
/// 明確的日均銷量優先；否則由各視窗的銷售總量推算。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesHistory {
    /// 明確指定的日均銷量
    #[serde(default)]
    pub sales_velocity_per_day: Option<Decimal>,

    /// 近 30 天銷售總量
    #[serde(default)]
    pub sales_30_days: Option<Decimal>,

    /// 近 60 天銷售總量
    #[serde(default)]
    pub sales_60_days: Option<Decimal>,

    /// 近 90 天銷售總量
    #[serde(default)]
    pub sales_90_days: Option<Decimal>,
}

impl SalesHistory {
    /// 以明確的日均銷量建立
    pub fn from_velocity(velocity_per_day: Decimal) -> Self {
        Self {
            sales_velocity_per_day: Some(velocity_per_day),
            ..Self::default()
        }
    }

    /// 以各視窗銷售總量建立
    pub fn from_totals(
        sales_30_days: Option<Decimal>,
        sales_60_days: Option<Decimal>,
        sales_90_days: Option<Decimal>,
    ) -> Self {
        Self {
            sales_velocity_per_day: None,
            sales_30_days,
            sales_60_days,
            sales_90_days,
        }
    }
}

/// 補貨批量政策
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPolicy {
    /// 最小訂購量
    #[serde(default)]
    pub minimum_order_qty: Option<u64>,

    /// 訂購倍數（必須是此倍數）
    #[serde(default)]
    pub order_multiple: Option<u64>,

    /// 最大訂購量
    #[serde(default)]
    pub maximum_order_qty: Option<u64>,
}

impl ReorderPolicy {
    /// 建構器模式：設置最小訂購量
    pub fn with_minimum_order_qty(mut self, qty: u64) -> Self {
        self.minimum_order_qty = Some(qty);
        self
    }

    /// 建構器模式：設置訂購倍數
    pub fn with_order_multiple(mut self, multiple: u64) -> Self {
        self.order_multiple = Some(multiple);
        self
    }

    /// 建構器模式：設置最大訂購量
    pub fn with_maximum_order_qty(mut self, qty: u64) -> Self {
        self.maximum_order_qty = Some(qty);
        self
    }

    /// 調整訂購量以符合批量政策
    ///
    /// 數量為零時不下單，直接返回零。
    pub fn adjust(&self, mut quantity: u64) -> u64 {
        if quantity == 0 {
            return 0;
        }

        if let Some(min_qty) = self.minimum_order_qty {
            quantity = quantity.max(min_qty);
        }

        if let Some(multiple) = self.order_multiple.filter(|m| *m > 0) {
            let remainder = quantity % multiple;
            if remainder > 0 {
                quantity = quantity.saturating_add(multiple - remainder);
            }
        }

        if let Some(max_qty) = self.maximum_order_qty {
            quantity = quantity.min(max_qty);
        }

        quantity
    }
}

/// 庫存記錄（成品與子件共用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// SKU
    pub sku: String,

    /// 現有庫存
    pub stock_on_hand: Decimal,

    /// 在途（已下單未到貨）
    #[serde(default)]
    pub on_order: Decimal,

    /// 再訂購點
    #[serde(default)]
    pub reorder_point: Option<Decimal>,

    /// 安全庫存（缺省時退回再訂購點）
    #[serde(default)]
    pub safety_stock: Option<Decimal>,

    /// 單位成本
    #[serde(default)]
    pub unit_cost: Option<Decimal>,

    /// 單位售價
    #[serde(default)]
    pub unit_price: Option<Decimal>,

    /// 供應商交期（天）
    #[serde(default)]
    pub lead_time_days: Option<u32>,

    /// 銷售歷史
    #[serde(flatten)]
    pub sales: SalesHistory,

    /// 補貨批量政策
    #[serde(default)]
    pub reorder_policy: Option<ReorderPolicy>,
}

impl InventoryItem {
    /// 創建新的庫存記錄
    pub fn new(sku: impl Into<String>, stock_on_hand: Decimal) -> Self {
        Self {
            sku: sku.into(),
            stock_on_hand,
            on_order: Decimal::ZERO,
            reorder_point: None,
            safety_stock: None,
            unit_cost: None,
            unit_price: None,
            lead_time_days: None,
            sales: SalesHistory::default(),
            reorder_policy: None,
        }
    }

    /// 建構器模式：設置在途數量
    pub fn with_on_order(mut self, on_order: Decimal) -> Self {
        self.on_order = on_order;
        self
    }

    /// 建構器模式：設置再訂購點
    pub fn with_reorder_point(mut self, reorder_point: Decimal) -> Self {
        self.reorder_point = Some(reorder_point);
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, safety_stock: Decimal) -> Self {
        self.safety_stock = Some(safety_stock);
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_unit_cost(mut self, unit_cost: Decimal) -> Self {
        self.unit_cost = Some(unit_cost);
        self
    }

    /// 建構器模式：設置單位售價
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// 建構器模式：設置交期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = Some(days);
        self
    }

    /// 建構器模式：設置銷售歷史
    pub fn with_sales(mut self, sales: SalesHistory) -> Self {
        self.sales = sales;
        self
    }

    /// 建構器模式：設置補貨批量政策
    pub fn with_reorder_policy(mut self, policy: ReorderPolicy) -> Self {
        self.reorder_policy = Some(policy);
        self
    }

    /// 有效安全庫存（安全庫存，否則再訂購點）
    pub fn effective_safety_stock(&self) -> Option<Decimal> {
        self.safety_stock.or(self.reorder_point)
    }

    /// 庫存加在途
    pub fn inventory_position(&self) -> Decimal {
        self.stock_on_hand.saturating_add(self.on_order)
    }

    /// 檢查是否已達再訂購點
    pub fn is_below_reorder_point(&self) -> bool {
        self.reorder_point
            .is_some_and(|point| self.stock_on_hand <= point)
    }
}

/// 庫存快照（SKU → 庫存記錄）
///
/// 引擎只讀取快照，不做任何修改；快照的一致性由呼叫端負責。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    items: HashMap<String, InventoryItem>,
}

impl InventorySnapshot {
    /// 創建空快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 由庫存記錄列表建立（相同 SKU 以後者為準）
    pub fn from_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        items.into_iter().collect()
    }

    /// 加入或取代一筆記錄，返回被取代的舊記錄
    pub fn insert(&mut self, item: InventoryItem) -> Option<InventoryItem> {
        self.items.insert(item.sku.clone(), item)
    }

    /// 查詢 SKU
    pub fn get(&self, sku: &str) -> Option<&InventoryItem> {
        self.items.get(sku)
    }

    /// 查詢現有庫存（缺少記錄時為零）
    pub fn stock_on_hand(&self, sku: &str) -> Decimal {
        self.get(sku)
            .map(|item| item.stock_on_hand)
            .unwrap_or(Decimal::ZERO)
    }

    /// 是否包含 SKU
    pub fn contains(&self, sku: &str) -> bool {
        self.items.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<InventoryItem> for InventorySnapshot {
    fn from_iter<T: IntoIterator<Item = InventoryItem>>(iter: T) -> Self {
        let items = iter
            .into_iter()
            .map(|item| (item.sku.clone(), item))
            .collect();
        Self { items }
    }
}

impl From<HashMap<String, InventoryItem>> for InventorySnapshot {
    fn from(items: HashMap<String, InventoryItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_inventory_item() {
        let item = InventoryItem::new("SERUM-30ML", Decimal::from(100))
            .with_on_order(Decimal::from(40))
            .with_reorder_point(Decimal::from(25));

        assert_eq!(item.sku, "SERUM-30ML");
        assert_eq!(item.inventory_position(), Decimal::from(140));
        assert_eq!(item.effective_safety_stock(), Some(Decimal::from(25)));
        assert!(!item.is_below_reorder_point());
    }

    #[test]
    fn test_safety_stock_takes_precedence_over_reorder_point() {
        let item = InventoryItem::new("SERUM-30ML", Decimal::from(10))
            .with_reorder_point(Decimal::from(25))
            .with_safety_stock(Decimal::from(15));

        assert_eq!(item.effective_safety_stock(), Some(Decimal::from(15)));
        assert!(item.is_below_reorder_point());
    }

    #[test]
    fn test_reorder_point_boundary_is_inclusive() {
        let item = InventoryItem::new("LABEL-01", Decimal::from(25))
            .with_reorder_point(Decimal::from(25));

        assert!(item.is_below_reorder_point());
        assert!(!InventoryItem::new("LABEL-01", Decimal::from(25)).is_below_reorder_point());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 24)]
    #[case(30, 36)]
    #[case(100, 108)]
    #[case(300, 288)]
    fn test_case_pack_policy(#[case] raw: u64, #[case] expected: u64) {
        // 至少兩箱、每箱 12 個、單次最多 24 箱
        let policy = ReorderPolicy::default()
            .with_minimum_order_qty(24)
            .with_order_multiple(12)
            .with_maximum_order_qty(288);

        assert_eq!(policy.adjust(raw), expected);
    }

    #[rstest]
    #[case(1, 24)]
    #[case(48, 48)]
    #[case(49, 72)]
    fn test_rounds_up_to_full_cases(#[case] raw: u64, #[case] expected: u64) {
        let policy = ReorderPolicy::default().with_order_multiple(24);

        assert_eq!(policy.adjust(raw), expected);
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = InventorySnapshot::from_items(vec![
            InventoryItem::new("A", Decimal::from(10)),
            InventoryItem::new("B", Decimal::from(3)),
            InventoryItem::new("A", Decimal::from(12)),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.stock_on_hand("A"), Decimal::from(12));
        assert_eq!(snapshot.stock_on_hand("MISSING"), Decimal::ZERO);
        assert!(snapshot.contains("B"));
        assert!(!snapshot.contains("MISSING"));
    }

    #[test]
    fn test_deserialize_flattened_sales() {
        let json = r#"{
            "sku": "SOAP-BAR",
            "stockOnHand": "50",
            "sales30Days": "300",
            "sales60Days": "480"
        }"#;

        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.on_order, Decimal::ZERO);
        assert_eq!(item.sales.sales_30_days, Some(Decimal::from(300)));
        assert_eq!(item.sales.sales_60_days, Some(Decimal::from(480)));
        assert_eq!(item.sales.sales_velocity_per_day, None);
    }
}
