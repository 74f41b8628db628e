//! 物料清單（BOM）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// BOM 子件需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequirement {
    /// 子件 SKU
    pub sku: String,

    /// 子件名稱
    pub name: String,

    /// 單位用量（缺省或為零時視為 1）
    #[serde(default)]
    pub quantity_per_unit: Option<Decimal>,

    /// 單位標籤（僅供顯示，不參與計算）
    #[serde(default)]
    pub unit: Option<String>,
}

impl ComponentRequirement {
    /// 創建新的子件需求
    pub fn new(sku: impl Into<String>, name: impl Into<String>, quantity_per_unit: Decimal) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity_per_unit: Some(quantity_per_unit),
            unit: None,
        }
    }

    /// 建構器模式：設置單位標籤
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// 計算用的單位用量
    ///
    /// 只有正數會被採用；缺省、零或負數一律視為 1。
    pub fn effective_quantity(&self) -> Decimal {
        match self.quantity_per_unit {
            Some(qty) if qty > Decimal::ZERO => qty,
            _ => Decimal::ONE,
        }
    }

    /// 單位用量是否為負數（資料品質問題）
    pub fn has_negative_quantity(&self) -> bool {
        self.quantity_per_unit
            .is_some_and(|qty| qty < Decimal::ZERO)
    }

    /// 單位用量是否缺省或為零
    pub fn has_missing_quantity(&self) -> bool {
        self.quantity_per_unit.map_or(true, |qty| qty.is_zero())
    }
}

/// 物料清單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterials {
    /// 成品 SKU
    pub finished_sku: String,

    /// 每批產出數量（小於等於零時視為 1）
    #[serde(default)]
    pub yield_quantity_per_batch: Option<Decimal>,

    /// 子件列表（保持插入順序；空列表代表沒有配方資料）
    #[serde(default)]
    pub components: Vec<ComponentRequirement>,

    /// 每批生產時間（分鐘）
    #[serde(default)]
    pub build_time_minutes: Option<Decimal>,

    /// 每小時人工成本
    #[serde(default)]
    pub labor_cost_per_hour: Option<Decimal>,
}

impl BillOfMaterials {
    /// 創建空的物料清單
    pub fn new(finished_sku: impl Into<String>) -> Self {
        Self {
            finished_sku: finished_sku.into(),
            yield_quantity_per_batch: None,
            components: Vec::new(),
            build_time_minutes: None,
            labor_cost_per_hour: None,
        }
    }

    /// 建構器模式：添加子件
    pub fn with_component(mut self, component: ComponentRequirement) -> Self {
        self.components.push(component);
        self
    }

    /// 建構器模式：設置每批產出數量
    pub fn with_yield(mut self, yield_quantity: Decimal) -> Self {
        self.yield_quantity_per_batch = Some(yield_quantity);
        self
    }

    /// 建構器模式：設置人工（生產時間與時薪）
    pub fn with_labor(mut self, build_time_minutes: Decimal, labor_cost_per_hour: Decimal) -> Self {
        self.build_time_minutes = Some(build_time_minutes);
        self.labor_cost_per_hour = Some(labor_cost_per_hour);
        self
    }

    /// 計算用的每批產出數量
    pub fn effective_yield(&self) -> Decimal {
        match self.yield_quantity_per_batch {
            Some(qty) if qty > Decimal::ZERO => qty,
            _ => Decimal::ONE,
        }
    }

    /// 是否有配方資料
    pub fn has_recipe(&self) -> bool {
        !self.components.is_empty()
    }

    /// 所有子件 SKU（依 BOM 順序，可能重複）
    pub fn component_skus(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.sku.as_str())
    }
}
