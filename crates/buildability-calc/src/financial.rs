//! 成本與毛利彙總

use buildability_core::{
    BillOfMaterials, EngineConfig, FinancialRollup, InventoryItem, InventorySnapshot,
    MarginStatus, MarginThresholds,
};
use rust_decimal::Decimal;

const MINUTES_PER_HOUR: i64 = 60;

/// 成本彙總計算器
pub struct FinancialRollupCalculator;

impl FinancialRollupCalculator {
    /// 計算材料、人工、單位成本、毛利率與持有成本
    pub fn calculate(
        bom: &BillOfMaterials,
        snapshot: &InventorySnapshot,
        finished: Option<&InventoryItem>,
        config: &EngineConfig,
    ) -> FinancialRollup {
        let total_material_cost = Self::material_cost(bom, snapshot);
        let labor_cost = Self::labor_cost(bom);
        let total_cost = total_material_cost.saturating_add(labor_cost);
        let unit_cost = total_cost
            .checked_div(bom.effective_yield())
            .unwrap_or(Decimal::MAX);

        let unit_price = finished.and_then(|item| item.unit_price);
        let margin_pct = Self::margin_pct(unit_price, unit_cost);
        let margin_status = Self::margin_status(margin_pct, &config.margin_thresholds);

        let finished_stock = finished
            .map(|item| item.stock_on_hand.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO);
        let carrying_unit_cost = finished
            .and_then(|item| item.unit_cost)
            .unwrap_or(unit_cost);
        let stock_carrying_value = finished_stock.saturating_mul(carrying_unit_cost);
        let monthly_holding_cost = stock_carrying_value.saturating_mul(config.holding_cost_rate);

        tracing::debug!(
            "成品 {} 單位成本 {}，毛利率 {:?}（{:?}）",
            bom.finished_sku,
            unit_cost,
            margin_pct,
            margin_status
        );

        FinancialRollup {
            total_material_cost,
            labor_cost,
            total_cost,
            unit_cost,
            margin_pct,
            margin_status,
            stock_carrying_value,
            monthly_holding_cost,
        }
    }

    /// Σ 子件單位成本 × 單位用量（缺少成本以零計，超出範圍時飽和）
    pub fn material_cost(bom: &BillOfMaterials, snapshot: &InventorySnapshot) -> Decimal {
        bom.components
            .iter()
            .map(|component| {
                let cost = snapshot
                    .get(&component.sku)
                    .and_then(|item| item.unit_cost)
                    .unwrap_or(Decimal::ZERO);
                cost.saturating_mul(component.effective_quantity())
            })
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// 生產分鐘 × 時薪 / 60
    pub fn labor_cost(bom: &BillOfMaterials) -> Decimal {
        let minutes = bom.build_time_minutes.unwrap_or(Decimal::ZERO);
        let rate = bom.labor_cost_per_hour.unwrap_or(Decimal::ZERO);
        minutes.saturating_mul(rate) / Decimal::from(MINUTES_PER_HOUR)
    }

    /// (售價 - 單位成本) / 售價 × 100，售價必須為正數；超出範圍時為 None
    pub fn margin_pct(unit_price: Option<Decimal>, unit_cost: Decimal) -> Option<Decimal> {
        let price = unit_price.filter(|price| *price > Decimal::ZERO)?;

        price
            .checked_sub(unit_cost)?
            .checked_div(price)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }

    pub fn margin_status(margin_pct: Option<Decimal>, thresholds: &MarginThresholds) -> MarginStatus {
        match margin_pct {
            None => MarginStatus::Unknown,
            Some(pct) if pct >= thresholds.success_pct => MarginStatus::Success,
            Some(pct) if pct >= thresholds.warning_pct => MarginStatus::Warning,
            Some(_) => MarginStatus::Danger,
        }
    }
}
