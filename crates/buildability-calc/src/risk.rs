//! 缺貨風險與補貨建議

use buildability_core::{
    DemandSignal, EngineConfig, InventoryItem, RiskAssessment, RunwayStatus, StockoutProbabilities,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 缺貨風險與補貨計算器
pub struct RiskAndReorderCalculator;

impl RiskAndReorderCalculator {
    /// 依需求訊號計算缺貨機率與建議補貨量
    pub fn calculate(
        signal: &DemandSignal,
        finished: Option<&InventoryItem>,
        config: &EngineConfig,
    ) -> RiskAssessment {
        let stockout_risk_probability =
            Self::stockout_probability(signal.runway_status, &config.stockout_probabilities);

        let monthly_demand = signal
            .current_velocity
            .map(|velocity| velocity.saturating_mul(Decimal::from(config.reorder_cover_days)));

        let safety_stock = finished
            .and_then(InventoryItem::effective_safety_stock)
            .unwrap_or(Decimal::ZERO);
        let position = finished
            .map(InventoryItem::inventory_position)
            .unwrap_or(Decimal::ZERO);

        let reorder_target = monthly_demand.map(|demand| demand.saturating_add(safety_stock));
        let recommended_reorder_qty = reorder_target.map(|target| Self::reorder_qty(target, position));

        let planned_order_qty = recommended_reorder_qty.map(|qty| {
            finished
                .and_then(|item| item.reorder_policy.as_ref())
                .map_or(qty, |policy| policy.adjust(qty))
        });

        let below_reorder_point = finished.is_some_and(InventoryItem::is_below_reorder_point);

        RiskAssessment {
            stockout_risk_probability,
            monthly_demand,
            reorder_target,
            recommended_reorder_qty,
            planned_order_qty,
            below_reorder_point,
        }
    }

    /// 依可撐天數分級查表
    pub fn stockout_probability(
        status: RunwayStatus,
        table: &StockoutProbabilities,
    ) -> Option<Decimal> {
        match status {
            RunwayStatus::Critical => Some(table.critical),
            RunwayStatus::Risk => Some(table.risk),
            RunwayStatus::Watch => Some(table.watch),
            RunwayStatus::Healthy => Some(table.healthy),
            RunwayStatus::Unknown => None,
        }
    }

    /// max(0, ceil(target - position))
    fn reorder_qty(target: Decimal, position: Decimal) -> u64 {
        let gap = target.saturating_sub(position).ceil();
        if gap <= Decimal::ZERO {
            return 0;
        }

        gap.to_u64().unwrap_or(u64::MAX)
    }
}
