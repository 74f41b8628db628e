//! 需求訊號計算（銷量、趨勢、庫存可撐天數）

use buildability_core::{
    DemandSignal, EngineConfig, InventoryItem, RunwayStatus, RunwayThresholds, SalesHistory,
    TrendDirection,
};
use rust_decimal::Decimal;

const CURRENT_WINDOW_DAYS: i64 = 30;
const TRAILING_WINDOW_DAYS: i64 = 60;
const LONG_TRAILING_WINDOW_DAYS: i64 = 90;

/// 需求訊號計算器
pub struct DemandSignalCalculator;

impl DemandSignalCalculator {
    /// 計算成品的需求訊號
    ///
    /// 成品缺少庫存記錄時，所有數值皆為 None，分級為 `Unknown`。
    pub fn calculate(finished: Option<&InventoryItem>, config: &EngineConfig) -> DemandSignal {
        let Some(item) = finished else {
            return DemandSignal {
                current_velocity: None,
                trailing_velocity: None,
                trend_pct: None,
                direction: None,
                runway_days: None,
                runway_with_inbound_days: None,
                runway_status: RunwayStatus::Unknown,
            };
        };

        let current_velocity = Self::current_velocity(&item.sales);
        let trailing_velocity = Self::trailing_velocity(&item.sales);
        let trend_pct = Self::trend_pct(current_velocity, trailing_velocity);
        let direction = Self::direction(trend_pct, config.trend_noise_threshold_pct);

        let runway_days = Self::runway(item.stock_on_hand, current_velocity);
        let runway_with_inbound_days = Self::runway(item.inventory_position(), current_velocity);
        let runway_status = Self::runway_status(runway_days, &config.runway_thresholds);

        tracing::debug!(
            "成品 {} 日均銷量 {:?}，可撐 {:?} 天（{:?}）",
            item.sku,
            current_velocity,
            runway_days,
            runway_status
        );

        DemandSignal {
            current_velocity,
            trailing_velocity,
            trend_pct,
            direction,
            runway_days,
            runway_with_inbound_days,
            runway_status,
        }
    }

    /// 當前日均銷量：明確值，否則 30 天總量 / 30
    pub fn current_velocity(sales: &SalesHistory) -> Option<Decimal> {
        sales.sales_velocity_per_day.or_else(|| {
            sales
                .sales_30_days
                .map(|total| total / Decimal::from(CURRENT_WINDOW_DAYS))
        })
    }

    /// 前期日均銷量：60 天總量 / 60，否則 90 天總量 / 90
    pub fn trailing_velocity(sales: &SalesHistory) -> Option<Decimal> {
        sales
            .sales_60_days
            .map(|total| total / Decimal::from(TRAILING_WINDOW_DAYS))
            .or_else(|| {
                sales
                    .sales_90_days
                    .map(|total| total / Decimal::from(LONG_TRAILING_WINDOW_DAYS))
            })
    }

    /// 趨勢百分比（前期銷量為零或未知時為 None）
    pub fn trend_pct(current: Option<Decimal>, trailing: Option<Decimal>) -> Option<Decimal> {
        let (current, trailing) = (current?, trailing?);
        if trailing.is_zero() {
            return None;
        }

        current
            .checked_sub(trailing)?
            .checked_div(trailing.abs())?
            .checked_mul(Decimal::ONE_HUNDRED)
    }

    /// 趨勢方向；絕對值低於雜訊門檻視為持平
    pub fn direction(trend_pct: Option<Decimal>, noise_threshold_pct: Decimal) -> Option<TrendDirection> {
        let trend = trend_pct?;
        if trend.abs() < noise_threshold_pct {
            return None;
        }

        if trend > Decimal::ZERO {
            Some(TrendDirection::Up)
        } else if trend < Decimal::ZERO {
            Some(TrendDirection::Down)
        } else {
            None
        }
    }

    /// 庫存 / 日均銷量（銷量必須為正數，超出範圍時為 None）
    fn runway(stock: Decimal, velocity: Option<Decimal>) -> Option<Decimal> {
        velocity
            .filter(|v| *v > Decimal::ZERO)
            .and_then(|v| stock.checked_div(v))
    }

    /// 庫存可撐天數分級
    pub fn runway_status(runway_days: Option<Decimal>, thresholds: &RunwayThresholds) -> RunwayStatus {
        match runway_days {
            None => RunwayStatus::Unknown,
            Some(days) if days <= thresholds.critical_days => RunwayStatus::Critical,
            Some(days) if days <= thresholds.risk_days => RunwayStatus::Risk,
            Some(days) if days <= thresholds.watch_days => RunwayStatus::Watch,
            Some(_) => RunwayStatus::Healthy,
        }
    }
}
