//! 引擎配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

/// 存貨週轉天數門檻（庫存可撐天數分級）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayThresholds {
    /// 小於等於此天數為「危急」
    pub critical_days: Decimal,
    /// 小於等於此天數為「風險」
    pub risk_days: Decimal,
    /// 小於等於此天數為「觀察」
    pub watch_days: Decimal,
}

impl Default for RunwayThresholds {
    fn default() -> Self {
        Self {
            critical_days: Decimal::ONE,
            risk_days: Decimal::from(7),
            watch_days: Decimal::from(21),
        }
    }
}

/// 缺貨機率對照表
///
/// 固定的經驗值對照表，並非統計模型推算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockoutProbabilities {
    pub critical: Decimal,
    pub risk: Decimal,
    pub watch: Decimal,
    pub healthy: Decimal,
}

impl Default for StockoutProbabilities {
    fn default() -> Self {
        Self {
            critical: Decimal::new(94, 2),
            risk: Decimal::new(72, 2),
            watch: Decimal::new(33, 2),
            healthy: Decimal::new(8, 2),
        }
    }
}

/// 毛利率分級門檻（百分比）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginThresholds {
    /// 大於等於此百分比為「良好」
    pub success_pct: Decimal,
    /// 大於等於此百分比為「警告」，否則「危險」
    pub warning_pct: Decimal,
}

impl Default for MarginThresholds {
    fn default() -> Self {
        Self {
            success_pct: Decimal::from(50),
            warning_pct: Decimal::from(35),
        }
    }
}

/// 引擎參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// 每月持有成本率（佔庫存價值）
    pub holding_cost_rate: Decimal,

    /// 趨勢雜訊門檻（百分比），絕對值低於此值視為持平
    pub trend_noise_threshold_pct: Decimal,

    /// 庫存可撐天數分級門檻
    pub runway_thresholds: RunwayThresholds,

    /// 缺貨機率對照表
    pub stockout_probabilities: StockoutProbabilities,

    /// 毛利率分級門檻
    pub margin_thresholds: MarginThresholds,

    /// 補貨覆蓋天數（月需求 = 日均銷量 × 此天數）
    pub reorder_cover_days: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            holding_cost_rate: Decimal::new(175, 4),
            trend_noise_threshold_pct: Decimal::new(1, 1),
            runway_thresholds: RunwayThresholds::default(),
            stockout_probabilities: StockoutProbabilities::default(),
            margin_thresholds: MarginThresholds::default(),
            reorder_cover_days: 30,
        }
    }
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位採用預設值）並驗證
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置持有成本率
    pub fn with_holding_cost_rate(mut self, rate: Decimal) -> Self {
        self.holding_cost_rate = rate;
        self
    }

    /// 建構器模式：設置趨勢雜訊門檻
    pub fn with_trend_noise_threshold_pct(mut self, threshold: Decimal) -> Self {
        self.trend_noise_threshold_pct = threshold;
        self
    }

    /// 建構器模式：設置庫存可撐天數門檻
    pub fn with_runway_thresholds(mut self, thresholds: RunwayThresholds) -> Self {
        self.runway_thresholds = thresholds;
        self
    }

    /// 建構器模式：設置缺貨機率對照表
    pub fn with_stockout_probabilities(mut self, probabilities: StockoutProbabilities) -> Self {
        self.stockout_probabilities = probabilities;
        self
    }

    /// 建構器模式：設置毛利率門檻
    pub fn with_margin_thresholds(mut self, thresholds: MarginThresholds) -> Self {
        self.margin_thresholds = thresholds;
        self
    }

    /// 建構器模式：設置補貨覆蓋天數
    pub fn with_reorder_cover_days(mut self, days: u32) -> Self {
        self.reorder_cover_days = days;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.holding_cost_rate < Decimal::ZERO {
            return Err(EngineError::InvalidConfig(format!(
                "持有成本率不可為負數：{}",
                self.holding_cost_rate
            )));
        }

        if self.trend_noise_threshold_pct < Decimal::ZERO {
            return Err(EngineError::InvalidConfig(format!(
                "趨勢雜訊門檻不可為負數：{}",
                self.trend_noise_threshold_pct
            )));
        }

        let runway = &self.runway_thresholds;
        if !(runway.critical_days < runway.risk_days && runway.risk_days < runway.watch_days) {
            return Err(EngineError::InvalidConfig(format!(
                "庫存可撐天數門檻必須嚴格遞增：危急 {}, 風險 {}, 觀察 {}",
                runway.critical_days, runway.risk_days, runway.watch_days
            )));
        }

        let margin = &self.margin_thresholds;
        if margin.warning_pct > margin.success_pct {
            return Err(EngineError::InvalidConfig(format!(
                "毛利率警告門檻 {} 高於良好門檻 {}",
                margin.warning_pct, margin.success_pct
            )));
        }

        let probabilities = &self.stockout_probabilities;
        for (label, value) in [
            ("critical", probabilities.critical),
            ("risk", probabilities.risk),
            ("watch", probabilities.watch),
            ("healthy", probabilities.healthy),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(EngineError::InvalidConfig(format!(
                    "缺貨機率 {} 超出 0 到 1 的範圍：{}",
                    label, value
                )));
            }
        }

        if self.reorder_cover_days == 0 {
            return Err(EngineError::InvalidConfig(
                "補貨覆蓋天數必須大於零".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.holding_cost_rate, Decimal::new(175, 4));
        assert_eq!(config.trend_noise_threshold_pct, Decimal::new(1, 1));
        assert_eq!(config.runway_thresholds.watch_days, Decimal::from(21));
        assert_eq!(config.stockout_probabilities.critical, Decimal::new(94, 2));
        assert_eq!(config.reorder_cover_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_holding_cost_rate(Decimal::new(2, 2))
            .with_trend_noise_threshold_pct(Decimal::new(5, 1))
            .with_reorder_cover_days(45);

        assert_eq!(config.holding_cost_rate, Decimal::new(2, 2));
        assert_eq!(config.trend_noise_threshold_pct, Decimal::new(5, 1));
        assert_eq!(config.reorder_cover_days, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "holdingCostRate": "0.02" }"#).unwrap();

        assert_eq!(config.holding_cost_rate, Decimal::new(2, 2));
        assert_eq!(config.margin_thresholds, MarginThresholds::default());
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }

    #[test]
    fn test_validate_runway_order() {
        let config = EngineConfig::new().with_runway_thresholds(RunwayThresholds {
            critical_days: Decimal::from(7),
            risk_days: Decimal::from(7),
            watch_days: Decimal::from(21),
        });

        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_probability_range() {
        let config = EngineConfig::new().with_stockout_probabilities(StockoutProbabilities {
            critical: Decimal::new(12, 1),
            ..StockoutProbabilities::default()
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_negative_holding_rate() {
        let config = EngineConfig::new().with_holding_cost_rate(Decimal::from(-1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_cover_days() {
        let config = EngineConfig::new().with_reorder_cover_days(0);
        assert!(config.validate().is_err());
    }
}
