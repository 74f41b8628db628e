//! 可生產量報表模型（引擎唯一的輸出）

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 限制產量的子件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitingComponent {
    pub sku: String,
    /// 可用庫存
    pub available: Decimal,
    /// 單位用量
    pub needed: Decimal,
    /// 此子件可支撐的成品數量
    pub can_build: u64,
}

/// 多生產一個單位所缺的子件數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentShortfall {
    pub sku: String,
    pub available: Decimal,
    /// 目標產量所需的總數量
    pub required: Decimal,
    /// 缺口（恆為正數）
    pub shortfall: Decimal,
}

/// 銷售趨勢方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// 庫存可撐天數分級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunwayStatus {
    Critical,
    Risk,
    Watch,
    Healthy,
    /// 無法計算（缺少銷量資料或銷量為零）
    Unknown,
}

/// 需求訊號
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSignal {
    /// 當前日均銷量
    pub current_velocity: Option<Decimal>,
    /// 前期日均銷量（60 或 90 天視窗）
    pub trailing_velocity: Option<Decimal>,
    /// 趨勢變化百分比
    pub trend_pct: Option<Decimal>,
    /// 趨勢方向（低於雜訊門檻時為 None，視為持平）
    pub direction: Option<TrendDirection>,
    /// 現有庫存可撐天數
    pub runway_days: Option<Decimal>,
    /// 含在途的可撐天數
    pub runway_with_inbound_days: Option<Decimal>,
    pub runway_status: RunwayStatus,
}

/// 缺貨風險與補貨建議
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// 缺貨機率（0 到 1）
    pub stockout_risk_probability: Option<Decimal>,
    /// 月需求量
    pub monthly_demand: Option<Decimal>,
    /// 補貨目標（月需求 + 安全庫存）
    pub reorder_target: Option<Decimal>,
    /// 建議補貨量（僅在日均銷量未知時為 None）
    pub recommended_reorder_qty: Option<u64>,
    /// 套用批量政策後的計劃訂購量
    pub planned_order_qty: Option<u64>,
    /// 現有庫存是否已達再訂購點
    pub below_reorder_point: bool,
}

/// 毛利率分級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginStatus {
    Success,
    Warning,
    Danger,
    Unknown,
}

/// 成本與毛利彙總
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRollup {
    /// 每批材料成本
    pub total_material_cost: Decimal,
    /// 每批人工成本
    pub labor_cost: Decimal,
    /// 每批總成本
    pub total_cost: Decimal,
    /// 單位成本
    pub unit_cost: Decimal,
    /// 毛利率（百分比）
    pub margin_pct: Option<Decimal>,
    pub margin_status: MarginStatus,
    /// 成品庫存價值
    pub stock_carrying_value: Decimal,
    /// 每月持有成本
    pub monthly_holding_cost: Decimal,
}

/// 交期瀑布中的一個子件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeEntry {
    pub sku: String,
    pub name: String,
    pub lead_time_days: u32,
    /// 是否為限制產量的子件
    pub limiting: bool,
}

/// 交期瀑布（依交期由長到短，限制子件優先）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeCascade {
    pub entries: Vec<CascadeEntry>,
}

impl LeadTimeCascade {
    /// 幾天後可以開始生產（瀑布的第一項）
    pub fn ready_in_days(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.lead_time_days)
    }

    /// 以日曆天推算可開始生產的日期
    pub fn ready_on(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        self.ready_in_days()
            .and_then(|days| as_of.checked_add_days(Days::new(u64::from(days))))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 資料品質問題嚴重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

/// 資料品質問題類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// 單位用量為負數（以 1 計算）
    NegativeQuantityPerUnit,
    /// 單位用量缺省或為零（以 1 計算）
    ZeroQuantityPerUnit,
    /// 快照中缺少庫存記錄（以零庫存計算）
    MissingInventoryRecord,
    /// 庫存為負數（以零計算）
    NegativeStock,
    /// 每批產出數量小於等於零（以 1 計算）
    NonPositiveYield,
}

impl IssueKind {
    /// 問題類型對應的嚴重度
    pub fn severity(self) -> IssueSeverity {
        match self {
            Self::NegativeQuantityPerUnit => IssueSeverity::Error,
            Self::NegativeStock => IssueSeverity::Warning,
            Self::ZeroQuantityPerUnit
            | Self::MissingInventoryRecord
            | Self::NonPositiveYield => IssueSeverity::Info,
        }
    }
}

/// 資料品質問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    pub sku: String,
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
}

impl DataQualityIssue {
    pub fn new(sku: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }
}

/// 可生產量報表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildabilityReport {
    /// 成品 SKU
    pub finished_sku: String,

    /// 目前最多可生產數量
    pub max_buildable: u64,

    /// BOM 沒有任何子件（與真正的缺料區分）
    pub no_recipe_data: bool,

    /// 限制產量的子件（依可生產量、SKU 排序）
    pub limiting_components: Vec<LimitingComponent>,

    /// 多生產一個單位所缺的子件
    pub blocking_shortfalls: Vec<ComponentShortfall>,

    pub demand_signal: DemandSignal,

    pub risk: RiskAssessment,

    pub financials: FinancialRollup,

    pub lead_time_cascade: LeadTimeCascade,

    /// 資料品質問題
    pub issues: Vec<DataQualityIssue>,
}

impl BuildabilityReport {
    /// 缺貨機率
    pub fn stockout_risk(&self) -> Option<Decimal> {
        self.risk.stockout_risk_probability
    }

    /// 建議補貨量
    pub fn recommended_reorder_qty(&self) -> Option<u64> {
        self.risk.recommended_reorder_qty
    }

    /// 是否有指定嚴重度以上的資料品質問題
    pub fn has_issues_at_least(&self, severity: IssueSeverity) -> bool {
        self.issues.iter().any(|issue| issue.severity >= severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sku: &str, days: u32, limiting: bool) -> CascadeEntry {
        CascadeEntry {
            sku: sku.to_string(),
            name: sku.to_string(),
            lead_time_days: days,
            limiting,
        }
    }

    #[test]
    fn test_cascade_ready_in_days() {
        let cascade = LeadTimeCascade {
            entries: vec![entry("BOTTLE", 14, true), entry("LABEL", 21, false)],
        };

        assert_eq!(cascade.ready_in_days(), Some(14));
        assert_eq!(
            cascade.ready_on(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2025, 11, 15).unwrap())
        );
    }

    #[test]
    fn test_empty_cascade() {
        let cascade = LeadTimeCascade::default();

        assert!(cascade.is_empty());
        assert_eq!(cascade.ready_in_days(), None);
        assert_eq!(cascade.ready_on(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()), None);
    }

    #[test]
    fn test_issue_severity() {
        let issue = DataQualityIssue::new("CAP-01", IssueKind::NegativeQuantityPerUnit, "負數用量");
        assert_eq!(issue.severity, IssueSeverity::Error);
        assert!(IssueSeverity::Error > IssueSeverity::Warning);
        assert_eq!(IssueKind::MissingInventoryRecord.severity(), IssueSeverity::Info);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&RunwayStatus::Risk).unwrap(), "\"risk\"");
        assert_eq!(serde_json::to_string(&MarginStatus::Warning).unwrap(), "\"warning\"");
        assert_eq!(
            serde_json::to_string(&IssueKind::NegativeQuantityPerUnit).unwrap(),
            "\"negativeQuantityPerUnit\""
        );
    }
}
