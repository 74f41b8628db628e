//! # Buildability Core
//!
//! 可生產量與需求情報引擎的核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod inventory;
pub mod report;

// Re-export 主要類型
pub use bom::{BillOfMaterials, ComponentRequirement};
pub use config::{EngineConfig, MarginThresholds, RunwayThresholds, StockoutProbabilities};
pub use inventory::{InventoryItem, InventorySnapshot, ReorderPolicy, SalesHistory};
pub use report::{
    BuildabilityReport, CascadeEntry, ComponentShortfall, DataQualityIssue, DemandSignal,
    FinancialRollup, IssueKind, IssueSeverity, LeadTimeCascade, LimitingComponent, MarginStatus,
    RiskAssessment, RunwayStatus, TrendDirection,
};

/// 引擎錯誤類型
///
/// 報表組裝本身不會失敗；這裡只涵蓋配置相關的問題。
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("無效的引擎配置: {0}")]
    InvalidConfig(String),

    #[error("配置解析失敗: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
