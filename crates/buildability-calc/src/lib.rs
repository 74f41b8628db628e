//! # Buildability Calculation Engine
//!
//! 可生產量與需求情報計算引擎
//!
//! 所有計算器皆為無狀態的純函數：相同輸入永遠得到相同報表，
//! 不做任何 I/O，可安全地跨 SKU 並行呼叫。

pub mod assembler;
pub mod buildability;
pub mod demand;
pub mod financial;
pub mod lead_time;
pub mod risk;

// Re-export 主要類型
pub use assembler::ReportAssembler;
pub use buildability::{BuildabilityCalculator, BuildabilityResult, ComponentCapacity};
pub use demand::DemandSignalCalculator;
pub use financial::FinancialRollupCalculator;
pub use lead_time::LeadTimeCalculator;
pub use risk::RiskAndReorderCalculator;
