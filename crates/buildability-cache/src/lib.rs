//! # Buildability Cache
//!
//! 報表快取與失效追蹤（呼叫端使用；計算引擎本身不快取）

pub mod dirty_tracking;
pub mod report_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use report_cache::ReportCache;
