//! # Buildability
//!
//! 可生產量與需求情報引擎：由 BOM、庫存快照與銷售歷史推算
//! 目前可生產多少成品、卡在哪些子件、缺貨有多急、應補貨多少。
//!
//! ```
//! use buildability::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let bom = BillOfMaterials::new("FG-001")
//!     .with_component(ComponentRequirement::new("A", "Part A", Decimal::from(2)))
//!     .with_component(ComponentRequirement::new("B", "Part B", Decimal::ONE));
//!
//! let snapshot = InventorySnapshot::from_items(vec![
//!     InventoryItem::new("A", Decimal::from(10)),
//!     InventoryItem::new("B", Decimal::from(3)),
//! ]);
//!
//! let report = ReportAssembler::default().assemble(&bom, &snapshot);
//! assert_eq!(report.max_buildable, 3);
//! assert_eq!(report.limiting_components[0].sku, "B");
//! ```

pub use buildability_cache as cache;
pub use buildability_calc as calc;
pub use buildability_core as model;

pub mod prelude {
    pub use buildability_cache::ReportCache;
    pub use buildability_calc::ReportAssembler;
    pub use buildability_core::{
        BillOfMaterials, BuildabilityReport, ComponentRequirement, EngineConfig, InventoryItem,
        InventorySnapshot, ReorderPolicy, SalesHistory,
    };
}
