//! 可生產量計算（子件約束求解）

use buildability_core::{
    BillOfMaterials, ComponentShortfall, DataQualityIssue, InventorySnapshot, IssueKind,
    LimitingComponent,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 單一子件的產能
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCapacity {
    pub sku: String,
    pub name: String,
    /// 可用庫存（缺少記錄或負數時為零）
    pub available: Decimal,
    /// 計算用的單位用量（恆為正數）
    pub needed: Decimal,
    /// floor(available / needed)
    pub can_build: u64,
}

/// 可生產量計算結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildabilityResult {
    pub max_buildable: u64,
    pub no_recipe_data: bool,
    pub limiting_components: Vec<LimitingComponent>,
    /// 每個 BOM 子件的產能（BOM 順序）
    pub capacities: Vec<ComponentCapacity>,
    pub issues: Vec<DataQualityIssue>,
}

/// 可生產量計算器
pub struct BuildabilityCalculator;

impl BuildabilityCalculator {
    /// 計算最大可生產量與限制子件
    ///
    /// 子件缺少庫存記錄視為零庫存；BOM 沒有子件時可生產量為零，
    /// 並以 `no_recipe_data` 標記。
    pub fn calculate(bom: &BillOfMaterials, snapshot: &InventorySnapshot) -> BuildabilityResult {
        let mut issues = Vec::new();
        let capacities = Self::component_capacities(bom, snapshot, &mut issues);

        if capacities.is_empty() {
            tracing::debug!("成品 {} 沒有配方資料", bom.finished_sku);
            return BuildabilityResult {
                max_buildable: 0,
                no_recipe_data: true,
                limiting_components: Vec::new(),
                capacities,
                issues,
            };
        }

        let max_buildable = capacities
            .iter()
            .map(|c| c.can_build)
            .min()
            .unwrap_or(0);

        let limiting_components = Self::limiting_components(&capacities, max_buildable);

        tracing::debug!(
            "成品 {} 最大可生產量: {}，限制子件 {} 個",
            bom.finished_sku,
            max_buildable,
            limiting_components.len()
        );

        BuildabilityResult {
            max_buildable,
            no_recipe_data: false,
            limiting_components,
            capacities,
            issues,
        }
    }

    /// 計算每個子件的產能，並記錄資料品質問題
    pub fn component_capacities(
        bom: &BillOfMaterials,
        snapshot: &InventorySnapshot,
        issues: &mut Vec<DataQualityIssue>,
    ) -> Vec<ComponentCapacity> {
        bom.components
            .iter()
            .map(|component| {
                if component.has_negative_quantity() {
                    issues.push(DataQualityIssue::new(
                        &component.sku,
                        IssueKind::NegativeQuantityPerUnit,
                        format!(
                            "子件 {} 單位用量為負數 {}，以 1 計算",
                            component.sku,
                            component.quantity_per_unit.unwrap_or_default()
                        ),
                    ));
                } else if component.has_missing_quantity() {
                    issues.push(DataQualityIssue::new(
                        &component.sku,
                        IssueKind::ZeroQuantityPerUnit,
                        format!("子件 {} 單位用量缺省或為零，以 1 計算", component.sku),
                    ));
                }

                let available = match snapshot.get(&component.sku) {
                    Some(item) if item.stock_on_hand < Decimal::ZERO => {
                        issues.push(DataQualityIssue::new(
                            &component.sku,
                            IssueKind::NegativeStock,
                            format!(
                                "子件 {} 庫存為負數 {}，以零計算",
                                component.sku, item.stock_on_hand
                            ),
                        ));
                        Decimal::ZERO
                    }
                    Some(item) => item.stock_on_hand,
                    None => {
                        issues.push(DataQualityIssue::new(
                            &component.sku,
                            IssueKind::MissingInventoryRecord,
                            format!("子件 {} 沒有庫存記錄，以零庫存計算", component.sku),
                        ));
                        Decimal::ZERO
                    }
                };

                let needed = component.effective_quantity();

                ComponentCapacity {
                    sku: component.sku.clone(),
                    name: component.name.clone(),
                    available,
                    needed,
                    can_build: Self::can_build(available, needed),
                }
            })
            .collect()
    }

    /// floor(available / needed)，超出 u64 範圍時飽和
    fn can_build(available: Decimal, needed: Decimal) -> u64 {
        if needed <= Decimal::ZERO || available <= Decimal::ZERO {
            return 0;
        }

        available
            .checked_div(needed)
            .and_then(|units| units.floor().to_u64())
            .unwrap_or(u64::MAX)
    }

    /// 所有產能等於最大可生產量的子件（依產能、SKU 排序）
    fn limiting_components(
        capacities: &[ComponentCapacity],
        max_buildable: u64,
    ) -> Vec<LimitingComponent> {
        let mut limiting: Vec<LimitingComponent> = capacities
            .iter()
            .filter(|c| c.can_build == max_buildable)
            .map(|c| LimitingComponent {
                sku: c.sku.clone(),
                available: c.available,
                needed: c.needed,
                can_build: c.can_build,
            })
            .collect();

        limiting.sort_by(|a, b| a.can_build.cmp(&b.can_build).then_with(|| a.sku.cmp(&b.sku)));
        limiting
    }

    /// 生產 `target_units` 個成品時各子件的缺口（只列出有缺口者，依 SKU 排序）
    pub fn shortfalls(capacities: &[ComponentCapacity], target_units: u64) -> Vec<ComponentShortfall> {
        let target = Decimal::from(target_units);

        let mut shortfalls: Vec<ComponentShortfall> = capacities
            .iter()
            .filter_map(|c| {
                let required = c.needed.checked_mul(target)?;
                let shortfall = required.checked_sub(c.available)?;
                (shortfall > Decimal::ZERO).then(|| ComponentShortfall {
                    sku: c.sku.clone(),
                    available: c.available,
                    required,
                    shortfall,
                })
            })
            .collect();

        shortfalls.sort_by(|a, b| a.sku.cmp(&b.sku));
        shortfalls
    }
}
