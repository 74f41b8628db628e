//! 報表組裝

use buildability_core::{
    BillOfMaterials, BuildabilityReport, DataQualityIssue, EngineConfig, InventorySnapshot,
    IssueKind, IssueSeverity,
};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::{
    BuildabilityCalculator, DemandSignalCalculator, FinancialRollupCalculator, LeadTimeCalculator,
    RiskAndReorderCalculator,
};

/// 報表組裝器
///
/// 依序呼叫各計算器，組成一份不可變的可生產量報表。
/// 不保存任何狀態，也不快取結果。
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    config: EngineConfig,
}

impl ReportAssembler {
    /// 以指定配置創建組裝器（會先驗證配置）
    pub fn new(config: EngineConfig) -> buildability_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 獲取配置引用
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 組裝單一成品的報表
    pub fn assemble(&self, bom: &BillOfMaterials, snapshot: &InventorySnapshot) -> BuildabilityReport {
        tracing::debug!(
            "開始組裝報表：成品 {}，子件 {} 項",
            bom.finished_sku,
            bom.components.len()
        );

        let finished = snapshot.get(&bom.finished_sku);
        let mut issues = Vec::new();

        if finished.is_none() {
            issues.push(DataQualityIssue::new(
                &bom.finished_sku,
                IssueKind::MissingInventoryRecord,
                format!("成品 {} 沒有庫存記錄", bom.finished_sku),
            ));
        }

        if bom
            .yield_quantity_per_batch
            .is_some_and(|qty| qty <= Decimal::ZERO)
        {
            issues.push(DataQualityIssue::new(
                &bom.finished_sku,
                IssueKind::NonPositiveYield,
                format!("成品 {} 每批產出數量小於等於零，以 1 計算", bom.finished_sku),
            ));
        }

        // Step 1: 可生產量
        let buildability = BuildabilityCalculator::calculate(bom, snapshot);
        issues.extend(buildability.issues);

        let blocking_shortfalls = if buildability.no_recipe_data {
            Vec::new()
        } else {
            buildability
                .max_buildable
                .checked_add(1)
                .map(|target| BuildabilityCalculator::shortfalls(&buildability.capacities, target))
                .unwrap_or_default()
        };

        // Step 2: 需求訊號
        let demand_signal = DemandSignalCalculator::calculate(finished, &self.config);

        // Step 3: 缺貨風險與補貨（依賴需求訊號）
        let risk = RiskAndReorderCalculator::calculate(&demand_signal, finished, &self.config);

        // Step 4: 成本彙總
        let financials = FinancialRollupCalculator::calculate(bom, snapshot, finished, &self.config);

        // Step 5: 交期瀑布
        let lead_time_cascade =
            LeadTimeCalculator::cascade(bom, snapshot, &buildability.limiting_components);

        for issue in issues.iter().filter(|i| i.severity >= IssueSeverity::Warning) {
            tracing::warn!("資料品質問題 [{}]: {}", issue.sku, issue.message);
        }

        BuildabilityReport {
            finished_sku: bom.finished_sku.clone(),
            max_buildable: buildability.max_buildable,
            no_recipe_data: buildability.no_recipe_data,
            limiting_components: buildability.limiting_components,
            blocking_shortfalls,
            demand_signal,
            risk,
            financials,
            lead_time_cascade,
            issues,
        }
    }

    /// 並行組裝多個成品的報表（輸出順序與輸入相同）
    pub fn assemble_many(
        &self,
        boms: &[BillOfMaterials],
        snapshot: &InventorySnapshot,
    ) -> Vec<BuildabilityReport> {
        tracing::info!(
            "開始批次組裝報表：成品 {} 項，庫存記錄 {} 筆",
            boms.len(),
            snapshot.len()
        );

        let start_time = std::time::Instant::now();

        let reports: Vec<BuildabilityReport> = boms
            .par_iter()
            .map(|bom| self.assemble(bom, snapshot))
            .collect();

        tracing::info!("批次組裝完成，耗時 {:?}", start_time.elapsed());

        reports
    }
}
