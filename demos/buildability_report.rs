//! 可生產量報表示例

use buildability::prelude::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 可生產量報表示例 ===\n");

    // 引擎配置（持有成本率改為每月 2%）
    let config = EngineConfig::from_json(r#"{ "holdingCostRate": "0.02" }"#)?;
    let assembler = ReportAssembler::new(config)?;

    // 成品：香氛蠟燭
    let bom = BillOfMaterials::new("CANDLE-8OZ")
        .with_component(ComponentRequirement::new("SOY-WAX", "大豆蠟", Decimal::from(8)).with_unit("oz"))
        .with_component(ComponentRequirement::new("WICK", "燭芯", Decimal::ONE))
        .with_component(ComponentRequirement::new("JAR-8OZ", "玻璃杯", Decimal::ONE))
        .with_component(ComponentRequirement::new("FRAGRANCE", "香精", Decimal::new(5, 1)).with_unit("oz"))
        .with_yield(Decimal::from(12))
        .with_labor(Decimal::from(60), Decimal::from(22));

    let snapshot = InventorySnapshot::from_items(vec![
        InventoryItem::new("SOY-WAX", Decimal::from(400))
            .with_unit_cost(Decimal::new(18, 2))
            .with_lead_time_days(7),
        InventoryItem::new("WICK", Decimal::from(35))
            .with_unit_cost(Decimal::new(8, 2))
            .with_lead_time_days(14),
        InventoryItem::new("JAR-8OZ", Decimal::from(120))
            .with_unit_cost(Decimal::new(95, 2))
            .with_lead_time_days(28),
        InventoryItem::new("FRAGRANCE", Decimal::from(30)).with_unit_cost(Decimal::new(150, 2)),
        InventoryItem::new("CANDLE-8OZ", Decimal::from(42))
            .with_on_order(Decimal::from(24))
            .with_safety_stock(Decimal::from(15))
            .with_unit_price(Decimal::from(24))
            .with_sales(SalesHistory::from_totals(
                Some(Decimal::from(180)),
                Some(Decimal::from(300)),
                None,
            ))
            .with_reorder_policy(ReorderPolicy::default().with_order_multiple(12)),
    ]);

    let report = assembler.assemble(&bom, &snapshot);

    println!("成品: {}", report.finished_sku);
    println!("最多可生產: {}", report.max_buildable);
    for component in &report.limiting_components {
        println!(
            "  - 限制子件 {}: 可用 {}, 單位用量 {}",
            component.sku, component.available, component.needed
        );
    }
    for shortfall in &report.blocking_shortfalls {
        println!("  - 多生產一個還缺 {} {}", shortfall.shortfall, shortfall.sku);
    }

    let signal = &report.demand_signal;
    println!(
        "\n日均銷量: {:?}, 趨勢: {:?}% ({:?})",
        signal.current_velocity, signal.trend_pct, signal.direction
    );
    println!("可撐天數: {:?} ({:?})", signal.runway_days, signal.runway_status);
    println!(
        "缺貨機率: {:?}, 建議補貨: {:?}, 計劃訂購: {:?}",
        report.stockout_risk(),
        report.recommended_reorder_qty(),
        report.risk.planned_order_qty
    );

    let financials = &report.financials;
    println!(
        "\n單位成本: {}, 毛利率: {:?}% ({:?}), 每月持有成本: {}",
        financials.unit_cost.round_dp(2),
        financials.margin_pct.map(|m| m.round_dp(1)),
        financials.margin_status,
        financials.monthly_holding_cost.round_dp(2)
    );

    let as_of = NaiveDate::from_ymd_opt(2025, 11, 3).ok_or_else(|| anyhow::anyhow!("無效的日期"))?;
    println!(
        "\n{} 天後可生產（{:?}）",
        report.lead_time_cascade.ready_in_days().unwrap_or(0),
        report.lead_time_cascade.ready_on(as_of)
    );

    Ok(())
}
