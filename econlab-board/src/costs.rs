//! Cost escalation view: yearly adjustments, cost-index cards and the
//! component weights behind each index.

use chrono::{Datelike, NaiveDate};
use econlab_core::data::sample;
use econlab_core::{Catalog, IndicatorCategory, Provenance};
use serde::Serialize;

use crate::dashboard::{Dashboard, IndicatorEntry};
use crate::data_loader::{load_forecast, LoadOptions, LoadedIndicator};

/// Adjustments above this percentage are flagged high.
pub const HIGH_ADJUSTMENT: f64 = 3.0;

const NAME_SUFFIXES: [&str; 3] = [" (Composite)", " (SAMPLE DATA)", " (Sample Data)"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentFlag {
    High,
    Relief,
    Normal,
}

/// Latest yearly adjustment of one cost index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAdjustment {
    pub indicator_id: String,
    pub name: String,
    /// Percent.
    pub adjustment: f64,
    pub effective_start: NaiveDate,
    pub effective_end: NaiveDate,
}

impl CostAdjustment {
    /// Adjustment from the latest non-missing `yearly_adjustment`.
    ///
    /// The effective period runs from April 1 of the latest observation's
    /// year through March 31 of the following year.
    pub fn from_entry(entry: &IndicatorEntry) -> Option<Self> {
        let series = entry.series();
        let (_, adjustment) = series.latest_yearly_adjustment()?;
        let year = series.latest_date()?.year();
        Some(Self {
            indicator_id: entry.spec.id.clone(),
            name: strip_name(&series.meta.source_name),
            adjustment,
            effective_start: NaiveDate::from_ymd_opt(year, 4, 1)?,
            effective_end: NaiveDate::from_ymd_opt(year + 1, 3, 31)?,
        })
    }

    /// `+2.95%`, `-0.40%`.
    pub fn adjustment_text(&self) -> String {
        let sign = if self.adjustment > 0.0 { "+" } else { "" };
        format!("{sign}{:.2}%", self.adjustment)
    }

    pub fn effective_period(&self) -> String {
        format!(
            "{} - {}",
            self.effective_start.format("%b %d, %Y"),
            self.effective_end.format("%b %d, %Y")
        )
    }

    pub fn flag(&self) -> AdjustmentFlag {
        if self.adjustment > HIGH_ADJUSTMENT {
            AdjustmentFlag::High
        } else if self.adjustment < 0.0 {
            AdjustmentFlag::Relief
        } else {
            AdjustmentFlag::Normal
        }
    }
}

/// Drop the composite and sample markers from a source name.
pub fn strip_name(name: &str) -> String {
    NAME_SUFFIXES
        .iter()
        .fold(name.to_string(), |acc, suffix| acc.replace(suffix, ""))
}

/// One weighted price index inside a cost index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: &'static str,
    pub weight_pct: u8,
    /// BLS series code.
    pub series_code: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Methodology {
    pub indicator_id: &'static str,
    pub title: &'static str,
    pub components: &'static [Component],
}

const LABOR: &str = "PPI Labor/Compensation";
const LABOR_CODE: &str = "CMU2010000000000D";
const STEEL_MILL: &str = "PPI Steel Mill Products";
const STEEL_MILL_CODE: &str = "WPU1017";

const fn component(name: &'static str, weight_pct: u8, series_code: &'static str) -> Component {
    Component {
        name,
        weight_pct,
        series_code,
    }
}

pub const METHODOLOGY_OVERVIEW: &str = "These cost indicators are weighted combinations of \
Producer Price Indices from the U.S. Bureau of Labor Statistics. The yearly adjustment is the \
weighted year-over-year change of the component indices, applied for the effective period. \
They are used for budgeting, forecasting and contract escalation.";

pub const METHODOLOGY_SOURCE: &str = "https://data.bls.gov/cgi-bin/srgate";

pub const METHODOLOGIES: [Methodology; 6] = [
    Methodology {
        indicator_id: "komatsu_equipment",
        title: "Komatsu Heavy Equipment",
        components: &[
            component(LABOR, 30, LABOR_CODE),
            component(STEEL_MILL, 35, STEEL_MILL_CODE),
            component("PPI Industrial Commodities Less Fuel", 30, "WPU03T15M05"),
            component("PPI Fuel Products", 5, "WPU05"),
        ],
    },
    Methodology {
        indicator_id: "sms_equipment",
        title: "SMS Equipment",
        components: &[
            component(LABOR, 35, LABOR_CODE),
            component(STEEL_MILL, 30, STEEL_MILL_CODE),
            component("PPI Industrial Commodities Less Fuel", 25, "WPU03T15M05"),
            component("PPI Fuel Products", 10, "WPU05"),
        ],
    },
    Methodology {
        indicator_id: "caterpillar_equipment",
        title: "Caterpillar Equipment",
        components: &[
            component(LABOR, 30, LABOR_CODE),
            component(STEEL_MILL, 30, STEEL_MILL_CODE),
            component("PPI Mining Machinery", 30, "WPU1142"),
            component("PPI Fuel Products", 10, "WPU05"),
        ],
    },
    Methodology {
        indicator_id: "fabricated_steel",
        title: "Fabricated Structural Steel",
        components: &[
            component(LABOR, 40, LABOR_CODE),
            component(STEEL_MILL, 50, STEEL_MILL_CODE),
            component("PPI Fabricated Structural Metal", 10, "WPU107"),
        ],
    },
    Methodology {
        indicator_id: "cement_ready_mix",
        title: "Cement and Ready-Mix",
        components: &[
            component(LABOR, 35, LABOR_CODE),
            component("PPI Cement", 45, "WPU1332"),
            component("PPI Concrete Products", 20, "WPU133"),
        ],
    },
    Methodology {
        indicator_id: "explosives",
        title: "Explosives & Accessories",
        components: &[
            component(LABOR, 25, LABOR_CODE),
            component("PPI Industrial Chemicals", 50, "WPU061"),
            component("PPI Mining Machinery", 25, "WPU1142"),
        ],
    },
];

pub fn methodology(indicator_id: &str) -> Option<&'static Methodology> {
    METHODOLOGIES.iter().find(|m| m.indicator_id == indicator_id)
}

/// Everything the cost view shows.
#[derive(Debug, Clone)]
pub struct CostView {
    pub adjustments: Vec<CostAdjustment>,
    pub equipment: Vec<IndicatorEntry>,
    pub materials: Vec<IndicatorEntry>,
    /// True when no cost index was loaded and sample ones were made up.
    pub synthesized: bool,
}

impl CostView {
    pub fn build(dashboard: &Dashboard) -> Self {
        let mut entries: Vec<IndicatorEntry> =
            dashboard.cost_entries().into_iter().cloned().collect();
        let synthesized = entries.is_empty();
        if synthesized {
            tracing::warn!("no cost indicator data loaded, generating sample data");
            entries = synthesize_cost_entries(dashboard);
        }

        let adjustments = entries.iter().filter_map(CostAdjustment::from_entry).collect();
        let (equipment, materials): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.spec.category == IndicatorCategory::EquipmentCost);

        Self {
            adjustments,
            equipment,
            materials,
            synthesized,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty() && self.materials.is_empty()
    }
}

fn synthesize_cost_entries(dashboard: &Dashboard) -> Vec<IndicatorEntry> {
    let opts = LoadOptions {
        today: dashboard.options.today,
        allow_sample: true,
    };
    let catalog = Catalog::builtin();
    catalog
        .specs()
        .iter()
        .filter(|s| s.category.is_cost())
        .map(|spec| {
            let series = sample::sample_history(spec, opts.today);
            let forecast = load_forecast(&dashboard.dirs, spec, Some(&series), &opts);
            IndicatorEntry {
                spec: spec.clone(),
                indicator: LoadedIndicator {
                    series,
                    provenance: Provenance::sample(&spec.id),
                    path: None,
                },
                forecast,
            }
        })
        .collect()
}
