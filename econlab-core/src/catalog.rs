//! Built-in indicator catalog.
//!
//! Every indicator the dashboard knows about has a catalog entry carrying its
//! display name, unit, preferred direction, description and grouping. Ids not
//! in the catalog still resolve, with a title-cased name and neutral
//! defaults, so a dropped-in CSV for a new series shows up without code
//! changes.

use serde::{Deserialize, Serialize};

use crate::analytics::change::ChangeMode;
use crate::domain::{PreferredDirection, Unit};

/// Dashboard grouping of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    KeyEconomic,
    Price,
    RawMaterial,
    SupplyChain,
    EquipmentCost,
    MaterialCost,
    Other,
}

impl IndicatorCategory {
    pub fn is_cost(self) -> bool {
        matches!(
            self,
            IndicatorCategory::EquipmentCost | IndicatorCategory::MaterialCost
        )
    }
}

/// Horizontal reference line drawn on an indicator chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: &'static str,
}

const HISTORICAL_AVERAGE: ReferenceLine = ReferenceLine {
    value: 0.0,
    label: "Historical Average",
};

const NEUTRAL_LEVEL: ReferenceLine = ReferenceLine {
    value: 50.0,
    label: "Neutral Level",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSpec {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub preferred_direction: PreferredDirection,
    pub description: String,
    pub category: IndicatorCategory,
    pub change_mode: ChangeMode,
    pub reference_line: Option<ReferenceLine>,
}

impl IndicatorSpec {
    /// Defaults for an id the catalog has never heard of.
    pub fn unknown(id: &str) -> Self {
        let title = title_case(id);
        Self {
            id: id.to_string(),
            description: format!("{title} indicator"),
            name: title,
            unit: Unit::Index,
            preferred_direction: PreferredDirection::Neutral,
            category: IndicatorCategory::Other,
            change_mode: ChangeMode::Percent,
            reference_line: None,
        }
    }

    /// Y-axis title used on charts.
    pub fn axis_title(&self) -> &'static str {
        match self.unit {
            Unit::Dollar if self.id == "wti_oil" => "USD per Barrel",
            Unit::Dollar => "USD",
            _ => "Index Value",
        }
    }
}

/// Turn `baltic_dry_index` into `Baltic Dry Index`.
///
/// Underscores become spaces and each alphabetic run starts uppercase.
pub fn title_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut at_word_start = true;
    for ch in id.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Ordered collection of indicator specs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    specs: Vec<IndicatorSpec>,
}

fn spec(
    id: &str,
    name: &str,
    unit: Unit,
    direction: PreferredDirection,
    category: IndicatorCategory,
    description: &str,
) -> IndicatorSpec {
    IndicatorSpec {
        id: id.into(),
        name: name.into(),
        unit,
        preferred_direction: direction,
        description: description.into(),
        category,
        change_mode: ChangeMode::Percent,
        reference_line: None,
    }
}

impl Catalog {
    /// The sixteen indicators the dashboard ships with.
    pub fn builtin() -> Self {
        use IndicatorCategory::*;
        use PreferredDirection::{Down, Neutral};
        use Unit::{Dollar, Index};

        let mut specs = vec![
            spec(
                "cruspi",
                "CRU Steel Price Index",
                Index,
                Neutral,
                Price,
                "CRU Steel Price Index tracks steel price movements globally",
            ),
            spec(
                "cruspi_long",
                "CRU Long Products Index",
                Index,
                Neutral,
                Price,
                "CRU Steel Price Index for Long Products tracks price movements for steel long products",
            ),
            spec(
                "wti_oil",
                "WTI Crude Oil Price",
                Dollar,
                Down,
                Price,
                "West Texas Intermediate Crude Oil price, U.S. benchmark for oil prices",
            ),
            spec(
                "supply_chain",
                "NY Fed Supply Chain Pressure Index",
                Index,
                Down,
                KeyEconomic,
                "Tracks global supply chain conditions (negative values = lower pressure)",
            ),
            spec(
                "ppi_steel_scrap",
                "BLS Steel Scrap Price Index",
                Index,
                Down,
                RawMaterial,
                "Producer Price Index for Metals and Metal Products: Carbon Steel Scrap",
            ),
            spec(
                "pmi_input_us",
                "ISM Manufacturing PMI Input Prices",
                Index,
                Down,
                RawMaterial,
                "PMI Input Prices index tracks price changes paid by manufacturers",
            ),
            spec(
                "ism_supplier_deliveries",
                "ISM Supplier Deliveries Index",
                Index,
                Down,
                SupplyChain,
                "ISM Manufacturing Report on Business Supplier Deliveries Index. Values above 50 indicate slower deliveries, values below 50 indicate faster deliveries.",
            ),
            spec(
                "baltic_dry_index",
                "Baltic Dry Index (BDIY Index)",
                Index,
                Neutral,
                Price,
                "The Baltic Dry Index is a shipping and trade index measuring changes in the cost of transporting various raw materials. It serves as an indicator of global trade volume and economic activity.",
            ),
            spec(
                "dollar_index",
                "US Dollar Index (DXY Curncy)",
                Index,
                Neutral,
                Price,
                "The US Dollar Index measures the value of the US dollar relative to a basket of foreign currencies. A higher index indicates a stronger dollar relative to other major currencies.",
            ),
            spec(
                "empire_prices_paid",
                "NY Fed Empire State Manufacturing 6M Ahead Prices Paid",
                Index,
                Down,
                KeyEconomic,
                "Empire State Manufacturing Survey 6-Month Ahead Prices Paid measures future inflation expectations in the NY manufacturing sector. Values reflect expected price changes over the next 6 months.",
            ),
            spec(
                "komatsu_equipment",
                "Komatsu Heavy Equipment Cost Index",
                Index,
                Down,
                EquipmentCost,
                "Composite cost index for Komatsu Heavy Equipment based on weighted BLS PPI components",
            ),
            spec(
                "sms_equipment",
                "SMS Equipment Cost Index",
                Index,
                Down,
                EquipmentCost,
                "Composite cost index for SMS Equipment based on weighted BLS PPI components",
            ),
            spec(
                "caterpillar_equipment",
                "Caterpillar Equipment Cost Index",
                Index,
                Down,
                EquipmentCost,
                "Composite cost index for Caterpillar Equipment based on weighted BLS PPI components",
            ),
            spec(
                "fabricated_steel",
                "Fabricated Structural Steel Cost Index",
                Index,
                Down,
                MaterialCost,
                "Composite cost index for Fabricated Structural Steel based on weighted BLS PPI components",
            ),
            spec(
                "cement_ready_mix",
                "Cement and Ready-Mix Cost Index",
                Index,
                Down,
                MaterialCost,
                "Composite cost index for Cement and Ready-Mix based on weighted BLS PPI components",
            ),
            spec(
                "explosives",
                "Explosives & Accessories Cost Index",
                Index,
                Down,
                MaterialCost,
                "Composite cost index for Explosives & Accessories based on weighted BLS PPI components",
            ),
        ];

        for s in &mut specs {
            match s.id.as_str() {
                "supply_chain" => {
                    s.change_mode = ChangeMode::Absolute;
                    s.reference_line = Some(HISTORICAL_AVERAGE);
                }
                "pmi_input_us" | "ism_supplier_deliveries" | "empire_prices_paid" => {
                    s.reference_line = Some(NEUTRAL_LEVEL);
                }
                _ => {}
            }
        }

        Self { specs }
    }

    /// Restrict or extend the catalog to exactly `ids`, in that order.
    ///
    /// Known ids keep their entries; unknown ids get [`IndicatorSpec::unknown`].
    pub fn select(&self, ids: &[String]) -> Self {
        let specs = ids.iter().map(|id| self.spec(id)).collect();
        Self { specs }
    }

    pub fn get(&self, id: &str) -> Option<&IndicatorSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// Entry for `id`, falling back to defaults for unknown ids.
    pub fn spec(&self, id: &str) -> IndicatorSpec {
        self.get(id)
            .cloned()
            .unwrap_or_else(|| IndicatorSpec::unknown(id))
    }

    pub fn specs(&self) -> &[IndicatorSpec] {
        &self.specs
    }

    pub fn ids(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn in_category(&self, category: IndicatorCategory) -> Vec<&IndicatorSpec> {
        self.specs.iter().filter(|s| s.category == category).collect()
    }

    /// Ids of equipment and material cost indices.
    pub fn cost_ids(&self) -> Vec<&str> {
        self.specs
            .iter()
            .filter(|s| s.category.is_cost())
            .map(|s| s.id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
