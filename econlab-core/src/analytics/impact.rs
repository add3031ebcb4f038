//! Business-impact classification of a change.

use serde::{Deserialize, Serialize};

use super::change::ChangeMode;
use crate::domain::PreferredDirection;

/// Changes at or below this magnitude (in percent) are not significant.
pub const PERCENT_SIGNIFICANCE: f64 = 2.0;
/// Changes at or below this magnitude (in points) are not significant.
pub const ABSOLUTE_SIGNIFICANCE: f64 = 0.1;

/// Indicators where a decrease is good for the business regardless of the
/// direction recorded in their source files.
const COST_PERSPECTIVE_IDS: &[&str] = &["wti_oil", "ppi_steel_scrap", "dollar_index", "baltic_dry_index"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Positive => "positive",
            Impact::Negative => "negative",
            Impact::Neutral => "neutral",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Impact::Positive => "positive-impact",
            Impact::Negative => "negative-impact",
            Impact::Neutral => "neutral-impact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrow {
    Up,
    Down,
}

impl Arrow {
    pub fn symbol(self) -> &'static str {
        match self {
            Arrow::Up => "↑",
            Arrow::Down => "↓",
        }
    }
}

/// Arrow plus impact for one change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReading {
    pub arrow: Option<Arrow>,
    pub impact: Impact,
}

impl ImpactReading {
    pub const NONE: ImpactReading = ImpactReading {
        arrow: None,
        impact: Impact::Neutral,
    };

    pub fn symbol(&self) -> &'static str {
        self.arrow.map(Arrow::symbol).unwrap_or("")
    }
}

/// Direction used for impact, after the cost-perspective overrides.
pub fn business_direction(indicator_id: &str, direction: PreferredDirection) -> PreferredDirection {
    if COST_PERSPECTIVE_IDS.contains(&indicator_id) {
        PreferredDirection::Down
    } else {
        direction
    }
}

pub fn significance_threshold(mode: ChangeMode) -> f64 {
    match mode {
        ChangeMode::Percent => PERCENT_SIGNIFICANCE,
        ChangeMode::Absolute => ABSOLUTE_SIGNIFICANCE,
    }
}

/// Classify a change for the given direction.
///
/// Moves in the preferred direction are always positive. Moves against it
/// are negative only when significant. Neutral indicators take the cost
/// perspective for significant moves (rises are negative).
pub fn classify(change: Option<f64>, direction: PreferredDirection, mode: ChangeMode) -> ImpactReading {
    let Some(change) = change.filter(|c| c.is_finite()) else {
        return ImpactReading::NONE;
    };
    let significant = change.abs() > significance_threshold(mode);

    let (impact, arrow) = match direction {
        PreferredDirection::Down => {
            let impact = if change < 0.0 {
                Impact::Positive
            } else if significant {
                Impact::Negative
            } else {
                Impact::Neutral
            };
            let arrow = if change < 0.0 { Arrow::Down } else { Arrow::Up };
            (impact, arrow)
        }
        PreferredDirection::Up => {
            let impact = if change > 0.0 {
                Impact::Positive
            } else if significant {
                Impact::Negative
            } else {
                Impact::Neutral
            };
            let arrow = if change > 0.0 { Arrow::Up } else { Arrow::Down };
            (impact, arrow)
        }
        PreferredDirection::Neutral => {
            let impact = match (significant, change > 0.0) {
                (false, _) => Impact::Neutral,
                (true, true) => Impact::Negative,
                (true, false) => Impact::Positive,
            };
            let arrow = if change > 0.0 { Arrow::Up } else { Arrow::Down };
            (impact, arrow)
        }
    };

    ImpactReading {
        arrow: Some(arrow),
        impact,
    }
}

/// [`classify`] after applying [`business_direction`] for `indicator_id`.
pub fn classify_for(
    indicator_id: &str,
    change: Option<f64>,
    direction: PreferredDirection,
    mode: ChangeMode,
) -> ImpactReading {
    classify(change, business_direction(indicator_id, direction), mode)
}

/// Impact of a projected move, with no significance band.
pub fn forecast_impact(change: f64, direction: PreferredDirection) -> Impact {
    match direction {
        PreferredDirection::Down if change > 0.0 => Impact::Negative,
        PreferredDirection::Down => Impact::Positive,
        PreferredDirection::Up if change > 0.0 => Impact::Positive,
        PreferredDirection::Up => Impact::Negative,
        PreferredDirection::Neutral => Impact::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PreferredDirection::*;

    #[test]
    fn down_direction() {
        let r = classify(Some(-0.5), Down, ChangeMode::Percent);
        assert_eq!(r.impact, Impact::Positive);
        assert_eq!(r.arrow, Some(Arrow::Down));

        let r = classify(Some(1.0), Down, ChangeMode::Percent);
        assert_eq!(r.impact, Impact::Neutral);
        assert_eq!(r.arrow, Some(Arrow::Up));

        let r = classify(Some(2.5), Down, ChangeMode::Percent);
        assert_eq!(r.impact, Impact::Negative);
    }

    #[test]
    fn up_direction() {
        assert_eq!(classify(Some(0.1), Up, ChangeMode::Percent).impact, Impact::Positive);
        assert_eq!(classify(Some(-1.0), Up, ChangeMode::Percent).impact, Impact::Neutral);
        let r = classify(Some(-3.0), Up, ChangeMode::Percent);
        assert_eq!(r.impact, Impact::Negative);
        assert_eq!(r.arrow, Some(Arrow::Down));
    }

    #[test]
    fn neutral_direction_uses_cost_perspective() {
        assert_eq!(classify(Some(1.9), Neutral, ChangeMode::Percent).impact, Impact::Neutral);
        assert_eq!(classify(Some(2.1), Neutral, ChangeMode::Percent).impact, Impact::Negative);
        assert_eq!(classify(Some(-2.1), Neutral, ChangeMode::Percent).impact, Impact::Positive);
    }

    #[test]
    fn absolute_threshold_is_tighter() {
        assert_eq!(classify(Some(0.15), Down, ChangeMode::Absolute).impact, Impact::Negative);
        assert_eq!(classify(Some(0.15), Down, ChangeMode::Percent).impact, Impact::Neutral);
        // Exactly at the threshold is not significant.
        assert_eq!(classify(Some(0.1), Down, ChangeMode::Absolute).impact, Impact::Neutral);
    }

    #[test]
    fn missing_change_has_no_arrow() {
        let r = classify(None, Down, ChangeMode::Percent);
        assert_eq!(r, ImpactReading::NONE);
        assert_eq!(r.symbol(), "");
    }

    #[test]
    fn business_overrides() {
        assert_eq!(business_direction("dollar_index", Neutral), Down);
        assert_eq!(business_direction("baltic_dry_index", Up), Down);
        assert_eq!(business_direction("cruspi", Neutral), Neutral);
        let r = classify_for("dollar_index", Some(-0.5), Neutral, ChangeMode::Percent);
        assert_eq!(r.impact, Impact::Positive);
    }

    #[test]
    fn forecast_impact_by_direction() {
        assert_eq!(forecast_impact(1.0, Down), Impact::Negative);
        assert_eq!(forecast_impact(-1.0, Down), Impact::Positive);
        assert_eq!(forecast_impact(1.0, Up), Impact::Positive);
        assert_eq!(forecast_impact(1.0, Neutral), Impact::Neutral);
    }
}
