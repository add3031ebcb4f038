//! Plain-language commentary for the key economic indicators.

/// Numbers the commentary is written from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommentaryInputs {
    pub latest_value: f64,
    /// Points for supply chain pressure, percent otherwise.
    pub monthly_change: Option<f64>,
    pub yoy_change: Option<f64>,
    /// Last forecast value minus the latest value, in points.
    pub forecast_change: Option<f64>,
}

/// Commentary for `indicator_id`, or `None` for indicators without any.
pub fn generate(indicator_id: &str, inputs: &CommentaryInputs) -> Option<String> {
    let sentences = match indicator_id {
        "supply_chain" => supply_chain(inputs),
        "empire_prices_paid" => empire_prices_paid(inputs),
        _ => return None,
    };
    Some(
        sentences
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn supply_chain(i: &CommentaryInputs) -> [Option<String>; 3] {
    let level = if i.latest_value > 0.0 {
        format!(
            "The current value of {:.2} indicates above-average supply chain pressure.",
            i.latest_value
        )
    } else {
        format!(
            "The current value of {:.2} indicates below-average supply chain pressure.",
            i.latest_value
        )
    };

    let m = i.monthly_change.unwrap_or(0.0);
    let monthly = if m < -0.2 {
        format!(
            "Supply chain pressure has notably decreased by {:.2} points over the last month, a positive development.",
            m.abs()
        )
    } else if m < 0.0 {
        format!(
            "Supply chain pressure has slightly decreased by {:.2} points over the last month.",
            m.abs()
        )
    } else if m < 0.2 {
        format!(
            "Supply chain pressure has remained relatively stable with a small increase of {m:.2} points over the last month."
        )
    } else {
        format!(
            "Supply chain pressure has increased by {m:.2} points over the last month, indicating worsening conditions."
        )
    };

    let forecast = i.forecast_change.filter(|c| *c != 0.0).map(|c| {
        if c < 0.0 {
            format!(
                "The forecast indicates improving conditions with a projected {:.2} point decrease in pressure over the next few months.",
                c.abs()
            )
        } else {
            format!(
                "The forecast suggests continued challenges with a projected {c:.2} point increase in pressure over the next few months."
            )
        }
    });

    [Some(level), Some(monthly), forecast]
}

fn empire_prices_paid(i: &CommentaryInputs) -> [Option<String>; 3] {
    let direction = if i.latest_value > 50.0 {
        "increasing"
    } else {
        "decreasing"
    };
    let level = format!(
        "The current Empire Manufacturing Prices Paid index of {:.2} indicates {direction} input prices for manufacturers in New York state.",
        i.latest_value
    );

    let m = i.monthly_change.unwrap_or(0.0);
    let monthly = if m < -1.0 {
        format!(
            "The index has decreased by {:.2}% month-over-month, suggesting easing price pressures.",
            m.abs()
        )
    } else if m < 1.0 {
        format!("The index has remained relatively stable month-over-month ({m:.2}%).")
    } else {
        format!("The index has increased by {m:.2}% month-over-month, suggesting growing price pressures.")
    };

    let yoy = i.yoy_change.filter(|c| *c != 0.0 && c.is_finite()).map(|y| {
        if y < -5.0 {
            format!("Year-over-year, prices paid have decreased significantly ({y:.2}%), indicating substantial relief in input costs.")
        } else if y < 0.0 {
            format!("Year-over-year, prices paid have moderated ({y:.2}%).")
        } else if y < 5.0 {
            format!("Year-over-year, prices paid have increased moderately ({y:.2}%).")
        } else {
            format!("Year-over-year, prices paid have increased significantly ({y:.2}%), indicating persistent inflation in input costs.")
        }
    });

    [Some(level), Some(monthly), yoy]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_indicators_have_none() {
        assert_eq!(generate("wti_oil", &CommentaryInputs::default()), None);
    }

    #[test]
    fn supply_chain_improving() {
        let text = generate(
            "supply_chain",
            &CommentaryInputs {
                latest_value: 0.35,
                monthly_change: Some(-0.25),
                yoy_change: None,
                forecast_change: Some(-0.4),
            },
        )
        .unwrap();
        assert_eq!(
            text,
            "The current value of 0.35 indicates above-average supply chain pressure. \
             Supply chain pressure has notably decreased by 0.25 points over the last month, a positive development. \
             The forecast indicates improving conditions with a projected 0.40 point decrease in pressure over the next few months."
        );
    }

    #[test]
    fn supply_chain_bands() {
        let at = |m: f64| {
            generate(
                "supply_chain",
                &CommentaryInputs {
                    latest_value: -0.1,
                    monthly_change: Some(m),
                    ..Default::default()
                },
            )
            .unwrap()
        };
        assert!(at(-0.1).contains("slightly decreased by 0.10 points"));
        assert!(at(0.1).contains("small increase of 0.10 points"));
        assert!(at(0.3).contains("indicating worsening conditions"));
        assert!(at(0.3).starts_with("The current value of -0.10 indicates below-average"));
        // No forecast sentence, no trailing space.
        assert!(at(0.3).ends_with("conditions."));
    }

    #[test]
    fn supply_chain_forecast_increase() {
        let text = generate(
            "supply_chain",
            &CommentaryInputs {
                latest_value: 0.0,
                monthly_change: None,
                yoy_change: None,
                forecast_change: Some(0.2),
            },
        )
        .unwrap();
        assert!(text.contains("small increase of 0.00 points"));
        assert!(text.ends_with("projected 0.20 point increase in pressure over the next few months."));
    }

    #[test]
    fn empire_bands() {
        let text = generate(
            "empire_prices_paid",
            &CommentaryInputs {
                latest_value: 55.0,
                monthly_change: Some(-2.0),
                yoy_change: Some(-6.0),
                forecast_change: Some(10.0),
            },
        )
        .unwrap();
        assert_eq!(
            text,
            "The current Empire Manufacturing Prices Paid index of 55.00 indicates increasing input prices for manufacturers in New York state. \
             The index has decreased by 2.00% month-over-month, suggesting easing price pressures. \
             Year-over-year, prices paid have decreased significantly (-6.00%), indicating substantial relief in input costs."
        );

        let calm = generate(
            "empire_prices_paid",
            &CommentaryInputs {
                latest_value: 40.0,
                monthly_change: Some(0.5),
                yoy_change: Some(3.0),
                forecast_change: None,
            },
        )
        .unwrap();
        assert!(calm.contains("decreasing input prices"));
        assert!(calm.contains("remained relatively stable month-over-month (0.50%)"));
        assert!(calm.ends_with("increased moderately (3.00%)."));
    }

    #[test]
    fn empire_skips_zero_yoy() {
        let text = generate(
            "empire_prices_paid",
            &CommentaryInputs {
                latest_value: 50.0,
                monthly_change: Some(1.5),
                yoy_change: Some(0.0),
                forecast_change: None,
            },
        )
        .unwrap();
        assert!(text.ends_with("suggesting growing price pressures."));
    }
}
