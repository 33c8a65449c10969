use crate::error::PortfolioError;
use core_types::TimeSeries;
use std::collections::BTreeMap;

/// Combines per-asset strategy returns into one series by unweighted mean.
///
/// Each date averages the assets that have a value there; an asset not yet
/// listed (or already delisted) at a date is simply excluded from that
/// date's average, never zero-filled. Callers that want uniform coverage
/// pre-align their inputs.
pub fn equal_weight(
    returns_by_asset: &BTreeMap<String, TimeSeries>,
) -> Result<TimeSeries, PortfolioError> {
    if returns_by_asset.is_empty() {
        return Err(PortfolioError::NoAssets);
    }

    let mut buckets: BTreeMap<chrono::NaiveDate, (f64, u32)> = BTreeMap::new();
    for series in returns_by_asset.values() {
        for &(date, value) in series.points() {
            let entry = buckets.entry(date).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let points = buckets
        .into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect();
    Ok(TimeSeries::new(points)?)
}

/// Weighted variant of `equal_weight`: each asset contributes with its
/// configured weight, renormalized over the assets present at each date.
///
/// Every asset in the portfolio must have a weight; weights must be finite,
/// non-negative, and not all zero. A date where every present asset carries
/// weight zero has no defined portfolio return and is dropped from the
/// output, the same way a date with no present assets at all would be.
pub fn weighted(
    returns_by_asset: &BTreeMap<String, TimeSeries>,
    weights: &BTreeMap<String, f64>,
) -> Result<TimeSeries, PortfolioError> {
    if returns_by_asset.is_empty() {
        return Err(PortfolioError::NoAssets);
    }
    for asset in returns_by_asset.keys() {
        let Some(&weight) = weights.get(asset) else {
            return Err(PortfolioError::MissingWeight(asset.clone()));
        };
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(PortfolioError::InvalidWeights(format!(
                "weight for '{asset}' must be finite and non-negative"
            )));
        }
    }
    if weights.values().all(|&w| w == 0.0) {
        return Err(PortfolioError::InvalidWeights(
            "at least one weight must be positive".to_string(),
        ));
    }

    let mut buckets: BTreeMap<chrono::NaiveDate, (f64, f64)> = BTreeMap::new();
    for (asset, series) in returns_by_asset {
        let weight = weights[asset];
        for &(date, value) in series.points() {
            let entry = buckets.entry(date).or_insert((0.0, 0.0));
            entry.0 += weight * value;
            entry.1 += weight;
        }
    }

    let points = buckets
        .into_iter()
        .filter(|&(_, (_, total_weight))| total_weight > 0.0)
        .map(|(date, (sum, total_weight))| (date, sum / total_weight))
        .collect();
    Ok(TimeSeries::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
    }

    fn series(points: &[(u32, f64)]) -> TimeSeries {
        TimeSeries::new(points.iter().map(|&(d, v)| (date(d), v)).collect()).unwrap()
    }

    #[test]
    fn equal_weight_averages_matching_dates() {
        let mut assets = BTreeMap::new();
        assets.insert("a".to_string(), series(&[(1, 0.01), (2, 0.02)]));
        assets.insert("b".to_string(), series(&[(1, 0.03), (2, -0.01)]));
        let portfolio = equal_weight(&assets).unwrap();
        let values: Vec<f64> = portfolio.values().collect();
        assert!((values[0] - 0.02).abs() < 1e-12);
        assert!((values[1] - 0.005).abs() < 1e-12);
    }

    #[test]
    fn unlisted_assets_are_excluded_not_zero_filled() {
        let mut assets = BTreeMap::new();
        assets.insert("a".to_string(), series(&[(1, 0.01), (2, 0.02)]));
        assets.insert("b".to_string(), series(&[(2, 0.04)]));
        let portfolio = equal_weight(&assets).unwrap();
        let values: Vec<f64> = portfolio.values().collect();
        // Date 1 averages only asset a; date 2 averages both.
        assert!((values[0] - 0.01).abs() < 1e-12);
        assert!((values[1] - 0.03).abs() < 1e-12);
    }

    #[test]
    fn empty_portfolio_is_an_error() {
        assert_eq!(
            equal_weight(&BTreeMap::new()),
            Err(PortfolioError::NoAssets)
        );
    }

    #[test]
    fn weighted_mean_uses_configured_weights() {
        let mut assets = BTreeMap::new();
        assets.insert("a".to_string(), series(&[(1, 0.02)]));
        assets.insert("b".to_string(), series(&[(1, 0.04)]));
        let mut weights = BTreeMap::new();
        weights.insert("a".to_string(), 3.0);
        weights.insert("b".to_string(), 1.0);
        let portfolio = weighted(&assets, &weights).unwrap();
        assert!((portfolio.values().next().unwrap() - 0.025).abs() < 1e-12);
    }

    #[test]
    fn dates_covered_only_by_zero_weight_assets_are_dropped() {
        let mut assets = BTreeMap::new();
        assets.insert("a".to_string(), series(&[(1, 0.02)]));
        assets.insert("b".to_string(), series(&[(1, 0.04), (2, 0.01)]));
        let mut weights = BTreeMap::new();
        weights.insert("a".to_string(), 1.0);
        weights.insert("b".to_string(), 0.0);
        let portfolio = weighted(&assets, &weights).unwrap();
        // Date 2 is covered only by the zero-weight asset and has no
        // defined value.
        assert_eq!(portfolio.len(), 1);
        assert!((portfolio.values().next().unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn weighted_requires_a_weight_per_asset() {
        let mut assets = BTreeMap::new();
        assets.insert("a".to_string(), series(&[(1, 0.02)]));
        let weights = BTreeMap::new();
        assert!(matches!(
            weighted(&assets, &weights),
            Err(PortfolioError::MissingWeight(_))
        ));
    }
}
