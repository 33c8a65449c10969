use itertools::Itertools;
use serde::Serialize;

/// One point in the (volatility window × target vol) parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    pub window: usize,
    pub target_vol: f64,
}

/// Generates every unique (window, target_vol) combination from the defined
/// parameter space, in deterministic row-major order.
pub fn parameter_grid(windows: &[usize], target_vols: &[f64]) -> Vec<GridPoint> {
    windows
        .iter()
        .cartesian_product(target_vols.iter())
        .map(|(&window, &target_vol)| GridPoint { window, target_vol })
        .collect()
}
