use rand::Rng;
use serde::Serialize;

pub const MAX_DATA_POINTS: usize = 20;

const COMPANIES: [&str; MAX_DATA_POINTS] = [
    "Alpha Corp",
    "Beta Inc",
    "Gamma LLC",
    "Delta Ltd",
    "Epsilon Co",
    "Zeta Group",
    "Eta Systems",
    "Theta Tech",
    "Iota Industries",
    "Kappa Corp",
    "Lambda Ltd",
    "Mu Inc",
    "Nu Systems",
    "Xi Corp",
    "Omicron Co",
    "Pi Tech",
    "Rho Industries",
    "Sigma Group",
    "Tau Ltd",
    "Upsilon Inc",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub name: &'static str,
    pub value: f64,
}

/// Illustrative market-share figures, one per company, capped at twenty.
pub fn sample_data<R: Rng>(slices: u32, rng: &mut R) -> Vec<DataPoint> {
    let count = (slices as usize).min(MAX_DATA_POINTS);
    COMPANIES
        .iter()
        .take(count)
        .map(|&name| {
            let raw: f64 = rng.random_range(20.0..120.0);
            DataPoint {
                name,
                value: (raw * 100.0).round() / 100.0,
            }
        })
        .collect()
}
