/// Column order the scaler and classifier were fit with.
pub const FEATURE_COLUMNS: [&str; 13] = [
    "Matematika",
    "Fisika",
    "Kimia",
    "Biologi",
    "Ekonomi",
    "Sosiologi",
    "Agama Islam",
    "PPKN",
    "Sejarah",
    "Seni Budaya",
    "Penjas",
    "B_Indonesia",
    "B_Inggris",
];

pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; N_FEATURES],
}

impl FeatureVector {
    pub fn new(values: [f64; N_FEATURES]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/features.rs"]
mod tests;
