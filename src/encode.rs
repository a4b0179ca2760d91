use crate::prospect::{CompleteProspect, Gender, VehicleAge};

pub const N_FEATURES: usize = 11;

/// Training-time column order. The model was fitted on exactly these columns.
///
/// Vehicle age is two indicator columns with "1-2 Years" as the dropped
/// baseline, so both flags are 0 for that category.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Gender_Male",
    "Age",
    "Driving_License",
    "Region_Code",
    "Previously_Insured",
    "Vehicle_Damage_Yes",
    "Annual_Premium",
    "Policy_Sales_Channel",
    "Vintage",
    "Vehicle_Age_lt_1_Year",
    "Vehicle_Age_gt_2_Years",
];

/// One model input row, position-significant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pairs of (column name, value), handy for logging.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; N_FEATURES]> for FeatureVector {
    fn from(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

pub fn encode(p: &CompleteProspect) -> FeatureVector {
    FeatureVector([
        flag(p.gender == Gender::Male),
        p.age,
        flag(p.driving_license.is_yes()),
        p.region_code,
        flag(p.previously_insured.is_yes()),
        flag(p.vehicle_damage.is_yes()),
        p.annual_premium,
        p.sales_channel,
        p.vintage,
        flag(p.vehicle_age == VehicleAge::LessThanOneYear),
        flag(p.vehicle_age == VehicleAge::MoreThanTwoYears),
    ])
}
