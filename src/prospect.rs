use serde::{de, Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

/// Placeholder shown as the first dropdown option. Submitting it means "no choice yet".
pub const SENTINEL: &str = "Select";

/// A closed set of dropdown options with a stable form key and a display label.
pub trait Choice: Copy + PartialEq + 'static {
    /// (value, form key, label), in display order.
    const OPTIONS: &'static [(Self, &'static str, &'static str)];

    fn key(self) -> &'static str {
        Self::OPTIONS
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, k, _)| *k)
            .unwrap_or_default()
    }

    fn label(self) -> &'static str {
        Self::OPTIONS
            .iter()
            .find(|(v, _, _)| *v == self)
            .map(|(_, _, l)| *l)
            .unwrap_or_default()
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::OPTIONS
            .iter()
            .find(|(_, k, _)| k.eq_ignore_ascii_case(key))
            .map(|(v, _, _)| *v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const OPTIONS: &'static [(Self, &'static str, &'static str)] = &[
        (Gender::Male, "male", "Male"),
        (Gender::Female, "female", "Female"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl Choice for YesNo {
    const OPTIONS: &'static [(Self, &'static str, &'static str)] =
        &[(YesNo::Yes, "yes", "Yes"), (YesNo::No, "no", "No")];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleAge {
    LessThanOneYear,
    OneToTwoYears,
    MoreThanTwoYears,
}

impl Choice for VehicleAge {
    const OPTIONS: &'static [(Self, &'static str, &'static str)] = &[
        (VehicleAge::LessThanOneYear, "lt_1yr", "Less than 1 Year"),
        (VehicleAge::OneToTwoYears, "1_to_2yr", "1-2 Years"),
        (VehicleAge::MoreThanTwoYears, "gt_2yr", "More than 2 Years"),
    ];
}

/// Form fields, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gender,
    Age,
    DrivingLicense,
    RegionCode,
    PreviouslyInsured,
    VehicleAge,
    VehicleDamage,
    AnnualPremium,
    SalesChannel,
    Vintage,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Gender => "gender",
            Field::Age => "age",
            Field::DrivingLicense => "driving_license",
            Field::RegionCode => "region_code",
            Field::PreviouslyInsured => "previously_insured",
            Field::VehicleAge => "vehicle_age",
            Field::VehicleDamage => "vehicle_damage",
            Field::AnnualPremium => "annual_premium",
            Field::SalesChannel => "sales_channel",
            Field::Vintage => "vintage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive bounds of the numeric inputs. `max` is `None` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
    /// Integer-valued field.
    pub whole: bool,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && value >= self.min
            && self.max.map_or(true, |max| value <= max)
            && (!self.whole || value.fract() == 0.0)
    }
}

pub const AGE: Bounds = Bounds { min: 18.0, max: Some(100.0), step: 1.0, whole: true };
pub const REGION_CODE: Bounds = Bounds { min: 0.0, max: None, step: 1.0, whole: true };
pub const ANNUAL_PREMIUM: Bounds =
    Bounds { min: 1000.0, max: Some(100_000.0), step: 100.0, whole: false };
pub const SALES_CHANNEL: Bounds = Bounds { min: 1.0, max: Some(200.0), step: 1.0, whole: true };
pub const VINTAGE: Bounds = Bounds { min: 0.0, max: Some(300.0), step: 1.0, whole: true };

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("missing selection for {}", join(.0))]
    Incomplete(Vec<Field>),
    #[error("{field} = {value} is outside the allowed range")]
    OutOfRange { field: Field, value: f64, bounds: Bounds },
}

fn join(fields: &[Field]) -> String {
    fields.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
}

/// One form submission. Selections are `None` until the user picks a value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProspectInput {
    #[serde(default, deserialize_with = "selection")]
    pub gender: Option<Gender>,
    #[serde(default = "defaults::age", deserialize_with = "number")]
    pub age: f64,
    #[serde(default, deserialize_with = "selection")]
    pub driving_license: Option<YesNo>,
    #[serde(default, deserialize_with = "number")]
    pub region_code: f64,
    #[serde(default, deserialize_with = "selection")]
    pub previously_insured: Option<YesNo>,
    #[serde(default, deserialize_with = "selection")]
    pub vehicle_age: Option<VehicleAge>,
    #[serde(default, deserialize_with = "selection")]
    pub vehicle_damage: Option<YesNo>,
    #[serde(default = "defaults::annual_premium", deserialize_with = "number")]
    pub annual_premium: f64,
    #[serde(default = "defaults::sales_channel", deserialize_with = "number")]
    pub sales_channel: f64,
    #[serde(default, deserialize_with = "number")]
    pub vintage: f64,
}

mod defaults {
    pub fn age() -> f64 {
        super::AGE.min
    }

    pub fn annual_premium() -> f64 {
        super::ANNUAL_PREMIUM.min
    }

    pub fn sales_channel() -> f64 {
        super::SALES_CHANNEL.min
    }
}

impl Default for ProspectInput {
    fn default() -> Self {
        Self {
            gender: None,
            age: defaults::age(),
            driving_license: None,
            region_code: 0.0,
            previously_insured: None,
            vehicle_age: None,
            vehicle_damage: None,
            annual_premium: defaults::annual_premium(),
            sales_channel: defaults::sales_channel(),
            vintage: 0.0,
        }
    }
}

fn selection<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(key) if key.eq_ignore_ascii_case(SENTINEL) => Ok(None),
        Some(key) => T::from_key(key)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unknown option `{key}`"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

/// Empty or unparseable entries become NaN so the range check reports them.
fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => n,
        RawNumber::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
    })
}

/// A prospect with every selection made and every number in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteProspect {
    pub gender: Gender,
    pub age: f64,
    pub driving_license: YesNo,
    pub region_code: f64,
    pub previously_insured: YesNo,
    pub vehicle_age: VehicleAge,
    pub vehicle_damage: YesNo,
    pub annual_premium: f64,
    pub sales_channel: f64,
    pub vintage: f64,
}

impl ProspectInput {
    /// Selections that are still unset, in page order.
    pub fn missing(&self) -> Vec<Field> {
        let slots = [
            (Field::Gender, self.gender.is_none()),
            (Field::DrivingLicense, self.driving_license.is_none()),
            (Field::PreviouslyInsured, self.previously_insured.is_none()),
            (Field::VehicleAge, self.vehicle_age.is_none()),
            (Field::VehicleDamage, self.vehicle_damage.is_none()),
        ];
        slots
            .into_iter()
            .filter_map(|(field, unset)| unset.then_some(field))
            .collect()
    }

    fn check_ranges(&self) -> Result<(), InputError> {
        let numbers = [
            (Field::Age, self.age, AGE),
            (Field::RegionCode, self.region_code, REGION_CODE),
            (Field::AnnualPremium, self.annual_premium, ANNUAL_PREMIUM),
            (Field::SalesChannel, self.sales_channel, SALES_CHANNEL),
            (Field::Vintage, self.vintage, VINTAGE),
        ];
        for (field, value, bounds) in numbers {
            if !bounds.contains(value) {
                return Err(InputError::OutOfRange { field, value, bounds });
            }
        }
        Ok(())
    }

    /// Missing selections are reported before range violations.
    pub fn complete(&self) -> Result<CompleteProspect, InputError> {
        match (
            self.gender,
            self.driving_license,
            self.previously_insured,
            self.vehicle_age,
            self.vehicle_damage,
        ) {
            (
                Some(gender),
                Some(driving_license),
                Some(previously_insured),
                Some(vehicle_age),
                Some(vehicle_damage),
            ) => {
                self.check_ranges()?;
                Ok(CompleteProspect {
                    gender,
                    age: self.age,
                    driving_license,
                    region_code: self.region_code,
                    previously_insured,
                    vehicle_age,
                    vehicle_damage,
                    annual_premium: self.annual_premium,
                    sales_channel: self.sales_channel,
                    vintage: self.vintage,
                })
            }
            _ => Err(InputError::Incomplete(self.missing())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled() -> ProspectInput {
        ProspectInput {
            gender: Some(Gender::Female),
            age: 44.0,
            driving_license: Some(YesNo::Yes),
            region_code: 28.0,
            previously_insured: Some(YesNo::No),
            vehicle_age: Some(VehicleAge::MoreThanTwoYears),
            vehicle_damage: Some(YesNo::Yes),
            annual_premium: 40454.0,
            sales_channel: 26.0,
            vintage: 217.0,
        }
    }

    #[test]
    fn sentinel_and_empty_values_are_unset() {
        let input: ProspectInput = serde_json::from_value(json!({
            "gender": "Select",
            "driving_license": "",
            "vehicle_age": "gt_2yr",
        }))
        .unwrap();

        assert_eq!(input.gender, None);
        assert_eq!(input.driving_license, None);
        assert_eq!(input.previously_insured, None);
        assert_eq!(input.vehicle_age, Some(VehicleAge::MoreThanTwoYears));
    }

    #[test]
    fn absent_numbers_start_at_lower_bound() {
        let input: ProspectInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, ProspectInput::default());
        assert_eq!(input.age, 18.0);
        assert_eq!(input.annual_premium, 1000.0);
        assert_eq!(input.sales_channel, 1.0);
    }

    #[test]
    fn numbers_are_read_leniently() {
        let input: ProspectInput = serde_json::from_value(json!({
            "age": "35",
            "region_code": "-3",
            "sales_channel": "",
            "vintage": "abc",
            "annual_premium": 2630.5,
        }))
        .unwrap();

        assert_eq!(input.age, 35.0);
        assert_eq!(input.region_code, -3.0);
        assert!(input.sales_channel.is_nan());
        assert!(input.vintage.is_nan());
        assert_eq!(input.annual_premium, 2630.5);
    }

    #[test]
    fn bounds_require_whole_finite_values() {
        assert!(AGE.contains(35.0));
        assert!(!AGE.contains(35.5));
        assert!(!AGE.contains(f64::NAN));
        assert!(REGION_CODE.contains(16_777_217.0));
        assert!(!REGION_CODE.contains(-1.0));
        assert!(!REGION_CODE.contains(f64::INFINITY));
        assert!(ANNUAL_PREMIUM.contains(2630.5));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let res = serde_json::from_value::<ProspectInput>(json!({ "gender": "robot" }));
        assert!(res.is_err());
    }

    #[test]
    fn option_keys_are_case_insensitive() {
        assert_eq!(Gender::from_key("Male"), Some(Gender::Male));
        assert_eq!(YesNo::from_key("NO"), Some(YesNo::No));
        assert_eq!(VehicleAge::OneToTwoYears.label(), "1-2 Years");
        assert_eq!(VehicleAge::LessThanOneYear.key(), "lt_1yr");
    }

    #[test]
    fn complete_requires_every_selection() {
        let mut input = filled();
        input.gender = None;
        input.vehicle_damage = None;

        assert_eq!(
            input.complete(),
            Err(InputError::Incomplete(vec![Field::Gender, Field::VehicleDamage]))
        );
    }

    #[test]
    fn complete_rejects_out_of_range_numbers() {
        let mut input = filled();
        input.age = 101.0;
        assert!(matches!(
            input.complete(),
            Err(InputError::OutOfRange { field: Field::Age, .. })
        ));

        let mut input = filled();
        input.annual_premium = f64::NAN;
        assert!(matches!(
            input.complete(),
            Err(InputError::OutOfRange { field: Field::AnnualPremium, .. })
        ));

        let mut input = filled();
        input.region_code = -1.0;
        assert!(matches!(
            input.complete(),
            Err(InputError::OutOfRange { field: Field::RegionCode, .. })
        ));

        let mut input = filled();
        input.vintage = -1.0;
        assert!(matches!(
            input.complete(),
            Err(InputError::OutOfRange { field: Field::Vintage, .. })
        ));

        let mut input = filled();
        input.sales_channel = 2.5;
        assert!(matches!(
            input.complete(),
            Err(InputError::OutOfRange { field: Field::SalesChannel, .. })
        ));
    }

    #[test]
    fn missing_selection_wins_over_range() {
        let mut input = filled();
        input.vintage = 999.0;
        input.vehicle_age = None;
        assert_eq!(
            input.complete(),
            Err(InputError::Incomplete(vec![Field::VehicleAge]))
        );
    }

    #[test]
    fn complete_carries_values_through() {
        let p = filled().complete().unwrap();
        assert_eq!(p.gender, Gender::Female);
        assert_eq!(p.region_code, 28.0);
        assert_eq!(p.vintage, 217.0);
    }
}
