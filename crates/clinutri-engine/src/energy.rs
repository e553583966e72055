// ABOUTME: Energy expenditure calculator with predictive, capnographic, and measured formulas
// ABOUTME: Mifflin-St Jeor, Harris-Benedict, weight-based, Weir, comparison bundles, infusion adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Expenditure Calculator
//!
//! Every formula produces an [`EnergyResult`] carrying the basal value
//! (BMR/REE), the total after activity or clinical factors, and the total net
//! of non-nutritional infusion calories. A failing formula records its error
//! on its own result and never prevents the others from completing.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//!   <https://doi.org/10.1093/ajcn/40.1.168>
//!
//! - Stapel, S.N., et al. (2015). Ventilator-derived carbon dioxide production to assess
//!   energy expenditure in critically ill patients. *Critical Care*, 19, 370.
//!   <https://doi.org/10.1186/s13054-015-1087-2>

use crate::config::{
    ActivityFactorsConfig, BmrConfig, ClinicalFactorsConfig, EnergyConfig, HospitalActivityConfig,
};
use clinutri_core::constants::antoine;
use clinutri_core::constants::atmosphere::{
    GAS_CONSTANT, GRAVITY, LAPSE_RATE_K_PER_M, MOLAR_MASS_AIR, SEA_LEVEL_PRESSURE_PA,
    SEA_LEVEL_TEMPERATURE_K,
};
use clinutri_core::constants::calorimetry::{KCAL_PER_DAY_PER_ML_VCO2, ML_PER_L};
use clinutri_core::constants::infusions::{DEXTROSE_KCAL_PER_G, PROPOFOL_KCAL_PER_ML};
use clinutri_core::constants::temperature::{
    FEVER_INCREASE_PER_DEGREE, MAX_PLAUSIBLE_TEMP_C, MIN_PLAUSIBLE_TEMP_C, NORMAL_BODY_TEMP_C,
};
use clinutri_core::constants::units::PA_PER_MMHG;
use clinutri_core::constants::weight_based::KCAL_PER_KG;
use clinutri_core::models::{PatientSnapshot, Sex};
use clinutri_core::{AppError, AppResult, ErrorDetail};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Energy expenditure formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    /// Mifflin-St Jeor predictive equation with activity or clinical factors
    MifflinStJeor,
    /// Harris-Benedict (Roza & Shizgal revision) with activity factor
    HarrisBenedict,
    /// 25 kcal/kg actual body weight
    WeightBased,
    /// Abbreviated Weir from end-tidal CO2 and minute ventilation
    Weir,
    /// Clinician-entered measured REE
    IndirectCalorimetry,
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MifflinStJeor => "Mifflin-St Jeor",
            Self::HarrisBenedict => "Harris-Benedict",
            Self::WeightBased => "Weight-based (25 kcal/kg)",
            Self::Weir => "Weir (EtCO2/VE)",
            Self::IndirectCalorimetry => "Indirect calorimetry",
        };
        f.write_str(name)
    }
}

/// Named comparison bundles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBundle {
    /// Mifflin-St Jeor and Harris-Benedict
    MifflinHarris,
    /// Mifflin-St Jeor and Weir
    MifflinWeir,
    /// Mifflin-St Jeor and weight-based
    MifflinWeight,
    /// Harris-Benedict and Weir
    HarrisWeir,
    /// Mifflin-St Jeor, Harris-Benedict, weight-based and Weir
    FourWay,
}

impl ComparisonBundle {
    /// Formulas included in the bundle, in reporting order
    #[must_use]
    pub const fn formulas(self) -> &'static [Formula] {
        match self {
            Self::MifflinHarris => &[Formula::MifflinStJeor, Formula::HarrisBenedict],
            Self::MifflinWeir => &[Formula::MifflinStJeor, Formula::Weir],
            Self::MifflinWeight => &[Formula::MifflinStJeor, Formula::WeightBased],
            Self::HarrisWeir => &[Formula::HarrisBenedict, Formula::Weir],
            Self::FourWay => &[
                Formula::MifflinStJeor,
                Formula::HarrisBenedict,
                Formula::WeightBased,
                Formula::Weir,
            ],
        }
    }
}

/// Single formula or comparison bundle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnergySelection {
    /// One formula, no average
    Single(Formula),
    /// Several formulas plus the mean basal value
    Bundle(ComparisonBundle),
}

impl Default for EnergySelection {
    fn default() -> Self {
        Self::Single(Formula::MifflinStJeor)
    }
}

impl EnergySelection {
    fn formulas(self) -> Vec<Formula> {
        match self {
            Self::Single(formula) => vec![formula],
            Self::Bundle(bundle) => bundle.formulas().to_vec(),
        }
    }
}

/// General activity level used when no clinical modifier is active
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no activity
    #[default]
    Sedentary,
    /// Light activity
    Light,
    /// Moderate activity
    Moderate,
    /// Intense activity
    Intense,
    /// Very intense activity
    VeryIntense,
}

impl ActivityLevel {
    /// Multiplier for this level
    #[must_use]
    pub const fn factor(self, config: &ActivityFactorsConfig) -> f64 {
        match self {
            Self::Sedentary => config.sedentary,
            Self::Light => config.light,
            Self::Moderate => config.moderate,
            Self::Intense => config.intense,
            Self::VeryIntense => config.very_intense,
        }
    }
}

/// In-hospital mobility
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HospitalActivity {
    /// No hospital factor (1.0)
    #[default]
    NotApplied,
    /// Confined to bed
    BedRest,
    /// Ambulatory on the ward
    Ambulatory,
}

impl HospitalActivity {
    /// Multiplier for this mobility level
    #[must_use]
    pub const fn factor(self, config: &HospitalActivityConfig) -> f64 {
        match self {
            Self::NotApplied => 1.0,
            Self::BedRest => config.bed_rest,
            Self::Ambulatory => config.ambulatory,
        }
    }
}

/// Clinical condition driving the stress factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalCondition {
    /// No clinical condition selected
    #[default]
    None,
    /// Minor surgery
    SurgeryMinor,
    /// Major elective surgery
    SurgeryMajorElective,
    /// Major surgery with complications
    SurgeryMajorComplicated,
    /// Mild infection
    InfectionMild,
    /// Moderate infection
    InfectionModerate,
    /// Severe infection or sepsis
    InfectionSevere,
    /// Mild skeletal trauma
    TraumaSkeletalMild,
    /// Head injury
    TraumaHeadInjury,
    /// Polytrauma
    Polytrauma,
    /// Cancer
    Cancer,
    /// Burns with the given percentage of body surface area
    Burns {
        /// Burned body surface area (%)
        percent_bsa: f64,
    },
}

impl ClinicalCondition {
    /// Stress factor for this condition
    ///
    /// # Errors
    ///
    /// Returns `DomainInfeasible` when burns %BSA lies outside `[0, 100]`
    pub fn factor(self, config: &ClinicalFactorsConfig) -> AppResult<f64> {
        let factor = match self {
            Self::None => 1.0,
            Self::SurgeryMinor => config.surgery_minor,
            Self::SurgeryMajorElective => config.surgery_major_elective,
            Self::SurgeryMajorComplicated => config.surgery_major_complicated,
            Self::InfectionMild => config.infection_mild,
            Self::InfectionModerate => config.infection_moderate,
            Self::InfectionSevere => config.infection_severe,
            Self::TraumaSkeletalMild => config.trauma_skeletal_mild,
            Self::TraumaHeadInjury => config.trauma_head_injury,
            Self::Polytrauma => config.trauma_polytrauma,
            Self::Cancer => config.cancer,
            Self::Burns { percent_bsa } => burns_factor(percent_bsa, config)?,
        };
        Ok(factor)
    }

    /// Whether this is a burn injury
    #[must_use]
    pub const fn is_burns(self) -> bool {
        matches!(self, Self::Burns { .. })
    }

    /// Whether this is a polytrauma
    #[must_use]
    pub const fn is_polytrauma(self) -> bool {
        matches!(self, Self::Polytrauma)
    }
}

fn burns_factor(percent_bsa: f64, config: &ClinicalFactorsConfig) -> AppResult<f64> {
    if !percent_bsa.is_finite() || !(0.0..=100.0).contains(&percent_bsa) {
        return Err(
            AppError::domain_infeasible("Burned body surface area must be between 0 and 100 %")
                .with_field("percent_bsa"),
        );
    }
    let factor = if percent_bsa > config.burns_major_above_bsa {
        config.burns_major
    } else if percent_bsa >= config.burns_moderate_min_bsa {
        config.burns_moderate
    } else if percent_bsa > 0.0 {
        config.burns_minor
    } else {
        1.0
    };
    Ok(factor)
}

/// Clinician-entered modifiers for the predictive equations
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalModifiers {
    /// General activity level
    pub activity_level: ActivityLevel,
    /// Hospital mobility
    pub hospital_activity: HospitalActivity,
    /// Clinical condition
    pub condition: ClinicalCondition,
}

/// Capnography inputs for the Weir formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeirInput {
    /// End-tidal CO2 (mmHg)
    pub etco2_mmhg: f64,
    /// Minute ventilation (L/min)
    pub minute_ventilation_l_min: f64,
    /// Altitude above sea level (m)
    #[serde(default)]
    pub altitude_m: f64,
    /// Temperature used for water vapour pressure (°C)
    #[serde(default = "default_body_temperature")]
    pub temperature_c: f64,
}

const fn default_body_temperature() -> f64 {
    NORMAL_BODY_TEMP_C
}

/// Non-nutritional infusions contributing calories
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfusionInput {
    /// Propofol rate (mL/h)
    pub propofol_ml_per_hour: f64,
    /// Hours per day the propofol runs
    pub propofol_hours_per_day: f64,
    /// Dextrose concentration (%)
    pub dextrose_percent: f64,
    /// Dextrose volume (mL/day)
    pub dextrose_ml_per_day: f64,
}

impl InfusionInput {
    /// Propofol calories (kcal/day)
    #[must_use]
    pub fn propofol_kcal(&self) -> f64 {
        self.propofol_ml_per_hour * self.propofol_hours_per_day * PROPOFOL_KCAL_PER_ML
    }

    /// Dextrose calories (kcal/day)
    #[must_use]
    pub fn dextrose_kcal(&self) -> f64 {
        self.dextrose_percent / 100.0 * self.dextrose_ml_per_day * DEXTROSE_KCAL_PER_G
    }

    /// Total non-nutritional calories (kcal/day)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when any infusion field is negative or non-finite
    pub fn non_nutritional_kcal(&self) -> AppResult<f64> {
        let fields = [
            ("propofol_ml_per_hour", self.propofol_ml_per_hour),
            ("propofol_hours_per_day", self.propofol_hours_per_day),
            ("dextrose_percent", self.dextrose_percent),
            ("dextrose_ml_per_day", self.dextrose_ml_per_day),
        ];
        if let Some((name, _)) = fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(
                AppError::invalid_input("Infusion values must be non-negative").with_field(*name),
            );
        }
        Ok(self.propofol_kcal() + self.dextrose_kcal())
    }
}

/// Everything the energy calculator reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyInput {
    /// Sex
    pub sex: Sex,
    /// Age (years)
    #[serde(default)]
    pub age_years: Option<u32>,
    /// Actual body weight (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Height (cm)
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Body temperature (°C)
    #[serde(default)]
    pub temperature_c: Option<f64>,
    /// Activity, hospital mobility, and clinical condition
    #[serde(default)]
    pub modifiers: ClinicalModifiers,
    /// Capnography inputs for the Weir formula
    #[serde(default)]
    pub weir: Option<WeirInput>,
    /// Measured REE for indirect calorimetry (kcal/day)
    #[serde(default)]
    pub measured_ree_kcal: Option<f64>,
    /// Non-nutritional infusions
    #[serde(default)]
    pub infusions: InfusionInput,
}

impl EnergyInput {
    /// Build the anthropometric part of the input from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &PatientSnapshot) -> Self {
        Self {
            sex: snapshot.sex,
            age_years: snapshot.age_years,
            weight_kg: snapshot.weight_kg,
            height_cm: snapshot.height_cm,
            temperature_c: snapshot.temperature_c,
            modifiers: ClinicalModifiers::default(),
            weir: None,
            measured_ree_kcal: None,
            infusions: InfusionInput::default(),
        }
    }

    /// Replace the clinical modifiers
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: ClinicalModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach capnography inputs
    #[must_use]
    pub const fn with_weir(mut self, weir: WeirInput) -> Self {
        self.weir = Some(weir);
        self
    }

    /// Attach a measured REE
    #[must_use]
    pub const fn with_measured_ree(mut self, kcal: f64) -> Self {
        self.measured_ree_kcal = Some(kcal);
        self
    }

    /// Attach infusion data
    #[must_use]
    pub const fn with_infusions(mut self, infusions: InfusionInput) -> Self {
        self.infusions = infusions;
        self
    }
}

/// Factors actually applied to the basal value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AppliedFactors {
    /// General activity factor (non-clinical path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<f64>,
    /// Clinical stress factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical: Option<f64>,
    /// Fever correction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fever: Option<f64>,
    /// Hospital mobility factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<f64>,
}

impl AppliedFactors {
    fn product(&self) -> f64 {
        [self.activity, self.clinical, self.fever, self.hospital]
            .iter()
            .flatten()
            .product()
    }
}

/// Result of one formula, rounded to whole kcal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Formula used
    pub formula: Formula,
    /// BMR / REE (kcal/day)
    pub basal_kcal: Option<f64>,
    /// Basal value after activity or clinical factors (kcal/day)
    pub total_kcal: Option<f64>,
    /// Total minus non-nutritional calories, floored at zero (kcal/day)
    pub adjusted_for_infusions_kcal: Option<f64>,
    /// Factors applied to the basal value
    pub factors: AppliedFactors,
    /// Explanatory notes about how the value was obtained
    pub details: Vec<String>,
    /// Why the formula could not be evaluated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// All formula results for one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    /// Selection that produced this report
    pub selection: EnergySelection,
    /// Per-formula results
    pub results: Vec<EnergyResult>,
    /// Mean basal value over successful formulas (bundles only)
    pub average_basal_kcal: Option<f64>,
    /// Non-nutritional calories subtracted from each total (kcal/day)
    pub non_nutritional_kcal: Option<f64>,
    /// Why the infusion adjustment could not be computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infusion_error: Option<ErrorDetail>,
}

impl EnergyReport {
    /// Result for a formula, if it was part of the selection
    #[must_use]
    pub fn result(&self, formula: Formula) -> Option<&EnergyResult> {
        self.results.iter().find(|r| r.formula == formula)
    }

    /// Preferred total for goal setting: the first successful total
    #[must_use]
    pub fn primary_total_kcal(&self) -> Option<f64> {
        self.results.iter().find_map(|r| r.total_kcal)
    }
}

/// Unrounded outcome of a formula before output rounding
struct Estimate {
    basal: f64,
    factors: AppliedFactors,
    details: Vec<String>,
}

impl Estimate {
    fn total(&self) -> f64 {
        self.basal * self.factors.product()
    }
}

fn require_positive(value: Option<f64>, field: &str) -> AppResult<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(_) => Err(AppError::invalid_input(format!("{field} must be positive")).with_field(field)),
        None => Err(AppError::invalid_input(format!("{field} is required")).with_field(field)),
    }
}

fn require_age(value: Option<u32>) -> AppResult<f64> {
    match value {
        Some(age) if age > 0 => Ok(f64::from(age)),
        Some(_) => Err(AppError::invalid_input("age_years must be positive").with_field("age_years")),
        None => Err(AppError::invalid_input("age_years is required").with_field("age_years")),
    }
}

/// Mifflin-St Jeor basal metabolic rate
///
/// Formula: BMR = 10·w + 6.25·h − 5·a + (5 male | −161 female)
///
/// # Errors
///
/// Returns `InvalidInput` when weight, height or age is not positive
pub fn mifflin_st_jeor_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    config: &BmrConfig,
) -> AppResult<f64> {
    let weight = require_positive(Some(weight_kg), "weight_kg")?;
    let height = require_positive(Some(height_cm), "height_cm")?;
    let age = require_age(Some(age_years))?;

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    Ok(config.msj_weight_coef.mul_add(
        weight,
        config
            .msj_height_coef
            .mul_add(height, config.msj_age_coef.mul_add(age, sex_constant)),
    ))
}

/// Harris-Benedict basal metabolic rate (Roza & Shizgal revision)
///
/// # Errors
///
/// Returns `InvalidInput` when weight, height or age is not positive
pub fn harris_benedict_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
) -> AppResult<f64> {
    let weight = require_positive(Some(weight_kg), "weight_kg")?;
    let height = require_positive(Some(height_cm), "height_cm")?;
    let age = require_age(Some(age_years))?;

    let (constant, weight_coef, height_coef, age_coef): (f64, f64, f64, f64) = match sex {
        Sex::Male => (66.473, 13.7516, 5.0033, 6.755),
        Sex::Female => (655.0955, 9.5634, 1.8496, 4.6756),
    };
    Ok(age_coef.mul_add(
        -age,
        weight_coef.mul_add(weight, height_coef.mul_add(height, constant)),
    ))
}

/// Fever correction `1 + 0.10·(T − 37)`
///
/// Returns `None` when there is no fever or the temperature is implausible.
#[must_use]
pub fn fever_factor(temperature_c: Option<f64>) -> Option<f64> {
    let temperature = temperature_c.filter(|t| t.is_finite())?;
    if temperature <= NORMAL_BODY_TEMP_C
        || !(MIN_PLAUSIBLE_TEMP_C..=MAX_PLAUSIBLE_TEMP_C).contains(&temperature)
    {
        return None;
    }
    Some(FEVER_INCREASE_PER_DEGREE.mul_add(temperature - NORMAL_BODY_TEMP_C, 1.0))
}

/// Barometric pressure at altitude (mmHg), international barometric formula
#[must_use]
pub fn barometric_pressure_mmhg(altitude_m: f64) -> f64 {
    let exponent = GRAVITY * MOLAR_MASS_AIR / (GAS_CONSTANT * LAPSE_RATE_K_PER_M);
    let ratio = 1.0 - LAPSE_RATE_K_PER_M * altitude_m / SEA_LEVEL_TEMPERATURE_K;
    SEA_LEVEL_PRESSURE_PA * ratio.powf(exponent) / PA_PER_MMHG
}

/// Water vapour pressure (mmHg) from the Antoine equation
#[must_use]
pub fn water_vapour_pressure_mmhg(temperature_c: f64) -> f64 {
    10_f64.powf(antoine::A - antoine::B / (antoine::C + temperature_c))
}

/// REE from capnography with the abbreviated Weir equation
///
/// FECO2 = `EtCO2` / (PB − PH2O); VCO2 = FECO2 × VE × 1000; REE = VCO2 × 8.19
///
/// # Errors
///
/// Returns `InvalidInput` for non-finite or non-positive inputs and
/// `DomainInfeasible` when barometric pressure does not exceed water vapour pressure
pub fn weir_ree(input: &WeirInput) -> AppResult<f64> {
    let etco2 = require_positive(Some(input.etco2_mmhg), "etco2_mmhg")?;
    let ve = require_positive(
        Some(input.minute_ventilation_l_min),
        "minute_ventilation_l_min",
    )?;
    if !input.altitude_m.is_finite() {
        return Err(AppError::invalid_input("altitude_m must be finite").with_field("altitude_m"));
    }
    if !input.temperature_c.is_finite() {
        return Err(
            AppError::invalid_input("temperature_c must be finite").with_field("temperature_c"),
        );
    }

    let pb = barometric_pressure_mmhg(input.altitude_m);
    let ph2o = water_vapour_pressure_mmhg(input.temperature_c);
    if !pb.is_finite() || !ph2o.is_finite() || pb <= ph2o {
        return Err(AppError::domain_infeasible(format!(
            "Barometric pressure ({pb:.1} mmHg) must exceed water vapour pressure ({ph2o:.1} mmHg)"
        ))
        .with_field("altitude_m"));
    }

    let feco2 = etco2 / (pb - ph2o);
    let vco2_ml_min = feco2 * ve * ML_PER_L;
    let ree = vco2_ml_min * KCAL_PER_DAY_PER_ML_VCO2;
    debug!(pb, ph2o, feco2, vco2_ml_min, ree, "Weir REE computed");
    Ok(ree)
}

fn mifflin_estimate(input: &EnergyInput, config: &EnergyConfig) -> AppResult<Estimate> {
    let weight = require_positive(input.weight_kg, "weight_kg")?;
    let height = require_positive(input.height_cm, "height_cm")?;
    let age = input
        .age_years
        .ok_or_else(|| AppError::invalid_input("age_years is required").with_field("age_years"))?;
    let bmr = mifflin_st_jeor_bmr(weight, height, age, input.sex, &config.bmr)?;

    let modifiers = input.modifiers;
    let clinical = modifiers.condition.factor(&config.clinical_factors)?;
    let hospital = modifiers.hospital_activity.factor(&config.hospital_activity);
    let has_fever = input.temperature_c.is_some_and(|t| t > NORMAL_BODY_TEMP_C);
    let clinical_path = modifiers.condition != ClinicalCondition::None
        || has_fever
        || (hospital - 1.0).abs() > f64::EPSILON;

    let mut details = vec![format!("BMR (Mifflin-St Jeor) = {bmr:.2} kcal/day")];
    let factors = if clinical_path {
        let fever = fever_factor(input.temperature_c);
        if has_fever && fever.is_none() {
            details.push("Temperature outside 30-45 °C, fever correction not applied".to_owned());
        }
        details.push(format!(
            "Clinical factor {clinical:.2} × fever factor {:.2} × hospital factor {hospital:.2}",
            fever.unwrap_or(1.0)
        ));
        AppliedFactors {
            activity: None,
            clinical: Some(clinical),
            fever,
            hospital: Some(hospital),
        }
    } else {
        let activity = modifiers.activity_level.factor(&config.activity_factors);
        details.push(format!("Activity factor {activity:.3}"));
        AppliedFactors {
            activity: Some(activity),
            ..AppliedFactors::default()
        }
    };

    Ok(Estimate {
        basal: bmr,
        factors,
        details,
    })
}

fn harris_estimate(input: &EnergyInput, config: &EnergyConfig) -> AppResult<Estimate> {
    let weight = require_positive(input.weight_kg, "weight_kg")?;
    let height = require_positive(input.height_cm, "height_cm")?;
    let age = input
        .age_years
        .ok_or_else(|| AppError::invalid_input("age_years is required").with_field("age_years"))?;
    let bmr = harris_benedict_bmr(weight, height, age, input.sex)?;
    let activity = input
        .modifiers
        .activity_level
        .factor(&config.activity_factors);

    Ok(Estimate {
        basal: bmr,
        factors: AppliedFactors {
            activity: Some(activity),
            ..AppliedFactors::default()
        },
        details: vec![
            format!("BMR (Harris-Benedict) = {bmr:.2} kcal/day"),
            format!("Activity factor {activity:.3}; clinical modifiers do not apply"),
        ],
    })
}

fn weight_based_estimate(input: &EnergyInput) -> AppResult<Estimate> {
    let weight = require_positive(input.weight_kg, "weight_kg")?;
    Ok(Estimate {
        basal: KCAL_PER_KG * weight,
        factors: AppliedFactors::default(),
        details: vec![format!("{KCAL_PER_KG} kcal/kg × {weight:.1} kg")],
    })
}

fn weir_estimate(input: &EnergyInput) -> AppResult<Estimate> {
    let weir = input.weir.as_ref().ok_or_else(|| {
        AppError::invalid_input("EtCO2 and minute ventilation are required").with_field("weir")
    })?;
    let ree = weir_ree(weir)?;
    Ok(Estimate {
        basal: ree,
        factors: AppliedFactors::default(),
        details: vec![format!(
            "EtCO2 {:.1} mmHg, VE {:.1} L/min, altitude {:.0} m",
            weir.etco2_mmhg, weir.minute_ventilation_l_min, weir.altitude_m
        )],
    })
}

fn measured_estimate(input: &EnergyInput) -> AppResult<Estimate> {
    let ree = require_positive(input.measured_ree_kcal, "measured_ree_kcal")?;
    Ok(Estimate {
        basal: ree,
        factors: AppliedFactors::default(),
        details: vec!["Measured by indirect calorimetry".to_owned()],
    })
}

fn estimate(formula: Formula, input: &EnergyInput, config: &EnergyConfig) -> AppResult<Estimate> {
    match formula {
        Formula::MifflinStJeor => mifflin_estimate(input, config),
        Formula::HarrisBenedict => harris_estimate(input, config),
        Formula::WeightBased => weight_based_estimate(input),
        Formula::Weir => weir_estimate(input),
        Formula::IndirectCalorimetry => measured_estimate(input),
    }
}

fn round_kcal(value: f64) -> f64 {
    value.round()
}

/// Compute energy expenditure for a formula or comparison bundle
///
/// Each formula is evaluated independently; a failure is recorded on that
/// formula's result. Bundles also report the mean of the successful basal
/// values. Rounding to whole kcal happens only here, at output.
#[must_use]
pub fn compute_energy(
    selection: EnergySelection,
    input: &EnergyInput,
    config: &EnergyConfig,
) -> EnergyReport {
    let (non_nutritional, infusion_error) = match input.infusions.non_nutritional_kcal() {
        Ok(kcal) => (Some(kcal), None),
        Err(e) => {
            warn!(error = %e, "Infusion calories could not be computed");
            (None, Some(ErrorDetail::from(e)))
        }
    };

    let mut basal_values = Vec::new();
    let results: Vec<EnergyResult> = selection
        .formulas()
        .into_iter()
        .map(|formula| match estimate(formula, input, config) {
            Ok(estimate) => {
                let total = estimate.total();
                basal_values.push(estimate.basal);
                let adjusted = non_nutritional.map(|kcal| round_kcal((total - kcal).max(0.0)));
                debug!(%formula, basal = estimate.basal, total, ?adjusted, "Energy formula evaluated");
                EnergyResult {
                    formula,
                    basal_kcal: Some(round_kcal(estimate.basal)),
                    total_kcal: Some(round_kcal(total)),
                    adjusted_for_infusions_kcal: adjusted,
                    factors: estimate.factors,
                    details: estimate.details,
                    error: None,
                }
            }
            Err(e) => {
                warn!(%formula, error = %e, "Energy formula could not be evaluated");
                EnergyResult {
                    formula,
                    basal_kcal: None,
                    total_kcal: None,
                    adjusted_for_infusions_kcal: None,
                    factors: AppliedFactors::default(),
                    details: Vec::new(),
                    error: Some(ErrorDetail::from(e)),
                }
            }
        })
        .collect();

    let average_basal_kcal = match selection {
        EnergySelection::Bundle(_) if !basal_values.is_empty() => Some(round_kcal(
            basal_values.iter().sum::<f64>() / basal_values.len() as f64,
        )),
        _ => None,
    };

    EnergyReport {
        selection,
        results,
        average_basal_kcal,
        non_nutritional_kcal: non_nutritional,
        infusion_error,
    }
}
