// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physical, unit conversion, anthropometric, and indirect calorimetry constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Fixed physical and formula constants. Clinical thresholds that a site may
//! want to tune live in the engine configuration instead.

/// Unit conversion constants
pub mod units {
    /// Centimeters per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Pascals per millimeter of mercury
    pub const PA_PER_MMHG: f64 = 133.322;
    /// Centimeters per meter
    pub const CM_PER_METER: f64 = 100.0;
    /// Days per week
    pub const DAYS_PER_WEEK: f64 = 7.0;
}

/// Hamwi ideal body weight and adjusted body weight constants
///
/// Reference: Hamwi, G.J. (1964). Therapy: changing dietary concepts.
pub mod anthropometry {
    /// Base ideal weight for men at 60 inches (kg)
    pub const IBW_BASE_MALE_KG: f64 = 50.0;
    /// Base ideal weight for women at 60 inches (kg)
    pub const IBW_BASE_FEMALE_KG: f64 = 45.5;
    /// Kilograms added per inch above 60 inches
    pub const IBW_KG_PER_INCH: f64 = 2.3;
    /// Height threshold for the Hamwi increment (inches)
    pub const IBW_BASE_HEIGHT_INCHES: f64 = 60.0;
    /// Actual weight above this multiple of IBW triggers the ABW correction
    pub const ABW_TRIGGER_RATIO: f64 = 1.20;
    /// Fraction of excess weight counted in the adjusted body weight
    pub const ABW_EXCESS_FRACTION: f64 = 0.4;
}

/// International barometric formula constants (standard atmosphere)
pub mod atmosphere {
    /// Sea-level standard pressure (Pa)
    pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
    /// Temperature lapse rate (K/m)
    pub const LAPSE_RATE_K_PER_M: f64 = 0.0065;
    /// Sea-level standard temperature (K)
    pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;
    /// Standard gravity (m/s²)
    pub const GRAVITY: f64 = 9.806_65;
    /// Molar mass of dry air (kg/mol)
    pub const MOLAR_MASS_AIR: f64 = 0.028_964_4;
    /// Universal gas constant (J/(mol·K))
    pub const GAS_CONSTANT: f64 = 8.314_47;
}

/// Antoine equation coefficients for water vapour pressure (mmHg, °C)
pub mod antoine {
    /// Coefficient A
    pub const A: f64 = 8.071_31;
    /// Coefficient B
    pub const B: f64 = 1730.63;
    /// Coefficient C
    pub const C: f64 = 233.426;
}

/// Indirect calorimetry from capnography
///
/// Reference: Weir, J.B. (1949). New methods for calculating metabolic rate
/// with special reference to protein metabolism. *J Physiol*, 109, 1-9.
pub mod calorimetry {
    /// kcal/day per mL/min of CO2 production (abbreviated Weir, RQ 0.86)
    pub const KCAL_PER_DAY_PER_ML_VCO2: f64 = 8.19;
    /// mL per L
    pub const ML_PER_L: f64 = 1000.0;
}

/// Fixed per-kilogram energy formula
pub mod weight_based {
    /// kcal per kg of actual body weight (ESPEN ICU quick estimate)
    pub const KCAL_PER_KG: f64 = 25.0;
}

/// Energy density of non-nutritional infusions
pub mod infusions {
    /// Propofol 1 % lipid emulsion (kcal/mL)
    pub const PROPOFOL_KCAL_PER_ML: f64 = 1.1;
    /// Hydrated dextrose (kcal/g)
    pub const DEXTROSE_KCAL_PER_G: f64 = 3.4;
}

/// Body temperature bounds for the fever correction
pub mod temperature {
    /// Normothermia reference (°C)
    pub const NORMAL_BODY_TEMP_C: f64 = 37.0;
    /// Lowest plausible recorded temperature (°C)
    pub const MIN_PLAUSIBLE_TEMP_C: f64 = 30.0;
    /// Highest plausible recorded temperature (°C)
    pub const MAX_PLAUSIBLE_TEMP_C: f64 = 45.0;
    /// Metabolic increase per °C above normal
    pub const FEVER_INCREASE_PER_DEGREE: f64 = 0.10;
}
