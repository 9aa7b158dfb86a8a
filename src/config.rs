//! Runtime configuration.

use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicConfig {
    /// Charged to a patient's bill for every booking.
    pub consultation_fee: u64,
    pub first_patient_id: u32,
    pub first_doctor_id: u32,
    /// Register the three house doctors at startup.
    pub preload_doctors: bool,
    /// Colour the schedule view and alerts with ANSI escapes.
    pub color: bool,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        ClinicConfig {
            consultation_fee: 500,
            first_patient_id: 100,
            first_doctor_id: 100,
            preload_doctors: true,
            color: true,
        }
    }
}

impl ClinicConfig {
    /// Defaults overridden by `CLINIC_*` and `NO_COLOR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from any lookup,
    /// so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let color = if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            false
        } else {
            parse_or("CLINIC_COLOR", lookup("CLINIC_COLOR"), defaults.color)
        };

        ClinicConfig {
            consultation_fee: parse_or(
                "CLINIC_CONSULTATION_FEE",
                lookup("CLINIC_CONSULTATION_FEE"),
                defaults.consultation_fee,
            ),
            first_patient_id: parse_or(
                "CLINIC_FIRST_PATIENT_ID",
                lookup("CLINIC_FIRST_PATIENT_ID"),
                defaults.first_patient_id,
            ),
            first_doctor_id: parse_or(
                "CLINIC_FIRST_DOCTOR_ID",
                lookup("CLINIC_FIRST_DOCTOR_ID"),
                defaults.first_doctor_id,
            ),
            preload_doctors: parse_or(
                "CLINIC_PRELOAD_DOCTORS",
                lookup("CLINIC_PRELOAD_DOCTORS"),
                defaults.preload_doctors,
            ),
            color,
        }
    }
}

/// Boolean-ish values ("1", "true", "yes", "on" and their negatives) are
/// accepted for flags.
trait ConfigValue: Sized {
    fn parse_value(raw: &str) -> Option<Self>;
}

impl ConfigValue for bool {
    fn parse_value(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

macro_rules! numeric_config_value {
    ($($ty:ty),*) => {
        $(impl ConfigValue for $ty {
            fn parse_value(raw: &str) -> Option<Self> {
                <$ty as FromStr>::from_str(raw.trim()).ok()
            }
        })*
    };
}

numeric_config_value!(u32, u64);

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: ConfigValue + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(raw) => T::parse_value(&raw).unwrap_or_else(|| {
            warn!(key, value = %raw, ?default, "invalid config value, using default");
            default
        }),
    }
}
