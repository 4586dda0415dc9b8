//! Application configuration
//!
//! Values arrive as strings from whatever the host has (environment
//! variables, a `.env` file, build-time constants). Each key parses on its
//! own; a bad value is logged and replaced by its default so one typo never
//! stops the app from starting.

use core::str::FromStr;

use log::{error, info};
use thiserror_no_std::Error;

use crate::app_state::{DisplayText, display_text};
use crate::sensors::{SamplingRate, SensorKind, SensorSet};

pub const KEY_VARIANT: &str = "LUMO_VARIANT";
pub const KEY_SAMPLING: &str = "LUMO_SAMPLING";
pub const KEY_SENSORS: &str = "LUMO_SENSORS";
pub const KEY_CARD_NAME: &str = "LUMO_CARD_NAME";
pub const KEY_CARD_TITLE: &str = "LUMO_CARD_TITLE";
pub const KEY_CARD_PHONE: &str = "LUMO_CARD_PHONE";
pub const KEY_CARD_EMAIL: &str = "LUMO_CARD_EMAIL";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown app variant: {0}")]
    UnknownVariant(heapless::String<32>),
    #[error("unknown sampling rate: {0}")]
    UnknownSamplingRate(heapless::String<32>),
    #[error("unknown sensor: {0}")]
    UnknownSensor(heapless::String<32>),
}

fn offending(value: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Which of the two apps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppVariant {
    DiceRoller,
    #[default]
    BusinessCard,
}

impl FromStr for AppVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("dice") || v.eq_ignore_ascii_case("dice-roller") => {
                Ok(AppVariant::DiceRoller)
            }
            v if v.eq_ignore_ascii_case("card") || v.eq_ignore_ascii_case("business-card") => {
                Ok(AppVariant::BusinessCard)
            }
            other => Err(ConfigError::UnknownVariant(offending(other))),
        }
    }
}

impl FromStr for SamplingRate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            ("normal", SamplingRate::Normal),
            ("ui", SamplingRate::Ui),
            ("game", SamplingRate::Game),
            ("fastest", SamplingRate::Fastest),
        ]
        .into_iter()
        .find(|(name, _)| s.eq_ignore_ascii_case(name))
        .map(|(_, rate)| rate)
        .ok_or_else(|| ConfigError::UnknownSamplingRate(offending(s)))
    }
}

impl FromStr for SensorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("magnetometer") {
            return Ok(SensorKind::MagneticField);
        }
        SensorKind::ALL
            .into_iter()
            .find(|kind| s.eq_ignore_ascii_case(kind.label()))
            .ok_or_else(|| ConfigError::UnknownSensor(offending(s)))
    }
}

/// Parse a comma separated sensor list such as `light,proximity`.
///
/// `all` selects every sensor, `none` or an empty string selects nothing.
pub fn parse_sensor_list(s: &str) -> Result<SensorSet, ConfigError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("all") {
        return Ok(SensorSet::ALL);
    }
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return Ok(SensorSet::EMPTY);
    }

    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .try_fold(SensorSet::EMPTY, |set, part| {
            Ok(set.with(part.parse::<SensorKind>()?))
        })
}

/// Contact details on the business card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardDetails {
    pub name: DisplayText,
    pub title: DisplayText,
    pub phone: DisplayText,
    pub email: DisplayText,
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            name: display_text("Alex Morgan"),
            title: display_text("Embedded Developer"),
            phone: display_text("+1 555 0100"),
            email: display_text("alex.morgan@example.com"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub variant: AppVariant,
    pub sampling: SamplingRate,
    /// Sensors the simulated device reports as present
    pub sensors: SensorSet,
    pub card: CardDetails,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: AppVariant::default(),
            sampling: SamplingRate::default(),
            sensors: SensorSet::ALL,
            card: CardDetails::default(),
        }
    }
}

impl Config {
    /// Build a configuration from a key lookup, falling back to defaults.
    pub fn from_lookup<'s>(lookup: impl Fn(&str) -> Option<&'s str>) -> Self {
        let mut config = Config::default();

        if let Some(value) = lookup(KEY_VARIANT) {
            match value.parse() {
                Ok(variant) => config.variant = variant,
                Err(e) => error!("{}: {}, using {:?}", KEY_VARIANT, e, config.variant),
            }
        }

        if let Some(value) = lookup(KEY_SAMPLING) {
            match value.parse() {
                Ok(rate) => config.sampling = rate,
                Err(e) => error!("{}: {}, using {:?}", KEY_SAMPLING, e, config.sampling),
            }
        }

        if let Some(value) = lookup(KEY_SENSORS) {
            match parse_sensor_list(value) {
                Ok(sensors) => config.sensors = sensors,
                Err(e) => error!("{}: {}, enabling all sensors", KEY_SENSORS, e),
            }
        }

        let card = &mut config.card;
        for (key, field) in [
            (KEY_CARD_NAME, &mut card.name),
            (KEY_CARD_TITLE, &mut card.title),
            (KEY_CARD_PHONE, &mut card.phone),
            (KEY_CARD_EMAIL, &mut card.email),
        ] {
            if let Some(value) = lookup(key) {
                *field = display_text(value);
            }
        }

        info!(
            "Config: variant={:?} sampling={:?} sensors={:#05b}",
            config.variant,
            config.sampling,
            config.sensors.bits()
        );
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'s>(pairs: &'s [(&'s str, &'s str)]) -> impl Fn(&str) -> Option<&'s str> {
        move |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    #[test]
    fn parses_variants() {
        assert_eq!("dice".parse::<AppVariant>(), Ok(AppVariant::DiceRoller));
        assert_eq!(
            " Business-Card ".parse::<AppVariant>(),
            Ok(AppVariant::BusinessCard)
        );
        assert!("watch".parse::<AppVariant>().is_err());
    }

    #[test]
    fn parses_sampling_rates() {
        assert_eq!("GAME".parse::<SamplingRate>(), Ok(SamplingRate::Game));
        assert!("slow".parse::<SamplingRate>().is_err());
    }

    #[test]
    fn parses_sensor_lists() {
        let set = parse_sensor_list("light, magnetometer").unwrap();
        assert!(set.contains(SensorKind::Light));
        assert!(set.contains(SensorKind::MagneticField));
        assert!(!set.contains(SensorKind::Proximity));

        assert_eq!(parse_sensor_list("all"), Ok(SensorSet::ALL));
        assert_eq!(parse_sensor_list("none"), Ok(SensorSet::EMPTY));
        assert_eq!(parse_sensor_list(""), Ok(SensorSet::EMPTY));
        assert!(matches!(
            parse_sensor_list("light,gyro"),
            Err(ConfigError::UnknownSensor(_))
        ));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let pairs = [
            (KEY_VARIANT, "dice"),
            (KEY_SENSORS, "proximity"),
            (KEY_CARD_NAME, "Sam Lee"),
        ];
        let config = Config::from_lookup(lookup(&pairs));

        assert_eq!(config.variant, AppVariant::DiceRoller);
        assert_eq!(config.sampling, SamplingRate::Normal);
        assert_eq!(config.sensors, SensorSet::EMPTY.with(SensorKind::Proximity));
        assert_eq!(config.card.name.as_str(), "Sam Lee");
        assert_eq!(config.card.title, CardDetails::default().title);
    }

    #[test]
    fn bad_values_fall_back() {
        let pairs = [(KEY_VARIANT, "watch"), (KEY_SENSORS, "sonar")];
        let config = Config::from_lookup(lookup(&pairs));

        assert_eq!(config.variant, AppVariant::BusinessCard);
        assert_eq!(config.sensors, SensorSet::ALL);
    }
}
