//! Typed, validated parameter bundles for groups, external connections and diseases.
//!
//! The editing layer hands the core raw key-value maps ([`ParamMap`]). Every required key must
//! be present with a parseable, non-empty value, otherwise conversion fails with
//! [`EpiError`] and nothing is constructed. Keys are matched with spaces and underscores
//! treated alike, so both `member_count` and `member count` are accepted.
//!
//! The same structs also deserialize directly from JSON (see [`crate::scenario`]); both paths
//! end in the same `validate` call.
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EpiError;

/// A raw parameter dictionary as supplied by a form or template.
pub type ParamMap = BTreeMap<String, String>;

fn normalize_key(key: &str) -> String {
    key.trim().replace(' ', "_").to_lowercase()
}

fn lookup<'a>(map: &'a ParamMap, field: &str) -> Result<&'a str, EpiError> {
    map.iter()
        .find(|(key, _)| normalize_key(key) == field)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| EpiError::MissingField(field.to_string()))
}

fn parse_field<T: FromStr>(map: &ParamMap, field: &str) -> Result<T, EpiError> {
    let raw = lookup(map, field)?;
    raw.parse().map_err(|_| EpiError::InvalidField {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Checks that `value` is a probability.
pub fn check_rate(field: &str, value: f64) -> Result<f64, EpiError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EpiError::RateOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

/// Checks that a degree spread does not exceed its mean, which would allow negative degrees.
pub fn check_delta(field: &str, avg: u32, delta: u32) -> Result<(), EpiError> {
    if delta > avg {
        return Err(EpiError::DeltaExceedsAverage {
            field: field.to_string(),
            avg,
            delta,
        });
    }
    Ok(())
}

fn check_present(field: &str, value: &str) -> Result<(), EpiError> {
    if value.trim().is_empty() {
        return Err(EpiError::MissingField(field.to_string()));
    }
    Ok(())
}

/// Scalar and statistical settings of a node group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    pub name: String,
    pub member_count: usize,
    pub avg_internal_connections: u32,
    pub delta_internal_connections: u32,
    pub age: u32,
    pub vaccination_rate: f64,
    pub max_vaccination_rate: f64,
    pub color: String,
}

impl GroupParams {
    /// # Errors
    /// Returns [`EpiError`] when a field is empty, a rate is outside `[0, 1]` or the internal
    /// delta exceeds the internal average.
    pub fn validate(&self) -> Result<(), EpiError> {
        check_present("name", &self.name)?;
        check_present("color", &self.color)?;
        check_rate("vaccination_rate", self.vaccination_rate)?;
        check_rate("max_vaccination_rate", self.max_vaccination_rate)?;
        check_delta(
            "internal_connections",
            self.avg_internal_connections,
            self.delta_internal_connections,
        )
    }
}

impl TryFrom<&ParamMap> for GroupParams {
    type Error = EpiError;

    fn try_from(map: &ParamMap) -> Result<Self, Self::Error> {
        let params = GroupParams {
            name: lookup(map, "name")?.to_string(),
            member_count: parse_field(map, "member_count")?,
            avg_internal_connections: parse_field(map, "avg_internal_connections")?,
            delta_internal_connections: parse_field(map, "delta_internal_connections")?,
            age: parse_field(map, "age")?,
            vaccination_rate: parse_field(map, "vaccination_rate")?,
            max_vaccination_rate: parse_field(map, "max_vaccination_rate")?,
            color: lookup(map, "color")?.to_string(),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Mean and spread of the number of connections each node of one group has into another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalConnection {
    pub avg: u32,
    pub delta: u32,
}

impl ExternalConnection {
    /// # Errors
    /// Returns [`EpiError::DeltaExceedsAverage`] if `delta > avg`.
    pub fn new(avg: u32, delta: u32) -> Result<Self, EpiError> {
        check_delta("external_connections", avg, delta)?;
        Ok(ExternalConnection { avg, delta })
    }
}

impl TryFrom<&ParamMap> for ExternalConnection {
    type Error = EpiError;

    fn try_from(map: &ParamMap) -> Result<Self, Self::Error> {
        ExternalConnection::new(parse_field(map, "avg")?, parse_field(map, "delta")?)
    }
}

/// The parameters of a disease, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiseaseParams {
    pub name: String,
    pub color: String,
    pub fatality_rate: f64,
    pub vaccinated_fatality_rate: f64,
    pub infection_rate: f64,
    pub reinfection_rate: f64,
    pub vaccinated_infection_rate: f64,
    pub duration: u32,
    pub initial_infection_count: usize,
}

impl DiseaseParams {
    /// # Errors
    /// Returns [`EpiError`] when a field is empty, a rate is outside `[0, 1]` or the duration
    /// is zero.
    pub fn validate(&self) -> Result<(), EpiError> {
        check_present("name", &self.name)?;
        check_present("color", &self.color)?;
        check_rate("fatality_rate", self.fatality_rate)?;
        check_rate("vaccinated_fatality_rate", self.vaccinated_fatality_rate)?;
        check_rate("infection_rate", self.infection_rate)?;
        check_rate("reinfection_rate", self.reinfection_rate)?;
        check_rate("vaccinated_infection_rate", self.vaccinated_infection_rate)?;
        if self.duration == 0 {
            return Err(EpiError::InvalidField {
                field: "duration".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl TryFrom<&ParamMap> for DiseaseParams {
    type Error = EpiError;

    fn try_from(map: &ParamMap) -> Result<Self, Self::Error> {
        let params = DiseaseParams {
            name: lookup(map, "name")?.to_string(),
            color: lookup(map, "color")?.to_string(),
            fatality_rate: parse_field(map, "fatality_rate")?,
            vaccinated_fatality_rate: parse_field(map, "vaccinated_fatality_rate")?,
            infection_rate: parse_field(map, "infection_rate")?,
            reinfection_rate: parse_field(map, "reinfection_rate")?,
            vaccinated_infection_rate: parse_field(map, "vaccinated_infection_rate")?,
            duration: parse_field(map, "duration")?,
            initial_infection_count: parse_field(map, "initial_infection_count")?,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Builds a [`ParamMap`] from string pairs. Mostly useful in tests and templates.
#[must_use]
pub fn param_map<const N: usize>(pairs: [(&str, &str); N]) -> ParamMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
