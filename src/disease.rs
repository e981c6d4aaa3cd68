//! Diseases: validated parameter bundles registered with a network under a [`DiseaseId`].
use std::fmt::{self, Display};

use crate::error::EpiError;
use crate::params::{DiseaseParams, ParamMap};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiseaseId(pub(crate) usize);

impl DiseaseId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Disease {
    id: DiseaseId,
    params: DiseaseParams,
}

impl Disease {
    /// # Errors
    /// Returns [`EpiError`] if any parameter is missing or out of range.
    pub fn from_params(id: DiseaseId, params: DiseaseParams) -> Result<Self, EpiError> {
        params.validate()?;
        Ok(Disease { id, params })
    }

    /// # Errors
    /// Returns [`EpiError`] if any key is missing or malformed.
    pub fn from_map(id: DiseaseId, map: &ParamMap) -> Result<Self, EpiError> {
        Ok(Disease {
            id,
            params: DiseaseParams::try_from(map)?,
        })
    }

    /// Replaces every parameter at once. On error the disease is left unchanged.
    ///
    /// # Errors
    /// Returns [`EpiError`] if any key is missing or malformed.
    pub fn set_from_params(&mut self, map: &ParamMap) -> Result<(), EpiError> {
        self.params = DiseaseParams::try_from(map)?;
        Ok(())
    }

    /// A copy with the same parameters under a new id.
    #[must_use]
    pub fn duplicate(&self, id: DiseaseId) -> Self {
        Disease {
            id,
            params: self.params.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DiseaseId {
        self.id
    }

    #[must_use]
    pub fn params(&self) -> &DiseaseParams {
        &self.params
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.params.name
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.params.color
    }

    #[must_use]
    pub fn fatality_rate(&self) -> f64 {
        self.params.fatality_rate
    }

    #[must_use]
    pub fn vaccinated_fatality_rate(&self) -> f64 {
        self.params.vaccinated_fatality_rate
    }

    #[must_use]
    pub fn infection_rate(&self) -> f64 {
        self.params.infection_rate
    }

    #[must_use]
    pub fn reinfection_rate(&self) -> f64 {
        self.params.reinfection_rate
    }

    #[must_use]
    pub fn vaccinated_infection_rate(&self) -> f64 {
        self.params.vaccinated_infection_rate
    }

    /// Ticks an infection lasts before it resolves.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.params.duration
    }

    #[must_use]
    pub fn initial_infection_count(&self) -> usize {
        self.params.initial_infection_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::param_map;

    fn flu_map() -> ParamMap {
        param_map([
            ("name", "Flu"),
            ("color", "#00ff00"),
            ("fatality_rate", "0.1"),
            ("vaccinated_fatality_rate", "0.01"),
            ("infection_rate", "0.3"),
            ("reinfection_rate", "0.1"),
            ("vaccinated_infection_rate", "0.05"),
            ("duration", "7"),
            ("initial_infection_count", "3"),
        ])
    }

    #[test]
    fn builds_from_map() {
        let disease = Disease::from_map(DiseaseId(2), &flu_map()).unwrap();
        assert_eq!(disease.id(), DiseaseId(2));
        assert_eq!(disease.name(), "Flu");
        assert_eq!(disease.duration(), 7);
        assert_eq!(disease.initial_infection_count(), 3);
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut disease = Disease::from_map(DiseaseId(0), &flu_map()).unwrap();
        let before = disease.clone();

        let mut edit = flu_map();
        edit.insert("name".to_string(), "Measles".to_string());
        edit.insert("fatality_rate".to_string(), "2".to_string());
        assert!(disease.set_from_params(&edit).is_err());
        assert_eq!(disease, before);

        edit.insert("fatality_rate".to_string(), "0.2".to_string());
        disease.set_from_params(&edit).unwrap();
        assert_eq!(disease.name(), "Measles");
        assert_eq!(disease.id(), DiseaseId(0));
    }

    #[test]
    fn duplicate_gets_new_id() {
        let disease = Disease::from_map(DiseaseId(0), &flu_map()).unwrap();
        let copy = disease.duplicate(DiseaseId(5));
        assert_eq!(copy.id(), DiseaseId(5));
        assert_eq!(copy.params(), disease.params());
    }
}
