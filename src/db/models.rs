use chrono::{DateTime, Utc};
use serde::Serialize;

/// A hospital row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub name: String,
    pub is_verified: bool,
    pub accreditations: Vec<String>,
    pub specializations: Vec<String>,
    pub manager_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account managing a hospital listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Patient rating of a hospital
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub hospital_id: String,
    pub score: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A hospital together with whichever relations were requested
///
/// A relation that was not included is `None`, as opposed to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalRecord {
    #[serde(flatten)]
    pub hospital: Hospital,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Manager>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<Rating>>,
}

impl HospitalRecord {
    /// Mean rating, if any ratings were loaded
    pub fn average_rating(&self) -> Option<f64> {
        let ratings = self.ratings.as_ref()?;
        if ratings.is_empty() {
            return None;
        }
        let sum: u32 = ratings.iter().map(|r| r.score as u32).sum();
        Some(sum as f64 / ratings.len() as f64)
    }
}

/// Relations to load alongside a hospital
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Include {
    pub manager: bool,
    pub ratings: bool,
}

impl Include {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            manager: true,
            ratings: true,
        }
    }
}

/// Fields to change; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HospitalUpdate {
    pub name: Option<String>,
    pub is_verified: Option<bool>,
    pub accreditations: Option<Vec<String>>,
    pub specializations: Option<Vec<String>>,
}

impl HospitalUpdate {
    pub fn verified(is_verified: bool) -> Self {
        Self {
            is_verified: Some(is_verified),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.is_verified.is_none()
            && self.accreditations.is_none()
            && self.specializations.is_none()
    }
}

/// Insert payload for a hospital
#[derive(Debug, Clone, PartialEq)]
pub struct NewHospital {
    pub id: String,
    pub name: String,
    pub is_verified: bool,
    pub accreditations: Vec<String>,
    pub specializations: Vec<String>,
    pub manager_id: Option<String>,
}

impl NewHospital {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_verified: false,
            accreditations: Vec::new(),
            specializations: Vec::new(),
            manager_id: None,
        }
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn accreditation(mut self, name: impl Into<String>) -> Self {
        self.accreditations.push(name.into());
        self
    }

    pub fn specialization(mut self, name: impl Into<String>) -> Self {
        self.specializations.push(name.into());
        self
    }

    pub fn manager(mut self, manager_id: impl Into<String>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }
}
