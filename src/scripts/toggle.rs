use std::io::Write;

use crate::db::{HospitalRepository, HospitalUpdate};

use super::ScriptResult;

/// Result of [`toggle_first_verification`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    NoHospitals,
    Toggled {
        id: String,
        name: String,
        before: bool,
        after: bool,
    },
}

/// Flip `isVerified` on the first hospital
///
/// With an empty table nothing is updated.
pub fn toggle_first_verification<R, W>(repo: &R, out: &mut W) -> ScriptResult<ToggleOutcome>
where
    R: HospitalRepository + ?Sized,
    W: Write + ?Sized,
{
    let hospitals = repo.find_many()?;
    writeln!(out, "Found {} hospital(s)", hospitals.len())?;

    let first = match hospitals.into_iter().next() {
        Some(h) => h,
        None => {
            tracing::warn!("No hospitals found.");
            writeln!(out, "No hospitals found.")?;
            return Ok(ToggleOutcome::NoHospitals);
        }
    };

    let before = first.is_verified;
    let updated = repo.update(&first.id, &HospitalUpdate::verified(!before))?;

    tracing::info!(
        hospital_id = %updated.id,
        before,
        after = updated.is_verified,
        "Toggled verification"
    );
    writeln!(
        out,
        "{} ({}): isVerified {} -> {}",
        updated.name, updated.id, before, updated.is_verified
    )?;

    Ok(ToggleOutcome::Toggled {
        id: updated.id,
        name: updated.name,
        before,
        after: updated.is_verified,
    })
}
