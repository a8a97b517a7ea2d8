use std::io::Write;

use crate::db::{HospitalRecord, HospitalRepository, Include};

use super::ScriptResult;

/// Result of [`inspect_hospital`]
#[derive(Debug, Clone, PartialEq)]
pub enum InspectOutcome {
    Found(Box<HospitalRecord>),
    NotFound,
}

/// Print one hospital with its manager and ratings
pub fn inspect_hospital<R, W>(repo: &R, id: &str, out: &mut W) -> ScriptResult<InspectOutcome>
where
    R: HospitalRepository + ?Sized,
    W: Write + ?Sized,
{
    let record = match repo.find_unique(id, Include::all())? {
        Some(record) => record,
        None => {
            tracing::warn!(hospital_id = %id, "Hospital not found");
            writeln!(out, "Hospital not found")?;
            return Ok(InspectOutcome::NotFound);
        }
    };

    tracing::info!(hospital_id = %id, "Loaded hospital");

    let h = &record.hospital;
    writeln!(out, "Hospital: {} ({})", h.name, h.id)?;
    writeln!(out, "Verified: {}", h.is_verified)?;
    writeln!(out, "Accreditations: {}", join_or_none(&h.accreditations))?;
    writeln!(out, "Specializations: {}", join_or_none(&h.specializations))?;

    match &record.manager {
        Some(m) => writeln!(
            out,
            "Manager: {} <{}> {}",
            m.name,
            m.email,
            m.phone.as_deref().unwrap_or("(no phone)")
        )?,
        None => writeln!(out, "Manager: (none)")?,
    }

    let ratings = record.ratings.as_deref().unwrap_or_default();
    match record.average_rating() {
        Some(avg) => writeln!(out, "Ratings: {} (avg {:.1})", ratings.len(), avg)?,
        None => writeln!(out, "Ratings: 0")?,
    }

    writeln!(out)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;

    Ok(InspectOutcome::Found(Box::new(record)))
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{HospitalDb, Manager, NewHospital};

    fn db_with_hospital() -> HospitalDb {
        let db = HospitalDb::open_in_memory().unwrap();
        db.insert_manager(&Manager {
            id: "m1".into(),
            name: "Ibrahim Osei".into(),
            email: "ibrahim@harbor.org".into(),
            phone: None,
        })
        .unwrap();
        db.insert_hospital(
            &NewHospital::new("h1", "Harbor Medical")
                .accreditation("NABH")
                .manager("m1"),
        )
        .unwrap();
        db
    }

    #[test]
    fn test_missing_hospital() {
        let db = db_with_hospital();
        let mut out = Vec::new();

        let outcome = inspect_hospital(&db, "does-not-exist", &mut out).unwrap();

        assert_eq!(outcome, InspectOutcome::NotFound);
        assert_eq!(String::from_utf8(out).unwrap(), "Hospital not found\n");
    }

    #[test]
    fn test_prints_relations() {
        let db = db_with_hospital();
        let mut out = Vec::new();

        let outcome = inspect_hospital(&db, "h1", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(matches!(outcome, InspectOutcome::Found(r) if r.hospital.id == "h1"));
        assert!(text.contains("Hospital: Harbor Medical (h1)"));
        assert!(text.contains("Manager: Ibrahim Osei <ibrahim@harbor.org> (no phone)"));
        assert!(text.contains("Accreditations: NABH"));
        assert!(text.contains("Specializations: (none)"));
        assert!(text.contains("Ratings: 0"));
        assert!(text.contains("\"isVerified\": false"));
    }
}
