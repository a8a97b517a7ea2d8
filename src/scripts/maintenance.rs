use chrono::Utc;
use std::io::Write;

use crate::db::{HospitalDb, HospitalRepository, Manager, NewHospital, Rating};

use super::ScriptResult;

/// Rows written by [`seed_demo_data`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub managers: usize,
    pub hospitals: usize,
    pub ratings: usize,
}

/// Print one line per hospital, returning how many were listed
pub fn list_hospitals<R, W>(repo: &R, out: &mut W) -> ScriptResult<usize>
where
    R: HospitalRepository + ?Sized,
    W: Write + ?Sized,
{
    let hospitals = repo.find_many()?;

    if hospitals.is_empty() {
        writeln!(out, "No hospitals found.")?;
        return Ok(0);
    }

    for h in &hospitals {
        let mark = if h.is_verified { "verified" } else { "unverified" };
        writeln!(out, "{:<38} {:<10} {}", h.id, mark, h.name)?;
    }

    tracing::debug!(count = hospitals.len(), "Listed hospitals");
    Ok(hospitals.len())
}

/// Insert a small demo data set into an empty database
///
/// A database that already holds hospitals is left alone.
pub fn seed_demo_data<W>(db: &HospitalDb, out: &mut W) -> ScriptResult<SeedSummary>
where
    W: Write + ?Sized,
{
    let existing = db.count_hospitals()?;
    if existing > 0 {
        tracing::info!(existing, "Database already seeded");
        writeln!(out, "Database already has {} hospital(s); skipping seed", existing)?;
        return Ok(SeedSummary::default());
    }

    let managers = [
        Manager {
            id: "mgr-riverside".into(),
            name: "Amara Nwosu".into(),
            email: "amara.nwosu@riverside.example".into(),
            phone: Some("+1-555-0142".into()),
        },
        Manager {
            id: "mgr-lakeview".into(),
            name: "Tomás Herrera".into(),
            email: "t.herrera@lakeview.example".into(),
            phone: None,
        },
    ];
    for m in &managers {
        db.insert_manager(m)?;
    }

    let hospitals = [
        NewHospital::new("hosp-riverside", "Riverside General")
            .verified(true)
            .accreditation("JCI")
            .accreditation("NABH")
            .specialization("Cardiology")
            .specialization("Emergency")
            .manager("mgr-riverside"),
        NewHospital::new("hosp-lakeview", "Lakeview Children's")
            .accreditation("NABH")
            .specialization("Pediatrics")
            .manager("mgr-lakeview"),
        NewHospital::new("hosp-hilltop", "Hilltop Community Clinic").specialization("General"),
    ];
    for h in &hospitals {
        db.insert_hospital(h)?;
    }

    let ratings = [
        ("hosp-riverside", 5, Some("Fast triage")),
        ("hosp-riverside", 4, None),
        ("hosp-lakeview", 5, Some("Kind staff")),
    ];
    for (i, (hospital_id, score, comment)) in ratings.iter().enumerate() {
        db.insert_rating(&Rating {
            id: format!("rating-{}", i + 1),
            hospital_id: hospital_id.to_string(),
            score: *score,
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        })?;
    }

    let summary = SeedSummary {
        managers: managers.len(),
        hospitals: hospitals.len(),
        ratings: ratings.len(),
    };

    tracing::info!(?summary, "Seeded demo data");
    writeln!(
        out,
        "Seeded {} manager(s), {} hospital(s), {} rating(s)",
        summary.managers, summary.hospitals, summary.ratings
    )?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Include;

    #[test]
    fn test_seed_then_list() {
        let db = HospitalDb::open_in_memory().unwrap();

        let summary = seed_demo_data(&db, &mut Vec::new()).unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                managers: 2,
                hospitals: 3,
                ratings: 3
            }
        );

        let mut out = Vec::new();
        assert_eq!(list_hospitals(&db, &mut out).unwrap(), 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Riverside General"));
        assert!(text.contains("unverified"));

        let record = db.find_unique("hosp-riverside", Include::all()).unwrap().unwrap();
        assert_eq!(record.average_rating(), Some(4.5));
    }

    #[test]
    fn test_seed_is_skipped_when_populated() {
        let db = HospitalDb::open_in_memory().unwrap();
        seed_demo_data(&db, &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        let summary = seed_demo_data(&db, &mut out).unwrap();

        assert_eq!(summary, SeedSummary::default());
        assert_eq!(db.count_hospitals().unwrap(), 3);
        assert!(String::from_utf8(out).unwrap().contains("skipping seed"));
    }

    #[test]
    fn test_list_empty() {
        let db = HospitalDb::open_in_memory().unwrap();
        let mut out = Vec::new();

        assert_eq!(list_hospitals(&db, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "No hospitals found.\n");
    }
}
