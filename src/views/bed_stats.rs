//! Bed Stats Panel
//!
//! Headline cards for total/available/occupied/cleaning/maintenance plus a
//! per-type table. `refresh` hands control back to the parent, which
//! re-fetches and calls `set_stats`.

use std::fmt;

use super::stat_card::{render_row, StatCard};
use crate::stats::BedStats;

/// Dashboard panel for bed occupancy
pub struct BedStatsPanel {
    stats: BedStats,
    on_refresh: Box<dyn FnMut() + Send>,
}

impl BedStatsPanel {
    pub fn new(stats: BedStats, on_refresh: impl FnMut() + Send + 'static) -> Self {
        Self {
            stats,
            on_refresh: Box::new(on_refresh),
        }
    }

    /// Panel without a refresh action
    pub fn read_only(stats: BedStats) -> Self {
        Self::new(stats, || {})
    }

    pub fn stats(&self) -> &BedStats {
        &self.stats
    }

    pub fn set_stats(&mut self, stats: BedStats) {
        self.stats = stats;
    }

    /// User asked for fresh data
    pub fn refresh(&mut self) {
        (self.on_refresh)();
    }

    pub fn cards(&self) -> Vec<StatCard> {
        let s = &self.stats;
        vec![
            StatCard::new("Total Beds", s.total)
                .hint(format!("{:.0}% occupied", s.occupancy_percent())),
            StatCard::new("Available", s.available),
            StatCard::new("Occupied", s.occupied),
            StatCard::new("Cleaning", s.cleaning),
            StatCard::new("Maintenance", s.maintenance),
        ]
    }

    fn type_table(&self) -> String {
        if self.stats.by_type.is_empty() {
            return "No bed types reported".to_string();
        }

        let name_width = self
            .stats
            .by_type
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut out = format!("{:<w$}  {:>9}  {:>5}\n", "Type", "Available", "Total", w = name_width);
        out.push_str(&"-".repeat(name_width + 18));
        for (name, counts) in &self.stats.by_type {
            out.push('\n');
            out.push_str(&format!(
                "{:<w$}  {:>9}  {:>5}",
                name,
                counts.available,
                counts.total,
                w = name_width
            ));
        }
        out
    }
}

impl fmt::Display for BedStatsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", render_row(&self.cards()))?;
        writeln!(f)?;
        write!(f, "{}", self.type_table())
    }
}

impl fmt::Debug for BedStatsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BedStatsPanel")
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BedTypeStats;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample() -> BedStats {
        let mut stats = BedStats {
            total: 20,
            available: 6,
            occupied: 10,
            cleaning: 3,
            maintenance: 1,
            ..Default::default()
        };
        stats
            .by_type
            .insert("icu".into(), BedTypeStats { total: 4, available: 1 });
        stats
            .by_type
            .insert("general".into(), BedTypeStats { total: 16, available: 5 });
        stats
    }

    #[test]
    fn test_renders_all_headline_figures() {
        let panel = BedStatsPanel::read_only(sample());
        let text = panel.to_string();

        for label in ["Total Beds", "Available", "Occupied", "Cleaning", "Maintenance"] {
            assert!(text.contains(label), "missing {}", label);
        }
        assert!(text.contains("50% occupied"));
    }

    #[test]
    fn test_type_table_sorted_by_name() {
        let text = BedStatsPanel::read_only(sample()).to_string();
        let general = text.find("general").unwrap();
        let icu = text.find("icu").unwrap();
        assert!(general < icu);
        assert!(text.contains("general          5     16"));
    }

    #[test]
    fn test_empty_stats_render_zeros() {
        let text = BedStatsPanel::read_only(BedStats::default()).to_string();
        assert!(text.contains("0% occupied"));
        assert!(text.contains("No bed types reported"));
    }

    #[test]
    fn test_refresh_invokes_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut panel = BedStatsPanel::new(BedStats::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        panel.refresh();
        panel.refresh();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        panel.set_stats(sample());
        assert_eq!(panel.stats().total, 20);
    }
}
