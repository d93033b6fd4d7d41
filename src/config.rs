use anyhow::{Context, Result};
use chrono::{Days, Months, NaiveDateTime};

/// How confirmed dated folders are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalMode {
    #[default]
    Permanent,
    Trash,
}

/// Everything a run needs, built once by the CLI and passed down.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub months_back: u32,
    pub days_back: u32,
    pub dry_run: bool,
    pub removal: RemovalMode,
}

impl RunConfig {
    /// Cutoff for the cleanup phase, or `None` when nothing should be deleted.
    ///
    /// Months take priority over days when both are set.
    pub fn threshold(&self, now: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
        if self.months_back > 0 {
            let cutoff = now
                .checked_sub_months(Months::new(self.months_back))
                .with_context(|| format!("Cannot go back {} months", self.months_back))?;
            return Ok(Some(cutoff));
        }

        if self.days_back > 0 {
            let cutoff = now
                .checked_sub_days(Days::new(u64::from(self.days_back)))
                .with_context(|| format!("Cannot go back {} days", self.days_back))?;
            return Ok(Some(cutoff));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn no_threshold_when_both_zero() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.threshold(at(2024, 3, 15)).unwrap(), None);
    }

    #[test]
    fn months_back_moves_calendar_month() {
        let cfg = RunConfig {
            months_back: 1,
            ..Default::default()
        };
        assert_eq!(
            cfg.threshold(at(2024, 3, 15)).unwrap(),
            Some(at(2024, 2, 15))
        );
    }

    #[test]
    fn months_back_clamps_to_month_end() {
        let cfg = RunConfig {
            months_back: 1,
            ..Default::default()
        };
        assert_eq!(
            cfg.threshold(at(2024, 3, 31)).unwrap(),
            Some(at(2024, 2, 29))
        );
    }

    #[test]
    fn days_back_used_when_months_zero() {
        let cfg = RunConfig {
            days_back: 10,
            ..Default::default()
        };
        assert_eq!(
            cfg.threshold(at(2024, 3, 15)).unwrap(),
            Some(at(2024, 3, 5))
        );
    }

    #[test]
    fn months_win_over_days() {
        let cfg = RunConfig {
            months_back: 2,
            days_back: 3,
            ..Default::default()
        };
        assert_eq!(
            cfg.threshold(at(2024, 3, 15)).unwrap(),
            Some(at(2024, 1, 15))
        );
    }

    #[test]
    fn absurd_month_count_is_an_error() {
        let cfg = RunConfig {
            months_back: u32::MAX,
            ..Default::default()
        };
        assert!(cfg.threshold(at(2024, 3, 15)).is_err());
    }
}
