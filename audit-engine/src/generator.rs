// Start-up history for the audit trail
use crate::entry::{log_id, AuditAction, AuditLog, TargetType};
use chrono::{Days, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use tracing::debug;

/// Most logs generated for a single day
pub const MAX_LOGS_PER_DAY: u32 = 10;

/// Generates a plausible audit history between two dates
///
/// Each day receives between 1 and [`MAX_LOGS_PER_DAY`] entries at random
/// times. The `n`-th entry rotates through users, actions and target types by
/// `n` so every combination shows up in the table. The result is sorted
/// newest first, which is the order the trail keeps.
#[derive(Debug, Clone)]
pub struct AuditLogGenerator<'a> {
    users: &'a [String],
    start: NaiveDate,
    end: NaiveDate,
}

impl<'a> AuditLogGenerator<'a> {
    pub fn new(users: &'a [String], start: NaiveDate, end: NaiveDate) -> Self {
        Self { users, start, end }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<AuditLog> {
        if self.users.is_empty() {
            return Vec::new();
        }

        let mut logs = Vec::new();
        let mut next_id: u64 = 1;
        let mut day = self.start;

        while day <= self.end {
            let per_day = rng.gen_range(1..=MAX_LOGS_PER_DAY);
            for _ in 0..per_day {
                if let Some(log) = self.generate_one(next_id, day, rng) {
                    logs.push(log);
                }
                next_id += 1;
            }
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }

        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!(count = logs.len(), from = %self.start, to = %self.end, "Generated audit history");
        logs
    }

    fn generate_one<R: Rng + ?Sized>(&self, n: u64, day: NaiveDate, rng: &mut R) -> Option<AuditLog> {
        let user = self.users.get(rotation(n, self.users.len()))?;
        let action = *AuditAction::ALL.get(rotation(n, AuditAction::ALL.len()))?;
        let target_type = *TargetType::ALL.get(rotation(n, TargetType::ALL.len()))?;
        let target_id = format!("{}-{:03}", target_type.id_prefix(), rng.gen_range(1..=100));

        let time = NaiveTime::from_hms_opt(
            rng.gen_range(0..24),
            rng.gen_range(0..60),
            rng.gen_range(0..60),
        )?;
        let timestamp = Utc.from_utc_datetime(&day.and_time(time));

        Some(AuditLog::new(log_id(n), user.clone(), action, target_type, target_id, timestamp))
    }
}

fn rotation(n: u64, len: usize) -> usize {
    usize::try_from(n % len as u64).unwrap_or(0)
}
