/// Lookahead window for the upcoming-evaluations calendar.
///
/// `lookahead_days = None` means every future evaluation is listed.
#[derive(Clone, Debug, Default)]
pub struct CalendarConfig {
    pub lookahead_days: Option<u32>,
}

impl CalendarConfig {
    pub fn from_env() -> Self {
        Self {
            lookahead_days: std::env::var("CALENDAR_LOOKAHEAD_DAYS")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    /// A per-request window wins over the configured one.
    pub fn window(&self, requested_days: Option<u32>) -> Option<u32> {
        requested_days.or(self.lookahead_days)
    }
}
