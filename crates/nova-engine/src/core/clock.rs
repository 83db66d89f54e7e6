/// Simulated calendar driven by real-time deltas.
///
/// The date is a single f64 of fractional days from the J2000 epoch
/// (January 1, 2000, 12:00 TT, Julian Day 2451545.0). f64 keeps sub-second
/// precision across millions of simulated years.

/// How real time maps onto simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeMode {
    /// One simulated second per real second.
    RealTime,
    /// Simulated days per real second.
    Scaled(f64),
}

pub struct OrbitalClock {
    /// Fractional days from J2000.
    days: f64,
    paused: bool,
    mode: TimeMode,
    /// Substituted for the calendar year once the simulation is in a
    /// deep-future epoch where a calendar year is meaningless.
    year_override: Option<String>,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Cumulative day counts at the start of each month (non-leap).
const MONTH_OFFSETS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

impl OrbitalClock {
    pub fn new(days_from_j2000: f64) -> Self {
        Self {
            days: days_from_j2000,
            paused: false,
            mode: TimeMode::Scaled(1.0),
            year_override: None,
        }
    }

    /// Advance the simulated date by `delta` real seconds.
    /// No-op while paused. Returns the fractional days advanced.
    pub fn advance(&mut self, delta: f64) -> f64 {
        if self.paused {
            return 0.0;
        }
        let days = match self.mode {
            TimeMode::RealTime => delta / 86_400.0,
            TimeMode::Scaled(scale) => delta * scale,
        };
        self.days += days;
        days
    }

    /// Days-per-real-second multiplier of the current mode.
    pub fn time_scale(&self) -> f64 {
        match self.mode {
            TimeMode::RealTime => 1.0 / 86_400.0,
            TimeMode::Scaled(scale) => scale,
        }
    }

    pub fn days(&self) -> f64 {
        self.days
    }

    pub fn set_days(&mut self, days: f64) {
        self.days = days;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimeMode) {
        self.mode = mode;
    }

    pub fn year_override(&self) -> Option<&str> {
        self.year_override.as_deref()
    }

    pub fn set_year_override(&mut self, label: Option<String>) {
        self.year_override = label;
    }

    /// Calendar breakdown: (year, month 1-12, day 1-31, hour, minute, second).
    /// Julian-day conversion (Fliegel–Van Flandern form), with the fractional
    /// day carried into the time components.
    pub fn calendar(&self) -> (i32, u32, u32, u32, u32, u32) {
        let jd = self.days + 2_451_545.0;
        let z = (jd + 0.5).floor() as i64;
        let mut frac = jd + 0.5 - z as f64;
        if frac < 0.0 {
            frac += 1.0;
        }

        let a = if z < 2_299_161 {
            z
        } else {
            let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
            z + 1 + alpha - alpha / 4
        };
        let b = a + 1524;
        let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
        let d = (365.25 * c as f64).floor() as i64;
        let e = ((b - d) as f64 / 30.6001).floor() as i64;

        let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
        let month = if e < 14 { (e - 1) as u32 } else { (e - 13) as u32 };
        let year = if month > 2 { (c - 4716) as i32 } else { (c - 4715) as i32 };

        let total_seconds = (frac * 86_400.0).floor() as u64;
        let hour = (total_seconds / 3600) as u32 % 24;
        let minute = (total_seconds / 60 % 60) as u32;
        let second = (total_seconds % 60) as u32;

        (year, month, day, hour, minute, second)
    }

    /// Fractional day of the current calendar year, 0-based.
    pub fn day_of_year(&self) -> f64 {
        let (year, month, day, hour, minute, second) = self.calendar();
        let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
        let mut doy = MONTH_OFFSETS[(month - 1) as usize] + (day - 1);
        if leap && month > 2 {
            doy += 1;
        }
        doy as f64 + (hour as f64 * 3600.0 + minute as f64 * 60.0 + second as f64) / 86_400.0
    }

    /// Deterministic display form, e.g. "14 Mar 2026 09:41:07".
    /// The year override replaces the calendar year when set.
    pub fn display_string(&self) -> String {
        let (year, month, day, hour, minute, second) = self.calendar();
        let year_label = match &self.year_override {
            Some(label) => label.clone(),
            None => year.to_string(),
        };
        format!(
            "{} {} {} {:02}:{:02}:{:02}",
            day,
            MONTHS[(month - 1) as usize],
            year_label,
            hour,
            minute,
            second
        )
    }
}
