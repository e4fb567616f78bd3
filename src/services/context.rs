use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Timelike;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::{Moment, MomentIcon};

pub const MORNING_ROUTINE: Moment = Moment {
    name: "Morning Routine",
    display_phrase: "Good morning",
    icon: MomentIcon::Coffee,
};

pub const WORK_MODE: Moment = Moment {
    name: "Work Mode",
    display_phrase: "Focus time",
    icon: MomentIcon::Briefcase,
};

pub const LUNCH_BREAK: Moment = Moment {
    name: "Lunch Break",
    display_phrase: "Midday",
    icon: MomentIcon::Sun,
};

pub const AFTERNOON: Moment = Moment {
    name: "Afternoon",
    display_phrase: "Productive hours",
    icon: MomentIcon::Briefcase,
};

pub const EVENING_WIND_DOWN: Moment = Moment {
    name: "Evening Wind Down",
    display_phrase: "Relax time",
    icon: MomentIcon::Moon,
};

pub const LATE_NIGHT: Moment = Moment {
    name: "Late Night",
    display_phrase: "Night owl",
    icon: MomentIcon::Moon,
};

/// Maps an hour of day to its moment
///
/// Total over every hour; values past 23 wrap around the clock.
pub fn detect_moment(hour_of_day: u32) -> Moment {
    match hour_of_day % 24 {
        6..=8 => MORNING_ROUTINE,
        9..=11 => WORK_MODE,
        12..=13 => LUNCH_BREAK,
        14..=17 => AFTERNOON,
        18..=21 => EVENING_WIND_DOWN,
        _ => LATE_NIGHT,
    }
}

/// Source of the current hour
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Manually driven clock
#[derive(Debug, Default)]
pub struct FixedClock {
    hour: AtomicU32,
}

impl FixedClock {
    pub fn new(hour: u32) -> Self {
        Self {
            hour: AtomicU32::new(hour),
        }
    }

    pub fn set_hour(&self, hour: u32) {
        self.hour.store(hour, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.hour.load(Ordering::SeqCst)
    }
}

/// Shortest period the ticker runs at
pub const MIN_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that re-detects the moment on a fixed period
///
/// Tied to the lifetime of the consuming view: call `stop` when the view goes
/// away. Dropping the ticker stops it as well.
pub struct MomentTicker {
    handle: JoinHandle<()>,
    rx: watch::Receiver<Moment>,
}

impl MomentTicker {
    /// Detects the moment immediately, then again every `period`
    ///
    /// A zero period is raised to `MIN_TICK_PERIOD`. Must be called from
    /// within a tokio runtime.
    pub fn start(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let period = if period.is_zero() {
            tracing::warn!(
                min_secs = MIN_TICK_PERIOD.as_secs(),
                "Zero moment refresh period, using the minimum"
            );
            MIN_TICK_PERIOD
        } else {
            period
        };
        let initial = detect_moment(clock.current_hour());
        let (tx, rx) = watch::channel(initial);

        tracing::debug!(
            moment = initial.name,
            period_secs = period.as_secs(),
            "Moment ticker started"
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; the initial moment is already published
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }

                let moment = detect_moment(clock.current_hour());
                tx.send_if_modified(|current| {
                    if *current == moment {
                        return false;
                    }
                    tracing::info!(from = current.name, to = moment.name, "Moment changed");
                    *current = moment;
                    true
                });
            }
        });

        Self { handle, rx }
    }

    pub fn current(&self) -> Moment {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Moment> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {
        self.handle.abort();
        tracing::debug!("Moment ticker stopped");
    }
}

impl Drop for MomentTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(detect_moment(5), LATE_NIGHT);
        assert_eq!(detect_moment(6), MORNING_ROUTINE);
        assert_eq!(detect_moment(8), MORNING_ROUTINE);
        assert_eq!(detect_moment(9), WORK_MODE);
        assert_eq!(detect_moment(11), WORK_MODE);
        assert_eq!(detect_moment(12), LUNCH_BREAK);
        assert_eq!(detect_moment(13), LUNCH_BREAK);
        assert_eq!(detect_moment(14), AFTERNOON);
        assert_eq!(detect_moment(17), AFTERNOON);
        assert_eq!(detect_moment(18), EVENING_WIND_DOWN);
        assert_eq!(detect_moment(21), EVENING_WIND_DOWN);
        assert_eq!(detect_moment(22), LATE_NIGHT);
        assert_eq!(detect_moment(23), LATE_NIGHT);
        assert_eq!(detect_moment(0), LATE_NIGHT);
    }

    #[test]
    fn test_every_hour_maps_to_one_band() {
        let bands = [
            MORNING_ROUTINE,
            WORK_MODE,
            LUNCH_BREAK,
            AFTERNOON,
            EVENING_WIND_DOWN,
            LATE_NIGHT,
        ];
        let mut hours_per_band = [0u32; 6];

        for hour in 0..24 {
            let moment = detect_moment(hour);
            let matches: Vec<usize> = bands
                .iter()
                .enumerate()
                .filter(|(_, band)| **band == moment)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(matches.len(), 1, "hour {} matched {:?}", hour, matches);
            hours_per_band[matches[0]] += 1;
        }

        assert_eq!(hours_per_band, [3, 3, 2, 4, 4, 8]);
    }

    #[test]
    fn test_hours_past_midnight_wrap() {
        assert_eq!(detect_moment(24 + 7), MORNING_ROUTINE);
    }

    #[test]
    fn test_system_clock_in_range() {
        assert!(SystemClock.current_hour() < 24);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_publishes_initial_moment() {
        let clock = Arc::new(FixedClock::new(7));
        let ticker = MomentTicker::start(clock, Duration::from_secs(60));
        assert_eq!(ticker.current(), MORNING_ROUTINE);
        assert!(ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_picks_up_hour_change() {
        let clock = Arc::new(FixedClock::new(7));
        let ticker = MomentTicker::start(clock.clone(), Duration::from_secs(60));
        let mut rx = ticker.subscribe();

        clock.set_hour(12);
        rx.changed().await.unwrap();

        assert_eq!(*rx.borrow(), LUNCH_BREAK);
        assert_eq!(ticker.current(), LUNCH_BREAK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stop_closes_channel() {
        let clock = Arc::new(FixedClock::new(7));
        let ticker = MomentTicker::start(clock.clone(), Duration::from_secs(60));
        let mut rx = ticker.subscribe();

        ticker.stop();
        clock.set_hour(20);

        // Sender is dropped with the aborted task
        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), MORNING_ROUTINE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_closes_channel() {
        let clock = Arc::new(FixedClock::new(7));
        let ticker = MomentTicker::start(clock.clone(), Duration::from_secs(60));
        let mut rx = ticker.subscribe();

        drop(ticker);
        clock.set_hour(12);

        assert!(rx.changed().await.is_err());
        assert_eq!(*rx.borrow(), MORNING_ROUTINE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_keeps_ticking() {
        let clock = Arc::new(FixedClock::new(7));
        let ticker = MomentTicker::start(clock.clone(), Duration::ZERO);
        let mut rx = ticker.subscribe();

        clock.set_hour(12);
        rx.changed().await.unwrap();

        assert!(ticker.is_running());
        assert_eq!(ticker.current(), LUNCH_BREAK);
    }
}
