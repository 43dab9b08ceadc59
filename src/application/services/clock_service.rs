// src/application/services/clock_service.rs
use crate::domain::clock::{ClockDisplay, ClockReading, ClockZone, DayHeader, DATE_SLOT, DAY_SLOT};
use chrono::{DateTime, Local, Utc};
use std::time::Duration;
use tracing::{instrument, trace};

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Periodically pushes the local day header and every zone's time into a display.
///
/// Missing display slots are skipped without error so a surface can choose
/// to show only part of the clocks.
#[derive(Debug, Clone)]
pub struct ClockPoller {
    zones: Vec<ClockZone>,
    tick: Duration,
}

impl ClockPoller {
    pub fn new(zones: Vec<ClockZone>) -> Self {
        Self {
            zones,
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn zones(&self) -> &[ClockZone] {
        &self.zones
    }

    pub fn readings(&self, now: DateTime<Utc>) -> Vec<ClockReading> {
        self.zones.iter().map(|zone| zone.read(now)).collect()
    }

    /// Refresh all slots once; returns the number of slots actually written.
    #[instrument(level = "trace", skip(self, display))]
    pub fn tick_once(&self, now: DateTime<Utc>, display: &mut dyn ClockDisplay) -> usize {
        let header = DayHeader::at(&now.with_timezone(&Local));
        self.tick_with_header(now, &header, display)
    }

    /// Like [`tick_once`](Self::tick_once) with an explicit header, independent of the host timezone
    pub fn tick_with_header(
        &self,
        now: DateTime<Utc>,
        header: &DayHeader,
        display: &mut dyn ClockDisplay,
    ) -> usize {
        let mut written = 0;
        for (slot, text) in [(DAY_SLOT, &header.day), (DATE_SLOT, &header.date)] {
            if display.write_slot(slot, text) {
                written += 1;
            }
        }

        for reading in self.readings(now) {
            let text = format!("{} ({})", reading.time, reading.date);
            if display.write_slot(&reading.slot, &text) {
                written += 1;
            } else {
                trace!(slot = %reading.slot, "no display slot");
            }
        }
        written
    }
}
