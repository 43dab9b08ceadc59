// src/cli/clock_commands.rs
use crate::application::ClockPoller;
use crate::cli::error::{CliError, CliResult};
use crate::domain::clock::{ClockDisplay, DATE_SLOT, DAY_SLOT};
use chrono::Utc;
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Named lines printed in a fixed order: day, date, then one per clock.
#[derive(Debug)]
pub struct TerminalClockDisplay {
    slots: Vec<ClockLine>,
}

#[derive(Debug)]
struct ClockLine {
    slot: String,
    label: Option<String>,
    text: String,
}

impl TerminalClockDisplay {
    pub fn for_poller(poller: &ClockPoller) -> Self {
        let header = [DAY_SLOT, DATE_SLOT].into_iter().map(|slot| ClockLine {
            slot: slot.to_string(),
            label: None,
            text: String::new(),
        });
        let zones = poller.zones().iter().map(|zone| ClockLine {
            slot: zone.slot.clone(),
            label: Some(zone.label.clone()),
            text: String::new(),
        });
        Self {
            slots: header.chain(zones).collect(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|line| match &line.label {
                Some(label) => format!("{}: {}", label, line.text),
                None => line.text.clone(),
            })
            .collect()
    }
}

impl ClockDisplay for TerminalClockDisplay {
    fn write_slot(&mut self, slot: &str, text: &str) -> bool {
        match self.slots.iter_mut().find(|line| line.slot == slot) {
            Some(line) => {
                line.text = text.to_string();
                true
            }
            None => false,
        }
    }
}

fn print_once(poller: &ClockPoller, display: &mut TerminalClockDisplay) -> CliResult<()> {
    poller.tick_once(Utc::now(), display);
    let mut stdout = io::stdout().lock();
    for line in display.lines() {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;
    Ok(())
}

/// Print the clocks once, or every tick until Ctrl-C or `ticks` refreshes.
#[instrument(level = "debug", skip(poller))]
pub fn clock(poller: &ClockPoller, watch: bool, ticks: Option<u64>) -> CliResult<()> {
    let mut display = TerminalClockDisplay::for_poller(poller);
    if !watch {
        return print_once(poller, &mut display);
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::CommandFailed(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(async {
        let mut interval = tokio::time::interval(poller.tick());
        let mut done = 0u64;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    print_once(poller, &mut display)?;
                    done += 1;
                    if ticks.is_some_and(|limit| done >= limit) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("clock watch interrupted");
                    break;
                }
            }
        }
        Ok::<(), CliError>(())
    })
}
