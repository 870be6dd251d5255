//! Housekeeping task - status LED and periodic status log.
//!
//! Runs at a fraction of the report rate. The report task signals a
//! fresh [`Status`] every `HOUSEKEEPING_EVERY` iterations and whenever
//! the indicator changes; only the latest value is kept.

use defmt::{debug, info, warn};
use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use jumpstick::{Status, StatusLed};

static STATUS_SIGNAL: Signal<CriticalSectionRawMutex, Status> = Signal::new();

/// Latest sequencer status, published by the report task.
pub fn status_signal() -> &'static Signal<CriticalSectionRawMutex, Status> {
    &STATUS_SIGNAL
}

pub async fn run(mut led: StatusLed<Output<'static>>) -> ! {
    info!("Housekeeping task started");

    let mut laps = 0;

    loop {
        let status = STATUS_SIGNAL.wait().await;

        if led.show(status.indicator).is_err() {
            warn!("Status LED write failed");
        }

        if status.laps != laps {
            laps = status.laps;
            info!("Macro lap {} complete", laps);
        }

        debug!("Status: {}", status);
    }
}
