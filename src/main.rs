//! jumpstick firmware entry point (nRF52840 + Embassy).
//!
//! Enumerates as a Pokken-compatible USB pad and plays the compiled-in
//! macro forever. Three tasks:
//!
//! - USB device task: enumeration, control requests, suspend/resume
//! - report task: one sequencer evaluation per IN poll
//! - housekeeping task: status LED and periodic status log

#![no_std]
#![no_main]

mod housekeeping;
mod monotonic;
mod usb;

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::pac;
use embassy_usb::class::hid::{HidReader, HidWriter};
use embassy_usb::UsbDevice;
use jumpstick::hid::{JOYSTICK_REPORT_SIZE, OUTPUT_REPORT_SIZE};
use jumpstick::StatusLed;
use usb::hid_device::{self, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn report_task(
    reader: HidReader<'static, UsbDriver, OUTPUT_REPORT_SIZE>,
    writer: HidWriter<'static, UsbDriver, JOYSTICK_REPORT_SIZE>,
) -> ! {
    hid_device::report_task(reader, writer).await
}

#[embassy_executor::task]
async fn housekeeping_task(led: Output<'static>) -> ! {
    // LED1 on the nRF52840-DK is active-low.
    housekeeping::run(StatusLed::active_low(led)).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("jumpstick starting");

    // USBD needs the external high-frequency crystal running.
    pac::CLOCK.tasks_hfclkstart().write_value(1);
    while pac::CLOCK.events_hfclkstarted().read() != 1 {}

    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);
    let usb = hid_device::init(p.USBD);

    spawner.must_spawn(usb_task(usb.device));
    spawner.must_spawn(report_task(usb.reader, usb.writer));
    spawner.must_spawn(housekeeping_task(led));
}
