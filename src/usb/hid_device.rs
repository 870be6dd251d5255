//! USB HID joystick device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral, exposes the Pokken-compatible HID interface and runs the
//! report loop that feeds it.

use core::task::Poll;

use defmt::{debug, info, warn};
use embassy_futures::poll_once;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_time::Timer;
use embassy_usb::class::hid::{Config as HidConfig, HidReader, HidReaderWriter, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use jumpstick::config;
use jumpstick::hid::{JOYSTICK_REPORT_DESCRIPTOR, JOYSTICK_REPORT_SIZE, OUTPUT_REPORT_SIZE};
use jumpstick::{jump_script, Divider, EndpointFault, Error, Sequencer};
use static_cell::StaticCell;

use crate::housekeeping;
use crate::monotonic::EmbassyClock;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static JOYSTICK_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static USB_STATE_HANDLER: StaticCell<UsbStateHandler> = StaticCell::new();

struct UsbStateHandler;

impl embassy_usb::Handler for UsbStateHandler {
    fn configured(&mut self, configured: bool) {
        if configured {
            info!("USB: host configured the device");
        } else {
            info!("USB: device deconfigured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB: suspended={}", suspended);
    }
}

/// Build result containing the USB device runner and the joystick endpoints.
pub struct UsbJoystick {
    pub device: UsbDevice<'static, UsbDriver>,
    pub reader: HidReader<'static, UsbDriver, OUTPUT_REPORT_SIZE>,
    pub writer: HidWriter<'static, UsbDriver, JOYSTICK_REPORT_SIZE>,
}

/// Initialise the USB stack and create the joystick HID interface.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbJoystick {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(USB_STATE_HANDLER.init(UsbStateHandler));

    let state = JOYSTICK_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: JOYSTICK_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: config::USB_HID_MAX_PACKET_SIZE,
    };
    let joystick = HidReaderWriter::<_, OUTPUT_REPORT_SIZE, JOYSTICK_REPORT_SIZE>::new(
        &mut builder,
        state,
        hid_config,
    );
    let (reader, writer) = joystick.split();

    let device = builder.build();

    info!(
        "USB HID joystick initialised ({=u16:#x}:{=u16:#x})",
        config::USB_VID,
        config::USB_PID
    );

    UsbJoystick {
        device,
        reader,
        writer,
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and control requests.
/// It runs forever (or until the USB cable is disconnected).
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Report task - plays the compiled-in macro, one report per IN poll.
///
/// `HidWriter::write` only completes once the host has collected the
/// previous report, so it doubles as the readiness wait. The OUT endpoint
/// is drained without blocking every few iterations; housekeeping is
/// signalled on its own, slower ratio and whenever the indicator flips.
pub async fn report_task(
    mut reader: HidReader<'static, UsbDriver, OUTPUT_REPORT_SIZE>,
    mut writer: HidWriter<'static, UsbDriver, JOYSTICK_REPORT_SIZE>,
) -> ! {
    info!("Report task started - waiting for host configuration");
    writer.ready().await;

    let script = jump_script();
    info!(
        "Playing macro: {} actions, looping from {}",
        script.len(),
        script.loop_start()
    );

    let mut sequencer = Sequencer::new(script);
    let mut out_drain = Divider::new(config::OUT_DRAIN_EVERY);
    let mut status_every = Divider::new(config::HOUSEKEEPING_EVERY);
    let mut indicator = sequencer.indicator();
    let mut out_buf = [0u8; OUTPUT_REPORT_SIZE];
    let mut buf = [0u8; JOYSTICK_REPORT_SIZE];

    loop {
        if out_drain.due() {
            if let Poll::Ready(Ok(n)) = poll_once(reader.read(&mut out_buf)) {
                debug!("Discarded {} byte OUT report", n);
            }
        }

        // Pipelined: this report is sampled before the host takes the previous one.
        let report = sequencer.tick(&EmbassyClock);
        let n = report.serialize(&mut buf);

        if let Err(e) = writer.write(&buf[..n]).await {
            match Error::from(e) {
                Error::Endpoint(EndpointFault::Disabled) => {
                    warn!("USB joystick endpoint disabled - waiting for host");
                    writer.ready().await;
                }
                other => warn!("USB joystick write failed: {}", other),
            }
        }

        if status_every.due() || sequencer.indicator() != indicator {
            indicator = sequencer.indicator();
            housekeeping::status_signal().signal(sequencer.status());
        }

        if let Some(ms) = sequencer.idle_hint() {
            Timer::after_millis(ms).await;
        }
    }
}
