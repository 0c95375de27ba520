//! CX-10 Receiver Main Application
//!
//! Entry point for the STM32F031-based flight board. Brings up the radio
//! on SPI1, spawns the link task, and consumes the decoded channel values.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use cx10_rx::hal::clock::EmbassyClock;
use cx10_rx::hal::indicator::LedPair;
use cx10_rx::hal::spi::SpiTransport;
use cx10_rx::prelude::*;

type RadioBus = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>;
type Radio = SpiTransport<RadioBus, Output<'static>>;
type Leds = LedPair<Output<'static>, Output<'static>>;

/// Snapshot published after every decoded frame or failsafe change
#[derive(Clone, Copy)]
struct ControlUpdate {
    commands: ChannelCommands,
    failsafe: bool,
}

static CONTROL: Signal<CriticalSectionRawMutex, ControlUpdate> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("CX-10 receiver v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let bus = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);
    let csn = Output::new(p.PA4, Level::High, Speed::VeryHigh);
    let ce = Output::new(p.PA3, Level::Low, Speed::VeryHigh);

    let Ok(device) = ExclusiveDevice::new(bus, csn, Delay) else {
        defmt::panic!("CSN pin init failed");
    };
    let radio = defmt::unwrap!(SpiTransport::new(device, ce));

    let leds = LedPair::new(
        Output::new(p.PA1, Level::Low, Speed::Low),
        Output::new(p.PA2, Level::Low, Speed::Low),
    );

    info!(
        "radio on SPI1 (SCK {=str}, MISO {=str}, MOSI {=str}, CSN {=str}, CE {=str})",
        pins::RF_SCK,
        pins::RF_MISO,
        pins::RF_MOSI,
        pins::RF_CSN,
        pins::RF_CE
    );

    spawner.spawn(radio_task(radio, leds)).unwrap();

    // Stand-in for the flight controller: consume and log channel updates
    let mut failsafe = false;
    loop {
        let update = CONTROL.wait().await;
        if update.failsafe != failsafe {
            failsafe = update.failsafe;
            if failsafe {
                warn!("link lost, failsafe engaged");
            } else {
                info!("link restored");
            }
        }
        trace!("{}", update.commands);
    }
}

/// Radio task - owns the transceiver and runs the link state machine
#[embassy_executor::task]
async fn radio_task(mut radio: Radio, mut leds: Leds) {
    let clock = EmbassyClock;
    let profile = AnyProfile::default();
    info!("chip variant {=str}", profile.variant().name());

    let mut link = LinkReceiver::start(profile, &mut radio, &clock);
    if let Some(identity) = link.chip_identity() {
        info!("chip identity {}", identity);
    }
    report_error(&mut radio);

    let mut failsafe = false;
    loop {
        match link.poll(&mut radio, &clock, &mut leds) {
            LinkEvent::Idle if link.is_bound() => {
                let expired = link.tick_failsafe();
                if expired != failsafe {
                    failsafe = expired;
                    CONTROL.signal(ControlUpdate {
                        commands: *link.commands(),
                        failsafe,
                    });
                }
            }
            LinkEvent::Frame => {
                failsafe = false;
                CONTROL.signal(ControlUpdate {
                    commands: *link.commands(),
                    failsafe,
                });
            }
            LinkEvent::Bound(address) => info!("link up on {}", address),
            LinkEvent::AddressSwitched(_) | LinkEvent::Idle => {}
        }
        report_error(&mut radio);

        Timer::after(Duration::from_millis(link.poll_interval_ms())).await;
    }
}

fn report_error(radio: &mut Radio) {
    if let Some(error) = radio.take_error() {
        warn!("radio transport: {}", error);
    }
}
