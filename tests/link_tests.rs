//! Link Receiver Tests
//!
//! Boot to bind to streaming, as the firmware main loop drives it.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test link_tests

use cx10_rx::config::{BIND_POLL_INTERVAL_MS, FAILSAFE_LIMIT, STREAM_POLL_INTERVAL_MS};
use cx10_rx::hal::indicator::Indicator;
use cx10_rx::hal::mock::{MockClock, MockIndicators, MockTransport, TransportOp};
use cx10_rx::radio::link::{LinkEvent, LinkPhase, LinkReceiver};
use cx10_rx::radio::profile::{AnyProfile, Nrf24Profile, Xn297Profile};
use cx10_rx::radio::registers as reg;
use cx10_rx::types::{BindState, Channel, ChipIdentity, ChipVariant, RadioAddress};

const BROADCAST: [u8; 9] = [0xA1, 0xB2, 0xC3, 0xD4, 0, 0, 0, 0, 0];
const COMMAND: RadioAddress = RadioAddress::new([0xA1, 0xB2, 0xC3, 0xD4, 0xC1]);

fn bound_nrf24() -> (
    LinkReceiver<Nrf24Profile>,
    MockTransport,
    MockClock,
    MockIndicators,
) {
    let mut radio = MockTransport::new();
    let clock = MockClock::new(0);
    let mut leds = MockIndicators::new();
    let mut link = LinkReceiver::start(Nrf24Profile::default(), &mut radio, &clock);

    radio.arrive(&BROADCAST);
    link.poll(&mut radio, &clock, &mut leds);
    radio.arrive(&[0x80, 0x80, 0, 0x80, 0x80, 0, 0, 0, 0]);
    link.poll(&mut radio, &clock, &mut leds);
    (link, radio, clock, leds)
}

// =============================================================================
// Startup Tests
// =============================================================================

#[test]
fn start_initializes_radio_once() {
    let mut radio = MockTransport::new();
    let clock = MockClock::new(0);
    let link = LinkReceiver::start(Nrf24Profile::default(), &mut radio, &clock);

    let configs = radio
        .ops()
        .iter()
        .filter(|op| **op == TransportOp::WriteRegister(reg::CONFIG, 0x0B))
        .count();
    assert_eq!(configs, 1);
    assert!(radio.radio_enabled());
    assert_eq!(link.bind_state(), BindState::WaitingBroadcast);
    assert_eq!(link.address(), RadioAddress::BIND_NRF24);
    assert_eq!(link.chip_identity(), Some(ChipIdentity::Nrf24));
}

#[test]
fn start_reports_beken_identity() {
    let mut radio = MockTransport::beken();
    let clock = MockClock::new(0);
    let link = LinkReceiver::start(Nrf24Profile::default(), &mut radio, &clock);
    assert_eq!(link.chip_identity(), Some(ChipIdentity::Bk2423));
}

#[test]
fn xn297_link_uses_its_bind_address() {
    let mut radio = MockTransport::new();
    let clock = MockClock::new(0);
    let link = LinkReceiver::start(Xn297Profile::default(), &mut radio, &clock);
    assert_eq!(link.address(), RadioAddress::BIND_XN297);
    assert_eq!(radio.block(reg::RX_ADDR_P0), Some(&[0xCC; 5][..]));
    assert_eq!(link.chip_identity(), None);
}

// =============================================================================
// Bind Flow Tests
// =============================================================================

#[test]
fn full_bind_flow() {
    let mut radio = MockTransport::new();
    let clock = MockClock::new(0);
    let mut leds = MockIndicators::new();
    let mut link = LinkReceiver::start(
        AnyProfile::for_variant(ChipVariant::Nrf24, 0x3C),
        &mut radio,
        &clock,
    );

    assert_eq!(link.poll(&mut radio, &clock, &mut leds), LinkEvent::Idle);
    assert_eq!(link.poll_interval_ms(), BIND_POLL_INTERVAL_MS);

    radio.arrive(&BROADCAST);
    assert_eq!(
        link.poll(&mut radio, &clock, &mut leds),
        LinkEvent::AddressSwitched(COMMAND)
    );
    assert_eq!(link.address(), COMMAND);
    assert_eq!(link.bind_state(), BindState::WaitingConfirmation);

    radio.arrive(&[0x40, 0x40, 0, 0x40, 0x40, 0, 0, 0, 0]);
    assert_eq!(
        link.poll(&mut radio, &clock, &mut leds),
        LinkEvent::Bound(COMMAND)
    );
    assert!(link.is_bound());
    assert!(matches!(link.phase(), LinkPhase::Streaming(_)));
    assert_eq!(link.poll_interval_ms(), STREAM_POLL_INTERVAL_MS);
}

#[test]
fn confirmation_packet_decoded_next_poll() {
    let (mut link, mut radio, clock, mut leds) = bound_nrf24();
    assert_eq!(link.frames(), 0);
    assert_eq!(link.poll(&mut radio, &clock, &mut leds), LinkEvent::Frame);
    assert_eq!(link.commands()[Channel::Throttle], 512);
    assert_eq!(link.commands()[Channel::Roll], 0);
    assert_eq!(link.frames(), 1);
}

#[test]
fn bind_payload_never_decoded() {
    let mut radio = MockTransport::new();
    let clock = MockClock::new(0);
    let mut leds = MockIndicators::new();
    let mut link = LinkReceiver::start(Nrf24Profile::default(), &mut radio, &clock);

    radio.arrive(&[0xFF; 9]);
    link.poll(&mut radio, &clock, &mut leds);
    assert_eq!(link.commands().as_array(), &[0; 6]);
}

#[test]
fn leds_off_once_bound() {
    let (mut link, mut radio, clock, mut leds) = bound_nrf24();
    clock.advance(5_000);
    link.poll(&mut radio, &clock, &mut leds);
    link.poll(&mut radio, &clock, &mut leds);
    assert!(!leds.is_on(Indicator::Led1));
    assert!(!leds.is_on(Indicator::Led2));
}

// =============================================================================
// Streaming Tests
// =============================================================================

#[test]
fn streaming_follows_stick_changes() {
    let (mut link, mut radio, clock, mut leds) = bound_nrf24();
    link.poll(&mut radio, &clock, &mut leds);

    radio.arrive(&[0xFF, 0x00, 0, 0xFF, 0x00, 0, 0, 0x01, 0]);
    assert_eq!(link.poll(&mut radio, &clock, &mut leds), LinkEvent::Frame);
    assert_eq!(link.commands()[Channel::Throttle], 1000);
    assert_eq!(link.commands()[Channel::Yaw], -500);
    assert_eq!(link.commands()[Channel::Pitch], 500);
    assert_eq!(link.commands()[Channel::Roll], -500);
    assert_eq!(link.commands()[Channel::Aux1], 500);
}

#[test]
fn idle_streaming_poll_is_status_only() {
    let (mut link, mut radio, clock, mut leds) = bound_nrf24();
    link.poll(&mut radio, &clock, &mut leds);
    radio.clear_ops();

    assert_eq!(link.poll(&mut radio, &clock, &mut leds), LinkEvent::Idle);
    assert_eq!(radio.ops(), &[TransportOp::Status]);
}

// =============================================================================
// Failsafe Tests
// =============================================================================

#[test]
fn failsafe_expires_without_frames() {
    let (mut link, _radio, _clock, _leds) = bound_nrf24();
    for _ in 1..FAILSAFE_LIMIT {
        assert!(!link.tick_failsafe());
    }
    assert!(link.tick_failsafe());
    assert!(link.tick_failsafe());
}

#[test]
fn frame_resets_failsafe() {
    let (mut link, mut radio, clock, mut leds) = bound_nrf24();
    for _ in 0..FAILSAFE_LIMIT {
        link.tick_failsafe();
    }
    assert!(link.failsafe().is_expired(FAILSAFE_LIMIT));

    link.poll(&mut radio, &clock, &mut leds);
    assert_eq!(link.failsafe().count(), 0);
}
