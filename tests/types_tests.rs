//! Types Module Tests
//!
//! Tests for domain types (RadioAddress, Payload, ChannelCommands, etc.)
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test types_tests

use cx10_rx::types::{
    BindState, Channel, ChannelCommands, ChipVariant, FailsafeCounter, Payload, RadioAddress,
};

// =============================================================================
// RadioAddress Tests
// =============================================================================

#[test]
fn bind_addresses_per_variant() {
    assert_eq!(RadioAddress::BIND_NRF24.as_bytes(), &[0x65; 5]);
    assert_eq!(RadioAddress::BIND_XN297.as_bytes(), &[0xCC; 5]);
    assert_eq!(ChipVariant::Nrf24.bind_address(), RadioAddress::BIND_NRF24);
    assert_eq!(ChipVariant::Xn297.bind_address(), RadioAddress::BIND_XN297);
}

#[test]
fn command_address_from_broadcast() {
    let payload = Payload::new([0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99]);
    let addr = RadioAddress::command_from_payload(&payload);
    assert_eq!(addr.as_bytes(), &[0x11, 0x22, 0x33, 0x44, 0xC1]);
}

#[test]
fn command_address_ignores_tail_bytes() {
    let a = Payload::new([1, 2, 3, 4, 0, 0, 0, 0, 0]);
    let b = Payload::new([1, 2, 3, 4, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(
        RadioAddress::command_from_payload(&a),
        RadioAddress::command_from_payload(&b)
    );
}

#[test]
fn address_debug_is_hex() {
    let addr = RadioAddress::new([0x0A, 0x1B, 0x2C, 0x3D, 0xC1]);
    assert_eq!(format!("{addr:?}"), "RadioAddress(0A:1B:2C:3D:C1)");
}

// =============================================================================
// Payload Tests
// =============================================================================

#[test]
fn payload_len_matches_config() {
    assert_eq!(Payload::LEN, 9);
    assert_eq!(Payload::default().as_bytes(), &[0; 9]);
}

#[test]
fn payload_byte_access() {
    let mut payload = Payload::default();
    payload.as_mut_bytes()[7] = 0x0F;
    assert_eq!(payload.byte(7), 0x0F);
    assert_eq!(payload.byte(0), 0);
}

// =============================================================================
// Channel / ChannelCommands Tests
// =============================================================================

#[test]
fn channel_order_fixed() {
    assert_eq!(
        Channel::ALL,
        [
            Channel::Throttle,
            Channel::Roll,
            Channel::Pitch,
            Channel::Yaw,
            Channel::Aux1,
            Channel::Aux2,
        ]
    );
    assert_eq!(Channel::Throttle.index(), 0);
    assert_eq!(Channel::Aux2.index(), 5);
}

#[test]
fn commands_start_zeroed() {
    let commands = ChannelCommands::new();
    assert_eq!(commands.as_array(), &[0; 6]);
}

#[test]
fn commands_index_by_channel() {
    let mut commands = ChannelCommands::new();
    commands[Channel::Yaw] = -123;
    commands.set(Channel::Aux1, 500);
    assert_eq!(commands.get(Channel::Yaw), -123);
    assert_eq!(commands[Channel::Aux1], 500);
    assert_eq!(commands.as_array()[3], -123);
}

#[test]
fn command_ranges() {
    assert_eq!(ChannelCommands::THROTTLE_MIN, 0);
    assert_eq!(ChannelCommands::THROTTLE_MAX, 1000);
    assert_eq!(ChannelCommands::AXIS_LIMIT, 500);
    assert_eq!(ChannelCommands::AUX_LIMIT, 500);
}

// =============================================================================
// FailsafeCounter Tests
// =============================================================================

#[test]
fn failsafe_counts_and_expires() {
    let mut counter = FailsafeCounter::new();
    for _ in 0..99 {
        counter.tick();
    }
    assert!(!counter.is_expired(100));
    counter.tick();
    assert!(counter.is_expired(100));
}

#[test]
fn failsafe_reset_clears() {
    let mut counter = FailsafeCounter::new();
    counter.tick();
    counter.tick();
    counter.reset();
    assert_eq!(counter.count(), 0);
}

// =============================================================================
// ChipVariant / BindState Tests
// =============================================================================

#[test]
fn register_range_per_variant() {
    assert_eq!(ChipVariant::Nrf24.last_register(), 0x1D);
    assert_eq!(ChipVariant::Xn297.last_register(), 0x1F);
}

#[test]
fn bind_state_starts_waiting() {
    assert_eq!(BindState::default(), BindState::WaitingBroadcast);
}
