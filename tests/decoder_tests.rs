//! Frame Decoder Tests
//!
//! Channel scaling, flip-event latching, and the steady-state poll.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test decoder_tests

use cx10_rx::hal::mock::{MockTransport, TransportOp};
use cx10_rx::radio::decoder::{
    axis_from_raw, decode_frame, throttle_from_raw, FlipEvent, FrameDecoder, PayloadLayout,
};
use cx10_rx::types::{Channel, ChannelCommands, FailsafeCounter, Payload};

/// Payload with the given throttle, yaw, pitch, roll and flags bytes
fn frame(throttle: u8, yaw: u8, pitch: u8, roll: u8, flags: u8) -> Payload {
    Payload::new([throttle, yaw, 0, pitch, roll, 0, 0, flags, 0])
}

fn decode(payload: &Payload, commands: &mut ChannelCommands) {
    decode_frame(payload, &PayloadLayout::CX10, commands);
}

// =============================================================================
// Throttle Tests
// =============================================================================

#[test]
fn throttle_extremes() {
    assert_eq!(throttle_from_raw(0x00), 0);
    // 1020 saturates to 1000
    assert_eq!(throttle_from_raw(0xFF), 1000);
}

#[test]
fn throttle_monotonic() {
    let values: Vec<i16> = (0..=u8::MAX).map(throttle_from_raw).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(throttle_from_raw(0x80), 512);
    assert_eq!(throttle_from_raw(0xFA), 1000);
}

// =============================================================================
// Axis Tests
// =============================================================================

#[test]
fn axis_mid_stick_offset() {
    // 0x40 << 2 = 256, minus 512
    assert_eq!(axis_from_raw(0x40), -256);
}

#[test]
fn axis_extremes_clamp() {
    assert_eq!(axis_from_raw(0x00), -500);
    assert_eq!(axis_from_raw(0xFF), 500);
}

#[test]
fn axis_range_bounded() {
    assert!((0..=u8::MAX)
        .map(axis_from_raw)
        .all(|v| (-500..=500).contains(&v)));
}

#[test]
fn axes_read_their_own_bytes() {
    let mut commands = ChannelCommands::new();
    decode(&frame(0x10, 0x00, 0x80, 0xFF, 0), &mut commands);
    assert_eq!(commands[Channel::Throttle], 64);
    assert_eq!(commands[Channel::Yaw], -500);
    assert_eq!(commands[Channel::Pitch], 0);
    assert_eq!(commands[Channel::Roll], 500);
}

// =============================================================================
// Flip Event Tests
// =============================================================================

#[test]
fn no_flip_flag_leaves_aux1() {
    let mut commands = ChannelCommands::new();
    commands[Channel::Aux1] = 500;
    decode(&frame(0, 0, 0x05, 0, 0xF0), &mut commands);
    assert_eq!(commands[Channel::Aux1], 500);
}

#[test]
fn flip_forward_sets_aux1_high() {
    let mut commands = ChannelCommands::new();
    decode(&frame(0, 0, 0xF5, 0, 0x0F), &mut commands);
    assert_eq!(commands[Channel::Aux1], 500);
}

#[test]
fn flip_backward_sets_aux1_low() {
    let mut commands = ChannelCommands::new();
    decode(&frame(0, 0, 0x05, 0, 0x01), &mut commands);
    assert_eq!(commands[Channel::Aux1], -500);
}

#[test]
fn flip_dead_zone_keeps_aux1() {
    let mut commands = ChannelCommands::new();
    commands[Channel::Aux1] = -500;
    decode(&frame(0, 0, 0x80, 0, 0x01), &mut commands);
    assert_eq!(commands[Channel::Aux1], -500);
}

#[test]
fn flip_thresholds_exclusive() {
    let layout = PayloadLayout::CX10;
    assert_eq!(
        FlipEvent::from_payload(&frame(0, 0, 0xF0, 0, 1), &layout),
        Some(FlipEvent::Undetermined)
    );
    assert_eq!(
        FlipEvent::from_payload(&frame(0, 0, 0x0F, 0, 1), &layout),
        Some(FlipEvent::Undetermined)
    );
    assert_eq!(
        FlipEvent::from_payload(&frame(0, 0, 0xF1, 0, 1), &layout),
        Some(FlipEvent::Forward)
    );
    assert_eq!(
        FlipEvent::from_payload(&frame(0, 0, 0x0E, 0, 1), &layout),
        Some(FlipEvent::Backward)
    );
    assert_eq!(FlipEvent::from_payload(&frame(0, 0, 0xFF, 0, 0x10), &layout), None);
}

#[test]
fn aux2_never_written() {
    let mut commands = ChannelCommands::new();
    commands[Channel::Aux2] = 123;
    decode(&frame(0xFF, 0xFF, 0xFF, 0xFF, 0xFF), &mut commands);
    assert_eq!(commands[Channel::Aux2], 123);
}

// =============================================================================
// Decode Semantics Tests
// =============================================================================

#[test]
fn decode_is_idempotent() {
    let payload = frame(0x33, 0x44, 0xF8, 0x22, 0x03);
    let mut first = ChannelCommands::new();
    decode(&payload, &mut first);
    let mut second = first;
    decode(&payload, &mut second);
    assert_eq!(first, second);
}

#[test]
fn fresh_frame_overwrites_all_analog_channels() {
    let mut commands = ChannelCommands::new();
    decode(&frame(0xC0, 0xC0, 0xC0, 0xC0, 0), &mut commands);
    decode(&frame(0x10, 0x20, 0x30, 0x40, 0), &mut commands);
    assert_eq!(commands[Channel::Throttle], throttle_from_raw(0x10));
    assert_eq!(commands[Channel::Yaw], axis_from_raw(0x20));
    assert_eq!(commands[Channel::Pitch], axis_from_raw(0x30));
    assert_eq!(commands[Channel::Roll], axis_from_raw(0x40));
}

// =============================================================================
// Payload Layout Tests
// =============================================================================

#[test]
fn cx10_layout_positions() {
    let layout = PayloadLayout::CX10;
    assert_eq!(layout.throttle(), 0);
    assert_eq!(layout.yaw(), 1);
    assert_eq!(layout.pitch(), 3);
    assert_eq!(layout.roll(), 4);
    assert_eq!(layout.flags(), 7);
}

#[test]
fn custom_layout_reads_its_bytes() {
    let layout = PayloadLayout::new(8, 7, 6, 5, 0);
    let payload = Payload::new([0x01, 0, 0, 0, 0, 0xFF, 0xFF, 0x00, 0x10]);
    let mut commands = ChannelCommands::new();
    decode_frame(&payload, &layout, &mut commands);
    assert_eq!(commands[Channel::Throttle], 64);
    assert_eq!(commands[Channel::Yaw], -500);
    assert_eq!(commands[Channel::Pitch], 500);
    assert_eq!(commands[Channel::Roll], 500);
    assert_eq!(commands[Channel::Aux1], 500);
}

#[test]
#[should_panic(expected = "payload layout index out of range")]
fn layout_rejects_index_past_payload() {
    let _ = PayloadLayout::new(0, 1, 3, 4, Payload::LEN);
}

// =============================================================================
// FrameDecoder Poll Tests
// =============================================================================

#[test]
fn poll_without_data_does_nothing() {
    let mut radio = MockTransport::new();
    let mut decoder = FrameDecoder::default();
    let mut commands = ChannelCommands::new();
    let mut failsafe = FailsafeCounter::new();
    failsafe.tick();

    assert!(!decoder.poll(&mut radio, &mut commands, &mut failsafe));
    assert_eq!(failsafe.count(), 1);
    assert_eq!(radio.ops(), &[TransportOp::Status]);
}

#[test]
fn poll_decodes_and_resets_failsafe() {
    let mut radio = MockTransport::new();
    let mut decoder = FrameDecoder::default();
    let mut commands = ChannelCommands::new();
    let mut failsafe = FailsafeCounter::new();
    for _ in 0..50 {
        failsafe.tick();
    }

    radio.arrive(frame(0x80, 0x80, 0x80, 0x80, 0).as_bytes());
    assert!(decoder.poll(&mut radio, &mut commands, &mut failsafe));
    assert_eq!(failsafe.count(), 0);
    assert_eq!(commands[Channel::Throttle], 512);
    assert_eq!(decoder.frames(), 1);
}

#[test]
fn poll_reads_flushes_clears() {
    let mut radio = MockTransport::new();
    let mut decoder = FrameDecoder::default();
    let mut commands = ChannelCommands::new();
    let mut failsafe = FailsafeCounter::new();

    radio.arrive(&[0; 9]);
    decoder.poll(&mut radio, &mut commands, &mut failsafe);
    assert_eq!(
        radio.ops(),
        &[
            TransportOp::Status,
            TransportOp::ReadPayload(9),
            TransportOp::FlushRx,
            TransportOp::WriteRegister(0x07, 0x70),
        ]
    );
}

#[test]
fn poll_drops_backlog() {
    let mut radio = MockTransport::new();
    let mut decoder = FrameDecoder::default();
    let mut commands = ChannelCommands::new();
    let mut failsafe = FailsafeCounter::new();

    radio.arrive(frame(0x10, 0, 0, 0, 0).as_bytes());
    radio.arrive(frame(0x20, 0, 0, 0, 0).as_bytes());
    assert!(decoder.poll(&mut radio, &mut commands, &mut failsafe));
    assert_eq!(commands[Channel::Throttle], 64);
    assert_eq!(radio.rx_pending(), 0);
    assert!(!decoder.poll(&mut radio, &mut commands, &mut failsafe));
}

#[test]
fn aux1_sticky_across_frames() {
    let mut radio = MockTransport::new();
    let mut decoder = FrameDecoder::default();
    let mut commands = ChannelCommands::new();
    let mut failsafe = FailsafeCounter::new();

    radio.arrive(frame(0, 0, 0x02, 0, 0x0F).as_bytes());
    decoder.poll(&mut radio, &mut commands, &mut failsafe);
    radio.arrive(frame(0, 0, 0x80, 0, 0x00).as_bytes());
    decoder.poll(&mut radio, &mut commands, &mut failsafe);
    assert_eq!(commands[Channel::Aux1], -500);
}
