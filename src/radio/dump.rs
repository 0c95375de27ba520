//! Register dump diagnostic
//!
//! Reads every single-byte register of the active chip and logs it. Only
//! the first byte of multi-byte registers (addresses, calibration) is shown.

use heapless::Vec;

use crate::hal::transport::Transport;
use crate::radio::registers::RESERVED_18;
use crate::types::ChipVariant;

/// Upper bound on the number of dumped registers
pub const MAX_DUMP: usize = 32;

/// Register / value pairs in address order
pub type RegisterDump = Vec<(u8, u8), MAX_DUMP>;

/// Read registers 0x00 up to the variant's last register, skipping 0x18
pub fn dump_registers<T: Transport>(transport: &mut T, variant: ChipVariant) -> RegisterDump {
    let mut dump = RegisterDump::new();
    for reg in (0..=variant.last_register()).filter(|&reg| reg != RESERVED_18) {
        let value = transport.read_register(reg);
        if dump.push((reg, value)).is_err() {
            break;
        }
    }
    dump
}

/// Dump and log at debug level
pub fn log_registers<T: Transport>(transport: &mut T, variant: ChipVariant) {
    let dump = dump_registers(transport, variant);
    debug!("{=str} register dump:", variant.name());
    for &(reg, value) in &dump {
        debug!("  {=u8:x} = {=u8:x}", reg, value);
    }
}
