//! Reply payload parsing.
//!
//! The record parsers in this module are shared between the dispatcher, which
//! uses them to accumulate multi-frame replies, and the command layer, which
//! consumes the accumulated records. Malformed records are rejected with a
//! debug log and the frame is dropped; integrity warnings (tag CRC or PC
//! length mismatches) are logged but the record is still reported, since the
//! firmware is known to emit benign mismatches on edge reads.

use log::{debug, warn};

use crate::catalog::{command_id, error_code};
use crate::checksum::tag_crc;
use crate::endian::read_u16_be;
use crate::error::ReaderError;
use crate::types::{BufferedTag, InventoryTag, MemoryBank, PcWord, ReadRecord, Tag6b, TagMaskEntry, TagOpRecord};

/// The fixed offset added to the 7-bit raw RSSI field to obtain dBm.
pub const RSSI_OFFSET_DBM: i16 = -129;

/// A classified reply to a solicited command.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Reply {
	/// The peer address the reply came from.
	pub address: u8,

	/// The command code the reply answers.
	pub command: u8,

	/// The error code, when the reply was classified as error-coded.
	pub error_code: Option<u8>,

	/// The payload after the error code (if any) was split off.
	pub data: Vec<u8>,

	/// Accumulated records for multi-frame replies.
	pub records: Records,
}

/// The accumulated records drained into a resolved [`Reply`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Records {
	None,
	Buffered(Vec<BufferedTag>),
	Read(Vec<ReadRecord>),
	TagOps(Vec<TagOpRecord>),
	Masks(Vec<TagMaskEntry>),
}

impl Reply {
	/// Did the reader report success?
	///
	/// A reply without an error code is a success, as is an explicit
	/// `SUCCESS` code. `BUFFER_IS_EMPTY` counts as success only for
	/// `GET_AND_RESET_INVENTORY_BUFFER`, where an empty buffer is a normal
	/// outcome rather than a failure.
	pub fn success(&self) -> bool {
		match self.error_code {
			None => true,
			Some(error_code::SUCCESS) => true,
			Some(error_code::BUFFER_IS_EMPTY) => self.command == command_id::GET_AND_RESET_INVENTORY_BUFFER,
			Some(_) => false,
		}
	}

	/// Turn an error-coded reply into a [`ReaderError`].
	pub fn require_success(self) -> Result<Self, ReaderError> {
		if self.success() {
			Ok(self)
		} else {
			Err(ReaderError {
				command: self.command,
				// success() returned false, so the code is present.
				code: self.error_code.unwrap_or(error_code::FAIL),
			})
		}
	}
}

/// Compute a 1-based antenna port from the low bits of `pack` and the high bit of `neighbor`.
fn antenna_port(pack: u8, neighbor: u8) -> u8 {
	(pack & 0x03) + ((neighbor >> 7) << 2) + 1
}

/// Warn when the PC word disagrees with the actual EPC length.
fn check_pc_length(pc: u16, epc: &[u8]) {
	let claimed = PcWord::new(pc).epc_len();
	if claimed != epc.len() {
		warn!(
			"PC word {:#06X} claims a {} byte EPC but the record carries {} bytes; reporting the tag anyway",
			pc,
			claimed,
			epc.len()
		);
	}
}

/// Warn when the reported tag CRC does not match the PC + EPC bytes.
fn check_tag_crc(pc_epc: &[u8], reported: u16) {
	let computed = tag_crc(pc_epc);
	if computed != reported {
		warn!(
			"tag CRC mismatch: computed {:#06X}, reported {:#06X}; reporting the tag anyway",
			computed, reported
		);
	}
}

/// Parse a real-time, session or fast-switch inventory sighting.
///
/// The first byte packs the low antenna bits and the frequency index, the
/// byte before the (optional) phase angle packs the raw RSSI with the high
/// antenna bit. With phase reporting active the payload ends with a 16 bit
/// phase angle and the EPC and RSSI positions shift forward by two.
pub(crate) fn parse_inventory_tag(data: &[u8], phase_mode: bool) -> Option<InventoryTag> {
	let phase_offset = if phase_mode { 2 } else { 0 };
	if data.len() < 4 + phase_offset {
		debug!("dropping {} byte inventory sighting, too short", data.len());
		return None;
	}

	let rssi_index = data.len() - 1 - phase_offset;
	let raw_rssi = data[rssi_index];
	let pc = read_u16_be(&data[1..]);
	let epc = &data[3..rssi_index];
	check_pc_length(pc, epc);

	Some(InventoryTag {
		antenna: antenna_port(data[0], raw_rssi),
		frequency: data[0] >> 2,
		pc,
		epc: epc.to_vec(),
		rssi_dbm: i16::from(raw_rssi & 0x7F) + RSSI_OFFSET_DBM,
		phase: phase_mode.then(|| read_u16_be(&data[data.len() - 2..])),
	})
}

/// Parse an ISO 18000-6B tag sighting (a 9 byte payload: antenna + UID).
pub(crate) fn parse_tag_6b(data: &[u8]) -> Option<Tag6b> {
	if data.len() != 9 {
		debug!("dropping {} byte 6B sighting, expected 9", data.len());
		return None;
	}
	let mut uid = [0u8; 8];
	uid.copy_from_slice(&data[1..9]);
	Some(Tag6b {
		antenna: data[0] + 1,
		uid,
	})
}

/// Parse one record of an inventory buffer dump.
///
/// Returns the total record count announced by the frame and the decoded tag.
pub(crate) fn parse_buffered_record(data: &[u8]) -> Option<(u16, BufferedTag)> {
	if data.len() < 10 {
		debug!("dropping {} byte inventory buffer record, too short", data.len());
		return None;
	}
	let expected = read_u16_be(data);
	let record_len = usize::from(data[2]);
	if record_len != data.len() - 6 {
		debug!(
			"inventory buffer record length byte is {} but the frame implies {}",
			record_len,
			data.len() - 6
		);
	}

	let pc_epc = &data[3..data.len() - 5];
	let crc = read_u16_be(&data[data.len() - 5..]);
	check_tag_crc(pc_epc, crc);
	let pc = read_u16_be(pc_epc);
	let epc = &pc_epc[2..];
	check_pc_length(pc, epc);

	let raw_rssi = data[data.len() - 3];
	let pack = data[data.len() - 2];
	Some((
		expected,
		BufferedTag {
			pc,
			epc: epc.to_vec(),
			crc,
			rssi_dbm: i16::from(raw_rssi & 0x7F) + RSSI_OFFSET_DBM,
			antenna: antenna_port(pack, raw_rssi),
			frequency: pack >> 2,
			count: data[data.len() - 1],
		},
	))
}

/// Parse one record of a read reply.
///
/// Shaped like a buffered record, with the data read from the tag inserted
/// between the tag CRC and the trailing length byte.
pub(crate) fn parse_read_record(data: &[u8]) -> Option<(u16, ReadRecord)> {
	if data.len() < 10 {
		debug!("dropping {} byte read record, too short", data.len());
		return None;
	}
	let read_len = usize::from(data[data.len() - 3]);
	if data.len() < 10 + read_len {
		debug!(
			"dropping read record: {} bytes cannot hold {} bytes of read data",
			data.len(),
			read_len
		);
		return None;
	}

	let epc_end = data.len() - 5 - read_len;
	let pc_epc = &data[3..epc_end];
	let crc = read_u16_be(&data[epc_end..]);
	check_tag_crc(pc_epc, crc);
	let pc = read_u16_be(pc_epc);
	let epc = &pc_epc[2..];
	check_pc_length(pc, epc);

	let pack = data[data.len() - 2];
	Some((
		read_u16_be(data),
		ReadRecord {
			pc,
			epc: epc.to_vec(),
			crc,
			data: data[epc_end + 2..epc_end + 2 + read_len].to_vec(),
			antenna: antenna_port(pack, 0),
			frequency: pack >> 2,
			count: data[data.len() - 1],
		},
	))
}

/// Parse one record of a write, lock or kill reply.
///
/// Shaped like a buffered record, with a per-tag result code in place of the RSSI.
pub(crate) fn parse_tag_op_record(data: &[u8]) -> Option<(u16, TagOpRecord)> {
	if data.len() < 10 {
		debug!("dropping {} byte tag operation record, too short", data.len());
		return None;
	}

	let pc_epc = &data[3..data.len() - 5];
	let crc = read_u16_be(&data[data.len() - 5..]);
	check_tag_crc(pc_epc, crc);
	let pc = read_u16_be(pc_epc);
	let epc = &pc_epc[2..];
	check_pc_length(pc, epc);

	let pack = data[data.len() - 2];
	Some((
		read_u16_be(data),
		TagOpRecord {
			pc,
			epc: epc.to_vec(),
			crc,
			error_code: data[data.len() - 3],
			antenna: antenna_port(pack, 0),
			frequency: pack >> 2,
			count: data[data.len() - 1],
		},
	))
}

/// Parse one record of a tag mask listing.
pub(crate) fn parse_mask_record(data: &[u8]) -> Option<(u16, TagMaskEntry)> {
	if data.len() < 9 {
		debug!("dropping {} byte tag mask record, too short", data.len());
		return None;
	}
	let bit_len = data[7];
	let mask_len = usize::from(bit_len).div_ceil(8);
	if data.len() != 9 + mask_len {
		debug!(
			"dropping tag mask record: {} mask bits do not fit a {} byte record",
			bit_len,
			data.len()
		);
		return None;
	}
	let bank = match MemoryBank::try_from(data[5]) {
		Ok(bank) => bank,
		Err(e) => {
			debug!("dropping tag mask record: {}", e);
			return None;
		},
	};

	Some((
		read_u16_be(data),
		TagMaskEntry {
			mask_id: data[2],
			target: data[3],
			action: data[4],
			bank,
			start_addr: data[6],
			bit_len,
			mask: data[8..8 + mask_len].to_vec(),
			truncate: data[8 + mask_len] != 0,
		},
	))
}
