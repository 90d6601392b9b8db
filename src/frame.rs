//! Wire frame structure and the resynchronizing frame scanner.

use log::{debug, trace};

use crate::checksum::lrc;

/// Every frame starts with this byte.
///
/// The protocol has no byte-stuffing, so the header can also occur inside a
/// frame body; the scanner relies on the length byte and the LRC to reject
/// false starts.
pub(crate) const HEADER: u8 = 0xA0;

/// The smallest valid value of the length byte.
///
/// The length byte counts the address, command, payload and LRC bytes,
/// so the minimum covers an empty payload.
pub(crate) const MIN_LENGTH: u8 = 4;

/// A validated frame: `header | length | address | command | payload | lrc`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Frame {
	data: Vec<u8>,
}

impl Frame {
	/// Build a frame for transmission.
	///
	/// The payload must leave the length byte representable, so it can be at
	/// most 252 bytes. Command encoders never come close to that.
	pub fn build(address: u8, command: u8, payload: &[u8]) -> Self {
		debug_assert!(payload.len() <= 252);
		let mut data = Vec::with_capacity(payload.len() + 6);
		data.push(HEADER);
		data.push(payload.len() as u8 + 3);
		data.push(address);
		data.push(command);
		data.extend_from_slice(payload);
		data.push(lrc(&data));
		Self { data }
	}

	/// Wrap bytes that have already been validated by the scanner.
	fn from_valid(data: Vec<u8>) -> Self {
		debug_assert!(data.len() >= usize::from(MIN_LENGTH) + 2);
		debug_assert!(data[0] == HEADER);
		debug_assert!(usize::from(data[1]) + 2 == data.len());
		debug_assert!(lrc(&data[..data.len() - 1]) == data[data.len() - 1]);
		Self { data }
	}

	/// The value of the length byte.
	pub fn length(&self) -> u8 {
		self.data[1]
	}

	/// The peer address byte.
	pub fn address(&self) -> u8 {
		self.data[2]
	}

	/// The command code.
	pub fn command(&self) -> u8 {
		self.data[3]
	}

	/// The payload between the command code and the LRC.
	pub fn payload(&self) -> &[u8] {
		&self.data[4..self.data.len() - 1]
	}

	/// The raw bytes of the frame, including header and LRC.
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}
}

/// Incremental scanner that extracts validated frames from a byte stream.
///
/// Bytes are fed in arbitrary chunks with [`FrameReader::push`] and complete
/// frames are taken out with [`FrameReader::next_frame`]. Garbage between
/// frames, impossible length bytes and LRC failures are skipped: after a
/// rejected candidate the scanner resumes directly after the header byte, so
/// a frame whose body happens to contain `0xA0` cannot swallow its successor.
#[derive(Debug, Default)]
pub(crate) struct FrameReader {
	buffer: Vec<u8>,
}

impl FrameReader {
	pub fn new() -> Self {
		Self { buffer: Vec::new() }
	}

	/// Feed a chunk of bytes from the serial port.
	pub fn push(&mut self, bytes: &[u8]) {
		self.buffer.extend_from_slice(bytes);
	}

	/// Discard all buffered bytes.
	pub fn clear(&mut self) {
		self.buffer.clear();
	}

	/// Extract the next complete, LRC-valid frame from the buffer.
	///
	/// Returns [`None`] when the buffer holds no complete frame yet.
	pub fn next_frame(&mut self) -> Option<Frame> {
		loop {
			match self.buffer.iter().position(|&byte| byte == HEADER) {
				Some(0) => (),
				Some(garbage) => {
					debug!("skipping {} bytes of leading garbage", garbage);
					self.buffer.drain(..garbage);
				},
				None => {
					if !self.buffer.is_empty() {
						debug!("skipping {} bytes without frame header", self.buffer.len());
						self.buffer.clear();
					}
					return None;
				},
			}

			if self.buffer.len() < 2 {
				return None;
			}

			let length = self.buffer[1];
			if length < MIN_LENGTH {
				debug!("dropping frame candidate with impossible length byte {}", length);
				self.buffer.drain(..1);
				continue;
			}

			let total = usize::from(length) + 2;
			if self.buffer.len() < total {
				return None;
			}

			let computed = lrc(&self.buffer[..total - 1]);
			let received = self.buffer[total - 1];
			if computed != received {
				debug!(
					"dropping frame candidate with LRC mismatch: computed {:#04X}, received {:#04X}",
					computed, received
				);
				self.buffer.drain(..1);
				continue;
			}

			let data: Vec<u8> = self.buffer.drain(..total).collect();
			trace!("read frame: {:02X?}", data);
			return Some(Frame::from_valid(data));
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, let_assert};

	fn frame_bytes(address: u8, command: u8, payload: &[u8]) -> Vec<u8> {
		Frame::build(address, command, payload).as_bytes().to_vec()
	}

	#[test]
	fn test_build_frame() {
		let frame = Frame::build(0xFF, 0x70, &[]);
		assert!(frame.as_bytes() == [0xA0, 0x03, 0xFF, 0x70, 0xEE]);
		assert!(frame.length() == 0x03);
		assert!(frame.address() == 0xFF);
		assert!(frame.command() == 0x70);
		assert!(frame.payload().is_empty());
	}

	#[test]
	fn test_build_frame_with_payload() {
		let frame = Frame::build(0x01, 0x74, &[0x01]);
		let bytes = frame.as_bytes();
		assert!(bytes[0] == 0xA0);
		assert!(bytes[1] == 0x04);
		assert!(bytes.len() == 6);
		assert!(lrc(&bytes[..5]) == bytes[5]);
		assert!(frame.payload() == [0x01]);
	}

	#[test]
	fn test_scan_whole_frame() {
		let mut reader = FrameReader::new();
		reader.push(&frame_bytes(0x01, 0x72, &[0x03, 0x01]));
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.command() == 0x72);
		assert!(frame.payload() == [0x03, 0x01]);
		assert!(reader.next_frame().is_none());
	}

	#[test]
	fn test_scan_split_chunks() {
		let mut reader = FrameReader::new();
		let bytes = frame_bytes(0x01, 0x72, &[0x03, 0x01]);
		for chunk in bytes.chunks(1) {
			assert!(reader.next_frame().is_none());
			reader.push(chunk);
		}
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.command() == 0x72);
	}

	#[test]
	fn test_scan_skips_garbage() {
		let mut reader = FrameReader::new();
		reader.push(&[0x00, 0x13, 0x37]);
		reader.push(&frame_bytes(0x01, 0x75, &[0x00]));
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.command() == 0x75);
	}

	#[test]
	fn test_scan_recovers_from_bad_lrc() {
		let mut reader = FrameReader::new();
		let mut corrupt = frame_bytes(0x01, 0x75, &[0x00]);
		*corrupt.last_mut().unwrap() ^= 0xFF;
		reader.push(&corrupt);
		reader.push(&frame_bytes(0x01, 0x72, &[0x03, 0x01]));
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.command() == 0x72);
		assert!(reader.next_frame().is_none());
	}

	#[test]
	fn test_scan_rejects_impossible_length() {
		let mut reader = FrameReader::new();
		// Header followed by a length byte below the minimum.
		reader.push(&[0xA0, 0x02, 0xA0, 0x01]);
		reader.push(&frame_bytes(0x01, 0x72, &[0x03, 0x01]));
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.command() == 0x72);
	}

	#[test]
	fn test_scan_back_to_back_frames() {
		let mut reader = FrameReader::new();
		let mut bytes = frame_bytes(0x01, 0x75, &[0x00]);
		bytes.extend(frame_bytes(0x01, 0x7B, &[0x01, 0x23]));
		reader.push(&bytes);
		let_assert!(Some(first) = reader.next_frame());
		let_assert!(Some(second) = reader.next_frame());
		assert!(first.command() == 0x75);
		assert!(second.command() == 0x7B);
		assert!(reader.next_frame().is_none());
	}

	#[test]
	fn test_scan_header_in_body_does_not_desync() {
		// A frame whose payload contains the header byte, split mid-frame.
		let mut reader = FrameReader::new();
		let bytes = frame_bytes(0x01, 0x79, &[0xA0, 0x04, 0x01]);
		reader.push(&bytes[..3]);
		assert!(reader.next_frame().is_none());
		reader.push(&bytes[3..]);
		let_assert!(Some(frame) = reader.next_frame());
		assert!(frame.payload() == [0xA0, 0x04, 0x01]);
	}
}
