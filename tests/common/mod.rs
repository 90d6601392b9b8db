// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use indy_reader::checksum::lrc;
use indy_reader::SerialPort;

/// An in-memory serial port with scripted replies.
///
/// Replies are queued into the read buffer before the command is issued;
/// everything the client writes is captured for inspection.
#[derive(Default, Clone)]
pub struct MockSerialPort {
	pub read_buffer: Arc<Mutex<VecDeque<u8>>>,
	pub write_buffer: Arc<Mutex<VecDeque<u8>>>,
	pub baud_rate: Arc<Mutex<u32>>,
}

impl MockSerialPort {
	pub fn new(baud_rate: u32) -> Self {
		Self {
			read_buffer: Arc::new(Mutex::new(VecDeque::new())),
			write_buffer: Arc::new(Mutex::new(VecDeque::new())),
			baud_rate: Arc::new(Mutex::new(baud_rate)),
		}
	}

	/// Queue raw bytes for the client to read.
	pub fn queue_bytes(&self, bytes: &[u8]) {
		self.read_buffer.lock().unwrap().extend(bytes.iter().copied());
	}

	/// Queue a well-formed reply frame for the client to read.
	pub fn queue_frame(&self, address: u8, command: u8, payload: &[u8]) {
		self.queue_bytes(&frame(address, command, payload));
	}

	/// Take all bytes the client has written so far.
	pub fn written(&self) -> Vec<u8> {
		self.write_buffer.lock().unwrap().drain(..).collect()
	}

	pub fn current_baud_rate(&self) -> u32 {
		*self.baud_rate.lock().unwrap()
	}
}

/// Build a complete frame with a valid LRC.
pub fn frame(address: u8, command: u8, payload: &[u8]) -> Vec<u8> {
	let mut data = vec![0xA0, payload.len() as u8 + 3, address, command];
	data.extend_from_slice(payload);
	data.push(lrc(&data));
	data
}

impl SerialPort for MockSerialPort {
	type Error = std::io::Error;

	type Instant = std::time::Instant;

	fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
		*self.baud_rate.lock().unwrap() = baud_rate;
		Ok(())
	}

	fn discard_input_buffer(&mut self) -> Result<(), Self::Error> {
		self.read_buffer.lock().unwrap().clear();
		Ok(())
	}

	fn read(&mut self, buffer: &mut [u8], deadline: &Self::Instant) -> Result<usize, Self::Error> {
		loop {
			{
				let mut data = self.read_buffer.lock().unwrap();
				if !data.is_empty() {
					let len = buffer.len().min(data.len());
					for (slot, byte) in buffer[..len].iter_mut().zip(data.drain(..len)) {
						*slot = byte;
					}
					return Ok(len);
				}
			}
			if Instant::now() > *deadline {
				return Err(std::io::ErrorKind::TimedOut.into());
			}
			std::thread::sleep(Duration::from_millis(1));
		}
	}

	fn write_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
		self.write_buffer.lock().unwrap().extend(buffer.iter().copied());
		Ok(())
	}

	fn make_deadline(&self, timeout: Duration) -> Self::Instant {
		Instant::now() + timeout
	}

	fn is_timeout_error(error: &Self::Error) -> bool {
		error.kind() == std::io::ErrorKind::TimedOut
	}
}
