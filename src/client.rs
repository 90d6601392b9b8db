use core::time::Duration;
#[cfg(feature = "serial2")]
use std::path::Path;

use log::{debug, trace};

use crate::dispatch::{Dispatch, Dispatcher};
use crate::error::{ReadError, Timeout, TransferError, WriteError};
use crate::frame::{Frame, FrameReader};
use crate::response::Reply;
use crate::types::Event;

/// The default reply timeout.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Worst-case duration of one inventory round, used to scale inventory deadlines.
pub(crate) const INVENTORY_ROUND_TIME: Duration = Duration::from_millis(255);

/// Extra sleep per power-save level and round during session inventories.
pub(crate) const POWERSAVE_STEP_TIME: Duration = Duration::from_millis(64);

macro_rules! make_client_struct {
	($($DefaultSerialPort:ty)?) => {
		/// Client for a UHF RFID reader on a serial bus.
		///
		/// The client owns the serial port and drives the whole exchange from
		/// the calling thread: each command method writes one frame, then
		/// pumps inbound bytes until the reply arrives or the deadline fires.
		/// Unsolicited tag sightings are delivered to the callback of the
		/// inventory command they belong to, in wire order.
		///
		/// If the `"serial2"` feature is enabled, the `SerialPort` generic type
		/// argument defaults to [`serial2::SerialPort`]. If it is not enabled,
		/// the `SerialPort` argument must always be specified.
		pub struct Client<SerialPort $(= $DefaultSerialPort)?>
		where
			SerialPort: crate::SerialPort,
		{
			pub(crate) serial_port: SerialPort,
			pub(crate) frames: FrameReader,
			pub(crate) dispatcher: Dispatcher<SerialPort::Instant>,
		}
	};
}

#[cfg(feature = "serial2")]
make_client_struct!(serial2::SerialPort);

#[cfg(not(feature = "serial2"))]
make_client_struct!();

impl<SerialPort> core::fmt::Debug for Client<SerialPort>
where
	SerialPort: crate::SerialPort + core::fmt::Debug,
{
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Client")
			.field("serial_port", &self.serial_port)
			.field("address", &self.dispatcher.address())
			.finish_non_exhaustive()
	}
}

#[cfg(feature = "serial2")]
impl Client<serial2::SerialPort> {
	/// Open a serial port and create a client for the reader at `address`.
	///
	/// Most readers ship configured for address `0x01` and 115200 baud.
	/// Use [`crate::catalog::BROADCAST_ADDRESS`] to accept replies from any peer.
	pub fn open(path: impl AsRef<Path>, baud_rate: u32, address: u8) -> std::io::Result<Self> {
		let serial_port = serial2::SerialPort::open(path, baud_rate)?;
		Ok(Self::new(serial_port, address))
	}
}

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Create a new client for an open serial port.
	///
	/// The serial port must already be configured in raw mode with the correct
	/// baud rate, character size (8), parity (disabled) and stop bits (1).
	pub fn new(serial_port: SerialPort, address: u8) -> Self {
		Self {
			serial_port,
			frames: FrameReader::new(),
			dispatcher: Dispatcher::new(address),
		}
	}

	/// Get a reference to the underlying serial port.
	///
	/// Note that reading or writing the serial port directly may disrupt
	/// communication with the reader.
	pub fn serial_port(&self) -> &SerialPort {
		&self.serial_port
	}

	/// Consume the client to get ownership of the serial port.
	///
	/// This discards any partially received frames.
	pub fn into_serial_port(self) -> SerialPort {
		self.serial_port
	}

	/// The peer address this client targets.
	pub fn address(&self) -> u8 {
		self.dispatcher.address()
	}

	/// Drop all host-side state: buffered bytes, pending commands, accumulated
	/// records and the phase-mode flag.
	pub(crate) fn reset_state(&mut self) -> Result<(), SerialPort::Error> {
		self.frames.clear();
		self.dispatcher.reset();
		self.serial_port.discard_input_buffer()
	}

	/// Write a command frame without registering a pending reply.
	///
	/// Only used for commands that are never answered.
	pub(crate) fn send_only(&mut self, command: u8, payload: &[u8]) -> Result<(), WriteError<SerialPort::Error>> {
		let frame = Frame::build(self.dispatcher.address(), command, payload);
		trace!("sending frame: {:02X?}", frame.as_bytes());
		self.serial_port.write_all(frame.as_bytes()).map_err(WriteError::Write)
	}

	/// Send a command and await its reply with the default timeout.
	pub(crate) fn transfer(&mut self, command: u8, payload: &[u8]) -> Result<Reply, TransferError<SerialPort::Error>> {
		self.transfer_timeout(command, payload, DEFAULT_TIMEOUT)
	}

	/// Send a command and await its reply, dropping unsolicited events.
	pub(crate) fn transfer_timeout(
		&mut self,
		command: u8,
		payload: &[u8],
		timeout: Duration,
	) -> Result<Reply, TransferError<SerialPort::Error>> {
		self.transfer_with_events(command, payload, timeout, &mut |event| {
			debug!("ignoring unsolicited event: {:?}", event);
		})
	}

	/// Send a command, deliver events to `on_event`, and await the terminating reply.
	///
	/// Tag sightings refresh the pending deadline inside the dispatcher, so a
	/// long inventory does not time out while tags keep arriving. If the
	/// pending entry is destroyed by resynchronization, the pump keeps going
	/// until the last known deadline and then fails with a timeout.
	pub(crate) fn transfer_with_events(
		&mut self,
		command: u8,
		payload: &[u8],
		timeout: Duration,
		on_event: &mut dyn FnMut(Event),
	) -> Result<Reply, TransferError<SerialPort::Error>> {
		let frame = Frame::build(self.dispatcher.address(), command, payload);
		trace!("sending frame: {:02X?}", frame.as_bytes());
		self.serial_port.write_all(frame.as_bytes()).map_err(WriteError::Write)?;

		let mut deadline = self.serial_port.make_deadline(timeout);
		let token = self.dispatcher.register(command, deadline);

		let mut chunk = [0u8; 256];
		loop {
			while let Some(frame) = self.frames.next_frame() {
				let refreshed = self.serial_port.make_deadline(DEFAULT_TIMEOUT);
				match self.dispatcher.process(&frame, refreshed) {
					Dispatch::None => (),
					Dispatch::Event(event) => on_event(event),
					Dispatch::Resolved { token: resolved, reply } => {
						if resolved == token {
							return Ok(reply);
						}
						debug!("discarding reply to abandoned command {:#04X}", reply.command);
					},
				}
			}

			if let Some(refreshed) = self.dispatcher.deadline(token) {
				deadline = refreshed;
			}

			match self.serial_port.read(&mut chunk, &deadline) {
				Ok(0) => (),
				Ok(count) => self.frames.push(&chunk[..count]),
				Err(e) if SerialPort::is_timeout_error(&e) => {
					self.dispatcher.abandon(token);
					return Err(Timeout { command }.into());
				},
				Err(e) => {
					self.dispatcher.abandon(token);
					return Err(ReadError::Io(e).into());
				},
			}
		}
	}

	/// Send a command and require a successful reply, discarding its payload.
	pub(crate) fn command_ok(&mut self, command: u8, payload: &[u8]) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_reply(command, payload)?;
		Ok(())
	}

	/// Send a command and require a successful reply.
	pub(crate) fn command_reply(&mut self, command: u8, payload: &[u8]) -> Result<Reply, TransferError<SerialPort::Error>> {
		Ok(self.transfer(command, payload)?.require_success()?)
	}
}
