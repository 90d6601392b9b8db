use crate::catalog::command_id;
use crate::error::{InvalidReplyLength, ReadError, TransferError, ValueOutOfRange, WriteError};
use crate::types::BaudRate;
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Reboot the reader.
	///
	/// The reader restarts without replying, so this command succeeds as soon
	/// as the frame is written. All host-side state is dropped: anything the
	/// reader still had in flight is stale after the reboot.
	pub fn reset(&mut self) -> Result<(), TransferError<SerialPort::Error>> {
		self.send_only(command_id::RESET, &[])?;
		self.reset_state().map_err(WriteError::DiscardBuffer)?;
		Ok(())
	}

	/// Change the UART baud rate of the reader.
	///
	/// The new rate is persisted in reader flash. On success the local serial
	/// port is reconfigured to match and all host-side state is dropped.
	pub fn set_baud_rate(&mut self, baud_rate: BaudRate) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_UART_BAUD_RATE, &[baud_rate.into()])?;
		self.serial_port
			.set_baud_rate(baud_rate.bits_per_second())
			.map_err(ReadError::Io)?;
		self.reset_state().map_err(WriteError::DiscardBuffer)?;
		Ok(())
	}

	/// Get the firmware version of the reader as `(major, minor)`.
	pub fn firmware_version(&mut self) -> Result<(u8, u8), TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_FIRMWARE_VERSION, &[])?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		Ok((reply.data[0], reply.data[1]))
	}

	/// Change the address of the reader and retarget this client to it.
	///
	/// The broadcast address `0xFF` cannot be assigned to a reader.
	pub fn set_address(&mut self, address: u8) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("reader address", address.into(), 0, 0xFE)?;
		self.command_ok(command_id::SET_READER_ADDRESS, &[address])?;
		self.dispatcher.set_address(address);
		Ok(())
	}
}
