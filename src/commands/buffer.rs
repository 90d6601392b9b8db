use crate::catalog::command_id;
use crate::endian::read_u16_be;
use crate::error::{InvalidReplyLength, TransferError};
use crate::response::Records;
use crate::types::BufferedTag;
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Retrieve the tags accumulated by [`Client::buffered_inventory`].
	///
	/// With `reset` the buffer is cleared as it is read; an already empty
	/// buffer then yields an empty listing instead of an error.
	pub fn inventory_buffer(&mut self, reset: bool) -> Result<Vec<BufferedTag>, TransferError<SerialPort::Error>> {
		let command = if reset {
			command_id::GET_AND_RESET_INVENTORY_BUFFER
		} else {
			command_id::GET_INVENTORY_BUFFER
		};
		let reply = self.command_reply(command, &[])?;
		match reply.records {
			Records::Buffered(tags) => Ok(tags),
			_ => Ok(Vec::new()),
		}
	}

	/// The number of unique tags currently in the inventory buffer.
	pub fn inventory_buffer_tag_count(&mut self) -> Result<u16, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_INVENTORY_BUFFER_TAG_COUNT, &[])?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		Ok(read_u16_be(&reply.data))
	}

	/// Discard the contents of the inventory buffer.
	pub fn reset_inventory_buffer(&mut self) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::RESET_INVENTORY_BUFFER, &[])
	}
}
