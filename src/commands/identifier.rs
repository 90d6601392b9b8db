use crate::catalog::command_id;
use crate::error::{InvalidLength, InvalidReplyLength, TransferError};
use crate::Client;

/// The fixed size of the reader identifier.
pub const IDENTIFIER_LEN: usize = 12;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Store a 12 byte identifier in reader flash.
	pub fn set_identifier(&mut self, identifier: &[u8]) -> Result<(), TransferError<SerialPort::Error>> {
		InvalidLength::check("identifier", identifier.len(), IDENTIFIER_LEN)?;
		self.command_ok(command_id::SET_READER_IDENTIFIER, identifier)
	}

	/// Read the 12 byte identifier from reader flash.
	pub fn identifier(&mut self) -> Result<[u8; IDENTIFIER_LEN], TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_READER_IDENTIFIER, &[])?;
		InvalidReplyLength::check(reply.data.len(), IDENTIFIER_LEN)?;
		let mut identifier = [0u8; IDENTIFIER_LEN];
		identifier.copy_from_slice(&reply.data);
		Ok(identifier)
	}
}
