use crate::catalog::command_id;
use crate::error::{InvalidLength, InvalidReplyLength, InvalidValue, TransferError, ValueOutOfRange};
use crate::response::Records;
use crate::types::{LockBank, LockType, MemoryBank, ReadRecord, TagOpRecord};
use crate::Client;

/// An access or kill password, most significant byte first.
pub type Password = [u8; 4];

/// A password of all zeroes, accepted by tags without a configured password.
pub const NO_PASSWORD: Password = [0; 4];

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Read words from a memory bank of every tag matching the active EPC
	/// match and tag masks.
	///
	/// Returns one record per responding tag.
	pub fn read_tags(
		&mut self,
		bank: MemoryBank,
		word_address: u8,
		word_count: u8,
	) -> Result<Vec<ReadRecord>, TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("word count", word_count.into(), 1, 127)?;
		let reply = self.command_reply(command_id::READ, &[bank.into(), word_address, word_count])?;
		match reply.records {
			Records::Read(records) => Ok(records),
			_ => Ok(Vec::new()),
		}
	}

	/// Write data to a memory bank of every tag matching the active EPC match
	/// and tag masks.
	///
	/// Odd-length data is zero-padded to a whole number of 16 bit words.
	/// `block` selects the newer block-write command, which most tags accept;
	/// disable it for tags that only implement the original word write.
	pub fn write_tags(
		&mut self,
		bank: MemoryBank,
		word_address: u8,
		data: &[u8],
		password: Password,
		block: bool,
	) -> Result<Vec<TagOpRecord>, TransferError<SerialPort::Error>> {
		InvalidLength::check_range("write data", data.len(), 1, 244)?;

		let mut padded = data.to_vec();
		if padded.len() % 2 != 0 {
			padded.push(0x00);
		}

		let mut payload = Vec::with_capacity(7 + padded.len());
		payload.extend_from_slice(&password);
		payload.push(bank.into());
		payload.push(word_address);
		payload.push((padded.len() / 2) as u8);
		payload.extend_from_slice(&padded);

		let command = if block { command_id::WRITE_BLOCK } else { command_id::WRITE };
		let reply = self.command_reply(command, &payload)?;
		match reply.records {
			Records::TagOps(records) => Ok(records),
			_ => Ok(Vec::new()),
		}
	}

	/// Apply a lock operation to a memory region of every matching tag.
	///
	/// Locking requires the tags' access password.
	pub fn lock_tags(
		&mut self,
		bank: LockBank,
		lock: LockType,
		password: Password,
	) -> Result<Vec<TagOpRecord>, TransferError<SerialPort::Error>> {
		let mut payload = Vec::with_capacity(6);
		payload.extend_from_slice(&password);
		payload.push(bank.into());
		payload.push(lock.into());
		let reply = self.command_reply(command_id::LOCK, &payload)?;
		match reply.records {
			Records::TagOps(records) => Ok(records),
			_ => Ok(Vec::new()),
		}
	}

	/// Permanently disable every matching tag.
	///
	/// Killing requires a non-zero kill password.
	pub fn kill_tags(&mut self, password: Password) -> Result<Vec<TagOpRecord>, TransferError<SerialPort::Error>> {
		if password == NO_PASSWORD {
			return Err(ValueOutOfRange {
				name: "kill password",
				value: 0,
				min: 1,
				max: u32::MAX,
			}
			.into());
		}
		let reply = self.command_reply(command_id::KILL, &password)?;
		match reply.records {
			Records::TagOps(records) => Ok(records),
			_ => Ok(Vec::new()),
		}
	}

	/// Restrict subsequent tag operations to tags with this exact EPC.
	pub fn set_access_epc_match(&mut self, epc: &[u8]) -> Result<(), TransferError<SerialPort::Error>> {
		InvalidLength::check_range("EPC match", epc.len(), 1, 62)?;
		let mut payload = Vec::with_capacity(2 + epc.len());
		payload.push(0x00);
		payload.push(epc.len() as u8);
		payload.extend_from_slice(epc);
		self.command_ok(command_id::SET_ACCESS_EPC_MATCH, &payload)
	}

	/// Remove the EPC match restriction.
	pub fn clear_access_epc_match(&mut self) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_ACCESS_EPC_MATCH, &[0x01])
	}

	/// Get the active EPC match, or [`None`] when matching is disabled.
	pub fn access_epc_match(&mut self) -> Result<Option<Vec<u8>>, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_ACCESS_EPC_MATCH, &[])?;
		InvalidReplyLength::check_min(reply.data.len(), 1)?;
		match reply.data[0] {
			0x00 => {
				InvalidReplyLength::check_min(reply.data.len(), 2)?;
				let len = usize::from(reply.data[1]);
				InvalidReplyLength::check(reply.data.len(), 2 + len)?;
				Ok(Some(reply.data[2..].to_vec()))
			},
			0x01 => Ok(None),
			value => Err(InvalidValue {
				what: "EPC match status",
				value,
			}
			.into()),
		}
	}
}
