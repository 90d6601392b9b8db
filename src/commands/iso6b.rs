use log::debug;

use crate::catalog::command_id;
use crate::client::DEFAULT_TIMEOUT;
use crate::error::{InvalidReplyLength, TransferError, ValueOutOfRange};
use crate::types::{Event, Inventory6bSummary, Tag6b};
use crate::Client;

/// An ISO 18000-6B tag UID.
pub type Uid6b = [u8; 8];

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Run an ISO 18000-6B inventory round on the working antenna, streaming
	/// each sighted tag to `on_tag`.
	pub fn real_time_inventory_6b(
		&mut self,
		mut on_tag: impl FnMut(Tag6b),
	) -> Result<Inventory6bSummary, TransferError<SerialPort::Error>> {
		let reply = self
			.transfer_with_events(
				command_id::ISO18000_6B_INVENTORY,
				&[],
				DEFAULT_TIMEOUT,
				&mut |event| match event {
					Event::Tag6b(tag) => on_tag(tag),
					other => debug!("ignoring event during 6B inventory: {:?}", other),
				},
			)?
			.require_success()?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		Ok(Inventory6bSummary {
			antenna: reply.data[0] + 1,
			tag_count: reply.data[1],
		})
	}

	/// Read bytes from an ISO 18000-6B tag selected by UID.
	pub fn read_6b(
		&mut self,
		uid: Uid6b,
		start_address: u8,
		count: u8,
	) -> Result<Vec<u8>, TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("byte count", count.into(), 1, 223)?;
		let mut payload = Vec::with_capacity(10);
		payload.extend_from_slice(&uid);
		payload.push(start_address);
		payload.push(count);
		let reply = self.command_reply(command_id::ISO18000_6B_READ, &payload)?;
		// The antenna byte in front keeps a one byte read distinguishable
		// from an error-coded reply.
		InvalidReplyLength::check(reply.data.len(), 1 + usize::from(count))?;
		Ok(reply.data[1..].to_vec())
	}

	/// Write bytes to an ISO 18000-6B tag selected by UID.
	pub fn write_6b(
		&mut self,
		uid: Uid6b,
		start_address: u8,
		data: &[u8],
	) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("byte count", data.len() as u32, 1, 223)?;
		let mut payload = Vec::with_capacity(10 + data.len());
		payload.extend_from_slice(&uid);
		payload.push(start_address);
		payload.push(data.len() as u8);
		payload.extend_from_slice(data);
		self.command_ok(command_id::ISO18000_6B_WRITE, &payload)
	}

	/// Permanently lock one byte of an ISO 18000-6B tag.
	pub fn lock_6b_byte(&mut self, uid: Uid6b, address: u8) -> Result<(), TransferError<SerialPort::Error>> {
		let mut payload = Vec::with_capacity(9);
		payload.extend_from_slice(&uid);
		payload.push(address);
		self.command_ok(command_id::ISO18000_6B_LOCK, &payload)
	}

	/// Check whether one byte of an ISO 18000-6B tag is locked.
	pub fn query_lock_6b_byte(&mut self, uid: Uid6b, address: u8) -> Result<bool, TransferError<SerialPort::Error>> {
		let mut payload = Vec::with_capacity(9);
		payload.extend_from_slice(&uid);
		payload.push(address);
		let reply = self.command_reply(command_id::ISO18000_6B_QUERY_LOCK, &payload)?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		Ok(reply.data[1] != 0)
	}
}
