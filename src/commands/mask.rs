use crate::catalog::command_id;
use crate::error::{InvalidLength, TransferError, ValueOutOfRange};
use crate::response::Records;
use crate::types::{MaskId, TagMask, TagMaskEntry};
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Install a select mask in one of the reader's five mask slots.
	///
	/// Tags are matched against all installed masks during inventory and tag
	/// operations.
	pub fn set_tag_mask(&mut self, mask: &TagMask) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("mask ID", mask.mask_id.into(), 1, 5)?;
		ValueOutOfRange::check("select action", mask.action.into(), 0, 7)?;
		InvalidLength::check_range("mask", mask.mask.len(), 1, 31)?;

		let mut payload = Vec::with_capacity(7 + mask.mask.len());
		payload.push(mask.mask_id);
		payload.push(mask.target);
		payload.push(mask.action);
		payload.push(mask.bank.into());
		payload.push(mask.start_addr);
		payload.push((mask.mask.len() * 8) as u8);
		payload.extend_from_slice(&mask.mask);
		payload.push(mask.truncate as u8);
		self.command_ok(command_id::TAG_MASK, &payload)
	}

	/// Remove one mask slot, or all of them.
	pub fn clear_tag_mask(&mut self, mask_id: MaskId) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::TAG_MASK, &[mask_id.into()])
	}

	/// List the installed tag masks.
	///
	/// Readers without any installed mask acknowledge with an empty listing.
	pub fn tag_masks(&mut self) -> Result<Vec<TagMaskEntry>, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::TAG_MASK, &[])?;
		match reply.records {
			Records::Masks(masks) => Ok(masks),
			_ => Ok(Vec::new()),
		}
	}
}
