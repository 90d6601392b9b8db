use crate::catalog::command_id;
use crate::error::{InvalidReplyLength, TransferError};
use crate::types::FastTidMode;
use crate::Client;

fn mode(enabled: bool) -> FastTidMode {
	if enabled {
		FastTidMode::Enabled
	} else {
		FastTidMode::Disabled
	}
}

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Enable or disable Impinj FastTID until the next reboot.
	///
	/// With FastTID enabled, Monza tags report their TID concatenated to the
	/// EPC during inventory.
	pub fn set_fast_tid(&mut self, enabled: bool) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_IMPINJ_FAST_TID, &[mode(enabled).into()])
	}

	/// Enable or disable Impinj FastTID and persist the setting in reader flash.
	pub fn set_and_save_fast_tid(&mut self, enabled: bool) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_AND_SAVE_IMPINJ_FAST_TID, &[mode(enabled).into()])
	}

	/// Is Impinj FastTID active?
	pub fn fast_tid(&mut self) -> Result<bool, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_IMPINJ_FAST_TID, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(FastTidMode::try_from(reply.data[0])? == FastTidMode::Enabled)
	}
}
