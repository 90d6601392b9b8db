use crate::catalog::command_id;
use crate::error::{InvalidReplyLength, TransferError, WriteError};
use crate::types::ModuleFunction;
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Get the boot-time operating mode of the reader module.
	pub fn module_function(&mut self) -> Result<ModuleFunction, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_MODULE_FUNCTION, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(ModuleFunction::try_from(reply.data[0])?)
	}

	/// Change the boot-time operating mode of the reader module.
	///
	/// The reader changes behavior immediately, so all host-side state is
	/// dropped on success.
	pub fn set_module_function(&mut self, function: ModuleFunction) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_MODULE_FUNCTION, &[function.into()])?;
		self.reset_state().map_err(WriteError::DiscardBuffer)?;
		Ok(())
	}
}
