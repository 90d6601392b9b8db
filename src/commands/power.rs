use crate::catalog::command_id;
use crate::error::{InvalidLength, TransferError};
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Set the output power per antenna port, in dBm, and save it to reader flash.
	///
	/// Pass a single value to apply it to all ports, or one value per port
	/// for a 4-port or 8-port reader.
	pub fn set_output_power(&mut self, power_dbm: &[u8]) -> Result<(), TransferError<SerialPort::Error>> {
		InvalidLength::check_one_of("output power", power_dbm.len(), &[1, 4, 8])?;
		self.command_ok(command_id::SET_OUTPUT_POWER, power_dbm)
	}

	/// Set the output power for all ports without saving it to reader flash.
	pub fn set_temporary_output_power(&mut self, power_dbm: u8) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_TEMPORARY_OUTPUT_POWER, &[power_dbm])
	}

	/// Get the output power per antenna port of a 4-port reader, in dBm.
	///
	/// The reader sends the power once when all ports are set the same;
	/// the value is repeated for each port so callers always see one entry per port.
	pub fn output_power(&mut self) -> Result<Vec<u8>, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_OUTPUT_POWER, &[])?;
		Ok(broadcast_power(reply.data, 4))
	}

	/// Get the output power per antenna port of an 8-port reader, in dBm.
	pub fn output_power_8p(&mut self) -> Result<Vec<u8>, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_OUTPUT_POWER_8P, &[])?;
		Ok(broadcast_power(reply.data, 8))
	}
}

fn broadcast_power(data: Vec<u8>, ports: usize) -> Vec<u8> {
	if data.len() == 1 {
		vec![data[0]; ports]
	} else {
		data
	}
}
