use crate::catalog::{command_id, FREQUENCY_COUNT};
use crate::error::{InvalidReplyLength, TransferError, ValueOutOfRange};
use crate::types::Antenna;
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Select the working antenna port for subsequent single-antenna operations.
	pub fn set_work_antenna(&mut self, antenna: Antenna) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("antenna", u8::from(antenna).into(), 0, 7)?;
		self.command_ok(command_id::SET_WORK_ANTENNA, &[antenna.into()])
	}

	/// Get the currently selected working antenna port.
	pub fn work_antenna(&mut self) -> Result<Antenna, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_WORK_ANTENNA, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(Antenna::try_from(reply.data[0])?)
	}

	/// Set the antenna connection detector threshold in dB of return loss.
	///
	/// A threshold of 0 disables the detector.
	pub fn set_antenna_detector(&mut self, threshold_db: u8) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_ANT_CONNECTION_DETECTOR, &[threshold_db])
	}

	/// Get the antenna connection detector threshold.
	///
	/// Returns the threshold as a negative dB value, or 0 when the detector is disabled.
	pub fn antenna_detector(&mut self) -> Result<i8, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_ANT_CONNECTION_DETECTOR, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(-(reply.data[0] as i8))
	}

	/// Measure the return loss of the working antenna at a frequency table index.
	///
	/// Returns the measured loss in negative dB.
	pub fn return_loss(&mut self, frequency_index: u8) -> Result<i8, TransferError<SerialPort::Error>> {
		ValueOutOfRange::check(
			"frequency index",
			frequency_index.into(),
			0,
			u32::from(FREQUENCY_COUNT) - 1,
		)?;
		let reply = self.command_reply(command_id::GET_RF_PORT_RETURN_LOSS, &[frequency_index])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(-(reply.data[0] as i8))
	}

	/// Get the antenna switching sequence of the reader.
	///
	/// Disabled slots are reported as [`Antenna::Disabled`].
	pub fn antenna_switching_sequence(&mut self) -> Result<Vec<Antenna>, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_ANT_SWITCH_SEQUENCE, &[])?;
		reply
			.data
			.iter()
			.map(|&byte| Ok(Antenna::try_from(byte)?))
			.collect()
	}
}
