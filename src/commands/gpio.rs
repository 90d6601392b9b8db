use crate::catalog::command_id;
use crate::error::{InvalidReplyLength, TransferError, ValueOutOfRange};
use crate::types::GpioLevel;
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Read the input pins GPIO 1 and GPIO 2.
	pub fn gpio_levels(&mut self) -> Result<(GpioLevel, GpioLevel), TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_GPIO_VALUE, &[])?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		Ok((GpioLevel::try_from(reply.data[0])?, GpioLevel::try_from(reply.data[1])?))
	}

	/// Drive one of the output pins GPIO 3 or GPIO 4.
	pub fn set_gpio_level(&mut self, pin: u8, level: GpioLevel) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("GPIO pin", pin.into(), 3, 4)?;
		self.command_ok(command_id::SET_GPIO_VALUE, &[pin, level.into()])
	}
}
