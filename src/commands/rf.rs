use crate::catalog::{command_id, FREQUENCY_COUNT};
use crate::endian::{read_u24_be, write_u24_be};
use crate::error::{InvalidReplyLength, InvalidValue, TransferError, ValueOutOfRange};
use crate::types::{BeeperMode, FrequencyBand, Region, RfLinkProfile};
use crate::Client;

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Select a frequency regulation region, optionally restricted to a slice
	/// of the frequency table.
	///
	/// Without an explicit range the full band of the region is used:
	/// FCC 902–928 MHz, ETSI 865–868 MHz, CHN 923.5–928.5 MHz.
	/// Use [`Client::set_custom_frequency_band`] for a user-defined band.
	pub fn set_frequency_band(
		&mut self,
		region: Region,
		range: Option<(u8, u8)>,
	) -> Result<(), TransferError<SerialPort::Error>> {
		if region == Region::Custom {
			return Err(ValueOutOfRange {
				name: "frequency region",
				value: u8::from(region).into(),
				min: Region::Fcc as u32,
				max: Region::Chn as u32,
			}
			.into());
		}
		let (start, end) = range.unwrap_or_else(|| region.default_range());
		ValueOutOfRange::check("start frequency index", start.into(), 0, u32::from(FREQUENCY_COUNT) - 1)?;
		ValueOutOfRange::check("end frequency index", end.into(), start.into(), u32::from(FREQUENCY_COUNT) - 1)?;
		self.command_ok(command_id::SET_FREQUENCY_REGION, &[region.into(), start, end])
	}

	/// Configure a user-defined frequency band.
	///
	/// `start_khz` is the first channel frequency in kHz, `space` the channel
	/// spacing in units of 10 kHz, and `quantity` the number of channels.
	pub fn set_custom_frequency_band(
		&mut self,
		start_khz: u32,
		space: u8,
		quantity: u8,
	) -> Result<(), TransferError<SerialPort::Error>> {
		ValueOutOfRange::check("channel quantity", quantity.into(), 1, 255)?;
		ValueOutOfRange::check("start frequency", start_khz, 1, 0x00FF_FFFF)?;
		let mut payload = [0u8; 6];
		payload[0] = Region::Custom.into();
		payload[1] = space;
		payload[2] = quantity;
		write_u24_be(&mut payload[3..], start_khz);
		self.command_ok(command_id::SET_FREQUENCY_REGION, &payload)
	}

	/// Get the frequency band the reader operates in.
	pub fn frequency_band(&mut self) -> Result<FrequencyBand, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_FREQUENCY_REGION, &[])?;
		InvalidReplyLength::check_min(reply.data.len(), 3)?;
		let region = Region::try_from(reply.data[0])?;
		if region == Region::Custom {
			InvalidReplyLength::check(reply.data.len(), 6)?;
			Ok(FrequencyBand::Custom {
				space: reply.data[1],
				quantity: reply.data[2],
				start_khz: read_u24_be(&reply.data[3..]),
			})
		} else {
			InvalidReplyLength::check(reply.data.len(), 3)?;
			Ok(FrequencyBand::Indexed {
				region,
				start: reply.data[1],
				end: reply.data[2],
			})
		}
	}

	/// Select the RF link profile. The reader must be rebooted for the change
	/// to take effect.
	pub fn set_rf_link_profile(&mut self, profile: RfLinkProfile) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_RF_LINK_PROFILE, &[profile.into()])
	}

	/// Get the active RF link profile.
	pub fn rf_link_profile(&mut self) -> Result<RfLinkProfile, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_RF_LINK_PROFILE, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		Ok(RfLinkProfile::try_from(reply.data[0])?)
	}

	/// Enable or disable dense reader mode.
	pub fn set_dense_reader_mode(&mut self, enabled: bool) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_DRM_MODE, &[enabled as u8])
	}

	/// Is dense reader mode enabled?
	pub fn dense_reader_mode(&mut self) -> Result<bool, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_DRM_MODE, &[])?;
		InvalidReplyLength::check(reply.data.len(), 1)?;
		match reply.data[0] {
			0 => Ok(false),
			1 => Ok(true),
			value => Err(InvalidValue { what: "DRM mode", value }.into()),
		}
	}

	/// Configure when the reader beeps.
	pub fn set_beeper_mode(&mut self, mode: BeeperMode) -> Result<(), TransferError<SerialPort::Error>> {
		self.command_ok(command_id::SET_BEEPER_MODE, &[mode.into()])
	}

	/// Measure the internal temperature of the reader in degrees Celsius.
	pub fn temperature(&mut self) -> Result<i8, TransferError<SerialPort::Error>> {
		let reply = self.command_reply(command_id::GET_READER_TEMPERATURE, &[])?;
		InvalidReplyLength::check(reply.data.len(), 2)?;
		// A zero sign byte marks a negative temperature.
		let magnitude = reply.data[1] as i8;
		if reply.data[0] == 0 {
			Ok(-magnitude)
		} else {
			Ok(magnitude)
		}
	}
}
