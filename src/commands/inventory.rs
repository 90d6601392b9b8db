use core::time::Duration;

use log::debug;

use crate::catalog::command_id;
use crate::client::{DEFAULT_TIMEOUT, INVENTORY_ROUND_TIME, POWERSAVE_STEP_TIME};
use crate::endian::{read_u16_be, read_u24_be, read_u32_be};
use crate::error::{InvalidLength, InvalidReplyLength, TransferError};
use crate::types::{
	BufferedInventorySummary, Event, FastSwitchInventory, InventorySummary, InventoryTag, SessionInventory,
};
use crate::Client;

/// The reply deadline for an inventory command.
///
/// Each requested round can take up to 255 ms, and a session inventory sleeps
/// an extra 64 ms per power-save level. Tag sightings refresh the deadline,
/// so this only has to cover a round without sightings.
fn inventory_timeout(repeat: u8, powersave: Option<u8>) -> Duration {
	DEFAULT_TIMEOUT
		+ INVENTORY_ROUND_TIME * u32::from(repeat)
		+ POWERSAVE_STEP_TIME * u32::from(powersave.unwrap_or(0))
}

fn parse_summary(data: &[u8]) -> Result<InventorySummary, InvalidReplyLength> {
	InvalidReplyLength::check(data.len(), 7)?;
	Ok(InventorySummary {
		antenna: data[0] + 1,
		read_rate: read_u16_be(&data[1..]),
		total_read: read_u32_be(&data[3..]),
	})
}

impl<SerialPort> Client<SerialPort>
where
	SerialPort: crate::SerialPort,
{
	/// Run an inventory round that accumulates tags in the reader's buffer.
	///
	/// The tags are retrieved afterwards with [`Client::inventory_buffer`].
	/// A `repeat` of 255 lets the reader optimise the round count for
	/// multi-antenna operation.
	pub fn buffered_inventory(
		&mut self,
		repeat: u8,
	) -> Result<BufferedInventorySummary, TransferError<SerialPort::Error>> {
		let reply = self
			.transfer_timeout(command_id::INVENTORY, &[repeat], inventory_timeout(repeat, None))?
			.require_success()?;
		InvalidReplyLength::check(reply.data.len(), 9)?;
		Ok(BufferedInventorySummary {
			antenna: reply.data[0] + 1,
			tag_count: read_u16_be(&reply.data[1..]),
			read_rate: read_u16_be(&reply.data[3..]),
			total_read: read_u32_be(&reply.data[5..]),
		})
	}

	/// Run an inventory round on the working antenna, streaming each sighting
	/// to `on_tag` as it arrives.
	pub fn real_time_inventory(
		&mut self,
		repeat: u8,
		mut on_tag: impl FnMut(InventoryTag),
	) -> Result<InventorySummary, TransferError<SerialPort::Error>> {
		self.dispatcher.set_phase_mode(false);
		let reply = self
			.transfer_with_events(
				command_id::REAL_TIME_INVENTORY,
				&[repeat],
				inventory_timeout(repeat, None),
				&mut |event| match event {
					Event::Tag(tag) => on_tag(tag),
					other => debug!("ignoring event during real-time inventory: {:?}", other),
				},
			)?
			.require_success()?;
		Ok(parse_summary(&reply.data)?)
	}

	/// Run a session-targeted inventory, streaming each sighting to `on_tag`.
	///
	/// When [`SessionInventory::phase`] is set, subsequent sightings carry a
	/// backscatter phase angle and the driver switches its sighting parser
	/// accordingly until another inventory command changes the mode.
	pub fn session_inventory(
		&mut self,
		params: &SessionInventory,
		mut on_tag: impl FnMut(InventoryTag),
	) -> Result<InventorySummary, TransferError<SerialPort::Error>> {
		let mut payload = vec![params.session.into(), params.target.into()];
		if let Some(select) = params.select {
			payload.push(select);
		}
		if params.phase {
			payload.push(0x01);
		}
		if let Some(powersave) = params.powersave {
			payload.push(powersave);
		}
		payload.push(params.repeat);

		self.dispatcher.set_phase_mode(params.phase);
		let reply = self
			.transfer_with_events(
				command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY,
				&payload,
				inventory_timeout(params.repeat, params.powersave),
				&mut |event| match event {
					Event::Tag(tag) => on_tag(tag),
					other => debug!("ignoring event during session inventory: {:?}", other),
				},
			)?
			.require_success()?;
		Ok(parse_summary(&reply.data)?)
	}

	/// Run an inventory that cycles through multiple antenna ports in one round.
	///
	/// Sightings and antenna-missing notifications are streamed to `on_event`
	/// in wire order. Returns the total number of tag reads in the round.
	pub fn fast_switch_antenna_inventory(
		&mut self,
		params: &FastSwitchInventory,
		mut on_event: impl FnMut(Event),
	) -> Result<u32, TransferError<SerialPort::Error>> {
		InvalidLength::check_one_of("antenna slots", params.slots.len(), &[4, 8])?;

		let mut payload = Vec::with_capacity(params.slots.len() * 2 + 5);
		for slot in &params.slots {
			payload.push(slot.antenna.into());
			payload.push(slot.sweeps);
		}
		if let Some((session, target)) = params.session {
			payload.push(session.into());
			payload.push(target.into());
		}
		if params.phase {
			payload.push(0x01);
		}
		payload.push(params.interval);
		payload.push(params.repeat);

		self.dispatcher.set_phase_mode(params.phase);
		let reply = self
			.transfer_with_events(
				command_id::FAST_SWITCH_ANT_INVENTORY,
				&payload,
				inventory_timeout(params.repeat, None),
				&mut |event| on_event(event),
			)?
			.require_success()?;

		// Older firmware replies with just a 24 bit total, newer firmware
		// with the full 7 byte summary.
		match reply.data.len() {
			3 => Ok(read_u24_be(&reply.data)),
			_ => Ok(parse_summary(&reply.data)?.total_read),
		}
	}
}
