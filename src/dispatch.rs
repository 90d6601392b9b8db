//! The response dispatcher.
//!
//! Every validated inbound frame passes through [`Dispatcher::process`],
//! which classifies it as an unsolicited event or a solicited reply, swallows
//! records of multi-frame replies into per-peer accumulator queues, and
//! resolves the front entry of the pending-command FIFO. A reply that does
//! not match the front entry triggers resynchronization: entries are popped
//! (and their partial records discarded) until a match is found or the list
//! is empty.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::catalog::{command_id, descriptor, ErrorPolicy, BROADCAST_ADDRESS};
use crate::frame::Frame;
use crate::response::{
	parse_buffered_record, parse_inventory_tag, parse_mask_record, parse_read_record, parse_tag_6b,
	parse_tag_op_record, Records, Reply,
};
use crate::types::{Antenna, AntennaMissing, BufferedTag, Event, ReadRecord, TagMaskEntry, TagOpRecord};

/// A command awaiting its reply.
#[derive(Debug)]
struct Pending<I> {
	token: u64,
	command: u8,
	deadline: I,
}

/// Scratch space for the multi-frame replies of one peer.
///
/// The protocol has no end-of-stream marker: each record announces the total
/// count and completion is inferred by comparing the queue length against it.
/// The queues stay explicit so resynchronization can discard them as a unit.
#[derive(Debug, Default)]
struct Accumulators {
	masks: Vec<TagMaskEntry>,
	inventory_buffer: Vec<BufferedTag>,
	read: Vec<ReadRecord>,
	write: Vec<TagOpRecord>,
	lock: Vec<TagOpRecord>,
	kill: Vec<TagOpRecord>,
}

/// The outcome of dispatching one inbound frame.
#[derive(Debug)]
pub(crate) enum Dispatch {
	/// The frame was dropped, or swallowed into an accumulator queue.
	None,

	/// The frame is an unsolicited event.
	Event(Event),

	/// The frame resolved the pending command registered under `token`.
	Resolved { token: u64, reply: Reply },
}

#[derive(Debug)]
pub(crate) struct Dispatcher<I> {
	address: u8,
	phase_mode: bool,
	next_token: u64,
	pending: VecDeque<Pending<I>>,
	accumulators: HashMap<u8, Accumulators>,
}

impl<I: Copy> Dispatcher<I> {
	pub fn new(address: u8) -> Self {
		Self {
			address,
			phase_mode: false,
			next_token: 0,
			pending: VecDeque::new(),
			accumulators: HashMap::new(),
		}
	}

	/// The configured target peer address.
	pub fn address(&self) -> u8 {
		self.address
	}

	pub fn set_address(&mut self, address: u8) {
		self.address = address;
	}

	pub fn set_phase_mode(&mut self, phase_mode: bool) {
		self.phase_mode = phase_mode;
	}

	/// Drop all pending commands and accumulated records, and leave phase mode.
	pub fn reset(&mut self) {
		self.pending.clear();
		self.accumulators.clear();
		self.phase_mode = false;
	}

	/// Register a pending command and get a token to identify its resolution.
	pub fn register(&mut self, command: u8, deadline: I) -> u64 {
		let token = self.next_token;
		self.next_token += 1;
		self.pending.push_back(Pending { token, command, deadline });
		token
	}

	/// Remove a pending command, normally because its deadline fired.
	pub fn abandon(&mut self, token: u64) {
		self.pending.retain(|pending| pending.token != token);
	}

	/// The current deadline of a pending command, if it is still pending.
	///
	/// Events refresh the deadline of the command they belong to, so the
	/// caller must re-check this after every processed frame.
	pub fn deadline(&self, token: u64) -> Option<I> {
		self.pending
			.iter()
			.find(|pending| pending.token == token)
			.map(|pending| pending.deadline)
	}

	/// Process one validated inbound frame.
	pub fn process(&mut self, frame: &Frame, refreshed_deadline: I) -> Dispatch {
		if self.address != BROADCAST_ADDRESS && frame.address() != self.address {
			debug!(
				"dropping frame from peer {:#04X}, configured peer is {:#04X}",
				frame.address(),
				self.address
			);
			return Dispatch::None;
		}

		let command = frame.command();
		let Some(descriptor) = descriptor(command) else {
			debug!("dropping frame with unknown command code {:#04X}", command);
			return Dispatch::None;
		};
		let payload = frame.payload();

		// Unsolicited events never consume a pending entry. Tag sightings
		// refresh the deadline of the inventory command they belong to, so a
		// long round does not time out between sightings.
		match command {
			command_id::FAST_SWITCH_ANT_INVENTORY if frame.length() == 5 => {
				let Ok(antenna) = Antenna::try_from(payload[0]) else {
					debug!("dropping antenna-missing event with invalid antenna {:#04X}", payload[0]);
					return Dispatch::None;
				};
				return Dispatch::Event(Event::AntennaMissing(AntennaMissing {
					antenna,
					code: payload[1],
				}));
			},
			command_id::ISO18000_6B_INVENTORY if payload.len() == 9 => {
				return match parse_tag_6b(payload) {
					Some(tag) => {
						self.refresh_deadline(command, refreshed_deadline);
						Dispatch::Event(Event::Tag6b(tag))
					},
					None => Dispatch::None,
				};
			},
			command_id::REAL_TIME_INVENTORY
			| command_id::FAST_SWITCH_ANT_INVENTORY
			| command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY
				if payload.len() > 7 =>
			{
				return match parse_inventory_tag(payload, self.phase_mode) {
					Some(tag) => {
						self.refresh_deadline(command, refreshed_deadline);
						Dispatch::Event(Event::Tag(tag))
					},
					None => Dispatch::None,
				};
			},
			_ => (),
		}

		let (error_code, data) = classify(command, descriptor.policy, payload);

		if error_code.is_none() && !self.accumulate(frame.address(), command, frame.length(), data) {
			// One record of an incomplete multi-frame reply was queued.
			return Dispatch::None;
		}

		// Match the reply against the pending FIFO, popping stale entries.
		// A lost record leaves stale accumulator entries behind, so the
		// queues of every popped command are discarded with it.
		loop {
			match self.pending.front() {
				None => {
					debug!(
						"dropping out-of-sync reply to {} ({:#04X}): no pending command",
						descriptor.name, command
					);
					return Dispatch::None;
				},
				Some(front) if front.command == command => break,
				Some(_) => {
					let popped = self.pending.pop_front().unwrap();
					debug!(
						"resynchronizing: abandoning pending command {:#04X} for reply to {:#04X}",
						popped.command, command
					);
					self.clear_queue(frame.address(), popped.command);
				},
			}
		}

		let front = self.pending.pop_front().unwrap();
		let records = self.drain_records(frame.address(), command);
		Dispatch::Resolved {
			token: front.token,
			reply: Reply {
				address: frame.address(),
				command,
				error_code,
				data: data.to_vec(),
				records,
			},
		}
	}

	/// Refresh the front pending deadline if the front command matches.
	fn refresh_deadline(&mut self, command: u8, deadline: I) {
		if let Some(front) = self.pending.front_mut() {
			if front.command == command {
				front.deadline = deadline;
			}
		}
	}

	/// Queue one record of a multi-frame reply.
	///
	/// Returns true when the reply is complete (or the command does not
	/// accumulate at all) and false when the record was swallowed.
	fn accumulate(&mut self, address: u8, command: u8, frame_length: u8, data: &[u8]) -> bool {
		use command_id::*;

		macro_rules! accumulate {
			($queue:ident, $parse:ident) => {{
				let Some((expected, record)) = $parse(data) else {
					// Malformed record: drop the frame and let the command time out.
					return false;
				};
				let queue = &mut self.accumulators.entry(address).or_default().$queue;
				queue.push(record);
				queue.len() >= usize::from(expected)
			}};
		}

		match command {
			GET_INVENTORY_BUFFER | GET_AND_RESET_INVENTORY_BUFFER => {
				accumulate!(inventory_buffer, parse_buffered_record)
			},
			READ => accumulate!(read, parse_read_record),
			WRITE | WRITE_BLOCK => accumulate!(write, parse_tag_op_record),
			LOCK => accumulate!(lock, parse_tag_op_record),
			KILL => accumulate!(kill, parse_tag_op_record),
			TAG_MASK if frame_length > 7 => accumulate!(masks, parse_mask_record),
			_ => true,
		}
	}

	/// Drain the accumulator queue a resolved command was filling, if any.
	fn drain_records(&mut self, address: u8, command: u8) -> Records {
		use command_id::*;

		let Some(accumulators) = self.accumulators.get_mut(&address) else {
			return Records::None;
		};
		match command {
			GET_INVENTORY_BUFFER | GET_AND_RESET_INVENTORY_BUFFER => {
				Records::Buffered(std::mem::take(&mut accumulators.inventory_buffer))
			},
			READ => Records::Read(std::mem::take(&mut accumulators.read)),
			WRITE | WRITE_BLOCK => Records::TagOps(std::mem::take(&mut accumulators.write)),
			LOCK => Records::TagOps(std::mem::take(&mut accumulators.lock)),
			KILL => Records::TagOps(std::mem::take(&mut accumulators.kill)),
			TAG_MASK => Records::Masks(std::mem::take(&mut accumulators.masks)),
			_ => Records::None,
		}
	}

	/// Discard the accumulator queue of a command popped during resynchronization.
	fn clear_queue(&mut self, address: u8, command: u8) {
		let _ = self.drain_records(address, command);
	}
}

/// Split a reply payload into an optional error code and the remaining data.
///
/// The decision is driven by the catalog policy; the three `Sometimes`
/// commands are the only data-dependent cases the protocol has.
fn classify(command: u8, policy: ErrorPolicy, payload: &[u8]) -> (Option<u8>, &[u8]) {
	match policy {
		ErrorPolicy::Never => (None, payload),
		ErrorPolicy::Always => match payload.split_first() {
			Some((&code, rest)) => (Some(code), rest),
			None => (None, payload),
		},
		ErrorPolicy::IfSingleByteData => {
			if payload.len() == 1 {
				(Some(payload[0]), &[])
			} else {
				(None, payload)
			}
		},
		ErrorPolicy::Sometimes => match command {
			command_id::GET_RF_LINK_PROFILE => {
				if payload.len() == 1 && crate::types::RfLinkProfile::from_u8(payload[0]).is_none() {
					(Some(payload[0]), &[])
				} else {
					(None, payload)
				}
			},
			command_id::GET_RF_PORT_RETURN_LOSS => {
				if payload.first() == Some(&crate::catalog::error_code::FAIL_TO_GET_RF_PORT_RETURN_LOSS) {
					(Some(payload[0]), &[])
				} else {
					(None, payload)
				}
			},
			command_id::TAG_MASK => {
				if payload.len() == 1 && payload[0] != 0 {
					(Some(payload[0]), &[])
				} else {
					(None, payload)
				}
			},
			_ => (None, payload),
		},
	}
}
