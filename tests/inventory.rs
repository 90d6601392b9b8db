use assert2::{assert, let_assert};
use test_log::test;

use indy_reader::catalog::{command_id, error_code};
use indy_reader::checksum::tag_crc;
use indy_reader::{
	Antenna, AntennaSlot, Client, Event, FastSwitchInventory, LockBank, LockType, MaskId, MemoryBank, ReadError,
	Session, SessionInventory, TagMask, Target, TransferError, NO_PASSWORD,
};

mod common;
use common::{frame, MockSerialPort};

const ADDRESS: u8 = 0x01;
const EPC: [u8; 12] = [0xE2, 0x00, 0x68, 0x16, 0x00, 0x00, 0x00, 0x60, 0x12, 0x34, 0x56, 0x78];

fn client() -> (Client<MockSerialPort>, MockSerialPort) {
	let port = MockSerialPort::new(115_200);
	(Client::new(port.clone(), ADDRESS), port)
}

/// A sighting payload: antenna/frequency pack, PC, EPC, RSSI, optional phase.
fn sighting(pack: u8, pc: u16, epc: &[u8], rssi: u8, phase: Option<u16>) -> Vec<u8> {
	let mut data = vec![pack, (pc >> 8) as u8, pc as u8];
	data.extend_from_slice(epc);
	data.push(rssi);
	if let Some(phase) = phase {
		data.push((phase >> 8) as u8);
		data.push(phase as u8);
	}
	data
}

/// A buffered inventory or tag operation record.
///
/// For tag operations the `rssi` position carries the per-tag result code.
fn record(expected: u16, pc: u16, epc: &[u8], rssi: u8, pack: u8, count: u8) -> Vec<u8> {
	let mut pc_epc = vec![(pc >> 8) as u8, pc as u8];
	pc_epc.extend_from_slice(epc);
	let crc = tag_crc(&pc_epc);

	let mut data = vec![(expected >> 8) as u8, expected as u8, pc_epc.len() as u8 + 2];
	data.extend_from_slice(&pc_epc);
	data.push((crc >> 8) as u8);
	data.push(crc as u8);
	data.push(rssi);
	data.push(pack);
	data.push(count);
	data
}

#[test]
fn test_real_time_inventory_streams_tags() {
	let (mut client, port) = client();

	port.queue_frame(ADDRESS, command_id::REAL_TIME_INVENTORY, &sighting(0x04, 0x3000, &EPC, 0x15, None));
	port.queue_frame(ADDRESS, command_id::REAL_TIME_INVENTORY, &sighting(0x05, 0x3000, &EPC, 0x98, None));
	// The 7 byte summary terminates the round.
	port.queue_frame(
		ADDRESS,
		command_id::REAL_TIME_INVENTORY,
		&[0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x05],
	);

	let mut tags = Vec::new();
	let_assert!(Ok(summary) = client.real_time_inventory(255, |tag| tags.push(tag)));

	assert!(tags.len() == 2);
	assert!(tags[0].antenna == 1);
	assert!(tags[0].frequency == 1);
	assert!(tags[0].pc == 0x3000);
	assert!(tags[0].epc == EPC);
	assert!(tags[0].rssi_dbm == 0x15 - 129);
	assert!(tags[0].phase.is_none());
	// Second sighting has the high antenna bit set in the RSSI byte.
	assert!(tags[1].antenna == 6);
	assert!(tags[1].rssi_dbm == 0x18 - 129);

	assert!(summary.antenna == 1);
	assert!(summary.read_rate == 2);
	assert!(summary.total_read == 5);

	assert!(port.written() == frame(ADDRESS, command_id::REAL_TIME_INVENTORY, &[0xFF]));
}

#[test]
fn test_inventory_error_reply() {
	let (mut client, port) = client();
	port.queue_frame(ADDRESS, command_id::REAL_TIME_INVENTORY, &[error_code::TAG_INVENTORY_ERROR]);
	let_assert!(Err(TransferError::ReadError(ReadError::Reader(e))) = client.real_time_inventory(1, |_| ()));
	assert!(e.code == error_code::TAG_INVENTORY_ERROR);
}

#[test]
fn test_session_inventory_with_phase() {
	let (mut client, port) = client();

	port.queue_frame(
		ADDRESS,
		command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY,
		&sighting(0x04, 0x3000, &EPC, 0x15, Some(0x0123)),
	);
	port.queue_frame(
		ADDRESS,
		command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY,
		&[0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01],
	);

	let mut params = SessionInventory::new(Session::S1, Target::A, 2);
	params.phase = true;
	let mut tags = Vec::new();
	let_assert!(Ok(summary) = client.session_inventory(&params, |tag| tags.push(tag)));

	assert!(tags.len() == 1);
	assert!(tags[0].epc == EPC);
	assert!(tags[0].phase == Some(0x0123));
	assert!(summary.total_read == 1);

	// Wire layout: session, target, phase flag, repeat.
	assert!(port.written() == frame(ADDRESS, command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY, &[0x01, 0x00, 0x01, 0x02]));
}

#[test]
fn test_session_inventory_without_phase() {
	let (mut client, port) = client();

	port.queue_frame(
		ADDRESS,
		command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY,
		&sighting(0x04, 0x3000, &EPC, 0x15, None),
	);
	port.queue_frame(
		ADDRESS,
		command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY,
		&[0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01],
	);

	let params = SessionInventory::new(Session::S1, Target::B, 1);
	let mut tags = Vec::new();
	assert!(client.session_inventory(&params, |tag| tags.push(tag)).is_ok());
	assert!(tags.len() == 1);
	assert!(tags[0].epc == EPC);
	assert!(tags[0].phase.is_none());

	assert!(port.written() == frame(ADDRESS, command_id::CUSTOMIZED_SESSION_TARGET_INVENTORY, &[0x01, 0x01, 0x01]));
}

#[test]
fn test_fast_switch_reports_missing_antenna() {
	let (mut client, port) = client();

	// Antenna-missing notification for antenna 2, then a sighting, then the
	// 24 bit total that terminates the round.
	port.queue_frame(
		ADDRESS,
		command_id::FAST_SWITCH_ANT_INVENTORY,
		&[0x01, error_code::ANTENNA_MISSING_ERROR],
	);
	port.queue_frame(ADDRESS, command_id::FAST_SWITCH_ANT_INVENTORY, &sighting(0x04, 0x3000, &EPC, 0x15, None));
	port.queue_frame(ADDRESS, command_id::FAST_SWITCH_ANT_INVENTORY, &[0x00, 0x00, 0x07]);

	let params = FastSwitchInventory {
		slots: vec![
			AntennaSlot { antenna: Antenna::A1, sweeps: 1 },
			AntennaSlot { antenna: Antenna::A2, sweeps: 1 },
			AntennaSlot { antenna: Antenna::A3, sweeps: 1 },
			AntennaSlot { antenna: Antenna::A4, sweeps: 1 },
		],
		interval: 5,
		repeat: 1,
		session: None,
		phase: false,
	};
	let mut events = Vec::new();
	let_assert!(Ok(total_read) = client.fast_switch_antenna_inventory(&params, |event| events.push(event)));

	assert!(total_read == 7);
	assert!(events.len() == 2);
	let_assert!(Event::AntennaMissing(missing) = &events[0]);
	assert!(missing.antenna == Antenna::A2);
	assert!(missing.code == error_code::ANTENNA_MISSING_ERROR);
	let_assert!(Event::Tag(tag) = &events[1]);
	assert!(tag.epc == EPC);

	let expected_payload = [0x00, 1, 0x01, 1, 0x02, 1, 0x03, 1, 5, 1];
	assert!(port.written() == frame(ADDRESS, command_id::FAST_SWITCH_ANT_INVENTORY, &expected_payload));
}

#[test]
fn test_fast_switch_requires_4_or_8_slots() {
	let (mut client, _port) = client();
	let params = FastSwitchInventory {
		slots: vec![AntennaSlot { antenna: Antenna::A1, sweeps: 1 }],
		interval: 0,
		repeat: 1,
		session: None,
		phase: false,
	};
	assert!(client.fast_switch_antenna_inventory(&params, |_| ()).is_err());
}

#[test]
fn test_buffered_inventory_summary() {
	let (mut client, port) = client();
	port.queue_frame(
		ADDRESS,
		command_id::INVENTORY,
		&[0x00, 0x00, 0x02, 0x00, 0x14, 0x00, 0x00, 0x00, 0x28],
	);
	let_assert!(Ok(summary) = client.buffered_inventory(10));
	assert!(summary.antenna == 1);
	assert!(summary.tag_count == 2);
	assert!(summary.read_rate == 20);
	assert!(summary.total_read == 40);
}

#[test]
fn test_inventory_buffer_dump() {
	let (mut client, port) = client();

	// Two records; each carries the total count, the second completes the dump.
	port.queue_frame(ADDRESS, command_id::GET_INVENTORY_BUFFER, &record(2, 0x3000, &EPC, 0x20, 0x04, 1));
	let mut other = EPC;
	other[11] = 0x79;
	port.queue_frame(ADDRESS, command_id::GET_INVENTORY_BUFFER, &record(2, 0x3000, &other, 0x21, 0x04, 2));

	let_assert!(Ok(tags) = client.inventory_buffer(false));
	assert!(tags.len() == 2);
	assert!(tags[0].epc == EPC);
	assert!(tags[0].rssi_dbm == 0x20 - 129);
	assert!(tags[0].frequency == 1);
	assert!(tags[0].count == 1);
	assert!(tags[1].epc == other);
	assert!(tags[1].count == 2);
}

#[test]
fn test_empty_buffer_reset_is_success() {
	let (mut client, port) = client();
	port.queue_frame(ADDRESS, command_id::GET_AND_RESET_INVENTORY_BUFFER, &[error_code::BUFFER_IS_EMPTY]);
	let_assert!(Ok(tags) = client.inventory_buffer(true));
	assert!(tags.is_empty());

	// Without the resetting form, an empty buffer is an error.
	port.queue_frame(ADDRESS, command_id::GET_INVENTORY_BUFFER, &[error_code::BUFFER_IS_EMPTY]);
	let_assert!(Err(TransferError::ReadError(ReadError::Reader(e))) = client.inventory_buffer(false));
	assert!(e.code == error_code::BUFFER_IS_EMPTY);
}

#[test]
fn test_inventory_buffer_tag_count() {
	let (mut client, port) = client();
	port.queue_frame(ADDRESS, command_id::GET_INVENTORY_BUFFER_TAG_COUNT, &[0x00, 0x02]);
	assert!(client.inventory_buffer_tag_count().unwrap() == 2);

	port.queue_frame(ADDRESS, command_id::RESET_INVENTORY_BUFFER, &[error_code::SUCCESS]);
	assert!(client.reset_inventory_buffer().is_ok());
}

#[test]
fn test_write_pads_odd_data() {
	let (mut client, port) = client();
	port.queue_frame(ADDRESS, command_id::WRITE_BLOCK, &record(1, 0x3000, &EPC, error_code::SUCCESS, 0x00, 1));

	let_assert!(Ok(records) = client.write_tags(MemoryBank::User, 2, &[0xDE, 0xAD, 0xBE], NO_PASSWORD, true));
	assert!(records.len() == 1);
	assert!(records[0].succeeded());
	assert!(records[0].epc == EPC);

	// Password, bank, word address, word count, then the zero-padded data.
	let mut expected_payload = vec![0x00, 0x00, 0x00, 0x00, 0x03, 0x02, 0x02];
	expected_payload.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0x00]);
	assert!(port.written() == frame(ADDRESS, command_id::WRITE_BLOCK, &expected_payload));
}

#[test]
fn test_read_tags() {
	let (mut client, port) = client();

	// One record: PC + EPC + CRC, four bytes of data, then length/antenna/count.
	let pc: u16 = 0x3000;
	let read_data = [0x01, 0x02, 0x03, 0x04];
	let mut pc_epc = vec![(pc >> 8) as u8, pc as u8];
	pc_epc.extend_from_slice(&EPC);
	let crc = tag_crc(&pc_epc);
	let mut payload = vec![0x00, 0x01, (pc_epc.len() + 2 + read_data.len()) as u8];
	payload.extend_from_slice(&pc_epc);
	payload.push((crc >> 8) as u8);
	payload.push(crc as u8);
	payload.extend_from_slice(&read_data);
	payload.push(read_data.len() as u8);
	payload.push(0x00);
	payload.push(0x01);
	port.queue_frame(ADDRESS, command_id::READ, &payload);

	let_assert!(Ok(records) = client.read_tags(MemoryBank::Tid, 0, 2));
	assert!(records.len() == 1);
	assert!(records[0].epc == EPC);
	assert!(records[0].data == read_data);
	assert!(port.written() == frame(ADDRESS, command_id::READ, &[0x02, 0x00, 0x02]));
}

#[test]
fn test_lock_tags() {
	let (mut client, port) = client();
	let password = [0x12, 0x34, 0x56, 0x78];

	// The record layout matches a buffered record with the per-tag result
	// code in the RSSI position.
	port.queue_frame(ADDRESS, command_id::LOCK, &record(1, 0x3000, &EPC, error_code::SUCCESS, 0x00, 1));
	let_assert!(Ok(records) = client.lock_tags(LockBank::Epc, LockType::Lock, password));
	assert!(records.len() == 1);
	assert!(records[0].succeeded());
	assert!(records[0].epc == EPC);
	// Password, lock bank, lock type.
	assert!(port.written() == frame(ADDRESS, command_id::LOCK, &[0x12, 0x34, 0x56, 0x78, 0x03, 0x01]));

	// A single byte reply carries an error code.
	port.queue_frame(ADDRESS, command_id::LOCK, &[error_code::TAG_LOCK_ERROR]);
	let_assert!(
		Err(TransferError::ReadError(ReadError::Reader(e))) =
			client.lock_tags(LockBank::User, LockType::PermanentLock, password)
	);
	assert!(e.code == error_code::TAG_LOCK_ERROR);
}

#[test]
fn test_kill_tags() {
	let (mut client, port) = client();
	let password = [0x12, 0x34, 0x56, 0x78];

	port.queue_frame(ADDRESS, command_id::KILL, &record(1, 0x3000, &EPC, error_code::SUCCESS, 0x00, 3));
	let_assert!(Ok(records) = client.kill_tags(password));
	assert!(records.len() == 1);
	assert!(records[0].succeeded());
	assert!(records[0].count == 3);
	assert!(port.written() == frame(ADDRESS, command_id::KILL, &password));
}

#[test]
fn test_kill_requires_nonzero_password() {
	let (mut client, port) = client();
	assert!(client.kill_tags(NO_PASSWORD).is_err());
	assert!(port.written().is_empty());
}

#[test]
fn test_set_and_clear_tag_mask() {
	let (mut client, port) = client();

	// A zero byte reply acknowledges the change.
	port.queue_frame(ADDRESS, command_id::TAG_MASK, &[0x00]);
	let mask = TagMask {
		mask_id: 1,
		target: 0x04,
		action: 0,
		bank: MemoryBank::Epc,
		start_addr: 0x20,
		mask: vec![0xAB, 0xCD],
		truncate: false,
	};
	assert!(client.set_tag_mask(&mask).is_ok());
	assert!(port.written() == frame(ADDRESS, command_id::TAG_MASK, &[0x01, 0x04, 0x00, 0x01, 0x20, 0x10, 0xAB, 0xCD, 0x00]));

	port.queue_frame(ADDRESS, command_id::TAG_MASK, &[0x00]);
	assert!(client.clear_tag_mask(MaskId::All).is_ok());
	assert!(port.written() == frame(ADDRESS, command_id::TAG_MASK, &[0x00]));

	// A single nonzero byte is an error code.
	port.queue_frame(ADDRESS, command_id::TAG_MASK, &[error_code::PARAMETER_INVALID]);
	let_assert!(Err(TransferError::ReadError(ReadError::Reader(e))) = client.clear_tag_mask(MaskId::Mask1));
	assert!(e.code == error_code::PARAMETER_INVALID);
}

#[test]
fn test_set_tag_mask_validates_arguments() {
	let (mut client, port) = client();
	let mut mask = TagMask {
		mask_id: 0,
		target: 0x04,
		action: 0,
		bank: MemoryBank::Epc,
		start_addr: 0x20,
		mask: vec![0xAB],
		truncate: false,
	};
	assert!(client.set_tag_mask(&mask).is_err());

	mask.mask_id = 1;
	mask.mask = Vec::new();
	assert!(client.set_tag_mask(&mask).is_err());
	assert!(port.written().is_empty());
}

#[test]
fn test_tag_masks_listing() {
	let (mut client, port) = client();

	// Two mask records; each announces the total count of two.
	port.queue_frame(
		ADDRESS,
		command_id::TAG_MASK,
		&[0x00, 0x02, 0x01, 0x04, 0x00, 0x01, 0x20, 0x10, 0xAB, 0xCD, 0x00],
	);
	port.queue_frame(
		ADDRESS,
		command_id::TAG_MASK,
		&[0x00, 0x02, 0x02, 0x04, 0x01, 0x03, 0x00, 0x08, 0xFF, 0x01],
	);
	let_assert!(Ok(masks) = client.tag_masks());
	assert!(masks.len() == 2);
	assert!(masks[0].mask_id == 1);
	assert!(masks[0].bank == MemoryBank::Epc);
	assert!(masks[0].bit_len == 16);
	assert!(masks[0].mask == [0xAB, 0xCD]);
	assert!(!masks[0].truncate);
	assert!(masks[1].mask_id == 2);
	assert!(masks[1].bank == MemoryBank::User);
	assert!(masks[1].mask == [0xFF]);
	assert!(masks[1].truncate);

	// Without any installed mask the reader sends a bare acknowledgement.
	port.queue_frame(ADDRESS, command_id::TAG_MASK, &[0x00]);
	let_assert!(Ok(masks) = client.tag_masks());
	assert!(masks.is_empty());
}

#[test]
fn test_6b_inventory() {
	let (mut client, port) = client();
	let uid = [0xE0, 0x04, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78];

	let mut event = vec![0x00];
	event.extend_from_slice(&uid);
	port.queue_frame(ADDRESS, command_id::ISO18000_6B_INVENTORY, &event);
	port.queue_frame(ADDRESS, command_id::ISO18000_6B_INVENTORY, &[0x00, 0x01]);

	let mut tags = Vec::new();
	let_assert!(Ok(summary) = client.real_time_inventory_6b(|tag| tags.push(tag)));
	assert!(tags.len() == 1);
	assert!(tags[0].uid == uid);
	assert!(tags[0].antenna == 1);
	assert!(summary.tag_count == 1);
}

#[test]
fn test_6b_read_and_query_lock() {
	let (mut client, port) = client();
	let uid = [0xE0, 0x04, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78];

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_READ, &[0x00, 0xAA, 0xBB]);
	let_assert!(Ok(data) = client.read_6b(uid, 0x08, 2));
	assert!(data == [0xAA, 0xBB]);

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_QUERY_LOCK, &[0x00, 0xFE]);
	assert!(client.query_lock_6b_byte(uid, 0x08).unwrap());

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_QUERY_LOCK, &[0x00, 0x00]);
	assert!(!client.query_lock_6b_byte(uid, 0x08).unwrap());
}

#[test]
fn test_6b_write_and_lock() {
	let (mut client, port) = client();
	let uid = [0xE0, 0x04, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78];

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_WRITE, &[error_code::SUCCESS]);
	assert!(client.write_6b(uid, 0x08, &[0xAA, 0xBB]).is_ok());
	// UID, start address, byte count, data.
	let mut expected = uid.to_vec();
	expected.extend_from_slice(&[0x08, 0x02, 0xAA, 0xBB]);
	assert!(port.written() == frame(ADDRESS, command_id::ISO18000_6B_WRITE, &expected));

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_LOCK, &[error_code::SUCCESS]);
	assert!(client.lock_6b_byte(uid, 0x08).is_ok());
	let mut expected = uid.to_vec();
	expected.push(0x08);
	assert!(port.written() == frame(ADDRESS, command_id::ISO18000_6B_LOCK, &expected));

	port.queue_frame(ADDRESS, command_id::ISO18000_6B_LOCK, &[error_code::TAG_LOCK_ERROR]);
	let_assert!(Err(TransferError::ReadError(ReadError::Reader(e))) = client.lock_6b_byte(uid, 0x08));
	assert!(e.code == error_code::TAG_LOCK_ERROR);
}
