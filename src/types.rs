//! Domain types: catalog enums, tag records and inventory parameters.

use crate::error::InvalidValue;

macro_rules! impl_try_from_u8 {
	($type:ty, $what:literal) => {
		impl TryFrom<u8> for $type {
			type Error = InvalidValue;

			fn try_from(value: u8) -> Result<Self, Self::Error> {
				Self::from_u8(value).ok_or(InvalidValue { what: $what, value })
			}
		}

		impl From<$type> for u8 {
			fn from(value: $type) -> Self {
				value as u8
			}
		}
	};
}

/// An antenna port of the reader.
///
/// Readers have 1, 4 or 8 ports; the wire encoding is zero-based.
/// [`Antenna::Disabled`] is only meaningful in antenna switching sequences
/// and fast-switch inventory slots.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Antenna {
	A1 = 0,
	A2 = 1,
	A3 = 2,
	A4 = 3,
	A5 = 4,
	A6 = 5,
	A7 = 6,
	A8 = 7,
	Disabled = 0xFF,
}

impl Antenna {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::A1),
			1 => Some(Self::A2),
			2 => Some(Self::A3),
			3 => Some(Self::A4),
			4 => Some(Self::A5),
			5 => Some(Self::A6),
			6 => Some(Self::A7),
			7 => Some(Self::A8),
			0xFF => Some(Self::Disabled),
			_ => None,
		}
	}
}

impl_try_from_u8!(Antenna, "antenna ID");

/// A frequency regulation region.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Region {
	Fcc = 1,
	Etsi = 2,
	Chn = 3,
	Custom = 4,
}

impl Region {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			1 => Some(Self::Fcc),
			2 => Some(Self::Etsi),
			3 => Some(Self::Chn),
			4 => Some(Self::Custom),
			_ => None,
		}
	}

	/// The default frequency table index range for the region.
	pub(crate) fn default_range(self) -> (u8, u8) {
		match self {
			Self::Fcc => (7, 59),
			Self::Etsi => (0, 6),
			Self::Chn => (43, 53),
			Self::Custom => (0, 59),
		}
	}
}

impl_try_from_u8!(Region, "frequency region");

/// An EPC C1G2 tag memory bank.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MemoryBank {
	Reserved = 0,
	Epc = 1,
	Tid = 2,
	User = 3,
}

impl MemoryBank {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Reserved),
			1 => Some(Self::Epc),
			2 => Some(Self::Tid),
			3 => Some(Self::User),
			_ => None,
		}
	}
}

impl_try_from_u8!(MemoryBank, "memory bank");

/// A lockable region of tag memory.
///
/// Note that the lock command numbers regions differently from [`MemoryBank`].
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LockBank {
	Reserved = 0,
	User = 1,
	Tid = 2,
	Epc = 3,
	AccessPassword = 4,
	KillPassword = 5,
}

impl LockBank {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Reserved),
			1 => Some(Self::User),
			2 => Some(Self::Tid),
			3 => Some(Self::Epc),
			4 => Some(Self::AccessPassword),
			5 => Some(Self::KillPassword),
			_ => None,
		}
	}
}

impl_try_from_u8!(LockBank, "lock memory bank");

/// The lock operation to apply to a [`LockBank`].
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LockType {
	Open = 0,
	Lock = 1,
	PermanentOpen = 2,
	PermanentLock = 3,
}

impl LockType {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Open),
			1 => Some(Self::Lock),
			2 => Some(Self::PermanentOpen),
			3 => Some(Self::PermanentLock),
			_ => None,
		}
	}
}

impl_try_from_u8!(LockType, "lock type");

/// When the reader beeps.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BeeperMode {
	/// Never beep.
	Quiet = 0,

	/// Beep once per inventory round.
	AfterInventory = 1,

	/// Beep for every tag sighted. Audible, and slow.
	AfterTag = 2,
}

impl BeeperMode {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Quiet),
			1 => Some(Self::AfterInventory),
			2 => Some(Self::AfterTag),
			_ => None,
		}
	}
}

impl_try_from_u8!(BeeperMode, "beeper mode");

/// An EPC C1G2 session.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Session {
	S0 = 0,
	S1 = 1,
	S2 = 2,
	S3 = 3,
}

impl Session {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::S0),
			1 => Some(Self::S1),
			2 => Some(Self::S2),
			3 => Some(Self::S3),
			_ => None,
		}
	}
}

impl_try_from_u8!(Session, "session ID");

/// The inventoried flag targeted by an inventory round.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Target {
	A = 0,
	B = 1,
}

impl Target {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::A),
			1 => Some(Self::B),
			_ => None,
		}
	}
}

impl_try_from_u8!(Target, "inventoried flag");

/// An RF link profile, selecting modulation and backscatter rate.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RfLinkProfile {
	/// Tari 25 µs, FM0, 40 kbps.
	P0 = 0xD0,

	/// Tari 25 µs, Miller-4, 250 kbps. The factory default.
	P1 = 0xD1,

	/// Tari 25 µs, Miller-4, 300 kbps.
	P2 = 0xD2,

	/// Tari 6.25 µs, FM0, 400 kbps.
	P3 = 0xD3,
}

impl RfLinkProfile {
	pub(crate) fn from_u8(value: u8) -> Option<Self> {
		match value {
			0xD0 => Some(Self::P0),
			0xD1 => Some(Self::P1),
			0xD2 => Some(Self::P2),
			0xD3 => Some(Self::P3),
			_ => None,
		}
	}
}

impl_try_from_u8!(RfLinkProfile, "RF link profile");

/// The Impinj FastTID mode of the reader.
///
/// When enabled, Monza tags report their TID concatenated to the EPC.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FastTidMode {
	Disabled = 0x00,
	Enabled = 0x8D,
}

impl FastTidMode {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0x00 => Some(Self::Disabled),
			0x8D => Some(Self::Enabled),
			_ => None,
		}
	}
}

impl_try_from_u8!(FastTidMode, "FastTID mode");

/// A UART baud rate supported by the reader.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BaudRate {
	Baud38400 = 3,
	Baud115200 = 4,
}

impl BaudRate {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			3 => Some(Self::Baud38400),
			4 => Some(Self::Baud115200),
			_ => None,
		}
	}

	/// The baud rate in bits per second.
	pub fn bits_per_second(self) -> u32 {
		match self {
			Self::Baud38400 => 38_400,
			Self::Baud115200 => 115_200,
		}
	}
}

impl_try_from_u8!(BaudRate, "baud rate code");

/// The boot-time operating mode of the reader module.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ModuleFunction {
	/// Answer-mode serial operation.
	Standard = 0,

	/// Autonomously inventory and emit Wiegand output.
	Wiegand = 1,

	/// Continuous inventory burn-in test.
	BurnIn = 2,
}

impl ModuleFunction {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Standard),
			1 => Some(Self::Wiegand),
			2 => Some(Self::BurnIn),
			_ => None,
		}
	}
}

impl_try_from_u8!(ModuleFunction, "module function");

/// The level of a GPIO pin.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GpioLevel {
	Low = 0,
	High = 1,
}

impl GpioLevel {
	fn from_u8(value: u8) -> Option<Self> {
		match value {
			0 => Some(Self::Low),
			1 => Some(Self::High),
			_ => None,
		}
	}
}

impl_try_from_u8!(GpioLevel, "GPIO level");

/// A tag mask slot, or all of them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MaskId {
	All,
	Mask1,
	Mask2,
	Mask3,
	Mask4,
	Mask5,
}

impl From<MaskId> for u8 {
	fn from(value: MaskId) -> Self {
		match value {
			MaskId::All => 0,
			MaskId::Mask1 => 1,
			MaskId::Mask2 => 2,
			MaskId::Mask3 => 3,
			MaskId::Mask4 => 4,
			MaskId::Mask5 => 5,
		}
	}
}

/// An EPC C1G2 Protocol Control word.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PcWord {
	pub raw: u16,
}

impl PcWord {
	pub fn new(raw: u16) -> Self {
		Self { raw }
	}

	/// The length of the EPC in bytes, per the PC length field.
	pub fn epc_len(self) -> usize {
		(((self.raw & 0xF800) >> 10) & 0x3E) as usize
	}

	/// The user-memory indicator bit.
	pub fn umi(self) -> bool {
		self.raw & 0x0400 != 0
	}

	/// The XPC indicator bit.
	pub fn xi(self) -> bool {
		self.raw & 0x0200 != 0
	}

	/// The numbering system toggle bit (0 = EPC, 1 = ISO 15961).
	pub fn t(self) -> bool {
		self.raw & 0x0100 != 0
	}
}

/// An EPC C1G2 tag sighted by a real-time, session or fast-switch inventory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InventoryTag {
	/// The antenna port the tag was seen on, 1-based.
	pub antenna: u8,

	/// The frequency table index the tag was read at.
	pub frequency: u8,

	/// The Protocol Control word.
	pub pc: u16,

	/// The EPC bytes.
	pub epc: Vec<u8>,

	/// Received signal strength in dBm.
	pub rssi_dbm: i16,

	/// The backscatter phase angle, when phase reporting is active.
	pub phase: Option<u16>,
}

/// An ISO 18000-6B tag sighting.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag6b {
	/// The antenna port the tag was seen on, 1-based.
	pub antenna: u8,

	/// The tag UID.
	pub uid: [u8; 8],
}

/// A tag record from the reader's inventory buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BufferedTag {
	/// The Protocol Control word.
	pub pc: u16,

	/// The EPC bytes.
	pub epc: Vec<u8>,

	/// The tag CRC over PC + EPC as reported by the reader.
	pub crc: u16,

	/// Received signal strength in dBm.
	pub rssi_dbm: i16,

	/// The antenna port the tag was seen on, 1-based.
	pub antenna: u8,

	/// The frequency table index the tag was read at.
	pub frequency: u8,

	/// How often the tag was inventoried.
	pub count: u8,
}

/// One tag's result from a read operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReadRecord {
	/// The Protocol Control word.
	pub pc: u16,

	/// The EPC bytes.
	pub epc: Vec<u8>,

	/// The tag CRC over PC + EPC as reported by the reader.
	pub crc: u16,

	/// The data read from the requested memory bank.
	pub data: Vec<u8>,

	/// The antenna port the tag was accessed on, 1-based.
	pub antenna: u8,

	/// The frequency table index the tag was accessed at.
	pub frequency: u8,

	/// How often the tag was read during the operation.
	pub count: u8,
}

/// One tag's result from a write, lock or kill operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TagOpRecord {
	/// The Protocol Control word.
	pub pc: u16,

	/// The EPC bytes.
	pub epc: Vec<u8>,

	/// The tag CRC over PC + EPC as reported by the reader.
	pub crc: u16,

	/// The per-tag result code; [`crate::catalog::error_code::SUCCESS`] on success.
	pub error_code: u8,

	/// The antenna port the tag was accessed on, 1-based.
	pub antenna: u8,

	/// The frequency table index the tag was accessed at.
	pub frequency: u8,

	/// How often the operation was attempted on the tag.
	pub count: u8,
}

impl TagOpRecord {
	/// Did the operation succeed for this tag?
	pub fn succeeded(&self) -> bool {
		self.error_code == crate::catalog::error_code::SUCCESS
	}
}

/// A tag mask to install with [`crate::Client::set_tag_mask`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TagMask {
	/// The mask slot, 1 to 5.
	pub mask_id: u8,

	/// The select target (session or SL flag), raw value.
	pub target: u8,

	/// The select action, raw value 0 to 7.
	pub action: u8,

	/// The memory bank the mask is matched against.
	pub bank: MemoryBank,

	/// The match start address in bits.
	pub start_addr: u8,

	/// The mask bits, most significant bit first.
	pub mask: Vec<u8>,

	/// Truncate the tag reply to the matched portion.
	pub truncate: bool,
}

/// A tag mask slot as reported by the reader.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TagMaskEntry {
	pub mask_id: u8,
	pub target: u8,
	pub action: u8,
	pub bank: MemoryBank,
	pub start_addr: u8,

	/// Length of the mask in bits.
	pub bit_len: u8,
	pub mask: Vec<u8>,
	pub truncate: bool,
}

/// The frequency band the reader operates in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FrequencyBand {
	/// A contiguous slice of the fixed frequency table.
	Indexed {
		region: Region,

		/// First frequency table index, inclusive.
		start: u8,

		/// Last frequency table index, inclusive.
		end: u8,
	},

	/// A user-defined band.
	Custom {
		/// Channel spacing in units of 10 kHz.
		space: u8,

		/// Number of channels.
		quantity: u8,

		/// First channel frequency in kHz.
		start_khz: u32,
	},
}

/// The terminating reply of a buffered inventory round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BufferedInventorySummary {
	/// The antenna port the round ran on, 1-based.
	pub antenna: u8,

	/// Number of unique tags added to the buffer.
	pub tag_count: u16,

	/// Read rate in tags per second.
	pub read_rate: u16,

	/// Total number of tag reads in the round.
	pub total_read: u32,
}

/// The terminating reply of a real-time or session inventory round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InventorySummary {
	/// The antenna port the round ran on, 1-based.
	pub antenna: u8,

	/// Read rate in tags per second.
	pub read_rate: u16,

	/// Total number of tag reads in the round.
	pub total_read: u32,
}

/// The terminating reply of an ISO 18000-6B inventory round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Inventory6bSummary {
	/// The antenna port the round ran on, 1-based.
	pub antenna: u8,

	/// Number of tags sighted.
	pub tag_count: u8,
}

/// Parameters for a session-targeted inventory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionInventory {
	pub session: Session,
	pub target: Target,

	/// Optional SL flag selector.
	pub select: Option<u8>,

	/// Request backscatter phase angles with each sighting.
	pub phase: bool,

	/// Optional power-save level, in units of 64 ms sleep per round.
	pub powersave: Option<u8>,

	/// Number of inventory rounds; 255 lets the reader optimise.
	pub repeat: u8,
}

impl SessionInventory {
	pub fn new(session: Session, target: Target, repeat: u8) -> Self {
		Self {
			session,
			target,
			select: None,
			phase: false,
			powersave: None,
			repeat,
		}
	}
}

/// One antenna slot of a fast-switch inventory plan.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AntennaSlot {
	/// The antenna to use, or [`Antenna::Disabled`] to skip the slot.
	pub antenna: Antenna,

	/// Number of inventory sweeps on this antenna before switching.
	pub sweeps: u8,
}

/// Parameters for a fast-switch antenna inventory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FastSwitchInventory {
	/// Exactly 4 or exactly 8 antenna slots.
	pub slots: Vec<AntennaSlot>,

	/// Rest interval between antenna switches, in ms.
	pub interval: u8,

	/// Number of full switching rounds.
	pub repeat: u8,

	/// Optional session and target for the rounds.
	pub session: Option<(Session, Target)>,

	/// Request backscatter phase angles with each sighting.
	pub phase: bool,
}

/// An unsolicited event delivered while a command is in flight.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
	/// An EPC C1G2 tag sighting.
	Tag(InventoryTag),

	/// An ISO 18000-6B tag sighting.
	Tag6b(Tag6b),

	/// An antenna reported missing during a fast-switch inventory.
	AntennaMissing(AntennaMissing),
}

/// An antenna-missing notification from a fast-switch inventory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AntennaMissing {
	/// The antenna that has no detectable connection.
	pub antenna: Antenna,

	/// The raw error code, normally `ANTENNA_MISSING_ERROR`.
	pub code: u8,
}
