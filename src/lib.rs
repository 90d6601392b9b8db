//! Host-side driver for UHF RFID reader modules built around the Impinj Indy
//! R2000 chipset, speaking the vendor's binary serial protocol over
//! RS-485/UART.
//!
//! The driver is a framed request/response engine: commands are written as
//! `0xA0`-framed packets, replies are matched to pending commands in FIFO
//! order, and tag sightings arriving as unsolicited events during inventory
//! are streamed to a per-call callback. Multi-frame replies (buffer dumps and
//! tag operation batches) are accumulated transparently and returned as one
//! record list.
//!
//! # Example
//!
//! ```ignore
//! use indy_reader::Client;
//!
//! let mut reader = Client::open("/dev/ttyUSB0", 115_200, 0x01)?;
//! let (major, minor) = reader.firmware_version()?;
//! println!("firmware v{major}.{minor}");
//!
//! reader.real_time_inventory(255, |tag| {
//!     println!("{:02X?} at {} dBm", tag.epc, tag.rssi_dbm);
//! })?;
//! ```
//!
//! If the `"serial2"` feature (enabled by default) is active, [`Client`]
//! defaults to the [`serial2::SerialPort`] backend. Any transport can be used
//! by implementing the [`SerialPort`] trait.

pub mod catalog;
pub mod checksum;

mod client;
mod commands;
mod dispatch;
mod endian;
mod error;
mod frame;
mod response;
mod serial_port;
mod types;

pub use client::Client;
pub use commands::{Password, Uid6b, IDENTIFIER_LEN, NO_PASSWORD};
pub use error::{
	ExpectedCount, InvalidArgument, InvalidLength, InvalidReply, InvalidReplyLength, InvalidValue, ReadError,
	ReaderError, Timeout, TransferError, ValueOutOfRange, WriteError,
};
pub use response::RSSI_OFFSET_DBM;
pub use serial_port::SerialPort;
pub use types::{
	Antenna, AntennaMissing, AntennaSlot, BaudRate, BeeperMode, BufferedInventorySummary, BufferedTag, Event,
	FastSwitchInventory, FastTidMode, FrequencyBand, GpioLevel, Inventory6bSummary, InventorySummary, InventoryTag,
	LockBank, LockType, MaskId, MemoryBank, ModuleFunction, PcWord, ReadRecord, Region, RfLinkProfile, Session,
	SessionInventory, Tag6b, TagMask, TagMaskEntry, TagOpRecord, Target,
};
