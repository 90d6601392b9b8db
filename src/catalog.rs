//! The command catalog: command codes, reply classification policy and reader error codes.
//!
//! The reader protocol does not tag replies as "error" or "data" on the wire.
//! Whether the first payload byte of a reply is an error code depends on the
//! command that solicited it, and for a handful of commands on the payload
//! itself. The dispatcher drives that decision entirely from this catalog,
//! except for the three documented special cases handled by [`ErrorPolicy::Sometimes`].

/// The broadcast ("public") peer address.
///
/// A client configured with this address accepts replies from any peer.
pub const BROADCAST_ADDRESS: u8 = 0xFF;

#[rustfmt::skip]
pub mod command_id {
	pub const GET_GPIO_VALUE                : u8 = 0x60;
	pub const SET_GPIO_VALUE                : u8 = 0x61;
	pub const SET_ANT_CONNECTION_DETECTOR   : u8 = 0x62;
	pub const GET_ANT_CONNECTION_DETECTOR   : u8 = 0x63;
	pub const SET_TEMPORARY_OUTPUT_POWER    : u8 = 0x66;
	pub const SET_READER_IDENTIFIER         : u8 = 0x67;
	pub const GET_READER_IDENTIFIER         : u8 = 0x68;
	pub const SET_RF_LINK_PROFILE           : u8 = 0x69;
	pub const GET_RF_LINK_PROFILE           : u8 = 0x6A;
	pub const RESET                         : u8 = 0x70;
	pub const SET_UART_BAUD_RATE            : u8 = 0x71;
	pub const GET_FIRMWARE_VERSION          : u8 = 0x72;
	pub const SET_READER_ADDRESS            : u8 = 0x73;
	pub const SET_WORK_ANTENNA              : u8 = 0x74;
	pub const GET_WORK_ANTENNA              : u8 = 0x75;
	pub const SET_OUTPUT_POWER              : u8 = 0x76;
	pub const GET_OUTPUT_POWER              : u8 = 0x77;
	pub const SET_FREQUENCY_REGION          : u8 = 0x78;
	pub const GET_FREQUENCY_REGION          : u8 = 0x79;
	pub const SET_BEEPER_MODE               : u8 = 0x7A;
	pub const GET_READER_TEMPERATURE        : u8 = 0x7B;
	pub const SET_DRM_MODE                  : u8 = 0x7C;
	pub const GET_DRM_MODE                  : u8 = 0x7D;
	pub const GET_RF_PORT_RETURN_LOSS       : u8 = 0x7E;
	pub const INVENTORY                     : u8 = 0x80;
	pub const READ                          : u8 = 0x81;
	pub const WRITE                         : u8 = 0x82;
	pub const LOCK                          : u8 = 0x83;
	pub const KILL                          : u8 = 0x84;
	pub const SET_ACCESS_EPC_MATCH          : u8 = 0x85;
	pub const GET_ACCESS_EPC_MATCH          : u8 = 0x86;
	pub const REAL_TIME_INVENTORY           : u8 = 0x89;
	pub const FAST_SWITCH_ANT_INVENTORY     : u8 = 0x8A;
	pub const CUSTOMIZED_SESSION_TARGET_INVENTORY: u8 = 0x8B;
	pub const SET_IMPINJ_FAST_TID           : u8 = 0x8C;
	pub const SET_AND_SAVE_IMPINJ_FAST_TID  : u8 = 0x8D;
	pub const GET_IMPINJ_FAST_TID           : u8 = 0x8E;
	pub const GET_ANT_SWITCH_SEQUENCE       : u8 = 0x8F;
	pub const GET_INVENTORY_BUFFER          : u8 = 0x90;
	pub const GET_AND_RESET_INVENTORY_BUFFER: u8 = 0x91;
	pub const GET_INVENTORY_BUFFER_TAG_COUNT: u8 = 0x92;
	pub const RESET_INVENTORY_BUFFER        : u8 = 0x93;
	pub const WRITE_BLOCK                   : u8 = 0x94;
	pub const GET_OUTPUT_POWER_8P           : u8 = 0x97;
	pub const TAG_MASK                      : u8 = 0x98;
	pub const SET_MODULE_FUNCTION           : u8 = 0xA0;
	pub const GET_MODULE_FUNCTION           : u8 = 0xA1;
	pub const ISO18000_6B_INVENTORY         : u8 = 0xB0;
	pub const ISO18000_6B_READ              : u8 = 0xB1;
	pub const ISO18000_6B_WRITE             : u8 = 0xB2;
	pub const ISO18000_6B_LOCK              : u8 = 0xB3;
	pub const ISO18000_6B_QUERY_LOCK        : u8 = 0xB4;
}

#[rustfmt::skip]
pub mod error_code {
	pub const SUCCESS                       : u8 = 0x10;
	pub const FAIL                          : u8 = 0x11;
	pub const MCU_RESET_ERROR               : u8 = 0x20;
	pub const CW_ON_ERROR                   : u8 = 0x21;
	pub const ANTENNA_MISSING_ERROR         : u8 = 0x22;
	pub const WRITE_FLASH_ERROR             : u8 = 0x23;
	pub const READ_FLASH_ERROR              : u8 = 0x24;
	pub const SET_OUTPUT_POWER_ERROR        : u8 = 0x25;
	pub const TAG_INVENTORY_ERROR           : u8 = 0x31;
	pub const TAG_READ_ERROR                : u8 = 0x32;
	pub const TAG_WRITE_ERROR               : u8 = 0x33;
	pub const TAG_LOCK_ERROR                : u8 = 0x34;
	pub const TAG_KILL_ERROR                : u8 = 0x35;
	pub const NO_TAG_ERROR                  : u8 = 0x36;
	pub const INVENTORY_OK_ACCESS_FAIL      : u8 = 0x37;
	pub const BUFFER_IS_EMPTY               : u8 = 0x38;
	pub const NXP_CUSTOM_COMMAND_FAIL       : u8 = 0x3C;
	pub const ACCESS_OR_PASSWORD_ERROR      : u8 = 0x40;
	pub const PARAMETER_INVALID             : u8 = 0x41;
	pub const PARAMETER_INVALID_WORD_COUNT  : u8 = 0x42;
	pub const PARAMETER_INVALID_MEMBANK     : u8 = 0x43;
	pub const PARAMETER_INVALID_LOCK_REGION : u8 = 0x44;
	pub const PARAMETER_INVALID_LOCK_ACTION : u8 = 0x45;
	pub const PARAMETER_READER_ADDRESS_INVALID: u8 = 0x46;
	pub const PARAMETER_INVALID_ANTENNA_ID  : u8 = 0x47;
	pub const PARAMETER_INVALID_OUTPUT_POWER: u8 = 0x48;
	pub const PARAMETER_INVALID_FREQUENCY_REGION: u8 = 0x49;
	pub const PARAMETER_INVALID_BAUD_RATE   : u8 = 0x4A;
	pub const PARAMETER_INVALID_BEEPER_MODE : u8 = 0x4B;
	pub const PARAMETER_EPC_MATCH_LEN_TOO_LONG: u8 = 0x4C;
	pub const PARAMETER_EPC_MATCH_LEN_ERROR : u8 = 0x4D;
	pub const PARAMETER_INVALID_EPC_MATCH_MODE: u8 = 0x4E;
	pub const PARAMETER_INVALID_FREQUENCY_RANGE: u8 = 0x4F;
	pub const PLL_LOCK_FAIL                 : u8 = 0x52;
	pub const RF_CHIP_FAIL_TO_RESPONSE      : u8 = 0x53;
	pub const FAIL_TO_ACHIEVE_DESIRED_OUTPUT_POWER: u8 = 0x57;
	pub const FAIL_TO_GET_RF_PORT_RETURN_LOSS: u8 = 0xEE;
}

/// A human readable name for a reader error code.
pub fn error_name(code: u8) -> &'static str {
	use error_code::*;
	match code {
		SUCCESS => "success",
		FAIL => "command failed",
		MCU_RESET_ERROR => "MCU reset error",
		CW_ON_ERROR => "CW on error",
		ANTENNA_MISSING_ERROR => "antenna missing",
		WRITE_FLASH_ERROR => "failed to write flash",
		READ_FLASH_ERROR => "failed to read flash",
		SET_OUTPUT_POWER_ERROR => "failed to set output power",
		TAG_INVENTORY_ERROR => "tag inventory error",
		TAG_READ_ERROR => "tag read error",
		TAG_WRITE_ERROR => "tag write error",
		TAG_LOCK_ERROR => "tag lock error",
		TAG_KILL_ERROR => "tag kill error",
		NO_TAG_ERROR => "no operable tag found",
		INVENTORY_OK_ACCESS_FAIL => "inventory succeeded but access failed",
		BUFFER_IS_EMPTY => "inventory buffer is empty",
		NXP_CUSTOM_COMMAND_FAIL => "NXP custom command failed",
		ACCESS_OR_PASSWORD_ERROR => "access failed or wrong password",
		PARAMETER_INVALID => "invalid parameter",
		PARAMETER_INVALID_WORD_COUNT => "invalid word count",
		PARAMETER_INVALID_MEMBANK => "invalid memory bank",
		PARAMETER_INVALID_LOCK_REGION => "invalid lock region",
		PARAMETER_INVALID_LOCK_ACTION => "invalid lock action",
		PARAMETER_READER_ADDRESS_INVALID => "invalid reader address",
		PARAMETER_INVALID_ANTENNA_ID => "invalid antenna ID",
		PARAMETER_INVALID_OUTPUT_POWER => "invalid output power",
		PARAMETER_INVALID_FREQUENCY_REGION => "invalid frequency region",
		PARAMETER_INVALID_BAUD_RATE => "invalid baud rate",
		PARAMETER_INVALID_BEEPER_MODE => "invalid beeper mode",
		PARAMETER_EPC_MATCH_LEN_TOO_LONG => "EPC match too long",
		PARAMETER_EPC_MATCH_LEN_ERROR => "EPC match length error",
		PARAMETER_INVALID_EPC_MATCH_MODE => "invalid EPC match mode",
		PARAMETER_INVALID_FREQUENCY_RANGE => "invalid frequency range",
		PLL_LOCK_FAIL => "PLL failed to lock",
		RF_CHIP_FAIL_TO_RESPONSE => "no response from RF chip",
		FAIL_TO_ACHIEVE_DESIRED_OUTPUT_POWER => "output power too low",
		FAIL_TO_GET_RF_PORT_RETURN_LOSS => "failed to measure return loss",
		_ => "unknown error",
	}
}

/// How a reply to a command reports reader errors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorPolicy {
	/// The first payload byte is always data.
	Never,

	/// The first payload byte is always an error code.
	/// The command succeeded iff the code is [`error_code::SUCCESS`].
	Always,

	/// The first payload byte is an error code iff it is the only payload byte.
	IfSingleByteData,

	/// Classification depends on the payload contents; see the dispatcher.
	Sometimes,
}

/// Static description of a command.
#[derive(Debug)]
pub struct Descriptor {
	/// A short name for log messages.
	pub name: &'static str,

	/// How replies to this command report errors.
	pub policy: ErrorPolicy,
}

/// Look up the descriptor for a command code.
///
/// Returns [`None`] for codes the protocol does not define;
/// replies carrying such codes are dropped by the dispatcher.
#[rustfmt::skip]
pub fn descriptor(command: u8) -> Option<&'static Descriptor> {
	use command_id::*;
	use ErrorPolicy::*;

	macro_rules! descriptor {
		($name:literal, $policy:expr) => {{
			static DESCRIPTOR: Descriptor = Descriptor { name: $name, policy: $policy };
			Some(&DESCRIPTOR)
		}};
	}

	match command {
		GET_GPIO_VALUE                 => descriptor!("get_gpio_value", IfSingleByteData),
		SET_GPIO_VALUE                 => descriptor!("set_gpio_value", Always),
		SET_ANT_CONNECTION_DETECTOR    => descriptor!("set_ant_connection_detector", Always),
		GET_ANT_CONNECTION_DETECTOR    => descriptor!("get_ant_connection_detector", Never),
		SET_TEMPORARY_OUTPUT_POWER     => descriptor!("set_temporary_output_power", Always),
		SET_READER_IDENTIFIER          => descriptor!("set_reader_identifier", Always),
		GET_READER_IDENTIFIER          => descriptor!("get_reader_identifier", IfSingleByteData),
		SET_RF_LINK_PROFILE            => descriptor!("set_rf_link_profile", Always),
		GET_RF_LINK_PROFILE            => descriptor!("get_rf_link_profile", Sometimes),
		RESET                          => descriptor!("reset", Never),
		SET_UART_BAUD_RATE             => descriptor!("set_uart_baud_rate", Always),
		GET_FIRMWARE_VERSION           => descriptor!("get_firmware_version", Never),
		SET_READER_ADDRESS             => descriptor!("set_reader_address", Always),
		SET_WORK_ANTENNA               => descriptor!("set_work_antenna", Always),
		GET_WORK_ANTENNA               => descriptor!("get_work_antenna", Never),
		SET_OUTPUT_POWER               => descriptor!("set_output_power", Always),
		GET_OUTPUT_POWER               => descriptor!("get_output_power", Never),
		SET_FREQUENCY_REGION           => descriptor!("set_frequency_region", Always),
		GET_FREQUENCY_REGION           => descriptor!("get_frequency_region", IfSingleByteData),
		SET_BEEPER_MODE                => descriptor!("set_beeper_mode", Always),
		GET_READER_TEMPERATURE         => descriptor!("get_reader_temperature", IfSingleByteData),
		SET_DRM_MODE                   => descriptor!("set_drm_mode", Always),
		GET_DRM_MODE                   => descriptor!("get_drm_mode", Never),
		GET_RF_PORT_RETURN_LOSS        => descriptor!("get_rf_port_return_loss", Sometimes),
		INVENTORY                      => descriptor!("inventory", IfSingleByteData),
		READ                           => descriptor!("read", IfSingleByteData),
		WRITE                          => descriptor!("write", IfSingleByteData),
		LOCK                           => descriptor!("lock", IfSingleByteData),
		KILL                           => descriptor!("kill", IfSingleByteData),
		SET_ACCESS_EPC_MATCH           => descriptor!("set_access_epc_match", Always),
		GET_ACCESS_EPC_MATCH           => descriptor!("get_access_epc_match", Never),
		REAL_TIME_INVENTORY            => descriptor!("real_time_inventory", IfSingleByteData),
		FAST_SWITCH_ANT_INVENTORY      => descriptor!("fast_switch_ant_inventory", IfSingleByteData),
		CUSTOMIZED_SESSION_TARGET_INVENTORY => descriptor!("customized_session_target_inventory", IfSingleByteData),
		SET_IMPINJ_FAST_TID            => descriptor!("set_impinj_fast_tid", Always),
		SET_AND_SAVE_IMPINJ_FAST_TID   => descriptor!("set_and_save_impinj_fast_tid", Always),
		GET_IMPINJ_FAST_TID            => descriptor!("get_impinj_fast_tid", Never),
		GET_ANT_SWITCH_SEQUENCE        => descriptor!("get_ant_switch_sequence", IfSingleByteData),
		GET_INVENTORY_BUFFER           => descriptor!("get_inventory_buffer", IfSingleByteData),
		GET_AND_RESET_INVENTORY_BUFFER => descriptor!("get_and_reset_inventory_buffer", IfSingleByteData),
		GET_INVENTORY_BUFFER_TAG_COUNT => descriptor!("get_inventory_buffer_tag_count", IfSingleByteData),
		RESET_INVENTORY_BUFFER         => descriptor!("reset_inventory_buffer", Always),
		WRITE_BLOCK                    => descriptor!("write_block", IfSingleByteData),
		GET_OUTPUT_POWER_8P            => descriptor!("get_output_power_8p", Never),
		TAG_MASK                       => descriptor!("tag_mask", Sometimes),
		SET_MODULE_FUNCTION            => descriptor!("set_module_function", Always),
		GET_MODULE_FUNCTION            => descriptor!("get_module_function", Never),
		ISO18000_6B_INVENTORY          => descriptor!("iso18000_6b_inventory", IfSingleByteData),
		ISO18000_6B_READ               => descriptor!("iso18000_6b_read", IfSingleByteData),
		ISO18000_6B_WRITE              => descriptor!("iso18000_6b_write", Always),
		ISO18000_6B_LOCK               => descriptor!("iso18000_6b_lock", Always),
		ISO18000_6B_QUERY_LOCK         => descriptor!("iso18000_6b_query_lock", IfSingleByteData),
		_ => None,
	}
}

/// Number of entries in the frequency table.
pub const FREQUENCY_COUNT: u8 = 60;

/// The carrier frequency in kHz for a frequency table index.
///
/// The table has 60 entries: indexes 0..=6 cover 865.0 MHz to 868.0 MHz in
/// 500 kHz steps, indexes 7..=59 cover 902.0 MHz to 928.0 MHz in 500 kHz steps.
pub fn frequency_khz(index: u8) -> Option<u32> {
	match index {
		0..=6 => Some(865_000 + 500 * u32::from(index)),
		7..=59 => Some(902_000 + 500 * u32::from(index - 7)),
		_ => None,
	}
}

/// The frequency table index for a carrier frequency in kHz.
///
/// The inverse of [`frequency_khz`]; returns [`None`] for frequencies not in the table.
pub fn frequency_index(khz: u32) -> Option<u8> {
	let index = match khz {
		865_000..=868_000 => (khz - 865_000) / 500,
		902_000..=928_000 => (khz - 902_000) / 500 + 7,
		_ => return None,
	};
	if frequency_khz(index as u8) == Some(khz) {
		Some(index as u8)
	} else {
		None
	}
}
