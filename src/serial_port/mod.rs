//! [`SerialPort`] trait to support reading/writing from different serial port implementations.

use core::time::Duration;

#[cfg(feature = "serial2")]
pub mod serial2;

/// The byte-sink contract between the driver and a serial port.
///
/// The implementor must configure the line for 8 data bits, 1 stop bit, no
/// parity and no flow control. The driver performs no line discipline beyond
/// frame scanning, but it does change the baud rate after a successful baud
/// rate command, so [`SerialPort::set_baud_rate`] must take effect on the
/// open port.
pub trait SerialPort {
	/// The error type returned by the serial port when reading, writing or setting the baud rate.
	type Error;

	/// A point in time that can be used as a deadline for I/O operations.
	type Instant: Copy;

	/// Set the baud rate of the serial port.
	fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

	/// Discard the input buffer of the serial port. May be a no-op on some platforms.
	fn discard_input_buffer(&mut self) -> Result<(), Self::Error>;

	/// Read available bytes, blocking until at least one byte is available or the deadline expires.
	fn read(&mut self, buffer: &mut [u8], deadline: &Self::Instant) -> Result<usize, Self::Error>;

	/// Write all bytes in the buffer to the serial port.
	fn write_all(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;

	/// Make a deadline that expires after the given timeout.
	fn make_deadline(&self, timeout: Duration) -> Self::Instant;

	/// Check if an error indicates a timeout.
	fn is_timeout_error(error: &Self::Error) -> bool;
}
