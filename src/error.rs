use crate::catalog::error_name;

/// An error that can occur during a command transfer.
#[derive(Debug)]
pub enum TransferError<E> {
	WriteError(WriteError<E>),
	ReadError(ReadError<E>),
}

/// An error that can occur while sending a command frame.
#[derive(Debug)]
pub enum WriteError<E> {
	/// An argument was rejected before anything was written to the serial port.
	InvalidArgument(InvalidArgument),

	/// Discarding the serial port input buffer failed.
	DiscardBuffer(E),

	/// Writing to the serial port failed.
	Write(E),
}

/// An error that can occur while waiting for the reply to a command.
#[derive(Debug)]
pub enum ReadError<E> {
	/// Reading from the serial port failed.
	Io(E),

	/// No reply arrived before the deadline.
	Timeout(Timeout),

	/// The reader reported a protocol error code.
	Reader(ReaderError),

	/// The reply was classified as successful but its payload is malformed.
	InvalidReply(InvalidReply),
}

/// An argument was rejected by the driver before any bytes were written.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InvalidArgument {
	ValueOutOfRange(ValueOutOfRange),
	InvalidLength(InvalidLength),
}

/// A numeric argument was outside the accepted range.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValueOutOfRange {
	pub name: &'static str,
	pub value: u32,
	pub min: u32,
	pub max: u32,
}

/// A buffer argument had the wrong length.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidLength {
	pub name: &'static str,
	pub actual: usize,
	pub expected: ExpectedCount,
}

/// The expected length or count of something.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ExpectedCount {
	Exact(usize),
	Max(usize),
	Min(usize),
	OneOf(&'static [usize]),
}

/// The reply to a command did not arrive before the deadline.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Timeout {
	/// The command code that went unanswered.
	pub command: u8,
}

/// The reader reported an error code in a reply.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReaderError {
	/// The command code the error is a reply to.
	pub command: u8,

	/// The raw error code from the reply.
	pub code: u8,
}

/// A reply was classified as successful but its payload could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InvalidReply {
	InvalidReplyLength(InvalidReplyLength),
	InvalidValue(InvalidValue),
}

/// A reply payload had an impossible length.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidReplyLength {
	pub actual: usize,
	pub expected: ExpectedCount,
}

/// A byte in a reply payload is not a valid value for its field.
///
/// Also used to reject raw bytes that do not map to a catalog enum.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidValue {
	pub what: &'static str,
	pub value: u8,
}

impl ReaderError {
	/// The catalog name of the error code.
	pub fn name(&self) -> &'static str {
		error_name(self.code)
	}
}

impl ValueOutOfRange {
	pub(crate) fn check(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), Self> {
		if value >= min && value <= max {
			Ok(())
		} else {
			Err(Self { name, value, min, max })
		}
	}
}

impl InvalidLength {
	pub(crate) fn check(name: &'static str, actual: usize, expected: usize) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self {
				name,
				actual,
				expected: ExpectedCount::Exact(expected),
			})
		}
	}

	pub(crate) fn check_one_of(name: &'static str, actual: usize, options: &'static [usize]) -> Result<(), Self> {
		if options.contains(&actual) {
			Ok(())
		} else {
			Err(Self {
				name,
				actual,
				expected: ExpectedCount::OneOf(options),
			})
		}
	}

	pub(crate) fn check_range(name: &'static str, actual: usize, min: usize, max: usize) -> Result<(), Self> {
		if actual < min {
			Err(Self {
				name,
				actual,
				expected: ExpectedCount::Min(min),
			})
		} else if actual > max {
			Err(Self {
				name,
				actual,
				expected: ExpectedCount::Max(max),
			})
		} else {
			Ok(())
		}
	}
}

impl InvalidReplyLength {
	pub(crate) fn check(actual: usize, expected: usize) -> Result<(), Self> {
		if actual == expected {
			Ok(())
		} else {
			Err(Self {
				actual,
				expected: ExpectedCount::Exact(expected),
			})
		}
	}

	pub(crate) fn check_min(actual: usize, min: usize) -> Result<(), Self> {
		if actual >= min {
			Ok(())
		} else {
			Err(Self {
				actual,
				expected: ExpectedCount::Min(min),
			})
		}
	}
}

impl<E> std::error::Error for TransferError<E> where E: std::fmt::Debug + std::fmt::Display {}
impl<E> std::error::Error for WriteError<E> where E: std::fmt::Debug + std::fmt::Display {}
impl<E> std::error::Error for ReadError<E> where E: std::fmt::Debug + std::fmt::Display {}
impl std::error::Error for InvalidArgument {}
impl std::error::Error for ValueOutOfRange {}
impl std::error::Error for InvalidLength {}
impl std::error::Error for Timeout {}
impl std::error::Error for ReaderError {}
impl std::error::Error for InvalidReply {}
impl std::error::Error for InvalidReplyLength {}
impl std::error::Error for InvalidValue {}

impl<E> From<WriteError<E>> for TransferError<E> {
	fn from(other: WriteError<E>) -> Self {
		Self::WriteError(other)
	}
}

impl<E> From<ReadError<E>> for TransferError<E> {
	fn from(other: ReadError<E>) -> Self {
		Self::ReadError(other)
	}
}

impl<E> From<InvalidArgument> for TransferError<E> {
	fn from(other: InvalidArgument) -> Self {
		Self::WriteError(WriteError::InvalidArgument(other))
	}
}

impl<E> From<ValueOutOfRange> for TransferError<E> {
	fn from(other: ValueOutOfRange) -> Self {
		InvalidArgument::from(other).into()
	}
}

impl<E> From<InvalidLength> for TransferError<E> {
	fn from(other: InvalidLength) -> Self {
		InvalidArgument::from(other).into()
	}
}

impl<E> From<Timeout> for TransferError<E> {
	fn from(other: Timeout) -> Self {
		Self::ReadError(ReadError::Timeout(other))
	}
}

impl<E> From<ReaderError> for TransferError<E> {
	fn from(other: ReaderError) -> Self {
		Self::ReadError(ReadError::Reader(other))
	}
}

impl<E> From<InvalidReply> for TransferError<E> {
	fn from(other: InvalidReply) -> Self {
		Self::ReadError(ReadError::InvalidReply(other))
	}
}

impl<E> From<InvalidReplyLength> for TransferError<E> {
	fn from(other: InvalidReplyLength) -> Self {
		InvalidReply::from(other).into()
	}
}

impl<E> From<InvalidValue> for TransferError<E> {
	fn from(other: InvalidValue) -> Self {
		InvalidReply::from(other).into()
	}
}

impl From<ValueOutOfRange> for InvalidArgument {
	fn from(other: ValueOutOfRange) -> Self {
		Self::ValueOutOfRange(other)
	}
}

impl From<InvalidLength> for InvalidArgument {
	fn from(other: InvalidLength) -> Self {
		Self::InvalidLength(other)
	}
}

impl<E> From<InvalidArgument> for WriteError<E> {
	fn from(other: InvalidArgument) -> Self {
		Self::InvalidArgument(other)
	}
}

impl<E> From<Timeout> for ReadError<E> {
	fn from(other: Timeout) -> Self {
		Self::Timeout(other)
	}
}

impl<E> From<ReaderError> for ReadError<E> {
	fn from(other: ReaderError) -> Self {
		Self::Reader(other)
	}
}

impl<E> From<InvalidReply> for ReadError<E> {
	fn from(other: InvalidReply) -> Self {
		Self::InvalidReply(other)
	}
}

impl<E> From<InvalidReplyLength> for ReadError<E> {
	fn from(other: InvalidReplyLength) -> Self {
		Self::InvalidReply(other.into())
	}
}

impl<E> From<InvalidValue> for ReadError<E> {
	fn from(other: InvalidValue) -> Self {
		Self::InvalidReply(other.into())
	}
}

impl From<InvalidReplyLength> for InvalidReply {
	fn from(other: InvalidReplyLength) -> Self {
		Self::InvalidReplyLength(other)
	}
}

impl From<InvalidValue> for InvalidReply {
	fn from(other: InvalidValue) -> Self {
		Self::InvalidValue(other)
	}
}

impl<E> std::fmt::Display for TransferError<E>
where
	E: std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::WriteError(e) => write!(f, "{}", e),
			Self::ReadError(e) => write!(f, "{}", e),
		}
	}
}

impl<E> std::fmt::Display for WriteError<E>
where
	E: std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidArgument(e) => write!(f, "{}", e),
			Self::DiscardBuffer(e) => write!(f, "failed to discard serial port input buffer: {}", e),
			Self::Write(e) => write!(f, "failed to write to serial port: {}", e),
		}
	}
}

impl<E> std::fmt::Display for ReadError<E>
where
	E: std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Io(e) => write!(f, "failed to read from serial port: {}", e),
			Self::Timeout(e) => write!(f, "{}", e),
			Self::Reader(e) => write!(f, "{}", e),
			Self::InvalidReply(e) => write!(f, "{}", e),
		}
	}
}

impl std::fmt::Display for InvalidArgument {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ValueOutOfRange(e) => write!(f, "{}", e),
			Self::InvalidLength(e) => write!(f, "{}", e),
		}
	}
}

impl std::fmt::Display for ValueOutOfRange {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"{} out of range: expected a value in {}..={}, got {}",
			self.name, self.min, self.max, self.value
		)
	}
}

impl std::fmt::Display for ExpectedCount {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Exact(x) => write!(f, "exactly {}", x),
			Self::Max(x) => write!(f, "at most {}", x),
			Self::Min(x) => write!(f, "at least {}", x),
			Self::OneOf(options) => write!(f, "one of {:?}", options),
		}
	}
}

impl std::fmt::Display for InvalidLength {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"invalid length for {}: expected {} bytes, got {}",
			self.name, self.expected, self.actual
		)
	}
}

impl std::fmt::Display for Timeout {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "no reply to command {:#04X} before the deadline", self.command)
	}
}

impl std::fmt::Display for ReaderError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"reader reported error {:#04X} ({}) for command {:#04X}",
			self.code,
			self.name(),
			self.command
		)
	}
}

impl std::fmt::Display for InvalidReply {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidReplyLength(e) => write!(f, "{}", e),
			Self::InvalidValue(e) => write!(f, "{}", e),
		}
	}
}

impl std::fmt::Display for InvalidReplyLength {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"invalid reply payload length: expected {} bytes, got {}",
			self.expected, self.actual
		)
	}
}

impl std::fmt::Display for InvalidValue {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "invalid value for {}: {:#04X}", self.what, self.value)
	}
}
