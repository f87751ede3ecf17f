use crate::{SdkError, SdkResult};
use solana_sdk::pubkey::Pubkey;

/// Fixed 8-byte tag selecting the program instruction.
pub type Discriminator = [u8; 8];

/// One typed instruction argument and its wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Raw 32 bytes
    Address(Pubkey),
    /// UTF-8 bytes behind a u32 little-endian length prefix
    Str(&'a str),
}

impl Arg<'_> {
    fn encoded_len(&self) -> usize {
        match self {
            Arg::U8(_) => 1,
            Arg::U16(_) => 2,
            Arg::U32(_) => 4,
            Arg::U64(_) => 8,
            Arg::Address(_) => 32,
            Arg::Str(value) => 4 + value.len(),
        }
    }
}

/// Serialize a discriminator followed by tightly packed little-endian arguments.
pub fn encode(discriminator: &Discriminator, args: &[Arg<'_>]) -> SdkResult<Vec<u8>> {
    let capacity = discriminator.len() + args.iter().map(Arg::encoded_len).sum::<usize>();
    let mut data = Vec::with_capacity(capacity);
    data.extend_from_slice(discriminator);

    for arg in args {
        match arg {
            Arg::U8(value) => data.push(*value),
            Arg::U16(value) => data.extend_from_slice(&value.to_le_bytes()),
            Arg::U32(value) => data.extend_from_slice(&value.to_le_bytes()),
            Arg::U64(value) => data.extend_from_slice(&value.to_le_bytes()),
            Arg::Address(value) => data.extend_from_slice(value.as_ref()),
            Arg::Str(value) => {
                let len = u32::try_from(value.len()).map_err(|_| SdkError::ArgumentRange {
                    name: "string",
                    reason: format!("{} bytes does not fit a u32 length prefix", value.len()),
                })?;
                data.extend_from_slice(&len.to_le_bytes());
                data.extend_from_slice(value.as_bytes());
            }
        }
    }

    Ok(data)
}

/// Instruction payload for one program instruction variant.
pub trait InstructionData {
    const DISCRIMINATOR: Discriminator;

    /// Arguments in declared order.
    fn args(&self) -> Vec<Arg<'_>>;

    fn data(&self) -> SdkResult<Vec<u8>> {
        encode(&Self::DISCRIMINATOR, &self.args())
    }
}

/// Parse a currency amount, rejecting negative values and anything beyond u64.
pub fn parse_amount(name: &'static str, raw: &str) -> SdkResult<u64> {
    parse_unsigned(name, raw)
}

/// Parse a decimal string into an unsigned integer of the requested width.
pub fn parse_unsigned<T>(name: &'static str, raw: &str) -> SdkResult<T>
where
    T: TryFrom<u128>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SdkError::InvalidArgument {
            name,
            reason: "value is empty".to_string(),
        });
    }
    if let Some(magnitude) = trimmed.strip_prefix('-') {
        if magnitude.chars().all(|c| c.is_ascii_digit()) && !magnitude.is_empty() {
            return Err(SdkError::ArgumentRange {
                name,
                reason: format!("{} is negative", trimmed),
            });
        }
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(SdkError::InvalidArgument {
            name,
            reason: format!("{:?} is not a decimal integer", trimmed),
        });
    }

    let out_of_range = || SdkError::ArgumentRange {
        name,
        reason: format!("{} exceeds the {}-bit range", trimmed, std::mem::size_of::<T>() * 8),
    };
    let wide: u128 = trimmed.parse().map_err(|_| out_of_range())?;
    T::try_from(wide).map_err(|_| out_of_range())
}
