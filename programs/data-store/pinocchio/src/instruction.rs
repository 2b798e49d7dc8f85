use solana_program_error::ProgramError;

/// Instructions understood by the program, tagged by their first byte.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreInstruction<'a> {
    /// `0 ++ payload`: create the account if needed, then resize and write
    Save(&'a [u8]),
    /// `1`: delete the account and refund its lamports
    Close,
}

impl<'a> StoreInstruction<'a> {
    pub const SAVE: u8 = 0;
    pub const CLOSE: u8 = 1;

    pub fn unpack(instruction_data: &'a [u8]) -> Result<Self, ProgramError> {
        let (tag, rest) = instruction_data
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;

        match *tag {
            Self::SAVE => Ok(Self::Save(rest)),
            Self::CLOSE if rest.is_empty() => Ok(Self::Close),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}
