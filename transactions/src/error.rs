use thiserror::Error;
use votelink_types::{Deadline, TypesError};

use crate::codec::CodecError;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("decode error: {0}")]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("end epoch {end} precedes start epoch {start}")]
    InvalidEpochRange { start: u32, end: u32 },

    #[error("linked voting key is all zeros")]
    ZeroLinkedKey,

    #[error("deadline {deadline} has passed (network time {now})")]
    Expired { deadline: Deadline, now: Deadline },

    #[error("invalid transaction DTO: {0}")]
    Dto(String),

    #[error("config error: {0}")]
    Config(String),
}
