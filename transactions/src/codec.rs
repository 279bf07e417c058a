//! Fixed-width binary codec for transaction payloads.
//!
//! All integers are little-endian. Every payload starts with its total size
//! followed by four reserved bytes. The standalone form then carries the
//! signature, signer, version/network/type, fee and deadline; the embedded
//! form (used inside aggregates) carries only signer and version/network/type.
//! The type-specific body follows the header in both forms.
//!
//! ```text
//! standalone: size(4) rsv(4) signature(64) signer(32) rsv(4) version(1) network(1) type(2) fee(8) deadline(8) body
//! embedded:   size(4) rsv(4) signer(32) rsv(4) version(1) network(1) type(2) body
//! ```

use thiserror::Error;
use votelink_types::{LinkAction, NetworkType, PublicKey, Signature, TransactionType, VotingKey};

/// Bytes before the body in a standalone payload.
pub const STANDALONE_HEADER_SIZE: usize = 128;
/// Bytes before the body in an embedded payload.
pub const EMBEDDED_HEADER_SIZE: usize = 48;
/// Where the signature starts in a standalone payload.
pub const SIGNATURE_OFFSET: usize = 8;
/// Start of the signed region (version onwards) in a standalone payload.
pub const SIGNING_OFFSET: usize = 108;

const STANDALONE_TYPE_OFFSET: usize = 110;
const EMBEDDED_TYPE_OFFSET: usize = 46;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("payload is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("payload truncated reading {field}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("declared size {declared} does not match payload length {actual}")]
    SizeMismatch { declared: u32, actual: usize },

    #[error("{0} unexpected trailing bytes after transaction body")]
    TrailingBytes(usize),

    #[error("unknown network type: {0:#04x}")]
    UnknownNetworkType(u8),

    #[error("unknown transaction type: {0:#06x}")]
    UnknownTransactionType(u16),

    #[error("expected transaction type {expected}, found {found}")]
    UnexpectedTransactionType {
        expected: TransactionType,
        found: TransactionType,
    },

    #[error("unknown link action: {0}")]
    UnknownLinkAction(u8),

    #[error("unsupported version {found}, expected {expected}")]
    UnsupportedVersion { expected: u8, found: u8 },
}

/// Cursor over a payload being decoded.
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], CodecError> {
        let end = self.pos + N;
        let slice = self.bytes.get(self.pos..end).ok_or(CodecError::Truncated {
            field,
            needed: N,
            remaining: self.remaining(),
        })?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.pos = end;
        Ok(out)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>(field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, CodecError> {
        self.read_array(field).map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, CodecError> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64, CodecError> {
        self.read_array(field).map(u64::from_le_bytes)
    }
}

/// Append-only buffer for encoding.
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// The type-specific part of a transaction, after the header.
pub trait BodyCodec: Sized {
    /// Encoded length in bytes.
    const SIZE: usize;
    /// The header type tag this body is written under.
    const TRANSACTION_TYPE: TransactionType;

    fn write(&self, w: &mut Writer);
    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError>;
}

/// Header fields of a standalone (top-level, signed) transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandaloneHeader {
    pub signature: Signature,
    pub signer: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub transaction_type: TransactionType,
    pub max_fee: u64,
    pub deadline: u64,
}

/// Header fields of a transaction embedded in an aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedHeader {
    pub signer: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub transaction_type: TransactionType,
}

/// A decoded (or to-be-encoded) transaction in one of its two wire forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionBuilder<B> {
    Standalone { header: StandaloneHeader, body: B },
    Embedded { header: EmbeddedHeader, body: B },
}

impl<B: BodyCodec> TransactionBuilder<B> {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    pub fn body(&self) -> &B {
        match self {
            Self::Standalone { body, .. } | Self::Embedded { body, .. } => body,
        }
    }

    pub fn signer(&self) -> &PublicKey {
        match self {
            Self::Standalone { header, .. } => &header.signer,
            Self::Embedded { header, .. } => &header.signer,
        }
    }

    pub fn network(&self) -> NetworkType {
        match self {
            Self::Standalone { header, .. } => header.network,
            Self::Embedded { header, .. } => header.network,
        }
    }

    /// Total encoded length.
    pub fn size(&self) -> usize {
        let header = if self.is_embedded() {
            EMBEDDED_HEADER_SIZE
        } else {
            STANDALONE_HEADER_SIZE
        };
        header + B::SIZE
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let size = self.size();
        let mut w = Writer::with_capacity(size);
        w.put_u32(size as u32);
        w.put_u32(0);
        match self {
            Self::Standalone { header, body } => {
                w.put_bytes(header.signature.as_bytes());
                w.put_bytes(header.signer.as_bytes());
                w.put_u32(0);
                w.put_u8(header.version);
                w.put_u8(header.network.as_u8());
                w.put_u16(header.transaction_type.as_u16());
                w.put_u64(header.max_fee);
                w.put_u64(header.deadline);
                body.write(&mut w);
            }
            Self::Embedded { header, body } => {
                w.put_bytes(header.signer.as_bytes());
                w.put_u32(0);
                w.put_u8(header.version);
                w.put_u8(header.network.as_u8());
                w.put_u16(header.transaction_type.as_u16());
                body.write(&mut w);
            }
        }
        w.finish()
    }

    /// Decode `bytes` using the embedded or standalone layout.
    ///
    /// The declared size must match the payload length exactly and the type
    /// tag must be the one `B` is written under.
    pub fn from_bytes(bytes: &[u8], embedded: bool) -> Result<Self, CodecError> {
        let mut r = Reader::new(bytes);
        let declared = r.read_u32("size")?;
        if declared as usize != bytes.len() {
            return Err(CodecError::SizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        r.read_u32("header reserved")?;

        let builder = if embedded {
            let signer = PublicKey::new(r.read_array("signer")?);
            r.read_u32("body reserved")?;
            let (version, network, transaction_type) = read_entity::<B>(&mut r)?;
            let body = B::read(&mut r)?;
            Self::Embedded {
                header: EmbeddedHeader {
                    signer,
                    version,
                    network,
                    transaction_type,
                },
                body,
            }
        } else {
            let signature = Signature::new(r.read_array("signature")?);
            let signer = PublicKey::new(r.read_array("signer")?);
            r.read_u32("body reserved")?;
            let (version, network, transaction_type) = read_entity::<B>(&mut r)?;
            let max_fee = r.read_u64("max fee")?;
            let deadline = r.read_u64("deadline")?;
            let body = B::read(&mut r)?;
            Self::Standalone {
                header: StandaloneHeader {
                    signature,
                    signer,
                    version,
                    network,
                    transaction_type,
                    max_fee,
                    deadline,
                },
                body,
            }
        };

        if r.remaining() != 0 {
            return Err(CodecError::TrailingBytes(r.remaining()));
        }
        Ok(builder)
    }
}

fn read_entity<B: BodyCodec>(
    r: &mut Reader<'_>,
) -> Result<(u8, NetworkType, TransactionType), CodecError> {
    let version = r.read_u8("version")?;
    let network_byte = r.read_u8("network")?;
    let network =
        NetworkType::try_from(network_byte).map_err(|_| CodecError::UnknownNetworkType(network_byte))?;
    let transaction_type = parse_type(r.read_u16("transaction type")?)?;
    if transaction_type != B::TRANSACTION_TYPE {
        return Err(CodecError::UnexpectedTransactionType {
            expected: B::TRANSACTION_TYPE,
            found: transaction_type,
        });
    }
    Ok((version, network, transaction_type))
}

fn parse_type(tag: u16) -> Result<TransactionType, CodecError> {
    TransactionType::try_from(tag).map_err(|_| CodecError::UnknownTransactionType(tag))
}

/// Decode a hex payload into bytes. Surrounding whitespace is ignored.
pub fn decode_hex(payload: &str) -> Result<Vec<u8>, CodecError> {
    Ok(hex::decode(payload.trim())?)
}

/// Read the type tag without decoding the rest of the payload.
pub fn peek_transaction_type(bytes: &[u8], embedded: bool) -> Result<TransactionType, CodecError> {
    let offset = if embedded {
        EMBEDDED_TYPE_OFFSET
    } else {
        STANDALONE_TYPE_OFFSET
    };
    let tag = bytes
        .get(offset..offset + 2)
        .ok_or(CodecError::Truncated {
            field: "transaction type",
            needed: offset + 2,
            remaining: bytes.len(),
        })?;
    parse_type(u16::from_le_bytes([tag[0], tag[1]]))
}

/// Locate the signature in a raw payload.
///
/// Embedded payloads carry none. An all-zero signature region means the
/// transaction has not been signed and is reported as absent.
pub fn extract_signature(bytes: &[u8], embedded: bool) -> Option<Signature> {
    if embedded {
        return None;
    }
    let region = bytes.get(SIGNATURE_OFFSET..SIGNATURE_OFFSET + Signature::LEN)?;
    Signature::from_slice(region).ok().filter(|sig| !sig.is_zero())
}

/// Body of a voting key link transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotingKeyLinkBody {
    pub linked_public_key: VotingKey,
    pub start_epoch: u32,
    pub end_epoch: u32,
    pub link_action: LinkAction,
}

impl BodyCodec for VotingKeyLinkBody {
    const SIZE: usize = VotingKey::LEN + 4 + 4 + 1;
    const TRANSACTION_TYPE: TransactionType = TransactionType::VotingKeyLink;

    fn write(&self, w: &mut Writer) {
        w.put_bytes(self.linked_public_key.as_bytes());
        w.put_u32(self.start_epoch);
        w.put_u32(self.end_epoch);
        w.put_u8(self.link_action.as_u8());
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        let linked_public_key = VotingKey::new(r.read_array("linked public key")?);
        let start_epoch = r.read_u32("start epoch")?;
        let end_epoch = r.read_u32("end epoch")?;
        let action = r.read_u8("link action")?;
        let link_action =
            LinkAction::try_from(action).map_err(|_| CodecError::UnknownLinkAction(action))?;
        Ok(Self {
            linked_public_key,
            start_epoch,
            end_epoch,
            link_action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> VotingKeyLinkBody {
        VotingKeyLinkBody {
            linked_public_key: VotingKey::new([0x33; 48]),
            start_epoch: 10,
            end_epoch: 0x0102_0304,
            link_action: LinkAction::Link,
        }
    }

    fn standalone() -> TransactionBuilder<VotingKeyLinkBody> {
        TransactionBuilder::Standalone {
            header: StandaloneHeader {
                signature: Signature::new([0x11; 64]),
                signer: PublicKey::new([0x22; 32]),
                version: 1,
                network: NetworkType::TestNet,
                transaction_type: TransactionType::VotingKeyLink,
                max_fee: 0x0A0B,
                deadline: 0x0C0D,
            },
            body: body(),
        }
    }

    fn embedded() -> TransactionBuilder<VotingKeyLinkBody> {
        TransactionBuilder::Embedded {
            header: EmbeddedHeader {
                signer: PublicKey::new([0x22; 32]),
                version: 1,
                network: NetworkType::MainNet,
                transaction_type: TransactionType::VotingKeyLink,
            },
            body: body(),
        }
    }

    #[test]
    fn standalone_layout_offsets() {
        let bytes = standalone().to_bytes();
        assert_eq!(bytes.len(), 185);
        assert_eq!(&bytes[0..4], &185u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &[0; 4]);
        assert_eq!(&bytes[8..72], &[0x11; 64]);
        assert_eq!(&bytes[72..104], &[0x22; 32]);
        assert_eq!(&bytes[104..108], &[0; 4]);
        assert_eq!(bytes[108], 1);
        assert_eq!(bytes[109], 0x98);
        assert_eq!(&bytes[110..112], &[0x43, 0x41]);
        assert_eq!(&bytes[112..120], &0x0A0Bu64.to_le_bytes());
        assert_eq!(&bytes[120..128], &0x0C0Du64.to_le_bytes());
        assert_eq!(&bytes[128..176], &[0x33; 48]);
        assert_eq!(&bytes[176..180], &10u32.to_le_bytes());
        assert_eq!(&bytes[180..184], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(bytes[184], 1);
    }

    #[test]
    fn embedded_layout_offsets() {
        let bytes = embedded().to_bytes();
        assert_eq!(bytes.len(), 105);
        assert_eq!(&bytes[0..4], &105u32.to_le_bytes());
        assert_eq!(&bytes[8..40], &[0x22; 32]);
        assert_eq!(bytes[44], 1);
        assert_eq!(bytes[45], 0x68);
        assert_eq!(&bytes[46..48], &[0x43, 0x41]);
        assert_eq!(&bytes[48..96], &[0x33; 48]);
        assert_eq!(bytes[104], 1);
    }

    #[test]
    fn both_forms_decode_back() {
        let s = standalone();
        assert_eq!(TransactionBuilder::from_bytes(&s.to_bytes(), false), Ok(s));
        let e = embedded();
        assert_eq!(TransactionBuilder::from_bytes(&e.to_bytes(), true), Ok(e));
    }

    #[test]
    fn wrong_form_flag_fails() {
        let bytes = embedded().to_bytes();
        assert!(TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, false).is_err());
        let bytes = standalone().to_bytes();
        assert!(TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, true).is_err());
    }

    #[test]
    fn truncated_payload_fails() {
        let bytes = standalone().to_bytes();
        let err = TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes[..100], false)
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::SizeMismatch {
                declared: 185,
                actual: 100
            }
        );
        let err = TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes[..3], false)
            .unwrap_err();
        assert!(matches!(err, CodecError::Truncated { field: "size", .. }));
    }

    #[test]
    fn size_consistent_but_short_body_fails() {
        let mut bytes = standalone().to_bytes();
        bytes.truncate(150);
        bytes[0..4].copy_from_slice(&150u32.to_le_bytes());
        let err = TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, false)
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Truncated {
                field: "linked public key",
                ..
            }
        ));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = embedded().to_bytes();
        bytes.push(0);
        bytes[0..4].copy_from_slice(&106u32.to_le_bytes());
        assert_eq!(
            TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, true),
            Err(CodecError::TrailingBytes(1))
        );
    }

    #[test]
    fn unknown_tags_rejected() {
        let mut bytes = standalone().to_bytes();
        bytes[109] = 0x01;
        assert_eq!(
            TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, false),
            Err(CodecError::UnknownNetworkType(0x01))
        );

        let mut bytes = standalone().to_bytes();
        bytes[110..112].copy_from_slice(&0x4154u16.to_le_bytes());
        assert_eq!(
            TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, false),
            Err(CodecError::UnknownTransactionType(0x4154))
        );

        let mut bytes = standalone().to_bytes();
        bytes[184] = 7;
        assert_eq!(
            TransactionBuilder::<VotingKeyLinkBody>::from_bytes(&bytes, false),
            Err(CodecError::UnknownLinkAction(7))
        );
    }

    #[test]
    fn signature_extraction() {
        let bytes = standalone().to_bytes();
        assert_eq!(
            extract_signature(&bytes, false),
            Some(Signature::new([0x11; 64]))
        );
        assert_eq!(extract_signature(&bytes, true), None);
        assert_eq!(extract_signature(&bytes[..20], false), None);

        let mut unsigned = bytes.clone();
        unsigned[8..72].fill(0);
        assert_eq!(extract_signature(&unsigned, false), None);
    }

    #[test]
    fn peek_reads_type_tag() {
        assert_eq!(
            peek_transaction_type(&standalone().to_bytes(), false),
            Ok(TransactionType::VotingKeyLink)
        );
        assert_eq!(
            peek_transaction_type(&embedded().to_bytes(), true),
            Ok(TransactionType::VotingKeyLink)
        );
        assert!(peek_transaction_type(&[0u8; 10], false).is_err());
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(decode_hex(" 0aFF\n"), Ok(vec![0x0A, 0xFF]));
        assert!(matches!(decode_hex("0g"), Err(CodecError::Hex(_))));
    }
}
