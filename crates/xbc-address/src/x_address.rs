use xbc_types::AccountId;

use crate::error::{AddressError, AddressResult};

pub(crate) const MAIN_PREFIX: [u8; 2] = [0x05, 0x44];
pub(crate) const TEST_PREFIX: [u8; 2] = [0x04, 0x93];
pub(crate) const PAYLOAD_LEN: usize = 31;

/// Decoded X-address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XAddress {
    pub account_id: AccountId,
    pub tag: Option<u32>,
    pub test: bool,
}

/// An X-address expanded into its classic form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicAddress {
    pub classic: String,
    pub tag: Option<u32>,
    pub test: bool,
}

impl XAddress {
    pub(crate) fn to_payload(self) -> [u8; PAYLOAD_LEN] {
        let mut out = [0u8; PAYLOAD_LEN];
        out[..2].copy_from_slice(if self.test { &TEST_PREFIX } else { &MAIN_PREFIX });
        out[2..22].copy_from_slice(self.account_id.as_bytes());
        if let Some(tag) = self.tag {
            out[22] = 1;
            out[23..27].copy_from_slice(&tag.to_le_bytes());
        }
        out
    }

    pub(crate) fn from_payload(payload: &[u8]) -> AddressResult<Self> {
        if payload.len() != PAYLOAD_LEN {
            return Err(AddressError::PayloadLength {
                expected: PAYLOAD_LEN,
                actual: payload.len(),
            });
        }
        let test = match [payload[0], payload[1]] {
            MAIN_PREFIX => false,
            TEST_PREFIX => true,
            other => return Err(AddressError::Version { found: other.to_vec() }),
        };
        let mut id = [0u8; 20];
        id.copy_from_slice(&payload[2..22]);

        let tag_bytes = &payload[23..27];
        if payload[27..].iter().any(|b| *b != 0) {
            return Err(AddressError::WideTag);
        }
        let tag = match payload[22] {
            0 if tag_bytes.iter().any(|b| *b != 0) => return Err(AddressError::StrayTagBytes),
            0 => None,
            1 => Some(u32::from_le_bytes([
                tag_bytes[0],
                tag_bytes[1],
                tag_bytes[2],
                tag_bytes[3],
            ])),
            flag => return Err(AddressError::TagFlag(flag)),
        };
        Ok(Self {
            account_id: AccountId::from_bytes(id),
            tag,
            test,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_layout() {
        let x = XAddress {
            account_id: AccountId::from_bytes([0xAB; 20]),
            tag: Some(0x0102_0304),
            test: true,
        };
        let p = x.to_payload();
        assert_eq!(&p[..2], &TEST_PREFIX);
        assert_eq!(p[22], 1);
        assert_eq!(&p[23..27], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&p[27..], &[0, 0, 0, 0]);
        assert_eq!(XAddress::from_payload(&p).unwrap(), x);
    }

    #[test]
    fn flag_two_rejected() {
        let mut p = XAddress {
            account_id: AccountId::ZERO,
            tag: None,
            test: false,
        }
        .to_payload();
        p[22] = 2;
        assert_eq!(XAddress::from_payload(&p), Err(AddressError::TagFlag(2)));
    }

    #[test]
    fn unknown_prefix_rejected() {
        let mut p = [0u8; PAYLOAD_LEN];
        p[0] = 0x01;
        assert!(matches!(
            XAddress::from_payload(&p),
            Err(AddressError::Version { .. })
        ));
    }
}
