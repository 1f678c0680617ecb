use xbc_types::AccountId;

use crate::error::{AddressError, AddressResult};
use crate::x_address::{ClassicAddress, XAddress};

const ACCOUNT_VERSION: u8 = 0x00;

/// Conversion between account identifiers and their text forms.
///
/// The binary codec only depends on this trait, so callers may substitute
/// their own implementation (for instance one backed by a cache).
pub trait AddressCodec: Send + Sync {
    /// Classic `r...` form of an account id.
    fn encode_account_id(&self, id: &AccountId) -> String;

    /// Parse a classic `r...` address.
    fn decode_account_id(&self, address: &str) -> AddressResult<AccountId>;

    fn encode_x_address(&self, address: &XAddress) -> String;

    fn decode_x_address(&self, address: &str) -> AddressResult<XAddress>;

    fn is_valid_x_address(&self, address: &str) -> bool {
        self.decode_x_address(address).is_ok()
    }

    fn x_address_to_classic(&self, address: &str) -> AddressResult<ClassicAddress> {
        let x = self.decode_x_address(address)?;
        Ok(ClassicAddress {
            classic: self.encode_account_id(&x.account_id),
            tag: x.tag,
            test: x.test,
        })
    }

    fn classic_address_to_x_address(
        &self,
        classic: &str,
        tag: Option<u32>,
        test: bool,
    ) -> AddressResult<String> {
        let account_id = self.decode_account_id(classic)?;
        Ok(self.encode_x_address(&XAddress {
            account_id,
            tag,
            test,
        }))
    }
}

/// [`AddressCodec`] over base58check with the ripple alphabet.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base58AddressCodec;

impl Base58AddressCodec {
    fn encode_checked(payload: &[u8]) -> String {
        bs58::encode(payload)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check()
            .into_string()
    }

    fn decode_checked(text: &str) -> AddressResult<Vec<u8>> {
        bs58::decode(text)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check(None)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))
    }
}

impl AddressCodec for Base58AddressCodec {
    fn encode_account_id(&self, id: &AccountId) -> String {
        let mut payload = [0u8; 21];
        payload[0] = ACCOUNT_VERSION;
        payload[1..].copy_from_slice(id.as_bytes());
        Self::encode_checked(&payload)
    }

    fn decode_account_id(&self, address: &str) -> AddressResult<AccountId> {
        let payload = Self::decode_checked(address)?;
        if payload.len() != 21 {
            return Err(AddressError::PayloadLength {
                expected: 21,
                actual: payload.len(),
            });
        }
        if payload[0] != ACCOUNT_VERSION {
            return Err(AddressError::Version {
                found: vec![payload[0]],
            });
        }
        AccountId::from_slice(&payload[1..]).map_err(|e| AddressError::Base58(e.to_string()))
    }

    fn encode_x_address(&self, address: &XAddress) -> String {
        Self::encode_checked(&address.to_payload())
    }

    fn decode_x_address(&self, address: &str) -> AddressResult<XAddress> {
        XAddress::from_payload(&Self::decode_checked(address)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CODEC: Base58AddressCodec = Base58AddressCodec;

    fn id(hex: &str) -> AccountId {
        AccountId::from_hex(hex).unwrap()
    }

    #[test]
    fn classic_known_vectors() {
        assert_eq!(
            CODEC.encode_account_id(&AccountId::ZERO),
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp"
        );
        let mut one = [0u8; 20];
        one[19] = 1;
        assert_eq!(
            CODEC.encode_account_id(&AccountId::from_bytes(one)),
            "rrrrrrrrrrrrrrrrrrrrBZbvji"
        );
        assert_eq!(
            CODEC.encode_account_id(&id("B5F762798A53D543A014CAF8B297CFF8F2F937E8")),
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
        );
        assert_eq!(
            CODEC
                .decode_account_id("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys")
                .unwrap(),
            id("DD76483FACDEE26E60D8A586BB58D09F27045C46")
        );
    }

    #[test]
    fn classic_bad_checksum() {
        let err = CODEC
            .decode_account_id("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi")
            .unwrap_err();
        assert!(matches!(err, AddressError::Base58(_)));
    }

    #[test]
    fn x_address_known_vectors() {
        let classic = "rGWrZyQqhTp9Xu7G5Pkayo7bXjH4k4QYpf";
        assert_eq!(
            CODEC.classic_address_to_x_address(classic, None, false).unwrap(),
            "XVLhHMPHU98es4dbozjVtdWzVrDjtV5fdx1mHp98tDMoQXb"
        );
        assert_eq!(
            CODEC
                .classic_address_to_x_address(classic, Some(12345), false)
                .unwrap(),
            "XVLhHMPHU98es4dbozjVtdWzVrDjtVFpRb8iCFUkMtRyVii"
        );
        assert_eq!(
            CODEC
                .classic_address_to_x_address(classic, Some(12345), true)
                .unwrap(),
            "TVE26TYGhfLC7tQDno7G8dGtxSkYQn7h4mkJyVSGxTcrDFJ"
        );
    }

    #[test]
    fn x_address_to_classic_keeps_tag() {
        let parts = CODEC
            .x_address_to_classic("TVE26TYGhfLC7tQDno7G8dGtxSkYQn7h4mkJyVSGxTcrDFJ")
            .unwrap();
        assert_eq!(
            parts,
            ClassicAddress {
                classic: "rGWrZyQqhTp9Xu7G5Pkayo7bXjH4k4QYpf".into(),
                tag: Some(12345),
                test: true,
            }
        );
    }

    #[test]
    fn malformed_x_addresses() {
        // tag flag 2
        assert_eq!(
            CODEC.decode_x_address("XVLhHMPHU98es4dbozjVtdWzVrDjtV18pX8zeUygYrCgrPh"),
            Err(AddressError::TagFlag(2))
        );
        // flag 0 with a non-zero tag
        assert_eq!(
            CODEC.decode_x_address("XVLhHMPHU98es4dbozjVtdWzVrDjtV5Df4XtmCJRnnPGt5L"),
            Err(AddressError::StrayTagBytes)
        );
        assert!(!CODEC.is_valid_x_address("rGWrZyQqhTp9Xu7G5Pkayo7bXjH4k4QYpf"));
    }

    #[test]
    fn address_error_converts_to_codec_error() {
        let err: xbc_types::CodecError = AddressError::TagFlag(3).into();
        assert_eq!(err.kind(), xbc_types::ErrorKind::Format);
    }

    proptest! {
        #[test]
        fn classic_round_trips(bytes in proptest::array::uniform20(any::<u8>())) {
            let id = AccountId::from_bytes(bytes);
            let text = CODEC.encode_account_id(&id);
            prop_assert!(text.starts_with('r'));
            prop_assert!(!CODEC.is_valid_x_address(&text));
            prop_assert_eq!(CODEC.decode_account_id(&text).unwrap(), id);
        }
    }
}
