//! The public API seams: key generation, hybrid seal/open, and key
//! serialization. Each parameter-set module implements these traits, so the
//! API reads the same regardless of modulus size.

use crate::errors::Result;
use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// Key-pair generation for one parameter set.
pub trait KeyGen {
    /// The public key distributed to senders.
    type PublicKey;
    /// The secret key retained by the recipient.
    type SecretKey;


    /// Generates a public and secret key pair using the OS default random
    /// number generator.
    /// # Errors
    /// Returns an error when the random number generator fails or the retry
    /// budget is exhausted.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use filecpt::rsa_512;                            // Could also be rsa_1024 or rsa_1536.
    /// use filecpt::traits::{KeyGen, Open, Seal, SerDes};
    ///
    /// // The recipient generates a key pair and publishes the public half
    /// let (pkey, skey) = rsa_512::KG::try_keygen()?;
    /// let pkey_bytes = pkey.into_bytes();
    ///
    /// // A sender deserializes it and seals a message for the recipient
    /// let pkey = rsa_512::PublicKey::try_from_bytes(pkey_bytes)?;
    /// let container = pkey.try_seal(b"meet me at the usual place")?;
    ///
    /// // Only the matching secret key opens the container
    /// let message = skey.try_open(&container)?;
    /// assert_eq!(message, b"meet me at the usual place");
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::PublicKey, Self::SecretKey)> {
        Self::try_keygen_with_rng(&mut OsRng)
    }


    /// Generates a public and secret key pair using a provided random number
    /// generator.
    /// # Errors
    /// Returns an error when the random number generator fails or the retry
    /// budget is exhausted.
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;
}


/// The `Seal` trait wraps a fresh AES-256 key for the key holder and
/// encrypts a message under it, producing a self-contained container.
pub trait Seal {
    /// Seals a message using the OS default random number generator for the
    /// payload key.
    /// # Errors
    /// Returns an error on an empty message or when the random number
    /// generator fails.
    #[cfg(feature = "default-rng")]
    fn try_seal(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.try_seal_with_rng(&mut OsRng, message)
    }


    /// Seals a message, drawing the payload key from a provided random
    /// number generator.
    /// # Errors
    /// Returns an error on an empty message or when the random number
    /// generator fails.
    fn try_seal_with_rng(
        &self, rng: &mut impl CryptoRngCore, message: &[u8],
    ) -> Result<Vec<u8>>;
}


/// The `Open` trait recovers the plaintext from a sealed container.
pub trait Open {
    /// Opens a container produced by [`Seal`].
    ///
    /// A plaintext that ended in zero bytes comes back without them; the
    /// block mode cannot distinguish them from its own padding.
    /// # Errors
    /// Returns an error when the container is malformed or too small.
    fn try_open(&self, container: &[u8]) -> Result<Vec<u8>>;
}


/// Serialization and deserialization of keys into fixed-layout records.
pub trait SerDes {
    /// Correctly sized byte array for the struct.
    type ByteArray;


    /// Produces the fixed-size record for this key.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use filecpt::rsa_512;
    /// use filecpt::traits::{KeyGen, SerDes};
    ///
    /// let (pkey, skey) = rsa_512::KG::try_keygen()?;
    ///
    /// // Records are fixed-length and bit-identical across hosts
    /// let pkey_bytes = pkey.into_bytes();
    /// assert_eq!(pkey_bytes.len(), rsa_512::PKEY_LEN);
    ///
    /// let restored = rsa_512::PublicKey::try_from_bytes(pkey_bytes)?;
    /// let _ = (skey, restored);
    /// # Ok(())}
    /// ```
    fn into_bytes(self) -> Self::ByteArray;


    /// Consumes a fixed-size record and validates it.
    /// # Errors
    /// Returns an error on a malformed record.
    fn try_from_bytes(bytes: Self::ByteArray) -> Result<Self>
    where
        Self: Sized;
}
