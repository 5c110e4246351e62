//! Fixed-layout serialization of RSA key records.
//!
//! Field order follows the original containers: a public key is
//! `(ns, n, es, e)` and a secret key `(ns, n, es, e, ds, d, ps, p, qs, q)`.
//! Every size field is written as a fixed 8-byte big-endian integer and
//! every value field is big-endian, left-justified in a fixed-capacity
//! buffer with a zeroed tail, so a record is bit-identical across hosts.
//! Record lengths are compile-time constants per parameter set; decoding
//! demands the exact length and rejects size fields that overrun their
//! buffer.

use crate::bigint;
use crate::errors::{ensure, Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;

// Width of each length prefix.
const SIZE_FIELD: usize = 8;

/// Encoded public-key record length for a ciphertext width.
pub(crate) const fn pkey_len(encrypt_size: usize) -> usize {
    SIZE_FIELD + encrypt_size + SIZE_FIELD + 1
}

/// Encoded secret-key record length for a ciphertext and prime-buffer width.
pub(crate) const fn skey_len(encrypt_size: usize, buffer_size: usize) -> usize {
    pkey_len(encrypt_size) + SIZE_FIELD + encrypt_size + 2 * (SIZE_FIELD + buffer_size)
}

struct FieldWriter<'a> {
    record: &'a mut [u8],
    position: usize,
}

impl<'a> FieldWriter<'a> {
    fn new(record: &'a mut [u8]) -> Self {
        Self { record, position: 0 }
    }

    /// Writes one `(size, value)` pair. The record must be zero-initialized;
    /// only the significant bytes are written, leaving the tail zeroed.
    fn put(&mut self, value: &BigUint, capacity: usize) {
        let bytes = bigint::export_be(value);
        debug_assert!(bytes.len() <= capacity, "field overruns its buffer");

        self.record[self.position..self.position + SIZE_FIELD]
            .copy_from_slice(&(bytes.len() as u64).to_be_bytes());
        self.position += SIZE_FIELD;

        self.record[self.position..self.position + bytes.len()].copy_from_slice(&bytes);
        self.position += capacity;
    }
}

struct FieldReader<'a> {
    record: &'a [u8],
    position: usize,
}

impl<'a> FieldReader<'a> {
    fn new(record: &'a [u8]) -> Self {
        Self { record, position: 0 }
    }

    /// Reads one `(size, value)` pair, rejecting sizes beyond the field's
    /// capacity.
    fn get(&mut self, capacity: usize) -> Result<BigUint> {
        let mut size_bytes = [0u8; SIZE_FIELD];
        size_bytes.copy_from_slice(&self.record[self.position..self.position + SIZE_FIELD]);
        self.position += SIZE_FIELD;

        let used = u64::from_be_bytes(size_bytes);
        ensure!(used <= capacity as u64, Error::InvalidKeyLength);
        let used = used as usize;

        let value = bigint::import_be(&self.record[self.position..self.position + used]);
        self.position += capacity;
        Ok(value)
    }
}

/// Serializes a public key into a zeroed record of [`pkey_len`] bytes.
pub(crate) fn encode_pkey(n: &BigUint, e: &BigUint, encrypt_size: usize, record: &mut [u8]) {
    debug_assert_eq!(record.len(), pkey_len(encrypt_size));
    let mut writer = FieldWriter::new(record);
    writer.put(n, encrypt_size);
    writer.put(e, 1);
}

/// Deserializes a public key, validating the record length and field sizes.
pub(crate) fn decode_pkey(record: &[u8], encrypt_size: usize) -> Result<(BigUint, BigUint)> {
    ensure!(record.len() == pkey_len(encrypt_size), Error::InvalidKeyLength);
    let mut reader = FieldReader::new(record);
    let n = reader.get(encrypt_size)?;
    let e = reader.get(1)?;
    ensure!(!n.is_zero() && !e.is_zero(), Error::InvalidKeyLength);
    Ok((n, e))
}

/// Serializes a secret key into a zeroed record of [`skey_len`] bytes.
pub(crate) fn encode_skey(
    n: &BigUint, e: &BigUint, d: &BigUint, p: &BigUint, q: &BigUint, encrypt_size: usize,
    buffer_size: usize, record: &mut [u8],
) {
    debug_assert_eq!(record.len(), skey_len(encrypt_size, buffer_size));
    let mut writer = FieldWriter::new(record);
    writer.put(n, encrypt_size);
    writer.put(e, 1);
    writer.put(d, encrypt_size);
    writer.put(p, buffer_size);
    writer.put(q, buffer_size);
}

/// Deserializes a secret key, validating the record length and field sizes.
#[allow(clippy::type_complexity)]
pub(crate) fn decode_skey(
    record: &[u8], encrypt_size: usize, buffer_size: usize,
) -> Result<(BigUint, BigUint, BigUint, BigUint, BigUint)> {
    ensure!(
        record.len() == skey_len(encrypt_size, buffer_size),
        Error::InvalidKeyLength
    );
    let mut reader = FieldReader::new(record);
    let n = reader.get(encrypt_size)?;
    let e = reader.get(1)?;
    let d = reader.get(encrypt_size)?;
    let p = reader.get(buffer_size)?;
    let q = reader.get(buffer_size)?;
    ensure!(
        !n.is_zero() && !e.is_zero() && !d.is_zero() && !p.is_zero() && !q.is_zero(),
        Error::InvalidKeyLength
    );
    Ok((n, e, d, p, q))
}


#[cfg(test)]
mod tests {
    use super::*;

    const ENCRYPT_SIZE: usize = 64;
    const BUFFER_SIZE: usize = 32;

    #[test]
    fn test_pkey_round_trip() {
        let n = BigUint::from(0x00c0ffee_u32) << 480u32; // top bytes populated
        let e = BigUint::from(3u32);

        let mut record = vec![0u8; pkey_len(ENCRYPT_SIZE)];
        encode_pkey(&n, &e, ENCRYPT_SIZE, &mut record);
        let (n2, e2) = decode_pkey(&record, ENCRYPT_SIZE).unwrap();
        assert_eq!(n, n2);
        assert_eq!(e, e2);
    }

    #[test]
    fn test_skey_round_trip() {
        let n = BigUint::from(0xdead_beef_u32) << 400u32;
        let e = BigUint::from(3u32);
        let d = BigUint::from(0x1234_5678_u32) << 200u32;
        let p = BigUint::from(0xaaaa_u32) << 100u32;
        let q = BigUint::from(0xbbbb_u32) << 99u32;

        let mut record = vec![0u8; skey_len(ENCRYPT_SIZE, BUFFER_SIZE)];
        encode_skey(&n, &e, &d, &p, &q, ENCRYPT_SIZE, BUFFER_SIZE, &mut record);
        let decoded = decode_skey(&record, ENCRYPT_SIZE, BUFFER_SIZE).unwrap();
        assert_eq!(decoded, (n, e, d, p, q));
    }

    #[test]
    fn test_record_lengths() {
        assert_eq!(pkey_len(64), 81);
        assert_eq!(skey_len(64, 32), 233);
        assert_eq!(pkey_len(128), 145);
        assert_eq!(skey_len(128, 64), 425);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let record = vec![0u8; pkey_len(ENCRYPT_SIZE) - 1];
        assert!(matches!(
            decode_pkey(&record, ENCRYPT_SIZE),
            Err(Error::InvalidKeyLength)
        ));
    }

    #[test]
    fn test_overlong_size_field_rejected() {
        let n = BigUint::from(0x77u32);
        let e = BigUint::from(3u32);
        let mut record = vec![0u8; pkey_len(ENCRYPT_SIZE)];
        encode_pkey(&n, &e, ENCRYPT_SIZE, &mut record);

        // claim the modulus occupies more bytes than its buffer holds
        record[..8].copy_from_slice(&(ENCRYPT_SIZE as u64 + 1).to_be_bytes());
        assert!(matches!(
            decode_pkey(&record, ENCRYPT_SIZE),
            Err(Error::InvalidKeyLength)
        ));
    }

    #[test]
    fn test_zero_modulus_rejected() {
        let record = vec![0u8; pkey_len(ENCRYPT_SIZE)];
        assert!(matches!(
            decode_pkey(&record, ENCRYPT_SIZE),
            Err(Error::InvalidKeyLength)
        ));
    }
}
