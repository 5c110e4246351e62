//! AES-128/192/256 block cipher in electronic-codebook mode.
//!
//! The mode pads the final partial block with zero bytes on encryption and
//! strips trailing zero bytes on decryption, which is how the container
//! formats in this crate frame their payloads. A plaintext that legitimately
//! ends in zero bytes therefore does not survive a round trip intact; see
//! [`aes_decrypt`]. ECB itself leaks block-level structure and provides no
//! integrity; the hybrid and symmetric containers in this crate inherit both
//! properties.

use crate::errors::{ensure, Error, Result};
use crate::tables::{MUL11, MUL13, MUL14, MUL2, MUL3, MUL9, RCON, SBOX, SBOX_INV};
use zeroize::Zeroize;

/// AES block width in bytes.
pub const BLOCK_SIZE: usize = 16;

// Largest schedule: AES-256 needs 15 round keys of four words each.
const MAX_SCHEDULE_WORDS: usize = 60;

/// AES key size selector.
///
/// The invariant `rounds = key_words + 6` fixes the schedule shape:
/// 4/6/8 key words yield 10/12/14 rounds and 11/13/15 round keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySize {
    /// 128-bit key: 16 bytes, 10 rounds, 11 round keys.
    Aes128,
    /// 192-bit key: 24 bytes, 12 rounds, 13 round keys.
    Aes192,
    /// 256-bit key: 32 bytes, 14 rounds, 15 round keys.
    Aes256,
}

impl KeySize {
    /// Key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Number of 32-bit words in the key.
    #[must_use]
    pub const fn key_words(self) -> usize {
        self.key_len() / 4
    }

    /// Number of round keys in the expanded schedule.
    #[must_use]
    pub const fn round_keys(self) -> usize {
        self.key_words() + 7
    }

    /// Selects the key size matching a key length in bytes.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` for lengths outside {16, 24, 32}.
    pub fn try_from_key_len(len: usize) -> Result<Self> {
        match len {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            _ => Err(Error::InvalidKeyLength),
        }
    }
}

/// Ciphertext length produced for a plaintext length: the next multiple of 16.
#[must_use]
pub const fn padded_len(len: usize) -> usize {
    (len + 15) & !15
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let bytes = word.to_be_bytes();
    u32::from_be_bytes([
        SBOX[bytes[0] as usize],
        SBOX[bytes[1] as usize],
        SBOX[bytes[2] as usize],
        SBOX[bytes[3] as usize],
    ])
}

fn rcon(index: usize) -> u32 {
    u32::from(RCON[index]) << 24
}

/// Expands the key into `4 * round_keys` words of schedule.
///
/// For `i < key_words` the words are the big-endian key words themselves;
/// beyond that each word is derived from `W[i - key_words]` and `W[i - 1]`
/// with the RotWord/SubWord/Rcon rules of FIPS 197 section 5.2.
fn expand_key(key: &[u8], key_size: KeySize) -> [u32; MAX_SCHEDULE_WORDS] {
    debug_assert_eq!(key.len(), key_size.key_len());
    let key_words = key_size.key_words();
    let total = 4 * key_size.round_keys();

    let mut w = [0u32; MAX_SCHEDULE_WORDS];
    for i in 0..key_words {
        w[i] = u32::from_be_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]);
    }
    for i in key_words..total {
        let prev = w[i - 1];
        w[i] = if i % key_words == 0 {
            w[i - key_words] ^ sub_word(rot_word(prev)) ^ rcon(i / key_words)
        } else if key_words > 6 && i % key_words == 4 {
            w[i - key_words] ^ sub_word(prev)
        } else {
            w[i - key_words] ^ prev
        };
    }
    w
}

fn add_round_key(block: &mut [u8; BLOCK_SIZE], round_key: &[u32]) {
    for (column, word) in round_key.iter().enumerate() {
        let bytes = word.to_be_bytes();
        for (row, byte) in bytes.iter().enumerate() {
            block[4 * column + row] ^= *byte;
        }
    }
}

fn sub_bytes(block: &mut [u8; BLOCK_SIZE]) {
    for byte in block.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

fn sub_bytes_inverse(block: &mut [u8; BLOCK_SIZE]) {
    for byte in block.iter_mut() {
        *byte = SBOX_INV[*byte as usize];
    }
}

// Row r of the state occupies indices r, r + 4, r + 8, r + 12; ShiftRows
// rotates row r left by r positions.
fn shift_rows(block: &mut [u8; BLOCK_SIZE]) {
    let tmp = block[1];
    block[1] = block[5];
    block[5] = block[9];
    block[9] = block[13];
    block[13] = tmp;

    block.swap(2, 10);
    block.swap(6, 14);

    let tmp = block[3];
    block[3] = block[15];
    block[15] = block[11];
    block[11] = block[7];
    block[7] = tmp;
}

fn shift_rows_inverse(block: &mut [u8; BLOCK_SIZE]) {
    let tmp = block[13];
    block[13] = block[9];
    block[9] = block[5];
    block[5] = block[1];
    block[1] = tmp;

    block.swap(2, 10);
    block.swap(6, 14);

    let tmp = block[3];
    block[3] = block[7];
    block[7] = block[11];
    block[11] = block[15];
    block[15] = tmp;
}

fn mix_columns(block: &mut [u8; BLOCK_SIZE]) {
    for column in 0..4 {
        let a = block[4 * column];
        let b = block[4 * column + 1];
        let c = block[4 * column + 2];
        let d = block[4 * column + 3];

        block[4 * column] = MUL2[a as usize] ^ MUL3[b as usize] ^ c ^ d;
        block[4 * column + 1] = a ^ MUL2[b as usize] ^ MUL3[c as usize] ^ d;
        block[4 * column + 2] = a ^ b ^ MUL2[c as usize] ^ MUL3[d as usize];
        block[4 * column + 3] = MUL3[a as usize] ^ b ^ c ^ MUL2[d as usize];
    }
}

fn mix_columns_inverse(block: &mut [u8; BLOCK_SIZE]) {
    for column in 0..4 {
        let a = block[4 * column];
        let b = block[4 * column + 1];
        let c = block[4 * column + 2];
        let d = block[4 * column + 3];

        block[4 * column] =
            MUL14[a as usize] ^ MUL11[b as usize] ^ MUL13[c as usize] ^ MUL9[d as usize];
        block[4 * column + 1] =
            MUL9[a as usize] ^ MUL14[b as usize] ^ MUL11[c as usize] ^ MUL13[d as usize];
        block[4 * column + 2] =
            MUL13[a as usize] ^ MUL9[b as usize] ^ MUL14[c as usize] ^ MUL11[d as usize];
        block[4 * column + 3] =
            MUL11[a as usize] ^ MUL13[b as usize] ^ MUL9[c as usize] ^ MUL14[d as usize];
    }
}

/// Single-block transform: AddRoundKey(0), the middle rounds with
/// MixColumns, then the final round without it.
fn encrypt_block(block: &mut [u8; BLOCK_SIZE], schedule: &[u32], round_keys: usize) {
    add_round_key(block, &schedule[0..4]);

    for round in 1..round_keys - 1 {
        sub_bytes(block);
        shift_rows(block);
        mix_columns(block);
        add_round_key(block, &schedule[4 * round..4 * round + 4]);
    }

    sub_bytes(block);
    shift_rows(block);
    add_round_key(block, &schedule[4 * (round_keys - 1)..4 * round_keys]);
}

/// Inverse single-block transform, reversing the sequence with the inverse
/// steps and the 9/11/13/14 multipliers.
fn decrypt_block(block: &mut [u8; BLOCK_SIZE], schedule: &[u32], round_keys: usize) {
    add_round_key(block, &schedule[4 * (round_keys - 1)..4 * round_keys]);
    shift_rows_inverse(block);
    sub_bytes_inverse(block);

    for round in (1..round_keys - 1).rev() {
        add_round_key(block, &schedule[4 * round..4 * round + 4]);
        mix_columns_inverse(block);
        shift_rows_inverse(block);
        sub_bytes_inverse(block);
    }

    add_round_key(block, &schedule[0..4]);
}

/// Encrypts a message in ECB mode, zero-padding the final partial block.
///
/// The ciphertext length is `message.len()` rounded up to the next multiple
/// of 16. An empty message yields an empty ciphertext.
///
/// # Errors
/// Returns `InvalidKeyLength` when the key does not match `key_size`.
pub fn aes_encrypt(message: &[u8], key: &[u8], key_size: KeySize) -> Result<Vec<u8>> {
    ensure!(key.len() == key_size.key_len(), Error::InvalidKeyLength);

    let mut schedule = expand_key(key, key_size);
    let round_keys = key_size.round_keys();

    let mut result = vec![0u8; padded_len(message.len())];
    let mut block = [0u8; BLOCK_SIZE];

    for (chunk, out) in message.chunks(BLOCK_SIZE).zip(result.chunks_mut(BLOCK_SIZE)) {
        block = [0u8; BLOCK_SIZE];
        block[..chunk.len()].copy_from_slice(chunk);
        encrypt_block(&mut block, &schedule, round_keys);
        out.copy_from_slice(&block);
    }

    schedule.zeroize();
    block.zeroize();
    Ok(result)
}

/// Decrypts an ECB-mode ciphertext and strips trailing zero bytes.
///
/// The stripping is the inverse of the zero padding applied by
/// [`aes_encrypt`]; any zero bytes at the end of the original plaintext are
/// removed along with the padding. Callers whose payloads may end in zero
/// bytes must frame them separately.
///
/// # Errors
/// Returns `InvalidKeyLength` when the key does not match `key_size`, and
/// `InvalidCiphertextLength` unless the input is a positive multiple of 16
/// bytes.
pub fn aes_decrypt(message: &[u8], key: &[u8], key_size: KeySize) -> Result<Vec<u8>> {
    ensure!(key.len() == key_size.key_len(), Error::InvalidKeyLength);
    ensure!(
        !message.is_empty() && message.len() % BLOCK_SIZE == 0,
        Error::InvalidCiphertextLength
    );

    let mut schedule = expand_key(key, key_size);
    let round_keys = key_size.round_keys();

    let mut result = vec![0u8; message.len()];
    let mut block = [0u8; BLOCK_SIZE];

    for (chunk, out) in message.chunks(BLOCK_SIZE).zip(result.chunks_mut(BLOCK_SIZE)) {
        block.copy_from_slice(chunk);
        decrypt_block(&mut block, &schedule, round_keys);
        out.copy_from_slice(&block);
    }

    schedule.zeroize();
    block.zeroize();

    while result.last() == Some(&0) {
        result.pop();
    }
    Ok(result)
}
