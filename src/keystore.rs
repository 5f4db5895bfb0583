//! Deployer key loading from an encrypted Ethereum V3 keystore.
//!
//! Only the PBKDF2-HMAC-SHA256 / AES-128-CTR flavour is supported:
//! ```json
//! {
//!   "version": 3,
//!   "address": "hex-address-without-0x",
//!   "crypto": {
//!     "cipher": "aes-128-ctr",
//!     "ciphertext": "hex-encrypted-key",
//!     "cipherparams": { "iv": "hex-initialization-vector" },
//!     "kdf": "pbkdf2",
//!     "kdfparams": { "dklen": 32, "c": 262144, "prf": "hmac-sha256", "salt": "hex-salt" },
//!     "mac": "hex-keccak256-mac"
//!   }
//! }
//! ```

use aes::cipher::{KeyIvInit, StreamCipher};
use alloy_primitives::{keccak256, Address, B256};
use alloy_signer_local::PrivateKeySigner;
use eyre::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

type Aes128Ctr = ctr::Ctr64BE<aes::Aes128>;

/// Ethereum Keystore V3 file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeystoreFile {
    /// Keystore version (must be 3)
    pub version: u32,
    /// Account address (hex, without 0x prefix); optional in some exports
    #[serde(default)]
    pub address: Option<String>,
    /// Encrypted key data
    pub crypto: CryptoJson,
}

/// Encrypted key section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoJson {
    /// Cipher algorithm
    pub cipher: String,
    /// Hex-encoded encrypted private key
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// Key derivation function
    pub kdf: String,
    /// KDF parameters
    pub kdfparams: KdfParams,
    /// Hex-encoded keccak256 MAC
    pub mac: String,
}

/// AES-128-CTR parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherParams {
    /// Hex-encoded 16-byte IV
    pub iv: String,
}

/// PBKDF2 parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdfParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// Iteration count
    pub c: u32,
    /// Pseudo-random function
    pub prf: String,
    /// Hex-encoded salt
    pub salt: String,
}

/// Load a keystore file and decrypt it into a signer.
pub fn load_signer(path: impl AsRef<Path>, password: &str) -> Result<PrivateKeySigner> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read keystore file: {}", path.display()))?;
    let keystore: KeystoreFile =
        serde_json::from_str(&data).wrap_err("Failed to parse keystore JSON")?;

    let signer = decrypt_signer(&keystore, password)?;
    tracing::info!(address = %signer.address(), "Loaded deployer key from keystore");
    Ok(signer)
}

/// Decrypt a keystore into a signer, checking the recorded address if present.
pub fn decrypt_signer(keystore: &KeystoreFile, password: &str) -> Result<PrivateKeySigner> {
    let key = decrypt_key(keystore, password)?;
    let signer = PrivateKeySigner::from_bytes(&key)
        .wrap_err("Decrypted key is not a valid secp256k1 key")?;

    if let Some(recorded) = &keystore.address {
        let recorded_hex = recorded.trim_start_matches("0x").to_lowercase();
        let recorded: Address = format!("0x{recorded_hex}")
            .parse()
            .wrap_err_with(|| format!("Invalid keystore address '{recorded}'"))?;
        ensure!(
            recorded == signer.address(),
            "Keystore address {recorded} does not match decrypted key {}",
            signer.address()
        );
    }
    Ok(signer)
}

/// Decrypt the raw 32-byte private key.
///
/// The MAC (keccak256(derived_key[16..32] || ciphertext)) is verified before
/// decrypting.
pub fn decrypt_key(keystore: &KeystoreFile, password: &str) -> Result<B256> {
    let crypto = &keystore.crypto;
    ensure!(keystore.version == 3, "Unsupported keystore version: {}", keystore.version);
    ensure!(crypto.cipher == "aes-128-ctr", "Unsupported cipher: {}", crypto.cipher);
    ensure!(
        crypto.kdf == "pbkdf2" && crypto.kdfparams.prf == "hmac-sha256",
        "Unsupported KDF: {} / {} (only pbkdf2 with hmac-sha256 is supported)",
        crypto.kdf,
        crypto.kdfparams.prf
    );
    ensure!(
        crypto.kdfparams.dklen >= 32,
        "Derived key length must be at least 32, got {}",
        crypto.kdfparams.dklen
    );

    let salt = hex::decode(&crypto.kdfparams.salt).wrap_err("Invalid salt hex")?;
    let iv = hex::decode(&crypto.cipherparams.iv).wrap_err("Invalid IV hex")?;
    let ciphertext = hex::decode(&crypto.ciphertext).wrap_err("Invalid ciphertext hex")?;
    let expected_mac = hex::decode(&crypto.mac).wrap_err("Invalid MAC hex")?;

    ensure!(iv.len() == 16, "IV must be 16 bytes, got {}", iv.len());
    ensure!(ciphertext.len() == 32, "Ciphertext must be 32 bytes, got {}", ciphertext.len());

    let mut derived_key = vec![0u8; crypto.kdfparams.dklen as usize];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(
        password.as_bytes(),
        &salt,
        crypto.kdfparams.c,
        &mut derived_key,
    );

    let computed_mac = keccak256([&derived_key[16..32], ciphertext.as_slice()].concat());
    ensure!(
        computed_mac.as_slice() == expected_mac.as_slice(),
        "MAC verification failed: wrong password or corrupted keystore"
    );

    let mut plaintext = ciphertext;
    let mut cipher = Aes128Ctr::new(derived_key[..16].into(), iv.as_slice().into());
    cipher.apply_keystream(&mut plaintext);

    Ok(B256::from_slice(&plaintext))
}
