//! Deploy configuration input.
//!
//! The deploy config is a JSON document owned by whoever runs the deployment.
//! Only the keys this crate needs are modeled, everything else is ignored so
//! the same file can feed every deploy step of an L1 rollout.

use alloy_primitives::{Address, U256};
use eyre::{Context, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Externally supplied deploy configuration (read-only to the deployer)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// Owner of the SystemConfig once deployment completes
    pub final_system_owner: Address,
    /// L2 fee overhead written to the contract
    #[serde(deserialize_with = "deserialize_quantity")]
    pub gas_price_oracle_overhead: U256,
    /// L2 fee scalar written to the contract
    #[serde(deserialize_with = "deserialize_quantity")]
    pub gas_price_oracle_scalar: U256,
    /// Account allowed to submit batches; becomes the batcher hash
    pub batch_sender_address: Address,
    /// Gas limit of the L2 genesis block
    #[serde(deserialize_with = "deserialize_quantity")]
    pub l2_genesis_block_gas_limit: U256,
    /// Account allowed to sign unsafe blocks on the p2p network
    pub p2p_sequencer_address: Address,
}

impl DeployConfig {
    /// Load a deploy config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read deploy config: {}", path.display()))?;
        Self::from_json(&data)
            .wrap_err_with(|| format!("Failed to parse deploy config: {}", path.display()))
    }

    /// Parse a deploy config from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: DeployConfig = serde_json::from_str(data)?;
        tracing::debug!(
            owner = %config.final_system_owner,
            batcher = %config.batch_sender_address,
            gas_limit = %config.l2_genesis_block_gas_limit,
            "Parsed deploy config"
        );
        Ok(config)
    }
}

/// Deserialize a [`U256`] from a JSON number, a decimal string, or a `0x` hex string.
///
/// Deploy configs written by hand use plain numbers, generated ones use hex
/// quantities; both must be accepted without losing precision.
pub fn deserialize_quantity<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = U256;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a non-negative integer, decimal string or 0x-prefixed hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::custom(format!("negative quantity {v}")))
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<U256, E> {
            let s = s.trim();
            let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => (hex, 16),
                None => (s, 10),
            };
            if digits.is_empty() {
                return Err(E::custom(format!("empty quantity {s:?}")));
            }
            U256::from_str_radix(digits, radix)
                .map_err(|err| E::custom(format!("failed to decode {s:?} as u256: {err}")))
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "finalSystemOwner": "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
        "gasPriceOracleOverhead": 2100,
        "gasPriceOracleScalar": "1000000",
        "batchSenderAddress": "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
        "l2GenesisBlockGasLimit": "0x1c9c380",
        "p2pSequencerAddress": "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc",
        "l1ChainID": 900,
        "l2BlockTime": 2
    }"#;

    #[test]
    fn test_parse_mixed_quantity_encodings() {
        let config = DeployConfig::from_json(SAMPLE).unwrap();
        assert_eq!(
            config.final_system_owner,
            address!("90F79bf6EB2c4f870365E785982E1f101E93b906")
        );
        assert_eq!(config.gas_price_oracle_overhead, U256::from(2100));
        assert_eq!(config.gas_price_oracle_scalar, U256::from(1_000_000));
        assert_eq!(config.l2_genesis_block_gas_limit, U256::from(30_000_000));
        assert_eq!(
            config.p2p_sequencer_address,
            address!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc")
        );
    }

    #[test]
    fn test_gas_limit_beyond_u64() {
        let json = SAMPLE.replace(
            r#""0x1c9c380""#,
            r#""340282366920938463463374607431768211456""#,
        );
        let config = DeployConfig::from_json(&json).unwrap();
        assert_eq!(config.l2_genesis_block_gas_limit, U256::from(1) << 128usize);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = SAMPLE.replace(
            r#""p2pSequencerAddress": "0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc","#,
            "",
        );
        let err = DeployConfig::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("p2pSequencerAddress"));
    }

    #[test]
    fn test_malformed_address_is_rejected() {
        let json = SAMPLE.replace(
            "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
            "0x3C44CdDdB6a900fa2b585dd2",
        );
        assert!(DeployConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let json = SAMPLE.replace("2100", "-1");
        assert!(DeployConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_blank_quantity_is_rejected() {
        for blank in [r#""""#, r#""0x""#, r#""   ""#] {
            let json = SAMPLE.replace("2100", blank);
            let err = DeployConfig::from_json(&json).unwrap_err();
            assert!(err.to_string().contains("empty quantity"), "{blank}: {err}");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = DeployConfig::load(file.path()).unwrap();
        assert_eq!(config, DeployConfig::from_json(SAMPLE).unwrap());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = DeployConfig::load("/nonexistent/deploy-config.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/deploy-config.json"));
    }
}
