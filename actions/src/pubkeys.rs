//! Registering validator public keys.

use vaultops_provider::{CallArg, ContractCall, Provider, Receipt};
use vaultops_types::{normalize_hex, Address, ChainId};

use crate::common::{await_success, ensure_chain};
use crate::error::ActionError;

/// Hex characters expected of a compressed BLS key.
const EXPECTED_HEX_LEN: usize = 96;

#[derive(Clone, Debug)]
pub struct SetValidatorPubkeys {
    pub registry: Address,
    pub chain: ChainId,
}

/// Outcome of a pubkey update, including any keys whose length looked
/// off. Odd-length keys are submitted anyway; the registry is the
/// authority on what it accepts.
#[derive(Clone, Debug)]
pub struct PubkeyUpdate {
    pub receipt: Receipt,
    pub submitted: Vec<String>,
    pub length_warnings: Vec<String>,
}

impl SetValidatorPubkeys {
    /// Normalize the entered keys and send `setValidatorPubkeys(keys)`.
    ///
    /// Blank entries are dropped; an entry with non-hex characters is a
    /// validation error; a wrong-length entry only produces a warning.
    pub async fn set<P: Provider>(
        &self,
        provider: &P,
        entries: &[String],
    ) -> Result<PubkeyUpdate, ActionError> {
        let mut keys = Vec::new();
        let mut length_warnings = Vec::new();
        for entry in entries {
            if entry.trim().is_empty() {
                continue;
            }
            let key = normalize_hex(entry)?;
            let hex_len = key.len() - 2;
            if hex_len != EXPECTED_HEX_LEN {
                tracing::warn!(key = %key, hex_len, "pubkey length is not {EXPECTED_HEX_LEN} hex chars");
                length_warnings.push(format!(
                    "{key}: {hex_len} hex chars, expected {EXPECTED_HEX_LEN}"
                ));
            }
            keys.push(key);
        }
        if keys.is_empty() {
            return Err(ActionError::Validation("enter at least one pubkey".into()));
        }

        ensure_chain(provider, self.chain).await?;
        let hash = provider
            .send(
                &ContractCall::new(&self.registry, "setValidatorPubkeys")
                    .arg(CallArg::BytesList(keys.clone())),
            )
            .await?;
        let receipt = await_success(provider, hash).await?;
        Ok(PubkeyUpdate {
            receipt,
            submitted: keys,
            length_warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultops_gate::SessionState;
    use vaultops_nullables::NullProvider;

    const ADMIN: &str = "0xabcdef0123456789abcdef0123456789abcdef01";
    const REGISTRY: &str = "0x5000000000000000000000000000000000000005";

    fn action() -> SetValidatorPubkeys {
        SetValidatorPubkeys {
            registry: Address::parse(REGISTRY).unwrap(),
            chain: ChainId::new(80094),
        }
    }

    fn provider() -> NullProvider {
        NullProvider::new(SessionState::connected(ADMIN, ChainId::new(80094)))
    }

    fn hex96() -> String {
        "ab".repeat(48)
    }

    #[tokio::test]
    async fn normalizes_and_submits_keys_as_one_list() {
        let p = provider();
        let entries = vec![format!("0x{}", hex96().to_uppercase()), hex96()];
        let update = action().set(&p, &entries).await.unwrap();

        assert!(update.length_warnings.is_empty());
        assert_eq!(update.submitted, vec![format!("0x{}", hex96()); 2]);

        let sent = p.sent_calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].function, "setValidatorPubkeys");
    }

    #[tokio::test]
    async fn drops_blank_entries() {
        let p = provider();
        let entries = vec!["".into(), "   ".into(), hex96()];
        let update = action().set(&p, &entries).await.unwrap();
        assert_eq!(update.submitted.len(), 1);
    }

    #[tokio::test]
    async fn all_blank_is_a_validation_error() {
        let p = provider();
        let err = action()
            .set(&p, &["".into(), "  ".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert!(p.sent_calls().is_empty());
    }

    #[tokio::test]
    async fn non_hex_entry_is_rejected() {
        let p = provider();
        let err = action()
            .set(&p, &[hex96(), "0xnothex".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Validation(_)));
        assert!(p.sent_calls().is_empty());
    }

    #[tokio::test]
    async fn wrong_length_warns_but_still_submits() {
        let p = provider();
        let short = "ab".repeat(40);
        let update = action().set(&p, &[short]).await.unwrap();
        assert_eq!(update.submitted.len(), 1);
        assert_eq!(update.length_warnings.len(), 1);
        assert!(update.length_warnings[0].contains("80 hex chars"));
        assert_eq!(p.sent_calls().len(), 1);
    }
}
