//! Async offload wrappers
//!
//! PBKDF2 at 120 000 iterations dominates signing latency, so these
//! wrappers push one call onto a blocking worker and await its single
//! completion value. Dropping the future abandons the wait; the worker may
//! still finish in the background and its result is discarded.

use zeroize::Zeroize;

use crate::error::{SwapError, SwapResult};
use crate::swap::{SwapEntry, SwapMessageKind};

impl SwapEntry {
    /// Offloaded [`SwapEntry::sign_message`].
    ///
    /// The passphrase and recipient are taken by value so the worker owns
    /// its secret material; the passphrase is wiped once the worker is done.
    pub async fn sign_message_offloaded(
        &self,
        kind: SwapMessageKind,
        passphrase: String,
        recipient: String,
    ) -> SwapResult<String> {
        let entry = self.clone();
        run_worker(move || {
            let mut passphrase = passphrase;
            let result = entry.sign_message(kind, &passphrase, &recipient);
            passphrase.zeroize();
            result
        })
        .await
    }

    /// Offloaded [`SwapEntry::sign_assets`]
    pub async fn sign_assets_offloaded(
        &self,
        passphrase: String,
        recipient: String,
    ) -> SwapResult<String> {
        self.sign_message_offloaded(SwapMessageKind::Assets, passphrase, recipient)
            .await
    }

    /// Offloaded [`SwapEntry::sign_legacy_pillar`]
    pub async fn sign_legacy_pillar_offloaded(
        &self,
        passphrase: String,
        recipient: String,
    ) -> SwapResult<String> {
        self.sign_message_offloaded(SwapMessageKind::LegacyPillar, passphrase, recipient)
            .await
    }

    /// Offloaded [`SwapEntry::can_decrypt_with`]
    pub async fn can_decrypt_with_offloaded(&self, passphrase: String) -> SwapResult<()> {
        self.sign_message_offloaded(SwapMessageKind::LegacyPillar, passphrase, String::new())
            .await
            .map(|_| ())
    }
}

/// Run one CPU-bound closure on the blocking pool, propagating its error
/// taxonomy verbatim
async fn run_worker<T, F>(work: F) -> SwapResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> SwapResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| SwapError::signature(format!("signing worker failed: {err}")))?
}
