//! One-shot recipe lookup bound to a view mount.
//!
//! Every detail view owns a [`Mount`]. The lookup task delivers its result
//! through an mpsc channel tagged with the mount id, and stays silent once
//! the mount has been dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cocktail_proto::lookup::{LookupError, RecipeLookup};
use cocktail_proto::recipe::{Recipe, RecipeId};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

static NEXT_MOUNT: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    fn next() -> Self {
        Self(NEXT_MOUNT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for MountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A view's lifetime. Dropping it cancels any lookup still in flight.
#[derive(Debug)]
pub struct Mount {
    id: MountId,
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self {
            id: MountId::next(),
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> MountId {
        self.id
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Result of a lookup, addressed to the mount that issued it.
#[derive(Debug)]
pub struct LookupDelivery {
    pub mount: MountId,
    pub result: Result<Vec<Recipe>, LookupError>,
}

/// Run one lookup for `id` on the runtime and deliver the result on `tx`,
/// unless `mount` is torn down first.
pub fn spawn_lookup(
    lookup: Arc<dyn RecipeLookup>,
    id: RecipeId,
    mount: &Mount,
    tx: mpsc::Sender<LookupDelivery>,
) -> tokio::task::JoinHandle<()> {
    let mount_id = mount.id;
    let token = mount.token.clone();
    tokio::spawn(async move {
        let result = tokio::select! {
            _ = token.cancelled() => {
                debug!("[fetch] mount {} torn down before lookup of {} resolved", mount_id, id);
                return;
            }
            result = lookup.lookup(&id) => result,
        };
        if token.is_cancelled() {
            debug!("[fetch] dropping lookup result for dead mount {}", mount_id);
            return;
        }
        let _ = tx
            .send(LookupDelivery {
                mount: mount_id,
                result,
            })
            .await;
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures_util::future::BoxFuture;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Lookup stub: counts calls, optionally waits for a release signal, then
    /// answers with a clone of `answer`.
    pub(crate) struct StubLookup {
        pub calls: AtomicUsize,
        pub answer: Vec<Recipe>,
        pub fail: bool,
        pub gate: Option<Arc<Notify>>,
    }

    impl StubLookup {
        pub(crate) fn answering(answer: Vec<Recipe>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
                fail: false,
                gate: None,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::answering(Vec::new())
            }
        }
    }

    impl RecipeLookup for StubLookup {
        fn lookup<'a>(
            &'a self,
            _id: &'a RecipeId,
        ) -> BoxFuture<'a, Result<Vec<Recipe>, LookupError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                if self.fail {
                    let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
                    return Err(LookupError::Decode(err));
                }
                Ok(self.answer.clone())
            })
        }
    }

    #[test]
    fn test_mount_ids_are_unique() {
        let a = Mount::new();
        let b = Mount::new();
        assert_ne!(a.id(), b.id());
        assert!(a.is_live());
        let token = a.token.clone();
        drop(a);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_delivery_carries_mount_id() {
        let stub = Arc::new(StubLookup::answering(vec![Recipe::new("11007")]));
        let mount = Mount::new();
        let (tx, mut rx) = mpsc::channel(4);

        spawn_lookup(stub.clone(), "11007".into(), &mount, tx)
            .await
            .unwrap();

        let delivery = rx.recv().await.unwrap();
        assert_eq!(delivery.mount, mount.id());
        assert_eq!(delivery.result.unwrap().len(), 1);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_mount_suppresses_delivery() {
        let gate = Arc::new(Notify::new());
        let stub = Arc::new(StubLookup {
            gate: Some(gate.clone()),
            ..StubLookup::answering(vec![Recipe::new("11007")])
        });
        let mount = Mount::new();
        let (tx, mut rx) = mpsc::channel(4);

        let handle = spawn_lookup(stub, "11007".into(), &mount, tx);
        drop(mount);
        gate.notify_one();
        handle.await.unwrap();

        // The sender is gone with the task and nothing was sent.
        let got = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(matches!(got, Ok(None)));
    }
}
