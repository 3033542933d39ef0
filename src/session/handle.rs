//! Future resolved when a placement session ends

use crate::core::errors::ReticleError;
use crate::placement::reticle::{PlacementReticle, ReticleId};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Resolves to the finished reticle once its placement is confirmed or cancelled
///
/// The resolved reticle is already detached from display; read its position,
/// direction, distance, destination and `cancelled` flag.
#[derive(Debug)]
pub struct PlacementHandle {
    id: ReticleId,
    tag: String,
    receiver: oneshot::Receiver<PlacementReticle>,
}

impl PlacementHandle {
    pub(crate) fn new(
        id: ReticleId,
        tag: String,
        receiver: oneshot::Receiver<PlacementReticle>,
    ) -> Self {
        Self { id, tag, receiver }
    }

    pub fn id(&self) -> ReticleId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Take the result without waiting
    ///
    /// Returns `Ok(None)` while the placement is still in flight.
    pub fn try_result(&mut self) -> Result<Option<PlacementReticle>, ReticleError> {
        match self.receiver.try_recv() {
            Ok(reticle) => Ok(Some(reticle)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(ReticleError::SessionDropped),
        }
    }
}

impl Future for PlacementHandle {
    type Output = Result<PlacementReticle, ReticleError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|_| ReticleError::SessionDropped))
    }
}
