//! Order capture coordinator
//!
//! Runs inline with order placement and must never disturb it: every
//! failure ends up as a warning in the log and a missing record, nothing
//! is returned to the caller as an error.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::record::DeviceCaptureRecord;
use super::repository::DeviceCaptureRepository;
use crate::area::{AreaClassifier, ExecutionArea};
use crate::config::CaptureConfig;
use crate::device::{DeviceClassification, RawUserAgent, UserAgentClassifier};
use crate::errors::{CaptureError, Result};

/// Order-placed notification; may be delivered more than once per order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPlaced {
    pub order_id: i64,
}

impl OrderPlaced {
    pub fn new(order_id: i64) -> Self {
        Self { order_id }
    }
}

/// What the request that placed the order looked like
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: RawUserAgent,
    pub referer: Option<String>,
    pub area: ExecutionArea,
}

impl RequestContext {
    pub fn new(user_agent: impl Into<RawUserAgent>, area: ExecutionArea) -> Self {
        Self {
            user_agent: user_agent.into(),
            referer: None,
            area,
        }
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }
}

/// Result of one capture attempt; callers are free to ignore it
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    Captured(DeviceCaptureRecord),
    /// A record already existed (duplicate delivery)
    AlreadyCaptured,
    /// Logged and absorbed
    Failed(CaptureError),
}

impl CaptureOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureOutcome::Captured(_))
    }

    pub fn record(&self) -> Option<&DeviceCaptureRecord> {
        match self {
            CaptureOutcome::Captured(record) => Some(record),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct OrderCaptureCoordinator {
    repository: Arc<dyn DeviceCaptureRepository>,
    devices: UserAgentClassifier,
    areas: AreaClassifier,
}

impl OrderCaptureCoordinator {
    pub fn new(
        repository: Arc<dyn DeviceCaptureRepository>,
        devices: UserAgentClassifier,
        areas: AreaClassifier,
    ) -> Self {
        Self {
            repository,
            devices,
            areas,
        }
    }

    pub fn from_config(repository: Arc<dyn DeviceCaptureRepository>, config: &CaptureConfig) -> Self {
        Self::new(
            repository,
            UserAgentClassifier::from_config(config),
            AreaClassifier::new(&config.checkout_base_path),
        )
    }

    pub fn devices(&self) -> &UserAgentClassifier {
        &self.devices
    }

    pub fn areas(&self) -> &AreaClassifier {
        &self.areas
    }

    /// Capture device and area data for a placed order
    ///
    /// Never fails. A duplicate delivery for an order that already has a
    /// record is a no-op, including when a concurrent delivery wins the
    /// insert and the repository reports a uniqueness conflict.
    pub async fn capture(&self, order: &OrderPlaced, request: &RequestContext) -> CaptureOutcome {
        match self.try_capture(order, request).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_conflict() => {
                debug!(
                    "Device data for order {} was written concurrently, skipping",
                    order.order_id
                );
                CaptureOutcome::AlreadyCaptured
            }
            Err(e) => {
                // 采集失败不能影响下单流程
                warn!(
                    "Failed to capture device data for order {} ({}): {}",
                    order.order_id,
                    self.repository.backend_name(),
                    e
                );
                CaptureOutcome::Failed(e)
            }
        }
    }

    async fn try_capture(
        &self,
        order: &OrderPlaced,
        request: &RequestContext,
    ) -> Result<CaptureOutcome> {
        let candidate = match self.repository.get_by_order_id(order.order_id).await {
            Ok(existing) => existing,
            Err(e) if e.is_not_found() => self.repository.get_empty_entity(),
            Err(e) => return Err(e),
        };

        if candidate.is_persisted() {
            debug!("Device data for order {} already captured", order.order_id);
            return Ok(CaptureOutcome::AlreadyCaptured);
        }

        let device = self.classify_device(&request.user_agent)?;
        let area = self.areas.classify(&request.area, request.referer.as_deref());

        let record = candidate
            .with_device(device)
            .with_area(area)
            .with_order_id(order.order_id);

        let saved = self.repository.save(record).await?;
        info!(
            "Captured device data for order {}: device={:?}, area={}",
            saved.order_id, saved.device_code, saved.area_code
        );
        Ok(CaptureOutcome::Captured(saved))
    }

    /// A panicking detector is one more contained failure
    fn classify_device(&self, user_agent: &RawUserAgent) -> Result<DeviceClassification> {
        catch_unwind(AssertUnwindSafe(|| self.devices.classify_device(user_agent)))
            .unwrap_or_else(|_| {
                Err(CaptureError::detector_unavailable(
                    "device classification panicked",
                ))
            })
    }
}

impl std::fmt::Debug for OrderCaptureCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderCaptureCoordinator")
            .field("repository", &self.repository.backend_name())
            .field("devices", &self.devices)
            .field("areas", &self.areas)
            .finish()
    }
}
