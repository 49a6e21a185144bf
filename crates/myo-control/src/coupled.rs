//! Antagonist coupling of two tendon controllers.

use myo_types::ControllerId;

use crate::{ChangeHooks, TendonController};

/// One actuation degree of freedom built from an extensor/flexor pair.
///
/// A single normalized target in `[-1, 1]` drives both sides with
/// opposite sign, each scaled by that side's own limit, so the coupling
/// stays symmetric even when the limits differ:
///
/// ```text
/// flexor.target   =  flexor.limit   · target
/// extensor.target = -extensor.limit · target
/// ```
#[derive(Debug)]
pub struct CoupledTendonController {
    extensor: ControllerId,
    flexor: ControllerId,
    target: f64,
    hooks: ChangeHooks,
}

impl CoupledTendonController {
    /// Create a couple from an extensor and a flexor controller.
    #[must_use]
    pub fn new(extensor: ControllerId, flexor: ControllerId) -> Self {
        Self {
            extensor,
            flexor,
            target: 0.0,
            hooks: ChangeHooks::default(),
        }
    }

    /// The extensor-side controller id.
    #[must_use]
    pub fn extensor_id(&self) -> ControllerId {
        self.extensor
    }

    /// The flexor-side controller id.
    #[must_use]
    pub fn flexor_id(&self) -> ControllerId {
        self.flexor
    }

    /// The current normalized target.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Set the normalized target, clamped to `[-1, 1]`.
    ///
    /// The fan-out to both sides runs with the target held *before* this
    /// call; the new value only takes effect on the next [`Self::update`].
    /// Both child targets are fully written before this method returns,
    /// and the couple's own subscribers are notified afterwards.
    pub fn set_target(
        &mut self,
        target: f64,
        extensor: &mut TendonController,
        flexor: &mut TendonController,
    ) {
        let target = target.clamp(-1.0, 1.0);
        self.update(extensor, flexor);
        self.target = target;
        self.hooks.notify();
    }

    /// Push the current target to both sides.
    pub fn update(&self, extensor: &mut TendonController, flexor: &mut TendonController) {
        flexor.set_target(flexor.limit() * self.target);
        extensor.set_target(extensor.limit() * (-self.target));
    }

    /// Register an observer invoked on every target change.
    pub fn subscribe_change(&mut self, f: impl FnMut() + 'static) {
        self.hooks.subscribe(f);
    }
}
