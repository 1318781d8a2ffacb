//! The disclosure controller.

use std::fmt;
use std::sync::{Arc, Weak};

use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{Instrument, Level, debug, error, info, span, trace, warn};
use twbus_core::logging::{span_names, targets};
use twbus_core::{ConnectionId, Signal};

use super::state::{DisclosureEvent, DisclosurePhase, DisclosureState, RejectReason};
use crate::accessibility::{AccessibleRole, Affordance};
use crate::animation::{AnimationDriver, VisualState};
use crate::config::DisclosureConfig;
use crate::element::{
    DisclosureItem, ElementAdapter, ElementSource, ResolvedElements, ToggleControlElement,
};
use crate::error::{AnimationFault, InitError};
use crate::input::{ContainerInput, RequestSource, SwipeDirection, SwipeTracker, ToggleRequest};

/// Owns the expanded/animating state of one panel and sequences its
/// transitions.
///
/// The controller is inert until [`initialize`](Self::initialize) binds it to
/// its elements. From then on clicks, Enter/Space key presses and qualifying
/// swipes on the bound elements call [`request_toggle`](Self::request_toggle),
/// as can the host directly.
///
/// A toggle flips the logical `expanded` flag, the control's affordance and
/// the container marker synchronously, then reveals or hides every item on
/// the Tokio runtime captured at initialization. Requests arriving while a
/// transition runs, or inside the refractory window of the last accepted one,
/// are dropped.
///
/// Dropping the controller tears it down.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twbus::element::MemoryDocument;
/// use twbus::{DisclosureConfig, DisclosureController, ToggleRequest};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let document = Arc::new(MemoryDocument::route_panel(3));
/// let controller = DisclosureController::new(document, DisclosureConfig::default());
///
/// assert!(controller.initialize());
/// assert!(controller.request_toggle(ToggleRequest::programmatic()));
/// assert!(controller.get_state().expanded);
/// assert!(controller.get_state().animating);
/// # }
/// ```
pub struct DisclosureController {
    shared: Arc<Shared>,
}

struct Shared {
    config: DisclosureConfig,
    adapter: ElementAdapter,
    driver: AnimationDriver,
    state: Mutex<ControllerState>,
    events: Signal<DisclosureEvent>,
}

#[derive(Default)]
struct ControllerState {
    phase: DisclosurePhase,
    item_count: usize,
    last_accepted: Option<Instant>,
    /// Bumped by every teardown; work started under an older epoch is stale.
    epoch: u64,
    binding: Option<Binding>,
    transition: Option<JoinHandle<()>>,
    /// A transition left to finish its visuals after a teardown.
    detached: Option<JoinHandle<()>>,
}

struct Binding {
    elements: ResolvedElements,
    runtime: Handle,
    control_connection: ConnectionId,
    container_connection: ConnectionId,
    relayout: Option<JoinHandle<()>>,
}

impl DisclosureController {
    /// Create a controller over the elements of `source`.
    pub fn new(source: Arc<dyn ElementSource>, config: DisclosureConfig) -> Self {
        let adapter = ElementAdapter::new(source, config.selectors.clone());
        let driver = AnimationDriver::new(config.transition_duration());
        Self {
            shared: Arc::new(Shared {
                config,
                adapter,
                driver,
                state: Mutex::new(ControllerState::default()),
                events: Signal::new(),
            }),
        }
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &DisclosureConfig {
        &self.shared.config
    }

    /// Lifecycle events: toggles accepted and rejected, items and transitions
    /// settled, faults caught.
    ///
    /// Slots run with no controller lock held and may call back into the
    /// controller.
    pub fn events(&self) -> &Signal<DisclosureEvent> {
        &self.shared.events
    }

    /// Bind to the panel's elements and reset to the collapsed state.
    ///
    /// Tears down any previous binding first, so calling it again is safe.
    /// Every item is snapped hidden and receives its transition style; the
    /// control becomes a focusable button showing the "expand" affordance.
    ///
    /// Returns `false` when the container or control cannot be resolved or no
    /// Tokio runtime is running. The failure is logged and reported through
    /// [`events`](Self::events), and the controller stays inert.
    pub fn initialize(&self) -> bool {
        self.shared.initialize()
    }

    /// Ask the panel to toggle now. Returns whether the request was accepted.
    pub fn request_toggle(&self, request: ToggleRequest) -> bool {
        self.shared.request_toggle(request)
    }

    /// Expand unless already (logically) expanded.
    pub fn force_expand(&self) -> bool {
        if self.get_state().expanded {
            return false;
        }
        self.request_toggle(ToggleRequest::programmatic())
    }

    /// Collapse unless already (logically) collapsed.
    pub fn force_collapse(&self) -> bool {
        if !self.get_state().expanded {
            return false;
        }
        self.request_toggle(ToggleRequest::programmatic())
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> DisclosureState {
        let state = self.shared.state.lock();
        DisclosureState::new(state.phase, state.item_count)
    }

    /// Whether the controller is bound to its elements.
    pub fn is_initialized(&self) -> bool {
        self.shared.state.lock().binding.is_some()
    }

    /// Re-apply the shown state to every item.
    ///
    /// Only acts while the panel is expanded and idle; returns whether it did.
    /// Runs automatically a short delay after the container reports a
    /// viewport change.
    pub fn relayout(&self) -> bool {
        self.shared.relayout()
    }

    /// Release all bindings.
    ///
    /// A running transition still carries every item to its target state, but
    /// reports no further events and leaves the control alone. A following
    /// [`initialize`](Self::initialize) stops it before resetting the items.
    ///
    /// Safe to call at any time, including before `initialize`.
    pub fn teardown(&self) {
        self.shared.teardown();
    }
}

impl Drop for DisclosureController {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

impl fmt::Debug for DisclosureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureController")
            .field("state", &self.get_state())
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DisclosureController: Send, Sync);

impl Shared {
    fn initialize(self: &Arc<Self>) -> bool {
        self.teardown();
        let detached = self.state.lock().detached.take();
        if let Some(task) = detached {
            task.abort();
        }

        let Ok(runtime) = Handle::try_current() else {
            return self.fail_initialize(InitError::NoRuntime);
        };
        let elements = match self.adapter.resolve() {
            Ok(elements) => elements,
            Err(err) => return self.fail_initialize(err.into()),
        };

        let items = self.adapter.enumerate_items();
        let style = self.config.transition_style();
        for item in &items {
            let prepared = item
                .handle()
                .apply_transition(&style)
                .map_err(|source| AnimationFault::Element {
                    ordinal: item.ordinal(),
                    source,
                })
                .and_then(|()| self.driver.snap(item, VisualState::Hidden));
            if let Err(fault) = prepared {
                warn!(target: targets::DISCLOSURE, error = %fault, "could not prepare disclosure item");
            }
        }

        let affordance = Affordance::for_state(false, &self.config.labels);
        let prepared = elements
            .control
            .set_accessible_role(AccessibleRole::Button, true)
            .and_then(|()| elements.control.set_affordance(&affordance))
            .and_then(|()| elements.control.set_interactive(true))
            .and_then(|()| elements.container.set_expanded_marker(false));
        if let Err(err) = prepared {
            warn!(target: targets::DISCLOSURE, error = %err, "could not prepare panel controls");
        }

        let control_connection = self.connect_control(&elements);
        let container_connection = self.connect_container(&elements);
        let item_count = items.len();

        {
            let mut state = self.state.lock();
            state.phase = DisclosurePhase::Collapsed;
            state.item_count = item_count;
            state.last_accepted = None;
            state.binding = Some(Binding {
                elements,
                runtime,
                control_connection,
                container_connection,
                relayout: None,
            });
        }

        info!(target: targets::DISCLOSURE, item_count, "disclosure controller initialized");
        self.events.emit(DisclosureEvent::Initialized { item_count });
        true
    }

    fn fail_initialize(&self, err: InitError) -> bool {
        {
            let mut state = self.state.lock();
            state.phase = DisclosurePhase::Collapsed;
            state.item_count = 0;
            state.last_accepted = None;
        }
        error!(target: targets::DISCLOSURE, error = %err, "disclosure controller initialization failed");
        self.events.emit(DisclosureEvent::InitializationFailed(err));
        false
    }

    fn connect_control(self: &Arc<Self>, elements: &ResolvedElements) -> ConnectionId {
        let weak = Arc::downgrade(self);
        elements.control.input().connect(move |input| {
            let Some(request) = input.toggle_request() else {
                return;
            };
            if let Some(shared) = weak.upgrade() {
                shared.request_toggle(request);
            }
        })
    }

    fn connect_container(self: &Arc<Self>, elements: &ResolvedElements) -> ConnectionId {
        let weak = Arc::downgrade(self);
        let tracker = Mutex::new(SwipeTracker::new(self.config.swipe_threshold_px));
        elements.container.input().connect(move |input| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match *input {
                ContainerInput::TouchStart { y } => tracker.lock().touch_start(y),
                ContainerInput::TouchEnd { y } => {
                    let swipe = tracker.lock().touch_end(y);
                    if let Some(direction) = swipe {
                        shared.on_swipe(direction);
                    }
                }
                ContainerInput::ViewportChanged => shared.schedule_relayout(),
            }
        })
    }

    fn on_swipe(self: &Arc<Self>, direction: SwipeDirection) {
        let expanded = self.state.lock().phase.is_expanded();
        if direction.toggles(expanded) {
            self.request_toggle(ToggleRequest::new(RequestSource::Swipe));
        } else {
            trace!(target: targets::INPUT, ?direction, expanded, "swipe ignored in current state");
        }
    }

    fn request_toggle(self: &Arc<Self>, request: ToggleRequest) -> bool {
        let mut state = self.state.lock();
        let bound = state
            .binding
            .as_ref()
            .map(|binding| (binding.runtime.clone(), binding.elements.clone()));
        let Some((runtime, elements)) = bound else {
            drop(state);
            return self.reject(request, RejectReason::NotInitialized);
        };

        if state.phase.is_animating() {
            drop(state);
            return self.reject(request, RejectReason::Redundant);
        }

        let now = {
            let _enter = runtime.enter();
            Instant::now()
        };
        if let Some(last) = state.last_accepted {
            if now.saturating_duration_since(last) < self.config.refractory_window() {
                drop(state);
                return self.reject(request, RejectReason::TooFast);
            }
        }

        let phase = state.phase.begin_toggle();
        state.phase = phase;
        state.last_accepted = Some(now);
        let epoch = state.epoch;
        drop(state);

        let expanded = phase.is_expanded();
        let items = self.adapter.enumerate_items();
        {
            let mut state = self.state.lock();
            if state.epoch == epoch {
                state.item_count = items.len();
            }
        }
        debug!(
            target: targets::DISCLOSURE,
            source = ?request.source,
            %phase,
            item_count = items.len(),
            "toggle accepted"
        );

        let affordance = Affordance::for_state(expanded, &self.config.labels);
        let updated = elements
            .control
            .set_affordance(&affordance)
            .and_then(|()| elements.control.set_interactive(false))
            .and_then(|()| elements.container.set_expanded_marker(expanded));
        self.events
            .emit(DisclosureEvent::ToggleAccepted { request, phase });
        if let Err(err) = updated {
            self.report_fault(AnimationFault::Affordance(err));
        }

        if items.is_empty() {
            self.settle(epoch);
            return true;
        }

        let span = span!(
            target: targets::DISCLOSURE,
            Level::DEBUG,
            span_names::TRANSITION,
            expanded,
            items = items.len()
        );
        let mut state = self.state.lock();
        if state.epoch == epoch && state.phase.is_animating() {
            let task = Arc::clone(self).run_transition(epoch, expanded, items);
            state.transition = Some(runtime.spawn(task.instrument(span)));
        }
        true
    }

    async fn run_transition(self: Arc<Self>, epoch: u64, expanded: bool, items: Vec<DisclosureItem>) {
        let guard = TransitionGuard {
            shared: Arc::downgrade(&self),
            epoch,
            armed: true,
        };
        let this: &Shared = &self;

        let results = if expanded {
            join_all(items.iter().map(|item| {
                let delay = this.config.reveal_delay(item.ordinal());
                async move {
                    let result = this.driver.reveal(item, delay).await;
                    if result.is_ok() {
                        this.item_settled(epoch, item.ordinal());
                    }
                    result
                }
            }))
            .await
        } else {
            join_all(items.iter().map(|item| async move {
                let result = this.driver.hide(item).await;
                if result.is_ok() {
                    this.item_settled(epoch, item.ordinal());
                }
                result
            }))
            .await
        };

        if this.is_current(epoch) {
            for fault in results.into_iter().filter_map(Result::err) {
                this.report_fault(fault);
            }
        }
        guard.disarm();
        this.settle(epoch);
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.state.lock().epoch == epoch
    }

    fn item_settled(&self, epoch: u64, ordinal: usize) {
        if !self.is_current(epoch) {
            return;
        }
        trace!(target: targets::DISCLOSURE, ordinal, "item settled");
        self.events.emit(DisclosureEvent::ItemSettled { ordinal });
    }

    fn settle(&self, epoch: u64) {
        let (expanded, control) = {
            let mut state = self.state.lock();
            if state.epoch != epoch || !state.phase.is_animating() {
                return;
            }
            state.phase = state.phase.settled();
            state.transition = None;
            (state.phase.is_expanded(), bound_control(&state))
        };

        self.restore_control(control);
        debug!(target: targets::DISCLOSURE, expanded, "transition settled");
        self.events.emit(DisclosureEvent::Settled { expanded });
    }

    /// Clears a transition whose task was dropped before it could settle.
    fn abandon(&self, epoch: u64) {
        let control = {
            let mut state = self.state.lock();
            if state.epoch != epoch || !state.phase.is_animating() {
                return;
            }
            state.phase = state.phase.settled();
            state.transition = None;
            bound_control(&state)
        };

        self.restore_control(control);
        self.report_fault(AnimationFault::Aborted);
    }

    fn restore_control(&self, control: Option<Arc<dyn ToggleControlElement>>) {
        if let Some(control) = control {
            if let Err(err) = control.set_interactive(true) {
                self.report_fault(AnimationFault::Affordance(err));
            }
        }
    }

    fn report_fault(&self, fault: AnimationFault) {
        warn!(target: targets::DISCLOSURE, error = %fault, "transition fault");
        self.events.emit(DisclosureEvent::Fault(fault));
    }

    fn reject(&self, request: ToggleRequest, reason: RejectReason) -> bool {
        debug!(target: targets::DISCLOSURE, source = ?request.source, %reason, "toggle rejected");
        self.events
            .emit(DisclosureEvent::ToggleRejected { request, reason });
        false
    }

    fn schedule_relayout(self: &Arc<Self>) {
        let delay = self.config.relayout_delay();
        let weak = Arc::downgrade(self);

        let mut state = self.state.lock();
        let Some(binding) = state.binding.as_mut() else {
            return;
        };
        if let Some(pending) = binding.relayout.take() {
            pending.abort();
        }
        binding.relayout = Some(binding.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.relayout();
            }
        }));
    }

    fn relayout(&self) -> bool {
        {
            let state = self.state.lock();
            if state.binding.is_none() || state.phase != DisclosurePhase::Expanded {
                return false;
            }
        }

        let items = self.adapter.enumerate_items();
        for item in &items {
            if let Err(fault) = self.driver.snap(item, VisualState::Shown) {
                warn!(target: targets::DISCLOSURE, error = %fault, "could not relayout item");
            }
        }
        debug!(target: targets::DISCLOSURE, item_count = items.len(), "relaid out disclosure items");
        true
    }

    fn teardown(&self) {
        let (binding, was_animating) = {
            let mut state = self.state.lock();
            state.epoch = state.epoch.wrapping_add(1);
            let was_animating = state.phase.is_animating();
            state.phase = state.phase.settled();
            let transition = state.transition.take();
            if transition.is_some() {
                state.detached = transition;
            }
            (state.binding.take(), was_animating)
        };

        let Some(binding) = binding else {
            trace!(target: targets::DISCLOSURE, "teardown without bindings");
            return;
        };
        if let Some(task) = binding.relayout {
            task.abort();
        }

        let elements = binding.elements;
        elements.control.input().disconnect(binding.control_connection);
        elements.container.input().disconnect(binding.container_connection);
        if was_animating {
            if let Err(err) = elements.control.set_interactive(true) {
                warn!(target: targets::DISCLOSURE, error = %err, "could not re-enable toggle control");
            }
        }

        debug!(target: targets::DISCLOSURE, "disclosure controller torn down");
        self.events.emit(DisclosureEvent::TornDown);
    }
}

fn bound_control(state: &ControllerState) -> Option<Arc<dyn ToggleControlElement>> {
    state
        .binding
        .as_ref()
        .map(|binding| binding.elements.control.clone())
}

/// Settles the transition as aborted if its task is dropped early.
struct TransitionGuard {
    shared: Weak<Shared>,
    epoch: u64,
    armed: bool,
}

impl TransitionGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.abandon(self.epoch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MemoryDocument;

    #[test]
    fn test_initialize_without_runtime_degrades() {
        let document = Arc::new(MemoryDocument::route_panel(2));
        let controller = DisclosureController::new(document, DisclosureConfig::default());

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        controller.events().connect(move |event| {
            events_clone.lock().push(event.clone());
        });

        assert!(!controller.initialize());
        assert!(!controller.is_initialized());
        assert!(!controller.request_toggle(ToggleRequest::programmatic()));
        assert_eq!(controller.get_state(), DisclosureState::default());

        let events = events.lock();
        assert_eq!(
            events[0],
            DisclosureEvent::InitializationFailed(InitError::NoRuntime)
        );
        assert_eq!(
            events[1],
            DisclosureEvent::ToggleRejected {
                request: ToggleRequest::programmatic(),
                reason: RejectReason::NotInitialized,
            }
        );
    }

    #[test]
    fn test_teardown_before_initialize_is_safe() {
        let document = Arc::new(MemoryDocument::new());
        let controller = DisclosureController::new(document, DisclosureConfig::default());
        controller.teardown();
        controller.teardown();
        assert!(!controller.force_collapse());
        assert!(!controller.relayout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_control_becomes_focusable_button() {
        let document = Arc::new(MemoryDocument::route_panel(2));
        let controller = DisclosureController::new(document.clone(), DisclosureConfig::default());
        assert!(controller.initialize());

        let control = document.first_toggle_control().unwrap();
        assert_eq!(control.role(), Some(AccessibleRole::Button));
        assert!(control.is_focusable());
        assert_eq!(control.affordance().unwrap().label, "Expand route");

        let style = controller.config().transition_style();
        for item in document.items() {
            assert_eq!(item.transition(), Some(style));
            assert_eq!(item.state(), VisualState::Hidden);
        }
    }
}
