use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use log::{debug, info, trace};

use super::icade_state::{ButtonId, ButtonSet};
use super::icade_table::CharacterTable;
use crate::config::{ActivationPolicy, ReaderConfig, DEFAULT_BUFFER_RESET_INTERVAL};

/// Edge produced by a single controller character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ICadeEvent {
    ButtonDown(ButtonId),
    ButtonUp(ButtonId),
    /// Full mask after the edge that preceded it.
    StateChanged(ButtonSet),
}

/// Receiver of decoded controller events.
///
/// The reader only holds a weak reference; a delegate that has been dropped
/// simply stops receiving events.
pub trait ICadeDelegate {
    fn button_down(&mut self, _button: ButtonId) {}
    fn button_up(&mut self, _button: ButtonId) {}
    fn state_changed(&mut self, _state: ButtonSet) {}
}

/// The UI layer that owns keyboard focus and delivers characters.
pub trait InputHost {
    /// Whether the application is currently in the foreground.
    fn is_foreground(&self) -> bool {
        true
    }

    fn request_focus(&mut self);

    fn release_focus(&mut self);

    /// Drop whatever the host's input path has accumulated. Called
    /// periodically while keys are being delivered.
    fn clear_input_buffer(&mut self) {
        self.release_focus();
        self.request_focus();
    }
}

/// Host for environments where focus is not a concept.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl InputHost for NoopHost {
    fn request_focus(&mut self) {}

    fn release_focus(&mut self) {}

    fn clear_input_buffer(&mut self) {}
}

/// Decodes iCade characters into button edges.
///
/// Every character is looked up in the ON table first and the OFF table
/// second. A press or release only produces events when it changes the held
/// mask, so key-repeat duplicates are swallowed.
pub struct ICadeReader<H: InputHost> {
    table: &'static CharacterTable,
    host: H,
    state: ButtonSet,
    active: bool,
    activation: ActivationPolicy,
    deliveries: u32,
    reset_interval: u32,
    delegate: Option<Weak<RefCell<dyn ICadeDelegate>>>,
}

impl<H: InputHost> ICadeReader<H> {
    pub fn new(table: &'static CharacterTable, host: H) -> Self {
        Self {
            table,
            host,
            state: ButtonSet::empty(),
            active: false,
            activation: ActivationPolicy::default(),
            deliveries: 0,
            reset_interval: DEFAULT_BUFFER_RESET_INTERVAL,
            delegate: None,
        }
    }

    /// Build a reader from settings. `host_locale` is the locale the host
    /// reports; a locale in `config` takes precedence.
    pub fn with_config(config: &ReaderConfig, host_locale: Option<&str>, host: H) -> Self {
        let mut reader = Self::new(config.table(host_locale), host);
        reader.activation = config.activation;
        reader.reset_interval = config.buffer_reset_interval.max(1);
        reader
    }

    /// Register the receiver of decoded events. The reader does not keep it
    /// alive.
    pub fn set_delegate<D>(&mut self, delegate: &Rc<RefCell<D>>)
    where
        D: ICadeDelegate + 'static,
    {
        let weak = Rc::downgrade(delegate) as Weak<RefCell<dyn ICadeDelegate>>;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn state(&self) -> ButtonSet {
        self.state
    }

    pub fn table(&self) -> &'static CharacterTable {
        self.table
    }

    pub fn on_states(&self) -> &[char] {
        &self.table.on
    }

    pub fn off_states(&self) -> &[char] {
        &self.table.off
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Forget all held buttons without emitting events.
    pub fn reset_state(&mut self) {
        self.state = ButtonSet::empty();
    }

    /// Feed one character from the controller and return the events it
    /// caused, in the order they were delivered to the delegate.
    pub fn handle_char(&mut self, ch: char) -> Vec<ICadeEvent> {
        let mut events = Vec::new();

        if let Some(button) = self.table.button_on(ch) {
            debug!("key pressed {ch:?}");
            if self.state.press(button) {
                events.push(ICadeEvent::ButtonDown(button));
                events.push(ICadeEvent::StateChanged(self.state));
            }
        } else if let Some(button) = self.table.button_off(ch) {
            debug!("key pressed {ch:?}");
            if self.state.release(button) {
                events.push(ICadeEvent::ButtonUp(button));
                events.push(ICadeEvent::StateChanged(self.state));
            }
        } else {
            trace!("ignoring {ch:?}");
            return events;
        }

        self.dispatch(&events);
        self.count_delivery();
        events
    }

    /// Feed every character of `input` in order.
    pub fn handle_input(&mut self, input: &str) -> Vec<ICadeEvent> {
        input.chars().flat_map(|ch| self.handle_char(ch)).collect()
    }

    /// Start or stop taking controller input.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            if !active || self.activation == ActivationPolicy::Idempotent {
                return;
            }
            self.host.release_focus();
        }

        self.active = active;
        info!("reader {}", if active { "active" } else { "inactive" });

        if active {
            if self.host.is_foreground() {
                self.host.request_focus();
            }
        } else {
            self.host.release_focus();
        }
    }

    /// The application is about to leave the foreground.
    pub fn will_resign_active(&mut self) {
        if self.active {
            self.host.release_focus();
        }
    }

    /// The application returned to the foreground.
    pub fn did_become_active(&mut self) {
        if self.active {
            self.host.request_focus();
        }
    }

    /// The buffer is only cleared while the reader holds focus; clearing
    /// cycles focus and must not take it for an inactive reader.
    fn count_delivery(&mut self) {
        self.deliveries += 1;
        if self.deliveries < self.reset_interval {
            return;
        }
        self.deliveries = 0;
        if self.active && self.host.is_foreground() {
            info!("clearing host input buffer");
            self.host.clear_input_buffer();
        }
    }

    fn dispatch(&self, events: &[ICadeEvent]) {
        if events.is_empty() {
            return;
        }
        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let mut delegate = delegate.borrow_mut();
        for event in events {
            match *event {
                ICadeEvent::ButtonDown(button) => delegate.button_down(button),
                ICadeEvent::ButtonUp(button) => delegate.button_up(button),
                ICadeEvent::StateChanged(state) => delegate.state_changed(state),
            }
        }
    }
}
