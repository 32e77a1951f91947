//! FILENAME: core/exhibit-engine/src/binding.rs
//! PURPOSE: Materializes filter controls on the host and wires their change
//! notifications back into the exhibit.
//! CONTEXT: A control's change hook does no work itself. It only marks its
//! dimension dirty in the exhibit's `ChangeInbox`; the exhibit drains the
//! inbox from its own dispatch loop. A burst of notifications for the same
//! dimension therefore collapses into one pending entry, and the inbox never
//! holds more than one entry per dimension.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use engine::{ControlHost, ControlId, ControlKind, HostError, PropertyValue, SheetId};

use crate::error::ExhibitError;
use crate::layout::ControlPlacement;
use crate::logging::{log_debug, log_warn};
use crate::naming::{control_name, host_name};
use crate::registry::{FilterDimension, FilterRegistry};

// ============================================================================
// CHANGE INBOX
// ============================================================================

/// Pending change notifications, one slot per dimension.
#[derive(Debug)]
pub struct ChangeInbox {
    armed: Cell<bool>,
    dirty: RefCell<Vec<bool>>,
    ignored: Cell<u64>,
}

impl ChangeInbox {
    pub fn new(dimensions: usize) -> Rc<Self> {
        Rc::new(ChangeInbox {
            armed: Cell::new(false),
            dirty: RefCell::new(vec![false; dimensions]),
            ignored: Cell::new(0),
        })
    }

    /// Starts accepting notifications. Anything posted before is dropped.
    pub fn arm(&self) {
        self.armed.set(true);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Marks a dimension as changed.
    pub fn post(&self, dimension: usize) {
        if !self.armed.get() {
            self.ignored.set(self.ignored.get() + 1);
            log_debug!("BIND", "ignored change on dimension {} before ready", dimension);
            return;
        }
        if let Some(slot) = self.dirty.borrow_mut().get_mut(dimension) {
            *slot = true;
        }
    }

    pub fn has_pending(&self) -> bool {
        self.dirty.borrow().iter().any(|d| *d)
    }

    /// Takes every dirty dimension, in dimension order, and clears the flags.
    pub fn take(&self) -> Vec<usize> {
        let mut dirty = self.dirty.borrow_mut();
        let taken = dirty
            .iter()
            .enumerate()
            .filter(|(_, d)| **d)
            .map(|(i, _)| i)
            .collect();
        dirty.iter_mut().for_each(|d| *d = false);
        taken
    }

    /// Notifications dropped because they arrived before `arm`.
    pub fn ignored(&self) -> u64 {
        self.ignored.get()
    }
}

// ============================================================================
// CONTROL PROPERTIES
// ============================================================================

/// Sets a control property given by its engine name.
pub fn set_control_property<H: ControlHost + ?Sized>(
    host: &mut H,
    control: ControlId,
    property: &str,
    value: PropertyValue,
) -> Result<(), HostError> {
    host.set_property(control, &host_name(property), value)
}

/// Reads the live value of a list control.
pub fn read_control_value<H: ControlHost + ?Sized>(
    host: &H,
    control: ControlId,
) -> Result<String, HostError> {
    let property = host_name("value");
    match host.get_property(control, &property)? {
        PropertyValue::Text(value) => Ok(value),
        _ => Err(HostError::PropertyType { property, expected: "text" }),
    }
}

// ============================================================================
// BINDING
// ============================================================================

/// A control bound to a filter dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundControl {
    pub control: ControlId,
    pub dimension: usize,
    pub name: String,
}

fn seed_control<H: ControlHost + ?Sized>(
    host: &mut H,
    control: ControlId,
    dimension: &FilterDimension,
) -> Result<(), HostError> {
    set_control_property(host, control, "font_bold", PropertyValue::Bool(true))?;
    set_control_property(host, control, "list", PropertyValue::List(dimension.domain().to_vec()))?;
    let default = PropertyValue::Text(dimension.default_label().to_string());
    set_control_property(host, control, "value", default)?;
    set_control_property(host, control, "name", PropertyValue::Text(control_name(dimension.name())))
}

/// Creates, seeds and subscribes one list control per placement.
///
/// Hooks post into `inbox` through a weak reference, so a control outliving
/// its exhibit notifies nobody. On failure every control created by this call
/// is deleted before the error is returned.
pub fn bind_controls<H: ControlHost + ?Sized>(
    host: &mut H,
    sheet: SheetId,
    registry: &FilterRegistry,
    placements: &[ControlPlacement],
    inbox: &Rc<ChangeInbox>,
) -> Result<Vec<BoundControl>, ExhibitError> {
    let mut bound: Vec<BoundControl> = Vec::with_capacity(placements.len());
    let result = (|| {
        let pairs = registry.dimensions().iter().zip(placements);
        for (index, (dimension, placement)) in pairs.enumerate() {
            let control =
                host.create_control(sheet, ControlKind::ListBox, &placement.geometry())?;
            bound.push(BoundControl {
                control,
                dimension: index,
                name: control_name(dimension.name()),
            });
            seed_control(host, control, dimension)?;

            let inbox: Weak<ChangeInbox> = Rc::downgrade(inbox);
            host.subscribe(
                control,
                Box::new(move || {
                    if let Some(inbox) = inbox.upgrade() {
                        inbox.post(index);
                    }
                }),
            )?;
            log_debug!("BIND", "bound {} to control {:?}", dimension.name(), control);
        }
        Ok::<(), HostError>(())
    })();

    match result {
        Ok(()) => Ok(bound),
        Err(err) => {
            unbind_controls(host, &bound);
            Err(err.into())
        }
    }
}

/// Deletes bound controls, logging rather than failing on individual errors.
pub fn unbind_controls<H: ControlHost + ?Sized>(host: &mut H, controls: &[BoundControl]) {
    for bound in controls {
        if let Err(e) = host.delete_control(bound.control) {
            log_warn!("BIND", "could not delete control {}: {}", bound.name, e);
        }
    }
}
