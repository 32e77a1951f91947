//! FILENAME: core/exhibit-engine/src/coordinator.rs
//! PURPOSE: The loss development exhibit: builds filters and controls on a
//! host sheet, renders the selected slice, and re-renders on change.
//! CONTEXT: Lifecycle is Unbound -> Ready, one way. Building either succeeds
//! as a whole or leaves no controls behind. Change notifications accumulate in
//! the exhibit's `ChangeInbox` and are handled by `dispatch_pending`, one
//! refresh per drained batch. A refresh commits its new selection only after
//! the grid write succeeded, so the grid always shows the last good slice.

use std::rc::Rc;

use engine::{rect_address_at, ControlHost, ControlId, GridSurface, SheetId};
use serde::Serialize;

use crate::binding::{bind_controls, read_control_value, unbind_controls, BoundControl, ChangeInbox};
use crate::config::ExhibitConfig;
use crate::dataset::Dataset;
use crate::error::ExhibitError;
use crate::layout::{measure_control_width, plan_layout, ControlPlacement};
use crate::logging::{log_debug, log_error, log_info, log_warn};
use crate::registry::{FilterDimension, FilterRegistry};
use crate::selection::FilterSelection;
use crate::slice::{slice, RenderedSlice};

/// Inbox drains per `dispatch_pending` call: the pending batch plus the
/// notifications raised while it was being written.
const MAX_DRAINS_PER_DISPATCH: usize = 2;

// ============================================================================
// EXHIBIT CONTRACT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExhibitState {
    Unbound,
    Ready,
}

/// A visual part of an exhibit on its sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExhibitComponent {
    FilterControl { dimension: String, top_row: u32, column: u32, height: u32 },
    SliceRegion { address: String },
}

/// Outcome of one `dispatch_pending` call.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Refreshes that reached the grid.
    pub refreshes: usize,
    /// Refreshes that failed. The grid kept its previous content for each.
    pub errors: Vec<ExhibitError>,
}

impl RefreshReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Common surface of exhibits hosted on a sheet.
pub trait Exhibit {
    fn sheet_name(&self) -> Option<&str>;

    fn state(&self) -> ExhibitState;

    /// Components currently placed on the sheet. Empty while unbound.
    fn components(&self) -> Vec<ExhibitComponent>;

    /// Builds the exhibit on `sheet_name`, creating the sheet if needed.
    fn load_into(&mut self, sheet_name: &str) -> Result<(), ExhibitError>;

    /// Handles every change posted since the last call.
    fn dispatch_pending(&mut self) -> RefreshReport;
}

// ============================================================================
// LOSS DEVELOPMENT EXHIBIT
// ============================================================================

struct Binding {
    sheet: SheetId,
    sheet_name: String,
    placements: Vec<ControlPlacement>,
    controls: Vec<BoundControl>,
    inbox: Rc<ChangeInbox>,
    last_address: String,
}

pub struct LossDevelopmentExhibit<D: Dataset, H: GridSurface + ControlHost> {
    dataset: D,
    host: H,
    config: ExhibitConfig,
    registry: Option<FilterRegistry>,
    selection: FilterSelection,
    binding: Option<Binding>,
}

impl<D: Dataset, H: GridSurface + ControlHost> LossDevelopmentExhibit<D, H> {
    /// Takes ownership of the dataset, converting it to cumulative form once
    /// if it holds incremental amounts.
    pub fn new(dataset: D, host: H, config: ExhibitConfig) -> Self {
        let dataset = if dataset.is_cumulative() {
            dataset
        } else {
            log_debug!("EXHIBIT", "converting incremental dataset to cumulative");
            dataset.to_cumulative()
        };
        LossDevelopmentExhibit {
            dataset,
            host,
            config,
            registry: None,
            selection: FilterSelection::default(),
            binding: None,
        }
    }

    /// Builds on the configured sheet.
    pub fn load(&mut self) -> Result<(), ExhibitError> {
        let sheet_name = self.config.sheet_name.clone();
        self.load_into(&sheet_name)
    }

    fn build(&mut self, sheet_name: &str) -> Result<(), ExhibitError> {
        if let Some(binding) = &self.binding {
            return Err(ExhibitError::AlreadyBound(binding.sheet_name.clone()));
        }
        self.config.validate()?;
        let anchor_col = self.config.slice_anchor_col_number()?;

        // Nothing touches the host until every dimension is known to be usable.
        let registry = FilterRegistry::from_dataset(&self.dataset, &self.config.measure_dimension)?;

        let sheet = self.host.get_or_create_sheet(sheet_name)?;
        let width = measure_control_width(
            &mut self.host,
            sheet,
            self.config.filter_column,
            registry.longest_label(),
            self.config.min_probe_chars,
        )?;
        let placements = plan_layout(
            registry.dimensions(),
            self.config.control_row_offset,
            self.config.filter_column,
            width,
            self.host.max_rows(),
        )?;

        let inbox = ChangeInbox::new(registry.len());
        let controls = bind_controls(&mut self.host, sheet, &registry, &placements, &inbox)?;
        let selection = registry.initial_selection();

        let rendered = slice(&self.dataset, &registry, &selection)
            .and_then(|rendered| self.write_slice(sheet, anchor_col, &rendered));
        let last_address = match rendered {
            Ok(address) => address,
            Err(e) => {
                unbind_controls(&mut self.host, &controls);
                return Err(e);
            }
        };

        inbox.arm();
        log_info!(
            "EXHIBIT",
            "ready on {}: {} filters, slice at {}",
            sheet_name,
            controls.len(),
            last_address
        );

        self.registry = Some(registry);
        self.selection = selection;
        self.binding = Some(Binding {
            sheet,
            sheet_name: sheet_name.to_string(),
            placements,
            controls,
            inbox,
            last_address,
        });
        Ok(())
    }

    /// Writes the block with headers in one call. Returns the written range.
    fn write_slice(
        &mut self,
        sheet: SheetId,
        anchor_col: u32,
        rendered: &RenderedSlice,
    ) -> Result<String, ExhibitError> {
        let (origins, developments) = rendered.shape();
        let address = rect_address_at(
            origins as u32 + 1,
            developments as u32 + 1,
            self.config.slice_anchor_row,
            anchor_col,
        )?;
        self.host.write_range(sheet, &address, &rendered.to_block())?;
        log_debug!("SLICE", "wrote {} ({})", address, rendered.measure);
        Ok(address)
    }

    /// One refresh: read the live value of every bound control, slice, write.
    ///
    /// Every control is read, not only the dirty ones, so a value left behind
    /// by an earlier failed refresh is picked up by the next successful one.
    fn refresh(&mut self, dirty: &[usize]) -> Result<(), ExhibitError> {
        let (Some(binding), Some(registry)) = (&self.binding, &self.registry) else {
            return Ok(());
        };
        let sheet = binding.sheet;
        log_debug!("EXHIBIT", "refresh for dimensions {:?}", dirty);

        let mut next = self.selection.clone();
        for (bound, dimension) in binding.controls.iter().zip(registry.dimensions()) {
            let label = read_control_value(&self.host, bound.control)?;
            next.select(dimension, &label)?;
        }

        let rendered = slice(&self.dataset, registry, &next)?;
        let anchor_col = self.config.slice_anchor_col_number()?;
        let address = self.write_slice(sheet, anchor_col, &rendered)?;

        self.selection = next;
        if let Some(binding) = self.binding.as_mut() {
            binding.last_address = address;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &ExhibitConfig {
        &self.config
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn registry(&self) -> Option<&FilterRegistry> {
        self.registry.as_ref()
    }

    pub fn dimensions(&self) -> &[FilterDimension] {
        self.registry.as_ref().map(|r| r.dimensions()).unwrap_or(&[])
    }

    /// Selection of the last successful render.
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn placements(&self) -> &[ControlPlacement] {
        self.binding.as_ref().map(|b| b.placements.as_slice()).unwrap_or(&[])
    }

    pub fn controls(&self) -> &[BoundControl] {
        self.binding.as_ref().map(|b| b.controls.as_slice()).unwrap_or(&[])
    }

    pub fn control_for(&self, dimension: &str) -> Option<ControlId> {
        let registry = self.registry.as_ref()?;
        let index = registry.dimensions().iter().position(|d| d.name() == dimension)?;
        self.controls().get(index).map(|b| b.control)
    }

    pub fn sheet(&self) -> Option<SheetId> {
        self.binding.as_ref().map(|b| b.sheet)
    }

    pub fn last_rendered_address(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.last_address.as_str())
    }

    /// Notifications dropped because they arrived before the exhibit was ready.
    pub fn ignored_changes(&self) -> u64 {
        self.binding.as_ref().map(|b| b.inbox.ignored()).unwrap_or(0)
    }

    pub fn has_pending(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.inbox.has_pending())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<D: Dataset, H: GridSurface + ControlHost> Exhibit for LossDevelopmentExhibit<D, H> {
    fn sheet_name(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.sheet_name.as_str())
    }

    fn state(&self) -> ExhibitState {
        match &self.binding {
            Some(_) => ExhibitState::Ready,
            None => ExhibitState::Unbound,
        }
    }

    fn components(&self) -> Vec<ExhibitComponent> {
        let Some(binding) = &self.binding else {
            return Vec::new();
        };
        let mut components: Vec<ExhibitComponent> = binding
            .placements
            .iter()
            .map(|p| ExhibitComponent::FilterControl {
                dimension: p.dimension.clone(),
                top_row: p.origin_row,
                column: p.origin_col,
                height: p.height,
            })
            .collect();
        components.push(ExhibitComponent::SliceRegion { address: binding.last_address.clone() });
        components
    }

    fn load_into(&mut self, sheet_name: &str) -> Result<(), ExhibitError> {
        log_info!("EXHIBIT", "loading into {}", sheet_name);
        self.build(sheet_name).inspect_err(|e| {
            log_error!("EXHIBIT", "load into {} failed: {}", sheet_name, e);
        })
    }

    fn dispatch_pending(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();
        let Some(inbox) = self.binding.as_ref().map(|b| Rc::clone(&b.inbox)) else {
            return report;
        };

        // A refresh can itself cause notifications. Those get one further
        // drain; anything posted after that waits for the next call.
        for _ in 0..MAX_DRAINS_PER_DISPATCH {
            let dirty = inbox.take();
            if dirty.is_empty() {
                break;
            }
            match self.refresh(&dirty) {
                Ok(()) => report.refreshes += 1,
                Err(e) => {
                    log_warn!("EXHIBIT", "refresh failed, keeping previous slice: {}", e);
                    report.errors.push(e);
                }
            }
        }
        report
    }
}
