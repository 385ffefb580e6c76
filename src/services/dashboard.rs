//! Dashboard controller.
//!
//! All mutable dashboard state lives in [`DashboardState`]. Each event
//! (input edit, product or model selection, commit timer firing, fetch
//! completion) is a method that updates the state and returns the
//! [`DashboardEffect`]s the runtime has to carry out. Nothing here touches
//! the network or the clock.
//!
//! Edits to the forecast horizon, seasonal periods and assumptions land in
//! the raw inputs first. They reach the committed inputs, and therefore the
//! network, only when the commit timer fires. Forecast and optimization
//! requests are numbered; only the newest cycle may update the view.

use tracing::{debug, info, warn};

use crate::domain::assumptions::{Field, ValidationError};
use crate::domain::forecast::{ForecastQuery, ForecastResult, ModelType, OptimizeQuery};
use crate::domain::inputs::DashboardInputs;
use crate::domain::inventory::InventoryRecord;
use crate::domain::optimization::OptimizationResult;
use crate::services::assumptions_input::is_field_pending;
use crate::services::data_source::DataSourceError;
use crate::services::inventory_table::{InventoryRequest, InventoryTable};

/// One forecast + optimization request pair, built from committed inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRequest {
    pub cycle: u64,
    pub product_id: String,
    pub forecast: ForecastQuery,
    pub optimize: OptimizeQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEffect {
    FetchProducts,
    /// Start the commit timer, replacing any live one.
    ScheduleCommit,
    CancelCommit,
    FetchCycle(CycleRequest),
    FetchInventory(InventoryRequest),
}

pub type CycleOutcome = Result<(ForecastResult, OptimizationResult), DataSourceError>;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    raw: DashboardInputs,
    committed: DashboardInputs,
    selected_product: Option<String>,
    model_type: ModelType,
    products: Vec<String>,
    forecast: Option<ForecastResult>,
    optimization: Option<OptimizationResult>,
    loading: bool,
    debouncing: bool,
    error: Option<String>,
    /// Set when `error` came from the newest forecast/optimization cycle.
    cycle_failed: bool,
    commit_scheduled: bool,
    latest_cycle: u64,
    inventory: InventoryTable,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `inputs` for both the raw and committed copies.
    pub fn with_inputs(inputs: DashboardInputs, model_type: ModelType) -> Self {
        Self {
            raw: inputs,
            committed: inputs,
            model_type,
            ..Self::default()
        }
    }

    pub fn raw(&self) -> &DashboardInputs {
        &self.raw
    }

    pub fn committed(&self) -> &DashboardInputs {
        &self.committed
    }

    pub fn selected_product(&self) -> Option<&str> {
        self.selected_product.as_deref()
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn forecast(&self) -> Option<&ForecastResult> {
        self.forecast.as_ref()
    }

    pub fn optimization(&self) -> Option<&OptimizationResult> {
        self.optimization.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_debouncing(&self) -> bool {
        self.debouncing
    }

    pub fn is_commit_scheduled(&self) -> bool {
        self.commit_scheduled
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn cycle_failed(&self) -> bool {
        self.cycle_failed
    }

    pub fn inventory(&self) -> &InventoryTable {
        &self.inventory
    }

    /// Seasonal periods are only editable for the seasonal model.
    pub fn show_seasonal_periods(&self) -> bool {
        self.model_type.is_seasonal()
    }

    pub fn is_field_pending(&self, field: Field) -> bool {
        is_field_pending(field, &self.raw, &self.committed, self.debouncing)
    }

    pub fn pending_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.is_field_pending(*field))
            .collect()
    }

    pub fn start(&mut self) -> Vec<DashboardEffect> {
        self.discover_products()
    }

    fn discover_products(&mut self) -> Vec<DashboardEffect> {
        self.loading = true;
        self.error = None;
        self.cycle_failed = false;
        vec![DashboardEffect::FetchProducts]
    }

    pub fn products_resolved(
        &mut self,
        result: Result<Vec<String>, DataSourceError>,
    ) -> Vec<DashboardEffect> {
        self.loading = false;
        match result {
            Ok(products) if !products.is_empty() => {
                info!(count = products.len(), "products loaded");
                self.products = products;
                if self.selected_product.is_none() {
                    let first = self.products[0].clone();
                    return self.select_product(Some(first));
                }
                Vec::new()
            }
            Ok(_) => {
                self.products.clear();
                self.error = Some(DataSourceError::NoProducts.to_string());
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "failed to load products");
                // the previous selection, if any, stays in place
                self.error = Some(match err {
                    DataSourceError::NoProducts => err.to_string(),
                    other => format!("Product Error: {other}"),
                });
                Vec::new()
            }
        }
    }

    pub fn select_product(&mut self, product_id: Option<String>) -> Vec<DashboardEffect> {
        if self.selected_product == product_id {
            // `product` with nothing selected is an explicit reload
            return match product_id {
                None => self.discover_products(),
                Some(_) => Vec::new(),
            };
        }
        info!(product = ?product_id, "product selected");
        self.selected_product = product_id;

        let mut effects = Vec::new();
        if let Some(request) = self.inventory.set_product(self.selected_product.as_deref()) {
            effects.push(DashboardEffect::FetchInventory(request));
        }
        if self.selected_product.is_none() {
            self.invalidate_cycle();
            effects.extend(self.discover_products());
        } else {
            effects.extend(self.refresh());
        }
        effects
    }

    pub fn select_model(&mut self, model_type: ModelType) -> Vec<DashboardEffect> {
        if self.model_type == model_type {
            return Vec::new();
        }
        info!(model = %model_type, "model selected");
        self.model_type = model_type;
        self.refresh()
    }

    /// Applies a raw edit. Rejected edits leave the state untouched.
    pub fn edit(&mut self, field: Field, text: &str) -> Result<Vec<DashboardEffect>, ValidationError> {
        let before = self.raw;
        self.raw.edit(field, text)?;
        if self.raw == before {
            return Ok(Vec::new());
        }

        if self.raw != self.committed {
            debug!(%field, "input changed, commit scheduled");
            self.debouncing = true;
            self.commit_scheduled = true;
            return Ok(vec![DashboardEffect::ScheduleCommit]);
        }

        // edited back to the committed values: nothing left to sync
        self.debouncing = false;
        if self.commit_scheduled {
            self.commit_scheduled = false;
            return Ok(vec![DashboardEffect::CancelCommit]);
        }
        Ok(Vec::new())
    }

    /// The commit timer elapsed: copy the raw inputs over in one step.
    pub fn commit_fired(&mut self) -> Vec<DashboardEffect> {
        if !self.commit_scheduled {
            debug!("ignoring commit with nothing scheduled");
            return Vec::new();
        }
        self.commit_scheduled = false;
        self.debouncing = false;

        let changed = self.committed != self.raw;
        self.committed = self.raw;
        if changed {
            info!("inputs committed");
            self.refresh()
        } else {
            Vec::new()
        }
    }

    fn refresh(&mut self) -> Vec<DashboardEffect> {
        let Some(product_id) = self.selected_product.clone() else {
            self.invalidate_cycle();
            return Vec::new();
        };
        let Some(optimize) = self.committed.optimize_query(self.model_type) else {
            debug!("committed inputs incomplete, skipping fetch");
            self.invalidate_cycle();
            return Vec::new();
        };

        self.latest_cycle += 1;
        self.loading = true;
        info!(
            cycle = self.latest_cycle,
            product = %product_id,
            model = %self.model_type,
            "requesting forecast and optimization"
        );
        vec![DashboardEffect::FetchCycle(CycleRequest {
            cycle: self.latest_cycle,
            product_id,
            forecast: optimize.forecast,
            optimize,
        })]
    }

    /// Supersedes any in-flight cycle and drops results that no longer
    /// match the selection or the committed inputs.
    fn invalidate_cycle(&mut self) {
        self.latest_cycle += 1;
        self.forecast = None;
        self.optimization = None;
        self.loading = false;
        if self.cycle_failed {
            self.error = None;
            self.cycle_failed = false;
        }
    }

    /// Applies the outcome of a cycle. Returns false for superseded cycles,
    /// which are dropped without touching the state.
    pub fn cycle_resolved(&mut self, cycle: u64, outcome: CycleOutcome) -> bool {
        if cycle != self.latest_cycle {
            debug!(cycle, latest = self.latest_cycle, "discarding superseded cycle");
            return false;
        }
        match outcome {
            Ok((forecast, optimization)) => {
                self.forecast = Some(forecast);
                self.optimization = Some(optimization);
                self.error = None;
                self.cycle_failed = false;
            }
            Err(err) => {
                warn!(%err, cycle, "forecast cycle failed");
                self.forecast = None;
                self.optimization = None;
                self.error = Some(format!("Optimization Error: {err}"));
                self.cycle_failed = true;
            }
        }
        self.loading = false;
        if !self.commit_scheduled {
            self.debouncing = false;
        }
        true
    }

    pub fn inventory_resolved(
        &mut self,
        generation: u64,
        result: Result<Vec<InventoryRecord>, DataSourceError>,
    ) -> bool {
        self.inventory.resolve(generation, result)
    }
}
