use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::assumptions::{Field, ValidationError};
use crate::domain::forecast::{ModelType, ParseModelTypeError};
use crate::domain::inventory::InventoryRecord;
use crate::services::dashboard::{CycleOutcome, CycleRequest, DashboardEffect, DashboardState};
use crate::services::dashboard_view::render_dashboard;
use crate::services::data_source::{DashboardDataSource, DataSourceError};
use crate::services::debounce::CommitTimer;
use crate::services::forecast_chart::write_forecast_chart_png;

pub const HELP: &str = "\
Commands:
  product [ID]            select a product (no ID: reload the product list)
  model <arima|es>        select the forecasting model
  set <field> [VALUE]     edit forecast-days, seasonal-periods, lead-time,
                          service-level, holding-cost or ordering-cost
  show                    print the dashboard
  help                    print this help
  quit                    leave the dashboard";

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to read input: {0}")]
    Input(std::io::Error),
    #[error("failed to write output: {0}")]
    Output(std::io::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("unknown command {0:?} (type help for a list)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Field(#[from] ValidationError),
    #[error(transparent)]
    Model(#[from] ParseModelTypeError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    SelectProduct(Option<String>),
    SelectModel(ModelType),
    Edit(Field, String),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<DashboardCommand>, CommandParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let parsed = match command.to_ascii_lowercase().as_str() {
        "product" => DashboardCommand::SelectProduct(rest.first().map(|id| id.to_string())),
        "model" => {
            let name = rest
                .first()
                .ok_or(CommandParseError::Usage("model <arima|es>"))?;
            DashboardCommand::SelectModel(name.parse()?)
        }
        "set" => {
            let (field, value) = rest
                .split_first()
                .ok_or(CommandParseError::Usage("set <field> [VALUE]"))?;
            DashboardCommand::Edit(field.parse()?, value.join(" "))
        }
        "show" => DashboardCommand::Show,
        "help" | "?" => DashboardCommand::Help,
        "quit" | "exit" => DashboardCommand::Quit,
        other => return Err(CommandParseError::Unknown(other.to_string())),
    };
    Ok(Some(parsed))
}

enum Completion {
    Products(Result<Vec<String>, DataSourceError>),
    Cycle(u64, CycleOutcome),
    Inventory(u64, Result<Vec<InventoryRecord>, DataSourceError>),
}

/// Issues the forecast and optimization requests together and waits for
/// both. Either failure fails the pair.
pub async fn fetch_cycle(source: &dyn DashboardDataSource, request: &CycleRequest) -> CycleOutcome {
    let (forecast, optimization) = tokio::join!(
        source.get_forecast(&request.product_id, &request.forecast),
        source.get_optimization(&request.product_id, &request.optimize),
    );
    Ok((forecast?, optimization?))
}

/// Drives a [`DashboardState`] from line input: one commit timer, fetches
/// on spawned tasks, results folded back in on this task.
pub struct DashboardRuntime<W: Write> {
    state: DashboardState,
    source: Arc<dyn DashboardDataSource>,
    timer: CommitTimer,
    tasks: JoinSet<Completion>,
    output: W,
    chart_path: Option<String>,
}

impl<W: Write> DashboardRuntime<W> {
    pub fn new(source: Arc<dyn DashboardDataSource>, debounce: Duration, output: W) -> Self {
        Self {
            state: DashboardState::new(),
            source,
            timer: CommitTimer::new(debounce),
            tasks: JoinSet::new(),
            output,
            chart_path: None,
        }
    }

    pub fn with_state(mut self, state: DashboardState) -> Self {
        self.state = state;
        self
    }

    /// Writes the forecast chart to `path` after every successful refresh.
    pub fn with_chart_path(mut self, path: Option<String>) -> Self {
        self.chart_path = path;
        self
    }

    /// Runs until `quit`, or until input ends and no commit or fetch is
    /// outstanding. Returns the final state and the output sink.
    pub async fn run<R>(mut self, input: R) -> Result<(DashboardState, W), RuntimeError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        let effects = self.state.start();
        self.execute(effects);

        loop {
            if !input_open && !self.timer.is_armed() && self.tasks.is_empty() {
                break;
            }
            tokio::select! {
                line = lines.next_line(), if input_open => {
                    match line.map_err(RuntimeError::Input)? {
                        Some(line) => {
                            if !self.handle_line(&line)? {
                                break;
                            }
                        }
                        None => input_open = false,
                    }
                }
                () = self.timer.fired() => {
                    let effects = self.state.commit_fired();
                    self.execute(effects);
                }
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    match joined {
                        Ok(completion) => self.handle_completion(completion).await?,
                        Err(err) => warn!(%err, "fetch task failed"),
                    }
                }
            }
        }

        Ok((self.state, self.output))
    }

    fn emit(&mut self, text: &str) -> Result<(), RuntimeError> {
        writeln!(self.output, "{text}").map_err(RuntimeError::Output)
    }

    /// Returns false when the session should end.
    fn handle_line(&mut self, line: &str) -> Result<bool, RuntimeError> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                self.emit(&err.to_string())?;
                return Ok(true);
            }
        };
        debug!(?command, "dashboard command");

        match command {
            DashboardCommand::SelectProduct(product_id) => {
                let effects = self.state.select_product(product_id);
                self.execute(effects);
            }
            DashboardCommand::SelectModel(model_type) => {
                let effects = self.state.select_model(model_type);
                self.emit(&format!("Model: {model_type}"))?;
                self.execute(effects);
            }
            DashboardCommand::Edit(field, text) => match self.state.edit(field, &text) {
                Ok(effects) => {
                    if self.state.is_field_pending(field) {
                        self.emit(&format!(
                            "{} = {} (pending)",
                            field.label(),
                            self.state.raw().get(field)
                        ))?;
                    }
                    self.execute(effects);
                }
                Err(err) => self.emit(&format!("Rejected: {err}"))?,
            },
            DashboardCommand::Show => {
                let view = render_dashboard(&self.state);
                self.emit(&view)?;
            }
            DashboardCommand::Help => self.emit(HELP)?,
            DashboardCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn handle_completion(&mut self, completion: Completion) -> Result<(), RuntimeError> {
        match completion {
            Completion::Products(result) => {
                let effects = self.state.products_resolved(result);
                if let Some(error) = self.state.error() {
                    let message = format!("Error: {error}");
                    self.emit(&message)?;
                }
                self.execute(effects);
            }
            Completion::Cycle(cycle, outcome) => {
                if !self.state.cycle_resolved(cycle, outcome) {
                    return Ok(());
                }
                let view = render_dashboard(&self.state);
                self.emit(&view)?;
                self.write_chart().await?;
            }
            Completion::Inventory(generation, result) => {
                if self.state.inventory_resolved(generation, result) {
                    let table = self.state.inventory().render();
                    self.emit(&table)?;
                }
            }
        }
        Ok(())
    }

    async fn write_chart(&mut self) -> Result<(), RuntimeError> {
        let (Some(path), Some(forecast), Some(product_id)) = (
            self.chart_path.clone(),
            self.state.forecast(),
            self.state.selected_product(),
        ) else {
            return Ok(());
        };
        let values = forecast.forecast.clone();
        let product_id = product_id.to_string();
        match write_forecast_chart_png(&path, &product_id, &values).await {
            Ok(()) => self.emit(&format!("Forecast chart written to {path}")),
            Err(err) => {
                warn!(%err, %path, "forecast chart not written");
                self.emit(&format!("Chart not written: {err}"))
            }
        }
    }

    fn execute(&mut self, effects: Vec<DashboardEffect>) {
        for effect in effects {
            match effect {
                DashboardEffect::ScheduleCommit => self.timer.schedule(),
                DashboardEffect::CancelCommit => self.timer.cancel(),
                DashboardEffect::FetchProducts => {
                    let source = Arc::clone(&self.source);
                    self.tasks
                        .spawn(async move { Completion::Products(source.get_products().await) });
                }
                DashboardEffect::FetchCycle(request) => {
                    let source = Arc::clone(&self.source);
                    self.tasks.spawn(async move {
                        let outcome = fetch_cycle(source.as_ref(), &request).await;
                        Completion::Cycle(request.cycle, outcome)
                    });
                }
                DashboardEffect::FetchInventory(request) => {
                    let source = Arc::clone(&self.source);
                    self.tasks.spawn(async move {
                        let result = source.get_inventory(&request.product_id).await;
                        Completion::Inventory(request.generation, result)
                    });
                }
            }
        }
    }
}
