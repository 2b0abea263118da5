//! Route deriver: canonical paths for every navigational concept.
//!
//! Each function takes [`RouteParameters`] and extends the path of the
//! level above it (namespace, then workflow list, then workflow, then
//! history), so segment construction lives in exactly one place.
//!
//! ```text
//! /namespaces/{namespace}
//! /namespaces/{namespace}/workflows
//! /namespaces/{namespace}/archival
//! /namespaces/{namespace}/workflows/{workflow}/{run}
//! /namespaces/{namespace}/workflows/{workflow}/{run}/history[/{view}[/{eventId}]]
//! /namespaces/{namespace}/workflows/{workflow}/{run}/{workers|stack-trace|query|pending-activities}
//! ```
//!
//! Required parameters that are absent or empty are a caller error
//! ([`RouteError::MissingParameter`]), never a silently malformed path.

pub mod error;
pub mod query;

pub use error::RouteError;
pub use query::{to_url, update_query_parameter};

use hindsight_interchange::EventView;

/// Inputs for route derivation. Each route reads only the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters {
    pub namespace: Option<String>,
    pub workflow: Option<String>,
    pub run: Option<String>,
    /// Raw view tag; unrecognized tags fall back to the history root.
    pub view: Option<String>,
    pub event_id: Option<String>,
    /// Trailing segment appended to list/workflow/history routes.
    pub endpoint: Option<String>,
    /// Serialized onto the URL only when `endpoint` is present.
    pub search_params: Vec<(String, String)>,
}

impl RouteParameters {
    pub fn new(namespace: impl Into<String>) -> Self {
        RouteParameters {
            namespace: Some(namespace.into()),
            ..RouteParameters::default()
        }
    }

    pub fn with_workflow(mut self, workflow: impl Into<String>, run: impl Into<String>) -> Self {
        self.workflow = Some(workflow.into());
        self.run = Some(run.into());
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_search_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.search_params.push((key.into(), value.into()));
        self
    }

    /// The recognized view, if any.
    pub fn event_view(&self) -> Option<EventView> {
        self.view.as_deref().and_then(EventView::parse)
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().filter(|e| !e.is_empty())
    }
}

fn required<'a>(
    value: &'a Option<String>,
    parameter: &'static str,
) -> Result<&'a str, RouteError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(RouteError::MissingParameter { parameter })
}

fn route_if_endpoint(route: String, params: &RouteParameters) -> String {
    match params.endpoint() {
        Some(endpoint) => to_url(&format!("{}/{}", route, endpoint), &params.search_params),
        None => route,
    }
}

// ──────────────────────────────────────────────
// Namespace level
// ──────────────────────────────────────────────

pub fn route_for_namespace(params: &RouteParameters) -> Result<String, RouteError> {
    let namespace = required(&params.namespace, "namespace")?;
    Ok(format!("/namespaces/{}", namespace))
}

fn workflows_path(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/workflows", route_for_namespace(params)?))
}

pub fn route_for_workflows(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(route_if_endpoint(workflows_path(params)?, params))
}

pub fn route_for_archival_workflows(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/archival", route_for_namespace(params)?))
}

// ──────────────────────────────────────────────
// Workflow level
// ──────────────────────────────────────────────

fn workflow_path(params: &RouteParameters) -> Result<String, RouteError> {
    let base = workflows_path(params)?;
    let workflow = required(&params.workflow, "workflow")?;
    let run = required(&params.run, "run")?;
    Ok(format!("{}/{}/{}", base, workflow, run))
}

pub fn route_for_workflow(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(route_if_endpoint(workflow_path(params)?, params))
}

pub fn route_for_workers(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/workers", workflow_path(params)?))
}

pub fn route_for_stack_trace(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/stack-trace", workflow_path(params)?))
}

pub fn route_for_workflow_query(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/query", workflow_path(params)?))
}

pub fn route_for_pending_activities(params: &RouteParameters) -> Result<String, RouteError> {
    Ok(format!("{}/pending-activities", workflow_path(params)?))
}

// ──────────────────────────────────────────────
// Event history level
// ──────────────────────────────────────────────

/// History root, or the view-specific history path.
///
/// A recognized view yields `.../history/{view}` and ignores `endpoint`.
/// An unrecognized view yields the bare history root. Without a view,
/// `endpoint` and search params are applied when given.
pub fn route_for_event_history(params: &RouteParameters) -> Result<String, RouteError> {
    let history = format!("{}/history", workflow_path(params)?);
    match params.view.as_deref().filter(|v| !v.is_empty()) {
        None => Ok(route_if_endpoint(history, params)),
        Some(_) => match params.event_view() {
            Some(view) => Ok(format!("{}/{}", history, view)),
            None => Ok(history),
        },
    }
}

/// A single event within a view. Requires a recognized view.
pub fn route_for_event_history_item(params: &RouteParameters) -> Result<String, RouteError> {
    let event_id = required(&params.event_id, "eventId")?;
    let view = required(&params.view, "view")?;
    if EventView::parse(view).is_none() {
        return Err(RouteError::InvalidView {
            view: view.to_string(),
        });
    }
    Ok(format!("{}/{}", route_for_event_history(params)?, event_id))
}
