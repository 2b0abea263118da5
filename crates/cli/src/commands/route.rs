use std::process;

use hindsight_routes::{
    route_for_archival_workflows, route_for_event_history, route_for_event_history_item,
    route_for_namespace, route_for_pending_activities, route_for_stack_trace, route_for_workers,
    route_for_workflow, route_for_workflow_query, route_for_workflows, RouteError,
    RouteParameters,
};

use crate::{report_error, RouteKind};

pub(crate) struct RouteArgs {
    pub namespace: Option<String>,
    pub workflow: Option<String>,
    pub run: Option<String>,
    pub view: Option<String>,
    pub event_id: Option<String>,
    pub endpoint: Option<String>,
    /// `key=value` strings.
    pub params: Vec<String>,
}

pub(crate) fn cmd_route(kind: RouteKind, args: RouteArgs, quiet: bool) {
    let params = match route_parameters(args) {
        Ok(p) => p,
        Err(msg) => {
            report_error(&format!("error: {}", msg), quiet);
            process::exit(1);
        }
    };

    match derive_route(kind, &params) {
        Ok(path) => println!("{}", path),
        Err(e) => {
            report_error(&format!("error: {}", e), quiet);
            process::exit(1);
        }
    }
}

fn route_parameters(args: RouteArgs) -> Result<RouteParameters, String> {
    let search_params = args
        .params
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| format!("invalid --param '{}': expected KEY=VALUE", raw))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RouteParameters {
        namespace: args.namespace,
        workflow: args.workflow,
        run: args.run,
        view: args.view,
        event_id: args.event_id,
        endpoint: args.endpoint,
        search_params,
    })
}

fn derive_route(kind: RouteKind, params: &RouteParameters) -> Result<String, RouteError> {
    match kind {
        RouteKind::Namespace => route_for_namespace(params),
        RouteKind::Workflows => route_for_workflows(params),
        RouteKind::Archival => route_for_archival_workflows(params),
        RouteKind::Workflow => route_for_workflow(params),
        RouteKind::History => route_for_event_history(params),
        RouteKind::Event => route_for_event_history_item(params),
        RouteKind::Workers => route_for_workers(params),
        RouteKind::StackTrace => route_for_stack_trace(params),
        RouteKind::Query => route_for_workflow_query(params),
        RouteKind::PendingActivities => route_for_pending_activities(params),
    }
}
