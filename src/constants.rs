//! Fixed identifiers the host dashboard knows this plugin by

/// Name the plugin registers under
pub const PLUGIN_NAME: &str = "traceflowPlugin";

/// Description sent with the registration
pub const PLUGIN_DESCRIPTION: &str = "Create and inspect Antrea Traceflow requests";

/// Action that creates a new Traceflow
pub const ADD_TRACEFLOW_ACTION: &str = "traceflowPlugin/addTf";

/// Action that generates the graph for an existing Traceflow
pub const SHOW_GRAPH_ACTION: &str = "traceflowPlugin/showGraphAction";

/// Route serving the plugin page
pub const COMPONENTS_ROUTE: &str = "/components";

/// Default link target prefix for the detail view of a Traceflow
pub const DEFAULT_DETAIL_BASE_PATH: &str =
    "/cluster-overview/custom-resources/traceflows.antrea.tanzu.vmware.com";

// Table column headings
pub const TRACE_NAME_COL: &str = "Trace";
pub const SRC_NAMESPACE_COL: &str = "Source Namespace";
pub const SRC_POD_COL: &str = "Source Pod";
pub const DST_NAMESPACE_COL: &str = "Destination Namespace";
pub const DST_POD_COL: &str = "Destination Pod";
pub const DETAIL_COL: &str = "Detailed Information";

/// All table columns, in display order
pub const TRACE_TABLE_COLUMNS: [&str; 6] = [
    TRACE_NAME_COL,
    SRC_NAMESPACE_COL,
    SRC_POD_COL,
    DST_NAMESPACE_COL,
    DST_POD_COL,
    DETAIL_COL,
];
