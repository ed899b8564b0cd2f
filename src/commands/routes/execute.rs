use std::error::Error;

use serde::Serialize;

use super::RoutesCmd;
use crate::commands::Execute;
use crate::context::AppContext;

/// One operation in the route directory.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub command: &'static str,
    pub description: &'static str,
}

/// Result of the routes command execution
#[derive(Debug, Clone, Serialize)]
pub struct RoutesResult {
    pub routes: Vec<Route>,
}

const ROUTES: [Route; 8] = [
    Route {
        method: "GET",
        path: "/",
        command: "routes",
        description: "This directory",
    },
    Route {
        method: "GET",
        path: "/create/:collection[?materialized=true]",
        command: "create <collection> [--materialized]",
        description: "Compile relations and (re)create <collection>_view",
    },
    Route {
        method: "GET",
        path: "/refresh/:collection",
        command: "refresh <collection>",
        description: "Refresh a materialized view",
    },
    Route {
        method: "GET",
        path: "/drop/:collection",
        command: "drop <collection>",
        description: "Drop <collection>_view",
    },
    Route {
        method: "GET",
        path: "/compile/:collection",
        command: "compile <collection>",
        description: "Show the compiled SQL without creating anything",
    },
    Route {
        method: "GET",
        path: "/get/:collection/all",
        command: "all <collection>",
        description: "Up to 100 documents",
    },
    Route {
        method: "GET",
        path: "/get/:collection/find?field=value...",
        command: "find <collection> -w field=value...",
        description: "Documents matching every field exactly (default limit 10)",
    },
    Route {
        method: "GET",
        path: "/get/:collection/findOne?field=value...",
        command: "find-one <collection> -w field=value...",
        description: "First matching document, or {}",
    },
];

impl Execute for RoutesCmd {
    type Output = RoutesResult;

    fn execute(self, _ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        Ok(RoutesResult {
            routes: ROUTES.to_vec(),
        })
    }
}
