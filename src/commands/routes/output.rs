//! Output formatting for the route directory.

use crate::output::Outputable;
use super::execute::RoutesResult;

impl Outputable for RoutesResult {
    fn to_table(&self) -> String {
        let width = self.routes.iter().map(|r| r.command.len()).max().unwrap_or(0);
        let mut lines = vec![format!("Routes ({}):", self.routes.len())];
        for route in &self.routes {
            lines.push(format!(
                "  {:width$}  {} {}",
                route.command,
                route.method,
                route.path,
                width = width
            ));
            lines.push(format!("  {:width$}    {}", "", route.description, width = width));
        }
        lines.join("\n")
    }
}
