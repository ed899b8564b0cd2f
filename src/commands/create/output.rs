//! Output formatting for create command results.

use crate::output::Outputable;
use super::execute::CreateResult;

impl Outputable for CreateResult {
    fn to_table(&self) -> String {
        let kind = if self.materialized { "materialized view" } else { "view" };
        let mut lines = vec![format!("Created {} {} for {}", kind, self.view, self.collection)];

        if self.relations.is_empty() {
            lines.push("No nested relations.".to_string());
        } else {
            lines.push(String::new());
            lines.push(format!("Nested relations ({}):", self.relations.len()));
            for relation in &self.relations {
                lines.push(format!("  {}", relation));
            }
        }

        lines.join("\n")
    }
}
