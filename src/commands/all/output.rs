use crate::output::{format_documents, Outputable};
use super::execute::RowsResult;

impl Outputable for RowsResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("{}: {} row(s)", self.collection, self.rows.len())];
        for document in format_documents(&self.rows) {
            lines.push(String::new());
            lines.push(document);
        }
        lines.join("\n")
    }
}
