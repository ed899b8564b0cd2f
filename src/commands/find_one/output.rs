use crate::output::{format_documents, Outputable};
use super::execute::DocumentResult;

impl Outputable for DocumentResult {
    fn to_table(&self) -> String {
        if self.is_empty() {
            return "No matching row.".to_string();
        }
        format_documents(std::slice::from_ref(&self.document)).concat()
    }
}
