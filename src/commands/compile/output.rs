use crate::output::Outputable;
use super::execute::CompileResult;

impl Outputable for CompileResult {
    fn to_table(&self) -> String {
        let relations = if self.relations.is_empty() {
            "none".to_string()
        } else {
            self.relations.join(", ")
        };
        format!("-- {} (relations: {})\n{};", self.view, relations, self.sql)
    }
}
