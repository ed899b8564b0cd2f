use crate::output::Outputable;
use super::execute::DropResult;

impl Outputable for DropResult {
    fn to_table(&self) -> String {
        if self.dropped {
            format!("Dropped {}", self.view)
        } else {
            format!("No view named {}", self.view)
        }
    }
}
