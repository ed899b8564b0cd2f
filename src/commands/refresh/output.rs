use crate::output::Outputable;
use super::execute::RefreshResult;

impl Outputable for RefreshResult {
    fn to_table(&self) -> String {
        self.message.clone()
    }
}
