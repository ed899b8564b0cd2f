use std::error::Error;

use serde::Serialize;

use super::DropCmd;
use crate::auth::Action;
use crate::commands::Execute;
use crate::context::AppContext;
use crate::views::{view_name, ViewManager};

/// Result of the drop command execution
#[derive(Debug, Clone, Serialize)]
pub struct DropResult {
    pub view: String,
    /// False when there was nothing to drop
    pub dropped: bool,
}

impl Execute for DropCmd {
    type Output = DropResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Create)?;

        let view = view_name(&self.collection);
        let dropped = ViewManager::new(ctx.db()?).drop(&view)?;
        Ok(DropResult { view, dropped })
    }
}
