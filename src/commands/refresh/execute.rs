use std::error::Error;

use serde::Serialize;

use super::RefreshCmd;
use crate::auth::Action;
use crate::commands::Execute;
use crate::context::AppContext;
use crate::views::{view_name, ViewManager};

/// Result of the refresh command execution
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    pub message: String,
    pub view: String,
}

impl Execute for RefreshCmd {
    type Output = RefreshResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Create)?;

        let view = view_name(&self.collection);
        ViewManager::new(ctx.db()?).refresh(&view)?;

        Ok(RefreshResult {
            message: format!("Refreshed materialized view {}", view),
            view,
        })
    }
}
