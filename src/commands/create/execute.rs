use std::error::Error;

use serde::Serialize;

use super::CreateCmd;
use crate::auth::Action;
use crate::commands::Execute;
use crate::compiler::compile;
use crate::context::AppContext;
use crate::views::{view_name, ViewManager};

/// Result of the create command execution
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
    /// Always `"Success"`
    pub data: String,
    pub collection: String,
    pub view: String,
    pub materialized: bool,
    /// Root fields compiled into nested JSON
    pub relations: Vec<String>,
}

impl Execute for CreateCmd {
    type Output = CreateResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Create)?;

        let tree = ctx.resolve(&self.collection)?;
        let compiled = compile(&tree);
        let view = ViewManager::new(ctx.db()?).create_or_replace(
            &view_name(&self.collection),
            &compiled,
            self.materialized,
        )?;

        Ok(CreateResult {
            data: "Success".to_string(),
            collection: view.collection,
            view: view.name,
            materialized: view.materialized,
            relations: tree.relation_fields().into_iter().map(str::to_string).collect(),
        })
    }
}
