use std::error::Error;

use serde::Serialize;
use serde_json::Value;

use super::AllCmd;
use crate::auth::Action;
use crate::commands::Execute;
use crate::context::AppContext;
use crate::queries::QueryService;

/// Documents read from a view. Serializes as a bare JSON array.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RowsResult {
    #[serde(skip)]
    pub collection: String,
    pub rows: Vec<Value>,
}

impl Execute for AllCmd {
    type Output = RowsResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Read)?;

        let rows = QueryService::new(ctx.db()?).all(&self.collection)?;
        Ok(RowsResult {
            collection: self.collection,
            rows,
        })
    }
}
