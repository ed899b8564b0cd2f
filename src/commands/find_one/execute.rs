use std::error::Error;

use serde::Serialize;
use serde_json::{Map, Value};

use super::FindOneCmd;
use crate::auth::Action;
use crate::commands::{to_filters, Execute};
use crate::context::AppContext;
use crate::queries::QueryService;

/// The matching document, or an empty object when nothing matched.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DocumentResult {
    pub document: Value,
}

impl DocumentResult {
    pub fn is_empty(&self) -> bool {
        self.document.as_object().is_some_and(Map::is_empty)
    }
}

impl Execute for FindOneCmd {
    type Output = DocumentResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Read)?;

        let found = QueryService::new(ctx.db()?).find_one(&self.collection, &to_filters(&self.filters))?;
        Ok(DocumentResult {
            document: found.unwrap_or_else(|| Value::Object(Map::new())),
        })
    }
}
