use std::error::Error;

use super::FindCmd;
use crate::auth::Action;
use crate::commands::all::RowsResult;
use crate::commands::{to_filters, Execute};
use crate::context::AppContext;
use crate::queries::{ListOptions, QueryService};

impl Execute for FindCmd {
    type Output = RowsResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Read)?;

        let options = ListOptions {
            limit: self.limit,
            offset: self.offset,
            sort_field: self.sort,
            sort_order: self.order,
        };
        let rows = QueryService::new(ctx.db()?).list(&self.collection, &to_filters(&self.filters), &options)?;
        Ok(RowsResult {
            collection: self.collection,
            rows,
        })
    }
}
