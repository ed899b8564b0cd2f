use std::error::Error;

use serde::Serialize;

use super::CompileCmd;
use crate::auth::Action;
use crate::commands::Execute;
use crate::compiler::compile;
use crate::context::AppContext;
use crate::resolver::FieldTree;
use crate::views::view_name;

/// Result of the compile command execution
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    pub collection: String,
    pub view: String,
    pub relations: Vec<String>,
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<FieldTree>,
}

impl Execute for CompileCmd {
    type Output = CompileResult;

    fn execute(self, ctx: &AppContext) -> Result<Self::Output, Box<dyn Error>> {
        ctx.authorize(&self.collection, Action::Read)?;

        let tree = ctx.resolve(&self.collection)?;
        let compiled = compile(&tree);

        Ok(CompileResult {
            view: view_name(&compiled.root),
            collection: compiled.root,
            relations: tree.relation_fields().into_iter().map(str::to_string).collect(),
            sql: compiled.sql,
            tree: self.tree.then_some(tree),
        })
    }
}
