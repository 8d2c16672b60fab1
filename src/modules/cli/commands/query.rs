//! Query command implementation

use clap::Args;
use doclink_core::{build_query, DocLinkError, Filter};
use doclink_types::QuerySpec;
use tracing::debug;

/// Query command arguments
#[derive(Args, Debug)]
pub struct QueryCommand {
    /// Entity type the query is scoped to
    #[arg(value_name = "TYPE")]
    pub entity_type: String,

    /// Filter as JSON, e.g. '{"where":{"color":"red"}}'
    #[arg(long)]
    pub filter: Option<String>,
}

impl QueryCommand {
    /// Execute the query command
    pub fn execute(&self) -> Result<(), DocLinkError> {
        let query = self.build()?;
        println!("{}", serde_json::to_string_pretty(&query)?);
        Ok(())
    }

    fn build(&self) -> Result<QuerySpec, DocLinkError> {
        let filter = self
            .filter
            .as_deref()
            .map(|raw| {
                serde_json::from_str::<Filter>(raw)
                    .map_err(|e| DocLinkError::Validation(format!("Invalid filter: {}", e)))
            })
            .transpose()?;
        debug!(entity_type = %self.entity_type, ?filter, "building query");

        build_query(&self.entity_type, filter.as_ref())
    }
}
