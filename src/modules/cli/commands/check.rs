//! Check command implementation

use clap::Args;
use doclink_core::{DataSource, DocLinkError};
use doclink_parser::parse_file;
use tracing::info;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, config_path: &str) -> Result<(), DocLinkError> {
        info!("Checking data source file: {}", config_path);

        let source = parse_file(config_path)?;
        println!("{}", self.render(&source)?);

        Ok(())
    }

    fn render(&self, source: &DataSource) -> Result<String, DocLinkError> {
        let settings = &source.settings;
        if self.json {
            let summary = serde_json::json!({
                "name": source.name,
                "connector": source.connector.to_string(),
                "host": settings.host(),
                "masterKey": settings.redacted_master_key(),
                "databaseId": settings.database_id(),
                "collectionId": settings.collection_id(),
            });
            return Ok(serde_json::to_string_pretty(&summary)?);
        }

        Ok(format!(
            "Data source '{}' is valid\n  connector:    {}\n  host:         {}\n  masterKey:    {}\n  databaseId:   {}\n  collectionId: {}",
            source.name,
            source.connector,
            settings.host(),
            settings.redacted_master_key(),
            settings.database_id(),
            settings.collection_id(),
        ))
    }
}
