//! Init command implementation

use clap::Args;
use doclink_core::DocLinkError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Init command arguments
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Data source name
    #[arg(default_value = "my-store")]
    pub name: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Account endpoint
    #[arg(long, default_value = "https://localhost:8081/")]
    pub host: String,

    /// Database id to resolve on connect
    #[arg(long, default_value = "MyDbId")]
    pub database: String,

    /// Collection id to resolve on connect
    #[arg(long, default_value = "MyCollId")]
    pub collection: String,

    /// Overwrite an existing data source file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub async fn execute(&self) -> Result<(), DocLinkError> {
        info!("Initializing data source: {}", self.name);

        let output_dir = Path::new(&self.output);
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }

        let config_path = output_dir.join("datasource.yaml");
        if config_path.exists() && !self.force {
            return Err(DocLinkError::Config(format!(
                "{} already exists; pass --force to overwrite",
                config_path.display()
            )));
        }
        fs::write(&config_path, self.generate_config())?;
        info!("Created: {}", config_path.display());

        let env_path = output_dir.join(".env.example");
        fs::write(&env_path, self.generate_env_example())?;
        info!("Created: {}", env_path.display());

        println!("\nData source '{}' initialized.", self.name);
        println!("\nNext steps:");
        println!("  1. Copy .env.example to .env and set DOCLINK_MASTER_KEY");
        println!("  2. Run: doclink check -f {}", config_path.display());

        Ok(())
    }

    /// Generate data source file content
    fn generate_config(&self) -> String {
        format!(
            r#"# Doclink data source

name: {}
connector: documentdb
host: "{}"
masterKey: "{{{{ env.DOCLINK_MASTER_KEY }}}}"
databaseId: {}
collectionId: {}
"#,
            self.name, self.host, self.database, self.collection
        )
    }

    /// Generate .env.example content
    fn generate_env_example(&self) -> String {
        r#"# Account master key
DOCLINK_MASTER_KEY=

# Add other environment variables here
"#
        .to_string()
    }
}
