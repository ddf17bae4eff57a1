//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::StreamDispatcher;
use crate::error::{Error, Result};
use crate::output::SingerWriter;
use crate::registry::{ReportRegistry, StreamKind};
use crate::schema::{create_table_statement, Catalog, SchemaCatalog};
use crate::state::StateManager;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self, cancel: &CancellationToken) -> Result<()> {
        match &self.cli.command {
            Commands::Discover => self.discover(),
            Commands::Sync { streams } => self.sync(streams.as_deref(), cancel).await,
            Commands::Ddl { dataset } => self.ddl(dataset),
        }
    }

    fn load_config(&self) -> Result<TapConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use --config)"))?;
        TapConfig::from_file(path)
    }

    fn load_schemas(&self) -> Result<SchemaCatalog> {
        let schemas = SchemaCatalog::load_dir(&self.cli.schemas)?;
        info!(
            "Loaded {} schemas from {}",
            schemas.len(),
            self.cli.schemas.display()
        );
        Ok(schemas)
    }

    fn load_catalog(&self, schemas: &SchemaCatalog) -> Result<Catalog> {
        match &self.cli.catalog {
            Some(path) => Catalog::from_file(path),
            None => Ok(schemas.discover()),
        }
    }

    fn discover(&self) -> Result<()> {
        let catalog = self.load_schemas()?.discover();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        Ok(())
    }

    async fn sync(&self, streams: Option<&str>, cancel: &CancellationToken) -> Result<()> {
        let config = self.load_config()?;
        let schemas = self.load_schemas()?;
        let catalog = self.load_catalog(&schemas)?;

        let state = match &self.cli.state {
            Some(path) => StateManager::from_file(path)?,
            None => StateManager::in_memory(),
        };
        let only = Commands::stream_filter(streams);

        let dispatcher = StreamDispatcher::new(config, schemas)?.with_state(state);
        let mut writer = SingerWriter::stdout();
        let stats = dispatcher
            .sync_catalog(&catalog, only.as_deref(), &mut writer, cancel)
            .await?;
        info!(
            "Wrote {} messages; {} records across {} streams",
            writer.written(),
            stats.records_synced,
            stats.streams_synced
        );
        Ok(())
    }

    fn ddl(&self, dataset: &str) -> Result<()> {
        let schemas = self.load_schemas()?;
        for statement in ddl_statements(&ReportRegistry::builtin(), &schemas, dataset)? {
            println!("{statement}");
        }
        Ok(())
    }
}

/// `CREATE TABLE` statements for every report stream with a schema file
pub fn ddl_statements(
    registry: &ReportRegistry,
    schemas: &SchemaCatalog,
    dataset: &str,
) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    for stream_id in registry.stream_ids() {
        if !matches!(registry.resolve(stream_id)?, StreamKind::Report(_)) {
            continue;
        }
        let Ok(schema) = schemas.get(stream_id) else {
            warn!("No schema file for {stream_id}, skipping");
            continue;
        };
        statements.push(create_table_statement(dataset, stream_id, &schema.fields()?));
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ReportDescriptor, StatsLevel};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_stream_list() {
        assert_eq!(
            Commands::parse_stream_list(" ad_reports, ,campaign_device_reports "),
            vec!["ad_reports", "campaign_device_reports"]
        );
        assert!(Commands::parse_stream_list("").is_empty());
    }

    #[test]
    fn test_empty_stream_filter_selects_all() {
        assert_eq!(Commands::stream_filter(None), None);
        assert_eq!(Commands::stream_filter(Some("")), None);
        assert_eq!(Commands::stream_filter(Some(" , ")), None);
        assert_eq!(
            Commands::stream_filter(Some("ad_reports")),
            Some(vec!["ad_reports".to_string()])
        );
    }

    #[test]
    fn test_ddl_covers_report_streams_only() {
        let registry = ReportRegistry::empty()
            .with_report(ReportDescriptor::new("device_reports", 1, "event_date"))
            .with_report(ReportDescriptor::new("keyword_reports", 2, "event_date"))
            .with_stats("ad_reports", StatsLevel::Ad);
        let schemas = SchemaCatalog::new()
            .with_schema(
                "device_reports",
                json!({"properties": {
                    "event_date": {"type": "string", "label": "Time Event Date"},
                    "clicks": {"type": "integer", "label": "Clicks"}
                }}),
            )
            .with_schema("ad_reports", json!({"properties": {}}));

        let statements = ddl_statements(&registry, &schemas, "warehouse").unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE warehouse.device_reports (event_date DATE,clicks INT64) \
                 PARTITION BY event_date;"
            ]
        );
    }
}
