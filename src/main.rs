use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use protein_dashboard::{Backend, DashboardConfig, HttpServer, ProteinDashboard};
use tracing::info;

#[derive(Parser)]
#[command(name = "protein-dashboard", version, about = "Protein dashboard HTTP server")]
struct Args {
    /// YAML config file
    #[arg(long, env = "PROTEIN_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Serve the in-memory backend loaded from this JSON dataset
    #[arg(long)]
    dataset: Option<PathBuf>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long, env = "PROTEIN_DASHBOARD_PORT")]
    port: Option<u16>,

    #[arg(long, env = "MONGO_URI")]
    mongo_uri: Option<String>,

    #[arg(long, env = "NEO4J_URI")]
    neo4j_uri: Option<String>,

    #[arg(long, env = "NEO4J_USER")]
    neo4j_user: Option<String>,

    #[arg(long, env = "NEO4J_PASSWORD", hide_env_values = true)]
    neo4j_password: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::load_or_default(self.config.as_deref())
            .context("loading dashboard config")?;

        if let Some(dataset) = self.dataset {
            config.backend = Backend::Embedded;
            config.embedded.dataset = Some(dataset);
        }
        if let Some(address) = self.address {
            config.http.address = address;
        }
        if let Some(port) = self.port {
            config.http.port = port;
        }
        if let Some(uri) = self.mongo_uri {
            config.mongo.uri = uri;
        }
        if let Some(uri) = self.neo4j_uri {
            config.neo4j.uri = uri;
        }
        if let Some(user) = self.neo4j_user {
            config.neo4j.user = user;
        }
        if let Some(password) = self.neo4j_password {
            config.neo4j.password = password;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Args::parse().into_config()?;

    info!("Protein Dashboard v{}", protein_dashboard::version());
    info!("Backend: {:?}", config.backend);

    let dashboard = ProteinDashboard::connect(&config)
        .await
        .context("connecting to stores")?;

    let server = HttpServer::new(Arc::new(dashboard), config.http.clone());
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("http server failed: {}", e))?;

    Ok(())
}
