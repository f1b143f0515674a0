use anyhow::Result;
use clap::Parser;

// 导入库模块
use cypher_plugin::api;

#[derive(Parser)]
#[clap(version, author = "GraphDB Contributors")]
enum Cli {
    /// Start the HTTP service
    Serve {
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
    /// Execute a query directly and print the JSON representation
    Query {
        #[clap(short, long)]
        query: String,
        /// Graph data file (JSON) to load before running the query
        #[clap(short, long)]
        graph: Option<String>,
        #[clap(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Serve { config } => {
            println!("Starting service with config: {}", config);
            api::start_service(config).await?;
        }
        Cli::Query {
            query,
            graph,
            config,
        } => {
            let config = config
                .map(|path| api::load_config(&path))
                .unwrap_or_default();
            api::execute_query(&query, graph.as_deref(), &config)?;
        }
    }

    Ok(())
}
