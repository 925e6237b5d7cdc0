use clap::{Parser, Subcommand};
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "forms-cli")]
#[command(about = "Query the forms filter proxy from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Credential forwarded to the forms API (e.g. "Bearer sk_...").
    #[arg(short, long, env = "FORMS_API_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the proxy is up
    Health,
    /// Fetch one page of filtered responses
    Query {
        /// Form identifier
        form_id: String,

        /// Filter as `id:condition:value`; repeat for AND
        #[arg(short, long = "filter", required = true)]
        filters: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        offset: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Query { form_id, filters, limit, offset } => {
            let clauses = filters
                .iter()
                .map(|f| parse_filter(f))
                .collect::<Result<Vec<_>, _>>()?;

            let mut query = Vec::new();
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }
            if let Some(offset) = offset {
                query.push(("offset", offset.to_string()));
            }

            let mut req = client
                .get(format!("{}/{}/filteredResponses", cli.url, form_id))
                .query(&query)
                .json(&clauses);
            if let Some(key) = &cli.key {
                req = req.header(AUTHORIZATION, key);
            }
            print_response(req.send().await?).await?;
        }
    }

    Ok(())
}

/// Parse `id:condition:value`. Values that read as numbers are sent as numbers.
fn parse_filter(raw: &str) -> Result<Value, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(id), Some(condition), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("filter '{raw}' must look like id:condition:value"));
    };

    let value = if let Ok(n) = value.parse::<i64>() {
        json!(n)
    } else {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => json!(n),
            _ => json!(value),
        }
    };
    Ok(json!({ "id": id, "condition": condition, "value": value }))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
