use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Command-line client for the storefront edge", long_about = None)]
struct Cli {
    /// Public edge URL.
    #[arg(short, long, default_value = "http://localhost:3002")]
    url: String,

    /// Admin API URL.
    #[arg(long, default_value = "http://localhost:8081")]
    admin_url: String,

    /// Admin API key.
    #[arg(short, long, env = "EDGE_ADMIN_KEY", default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products,
    /// Show one product
    Product { id: i64 },
    /// List orders
    Orders,
    /// Show a session's cart
    Cart { session: String },
    /// Show a session's cart totals
    Summary { session: String },
    /// Add (or merge) a product into a cart
    Add {
        session: String,
        product_id: i64,
        quantity: i64,
        price: serde_json::Number,
        name: String,
    },
    /// Overwrite a line's quantity (0 removes it)
    Set {
        session: String,
        product_id: i64,
        quantity: i64,
    },
    /// Remove a product from a cart
    Remove { session: String, product_id: i64 },
    /// Empty a cart
    Clear { session: String },
    /// Place an order for a cart's contents
    Checkout { session: String },
    /// Edge status (admin)
    Status,
    /// Cart registry statistics (admin)
    Carts,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = |method: Method, path: String| client.request(method, format!("{}{}", cli.url, path));

    let request = match &cli.command {
        Commands::Products => api(Method::GET, "/api/products".into()),
        Commands::Product { id } => api(Method::GET, format!("/api/products/{id}")),
        Commands::Orders => api(Method::GET, "/api/orders".into()),
        Commands::Cart { session } => api(Method::GET, format!("/api/cart/{session}")),
        Commands::Summary { session } => api(Method::GET, format!("/api/cart/{session}/summary")),
        Commands::Add {
            session,
            product_id,
            quantity,
            price,
            name,
        } => api(Method::POST, format!("/api/cart/{session}")).json(&json!({
            "productId": product_id,
            "quantity": quantity,
            "price": price,
            "name": name,
        })),
        Commands::Set {
            session,
            product_id,
            quantity,
        } => api(Method::PUT, format!("/api/cart/{session}/{product_id}"))
            .json(&json!({ "quantity": quantity })),
        Commands::Remove {
            session,
            product_id,
        } => api(Method::DELETE, format!("/api/cart/{session}/{product_id}")),
        Commands::Clear { session } => api(Method::DELETE, format!("/api/cart/{session}")),
        Commands::Checkout { session } => {
            api(Method::POST, format!("/api/cart/{session}/checkout"))
        }
        Commands::Status => admin(&client, &cli, "/admin/status")?,
        Commands::Carts => admin(&client, &cli, "/admin/carts")?,
    };

    print_response(request.send().await?).await
}

fn admin(
    client: &reqwest::Client,
    cli: &Cli,
    path: &str,
) -> Result<RequestBuilder, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );
    Ok(client
        .get(format!("{}{}", cli.admin_url, path))
        .headers(headers))
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: edge returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
